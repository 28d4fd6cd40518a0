use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "report-compare")]
#[command(about = "レポート定義ファイルのスキーマ比較ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 複数ファイルのスキーマを比較してExcelレポートを出力
    Compare {
        /// 比較するファイルまたはフォルダ (csv/xml/json)
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// 出力フォルダ（省略時は設定値）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// 合格とみなす総合一致率（%）
        #[arg(short, long)]
        threshold: Option<f64>,
    },

    /// 1ファイルのスキーマ指紋を表示
    Inspect {
        /// 対象ファイル
        #[arg(required = true)]
        file: PathBuf,

        /// JSONで出力
        #[arg(long)]
        json: bool,
    },

    /// 設定を表示/編集
    Config {
        /// 出力フォルダを設定
        #[arg(long)]
        set_output_dir: Option<PathBuf>,

        /// 合格閾値（%）を設定
        #[arg(long)]
        set_threshold: Option<f64>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
