use clap::Parser;
use report_schema_compare::{cli, compare, config, error, extractor, intake, logging};
use cli::{Cli, Commands};
use config::Config;
use error::Result;
use report_compare_common::join_values;
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);
    let config = Config::load()?;

    match cli.command {
        Commands::Compare { inputs, output, threshold } => {
            println!("📊 report-compare - スキーマ比較\n");

            let threshold = threshold.unwrap_or(config.threshold);
            let mut options = compare::CompareOptions::new(output.unwrap_or_else(|| config.output_dir.clone()));
            options.min_files = config.min_files;

            // 1. 入力確認
            println!("[1/3] 入力ファイルを確認中...");
            let files = intake::collect_inputs(&inputs, options.min_files)?;
            for file in &files {
                println!("  - {}", file.display());
            }
            println!("✔ {}件のファイルを検出\n", files.len());

            // 2. 抽出・照合・出力
            println!("[2/3] スキーマを比較中...");
            let outcome = compare::run(&files, &options)?;
            let result = &outcome.match_result;
            println!("  データソース: {:.2}%", result.sources.percent);
            println!("  データ項目:   {:.2}%", result.items.percent);
            println!("  フィルタ:     {:.2}%", result.filters.percent);
            println!("✔ 比較完了\n");

            // 3. 判定
            println!("[3/3] レポート: {}", outcome.document_path.display());
            if outcome.passes(threshold) {
                println!(
                    "\n✅ Comparison complete. Matching percentage: {:.2}%",
                    outcome.overall_percent
                );
            } else {
                println!(
                    "\n❌ Matching percentage is {}. Comparison failed.",
                    outcome.overall_percent
                );
                return Ok(ExitCode::FAILURE);
            }
        }

        Commands::Inspect { file, json } => {
            let schema = extractor::extract(&file)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&schema)?);
            } else {
                println!("📄 {}\n", file.display());
                println!("データソース:\n{}\n", join_values(&schema.data_source));
                println!("データ項目:\n{}\n", join_values(&schema.data_items));
                println!("フィルタ:\n{}", join_values(&schema.data_filters));
            }
        }

        Commands::Config { set_output_dir, set_threshold, show } => {
            let mut config = config;

            if let Some(dir) = set_output_dir {
                config.set_output_dir(dir)?;
                println!("✔ 出力フォルダを設定しました");
            }

            if let Some(threshold) = set_threshold {
                config.set_threshold(threshold)?;
                println!("✔ 合格閾値を設定しました");
            }

            if show {
                println!("設定:");
                println!("  出力フォルダ: {}", config.output_dir.display());
                println!("  合格閾値: {}%", config.threshold);
                println!("  最小ファイル数: {}", config.min_files);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
