//! 比較レポートのレイアウト設定
//!
//! 見出しラベル・色・列幅/行高さの係数を一か所で定義する。
//! Excel出力はここの値だけを参照すること。

use crate::types::CellValue;

// ============================================
// シート名・見出し
// ============================================

/// ファイルごとの明細シート
pub const DETAIL_SHEET_NAME: &str = "Sheet 1";

/// 比較結果のサマリーシート
pub const SUMMARY_SHEET_NAME: &str = "Sheet 2";

pub const DETAIL_MAIN_HEADERS: [&str; 5] = [
    "REPORT NAME",
    "REPORT PATH",
    "REPORT Datasource",
    "REPORT DataItem",
    "REPORT Data Filters",
];

pub const DETAIL_SUBHEADERS: [&str; 5] = [
    "Name of the report",
    "Report Path",
    "Report DataSource",
    "Report DataItem",
    "Report Data Filters",
];

pub const SUMMARY_MAIN_HEADERS: [&str; 8] = [
    "REPORT NAME",
    "Datasource Matched",
    "Datasource Match %",
    "DataItem Matched",
    "DataItem Match %",
    "Data Filters Matched",
    "Data Filters Match %",
    "Overall Match (%)",
];

pub const SUMMARY_SUBHEADERS: [&str; 8] = [
    "REPORTS COMBINED",
    "Datasource Matched",
    "Shows the percentage match between report Datasource",
    "DataItem Matched",
    "Shows the percentage match between report data items",
    "Data Filters Matched",
    "Shows the percentage match between report data filters",
    "Shows the overall report matching percentage",
];

/// 見出しの行数（メイン見出し + サブ見出し）
pub const HEADER_ROWS: usize = 2;

// ============================================
// 色 (RGB)
// ============================================

/// メイン見出しの背景（黄）
pub const MAIN_HEADER_FILL: u32 = 0xFFFF00;
/// サブ見出しの背景（ライトグレー）
pub const SUBHEADER_FILL: u32 = 0xD3D3D3;
pub const HEADER_FONT_COLOR: u32 = 0x000000;
pub const BORDER_COLOR: u32 = 0x000000;

// ============================================
// 列幅・行高さ
// ============================================

/// 列幅 = 最長行の文字数 + パディング
pub const COLUMN_PADDING: f64 = 5.0;

/// 行高さ（pt）: メイン見出し / サブ見出し
pub const MAIN_HEADER_HEIGHT: f64 = 40.0;
pub const SUBHEADER_HEIGHT: f64 = 35.0;

/// データ行の1行あたりの高さ（pt）
pub const LINE_HEIGHT: f64 = 15.0;

/// セル表示の最大行長（改行を含む場合は行ごとの最大）
pub fn cell_text_width(value: &CellValue) -> usize {
    match value {
        CellValue::Text(s) => s.split('\n').map(|line| line.chars().count()).max().unwrap_or(0),
        CellValue::Number(_) => value.to_string().chars().count(),
    }
}

/// 全行を走査して各列の幅を再計算
pub fn column_widths(rows: &[Vec<CellValue>]) -> Vec<f64> {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut max_lengths = vec![0usize; columns];

    for row in rows {
        for (col, value) in row.iter().enumerate() {
            max_lengths[col] = max_lengths[col].max(cell_text_width(value));
        }
    }

    max_lengths
        .into_iter()
        .map(|len| len as f64 + COLUMN_PADDING)
        .collect()
}

/// データ行の高さ: テキストセルの最大行数 × LINE_HEIGHT
///
/// テキストセルが無い行は None（既定の高さのまま）。
pub fn data_row_height(row: &[CellValue]) -> Option<f64> {
    row.iter()
        .filter_map(CellValue::as_text)
        .map(|s| s.split('\n').count())
        .max()
        .map(|lines| lines as f64 * LINE_HEIGHT)
}
