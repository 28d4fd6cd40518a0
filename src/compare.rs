//! 比較の実行（抽出 → 照合 → レポート出力）
//!
//! 1ファイルでも抽出に失敗した場合は何も書き出さずに中断する。

use crate::error::{CompareError, Result};
use crate::extractor;
use crate::report;
use report_compare_common::{
    compare_all, join_matched, join_values, CellValue, FileSchema, MatchResult, SheetKind,
};
use std::path::{Path, PathBuf};

/// 比較に必要な最小ファイル数
pub const DEFAULT_MIN_FILES: usize = 2;

const COMBINED_SUFFIX: &str = "_COMBINED";
const MERGED_SUFFIX: &str = "_merged";

/// 比較オプション
#[derive(Debug, Clone)]
pub struct CompareOptions {
    /// レポートの出力先フォルダ（無ければ作成）
    pub output_dir: PathBuf,
    pub min_files: usize,
}

impl CompareOptions {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            min_files: DEFAULT_MIN_FILES,
        }
    }
}

/// 比較結果
#[derive(Debug, Clone)]
pub struct ComparisonOutcome {
    pub document_path: PathBuf,
    pub overall_percent: f64,
    pub match_result: MatchResult,
}

impl ComparisonOutcome {
    /// 合格判定（閾値の扱いは呼び出し側が決める）
    pub fn passes(&self, threshold: f64) -> bool {
        self.overall_percent >= threshold
    }
}

/// 複数ファイルを比較してレポートを出力
pub fn run(paths: &[PathBuf], options: &CompareOptions) -> Result<ComparisonOutcome> {
    let required = options.min_files.max(1);
    if paths.len() < required {
        return Err(CompareError::InsufficientInput {
            required,
            given: paths.len(),
        });
    }

    let schemas = paths
        .iter()
        .map(|path| extractor::extract(path))
        .collect::<Result<Vec<FileSchema>>>()?;

    let match_result = compare_all(&schemas)?;

    let stems: Vec<String> = paths.iter().map(|p| file_stem(p)).collect();
    let report_name = report_name(&stems);
    let document_path = output_path(&options.output_dir, &report_name);

    std::fs::create_dir_all(&options.output_dir)?;
    if document_path.exists() {
        tracing::debug!(path = %document_path.display(), "removing stale report");
        std::fs::remove_file(&document_path)?;
    }

    for ((path, stem), schema) in paths.iter().zip(&stems).zip(&schemas) {
        report::append_row(&detail_row(path, stem, schema), SheetKind::Detail.name(), &document_path)?;
    }
    report::append_row(
        &summary_row(&report_name, &match_result),
        SheetKind::Summary.name(),
        &document_path,
    )?;

    tracing::info!(
        files = paths.len(),
        overall_percent = match_result.overall_percent,
        path = %document_path.display(),
        "comparison finished"
    );

    Ok(ComparisonOutcome {
        document_path,
        overall_percent: match_result.overall_percent,
        match_result,
    })
}

/// 拡張子を除いたファイル名
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// レポート名: ファイル名を "_" で連結 + "_COMBINED"
pub fn report_name(stems: &[String]) -> String {
    format!("{}{}", stems.join("_"), COMBINED_SUFFIX)
}

/// 出力パス: `<dir>/<report_name>_merged.xlsx`
pub fn output_path(output_dir: &Path, report_name: &str) -> PathBuf {
    output_dir.join(format!("{}{}.xlsx", report_name, MERGED_SUFFIX))
}

/// Sheet 1 の明細行
pub fn detail_row(path: &Path, stem: &str, schema: &FileSchema) -> Vec<CellValue> {
    vec![
        CellValue::from(stem),
        CellValue::from(path.display().to_string()),
        CellValue::from(join_values(&schema.data_source)),
        CellValue::from(join_values(&schema.data_items)),
        CellValue::from(join_values(&schema.data_filters)),
    ]
}

/// Sheet 2 のサマリー行
pub fn summary_row(report_name: &str, result: &MatchResult) -> Vec<CellValue> {
    vec![
        CellValue::from(report_name),
        CellValue::from(join_matched(&result.sources.matched)),
        CellValue::from(result.sources.percent),
        CellValue::from(join_matched(&result.items.matched)),
        CellValue::from(result.items.percent),
        CellValue::from(join_matched(&result.filters.matched)),
        CellValue::from(result.filters.percent),
        CellValue::from(result.overall_percent),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_name_and_output_path() {
        let stems = vec!["sales".to_string(), "orders".to_string()];
        let name = report_name(&stems);
        assert_eq!(name, "sales_orders_COMBINED");
        assert_eq!(
            output_path(Path::new("uploads"), &name),
            Path::new("uploads").join("sales_orders_COMBINED_merged.xlsx")
        );
    }

    #[test]
    fn test_file_stem() {
        assert_eq!(file_stem(Path::new("dir/report.v2.xml")), "report.v2");
        assert_eq!(file_stem(Path::new("plain")), "plain");
    }

    #[test]
    fn test_detail_row_layout() {
        let schema = FileSchema::from_raw(["id", "name"], Vec::<&str>::new(), ["Sales"]);
        let row = detail_row(Path::new("uploads/a.xml"), "a", &schema);

        assert_eq!(row.len(), 5);
        assert_eq!(row[0], CellValue::from("a"));
        assert_eq!(row[1], CellValue::from(Path::new("uploads/a.xml").display().to_string()));
        assert_eq!(row[2], CellValue::from("sales"));
        assert_eq!(row[3], CellValue::from("id,\nname"));
        assert_eq!(row[4], CellValue::empty());
    }

    #[test]
    fn test_summary_row_uses_no_match() {
        let result = compare_all(&[
            FileSchema::items_only(["id", "name"]),
            FileSchema::items_only(["id", "phone"]),
        ])
        .unwrap();
        let row = summary_row("a_b_COMBINED", &result);

        assert_eq!(row.len(), 8);
        assert_eq!(row[1], CellValue::from("No Match"));
        assert_eq!(row[2], CellValue::from(0.0));
        assert_eq!(row[3], CellValue::from("id"));
        assert!(matches!(row[4], CellValue::Number(p) if (p - 100.0 / 3.0).abs() < 1e-9));
        assert_eq!(row[5], CellValue::from("No Match"));
        assert_eq!(row[7], CellValue::from(result.overall_percent));
    }

    #[test]
    fn test_outcome_threshold() {
        let outcome = ComparisonOutcome {
            document_path: PathBuf::from("x.xlsx"),
            overall_percent: 75.0,
            match_result: MatchResult::default(),
        };
        assert!(outcome.passes(75.0));
        assert!(!outcome.passes(75.01));
    }
}
