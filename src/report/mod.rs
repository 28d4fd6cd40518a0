//! 比較レポート（xlsx）の追記
//!
//! 1回の追記ごとに「読み込み → 行追加 → 全体を書き出し」を行う。
//! 書式と列幅・行高さは書き出し時に全行から再計算される。

mod reader;

pub use reader::load_document;

use crate::error::{CompareError, Result};
use report_compare_common::export::excel_core::render_workbook;
use report_compare_common::{CellValue, ReportDocument, SheetKind};
use std::path::Path;

/// 指定シートにデータ行を1行追加して保存
///
/// ファイルが無ければ新規作成、シートが無ければ見出し付きで作成する。
/// 同じ行を2回呼べば2行追加される（上書きはしない）。
pub fn append_row(row: &[CellValue], sheet_name: &str, document_path: &Path) -> Result<()> {
    let kind: SheetKind = sheet_name.parse().map_err(|e: report_compare_common::Error| {
        CompareError::DocumentWrite {
            path: document_path.to_path_buf(),
            reason: e.to_string(),
        }
    })?;

    let mut document = if document_path.exists() {
        load_document(document_path)?
    } else {
        ReportDocument::new()
    };

    document.append_row(kind, row.to_vec());
    save_document(&document, document_path)?;

    tracing::debug!(
        path = %document_path.display(),
        sheet = sheet_name,
        columns = row.len(),
        "row appended"
    );
    Ok(())
}

/// ドキュメント全体をxlsxとして保存
pub fn save_document(document: &ReportDocument, document_path: &Path) -> Result<()> {
    let write_error = |reason: String| CompareError::DocumentWrite {
        path: document_path.to_path_buf(),
        reason,
    };

    let buffer = render_workbook(document).map_err(|e| write_error(e.to_string()))?;
    std::fs::write(document_path, buffer).map_err(|e| write_error(e.to_string()))?;
    Ok(())
}
