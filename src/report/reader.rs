//! 既存レポートの読み込み（calamine）

use crate::error::{CompareError, Result};
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use report_compare_common::{CellValue, ReportDocument, Sheet, SheetKind};
use std::path::Path;

/// xlsxを読み込んでドキュメントに復元
///
/// 比較レポート以外のシート名は無視する。
pub fn load_document(path: &Path) -> Result<ReportDocument> {
    let read_error = |reason: String| CompareError::DocumentRead {
        path: path.to_path_buf(),
        reason,
    };

    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|e: calamine::XlsxError| read_error(e.to_string()))?;
    let mut document = ReportDocument::new();

    for name in workbook.sheet_names() {
        let Some(kind) = SheetKind::from_name(&name) else {
            tracing::debug!(sheet = %name, "ignoring unknown sheet");
            continue;
        };
        // 空セルだけの行は Range に現れないので、<dimension> の行数で補う
        let used_rows = workbook
            .worksheet_cells_reader(&name)
            .map_err(|e| read_error(e.to_string()))?
            .dimensions()
            .end
            .0 as usize
            + 1;
        let range = workbook
            .worksheet_range(&name)
            .map_err(|e| read_error(e.to_string()))?;
        document.insert_sheet(Sheet::from_rows(kind, range_to_rows(&range, used_rows)));
    }

    Ok(document)
}

/// Range をA1起点の行列に展開し、`used_rows` 行まで空行で埋める
fn range_to_rows(range: &Range<Data>, used_rows: usize) -> Vec<Vec<CellValue>> {
    let mut rows: Vec<Vec<CellValue>> = Vec::new();

    if let Some((start_row, start_col)) = range.start() {
        rows.resize(start_row as usize, Vec::new());
        for row in range.rows() {
            let mut cells = vec![CellValue::empty(); start_col as usize];
            cells.extend(row.iter().map(cell_value));
            while cells.last().is_some_and(CellValue::is_empty) {
                cells.pop();
            }
            rows.push(cells);
        }
    }

    if rows.len() < used_rows {
        rows.resize(used_rows, Vec::new());
    }
    rows
}

fn cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::empty(),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        other => CellValue::Text(other.to_string()),
    }
}
