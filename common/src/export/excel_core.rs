//! Excel生成（共通ライブラリ）
//!
//! layout.rs の定義を使用して比較レポートのExcelを生成する。
//! 書式・列幅・行高さはセル内容だけから決まるため、毎回全体を
//! 描き直しても結果は同じになる。

use crate::error::{Error, Result};
use crate::layout::{
    column_widths, data_row_height, BORDER_COLOR, HEADER_FONT_COLOR, HEADER_ROWS,
    MAIN_HEADER_FILL, MAIN_HEADER_HEIGHT, SUBHEADER_FILL, SUBHEADER_HEIGHT,
};
use crate::sheet::{ReportDocument, Sheet};
use crate::types::CellValue;
use rust_xlsxwriter::*;

/// シートごとの書式セット
struct SheetFormats {
    main_header: Format,
    subheader: Format,
    data: Format,
    data_wrapped: Format,
    border_only: Format,
}

impl SheetFormats {
    fn new() -> Self {
        let border = Format::new()
            .set_border(FormatBorder::Thin)
            .set_border_color(Color::RGB(BORDER_COLOR));

        let main_header = border
            .clone()
            .set_bold()
            .set_font_color(Color::RGB(HEADER_FONT_COLOR))
            .set_background_color(Color::RGB(MAIN_HEADER_FILL))
            .set_pattern(FormatPattern::Solid)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter);

        let subheader = border
            .clone()
            .set_italic()
            .set_font_color(Color::RGB(HEADER_FONT_COLOR))
            .set_background_color(Color::RGB(SUBHEADER_FILL))
            .set_pattern(FormatPattern::Solid)
            .set_align(FormatAlign::Left)
            .set_align(FormatAlign::VerticalCenter);

        let data = border
            .clone()
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter);

        let data_wrapped = data.clone().set_text_wrap();

        Self {
            main_header,
            subheader,
            data,
            data_wrapped,
            border_only: border,
        }
    }

    fn for_row(&self, row: usize) -> Option<&Format> {
        match row {
            0 => Some(&self.main_header),
            1 => Some(&self.subheader),
            _ => None,
        }
    }

    fn for_data_cell(&self, value: &CellValue) -> &Format {
        if value.is_multiline() {
            &self.data_wrapped
        } else {
            &self.data
        }
    }
}

/// ドキュメント全体をxlsxバッファに生成
pub fn render_workbook(document: &ReportDocument) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let formats = SheetFormats::new();

    for sheet in document.sheets() {
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(sheet.name())
            .map_err(|e| Error::Excel(format!("シート名設定エラー: {}", e)))?;
        write_sheet(worksheet, sheet, &formats)?;
    }

    workbook
        .save_to_buffer()
        .map_err(|e| Error::Excel(format!("Excel保存エラー: {}", e)))
}

fn write_sheet(worksheet: &mut Worksheet, sheet: &Sheet, formats: &SheetFormats) -> Result<()> {
    let rows = sheet.rows();
    let max_columns = rows.iter().map(Vec::len).max().unwrap_or(0);

    for (row_idx, row) in rows.iter().enumerate() {
        let row_num = row_num(row_idx)?;

        for col_idx in 0..max_columns {
            let col = col_num(col_idx)?;
            let value = row.get(col_idx);

            // 見出し行は見出し書式、3行目以降は罫線 + 中央揃え
            let format = match (formats.for_row(row_idx), value) {
                (Some(header), _) => header,
                (None, Some(value)) => formats.for_data_cell(value),
                (None, None) => &formats.border_only,
            };

            match value {
                Some(CellValue::Number(n)) => {
                    worksheet
                        .write_number_with_format(row_num, col, *n, format)
                        .map_err(|e| Error::Excel(format!("数値書き込みエラー: {}", e)))?;
                }
                Some(CellValue::Text(s)) if !s.is_empty() => {
                    worksheet
                        .write_string_with_format(row_num, col, s, format)
                        .map_err(|e| Error::Excel(format!("文字列書き込みエラー: {}", e)))?;
                }
                _ => {
                    if row_idx < HEADER_ROWS && value.is_none() {
                        continue;
                    }
                    worksheet
                        .write_blank(row_num, col, format)
                        .map_err(|e| Error::Excel(format!("空セル書き込みエラー: {}", e)))?;
                }
            }
        }
    }

    for (col_idx, width) in column_widths(rows).into_iter().enumerate() {
        worksheet
            .set_column_width(col_num(col_idx)?, width)
            .map_err(|e| Error::Excel(format!("列幅設定エラー: {}", e)))?;
    }

    worksheet
        .set_row_height(0, MAIN_HEADER_HEIGHT)
        .map_err(|e| Error::Excel(format!("行高さ設定エラー: {}", e)))?;
    worksheet
        .set_row_height(1, SUBHEADER_HEIGHT)
        .map_err(|e| Error::Excel(format!("行高さ設定エラー: {}", e)))?;

    for (offset, row) in sheet.data_rows().iter().enumerate() {
        if let Some(height) = data_row_height(row) {
            worksheet
                .set_row_height(row_num(HEADER_ROWS + offset)?, height)
                .map_err(|e| Error::Excel(format!("行高さ設定エラー: {}", e)))?;
        }
    }

    tracing::debug!(
        sheet = sheet.name(),
        rows = rows.len(),
        columns = max_columns,
        "sheet rendered"
    );

    Ok(())
}

fn row_num(index: usize) -> Result<RowNum> {
    RowNum::try_from(index).map_err(|_| Error::Excel(format!("行番号が範囲外です: {}", index)))
}

fn col_num(index: usize) -> Result<ColNum> {
    ColNum::try_from(index).map_err(|_| Error::Excel(format!("列番号が範囲外です: {}", index)))
}
