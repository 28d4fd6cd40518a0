//! 比較レポートのドキュメントモデル
//!
//! シートは初回参照時に2行の見出しを持って作成され、以降は
//! データ行を末尾に追加するだけ（既存行の更新はしない）。

use crate::error::{Error, Result};
use crate::layout::{
    DETAIL_MAIN_HEADERS, DETAIL_SHEET_NAME, DETAIL_SUBHEADERS, HEADER_ROWS,
    SUMMARY_MAIN_HEADERS, SUMMARY_SHEET_NAME, SUMMARY_SUBHEADERS,
};
use crate::types::CellValue;

/// シート種別
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetKind {
    /// Sheet 1: ファイルごとの明細
    Detail,
    /// Sheet 2: 比較結果のサマリー
    Summary,
}

impl SheetKind {
    pub fn name(&self) -> &'static str {
        match self {
            SheetKind::Detail => DETAIL_SHEET_NAME,
            SheetKind::Summary => SUMMARY_SHEET_NAME,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            DETAIL_SHEET_NAME => Some(SheetKind::Detail),
            SUMMARY_SHEET_NAME => Some(SheetKind::Summary),
            _ => None,
        }
    }

    pub fn main_headers(&self) -> &'static [&'static str] {
        match self {
            SheetKind::Detail => &DETAIL_MAIN_HEADERS,
            SheetKind::Summary => &SUMMARY_MAIN_HEADERS,
        }
    }

    pub fn subheaders(&self) -> &'static [&'static str] {
        match self {
            SheetKind::Detail => &DETAIL_SUBHEADERS,
            SheetKind::Summary => &SUMMARY_SUBHEADERS,
        }
    }

    fn header_rows(&self) -> Vec<Vec<CellValue>> {
        vec![
            self.main_headers().iter().map(|&h| CellValue::from(h)).collect(),
            self.subheaders().iter().map(|&h| CellValue::from(h)).collect(),
        ]
    }
}

impl std::str::FromStr for SheetKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s).ok_or_else(|| Error::UnknownSheet(s.to_string()))
    }
}

/// 1シート分のセル（見出し行を含む）
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    kind: SheetKind,
    rows: Vec<Vec<CellValue>>,
}

impl Sheet {
    /// 見出し2行のみの新規シート
    pub fn new(kind: SheetKind) -> Self {
        Self {
            kind,
            rows: kind.header_rows(),
        }
    }

    /// 読み込んだ行から復元（見出しが欠けていれば補う）
    pub fn from_rows(kind: SheetKind, mut rows: Vec<Vec<CellValue>>) -> Self {
        if rows.len() < HEADER_ROWS {
            return Self::new(kind);
        }
        let width = kind.main_headers().len();
        for row in &mut rows {
            if row.len() < width {
                row.resize(width, CellValue::empty());
            }
        }
        Self { kind, rows }
    }

    pub fn kind(&self) -> SheetKind {
        self.kind
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// 見出し行を含む全行
    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// データ行（3行目以降）
    pub fn data_rows(&self) -> &[Vec<CellValue>] {
        &self.rows[HEADER_ROWS..]
    }

    /// 次の空き行にデータ行を追加
    pub fn append_row(&mut self, row: Vec<CellValue>) {
        self.rows.push(row);
    }
}

/// 比較レポート全体（シートは作成順）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportDocument {
    sheets: Vec<Sheet>,
}

impl ReportDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sheet(&self, kind: SheetKind) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.kind == kind)
    }

    /// 読み込んだシートを追加（同種のシートがあれば置き換え）
    pub fn insert_sheet(&mut self, sheet: Sheet) {
        match self.sheets.iter_mut().find(|s| s.kind == sheet.kind) {
            Some(existing) => *existing = sheet,
            None => self.sheets.push(sheet),
        }
    }

    /// シートを取得、無ければ見出し付きで作成
    pub fn sheet_mut(&mut self, kind: SheetKind) -> &mut Sheet {
        let index = match self.sheets.iter().position(|s| s.kind == kind) {
            Some(index) => index,
            None => {
                tracing::debug!(sheet = kind.name(), "creating sheet with headers");
                self.sheets.push(Sheet::new(kind));
                self.sheets.len() - 1
            }
        };
        &mut self.sheets[index]
    }

    /// 指定シートにデータ行を追加
    pub fn append_row(&mut self, kind: SheetKind, row: Vec<CellValue>) {
        self.sheet_mut(kind).append_row(row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_kind_names() {
        assert_eq!(SheetKind::Detail.name(), "Sheet 1");
        assert_eq!(SheetKind::Summary.name(), "Sheet 2");
        assert_eq!("Sheet 2".parse::<SheetKind>().unwrap(), SheetKind::Summary);
        assert!(matches!("Sheet".parse::<SheetKind>(), Err(Error::UnknownSheet(_))));
    }

    #[test]
    fn test_new_sheet_has_two_header_rows() {
        let sheet = Sheet::new(SheetKind::Detail);
        assert_eq!(sheet.rows().len(), 2);
        assert_eq!(sheet.rows()[0][0], CellValue::from("REPORT NAME"));
        assert_eq!(sheet.rows()[1][0], CellValue::from("Name of the report"));
        assert!(sheet.data_rows().is_empty());
    }

    #[test]
    fn test_append_does_not_duplicate_headers() {
        let mut doc = ReportDocument::new();
        doc.append_row(SheetKind::Detail, vec![CellValue::from("a")]);
        doc.append_row(SheetKind::Detail, vec![CellValue::from("b")]);

        let sheet = doc.sheet(SheetKind::Detail).unwrap();
        assert_eq!(sheet.rows().len(), 4);
        assert_eq!(sheet.data_rows().len(), 2);
        assert_eq!(doc.sheets().len(), 1);
    }

    #[test]
    fn test_sheets_keep_creation_order() {
        let mut doc = ReportDocument::new();
        doc.append_row(SheetKind::Detail, vec![CellValue::from("a")]);
        doc.append_row(SheetKind::Summary, vec![CellValue::from("s")]);
        doc.append_row(SheetKind::Detail, vec![CellValue::from("b")]);

        let names: Vec<&str> = doc.sheets().iter().map(Sheet::name).collect();
        assert_eq!(names, vec!["Sheet 1", "Sheet 2"]);
    }

    #[test]
    fn test_from_rows_pads_to_header_width() {
        let rows = vec![
            SheetKind::Detail.main_headers().iter().map(|&h| CellValue::from(h)).collect(),
            SheetKind::Detail.subheaders().iter().map(|&h| CellValue::from(h)).collect(),
            vec![CellValue::from("report"), CellValue::from("path")],
        ];
        let sheet = Sheet::from_rows(SheetKind::Detail, rows);
        assert_eq!(sheet.data_rows()[0].len(), 5);
        assert!(sheet.data_rows()[0][4].is_empty());
    }

    #[test]
    fn test_from_rows_without_headers_starts_fresh() {
        let sheet = Sheet::from_rows(SheetKind::Summary, vec![]);
        assert_eq!(sheet, Sheet::new(SheetKind::Summary));
    }
}
