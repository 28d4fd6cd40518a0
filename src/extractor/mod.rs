//! スキーマ抽出モジュール
//!
//! 拡張子で形式を判定し、形式ごとの抽出関数に振り分ける。
//! どの形式も同じ FileSchema を返す。

mod delimited;
mod object_array;
pub mod semantic_layer;
pub mod xml_tree;

use crate::error::{CompareError, Result};
use report_compare_common::FileSchema;
use std::path::Path;

/// 受け付ける入力形式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// CSV（1行目のヘッダーのみ）
    DelimitedText,
    /// JSONのオブジェクト配列
    ObjectArray,
    /// BIレポート定義XML
    SemanticLayer,
    /// xlsx（受け付けるが抽出は未対応）
    Spreadsheet,
}

pub const ALLOWED_EXTENSIONS: &[&str] = &["csv", "xml", "json", "xlsx"];

impl SourceFormat {
    /// 拡張子から判定（大文字小文字は区別しない）
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "csv" => Some(SourceFormat::DelimitedText),
            "json" => Some(SourceFormat::ObjectArray),
            "xml" => Some(SourceFormat::SemanticLayer),
            "xlsx" => Some(SourceFormat::Spreadsheet),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SourceFormat::DelimitedText => "csv",
            SourceFormat::ObjectArray => "json",
            SourceFormat::SemanticLayer => "xml",
            SourceFormat::Spreadsheet => "xlsx",
        }
    }
}

/// 1ファイルからスキーマ指紋を抽出
pub fn extract(path: &Path) -> Result<FileSchema> {
    let schema = match SourceFormat::from_path(path) {
        Some(SourceFormat::DelimitedText) => delimited::extract(path)?,
        Some(SourceFormat::ObjectArray) => object_array::extract(path)?,
        Some(SourceFormat::SemanticLayer) => semantic_layer::extract(path)?,
        Some(SourceFormat::Spreadsheet) | None => {
            return Err(CompareError::unsupported(path));
        }
    };

    tracing::debug!(
        path = %path.display(),
        items = schema.data_items.len(),
        filters = schema.data_filters.len(),
        sources = schema.data_source.len(),
        "schema extracted"
    );

    Ok(schema)
}
