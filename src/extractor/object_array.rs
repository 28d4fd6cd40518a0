//! JSON: 先頭レコードのキーを項目とする

use crate::error::{CompareError, Result};
use report_compare_common::FileSchema;
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub fn extract(path: &Path) -> Result<FileSchema> {
    let reader = BufReader::new(File::open(path)?);
    let document: Value = serde_json::from_reader(reader)
        .map_err(|e| CompareError::format(path, format!("JSON解析エラー: {}", e)))?;

    let records = document
        .as_array()
        .ok_or_else(|| CompareError::format(path, "トップレベルが配列ではありません"))?;

    // 空配列は項目なし（エラーではない）
    let Some(first) = records.first() else {
        return Ok(FileSchema::default());
    };

    let record = first
        .as_object()
        .ok_or_else(|| CompareError::format(path, "先頭要素がオブジェクトではありません"))?;

    Ok(FileSchema::items_only(record.keys()))
}
