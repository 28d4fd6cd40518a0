//! CSV: 1行目のフィールド名を項目とする

use crate::error::{CompareError, Result};
use report_compare_common::FileSchema;
use std::path::Path;

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

pub fn extract(path: &Path) -> Result<FileSchema> {
    let content = std::fs::read(path)?;
    let content = content.strip_prefix(UTF8_BOM).unwrap_or(&content);

    if content.is_empty() {
        return Err(CompareError::format(path, "ヘッダー行がありません"));
    }
    // csv クレートは空行を読み飛ばすため、1行目が空なら項目なしとして扱う
    if content.starts_with(b"\n") || content.starts_with(b"\r") {
        tracing::debug!(path = %path.display(), "first line is blank");
        return Ok(FileSchema::default());
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content);

    let mut record = csv::StringRecord::new();
    let found = reader
        .read_record(&mut record)
        .map_err(|e| CompareError::format(path, format!("CSV読み込みエラー: {}", e)))?;

    if !found {
        return Err(CompareError::format(path, "ヘッダー行がありません"));
    }

    Ok(FileSchema::items_only(record.iter()))
}
