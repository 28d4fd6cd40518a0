//! 入力ファイルの受付
//!
//! CLI引数（ファイルまたはフォルダ）を比較対象のファイル一覧に展開し、
//! 拡張子と件数を検証する。

use crate::error::{CompareError, Result};
use crate::extractor::SourceFormat;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 許可された拡張子か
pub fn is_allowed_file(path: &Path) -> bool {
    SourceFormat::from_path(path).is_some()
}

/// フォルダ直下の対応ファイルを名前順に列挙
pub fn scan_folder(folder: &Path) -> Result<Vec<PathBuf>> {
    if !folder.exists() {
        return Err(CompareError::FileNotFound(folder.display().to_string()));
    }

    let mut files: Vec<PathBuf> = WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1) // 直下のみ（再帰しない）
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|p| p.is_file() && is_allowed_file(p))
        .collect();

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// CLI入力を比較対象に展開して検証
pub fn collect_inputs(inputs: &[PathBuf], min_files: usize) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            files.extend(scan_folder(input)?);
        } else if !input.exists() {
            return Err(CompareError::FileNotFound(input.display().to_string()));
        } else if !is_allowed_file(input) {
            return Err(CompareError::unsupported(input));
        } else {
            files.push(input.clone());
        }
    }

    if files.len() < min_files {
        return Err(CompareError::InsufficientInput {
            required: min_files,
            given: files.len(),
        });
    }

    Ok(files)
}
