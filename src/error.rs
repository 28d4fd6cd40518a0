use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompareError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("未対応のファイル形式です: {}", .path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("ファイル形式が不正です: {} ({reason})", .path.display())]
    Format { path: PathBuf, reason: String },

    #[error("比較には{required}件以上のファイルが必要です（指定: {given}件）")]
    InsufficientInput { required: usize, given: usize },

    #[error("レポートの読み込みに失敗: {} ({reason})", .path.display())]
    DocumentRead { path: PathBuf, reason: String },

    #[error("レポートの書き込みに失敗: {} ({reason})", .path.display())]
    DocumentWrite { path: PathBuf, reason: String },

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] report_compare_common::Error),
}

impl CompareError {
    pub fn unsupported(path: &Path) -> Self {
        CompareError::UnsupportedFormat {
            path: path.to_path_buf(),
        }
    }

    pub fn format(path: &Path, reason: impl Into<String>) -> Self {
        CompareError::Format {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CompareError>;
