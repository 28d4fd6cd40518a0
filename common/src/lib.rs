//! Report Compare Common Library
//!
//! スキーマ指紋の型・照合ロジック・比較レポートのレイアウトを提供する。
//! ファイル入出力は行わない。

pub mod types;
pub mod layout;
pub mod error;
pub mod matcher;
pub mod sheet;
pub mod export;

pub use types::{normalize_value, CellValue, FacetMatch, FileSchema, MatchResult, ValueSet};
pub use error::{Error, Result};
pub use matcher::{compare_all, join_matched, join_values, NO_MATCH};
pub use sheet::{ReportDocument, Sheet, SheetKind};
