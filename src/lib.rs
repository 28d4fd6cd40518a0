//! レポート定義ファイルのスキーマ比較
//!
//! CSV/JSON/BIレポートXMLからスキーマ指紋を抽出し、全ファイル間で照合して
//! 2シートの比較レポート（xlsx）を出力する。

pub mod cli;
pub mod compare;
pub mod config;
pub mod error;
pub mod extractor;
pub mod intake;
pub mod logging;
pub mod report;

pub use compare::{run, CompareOptions, ComparisonOutcome};
pub use error::{CompareError, Result};
pub use extractor::{extract, SourceFormat};
pub use report::append_row;
