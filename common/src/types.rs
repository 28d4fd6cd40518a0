//! スキーマ比較の型定義
//!
//! CLIと比較エンジンで共有される型:
//! - FileSchema: 1ファイルから抽出したスキーマ指紋
//! - FacetMatch / MatchResult: 全ファイル間の照合結果
//! - CellValue: 比較レポートのセル値

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 正規化済み文字列の集合（挿入順を保持、比較は集合として行う）
pub type ValueSet = IndexSet<String>;

/// 値の正規化: ダブルクォート除去 + 小文字化
pub fn normalize_value(raw: &str) -> String {
    raw.replace('"', "").to_lowercase()
}

/// 1ファイル分のスキーマ指紋
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSchema {
    /// 選択項目（列・フィールド）
    pub data_items: ValueSet,

    /// フィルタ式（フィルタ概念のない形式では空）
    pub data_filters: ValueSet,

    /// サブジェクトエリア（ヘッダーのみの形式では空）
    pub data_source: ValueSet,
}

impl FileSchema {
    /// 生の値から正規化済みスキーマを作成
    pub fn from_raw<I, F, S>(items: I, filters: F, sources: S) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        F: IntoIterator,
        F::Item: AsRef<str>,
        S: IntoIterator,
        S::Item: AsRef<str>,
    {
        Self {
            data_items: normalize_all(items),
            data_filters: normalize_all(filters),
            data_source: normalize_all(sources),
        }
    }

    /// 項目のみのスキーマ（CSV/JSON）
    pub fn items_only<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Self {
            data_items: normalize_all(items),
            ..Default::default()
        }
    }
}

fn normalize_all<I>(values: I) -> ValueSet
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    values
        .into_iter()
        .map(|v| normalize_value(v.as_ref()))
        .collect()
}

/// 1観点（項目/フィルタ/データソース）の照合結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacetMatch {
    /// 全ファイルに共通する値
    pub matched: ValueSet,
    /// いずれかのファイルに含まれる値
    pub union: ValueSet,
    /// 100 * |matched| / |union|（unionが空なら0）
    pub percent: f64,
}

/// 全ファイルの照合結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub items: FacetMatch,
    pub filters: FacetMatch,
    pub sources: FacetMatch,
    /// 3観点の単純平均（小数2桁に丸め）
    pub overall_percent: f64,
}

/// レポートのセル値
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn empty() -> Self {
        CellValue::Text(String::new())
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Text(s) if s.is_empty())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            CellValue::Number(_) => None,
        }
    }

    /// 改行を含むテキストか
    pub fn is_multiline(&self) -> bool {
        self.as_text().is_some_and(|s| s.contains('\n'))
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{}", n),
            CellValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}
