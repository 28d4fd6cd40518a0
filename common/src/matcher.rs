//! スキーマ照合
//!
//! 全ファイルの積集合（共通値）と和集合（分母）を1パスで求め、
//! 観点ごとの一致率と総合一致率を算出する。

use crate::error::{Error, Result};
use crate::types::{FacetMatch, FileSchema, MatchResult, ValueSet};

/// 共通値が無い場合の表示
pub const NO_MATCH: &str = "No Match";

/// 複数値セルの区切り
pub const VALUE_SEPARATOR: &str = ",\n";

/// 全スキーマを照合
///
/// 1件のみの場合は matched == union となる。
pub fn compare_all(schemas: &[FileSchema]) -> Result<MatchResult> {
    let (first, rest) = schemas.split_first().ok_or(Error::EmptyInput)?;

    let mut items = Accumulator::new(&first.data_items);
    let mut filters = Accumulator::new(&first.data_filters);
    let mut sources = Accumulator::new(&first.data_source);

    for schema in rest {
        items.add(&schema.data_items);
        filters.add(&schema.data_filters);
        sources.add(&schema.data_source);
    }

    let items = items.finish();
    let filters = filters.finish();
    let sources = sources.finish();
    let overall_percent = round2((items.percent + filters.percent + sources.percent) / 3.0);

    tracing::debug!(
        schemas = schemas.len(),
        item_percent = items.percent,
        filter_percent = filters.percent,
        source_percent = sources.percent,
        overall_percent,
        "schemas compared"
    );

    Ok(MatchResult {
        items,
        filters,
        sources,
        overall_percent,
    })
}

/// 一致率（%）: unionが空なら0
pub fn match_percent(matched: &ValueSet, union: &ValueSet) -> f64 {
    if union.is_empty() {
        return 0.0;
    }
    100.0 * matched.len() as f64 / union.len() as f64
}

/// 集合をセル表示用に連結（空集合は空文字）
pub fn join_values(values: &ValueSet) -> String {
    values
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(VALUE_SEPARATOR)
}

/// 共通値をセル表示用に連結（空集合は "No Match"）
pub fn join_matched(values: &ValueSet) -> String {
    if values.is_empty() {
        NO_MATCH.to_string()
    } else {
        join_values(values)
    }
}

/// 小数第2位に丸める（ちょうど中間は偶数側）
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

struct Accumulator {
    matched: ValueSet,
    union: ValueSet,
}

impl Accumulator {
    fn new(first: &ValueSet) -> Self {
        Self {
            matched: first.clone(),
            union: first.clone(),
        }
    }

    fn add(&mut self, values: &ValueSet) {
        self.matched.retain(|v| values.contains(v));
        self.union.extend(values.iter().cloned());
    }

    fn finish(self) -> FacetMatch {
        let percent = match_percent(&self.matched, &self.union);
        FacetMatch {
            matched: self.matched,
            union: self.union,
            percent,
        }
    }
}
