//! BIレポート定義XML
//!
//! - データソース: criteria 要素の subjectArea 属性
//! - 項目: column 配下の SQL式（expr）のテキスト
//! - フィルタ: filter 配下の SQL式のテキスト

use super::xml_tree::{self, ExpandedName, XmlElement};
use crate::error::{CompareError, Result};
use report_compare_common::FileSchema;
use std::path::Path;

/// レポート/条件の名前空間（saw）
pub const REPORT_NS: &str = "com.siebel.analytics.web/report/v1.1";
/// スキーマインスタンスの名前空間（xsi）
pub const SCHEMA_INSTANCE_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";
/// 式の名前空間（sawx）
pub const EXPRESSION_NS: &str = "com.siebel.analytics.web/expression/v1.1";

/// プレフィックス未宣言時に比較する xsi:type の生値
const SQL_EXPRESSION_LITERAL: &str = "sawx:sqlExpression";

struct Names {
    criteria: ExpandedName,
    column: ExpandedName,
    filter: ExpandedName,
    expr: ExpandedName,
    xsi_type: ExpandedName,
    sql_expression: ExpandedName,
    subject_area: ExpandedName,
}

impl Names {
    fn new() -> Self {
        Self {
            criteria: ExpandedName::new(REPORT_NS, "criteria"),
            column: ExpandedName::new(REPORT_NS, "column"),
            filter: ExpandedName::new(REPORT_NS, "filter"),
            expr: ExpandedName::new(EXPRESSION_NS, "expr"),
            xsi_type: ExpandedName::new(SCHEMA_INSTANCE_NS, "type"),
            sql_expression: ExpandedName::new(EXPRESSION_NS, "sqlExpression"),
            subject_area: ExpandedName::unqualified("subjectArea"),
        }
    }

    fn is_sql_expression(&self, element: &XmlElement) -> bool {
        if !element.is(&self.expr) {
            return false;
        }
        element.attribute(&self.xsi_type).is_some_and(|attr| match &attr.value_name {
            Some(name) => name == &self.sql_expression,
            None => attr.value == SQL_EXPRESSION_LITERAL,
        })
    }
}

pub fn extract(path: &Path) -> Result<FileSchema> {
    let content = std::fs::read_to_string(path)?;
    let root = xml_tree::parse(&content).map_err(|e| CompareError::format(path, e.to_string()))?;
    schema_from_tree(&root).map_err(|reason| CompareError::format(path, reason))
}

/// 解析済みツリーからスキーマ指紋を組み立てる
pub fn schema_from_tree(root: &XmlElement) -> std::result::Result<FileSchema, String> {
    let names = Names::new();

    let criteria = root
        .find_descendant(&names.criteria)
        .ok_or_else(|| "criteria 要素がありません".to_string())?;
    let subject_area = criteria
        .attribute(&names.subject_area)
        .ok_or_else(|| "criteria に subjectArea 属性がありません".to_string())?;

    let items = expressions_under(root, &names.column, &names);
    let filters = expressions_under(root, &names.filter, &names);

    Ok(FileSchema::from_raw(items, filters, [subject_area.value.as_str()]))
}

/// container 要素配下の SQL式テキストを文書順に収集
fn expressions_under<'a>(
    root: &'a XmlElement,
    container: &'a ExpandedName,
    names: &'a Names,
) -> Vec<&'a str> {
    let mut texts = Vec::new();
    for parent in root.descendants_named(container) {
        for expr in parent.descendants().filter(|e| names.is_sql_expression(e)) {
            let text = expr.text();
            if text.is_empty() {
                tracing::warn!(container = %container.local, "skipping empty sql expression");
                continue;
            }
            texts.push(text);
        }
    }
    texts
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<saw:report xmlns:saw="com.siebel.analytics.web/report/v1.1"
            xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
            xmlns:sawx="com.siebel.analytics.web/expression/v1.1">
  <saw:criteria xsi:type="saw:simpleCriteria" subjectArea="&quot;Sales - Orders&quot;">
    <saw:columns>
      <saw:column xsi:type="saw:regularColumn" columnID="c1">
        <saw:columnFormula>
          <sawx:expr xsi:type="sawx:sqlExpression">"Time"."Year"</sawx:expr>
        </saw:columnFormula>
      </saw:column>
      <saw:column xsi:type="saw:regularColumn" columnID="c2">
        <saw:columnFormula>
          <sawx:expr xsi:type="sawx:sqlExpression">"Orders"."Revenue"</sawx:expr>
        </saw:columnFormula>
      </saw:column>
    </saw:columns>
    <saw:filter>
      <sawx:expr xsi:type="sawx:comparison" op="equal">
        <sawx:expr xsi:type="sawx:sqlExpression">"Time"."Year"</sawx:expr>
        <sawx:expr xsi:type="xsd:string">2024</sawx:expr>
      </sawx:expr>
    </saw:filter>
  </saw:criteria>
</saw:report>"#;

    #[test]
    fn test_extracts_all_three_facets() {
        let root = xml_tree::parse(REPORT).unwrap();
        let schema = schema_from_tree(&root).unwrap();

        let items: Vec<&str> = schema.data_items.iter().map(String::as_str).collect();
        assert_eq!(items, vec!["time.year", "orders.revenue"]);
        let filters: Vec<&str> = schema.data_filters.iter().map(String::as_str).collect();
        assert_eq!(filters, vec!["time.year"]);
        let sources: Vec<&str> = schema.data_source.iter().map(String::as_str).collect();
        assert_eq!(sources, vec!["sales - orders"]);
    }

    #[test]
    fn test_other_prefixes_resolve_to_same_namespaces() {
        let xml = r#"<r:report xmlns:r="com.siebel.analytics.web/report/v1.1"
                    xmlns:i="http://www.w3.org/2001/XMLSchema-instance"
                    xmlns:e="com.siebel.analytics.web/expression/v1.1">
          <r:criteria subjectArea="HR">
            <r:column><e:expr i:type="e:sqlExpression">"Emp"."Id"</e:expr></r:column>
          </r:criteria>
        </r:report>"#;
        let root = xml_tree::parse(xml).unwrap();
        let schema = schema_from_tree(&root).unwrap();

        assert!(schema.data_items.contains("emp.id"));
        assert!(schema.data_source.contains("hr"));
        assert!(schema.data_filters.is_empty());
    }

    #[test]
    fn test_missing_subject_area() {
        let xml = r#"<saw:report xmlns:saw="com.siebel.analytics.web/report/v1.1">
          <saw:criteria/>
        </saw:report>"#;
        let root = xml_tree::parse(xml).unwrap();
        let reason = schema_from_tree(&root).unwrap_err();
        assert!(reason.contains("subjectArea"));
    }

    #[test]
    fn test_missing_criteria() {
        let xml = r#"<saw:report xmlns:saw="com.siebel.analytics.web/report/v1.1"/>"#;
        let root = xml_tree::parse(xml).unwrap();
        assert!(schema_from_tree(&root).unwrap_err().contains("criteria"));
    }

    #[test]
    fn test_empty_expressions_are_skipped() {
        let xml = r#"<saw:report xmlns:saw="com.siebel.analytics.web/report/v1.1"
                    xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
                    xmlns:sawx="com.siebel.analytics.web/expression/v1.1">
          <saw:criteria subjectArea="S">
            <saw:column><sawx:expr xsi:type="sawx:sqlExpression"/></saw:column>
            <saw:column><sawx:expr xsi:type="sawx:sqlExpression">"T"."A"</sawx:expr></saw:column>
          </saw:criteria>
        </saw:report>"#;
        let root = xml_tree::parse(xml).unwrap();
        let schema = schema_from_tree(&root).unwrap();
        assert_eq!(schema.data_items.len(), 1);
        assert!(schema.data_items.contains("t.a"));
    }
}
