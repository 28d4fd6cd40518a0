//! 名前空間解決済みXMLツリー
//!
//! NsReader のイベントから要素ツリーを組み立て、要素名・属性名を
//! (名前空間URI, ローカル名) の組で問い合わせられるようにする。
//! プレフィックスは文書ごとに変わりうるため、問い合わせ側は
//! プレフィックスを一切扱わない。

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, QName, ResolveResult};
use quick_xml::reader::NsReader;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum XmlTreeError {
    #[error("XML構文エラー: {0}")]
    Syntax(#[from] quick_xml::Error),

    #[error("未宣言の名前空間プレフィックス: {0}")]
    UnknownPrefix(String),

    #[error("ルート要素がありません")]
    NoRoot,
}

/// 名前空間で修飾された名前
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExpandedName {
    pub namespace: Option<String>,
    pub local: String,
}

impl ExpandedName {
    pub fn new(namespace: &str, local: &str) -> Self {
        Self {
            namespace: Some(namespace.to_string()),
            local: local.to_string(),
        }
    }

    /// 名前空間なしの名前（修飾なし属性など）
    pub fn unqualified(local: &str) -> Self {
        Self {
            namespace: None,
            local: local.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct XmlAttribute {
    pub name: ExpandedName,
    pub value: String,
    /// 値が `prefix:local` 形式で、プレフィックスが宣言済みの場合の解決結果
    pub value_name: Option<ExpandedName>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    pub name: ExpandedName,
    pub attributes: Vec<XmlAttribute>,
    pub children: Vec<XmlElement>,
    text: String,
}

impl XmlElement {
    pub fn is(&self, name: &ExpandedName) -> bool {
        &self.name == name
    }

    pub fn attribute(&self, name: &ExpandedName) -> Option<&XmlAttribute> {
        self.attributes.iter().find(|a| &a.name == name)
    }

    /// 直下のテキスト（前後の空白は除去）
    pub fn text(&self) -> &str {
        self.text.trim()
    }

    /// 子孫要素（文書順、自身は含まない）
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: self.children.iter().rev().collect(),
        }
    }

    pub fn descendants_named<'a>(
        &'a self,
        name: &'a ExpandedName,
    ) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.descendants().filter(move |e| e.is(name))
    }

    pub fn find_descendant(&self, name: &ExpandedName) -> Option<&XmlElement> {
        self.descendants().find(|e| e.is(name))
    }
}

/// 深さ優先（前順）の子孫イテレータ
pub struct Descendants<'a> {
    stack: Vec<&'a XmlElement>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a XmlElement;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.stack.pop()?;
        self.stack.extend(next.children.iter().rev());
        Some(next)
    }
}

/// XML文字列をツリーに変換
pub fn parse(content: &str) -> Result<XmlElement, XmlTreeError> {
    let mut reader = NsReader::from_str(content);
    let mut buf = Vec::new();
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        let (ns, event) = reader.read_resolved_event_into(&mut buf)?;
        let namespace = bound_namespace(ns)?;

        match event {
            Event::Start(e) => {
                let element = element_from_start(&reader, namespace, &e)?;
                stack.push(element);
            }
            Event::Empty(e) => {
                let element = element_from_start(&reader, namespace, &e)?;
                attach(&mut stack, &mut root, element);
            }
            Event::End(_) => {
                if let Some(completed) = stack.pop() {
                    attach(&mut stack, &mut root, completed);
                }
            }
            Event::Text(e) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&e.unescape()?);
                }
            }
            Event::CData(e) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }

        buf.clear();
    }

    root.ok_or(XmlTreeError::NoRoot)
}

fn attach(stack: &mut [XmlElement], root: &mut Option<XmlElement>, element: XmlElement) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => *root = Some(element),
    }
}

fn bound_namespace(ns: ResolveResult) -> Result<Option<String>, XmlTreeError> {
    match ns {
        ResolveResult::Bound(Namespace(uri)) => Ok(Some(String::from_utf8_lossy(uri).into_owned())),
        ResolveResult::Unbound => Ok(None),
        ResolveResult::Unknown(prefix) => Err(XmlTreeError::UnknownPrefix(
            String::from_utf8_lossy(&prefix).into_owned(),
        )),
    }
}

fn element_from_start<R>(
    reader: &NsReader<R>,
    namespace: Option<String>,
    start: &BytesStart,
) -> Result<XmlElement, XmlTreeError> {
    let local = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
    let mut attributes = Vec::new();

    for attr in start.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        if attr.key.as_namespace_binding().is_some() {
            continue;
        }

        let (attr_ns, attr_local) = reader.resolve_attribute(attr.key);
        let name = ExpandedName {
            namespace: bound_namespace(attr_ns)?,
            local: String::from_utf8_lossy(attr_local.as_ref()).into_owned(),
        };
        let value = attr.decode_and_unescape_value(reader)?.into_owned();
        let value_name = resolve_value_name(reader, &value);

        attributes.push(XmlAttribute {
            name,
            value,
            value_name,
        });
    }

    Ok(XmlElement {
        name: ExpandedName { namespace, local },
        attributes,
        children: Vec::new(),
        text: String::new(),
    })
}

/// `prefix:local` 形式の属性値を現在のスコープで解決
fn resolve_value_name<R>(reader: &NsReader<R>, value: &str) -> Option<ExpandedName> {
    if !value.contains(':') || value.contains(char::is_whitespace) {
        return None;
    }
    match reader.resolve_element(QName(value.as_bytes())) {
        (ResolveResult::Bound(Namespace(uri)), local) => Some(ExpandedName {
            namespace: Some(String::from_utf8_lossy(uri).into_owned()),
            local: String::from_utf8_lossy(local.as_ref()).into_owned(),
        }),
        _ => None,
    }
}
