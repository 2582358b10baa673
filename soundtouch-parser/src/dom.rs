//! DOM extraction helpers over `xmltree`.
//!
//! All lookups are recursive in document order, matching how the device's
//! documents are addressed: callers name an element anywhere under the root
//! rather than spelling out a path. A document's root element counts as its
//! own first match.

use std::str::FromStr;

use xmltree::{Element, XMLNode};

use crate::error::{DecodeError, Result};

/// Parse a document into its root element.
pub fn parse(xml: &str) -> Result<Element> {
    Ok(Element::parse(xml.as_bytes())?)
}

/// First element named `name` in document order, the root included.
pub fn find<'a>(root: &'a Element, name: &str) -> Option<&'a Element> {
    if root.name == name {
        return Some(root);
    }
    root.children
        .iter()
        .filter_map(XMLNode::as_element)
        .find_map(|child| find(child, name))
}

/// Every element named `name` in document order, the root included.
pub fn find_all<'a>(root: &'a Element, name: &str) -> Vec<&'a Element> {
    let mut out = Vec::new();
    collect(root, name, &mut out);
    out
}

fn collect<'a>(element: &'a Element, name: &str, out: &mut Vec<&'a Element>) {
    if element.name == name {
        out.push(element);
    }
    for child in element.children.iter().filter_map(XMLNode::as_element) {
        collect(child, name, out);
    }
}

/// An attribute on this element, `None` when absent.
pub fn attr<'a>(element: &'a Element, name: &str) -> Option<&'a str> {
    element.attributes.get(name).map(String::as_str)
}

/// Trimmed text content of the first element named `name`.
///
/// `None` when the element is absent or carries no text content.
pub fn element_text(root: &Element, name: &str) -> Option<String> {
    find(root, name)
        .and_then(|element| element.get_text())
        .map(|text| text.trim().to_string())
}

/// An attribute on the first element named `element`, `None` when either
/// the element or the attribute is absent.
pub fn element_attr<'a>(root: &'a Element, element: &str, attribute: &str) -> Option<&'a str> {
    find(root, element).and_then(|el| attr(el, attribute))
}

/// Numeric text content: absent element decodes to `None`, present but
/// non-numeric text is a [`DecodeError::InvalidNumber`].
pub fn element_number<T: FromStr>(root: &Element, name: &'static str) -> Result<Option<T>> {
    match element_text(root, name) {
        None => Ok(None),
        Some(text) => text
            .parse()
            .map(Some)
            .map_err(|_| DecodeError::InvalidNumber {
                field: name,
                value: text,
            }),
    }
}

/// Numeric attribute, with the same absent/invalid asymmetry as
/// [`element_number`].
pub fn attr_number<T: FromStr>(
    element: &Element,
    name: &'static str,
) -> Result<Option<T>> {
    match attr(element, name) {
        None => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|_| DecodeError::InvalidNumber {
                field: name,
                value: value.to_string(),
            }),
    }
}

/// Boolean text content: exactly `"true"` is true, everything else
/// (absence included) is false.
pub fn element_bool(root: &Element, name: &str) -> bool {
    element_text(root, name).as_deref() == Some("true")
}

/// Boolean attribute with the same exact-match rule as [`element_bool`].
pub fn attr_bool(element: &Element, name: &str) -> bool {
    attr(element, name) == Some("true")
}

/// Raw serialized `<{tag} ...>...</{tag}>` (or self-closing) blocks, in
/// document order, sliced verbatim out of the source text.
///
/// The device's preset-selection endpoint expects the exact descriptor the
/// device itself emitted, so it is captured as source bytes rather than
/// re-serialized from the parsed tree.
pub fn raw_blocks(xml: &str, tag: &str) -> Vec<String> {
    let open = format!("<{tag}");
    let close = format!("</{tag}>");
    let mut out = Vec::new();
    let mut pos = 0;
    while let Some(rel) = xml[pos..].find(&open) {
        let start = pos + rel;
        let after_name = &xml[start + open.len()..];
        // Guard against matching a longer tag name sharing the prefix.
        if !after_name.starts_with(|c: char| c.is_whitespace() || c == '>' || c == '/') {
            pos = start + open.len();
            continue;
        }
        let Some(gt) = tag_end(xml, start + open.len()) else {
            break;
        };
        if xml[..gt].ends_with('/') {
            out.push(xml[start..=gt].to_string());
            pos = gt + 1;
        } else if let Some(close_rel) = xml[gt..].find(&close) {
            let end = gt + close_rel + close.len();
            out.push(xml[start..end].to_string());
            pos = end;
        } else {
            break;
        }
    }
    out
}

/// Index of the `>` closing the tag whose name ends at `from`. A literal
/// `>` (or `/>`) inside a quoted attribute value does not end the tag.
fn tag_end(xml: &str, from: usize) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (i, c) in xml[from..].char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '"' | '\'' => quote = Some(c),
                '>' => return Some(from + i),
                _ => {}
            },
        }
    }
    None
}
