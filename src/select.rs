//! Node selection over specification and override documents.
//!
//! Sections are filtered by pipe-delimited attribute lists: `name="gl|glcore"`
//! selects the section for API `gl` and for API `glcore`.
use anyhow::{ensure, Result};
use roxmltree::{Document, Node};

pub(crate) const ROOT_ELEMENT: &str = "signatures";

/// True when the pipe-delimited `list` contains `needle` as a whole entry.
/// A missing attribute never matches.
pub(crate) fn pipe_list_contains(list: Option<&str>, needle: &str) -> bool {
    let Some(list) = list else {
        return false;
    };
    format!("|{list}|").contains(&format!("|{needle}|"))
}

/// Filter for `add`, `delete`, and `replace` sections.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct SectionFilter<'a> {
    api: Option<&'a str>,
    version: Option<&'a str>,
}

impl<'a> SectionFilter<'a> {
    /// Empty selectors degrade to "match everything".
    pub(crate) fn new(api: Option<&'a str>, version: Option<&'a str>) -> Self {
        Self {
            api: api.filter(|api| !api.is_empty()),
            version: version.filter(|version| !version.is_empty()),
        }
    }

    pub(crate) fn matches(&self, node: Node<'_, '_>) -> bool {
        match (self.api, self.version) {
            (Some(api), Some(version)) => {
                pipe_list_contains(node.attribute("name"), api)
                    && (node.attribute("version").is_none()
                        || pipe_list_contains(node.attribute("version"), version))
            }
            (Some(api), None) => pipe_list_contains(node.attribute("name"), api),
            _ => true,
        }
    }
}

/// The `<signatures>` root element; any other root is rejected.
pub(crate) fn signatures_root<'a, 'input>(
    document: &'a Document<'input>,
) -> Result<Node<'a, 'input>> {
    let root = document.root_element();
    ensure!(
        root.has_tag_name(ROOT_ELEMENT),
        "expected <{ROOT_ELEMENT}> root element, found <{}>",
        root.tag_name().name()
    );
    Ok(root)
}

/// Schema version declared on the root; documents without one are version 1.
pub(crate) fn spec_version(root: Node<'_, '_>) -> String {
    match root.attribute("version").map(str::trim) {
        Some(version) if !version.is_empty() => version.to_string(),
        _ => "1".to_string(),
    }
}

/// Child elements of `parent` named `tag` that pass `filter`.
pub(crate) fn sections<'a, 'input: 'a>(
    parent: Node<'a, 'input>,
    tag: &'a str,
    filter: SectionFilter<'a>,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    children_named(parent, tag).filter(move |node| filter.matches(*node))
}

pub(crate) fn children_named<'a, 'input: 'a>(
    parent: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    parent
        .children()
        .filter(move |node| node.is_element() && node.has_tag_name(tag))
}

pub(crate) fn child_elements<'a, 'input: 'a>(
    parent: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    parent.children().filter(Node::is_element)
}

/// Trimmed attribute value, empty when absent.
pub(crate) fn attr<'a>(node: Node<'a, '_>, name: &str) -> &'a str {
    node.attribute(name).map(str::trim).unwrap_or_default()
}

/// Trimmed text content of an element.
pub(crate) fn text_of(node: Node<'_, '_>) -> String {
    let text: String = node
        .descendants()
        .filter(Node::is_text)
        .filter_map(|text| text.text())
        .collect();
    text.trim().to_string()
}
