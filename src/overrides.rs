//! Override documents.
//!
//! An override document is a `<signatures>` file whose `<replace>` sections
//! rename enums and rewrite individual tokens after the specification has
//! been read. The XML is parsed once into an owned model.
use crate::select::{
    attr, children_named, pipe_list_contains, sections, signatures_root, text_of, SectionFilter,
};
use anyhow::{Context, Result};
use roxmltree::{Document, Node};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideDocument {
    sections: Vec<ReplaceSection>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ReplaceSection {
    apis: Option<String>,
    enums: Vec<EnumOverride>,
}

/// Overrides for one enum, selected by a pipe-delimited list of enum names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnumOverride {
    pub matches: String,
    pub name: Option<String>,
    pub tokens: Vec<TokenOverride>,
}

/// Replacement fields for one token; `None` leaves the field alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenOverride {
    pub token: String,
    pub name: Option<String>,
    pub value: Option<String>,
    pub reference: Option<String>,
}

impl OverrideDocument {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("read overrides {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parse overrides {}", path.display()))
    }

    pub fn parse(xml: &str) -> Result<Self> {
        let document = Document::parse(xml).context("parse override XML")?;
        let root = signatures_root(&document)?;
        let sections = sections(root, "replace", SectionFilter::default())
            .map(|section| ReplaceSection {
                apis: section.attribute("name").map(str::to_string),
                enums: children_named(section, "enum").map(read_enum_override).collect(),
            })
            .collect();
        Ok(Self { sections })
    }

    /// First enum override, in document order, whose `replace` section
    /// names `api` (any section when `api` is `None`) and whose name list
    /// contains `enum_name`.
    pub fn find_enum(&self, api: Option<&str>, enum_name: &str) -> Option<&EnumOverride> {
        let api = api.filter(|api| !api.is_empty());
        self.sections
            .iter()
            .filter(|section| match api {
                Some(api) => pipe_list_contains(section.apis.as_deref(), api),
                None => true,
            })
            .flat_map(|section| section.enums.iter())
            .find(|entry| pipe_list_contains(Some(entry.matches.as_str()), enum_name))
    }
}

impl EnumOverride {
    /// Token override matching the original spelling, else the current one.
    pub fn find_token(&self, original_name: &str, name: &str) -> Option<&TokenOverride> {
        self.tokens
            .iter()
            .find(|token| token.token == original_name)
            .or_else(|| self.tokens.iter().find(|token| token.token == name))
    }
}

fn read_enum_override(node: Node<'_, '_>) -> EnumOverride {
    EnumOverride {
        matches: attr(node, "name").to_string(),
        name: children_named(node, "name").next().map(text_of),
        tokens: children_named(node, "token")
            .map(read_token_override)
            .collect(),
    }
}

fn read_token_override(node: Node<'_, '_>) -> TokenOverride {
    let mut replacement = TokenOverride {
        token: attr(node, "name").to_string(),
        ..TokenOverride::default()
    };
    for child in node.children().filter(Node::is_element) {
        let text = text_of(child);
        match child.tag_name().name() {
            "name" => replacement.name = Some(text),
            "value" => replacement.value = Some(text),
            "reference" => replacement.reference = Some(text),
            _ => {}
        }
    }
    replacement
}

#[cfg(test)]
mod tests {
    use super::*;

    const OVERRIDES: &str = r#"<signatures>
      <replace name="gles2">
        <enum name="TextureTarget"><name>GlesTextureTarget</name></enum>
      </replace>
      <replace name="gl|glcore">
        <enum name="TextureTarget|TextureTargetARB">
          <name>TextureTargetCore</name>
          <token name="GL_TEXTURE_2D">
            <name>Texture2DCore</name>
            <value>0x0DE1</value>
          </token>
          <token name="Texture3D"><reference>TextureTarget</reference></token>
        </enum>
      </replace>
    </signatures>"#;

    #[test]
    fn selects_enum_overrides_by_api_and_name_list() {
        let document = OverrideDocument::parse(OVERRIDES).expect("parse");
        let found = document
            .find_enum(Some("glcore"), "TextureTargetARB")
            .expect("override");
        assert_eq!(found.name.as_deref(), Some("TextureTargetCore"));

        let found = document.find_enum(None, "TextureTarget").expect("override");
        assert_eq!(found.name.as_deref(), Some("GlesTextureTarget"));

        assert!(document.find_enum(Some("gl"), "Texture").is_none());
        assert!(document.find_enum(Some("vulkan"), "TextureTarget").is_none());
    }

    #[test]
    fn token_overrides_prefer_the_original_name() {
        let document = OverrideDocument::parse(OVERRIDES).expect("parse");
        let found = document.find_enum(Some("gl"), "TextureTarget").expect("override");

        let token = found
            .find_token("GL_TEXTURE_2D", "Texture2D")
            .expect("by original name");
        assert_eq!(token.name.as_deref(), Some("Texture2DCore"));
        assert_eq!(token.value.as_deref(), Some("0x0DE1"));
        assert_eq!(token.reference, None);

        let token = found
            .find_token("GL_TEXTURE_3D", "Texture3D")
            .expect("by current name");
        assert_eq!(token.reference.as_deref(), Some("TextureTarget"));
        assert!(found.find_token("GL_ONE", "One").is_none());
    }
}
