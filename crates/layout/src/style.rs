//! Declared attributes and the resolved, read-only view used by layout and paint.
//!
//! Text attributes inherit from the nearest ancestor that declares them. The
//! cascade runs once in [`StyleMap::resolve`]; nothing walks the ancestor
//! chain while painting.

use crate::LayoutError;
use crate::config::LayoutConfig;
use crate::tree::{DocumentTree, NodeId};
use quire_types::{Color, FontKey};
use serde::Deserialize;

pub const DEFAULT_FONT: &str = "Helvetica";
pub const DEFAULT_FONT_SIZE: f32 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextDecoration {
    #[default]
    None,
    Underline,
    LineThrough,
    Overline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BorderStyle {
    #[default]
    Solid,
    Dotted,
    Dashed,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Border {
    #[serde(default = "default_border_width")]
    pub width: f32,
    #[serde(default)]
    pub color: Color,
    #[serde(default)]
    pub style: BorderStyle,
}

fn default_border_width() -> f32 {
    1.0
}

/// Attributes as declared on a node. `None` means "not declared here".
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Attributes {
    // Inherited text attributes.
    pub font: Option<FontKey>,
    pub font_size: Option<f32>,
    pub color: Option<Color>,
    pub line_height: Option<f32>,
    pub text_decoration: Option<TextDecoration>,
    pub text_align: Option<TextAlign>,
    pub alpha: Option<f32>,
    pub encoding: Option<String>,

    // Box attributes, never inherited.
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub padding: Option<f32>,
    pub margin_bottom: Option<f32>,
    pub background: Option<Color>,
    pub border: Option<Border>,
    pub border_radius: Option<f32>,
    pub clip: bool,
}

/// Attribute values after inheritance and defaults have been applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAttributes {
    pub font: FontKey,
    pub font_size: f32,
    pub color: Color,
    pub line_height: f32,
    pub text_decoration: TextDecoration,
    pub text_align: TextAlign,
    pub alpha: f32,
    pub encoding: String,
}

impl ResolvedAttributes {
    pub fn defaults(config: &LayoutConfig) -> Self {
        Self {
            font: FontKey::new(DEFAULT_FONT),
            font_size: DEFAULT_FONT_SIZE,
            color: Color::black(),
            line_height: DEFAULT_FONT_SIZE * config.line_height_multiplier,
            text_decoration: TextDecoration::None,
            text_align: TextAlign::Left,
            alpha: 1.0,
            encoding: config.default_encoding.clone(),
        }
    }
}

/// The resolved attributes of every node in a tree, indexed by [`NodeId`].
#[derive(Debug, Clone, Default)]
pub struct StyleMap {
    resolved: Vec<ResolvedAttributes>,
}

impl StyleMap {
    pub fn resolve(tree: &DocumentTree, config: &LayoutConfig) -> Result<Self, LayoutError> {
        let mut resolved: Vec<Option<ResolvedAttributes>> = vec![None; tree.len()];
        // Explicit line heights are inherited; implicit ones follow the node's own font size.
        let mut explicit_line_height: Vec<Option<f32>> = vec![None; tree.len()];

        for &root in tree.roots() {
            for id in tree.descendants(root) {
                let node = tree.node(id)?;
                let (base, inherited_line_height) = match node.parent() {
                    Some(parent) => (
                        resolved[parent.index()]
                            .clone()
                            .ok_or(LayoutError::UnknownNode(parent))?,
                        explicit_line_height[parent.index()],
                    ),
                    None => (ResolvedAttributes::defaults(config), None),
                };

                let declared = &node.attributes;
                let font_size = declared.font_size.unwrap_or(base.font_size);
                let line_height = declared.line_height.or(inherited_line_height);
                explicit_line_height[id.index()] = line_height;

                resolved[id.index()] = Some(ResolvedAttributes {
                    font: declared.font.clone().unwrap_or(base.font),
                    font_size,
                    color: declared.color.clone().unwrap_or(base.color),
                    line_height: line_height
                        .unwrap_or(font_size * config.line_height_multiplier),
                    text_decoration: declared.text_decoration.unwrap_or(base.text_decoration),
                    text_align: declared.text_align.unwrap_or(base.text_align),
                    alpha: declared.alpha.unwrap_or(base.alpha),
                    encoding: declared.encoding.clone().unwrap_or(base.encoding),
                });
            }
        }

        let resolved = resolved
            .into_iter()
            .enumerate()
            .map(|(index, attrs)| attrs.ok_or(LayoutError::DetachedNode(index)))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { resolved })
    }

    pub fn get(&self, id: NodeId) -> Result<&ResolvedAttributes, LayoutError> {
        self.resolved
            .get(id.index())
            .ok_or(LayoutError::UnknownNode(id))
    }

    pub fn len(&self) -> usize {
        self.resolved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::NodeKind;
    use quire_types::Size;

    fn tree_with_text(
        page_attrs: Attributes,
        paragraph_attrs: Attributes,
        text_attrs: Attributes,
    ) -> (DocumentTree, NodeId, NodeId) {
        let mut tree = DocumentTree::new();
        let page = tree.add_root(
            NodeKind::Page {
                size: Size::a4(),
            },
            page_attrs,
        );
        let paragraph = tree
            .add_child(page, NodeKind::Paragraph { lines: vec![] }, paragraph_attrs)
            .unwrap();
        let text = tree
            .add_child(paragraph, NodeKind::Text { content: "x".into() }, text_attrs)
            .unwrap();
        (tree, paragraph, text)
    }

    #[test]
    fn text_attributes_inherit_from_ancestors() {
        let (tree, _, text) = tree_with_text(
            Attributes {
                color: Some(Color::rgb(255, 0, 0)),
                font: Some(FontKey::new("Times-Roman")),
                ..Default::default()
            },
            Attributes {
                text_decoration: Some(TextDecoration::Underline),
                ..Default::default()
            },
            Attributes {
                font_size: Some(18.0),
                ..Default::default()
            },
        );
        let styles = StyleMap::resolve(&tree, &LayoutConfig::default()).unwrap();
        let resolved = styles.get(text).unwrap();

        assert_eq!(resolved.color, Color::rgb(255, 0, 0));
        assert_eq!(resolved.font, FontKey::new("Times-Roman"));
        assert_eq!(resolved.text_decoration, TextDecoration::Underline);
        assert_eq!(resolved.font_size, 18.0);
    }

    #[test]
    fn implicit_line_height_follows_own_font_size() {
        let (tree, paragraph, text) = tree_with_text(
            Attributes::default(),
            Attributes::default(),
            Attributes {
                font_size: Some(20.0),
                ..Default::default()
            },
        );
        let styles = StyleMap::resolve(&tree, &LayoutConfig::default()).unwrap();

        assert!((styles.get(paragraph).unwrap().line_height - 14.4).abs() < 0.001);
        assert!((styles.get(text).unwrap().line_height - 24.0).abs() < 0.001);
    }

    #[test]
    fn explicit_line_height_wins_over_font_size() {
        let (tree, _, text) = tree_with_text(
            Attributes::default(),
            Attributes {
                line_height: Some(15.0),
                ..Default::default()
            },
            Attributes {
                font_size: Some(40.0),
                ..Default::default()
            },
        );
        let styles = StyleMap::resolve(&tree, &LayoutConfig::default()).unwrap();
        assert_eq!(styles.get(text).unwrap().line_height, 15.0);
    }

    #[test]
    fn attributes_deserialize_from_css_like_names() {
        let attrs: Attributes = serde_json::from_str(
            r##"{ "font-size": 11, "line-height": 15, "text-decoration": "line-through",
                 "color": "#336699", "border": { "width": 0.5, "style": "dotted" } }"##,
        )
        .unwrap();
        assert_eq!(attrs.font_size, Some(11.0));
        assert_eq!(attrs.text_decoration, Some(TextDecoration::LineThrough));
        assert_eq!(attrs.color, Some(Color::rgb(0x33, 0x66, 0x99)));
        assert_eq!(attrs.border.unwrap().style, BorderStyle::Dotted);
    }
}
