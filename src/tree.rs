//! Owned snapshot of a camera's configuration tree and its text rendering

use crate::{
  widget::{DisplayValue, Widget, WidgetKind},
  Error,
};
use std::io::{self, Write};

/// Node of a configuration tree snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigNode {
  /// A widget that could be read
  Entry {
    /// Widget name, empty if it could not be read
    name: String,
    /// Human readable label
    label: String,
    /// Widget type, `None` if it could not be read
    kind: Option<WidgetKind>,
    /// Printed value
    value: DisplayValue,
    /// Child nodes, in libgphoto2's order
    children: Vec<ConfigNode>,
  },
  /// A child the library refused to hand out
  Unreadable {
    /// Position among its siblings
    index: usize,
    /// Error returned when fetching the child
    error: Error,
  },
}

impl ConfigNode {
  /// Walk `widget` and all of its descendants
  pub fn snapshot(widget: &Widget) -> Self {
    let kind = match widget.kind() {
      Ok(kind) => Some(kind),
      Err(err) => {
        tracing::warn!(code = err.code(), "widget get type failed: {}", err);
        None
      }
    };

    let children = match widget.children() {
      Ok(children) => children
        .map(|(index, child)| match child {
          Ok(child) => ConfigNode::snapshot(&child),
          Err(error) => ConfigNode::Unreadable { index, error },
        })
        .collect(),
      Err(err) => {
        tracing::warn!(code = err.code(), "could not count children: {}", err);
        Vec::new()
      }
    };

    ConfigNode::Entry {
      name: widget.name().unwrap_or_default(),
      label: widget.label().unwrap_or_default(),
      kind,
      value: match kind {
        Some(_) => widget.display_value(),
        None => DisplayValue::Unsupported,
      },
      children,
    }
  }

  /// Child nodes, empty for unreadable nodes
  pub fn children(&self) -> &[ConfigNode] {
    match self {
      ConfigNode::Entry { children, .. } => children,
      ConfigNode::Unreadable { .. } => &[],
    }
  }

  /// Find the first entry named `name`, depth first
  pub fn find(&self, name: &str) -> Option<&ConfigNode> {
    match self {
      ConfigNode::Entry { name: own, .. } if own == name => Some(self),
      _ => self.children().iter().find_map(|child| child.find(name)),
    }
  }

  /// Total number of nodes below this one
  pub fn descendant_count(&self) -> usize {
    self.children().iter().map(|child| 1 + child.descendant_count()).sum()
  }
}

/// Print the children of `root`, one per line, indented by 4 spaces per level
pub fn render<W: Write>(root: &ConfigNode, out: &mut W) -> io::Result<()> {
  render_level(root.children(), 0, out)
}

fn render_level<W: Write>(nodes: &[ConfigNode], level: usize, out: &mut W) -> io::Result<()> {
  for node in nodes {
    match node {
      ConfigNode::Entry { name, value, children, .. } => {
        writeln!(out, "{:indent$}{} - {}", "", name, value, indent = level * 4)?;
        render_level(children, level + 1, out)?;
      }
      ConfigNode::Unreadable { index, error } => {
        writeln!(out, "Could not get child {} ({})", index, error.code())?;
      }
    }
  }

  Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
  use super::*;

  pub(crate) fn entry(name: &str, value: DisplayValue, children: Vec<ConfigNode>) -> ConfigNode {
    let kind = match (&value, children.is_empty()) {
      (_, false) => WidgetKind::Section,
      (DisplayValue::Unsupported, true) => WidgetKind::Toggle,
      _ => WidgetKind::Radio,
    };

    ConfigNode::Entry { name: name.into(), label: name.into(), kind: Some(kind), value, children }
  }

  pub(crate) fn sample_tree() -> ConfigNode {
    entry(
      "main",
      DisplayValue::Unsupported,
      vec![
        entry(
          "settings",
          DisplayValue::Unsupported,
          vec![
            entry("ownername", DisplayValue::Text("Jane Doe".into()), vec![]),
            entry("capturetarget", DisplayValue::Text("Internal RAM".into()), vec![]),
            entry("autopoweroff", DisplayValue::Unsupported, vec![]),
          ],
        ),
        entry(
          "status",
          DisplayValue::Unsupported,
          vec![
            entry("serialnumber", DisplayValue::Unreadable, vec![]),
            ConfigNode::Unreadable {
              index: 1,
              error: Error::new(libgphoto2_sys::GP_ERROR_BAD_PARAMETERS),
            },
            entry("batterylevel", DisplayValue::Text("100%".into()), vec![]),
          ],
        ),
      ],
    )
  }

  fn rendered(root: &ConfigNode) -> String {
    let mut out = Vec::new();
    render(root, &mut out).unwrap();
    String::from_utf8(out).unwrap()
  }

  #[test]
  fn renders_nested_tree() {
    insta::assert_snapshot!(rendered(&sample_tree()).trim_end(), @r###"
    settings - ?
        ownername - Jane Doe
        capturetarget - Internal RAM
        autopoweroff - ?
    status - ?
        serialnumber - ??
    Could not get child 1 (-2)
        batterylevel - 100%
    "###);
  }

  #[test]
  fn root_without_children_renders_nothing() {
    assert_eq!(rendered(&entry("main", DisplayValue::Unsupported, vec![])), "");
  }

  #[test]
  fn find_searches_depth_first() {
    let tree = sample_tree();

    match tree.find("batterylevel") {
      Some(ConfigNode::Entry { value, .. }) => {
        assert_eq!(value, &DisplayValue::Text("100%".into()))
      }
      other => panic!("unexpected node {:?}", other),
    }
    assert!(tree.find("iso").is_none());
  }

  #[test]
  fn counts_descendants() {
    assert_eq!(sample_tree().descendant_count(), 8);
    assert_eq!(ConfigNode::Unreadable { index: 0, error: Error::new(-1) }.descendant_count(), 0);
  }
}
