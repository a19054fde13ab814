//! Generic property tree input contract.
//!
//! The core operates on an already-decoded tree of named nodes, each holding
//! a property map (name → raw bytes) and a child map (name → node), with no
//! ordering guarantee on either. [`Node::from_dtb`] adapts a raw FDT blob
//! through the external `device_tree` decoder; the core itself never touches
//! blob bytes.

use std::collections::HashMap;

use crate::error::{FitError, Result};
use crate::prop;

/// A node of the decoded property tree.
#[derive(Debug, Clone, Default)]
pub struct Node {
    name: String,
    properties: HashMap<String, Vec<u8>>,
    children: HashMap<String, Node>,
}

impl Node {
    /// Creates an empty node with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds a property, consuming and returning the node (builder style).
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        self.set_property(name, value);
        self
    }

    /// Adds a child, consuming and returning the node (builder style).
    pub fn with_child(mut self, child: Node) -> Self {
        self.add_child(child);
        self
    }

    /// Sets a property, replacing any previous value under that name.
    pub fn set_property(&mut self, name: impl Into<String>, value: impl Into<Vec<u8>>) {
        self.properties.insert(name.into(), value.into());
    }

    /// Inserts a child, replacing any previous child of the same name.
    pub fn add_child(&mut self, child: Node) {
        self.children.insert(child.name.clone(), child);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Looks up a raw property value by name.
    pub fn property(&self, name: &str) -> Option<&[u8]> {
        self.properties.get(name).map(Vec::as_slice)
    }

    /// Looks up a child node by name.
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.get(name)
    }

    /// Iterates over children in no particular order.
    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.children.values()
    }

    /// Iterates over properties in no particular order.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.properties
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_slice()))
    }

    /// Returns a required raw property, or [`FitError::MissingProperty`].
    pub fn bytes_prop(&self, name: &str) -> Result<&[u8]> {
        self.property(name).ok_or_else(|| FitError::MissingProperty {
            node: self.name.clone(),
            name: name.to_string(),
        })
    }

    /// Returns a required text property.
    pub fn text_prop(&self, name: &str) -> Result<String> {
        Ok(prop::as_text(self.bytes_prop(name)?))
    }

    /// Returns an optional text property, `None` when absent.
    pub fn text_prop_opt(&self, name: &str) -> Option<String> {
        self.property(name).map(prop::as_text)
    }

    /// Returns a required big-endian u32 property.
    pub fn u32_prop(&self, name: &str) -> Result<u32> {
        let raw = self.bytes_prop(name)?;
        prop::as_u32(raw).map_err(|source| FitError::MalformedProperty {
            node: self.name.clone(),
            name: name.to_string(),
            source,
        })
    }

    /// Returns a required array of big-endian u32 cells.
    pub fn u32_array_prop(&self, name: &str) -> Result<Vec<u32>> {
        let raw = self.bytes_prop(name)?;
        prop::as_u32_array(raw).map_err(|source| FitError::MalformedProperty {
            node: self.name.clone(),
            name: name.to_string(),
            source,
        })
    }

    /// Decodes a raw FDT blob into a tree via the external decoder.
    pub fn from_dtb(blob: &[u8]) -> Result<Node> {
        let dt = device_tree::DeviceTree::load(blob)
            .map_err(|err| FitError::Tree(format!("{err:?}")))?;
        Ok(Self::from_decoded(&dt.root))
    }

    fn from_decoded(src: &device_tree::Node) -> Node {
        let mut node = Node::new(src.name.clone());
        for (name, value) in &src.props {
            node.set_property(name.clone(), value.clone());
        }
        for child in &src.children {
            node.add_child(Self::from_decoded(child));
        }
        node
    }
}
