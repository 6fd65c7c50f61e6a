//! # Field Tree Arena
//!
//! The field tree is an arena of slots addressed by stable
//! [`FieldId`]s. A node is a name (unique among siblings), a
//! [`FieldOptions`] record, a parent pointer, and an ordered child
//! index. Identifiers never move: replacing a field rewrites its slot
//! and re-links its children, so every id handed out stays valid for
//! the life of the tree.

use serde_json::Value;

use crate::error::TreeError;
use crate::options::FieldOptions;

/// Stable identifier for a field slot. Only valid for the tree that
/// created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldId(usize);

#[derive(Debug, Clone)]
struct FieldNode {
    name: String,
    options: FieldOptions,
    parent: Option<FieldId>,
    children: Vec<FieldId>,
}

/// A tree of form fields, owned by the host for the duration of one
/// request. Single-threaded; the engine is the sole mutator while a
/// lifecycle pass runs.
#[derive(Debug, Clone)]
pub struct FieldTree {
    nodes: Vec<FieldNode>,
}

impl FieldTree {
    /// Create a tree holding only the named root (always compound).
    pub fn new(root_name: impl Into<String>) -> Self {
        Self {
            nodes: vec![FieldNode {
                name: root_name.into(),
                options: FieldOptions::compound(),
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// The root field's id.
    pub fn root(&self) -> FieldId {
        FieldId(0)
    }

    /// Register a new child under `parent`, after its current last
    /// sibling. Sibling names must be unique.
    pub fn add_field(
        &mut self,
        parent: FieldId,
        name: impl Into<String>,
        options: FieldOptions,
    ) -> Result<FieldId, TreeError> {
        let name = name.into();
        if self.child(parent, &name).is_some() {
            return Err(TreeError::DuplicateField {
                parent: self.nodes[parent.0].name.clone(),
                name,
            });
        }
        let id = FieldId(self.nodes.len());
        self.nodes.push(FieldNode {
            name,
            options,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        Ok(id)
    }

    /// Replace the named child's configuration — the host's
    /// copy-on-write mutation primitive.
    ///
    /// The slot is rewritten with `options`; the existing children are
    /// detached and re-attached one by one in unchanged declaration
    /// order, each re-asserting its own options (marker state
    /// included) into its slot. The child's id is stable across the
    /// replacement and is returned as the new handle.
    pub fn replace_field(
        &mut self,
        parent: FieldId,
        name: &str,
        options: FieldOptions,
    ) -> Result<FieldId, TreeError> {
        let id = self
            .child(parent, name)
            .ok_or_else(|| TreeError::UnknownField {
                parent: self.nodes[parent.0].name.clone(),
                name: name.to_string(),
            })?;

        tracing::debug!(
            field = %self.full_name(id),
            required = options.required,
            marker = options.has_required_marker(),
            "replacing field configuration"
        );

        self.nodes[id.0].options = options;

        // Re-attach children one by one in declaration order. Each
        // child keeps its own record (marker state included) in its
        // slot, so its add/remove-marker decision carries over the
        // parent's replacement instead of being assumed.
        let children = std::mem::take(&mut self.nodes[id.0].children);
        for &child in &children {
            self.nodes[child.0].parent = Some(id);
            self.nodes[id.0].children.push(child);
        }
        Ok(id)
    }

    /// Look up a child of `parent` by name.
    pub fn child(&self, parent: FieldId, name: &str) -> Option<FieldId> {
        self.nodes[parent.0]
            .children
            .iter()
            .copied()
            .find(|&c| self.nodes[c.0].name == name)
    }

    /// Children of `id` in declaration order.
    pub fn children(&self, id: FieldId) -> &[FieldId] {
        &self.nodes[id.0].children
    }

    /// The field's name (unique among its siblings).
    pub fn name(&self, id: FieldId) -> &str {
        &self.nodes[id.0].name
    }

    /// The field's parent, `None` for the root.
    pub fn parent(&self, id: FieldId) -> Option<FieldId> {
        self.nodes[id.0].parent
    }

    /// The field's configuration record.
    pub fn options(&self, id: FieldId) -> &FieldOptions {
        &self.nodes[id.0].options
    }

    /// Mutable access to a field's configuration. Reserved for the
    /// engine's in-place adjustments (cascade disable of a dependency
    /// rule); hosts express option changes via [`Self::replace_field`].
    pub fn options_mut(&mut self, id: FieldId) -> &mut FieldOptions {
        &mut self.nodes[id.0].options
    }

    /// Framework-style path of the field: `root[address][po_box]`.
    pub fn full_name(&self, id: FieldId) -> String {
        let mut segments = Vec::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            segments.push(self.nodes[current.0].name.as_str());
            cursor = self.nodes[current.0].parent;
        }
        segments.reverse();
        let mut out = String::from(segments[0]);
        for segment in &segments[1..] {
            out.push('[');
            out.push_str(segment);
            out.push(']');
        }
        out
    }

    /// Descendants of `id` in pre-order (not including `id` itself).
    pub fn descendants(&self, id: FieldId) -> Vec<FieldId> {
        let mut out = Vec::new();
        let mut stack: Vec<FieldId> = self.nodes[id.0].children.iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.nodes[current.0].children.iter().rev().copied());
        }
        out
    }

    /// Register a whole subtree from a declarative description: a
    /// mapping of field name to raw options bag, with children nested
    /// under a `"fields"` key. Convenience for hosts that keep their
    /// form declarations as data.
    ///
    /// Children are registered in the mapping's iteration order (key
    /// order for a plain `serde_json::Map`). Hosts that care about
    /// declaration order should register fields via [`Self::add_field`].
    pub fn add_subtree(
        &mut self,
        parent: FieldId,
        name: impl Into<String>,
        declaration: &Value,
    ) -> Result<FieldId, TreeError> {
        let mut raw = declaration.clone();
        let nested = match &mut raw {
            Value::Object(map) => map.remove("fields"),
            _ => None,
        };
        let mut options = FieldOptions::resolve(&raw)?;
        if nested.is_some() {
            options.compound = true;
        }
        let id = self.add_field(parent, name, options)?;
        if let Some(Value::Object(children)) = nested {
            for (child_name, child_declaration) in children {
                self.add_subtree(id, child_name, &child_declaration)?;
            }
        }
        Ok(id)
    }
}
