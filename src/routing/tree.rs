//! Segment tree of registered resource paths.
//!
//! # Responsibilities
//! - Register nested resource paths (`parent/*/child`) at startup
//! - Resolve a request path into handler, instance ID and ancestor IDs
//!
//! # Design Decisions
//! - Literal segments only, one node per segment, exact `HashMap` lookup
//! - Request paths alternate literal and identifier tokens, starting with a literal
//! - No partial matches: any unknown literal fails the whole lookup
//! - Mutated only through `&mut self`; shared read-only once built

use std::collections::HashMap;
use std::fmt;

use crate::resource::{HandlerRef, ResourceHandler};

/// Marks "an identifier occurs here" in a registration path.
pub const WILDCARD_DELIMITER: &str = "/*/";

/// One literal segment of the tree.
pub struct PathNode {
    segment: String,
    children: HashMap<String, PathNode>,
    handler: Option<HandlerRef>,
}

impl PathNode {
    pub fn new(segment: impl Into<String>) -> Self {
        Self {
            segment: segment.into(),
            children: HashMap::new(),
            handler: None,
        }
    }

    pub fn segment(&self) -> &str {
        &self.segment
    }

    pub fn child(&self, segment: &str) -> Option<&PathNode> {
        self.children.get(segment)
    }

    pub fn children(&self) -> impl Iterator<Item = &PathNode> {
        self.children.values()
    }

    pub fn handler(&self) -> Option<&HandlerRef> {
        self.handler.as_ref()
    }
}

impl fmt::Debug for PathNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathNode")
            .field("segment", &self.segment)
            .field("has_handler", &self.handler.is_some())
            .field("children", &self.children)
            .finish()
    }
}

/// Result of a successful lookup. Lives only for the request that produced it.
pub struct Resolved<'a> {
    /// Segment of the node the lookup ended on.
    pub resource: &'a str,
    pub handler: &'a dyn ResourceHandler,
    /// `None` for collection URLs.
    pub id: Option<String>,
    /// Nearest parent first.
    pub parent_ids: Vec<String>,
}

impl fmt::Debug for Resolved<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolved")
            .field("resource", &self.resource)
            .field("id", &self.id)
            .field("parent_ids", &self.parent_ids)
            .finish()
    }
}

/// Tree of nested resources rooted at the mount prefix.
#[derive(Debug)]
pub struct ResourceTree {
    root: PathNode,
}

impl ResourceTree {
    pub fn new(root_segment: impl Into<String>) -> Self {
        Self {
            root: PathNode::new(root_segment),
        }
    }

    pub fn root(&self) -> &PathNode {
        &self.root
    }

    /// Attach `handler` to `path`, creating missing nodes on the way.
    ///
    /// `path` is split on [`WILDCARD_DELIMITER`]; every piece, even an empty
    /// one, becomes a literal segment. Registering a path twice replaces the
    /// handler and leaves every other node untouched.
    pub fn register(&mut self, path: &str, handler: HandlerRef) {
        let mut node = &mut self.root;
        for segment in path.split(WILDCARD_DELIMITER) {
            node = node
                .children
                .entry(segment.to_string())
                .or_insert_with(|| PathNode::new(segment));
        }

        if node.handler.replace(handler).is_some() {
            tracing::warn!(path = %path, "Resource handler replaced");
        }
    }

    /// Resolve a request path with the mount prefix already removed.
    ///
    /// Odd tokens descend the tree, even tokens are captured as IDs. When the
    /// path ends on an ID the last one becomes the instance ID, otherwise the
    /// path names a collection. A single trailing `/` is ignored.
    pub fn resolve(&self, path: &str) -> Option<Resolved<'_>> {
        let path = path.strip_suffix('/').unwrap_or(path);
        if path.is_empty() {
            return None;
        }

        let mut node = &self.root;
        let mut literals = 0;
        let mut captured = Vec::new();

        for (position, token) in path.split('/').enumerate() {
            if position % 2 == 0 {
                node = node.children.get(token)?;
                literals += 1;
            } else {
                captured.push(token.to_string());
            }
        }

        let handler = node.handler.as_deref()?;

        let id = if literals == captured.len() {
            captured.pop().filter(|id| !id.is_empty())
        } else {
            None
        };
        captured.reverse();

        Some(Resolved {
            resource: &node.segment,
            handler,
            id,
            parent_ids: captured,
        })
    }
}
