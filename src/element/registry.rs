//! Element registry: the fixed set of element kinds and their factories

use std::fmt;
use std::str::FromStr;

use crate::error::ResolveError;
use crate::node::AbbreviationNode;
use crate::options::ElementOptions;
use crate::resources::ResourceStore;

use super::factory::{ElementFactory, ResourceHint, SnippetElementFactory, TagElementFactory};
use super::resolved::ResolvedElement;

/// Kinds of resolved element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Tag,
    Snippet,
}

impl ElementKind {
    pub const ALL: [ElementKind; 2] = [ElementKind::Tag, ElementKind::Snippet];

    /// Registry identifier of this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Tag => "tag-element",
            ElementKind::Snippet => "snippet-element",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementKind {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ElementKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| ResolveError::UnknownKind(s.to_string()))
    }
}

/// Both element factories, bound to one resource store
pub struct ElementRegistry<'a> {
    tag: TagElementFactory<'a>,
    snippet: SnippetElementFactory<'a>,
}

impl<'a> ElementRegistry<'a> {
    /// Create a registry whose factories resolve against `store`
    pub fn new(store: &'a dyn ResourceStore) -> Self {
        Self {
            tag: TagElementFactory::new(store),
            snippet: SnippetElementFactory::new(store),
        }
    }

    /// Get the factory registered for a kind
    pub fn factory(&self, kind: ElementKind) -> &dyn ElementFactory {
        match kind {
            ElementKind::Tag => &self.tag,
            ElementKind::Snippet => &self.snippet,
        }
    }

    /// Build an element of the given kind
    pub fn create(
        &self,
        kind: ElementKind,
        node: &AbbreviationNode,
        syntax: &str,
        resource: Option<ResourceHint>,
        options: &ElementOptions,
    ) -> ResolvedElement {
        self.factory(kind).create(node, syntax, resource, options)
    }

    /// Build an element from a kind identifier such as `"tag-element"`
    pub fn create_by_name(
        &self,
        kind: &str,
        node: &AbbreviationNode,
        syntax: &str,
        resource: Option<ResourceHint>,
        options: &ElementOptions,
    ) -> Result<ResolvedElement, ResolveError> {
        let kind = kind.parse::<ElementKind>()?;
        Ok(self.create(kind, node, syntax, resource, options))
    }
}
