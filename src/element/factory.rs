//! Factories turning abbreviation nodes into resolved elements

use tracing::{debug, trace};

use crate::escape::{escape_caret, CARET_PLACEHOLDER};
use crate::node::AbbreviationNode;
use crate::options::ElementOptions;
use crate::resources::{Definition, ElementDefinition, ResourceStore, SnippetDefinition};

use super::registry::ElementKind;
use super::resolved::ResolvedElement;

/// Resource handed to a factory instead of letting it look one up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceHint {
    /// Bare name: becomes an element definition or snippet text, per factory
    Name(String),
    Definition(Definition),
}

/// Builds one kind of resolved element
pub trait ElementFactory {
    fn kind(&self) -> ElementKind;

    fn create(
        &self,
        node: &AbbreviationNode,
        syntax: &str,
        resource: Option<ResourceHint>,
        options: &ElementOptions,
    ) -> ResolvedElement;
}

/// Builds tag-like elements, merging definition defaults with node attributes
pub struct TagElementFactory<'a> {
    store: &'a dyn ResourceStore,
}

impl<'a> TagElementFactory<'a> {
    pub fn new(store: &'a dyn ResourceStore) -> Self {
        Self { store }
    }

    /// Pick the definition for a node, following at most one alias
    fn resolve_definition(
        &self,
        node: &AbbreviationNode,
        syntax: &str,
        resource: Option<ResourceHint>,
    ) -> Option<Definition> {
        let definition = match resource {
            Some(ResourceHint::Name(name)) => Some(Definition::Element(ElementDefinition::new(name))),
            Some(ResourceHint::Definition(def)) => Some(def),
            None if node.has_name() => self.store.lookup_abbreviation(syntax, &node.name),
            None => None,
        };

        match definition {
            Some(Definition::Reference(target)) => {
                trace!("following alias '{}' -> '{}'", node.name, target);
                let resolved = self.store.lookup_abbreviation(syntax, &target);
                if resolved.is_none() {
                    debug!("alias '{}' -> '{}' not found in '{}'", node.name, target, syntax);
                }
                resolved
            }
            Some(def) => Some(def),
            None => {
                debug!(
                    "no definition for '{}' in '{}', using node as written",
                    node.name, syntax
                );
                None
            }
        }
    }
}

impl ElementFactory for TagElementFactory<'_> {
    fn kind(&self) -> ElementKind {
        ElementKind::Tag
    }

    fn create(
        &self,
        node: &AbbreviationNode,
        syntax: &str,
        resource: Option<ResourceHint>,
        options: &ElementOptions,
    ) -> ResolvedElement {
        let definition = self.resolve_definition(node, syntax, resource);
        let element =
            ResolvedElement::new(ElementKind::Tag, node, syntax, definition.as_ref(), options);

        // Defaults first so node attributes override them (or extend `class`)
        if let Some(Definition::Element(def)) = &definition {
            element.copy_attributes(&def.attributes);
        }
        element.copy_attributes(&node.attributes);
        element
    }
}

/// Builds snippet elements carrying resolved snippet text
pub struct SnippetElementFactory<'a> {
    store: &'a dyn ResourceStore,
}

impl<'a> SnippetElementFactory<'a> {
    pub fn new(store: &'a dyn ResourceStore) -> Self {
        Self { store }
    }
}

impl ElementFactory for SnippetElementFactory<'_> {
    fn kind(&self) -> ElementKind {
        ElementKind::Snippet
    }

    fn create(
        &self,
        node: &AbbreviationNode,
        syntax: &str,
        resource: Option<ResourceHint>,
        options: &ElementOptions,
    ) -> ResolvedElement {
        let definition = match resource {
            Some(ResourceHint::Name(text)) => Some(Definition::Snippet(SnippetDefinition::new(text))),
            Some(ResourceHint::Definition(def)) => Some(def),
            None => None,
        };
        let element = ResolvedElement::new(
            ElementKind::Snippet,
            node,
            syntax,
            definition.as_ref(),
            options,
        );

        let text = match &definition {
            Some(Definition::Snippet(snippet)) if !snippet.data.is_empty() => snippet.data.clone(),
            _ => self.store.lookup_snippet(syntax, &element.name()),
        };
        element.set_value(escape_caret(&text));

        // Insertion markers, overridable by the node's own id/class
        element.add_attribute("id", CARET_PLACEHOLDER);
        element.add_attribute("class", CARET_PLACEHOLDER);
        element.copy_attributes(&node.attributes);
        element
    }
}
