//! Abbreviation resolution - turns parsed abbreviation nodes into resolved elements
//!
//! Given a node such as `btn.primary`, the library finds the matching resource
//! definition, merges its default attributes with the node's own and hands back
//! a tree-linkable [`ResolvedElement`] ready for a serializer.
//!
//! # Example
//!
//! ```rust
//! use abbrev_resolver::{
//!     AbbreviationNode, ElementKind, ElementOptions, ElementRegistry, ResourceTable,
//! };
//!
//! let store = ResourceTable::default();
//! let registry = ElementRegistry::new(&store);
//! let options = ElementOptions::default();
//!
//! let list = registry.create(ElementKind::Tag, &AbbreviationNode::new("ul"), "html", None, &options);
//! let item = registry.create(
//!     ElementKind::Tag,
//!     &AbbreviationNode::new("li").with_attribute("class", "item"),
//!     "html",
//!     None,
//!     &options,
//! );
//! list.add_child(&item).unwrap();
//!
//! assert!(list.find_deepest_child().unwrap().ptr_eq(&item));
//! ```

pub mod element;
pub mod error;
pub mod escape;
pub mod node;
pub mod options;
pub mod resources;

pub use element::{
    Content, ContentProducer, ElementFactory, ElementKind, ElementRegistry, ResolvedElement,
    ResourceHint, SnippetElementFactory, TagElementFactory,
};
pub use error::{ResolveError, ResourceError};
pub use escape::{caret_placeholder, CARET_PLACEHOLDER};
pub use node::{AbbreviationNode, Attribute};
pub use options::ElementOptions;
pub use resources::{
    Definition, ElementDefinition, ResourceStore, ResourceTable, SnippetDefinition,
};
