//! Element resolution
//!
//! This module turns parsed abbreviation nodes into [`ResolvedElement`]s ready
//! for serialization. Two factories exist, one per [`ElementKind`]:
//!
//! - the tag factory looks up the node's definition (following one alias) and
//!   layers the definition's default attributes under the node's own;
//! - the snippet factory resolves snippet text into the element's value and
//!   seeds caret placeholders for `id` and `class`.
//!
//! # Example
//!
//! ```rust
//! use abbrev_resolver::{AbbreviationNode, ElementKind, ElementOptions, ElementRegistry, ResourceTable};
//!
//! let store = ResourceTable::default();
//! let registry = ElementRegistry::new(&store);
//!
//! let node = AbbreviationNode::new("a").with_attribute("class", "nav");
//! let el = registry.create(ElementKind::Tag, &node, "html", None, &ElementOptions::default());
//!
//! assert_eq!(el.attribute("href").as_deref(), Some(""));
//! assert_eq!(el.attribute("class").as_deref(), Some("nav"));
//! ```

mod factory;
mod registry;
mod resolved;

pub use factory::{ElementFactory, ResourceHint, SnippetElementFactory, TagElementFactory};
pub use registry::{ElementKind, ElementRegistry};
pub use resolved::{Content, ContentProducer, ResolvedElement};
