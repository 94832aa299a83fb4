//! Resolved elements: merged attributes, content and tree links
//!
//! A [`ResolvedElement`] is a cheap-to-clone handle. Children are owned by
//! their parent; the parent link is weak and only used for lookups.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::debug;

use crate::error::ResolveError;
use crate::escape::{contains_tags, escape_caret, escape_text};
use crate::node::{AbbreviationNode, Attribute};
use crate::options::ElementOptions;
use crate::resources::Definition;

use super::registry::ElementKind;

/// Produces content on demand from the element it is attached to
pub type ContentProducer = Rc<dyn Fn(&ResolvedElement) -> String>;

/// Element content: literal text or a producer evaluated on every read
#[derive(Clone)]
pub enum Content {
    Literal(String),
    Deferred(ContentProducer),
}

impl Content {
    /// Wrap a closure as deferred content
    pub fn deferred<F>(producer: F) -> Self
    where
        F: Fn(&ResolvedElement) -> String + 'static,
    {
        Content::Deferred(Rc::new(producer))
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, Content::Deferred(_))
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Content::Literal(text.to_string())
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Content::Literal(text)
    }
}

impl fmt::Debug for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Content::Literal(text) => f.debug_tuple("Literal").field(text).finish(),
            Content::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

struct ElementData {
    kind: ElementKind,
    syntax: String,
    name: String,
    real_name: String,
    count: usize,
    is_repeating: bool,
    repeat_by_lines: bool,
    has_implicit_name: bool,
    self_closing: bool,
    attributes: Vec<Attribute>,
    content: Option<Content>,
    paste_content: Option<String>,
    children: Vec<ResolvedElement>,
    parent: Weak<RefCell<ElementData>>,
    options: ElementOptions,
    /// Snippet text, snippet elements only
    value: Option<String>,
}

/// An output node built from an abbreviation node and its matched definition
#[derive(Clone)]
pub struct ResolvedElement(Rc<RefCell<ElementData>>);

impl ResolvedElement {
    /// Build an element from a node and the definition it matched, if any
    ///
    /// Only the name and shape come from the definition; default attributes are
    /// layered on afterwards by the factories.
    pub fn new(
        kind: ElementKind,
        node: &AbbreviationNode,
        syntax: &str,
        definition: Option<&Definition>,
        options: &ElementOptions,
    ) -> Self {
        let name = definition
            .and_then(Definition::element_name)
            .unwrap_or(node.name.as_str())
            .to_string();
        let self_closing = matches!(definition, Some(Definition::Element(def)) if def.self_closing);
        let count = node.count.max(1);

        let element = Self(Rc::new(RefCell::new(ElementData {
            kind,
            syntax: syntax.to_string(),
            name,
            real_name: node.name.clone(),
            count,
            is_repeating: count > 1,
            repeat_by_lines: node.is_repeating,
            has_implicit_name: node.has_implicit_name,
            self_closing,
            attributes: Vec::new(),
            content: None,
            paste_content: None,
            children: Vec::new(),
            parent: Weak::new(),
            options: options.clone(),
            value: None,
        })));

        if let Some(text) = &node.text {
            element.set_content(text.as_str());
        }
        element
    }

    pub fn kind(&self) -> ElementKind {
        self.0.borrow().kind
    }

    pub fn syntax(&self) -> String {
        self.0.borrow().syntax.clone()
    }

    /// Matched definition's name, or the node's own name
    pub fn name(&self) -> String {
        self.0.borrow().name.clone()
    }

    /// Name exactly as written in the abbreviation
    pub fn real_name(&self) -> String {
        self.0.borrow().real_name.clone()
    }

    pub fn count(&self) -> usize {
        self.0.borrow().count
    }

    /// This instance is one of several copies
    pub fn is_repeating(&self) -> bool {
        self.0.borrow().is_repeating
    }

    /// The repetition spans multiple output lines
    pub fn repeat_by_lines(&self) -> bool {
        self.0.borrow().repeat_by_lines
    }

    pub fn has_implicit_name(&self) -> bool {
        self.0.borrow().has_implicit_name
    }

    pub fn is_self_closing(&self) -> bool {
        self.0.borrow().self_closing
    }

    pub fn options(&self) -> ElementOptions {
        self.0.borrow().options.clone()
    }

    /// Resolved snippet text
    pub fn value(&self) -> Option<String> {
        self.0.borrow().value.clone()
    }

    pub(crate) fn set_value(&self, value: String) {
        self.0.borrow_mut().value = Some(value);
    }

    // Attributes

    pub fn attributes(&self) -> Vec<Attribute> {
        self.0.borrow().attributes.clone()
    }

    /// Get an attribute value by name
    pub fn attribute(&self, name: &str) -> Option<String> {
        self.0
            .borrow()
            .attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.clone())
    }

    /// Add or merge an attribute
    ///
    /// `class` values accumulate, space separated, in insertion order. Any other
    /// existing attribute is overwritten. Caret delimiters in `value` become the
    /// caret placeholder.
    pub fn add_attribute(&self, name: &str, value: &str) {
        let value = escape_caret(value);
        let mut data = self.0.borrow_mut();
        let attributes = &mut data.attributes;

        match attributes.iter().position(|a| a.name == name) {
            Some(i) if name == "class" => {
                let existing = &mut attributes[i].value;
                if !existing.is_empty() {
                    existing.push(' ');
                }
                existing.push_str(&value);
            }
            Some(i) => attributes[i].value = value,
            None => attributes.push(Attribute::new(name, value)),
        }
    }

    /// Add every attribute of `source` in order
    pub fn copy_attributes(&self, source: &[Attribute]) {
        for attr in source {
            self.add_attribute(&attr.name, &attr.value);
        }
    }

    // Content

    /// Replace the content; literal text is caret-escaped, producers are kept as-is
    pub fn set_content(&self, data: impl Into<Content>) {
        let content = match data.into() {
            Content::Literal(text) => Content::Literal(escape_caret(&text)),
            deferred => deferred,
        };
        self.0.borrow_mut().content = Some(content);
    }

    /// Current content; deferred content is re-evaluated on every call
    pub fn content(&self) -> String {
        let content = self.0.borrow().content.clone();
        match content {
            Some(Content::Literal(text)) => text,
            Some(Content::Deferred(producer)) => producer(self),
            None => String::new(),
        }
    }

    pub fn has_deferred_content(&self) -> bool {
        self.0
            .borrow()
            .content
            .as_ref()
            .is_some_and(Content::is_deferred)
    }

    /// Content contains markup tags
    pub fn has_tags_in_content(&self) -> bool {
        contains_tags(&self.content())
    }

    /// Set the text to insert at the caret, escaped for literal insertion
    pub fn set_paste_content(&self, value: &str) {
        self.0.borrow_mut().paste_content = Some(escape_text(value));
    }

    pub fn paste_content(&self) -> String {
        self.0.borrow().paste_content.clone().unwrap_or_default()
    }

    // Tree

    /// Append `child`, detaching it from any previous parent
    ///
    /// Fails if `child` is this element or one of its ancestors.
    pub fn add_child(&self, child: &ResolvedElement) -> Result<(), ResolveError> {
        if self.ptr_eq(child) || self.ancestors().any(|a| a.ptr_eq(child)) {
            debug!(
                "rejected cyclic append of '{}' under '{}'",
                child.name(),
                self.name()
            );
            return Err(ResolveError::CycleDetected {
                parent: self.name(),
                child: child.name(),
            });
        }

        if let Some(previous) = child.parent() {
            previous
                .0
                .borrow_mut()
                .children
                .retain(|c| !c.ptr_eq(child));
        }

        child.0.borrow_mut().parent = Rc::downgrade(&self.0);
        self.0.borrow_mut().children.push(child.clone());
        Ok(())
    }

    pub fn has_children(&self) -> bool {
        !self.0.borrow().children.is_empty()
    }

    pub fn child_count(&self) -> usize {
        self.0.borrow().children.len()
    }

    pub fn children(&self) -> Vec<ResolvedElement> {
        self.0.borrow().children.clone()
    }

    pub fn parent(&self) -> Option<ResolvedElement> {
        self.0.borrow().parent.upgrade().map(ResolvedElement)
    }

    /// Walk up the parent links, nearest first
    pub fn ancestors(&self) -> impl Iterator<Item = ResolvedElement> {
        std::iter::successors(self.parent(), |el| el.parent())
    }

    /// Position among the parent's children
    pub fn index(&self) -> Option<usize> {
        let parent = self.parent()?;
        let index = parent.0.borrow().children.iter().position(|c| c.ptr_eq(self));
        index
    }

    /// Follow the last child down to the deepest, right-most descendant
    pub fn find_deepest_child(&self) -> Option<ResolvedElement> {
        let mut deepest = self.0.borrow().children.last()?.clone();
        loop {
            let next = deepest.0.borrow().children.last().cloned();
            match next {
                Some(child) => deepest = child,
                None => return Some(deepest),
            }
        }
    }

    /// Both handles point at the same element
    pub fn ptr_eq(&self, other: &ResolvedElement) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let data = self.0.borrow();
        write!(f, "{}{} {:?}", "  ".repeat(depth), data.kind.as_str(), data.name)?;
        if data.count > 1 {
            write!(f, " *{}", data.count)?;
        }
        for attr in &data.attributes {
            write!(f, " {}={:?}", attr.name, attr.value)?;
        }
        match &data.content {
            Some(Content::Literal(text)) => write!(f, " content={:?}", text)?,
            Some(Content::Deferred(_)) => write!(f, " content=<deferred>")?,
            None => {}
        }
        if let Some(value) = &data.value {
            write!(f, " value={:?}", value)?;
        }
        writeln!(f)?;
        for child in &data.children {
            child.fmt_tree(f, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Debug for ResolvedElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_tree(f, 0)
    }
}
