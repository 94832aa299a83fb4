//! Input model: parsed abbreviation nodes handed to the element factories

/// A single `name="value"` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A node of a parsed abbreviation, e.g. `li.item*3`
///
/// Attribute names may repeat here; they are merged when an element is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbbreviationNode {
    /// Shorthand name (empty when the parser produced none)
    pub name: String,
    /// Repeat count
    pub count: usize,
    /// Literal text from `{...}`
    pub text: Option<String>,
    /// Repetition spans several output lines
    pub is_repeating: bool,
    /// Name was implied by context rather than written
    pub has_implicit_name: bool,
    pub attributes: Vec<Attribute>,
}

impl Default for AbbreviationNode {
    fn default() -> Self {
        Self {
            name: String::new(),
            count: 1,
            text: None,
            is_repeating: false,
            has_implicit_name: false,
            attributes: Vec::new(),
        }
    }
}

impl AbbreviationNode {
    /// Create a node with the given name and defaults for everything else
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the repeat count
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Set the literal text
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Append an attribute
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute::new(name, value));
        self
    }

    /// Mark the node as repeating over multiple lines
    pub fn repeating(mut self, repeating: bool) -> Self {
        self.is_repeating = repeating;
        self
    }

    /// Mark the node's name as implicit
    pub fn implicit_name(mut self, implicit: bool) -> Self {
        self.has_implicit_name = implicit;
        self
    }

    pub fn has_name(&self) -> bool {
        !self.name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let node = AbbreviationNode::new("div");
        assert_eq!(node.count, 1);
        assert!(node.text.is_none());
        assert!(node.has_name());
        assert!(!AbbreviationNode::default().has_name());
    }

    #[test]
    fn test_builder_keeps_duplicate_attributes() {
        let node = AbbreviationNode::new("p")
            .with_attribute("class", "a")
            .with_attribute("class", "b")
            .with_count(3)
            .repeating(true);

        assert_eq!(node.attributes.len(), 2);
        assert_eq!(node.count, 3);
        assert!(node.is_repeating);
    }
}
