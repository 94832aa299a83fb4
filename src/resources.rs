//! Resource definitions and the store they are looked up from
//!
//! A resource table maps, per syntax, abbreviation names to [`Definition`]s and
//! snippet names to template text. Tables are written in TOML:
//!
//! ```toml
//! [html]
//! extends = "xml"
//!
//! [html.abbreviations]
//! img = '<img src="" alt="" />'
//! blockquote = '<blockquote>'
//! bq = "blockquote"
//!
//! [html.snippets]
//! c = "<!-- | -->"
//! ```
//!
//! An abbreviation value starting with `<` is an element definition; any other
//! value is an alias naming another abbreviation.

use std::collections::HashMap;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use tracing::{debug, trace};

use crate::error::ResourceError;
use crate::node::Attribute;

/// Leading tag of an element definition: name, attribute run, self-closing slash
static DEFINITION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^<([\w\-:]+)((?:\s+[\w\-:]+(?:\s*=\s*(?:"[^"]*"|'[^']*'|[^>\s/]+))?)*)\s*(/?)>"#,
    )
    .unwrap()
});

/// One attribute inside the attribute run
static ATTRIBUTE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([\w\-:]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^>\s/]+)))?"#).unwrap()
});

/// Default attributes and shape of a tag-like element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementDefinition {
    pub name: String,
    pub attributes: Vec<Attribute>,
    /// Written as `<tag />`
    pub self_closing: bool,
}

impl ElementDefinition {
    /// Create a definition with no default attributes
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            self_closing: false,
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute::new(name, value));
        self
    }

    pub fn self_closing(mut self, self_closing: bool) -> Self {
        self.self_closing = self_closing;
        self
    }
}

/// Literal template text of a snippet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnippetDefinition {
    pub data: String,
}

impl SnippetDefinition {
    pub fn new(data: impl Into<String>) -> Self {
        Self { data: data.into() }
    }
}

/// A matched resource entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Definition {
    Element(ElementDefinition),
    Snippet(SnippetDefinition),
    /// Alias: resolve `data` as another abbreviation name
    Reference(String),
}

impl Definition {
    /// Parse an abbreviation value from a resource table
    ///
    /// Returns None when the value starts like a tag but is not one.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if !value.starts_with('<') {
            return Some(Definition::Reference(value.to_string()));
        }

        let caps = DEFINITION_REGEX.captures(value)?;
        let name = caps.get(1)?.as_str().to_string();
        let attr_run = caps.get(2).map(|m| m.as_str()).unwrap_or("");
        let self_closing = caps.get(3).is_some_and(|m| !m.as_str().is_empty());

        let attributes = ATTRIBUTE_REGEX
            .captures_iter(attr_run)
            .map(|a| {
                let value = a
                    .get(2)
                    .or_else(|| a.get(3))
                    .or_else(|| a.get(4))
                    .map(|m| m.as_str())
                    .unwrap_or("");
                Attribute::new(&a[1], value)
            })
            .collect();

        Some(Definition::Element(ElementDefinition {
            name,
            attributes,
            self_closing,
        }))
    }

    /// Name of the element this definition expands to, if it is an element
    pub fn element_name(&self) -> Option<&str> {
        match self {
            Definition::Element(def) => Some(def.name.as_str()),
            _ => None,
        }
    }
}

/// Read-only lookup of definitions and snippets by syntax and name
pub trait ResourceStore {
    /// Find the abbreviation definition for `name`
    fn lookup_abbreviation(&self, syntax: &str, name: &str) -> Option<Definition>;

    /// Find snippet text for `name`; a miss yields empty text
    fn lookup_snippet(&self, syntax: &str, name: &str) -> String;
}

/// Resources declared for one syntax
#[derive(Debug, Clone, Default)]
pub struct SyntaxResources {
    /// Syntax consulted when a name is missing here
    pub extends: Option<String>,
    pub abbreviations: HashMap<String, Definition>,
    pub snippets: HashMap<String, String>,
}

/// TOML structure for one syntax section
#[derive(Deserialize)]
struct TomlSyntax {
    extends: Option<String>,
    #[serde(default)]
    abbreviations: HashMap<String, String>,
    #[serde(default)]
    snippets: HashMap<String, String>,
}

/// Built-in resources
const DEFAULT_RESOURCES: &str = r##"
[xml.snippets]
cdata = "<![CDATA[|]]>"
"!" = "<!-- | -->"

[html]
extends = "xml"

[html.abbreviations]
a = '<a href="">'
"a:link" = '<a href="http://|">'
"a:mail" = '<a href="mailto:|">'
img = '<img src="" alt="" />'
br = '<br />'
hr = '<hr />'
input = '<input type="" />'
inp = '<input type="text" name="" id="" />'
"link:css" = '<link rel="stylesheet" href="style.css" />'
script = '<script type="text/javascript">'
blockquote = '<blockquote>'
button = '<button type="button">'
fieldset = '<fieldset>'
strong = '<strong>'
bq = "blockquote"
btn = "button"
fst = "fieldset"
str = "strong"

[html.snippets]
"cc:ie" = "<!--[if IE]>|<![endif]-->"
"cc:noie" = "<!--[if !IE]><!-->|<!--<![endif]-->"

[css.snippets]
c = "color:|;"
d = "display:|;"
m = "margin:|;"
p = "padding:|;"
"##;

/// A resource store backed by in-memory tables
///
/// `Default` loads the built-in resources; [`ResourceTable::empty`] has none.
#[derive(Debug, Clone)]
pub struct ResourceTable {
    syntaxes: HashMap<String, SyntaxResources>,
}

impl ResourceTable {
    /// Create a table with no syntaxes at all
    pub fn empty() -> Self {
        Self {
            syntaxes: HashMap::new(),
        }
    }

    /// Load resources from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ResourceError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load resources from a TOML string
    pub fn from_str(content: &str) -> Result<Self, ResourceError> {
        let parsed: HashMap<String, TomlSyntax> = toml::from_str(content)?;

        let mut syntaxes = HashMap::new();
        for (syntax, section) in parsed {
            let mut abbreviations = HashMap::new();
            for (name, value) in section.abbreviations {
                let def =
                    Definition::parse(&value).ok_or_else(|| ResourceError::InvalidDefinition {
                        syntax: syntax.clone(),
                        name: name.clone(),
                        reason: format!("cannot read tag from {:?}", value),
                    })?;
                abbreviations.insert(name, def);
            }

            syntaxes.insert(
                syntax,
                SyntaxResources {
                    extends: section.extends,
                    abbreviations,
                    snippets: section.snippets,
                },
            );
        }

        let table = Self { syntaxes };
        table.validate_inheritance()?;
        debug!("loaded resources for {} syntaxes", table.syntaxes.len());
        Ok(table)
    }

    /// Every `extends` must name a known syntax and chains must terminate
    fn validate_inheritance(&self) -> Result<(), ResourceError> {
        for (syntax, res) in &self.syntaxes {
            if let Some(parent) = &res.extends {
                if !self.syntaxes.contains_key(parent) {
                    return Err(ResourceError::UnknownParent {
                        syntax: syntax.clone(),
                        parent: parent.clone(),
                    });
                }
            }

            let mut chain = vec![syntax.clone()];
            let mut current = res.extends.as_deref();
            while let Some(next) = current {
                let looped = chain.iter().any(|s| s == next);
                chain.push(next.to_string());
                if looped {
                    return Err(ResourceError::CircularInheritance { chain });
                }
                current = self.syntaxes.get(next).and_then(|r| r.extends.as_deref());
            }
        }
        Ok(())
    }

    /// Add or replace an abbreviation definition
    pub fn insert_abbreviation(
        &mut self,
        syntax: impl Into<String>,
        name: impl Into<String>,
        def: Definition,
    ) {
        self.syntaxes
            .entry(syntax.into())
            .or_default()
            .abbreviations
            .insert(name.into(), def);
    }

    /// Add or replace a snippet
    pub fn insert_snippet(
        &mut self,
        syntax: impl Into<String>,
        name: impl Into<String>,
        text: impl Into<String>,
    ) {
        self.syntaxes
            .entry(syntax.into())
            .or_default()
            .snippets
            .insert(name.into(), text.into());
    }

    /// Get the resources declared directly for a syntax
    pub fn syntax(&self, syntax: &str) -> Option<&SyntaxResources> {
        self.syntaxes.get(syntax)
    }

    /// Get all syntax names
    pub fn syntaxes(&self) -> impl Iterator<Item = &str> {
        self.syntaxes.keys().map(|s| s.as_str())
    }

    /// Walk `syntax` and its `extends` ancestors, returning the first hit
    fn find_in_chain<'a, T>(
        &'a self,
        syntax: &str,
        pick: impl Fn(&'a SyntaxResources) -> Option<T>,
    ) -> Option<T> {
        let mut seen: Vec<&str> = Vec::new();
        let mut current = self.syntaxes.get_key_value(syntax);

        while let Some((name, res)) = current {
            if seen.contains(&name.as_str()) {
                break;
            }
            seen.push(name.as_str());

            if let Some(found) = pick(res) {
                return Some(found);
            }
            current = res
                .extends
                .as_deref()
                .and_then(|parent| self.syntaxes.get_key_value(parent));
        }
        None
    }
}

impl ResourceStore for ResourceTable {
    fn lookup_abbreviation(&self, syntax: &str, name: &str) -> Option<Definition> {
        let found = self.find_in_chain(syntax, |res| res.abbreviations.get(name).cloned());
        if found.is_none() {
            trace!("no abbreviation '{}' for syntax '{}'", name, syntax);
        }
        found
    }

    fn lookup_snippet(&self, syntax: &str, name: &str) -> String {
        match self.find_in_chain(syntax, |res| res.snippets.get(name)) {
            Some(text) => text.clone(),
            None => {
                trace!("no snippet '{}' for syntax '{}'", name, syntax);
                String::new()
            }
        }
    }
}

impl Default for ResourceTable {
    fn default() -> Self {
        Self::from_str(DEFAULT_RESOURCES).expect("Default resources should be valid TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_element_definition() {
        let def = Definition::parse(r#"<img src="" alt="" />"#).unwrap();
        assert_eq!(
            def,
            Definition::Element(
                ElementDefinition::new("img")
                    .with_attribute("src", "")
                    .with_attribute("alt", "")
                    .self_closing(true)
            )
        );
    }

    #[test]
    fn test_parse_quoting_styles() {
        let def = Definition::parse(r#"<input type='text' name=q disabled>"#).unwrap();
        let Definition::Element(el) = def else {
            panic!("expected element definition");
        };
        assert_eq!(el.name, "input");
        assert!(!el.self_closing);
        assert_eq!(
            el.attributes,
            vec![
                Attribute::new("type", "text"),
                Attribute::new("name", "q"),
                Attribute::new("disabled", ""),
            ]
        );
    }

    #[test]
    fn test_parse_reference() {
        assert_eq!(
            Definition::parse("blockquote"),
            Some(Definition::Reference("blockquote".to_string()))
        );
    }

    #[test]
    fn test_parse_malformed_tag() {
        assert_eq!(Definition::parse("<<broken"), None);
    }

    #[test]
    fn test_default_table() {
        let table = ResourceTable::default();
        assert!(matches!(
            table.lookup_abbreviation("html", "img"),
            Some(Definition::Element(_))
        ));
        assert_eq!(
            table.lookup_abbreviation("html", "bq"),
            Some(Definition::Reference("blockquote".to_string()))
        );
    }

    #[test]
    fn test_default_aliases_have_targets() {
        let table = ResourceTable::default();
        let html = table.syntax("html").expect("html syntax");

        let mut aliases = 0;
        for (name, def) in &html.abbreviations {
            if let Definition::Reference(target) = def {
                aliases += 1;
                assert!(
                    matches!(
                        table.lookup_abbreviation("html", target),
                        Some(Definition::Element(_))
                    ),
                    "alias '{}' points at '{}', which is not an element",
                    name,
                    target
                );
            }
        }
        assert!(aliases > 0);
    }

    #[test]
    fn test_lookup_through_extends() {
        let table = ResourceTable::default();
        assert_eq!(table.lookup_snippet("html", "cdata"), "<![CDATA[|]]>");
        assert_eq!(table.lookup_snippet("xml", "cc:ie"), "");
    }

    #[test]
    fn test_snippet_miss_is_empty() {
        let table = ResourceTable::empty();
        assert_eq!(table.lookup_snippet("html", "nothing"), "");
        assert_eq!(table.lookup_abbreviation("html", "nothing"), None);
    }

    #[test]
    fn test_insert_overrides() {
        let mut table = ResourceTable::default();
        table.insert_snippet("html", "cdata", "override");
        assert_eq!(table.lookup_snippet("html", "cdata"), "override");
        assert_eq!(table.lookup_snippet("xml", "cdata"), "<![CDATA[|]]>");
    }

    #[test]
    fn test_unknown_parent_error() {
        let result = ResourceTable::from_str(
            r#"
[html]
extends = "missing"
"#,
        );
        assert!(matches!(result, Err(ResourceError::UnknownParent { .. })));
    }

    #[test]
    fn test_circular_inheritance_error() {
        let result = ResourceTable::from_str(
            r#"
[a]
extends = "b"

[b]
extends = "a"
"#,
        );
        assert!(matches!(
            result,
            Err(ResourceError::CircularInheritance { .. })
        ));
    }

    #[test]
    fn test_invalid_definition_error() {
        let result = ResourceTable::from_str(
            r#"
[html.abbreviations]
bad = "<>"
"#,
        );
        assert!(matches!(
            result,
            Err(ResourceError::InvalidDefinition { .. })
        ));
    }

    #[test]
    fn test_invalid_toml_error() {
        let result = ResourceTable::from_str("this is not valid toml {{{{");
        assert!(matches!(result, Err(ResourceError::Parse(_))));
    }
}
