//! Integration tests for resource tables loaded from TOML

use std::fs;

use pretty_assertions::assert_eq;

use abbrev_resolver::{
    caret_placeholder, AbbreviationNode, ElementKind, ElementOptions, ElementRegistry,
    ResourceError, ResourceStore, ResourceTable,
};

const CUSTOM_RESOURCES: &str = r#"
[markup.snippets]
todo = "TODO: |"

[markup.abbreviations]
card = '<div class="card" data-role="panel">'

[site]
extends = "markup"

[site.abbreviations]
c = "card"
logo = '<img src="/logo.svg" alt="|" />'
"#;

#[test]
fn test_default_table_aliases() {
    let store = ResourceTable::default();
    let registry = ElementRegistry::new(&store);

    let el = registry.create(
        ElementKind::Tag,
        &AbbreviationNode::new("bq").with_attribute("class", "quote"),
        "html",
        None,
        &ElementOptions::default(),
    );
    assert_eq!(el.name(), "blockquote");
    assert_eq!(el.attribute("class").as_deref(), Some("quote"));
}

#[test]
fn test_default_alias_carries_target_defaults() {
    let store = ResourceTable::default();
    let registry = ElementRegistry::new(&store);

    let el = registry.create(
        ElementKind::Tag,
        &AbbreviationNode::new("btn").with_attribute("type", "submit"),
        "html",
        None,
        &ElementOptions::default(),
    );
    assert_eq!(el.name(), "button");
    assert_eq!(el.real_name(), "btn");
    assert_eq!(el.attribute("type").as_deref(), Some("submit"));

    for (alias, target) in [("fst", "fieldset"), ("str", "strong")] {
        let el = registry.create(
            ElementKind::Tag,
            &AbbreviationNode::new(alias),
            "html",
            None,
            &ElementOptions::default(),
        );
        assert_eq!(el.name(), target);
    }
}

#[test]
fn test_default_definition_caret_in_attribute() {
    let store = ResourceTable::default();
    let registry = ElementRegistry::new(&store);

    let el = registry.create(
        ElementKind::Tag,
        &AbbreviationNode::new("a:link"),
        "html",
        None,
        &ElementOptions::default(),
    );
    assert_eq!(el.name(), "a");
    assert_eq!(
        el.attribute("href"),
        Some(format!("http://{}", caret_placeholder()))
    );
}

#[test]
fn test_self_closing_definition() {
    let store = ResourceTable::default();
    let registry = ElementRegistry::new(&store);

    let el = registry.create(
        ElementKind::Tag,
        &AbbreviationNode::new("img").with_attribute("src", "cat.png"),
        "html",
        None,
        &ElementOptions::default(),
    );
    assert!(el.is_self_closing());
    assert_eq!(el.attribute("src").as_deref(), Some("cat.png"));
    assert_eq!(el.attribute("alt").as_deref(), Some(""));
}

#[test]
fn test_custom_table_from_file() {
    let path = std::env::temp_dir().join(format!(
        "abbrev-resolver-resources-{}.toml",
        std::process::id()
    ));
    fs::write(&path, CUSTOM_RESOURCES).expect("Should write temp file");
    let loaded = ResourceTable::from_file(&path);
    fs::remove_file(&path).ok();

    let store = loaded.expect("Should load");
    let mut syntaxes: Vec<_> = store.syntaxes().collect();
    syntaxes.sort();
    assert_eq!(syntaxes, vec!["markup", "site"]);

    let registry = ElementRegistry::new(&store);
    let el = registry.create(
        ElementKind::Tag,
        &AbbreviationNode::new("c").with_attribute("class", "wide"),
        "site",
        None,
        &ElementOptions::default(),
    );
    assert_eq!(el.name(), "div");
    assert_eq!(el.attribute("class").as_deref(), Some("card wide"));
    assert_eq!(el.attribute("data-role").as_deref(), Some("panel"));

    assert_eq!(store.lookup_snippet("site", "todo"), "TODO: |");
}

#[test]
fn test_missing_file_error() {
    let result = ResourceTable::from_file(std::path::Path::new("/nonexistent/resources.toml"));
    assert!(matches!(result, Err(ResourceError::Io(_))));
}
