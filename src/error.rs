//! Error types for tree assembly and resource loading

use thiserror::Error;

/// Errors raised while assembling a resolved element tree
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// Appending the child would make an element its own descendant
    #[error("cannot append '{child}' under '{parent}': it would create a cycle")]
    CycleDetected { parent: String, child: String },

    /// Element kind identifier not known to the registry
    #[error("unknown element kind: {0}")]
    UnknownKind(String),
}

/// Errors that can occur when loading or parsing a resource table
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("Failed to read resource file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse resource TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// An abbreviation entry that looks like a tag but cannot be read as one
    #[error("invalid definition '{name}' in syntax '{syntax}': {reason}")]
    InvalidDefinition {
        syntax: String,
        name: String,
        reason: String,
    },

    /// `extends` names a syntax that is not in the table
    #[error("syntax '{syntax}' extends unknown syntax '{parent}'")]
    UnknownParent { syntax: String, parent: String },

    /// `extends` chain loops back on itself
    #[error("circular syntax inheritance: {}", chain.join(" -> "))]
    CircularInheritance { chain: Vec<String> },
}
