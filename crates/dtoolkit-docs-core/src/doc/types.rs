//! Types for representing documentation payloads
//!
//! One [`DocEntry`] describes one documented symbol of the library. The field
//! names follow the JSON emitted by the documentation extractor so payloads
//! deserialize without any renaming layer. Member order is insertion order
//! and is never re-sorted.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Documentation for one symbol (usually a class or a utility module)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocEntry {
    /// Functions and methods, in source order
    #[serde(default)]
    pub functions: Vec<FunctionDoc>,
    /// Properties and events, in source order
    #[serde(default)]
    pub properties: Vec<PropertyDoc>,
    /// Type aliases, in source order
    #[serde(default)]
    pub types: Vec<TypeDoc>,
    /// Symbol name (required)
    pub name: String,
    /// Markdown description
    #[serde(default)]
    pub desc: String,
    /// Execution contexts the symbol is available in
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub realm: Vec<Realm>,
    /// Where the symbol is declared
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceLocation>,
}

impl DocEntry {
    /// Create an empty entry with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            functions: Vec::new(),
            properties: Vec::new(),
            types: Vec::new(),
            name: name.into(),
            desc: String::new(),
            realm: Vec::new(),
            source: None,
        }
    }

    /// Functions that appear in rendered output
    pub fn visible_functions(&self) -> impl Iterator<Item = &FunctionDoc> {
        self.functions.iter().filter(|f| !f.ignore)
    }

    /// Properties that appear in rendered output
    pub fn visible_properties(&self) -> impl Iterator<Item = &PropertyDoc> {
        self.properties.iter().filter(|p| !p.ignore)
    }

    /// Types that appear in rendered output
    pub fn visible_types(&self) -> impl Iterator<Item = &TypeDoc> {
        self.types.iter().filter(|t| !t.ignore)
    }

    /// First line of the description, used in listings
    pub fn summary(&self) -> &str {
        first_line(&self.desc)
    }
}

/// A documented function or method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDoc {
    pub name: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub params: Vec<ParamDoc>,
    #[serde(default)]
    pub returns: Vec<ReturnDoc>,
    pub function_type: FunctionType,
    /// The call may suspend until an asynchronous operation completes
    #[serde(default, skip_serializing_if = "is_false")]
    pub yields: bool,
    /// Excluded from rendered output
    #[serde(default, skip_serializing_if = "is_false")]
    pub ignore: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceLocation>,
}

impl FunctionDoc {
    /// Separator used between the owner and the function name in signatures
    pub fn separator(&self) -> char {
        match self.function_type {
            FunctionType::Static => '.',
            FunctionType::Method => ':',
        }
    }
}

/// A function parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamDoc {
    pub name: String,
    #[serde(default)]
    pub desc: String,
    pub lua_type: TypeTag,
}

/// A function return value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnDoc {
    #[serde(default)]
    pub desc: String,
    pub lua_type: TypeTag,
}

/// How a function is called
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionType {
    /// Called on the class table: `Timer.new()`
    Static,
    /// Called on an instance: `timer:Start()`
    Method,
}

impl FunctionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FunctionType::Static => "static",
            FunctionType::Method => "method",
        }
    }
}

/// A documented property or event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDoc {
    pub name: String,
    #[serde(default)]
    pub desc: String,
    pub lua_type: TypeTag,
    /// Semantic markers such as "Event"
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<Deprecation>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub ignore: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceLocation>,
}

/// A documented type alias
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDoc {
    pub name: String,
    #[serde(default)]
    pub desc: String,
    pub lua_type: TypeTag,
    #[serde(default, skip_serializing_if = "is_false")]
    pub ignore: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceLocation>,
}

/// Deprecation notice attached to a member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deprecation {
    /// Version the member was deprecated in
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
}

/// Execution context a symbol is available in
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Realm {
    Client,
    Server,
    Plugin,
    /// Any tag the extractor emits that has no variant of its own
    #[serde(untagged)]
    Other(String),
}

impl Realm {
    pub fn as_str(&self) -> &str {
        match self {
            Realm::Client => "Client",
            Realm::Server => "Server",
            Realm::Plugin => "Plugin",
            Realm::Other(tag) => tag,
        }
    }
}

/// Source location for "view source" links
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub line: u32,
    /// Path relative to the library repository root
    pub path: String,
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.path, self.line)
    }
}

/// A type expression as written by the library author.
///
/// The text is kept exactly as extracted (including stray `\r\n` endings) so
/// payloads round-trip unchanged. It is display text only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeTag(String);

impl TypeTag {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The text exactly as stored in the payload
    pub fn raw(&self) -> &str {
        &self.0
    }

    /// The text with surrounding whitespace removed
    pub fn display_text(&self) -> &str {
        self.0.trim()
    }

    /// Trailing `?` marks an optional value
    pub fn is_optional(&self) -> bool {
        self.display_text().ends_with('?')
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_text())
    }
}

impl From<&str> for TypeTag {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// First non-empty line of a description, trimmed
pub fn first_line(text: &str) -> &str {
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("")
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(value: &bool) -> bool {
    !*value
}
