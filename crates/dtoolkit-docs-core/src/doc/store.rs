//! Documentation payload store
//!
//! Payloads are loaded once, at build time, into an explicitly constructed
//! [`DocStore`] that is then passed by reference to everything that renders
//! pages. The store also keeps a member-level symbol index used for
//! cross-referencing and search.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use super::types::{first_line, DocEntry};

/// Errors raised while deserializing a single payload
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("payload must be a JSON object")]
    NotAnObject,

    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("field `{0}` must be a non-empty string")]
    InvalidField(&'static str),
}

/// Errors raised while building a store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to read payloads: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to load '{path}': {source}")]
    Payload {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("symbol '{0}' is documented by more than one payload")]
    DuplicateSymbol(String),

    #[error("symbol name '{0}' cannot be used as a page name")]
    InvalidName(String),
}

/// Deserialize one payload.
///
/// The payload must be a JSON object with a non-empty string `name` that is
/// usable as a file name. Nothing is returned unless the whole payload
/// deserializes.
pub fn load(raw: &[u8]) -> Result<DocEntry, ParseError> {
    let value: serde_json::Value = serde_json::from_slice(raw)?;

    let object = value.as_object().ok_or(ParseError::NotAnObject)?;
    match object.get("name") {
        None => return Err(ParseError::MissingField("name")),
        Some(serde_json::Value::String(name)) if is_valid_name(name) => {}
        Some(_) => return Err(ParseError::InvalidField("name")),
    }

    Ok(serde_json::from_value(value)?)
}

/// Names become file names under the output directory, so they must stay a
/// single path component
fn is_valid_name(name: &str) -> bool {
    !name.trim().is_empty()
        && name != "."
        && !name.contains("..")
        && !name.chars().any(|c| c == '/' || c == '\\' || c.is_control())
}

/// What a [`SymbolInfo`] points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    /// A whole documented symbol (its own page)
    Entry,
    Type,
    Property,
    Function,
}

impl SymbolKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SymbolKind::Entry => "class",
            SymbolKind::Type => "type",
            SymbolKind::Property => "property",
            SymbolKind::Function => "function",
        }
    }
}

/// A linkable symbol in the documentation
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolInfo {
    /// The symbol name
    pub name: String,
    pub kind: SymbolKind,
    /// The entry this symbol belongs to (itself for entries)
    pub owner: String,
    /// Anchor id on the owner's page, `None` for entries
    pub anchor: Option<String>,
    /// First line of the description
    pub summary: String,
}

impl SymbolInfo {
    /// Link relative to another API page
    pub fn link(&self) -> String {
        match &self.anchor {
            Some(anchor) => format!("{}#{}", page_file(&self.owner), anchor),
            None => page_file(&self.owner),
        }
    }
}

/// File name of the page rendered for an entry
pub fn page_file(name: &str) -> String {
    format!("{}.html", name)
}

/// Anchor id for a member on its owner's page.
///
/// Alphanumerics, `-`, `.` and `:` are kept; `_` doubles and any other
/// character becomes `_<hex>;`, so distinct names never share an anchor.
pub fn member_anchor(kind: SymbolKind, name: &str) -> String {
    let mut anchor = format!("{}-", kind.as_str());
    for c in name.chars() {
        match c {
            '_' => anchor.push_str("__"),
            c if c.is_alphanumeric() || matches!(c, '-' | '.' | ':') => anchor.push(c),
            c => anchor.push_str(&format!("_{:x};", u32::from(c))),
        }
    }
    anchor
}

/// Read-only mapping from symbol name to its documentation
#[derive(Debug, Clone, Default)]
pub struct DocStore {
    entries: BTreeMap<String, DocEntry>,
    /// Symbol index for cross-referencing (name -> symbols with that name)
    symbol_index: HashMap<String, Vec<SymbolInfo>>,
}

impl DocStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from already loaded entries
    pub fn from_entries(entries: impl IntoIterator<Item = DocEntry>) -> Result<Self, StoreError> {
        let mut store = Self::new();
        for entry in entries {
            store.insert(entry)?;
        }
        Ok(store)
    }

    /// Load every `*.json` payload in a directory.
    ///
    /// Files are read in file-name order. The first malformed payload aborts
    /// the load.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref();
        let mut paths = Vec::new();

        for dir_entry in std::fs::read_dir(dir)? {
            let path = dir_entry?.path();
            if path.is_dir() {
                debug!("skipping directory {}", path.display());
                continue;
            }
            if path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            } else {
                warn!("skipping non-JSON file {}", path.display());
            }
        }
        paths.sort();

        let mut store = Self::new();
        for path in paths {
            let raw = std::fs::read(&path)?;
            let entry = load(&raw).map_err(|source| StoreError::Payload {
                path: path.clone(),
                source,
            })?;
            debug!(symbol = %entry.name, "loaded {}", path.display());
            store.insert(entry)?;
        }

        info!("loaded {} documented symbols from {}", store.len(), dir.display());
        Ok(store)
    }

    /// Add an entry and index its symbols
    pub fn insert(&mut self, entry: DocEntry) -> Result<(), StoreError> {
        if !is_valid_name(&entry.name) {
            return Err(StoreError::InvalidName(entry.name));
        }
        if self.entries.contains_key(&entry.name) {
            return Err(StoreError::DuplicateSymbol(entry.name));
        }
        self.index_entry(&entry);
        self.entries.insert(entry.name.clone(), entry);
        Ok(())
    }

    /// Look up an entry by symbol name; `None` means the page does not exist
    pub fn lookup(&self, name: &str) -> Option<&DocEntry> {
        self.entries.get(name)
    }

    /// All entries ordered by name
    pub fn entries(&self) -> impl Iterator<Item = &DocEntry> {
        self.entries.values()
    }

    /// All symbol names, sorted
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose name contains the query (case-insensitive)
    pub fn search(&self, query: &str) -> Vec<&DocEntry> {
        let query_lower = query.to_lowercase();
        self.entries
            .values()
            .filter(|entry| entry.name.to_lowercase().contains(&query_lower))
            .collect()
    }

    /// All indexed symbols with this exact name
    pub fn symbols(&self, name: &str) -> Option<&[SymbolInfo]> {
        self.symbol_index.get(name).map(|v| v.as_slice())
    }

    /// Resolve a reference like `Timer`, `Timer.new` or `Timer:Start`.
    ///
    /// A bare name prefers a whole entry over a member of the same name.
    pub fn resolve(&self, reference: &str) -> Option<&SymbolInfo> {
        if let Some((owner, member)) = reference.split_once(['.', ':']) {
            return self
                .symbol_index
                .get(member)?
                .iter()
                .find(|s| s.kind != SymbolKind::Entry && s.owner == owner);
        }

        let symbols = self.symbol_index.get(reference)?;
        symbols
            .iter()
            .find(|s| s.kind == SymbolKind::Entry)
            .or_else(|| symbols.first())
    }

    /// Get all symbols sorted alphabetically
    pub fn all_symbols(&self) -> Vec<&SymbolInfo> {
        let mut symbols: Vec<_> = self.symbol_index.values().flatten().collect();
        symbols.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.owner.cmp(&b.owner))
        });
        symbols
    }

    /// Index an entry and its visible members
    fn index_entry(&mut self, entry: &DocEntry) {
        self.push_symbol(SymbolInfo {
            name: entry.name.clone(),
            kind: SymbolKind::Entry,
            owner: entry.name.clone(),
            anchor: None,
            summary: entry.summary().to_string(),
        });

        // Ignored members are not rendered, so nothing may link to them
        let members = entry
            .visible_types()
            .map(|t| (SymbolKind::Type, &t.name, &t.desc))
            .chain(
                entry
                    .visible_properties()
                    .map(|p| (SymbolKind::Property, &p.name, &p.desc)),
            )
            .chain(
                entry
                    .visible_functions()
                    .map(|f| (SymbolKind::Function, &f.name, &f.desc)),
            );

        for (kind, name, desc) in members {
            self.push_symbol(SymbolInfo {
                name: name.clone(),
                kind,
                owner: entry.name.clone(),
                anchor: Some(member_anchor(kind, name)),
                summary: first_line(desc).to_string(),
            });
        }
    }

    fn push_symbol(&mut self, info: SymbolInfo) {
        self.symbol_index
            .entry(info.name.clone())
            .or_default()
            .push(info);
    }
}
