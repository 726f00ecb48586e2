//! Documentation data and rendering
//!
//! This module provides the payload schema, the store the payloads are
//! loaded into, and the HTML rendering of documented symbols.

mod crosslink;
mod html;
mod markdown;
mod search;
mod store;
mod types;

pub use crosslink::CrossLinker;
pub use html::{generate_styles, PageRenderer};
pub use markdown::{expand_admonitions, render_markdown};
pub use search::{
    generate_search_css, generate_search_index, generate_search_js, search_entries, SearchEntry,
    API_DIR,
};
pub use store::{
    load, member_anchor, page_file, DocStore, ParseError, StoreError, SymbolInfo, SymbolKind,
};
pub use types::{
    first_line, Deprecation, DocEntry, FunctionDoc, FunctionType, ParamDoc, PropertyDoc, Realm,
    ReturnDoc, SourceLocation, TypeDoc, TypeTag,
};
