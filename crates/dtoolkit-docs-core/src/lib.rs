//! dToolkit Docs Core - documentation site engine for the dToolkit library
//!
//! This crate provides the core functionality:
//! - Doc: payload schema, payload store, markdown and page rendering
//! - Features: the homepage feature list
//! - Config: site configuration (`docs.toml`)
//! - Site: static site generation

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Site configuration
pub mod config;

/// Documentation payloads and page rendering
pub mod doc;

/// HTML escaping helpers
pub mod escape;

/// Homepage feature list
pub mod features;

/// Static site generation
pub mod site;

pub use config::{ConfigError, SiteConfig};
pub use doc::{load, DocEntry, DocStore, PageRenderer, ParseError, StoreError};
pub use features::{render_features, FeatureDescriptor, FEATURES};
pub use site::{SiteError, SiteGenerator, SiteReport};
