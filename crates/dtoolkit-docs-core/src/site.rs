//! Static site generation
//!
//! Writes the homepage, one page and one canonical JSON payload per entry,
//! the not-found page, the search index and the shared assets.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::config::SiteConfig;
use crate::doc::{
    generate_search_css, generate_search_index, generate_search_js, generate_styles, page_file,
    DocStore, PageRenderer, API_DIR,
};

/// Errors that can occur while writing a site
#[derive(Error, Debug)]
pub enum SiteError {
    #[error("failed to write '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize '{name}': {source}")]
    Serialize {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

/// What a site build produced
#[derive(Debug, Clone, Default)]
pub struct SiteReport {
    /// Every file written, in write order
    pub files: Vec<PathBuf>,
    /// Number of API pages
    pub pages: usize,
}

/// Writes a complete static site for a [`DocStore`]
pub struct SiteGenerator<'a> {
    store: &'a DocStore,
    config: &'a SiteConfig,
}

impl<'a> SiteGenerator<'a> {
    pub fn new(store: &'a DocStore, config: &'a SiteConfig) -> Self {
        Self { store, config }
    }

    /// Generate the site into `output_dir`, creating it if needed.
    ///
    /// Existing files with the same names are overwritten; other files in
    /// the directory are left alone.
    pub fn generate(&self, output_dir: impl AsRef<Path>) -> Result<SiteReport, SiteError> {
        let output_dir = output_dir.as_ref();
        let renderer = PageRenderer::new(self.store, self.config);
        let mut report = SiteReport::default();

        create_dir(&output_dir.join(API_DIR))?;
        create_dir(&output_dir.join("assets"))?;

        write_file(&mut report, output_dir.join("index.html"), &renderer.render_home())?;
        write_file(
            &mut report,
            output_dir.join("404.html"),
            &renderer.render_not_found(None),
        )?;

        for entry in self.store.entries() {
            let page_path = output_dir.join(API_DIR).join(page_file(&entry.name));
            write_file(&mut report, page_path, &renderer.render_entry(entry))?;

            let payload =
                serde_json::to_string_pretty(entry).map_err(|source| SiteError::Serialize {
                    name: entry.name.clone(),
                    source,
                })?;
            let payload_path = output_dir.join(API_DIR).join(format!("{}.json", entry.name));
            write_file(&mut report, payload_path, &payload)?;

            report.pages += 1;
        }

        let index = generate_search_index(self.store).map_err(|source| SiteError::Serialize {
            name: String::from("search index"),
            source,
        })?;
        write_file(&mut report, output_dir.join("search-index.json"), &index)?;

        write_file(
            &mut report,
            output_dir.join("assets").join("styles.css"),
            &format!("{}{}", generate_styles(), generate_search_css()),
        )?;
        write_file(
            &mut report,
            output_dir.join("assets").join("search.js"),
            generate_search_js(),
        )?;

        info!(
            "generated {} API pages ({} files) in {}",
            report.pages,
            report.files.len(),
            output_dir.display()
        );
        Ok(report)
    }
}

fn create_dir(path: &Path) -> Result<(), SiteError> {
    std::fs::create_dir_all(path).map_err(|source| SiteError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file(report: &mut SiteReport, path: PathBuf, content: &str) -> Result<(), SiteError> {
    std::fs::write(&path, content).map_err(|source| SiteError::Io {
        path: path.clone(),
        source,
    })?;
    debug!("wrote {}", path.display());
    report.files.push(path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::{load, DocEntry};

    const TIMER: &str = r#"{
        "functions": [
            {"name": "new", "desc": "Creates and returns a new [Timer] object.", "params": [], "returns": [{"desc": "", "lua_type": "Timer\r\n"}], "function_type": "static"}
        ],
        "properties": [],
        "types": [],
        "name": "Timer",
        "desc": "A timer class."
    }"#;

    fn create_test_store() -> DocStore {
        DocStore::from_entries([load(TIMER.as_bytes()).unwrap(), DocEntry::new("Value")]).unwrap()
    }

    #[test]
    fn test_generate_site() {
        let store = create_test_store();
        let config = SiteConfig::default();
        let dir = tempfile::tempdir().unwrap();

        let report = SiteGenerator::new(&store, &config).generate(dir.path()).unwrap();
        assert_eq!(report.pages, 2);

        for file in [
            "index.html",
            "404.html",
            "api/Timer.html",
            "api/Timer.json",
            "api/Value.html",
            "search-index.json",
            "assets/styles.css",
            "assets/search.js",
        ] {
            assert!(dir.path().join(file).is_file(), "missing {}", file);
        }
        assert_eq!(report.files.len(), 9);
    }

    #[test]
    fn test_written_payload_reloads() {
        let store = create_test_store();
        let config = SiteConfig::default();
        let dir = tempfile::tempdir().unwrap();
        SiteGenerator::new(&store, &config).generate(dir.path()).unwrap();

        let raw = std::fs::read(dir.path().join("api/Timer.json")).unwrap();
        assert_eq!(&load(&raw).unwrap(), store.lookup("Timer").unwrap());
    }

    #[test]
    fn test_pages_link_to_assets() {
        let store = create_test_store();
        let config = SiteConfig::default();
        let dir = tempfile::tempdir().unwrap();
        SiteGenerator::new(&store, &config).generate(dir.path()).unwrap();

        let page = std::fs::read_to_string(dir.path().join("api/Timer.html")).unwrap();
        assert!(page.contains("href=\"../assets/styles.css\""));
        let home = std::fs::read_to_string(dir.path().join("index.html")).unwrap();
        assert!(home.contains("<a href=\"api/Timer.html\">Timer</a>"));
    }

    #[test]
    fn test_unwritable_output() {
        let store = create_test_store();
        let config = SiteConfig::default();
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("site");
        std::fs::write(&blocker, "not a directory").unwrap();

        let err = SiteGenerator::new(&store, &config).generate(&blocker).unwrap_err();
        assert!(matches!(err, SiteError::Io { .. }));
    }
}
