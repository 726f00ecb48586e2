//! Search index generation for documentation
//!
//! This module generates a JSON search index and JavaScript search
//! functionality for client-side documentation search.

use serde::Serialize;

use super::store::DocStore;

/// Directory API pages are written to, relative to the site root
pub const API_DIR: &str = "api";

/// A single entry in the search index
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchEntry {
    /// Symbol name
    pub name: String,
    /// Symbol kind (class, type, property, function)
    pub kind: &'static str,
    /// Entry the symbol is documented on
    pub owner: String,
    /// Brief description
    pub summary: String,
    /// Link relative to the site root
    pub link: String,
}

/// Build the search entries for every entry and visible member
pub fn search_entries(store: &DocStore) -> Vec<SearchEntry> {
    store
        .all_symbols()
        .into_iter()
        .map(|symbol| SearchEntry {
            name: symbol.name.clone(),
            kind: symbol.kind.as_str(),
            owner: symbol.owner.clone(),
            summary: symbol.summary.clone(),
            link: format!("{}/{}", API_DIR, symbol.link()),
        })
        .collect()
}

/// Generate a JSON search index from the store
pub fn generate_search_index(store: &DocStore) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&search_entries(store))
}

/// Generate the JavaScript search implementation
pub fn generate_search_js() -> &'static str {
    r#"// dToolkit Documentation Search
(function() {
    'use strict';

    let searchIndex = [];
    let searchInput = null;
    let searchResults = null;
    const root = document.body.dataset.root || '';

    // Load search index
    function loadSearchIndex() {
        fetch(root + 'search-index.json')
            .then(r => r.json())
            .then(data => { searchIndex = data; })
            .catch(e => console.warn('Search index not available:', e));
    }

    // Match score (lower is better, -1 means no match)
    function matchScore(query, text) {
        query = query.toLowerCase();
        text = text.toLowerCase();

        if (text === query) return 0;
        if (text.startsWith(query)) return 1;
        if (text.includes(query)) return 2;
        return -1;
    }

    function escapeHtml(text) {
        return text
            .replace(/&/g, '&amp;')
            .replace(/</g, '&lt;')
            .replace(/>/g, '&gt;')
            .replace(/"/g, '&quot;');
    }

    // Search and display results
    function search(query) {
        if (!searchResults) return;

        query = query.trim();
        if (query.length < 2) {
            searchResults.innerHTML = '';
            searchResults.classList.remove('visible');
            return;
        }

        const results = [];
        for (const entry of searchIndex) {
            const nameScore = matchScore(query, entry.name);
            const summaryScore = matchScore(query, entry.summary);

            // Prefer name matches
            let score = nameScore;
            if (score < 0 && summaryScore >= 0) {
                score = summaryScore + 10;
            }

            if (score >= 0) {
                results.push({ entry, score });
            }
        }

        results.sort((a, b) => a.score - b.score);
        const topResults = results.slice(0, 15);

        if (topResults.length === 0) {
            searchResults.innerHTML = '<div class="search-no-results">No results found</div>';
        } else {
            searchResults.innerHTML = topResults.map(r => {
                const e = r.entry;
                const owner = e.kind === 'class' ? '' : e.owner;
                return `<a href="${root}${e.link}" class="search-result">
                    <span class="search-result-kind kind-${e.kind}">${e.kind}</span>
                    <span class="search-result-name">${highlight(e.name, query)}</span>
                    <span class="search-result-owner">${escapeHtml(owner)}</span>
                    <span class="search-result-desc">${escapeHtml(truncate(e.summary, 60))}</span>
                </a>`;
            }).join('');
        }

        searchResults.classList.add('visible');
    }

    // Highlight matching text
    function highlight(text, query) {
        const idx = text.toLowerCase().indexOf(query.toLowerCase());
        if (idx >= 0) {
            return escapeHtml(text.substring(0, idx)) +
                   '<mark>' + escapeHtml(text.substring(idx, idx + query.length)) + '</mark>' +
                   escapeHtml(text.substring(idx + query.length));
        }
        return escapeHtml(text);
    }

    function truncate(text, maxLen) {
        if (text.length <= maxLen) return text;
        return text.substring(0, maxLen) + '...';
    }

    function initSearch() {
        searchInput = document.getElementById('search-input');
        searchResults = document.getElementById('search-results');

        if (!searchInput || !searchResults) return;

        loadSearchIndex();

        // Debounce search input
        let debounceTimer;
        searchInput.addEventListener('input', function() {
            clearTimeout(debounceTimer);
            debounceTimer = setTimeout(() => search(this.value), 150);
        });

        searchInput.addEventListener('keydown', function(e) {
            if (e.key === 'Escape') {
                this.value = '';
                searchResults.classList.remove('visible');
            }
        });

        // Close results when clicking outside
        document.addEventListener('click', function(e) {
            if (!e.target.closest('.search-container')) {
                searchResults.classList.remove('visible');
            }
        });

        // Focus search on '/' key
        document.addEventListener('keydown', function(e) {
            if (e.key === '/' && document.activeElement !== searchInput) {
                e.preventDefault();
                searchInput.focus();
            }
        });
    }

    if (document.readyState === 'loading') {
        document.addEventListener('DOMContentLoaded', initSearch);
    } else {
        initSearch();
    }
})();
"#
}

/// Stylesheet for the sidebar search box and its result list
pub fn generate_search_css() -> &'static str {
    r#"
.search-container { position: relative; margin: 0 0 1.5rem; }

#search-input {
  width: 100%;
  padding: 0.45rem 2rem 0.45rem 0.7rem;
  background: var(--code-bg);
  color: var(--text-color);
  border: 1px solid var(--border-color);
  border-radius: 6px;
  outline: none;
}
#search-input:focus { border-color: var(--accent-color); }

.search-hint {
  position: absolute;
  top: 0.45rem;
  right: 0.5rem;
  padding: 0 0.35rem;
  font-size: 0.75rem;
  color: #777;
  border: 1px solid var(--border-color);
  border-radius: 3px;
}

#search-results {
  display: none;
  position: absolute;
  z-index: 10;
  top: calc(100% + 0.4rem);
  left: 0;
  width: 26rem;
  max-height: 24rem;
  overflow-y: auto;
  background: var(--sidebar-bg);
  border: 1px solid var(--border-color);
  border-radius: 6px;
}
#search-results.visible { display: block; }

.search-result {
  display: block;
  padding: 0.6rem 0.9rem;
  color: var(--text-color);
  text-decoration: none;
  border-bottom: 1px solid var(--border-color);
}
.search-result:hover { background: var(--code-bg); }

.search-result-kind {
  margin-right: 0.4rem;
  padding: 0.1rem 0.35rem;
  font-size: 0.7rem;
  text-transform: uppercase;
  border-radius: 3px;
}
.kind-class { background: #27485a; color: #56b4d4; }
.kind-type { background: #5a4427; color: #d4a656; }
.kind-property { background: #4a275a; color: #c476d4; }
.kind-function { background: #275a4a; color: #56d4b4; }

.search-result-name { font-weight: 600; color: var(--accent-color); }
.search-result-name mark { background: rgba(0, 162, 255, 0.3); color: inherit; }
.search-result-owner { margin-left: 0.4rem; font-size: 0.85rem; color: #888; }
.search-result-desc {
  display: block;
  overflow: hidden;
  white-space: nowrap;
  text-overflow: ellipsis;
  font-size: 0.85rem;
  color: #999;
}
.search-no-results { padding: 0.9rem; text-align: center; color: #888; }

.type-link { color: var(--accent-color); text-decoration: none; border-bottom: 1px dotted; }
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::types::{DocEntry, PropertyDoc};

    fn create_test_store() -> DocStore {
        let mut timer = DocEntry::new("Timer");
        timer.desc = "A timer class.".into();
        timer.properties.push(PropertyDoc {
            name: "Finished".into(),
            desc: "Fired when the Timer finishes running.".into(),
            lua_type: "Signal<>".into(),
            tags: vec!["Event".into()],
            deprecated: None,
            ignore: false,
            source: None,
        });
        timer.properties.push(PropertyDoc {
            name: "Internal".into(),
            desc: String::new(),
            lua_type: "number".into(),
            tags: vec![],
            deprecated: None,
            ignore: true,
            source: None,
        });
        DocStore::from_entries([timer, DocEntry::new("bind")]).unwrap()
    }

    #[test]
    fn test_search_entries() {
        let store = create_test_store();
        let entries = search_entries(&store);

        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["bind", "Finished", "Timer"]);

        let finished = &entries[1];
        assert_eq!(finished.kind, "property");
        assert_eq!(finished.owner, "Timer");
        assert_eq!(finished.link, "api/Timer.html#property-Finished");
        assert_eq!(entries[2].link, "api/Timer.html");
    }

    #[test]
    fn test_generate_search_index() {
        let store = create_test_store();
        let json = generate_search_index(&store).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let array = value.as_array().unwrap();
        assert_eq!(array.len(), 3);
        assert_eq!(array[2]["summary"], "A timer class.");
        assert!(!json.contains("Internal"));
    }

    #[test]
    fn test_search_css_covers_result_kinds() {
        let css = generate_search_css();
        for kind in ["class", "type", "property", "function"] {
            assert!(css.contains(&format!(".kind-{} ", kind)), "{}", kind);
        }
        assert!(css.contains("#search-results.visible"));
    }
}
