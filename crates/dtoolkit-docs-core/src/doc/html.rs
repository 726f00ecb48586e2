//! HTML page generation
//!
//! Every page shares one layout: a sidebar listing the documented symbols and
//! a search box, and a main content column. Links inside a page are relative
//! so the site works from any directory.

use std::fmt::{self, Write};

use super::crosslink::CrossLinker;
use super::markdown::render_markdown;
use super::search::API_DIR;
use super::store::{member_anchor, page_file, DocStore, SymbolKind};
use super::types::{DocEntry, FunctionDoc, PropertyDoc, SourceLocation, TypeDoc, TypeTag};
use crate::config::SiteConfig;
use crate::escape::{escape_html, escape_html_text};
use crate::features::{render_features, FEATURES};

/// Renders complete HTML pages from a [`DocStore`]
pub struct PageRenderer<'a> {
    store: &'a DocStore,
    config: &'a SiteConfig,
}

/// Which page is being written, with what it needs
enum PageKind<'a> {
    Home,
    Entry(&'a DocEntry),
    NotFound(Option<&'a str>),
}

struct Page<'a> {
    renderer: &'a PageRenderer<'a>,
    kind: PageKind<'a>,
}

impl fmt::Display for Page<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.renderer.write_page(f, &self.kind)
    }
}

impl<'a> PageRenderer<'a> {
    pub fn new(store: &'a DocStore, config: &'a SiteConfig) -> Self {
        Self { store, config }
    }

    /// Render the API page of one entry
    pub fn render_entry(&self, entry: &DocEntry) -> String {
        self.render(PageKind::Entry(entry))
    }

    /// Render the API page of a symbol, or `None` if it is not documented
    pub fn render_symbol(&self, name: &str) -> Option<String> {
        self.store.lookup(name).map(|entry| self.render_entry(entry))
    }

    /// Render the standard missing-page response
    pub fn render_not_found(&self, name: Option<&str>) -> String {
        self.render(PageKind::NotFound(name))
    }

    /// Render the homepage
    pub fn render_home(&self) -> String {
        self.render(PageKind::Home)
    }

    fn render(&self, kind: PageKind<'_>) -> String {
        Page {
            renderer: self,
            kind,
        }
        .to_string()
    }

    /// Prefix that leads from the page back to the site root
    fn root(&self, kind: &PageKind<'_>) -> String {
        match kind {
            PageKind::Home => String::new(),
            PageKind::Entry(_) => String::from("../"),
            // Served for arbitrary missing paths, so only an absolute root works
            PageKind::NotFound(_) => self.config.site.base_url.clone(),
        }
    }

    fn write_page(&self, out: &mut dyn Write, kind: &PageKind<'_>) -> fmt::Result {
        let root = self.root(kind);
        let site_title = &self.config.site.title;
        let title = match kind {
            PageKind::Home => site_title.clone(),
            PageKind::Entry(entry) => format!("{} | {}", entry.name, site_title),
            PageKind::NotFound(_) => format!("Page Not Found | {}", site_title),
        };

        writeln!(out, "<!DOCTYPE html>")?;
        writeln!(out, "<html lang=\"en\">")?;
        writeln!(out, "<head>")?;
        writeln!(out, "  <meta charset=\"UTF-8\">")?;
        writeln!(
            out,
            "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">"
        )?;
        writeln!(out, "  <title>{}</title>", escape_html_text(&title))?;
        writeln!(
            out,
            "  <link rel=\"stylesheet\" href=\"{}assets/styles.css\">",
            escape_html(&root)
        )?;
        writeln!(out, "</head>")?;
        writeln!(out, "<body data-root=\"{}\">", escape_html(&root))?;

        let current = match kind {
            PageKind::Entry(entry) => Some(*entry),
            _ => None,
        };
        self.write_sidebar(out, &root, current)?;

        writeln!(out, "<main class=\"content\">")?;
        match kind {
            PageKind::Home => self.write_home(out)?,
            PageKind::Entry(entry) => self.write_entry(out, entry)?,
            PageKind::NotFound(name) => self.write_not_found(out, &root, *name)?,
        }
        writeln!(out, "</main>")?;

        writeln!(out, "<footer>")?;
        writeln!(
            out,
            "  <p>{} documentation, version {}</p>",
            escape_html_text(site_title),
            crate::VERSION
        )?;
        writeln!(out, "</footer>")?;
        writeln!(
            out,
            "<script src=\"{}assets/search.js\"></script>",
            escape_html(&root)
        )?;
        writeln!(out, "</body>")?;
        writeln!(out, "</html>")
    }

    fn write_sidebar(
        &self,
        out: &mut dyn Write,
        root: &str,
        current: Option<&DocEntry>,
    ) -> fmt::Result {
        writeln!(out, "<nav class=\"sidebar\">")?;
        writeln!(out, "  <div class=\"sidebar-header\">")?;
        writeln!(
            out,
            "    <h2><a href=\"{}index.html\">{}</a></h2>",
            escape_html(root),
            escape_html_text(&self.config.site.title)
        )?;
        writeln!(out, "  </div>")?;
        writeln!(out, "  <div class=\"search-container\">")?;
        writeln!(
            out,
            "    <input type=\"search\" id=\"search-input\" placeholder=\"Search\" autocomplete=\"off\">"
        )?;
        writeln!(out, "    <span class=\"search-hint\">/</span>")?;
        writeln!(out, "    <div id=\"search-results\"></div>")?;
        writeln!(out, "  </div>")?;

        writeln!(out, "  <nav>")?;
        writeln!(out, "    <h3>API</h3>")?;
        writeln!(out, "    <ul>")?;
        for name in self.store.names() {
            let class = if current.is_some_and(|c| c.name == name) {
                " class=\"current\""
            } else {
                ""
            };
            writeln!(
                out,
                "      <li><a href=\"{}{}/{}\"{}>{}</a></li>",
                escape_html(root),
                API_DIR,
                escape_html(&page_file(name)),
                class,
                escape_html_text(name)
            )?;
        }
        writeln!(out, "    </ul>")?;

        if let Some(entry) = current {
            Self::write_member_nav(
                out,
                "Types",
                SymbolKind::Type,
                entry.visible_types().map(|t| &t.name),
            )?;
            Self::write_member_nav(
                out,
                "Properties",
                SymbolKind::Property,
                entry.visible_properties().map(|p| &p.name),
            )?;
            Self::write_member_nav(
                out,
                "Functions",
                SymbolKind::Function,
                entry.visible_functions().map(|f| &f.name),
            )?;
        }

        writeln!(out, "  </nav>")?;
        writeln!(out, "</nav>")
    }

    fn write_member_nav<'n>(
        out: &mut dyn Write,
        heading: &str,
        kind: SymbolKind,
        names: impl Iterator<Item = &'n String>,
    ) -> fmt::Result {
        let mut names = names.peekable();
        if names.peek().is_none() {
            return Ok(());
        }

        writeln!(out, "    <h3>{}</h3>", heading)?;
        writeln!(out, "    <ul>")?;
        for name in names {
            writeln!(
                out,
                "      <li><a href=\"#{}\">{}</a></li>",
                escape_html(&member_anchor(kind, name)),
                escape_html_text(name)
            )?;
        }
        writeln!(out, "    </ul>")
    }

    fn write_home(&self, out: &mut dyn Write) -> fmt::Result {
        let site = &self.config.site;

        writeln!(out, "<header class=\"hero\">")?;
        writeln!(out, "  <h1>{}</h1>", escape_html_text(&site.title))?;
        if !site.tagline.is_empty() {
            writeln!(
                out,
                "  <p class=\"tagline\">{}</p>",
                escape_html_text(&site.tagline)
            )?;
        }
        writeln!(out, "</header>")?;

        out.write_str(&render_features(&FEATURES))?;

        writeln!(out, "<section id=\"api\">")?;
        writeln!(out, "  <h2>API</h2>")?;
        writeln!(out, "  <ul class=\"api-list\">")?;
        for entry in self.store.entries() {
            write!(
                out,
                "    <li><a href=\"{}/{}\">{}</a>",
                API_DIR,
                escape_html(&page_file(&entry.name)),
                escape_html_text(&entry.name)
            )?;
            let summary = entry.summary();
            if !summary.is_empty() {
                write!(
                    out,
                    " <span class=\"summary\">{}</span>",
                    escape_html_text(summary)
                )?;
            }
            writeln!(out, "</li>")?;
        }
        writeln!(out, "  </ul>")?;
        writeln!(out, "</section>")
    }

    fn write_not_found(&self, out: &mut dyn Write, root: &str, name: Option<&str>) -> fmt::Result {
        writeln!(out, "<header>")?;
        writeln!(out, "  <h1>Page Not Found</h1>")?;
        writeln!(out, "</header>")?;
        writeln!(out, "<section class=\"not-found\">")?;
        writeln!(out, "  <p>We could not find what you were looking for.</p>")?;
        if let Some(name) = name {
            writeln!(
                out,
                "  <p>No documentation exists for <code>{}</code>.</p>",
                escape_html_text(name)
            )?;
        }
        writeln!(
            out,
            "  <p><a href=\"{}index.html\">Back to the homepage</a></p>",
            escape_html(root)
        )?;
        writeln!(out, "</section>")
    }

    fn write_entry(&self, out: &mut dyn Write, entry: &DocEntry) -> fmt::Result {
        let linker = CrossLinker::new(self.store, Some(entry));

        writeln!(out, "<header>")?;
        writeln!(out, "  <h1>{}</h1>", escape_html_text(&entry.name))?;
        if !entry.realm.is_empty() {
            write!(out, "  <div class=\"badges\">")?;
            for realm in &entry.realm {
                write!(
                    out,
                    "<span class=\"badge realm-{}\">{}</span>",
                    escape_html(&realm.as_str().to_lowercase()),
                    escape_html_text(realm.as_str())
                )?;
            }
            writeln!(out, "</div>")?;
        }
        writeln!(out, "</header>")?;

        writeln!(out, "<section class=\"entry-doc\">")?;
        write_description(out, &linker, &entry.desc)?;
        self.write_source(out, entry.source.as_ref())?;
        writeln!(out, "</section>")?;

        let types: Vec<_> = entry.visible_types().collect();
        if !types.is_empty() {
            writeln!(out, "<section id=\"types\">")?;
            writeln!(out, "  <h2>Types</h2>")?;
            for ty in types {
                self.write_type(out, &linker, ty)?;
            }
            writeln!(out, "</section>")?;
        }

        let properties: Vec<_> = entry.visible_properties().collect();
        if !properties.is_empty() {
            writeln!(out, "<section id=\"properties\">")?;
            writeln!(out, "  <h2>Properties</h2>")?;
            for property in properties {
                self.write_property(out, &linker, &entry.name, property)?;
            }
            writeln!(out, "</section>")?;
        }

        let functions: Vec<_> = entry.visible_functions().collect();
        if !functions.is_empty() {
            writeln!(out, "<section id=\"functions\">")?;
            writeln!(out, "  <h2>Functions</h2>")?;
            for function in functions {
                self.write_function(out, &linker, &entry.name, function)?;
            }
            writeln!(out, "</section>")?;
        }

        Ok(())
    }

    fn write_type(&self, out: &mut dyn Write, linker: &CrossLinker<'_>, ty: &TypeDoc) -> fmt::Result {
        writeln!(
            out,
            "  <div class=\"item\" id=\"{}\">",
            escape_html(&member_anchor(SymbolKind::Type, &ty.name))
        )?;
        writeln!(out, "    <h3><code>{}</code></h3>", escape_html_text(&ty.name))?;
        writeln!(
            out,
            "    <div class=\"signature\">type {} = {}</div>",
            escape_html_text(&ty.name),
            linker.link_type_tag(&ty.lua_type)
        )?;
        write_description(out, linker, &ty.desc)?;
        self.write_source(out, ty.source.as_ref())?;
        writeln!(out, "  </div>")
    }

    fn write_property(
        &self,
        out: &mut dyn Write,
        linker: &CrossLinker<'_>,
        owner: &str,
        property: &PropertyDoc,
    ) -> fmt::Result {
        writeln!(
            out,
            "  <div class=\"item\" id=\"{}\">",
            escape_html(&member_anchor(SymbolKind::Property, &property.name))
        )?;
        write!(out, "    <h3><code>{}</code>", escape_html_text(&property.name))?;
        for tag in &property.tags {
            write!(
                out,
                " <span class=\"badge badge-tag\">{}</span>",
                escape_html_text(tag)
            )?;
        }
        if property.deprecated.is_some() {
            write!(out, " <span class=\"badge badge-deprecated\">deprecated</span>")?;
        }
        writeln!(out, "</h3>")?;

        writeln!(
            out,
            "    <div class=\"signature\">{}.{}: {}</div>",
            escape_html_text(owner),
            escape_html_text(&property.name),
            linker.link_type_tag(&property.lua_type)
        )?;

        if let Some(deprecation) = &property.deprecated {
            writeln!(out, "    <div class=\"deprecated\">")?;
            writeln!(
                out,
                "      <p><strong>Deprecated in {}</strong></p>",
                escape_html_text(&deprecation.version)
            )?;
            if let Some(desc) = &deprecation.desc {
                out.write_str(&render_markdown(&linker.link_description(desc)))?;
            }
            writeln!(out, "    </div>")?;
        }

        write_description(out, linker, &property.desc)?;
        self.write_source(out, property.source.as_ref())?;
        writeln!(out, "  </div>")
    }

    fn write_function(
        &self,
        out: &mut dyn Write,
        linker: &CrossLinker<'_>,
        owner: &str,
        function: &FunctionDoc,
    ) -> fmt::Result {
        writeln!(
            out,
            "  <div class=\"item\" id=\"{}\">",
            escape_html(&member_anchor(SymbolKind::Function, &function.name))
        )?;
        write!(
            out,
            "    <h3><code>{}</code> <span class=\"badge badge-{}\">{}</span>",
            escape_html_text(&function.name),
            function.function_type.as_str(),
            function.function_type.as_str()
        )?;
        if function.yields {
            write!(out, " <span class=\"badge badge-yields\">yields</span>")?;
        }
        writeln!(out, "</h3>")?;

        write!(out, "    <div class=\"signature\">")?;
        write_signature(out, linker, owner, function)?;
        writeln!(out, "</div>")?;

        write_description(out, linker, &function.desc)?;

        if !function.params.is_empty() {
            writeln!(out, "    <div class=\"params\">")?;
            writeln!(out, "      <h4>Parameters</h4>")?;
            writeln!(out, "      <ul>")?;
            for param in &function.params {
                write!(
                    out,
                    "        <li><code>{}</code>: {}",
                    escape_html_text(&param.name),
                    linker.link_type_tag(&param.lua_type)
                )?;
                if param.lua_type.is_optional() {
                    write!(out, " <span class=\"badge badge-optional\">optional</span>")?;
                }
                write_inline_desc(out, linker, &param.desc)?;
                writeln!(out, "</li>")?;
            }
            writeln!(out, "      </ul>")?;
            writeln!(out, "    </div>")?;
        }

        if !function.returns.is_empty() {
            writeln!(out, "    <div class=\"returns\">")?;
            writeln!(out, "      <h4>Returns</h4>")?;
            writeln!(out, "      <ul>")?;
            for ret in &function.returns {
                write!(out, "        <li>{}", linker.link_type_tag(&ret.lua_type))?;
                write_inline_desc(out, linker, &ret.desc)?;
                writeln!(out, "</li>")?;
            }
            writeln!(out, "      </ul>")?;
            writeln!(out, "    </div>")?;
        }

        self.write_source(out, function.source.as_ref())?;
        writeln!(out, "  </div>")
    }

    fn write_source(&self, out: &mut dyn Write, source: Option<&SourceLocation>) -> fmt::Result {
        let Some(source) = source else {
            return Ok(());
        };

        let location = escape_html_text(&source.to_string());
        match self.config.source.source_url(&source.path, source.line) {
            Some(url) => writeln!(
                out,
                "    <p class=\"source\">Defined in <a href=\"{}\"><code>{}</code></a></p>",
                escape_html(&url),
                location
            ),
            None => writeln!(
                out,
                "    <p class=\"source\">Defined in <code>{}</code></p>",
                location
            ),
        }
    }
}

fn write_description(
    out: &mut dyn Write,
    linker: &CrossLinker<'_>,
    desc: &str,
) -> fmt::Result {
    if desc.trim().is_empty() {
        return Ok(());
    }
    writeln!(out, "    <div class=\"description\">")?;
    out.write_str(&render_markdown(&linker.link_description(desc)))?;
    writeln!(out, "    </div>")
}

/// Parameter and return descriptions, rendered after the type
fn write_inline_desc(
    out: &mut dyn Write,
    linker: &CrossLinker<'_>,
    desc: &str,
) -> fmt::Result {
    if desc.trim().is_empty() {
        return Ok(());
    }
    write!(
        out,
        "<div class=\"param-desc\">{}</div>",
        render_markdown(&linker.link_description(desc)).trim_end()
    )
}

/// `Owner.name(param: Type, ...) → Return`
fn write_signature(
    out: &mut dyn Write,
    linker: &CrossLinker<'_>,
    owner: &str,
    function: &FunctionDoc,
) -> fmt::Result {
    write!(
        out,
        "{}{}{}(",
        escape_html_text(owner),
        function.separator(),
        escape_html_text(&function.name)
    )?;
    for (i, param) in function.params.iter().enumerate() {
        if i > 0 {
            out.write_str(", ")?;
        }
        write!(
            out,
            "{}: {}",
            escape_html_text(&param.name),
            linker.link_type_tag(&param.lua_type)
        )?;
    }
    out.write_str(")")?;

    let returns: Vec<&TypeTag> = function.returns.iter().map(|r| &r.lua_type).collect();
    match returns.as_slice() {
        [] => Ok(()),
        [single] => write!(out, " → {}", linker.link_type_tag(single)),
        many => {
            out.write_str(" → (")?;
            for (i, tag) in many.iter().enumerate() {
                if i > 0 {
                    out.write_str(", ")?;
                }
                out.write_str(&linker.link_type_tag(tag))?;
            }
            out.write_str(")")
        }
    }
}

/// Stylesheet shared by every page
pub fn generate_styles() -> &'static str {
    r#":root {
  --bg-color: #1a1a2e;
  --text-color: #eaeaea;
  --accent-color: #00a2ff;
  --code-bg: #16213e;
  --sidebar-bg: #0f0f23;
  --border-color: #333;
}

* {
  box-sizing: border-box;
  margin: 0;
  padding: 0;
}

body {
  font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Oxygen, Ubuntu, sans-serif;
  background-color: var(--bg-color);
  color: var(--text-color);
  line-height: 1.6;
  display: flex;
}

a {
  color: var(--accent-color);
}

.sidebar {
  width: 280px;
  background-color: var(--sidebar-bg);
  height: 100vh;
  position: fixed;
  overflow-y: auto;
  border-right: 1px solid var(--border-color);
}

.sidebar-header {
  padding: 1.5rem;
  border-bottom: 1px solid var(--border-color);
}

.sidebar-header h2 a {
  color: var(--accent-color);
  font-size: 1.25rem;
  text-decoration: none;
}

.sidebar .search-container {
  margin: 1rem;
}

.sidebar nav {
  padding: 1rem;
}

.sidebar h3 {
  font-size: 0.875rem;
  text-transform: uppercase;
  color: #888;
  margin: 1rem 0 0.5rem;
}

.sidebar ul {
  list-style: none;
}

.sidebar a {
  display: block;
  padding: 0.25rem 0;
  color: var(--text-color);
  text-decoration: none;
  font-size: 0.9rem;
}

.sidebar a:hover,
.sidebar a.current {
  color: var(--accent-color);
}

.content {
  margin-left: 280px;
  padding: 2rem 3rem 4rem;
  max-width: 960px;
  width: 100%;
}

header h1 {
  font-size: 2.5rem;
  color: var(--accent-color);
  margin-bottom: 1rem;
}

.hero {
  text-align: center;
  padding: 3rem 0;
}

.hero .tagline {
  font-size: 1.25rem;
  color: #bbb;
}

section {
  margin: 2rem 0;
}

section h2 {
  font-size: 1.5rem;
  color: var(--accent-color);
  border-bottom: 2px solid var(--border-color);
  padding-bottom: 0.5rem;
  margin-bottom: 1.5rem;
}

.item {
  margin: 1.5rem 0;
  padding: 1rem;
  background: var(--code-bg);
  border-radius: 8px;
  border-left: 3px solid var(--accent-color);
}

.item h3 {
  font-size: 1.1rem;
  margin-bottom: 0.5rem;
}

.item h3 code {
  background: none;
  color: var(--accent-color);
  padding: 0;
}

.signature {
  background: #0d1117;
  padding: 0.75rem 1rem;
  border-radius: 4px;
  overflow-x: auto;
  font-family: 'Fira Code', 'Consolas', monospace;
  font-size: 0.9rem;
  margin: 0.5rem 0;
}

.description {
  color: #bbb;
  margin: 0.5rem 0;
}

.description p {
  margin: 0.5rem 0;
}

.params, .returns {
  margin: 0.75rem 0;
}

.params h4, .returns h4 {
  font-size: 0.9rem;
  color: #888;
  margin-bottom: 0.25rem;
}

.params ul, .returns ul {
  list-style: none;
  padding-left: 1rem;
}

.params li, .returns li {
  margin: 0.25rem 0;
}

.param-desc {
  color: #bbb;
  font-size: 0.9rem;
}

.source {
  font-size: 0.8rem;
  color: #888;
  margin-top: 0.5rem;
}

.badge {
  display: inline-block;
  padding: 0.1rem 0.45rem;
  font-size: 0.7rem;
  font-weight: 600;
  text-transform: uppercase;
  border-radius: 3px;
  margin-left: 0.25rem;
  vertical-align: middle;
}

.badge-static { background: #27485a; color: #56b4d4; }
.badge-method { background: #275a4a; color: #56d4b4; }
.badge-yields { background: #5a4427; color: #d4a656; }
.badge-tag { background: #4a275a; color: #c476d4; }
.badge-deprecated { background: #5a2727; color: #d47676; }
.badge-optional { background: #3a3a4a; color: #b0b0c8; }
.realm-client { background: #27485a; color: #56b4d4; }
.realm-server { background: #2d5a27; color: #7ec876; }
.realm-plugin { background: #5a4427; color: #d4a656; }

.deprecated {
  border-left: 3px solid #d47676;
  padding: 0.5rem 1rem;
  margin: 0.5rem 0;
  background: rgba(212, 118, 118, 0.08);
}

.admonition {
  border-left: 4px solid #888;
  border-radius: 4px;
  padding: 0.75rem 1rem;
  margin: 1rem 0;
  background: rgba(255, 255, 255, 0.04);
}

.admonition-title {
  font-weight: 700;
  text-transform: uppercase;
  font-size: 0.8rem;
}

.admonition-note, .admonition-info { border-color: #56b4d4; }
.admonition-tip { border-color: #7ec876; }
.admonition-caution, .admonition-warning { border-color: #d4a656; }
.admonition-danger { border-color: #d47676; }

pre {
  background: #0d1117;
  padding: 1rem;
  border-radius: 4px;
  overflow-x: auto;
  margin: 0.75rem 0;
}

pre code {
  background: none;
  padding: 0;
}

code {
  background: var(--code-bg);
  padding: 0.15rem 0.3rem;
  border-radius: 3px;
  font-family: 'Fira Code', 'Consolas', monospace;
  font-size: 0.9em;
}

.features .row {
  display: flex;
  gap: 2rem;
}

.features .col--4 {
  flex: 1 1 0;
}

.text--center {
  text-align: center;
}

.featurePng {
  height: 200px;
  width: 200px;
}

.padding-horiz--md {
  padding: 0 1rem;
}

.api-list {
  list-style: none;
}

.api-list li {
  margin: 0.5rem 0;
}

.api-list .summary {
  color: #bbb;
  margin-left: 0.5rem;
}

footer {
  position: fixed;
  bottom: 0;
  right: 0;
  padding: 0.5rem 1rem;
  font-size: 0.75rem;
  color: #666;
}

@media (max-width: 768px) {
  .sidebar {
    display: none;
  }
  .content {
    margin-left: 0;
    padding: 1rem;
  }
  .features .row {
    flex-direction: column;
  }
}
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::store::load;

    const TIMER: &str = r#"{
        "functions": [
            {"name": "new", "desc": "Creates and returns a new [Timer] object.", "params": [{"name": "initDuration", "desc": "", "lua_type": "number?"}], "returns": [{"desc": "", "lua_type": "Timer\r\n"}], "function_type": "static"},
            {"name": "Start", "desc": "Starts the [Timer].\n\n:::caution\nThis will error if the [Timer] has no duration.", "params": [{"name": "self", "desc": "", "lua_type": "Timer"}], "returns": [], "function_type": "static"},
            {"name": "GetRemaining", "desc": "", "params": [], "returns": [{"desc": "", "lua_type": "Remaining\r\n"}], "function_type": "method", "yields": true},
            {"name": "Secret", "desc": "", "params": [], "returns": [], "function_type": "static", "ignore": true}
        ],
        "properties": [
            {"name": "Finished", "desc": "Fired when the Timer finishes running.", "lua_type": "Signal<>", "tags": ["Event"]},
            {"name": "Updated", "desc": "", "lua_type": "Signal<number>", "deprecated": {"version": "v2.0.0", "desc": "Use [Timer.withUpdate] instead."}}
        ],
        "types": [
            {"name": "Remaining", "desc": "", "lua_type": "{remaining: number, elapsed: number}"}
        ],
        "name": "Timer",
        "desc": "A timer class.",
        "realm": ["Server"],
        "source": {"line": 49, "path": "lib/Timer.lua"}
    }"#;

    fn create_test_store() -> DocStore {
        DocStore::from_entries([load(TIMER.as_bytes()).unwrap(), DocEntry::new("Value")]).unwrap()
    }

    #[test]
    fn test_render_entry() {
        let store = create_test_store();
        let config = SiteConfig::default();
        let renderer = PageRenderer::new(&store, &config);
        let html = renderer.render_symbol("Timer").unwrap();

        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("<title>Timer | dToolkit</title>"));
        assert!(html.contains("<span class=\"badge realm-server\">Server</span>"));
        assert!(html.contains("<a href=\"../api/Timer.html\" class=\"current\">Timer</a>"));
        assert!(html.contains("<a href=\"../api/Value.html\">Value</a>"));
        assert!(html.contains("Defined in <code>lib/Timer.lua:49</code>"));
    }

    #[test]
    fn test_sections_in_order() {
        let store = create_test_store();
        let config = SiteConfig::default();
        let html = PageRenderer::new(&store, &config).render_symbol("Timer").unwrap();

        let types = html.find("<section id=\"types\">").unwrap();
        let properties = html.find("<section id=\"properties\">").unwrap();
        let functions = html.find("<section id=\"functions\">").unwrap();
        assert!(types < properties && properties < functions);

        let new = html.find("id=\"function-new\"").unwrap();
        let start = html.find("id=\"function-Start\"").unwrap();
        let remaining = html.find("id=\"function-GetRemaining\"").unwrap();
        assert!(new < start && start < remaining);
    }

    #[test]
    fn test_function_rendering() {
        let store = create_test_store();
        let config = SiteConfig::default();
        let html = PageRenderer::new(&store, &config).render_symbol("Timer").unwrap();

        assert!(html.contains(
            "Timer.new(initDuration: number?) → <a href=\"Timer.html\" class=\"type-link\">Timer</a>"
        ));
        assert!(html.contains(
            "Timer:GetRemaining() → <a href=\"#type-Remaining\" class=\"type-link\">Remaining</a>"
        ));
        assert!(html.contains("<span class=\"badge badge-yields\">yields</span>"));
        assert!(html.contains(
            "<li><code>initDuration</code>: number? <span class=\"badge badge-optional\">optional</span>"
        ));
        assert_eq!(html.matches("badge-optional").count(), 1);
        assert!(html.contains("Creates and returns a new <a href=\"Timer.html\">Timer</a> object."));
        assert!(html.contains("admonition-caution"));
        assert!(!html.contains("Secret"));
    }

    #[test]
    fn test_property_rendering() {
        let store = create_test_store();
        let config = SiteConfig::default();
        let html = PageRenderer::new(&store, &config).render_symbol("Timer").unwrap();

        assert!(html.contains("<code>Finished</code> <span class=\"badge badge-tag\">Event</span>"));
        assert!(html.contains("Timer.Finished: Signal&lt;&gt;"));
        assert!(html.contains("<strong>Deprecated in v2.0.0</strong>"));
        assert!(!html.contains("function-withUpdate"));
        assert!(html.contains("Use [Timer.withUpdate] instead."));
    }

    #[test]
    fn test_empty_sections_omitted() {
        let store = create_test_store();
        let config = SiteConfig::default();
        let html = PageRenderer::new(&store, &config).render_symbol("Value").unwrap();

        assert!(!html.contains("<section id=\"types\">"));
        assert!(!html.contains("<section id=\"functions\">"));
        assert!(html.contains("<title>Value | dToolkit</title>"));
    }

    #[test]
    fn test_source_link() {
        let store = create_test_store();
        let mut config = SiteConfig::default();
        config.source.repository = Some("https://github.com/example/dToolkit".into());
        let html = PageRenderer::new(&store, &config).render_symbol("Timer").unwrap();

        assert!(html.contains(
            "<a href=\"https://github.com/example/dToolkit/blob/main/lib/Timer.lua#L49\"><code>lib/Timer.lua:49</code></a>"
        ));
    }

    #[test]
    fn test_not_found() {
        let store = create_test_store();
        let config = SiteConfig::default();
        let renderer = PageRenderer::new(&store, &config);

        assert!(renderer.render_symbol("DoesNotExist").is_none());
        let html = renderer.render_not_found(Some("DoesNotExist"));
        assert!(html.contains("<h1>Page Not Found</h1>"));
        assert!(html.contains("<code>DoesNotExist</code>"));
        assert!(html.contains("<link rel=\"stylesheet\" href=\"/assets/styles.css\">"));
    }

    #[test]
    fn test_render_home() {
        let store = create_test_store();
        let config = SiteConfig::default();
        let html = PageRenderer::new(&store, &config).render_home();

        assert!(html.contains("<title>dToolkit</title>"));
        assert!(html.contains("<section class=\"features\">"));
        assert!(html.contains("<a href=\"api/Timer.html\">Timer</a> <span class=\"summary\">A timer class.</span>"));
        assert!(html.contains("<a href=\"api/Value.html\">Value</a></li>"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let store = create_test_store();
        let config = SiteConfig::default();
        let renderer = PageRenderer::new(&store, &config);
        assert_eq!(renderer.render_symbol("Timer"), renderer.render_symbol("Timer"));
    }
}
