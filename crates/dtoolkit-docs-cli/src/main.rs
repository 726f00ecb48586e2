//! dToolkit Docs CLI - Command-line interface for the dToolkit documentation site

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use dtoolkit_docs_core::config::CONFIG_FILE;
use dtoolkit_docs_core::doc::{DocEntry, DocStore, FunctionDoc, PageRenderer, API_DIR};
use dtoolkit_docs_core::{SiteConfig, SiteGenerator};

#[derive(Parser)]
#[command(name = "dtoolkit-docs")]
#[command(version = dtoolkit_docs_core::VERSION)]
#[command(about = "Build and browse the dToolkit documentation", long_about = None)]
struct Cli {
    /// Path to the site configuration file
    #[arg(long, global = true, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the documentation site
    Build {
        /// Directory of JSON payloads (overrides the config)
        #[arg(long)]
        payloads: Option<PathBuf>,

        /// Output directory (overrides the config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Open the site in a browser after generation
        #[arg(long)]
        open: bool,
    },

    /// Load and validate every payload
    Check {
        /// Directory of JSON payloads (overrides the config)
        #[arg(long)]
        payloads: Option<PathBuf>,
    },

    /// Show the documentation of one symbol
    Show {
        /// Symbol name, e.g. "Timer"
        symbol: String,

        /// Directory of JSON payloads (overrides the config)
        #[arg(long)]
        payloads: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Search documented symbols and members by name
    Search {
        query: String,

        /// Directory of JSON payloads (overrides the config)
        #[arg(long)]
        payloads: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Html,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = SiteConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load '{}'", cli.config.display()))?;

    match cli.command {
        Commands::Build {
            payloads,
            output,
            open,
        } => {
            build_site(&config, payloads, output, open)?;
        }

        Commands::Check { payloads } => {
            let store = load_store(&config, payloads)?;
            check_report(&mut io::stdout().lock(), &store)?;
        }

        Commands::Show {
            symbol,
            payloads,
            format,
        } => {
            let store = load_store(&config, payloads)?;
            show_symbol(&mut io::stdout().lock(), &store, &config, &symbol, format)?;
        }

        Commands::Search { query, payloads } => {
            let store = load_store(&config, payloads)?;
            search_report(&mut io::stdout().lock(), &store, &query)?;
        }
    }

    Ok(())
}

/// Load the payload store from the flag or the configured directory
fn load_store(config: &SiteConfig, payloads: Option<PathBuf>) -> Result<DocStore> {
    let dir = payloads.unwrap_or_else(|| config.build.payloads.clone());
    if !dir.is_dir() {
        return Err(anyhow!("Payload directory '{}' does not exist", dir.display()));
    }
    DocStore::load_dir(&dir)
        .with_context(|| format!("Failed to load payloads from '{}'", dir.display()))
}

/// Generate the site and optionally open it
fn build_site(
    config: &SiteConfig,
    payloads: Option<PathBuf>,
    output: Option<PathBuf>,
    open: bool,
) -> Result<()> {
    let store = load_store(config, payloads)?;
    if store.is_empty() {
        return Err(anyhow!("No payloads found, nothing to document"));
    }

    let output_dir = output.unwrap_or_else(|| config.build.output.clone());
    let report = SiteGenerator::new(&store, config)
        .generate(&output_dir)
        .with_context(|| format!("Failed to generate site in '{}'", output_dir.display()))?;

    println!(
        "Generated {} pages ({} files) in {}",
        report.pages,
        report.files.len(),
        output_dir.display()
    );

    if open {
        let index = output_dir.join("index.html");
        info!("opening {}", index.display());
        open_in_browser(&index)?;
    }

    Ok(())
}

/// Per-entry member counts
fn check_report(out: &mut impl Write, store: &DocStore) -> io::Result<()> {
    for entry in store.entries() {
        let ignored = entry.functions.iter().filter(|f| f.ignore).count()
            + entry.properties.iter().filter(|p| p.ignore).count()
            + entry.types.iter().filter(|t| t.ignore).count();

        write!(
            out,
            "{:<16} {:>3} functions {:>3} properties {:>3} types",
            entry.name,
            entry.functions.len(),
            entry.properties.len(),
            entry.types.len()
        )?;
        if ignored > 0 {
            write!(out, " ({} ignored)", ignored)?;
        }
        writeln!(out)?;
    }
    writeln!(out, "{} payloads OK", store.len())
}

/// Render one symbol in the requested format
fn show_symbol(
    out: &mut impl Write,
    store: &DocStore,
    config: &SiteConfig,
    symbol: &str,
    format: OutputFormat,
) -> Result<()> {
    let Some(entry) = store.lookup(symbol) else {
        let suggestions: Vec<_> = store.search(symbol).iter().map(|e| e.name.as_str()).collect();
        if suggestions.is_empty() {
            return Err(anyhow!("No documentation found for '{}'", symbol));
        }
        return Err(anyhow!(
            "No documentation found for '{}' (did you mean: {}?)",
            symbol,
            suggestions.join(", ")
        ));
    };

    match format {
        OutputFormat::Text => entry_text(out, entry)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, entry)?;
            writeln!(out)?;
        }
        OutputFormat::Html => {
            write!(out, "{}", PageRenderer::new(store, config).render_entry(entry))?;
        }
    }
    Ok(())
}

/// Plain-text summary of an entry, as a terminal reference
fn entry_text(out: &mut impl Write, entry: &DocEntry) -> io::Result<()> {
    write!(out, "{}", entry.name)?;
    if !entry.realm.is_empty() {
        let realms: Vec<_> = entry.realm.iter().map(|r| r.as_str()).collect();
        write!(out, " [{}]", realms.join(", "))?;
    }
    if let Some(source) = &entry.source {
        write!(out, "  ({})", source)?;
    }
    writeln!(out)?;

    let summary = entry.summary();
    if !summary.is_empty() {
        writeln!(out, "{}", summary)?;
    }

    let types: Vec<_> = entry.visible_types().collect();
    if !types.is_empty() {
        writeln!(out, "\nTypes:")?;
        for ty in types {
            writeln!(out, "  type {} = {}", ty.name, ty.lua_type)?;
        }
    }

    let properties: Vec<_> = entry.visible_properties().collect();
    if !properties.is_empty() {
        writeln!(out, "\nProperties:")?;
        for property in properties {
            write!(out, "  {}.{}: {}", entry.name, property.name, property.lua_type)?;
            for tag in &property.tags {
                write!(out, " [{}]", tag)?;
            }
            if let Some(deprecation) = &property.deprecated {
                write!(out, " (deprecated in {})", deprecation.version)?;
            }
            writeln!(out)?;
        }
    }

    let functions: Vec<_> = entry.visible_functions().collect();
    if !functions.is_empty() {
        writeln!(out, "\nFunctions:")?;
        for function in functions {
            writeln!(out, "  {}", text_signature(&entry.name, function))?;
        }
    }

    Ok(())
}

/// `Owner.name(param: Type) -> Return`
fn text_signature(owner: &str, function: &FunctionDoc) -> String {
    let params: Vec<_> = function
        .params
        .iter()
        .map(|p| format!("{}: {}", p.name, p.lua_type))
        .collect();
    let mut signature = format!(
        "{}{}{}({})",
        owner,
        function.separator(),
        function.name,
        params.join(", ")
    );

    let returns: Vec<_> = function.returns.iter().map(|r| r.lua_type.to_string()).collect();
    match returns.as_slice() {
        [] => {}
        [single] => signature.push_str(&format!(" -> {}", single)),
        many => signature.push_str(&format!(" -> ({})", many.join(", "))),
    }
    if function.yields {
        signature.push_str(" [yields]");
    }
    signature
}

/// Matching symbols with their page links
fn search_report(out: &mut impl Write, store: &DocStore, query: &str) -> io::Result<()> {
    let query_lower = query.to_lowercase();
    let mut matches = 0;

    for symbol in store.all_symbols() {
        if !symbol.name.to_lowercase().contains(&query_lower) {
            continue;
        }
        matches += 1;

        let qualified = if symbol.owner == symbol.name {
            symbol.name.clone()
        } else {
            format!("{}.{}", symbol.owner, symbol.name)
        };
        writeln!(
            out,
            "{:<9} {:<32} {}/{}",
            symbol.kind.as_str(),
            qualified,
            API_DIR,
            symbol.link()
        )?;
    }

    if matches == 0 {
        writeln!(out, "No symbols match '{}'", query)?;
    }
    Ok(())
}

/// Open a file in the default browser
fn open_in_browser(path: &Path) -> Result<()> {
    let url = format!("file://{}", path.canonicalize()?.display());

    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(&url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(&url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", "", &url])
            .spawn()?;
    }

    Ok(())
}
