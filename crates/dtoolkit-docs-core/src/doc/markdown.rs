//! Markdown to HTML rendering for description text
//!
//! Descriptions are CommonMark with two extensions used by the library's doc
//! comments: fenced `lua` examples and `:::kind Title` admonition blocks.

use pulldown_cmark::{html, CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

use crate::escape::{escape_html, escape_html_text};

/// Admonition kinds that get their own styling
const ADMONITION_KINDS: &[&str] = &["note", "tip", "info", "caution", "warning", "danger"];

/// Render markdown to HTML
pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);

    let processed = expand_admonitions(markdown);
    let parser = Parser::new_ext(&processed, options);
    let parser = CodeBlockWrapper::new(parser);

    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);

    html_output
}

/// Replace `:::kind Title` ... `:::` blocks with HTML containers.
///
/// The container tags sit on their own lines surrounded by blank lines so the
/// content in between is still parsed as markdown. Blocks left open are
/// closed at the end of the text. Markers inside code fences are untouched.
pub fn expand_admonitions(text: &str) -> String {
    let mut result = String::with_capacity(text.len() + 64);
    let mut fence = CodeFence::default();
    let mut open_blocks = 0usize;

    for line in text.lines() {
        if !fence.scan(line) {
            if let Some(rest) = line.trim().strip_prefix(":::") {
                let rest = rest.trim();
                if rest.is_empty() {
                    if open_blocks > 0 {
                        open_blocks -= 1;
                        result.push_str("\n</div>\n\n");
                        continue;
                    }
                } else if let Some(open) = admonition_open_tag(rest) {
                    open_blocks += 1;
                    result.push_str(&open);
                    continue;
                }
            }
        }

        result.push_str(line);
        result.push('\n');
    }

    for _ in 0..open_blocks {
        result.push_str("\n</div>\n");
    }

    result
}

/// Line-by-line tracker for fenced code blocks.
///
/// A block opens on three or more backticks or tildes and closes only on a
/// bare fence of the same character that is at least as long.
#[derive(Debug, Default)]
pub(crate) struct CodeFence {
    open: Option<(char, usize)>,
}

impl CodeFence {
    /// Feed the next line; true when it is a fence line or code inside one
    pub(crate) fn scan(&mut self, line: &str) -> bool {
        let marker = fence_marker(line);
        match (self.open, marker) {
            (None, Some((c, len, _))) => {
                self.open = Some((c, len));
                true
            }
            (Some((c, len)), Some((marker_c, marker_len, bare)))
                if marker_c == c && marker_len >= len && bare =>
            {
                self.open = None;
                true
            }
            (Some(_), _) => true,
            (None, None) => false,
        }
    }
}

/// Fence character, run length and whether nothing follows the run
fn fence_marker(line: &str) -> Option<(char, usize, bool)> {
    let rest = line.trim_start_matches(' ');
    if line.len() - rest.len() > 3 {
        return None;
    }
    let c = rest.chars().next().filter(|&c| c == '`' || c == '~')?;
    let len = rest.chars().take_while(|&x| x == c).count();
    if len < 3 {
        return None;
    }
    let info = &rest[len..];
    if c == '`' && info.contains('`') {
        return None;
    }
    Some((c, len, info.trim().is_empty()))
}

/// Opening markup for `kind Title`, or `None` for an unknown kind
fn admonition_open_tag(header: &str) -> Option<String> {
    let (kind, title) = match header.split_once(char::is_whitespace) {
        Some((kind, title)) => (kind, title.trim()),
        None => (header, ""),
    };
    let kind = kind.to_lowercase();
    if !ADMONITION_KINDS.contains(&kind.as_str()) {
        return None;
    }

    let title = if title.is_empty() {
        kind.clone()
    } else {
        title.to_string()
    };

    Some(format!(
        "\n<div class=\"admonition admonition-{}\">\n<p class=\"admonition-title\">{}</p>\n\n",
        kind,
        escape_html_text(&title)
    ))
}

/// Iterator adapter that renders code blocks with a language class
struct CodeBlockWrapper<'a, I> {
    inner: I,
    in_code_block: bool,
    code_lang: Option<String>,
    code_buffer: String,
    _marker: std::marker::PhantomData<Event<'a>>,
}

impl<'a, I> CodeBlockWrapper<'a, I>
where
    I: Iterator<Item = Event<'a>>,
{
    fn new(inner: I) -> Self {
        Self {
            inner,
            in_code_block: false,
            code_lang: None,
            code_buffer: String::new(),
            _marker: std::marker::PhantomData,
        }
    }

    fn wrap_code(code: &str, lang: Option<&str>) -> String {
        let lang_class = lang
            .map(|l| format!(" class=\"language-{}\"", escape_html(l)))
            .unwrap_or_default();

        format!("<pre><code{}>{}</code></pre>\n", lang_class, escape_html(code))
    }
}

impl<'a, I> Iterator for CodeBlockWrapper<'a, I>
where
    I: Iterator<Item = Event<'a>>,
{
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let event = self.inner.next()?;

            match &event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    self.in_code_block = true;
                    self.code_buffer.clear();
                    self.code_lang = match kind {
                        CodeBlockKind::Fenced(lang) => {
                            // Only the first word of the info string names the language
                            lang.split_whitespace().next().map(str::to_string)
                        }
                        CodeBlockKind::Indented => None,
                    };
                }
                Event::End(TagEnd::CodeBlock) => {
                    self.in_code_block = false;
                    let wrapped = Self::wrap_code(&self.code_buffer, self.code_lang.as_deref());
                    return Some(Event::Html(wrapped.into()));
                }
                Event::Text(text) if self.in_code_block => {
                    self.code_buffer.push_str(text);
                }
                _ => return Some(event),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_markdown() {
        let md = "# Hello\n\nThis is a **test**.";
        let html = render_markdown(md);
        assert!(html.contains("<h1>Hello</h1>"));
        assert!(html.contains("<strong>test</strong>"));
    }

    #[test]
    fn test_code_block() {
        let md = "```lua\nlocal newTimer = Timer.new()\nprint(a < b)\n```";
        let html = render_markdown(md);
        assert!(html.contains("<pre><code class=\"language-lua\">"));
        assert!(html.contains("Timer.new()"));
        assert!(html.contains("a &lt; b"));
    }

    #[test]
    fn test_closed_admonition() {
        let md = "Before.\n\n:::note V2.0.0\nThe **Updated** signal moved.\n:::\n\nAfter.";
        let html = render_markdown(md);
        assert!(html.contains("<div class=\"admonition admonition-note\">"));
        assert!(html.contains("<p class=\"admonition-title\">V2.0.0</p>"));
        assert!(html.contains("<strong>Updated</strong>"));
        assert!(html.contains("</div>"));
        assert!(html.contains("<p>After.</p>"));
    }

    #[test]
    fn test_unterminated_admonition_is_closed() {
        let md = "Starts the [Timer].\n\n:::caution\nThis will error if the [Timer] has not been given a duration yet.\n\n\t";
        let expanded = expand_admonitions(md);
        assert_eq!(expanded.matches("<div").count(), expanded.matches("</div>").count());

        let html = render_markdown(md);
        assert!(html.contains("admonition-caution"));
        assert!(html.contains("<p class=\"admonition-title\">caution</p>"));
    }

    #[test]
    fn test_admonition_markers_inside_code_are_kept() {
        let md = "```lua\n:::note\n```";
        let expanded = expand_admonitions(md);
        assert!(!expanded.contains("admonition"));
        assert!(expanded.contains(":::note"));
    }

    #[test]
    fn test_admonition_markers_inside_tilde_fence_are_kept() {
        let md = "~~~lua\n:::note\nx\n:::\n~~~";
        assert!(!expand_admonitions(md).contains("admonition"));

        let html = render_markdown(md);
        assert!(html.contains("<pre><code class=\"language-lua\">:::note\nx\n:::\n</code></pre>"));
        assert!(!html.contains("admonition"));
    }

    #[test]
    fn test_fence_closes_only_on_matching_marker() {
        let mut fence = CodeFence::default();
        assert!(!fence.scan("text"));
        assert!(fence.scan("````lua"));
        assert!(fence.scan("```"));
        assert!(fence.scan("~~~~"));
        assert!(fence.scan("```` "));
        assert!(!fence.scan(":::note"));
        assert!(!fence.scan("``not a fence``"));
    }

    #[test]
    fn test_unknown_admonition_kind_is_text() {
        let expanded = expand_admonitions(":::spoiler\nhidden\n:::");
        assert!(!expanded.contains("<div"));
        assert!(expanded.contains(":::spoiler"));
    }
}
