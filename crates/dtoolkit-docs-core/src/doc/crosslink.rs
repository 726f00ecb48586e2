//! Cross-linking for documentation
//!
//! Resolves bracket references in descriptions (`[Timer]`, `[Timer.new]`)
//! and type names in type tags to links between API pages.

use super::markdown::CodeFence;
use super::store::{member_anchor, page_file, DocStore, SymbolKind};
use super::types::{DocEntry, TypeTag};
use crate::escape::{escape_html, push_escaped_char};

/// Luau built-in type names, never linked
const BUILTIN_TYPES: &[&str] = &[
    "any", "boolean", "buffer", "false", "never", "nil", "number", "string", "table", "thread",
    "true", "typeof", "unknown", "userdata", "vector",
];

/// Cross-linker for resolving references to links
pub struct CrossLinker<'a> {
    store: &'a DocStore,
    /// The entry whose page is being rendered
    current: Option<&'a DocEntry>,
}

impl<'a> CrossLinker<'a> {
    /// Create a cross-linker for pages inside the API directory
    pub fn new(store: &'a DocStore, current: Option<&'a DocEntry>) -> Self {
        Self { store, current }
    }

    /// Rewrite resolvable `[Reference]`s in markdown into markdown links.
    ///
    /// Code fences, inline code, existing links and reference definitions are
    /// left alone, as are references that do not resolve.
    pub fn link_description(&self, text: &str) -> String {
        let mut result = String::with_capacity(text.len());
        let mut fence = CodeFence::default();

        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                result.push('\n');
            }
            if fence.scan(line) {
                result.push_str(line);
            } else {
                self.link_line(line, &mut result);
            }
        }

        result
    }

    fn link_line(&self, line: &str, out: &mut String) {
        let mut in_inline_code = false;
        let mut rest = line;

        while let Some(c) = rest.chars().next() {
            if c == '`' {
                in_inline_code = !in_inline_code;
            } else if c == '[' && !in_inline_code {
                if let Some((replacement, consumed)) = self.bracket_link(rest) {
                    out.push_str(&replacement);
                    rest = &rest[consumed..];
                    continue;
                }
            }
            out.push(c);
            rest = &rest[c.len_utf8()..];
        }
    }

    /// Try to turn `[Reference]...` at the start of `text` into a link.
    ///
    /// Returns the replacement and how many bytes of `text` it covers.
    fn bracket_link(&self, text: &str) -> Option<(String, usize)> {
        let close = text.find(']')?;
        let reference = &text[1..close];
        if reference.is_empty() || !reference.chars().all(is_reference_char) {
            return None;
        }

        // `[x](url)`, `[x][ref]` and `[x]: url` already carry a target
        if matches!(text[close + 1..].chars().next(), Some('(' | '[' | ':')) {
            return None;
        }

        let symbol = self.store.resolve(reference)?;
        Some((format!("[{}]({})", reference, symbol.link()), close + 1))
    }

    /// Render a type tag as HTML, linking names of documented types.
    pub fn link_type_tag(&self, tag: &TypeTag) -> String {
        let text = tag.display_text();
        let mut result = String::with_capacity(text.len());
        let mut chars = text.char_indices().peekable();

        while let Some((start, c)) = chars.next() {
            if c == '"' || c == '\'' {
                // String literal types are copied verbatim
                push_escaped_char(&mut result, c);
                for (_, inner) in chars.by_ref() {
                    push_escaped_char(&mut result, inner);
                    if inner == c {
                        break;
                    }
                }
            } else if c.is_alphabetic() || c == '_' {
                let mut end = start + c.len_utf8();
                while let Some(&(idx, next)) = chars.peek() {
                    if next.is_alphanumeric() || next == '_' {
                        end = idx + next.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                let word = &text[start..end];
                match self.type_link(word) {
                    Some(link) => {
                        result.push_str("<a href=\"");
                        result.push_str(&escape_html(&link));
                        result.push_str("\" class=\"type-link\">");
                        result.push_str(word);
                        result.push_str("</a>");
                    }
                    None => result.push_str(word),
                }
            } else {
                push_escaped_char(&mut result, c);
            }
        }

        result
    }

    /// Link target for an identifier appearing in a type tag
    fn type_link(&self, word: &str) -> Option<String> {
        if BUILTIN_TYPES.contains(&word) {
            return None;
        }

        if let Some(current) = self.current {
            if current.visible_types().any(|t| t.name == word) {
                return Some(format!("#{}", member_anchor(SymbolKind::Type, word)));
            }
        }

        if self.store.lookup(word).is_some() {
            return Some(page_file(word));
        }

        self.store
            .symbols(word)?
            .iter()
            .find(|s| s.kind == SymbolKind::Type)
            .map(|s| s.link())
    }
}

fn is_reference_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '.' | ':')
}
