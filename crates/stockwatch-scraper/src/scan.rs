//! Brace-depth scanner for script-level object literals.

/// Tracks brace depth across successive chunks of script text, skipping
/// braces that sit inside single- or double-quoted strings.
///
/// State carries over between [`LiteralScanner::feed`] calls so a literal may
/// span any number of lines.
#[derive(Debug, Default)]
pub(crate) struct LiteralScanner {
    depth: usize,
    quote: Option<char>,
    escape: bool,
}

impl LiteralScanner {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    /// Scans `chunk` and returns the byte offset just past the brace that
    /// brings depth back to zero, or `None` if the literal is still open.
    ///
    /// A `}` seen at depth zero is ignored; callers start feeding at the
    /// opening brace, so depth cannot underflow.
    pub(crate) fn feed(&mut self, chunk: &str) -> Option<usize> {
        for (i, c) in chunk.char_indices() {
            if self.escape {
                self.escape = false;
                continue;
            }
            if let Some(q) = self.quote {
                match c {
                    '\\' => self.escape = true,
                    _ if c == q => self.quote = None,
                    _ => {}
                }
                continue;
            }
            match c {
                '"' | '\'' => self.quote = Some(c),
                '{' => self.depth += 1,
                '}' if self.depth > 0 => {
                    self.depth -= 1;
                    if self.depth == 0 {
                        return Some(i + c.len_utf8());
                    }
                }
                _ => {}
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closes_on_matching_brace() {
        let mut scanner = LiteralScanner::new();
        let text = "{'a': {'b': 1}}; trailing";
        let end = scanner.feed(text).unwrap();
        assert_eq!(&text[..end], "{'a': {'b': 1}}");
    }

    #[test]
    fn stays_open_across_chunks() {
        let mut scanner = LiteralScanner::new();
        assert_eq!(scanner.feed("{\n"), None);
        assert_eq!(scanner.depth(), 1);
        assert_eq!(scanner.feed("  'a': {\n"), None);
        assert_eq!(scanner.depth(), 2);
        assert_eq!(scanner.feed("  }\n"), None);
        assert_eq!(scanner.feed("};\n"), Some(1));
        assert_eq!(scanner.depth(), 0);
    }

    #[test]
    fn ignores_braces_inside_strings() {
        let mut scanner = LiteralScanner::new();
        let text = r#"{'name': 'open { brace', "other": "close } brace"}"#;
        assert_eq!(scanner.feed(text), Some(text.len()));
    }

    #[test]
    fn honours_escaped_quotes() {
        let mut scanner = LiteralScanner::new();
        let text = r"{'name': 'it\'s {', 'x': 1}";
        assert_eq!(scanner.feed(text), Some(text.len()));
    }

    #[test]
    fn other_quote_style_does_not_close_string() {
        let mut scanner = LiteralScanner::new();
        let text = r#"{"name": "it's }", 'x': 1}"#;
        assert_eq!(scanner.feed(text), Some(text.len()));
    }

    #[test]
    fn handles_multibyte_characters() {
        let mut scanner = LiteralScanner::new();
        let text = "{'name': 'caf\u{e9}'}x";
        let end = scanner.feed(text).unwrap();
        assert_eq!(&text[..end], "{'name': 'caf\u{e9}'}");
    }

    #[test]
    fn stray_close_before_open_is_ignored() {
        let mut scanner = LiteralScanner::new();
        assert_eq!(scanner.feed("}"), None);
        assert_eq!(scanner.depth(), 0);
    }
}
