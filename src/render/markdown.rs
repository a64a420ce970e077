// src/render/markdown.rs
// =============================================================================
// This module renders README Markdown as plain terminal text.
//
// We use the `pulldown-cmark` crate which:
// - Parses Markdown into events (heading, paragraph, link, etc.)
// - Follows the CommonMark specification
// - Is fast and memory-efficient (it's a streaming parser)
//
// Rendering rules:
// - Headings are underlined ("=" for level 1, "-" for the rest)
// - List items get "- " or "1. " with two spaces of indent per level
// - Code blocks are indented four spaces
// - Links print as "text <url>" (just "url" when the text is the url)
// - Raw HTML is dropped, never passed through
// =============================================================================

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag};

/// Renders Markdown to terminal-friendly text.
pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut r = Renderer::default();
    for event in Parser::new_ext(markdown, options) {
        r.handle(event);
    }
    r.finish()
}

#[derive(Default)]
struct Renderer {
    out: String,
    /// One entry per open list: `Some(n)` for ordered lists (next number)
    lists: Vec<Option<u64>>,
    /// Start offset of the heading text, to measure the underline
    heading: Option<(HeadingLevel, usize)>,
    /// Destination of the link we are inside, plus where its text starts
    link: Option<(String, usize)>,
    in_code_block: bool,
    quote_depth: usize,
}

impl Renderer {
    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => {
                if self.in_code_block {
                    for line in text.lines() {
                        self.out.push_str("    ");
                        self.out.push_str(line);
                        self.out.push('\n');
                    }
                } else {
                    self.out.push_str(&text);
                }
            }
            Event::Code(code) => {
                self.out.push('`');
                self.out.push_str(&code);
                self.out.push('`');
            }
            Event::SoftBreak => self.out.push(' '),
            Event::HardBreak => self.newline(),
            Event::Rule => {
                self.block_gap();
                self.out.push_str(&"-".repeat(40));
                self.out.push('\n');
            }
            Event::TaskListMarker(done) => {
                self.out.push_str(if done { "[x] " } else { "[ ] " });
            }
            // Raw HTML and footnotes are not shown
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                if self.lists.is_empty() {
                    self.block_gap();
                }
                self.out.push_str(&"> ".repeat(self.quote_depth));
            }
            Tag::Heading(level, _, _) => {
                self.block_gap();
                self.heading = Some((level, self.out.len()));
            }
            Tag::BlockQuote => {
                self.block_gap();
                self.quote_depth += 1;
            }
            Tag::CodeBlock(_) => {
                self.block_gap();
                self.in_code_block = true;
            }
            Tag::List(start) => {
                if self.lists.is_empty() {
                    self.block_gap();
                } else {
                    self.newline();
                }
                self.lists.push(start);
            }
            Tag::Item => {
                self.newline();
                let depth = self.lists.len().saturating_sub(1);
                self.out.push_str(&"  ".repeat(depth));
                match self.lists.last_mut() {
                    Some(Some(n)) => {
                        self.out.push_str(&format!("{}. ", n));
                        *n += 1;
                    }
                    _ => self.out.push_str("- "),
                }
            }
            Tag::Link(_, dest, _) | Tag::Image(_, dest, _) => {
                self.link = Some((dest.to_string(), self.out.len()));
            }
            Tag::TableRow | Tag::TableHead => self.newline(),
            Tag::TableCell => self.out.push_str("| "),
            // Emphasis, tables and footnote bodies only contribute their text
            _ => {}
        }
    }

    fn end(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading(..) => {
                if let Some((level, start)) = self.heading.take() {
                    let width = self.out[start..].chars().count().max(3);
                    let mark = if level == HeadingLevel::H1 { "=" } else { "-" };
                    self.out.push('\n');
                    self.out.push_str(&mark.repeat(width));
                    self.out.push('\n');
                }
            }
            Tag::Paragraph => self.newline(),
            Tag::BlockQuote => {
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.newline();
            }
            Tag::CodeBlock(_) => self.in_code_block = false,
            Tag::List(_) => {
                self.lists.pop();
                self.newline();
            }
            Tag::Link(..) | Tag::Image(..) => {
                if let Some((dest, start)) = self.link.take() {
                    let text = &self.out[start..];
                    if text.is_empty() {
                        self.out.push_str(&dest);
                    } else if text != dest && !dest.is_empty() {
                        self.out.push_str(&format!(" <{}>", dest));
                    }
                }
            }
            Tag::TableCell => self.out.push(' '),
            _ => {}
        }
    }

    fn newline(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with('\n') {
            self.out.push('\n');
        }
    }

    // Ensures one blank line before a new block
    fn block_gap(&mut self) {
        if self.out.is_empty() {
            return;
        }
        self.newline();
        if !self.out.ends_with("\n\n") {
            self.out.push('\n');
        }
    }

    fn finish(mut self) -> String {
        self.newline();
        self.out
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What is an event stream?
//    - pulldown-cmark does not build a tree; it yields Start/End/Text events
//    - We keep a little state (list stack, open link) and react to each event
//
// 2. Why `match` with a `_ => {}` arm?
//    - Rust requires every case to be handled
//    - The wildcard ignores the events we don't render (HTML, footnotes...)
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_and_paragraph() {
        let text = render_markdown("# Hello\n\nSome *text* here.");
        assert_eq!(text, "Hello\n=====\n\nSome text here.\n");
    }

    #[test]
    fn test_link_shows_destination() {
        let text = render_markdown("See [Rust](https://www.rust-lang.org)!");
        assert_eq!(text, "See Rust <https://www.rust-lang.org>!\n");
    }

    #[test]
    fn test_autolink_is_not_duplicated() {
        let text = render_markdown("<https://example.com>");
        assert_eq!(text, "https://example.com\n");
    }

    #[test]
    fn test_lists() {
        let text = render_markdown("- one\n- two\n\n1. first\n2. second\n");
        assert!(text.contains("- one\n- two\n"));
        assert!(text.contains("1. first\n2. second\n"));
    }

    #[test]
    fn test_block_quote() {
        let text = render_markdown("> quoted");
        assert_eq!(text, "> quoted\n");
    }

    #[test]
    fn test_code_block_is_indented() {
        let text = render_markdown("```\ncargo build\n```\n");
        assert_eq!(text, "    cargo build\n");
    }

    #[test]
    fn test_html_is_dropped() {
        let text = render_markdown("<div align=\"center\"><img src=\"x.png\"></div>\n\nBody");
        assert!(!text.contains("<div"));
        assert!(text.contains("Body"));
    }
}
