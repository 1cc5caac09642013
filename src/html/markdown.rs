//! Markdown to HTML for `markdown` elements.

use pulldown_cmark::{Event, Options, Parser, html};

/// Render markdown to HTML. Raw HTML in the source is shown as text, not
/// interpreted.
pub fn to_html(text: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let parser = Parser::new_ext(text, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emphasis_and_lists() {
        let out = to_html("**bold** and *soft*\n\n- one\n- two");
        assert!(out.contains("<strong>bold</strong>"));
        assert!(out.contains("<em>soft</em>"));
        assert!(out.contains("<li>one</li>"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let out = to_html("hello <script>alert(1)</script>");
        assert!(!out.contains("<script>"));
        assert!(out.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_empty() {
        assert_eq!(to_html(""), "");
    }
}
