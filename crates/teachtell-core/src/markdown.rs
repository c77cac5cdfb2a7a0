//! Markdown rendering for chat and course messages.
//!
//! Messages use a small markdown subset (headings, lists, bold/italic, code,
//! horizontal rules). Raw HTML in message text is shown literally, never
//! interpreted.

use pulldown_cmark::{html, Event, Options, Parser, Tag, TagEnd};
use pulldown_cmark_escape::FmtWriter;

fn options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options
}

/// Escape text for inclusion in HTML, attribute values included.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    // writing into a String cannot fail
    let _ = pulldown_cmark_escape::escape_html(FmtWriter(&mut escaped), text);
    escaped
}

/// Escape text the way rendered message bodies escape it.
pub fn escape_body_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    let _ = pulldown_cmark_escape::escape_html_body_text(FmtWriter(&mut escaped), text);
    escaped
}

/// Turn raw HTML events into text so markup is displayed, not rendered.
fn neutralize_html(event: Event<'_>) -> Event<'_> {
    match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    }
}

/// Render message markdown to HTML.
pub fn render_markdown(markdown: &str) -> String {
    if markdown.is_empty() {
        return String::new();
    }

    let normalized = markdown.replace("\r\n", "\n").replace('\r', "\n");
    let parser = Parser::new_ext(&normalized, options()).map(neutralize_html);
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    html_output
}

/// Render "typewriter" intro text: paragraphs only, single line breaks
/// folded into spaces, emphasis kept.
pub fn render_typewriter(text: &str) -> String {
    let normalized = text.replace("\r\n", "\n");
    let parser = Parser::new_ext(&normalized, Options::empty())
        .map(neutralize_html)
        .filter_map(|event| match event {
            Event::SoftBreak | Event::HardBreak => Some(Event::Text(" ".into())),
            Event::Start(Tag::Heading { .. }) => Some(Event::Start(Tag::Paragraph)),
            Event::End(TagEnd::Heading(_)) => Some(Event::End(TagEnd::Paragraph)),
            Event::Rule => None,
            other => Some(other),
        });
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    html_output
}

/// Text content of markdown with all markup removed.
///
/// Block boundaries become single spaces, so the result reads as one line of
/// prose.
pub fn to_plain_text(markdown: &str) -> String {
    let mut text = String::new();
    for event in Parser::new_ext(markdown, options()) {
        match event {
            Event::Text(t) | Event::Code(t) | Event::Html(t) | Event::InlineHtml(t) => {
                text.push_str(&t)
            }
            Event::SoftBreak | Event::HardBreak | Event::Rule => text.push(' '),
            Event::End(TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item) => text.push(' '),
            _ => {}
        }
    }
    collapse_whitespace(&text)
}

/// Collapse runs of whitespace into single spaces and trim.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
