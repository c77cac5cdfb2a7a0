//! Word highlighting.
//!
//! Users select words or short phrases in a message; the phrase is stored
//! under the message's content hash and rendered as a clickable highlight
//! wherever it occurs in that message. Clicking a highlight asks the tutor
//! for an explanation (see [`crate::explain`]).

use std::collections::{BTreeMap, BTreeSet};

use crate::error::ClientResult;
use crate::markdown::escape_html;
use crate::storage::Storage;

/// Minimum selection length, in UTF-16 code units.
const MIN_SELECTION_UNITS: usize = 2;
/// Maximum selection length, in UTF-16 code units.
const MAX_SELECTION_UNITS: usize = 50;

/// Stable id for a message, derived from its content.
///
/// Uses the classic 31-multiplier string hash over UTF-16 code units, so the
/// same message text always maps to the same id. Collisions are ignored.
pub fn message_id(content: &str) -> String {
    let hash = content.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit))
    });
    format!("msg_{}", hash.unsigned_abs())
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || ('\u{0400}'..='\u{04FF}').contains(&c)
}

/// Whether `text` can be highlighted: 2 to 50 UTF-16 code units once
/// trimmed, with at least one word character (ASCII or Cyrillic).
///
/// Length is measured in UTF-16 units, the way the browser client measures
/// selections, so an emoji counts as two.
pub fn is_valid_selection(text: &str) -> bool {
    let text = text.trim();
    let len = text.encode_utf16().count();
    (MIN_SELECTION_UNITS..=MAX_SELECTION_UNITS).contains(&len) && text.chars().any(is_word_char)
}

/// Result of trying to highlight a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HighlightOutcome {
    /// The trimmed phrase was recorded
    Added(String),
    /// Too short, too long, or no word characters
    Invalid,
    /// The message already has this phrase
    AlreadyHighlighted,
    /// The selection lies within an existing highlight
    InsideExisting,
}

/// A run of message text, highlighted or not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    /// The stored phrase this run matched
    pub highlight: Option<String>,
}

impl Segment {
    fn plain(text: String) -> Self {
        Self {
            text,
            highlight: None,
        }
    }
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// Whether `text` starts with `word`, ignoring case.
fn match_at(text: &[char], word: &[char]) -> bool {
    word.len() <= text.len()
        && text
            .iter()
            .zip(word.iter())
            .all(|(a, b)| chars_eq_ignore_case(*a, *b))
}

/// Split `text` into plain and highlighted runs.
///
/// Every phrase is matched case-insensitively. Scanning left to right, the
/// earliest match wins and, among matches starting at the same place, the
/// longest. Matches never overlap.
pub fn segments<'a, I>(text: &str, words: I) -> Vec<Segment>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut words: Vec<(Vec<char>, &str)> = words
        .into_iter()
        .filter(|w| !w.is_empty())
        .map(|w| (w.chars().collect(), w))
        .collect();
    words.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

    let chars: Vec<char> = text.chars().collect();
    let mut result = Vec::new();
    let mut plain = String::new();
    let mut i = 0;

    while i < chars.len() {
        let found = words
            .iter()
            .find(|(word, _)| match_at(&chars[i..], word));

        match found {
            Some((word, stored)) => {
                if !plain.is_empty() {
                    result.push(Segment::plain(std::mem::take(&mut plain)));
                }
                result.push(Segment {
                    text: chars[i..i + word.len()].iter().collect(),
                    highlight: Some((*stored).to_string()),
                });
                i += word.len();
            }
            None => {
                plain.push(chars[i]);
                i += 1;
            }
        }
    }
    if !plain.is_empty() {
        result.push(Segment::plain(plain));
    }
    result
}

/// The text the segments were cut from.
pub fn original_text(segments: &[Segment]) -> String {
    segments.iter().map(|s| s.text.as_str()).collect()
}

/// Longest entity reference looked at, `&` and `;` included.
const MAX_ENTITY_LEN: usize = 12;

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let number = name.strip_prefix('#')?;
            let code = match number.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => number.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

/// Decode an escaped text run into characters, each paired with the source
/// slice it came from.
///
/// An entity reference decodes to one character. Unknown entities stay
/// opaque so they can never be matched or split.
fn decode_run(run: &str) -> Vec<(char, &str)> {
    let mut units = Vec::with_capacity(run.len());
    let mut pos = 0;
    while let Some(c) = run[pos..].chars().next() {
        let mut len = c.len_utf8();
        let mut decoded = c;
        if c == '&' {
            let tail = &run[pos..];
            let semi = tail
                .char_indices()
                .take(MAX_ENTITY_LEN)
                .find(|(_, c)| *c == ';')
                .map(|(i, _)| i);
            if let Some(semi) = semi {
                let name = &tail[1..semi];
                if !name.is_empty() && name.chars().all(|c| c == '#' || c.is_ascii_alphanumeric()) {
                    decoded = decode_entity(name).unwrap_or('\u{FFFC}');
                    len = semi + 1;
                }
            }
        }
        units.push((decoded, &run[pos..pos + len]));
        pos += len;
    }
    units
}

/// Wrap occurrences of `words` in rendered message HTML with highlight spans.
///
/// Only text between tags is touched, and it is matched as the reader sees
/// it: entity references count as the character they stand for and are
/// never split. Each span carries the stored phrase and the message id so a
/// click can be traced back.
pub fn highlight_html<'a, I>(html: &str, message_id: &str, words: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let words: Vec<&str> = words.into_iter().filter(|w| !w.trim().is_empty()).collect();
    if words.is_empty() {
        return html.to_string();
    }

    let message_attr = escape_html(message_id);
    let mut out = String::with_capacity(html.len() + words.len() * 64);
    let mut rest = html;

    while !rest.is_empty() {
        if rest.starts_with('<') {
            let end = rest.find('>').map(|i| i + 1).unwrap_or(rest.len());
            out.push_str(&rest[..end]);
            rest = &rest[end..];
            continue;
        }

        let end = rest.find('<').unwrap_or(rest.len());
        let units = decode_run(&rest[..end]);
        let text: String = units.iter().map(|(c, _)| *c).collect();

        let mut pos = 0;
        for segment in segments(&text, words.iter().copied()) {
            let count = segment.text.chars().count();
            let source: String = units[pos..pos + count].iter().map(|(_, raw)| *raw).collect();
            pos += count;
            match segment.highlight {
                Some(word) => out.push_str(&format!(
                    "<span class=\"highlight\" data-word=\"{}\" data-message-id=\"{}\">{}</span>",
                    escape_html(&word),
                    message_attr,
                    source
                )),
                None => out.push_str(&source),
            }
        }
        rest = &rest[end..];
    }
    out
}

/// Highlighted phrases per message, optionally persisted.
#[derive(Debug, Clone, Default)]
pub struct HighlightManager {
    highlights: BTreeMap<String, BTreeSet<String>>,
    storage: Option<Storage>,
}

impl HighlightManager {
    /// In-memory manager with nothing highlighted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Manager backed by `storage`, starting from what it holds.
    pub fn load(storage: Storage) -> ClientResult<Self> {
        let highlights = storage.load_highlights()?;
        tracing::debug!(messages = highlights.len(), "Loaded highlights");
        Ok(Self {
            highlights,
            storage: Some(storage),
        })
    }

    fn persist(&self, message_id: &str) -> ClientResult<()> {
        if let Some(storage) = &self.storage {
            let empty = BTreeSet::new();
            let words = self.highlights.get(message_id).unwrap_or(&empty);
            storage.save_highlights(message_id, words)?;
        }
        Ok(())
    }

    /// Record a selected phrase for a message.
    pub fn highlight_selection(
        &mut self,
        message_id: &str,
        selected: &str,
    ) -> ClientResult<HighlightOutcome> {
        let phrase = selected.trim();
        if !is_valid_selection(phrase) {
            return Ok(HighlightOutcome::Invalid);
        }

        let lowered = phrase.to_lowercase();
        if let Some(existing) = self.highlights.get(message_id) {
            if existing.iter().any(|w| w.to_lowercase() == lowered) {
                return Ok(HighlightOutcome::AlreadyHighlighted);
            }
            if existing.iter().any(|w| w.to_lowercase().contains(&lowered)) {
                return Ok(HighlightOutcome::InsideExisting);
            }
        }

        self.highlights
            .entry(message_id.to_string())
            .or_default()
            .insert(phrase.to_string());
        self.persist(message_id)?;

        tracing::debug!(message_id, phrase, "Highlight added");
        Ok(HighlightOutcome::Added(phrase.to_string()))
    }

    /// Forget one phrase; a message with no phrases left is dropped.
    pub fn remove_highlight(&mut self, message_id: &str, word: &str) -> ClientResult<bool> {
        let Some(words) = self.highlights.get_mut(message_id) else {
            return Ok(false);
        };
        let removed = words.remove(word);
        if words.is_empty() {
            self.highlights.remove(message_id);
        }
        if removed {
            self.persist(message_id)?;
        }
        Ok(removed)
    }

    /// Phrases stored for a message.
    pub fn words(&self, message_id: &str) -> Vec<&str> {
        self.highlights
            .get(message_id)
            .map(|words| words.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn has_highlights(&self, message_id: &str) -> bool {
        self.highlights.contains_key(message_id)
    }

    /// Split a message's plain text by its stored highlights.
    pub fn segments(&self, message_id: &str, text: &str) -> Vec<Segment> {
        segments(text, self.words(message_id))
    }

    /// Wrap a message's stored highlights in its rendered HTML.
    pub fn render_html(&self, message_id: &str, html: &str) -> String {
        highlight_html(html, message_id, self.words(message_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::tempdir;

    #[test]
    fn test_message_id_is_stable() {
        assert_eq!(message_id(""), "msg_0");
        // "a" = 97, "ab" = 97 * 31 + 98
        assert_eq!(message_id("a"), "msg_97");
        assert_eq!(message_id("ab"), "msg_3105");
        assert_eq!(message_id("Hello world"), message_id("Hello world"));
        assert_ne!(message_id("Hello world"), message_id("Hello World"));
    }

    #[test]
    fn test_message_id_wraps() {
        let long = "The detective examined every clue in the apartment carefully.";
        assert!(message_id(long).starts_with("msg_"));
    }

    #[test]
    fn test_valid_selection() {
        assert!(is_valid_selection("  clue "));
        assert!(is_valid_selection("улика"));
        assert!(!is_valid_selection("a"));
        assert!(!is_valid_selection("?!"));
        assert!(!is_valid_selection(&"x".repeat(51)));
        assert!(is_valid_selection(&"x".repeat(50)));
    }

    #[test]
    fn test_selection_length_counts_utf16_units() {
        // 48 letters plus one emoji is 50 units
        let at_limit = format!("{}🔍", "x".repeat(48));
        assert!(is_valid_selection(&at_limit));
        let over = format!("{}🔍", "x".repeat(49));
        assert_eq!(over.chars().count(), 50);
        assert!(!is_valid_selection(&over));
    }

    #[test]
    fn test_highlight_selection_outcomes() {
        let mut manager = HighlightManager::new();
        assert_eq!(
            manager.highlight_selection("msg_1", " the weapon ").unwrap(),
            HighlightOutcome::Added("the weapon".into())
        );
        assert_eq!(
            manager.highlight_selection("msg_1", "The Weapon").unwrap(),
            HighlightOutcome::AlreadyHighlighted
        );
        assert_eq!(
            manager.highlight_selection("msg_1", "weapon").unwrap(),
            HighlightOutcome::InsideExisting
        );
        assert_eq!(
            manager.highlight_selection("msg_1", "x").unwrap(),
            HighlightOutcome::Invalid
        );
        // same phrase in another message is fine
        assert_eq!(
            manager.highlight_selection("msg_2", "weapon").unwrap(),
            HighlightOutcome::Added("weapon".into())
        );
    }

    #[test]
    fn test_remove_drops_empty_sets() {
        let mut manager = HighlightManager::new();
        manager.highlight_selection("msg_1", "clue").unwrap();
        assert!(manager.remove_highlight("msg_1", "clue").unwrap());
        assert!(!manager.has_highlights("msg_1"));
        assert!(!manager.remove_highlight("msg_1", "clue").unwrap());
    }

    #[test]
    fn test_persisted_highlights_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.redb");
        {
            let storage = Storage::new(&path).unwrap();
            let mut manager = HighlightManager::load(storage).unwrap();
            manager.highlight_selection("msg_1", "alibi").unwrap();
        }
        let manager = HighlightManager::load(Storage::new(&path).unwrap()).unwrap();
        assert_eq!(manager.words("msg_1"), vec!["alibi"]);
    }

    #[test]
    fn test_segments_case_insensitive() {
        let segs = segments("Tim saw TIM and tim.", ["tim"]);
        let highlighted: Vec<&str> = segs
            .iter()
            .filter(|s| s.highlight.is_some())
            .map(|s| s.text.as_str())
            .collect();
        assert_eq!(highlighted, vec!["Tim", "TIM", "tim"]);
    }

    #[test]
    fn test_segments_longest_on_ties() {
        let segs = segments("the red door", ["red", "red door", "the"]);
        assert_eq!(
            segs,
            vec![
                Segment {
                    text: "the".into(),
                    highlight: Some("the".into())
                },
                Segment {
                    text: " ".into(),
                    highlight: None
                },
                Segment {
                    text: "red door".into(),
                    highlight: Some("red door".into())
                },
            ]
        );
    }

    #[test]
    fn test_segments_earliest_first_no_overlap() {
        let segs = segments("abcdef", ["cdef", "bcd"]);
        assert_eq!(segs[0].text, "a");
        assert_eq!(segs[1].highlight.as_deref(), Some("bcd"));
        assert_eq!(segs[2].text, "ef");
    }

    #[test]
    fn test_highlight_html_skips_tags() {
        let html = "<p>The <strong>note</strong> was a note.</p>\n";
        let out = highlight_html(html, "msg_7", ["note"]);
        assert_eq!(
            out,
            "<p>The <strong><span class=\"highlight\" data-word=\"note\" data-message-id=\"msg_7\">note</span></strong> was a <span class=\"highlight\" data-word=\"note\" data-message-id=\"msg_7\">note</span>.</p>\n"
        );
    }

    #[test]
    fn test_highlight_html_escaped_words() {
        let out = highlight_html("<p>salt &amp; pepper</p>", "msg_1", ["salt & pepper"]);
        assert!(out.contains("data-word=\"salt &amp; pepper\">salt &amp; pepper</span>"));
    }

    #[test]
    fn test_highlight_html_keeps_entities_whole() {
        let html = crate::markdown::render_markdown("Tim & Ronnie: I am here.");
        let out = highlight_html(&html, "msg_1", ["am"]);
        assert!(!out.contains("&<span"));
        assert_eq!(
            out,
            "<p>Tim &amp; Ronnie: I <span class=\"highlight\" data-word=\"am\" data-message-id=\"msg_1\">am</span> here.</p>\n"
        );
    }

    #[test]
    fn test_highlight_html_matches_decoded_text() {
        let html = crate::markdown::render_markdown("Is 2 < 3? Ask &c.");
        let out = highlight_html(&html, "msg_1", ["2 < 3", "lt"]);
        assert!(out.contains("data-word=\"2 &lt; 3\" data-message-id=\"msg_1\">2 &lt; 3</span>"));
        assert!(!out.contains("data-word=\"lt\""));
    }

    #[test]
    fn test_highlight_html_unknown_entity_is_opaque() {
        let out = highlight_html("<p>caf&eacute; cafe</p>", "msg_1", ["cafe", "eacute"]);
        assert_eq!(
            out,
            "<p>caf&eacute; <span class=\"highlight\" data-word=\"cafe\" data-message-id=\"msg_1\">cafe</span></p>"
        );
    }

    proptest! {
        #[test]
        fn prop_segments_preserve_text(
            text in "[a-zA-Z ]{0,40}",
            words in proptest::collection::vec("[a-z]{1,4}", 0..4),
        ) {
            let segs = segments(&text, words.iter().map(String::as_str));
            prop_assert_eq!(original_text(&segs), text);
            prop_assert!(segs.iter().all(|s| !s.text.is_empty()));
        }

        #[test]
        fn prop_highlight_html_preserves_visible_text(
            text in "[a-z &<>]{0,40}",
            words in proptest::collection::vec("[a-z]{1,3}", 1..3),
        ) {
            let html = format!("<p>{}</p>", crate::markdown::escape_body_text(&text));
            let out = highlight_html(&html, "msg_1", words.iter().map(String::as_str));
            let stripped = out
                .replace("</span>", "")
                .split("<span")
                .enumerate()
                .map(|(i, part)| if i == 0 { part } else { part.split_once('>').map_or("", |(_, t)| t) })
                .collect::<String>();
            prop_assert_eq!(stripped, html);
        }
    }
}
