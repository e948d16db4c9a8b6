//! Table scanning for the common-misspellings page.
//!
//! Each `<tr>` holds one entry: the correct word is linked to its dictionary
//! definition (`<a href=".../definition/english/<word>">`), the misspelling
//! sits in the third `<td>`. Parsing is tolerant: tag names are matched
//! case-insensitively, anything outside `<tr>` blocks is ignored, and the
//! optional `</tr>`/`</td>` end tags may be left out.

use listing_core::wordlist::MisspellingPair;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

pub const DEFINITION_PREFIX: &str = "http://www.oxforddictionaries.com/definition/english/";

static ROW_START_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<tr\b[^>]*>").unwrap());
// A row without `</tr>` ends at the next row or where its table section closes.
static ROW_END_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)</tr\s*>|<tr\b|</t(?:able|body|head|foot)\s*>").unwrap()
});
static HREF_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<a\b[^>]*?\bhref\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap()
});
static CELL_START_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<td\b[^>]*>").unwrap());
static CELL_END_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)</td\s*>|<t[dh]\b").unwrap());
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").unwrap());
static ENTITY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|[a-zA-Z]+);").unwrap());

/// Extracts `(correct, incorrect)` pairs. Rows that do not yield exactly one
/// linked word and one misspelling are skipped; the first kept row is the
/// table header and is dropped.
pub fn extract_pairs(html: &str, definition_prefix: &str) -> Vec<MisspellingPair> {
    elements(html, &ROW_START_RE, &ROW_END_RE)
        .filter_map(|row| row_values(row, definition_prefix))
        .skip(1)
        .map(|[correct, incorrect]| MisspellingPair { correct, incorrect })
        .collect()
}

fn row_values(row: &str, definition_prefix: &str) -> Option<[String; 2]> {
    let mut values: Vec<String> = HREF_RE
        .captures_iter(row)
        .filter_map(|cap| cap.get(1).or_else(|| cap.get(2)))
        .map(|href| {
            let href = decode_entities(href.as_str());
            let word = href.replace(definition_prefix, "");
            first_value(&word)
        })
        .collect();

    if let Some(cell) = elements(row, &CELL_START_RE, &CELL_END_RE).nth(2) {
        values.push(first_value(&cell_text(cell)));
    }

    match <[String; 2]>::try_from(values) {
        Ok(pair) if pair.iter().all(|v| !v.is_empty()) => Some(pair),
        _ => None,
    }
}

/// Bodies of the elements opened by `start`, each running up to the first
/// `end` match or the end of `text`.
fn elements<'a>(
    text: &'a str,
    start: &'a Regex,
    end: &'a Regex,
) -> impl Iterator<Item = &'a str> + 'a {
    start.find_iter(text).map(move |open| {
        let body = &text[open.end()..];
        let len = end.find(body).map_or(body.len(), |close| close.start());
        &body[..len]
    })
}

/// Visible text of a cell: tags removed, entities decoded, whitespace collapsed.
pub fn cell_text(cell: &str) -> String {
    let stripped = TAG_RE.replace_all(cell, "");
    decode_entities(&stripped)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

// Some entries list two spellings ("a, b"); only the first one is kept.
fn first_value(value: &str) -> String {
    value.split(',').next().unwrap_or_default().trim().to_string()
}

pub fn decode_entities(value: &str) -> String {
    ENTITY_RE
        .replace_all(value, |cap: &Captures| {
            let entity = &cap[1];
            let decoded = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some(' '),
                _ => entity
                    .strip_prefix("#x")
                    .or_else(|| entity.strip_prefix("#X"))
                    .map(|hex| u32::from_str_radix(hex, 16).ok())
                    .unwrap_or_else(|| entity.strip_prefix('#').and_then(|dec| dec.parse().ok()))
                    .and_then(char::from_u32),
            };
            decoded.map_or_else(|| cap[0].to_string(), |ch| ch.to_string())
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
<html><body>
<table>
  <TR><TH>Correct</TH><TH>Tip</TH><TH>Incorrect</TH></TR>
  <tr><td><a href="http://www.oxforddictionaries.com/definition/english/header">header</a></td><td></td><td>ignored</td></tr>
  <tr>
    <td><a href="http://www.oxforddictionaries.com/definition/english/accommodate">accommodate</a></td>
    <td>two cs, two ms</td>
    <td>accomodate, acommodate</td>
  </tr>
  <tr><td><a href='http://www.oxforddictionaries.com/definition/english/a-lot,allot'>a lot</a></td><td>-</td><td><em>alot</em></td></tr>
  <tr><td><a href="http://www.oxforddictionaries.com/definition/english/x">x</a> <a href="/y">y</a></td><td></td><td>z</td></tr>
  <tr><td><a href="http://www.oxforddictionaries.com/definition/english/tomorrow">tomorrow</a></td><td>one m</td></tr>
  <tr><td><a href="http://www.oxforddictionaries.com/definition/english/caf&#233;">cafe</a></td><td></td><td>caffe&nbsp;</td></tr>
</table>
</body></html>"#;

    #[test]
    fn extracts_rows_and_drops_header() {
        let pairs = extract_pairs(PAGE, DEFINITION_PREFIX);
        assert_eq!(
            pairs,
            vec![
                MisspellingPair::new("accommodate", "accomodate"),
                MisspellingPair::new("a-lot", "alot"),
                MisspellingPair::new("café", "caffe"),
            ]
        );
    }

    #[test]
    fn decodes_entities() {
        assert_eq!(decode_entities("fish &amp; chips"), "fish & chips");
        assert_eq!(decode_entities("&#x41;&#66;"), "AB");
        assert_eq!(decode_entities("&bogus; stays"), "&bogus; stays");
    }

    #[test]
    fn cell_text_strips_markup() {
        assert_eq!(cell_text(" <b>foo</b>\n  <i>bar</i> "), "foo bar");
    }

    #[test]
    fn rows_without_end_tags() {
        let page = r#"<table>
  <tr><th>Correct<th>Tip<th>Incorrect
  <tr><td><a href="http://www.oxforddictionaries.com/definition/english/believe">believe</a><td>i before e<td>beleive
  <TR class="odd"><td><a href="http://www.oxforddictionaries.com/definition/english/weird">weird</a></td><td></td><td>wierd</td>
  <tr><td><a href="http://www.oxforddictionaries.com/definition/english/truly">truly</a><td>no e<td>truely
</table>
<p><a href="/elsewhere">outside any row</a></p>"#;
        let pairs = extract_pairs(page, DEFINITION_PREFIX);
        assert_eq!(
            pairs,
            vec![
                MisspellingPair::new("weird", "wierd"),
                MisspellingPair::new("truly", "truely"),
            ]
        );
    }

    #[test]
    fn empty_document_yields_nothing() {
        assert!(extract_pairs("<html></html>", DEFINITION_PREFIX).is_empty());
    }
}
