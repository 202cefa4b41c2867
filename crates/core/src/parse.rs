//! Parsing for the delimited word-pair dataset.
//!
//! # Format
//! ```text
//! an vs ang,"饭 (fàn, 米饭)","放 (fàng, 放学)"
//! ,"碗 (wǎn, 饭碗)","网 (wǎng, 上网)"
//! ```
//!
//! Column 0 is the category, inherited from the nearest preceding non-empty
//! category when blank. Columns 1 and 2 are composite fields encoding a
//! display form and its pronunciation; remaining columns are ignored.

use crate::model::{WordEntry, WordPairRecord};

/// A decomposed composite field: display text plus pronunciation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordField {
    pub text: String,
    pub pinyin: String,
}

/// Split one line into fields, honoring quoting.
///
/// A `"` toggles quote mode; inside quotes a comma is literal and a doubled
/// `""` is an escaped literal quote. A comma outside quote mode ends the
/// current field. Missing fields are simply absent; no ragged-row handling
/// beyond that.
#[must_use]
pub fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                field.push(ch);
            }
        } else if ch == '"' {
            in_quotes = true;
        } else if ch == ',' {
            fields.push(std::mem::take(&mut field));
        } else {
            field.push(ch);
        }
    }
    fields.push(field);
    fields
}

/// Decompose a raw composite field of the shape `TEXT (PRONUNCIATION, CONTEXT)`
/// or `TEXT (PRONUNCIATION)`.
///
/// Two-stage match: first "parenthesized content up to the first internal
/// comma", then "parenthesized content up to the closing parenthesis". With no
/// parenthesis the whole trimmed string becomes the text and the pronunciation
/// is empty. Returns `None` only for an empty or whitespace-only field.
#[must_use]
pub fn parse_word_field(raw: &str) -> Option<WordField> {
    let s = raw.trim().trim_matches('"').trim();
    if s.is_empty() {
        return None;
    }

    let whole = || WordField {
        text: s.to_string(),
        pinyin: String::new(),
    };

    let Some(open) = s.find('(') else {
        return Some(whole());
    };
    let text = s[..open].trim_end();
    if text.is_empty() {
        return Some(whole());
    }

    let inner = &s[open + 1..];
    let pinyin = match inner.find(',') {
        Some(comma) if !inner[..comma].trim().is_empty() => inner[..comma].trim(),
        _ => match inner.find(')') {
            Some(close) if !inner[..close].trim().is_empty() => inner[..close].trim(),
            _ => return Some(whole()),
        },
    };

    Some(WordField {
        text: text.to_string(),
        pinyin: pinyin.to_string(),
    })
}

/// Parse a whole delimited dataset into records.
///
/// Lines with a missing front or back column, or with an undecomposable
/// composite field, are skipped but still propagate category inheritance.
/// Every emitted record has non-empty front and back text.
#[must_use]
pub fn parse_rows(input: &str) -> Vec<WordPairRecord> {
    let lines = input.lines().filter(|l| !l.trim().is_empty());

    let (records, _) = lines.fold(
        (Vec::new(), String::new()),
        |(mut records, last_category), line| {
            let cols = split_fields(line);
            let col0 = strip_zero_width(cols.first().map_or("", |c| c.trim()));
            let category = if col0.is_empty() {
                last_category
            } else {
                col0
            };

            let front = cols.get(1).and_then(|c| parse_word_field(c));
            let back = cols.get(2).and_then(|c| parse_word_field(c));
            if let (Some(f), Some(b)) = (front, back) {
                records.push(WordPairRecord::new(
                    category.clone(),
                    WordEntry::new(f.text, f.pinyin),
                    WordEntry::new(b.text, b.pinyin),
                ));
            }
            (records, category)
        },
    );
    records
}

// Category cells in the source sheet carry zero-width joiners around the
// group headings.
fn strip_zero_width(s: &str) -> String {
    s.chars()
        .filter(|c| !matches!(c, '\u{200b}' | '\u{200c}' | '\u{200d}'))
        .collect()
}
