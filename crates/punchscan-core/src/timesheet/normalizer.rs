//! Intra-token OCR cleanup.
//!
//! Only tokens that look like a service order number once stray characters
//! are removed get rewritten: the stray characters go and a letter `O` inside
//! a digit group becomes `0`. Everything else, whitespace included, passes
//! through byte for byte, so the line structure the cascades depend on is
//! never disturbed.

use std::borrow::Cow;

use regex::Captures;

use super::rules::patterns::{ORDER_SHAPE, TOKEN};

fn is_kept(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '$' | '.' | '-')
}

fn normalize_token(token: &str) -> Cow<'_, str> {
    let stripped: String = token.chars().filter(|c| is_kept(*c)).collect();
    let stripped = stripped.trim_matches(|c| c == '.' || c == '-');

    if !ORDER_SHAPE.is_match(stripped) {
        return Cow::Borrowed(token);
    }

    // Keep the two prefix characters; identifier cleaning handles `$` and `0`.
    let mut out = String::with_capacity(stripped.len());
    for (i, c) in stripped.char_indices() {
        out.push(if i >= 2 && c == 'O' { '0' } else { c });
    }

    if out == token {
        Cow::Borrowed(token)
    } else {
        Cow::Owned(out)
    }
}

/// Normalize one line. Returns the input unchanged when nothing needed fixing.
pub fn normalize_line(line: &str) -> Cow<'_, str> {
    let mut changed = false;
    let replaced = TOKEN.replace_all(line, |caps: &Captures<'_>| {
        let token = normalize_token(&caps[0]);
        if matches!(token, Cow::Owned(_)) {
            changed = true;
        }
        token.into_owned()
    });

    if changed {
        Cow::Owned(replaced.into_owned())
    } else {
        Cow::Borrowed(line)
    }
}

/// Normalize every line of a document, preserving line breaks.
pub fn normalize_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for piece in text.split_inclusive('\n') {
        let (line, ending) = match piece.strip_suffix('\n') {
            Some(line) => match line.strip_suffix('\r') {
                Some(line) => (line, "\r\n"),
                None => (line, "\n"),
            },
            None => (piece, ""),
        };
        out.push_str(&normalize_line(line));
        out.push_str(ending);
    }
    out
}
