use std::sync::LazyLock;

use regex::Regex;

static NON_DIGIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^0-9]").unwrap());

/// Recover an integer from display text.
///
/// Every `k` is rewritten to the two literal digits `00` before non-digits
/// are stripped, so `"12k"` reads as 1200 and `"4k"` as 400. This is digit
/// concatenation, not multiplication, and downstream tables rely on it.
/// Text with no digits left (or too many to fit) reads as 0.
pub fn amount(text: &str) -> i64 {
    let expanded = text.replace('k', "00");
    NON_DIGIT_RE
        .replace_all(&expanded, "")
        .parse()
        .unwrap_or(0)
}

/// `"used/total"` style cells: each side of every `/` through [`amount`].
pub fn counts(text: &str) -> Vec<i64> {
    text.split('/').map(amount).collect()
}

/// `"MM:SS"` to signed seconds; no separator reads as 0.
pub fn seconds(text: &str) -> i64 {
    clock_seconds(text).unwrap_or(0)
}

/// Like [`seconds`] but `None` when the text carries no `:` at all.
///
/// Negative minutes mark a pre-game countdown and subtract the seconds, so
/// `"-2:15"` is -135. The sign follows the minutes value, so `"-0:30"` has
/// zero minutes and reads as +30. Values too large for `i64` read as 0.
pub fn clock_seconds(text: &str) -> Option<i64> {
    let (minutes, rest) = text.trim().split_once(':')?;
    let minutes = minutes.trim();
    let secs = amount(rest.split(':').next().unwrap_or_default());
    let mins = if minutes.starts_with('-') {
        -amount(minutes)
    } else {
        amount(minutes)
    };
    let total = mins.checked_mul(60).and_then(|m| {
        if mins < 0 {
            m.checked_sub(secs)
        } else {
            m.checked_add(secs)
        }
    });
    Some(total.unwrap_or(0))
}

/// Collapse runs of whitespace and trim.
pub fn squash(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
