//! Change detection over server-rendered state.
//!
//! A binding keeps the last [`Snapshot`] it observed and, on every lifecycle
//! call, reads a fresh one off its element. [`diff`] compares the two and
//! reports only the transitions bindings animate on. The snapshot is a shadow
//! copy for diffing; the element's attributes stay the source of truth.
//!
//! Card lists follow an append-only model: the server only appends cards
//! within a round, so a larger count means new cards at the tail and any
//! smaller count is a reset with no animation.

#[cfg(test)]
#[path = "change_test.rs"]
mod change_test;

use serde_json::Value;

/// Last observed state of one bound element.
///
/// Bindings fill the fields they watch; untouched fields stay at their
/// defaults on both sides of a diff and never report a change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub cards: usize,
    pub round: RoundValue,
    pub turn: u32,
    pub flip: bool,
}

/// What changed between two snapshots.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diff {
    pub cards: CardDelta,
    /// New round value, present only when it differs from the previous one.
    pub round: Option<RoundValue>,
    /// New turn, present only when it differs from the previous one.
    pub turn: Option<u32>,
    /// The flip flag went from false to true.
    pub flip_raised: bool,
}

/// Card count movement under the append-only model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CardDelta {
    #[default]
    Unchanged,
    /// Cards `from..to` (document order) are new.
    Appended { from: usize, to: usize },
    /// The count dropped; the snapshot restarts at `count`.
    Reset { count: usize },
}

/// Compare `previous` with `current` and return the diff plus the snapshot to keep.
#[must_use]
pub fn diff(previous: &Snapshot, current: Snapshot) -> (Diff, Snapshot) {
    let changes = Diff {
        cards: card_delta(previous.cards, current.cards),
        round: (current.round != previous.round).then(|| current.round.clone()),
        turn: (current.turn != previous.turn).then_some(current.turn),
        flip_raised: current.flip && !previous.flip,
    };
    (changes, current)
}

#[must_use]
pub fn card_delta(previous: usize, current: usize) -> CardDelta {
    match current.cmp(&previous) {
        std::cmp::Ordering::Greater => CardDelta::Appended { from: previous, to: current },
        std::cmp::Ordering::Less => CardDelta::Reset { count: current },
        std::cmp::Ordering::Equal => CardDelta::Unchanged,
    }
}

/// A round value as rendered by the server.
///
/// The raw text is kept for the outbound notification; equality is by value,
/// so `"3"`, `" 3 "` and `"3.0"` are the same round.
#[derive(Debug, Clone, Default)]
pub struct RoundValue {
    raw: Option<String>,
}

#[derive(PartialEq)]
enum RoundKey<'a> {
    Absent,
    Number(f64),
    Text(&'a str),
}

impl RoundValue {
    #[must_use]
    pub fn from_attr(raw: Option<String>) -> Self {
        Self { raw }
    }

    /// Payload form: the text the server rendered, or `null` when absent.
    #[must_use]
    pub fn to_json(&self) -> Value {
        self.raw.as_ref().map_or(Value::Null, |raw| Value::String(raw.clone()))
    }

    fn key(&self) -> RoundKey<'_> {
        let Some(raw) = self.raw.as_deref() else {
            return RoundKey::Absent;
        };
        let trimmed = raw.trim();
        match trimmed.parse::<f64>() {
            Ok(number) if number.is_finite() => RoundKey::Number(number),
            _ => RoundKey::Text(trimmed),
        }
    }
}

impl PartialEq for RoundValue {
    fn eq(&self, other: &Self) -> bool {
        match (self.key(), other.key()) {
            (RoundKey::Number(a), RoundKey::Number(b)) => (a - b).abs() < f64::EPSILON,
            (a, b) => a == b,
        }
    }
}

/// Leading integer of `raw`, read the way `parseInt` reads it.
///
/// Leading whitespace and a sign are accepted, parsing stops at the first
/// non-digit, and input with no leading digits yields `None`.
#[must_use]
pub fn leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits.find(|c: char| !c.is_ascii_digit()).unwrap_or(digits.len());
    let Ok(magnitude) = digits[..end].parse::<i64>() else {
        return None;
    };
    Some(if negative { -magnitude } else { magnitude })
}

/// A strictly positive integer attribute, or `default` when absent or invalid.
#[must_use]
pub fn positive_or(raw: Option<&str>, default: u32) -> u32 {
    match raw.and_then(leading_int).filter(|value| *value > 0).map(u32::try_from) {
        Some(Ok(value)) => value,
        _ => default,
    }
}

/// Whether a flag attribute carries the literal `"true"` marker.
#[must_use]
pub fn flag(raw: Option<&str>) -> bool {
    raw == Some("true")
}
