use serde_json::json;

use super::*;

fn snapshot_with_cards(cards: usize) -> Snapshot {
    Snapshot { cards, ..Snapshot::default() }
}

// =============================================================
// diff
// =============================================================

#[test]
fn identical_snapshots_produce_empty_diff() {
    let prev = Snapshot { cards: 3, round: RoundValue::from_attr(Some("2".into())), turn: 1, flip: true };
    let (changes, next) = diff(&prev, prev.clone());
    assert_eq!(changes, Diff::default());
    assert_eq!(next, prev);
}

#[test]
fn card_increase_reports_appended_tail() {
    let (changes, next) = diff(&snapshot_with_cards(2), snapshot_with_cards(5));
    assert_eq!(changes.cards, CardDelta::Appended { from: 2, to: 5 });
    assert_eq!(next.cards, 5);
}

#[test]
fn card_decrease_is_a_reset() {
    let (changes, next) = diff(&snapshot_with_cards(4), snapshot_with_cards(1));
    assert_eq!(changes.cards, CardDelta::Reset { count: 1 });
    assert_eq!(next.cards, 1);
}

#[test]
fn flip_only_rises_from_false_to_true() {
    let low = Snapshot::default();
    let high = Snapshot { flip: true, ..Snapshot::default() };

    assert!(diff(&low, high.clone()).0.flip_raised);
    assert!(!diff(&high, high.clone()).0.flip_raised);
    assert!(!diff(&high, low.clone()).0.flip_raised);
    assert!(!diff(&low, low.clone()).0.flip_raised);
}

#[test]
fn turn_change_carries_new_value() {
    let prev = Snapshot { turn: 1, ..Snapshot::default() };
    let (changes, _) = diff(&prev, Snapshot { turn: 2, ..Snapshot::default() });
    assert_eq!(changes.turn, Some(2));
}

// =============================================================
// RoundValue
// =============================================================

#[test]
fn rounds_compare_by_numeric_value() {
    let three = RoundValue::from_attr(Some("3".into()));
    assert_eq!(RoundValue::from_attr(Some(" 3 ".into())), three);
    assert_eq!(RoundValue::from_attr(Some("3.0".into())), three);
}

#[test]
fn distinct_rounds_differ() {
    assert_ne!(RoundValue::from_attr(Some("3".into())), RoundValue::from_attr(Some("4".into())));
    assert_ne!(RoundValue::from_attr(Some("final".into())), RoundValue::from_attr(Some("3".into())));
}

#[test]
fn absent_round_is_its_own_value() {
    let absent = RoundValue::from_attr(None);
    assert_eq!(absent, RoundValue::default());
    assert_ne!(absent, RoundValue::from_attr(Some("1".into())));
    assert_eq!(absent.to_json(), json!(null));
}

#[test]
fn round_payload_keeps_rendered_text() {
    let round = RoundValue::from_attr(Some("07".into()));
    assert_eq!(round.to_json(), json!("07"));
    assert_eq!(round, RoundValue::from_attr(Some("7".into())));
}

// =============================================================
// Lenient integers
// =============================================================

#[test]
fn leading_int_reads_like_parse_int() {
    assert_eq!(leading_int("42"), Some(42));
    assert_eq!(leading_int("  7px"), Some(7));
    assert_eq!(leading_int("-3"), Some(-3));
    assert_eq!(leading_int("+5"), Some(5));
    assert_eq!(leading_int("abc"), None);
    assert_eq!(leading_int(""), None);
    assert_eq!(leading_int("-"), None);
}

#[test]
fn positive_or_rejects_missing_zero_and_negative() {
    assert_eq!(positive_or(Some("2"), 1), 2);
    assert_eq!(positive_or(None, 1), 1);
    assert_eq!(positive_or(Some("0"), 3), 3);
    assert_eq!(positive_or(Some("-4"), 3), 3);
    assert_eq!(positive_or(Some("nope"), 3), 3);
}

#[test]
fn flag_requires_literal_true() {
    assert!(flag(Some("true")));
    assert!(!flag(Some("false")));
    assert!(!flag(Some("TRUE")));
    assert!(!flag(None));
}
