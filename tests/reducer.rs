//! Reducer transition tests: purity, id uniqueness, and the strict no-op
//! policy for absent ids.

mod support;

use atelier_cache::{reduce, Action, Client, PartitionState};
use chrono::{TimeZone, Utc};
use support::client;

fn now() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

fn state_with(items: Vec<Client>) -> PartitionState<Client> {
    PartitionState {
        items,
        ..PartitionState::new()
    }
}

#[test]
fn reduce_never_mutates_its_input() {
    let state = state_with(vec![client("1", "John", "Doe"), client("2", "Jane", "Roe")]);
    let before = state.clone();

    let _ = reduce(&state, Action::AddOne(client("3", "Ada", "Lovelace")), now());
    let _ = reduce(&state, Action::RemoveOne("1".to_string()), now());
    let _ = reduce(&state, Action::Reset, now());

    assert_eq!(state, before);
}

#[test]
fn set_all_replaces_wholesale_and_deduplicates() {
    let state = state_with(vec![client("old", "Old", "Row")]);
    let next = reduce(
        &state,
        Action::SetAll(vec![
            client("1", "John", "Doe"),
            client("1", "Dupe", "Row"),
            client("2", "Jane", "Roe"),
        ]),
        now(),
    );

    let ids: Vec<&str> = next.items.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, ["1", "2"]);
    // First occurrence wins.
    assert_eq!(next.items[0].first_name, "John");
    assert_eq!(next.last_updated, Some(now()));
}

#[test]
fn add_one_prepends() {
    let state = state_with(vec![client("1", "John", "Doe")]);
    let next = reduce(&state, Action::AddOne(client("2", "Jane", "Roe")), now());

    let ids: Vec<&str> = next.items.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, ["2", "1"]);
}

#[test]
fn add_one_with_existing_id_keeps_the_list_unique() {
    let state = state_with(vec![client("1", "John", "Doe"), client("2", "Jane", "Roe")]);
    let next = reduce(&state, Action::AddOne(client("2", "Updated", "Roe")), now());

    assert_eq!(next.items.len(), 2);
    assert_eq!(next.items[0].id, "2");
    assert_eq!(next.items[0].first_name, "Updated");
}

#[test]
fn update_replaces_exactly_the_matching_row() {
    let state = state_with(vec![client("1", "John", "Doe"), client("2", "Jane", "Roe")]);
    let patched = client("2", "Janet", "Roe");
    let next = reduce(&state, Action::UpdateOne(patched.clone()), now());

    assert_eq!(next.items[0], client("1", "John", "Doe"));
    assert_eq!(next.items[1], patched);
}

#[test]
fn update_with_absent_id_leaves_the_list_untouched() {
    let state = state_with(vec![client("1", "John", "Doe")]);
    let next = reduce(&state, Action::UpdateOne(client("missing", "X", "Y")), now());

    assert_eq!(next.items, state.items);
}

#[test]
fn remove_deletes_exactly_the_matching_row() {
    let state = state_with(vec![client("1", "John", "Doe"), client("2", "Jane", "Roe")]);
    let next = reduce(&state, Action::RemoveOne("1".to_string()), now());

    assert_eq!(next.items.len(), 1);
    assert_eq!(next.items[0].id, "2");
}

#[test]
fn remove_with_absent_id_leaves_the_list_untouched() {
    let state = state_with(vec![client("1", "John", "Doe")]);
    let next = reduce(&state, Action::RemoveOne("missing".to_string()), now());

    assert_eq!(next.items, state.items);
}

#[test]
fn invalidate_clears_freshness_but_keeps_the_list() {
    let fresh = reduce(
        &PartitionState::new(),
        Action::SetAll(vec![client("1", "John", "Doe")]),
        now(),
    );
    assert!(!fresh.is_stale());

    let stale = reduce(&fresh, Action::Invalidate, now());
    assert!(stale.is_stale());
    assert_eq!(stale.items, fresh.items);
}

#[test]
fn reset_returns_to_the_initial_state() {
    let populated = PartitionState {
        items: vec![client("1", "John", "Doe")],
        loading: true,
        submitting: true,
        last_updated: Some(now()),
    };
    assert_eq!(
        reduce(&populated, Action::Reset, now()),
        PartitionState::new()
    );
}

#[test]
fn flag_actions_touch_only_their_flag() {
    let state = state_with(vec![client("1", "John", "Doe")]);

    let loading = reduce(&state, Action::SetLoading(true), now());
    assert!(loading.loading);
    assert!(!loading.submitting);
    assert_eq!(loading.items, state.items);
    assert_eq!(loading.last_updated, None);

    let submitting = reduce(&state, Action::SetSubmitting(true), now());
    assert!(submitting.submitting);
    assert!(!submitting.loading);
}
