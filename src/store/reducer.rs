use std::collections::HashSet;

use chrono::{DateTime, Utc};

use super::{Action, PartitionState};
use crate::model::Record;

/// Apply one action to a partition snapshot, returning the next snapshot.
///
/// Pure: the input state is never mutated and no clock is read — `now` is
/// supplied by the caller and stamped into `last_updated` on every list
/// transition (`SetAll`/`AddOne`/`UpdateOne`/`RemoveOne`).
///
/// `UpdateOne`/`RemoveOne` with an id that matches nothing leave the list
/// untouched (strict no-op), uniformly across all partitions.
pub fn reduce<T: Record>(
    state: &PartitionState<T>,
    action: Action<T>,
    now: DateTime<Utc>,
) -> PartitionState<T> {
    match action {
        Action::SetLoading(loading) => PartitionState {
            loading,
            ..state.clone()
        },
        Action::SetSubmitting(submitting) => PartitionState {
            submitting,
            ..state.clone()
        },
        Action::SetAll(items) => PartitionState {
            items: dedup_by_id(items),
            last_updated: Some(now),
            ..state.clone()
        },
        Action::AddOne(row) => {
            let id = row.id().to_string();
            let mut items = Vec::with_capacity(state.items.len() + 1);
            items.push(row);
            items.extend(
                state
                    .items
                    .iter()
                    .filter(|existing| existing.id() != id)
                    .cloned(),
            );
            PartitionState {
                items,
                last_updated: Some(now),
                ..state.clone()
            }
        }
        Action::UpdateOne(row) => {
            let items = state
                .items
                .iter()
                .map(|existing| {
                    if existing.id() == row.id() {
                        row.clone()
                    } else {
                        existing.clone()
                    }
                })
                .collect();
            PartitionState {
                items,
                last_updated: Some(now),
                ..state.clone()
            }
        }
        Action::RemoveOne(id) => {
            let items = state
                .items
                .iter()
                .filter(|existing| existing.id() != id)
                .cloned()
                .collect();
            PartitionState {
                items,
                last_updated: Some(now),
                ..state.clone()
            }
        }
        Action::Invalidate => PartitionState {
            last_updated: None,
            ..state.clone()
        },
        Action::Reset => PartitionState::new(),
    }
}

/// Keep the first occurrence of every id.
fn dedup_by_id<T: Record>(items: Vec<T>) -> Vec<T> {
    let mut seen: HashSet<String> = HashSet::with_capacity(items.len());
    items
        .into_iter()
        .filter(|item| seen.insert(item.id().to_string()))
        .collect()
}
