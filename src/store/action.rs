/// One transition of a partition store.
///
/// A closed sum type per operation; the reducer matches exhaustively, so a
/// new variant cannot be silently ignored.
#[derive(Debug, Clone, PartialEq)]
pub enum Action<T> {
    SetLoading(bool),
    SetSubmitting(bool),
    /// Replace the list wholesale.
    SetAll(Vec<T>),
    /// Prepend one row (newest-first display convention).
    AddOne(T),
    /// Replace exactly the row with a matching id.
    UpdateOne(T),
    /// Remove exactly the row with a matching id.
    RemoveOne(String),
    /// Mark the partition stale without touching the list.
    Invalidate,
    /// Back to the initial empty state.
    Reset,
}
