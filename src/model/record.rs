use serde::{de::DeserializeOwned, Serialize};

/// Trait for rows cached in a partition.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// The backend table name for this row type (e.g., "clients").
    /// Also used as the partition's in-flight request key.
    const TABLE: &'static str;

    /// The create payload for this row type: the row minus id and
    /// server-assigned timestamps.
    type Draft: Serialize + Send + Sync;

    /// Returns the unique identifier for this row.
    fn id(&self) -> &str;
}
