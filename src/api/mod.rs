//! The HTTP collaborator seam: transport trait, request paths, and the
//! error taxonomy classified once at this boundary.

mod client;
mod error;

pub use client::{Method, TableClient};
pub use error::{ApiError, ErrorBody};

pub(crate) use client::{delete_path, list_path, owned_path, table_path};
