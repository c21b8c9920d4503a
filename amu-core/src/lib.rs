//! Filter model shared by the AMU surveillance dashboard views.
//!
//! A [`FilterCatalog`] lists the filterable dimensions and their options.
//! Each view owns a [`FilterSession`] holding the selection being built and
//! the committed [`ActiveFilter`] chips.

pub mod catalog;
pub mod session;

pub use catalog::{FilterCatalog, FilterConfig, FilterOption};
pub use session::{ActiveFilter, AddOutcome, FilterSession, SessionState};

/// Errors raised while building a catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate filter type `{0}`")]
    DuplicateType(String),
    #[error("duplicate option `{value}` in filter type `{kind}`")]
    DuplicateOption { kind: String, value: String },
    #[error("cannot read catalog: {0}")]
    Parse(String),
}

/// Builds a session with the given `(type, value)` pairs committed in order.
///
/// Goes through the normal pending/add flow, so duplicates collapse.
pub fn session_with(catalog: &FilterCatalog, pairs: &[(&str, &str)]) -> FilterSession {
    let mut session = FilterSession::new();
    for (kind, value) in pairs {
        session.set_pending_type(*kind);
        session.set_pending_value(*value);
        session.add_filter(catalog);
    }
    session
}
