//! Per-view filter state: the filter being built and the committed chips.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::catalog::FilterCatalog;

/// A committed filter selection, shown as a removable chip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActiveFilter {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
    /// Pre-formatted `"<Dimension>: <Option>"` text.
    pub label: String,
}

impl ActiveFilter {
    pub fn matches(&self, kind: &str, value: &str) -> bool {
        self.kind == kind && self.value == value
    }
}

/// Where the pending selection stands.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    Idle,
    TypeChosen,
    Ready,
}

/// Which path [`FilterSession::add_filter`] took.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AddOutcome {
    Added,
    /// Pending type or value was empty.
    Incomplete,
    /// The same `(type, value)` pair is already active.
    Duplicate,
}

/// Filter state owned by one dashboard view.
///
/// `active` behaves as an insertion-ordered set keyed on `(type, value)`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterSession {
    pending_type: String,
    pending_value: String,
    active: Vec<ActiveFilter>,
}

impl FilterSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending_type(&self) -> &str {
        &self.pending_type
    }

    pub fn pending_value(&self) -> &str {
        &self.pending_value
    }

    pub fn active_filters(&self) -> &[ActiveFilter] {
        &self.active
    }

    pub fn state(&self) -> SessionState {
        match (self.pending_type.is_empty(), self.pending_value.is_empty()) {
            (true, _) => SessionState::Idle,
            (false, true) => SessionState::TypeChosen,
            (false, false) => SessionState::Ready,
        }
    }

    pub fn can_add(&self) -> bool {
        self.state() == SessionState::Ready
    }

    /// Sets the pending type. The pending value is always cleared since
    /// option sets are scoped to a type.
    pub fn set_pending_type(&mut self, kind: impl Into<String>) {
        self.pending_type = kind.into();
        self.pending_value.clear();
    }

    pub fn set_pending_value(&mut self, value: impl Into<String>) {
        self.pending_value = value.into();
    }

    /// Commits the pending selection.
    ///
    /// Incomplete and duplicate selections leave the session unchanged.
    pub fn add_filter(&mut self, catalog: &FilterCatalog) -> AddOutcome {
        if !self.can_add() {
            return AddOutcome::Incomplete;
        }
        if self.is_active(&self.pending_type, &self.pending_value) {
            debug!(
                "filter {}={} already active",
                self.pending_type, self.pending_value
            );
            return AddOutcome::Duplicate;
        }

        let kind = std::mem::take(&mut self.pending_type);
        let value = std::mem::take(&mut self.pending_value);
        let label = catalog.describe(&kind, &value);
        debug!("adding filter {label}");
        self.active.push(ActiveFilter { kind, value, label });
        AddOutcome::Added
    }

    /// Removes the chip at `index`, shifting later chips left.
    ///
    /// Indices come from the caller's copy of `active`, so an out-of-range
    /// index means that copy is stale. Debug builds panic on it.
    pub fn remove_filter(&mut self, index: usize) -> Option<ActiveFilter> {
        debug_assert!(
            index < self.active.len(),
            "remove_filter index {index} out of range for {} active filters",
            self.active.len()
        );
        if index >= self.active.len() {
            warn!(
                "ignoring remove_filter({index}) with {} active filters",
                self.active.len()
            );
            return None;
        }
        Some(self.active.remove(index))
    }

    /// Drops every chip; pending state is kept.
    pub fn clear_all_filters(&mut self) {
        self.active.clear();
    }

    pub fn is_active(&self, kind: &str, value: &str) -> bool {
        self.active.iter().any(|filter| filter.matches(kind, value))
    }

    /// Active values of one dimension, insertion order.
    pub fn values_for<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.active
            .iter()
            .filter(move |filter| filter.kind == kind)
            .map(|filter| filter.value.as_str())
    }

    /// Active `(type, value)` pairs, insertion order.
    pub fn keys(&self) -> impl Iterator<Item = (&str, &str)> {
        self.active
            .iter()
            .map(|filter| (filter.kind.as_str(), filter.value.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_follows_pending_fields() {
        let mut session = FilterSession::new();
        assert_eq!(session.state(), SessionState::Idle);
        session.set_pending_type("ward");
        assert_eq!(session.state(), SessionState::TypeChosen);
        session.set_pending_value("icu");
        assert_eq!(session.state(), SessionState::Ready);
        session.set_pending_type("sex");
        assert_eq!(session.state(), SessionState::TypeChosen);
        assert_eq!(session.pending_value(), "");
    }

    #[test]
    fn value_without_type_stays_idle() {
        let catalog = FilterCatalog::ghana_amu();
        let mut session = FilterSession::new();
        session.set_pending_value("male");
        assert_eq!(session.state(), SessionState::Idle);
        assert_eq!(session.add_filter(&catalog), AddOutcome::Incomplete);
        assert!(session.active_filters().is_empty());
        assert_eq!(session.pending_value(), "male");
    }

    #[test]
    fn duplicate_keeps_pending_selection() {
        let catalog = FilterCatalog::ghana_amu();
        let mut session = FilterSession::new();
        session.set_pending_type("sex");
        session.set_pending_value("female");
        assert_eq!(session.add_filter(&catalog), AddOutcome::Added);

        session.set_pending_type("sex");
        session.set_pending_value("female");
        assert_eq!(session.add_filter(&catalog), AddOutcome::Duplicate);
        assert_eq!(session.active_filters().len(), 1);
        assert_eq!(session.state(), SessionState::Ready);
    }

    #[test]
    fn values_for_collects_one_dimension() {
        let catalog = FilterCatalog::ghana_amu();
        let mut session = FilterSession::new();
        for (kind, value) in [("year", "2021"), ("sex", "male"), ("year", "2023")] {
            session.set_pending_type(kind);
            session.set_pending_value(value);
            session.add_filter(&catalog);
        }
        let years: Vec<&str> = session.values_for("year").collect();
        assert_eq!(years, ["2021", "2023"]);
        assert!(session.is_active("sex", "male"));
        assert!(!session.is_active("sex", "female"));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "out of range")]
    fn stale_index_panics_in_debug() {
        let mut session = FilterSession::new();
        session.remove_filter(0);
    }

    #[test]
    fn session_serializes_with_type_field() {
        let catalog = FilterCatalog::ghana_amu();
        let mut session = FilterSession::new();
        session.set_pending_type("aware_category");
        session.set_pending_value("watch");
        session.add_filter(&catalog);

        let json = serde_json::to_value(&session).expect("session serializes");
        assert_eq!(json["active"][0]["type"], "aware_category");
        assert_eq!(json["active"][0]["label"], "AWaRe Category: Watch");
    }
}
