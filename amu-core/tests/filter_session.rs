use std::fs;

use amu_core::{
    session_with, AddOutcome, CatalogError, FilterCatalog, FilterConfig, FilterOption,
    FilterSession, SessionState,
};
use proptest::prelude::*;

fn fixture_path(name: &str) -> String {
    format!("{}/tests/data/{name}", env!("CARGO_MANIFEST_DIR"))
}

fn korle_bu_catalog() -> FilterCatalog {
    FilterCatalog::new(vec![FilterConfig::new(
        "hospital",
        "Hospital",
        vec![FilterOption::new("korle_bu", "Korle-Bu Teaching Hospital")],
    )])
    .expect("valid catalog")
}

#[test]
fn adding_a_known_filter_builds_its_chip_and_resets_pending() {
    let catalog = korle_bu_catalog();
    let mut session = FilterSession::new();
    session.set_pending_type("hospital");
    session.set_pending_value("korle_bu");

    assert_eq!(session.add_filter(&catalog), AddOutcome::Added);

    let active = session.active_filters();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].kind, "hospital");
    assert_eq!(active[0].value, "korle_bu");
    assert_eq!(active[0].label, "Hospital: Korle-Bu Teaching Hospital");
    assert_eq!(session.pending_type(), "");
    assert_eq!(session.pending_value(), "");
    assert_eq!(session.state(), SessionState::Idle);
}

#[test]
fn adding_again_with_empty_pending_changes_nothing() {
    let catalog = korle_bu_catalog();
    let mut session = session_with(&catalog, &[("hospital", "korle_bu")]);
    let before = session.clone();

    assert_eq!(session.add_filter(&catalog), AddOutcome::Incomplete);
    assert_eq!(session, before);
}

#[test]
fn removing_first_filter_shifts_second_to_front() {
    let catalog = FilterCatalog::ghana_amu();
    let mut session = session_with(&catalog, &[("ward", "icu"), ("year", "2022")]);

    let removed = session.remove_filter(0).expect("index in range");
    assert_eq!(removed.value, "icu");

    let active = session.active_filters();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].kind, "year");
    assert_eq!(active[0].label, "Year: 2022");
}

#[test]
fn clearing_keeps_pending_selection() {
    let catalog = FilterCatalog::ghana_amu();
    let mut session = session_with(&catalog, &[("sex", "male"), ("ward", "surgical")]);
    session.set_pending_type("specimen");
    session.set_pending_value("blood");

    session.clear_all_filters();

    assert!(session.active_filters().is_empty());
    assert_eq!(session.pending_type(), "specimen");
    assert_eq!(session.pending_value(), "blood");
}

#[test]
fn unknown_selections_get_fallback_chips() {
    let catalog = korle_bu_catalog();
    let session = session_with(
        &catalog,
        &[("hospital", "unknown_value"), ("nonexistent_type", "x")],
    );
    let labels: Vec<&str> = session
        .active_filters()
        .iter()
        .map(|filter| filter.label.as_str())
        .collect();
    assert_eq!(labels, ["Hospital: unknown_value", "nonexistent_type: x"]);
}

#[test]
fn alternate_catalog_loads_from_json() {
    let json = fs::read_to_string(fixture_path("animal_health_catalog.json"))
        .expect("cannot read catalog fixture");
    let catalog = FilterCatalog::from_json_str(&json).expect("catalog is valid");

    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.list_values("species")[2].label, "Sheep & Goats");
    assert_eq!(catalog.describe("region", "ashanti"), "Region: Ashanti");
    assert!(catalog.list_values("hospital").is_empty());
}

#[test]
fn json_catalog_with_duplicate_types_is_rejected() {
    let json = fs::read_to_string(fixture_path("duplicate_type_catalog.json"))
        .expect("cannot read catalog fixture");
    assert_eq!(
        FilterCatalog::from_json_str(&json),
        Err(CatalogError::DuplicateType("region".into()))
    );
    assert!(serde_json::from_str::<FilterCatalog>(&json).is_err());
}

#[test]
fn malformed_json_is_a_parse_error() {
    assert!(matches!(
        FilterCatalog::from_json_str("{not json"),
        Err(CatalogError::Parse(_))
    ));
}

fn arb_catalog() -> impl Strategy<Value = FilterCatalog> {
    prop::collection::btree_map(
        "[a-z_]{1,8}",
        (
            "[A-Z][a-z]{0,8}",
            prop::collection::btree_map("[a-z0-9]{1,6}", "[A-Za-z ]{1,12}", 0..5),
        ),
        0..6,
    )
    .prop_map(|dimensions| {
        let configs = dimensions
            .into_iter()
            .map(|(kind, (label, options))| {
                let options = options
                    .into_iter()
                    .map(|(value, label)| FilterOption::new(value, label))
                    .collect();
                FilterConfig::new(kind, label, options)
            })
            .collect();
        FilterCatalog::new(configs).expect("keys are unique")
    })
}

fn arb_pairs() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec(("[a-c]", "[x-z]"), 0..12)
}

proptest! {
    #[test]
    fn unknown_type_has_no_values(catalog in arb_catalog(), kind in "[A-Z]{1,6}") {
        // generated types are lowercase, so an uppercase type never exists
        prop_assert!(catalog.list_values(&kind).is_empty());
    }

    #[test]
    fn list_types_mirrors_catalog_order(catalog in arb_catalog()) {
        let types = catalog.list_types();
        prop_assert_eq!(types.len(), catalog.len());
        for (option, config) in types.iter().zip(catalog.configs()) {
            prop_assert_eq!(&option.value, &config.kind);
            prop_assert_eq!(&option.label, &config.label);
        }
    }

    #[test]
    fn repeated_add_commits_once(kind in "[a-z]{1,6}", value in "[a-z]{1,6}") {
        let catalog = FilterCatalog::ghana_amu();
        let mut session = FilterSession::new();
        session.set_pending_type(kind.clone());
        session.set_pending_value(value.clone());
        session.add_filter(&catalog);
        session.add_filter(&catalog);
        session.set_pending_type(kind.clone());
        session.set_pending_value(value.clone());
        session.add_filter(&catalog);

        let matching = session
            .active_filters()
            .iter()
            .filter(|filter| filter.matches(&kind, &value))
            .count();
        prop_assert_eq!(matching, 1);
    }

    #[test]
    fn active_pairs_stay_unique(pairs in arb_pairs()) {
        let catalog = FilterCatalog::empty();
        let refs: Vec<(&str, &str)> = pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        let session = session_with(&catalog, &refs);
        let keys: Vec<(&str, &str)> = session.keys().collect();
        for (i, key) in keys.iter().enumerate() {
            prop_assert!(!keys[i + 1..].contains(key));
        }
    }

    #[test]
    fn clear_always_empties(pairs in arb_pairs()) {
        let catalog = FilterCatalog::empty();
        let refs: Vec<(&str, &str)> = pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        let mut session = session_with(&catalog, &refs);
        session.clear_all_filters();
        prop_assert!(session.active_filters().is_empty());
    }

    #[test]
    fn remove_drops_exactly_one(pairs in arb_pairs(), pick in any::<prop::sample::Index>()) {
        let catalog = FilterCatalog::empty();
        let refs: Vec<(&str, &str)> = pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        let mut session = session_with(&catalog, &refs);
        prop_assume!(!session.active_filters().is_empty());

        let before = session.active_filters().to_vec();
        let index = pick.index(before.len());
        session.remove_filter(index);

        let mut expected = before;
        expected.remove(index);
        prop_assert_eq!(session.active_filters(), expected.as_slice());
    }

    #[test]
    fn changing_type_always_clears_value(first in "[a-z]{0,6}", value in "[a-z]{0,6}", second in "[a-z]{0,6}") {
        let mut session = FilterSession::new();
        session.set_pending_type(first);
        session.set_pending_value(value);
        session.set_pending_type(second);
        prop_assert_eq!(session.pending_value(), "");
    }
}
