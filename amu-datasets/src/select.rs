//! Strategies that pick which variant of a view to display.

use amu_core::ActiveFilter;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::view::{DashboardView, DatasetVariant};

/// Picks the variant a view shows for the current active filters.
pub trait VariantSelector {
    fn select<'v>(
        &self,
        view: &'v DashboardView,
        active: &[ActiveFilter],
    ) -> Option<&'v DatasetVariant>;
}

/// First matching variant in declaration order, else the aggregate.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstMatch;

impl VariantSelector for FirstMatch {
    fn select<'v>(
        &self,
        view: &'v DashboardView,
        active: &[ActiveFilter],
    ) -> Option<&'v DatasetVariant> {
        view.variants
            .iter()
            .find(|variant| variant.matches(active))
            .or_else(|| fallback(view))
    }
}

/// Matching variant with the most requirements, else the aggregate.
/// Ties go to the variant declared first.
#[derive(Debug, Clone, Copy, Default)]
pub struct MostSpecific;

impl VariantSelector for MostSpecific {
    fn select<'v>(
        &self,
        view: &'v DashboardView,
        active: &[ActiveFilter],
    ) -> Option<&'v DatasetVariant> {
        let mut best: Option<&DatasetVariant> = None;
        for variant in view.variants.iter().filter(|variant| variant.matches(active)) {
            if best.map_or(true, |current| variant.when.len() > current.when.len()) {
                best = Some(variant);
            }
        }
        best.or_else(|| fallback(view))
    }
}

fn fallback(view: &DashboardView) -> Option<&DatasetVariant> {
    debug!("no filtered variant of `{}` matches, using aggregate", view.id);
    view.aggregate()
}

/// Named selection strategy, for configuration files and JS callers.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStrategy {
    #[default]
    FirstMatch,
    MostSpecific,
}

impl VariantSelector for SelectionStrategy {
    fn select<'v>(
        &self,
        view: &'v DashboardView,
        active: &[ActiveFilter],
    ) -> Option<&'v DatasetVariant> {
        match self {
            SelectionStrategy::FirstMatch => FirstMatch.select(view, active),
            SelectionStrategy::MostSpecific => MostSpecific.select(view, active),
        }
    }
}

impl std::str::FromStr for SelectionStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first_match" | "first-match" => Ok(SelectionStrategy::FirstMatch),
            "most_specific" | "most-specific" => Ok(SelectionStrategy::MostSpecific),
            other => Err(format!("unknown selection strategy `{other}`")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::{ChartData, ChartKind, Series};
    use amu_core::{session_with, FilterCatalog};

    fn chart(title: &str, value: f64) -> ChartData {
        ChartData::new(
            ChartKind::Bar,
            title,
            &["Access"],
            vec![Series::new("Share", vec![value])],
        )
    }

    fn view() -> DashboardView {
        DashboardView {
            id: "aware".into(),
            title: "AWaRe".into(),
            variants: vec![
                DatasetVariant::aggregate(chart("national", 40.0)),
                DatasetVariant::when(&[("hospital", "eastern_regional")], chart("eastern", 45.0)),
                DatasetVariant::when(
                    &[("hospital", "eastern_regional"), ("year", "2023")],
                    chart("eastern 2023", 47.0),
                ),
            ],
        }
    }

    fn active(pairs: &[(&str, &str)]) -> Vec<ActiveFilter> {
        session_with(&FilterCatalog::ghana_amu(), pairs)
            .active_filters()
            .to_vec()
    }

    #[test]
    fn no_filters_selects_aggregate() {
        let view = view();
        let picked = FirstMatch.select(&view, &[]).expect("aggregate exists");
        assert_eq!(picked.data.title, "national");
    }

    #[test]
    fn first_match_takes_declaration_order() {
        let view = view();
        let filters = active(&[("year", "2023"), ("hospital", "eastern_regional")]);
        let picked = FirstMatch.select(&view, &filters).expect("variant");
        assert_eq!(picked.data.title, "eastern");
    }

    #[test]
    fn most_specific_prefers_larger_requirement_set() {
        let view = view();
        let filters = active(&[("year", "2023"), ("hospital", "eastern_regional")]);
        let picked = MostSpecific.select(&view, &filters).expect("variant");
        assert_eq!(picked.data.title, "eastern 2023");
    }

    #[test]
    fn unrelated_filters_fall_back_to_aggregate() {
        let view = view();
        let filters = active(&[("sex", "female")]);
        let picked = SelectionStrategy::MostSpecific
            .select(&view, &filters)
            .expect("aggregate");
        assert!(picked.is_aggregate());
    }

    #[test]
    fn view_without_aggregate_can_select_nothing() {
        let mut view = view();
        view.variants.remove(0);
        assert!(FirstMatch.select(&view, &[]).is_none());
    }

    #[test]
    fn strategy_parses_both_spellings() {
        assert_eq!(
            "most-specific".parse::<SelectionStrategy>(),
            Ok(SelectionStrategy::MostSpecific)
        );
        assert_eq!(
            "first_match".parse::<SelectionStrategy>(),
            Ok(SelectionStrategy::FirstMatch)
        );
        assert!("best".parse::<SelectionStrategy>().is_err());
    }
}
