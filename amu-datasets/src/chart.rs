//! Chart-ready data shapes handed to the charting layer.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::DatasetError;

/// Chart families used across the dashboards.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Donut,
    Bar,
    Radar,
    StackedBar,
}

impl ChartKind {
    /// Donuts color each slice; other charts color each series.
    pub fn colors_categories(self) -> bool {
        matches!(self, ChartKind::Donut)
    }
}

/// One named row of values, aligned with [`ChartData::labels`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Series {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            values,
            color: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartData {
    pub kind: ChartKind,
    pub title: String,
    pub labels: Vec<String>,
    pub series: Vec<Series>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub category_colors: Vec<String>,
}

impl ChartData {
    pub fn new(
        kind: ChartKind,
        title: impl Into<String>,
        labels: &[&str],
        series: Vec<Series>,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            labels: labels.iter().map(|label| label.to_string()).collect(),
            series,
            category_colors: Vec::new(),
        }
    }

    /// Checks that every series has one value per label.
    pub fn validate(&self) -> Result<(), DatasetError> {
        for series in &self.series {
            if series.values.len() != self.labels.len() {
                return Err(DatasetError::LengthMismatch {
                    chart: self.title.clone(),
                    series: series.name.clone(),
                    expected: self.labels.len(),
                    actual: series.values.len(),
                });
            }
        }
        Ok(())
    }

    /// Replaces category labels through `names`; unmapped labels are kept.
    pub fn relabel(mut self, names: &HashMap<String, String>) -> Self {
        for label in &mut self.labels {
            if let Some(name) = names.get(label.as_str()) {
                *label = name.clone();
            }
        }
        self
    }

    /// Assigns palette colors cyclically, per slice for donuts and per
    /// series otherwise. An empty palette leaves colors untouched.
    pub fn recolor(mut self, palette: &[String]) -> Self {
        if palette.is_empty() {
            return self;
        }
        if self.kind.colors_categories() {
            self.category_colors = palette
                .iter()
                .cycle()
                .take(self.labels.len())
                .cloned()
                .collect();
        } else {
            for (series, color) in self.series.iter_mut().zip(palette.iter().cycle()) {
                series.color = Some(color.clone());
            }
        }
        self
    }

    /// Per-category sum across all series.
    pub fn totals(&self) -> Vec<f64> {
        (0..self.labels.len())
            .map(|index| {
                self.series
                    .iter()
                    .filter_map(|series| series.values.get(index))
                    .sum()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prophylaxis() -> ChartData {
        ChartData::new(
            ChartKind::StackedBar,
            "Prophylaxis duration",
            &["Surgical", "Medical"],
            vec![
                Series::new("Single dose", vec![18.0, 30.0]),
                Series::new("More than one day", vec![82.0, 70.0]),
            ],
        )
    }

    #[test]
    fn totals_sum_each_category() {
        assert_eq!(prophylaxis().totals(), vec![100.0, 100.0]);
    }

    #[test]
    fn short_series_fails_validation() {
        let mut chart = prophylaxis();
        chart.series[1].values.pop();
        let err = chart.validate().unwrap_err();
        assert!(matches!(
            err,
            DatasetError::LengthMismatch {
                expected: 2,
                actual: 1,
                ..
            }
        ));
    }

    #[test]
    fn relabel_keeps_unknown_labels() {
        let names = HashMap::from([("Surgical".to_string(), "SP".to_string())]);
        let chart = prophylaxis().relabel(&names);
        assert_eq!(chart.labels, ["SP", "Medical"]);
    }

    #[test]
    fn recolor_cycles_over_series() {
        let palette = vec!["#111111".to_string()];
        let chart = prophylaxis().recolor(&palette);
        assert!(chart
            .series
            .iter()
            .all(|series| series.color.as_deref() == Some("#111111")));
        assert!(chart.category_colors.is_empty());
    }

    #[test]
    fn recolor_donut_colors_slices() {
        let chart = ChartData::new(
            ChartKind::Donut,
            "AWaRe",
            &["Access", "Watch", "Reserve"],
            vec![Series::new("Share", vec![40.0, 59.0, 1.0])],
        )
        .recolor(&["#0a0".to_string(), "#fa0".to_string()]);
        assert_eq!(chart.category_colors, ["#0a0", "#fa0", "#0a0"]);
        assert_eq!(chart.series[0].color, None);
    }
}
