//! Pre-baked Ghana point prevalence survey figures.
//!
//! Percentages are published survey constants; nothing here is computed.

use crate::chart::{ChartData, ChartKind, Series};
use crate::view::{DashboardView, DatasetVariant};

const EASTERN: (&str, &str) = ("hospital", "eastern_regional");

const AWARE_LABELS: &[&str] = &["Access", "Watch", "Reserve", "Not Recommended"];
const INDICATION_LABELS: &[&str] = &[
    "Community-Acquired Infection",
    "Hospital-Acquired Infection",
    "Surgical Prophylaxis",
    "Medical Prophylaxis",
    "Unknown",
];
const QUALITY_LABELS: &[&str] = &[
    "Reason in notes",
    "Guideline compliant",
    "Stop/review date",
    "Culture taken",
    "Targeted therapy",
];

pub(crate) fn views() -> Vec<DashboardView> {
    vec![
        prevalence(),
        aware(),
        atc_class(),
        indication(),
        prophylaxis(),
        diagnosis(),
        quality(),
    ]
}

fn single(kind: ChartKind, title: &str, labels: &[&str], name: &str, values: &[f64]) -> ChartData {
    ChartData::new(kind, title, labels, vec![Series::new(name, values.to_vec())])
}

fn prevalence() -> DashboardView {
    let labels = &["On antimicrobials", "Not on antimicrobials"];
    let chart = |title: &str, values: &[f64]| {
        single(ChartKind::Donut, title, labels, "Patients (%)", values)
    };
    DashboardView {
        id: "prevalence".into(),
        title: "AMU Prevalence".into(),
        variants: vec![
            DatasetVariant::aggregate(chart("AMU prevalence, national", &[55.3, 44.7])),
            DatasetVariant::when(
                &[EASTERN],
                chart("AMU prevalence, Eastern Regional Hospital", &[61.2, 38.8]),
            ),
            DatasetVariant::when(
                &[EASTERN, ("year", "2023")],
                chart("AMU prevalence, Eastern Regional Hospital 2023", &[63.5, 36.5]),
            ),
            DatasetVariant::when(
                &[("hospital", "korle_bu")],
                chart("AMU prevalence, Korle-Bu Teaching Hospital", &[51.4, 48.6]),
            ),
            DatasetVariant::when(
                &[("ward", "icu")],
                chart("AMU prevalence, intensive care", &[78.9, 21.1]),
            ),
        ],
    }
}

fn aware() -> DashboardView {
    let chart = |title: &str, values: &[f64]| {
        single(ChartKind::Bar, title, AWARE_LABELS, "Prescriptions (%)", values)
    };
    DashboardView {
        id: "aware".into(),
        title: "AWaRe Classification".into(),
        variants: vec![
            DatasetVariant::aggregate(chart("AWaRe use, national", &[39.8, 57.1, 0.6, 2.5])),
            DatasetVariant::when(
                &[EASTERN],
                chart("AWaRe use, Eastern Regional Hospital", &[45.2, 52.3, 0.0, 2.5]),
            ),
            DatasetVariant::when(
                &[("ward", "icu")],
                chart("AWaRe use, intensive care", &[22.4, 71.8, 3.9, 1.9]),
            ),
        ],
    }
}

fn atc_class() -> DashboardView {
    let labels = &["J01D", "J01C", "P01A", "J01M", "J01F", "J01G", "J01X"];
    let chart = |title: &str, values: &[f64]| {
        single(ChartKind::Bar, title, labels, "Prescriptions (%)", values)
    };
    DashboardView {
        id: "atc_class".into(),
        title: "ATC Classification".into(),
        variants: vec![
            DatasetVariant::aggregate(chart(
                "ATC classes, national",
                &[31.4, 22.7, 15.8, 9.6, 7.2, 6.1, 7.2],
            )),
            DatasetVariant::when(
                &[EASTERN],
                chart(
                    "ATC classes, Eastern Regional Hospital",
                    &[27.9, 26.3, 18.1, 8.4, 6.5, 5.2, 7.6],
                ),
            ),
        ],
    }
}

fn indication() -> DashboardView {
    let chart = |title: &str, values: &[f64]| {
        single(ChartKind::Donut, title, INDICATION_LABELS, "Prescriptions (%)", values)
    };
    DashboardView {
        id: "indication".into(),
        title: "Indication".into(),
        variants: vec![
            DatasetVariant::aggregate(chart(
                "Indication, national",
                &[51.6, 11.4, 24.9, 8.3, 3.8],
            )),
            DatasetVariant::when(
                &[EASTERN],
                chart(
                    "Indication, Eastern Regional Hospital",
                    &[48.2, 9.7, 29.5, 9.1, 3.5],
                ),
            ),
        ],
    }
}

fn prophylaxis() -> DashboardView {
    let labels = &["Surgical prophylaxis", "Medical prophylaxis"];
    let chart = |title: &str, single_dose: [f64; 2], one_day: [f64; 2], longer: [f64; 2]| {
        ChartData::new(
            ChartKind::StackedBar,
            title,
            labels,
            vec![
                Series::new("Single dose", single_dose.to_vec()),
                Series::new("One day", one_day.to_vec()),
                Series::new("More than one day", longer.to_vec()),
            ],
        )
    };
    DashboardView {
        id: "prophylaxis".into(),
        title: "Prophylaxis Duration".into(),
        variants: vec![
            DatasetVariant::aggregate(chart(
                "Prophylaxis duration, national",
                [14.2, 21.0],
                [9.5, 17.3],
                [76.3, 61.7],
            )),
            DatasetVariant::when(
                &[EASTERN],
                chart(
                    "Prophylaxis duration, Eastern Regional Hospital",
                    [11.8, 19.4],
                    [7.6, 15.9],
                    [80.6, 64.7],
                ),
            ),
        ],
    }
}

fn diagnosis() -> DashboardView {
    let labels = &[
        "Pneumonia",
        "Skin & soft tissue",
        "Sepsis",
        "Urinary tract",
        "Gastrointestinal",
        "Obstetric/gynaecological",
    ];
    let chart = |title: &str, values: &[f64]| {
        single(ChartKind::Bar, title, labels, "Patients (%)", values)
    };
    DashboardView {
        id: "diagnosis".into(),
        title: "Diagnosis".into(),
        variants: vec![
            DatasetVariant::aggregate(chart(
                "Top diagnoses, national",
                &[18.7, 14.3, 12.9, 9.8, 8.6, 7.4],
            )),
            DatasetVariant::when(
                &[("ward", "paediatric")],
                chart(
                    "Top diagnoses, paediatric wards",
                    &[27.5, 9.1, 21.3, 6.2, 12.8, 0.0],
                ),
            ),
        ],
    }
}

fn quality() -> DashboardView {
    let national = [62.4, 48.1, 27.6, 11.9, 6.3];
    DashboardView {
        id: "quality".into(),
        title: "Prescribing Quality".into(),
        variants: vec![
            DatasetVariant::aggregate(single(
                ChartKind::Radar,
                "Quality indicators, national",
                QUALITY_LABELS,
                "National (%)",
                &national,
            )),
            DatasetVariant::when(
                &[EASTERN],
                ChartData::new(
                    ChartKind::Radar,
                    "Quality indicators, Eastern Regional Hospital",
                    QUALITY_LABELS,
                    vec![
                        Series::new(
                            "Eastern Regional Hospital (%)",
                            vec![58.0, 52.7, 31.4, 8.2, 4.9],
                        ),
                        Series::new("National (%)", national.to_vec()),
                    ],
                ),
            ),
        ],
    }
}
