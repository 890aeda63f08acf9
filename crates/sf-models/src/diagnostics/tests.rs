//! Tests for fit diagnostics

use approx::assert_abs_diff_eq;

use super::*;
use crate::ols::OlsModel;
use sf_core::data::{RawTable, TableBuilder};
use sf_core::schema::{inspect, InspectConfig};
use sf_core::spec::SpecBuilder;

fn fit(table: &RawTable, predictors: &[&str]) -> crate::ols::FittedOls {
    let profiles = inspect(table, &InspectConfig::default());
    let spec = SpecBuilder::new()
        .response("y")
        .predictors(predictors.iter().copied())
        .build(&profiles)
        .unwrap();

    OlsModel::new(spec).fit(table).unwrap()
}

fn well_conditioned_table() -> RawTable {
    let n = 40;
    let x: Vec<f64> = (0..n).map(|i| (i as f64) - 20.0).collect();
    let y: Vec<f64> = x.iter().map(|&v| 1.0 + 0.5 * v + (v * 0.7).sin()).collect();

    TableBuilder::new()
        .with_numbers("x", x)
        .unwrap()
        .with_numbers("y", y)
        .unwrap()
        .build()
        .unwrap()
}

fn near_collinear_table() -> RawTable {
    let n = 40;
    let x1: Vec<f64> = (0..n).map(|i| i as f64).collect();
    // Almost identical to x1
    let x2: Vec<f64> = x1.iter().map(|&v| v + 1e-3 * (v * 3.3).sin()).collect();
    let y: Vec<f64> = x1.iter().map(|&v| 2.0 * v + (v * 1.3).cos()).collect();

    TableBuilder::new()
        .with_numbers("x1", x1)
        .unwrap()
        .with_numbers("x2", x2)
        .unwrap()
        .with_numbers("y", y)
        .unwrap()
        .build()
        .unwrap()
}

// ==================== Severity Classification ====================

#[test]
fn test_classify_condition_number() {
    assert_eq!(
        ConditionSeverity::classify(10.0),
        ConditionSeverity::WellConditioned
    );
    assert_eq!(ConditionSeverity::classify(50.0), ConditionSeverity::Moderate);
    assert_eq!(ConditionSeverity::classify(500.0), ConditionSeverity::High);
    assert_eq!(ConditionSeverity::classify(5000.0), ConditionSeverity::Severe);
    assert_eq!(
        ConditionSeverity::classify(f64::INFINITY),
        ConditionSeverity::Severe
    );

    assert!(ConditionSeverity::Severe
        .description()
        .contains("collinearity"));
}

// ==================== Flags ====================

#[test]
fn test_well_conditioned_fit() {
    let table = well_conditioned_table();
    let fitted = fit(&table, &["x"]);

    let report = diagnose(&fitted, &DiagnosticsConfig::default());

    assert!(report.condition_number.is_finite());
    assert!(report.condition_number >= 1.0);
    assert!(!report.near_collinear);
    assert!(!report.insufficient_observations);
}

#[test]
fn test_near_collinear_fit_is_flagged() {
    let table = near_collinear_table();
    let fitted = fit(&table, &["x1", "x2"]);

    let report = diagnose(&fitted, &DiagnosticsConfig::default());

    assert!(report.near_collinear);
    assert!(report.condition_number > 1000.0);
    assert_eq!(report.severity, ConditionSeverity::Severe);
}

#[test]
fn test_insufficient_observations_flag() {
    // 8 observations, 2 terms: df = 6, under the default minimum of 10
    let table = TableBuilder::new()
        .with_numbers("x", vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0])
        .unwrap()
        .with_numbers("y", vec![1.1, 2.3, 2.9, 4.2, 5.1, 5.8, 7.2, 7.9])
        .unwrap()
        .build()
        .unwrap();
    let fitted = fit(&table, &["x"]);

    let report = diagnose(&fitted, &DiagnosticsConfig::default());
    assert!(report.insufficient_observations);

    let relaxed = DiagnosticsConfig {
        min_residual_df: 5,
        ..DiagnosticsConfig::default()
    };
    let report = diagnose(&fitted, &relaxed);
    assert!(!report.insufficient_observations);
}

#[test]
fn test_condition_threshold_is_configurable() {
    let table = well_conditioned_table();
    let fitted = fit(&table, &["x"]);

    let strict = DiagnosticsConfig {
        condition_threshold: 1.0,
        ..DiagnosticsConfig::default()
    };
    let report = diagnose(&fitted, &strict);
    assert!(report.near_collinear);
}

// ==================== Q–Q Points ====================

#[test]
fn test_qq_points_are_ordered() {
    let table = well_conditioned_table();
    let fitted = fit(&table, &["x"]);

    let report = diagnose(&fitted, &DiagnosticsConfig::default());
    let qq = &report.normal_qq;

    assert_eq!(qq.len(), fitted.residuals().len());

    for pair in qq.windows(2) {
        assert!(pair[0].theoretical <= pair[1].theoretical);
        assert!(pair[0].sample <= pair[1].sample);
    }

    // Blom positions are symmetric around zero
    let first = qq.first().unwrap().theoretical;
    let last = qq.last().unwrap().theoretical;
    assert_abs_diff_eq!(first, -last, epsilon = 1e-10);
}

#[test]
fn test_diagnostics_serializes() {
    let table = well_conditioned_table();
    let fitted = fit(&table, &["x"]);

    let report = diagnose(&fitted, &DiagnosticsConfig::default());
    let json = serde_json::to_string(&report).unwrap();

    assert!(json.contains("condition_number"));
    assert!(json.contains("normal_qq"));
}
