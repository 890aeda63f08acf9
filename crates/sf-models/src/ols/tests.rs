//! Tests for the OLS regression engine

use approx::assert_abs_diff_eq;
use rand_distr::Distribution;

use super::*;
use sf_core::data::{Cell, TableBuilder};
use sf_core::schema::{inspect, InspectConfig};
use sf_core::spec::{MissingPolicy, SpecBuilder};

// ==================== Test Fixtures ====================

/// Simple linear relationship: y = 1 + 2x
fn simple_linear_table() -> sf_core::data::RawTable {
    TableBuilder::new()
        .with_numbers("x", vec![1.0, 2.0, 3.0, 4.0, 5.0])
        .unwrap()
        .with_numbers("y", vec![3.0, 5.0, 7.0, 9.0, 11.0])
        .unwrap()
        .build()
        .unwrap()
}

/// Multiple regression: y = 1 + 2x1 + 3x2
fn multiple_regression_table() -> sf_core::data::RawTable {
    TableBuilder::new()
        .with_numbers("x1", vec![1.0, 2.0, 3.0, 4.0, 5.0])
        .unwrap()
        .with_numbers("x2", vec![2.0, 3.0, 5.0, 4.0, 7.0])
        .unwrap()
        .with_numbers("y", vec![9.0, 14.0, 22.0, 21.0, 32.0])
        .unwrap()
        .build()
        .unwrap()
}

/// Realistic dataset with some noise
fn noisy_table() -> sf_core::data::RawTable {
    let n = 100;
    let mut rng = rand::rng();
    let noise = rand_distr::Normal::new(0.0, 0.1).unwrap();

    let mut x1 = Vec::new();
    let mut x2 = Vec::new();
    let mut y = Vec::new();

    for i in 0..n {
        let x1_val = i as f64 * 0.1;
        let x2_val = (i as f64).sin();
        let y_val = 1.0 + 2.0 * x1_val + 3.0 * x2_val + noise.sample(&mut rng);

        x1.push(x1_val);
        x2.push(x2_val);
        y.push(y_val);
    }

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

fn fit_model(
    table: &sf_core::data::RawTable,
    predictors: &[&str],
    intercept: bool,
) -> Result<FittedOls> {
    let profiles = inspect(table, &InspectConfig::default());
    let spec = SpecBuilder::new()
        .response("y")
        .predictors(predictors.iter().copied())
        .intercept(intercept)
        .build(&profiles)
        .unwrap();

    OlsModel::new(spec).fit(table)
}

// ==================== Basic Tests ====================

#[test]
fn test_basic_fit() {
    let table = simple_linear_table();
    let fitted = fit_model(&table, &["x"], true).unwrap();

    let coeffs = fitted.coefficients();
    assert_eq!(coeffs.len(), 2);
    assert_eq!(fitted.response(), "y");
    assert_eq!(fitted.singular_values().len(), 2);

    // Should recover y = 1 + 2x
    assert_abs_diff_eq!(coeffs[0], 1.0, epsilon = 1e-8);
    assert_abs_diff_eq!(coeffs[1], 2.0, epsilon = 1e-8);

    // Residuals of a perfect fit sum to zero
    assert_abs_diff_eq!(fitted.residuals().sum(), 0.0, epsilon = 1e-8);

    let stats = fitted.statistics();
    assert_abs_diff_eq!(stats.r_squared, 1.0, epsilon = 1e-8);
    assert_eq!(stats.n_obs, 5);
    assert_eq!(stats.df_residual, 3);
    assert_eq!(stats.df_model, 1);
}

#[test]
fn test_no_intercept_fit() {
    let table = TableBuilder::new()
        .with_numbers("x", vec![1.0, 2.0, 3.0, 4.0, 5.0])
        .unwrap()
        .with_numbers("y", vec![2.0, 4.0, 6.0, 8.0, 10.0])
        .unwrap()
        .build()
        .unwrap();

    let fitted = fit_model(&table, &["x"], false).unwrap();

    let coeffs = fitted.coefficients();
    assert_eq!(coeffs.len(), 1);
    assert_abs_diff_eq!(coeffs[0], 2.0, epsilon = 1e-8);

    let stats = fitted.statistics();
    assert_eq!(stats.df_model, 1);
    assert_eq!(stats.df_residual, 4);
    assert_abs_diff_eq!(stats.r_squared, 1.0, epsilon = 1e-8);
}

#[test]
fn test_multiple_predictors() {
    let table = multiple_regression_table();
    let fitted = fit_model(&table, &["x1", "x2"], true).unwrap();

    let coeffs = fitted.coefficients();
    assert_eq!(coeffs.len(), 3);
    assert_abs_diff_eq!(coeffs[0], 1.0, epsilon = 1e-8);
    assert_abs_diff_eq!(coeffs[1], 2.0, epsilon = 1e-8);
    assert_abs_diff_eq!(coeffs[2], 3.0, epsilon = 1e-8);
}

#[test]
fn test_categorical_predictor() {
    let table = TableBuilder::new()
        .with_texts("group", &["A", "A", "B", "B", "C", "C"])
        .unwrap()
        .with_numbers("y", vec![1.0, 1.2, 2.0, 2.2, 3.0, 3.2])
        .unwrap()
        .build()
        .unwrap();

    let fitted = fit_model(&table, &["group"], true).unwrap();

    // Intercept + two indicator terms
    assert_eq!(fitted.coefficients().len(), 3);
    assert_eq!(
        fitted.design().term_names(),
        &["(Intercept)", "group[B]", "group[C]"]
    );

    // Group means: A = 1.1, B = 2.1, C = 3.1
    assert_abs_diff_eq!(fitted.coefficients()[0], 1.1, epsilon = 1e-8);
    assert_abs_diff_eq!(fitted.coefficients()[1], 1.0, epsilon = 1e-8);
    assert_abs_diff_eq!(fitted.coefficients()[2], 2.0, epsilon = 1e-8);
}

// ==================== Missing Data ====================

#[test]
fn test_drop_row_reduces_n() {
    let table = TableBuilder::new()
        .with_column(
            "x",
            vec![
                Cell::Number(1.0),
                Cell::Number(2.0),
                Cell::Number(3.0),
                Cell::Number(4.0),
                Cell::Number(5.0),
                Cell::Number(6.0),
            ],
        )
        .unwrap()
        .with_column(
            "y",
            vec![
                Cell::Number(3.0),
                Cell::Missing,
                Cell::Number(7.0),
                Cell::Number(9.0),
                Cell::Number(11.0),
                Cell::Number(13.0),
            ],
        )
        .unwrap()
        .build()
        .unwrap();

    let fitted = fit_model(&table, &["x"], true).unwrap();

    assert_eq!(fitted.statistics().n_obs, 5);
    assert_eq!(fitted.statistics().n_dropped, 1);
    assert_abs_diff_eq!(fitted.coefficients()[1], 2.0, epsilon = 1e-8);
}

#[test]
fn test_reject_policy_errors() {
    let table = TableBuilder::new()
        .with_numbers("x", vec![1.0, 2.0, 3.0, 4.0])
        .unwrap()
        .with_column(
            "y",
            vec![
                Cell::Number(3.0),
                Cell::Missing,
                Cell::Number(7.0),
                Cell::Number(9.0),
            ],
        )
        .unwrap()
        .build()
        .unwrap();

    let profiles = inspect(&table, &InspectConfig::default());
    let spec = SpecBuilder::new()
        .response("y")
        .predictor("x")
        .missing_policy(MissingPolicy::Reject)
        .build(&profiles)
        .unwrap();

    let result = OlsModel::new(spec).fit(&table);
    assert!(matches!(
        result,
        Err(ModelError::MissingData { column, n_missing })
            if column == "y" && n_missing == 1
    ));
}

// ==================== Error Handling ====================

#[test]
fn test_insufficient_data() {
    let table = TableBuilder::new()
        .with_numbers("x1", vec![1.0, 2.0])
        .unwrap()
        .with_numbers("x2", vec![3.0, 5.0])
        .unwrap()
        .with_numbers("y", vec![1.0, 2.0])
        .unwrap()
        .build()
        .unwrap();

    let result = fit_model(&table, &["x1", "x2"], true);

    match result {
        Err(ModelError::InsufficientData { n_obs, n_terms }) => {
            assert_eq!(n_obs, 2);
            assert_eq!(n_terms, 3);
        }
        other => panic!("expected InsufficientData, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_exact_n_equals_p_is_insufficient() {
    // n == p is unidentifiable for inference: df_residual would be zero
    let table = TableBuilder::new()
        .with_numbers("x", vec![1.0, 2.0])
        .unwrap()
        .with_numbers("y", vec![1.0, 2.0])
        .unwrap()
        .build()
        .unwrap();

    let result = fit_model(&table, &["x"], true);
    assert!(matches!(result, Err(ModelError::InsufficientData { .. })));
}

#[test]
fn test_perfect_collinearity() {
    let table = TableBuilder::new()
        .with_numbers("x1", vec![1.0, 2.0, 3.0, 4.0, 5.0])
        .unwrap()
        // x2 = 2 * x1
        .with_numbers("x2", vec![2.0, 4.0, 6.0, 8.0, 10.0])
        .unwrap()
        .with_numbers("y", vec![3.0, 6.0, 9.0, 12.0, 15.0])
        .unwrap()
        .build()
        .unwrap();

    let result = fit_model(&table, &["x1", "x2"], true);

    match result {
        Err(ModelError::SingularMatrix { condition_number }) => {
            assert!(condition_number > 1e8 || condition_number.is_infinite());
        }
        other => panic!("expected SingularMatrix, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_constant_predictor_with_intercept_is_singular() {
    let table = TableBuilder::new()
        .with_numbers("x", vec![1.0, 1.0, 1.0, 1.0, 1.0])
        .unwrap()
        .with_numbers("y", vec![2.0, 4.0, 6.0, 8.0, 10.0])
        .unwrap()
        .build()
        .unwrap();

    let result = fit_model(&table, &["x"], true);
    assert!(matches!(result, Err(ModelError::SingularMatrix { .. })));
}

// ==================== Statistics ====================

#[test]
fn test_statistics_on_noisy_data() {
    let table = noisy_table();
    let fitted = fit_model(&table, &["x1", "x2"], true).unwrap();

    let stats = fitted.statistics();

    assert!(stats.r_squared >= 0.0 && stats.r_squared <= 1.0);
    assert!(stats.adj_r_squared <= stats.r_squared);
    assert!(stats.residual_std_error > 0.0);
    assert!(stats.f_statistic.unwrap() > 0.0);
    let f_p = stats.f_p_value.unwrap();
    assert!((0.0..=1.0).contains(&f_p));
    assert!(stats.aic.is_finite());
    assert!(stats.bic.is_finite());
    assert_eq!(stats.df_residual, 97);

    // Coefficients should land near the generating equation
    assert_abs_diff_eq!(fitted.coefficients()[0], 1.0, epsilon = 0.15);
    assert_abs_diff_eq!(fitted.coefficients()[1], 2.0, epsilon = 0.05);
    assert_abs_diff_eq!(fitted.coefficients()[2], 3.0, epsilon = 0.05);

    // Strong predictors: tiny p-values
    let report = fitted.report();
    assert!(report.terms[1].p_value < 1e-6);
    assert!(report.terms[2].p_value < 1e-6);
}

#[test]
fn test_sum_of_squares_decomposition() {
    let table = noisy_table();
    let fitted = fit_model(&table, &["x1", "x2"], true).unwrap();

    let y = fitted.design().y();
    let mean = y.mean().unwrap();
    let sst: f64 = y.iter().map(|&v| (v - mean).powi(2)).sum();
    let rss: f64 = fitted.residuals().iter().map(|&r| r * r).sum();
    let ess = sst - rss;

    // SSR + (SST − SSR) == SST, and R² matches the ratio
    assert_abs_diff_eq!(rss + ess, sst, epsilon = 1e-8 * sst);
    assert_abs_diff_eq!(
        fitted.statistics().r_squared,
        ess / sst,
        epsilon = 1e-10
    );
}

#[test]
fn test_standard_errors_and_intervals() {
    let table = noisy_table();
    let fitted = fit_model(&table, &["x1", "x2"], true).unwrap();
    let report = fitted.report();

    for term in &report.terms {
        assert!(term.std_error > 0.0);
        assert!(term.ci_lower < term.estimate);
        assert!(term.ci_upper > term.estimate);
        assert!((0.0..=1.0).contains(&term.p_value));
    }

    assert!(report.terms[0].is_intercept);
    assert!(!report.terms[1].is_intercept);
}

#[test]
fn test_residual_statistics() {
    let table = noisy_table();
    let fitted = fit_model(&table, &["x1", "x2"], true).unwrap();
    let rstats = fitted.residual_statistics();

    assert!(rstats.min <= rstats.q1);
    assert!(rstats.q1 <= rstats.median);
    assert!(rstats.median <= rstats.q3);
    assert!(rstats.q3 <= rstats.max);
    assert_abs_diff_eq!(rstats.mean, 0.0, epsilon = 1e-8);
    // Durbin-Watson of uncorrelated noise sits near 2
    assert!(rstats.durbin_watson > 1.0 && rstats.durbin_watson < 3.0);
}

// ==================== Configuration ====================

#[test]
fn test_fit_convenience_function() {
    let table = simple_linear_table();
    let profiles = inspect(&table, &InspectConfig::default());
    let spec = SpecBuilder::new()
        .response("y")
        .predictor("x")
        .build(&profiles)
        .unwrap();

    let fitted = fit(&table, &spec, &FitConfig::default()).unwrap();
    assert_abs_diff_eq!(fitted.coefficients()[1], 2.0, epsilon = 1e-8);
}

#[test]
fn test_confidence_level_widens_intervals() {
    let table = noisy_table();
    let profiles = inspect(&table, &InspectConfig::default());
    let spec = SpecBuilder::new()
        .response("y")
        .predictors(["x1", "x2"])
        .build(&profiles)
        .unwrap();

    let narrow = fit(
        &table,
        &spec,
        &FitConfig {
            confidence_level: 0.90,
            ..FitConfig::default()
        },
    )
    .unwrap()
    .report();

    let wide = fit(
        &table,
        &spec,
        &FitConfig {
            confidence_level: 0.99,
            ..FitConfig::default()
        },
    )
    .unwrap()
    .report();

    for (n, w) in narrow.terms.iter().zip(wide.terms.iter()) {
        let narrow_width = n.ci_upper - n.ci_lower;
        let wide_width = w.ci_upper - w.ci_lower;
        assert!(wide_width > narrow_width);
    }
}

// ==================== Determinism ====================

#[test]
fn test_fit_is_deterministic() {
    let table = simple_linear_table();

    let first = fit_model(&table, &["x"], true).unwrap();
    let second = fit_model(&table, &["x"], true).unwrap();

    assert_eq!(first.coefficients(), second.coefficients());
    assert_eq!(first.standard_errors(), second.standard_errors());
    assert_eq!(
        first.statistics().r_squared.to_bits(),
        second.statistics().r_squared.to_bits()
    );
}

// ==================== Report ====================

#[test]
fn test_report_display() {
    let table = simple_linear_table();
    let fitted = fit_model(&table, &["x"], true).unwrap();
    let report = fitted.report();

    let display = format!("{}", report);
    assert!(display.contains("Regression Summary"));
    assert!(display.contains("Coefficients"));
    assert!(display.contains("(Intercept)"));
    assert!(display.contains("R-squared"));
}

#[test]
fn test_report_preserves_term_order() {
    let table = multiple_regression_table();
    let fitted = fit_model(&table, &["x2", "x1"], true).unwrap();
    let report = fitted.report();

    let names: Vec<&str> = report.terms.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["(Intercept)", "x2", "x1"]);

    let json = serde_json::to_string(&report).unwrap();
    let x2_pos = json.find("\"x2\"").unwrap();
    let x1_pos = json.find("\"x1\"").unwrap();
    assert!(x2_pos < x1_pos);
}
