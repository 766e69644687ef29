//! Forecast accuracy metrics
//!
//! Standard statistics over (predicted, actual) pairs, plus model comparison
//! and skill against a baseline. Every function returns 0 for an empty
//! sample set instead of failing.

use crate::models::{ComparisonSample, ValidationMetrics};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Winner of a [`compare_models`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BetterModel {
    Model1,
    Model2,
    Tie,
}

/// Outcome of comparing two metric sets
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelComparison {
    pub better_model: BetterModel,
    /// Criteria (MAE, RMSE, R²) won by model 1
    pub model1_wins: u8,
    /// Criteria (MAE, RMSE, R²) won by model 2
    pub model2_wins: u8,
    /// MAE reduction of model 2 relative to model 1, in percent
    pub mae_improvement_pct: f64,
    /// RMSE reduction of model 2 relative to model 1, in percent
    pub rmse_improvement_pct: f64,
    /// R² gain of model 2 relative to model 1, in percent
    pub r2_improvement_pct: f64,
}

fn pairs(samples: &[ComparisonSample]) -> Vec<(f64, f64)> {
    samples.iter().map(|s| (s.predicted, s.actual)).collect()
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    if count == 0 { 0.0 } else { sum / count as f64 }
}

fn mae(pairs: &[(f64, f64)]) -> f64 {
    mean(pairs.iter().map(|(p, a)| (p - a).abs()))
}

fn rmse(pairs: &[(f64, f64)]) -> f64 {
    mean(pairs.iter().map(|(p, a)| (p - a).powi(2))).sqrt()
}

fn bias(pairs: &[(f64, f64)]) -> f64 {
    mean(pairs.iter().map(|(p, a)| p - a))
}

fn r2(pairs: &[(f64, f64)]) -> f64 {
    let mean_actual = mean(pairs.iter().map(|(_, a)| *a));
    let ss_tot: f64 = pairs.iter().map(|(_, a)| (a - mean_actual).powi(2)).sum();
    if ss_tot == 0.0 {
        return 0.0;
    }
    let ss_res: f64 = pairs.iter().map(|(p, a)| (a - p).powi(2)).sum();
    1.0 - ss_res / ss_tot
}

fn correlation(pairs: &[(f64, f64)]) -> f64 {
    let mean_pred = mean(pairs.iter().map(|(p, _)| *p));
    let mean_actual = mean(pairs.iter().map(|(_, a)| *a));

    let (cov, var_pred, var_actual) =
        pairs
            .iter()
            .fold((0.0, 0.0, 0.0), |(cov, vp, va), (p, a)| {
                let dp = p - mean_pred;
                let da = a - mean_actual;
                (cov + dp * da, vp + dp * dp, va + da * da)
            });

    let std_pred = var_pred.sqrt();
    let std_actual = var_actual.sqrt();
    if std_pred == 0.0 || std_actual == 0.0 {
        return 0.0;
    }
    cov / (std_pred * std_actual)
}

fn metrics(pairs: &[(f64, f64)]) -> ValidationMetrics {
    ValidationMetrics {
        mae: mae(pairs),
        rmse: rmse(pairs),
        r2: r2(pairs),
        bias: bias(pairs),
        count: pairs.len(),
    }
}

/// Mean absolute error
#[must_use]
pub fn calculate_mae(samples: &[ComparisonSample]) -> f64 {
    mae(&pairs(samples))
}

/// Root mean squared error
#[must_use]
pub fn calculate_rmse(samples: &[ComparisonSample]) -> f64 {
    rmse(&pairs(samples))
}

/// Coefficient of determination `1 - SS_res / SS_tot`
///
/// Returns 0 when every actual value is identical (`SS_tot == 0`).
#[must_use]
pub fn calculate_r2(samples: &[ComparisonSample]) -> f64 {
    r2(&pairs(samples))
}

/// Mean signed error, positive for systematic overestimation
#[must_use]
pub fn calculate_bias(samples: &[ComparisonSample]) -> f64 {
    mean(samples.iter().map(ComparisonSample::error))
}

/// Pearson correlation between predictions and actuals
///
/// Returns 0 when either series has zero variance.
#[must_use]
pub fn calculate_correlation(samples: &[ComparisonSample]) -> f64 {
    correlation(&pairs(samples))
}

/// All accuracy statistics in one pass over the samples
#[must_use]
pub fn calculate_metrics(samples: &[ComparisonSample]) -> ValidationMetrics {
    metrics(&pairs(samples))
}

/// Metrics grouped by forecast horizon
#[must_use]
pub fn metrics_by_horizon(samples: &[ComparisonSample]) -> BTreeMap<u32, ValidationMetrics> {
    grouped(samples, |s| s.hours_ahead)
}

/// Metrics grouped by pollutant
#[must_use]
pub fn metrics_by_pollutant(samples: &[ComparisonSample]) -> BTreeMap<String, ValidationMetrics> {
    grouped(samples, |s| s.pollutant.clone())
}

fn grouped<K: Ord>(
    samples: &[ComparisonSample],
    key: impl Fn(&ComparisonSample) -> K,
) -> BTreeMap<K, ValidationMetrics> {
    let mut groups: BTreeMap<K, Vec<(f64, f64)>> = BTreeMap::new();
    for sample in samples {
        groups
            .entry(key(sample))
            .or_default()
            .push((sample.predicted, sample.actual));
    }
    groups
        .into_iter()
        .map(|(k, group)| (k, metrics(&group)))
        .collect()
}

/// Relative MAE improvement of `model` over `baseline`
///
/// Positive when the model beats the baseline, 1 for a perfect model, 0 when
/// the baseline MAE is 0.
#[must_use]
pub fn skill_score(model: &ValidationMetrics, baseline: &ValidationMetrics) -> f64 {
    if baseline.mae == 0.0 {
        return 0.0;
    }
    1.0 - model.mae / baseline.mae
}

fn improvement_pct(reference: f64, candidate: f64, lower_is_better: bool) -> f64 {
    if reference == 0.0 {
        return 0.0;
    }
    let gain = if lower_is_better {
        reference - candidate
    } else {
        candidate - reference
    };
    gain / reference.abs() * 100.0
}

/// Compare two metric sets on MAE (lower), RMSE (lower) and R² (higher)
///
/// The model winning at least two criteria is better; otherwise it is a tie.
#[must_use]
pub fn compare_models(model1: &ValidationMetrics, model2: &ValidationMetrics) -> ModelComparison {
    let criteria = [
        model1.mae.partial_cmp(&model2.mae).map(std::cmp::Ordering::reverse),
        model1.rmse.partial_cmp(&model2.rmse).map(std::cmp::Ordering::reverse),
        model1.r2.partial_cmp(&model2.r2),
    ];

    let model1_wins = criteria
        .iter()
        .filter(|c| matches!(c, Some(std::cmp::Ordering::Greater)))
        .count() as u8;
    let model2_wins = criteria
        .iter()
        .filter(|c| matches!(c, Some(std::cmp::Ordering::Less)))
        .count() as u8;

    let better_model = if model1_wins >= 2 {
        BetterModel::Model1
    } else if model2_wins >= 2 {
        BetterModel::Model2
    } else {
        BetterModel::Tie
    };

    debug!(
        "Model comparison: model1 {} wins, model2 {} wins -> {}",
        model1_wins, model2_wins, better_model
    );

    ModelComparison {
        better_model,
        model1_wins,
        model2_wins,
        mae_improvement_pct: improvement_pct(model1.mae, model2.mae, true),
        rmse_improvement_pct: improvement_pct(model1.rmse, model2.rmse, true),
        r2_improvement_pct: improvement_pct(model1.r2, model2.r2, false),
    }
}

impl fmt::Display for BetterModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BetterModel::Model1 => write!(f, "model1"),
            BetterModel::Model2 => write!(f, "model2"),
            BetterModel::Tie => write!(f, "tie"),
        }
    }
}
