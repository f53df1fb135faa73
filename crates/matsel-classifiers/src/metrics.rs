//! Binary classification metrics and the per-class text report.
//!
//! Conventions follow the usual library behaviour: the positive class is 1,
//! a metric whose denominator is zero evaluates to 0.0 (with a warning), and
//! ROC-AUC is undefined when only one class is present in `y_true`.
use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

const POSITIVE: i32 = 1;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Counts {
    tp: usize,
    fp: usize,
    fn_: usize,
}

fn counts_for(y_true: &[i32], y_pred: &[i32], label: i32) -> Counts {
    assert_eq!(
        y_true.len(),
        y_pred.len(),
        "y_true and y_pred must have equal lengths"
    );
    let mut c = Counts::default();
    for (&t, &p) in y_true.iter().zip(y_pred) {
        match (t == label, p == label) {
            (true, true) => c.tp += 1,
            (false, true) => c.fp += 1,
            (true, false) => c.fn_ += 1,
            (false, false) => {}
        }
    }
    c
}

fn safe_ratio(num: usize, den: usize, metric: &str) -> f64 {
    if den == 0 {
        log::warn!("{} is ill-defined (zero denominator); reporting 0.0", metric);
        0.0
    } else {
        num as f64 / den as f64
    }
}

fn harmonic(p: f64, r: f64) -> f64 {
    if p + r == 0.0 {
        0.0
    } else {
        2.0 * p * r / (p + r)
    }
}

pub fn accuracy(y_true: &[i32], y_pred: &[i32]) -> f64 {
    assert_eq!(
        y_true.len(),
        y_pred.len(),
        "y_true and y_pred must have equal lengths"
    );
    if y_true.is_empty() {
        return 0.0;
    }
    let correct = y_true.iter().zip(y_pred).filter(|(t, p)| t == p).count();
    correct as f64 / y_true.len() as f64
}

pub fn precision(y_true: &[i32], y_pred: &[i32]) -> f64 {
    let c = counts_for(y_true, y_pred, POSITIVE);
    safe_ratio(c.tp, c.tp + c.fp, "precision")
}

pub fn recall(y_true: &[i32], y_pred: &[i32]) -> f64 {
    let c = counts_for(y_true, y_pred, POSITIVE);
    safe_ratio(c.tp, c.tp + c.fn_, "recall")
}

pub fn f1(y_true: &[i32], y_pred: &[i32]) -> f64 {
    harmonic(precision(y_true, y_pred), recall(y_true, y_pred))
}

/// Area under the ROC curve for positive class 1, from the rank-sum
/// (Mann-Whitney U) statistic. Tied scores share their average rank.
///
/// Returns `None` when `y_true` holds a single class.
pub fn roc_auc(y_true: &[i32], scores: &[f64]) -> Option<f64> {
    assert_eq!(
        y_true.len(),
        scores.len(),
        "y_true and scores must have equal lengths"
    );
    let n_pos = y_true.iter().filter(|&&t| t == POSITIVE).count();
    let n_neg = y_true.len() - n_pos;
    if n_pos == 0 || n_neg == 0 {
        return None;
    }

    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| {
        scores[a]
            .partial_cmp(&scores[b])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut ranks = vec![0.0f64; scores.len()];
    let mut start = 0;
    while start < order.len() {
        let mut end = start + 1;
        while end < order.len() && scores[order[end]] == scores[order[start]] {
            end += 1;
        }
        // 1-based ranks start+1 ..= end share their mean.
        let avg_rank = (start + 1 + end) as f64 / 2.0;
        for &idx in &order[start..end] {
            ranks[idx] = avg_rank;
        }
        start = end;
    }

    let pos_rank_sum: f64 = y_true
        .iter()
        .zip(&ranks)
        .filter(|(t, _)| **t == POSITIVE)
        .map(|(_, r)| *r)
        .sum();
    let u = pos_rank_sum - (n_pos * (n_pos + 1)) as f64 / 2.0;
    Some(u / (n_pos * n_neg) as f64)
}

/// Headline scores for a fitted model on held-out rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationMetrics {
    pub accuracy: f64,
    pub f1: f64,
    pub precision: f64,
    pub recall: f64,
    pub roc_auc: Option<f64>,
}

impl EvaluationMetrics {
    /// Score hard predictions. ROC-AUC is ranked on the predicted labels.
    pub fn from_predictions(y_true: &[i32], y_pred: &[i32]) -> Self {
        let scores: Vec<f64> = y_pred.iter().map(|&p| p as f64).collect();
        Self {
            accuracy: accuracy(y_true, y_pred),
            f1: f1(y_true, y_pred),
            precision: precision(y_true, y_pred),
            recall: recall(y_true, y_pred),
            roc_auc: roc_auc(y_true, &scores),
        }
    }
}

impl fmt::Display for EvaluationMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  accuracy: {}", self.accuracy)?;
        writeln!(f, "  f1: {}", self.f1)?;
        writeln!(f, "  precision: {}", self.precision)?;
        writeln!(f, "  recall: {}", self.recall)?;
        match self.roc_auc {
            Some(auc) => write!(f, "  roc_auc: {}", auc),
            None => write!(f, "  roc_auc: None"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassScores {
    pub label: i32,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub support: usize,
}

/// Per-class precision/recall/F1 with support, plus summary rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationReport {
    pub classes: Vec<ClassScores>,
    pub accuracy: f64,
    pub macro_avg: ClassScores,
    pub weighted_avg: ClassScores,
}

impl ClassificationReport {
    pub fn new(y_true: &[i32], y_pred: &[i32]) -> Self {
        let labels: BTreeSet<i32> = y_true.iter().chain(y_pred).copied().collect();
        let classes: Vec<ClassScores> = labels
            .into_iter()
            .map(|label| {
                let c = counts_for(y_true, y_pred, label);
                let precision = ratio_or_zero(c.tp, c.tp + c.fp);
                let recall = ratio_or_zero(c.tp, c.tp + c.fn_);
                ClassScores {
                    label,
                    precision,
                    recall,
                    f1: harmonic(precision, recall),
                    support: c.tp + c.fn_,
                }
            })
            .collect();

        let total: usize = classes.iter().map(|c| c.support).sum();
        let n = classes.len().max(1) as f64;
        let mean = |f: fn(&ClassScores) -> f64| classes.iter().map(f).sum::<f64>() / n;
        let weighted = |f: fn(&ClassScores) -> f64| {
            if total == 0 {
                0.0
            } else {
                classes
                    .iter()
                    .map(|c| f(c) * c.support as f64)
                    .sum::<f64>()
                    / total as f64
            }
        };

        let macro_avg = ClassScores {
            label: -1,
            precision: mean(|c| c.precision),
            recall: mean(|c| c.recall),
            f1: mean(|c| c.f1),
            support: total,
        };
        let weighted_avg = ClassScores {
            label: -1,
            precision: weighted(|c| c.precision),
            recall: weighted(|c| c.recall),
            f1: weighted(|c| c.f1),
            support: total,
        };

        Self {
            accuracy: accuracy(y_true, y_pred),
            classes,
            macro_avg,
            weighted_avg,
        }
    }
}

fn ratio_or_zero(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let w: usize = 12;
        writeln!(
            f,
            "{:>w$} {:>10} {:>9} {:>9} {:>9}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;
        for c in &self.classes {
            writeln!(
                f,
                "{:>w$} {:>10.2} {:>9.2} {:>9.2} {:>9}",
                c.label, c.precision, c.recall, c.f1, c.support
            )?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "{:>w$} {:>10} {:>9} {:>9.2} {:>9}",
            "accuracy", "", "", self.accuracy, self.macro_avg.support
        )?;
        for (name, row) in [("macro avg", &self.macro_avg), ("weighted avg", &self.weighted_avg)] {
            writeln!(
                f,
                "{:>w$} {:>10.2} {:>9.2} {:>9.2} {:>9}",
                name, row.precision, row.recall, row.f1, row.support
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const Y_TRUE: [i32; 8] = [1, 1, 1, 1, 0, 0, 0, 0];
    const Y_PRED: [i32; 8] = [1, 1, 1, 0, 1, 0, 0, 0];

    #[test]
    fn headline_metrics() {
        assert!((accuracy(&Y_TRUE, &Y_PRED) - 0.75).abs() < 1e-12);
        assert!((precision(&Y_TRUE, &Y_PRED) - 0.75).abs() < 1e-12);
        assert!((recall(&Y_TRUE, &Y_PRED) - 0.75).abs() < 1e-12);
        assert!((f1(&Y_TRUE, &Y_PRED) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn precision_without_positive_predictions_is_zero() {
        assert_eq!(precision(&[1, 0], &[0, 0]), 0.0);
        assert_eq!(f1(&[1, 0], &[0, 0]), 0.0);
    }

    #[test]
    fn roc_auc_perfect_and_tied() {
        assert_eq!(roc_auc(&[0, 0, 1, 1], &[0.1, 0.2, 0.8, 0.9]), Some(1.0));
        assert_eq!(roc_auc(&[0, 0, 1, 1], &[0.9, 0.8, 0.2, 0.1]), Some(0.0));
        assert_eq!(roc_auc(&[0, 1, 0, 1], &[0.5, 0.5, 0.5, 0.5]), Some(0.5));
    }

    #[test]
    fn roc_auc_on_labels_matches_balanced_accuracy() {
        let scores: Vec<f64> = Y_PRED.iter().map(|&p| p as f64).collect();
        // TPR 0.75, FPR 0.25 -> (1 + 0.75 - 0.25) / 2
        assert_eq!(roc_auc(&Y_TRUE, &scores), Some(0.75));
    }

    #[test]
    fn roc_auc_single_class_is_undefined() {
        assert_eq!(roc_auc(&[1, 1, 1], &[0.2, 0.4, 0.9]), None);
        let metrics = EvaluationMetrics::from_predictions(&[0, 0], &[0, 1]);
        assert_eq!(metrics.roc_auc, None);
        assert!(metrics.to_string().ends_with("roc_auc: None"));
    }

    #[test]
    fn report_rows_and_supports() {
        let report = ClassificationReport::new(&Y_TRUE, &Y_PRED);
        assert_eq!(report.classes.len(), 2);
        assert_eq!(report.classes[0].label, 0);
        assert_eq!(report.classes[0].support, 4);
        assert_eq!(report.classes[1].support, 4);
        assert_eq!(report.macro_avg.support, 8);
        assert!((report.weighted_avg.f1 - 0.75).abs() < 1e-12);

        let text = report.to_string();
        assert!(text.contains("precision"));
        assert!(text.contains("macro avg"));
        assert!(text.contains("weighted avg"));
        assert!(text.contains("0.75"));
    }
}
