//! Seeded stratified train/test partitioning.
use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::SplitError;

/// Row indices of each partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitIndices {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Split row indices so both partitions keep the label proportions of `labels`.
///
/// The test partition receives `ceil(test_size * n)` rows. Each class gets
/// its proportional share (floored), and the leftover rows go to the classes
/// with the largest fractional remainder. Shuffling uses a `StdRng` seeded
/// with `seed`, so identical inputs always give identical partitions.
pub fn stratified_split(
    labels: &[i32],
    test_size: f64,
    seed: u64,
) -> Result<SplitIndices, SplitError> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(SplitError::InvalidTestSize(test_size));
    }

    let n_samples = labels.len();
    // Absorb float noise such as 0.3 * 100 = 30.000000000000004.
    let n_test = (test_size * n_samples as f64 - 1e-9).ceil().max(0.0) as usize;
    let n_train = n_samples.saturating_sub(n_test);
    if n_test == 0 || n_train == 0 {
        return Err(SplitError::EmptyPartition {
            n_samples,
            test_size,
        });
    }

    let mut by_class: BTreeMap<i32, Vec<usize>> = BTreeMap::new();
    for (idx, &label) in labels.iter().enumerate() {
        by_class.entry(label).or_default().push(idx);
    }

    if let Some((&label, rows)) = by_class.iter().find(|(_, rows)| rows.len() < 2) {
        return Err(SplitError::ClassTooSmall {
            label,
            count: rows.len(),
        });
    }

    let n_classes = by_class.len();
    if n_test < n_classes {
        return Err(SplitError::TooFewSamples {
            partition: "test",
            size: n_test,
            n_classes,
        });
    }
    if n_train < n_classes {
        return Err(SplitError::TooFewSamples {
            partition: "train",
            size: n_train,
            n_classes,
        });
    }

    let test_counts = allocate_test_counts(&by_class, n_samples, n_test);

    let mut rng = StdRng::seed_from_u64(seed);
    let mut train = Vec::with_capacity(n_train);
    let mut test = Vec::with_capacity(n_test);
    for (rows, take) in by_class.values().zip(test_counts) {
        let mut rows = rows.clone();
        rows.shuffle(&mut rng);
        test.extend_from_slice(&rows[..take]);
        train.extend_from_slice(&rows[take..]);
    }
    train.shuffle(&mut rng);
    test.shuffle(&mut rng);

    log::debug!(
        "Stratified split: {} train / {} test rows over {} classes (seed {})",
        train.len(),
        test.len(),
        n_classes,
        seed
    );

    Ok(SplitIndices { train, test })
}

/// Largest-remainder apportionment of `n_test` rows across classes.
fn allocate_test_counts(
    by_class: &BTreeMap<i32, Vec<usize>>,
    n_samples: usize,
    n_test: usize,
) -> Vec<usize> {
    let exact: Vec<f64> = by_class
        .values()
        .map(|rows| rows.len() as f64 * n_test as f64 / n_samples as f64)
        .collect();
    let mut counts: Vec<usize> = exact.iter().map(|v| v.floor() as usize).collect();

    let mut order: Vec<usize> = (0..exact.len()).collect();
    // Stable sort keeps class order on equal remainders.
    order.sort_by(|&a, &b| {
        let ra = exact[a] - exact[a].floor();
        let rb = exact[b] - exact[b].floor();
        rb.partial_cmp(&ra).unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut remaining = n_test - counts.iter().sum::<usize>();
    for &class_idx in order.iter().cycle() {
        if remaining == 0 {
            break;
        }
        let class_size = by_class.values().nth(class_idx).map_or(0, Vec::len);
        if counts[class_idx] < class_size {
            counts[class_idx] += 1;
            remaining -= 1;
        }
    }
    counts
}
