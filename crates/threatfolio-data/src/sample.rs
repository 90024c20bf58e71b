//! Deterministic row subsampling for chart rendering.

use std::sync::Arc;

use rand::{SeedableRng as _, seq::index};
use rand_pcg::Pcg64;

use crate::dataset::Dataset;

/// Seed used when none is configured.
pub const DEFAULT_SEED: u64 = 42;

/// Identifies one memoized sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SampleKey {
    pub seed: u64,
    pub size: usize,
}

/// Draws `size` rows without replacement using a PCG generator seeded with `seed`.
///
/// Rows keep the order in which they were drawn. When `size` covers the
/// whole dataset the input `Arc` itself is returned.
///
/// ```
/// use std::sync::Arc;
///
/// use threatfolio_data::{dataset::Dataset, sample};
///
/// let dataset = Arc::new(Dataset::from_rows(["x"], (0..10).map(|i| [i.to_string()])).unwrap());
/// let picked = sample::sample_rows(&dataset, 4, 42);
/// assert_eq!(picked.num_rows(), 4);
/// assert_eq!(picked, sample::sample_rows(&dataset, 4, 42));
/// assert!(Arc::ptr_eq(&sample::sample_rows(&dataset, 10, 42), &dataset));
/// ```
#[must_use]
pub fn sample_rows(dataset: &Arc<Dataset>, size: usize, seed: u64) -> Arc<Dataset> {
    let rows = dataset.num_rows();
    if size >= rows {
        return Arc::clone(dataset);
    }
    let mut rng = Pcg64::seed_from_u64(seed);
    let indices = index::sample(&mut rng, rows, size).into_vec();
    log::info!("Sampled {size} of {rows} rows (seed {seed})");
    Arc::new(dataset.select_rows(&indices))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(rows: usize) -> Arc<Dataset> {
        Arc::new(
            Dataset::from_rows(
                ["id", "half"],
                (0..rows).map(|i| [i.to_string(), (i % 2).to_string()]),
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_same_seed_same_rows() {
        let dataset = numbered(200);
        let a = sample_rows(&dataset, 50, 7);
        let b = sample_rows(&dataset, 50, 7);
        assert_eq!(a, b);
        assert_eq!(a.num_rows(), 50);
        assert_eq!(a.num_columns(), 2);
    }

    #[test]
    fn test_rows_are_distinct_and_consistent() {
        let dataset = numbered(100);
        let picked = sample_rows(&dataset, 30, DEFAULT_SEED);
        let mut ids = picked
            .column("id")
            .unwrap()
            .cells()
            .map(|c| c.unwrap().parse::<usize>().unwrap())
            .collect::<Vec<_>>();
        for (row, id) in ids.iter().enumerate() {
            let half = picked.column("half").unwrap().get(row).unwrap();
            assert_eq!(half, (id % 2).to_string());
        }
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 30);
    }

    #[test]
    fn test_oversized_sample_is_identity() {
        let dataset = numbered(20);
        assert!(Arc::ptr_eq(&sample_rows(&dataset, 20, 1), &dataset));
        assert!(Arc::ptr_eq(&sample_rows(&dataset, 3000, 1), &dataset));
    }

    #[test]
    fn test_different_seeds_differ() {
        let dataset = numbered(500);
        assert_ne!(sample_rows(&dataset, 50, 1), sample_rows(&dataset, 50, 2));
    }
}
