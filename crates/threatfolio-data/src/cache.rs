//! Process-wide cache of the loaded dataset and its samples.
//!
//! The dataset is loaded on first access and kept until the process exits.
//! Samples are memoized per [`SampleKey`]. Nothing is ever invalidated.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, OnceLock, PoisonError},
};

use crate::{
    dataset::{Dataset, LoadError, LoadOptions},
    sample::{self, SampleKey},
};

/// Load-once holder of a dataset file and the samples drawn from it.
#[derive(Debug)]
pub struct DatasetCache {
    path: PathBuf,
    options: LoadOptions,
    dataset: OnceLock<Arc<Dataset>>,
    samples: Mutex<HashMap<SampleKey, Arc<Dataset>>>,
}

impl DatasetCache {
    /// Creates an empty cache for the file at `path`. Nothing is read yet.
    #[must_use]
    pub fn new<P>(path: P, options: LoadOptions) -> Self
    where
        P: Into<PathBuf>,
    {
        Self {
            path: path.into(),
            options,
            dataset: OnceLock::new(),
            samples: Mutex::new(HashMap::new()),
        }
    }

    /// Creates a cache already holding `dataset`.
    #[must_use]
    pub fn from_dataset(dataset: Dataset) -> Self {
        let cache = Self::new(PathBuf::new(), LoadOptions::default());
        let _ = cache.dataset.set(Arc::new(dataset));
        cache
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the dataset, loading it on first call.
    ///
    /// A failed load is not cached; the next call retries.
    pub fn dataset(&self) -> Result<Arc<Dataset>, LoadError> {
        if let Some(dataset) = self.dataset.get() {
            return Ok(Arc::clone(dataset));
        }
        let loaded = Arc::new(Dataset::load(&self.path, self.options)?);
        Ok(Arc::clone(self.dataset.get_or_init(|| loaded)))
    }

    /// Returns the memoized sample of `size` rows drawn with `seed`.
    pub fn sample(&self, size: usize, seed: u64) -> Result<Arc<Dataset>, LoadError> {
        let dataset = self.dataset()?;
        let key = SampleKey { seed, size };
        let mut samples = self.samples.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(sample) = samples.get(&key) {
            log::debug!("Sample cache hit for {key:?}");
            return Ok(Arc::clone(sample));
        }
        let sample = sample::sample_rows(&dataset, size, seed);
        samples.insert(key, Arc::clone(&sample));
        Ok(sample)
    }

    /// Dataset used for charts and comparisons: the sample when `use_sample`
    /// is set, the full dataset otherwise.
    pub fn display_dataset(
        &self,
        use_sample: bool,
        size: usize,
        seed: u64,
    ) -> Result<Arc<Dataset>, LoadError> {
        if use_sample {
            self.sample(size, seed)
        } else {
            self.dataset()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    fn csv_file(rows: usize) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, ",Loss").unwrap();
        for i in 0..rows {
            writeln!(file, "{i},{}", i * 10).unwrap();
        }
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_dataset_is_loaded_once() {
        let file = csv_file(10);
        let cache = DatasetCache::new(file.path(), LoadOptions::default());
        let first = cache.dataset().unwrap();
        let second = cache.dataset().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.shape(), (10, 1));
    }

    #[test]
    fn test_samples_are_memoized() {
        let file = csv_file(100);
        let cache = DatasetCache::new(file.path(), LoadOptions::default());
        let a = cache.sample(10, 42).unwrap();
        let b = cache.sample(10, 42).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &cache.sample(10, 43).unwrap()));
    }

    #[test]
    fn test_display_dataset() {
        let cache = DatasetCache::from_dataset(
            Dataset::from_rows(["x"], (0..50).map(|i| [i.to_string()])).unwrap(),
        );
        let full = cache.dataset().unwrap();
        assert!(Arc::ptr_eq(&cache.display_dataset(false, 10, 42).unwrap(), &full));
        assert_eq!(cache.display_dataset(true, 10, 42).unwrap().num_rows(), 10);
        assert!(Arc::ptr_eq(&cache.display_dataset(true, 3000, 42).unwrap(), &full));
    }

    #[test]
    fn test_missing_file_is_retried() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DatasetCache::new(dir.path().join("incidents.csv"), LoadOptions::default());
        assert!(cache.dataset().is_err());
        assert!(cache.sample(10, 42).is_err());
    }

    #[test]
    fn test_cache_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DatasetCache>();
    }
}
