// -------------------------------------------------------------------------------------------------
//  Copyright (C) 2015-2026 Nautech Systems Pty Ltd. All rights reserved.
//  https://nautechsystems.io
//
//  Licensed under the GNU Lesser General Public License Version 3.0 (the "License");
//  You may not use this file except in compliance with the License.
//  You may obtain a copy of the License at https://www.gnu.org/licenses/lgpl-3.0.en.html
//
//  Unless required by applicable law or agreed to in writing, software
//  distributed under the License is distributed on an "AS IS" BASIS,
//  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//  See the License for the specific language governing permissions and
//  limitations under the License.
// -------------------------------------------------------------------------------------------------

//! Python bindings for the exposure cache.

use flagcache_core::{correctness::check_non_negative_capacity, python::to_pyvalue_err};
use pyo3::prelude::*;

use crate::cache::exposure::ExposureCache;

/// Deduplicates feature-flag exposures by flag and subject.
#[pyo3::pyclass(name = "ExposureCache", module = "flagcache_pyo3")]
#[derive(Debug)]
pub struct PyExposureCache {
    inner: ExposureCache,
}

#[pymethods]
impl PyExposureCache {
    #[new]
    fn py_new(capacity: i64) -> PyResult<Self> {
        let capacity = check_non_negative_capacity(capacity, "capacity")
            .map_err(to_pyvalue_err)?;
        Ok(Self {
            inner: ExposureCache::new(capacity),
        })
    }

    fn __repr__(&self) -> String {
        format!(
            "ExposureCache(capacity={}, len={})",
            self.inner.capacity(),
            self.inner.len()
        )
    }

    #[getter]
    fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    fn size(&self) -> usize {
        self.inner.len()
    }

    fn add(&mut self, flag_key: &str, subject_key: &str, variant: &str, allocation: &str) -> bool {
        self.inner.add(flag_key, subject_key, variant, allocation)
    }

    /// Returns `(variant, allocation)` for the flag and subject, or `None`.
    fn get(&mut self, flag_key: &str, subject_key: &str) -> Option<(String, String)> {
        self.inner
            .get(flag_key, subject_key)
            .map(|value| (value.variant.clone(), value.allocation.clone()))
    }

    fn clear(&mut self) {
        self.inner.clear();
    }
}

#[cfg(test)]
mod tests {
    use pyo3::exceptions::PyValueError;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn test_negative_capacity_raises_value_error() {
        let error = PyExposureCache::py_new(-1).unwrap_err();

        pyo3::Python::initialize();
        pyo3::Python::attach(|py| {
            assert!(error.is_instance_of::<PyValueError>(py));
        });
        assert!(error.to_string().contains("was -1"));
    }

    #[rstest]
    fn test_zero_capacity_reports_every_exposure() {
        let mut cache = PyExposureCache::py_new(0).unwrap();

        assert!(cache.add("flag", "user", "on", "alloc"));
        assert!(cache.add("flag", "user", "on", "alloc"));
        assert_eq!(cache.size(), 0);
        assert_eq!(cache.get("flag", "user"), None);
    }

    #[rstest]
    fn test_get_returns_variant_and_allocation() {
        let mut cache = PyExposureCache::py_new(2).unwrap();

        assert!(cache.add("flag", "user", "on", "alloc"));
        assert!(!cache.add("flag", "user", "on", "alloc"));
        assert_eq!(
            cache.get("flag", "user"),
            Some(("on".to_string(), "alloc".to_string()))
        );
    }
}
