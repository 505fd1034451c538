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

//! Python bindings for the LRU cache.

use pyo3::prelude::*;

use super::to_pyvalue_err;
use crate::{correctness::check_non_negative_capacity, lru::LruCache};

/// A least-recently-used cache mapping `str` keys to `str` values.
#[pyo3::pyclass(name = "LruCache", module = "flagcache_pyo3")]
#[derive(Debug)]
pub struct PyLruCache {
    inner: LruCache<String, String>,
}

#[pymethods]
impl PyLruCache {
    #[new]
    fn py_new(capacity: i64) -> PyResult<Self> {
        let capacity = check_non_negative_capacity(capacity, "capacity")
            .map_err(to_pyvalue_err)?;
        Ok(Self {
            inner: LruCache::new(capacity),
        })
    }

    fn __repr__(&self) -> String {
        format!(
            "LruCache(capacity={}, len={})",
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

    fn __contains__(&self, key: String) -> bool {
        self.inner.contains(&key)
    }

    fn size(&self) -> usize {
        self.inner.len()
    }

    fn get(&mut self, key: String) -> Option<String> {
        self.inner.get(&key).cloned()
    }

    fn set(&mut self, key: String, value: String) {
        self.inner.set(key, value);
    }

    fn put(&mut self, key: String, value: String) -> Option<String> {
        self.inner.put(key, value)
    }

    fn remove(&mut self, key: String) -> Option<String> {
        self.inner.remove(&key)
    }

    fn clear(&mut self) {
        self.inner.clear();
    }
}
