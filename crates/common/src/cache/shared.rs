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

//! Thread-safe handle to an [`ExposureCache`].

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::exposure::{ExposureCache, ExposureValue};

/// A cloneable, thread-safe handle to a single [`ExposureCache`].
///
/// One mutex guards the key index and the recency order together, so every operation is atomic
/// with respect to every other. Clones share the same underlying cache.
#[derive(Clone, Debug)]
pub struct SharedExposureCache {
    inner: Arc<Mutex<ExposureCache>>,
}

impl SharedExposureCache {
    /// Creates a new [`SharedExposureCache`] holding at most `capacity` exposures.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self::from_cache(ExposureCache::new(capacity))
    }

    /// Wraps an existing [`ExposureCache`].
    #[must_use]
    pub fn from_cache(cache: ExposureCache) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    /// Records an exposure and returns whether it is new.
    ///
    /// See [`ExposureCache::add`].
    pub fn add(&self, flag_key: &str, subject_key: &str, variant: &str, allocation: &str) -> bool {
        self.lock().add(flag_key, subject_key, variant, allocation)
    }

    /// Returns a copy of the cached exposure, promoting it to most recently used.
    #[must_use]
    pub fn get(&self, flag_key: &str, subject_key: &str) -> Option<ExposureValue> {
        self.lock().get(flag_key, subject_key).cloned()
    }

    /// Returns the capacity of the cache.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.lock().capacity()
    }

    /// Returns the number of exposures in the cache.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Clears all exposures from the cache.
    pub fn clear(&self) {
        self.lock().clear();
    }

    // Every mutation completes before the guard drops, so a poisoned lock still holds a
    // consistent cache
    fn lock(&self) -> MutexGuard<'_, ExposureCache> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
