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

//! Bounded deduplication of exposure events keyed by flag and subject.

use std::fmt::Display;

use flagcache_core::lru::LruCache;
use serde::{Deserialize, Serialize};

/// Identity of an exposure: the flag that was evaluated and the subject it was evaluated for.
///
/// Both positions take part in identity independently. An empty string is a legal value in
/// either position and is distinct from every other value.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExposureKey {
    pub flag_key: String,
    pub subject_key: String,
}

impl ExposureKey {
    /// Creates a new [`ExposureKey`] instance.
    #[must_use]
    pub fn new(flag_key: &str, subject_key: &str) -> Self {
        Self {
            flag_key: flag_key.to_string(),
            subject_key: subject_key.to_string(),
        }
    }
}

/// Renders both positions quoted, e.g. `"flag"/"user"`, so a `/` inside a key stays unambiguous.
impl Display for ExposureKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}/{:?}", self.flag_key, self.subject_key)
    }
}

/// The evaluation outcome recorded for an [`ExposureKey`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExposureValue {
    pub variant: String,
    pub allocation: String,
}

impl ExposureValue {
    /// Creates a new [`ExposureValue`] instance.
    #[must_use]
    pub fn new(variant: &str, allocation: &str) -> Self {
        Self {
            variant: variant.to_string(),
            allocation: allocation.to_string(),
        }
    }
}

/// A bounded cache deciding which exposures carry new information.
///
/// Only the latest [`ExposureValue`] is retained per [`ExposureKey`]. An exposure is new when its
/// key is absent or its value differs from the retained one. Repeating an identical exposure is
/// reported as a duplicate but still refreshes the entry's recency, so subjects seen often are
/// not evicted in favor of one-off subjects.
///
/// # Thread Safety
///
/// This cache is not thread-safe. Use [`SharedExposureCache`](super::shared::SharedExposureCache)
/// when it must be shared across threads.
///
/// # Examples
///
/// ```
/// use flagcache_common::cache::exposure::ExposureCache;
///
/// let mut cache = ExposureCache::new(100);
/// assert!(cache.add("flag", "user-1", "on", "rollout"));
/// assert!(!cache.add("flag", "user-1", "on", "rollout")); // duplicate
/// assert!(cache.add("flag", "user-1", "off", "rollout")); // changed variant
/// assert_eq!(cache.len(), 1);
/// ```
#[derive(Debug)]
pub struct ExposureCache {
    cache: LruCache<ExposureKey, ExposureValue>,
}

impl ExposureCache {
    /// Creates a new empty [`ExposureCache`] holding at most `capacity` exposures.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        log::debug!("Creating exposure cache with capacity {capacity}");
        Self {
            cache: LruCache::new(capacity),
        }
    }

    /// Returns the capacity of the cache.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.cache.capacity()
    }

    /// Returns the number of exposures in the cache.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Returns whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Records an exposure and returns whether it is new.
    ///
    /// Returns `true` when no exposure is cached for the flag and subject, or the cached variant
    /// or allocation differs; the new value replaces the old one. Returns `false` for an exact
    /// duplicate. In both cases the entry becomes the most recently used.
    ///
    /// With zero capacity nothing is retained, so every exposure is new.
    pub fn add(
        &mut self,
        flag_key: &str,
        subject_key: &str,
        variant: &str,
        allocation: &str,
    ) -> bool {
        let key = ExposureKey::new(flag_key, subject_key);
        let value = ExposureValue::new(variant, allocation);

        let is_new = self.cache.peek(&key) != Some(&value);
        if !is_new {
            log::trace!("Duplicate exposure {key}");
        }

        // Always write so a duplicate is promoted exactly like a fresh exposure
        self.cache.put(key, value);
        is_new
    }

    /// Returns the cached exposure for the flag and subject, promoting it to most recently used.
    pub fn get(&mut self, flag_key: &str, subject_key: &str) -> Option<&ExposureValue> {
        self.cache.get(&ExposureKey::new(flag_key, subject_key))
    }

    /// Returns the cached exposure for the flag and subject without changing its recency.
    #[must_use]
    pub fn peek(&self, flag_key: &str, subject_key: &str) -> Option<&ExposureValue> {
        self.cache.peek(&ExposureKey::new(flag_key, subject_key))
    }

    /// Returns an iterator over cached exposures from least to most recently used.
    pub fn iter(&self) -> impl Iterator<Item = (&ExposureKey, &ExposureValue)> {
        self.cache.iter()
    }

    /// Clears all exposures from the cache.
    pub fn clear(&mut self) {
        log::debug!("Clearing {} cached exposures", self.cache.len());
        self.cache.clear();
    }
}
