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

//! Evaluation wrapper that emits each distinct exposure once.

use chrono::Utc;

use super::{Attributes, EvaluationResult, ExposureEvent, ExposureSink, FlagEvaluator};
use crate::{cache::exposure::ExposureCache, config::ExposureCacheConfig};

/// Evaluates flags and forwards new exposures to a sink.
///
/// Every evaluation result is returned to the caller unchanged. An exposure event is emitted
/// only when the evaluation produced a variant and an allocation, and the [`ExposureCache`]
/// reports the `(variant, allocation)` pair as new for the flag and subject.
#[derive(Debug)]
pub struct ExposureRecorder<E, S>
where
    E: FlagEvaluator,
    S: ExposureSink,
{
    evaluator: E,
    sink: S,
    cache: ExposureCache,
    enabled: bool,
}

impl<E, S> ExposureRecorder<E, S>
where
    E: FlagEvaluator,
    S: ExposureSink,
{
    /// Creates a new [`ExposureRecorder`] using the given cache.
    #[must_use]
    pub const fn new(evaluator: E, sink: S, cache: ExposureCache) -> Self {
        Self {
            evaluator,
            sink,
            cache,
            enabled: true,
        }
    }

    /// Creates a new [`ExposureRecorder`] from configuration.
    #[must_use]
    pub fn from_config(config: &ExposureCacheConfig, evaluator: E, sink: S) -> Self {
        if !config.enabled {
            log::info!("Exposure recording disabled");
        }

        Self {
            evaluator,
            sink,
            cache: ExposureCache::new(config.capacity),
            enabled: config.enabled,
        }
    }

    /// Returns whether exposures are being recorded.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Returns a reference to the exposure cache.
    #[must_use]
    pub const fn cache(&self) -> &ExposureCache {
        &self.cache
    }

    /// Returns a reference to the sink.
    #[must_use]
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Evaluates `flag_key` for the subject and records the exposure if it is new.
    pub fn evaluate(
        &mut self,
        flag_key: &str,
        targeting_key: &str,
        attributes: &Attributes,
    ) -> EvaluationResult {
        let result = self.evaluator.evaluate(flag_key, targeting_key, attributes);

        if let Some(code) = result.error_code {
            log::debug!("Evaluation of {flag_key} for {targeting_key} failed: {code}");
        }

        if self.enabled
            && let Some((variant, allocation)) = result.exposure()
            && self.cache.add(flag_key, targeting_key, variant, allocation)
        {
            self.sink.record(ExposureEvent {
                timestamp: Utc::now(),
                flag_key: flag_key.to_string(),
                subject_key: targeting_key.to_string(),
                variant: variant.to_string(),
                allocation: allocation.to_string(),
                subject_attributes: attributes.clone(),
            });
        }

        result
    }
}
