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

//! Exposure events and the collaborators that produce and consume them.
//!
//! Flag evaluation and exposure delivery live outside this crate. They are modeled as the
//! [`FlagEvaluator`] and [`ExposureSink`] traits so the deduplication in
//! [`ExposureRecorder`](recorder::ExposureRecorder) can be exercised on its own.

pub mod recorder;
pub mod sink;

use ahash::AHashMap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

pub use recorder::ExposureRecorder;
pub use sink::{EXPOSURE_LOG_TARGET, LogSink};

/// Subject attributes passed through to the evaluator and attached to exposure events.
pub type Attributes = AHashMap<String, serde_json::Value>;

/// The reason a flag evaluation did not produce a variant.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    AsRefStr,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EvaluationErrorCode {
    FlagNotFound,
    ParseError,
    TypeMismatch,
    TargetingKeyMissing,
    InvalidContext,
    ProviderNotReady,
    General,
}

/// The outcome of evaluating a flag for a subject.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub variant: Option<String>,
    pub allocation: Option<String>,
    pub error_code: Option<EvaluationErrorCode>,
}

impl EvaluationResult {
    /// Creates a successful result for the given variant and allocation.
    #[must_use]
    pub fn matched(variant: &str, allocation: &str) -> Self {
        Self {
            variant: Some(variant.to_string()),
            allocation: Some(allocation.to_string()),
            error_code: None,
        }
    }

    /// Creates a failed result with the given error code.
    #[must_use]
    pub const fn error(error_code: EvaluationErrorCode) -> Self {
        Self {
            variant: None,
            allocation: None,
            error_code: Some(error_code),
        }
    }

    /// Returns the `(variant, allocation)` pair to expose, if the evaluation warrants one.
    ///
    /// Evaluations with an error code, or without both a variant and an allocation (such as
    /// a default value served outside any allocation), produce no exposure.
    #[must_use]
    pub fn exposure(&self) -> Option<(&str, &str)> {
        if self.error_code.is_some() {
            return None;
        }
        Some((self.variant.as_deref()?, self.allocation.as_deref()?))
    }
}

/// A record that a subject was served a flag variant from an allocation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExposureEvent {
    pub timestamp: DateTime<Utc>,
    pub flag_key: String,
    pub subject_key: String,
    pub variant: String,
    pub allocation: String,
    pub subject_attributes: Attributes,
}

/// Evaluates feature flags for a subject.
pub trait FlagEvaluator {
    /// Evaluates `flag_key` for the subject identified by `targeting_key`.
    fn evaluate(
        &self,
        flag_key: &str,
        targeting_key: &str,
        attributes: &Attributes,
    ) -> EvaluationResult;
}

impl<F> FlagEvaluator for F
where
    F: Fn(&str, &str, &Attributes) -> EvaluationResult,
{
    fn evaluate(
        &self,
        flag_key: &str,
        targeting_key: &str,
        attributes: &Attributes,
    ) -> EvaluationResult {
        self(flag_key, targeting_key, attributes)
    }
}

/// Receives exposure events that passed deduplication.
pub trait ExposureSink {
    /// Records a single exposure event.
    fn record(&mut self, event: ExposureEvent);
}

impl ExposureSink for Vec<ExposureEvent> {
    fn record(&mut self, event: ExposureEvent) {
        self.push(event);
    }
}
