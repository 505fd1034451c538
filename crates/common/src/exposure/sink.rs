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

//! Exposure sink writing events through the `log` facade.

use super::{ExposureEvent, ExposureSink};

/// Log target used for emitted exposure events.
pub const EXPOSURE_LOG_TARGET: &str = "flagcache::exposure";

/// An [`ExposureSink`] that writes each event as a JSON line at `INFO` level.
///
/// Events are logged under [`EXPOSURE_LOG_TARGET`] so they can be routed separately from other
/// diagnostics.
#[derive(Debug, Default)]
pub struct LogSink {
    recorded: u64,
}

impl LogSink {
    /// Creates a new [`LogSink`] instance.
    #[must_use]
    pub const fn new() -> Self {
        Self { recorded: 0 }
    }

    /// Returns the number of events recorded.
    #[must_use]
    pub const fn recorded(&self) -> u64 {
        self.recorded
    }
}

impl ExposureSink for LogSink {
    fn record(&mut self, event: ExposureEvent) {
        match serde_json::to_string(&event) {
            Ok(json) => log::info!(target: EXPOSURE_LOG_TARGET, "{json}"),
            Err(e) => log::error!(
                target: EXPOSURE_LOG_TARGET,
                "Failed to serialize exposure for {:?}/{:?}: {e}",
                event.flag_key,
                event.subject_key
            ),
        }
        self.recorded += 1;
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rstest::rstest;

    use super::*;
    use crate::exposure::Attributes;

    #[rstest]
    fn test_log_sink_counts_records() {
        let mut sink = LogSink::new();
        assert_eq!(sink.recorded(), 0);

        for subject in ["a", "b"] {
            sink.record(ExposureEvent {
                timestamp: Utc::now(),
                flag_key: "flag".to_string(),
                subject_key: subject.to_string(),
                variant: "on".to_string(),
                allocation: "alloc".to_string(),
                subject_attributes: Attributes::new(),
            });
        }

        assert_eq!(sink.recorded(), 2);
    }
}
