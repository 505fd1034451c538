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

//! Tracing subscriber for surfacing flagcache diagnostics and exposure events.
//!
//! The crate logs through the `log` facade. This module installs a `tracing` subscriber that
//! also captures `log` records, so cache diagnostics and [`LogSink`](crate::exposure::LogSink)
//! output share one formatted stream on stdout.
//!
//! Without `RUST_LOG` the filter is [`DEFAULT_DIRECTIVE`]: warnings from everywhere plus the
//! exposure events written on [`EXPOSURE_LOG_TARGET`].
//!
//! # Example
//!
//! ```text
//! RUST_LOG=flagcache::exposure=info,flagcache_core=trace ./my_service
//! ```

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{Event, Level, Subscriber};
use tracing_log::NormalizeEvent;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, FmtContext, FormatEvent, FormatFields, format::Writer},
    prelude::*,
    registry::LookupSpan,
};

use crate::exposure::EXPOSURE_LOG_TARGET;

/// Filter directive used when `RUST_LOG` is not set.
pub const DEFAULT_DIRECTIVE: &str = "warn,flagcache::exposure=info";

static TRACING_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Writes one line per event: timestamp, bracketed level, target, fields.
///
/// Records forwarded from `log` are normalized so the line shows the emitting module (or the
/// explicit `target:`) rather than the bridge's own `log` target. Exposure records are tagged
/// `[EXPOSURE]` in place of their level.
struct DiagnosticFormatter;

impl<S, N> FormatEvent<S, N> for DiagnosticFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let normalized = event.normalized_metadata();
        let metadata = normalized.as_ref().unwrap_or_else(|| event.metadata());
        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.9fZ");
        let target = metadata.target();

        let tag = if target == EXPOSURE_LOG_TARGET {
            "[EXPOSURE]"
        } else {
            level_tag(*metadata.level())
        };

        write!(writer, "{timestamp} {tag} {target}: ")?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

const fn level_tag(level: Level) -> &'static str {
    match level {
        Level::TRACE => "[TRACE]",
        Level::DEBUG => "[DEBUG]",
        Level::INFO => "[INFO]",
        Level::WARN => "[WARN]",
        Level::ERROR => "[ERROR]",
    }
}

fn build_filter(directive: &str) -> anyhow::Result<EnvFilter> {
    EnvFilter::try_new(directive)
        .map_err(|e| anyhow::anyhow!("Invalid log filter directive '{directive}': {e}"))
}

fn filter_from_env(default_directive: &str) -> anyhow::Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => build_filter(default_directive),
    }
}

/// Returns whether the tracing subscriber has been initialized.
#[must_use]
pub fn tracing_is_initialized() -> bool {
    TRACING_INITIALIZED.load(Ordering::Relaxed)
}

/// Initializes the subscriber with [`DEFAULT_DIRECTIVE`] as the fallback filter.
///
/// # Errors
///
/// Returns an error if a global subscriber or logger has already been installed.
pub fn init_tracing() -> anyhow::Result<()> {
    init_tracing_with(DEFAULT_DIRECTIVE)
}

/// Initializes a tracing subscriber that also forwards `log` records.
///
/// `RUST_LOG` takes precedence when set and valid; otherwise `default_directive` is used.
///
/// # Errors
///
/// Returns an error if `default_directive` is needed and does not parse, or if a global
/// subscriber or logger has already been installed.
pub fn init_tracing_with(default_directive: &str) -> anyhow::Result<()> {
    if TRACING_INITIALIZED.load(Ordering::SeqCst) {
        anyhow::bail!("Tracing subscriber already initialized");
    }

    let filter = filter_from_env(default_directive)?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().event_format(DiagnosticFormatter))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing subscriber: {e}"))?;

    log::debug!("Tracing initialized");
    TRACING_INITIALIZED.store(true, Ordering::SeqCst);
    Ok(())
}
