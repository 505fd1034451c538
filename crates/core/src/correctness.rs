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

//! Functions for runtime correctness checks at API boundaries.
//!
//! Checks return `anyhow::Result` so callers can propagate a descriptive error to the boundary
//! that supplied the bad value.

/// Checks that a signed `capacity` is non-negative and returns it as a `usize`.
///
/// Negative values are rejected rather than clamped to zero.
///
/// # Errors
///
/// Returns an error if `capacity` is negative or does not fit in a `usize`.
pub fn check_non_negative_capacity(capacity: i64, param: &str) -> anyhow::Result<usize> {
    if capacity < 0 {
        anyhow::bail!("invalid `{param}`, must be non-negative, was {capacity}");
    }
    usize::try_from(capacity)
        .map_err(|e| anyhow::anyhow!("invalid `{param}`, {capacity} exceeds platform size: {e}"))
}

/// Parses a capacity from a string, rejecting negative or non-numeric values.
///
/// # Errors
///
/// Returns an error if `value` is not an integer or is negative.
pub fn parse_capacity(value: &str, param: &str) -> anyhow::Result<usize> {
    let parsed: i64 = value
        .trim()
        .parse()
        .map_err(|e| anyhow::anyhow!("invalid `{param}` '{value}': {e}"))?;
    check_non_negative_capacity(parsed, param)
}
