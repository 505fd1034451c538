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

//! Exposure deduplication for feature-flag evaluations.
//!
//! The `flagcache-common` crate decides which flag evaluations are worth reporting as
//! exposures. An [`ExposureCache`](cache::ExposureCache) remembers the latest
//! `(variant, allocation)` served per flag and subject within a fixed capacity, and an
//! [`ExposureRecorder`](exposure::ExposureRecorder) wires it between an injected evaluator and
//! an exposure sink.
//!
//! # Feature flags
//!
//! - `python`: Enables Python bindings from [PyO3](https://pyo3.rs).
//! - `extension-module`: Builds as a Python extension module (used with `python`).
//! - `tracing-bridge`: Enables a `tracing` subscriber that also captures `log` records.

#![deny(unsafe_code)]
#![deny(nonstandard_style)]
#![deny(missing_debug_implementations)]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]

pub mod cache;
pub mod config;
pub mod exposure;

#[cfg(feature = "tracing-bridge")]
pub mod logging;

#[cfg(feature = "python")]
pub mod python;
