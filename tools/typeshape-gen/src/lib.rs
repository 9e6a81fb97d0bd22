// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Schema extraction front-end for Go sources.
//!
//! Scans `type X struct { ... }` declarations, or infers records from a JSON
//! sample document, into a [`TypeProvider`](typeshape::TypeProvider), runs
//! the extraction pass and writes the resulting schema as JSON.
//!
//! # Quick Start
//!
//! ```bash
//! # Schema of SS and everything it references, printed to stdout
//! typeshape-gen extract --input models.go --root SS
//!
//! # Every struct in the files, written to a file
//! typeshape-gen extract --input a.go --input b.go --all --output schema.json
//!
//! # Records inferred from a JSON document, top-level record named Order
//! typeshape-gen extract --json order.json --root Order
//!
//! # Using a config file
//! typeshape-gen extract --config typeshape.toml
//! ```
//!
//! # Configuration File
//!
//! ```toml
//! inputs = ["models/user.go"]
//! roots = ["User"]
//! output = "schema/user.json"
//! pretty = true
//! fail_on_diagnostics = false
//! log_level = "info"
//! ```

pub mod config;
pub mod go;
pub mod json;
pub mod output;

pub use config::{ConfigError, GenConfig};
pub use go::{GoSource, ScanError};
pub use json::{JsonSample, SampleError};
