// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Inkwire core: error taxonomy, protocol vocabulary and server configuration
// shared by the IPP crates.

pub mod config;
pub mod error;
pub mod types;

pub use config::ServerConfig;
pub use error::{BuildError, InkwireError, MalformedKind, MalformedResponse, TransportError};
pub use types::*;
