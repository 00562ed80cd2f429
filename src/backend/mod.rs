// SPDX-License-Identifier: GPL-3.0-or-later
// src/backend/mod.rs
//
// Face-matching backend: wire types and the HTTP client.

pub mod client;
pub mod types;

pub use client::BackendClient;
pub use types::*;
