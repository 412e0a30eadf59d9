// SPDX-License-Identifier: MIT
// Copyright 2026 Aqualog Authors

//! Middleware modules (authentication, security, etc.).

pub mod auth;
pub mod security;

pub use auth::require_auth;
