// SPDX-License-Identifier: MIT
// Copyright 2026 Aqualog Authors

//! Services module - business logic layer.

pub mod identity;

pub use identity::IdentityClient;
