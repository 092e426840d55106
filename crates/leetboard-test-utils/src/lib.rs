// SPDX-FileCopyrightText: 2026 Leetboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Leetboard integration tests.
//!
//! Provides mock collaborators for fast, deterministic, CI-runnable
//! tests without external services.
//!
//! # Components
//!
//! - [`MockFeed`] - Scripted feed source with failure injection
//! - [`MockNotifier`] - Capturing notifier with delivery-failure injection

pub mod mock_feed;
pub mod mock_notifier;

pub use mock_feed::MockFeed;
pub use mock_notifier::{MockNotifier, SentMessage};
