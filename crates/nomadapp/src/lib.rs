//! # Nomad Architecture
//!
//! Nomad is the **local-first data layer** of a city discovery app. It filters
//! and sorts city records, and keeps everything the user owns (reviews,
//! favorites, bookmarks, joined events, profile) in a client-side key-value
//! store. Rendering, routing and the remote record service live elsewhere; the
//! `nomad` CLI is one possible client.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Client (the `nomad` CLI, or any other UI)                  │
//! │  - Parses input, formats output, owns stdout/stderr         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Wires stores to one backend, validates input             │
//! └─────────────────────────────────────────────────────────────┘
//!                 │                             │
//!                 ▼                             ▼
//! ┌───────────────────────────┐ ┌───────────────────────────────┐
//! │  Filter/Sort Engine       │ │  Sub-stores (store/)          │
//! │  (filters/)               │─▶  reviews, id sets, profile    │
//! │  pure over city records   │ │  total: never fail            │
//! └───────────────────────────┘ └───────────────────────────────┘
//!                                               │
//!                                               ▼
//!                               ┌───────────────────────────────┐
//!                               │  KvBackend                    │
//!                               │  FsBackend / MemBackend       │
//!                               └───────────────────────────────┘
//! ```
//!
//! The engine reads the favorites and bookmarks stores for its gating stages;
//! nothing else crosses between the two halves.
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr and never exits the
//! process. Diagnostics go through `tracing`; installing a subscriber is the
//! client's business.
//!
//! ## Module Overview
//!
//! - [`api`]: The facade and activity summary
//! - [`filters`]: Filter pipeline, sort keys, region catalog, query strings
//! - [`store`]: Key-value abstraction, backends and the sub-stores
//! - [`model`]: Cities, reviews, profiles
//! - [`validation`]: Review input rules
//! - [`config`]: `nomad.toml` settings
//! - [`init`]: Data directory resolution and startup
//! - [`error`]: Error types

pub mod api;
pub mod config;
pub mod error;
pub mod filters;
pub mod init;
pub mod model;
pub mod store;
pub mod validation;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
