//! Version resolution layer
//!
//! Determines where a single dependency can move: its latest acceptable
//! version, and the lowest version clearing all known security advisories.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Registry  │────▶│   Resolver  │◀────│   Filters   │
//! │  (fetch)    │     │ (orchestrate│     │ (acceptance)│
//! └─────────────┘     │  + memoize) │     └─────────────┘
//!                     └─────────────┘            │
//!                            │                   ▼
//!                            ▼             ┌─────────────┐
//!                     ┌─────────────┐      │   Scheme    │
//!                     │  Advisories │      │(version cmp)│
//!                     └─────────────┘      └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`registry`]: listing fetch over the sparse and default wire protocols
//! - [`resolver`]: the public resolution pipeline with its listing cache
//! - [`filter`]: ordered acceptance stages applied to candidate sets
//! - [`scheme`]: injected version grammar, keyed by package manager kind
//! - [`advisory`]: vulnerable-range sets for security fix selection
//! - [`error`]: error types for registry and resolution operations

pub mod advisory;
pub mod error;
pub mod filter;
pub mod registry;
pub mod resolver;
pub mod scheme;
