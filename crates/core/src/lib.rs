//! Core business logic for newlands.
//!
//! Services here implement the engagement and social-graph operations the
//! request-handling layer consumes in-process: the follow graph, the three
//! content stores, per-kind comment threads, the polymorphic like ledger,
//! and notification fan-out. Every operation takes the acting user
//! explicitly; nothing here reaches into session state.

pub mod services;

pub use services::*;
