//! Core use-case services.
//!
//! # Responsibility
//! - Pair the in-memory store with a persistence backend.
//! - Keep UI/CLI layers decoupled from storage details.

pub mod journal_service;
