//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate pure transitions and snapshot persistence.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod plan_service;
