//! Employee lookup use-cases.
//!
//! # Responsibility
//! - Turn directory client calls into named employee searches.
//! - Keep presentation layers decoupled from directory details.

pub mod employee_service;
pub mod lookup;
