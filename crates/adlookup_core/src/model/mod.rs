//! Flat employee domain model.
//!
//! # Responsibility
//! - Define the record shape every directory search is projected onto.
//! - Name the searchable fields and their directory attribute names.
//!
//! # Invariants
//! - Record fields are plain strings; an absent attribute is `""`.

pub mod employee;
