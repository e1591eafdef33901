//! Keyword-anchored context selection for brand-guide question answering.
//!
//! `brand-context` loads a single plain-text brand guide once, maps each
//! incoming question to a bounded excerpt of it through an ordered table of
//! keyword-to-anchor rules, and forwards that excerpt with a persona system
//! prompt to a hosted chat model. Selection is pure and deterministic:
//! identical inputs always produce identical windows.

pub mod answer;
pub mod config;
pub mod document;
pub mod selection;
pub mod server;
pub mod types;
