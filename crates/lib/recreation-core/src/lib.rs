//! Core types and services for hk-recreation-mcp.
//!
//! This crate owns the creative goods trade dataset: the fetcher that pulls the
//! published CSV, the canonical record model, and the control plane that
//! filters and normalizes raw rows into trade records.

pub mod control;
pub mod fetch;
pub mod models;
pub mod schema;
