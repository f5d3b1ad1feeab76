//! Domains module containing business logic organized by bounded contexts.
//!
//! The server only exposes tools; each Mercury endpoint lives under
//! `tools::definitions`.

pub mod tools;
