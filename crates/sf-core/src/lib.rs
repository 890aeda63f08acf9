//! Core data structures and ingestion for StatFlow
//!
//! This crate provides the request-scoped data model (tables of tagged
//! cells), file ingestion behind a single format-hinted interface, column
//! classification, and validated model specifications. Model fitting lives
//! in `sf-models`.

pub mod data;
pub mod ingest;
pub mod schema;
pub mod spec;
