//! Core types for ifacemaker.
//!
//! Provides the extracted method model ([`model::Method`], [`model::StructData`]),
//! the per-scan aggregation map ([`index::StructIndex`]), and configuration loading.

pub mod config;
pub mod index;
pub mod model;
