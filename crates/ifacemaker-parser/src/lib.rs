//! Tree-sitter based Go scanning for ifacemaker.
//!
//! Parses a Go module, classifies its top-level declarations, renders method
//! signatures, and aggregates them per receiver type.

pub mod decls;
pub mod scan;
pub mod signature;
pub mod treesitter;

pub use scan::{ScanOptions, collect_imports, scan, scan_bytes};
pub use treesitter::ScanError;
