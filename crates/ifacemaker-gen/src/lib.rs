//! # ifacemaker-gen
//!
//! Turns aggregated method signatures into a Go interface declaration.
//!
//! - **interface**: deterministic textual assembly of package, imports and
//!   interface body
//! - **format**: canonicalization, either in-process (tree-sitter) or through
//!   an external program such as `goimports`
//! - **imports**: assumed package names and unused-import pruning
//! - **merge**: combining per-file scan results for one type

pub mod format;
pub mod imports;
pub mod interface;
pub mod merge;

pub use format::{CommandFormatter, FormatError, Formatter, GoFormatter, formatter_from_config};
pub use interface::{InterfaceRequest, make_interface, render_interface};
pub use merge::merge_struct_data;
