//! reionview-slice - Compact per-axis slice grammar
//!
//! This crate provides the textual grammar used to select a slab out of a
//! cubic simulation grid, one token per spatial axis:
//!
//! # Slice Syntax
//!
//! - **Wildcard**: `:` selects the entire axis
//! - **Range**: `10:20` selects cells `[10, 20)`
//! - **Open start**: `:20` selects cells `[0, 20)`
//! - **Single cell**: `10` or `10:` selects exactly `[10, 11)`
//!
//! # Examples
//!
//! ```ignore
//! use reionview_slice::parse_slice_spec;
//!
//! let spec = parse_slice_spec(":,10,:", 256)?;
//! let spec = parse_slice_spec("5:20,:,0:1", 256)?;
//! ```

pub mod ast;
pub mod parser;
pub mod slab;

pub use ast::*;
pub use parser::*;
pub use slab::*;
