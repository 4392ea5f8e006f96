//! Streaming writer and layout engine for the plume code generators.
//!
//! This crate provides the byte-level half of code emission: a [`Writer`]
//! that wraps any [`std::io::Write`] sink and materializes indentation
//! lazily (blank lines never carry trailing whitespace), a column-aligned
//! [`table`](Writer::table) renderer for grouped declarations, and the
//! [`write_string`] / [`write_file`] conveniences that run a render
//! callback against a fresh writer.
//!
//! Language-specific code models (e.g. `plume-codegen-go`) build on top of
//! this crate and stream their output through a single [`Writer`].
//!
//! # Example
//!
//! ```
//! use plume_codegen::{Writer, write_string};
//!
//! let out: Result<String, std::io::Error> = write_string("\t", |w| {
//!     w.write_str("fn main() {")?;
//!     w.newline()?;
//!     w.indent(|w| {
//!         w.write_str("body")?;
//!         w.newline()
//!     })?;
//!     w.write_str("}")?;
//!     w.newline()
//! });
//! assert_eq!(out.unwrap(), "fn main() {\n\tbody\n}\n");
//! ```

mod source;
mod writer;

pub use source::{write_file, write_string};
pub use writer::{TableRow, Writer};
