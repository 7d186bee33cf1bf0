//! # Statline Tools
//!
//! Command-line tooling around the conversion core:
//! - Batch conversion of RON record files, in parallel
//! - An on-disk snapshot source
//! - Record validation
//!
//! All file IO lives here; `statline_core` never touches the filesystem.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod batch;
pub mod error;
pub mod validate;

pub use batch::{convert_path, BatchEntry, DirectorySource};
pub use error::{Result, ToolError};
