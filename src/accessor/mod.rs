//! File Accessor Module
//!
//! Byte-level primitive over one open store file.
//!
//! ## Responsibilities
//! - Sequential line reads with exact cursor arithmetic
//! - Forward/backward seeking by whole lines
//! - Append and in-place update/removal of the line at the cursor
//! - Guaranteed handle release on every exit path
//!
//! ## Line Endings
//! `\r`, `\n` and `\r\n` are each recognised as a single logical
//! terminator on read. Writes use the convention configured via
//! [`crate::config::Newline`]. All content is UTF-8.
//!
//! ## Cursor Model
//! ```text
//! [12]first record\n[7]second record\n[9]third
//! ^                ^                  ^
//! offset 0         line start         line start
//! ```
//! Every operation is relative to the current byte offset of the single
//! open handle. Line starts are not indexed: backward seeks rescan from
//! the beginning of the file.

mod text_file;

pub use text_file::TextFileAccessor;
