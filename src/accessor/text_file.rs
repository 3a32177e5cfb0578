//! TextFileAccessor implementation
//!
//! One open read/write handle plus the byte/line-boundary arithmetic the
//! scan operators are built on.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;

use bytes::{BufMut, BytesMut};

use crate::config::Newline;
use crate::error::{Result, StoreError};

/// Initial capacity of the line read buffer
const DEFAULT_BUFFER_SIZE: usize = 128;

/// Line-addressable accessor over one store file
///
/// The handle is `None` when closed; every operation on a closed accessor
/// fails with [`StoreError::Closed`]. Dropping the accessor releases the
/// handle, so an early `?` return cannot leak it; `close` exists to make
/// the release explicit and flush pending writes.
pub struct TextFileAccessor {
    file: Option<File>,
    newline: Newline,
}

impl TextFileAccessor {
    /// Create a closed accessor writing the given line-ending convention
    pub fn new(newline: Newline) -> Self {
        Self {
            file: None,
            newline,
        }
    }

    /// (Re)open the store file, creating it if absent
    ///
    /// Any previously open handle is discarded first.
    pub fn open(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Err(StoreError::InvalidArgument(
                "store file path must not be empty".into(),
            ));
        }
        self.close()?;

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(path)
            .map_err(|e| StoreError::file_open(path, e.into()))?;
        self.file = Some(file);
        Ok(())
    }

    /// Read one line starting at the cursor
    ///
    /// Advances the cursor past the line ending. Returns `Ok(Some(""))`
    /// for a line holding only an ending, and `Ok(None)` only when zero
    /// bytes were read before end-of-file.
    pub fn read_line(&mut self) -> Result<Option<String>> {
        let file = self.handle_mut()?;
        let mut buf = BytesMut::with_capacity(DEFAULT_BUFFER_SIZE);

        loop {
            match read_byte(file)? {
                None => {
                    if buf.is_empty() {
                        return Ok(None);
                    }
                    break;
                }
                Some(b'\n') => break,
                Some(b'\r') => {
                    consume_lf_after_cr(file)?;
                    break;
                }
                Some(byte) => buf.put_u8(byte),
            }
        }

        Ok(Some(String::from_utf8(buf.to_vec())?))
    }

    /// Move the cursor by `count` whole lines
    ///
    /// Positive counts scan forward, stopping at end-of-file when fewer
    /// lines remain. Negative counts rescan from the file start to find
    /// the line-start offsets preceding the cursor, then reposition
    /// `|count|` of them back, clamped to offset 0. Zero is a no-op.
    pub fn seek_lines(&mut self, count: i64) -> Result<()> {
        let file = self.handle_mut()?;
        if count > 0 {
            seek_lines_forward(file, count)?;
        } else if count < 0 {
            seek_lines_backward(file, count.unsigned_abs())?;
        }
        Ok(())
    }

    /// Append `text` as a new physical line at end-of-file
    ///
    /// A line ending is written first unless the file is empty or already
    /// ends with one, so `add_line("")` at most terminates the last line.
    pub fn add_line(&mut self, text: &str) -> Result<()> {
        let newline = self.newline;
        let file = self.handle_mut()?;

        file.seek(SeekFrom::End(0))?;

        let mut out = BytesMut::with_capacity(text.len() + 2);
        if !preceded_by_eol(file)? {
            out.put_slice(newline.as_str().as_bytes());
        }
        out.put_slice(text.as_bytes());

        file.write_all(&out)?;
        Ok(())
    }

    /// Replace the line at the cursor with `text`
    ///
    /// With the cursor at end-of-file this behaves like [`Self::add_line`].
    /// The cursor is left just past the written replacement.
    pub fn update_line(&mut self, text: &str) -> Result<()> {
        if text.trim().is_empty() {
            return Err(StoreError::InvalidArgument(
                "replacement line must not be empty or whitespace-only".into(),
            ));
        }
        self.splice_current_line(text)
    }

    /// Delete the line at the cursor, shifting the rest of the file up
    ///
    /// A no-op when the cursor is at end-of-file.
    pub fn remove_line(&mut self) -> Result<()> {
        self.splice_current_line("")
    }

    /// Byte offset of the cursor
    pub fn current_position(&mut self) -> Result<u64> {
        Ok(self.handle_mut()?.stream_position()?)
    }

    /// Flush and release the handle; idempotent
    pub fn close(&mut self) -> Result<()> {
        if let Some(mut file) = self.file.take() {
            file.flush()?;
        }
        Ok(())
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    fn handle_mut(&mut self) -> Result<&mut File> {
        self.file.as_mut().ok_or(StoreError::Closed)
    }

    /// In-place variable-length replacement of the line at the cursor
    ///
    /// An empty `text` deletes the line. Everything between the old
    /// line's end and end-of-file is buffered and rewritten immediately
    /// after the replacement, and the file is resized to exactly
    /// `start + replacement + tail`.
    fn splice_current_line(&mut self, text: &str) -> Result<()> {
        let newline = self.newline;

        let at_eof = {
            let file = self.handle_mut()?;
            file.stream_position()? == file.metadata()?.len()
        };
        if at_eof {
            return if text.is_empty() {
                Ok(())
            } else {
                self.add_line(text)
            };
        }

        let file = self.handle_mut()?;
        let len = file.metadata()?.len();
        let start = file.stream_position()?;

        // the old line's exclusive end
        skip_line(file)?;
        let end = file.stream_position()?;

        let tail_len = (len - end) as usize;
        let mut tail = vec![0u8; tail_len];
        if tail_len > 0 {
            file.read_exact(&mut tail)?;
        }

        // the replacement is terminated only when content follows it
        let mut replacement = BytesMut::with_capacity(text.len() + 2);
        if !text.is_empty() {
            replacement.put_slice(text.as_bytes());
            if tail_len > 0 {
                replacement.put_slice(newline.as_str().as_bytes());
            }
        }

        file.set_len(start + (replacement.len() + tail.len()) as u64)?;
        file.seek(SeekFrom::Start(start))?;
        if !replacement.is_empty() {
            file.write_all(&replacement)?;
        }
        if tail_len > 0 {
            file.write_all(&tail)?;
        }

        file.seek(SeekFrom::Start(start + replacement.len() as u64))?;
        Ok(())
    }
}

impl Default for TextFileAccessor {
    fn default() -> Self {
        Self::new(Newline::default())
    }
}

// =============================================================================
// Byte-Level Primitives
// =============================================================================

fn read_byte(file: &mut File) -> io::Result<Option<u8>> {
    let mut byte = [0u8; 1];
    match file.read(&mut byte)? {
        0 => Ok(None),
        _ => Ok(Some(byte[0])),
    }
}

/// After a `\r`, swallow a directly following `\n` so `\r\n` counts as
/// one terminator; any other byte is pushed back.
fn consume_lf_after_cr(file: &mut File) -> io::Result<()> {
    match read_byte(file)? {
        Some(b'\n') | None => Ok(()),
        Some(_) => {
            file.seek(SeekFrom::Current(-1))?;
            Ok(())
        }
    }
}

/// Consume bytes up to and including the next line ending
///
/// Returns `false` when end-of-file was reached before an ending.
fn skip_line(file: &mut File) -> io::Result<bool> {
    loop {
        match read_byte(file)? {
            None => return Ok(false),
            Some(b'\n') => return Ok(true),
            Some(b'\r') => {
                consume_lf_after_cr(file)?;
                return Ok(true);
            }
            Some(_) => {}
        }
    }
}

fn seek_lines_forward(file: &mut File, count: i64) -> io::Result<()> {
    for _ in 0..count {
        if !skip_line(file)? {
            break;
        }
    }
    Ok(())
}

/// Rescan from the file start, recording every line-start offset strictly
/// below the initial cursor, then land `count` entries back.
fn seek_lines_backward(file: &mut File, count: u64) -> io::Result<()> {
    let init_pos = file.stream_position()?;
    if init_pos == 0 {
        return Ok(());
    }

    file.seek(SeekFrom::Start(0))?;
    let mut line_starts: Vec<u64> = Vec::new();
    loop {
        skip_line(file)?;
        let pos = file.stream_position()?;
        if pos < init_pos {
            line_starts.push(pos);
        } else {
            break;
        }
    }

    let target = (line_starts.len() as u64)
        .checked_sub(count)
        .map(|idx| line_starts[idx as usize])
        .unwrap_or(0);
    file.seek(SeekFrom::Start(target))?;
    Ok(())
}

/// True when the cursor sits at offset 0 or right after a line ending
fn preceded_by_eol(file: &mut File) -> io::Result<bool> {
    if file.stream_position()? == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::Current(-1))?;
    Ok(matches!(read_byte(file)?, Some(b'\r') | Some(b'\n')))
}
