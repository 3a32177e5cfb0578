//! Scan persisters
//!
//! Linear-scan mutations of the store file: append a new line, or locate
//! and update/remove a line by id.

use std::path::{Path, PathBuf};

use tracing::trace;

use crate::accessor::TextFileAccessor;
use crate::config::Newline;
use crate::error::{Result, StoreError};
use crate::line::parser;

/// What to do with the line once it is located
enum Mutation<'a> {
    Update(&'a str),
    Remove,
}

/// Mutating scan operators over one store file
///
/// Construction is cheap and side-effect-free; each operation opens its
/// own accessor and closes it before returning.
#[derive(Debug, Clone)]
pub struct Persister {
    path: PathBuf,
    newline: Newline,
}

impl Persister {
    pub fn new(path: impl Into<PathBuf>, newline: Newline) -> Self {
        Self {
            path: path.into(),
            newline,
        }
    }

    /// The store file this persister mutates
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `line` as a new physical line
    ///
    /// The caller has already composed `line` as a full wire-format line.
    pub fn add(&self, line: &str) -> Result<()> {
        let mut accessor = TextFileAccessor::new(self.newline);
        accessor.open(&self.path)?;

        let added = accessor
            .add_line(line)
            .map_err(StoreError::line_modification);
        let closed = accessor.close();

        added?;
        closed?;

        trace!(path = %self.path.display(), "line appended");
        Ok(())
    }

    /// Replace the first line carrying `id` with `line`
    ///
    /// A silent no-op when no line matches.
    pub fn update(&self, id: i64, line: &str) -> Result<()> {
        self.modify(id, Mutation::Update(line))
    }

    /// Delete the first line carrying `id`
    ///
    /// A silent no-op when no line matches.
    pub fn remove(&self, id: i64) -> Result<()> {
        self.modify(id, Mutation::Remove)
    }

    /// Locate-then-mutate scan
    ///
    /// Scans by id only, skipping whitespace-only lines. On a match the
    /// cursor is seeked one line back to re-land on the matched line's
    /// start before the mutation is applied. Failures during the
    /// seek/replace step wrap as `LinePersistence`; read failures as
    /// `LineModification`; line-format errors propagate untouched.
    fn modify(&self, id: i64, mutation: Mutation<'_>) -> Result<()> {
        let mut accessor = TextFileAccessor::new(self.newline);
        accessor.open(&self.path)?;

        let modified = Self::locate_and_apply(&mut accessor, id, mutation);
        let closed = accessor.close();

        let matched = modified?;
        closed?;

        trace!(path = %self.path.display(), id, matched, "modify finished");
        Ok(())
    }

    fn locate_and_apply(
        accessor: &mut TextFileAccessor,
        id: i64,
        mutation: Mutation<'_>,
    ) -> Result<bool> {
        let mut line_no = 0usize;

        while let Some(line) = accessor
            .read_line()
            .map_err(StoreError::line_modification)?
        {
            line_no += 1;
            if line.trim().is_empty() {
                continue;
            }

            let read_id = parser::extract_id(&line, line_no)?;
            if read_id != id {
                continue;
            }

            accessor
                .seek_lines(-1)
                .and_then(|_| match mutation {
                    Mutation::Update(text) => accessor.update_line(text),
                    Mutation::Remove => accessor.remove_line(),
                })
                .map_err(StoreError::line_persistence)?;
            return Ok(true);
        }

        Ok(false)
    }
}
