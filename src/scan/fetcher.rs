//! Scan fetchers
//!
//! Read-only linear scans over the store file.

use std::path::{Path, PathBuf};

use tracing::trace;

use crate::accessor::TextFileAccessor;
use crate::config::Newline;
use crate::error::{Result, StoreError};
use crate::line::parser;
use crate::line::Record;
use crate::scan::{ScanOutcome, ScanPredicate};

/// Read-only scan operators over one store file
///
/// Construction is cheap and side-effect-free; each fetch opens its own
/// accessor and closes it before returning.
#[derive(Debug, Clone)]
pub struct Fetcher {
    path: PathBuf,
    newline: Newline,
}

impl Fetcher {
    pub fn new(path: impl Into<PathBuf>, newline: Newline) -> Self {
        Self {
            path: path.into(),
            newline,
        }
    }

    /// The store file this fetcher scans
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Fetch every record in physical order
    pub fn fetch_all(&self) -> Result<Vec<Record>> {
        self.fetch(ScanPredicate::AllRecords)
    }

    /// Fetch the first record carrying `id`, scanning no further
    pub fn fetch_by_id(&self, id: i64) -> Result<Option<Record>> {
        let records = self.fetch(ScanPredicate::ById(id))?;
        Ok(records.into_iter().next())
    }

    /// Fetch the highest id recorded in the file, or 0 when it holds none
    pub fn fetch_max_id(&self) -> Result<i64> {
        let records = self.fetch(ScanPredicate::max_id())?;
        Ok(records.last().map(Record::id).unwrap_or(0))
    }

    /// The shared scan loop
    ///
    /// Whitespace-only lines are skipped without counting as data errors.
    /// Read failures wrap as `LineReading`; line-format errors propagate
    /// untouched. The accessor is closed on every exit path.
    fn fetch(&self, mut predicate: ScanPredicate) -> Result<Vec<Record>> {
        let mut accessor = TextFileAccessor::new(self.newline);
        accessor.open(&self.path)?;

        let scanned = Self::scan(&mut accessor, &mut predicate);
        let closed = accessor.close();

        let records = scanned?;
        closed?;

        trace!(
            path = %self.path.display(),
            ?predicate,
            fetched = records.len(),
            "scan finished"
        );
        Ok(records)
    }

    fn scan(accessor: &mut TextFileAccessor, predicate: &mut ScanPredicate) -> Result<Vec<Record>> {
        let mut records = Vec::new();
        let mut line_no = 0usize;

        while let Some(line) = accessor.read_line().map_err(StoreError::line_reading)? {
            line_no += 1;
            if line.trim().is_empty() {
                continue;
            }

            let id = parser::extract_id(&line, line_no)?;
            let body = parser::extract_body(&line, line_no)?;

            let ScanOutcome { matches, complete } = predicate.test(id, body);
            if matches {
                records.push(Record::new(id, body));
            }
            if complete {
                break;
            }
        }

        Ok(records)
    }
}
