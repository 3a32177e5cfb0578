//! Scan predicates
//!
//! Per-operation match logic for the shared scan loop, kept as plain data
//! variants so the loop itself lives in exactly one place.

/// What the predicate decided for one scanned record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ScanOutcome {
    /// Collect this record into the result list
    pub matches: bool,

    /// Stop scanning after this record
    pub complete: bool,
}

/// Early-exit test applied to every data line of a scan
#[derive(Debug)]
pub(crate) enum ScanPredicate {
    /// Every record matches; the scan always runs to end-of-file
    AllRecords,

    /// The first record with this id matches and completes the scan
    ById(i64),

    /// A record matches whenever its id exceeds the running maximum;
    /// the last match of a full scan carries the file's max id
    MaxId { current: i64 },
}

impl ScanPredicate {
    pub fn max_id() -> Self {
        ScanPredicate::MaxId { current: 0 }
    }

    pub fn test(&mut self, id: i64, _body: &str) -> ScanOutcome {
        match self {
            ScanPredicate::AllRecords => ScanOutcome {
                matches: true,
                complete: false,
            },
            ScanPredicate::ById(sought) => {
                let hit = id == *sought;
                ScanOutcome {
                    matches: hit,
                    complete: hit,
                }
            }
            ScanPredicate::MaxId { current } => {
                let hit = id > *current;
                if hit {
                    *current = id;
                }
                ScanOutcome {
                    matches: hit,
                    complete: false,
                }
            }
        }
    }
}
