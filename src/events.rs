//! RPC completion events.
//!
//! An event log is a header-less CSV file. Each row records the completion of
//! one RPC:
//!
//! | column | meaning                                    |
//! |--------|--------------------------------------------|
//! | 0      | ignored                                    |
//! | 1      | completion timestamp, in elapsed seconds   |
//! | 2      | `k` parameter of the run                   |
//! | 3      | `alpha` parameter of the run               |
//! | 4      | group size `n` (sweeps only, optional)     |

use csv::StringRecord;

use crate::error::AnalysisError;

pub const TS_FIELD: usize = 1;
pub const K_FIELD: usize = 2;
pub const ALPHA_FIELD: usize = 3;
pub const GROUP_FIELD: usize = 4;

/// A single RPC completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    /// 1-based line number in the source file.
    pub line: usize,
    pub ts: i64,
    pub k: i64,
    pub alpha: i64,
    /// Group size `n`, when the row carries one.
    pub group: Option<u64>,
}

fn field<'r>(
    record: &'r StringRecord,
    line: usize,
    index: usize,
) -> Result<&'r str, AnalysisError> {
    record
        .get(index)
        .ok_or(AnalysisError::MissingField { line, index })
}

fn parse_int<T: std::str::FromStr>(
    value: &str,
    line: usize,
    index: usize,
) -> Result<T, AnalysisError> {
    value
        .trim()
        .parse()
        .map_err(|_| AnalysisError::InvalidField {
            line,
            index,
            value: value.to_string(),
        })
}

impl Event {
    /// Parses a CSV record. With `with_group` set, the group column is read
    /// when present and not blank. Otherwise it is ignored like any trailing
    /// column.
    pub fn from_record(
        record: &StringRecord,
        line: usize,
        with_group: bool,
    ) -> Result<Self, AnalysisError> {
        let ts = parse_int(field(record, line, TS_FIELD)?, line, TS_FIELD)?;
        let k = parse_int(field(record, line, K_FIELD)?, line, K_FIELD)?;
        let alpha = parse_int(field(record, line, ALPHA_FIELD)?, line, ALPHA_FIELD)?;

        let group = match record.get(GROUP_FIELD).map(str::trim) {
            _ if !with_group => None,
            None | Some("") => None,
            Some(v) => Some(parse_int(v, line, GROUP_FIELD)?),
        };

        Ok(Self {
            line,
            ts,
            k,
            alpha,
            group,
        })
    }

    /// Group size for sweep analysis. Sweeps need every row to carry a
    /// positive `n`.
    pub fn group_size(&self) -> Result<u64, AnalysisError> {
        match self.group {
            None => Err(AnalysisError::MissingGroup { line: self.line }),
            Some(0) => Err(AnalysisError::InvalidGroupSize { line: self.line }),
            Some(n) => Ok(n),
        }
    }
}
