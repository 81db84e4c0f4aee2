//! Reading branch traces from text files.
//!
//! A trace is a sequence of lines of the form `<hex address> <t|n>`, one
//! record per executed branch, in execution order.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

use crate::branch::{BranchRecord, Outcome};

/// Failures while reading or parsing a trace file.
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("unable to open trace file '{path}': {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },

    #[error("i/o error while reading trace: {0}")]
    Read(#[from] std::io::Error),

    #[error("line {line}: invalid branch address '{token}'")]
    BadAddress { line: usize, token: String },

    #[error("line {line}: missing outcome field")]
    MissingOutcome { line: usize },

    #[error("line {line}: invalid outcome '{token}' (expected 't' or 'n')")]
    BadOutcome { line: usize, token: String },
}

/// An in-memory branch trace.
#[derive(Debug)]
pub struct Trace {
    records: Vec<BranchRecord>,
}

impl Trace {
    /// Read and parse a whole trace file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|source| TraceError::Open {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Parse trace records from any buffered reader. Blank lines are
    /// skipped; every other line must carry an address and an outcome.
    pub fn from_reader(reader: impl BufRead) -> Result<Self, TraceError> {
        let mut records = Vec::new();
        for (n, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            records.push(parse_record(&line, n + 1)?);
        }
        Ok(Self { records })
    }

    /// Return the parsed records in trace order.
    pub fn records(&self) -> &[BranchRecord] {
        &self.records
    }

    /// Return the number of records.
    pub fn num_entries(&self) -> usize {
        self.records.len()
    }
}

fn parse_record(line: &str, lineno: usize) -> Result<BranchRecord, TraceError> {
    let mut fields = line.split_whitespace();
    let addr_tok = fields.next().ok_or(TraceError::MissingOutcome { line: lineno })?;
    let pc = u64::from_str_radix(addr_tok.trim_start_matches("0x"), 16)
        .map_err(|_| TraceError::BadAddress {
            line: lineno,
            token: addr_tok.to_string(),
        })?;

    let outcome_tok = fields
        .next()
        .ok_or(TraceError::MissingOutcome { line: lineno })?;
    let outcome = match outcome_tok {
        "t" => Outcome::T,
        "n" => Outcome::N,
        _ => {
            return Err(TraceError::BadOutcome {
                line: lineno,
                token: outcome_tok.to_string(),
            })
        }
    };

    Ok(BranchRecord::new(pc, outcome))
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_hex_addresses_and_outcomes() {
        let input = "4b1c t\nffff2004 n\n\n4b1c t\n";
        let trace = Trace::from_reader(Cursor::new(input)).unwrap();
        assert_eq!(trace.num_entries(), 3);
        assert_eq!(trace.records()[0], BranchRecord::new(0x4b1c, Outcome::T));
        assert_eq!(trace.records()[1], BranchRecord::new(0xffff2004, Outcome::N));
        assert_eq!(trace.records()[2], BranchRecord::new(0x4b1c, Outcome::T));
    }

    #[test]
    fn rejects_bad_address() {
        let input = "xyzzy t\n";
        let err = Trace::from_reader(Cursor::new(input)).unwrap_err();
        assert!(matches!(err, TraceError::BadAddress { line: 1, .. }));
    }

    #[test]
    fn rejects_missing_outcome() {
        let input = "4b1c t\n2000\n";
        let err = Trace::from_reader(Cursor::new(input)).unwrap_err();
        assert!(matches!(err, TraceError::MissingOutcome { line: 2 }));
    }

    #[test]
    fn rejects_unknown_outcome() {
        let input = "4b1c x\n";
        let err = Trace::from_reader(Cursor::new(input)).unwrap_err();
        assert!(matches!(err, TraceError::BadOutcome { line: 1, .. }));
    }
}
