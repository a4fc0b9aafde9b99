use crate::error::{LoadError, Result};
use crate::record::DocumentRecord;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Content hash of a dataset file. Two datasets with the same bytes share
/// a fingerprint regardless of where they were loaded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    pub fn of(bytes: &[u8]) -> Self {
        Self(*blake3::hash(bytes).as_bytes())
    }

    /// First 12 hex characters, enough to tell datasets apart in a log line.
    pub fn short(&self) -> String {
        self.to_string()[..12].to_string()
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

/// All records of one dataset file, read once and immutable afterwards.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub records: Vec<DocumentRecord>,
    pub fingerprint: Fingerprint,
    pub origin: PathBuf,
}

impl Dataset {
    /// Read and parse a dataset file.
    ///
    /// Accepts either a JSON array of record objects or JSON Lines.
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading dataset from {}", path.display());
        let bytes = fs::read(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&bytes, path)
    }

    pub fn parse(bytes: &[u8], origin: impl Into<PathBuf>) -> Result<Self> {
        let origin = origin.into();
        let fingerprint = Fingerprint::of(bytes);

        let records = if is_json_array(bytes) {
            debug!("Parsing {} as a JSON array", origin.display());
            serde_json::from_slice::<Vec<DocumentRecord>>(bytes)
                .map_err(|source| LoadError::Json { line: 0, source })?
        } else {
            debug!("Parsing {} as JSON Lines", origin.display());
            parse_json_lines(bytes)?
        };

        if records.is_empty() {
            return Err(LoadError::Empty(origin));
        }

        info!(
            "Loaded {} records (fingerprint {})",
            records.len(),
            fingerprint.short()
        );

        Ok(Self {
            records,
            fingerprint,
            origin,
        })
    }

    /// Build a dataset from records already in memory. The fingerprint is
    /// derived from the record contents so equal inputs memoize together.
    pub fn from_records(records: Vec<DocumentRecord>) -> Self {
        let fingerprint = Fingerprint::of(format!("{:?}", records).as_bytes());
        Self {
            records,
            fingerprint,
            origin: PathBuf::from("<memory>"),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn is_json_array(bytes: &[u8]) -> bool {
    bytes
        .iter()
        .find(|b| !b.is_ascii_whitespace())
        .is_some_and(|b| *b == b'[')
}

fn parse_json_lines(bytes: &[u8]) -> Result<Vec<DocumentRecord>> {
    let mut records = Vec::new();
    for (idx, line) in bytes.split(|b| *b == b'\n').enumerate() {
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }
        let record = serde_json::from_slice::<DocumentRecord>(line)
            .map_err(|source| LoadError::Json {
                line: idx + 1,
                source,
            })?;
        records.push(record);
    }
    Ok(records)
}
