//! JSONL-backed store - append-only write log replayed into memory
//!
//! Every write becomes one line in `<dir>/state.jsonl`. Opening the store
//! replays the log in order, so the last write for a key wins. Sequence
//! numbers must strictly increase from line to line.

use crate::error::StoreError;
use crate::traits::{scan_map, KeyValueStore, KvEntry};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Name of the write log inside the data directory
pub const LOG_FILE_NAME: &str = "state.jsonl";

/// One line of the write log. Key and value are hex encoded.
#[derive(Debug, Serialize, Deserialize)]
struct LogRecord {
    seq: u64,
    key: String,
    value: String,
}

/// Persistent store rebuilt from a JSONL write log
pub struct FileStore {
    path: PathBuf,
    file: File,
    /// Length of the log after the last successful write
    log_len: u64,
    entries: BTreeMap<Vec<u8>, Vec<u8>>,
    last_seq: u64,
    replayed: usize,
}

impl FileStore {
    /// Open (or create) the store in the given directory
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let path = dir.join(LOG_FILE_NAME);

        let mut entries = BTreeMap::new();
        let mut last_seq = 0;
        let mut replayed = 0;

        if path.exists() {
            let reader = BufReader::new(File::open(&path)?);
            for (index, line) in reader.lines().enumerate() {
                let line = line?;
                if line.trim().is_empty() {
                    continue;
                }
                let (seq, key, value) = parse_line(&line, index + 1)?;
                if seq <= last_seq {
                    return Err(StoreError::CorruptLog {
                        line: index + 1,
                        reason: format!("sequence {seq} does not follow {last_seq}"),
                    });
                }
                last_seq = seq;
                entries.insert(key, value);
                replayed += 1;
            }
        }

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let log_len = file.metadata()?.len();

        tracing::debug!(path = %path.display(), replayed, keys = entries.len(), "Opened file store");

        Ok(Self {
            path,
            file,
            log_len,
            entries,
            last_seq,
            replayed,
        })
    }

    /// Path of the write log
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of log lines replayed when the store was opened
    pub fn replayed(&self) -> usize {
        self.replayed
    }

    /// Sequence number of the most recent write
    pub fn last_seq(&self) -> u64 {
        self.last_seq
    }

    /// Cut the log back to the end of the last successful write, dropping
    /// whatever part of a failed line reached the file.
    fn rollback_log(&mut self) {
        if let Err(err) = self.file.set_len(self.log_len) {
            tracing::warn!(path = %self.path.display(), error = %err, "Failed to truncate write log");
        }
    }
}

fn parse_line(line: &str, line_no: usize) -> Result<(u64, Vec<u8>, Vec<u8>), StoreError> {
    let corrupt = |reason: String| StoreError::CorruptLog {
        line: line_no,
        reason,
    };

    let record: LogRecord = serde_json::from_str(line).map_err(|e| corrupt(e.to_string()))?;
    let key = hex::decode(&record.key).map_err(|e| corrupt(format!("key: {e}")))?;
    let value = hex::decode(&record.value).map_err(|e| corrupt(format!("value: {e}")))?;

    Ok((record.seq, key, value))
}

impl KeyValueStore for FileStore {
    fn read(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        let record = LogRecord {
            seq: self.last_seq + 1,
            key: hex::encode(key),
            value: hex::encode(value),
        };

        // The log line must reach the file before the in-memory view changes.
        // No bytes of a failed write may stay pending for a later one.
        let mut line = serde_json::to_string(&record)?;
        line.push('\n');
        if let Err(err) = self.file.write_all(line.as_bytes()) {
            self.rollback_log();
            return Err(err.into());
        }

        self.log_len += line.len() as u64;
        self.last_seq = record.seq;
        self.entries.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn scan(&self, start: &[u8], end: &[u8]) -> Result<Vec<KvEntry>, StoreError> {
        Ok(scan_map(&self.entries, start, end))
    }

    fn contains(&self, key: &[u8]) -> Result<bool, StoreError> {
        Ok(self.entries.contains_key(key))
    }
}
