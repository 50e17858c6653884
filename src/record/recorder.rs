//! Append-only CSV recorder.
//!
//! # Responsibilities
//! - Create the log (and its parent directories) with a single header
//! - Append exactly one row per check, never touching earlier rows
//!
//! # Design Decisions
//! - Header creation is an exclusive create, not exists-then-write
//! - Each append is a single `write_all` of a fully encoded buffer
//! - A log whose last row lost its terminator gets one before the new row
//! - One writer at a time is assumed; coordination is the scheduler's job

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::schema::{HeaderCheck, RecorderConfig};
use crate::probe::result::CheckResult;
use crate::record::format::{header_bytes, serialize_row, HEADER_LINE};

/// Longest first line read when verifying the header.
const MAX_HEADER_BYTES: u64 = 4096;

/// Errors that can occur while persisting a result.
#[derive(Debug, Error)]
pub enum RecorderError {
    #[error("failed to create log directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to open log {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write log {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("log {} has unexpected header {found:?}", .path.display())]
    HeaderMismatch { path: PathBuf, found: String },

    #[error("failed to encode row: {0}")]
    Encoding(#[from] csv::Error),
}

/// Appends results to one log file.
#[derive(Debug, Clone)]
pub struct Recorder {
    path: PathBuf,
    header_check: HeaderCheck,
}

impl Recorder {
    pub fn new(config: &RecorderConfig) -> Self {
        Self {
            path: config.log_path.clone(),
            header_check: config.header_check,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one row, writing the header first if the log is new or empty.
    pub fn append(&self, result: &CheckResult) -> Result<(), RecorderError> {
        let row = serialize_row(result)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| RecorderError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let (file, mut buf) = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(file) => {
                tracing::info!(path = %self.path.display(), "Created log file");
                (file, header_bytes()?)
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => self.open_existing()?,
            Err(source) => {
                return Err(RecorderError::Open {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        buf.extend_from_slice(&row);
        self.write(file, &buf)?;

        tracing::debug!(
            path = %self.path.display(),
            bytes = buf.len(),
            "Appended check result"
        );
        Ok(())
    }

    /// Open an existing log for append, returning any header it still needs.
    fn open_existing(&self) -> Result<(File, Vec<u8>), RecorderError> {
        let open_err = |source: io::Error| RecorderError::Open {
            path: self.path.clone(),
            source,
        };
        let file = OpenOptions::new()
            .read(true)
            .append(true)
            .open(&self.path)
            .map_err(open_err)?;

        let len = file.metadata().map_err(open_err)?.len();
        if len == 0 {
            tracing::info!(path = %self.path.display(), "Log file empty, writing header");
            return Ok((file, header_bytes()?));
        }

        if self.header_check == HeaderCheck::Verify {
            let first = first_line(&file).map_err(open_err)?;
            if first != HEADER_LINE {
                return Err(RecorderError::HeaderMismatch {
                    path: self.path.clone(),
                    found: first,
                });
            }
        }

        let mut buf = Vec::new();
        if last_byte(&file).map_err(open_err)? != b'\n' {
            tracing::warn!(path = %self.path.display(), "Log missing final newline, terminating last row");
            buf.push(b'\n');
        }
        Ok((file, buf))
    }

    fn write(&self, mut file: File, buf: &[u8]) -> Result<(), RecorderError> {
        let write_err = |source: io::Error| RecorderError::Write {
            path: self.path.clone(),
            source,
        };
        file.write_all(buf).map_err(write_err)?;
        file.sync_data().map_err(write_err)
    }
}

fn first_line(file: &File) -> io::Result<String> {
    let mut line = String::new();
    BufReader::new(file.take(MAX_HEADER_BYTES)).read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn last_byte(mut file: &File) -> io::Result<u8> {
    let mut byte = [0u8; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut byte)?;
    Ok(byte[0])
}

/// Append `result` to `log_path`, verifying the header of an existing log.
pub fn append(result: &CheckResult, log_path: &Path) -> Result<(), RecorderError> {
    Recorder::new(&RecorderConfig {
        log_path: log_path.to_path_buf(),
        header_check: HeaderCheck::Verify,
    })
    .append(result)
}
