//! Where extracted records go: an append-only staging file while the crawl
//! runs, and the final CSV once every URL has been processed.
//!
//! The staging file holds one JSON-encoded [`ProviderRecord`] per line, in
//! URL order. Its first `current_index` lines are the records a checkpoint
//! vouches for.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use provdir_core::ProviderRecord;
use thiserror::Error;

/// Column headers of the output CSV, in order.
pub const OUTPUT_COLUMNS: [&str; 8] = [
    "full_name",
    "first_name",
    "middle_name",
    "last_name",
    "addresses",
    "specialities",
    "phone_numbers",
    "insurances_accepted",
];

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("output file {path} already exists")]
    AlreadyExists { path: PathBuf },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("staging file {path} line {line} is not a valid record: {source}")]
    CorruptStaging {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("staging file {path} holds {staged} records but the checkpoint expects {expected}")]
    ShortStaging {
        path: PathBuf,
        staged: usize,
        expected: usize,
    },
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> OutputError + '_ {
    move |source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Staging path used for a given output path: `<output>.partial.jsonl`.
#[must_use]
pub fn staging_path_for(output: &Path) -> PathBuf {
    let mut name = output
        .file_name()
        .map(std::ffi::OsStr::to_os_string)
        .unwrap_or_else(|| "provider_details.csv".into());
    name.push(".partial.jsonl");
    output.with_file_name(name)
}

/// Append-only JSON-lines store of records extracted so far.
pub struct StagingStore {
    path: PathBuf,
}

impl StagingStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Empties the store (creating it if needed) for a fresh crawl.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError::Io`] if the file cannot be created.
    pub fn reset(&self) -> Result<(), OutputError> {
        File::create(&self.path).map_err(io_error(&self.path))?;
        Ok(())
    }

    /// Loads the first `count` staged records and drops any beyond them, so
    /// the store lines up exactly with a checkpoint at index `count`.
    ///
    /// # Errors
    ///
    /// - [`OutputError::ShortStaging`] if fewer than `count` records are staged.
    /// - [`OutputError::CorruptStaging`] if one of the first `count` lines does not parse.
    /// - [`OutputError::Io`] on read or rewrite failure.
    pub fn load_prefix(&self, count: usize) -> Result<Vec<ProviderRecord>, OutputError> {
        let file = match File::open(&self.path) {
            Ok(file) => Some(file),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => return Err(io_error(&self.path)(e)),
        };

        let mut records = Vec::with_capacity(count);
        let mut staged_lines = 0usize;
        if let Some(file) = file {
            for (idx, line) in BufReader::new(file).lines().enumerate() {
                let line = line.map_err(io_error(&self.path))?;
                if line.trim().is_empty() {
                    continue;
                }
                staged_lines += 1;
                if records.len() == count {
                    continue;
                }
                let record = serde_json::from_str::<ProviderRecord>(&line).map_err(|e| {
                    OutputError::CorruptStaging {
                        path: self.path.clone(),
                        line: idx + 1,
                        source: e,
                    }
                })?;
                records.push(record);
            }
        }

        if records.len() < count {
            return Err(OutputError::ShortStaging {
                path: self.path.clone(),
                staged: records.len(),
                expected: count,
            });
        }

        if staged_lines != count {
            tracing::info!(
                path = %self.path.display(),
                staged = staged_lines,
                kept = count,
                "dropping staged records past the checkpoint"
            );
            self.rewrite(&records)?;
        }

        Ok(records)
    }

    /// Appends one record and syncs it to disk.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError`] if the record cannot be encoded or written.
    pub fn append(&self, record: &ProviderRecord) -> Result<(), OutputError> {
        let mut line = serde_json::to_vec(record)?;
        line.push(b'\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(io_error(&self.path))?;
        file.write_all(&line).map_err(io_error(&self.path))?;
        file.sync_data().map_err(io_error(&self.path))?;
        Ok(())
    }

    /// Deletes the store. A missing file is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError::Io`] if the file exists but cannot be removed.
    pub fn remove(&self) -> Result<(), OutputError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(&self.path)(e)),
        }
    }

    fn rewrite(&self, records: &[ProviderRecord]) -> Result<(), OutputError> {
        let mut tmp_name = self.path.as_os_str().to_os_string();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        let mut buf = Vec::new();
        for record in records {
            serde_json::to_writer(&mut buf, record)?;
            buf.push(b'\n');
        }
        fs::write(&tmp_path, &buf).map_err(io_error(&tmp_path))?;
        fs::rename(&tmp_path, &self.path).map_err(io_error(&self.path))?;
        Ok(())
    }
}

/// One CSV row for `record`, in [`OUTPUT_COLUMNS`] order. List and map
/// columns are JSON-encoded.
///
/// # Errors
///
/// Returns [`OutputError::Json`] if a column cannot be encoded.
pub fn record_row(record: &ProviderRecord) -> Result<[String; 8], OutputError> {
    Ok([
        record.full_name_raw.clone(),
        record.name.first.clone(),
        record.name.middle.clone(),
        record.name.last.clone(),
        serde_json::to_string(&record.addresses)?,
        serde_json::to_string(&record.specialties)?,
        serde_json::to_string(&record.phone_numbers)?,
        serde_json::to_string(&record.insurances)?,
    ])
}

/// Writes all records to a new CSV at `path`.
///
/// Never overwrites: if `path` already exists the file is left untouched and
/// [`OutputError::AlreadyExists`] is returned. If writing fails after the
/// file was created, the partial file is removed.
///
/// # Errors
///
/// Returns [`OutputError`] on conflict, encoding, or I/O failure.
pub fn write_output(path: &Path, records: &[ProviderRecord]) -> Result<(), OutputError> {
    let file = match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            return Err(OutputError::AlreadyExists {
                path: path.to_path_buf(),
            });
        }
        Err(e) => return Err(io_error(path)(e)),
    };

    let result = write_rows(file, records);
    if result.is_err() {
        if let Err(e) = fs::remove_file(path) {
            tracing::warn!(path = %path.display(), error = %e, "could not remove partial output");
        }
    }
    result
}

fn write_rows(file: File, records: &[ProviderRecord]) -> Result<(), OutputError> {
    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(OUTPUT_COLUMNS)?;
    for record in records {
        writer.write_record(record_row(record)?)?;
    }
    writer.flush().map_err(|e| OutputError::Csv(e.into()))?;
    Ok(())
}

#[cfg(test)]
#[path = "output_test.rs"]
mod tests;
