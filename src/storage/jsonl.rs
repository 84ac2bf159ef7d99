//! JSONL (JSON Lines) storage.
//!
//! Each line is a valid JSON object representing one skirmish result.

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::PathBuf;

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};

use super::{StorageConfig, StorageError};
use crate::models::SkirmishResult;

/// JSONL file writer.
pub struct JsonlWriter<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: Serialize> JsonlWriter<T> {
    /// Create a new JSONL writer for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Ensure the parent directory exists.
    fn ensure_dir(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Write entities, replacing the entire file.
    pub fn write_all(&self, entities: &[T]) -> Result<usize, StorageError> {
        self.ensure_dir()?;

        let file = File::create(&self.path)?;
        let count = write_lines(BufWriter::new(file), entities)?;
        info!("Wrote {} entities to {:?}", count, self.path);

        Ok(count)
    }
}

fn write_lines<T: Serialize, W: Write>(
    mut writer: W,
    entities: &[T],
) -> Result<usize, StorageError> {
    let mut count = 0;
    for entity in entities {
        let json = serde_json::to_string(entity)?;
        writeln!(writer, "{}", json)?;
        count += 1;
    }
    writer.flush()?;
    Ok(count)
}

/// JSONL file reader.
pub struct JsonlReader<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: DeserializeOwned> JsonlReader<T> {
    /// Create a new JSONL reader for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// Check if the file exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read all entities from the file. A missing file reads as empty.
    pub fn read_all(&self) -> Result<Vec<T>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let mut entities = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line?;

            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str(&line) {
                Ok(entity) => entities.push(entity),
                Err(e) => {
                    warn!(
                        "Failed to parse line {} in {:?}: {}",
                        index + 1,
                        self.path,
                        e
                    );
                }
            }
        }

        debug!("Read {} entities from {:?}", entities.len(), self.path);
        Ok(entities)
    }
}

/// Match ids with a stored history file, sorted.
pub fn list_matches(config: &StorageConfig) -> Result<Vec<String>, StorageError> {
    let dir = config.history_dir();
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut matches = Vec::new();
    for entry in fs::read_dir(&dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) != Some("jsonl") {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            matches.push(stem.to_string());
        }
    }

    matches.sort();
    Ok(matches)
}

/// Replace the stored history of one match, ordered by skirmish id.
pub fn write_match_history(
    config: &StorageConfig,
    match_id: &str,
    results: &mut [SkirmishResult],
) -> Result<usize, StorageError> {
    results.sort_by_key(|r| r.skirmish_id);
    let writer = JsonlWriter::new(config.match_history_path(match_id));
    writer.write_all(results)
}

/// Read the stored history of one match.
pub fn read_match_history(
    config: &StorageConfig,
    match_id: &str,
) -> Result<Vec<SkirmishResult>, StorageError> {
    let reader = JsonlReader::new(config.match_history_path(match_id));
    if !reader.exists() {
        return Err(StorageError::PathNotFound(config.match_history_path(match_id)));
    }
    reader.read_all()
}
