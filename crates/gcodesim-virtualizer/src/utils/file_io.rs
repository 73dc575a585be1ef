//! G-code file reading
//!
//! Streams a program from disk line by line, so large files are virtualized
//! without holding them in memory.

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::{anyhow, Context, Result};
use tracing::debug;

use crate::virtualizer::{Virtualizer, VirtualizerListener};

/// Buffer size for reading large files (256 KB)
const READ_BUFFER_SIZE: usize = 256 * 1024;

/// File read statistics
#[derive(Debug, Clone, PartialEq)]
pub struct FileReadStats {
    /// Total bytes read
    pub bytes_read: u64,
    /// Total lines read, including blank ones
    pub lines_read: u64,
    /// File size in bytes
    pub file_size: u64,
    /// Time taken to read (milliseconds)
    pub read_time_ms: u64,
}

impl FileReadStats {
    /// Get progress percentage
    pub fn progress_percent(&self) -> f64 {
        if self.file_size == 0 {
            0.0
        } else {
            (self.bytes_read as f64 / self.file_size as f64) * 100.0
        }
    }
}

/// G-code file reader with streaming support
pub struct GcodeFileReader {
    path: PathBuf,
    file_size: u64,
}

impl GcodeFileReader {
    /// Create a new G-code file reader
    ///
    /// # Errors
    /// Returns error if file does not exist or cannot be accessed
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            return Err(anyhow!("File does not exist: {}", path.display()));
        }

        if !path.is_file() {
            return Err(anyhow!("Path is not a file: {}", path.display()));
        }

        let file_size = fs::metadata(&path)?.len();

        Ok(Self { path, file_size })
    }

    /// Get file size in bytes
    pub fn file_size(&self) -> u64 {
        self.file_size
    }

    /// Get file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read file with line-by-line streaming callback
    ///
    /// # Errors
    /// Returns error if file cannot be read or callback returns error
    pub fn read_lines<F>(&self, mut callback: F) -> Result<FileReadStats>
    where
        F: FnMut(&str) -> Result<()>,
    {
        let start_time = SystemTime::now();
        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;
        let reader = BufReader::with_capacity(READ_BUFFER_SIZE, file);

        let mut lines_read = 0u64;
        let mut bytes_read = 0u64;

        for line_result in reader.lines() {
            let line = line_result
                .with_context(|| format!("Failed to read line {}", lines_read + 1))?;
            bytes_read += line.len() as u64 + 1; // +1 for newline

            callback(&line)?;
            lines_read += 1;
        }

        let elapsed = start_time.elapsed().unwrap_or_default().as_millis() as u64;

        Ok(FileReadStats {
            bytes_read: bytes_read.min(self.file_size),
            lines_read,
            file_size: self.file_size,
            read_time_ms: elapsed,
        })
    }

    /// Stream every line of the file into a virtualizer
    ///
    /// # Errors
    /// Returns error if file cannot be read
    pub fn virtualize<L: VirtualizerListener>(
        &self,
        virtualizer: &mut Virtualizer<L>,
    ) -> Result<FileReadStats> {
        let stats = self.read_lines(|line| {
            virtualizer.virtualize(line);
            Ok(())
        })?;

        debug!(
            path = %self.path.display(),
            lines = stats.lines_read,
            bytes = stats.bytes_read,
            ms = stats.read_time_ms,
            "Virtualized file"
        );
        Ok(stats)
    }
}
