//! Payload sources.
//!
//! The transport itself is outside this crate; anything that can hand back
//! the raw XML text implements [`PayloadSource`].

use std::io::Read;
use std::path::PathBuf;

use crate::error::{AppError, AppResult};

pub trait PayloadSource {
    /// Human-readable origin for logs and errors.
    fn origin(&self) -> String;

    /// Fetch the raw payload text. Called once per dashboard session.
    fn fetch(&mut self) -> AppResult<String>;
}

/// Payload stored in a file.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PayloadSource for FileSource {
    fn origin(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&mut self) -> AppResult<String> {
        std::fs::read_to_string(&self.path).map_err(|e| AppError::PayloadFileRead {
            path: self.path.clone(),
            source: e,
        })
    }
}

/// Payload read to the end from any reader, e.g. stdin.
pub struct ReaderSource<R> {
    reader: R,
    origin: String,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(reader: R, origin: impl Into<String>) -> Self {
        Self {
            reader,
            origin: origin.into(),
        }
    }
}

impl<R: Read> PayloadSource for ReaderSource<R> {
    fn origin(&self) -> String {
        self.origin.clone()
    }

    fn fetch(&mut self) -> AppResult<String> {
        let mut content = String::new();
        self.reader
            .read_to_string(&mut content)
            .map_err(|e| AppError::PayloadStream {
                origin: self.origin.clone(),
                source: e,
            })?;
        Ok(content)
    }
}

/// Payload already in memory.
#[derive(Debug, Clone)]
pub struct StaticSource {
    payload: String,
}

impl StaticSource {
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
        }
    }
}

impl PayloadSource for StaticSource {
    fn origin(&self) -> String {
        "memory".to_string()
    }

    fn fetch(&mut self) -> AppResult<String> {
        Ok(self.payload.clone())
    }
}
