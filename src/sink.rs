//! Persistence collaborator: takes a hierarchy's base name plus its full
//! rendered text and stores it. The emitters never touch the filesystem
//! themselves.

use std::io;
use std::path::PathBuf;

use colored::Colorize;
use thiserror::Error;

use crate::codegen::snake_case;

#[derive(Debug, Error)]
#[error("failed to write generated file `{}`: {source}", .path.display())]
pub struct SinkError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

pub trait Sink {
    fn persist(&mut self, base_name: &str, contents: &str) -> Result<(), SinkError>;
}

/// Writes `<snake(base)>.rs` into a fixed directory, overwriting whatever is
/// already there. Failures propagate unchanged; there is no retry.
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn target_path(&self, base_name: &str) -> PathBuf {
        self.dir.join(format!("{}.rs", snake_case(base_name)))
    }
}

impl Sink for DirectorySink {
    fn persist(&mut self, base_name: &str, contents: &str) -> Result<(), SinkError> {
        let path = self.target_path(base_name);
        std::fs::write(&path, contents).map_err(|source| SinkError {
            path: path.clone(),
            source,
        })?;
        eprintln!("{} {}", "wrote".green(), path.display());
        Ok(())
    }
}

/// Test double: collects `(base name, contents)` pairs in order.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemorySink {
    pub files: Vec<(String, String)>,
}

#[cfg(test)]
impl Sink for MemorySink {
    fn persist(&mut self, base_name: &str, contents: &str) -> Result<(), SinkError> {
        self.files.push((base_name.to_string(), contents.to_string()));
        Ok(())
    }
}

// ------------------------------- Tests ------------------------------------ //
