// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Stages that feed a fixed byte source into a chain or capture what it produced.

use async_trait::async_trait;
use std::sync::Arc;

use crate::errors::{StorageError, WrapperError};
use crate::traits::{Processor, StageOutput, Storage};

/// First stage of a chain with a stdin redirect: emits the file's bytes.
pub struct StreamSource {
    name: String,
    bytes: Vec<u8>,
    status: Option<i32>,
}

impl StreamSource {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
            status: None,
        }
    }

    /// Read `reference` now, so a missing file fails before any stage runs.
    pub fn from_storage(storage: &dyn Storage, reference: &str) -> Result<Self, StorageError> {
        let bytes = storage.read(reference)?;
        Ok(Self::new(format!("stdin:{}", reference), bytes))
    }
}

#[async_trait]
impl Processor for StreamSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn execute(&mut self, _stdin: Vec<u8>) -> Result<StageOutput, WrapperError> {
        self.status = Some(0);
        Ok(StageOutput::success(self.bytes.clone()))
    }

    fn wait_for(&self) -> Option<i32> {
        self.status
    }
}

/// Where the last stage's output ends up.
pub enum SinkTarget {
    /// Kept in memory and returned to the caller.
    Buffer,
    /// Written to a file reference.
    File {
        reference: String,
        storage: Arc<dyn Storage>,
    },
}

/// Last stage of every chain.
///
/// The captured bytes are passed on as this stage's output in both modes, so the chain
/// result always carries the final output.
pub struct StreamSink {
    name: String,
    target: SinkTarget,
    status: Option<i32>,
}

impl StreamSink {
    pub fn buffer() -> Self {
        Self {
            name: "stdout".to_string(),
            target: SinkTarget::Buffer,
            status: None,
        }
    }

    pub fn file(reference: impl Into<String>, storage: Arc<dyn Storage>) -> Self {
        let reference = reference.into();
        Self {
            name: format!("stdout:{}", reference),
            target: SinkTarget::File { reference, storage },
            status: None,
        }
    }

    pub fn target(&self) -> &SinkTarget {
        &self.target
    }
}

#[async_trait]
impl Processor for StreamSink {
    fn name(&self) -> &str {
        &self.name
    }

    async fn execute(&mut self, stdin: Vec<u8>) -> Result<StageOutput, WrapperError> {
        if let SinkTarget::File { reference, storage } = &self.target {
            storage.write(reference, &stdin)?;
        }
        self.status = Some(0);
        Ok(StageOutput::success(stdin))
    }

    fn wait_for(&self) -> Option<i32> {
        self.status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::FsStorage;
    use std::fs;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_source_emits_file_bytes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("in.txt");
        fs::write(&path, "input bytes").unwrap();

        let storage = FsStorage::default();
        let mut source = StreamSource::from_storage(&storage, path.to_str().unwrap()).unwrap();
        assert_eq!(source.wait_for(), None);

        let output = source.execute(b"ignored".to_vec()).await.unwrap();
        assert_eq!(output.stdout, b"input bytes");
        assert_eq!(source.wait_for(), Some(0));
    }

    #[test]
    fn test_source_missing_file() {
        let storage = FsStorage::default();
        assert!(matches!(
            StreamSource::from_storage(&storage, "/nonexistent/in.txt"),
            Err(StorageError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_sink_writes_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out/result.txt");
        let reference = path.to_str().unwrap().to_string();

        let mut sink = StreamSink::file(reference.clone(), Arc::new(FsStorage::default()));
        let output = sink.execute(b"final".to_vec()).await.unwrap();

        assert_eq!(output.stdout, b"final");
        assert_eq!(fs::read(&path).unwrap(), b"final");
        assert_eq!(sink.name(), format!("stdout:{}", reference));
    }

    #[tokio::test]
    async fn test_buffer_sink_passes_output_through() {
        let mut sink = StreamSink::buffer();
        assert!(matches!(sink.target(), SinkTarget::Buffer));
        let output = sink.execute(b"kept".to_vec()).await.unwrap();
        assert_eq!(output, StageOutput::success(b"kept".to_vec()));
    }
}
