// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::backends::in_process::{EntryPointRegistry, InProcessExecutor};
use crate::backends::{ProcessExecutor, StreamSink, StreamSource, ToolProcessor};
use crate::config::consts::DEFAULT_SEPARATOR;
use crate::config::WrapperConfig;
use crate::engine::ProcessorChain;
use crate::errors::{StorageError, WrapperError};
use crate::observability::messages::chain::{DelocalizationSkipped, ToolStageConfigured};
use crate::observability::messages::parser::ControlLineRejected;
use crate::observability::messages::StructuredLog;
use crate::parser::{parse, Command};
use crate::repo::{Runtime, YamlToolRepository};
use crate::storage::{anchor_local, delocalize_refs, localize_refs, FsStorage};
use crate::traits::{EntryPointLookup, Processor, Storage, ToolExecutor, ToolRepository};
use crate::utils::ParameterMap;

/// Output-file parameters of one stage, before and after localization.
struct PendingOutputs {
    declared: ParameterMap,
    localized: ParameterMap,
}

/// The invocation boundary: runs one control line at a time.
///
/// For each command the operation is resolved, a tool stage is built and its file
/// parameters are localized. The stages are chained behind an optional stdin source and
/// in front of a sink, the chain is executed, and output files are delocalized only when
/// every stage succeeded.
pub struct ToolWrapper {
    repository: Arc<dyn ToolRepository>,
    storage: Arc<dyn Storage>,
    process_executor: Arc<dyn ToolExecutor>,
    in_process_executor: Arc<dyn ToolExecutor>,
    working_dir: PathBuf,
    separator: String,
    single_flight: Mutex<()>,
}

impl ToolWrapper {
    pub fn new(
        repository: Arc<dyn ToolRepository>,
        storage: Arc<dyn Storage>,
        entry_points: Arc<dyn EntryPointLookup>,
        working_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            repository,
            storage,
            process_executor: Arc::new(ProcessExecutor::default()),
            in_process_executor: Arc::new(InProcessExecutor::new(entry_points)),
            working_dir: working_dir.into(),
            separator: DEFAULT_SEPARATOR.to_string(),
            single_flight: Mutex::new(()),
        }
    }

    /// Wrapper over a YAML tool repository, filesystem storage and the builtin entry points.
    pub fn from_config(config: &WrapperConfig) -> Self {
        Self::new(
            Arc::new(YamlToolRepository::new(&config.repository)),
            Arc::new(FsStorage::from_config(&config.storage)),
            Arc::new(EntryPointRegistry::with_builtins()),
            config.working_dir(),
        )
        .with_separator(config.separator())
    }

    /// Separator between references of a multi-valued file parameter.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// Run one control line.
    ///
    /// Returns the captured output, or the stdout reference when the line redirects its
    /// output to a file.
    pub async fn wrap(&self, control_line: &str) -> Result<String, WrapperError> {
        let _flight = self.single_flight.lock().await;

        let args = parse(control_line).map_err(|error| {
            ControlLineRejected {
                control_line,
                error: &error,
            }
            .log();
            error
        })?;

        let mut chain = ProcessorChain::new();
        let mut pending = Vec::with_capacity(args.commands().len());
        for command in args.commands() {
            let (stage, outputs) = self.build_stage(command)?;
            chain.push(Box::new(stage));
            pending.push(outputs);
        }

        // Local redirect files live in the working directory, like file parameters.
        if let Some(stdin_file) = args.stdin_file() {
            chain.prepend(Box::new(StreamSource::from_storage(
                self.storage.as_ref(),
                &anchor_local(stdin_file, &self.working_dir)?,
            )?));
        }
        chain.push(Box::new(match args.stdout_file() {
            Some(stdout_file) => StreamSink::file(
                anchor_local(stdout_file, &self.working_dir)?,
                Arc::clone(&self.storage),
            ),
            None => StreamSink::buffer(),
        }));

        let outcome = chain.execute().await?;
        if !outcome.is_success() {
            DelocalizationSkipped {
                status: outcome.status,
                pending_outputs: pending.iter().map(|p| p.declared.len()).sum(),
            }
            .log();
            return Err(WrapperError::Execution {
                status: outcome.status,
                output: outcome.captured_text(),
            });
        }

        for outputs in &pending {
            self.delocalize(outputs)?;
        }

        Ok(match args.stdout_file() {
            Some(stdout_file) => stdout_file.to_string(),
            None => String::from_utf8_lossy(&outcome.stdout).into_owned(),
        })
    }

    /// Run control lines one after another, collecting every result.
    pub async fn wrap_all<I, S>(&self, control_lines: I) -> Vec<Result<String, WrapperError>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut results = Vec::new();
        for line in control_lines {
            results.push(self.wrap(line.as_ref()).await);
        }
        results
    }

    fn executor_for(&self, runtime: Runtime) -> Arc<dyn ToolExecutor> {
        match runtime {
            Runtime::Process => Arc::clone(&self.process_executor),
            Runtime::InProcess => Arc::clone(&self.in_process_executor),
        }
    }

    fn build_stage(
        &self,
        command: &Command,
    ) -> Result<(ToolProcessor, PendingOutputs), WrapperError> {
        let operation = self.repository.resolve(command.tool(), command.action())?;
        let executor = self.executor_for(operation.runtime());

        let mut stage = ToolProcessor::new(command.tool(), command.action(), operation, executor);
        stage.initialize()?;
        stage.set_working_dir(&self.working_dir);
        stage.set_parameters(command.pairs())?;

        let inputs = self.localize(stage.input_file_parameters(), true)?;
        stage.set_input_file_parameters(inputs);

        let declared = stage.output_file_parameters().clone();
        let localized = self.localize(&declared, false)?;
        stage.set_output_file_parameters(localized.clone());

        ToolStageConfigured {
            tool: command.tool(),
            action: command.action(),
            executor: stage.executor_kind(),
            input_files: stage.input_file_parameters().len(),
            output_files: declared.len(),
        }
        .log();

        Ok((stage, PendingOutputs { declared, localized }))
    }

    fn localize(&self, params: &ParameterMap, copy: bool) -> Result<ParameterMap, StorageError> {
        params
            .iter()
            .map(|(name, value)| {
                let local = localize_refs(
                    self.storage.as_ref(),
                    value,
                    &self.working_dir,
                    copy,
                    &self.separator,
                )?;
                Ok::<_, StorageError>((name, local))
            })
            .collect()
    }

    fn delocalize(&self, outputs: &PendingOutputs) -> Result<(), StorageError> {
        for (name, local) in outputs.localized.iter() {
            if let Some(declared) = outputs.declared.get(name) {
                delocalize_refs(
                    self.storage.as_ref(),
                    local,
                    declared,
                    &self.working_dir,
                    &self.separator,
                )?;
            }
        }
        Ok(())
    }
}
