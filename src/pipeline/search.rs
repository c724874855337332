//! End-to-end handling of one search request

use super::validator::Validator;
use blastgate_bio::normalize_fasta;
use blastgate_core::{BlastgateResult, Config, OutputMode, SearchMode, SearchPayload};
use blastgate_tools::{BlastGateway, CommandBuilder, OutputTarget, SearchRunner, Tool};
use blastgate_utils::{DatabaseResolver, FilesystemDatabaseResolver, RequestWorkspace};
use std::path::PathBuf;
use std::sync::Arc;

/// Runs validated searches through the configured BLAST+ tools
///
/// All state is read-only after construction, so one service is shared by
/// every request.
pub struct SearchService {
    validator: Validator,
    resolver: Arc<dyn DatabaseResolver>,
    builder: CommandBuilder,
    runner: Arc<dyn SearchRunner>,
    workspace_root: PathBuf,
    output: OutputMode,
}

impl SearchService {
    /// Service backed by the filesystem resolver and the subprocess gateway
    pub fn from_config(config: &Config) -> Self {
        let validator = Validator::from_config(config);
        tracing::info!(
            "Accepting sequences up to {} characters with {} allowed BLAST parameter(s)",
            validator.max_sequence_length(),
            validator.allowed().len()
        );

        Self {
            validator,
            resolver: Arc::new(FilesystemDatabaseResolver::from_config(&config.database)),
            builder: CommandBuilder::new(config.search.tools_dir.clone()),
            runner: Arc::new(BlastGateway::new(config.search.timeout())),
            workspace_root: config.workspace.root.clone(),
            output: config.search.output,
        }
    }

    /// Replace the component that executes commands
    pub fn with_runner(mut self, runner: Arc<dyn SearchRunner>) -> Self {
        self.runner = runner;
        self
    }

    /// Replace the database resolver
    pub fn with_resolver(mut self, resolver: Arc<dyn DatabaseResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn resolver(&self) -> &dyn DatabaseResolver {
        self.resolver.as_ref()
    }

    /// Whether the executable for `tool` can be found
    pub fn tool_available(&self, tool: Tool) -> bool {
        tool.is_available(self.builder.tools_dir())
    }

    /// Validate, normalize, resolve and run one search
    pub async fn search(&self, mode: SearchMode, payload: SearchPayload) -> BlastgateResult<String> {
        let result = self.execute(mode, payload).await;

        if let Err(e) = &result {
            if e.is_client_error() {
                tracing::warn!(kind = e.kind(), "Rejected {} request: {}", mode, e);
            } else {
                tracing::error!(kind = e.kind(), "{} search failed: {:?}", mode, e);
            }
        }

        result
    }

    async fn execute(&self, mode: SearchMode, payload: SearchPayload) -> BlastgateResult<String> {
        let request = self.validator.validate(mode, payload)?;
        tracing::info!(
            "{} search against {} database(s)",
            mode,
            request.databases.len()
        );

        let fasta = normalize_fasta(&request.sequence)?;
        tracing::debug!("Normalized query has {} record(s)", fasta.record_count());

        let databases = self.resolver.resolve(&request.databases)?;

        // Removed on drop, whichever way this function returns
        let workspace = RequestWorkspace::create(&self.workspace_root)?;
        let query = workspace.write_query(fasta.as_str())?;

        let output = match self.output {
            OutputMode::Stdout => OutputTarget::Stdout,
            OutputMode::File => OutputTarget::File(workspace.report_path()),
        };
        let command = self.builder.build(
            mode,
            &query,
            &databases,
            &request.parameter_tokens(),
            output,
        );

        let report = self.runner.run(&command).await?;
        tracing::info!(
            "{} search {} finished with {} bytes of output via {}",
            mode,
            workspace.id(),
            report.len(),
            self.runner.name()
        );
        Ok(report)
    }
}
