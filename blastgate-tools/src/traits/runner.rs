/// Trait for executing prepared BLAST commands
use crate::blast::BlastCommand;
use async_trait::async_trait;
use blastgate_core::BlastgateResult;

/// Runs a prepared command and returns the report text
///
/// Implementations map every failure onto the tool error variants
/// (`ToolUnavailable`, `ToolTimeout`, `ToolLaunchFailed`,
/// `ToolExecutionFailed`).
#[async_trait]
pub trait SearchRunner: Send + Sync {
    async fn run(&self, command: &BlastCommand) -> BlastgateResult<String>;

    /// Name used in log output
    fn name(&self) -> &str {
        "blast"
    }
}
