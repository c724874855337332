//! Mock runner for exercising the search pipeline without BLAST+

use crate::blast::BlastCommand;
use crate::traits::SearchRunner;
use async_trait::async_trait;
use blastgate_core::{BlastgateError, BlastgateResult};
use std::sync::Mutex;

type Responder = Box<dyn Fn(&BlastCommand) -> BlastgateResult<String> + Send + Sync>;

/// Records every command it receives and answers with a canned result
pub struct MockSearchRunner {
    responder: Responder,
    calls: Mutex<Vec<BlastCommand>>,
}

impl Default for MockSearchRunner {
    fn default() -> Self {
        Self::with_report("<html><body>mock report</body></html>")
    }
}

impl MockSearchRunner {
    /// Always succeed with the given report
    pub fn with_report(report: impl Into<String>) -> Self {
        let report = report.into();
        Self::with_responder(move |_| Ok(report.clone()))
    }

    /// Always fail with the error built by `make_error`
    pub fn failing<F>(make_error: F) -> Self
    where
        F: Fn() -> BlastgateError + Send + Sync + 'static,
    {
        Self::with_responder(move |_| Err(make_error()))
    }

    /// Answer each command with a custom function
    pub fn with_responder<F>(responder: F) -> Self
    where
        F: Fn(&BlastCommand) -> BlastgateResult<String> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Commands received so far, in order
    pub fn calls(&self) -> Vec<BlastCommand> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }
}

#[async_trait]
impl SearchRunner for MockSearchRunner {
    async fn run(&self, command: &BlastCommand) -> BlastgateResult<String> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(command.clone());
        (self.responder)(command)
    }

    fn name(&self) -> &str {
        "mock"
    }
}
