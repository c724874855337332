//! BLAST command-line construction
//!
//! Argument order is fixed:
//! `-html -query <path> -db "<p1> <p2>" [mode defaults] [user tokens] [-out <path>]`

use crate::types::Tool;
use blastgate_core::{ParameterToken, SearchMode};
use blastgate_utils::ResolvedDatabase;
use std::fmt;
use std::path::{Path, PathBuf};

/// Where the tool writes its report
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OutputTarget {
    /// Report captured from standard output
    #[default]
    Stdout,
    /// Report written to a file via `-out`
    File(PathBuf),
}

/// A fully assembled BLAST invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlastCommand {
    program: PathBuf,
    args: Vec<String>,
    output: OutputTarget,
}

impl BlastCommand {
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>, output: OutputTarget) -> Self {
        Self {
            program: program.into(),
            args,
            output,
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn output(&self) -> &OutputTarget {
        &self.output
    }
}

impl fmt::Display for BlastCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Builds argument vectors for `blastn` and `blastp`
#[derive(Debug, Clone, Default)]
pub struct CommandBuilder {
    tools_dir: Option<PathBuf>,
}

impl CommandBuilder {
    pub fn new(tools_dir: Option<PathBuf>) -> Self {
        Self { tools_dir }
    }

    pub fn tools_dir(&self) -> Option<&Path> {
        self.tools_dir.as_deref()
    }

    /// Assemble the command for one search
    ///
    /// Pure function of its inputs: user tokens are appended verbatim and in
    /// order, database paths are joined into a single `-db` argument.
    pub fn build(
        &self,
        mode: SearchMode,
        query: &Path,
        databases: &[ResolvedDatabase],
        tokens: &[ParameterToken],
        output: OutputTarget,
    ) -> BlastCommand {
        let program = Tool::for_mode(mode).program_path(self.tools_dir());

        let db_paths = databases
            .iter()
            .map(|db| db.base_path.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(" ");

        let mut args = vec![
            "-html".to_string(),
            "-query".to_string(),
            query.to_string_lossy().into_owned(),
            "-db".to_string(),
            db_paths,
        ];

        if let Some(defaults) = mode.scoring_defaults() {
            args.extend(defaults.to_args());
        }

        args.extend(tokens.iter().map(|t| t.text.clone()));

        if let OutputTarget::File(path) = &output {
            args.push("-out".to_string());
            args.push(path.to_string_lossy().into_owned());
        }

        BlastCommand::new(program, args, output)
    }
}
