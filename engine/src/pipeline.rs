//! Pipeline Executor
//!
//! Runs a command string through the two external transformation stages:
//! the symbolic-to-assembly compiler, then the assembler in binary-output
//! mode. Stage 2 is only invoked after Stage 1 succeeds and its output
//! passes the complexity check. Each stage is bounded by a deadline; an
//! expired stage's child process is killed.
//!
//! The executor itself is synchronous run-to-completion per stage but is
//! always driven from a spawned task — never from the surface event loop.

use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use crate::config::EngineConfig;
use crate::error::{PipelineError, Stage};

/// Line budget for one compiled sub-program.
pub const MAX_SUBPROGRAM_LINES: usize = 256;

/// Compiler output is a set of sub-programs separated by this character.
pub const SUBPROGRAM_DELIMITER: char = '<';

/// Two-stage compile→assemble executor.
#[derive(Clone, Debug)]
pub struct Pipeline {
    compiler: PathBuf,
    assembler: PathBuf,
    simplify: bool,
    stage_timeout: Duration,
}

impl Pipeline {
    /// Create an executor from the engine configuration.
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            compiler: config.compiler.clone(),
            assembler: config.assembler.clone(),
            simplify: config.simplify,
            stage_timeout: config.stage_timeout,
        }
    }

    /// Compile, check complexity, assemble. The standard submit path.
    pub async fn run(&self, command: &str) -> Result<Vec<u8>, PipelineError> {
        let assembly = self.compile(command, self.simplify).await?;
        check_complexity(&assembly)?;
        self.assemble(&assembly).await
    }

    /// Compile without the simplification flag and assemble without the
    /// complexity check. The raw-console path.
    pub async fn run_raw(&self, command: &str) -> Result<Vec<u8>, PipelineError> {
        let assembly = self.compile(command, false).await?;
        self.assemble(&assembly).await
    }

    async fn compile(&self, command: &str, simplify: bool) -> Result<String, PipelineError> {
        let args: &[&str] = if simplify { &["-s"] } else { &[] };
        let output = self
            .run_stage(Stage::Compile, &self.compiler, args, command.as_bytes())
            .await?;
        if !output.status.success() {
            return Err(PipelineError::Compile {
                status: output.status.code().unwrap_or(-1),
                diagnostics: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    async fn assemble(&self, assembly: &str) -> Result<Vec<u8>, PipelineError> {
        let output = self
            .run_stage(
                Stage::Assemble,
                &self.assembler,
                &["-f", "bin"],
                assembly.as_bytes(),
            )
            .await?;
        if !output.status.success() {
            return Err(PipelineError::Assemble {
                status: output.status.code().unwrap_or(-1),
            });
        }
        Ok(output.stdout)
    }

    /// Spawn one collaborator, feed it on stdin, and collect its output
    /// within the stage deadline. The child is killed if the deadline
    /// expires or the task is aborted.
    async fn run_stage(
        &self,
        stage: Stage,
        program: &Path,
        args: &[&str],
        input: &[u8],
    ) -> Result<Output, PipelineError> {
        debug!(%stage, program = %program.display(), "launching collaborator");
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| PipelineError::Spawn { stage, source })?;

        let mut stdin = child.stdin.take().ok_or_else(|| PipelineError::StageIo {
            stage,
            source: std::io::Error::new(std::io::ErrorKind::BrokenPipe, "child stdin not captured"),
        })?;
        // Feed the collaborator concurrently with draining it, so a stage
        // whose output outruns our writes cannot wedge both pipes. A write
        // into a collaborator that exited early is not an error in itself;
        // its exit status is what gets classified.
        let payload = input.to_vec();
        let feeder = tokio::spawn(async move {
            if let Err(err) = stdin.write_all(&payload).await {
                debug!(error = %err, "collaborator stopped reading early");
            }
            // Dropping stdin closes the pipe so the collaborator sees EOF.
        });

        let result = timeout(self.stage_timeout, child.wait_with_output()).await;
        feeder.abort();
        match result {
            Ok(result) => result.map_err(|source| PipelineError::StageIo { stage, source }),
            Err(_) => Err(PipelineError::Timeout {
                stage,
                timeout: self.stage_timeout,
            }),
        }
    }
}

/// Enforce the per-sub-program line budget on compiler output.
///
/// Exactly [`MAX_SUBPROGRAM_LINES`] lines passes; one more fails.
pub fn check_complexity(assembly: &str) -> Result<(), PipelineError> {
    for program in assembly.split(SUBPROGRAM_DELIMITER) {
        let lines = program.lines().count();
        if lines > MAX_SUBPROGRAM_LINES {
            return Err(PipelineError::Complexity { lines });
        }
    }
    Ok(())
}
