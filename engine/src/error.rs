//! Pipeline Error Taxonomy
//!
//! Every way a submit can fail, classified. All of these are recovered at
//! the submit boundary and surfaced to the operator as a status message;
//! none are fatal to the running console.

use std::fmt;
use std::io;
use std::time::Duration;

use thiserror::Error;

use crate::pipeline::MAX_SUBPROGRAM_LINES;

/// One external-process invocation in the compile→assemble chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// The symbolic-to-assembly compiler.
    Compile,
    /// The assembler (binary-output mode).
    Assemble,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Compile => write!(f, "compiler"),
            Stage::Assemble => write!(f, "assembler"),
        }
    }
}

/// Classified submit-path failures.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Range bounds missing/non-integer or inverted; raised before any
    /// external process runs.
    #[error("invalid range: {reason}")]
    Range {
        /// Human-readable rejection reason.
        reason: String,
    },

    /// Compiler exited nonzero.
    #[error("compiler exited with status {status}")]
    Compile {
        /// The collaborator's exit status.
        status: i32,
        /// Its stderr diagnostic stream.
        diagnostics: String,
    },

    /// A compiled sub-program exceeds the line budget.
    #[error("sub-program has {lines} lines (limit {MAX_SUBPROGRAM_LINES})")]
    Complexity {
        /// Line count of the offending sub-program.
        lines: usize,
    },

    /// Assembler exited nonzero.
    #[error("assembler exited with status {status}")]
    Assemble {
        /// The collaborator's exit status.
        status: i32,
    },

    /// A collaborator binary could not be launched.
    #[error("failed to launch {stage}: {source}")]
    Spawn {
        /// Which stage failed to start.
        stage: Stage,
        /// The underlying launch error.
        #[source]
        source: io::Error,
    },

    /// Feeding or draining a collaborator failed mid-stage.
    #[error("{stage} i/o failed: {source}")]
    StageIo {
        /// Which stage the i/o belonged to.
        stage: Stage,
        /// The underlying i/o error.
        #[source]
        source: io::Error,
    },

    /// A stage ran past its deadline and was killed.
    #[error("{stage} timed out after {timeout:?}")]
    Timeout {
        /// Which stage timed out.
        stage: Stage,
        /// The configured per-stage deadline.
        timeout: Duration,
    },

    /// The command datagram could not be sent.
    #[error("datagram send failed: {0}")]
    Network(#[source] io::Error),
}
