//! Engine Configuration
//!
//! Device target, collaborator paths, and pipeline limits. Defaults match
//! the deployed console; every field can be overridden through `PLOTCAST_*`
//! environment variables or the builder-style setters (used by tests to
//! point the engine at fake collaborators and loopback ports).

use std::path::PathBuf;
use std::time::Duration;

/// Fixed destination port for compiled program datagrams.
pub const COMMAND_PORT: u16 = 20_000;

/// Fixed port the telemetry receiver binds on.
pub const TELEMETRY_PORT: u16 = 65_434;

/// Device address used when none is supplied on the command line.
pub const DEFAULT_DEVICE_ADDR: &str = "192.168.2.99";

/// Default path of the compiler collaborator.
pub const DEFAULT_COMPILER: &str = "../compiler/bin/conv";

/// Default path of the assembler collaborator.
pub const DEFAULT_ASSEMBLER: &str = "../assembler/bin/assembler";

/// Default per-stage deadline for collaborator calls.
pub const DEFAULT_STAGE_TIMEOUT: Duration = Duration::from_secs(10);

/// Engine configuration.
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// Network address of the plotting device.
    pub device_addr: String,
    /// Destination port for command datagrams.
    pub command_port: u16,
    /// Local port for incoming telemetry datagrams.
    pub telemetry_port: u16,
    /// Path of the compiler collaborator.
    pub compiler: PathBuf,
    /// Path of the assembler collaborator.
    pub assembler: PathBuf,
    /// Whether the compiler is invoked with its simplification flag.
    pub simplify: bool,
    /// Per-stage deadline; a stage past it is killed.
    pub stage_timeout: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            device_addr: DEFAULT_DEVICE_ADDR.to_string(),
            command_port: COMMAND_PORT,
            telemetry_port: TELEMETRY_PORT,
            compiler: PathBuf::from(DEFAULT_COMPILER),
            assembler: PathBuf::from(DEFAULT_ASSEMBLER),
            simplify: true,
            stage_timeout: DEFAULT_STAGE_TIMEOUT,
        }
    }
}

impl EngineConfig {
    /// Create configuration from environment variables, falling back to the
    /// deployed defaults.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            device_addr: std::env::var("PLOTCAST_DEVICE").unwrap_or(defaults.device_addr),
            command_port: COMMAND_PORT,
            telemetry_port: TELEMETRY_PORT,
            compiler: std::env::var("PLOTCAST_COMPILER")
                .map(PathBuf::from)
                .unwrap_or(defaults.compiler),
            assembler: std::env::var("PLOTCAST_ASSEMBLER")
                .map(PathBuf::from)
                .unwrap_or(defaults.assembler),
            simplify: std::env::var("PLOTCAST_NO_SIMPLIFY")
                .map(|v| v != "1" && v.to_lowercase() != "true")
                .unwrap_or(true),
            stage_timeout: std::env::var("PLOTCAST_STAGE_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(defaults.stage_timeout),
        }
    }

    /// Set the device address.
    #[must_use]
    pub fn with_device(mut self, addr: impl Into<String>) -> Self {
        self.device_addr = addr.into();
        self
    }

    /// Point the pipeline at specific collaborator binaries.
    #[must_use]
    pub fn with_collaborators(
        mut self,
        compiler: impl Into<PathBuf>,
        assembler: impl Into<PathBuf>,
    ) -> Self {
        self.compiler = compiler.into();
        self.assembler = assembler.into();
        self
    }

    /// Override both wire ports (loopback tests only; the deployed ports are
    /// fixed).
    #[must_use]
    pub fn with_ports(mut self, command_port: u16, telemetry_port: u16) -> Self {
        self.command_port = command_port;
        self.telemetry_port = telemetry_port;
        self
    }

    /// Set the per-stage deadline.
    #[must_use]
    pub fn with_stage_timeout(mut self, timeout: Duration) -> Self {
        self.stage_timeout = timeout;
        self
    }
}
