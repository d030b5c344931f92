//! Integration tests for the compile→assemble pipeline and the submit path.
//!
//! The collaborator binaries are stand-ins: small shell scripts that record
//! how they were invoked and emit canned output. This verifies the stage
//! sequencing rules (Stage 2 never runs after a Stage 1 failure, the
//! complexity check aborts before assembly) against real child processes.

#![cfg(unix)]

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tempfile::TempDir;
use tokio::net::UdpSocket;
use tokio::sync::mpsc;
use tokio::time::timeout;

use plotcast_engine::{
    Engine, EngineConfig, EngineMessage, Pipeline, PipelineError, SurfaceEvent,
};

const RECV_DEADLINE: Duration = Duration::from_secs(5);

/// Write an executable shell script into `dir`.
fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write script");
    let mut perms = std::fs::metadata(&path).expect("script metadata").permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).expect("make script executable");
    path
}

/// A fake compiler that records its arguments and emits fixed assembly.
fn ok_compiler(dir: &Path) -> PathBuf {
    let args_file = dir.join("compile_args");
    write_script(
        dir,
        "conv",
        &format!(
            "cat > /dev/null\n\
             echo \"$@\" > {}\n\
             printf 'loadi r0 1\\nhalt\\n'",
            args_file.display()
        ),
    )
}

/// A fake assembler that records that it ran and emits three bytes.
fn ok_assembler(dir: &Path) -> PathBuf {
    let marker = dir.join("assembler_ran");
    write_script(
        dir,
        "assembler",
        &format!(
            "cat > /dev/null\n\
             touch {}\n\
             printf '\\001\\002\\003'",
            marker.display()
        ),
    )
}

fn config_for(dir: &Path) -> EngineConfig {
    EngineConfig::default()
        .with_collaborators(ok_compiler(dir), ok_assembler(dir))
        .with_stage_timeout(Duration::from_secs(5))
}

#[tokio::test]
async fn pipeline_runs_both_stages() {
    let dir = TempDir::new().expect("tempdir");
    let pipeline = Pipeline::new(&config_for(dir.path()));

    let payload = pipeline.run(".plotxy 0 0 0 (x/1.)").await.expect("pipeline");
    assert_eq!(payload, vec![1, 2, 3]);

    let args = std::fs::read_to_string(dir.path().join("compile_args")).expect("args recorded");
    assert!(args.contains("-s"), "compiler invoked without -s: {args}");
    assert!(dir.path().join("assembler_ran").exists());
}

#[tokio::test]
async fn raw_run_omits_simplification_flag() {
    let dir = TempDir::new().expect("tempdir");
    let pipeline = Pipeline::new(&config_for(dir.path()));

    pipeline.run_raw(".plotxy 0 0 0 x").await.expect("raw pipeline");

    let args = std::fs::read_to_string(dir.path().join("compile_args")).expect("args recorded");
    assert!(!args.contains("-s"), "raw mode must not simplify: {args}");
}

#[tokio::test]
async fn compile_failure_never_invokes_assembler() {
    let dir = TempDir::new().expect("tempdir");
    let compiler = write_script(
        dir.path(),
        "conv",
        "cat > /dev/null\necho 'parse error near token 7' >&2\nexit 3",
    );
    let assembler = ok_assembler(dir.path());
    let config = EngineConfig::default()
        .with_collaborators(compiler, assembler)
        .with_stage_timeout(Duration::from_secs(5));

    let err = Pipeline::new(&config)
        .run("garbage")
        .await
        .expect_err("compile fails");
    match err {
        PipelineError::Compile { status, diagnostics } => {
            assert_eq!(status, 3);
            assert!(diagnostics.contains("parse error"), "got: {diagnostics}");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(
        !dir.path().join("assembler_ran").exists(),
        "assembler must not run after a compile failure"
    );
}

#[tokio::test]
async fn oversized_sub_program_never_reaches_assembler() {
    let dir = TempDir::new().expect("tempdir");
    // 257 lines in a single sub-program: one over budget.
    let compiler = write_script(
        dir.path(),
        "conv",
        "cat > /dev/null\ni=0\nwhile [ $i -lt 257 ]; do echo op; i=$((i+1)); done",
    );
    let assembler = ok_assembler(dir.path());
    let config = EngineConfig::default()
        .with_collaborators(compiler, assembler)
        .with_stage_timeout(Duration::from_secs(5));

    let err = Pipeline::new(&config)
        .run(".plotxy 0 0 0 x")
        .await
        .expect_err("over budget");
    assert!(matches!(err, PipelineError::Complexity { lines: 257 }));
    assert!(!dir.path().join("assembler_ran").exists());
}

#[tokio::test]
async fn assemble_failure_is_classified() {
    let dir = TempDir::new().expect("tempdir");
    let compiler = ok_compiler(dir.path());
    let assembler = write_script(dir.path(), "assembler", "cat > /dev/null\nexit 2");
    let config = EngineConfig::default()
        .with_collaborators(compiler, assembler)
        .with_stage_timeout(Duration::from_secs(5));

    let err = Pipeline::new(&config)
        .run(".plotxy 0 0 0 x")
        .await
        .expect_err("assemble fails");
    assert!(matches!(err, PipelineError::Assemble { status: 2 }));
}

#[tokio::test]
async fn hung_collaborator_is_killed_at_the_deadline() {
    let dir = TempDir::new().expect("tempdir");
    let compiler = write_script(dir.path(), "conv", "sleep 30");
    let assembler = ok_assembler(dir.path());
    let config = EngineConfig::default()
        .with_collaborators(compiler, assembler)
        .with_stage_timeout(Duration::from_millis(100));

    let err = Pipeline::new(&config)
        .run(".plotxy 0 0 0 x")
        .await
        .expect_err("deadline expires");
    assert!(matches!(err, PipelineError::Timeout { .. }));
}

/// Drain engine messages until one matches, or the deadline passes.
async fn recv_until<F>(rx: &mut mpsc::Receiver<EngineMessage>, mut pred: F) -> EngineMessage
where
    F: FnMut(&EngineMessage) -> bool,
{
    timeout(RECV_DEADLINE, async {
        loop {
            let msg = rx.recv().await.expect("engine channel open");
            if pred(&msg) {
                return msg;
            }
        }
    })
    .await
    .expect("message before deadline")
}

#[tokio::test]
async fn submit_dispatches_compiled_program_to_device() {
    let dir = TempDir::new().expect("tempdir");

    // Stand in for the plotting device.
    let device = UdpSocket::bind("127.0.0.1:0").await.expect("bind device");
    let device_port = device.local_addr().expect("device addr").port();

    let config = config_for(dir.path())
        .with_device("127.0.0.1")
        .with_ports(device_port, 0);

    let (tx, mut rx) = mpsc::channel(64);
    let mut engine = Engine::new(config, tx);
    engine.start().await.expect("engine start");

    engine
        .handle_event(SurfaceEvent::Submit {
            expression: "x+y".to_string(),
            z_min: String::new(),
            z_max: String::new(),
        })
        .await
        .expect("submit");

    let dispatched = recv_until(&mut rx, |m| matches!(m, EngineMessage::Dispatched { .. })).await;
    assert!(matches!(dispatched, EngineMessage::Dispatched { bytes: 3 }));

    let mut buf = [0u8; 64];
    let (len, _) = timeout(RECV_DEADLINE, device.recv_from(&mut buf))
        .await
        .expect("datagram before deadline")
        .expect("device receives");
    assert_eq!(&buf[..len], &[1, 2, 3]);
}

#[tokio::test]
async fn raw_submit_dispatches_without_transform_state() {
    let dir = TempDir::new().expect("tempdir");

    let device = UdpSocket::bind("127.0.0.1:0").await.expect("bind device");
    let device_port = device.local_addr().expect("device addr").port();

    let config = config_for(dir.path())
        .with_device("127.0.0.1")
        .with_ports(device_port, 0);

    let (tx, mut rx) = mpsc::channel(64);
    let mut engine = Engine::new(config, tx);
    engine.start().await.expect("engine start");

    engine
        .handle_event(SurfaceEvent::SubmitRaw {
            command: ".plotxy 0 0 0 x".to_string(),
        })
        .await
        .expect("raw submit");

    recv_until(&mut rx, |m| matches!(m, EngineMessage::Dispatched { .. })).await;

    let args = std::fs::read_to_string(dir.path().join("compile_args")).expect("args recorded");
    assert!(!args.contains("-s"), "raw submit must not simplify: {args}");
}
