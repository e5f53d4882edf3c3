//! End-to-end scenarios against a real `cargo`/`rustc` toolchain, mirroring
//! the literal scenarios used to validate the original service this engine
//! reimplements. These are slow (each spins up a real `cargo build`) and are
//! skipped unless `cargo`/`rustc` are on `PATH`.

use std::path::PathBuf;
use std::time::Duration;

use judge_core::{DebugRequest, EngineConfig};
use tempdir::TempDir;

fn toolchain_available() -> bool {
    std::process::Command::new("cargo")
        .arg("--version")
        .output()
        .is_ok_and(|o| o.status.success())
}

fn config(root: PathBuf, timeout: Duration) -> EngineConfig {
    #[cfg(unix)]
    let uid = unsafe { libc::getuid() };
    #[cfg(not(unix))]
    let uid = 0;

    EngineConfig {
        sandbox_dir: root,
        sandbox_user_uid: uid,
        timeout,
    }
}

#[test]
fn float_subtraction_scenario() {
    if !toolchain_available() {
        return;
    }

    let root = TempDir::new("judge-core-e2e").unwrap();
    let cfg = config(root.path().to_path_buf(), Duration::from_secs(120));

    let code = r#"
use std::io;

fn main() {
    let mut line = String::new();
    io::stdin().read_line(&mut line).unwrap();
    let x: f64 = line.trim().parse().unwrap();
    println!("{}", x - x.floor());
}
"#;

    let request = DebugRequest {
        code: code.to_string(),
        data_in: Some("9.08".to_string()),
    };

    let result = judge_core::engine::debug(&cfg, request).unwrap();
    assert!(result.error.is_none(), "unexpected error: {:?}", result.error);

    let got: f64 = result.result.unwrap().trim().parse().unwrap();
    assert!((got - 0.08).abs() < 1e-6);
}

#[test]
fn empty_program_scenario() {
    if !toolchain_available() {
        return;
    }

    let root = TempDir::new("judge-core-e2e").unwrap();
    let cfg = config(root.path().to_path_buf(), Duration::from_secs(120));

    let request = DebugRequest {
        code: "fn main() {}".to_string(),
        data_in: None,
    };

    let result = judge_core::engine::debug(&cfg, request).unwrap();
    assert_eq!(result.result, None);
    assert_eq!(result.error, None);
}

#[test]
fn timeout_scenario() {
    if !toolchain_available() {
        return;
    }

    let root = TempDir::new("judge-core-e2e").unwrap();
    // generous compile timeout, tight execute timeout
    let cfg = config(root.path().to_path_buf(), Duration::from_secs(2));

    let request = DebugRequest {
        code: "fn main() { loop {} }".to_string(),
        data_in: None,
    };

    let result = judge_core::engine::debug(&cfg, request);
    // either the compile itself times out or the execution does; both are
    // acceptable outcomes of a 2 second ceiling applied to both stages.
    match result {
        Ok(r) => assert!(r.error.is_some()),
        Err(_) => panic!("expected a populated result, not a host error"),
    }
}
