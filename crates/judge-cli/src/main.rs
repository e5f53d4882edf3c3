//! Developer-facing front end for the sandboxed build-and-execute engine.
//!
//! Not the HTTP server: this binary reads one JSON request from a file or
//! stdin, runs exactly one job, and prints the JSON result to stdout.

use std::io::Read;
use std::process::ExitCode;

use clap::Parser;
use color_eyre::eyre::{self, WrapErr};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_tree::HierarchicalLayer;

use judge_core::{DebugRequest, EngineConfig, TestsRequest};

use crate::cli::{Args, Command, OperationFailure, TestFailure};

mod cli;

fn main() -> ExitCode {
    match main_impl() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err:?}");
            ExitCode::from(cli::EXIT_ERROR)
        }
    }
}

fn main_impl() -> eyre::Result<ExitCode> {
    let args = Args::parse();

    color_eyre::install()?;

    tracing_subscriber::registry()
        .with(HierarchicalLayer::new(2).with_targets(true))
        .with(Targets::new().with_target(
            "judge_core",
            match args.global.verbose {
                0 => LevelFilter::OFF,
                1 => LevelFilter::ERROR,
                2 => LevelFilter::WARN,
                3 => LevelFilter::INFO,
                4 => LevelFilter::DEBUG,
                5.. => LevelFilter::TRACE,
            },
        ))
        .init();

    let config = EngineConfig::from_env().wrap_err("failed to read engine configuration")?;

    let exit_code = match run(&config, args.command) {
        Ok(()) => cli::EXIT_OK,
        Err(err) => 'err: {
            for cause in err.chain() {
                if cause.downcast_ref::<TestFailure>().is_some() {
                    break 'err cli::EXIT_TEST_FAILURE;
                }
                if cause.downcast_ref::<OperationFailure>().is_some() {
                    break 'err cli::EXIT_OPERATION_FAILURE;
                }
            }

            eprintln!("{err:?}");
            cli::EXIT_ERROR
        }
    };

    Ok(ExitCode::from(exit_code))
}

fn run(config: &EngineConfig, command: Command) -> eyre::Result<()> {
    match command {
        Command::Debug { input } => run_debug(config, input),
        Command::Testing { input } => run_testing(config, input),
    }
}

fn read_input(path: Option<std::path::PathBuf>) -> eyre::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(&path)
            .wrap_err_with(|| format!("failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .wrap_err("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn run_debug(config: &EngineConfig, input: Option<std::path::PathBuf>) -> eyre::Result<()> {
    let raw = read_input(input)?;
    let request: DebugRequest = serde_json::from_str(&raw).wrap_err("invalid debug request")?;

    let result = judge_core::engine::debug(config, request).map_err(OperationFailure::from)?;

    println!("{}", serde_json::to_string(&result)?);

    Ok(())
}

fn run_testing(config: &EngineConfig, input: Option<std::path::PathBuf>) -> eyre::Result<()> {
    let raw = read_input(input)?;
    let request: TestsRequest = serde_json::from_str(&raw).wrap_err("invalid testing request")?;

    let result = judge_core::engine::testing(config, request).map_err(OperationFailure::from)?;

    println!("{}", serde_json::to_string(&result)?);

    if result.ok {
        Ok(())
    } else {
        Err(eyre::Report::new(TestFailure))
    }
}
