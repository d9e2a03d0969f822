use clap::Parser;
use miette::{IntoDiagnostic, Result};
use qkeycode_gen::cli::QkeycodeArgs;
use qkeycode_gen::{GeneratorConfig, OutputMode};
use std::io::Write;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

fn main() -> Result<()> {
    let args = QkeycodeArgs::parse();

    // stdout carries the generated code, so logs go to stderr
    let default_level = if args.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(default_level.into())
                .with_env_var("QKEYCODE_LOG")
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = match &args.config {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::default(),
    };

    let mode = OutputMode::from(&args.output);
    let code = qkeycode_gen::generate(&args.file, mode, &config)?;

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(code.as_bytes()).into_diagnostic()?;
    stdout.flush().into_diagnostic()?;

    Ok(())
}
