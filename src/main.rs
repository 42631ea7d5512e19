use anyhow::{Context, Result};
use clap::Parser;
use class_instrumenter::cli::Cli;
use class_instrumenter::config::TaskConfig;
use class_instrumenter::driver;
use class_instrumenter::instrumenter::JavaInstrumenter;
use class_instrumenter::logger;
use tracing::info;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    let config = TaskConfig::from_cli(&cli);
    let jar = cli
        .instrumenter_jar
        .context("--instrumenter-jar is required")?;

    let summary = driver::run(&config, move |classpath| {
        JavaInstrumenter::new(jar, classpath)
    })
    .context("instrumentation run failed")?;

    info!(
        "instrumented {} artifacts against {} classpath entries in {} ms",
        summary.artifacts_instrumented, summary.classpath_entries, summary.duration_ms
    );

    Ok(())
}
