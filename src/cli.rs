use clap::Parser;
use std::path::PathBuf;

/// Path settings are optional at the parser level so that validation owns the
/// missing-setting failures and reports them in a fixed order.
#[derive(Debug, Clone, Parser)]
#[command(name = "class-instrumenter")]
#[command(about = "Instrument compiled Java classes with an external bytecode instrumenter")]
pub struct Cli {
    /// Semicolon-delimited classpath handed to the instrumenter for type resolution
    #[arg(long, value_name = "SPEC")]
    pub classpath: Option<String>,

    /// Directory to read .class files from
    #[arg(long, value_name = "DIR")]
    pub source_dir: Option<PathBuf>,

    /// Directory to write instrumented .class files to
    #[arg(long, value_name = "DIR")]
    pub target_dir: Option<PathBuf>,

    /// JDK libs directory; defaults to $JAVA_HOME/lib when JAVA_HOME is set
    #[arg(long, value_name = "DIR")]
    pub jdk_libs_dir: Option<PathBuf>,

    /// Instrumenter jar executed once per artifact
    #[arg(long, value_name = "FILE")]
    pub instrumenter_jar: Option<PathBuf>,

    /// Log at debug level instead of info
    #[arg(short, long)]
    pub verbose: bool,
}
