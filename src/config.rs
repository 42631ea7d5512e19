use std::env;
use std::fs;
use std::path::PathBuf;

use crate::cli::Cli;
use crate::error::{Result, TaskError};

/// Task settings as supplied by the caller. Populated once before the run and
/// read-only afterwards; `validate` turns it into a [`ValidatedConfig`].
#[derive(Debug, Clone, Default)]
pub struct TaskConfig {
    pub classpath: Option<String>,
    pub source_dir: Option<PathBuf>,
    pub target_dir: Option<PathBuf>,
    pub jdk_libs_dir: Option<PathBuf>,
}

/// Settings after validation: every field present and checked.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    pub classpath: String,
    pub source_dir: PathBuf,
    pub target_dir: PathBuf,
    pub jdk_libs_dir: PathBuf,
}

impl TaskConfig {
    pub fn from_cli(cli: &Cli) -> Self {
        TaskConfig {
            classpath: cli.classpath.clone(),
            source_dir: cli.source_dir.clone(),
            target_dir: cli.target_dir.clone(),
            jdk_libs_dir: cli.jdk_libs_dir.clone().or_else(default_jdk_libs_dir),
        }
    }

    /// Checks settings in a fixed order: classpath, source directory, target
    /// directory, JDK libs directory. The only side effect is creating the
    /// target directory (and parents) when absent. Any failure is fatal.
    pub fn validate(&self) -> Result<ValidatedConfig> {
        let classpath = self
            .classpath
            .clone()
            .ok_or(TaskError::MissingConfiguration { field: "classpath" })?;

        let source_dir = self
            .source_dir
            .clone()
            .ok_or(TaskError::MissingConfiguration {
                field: "source_dir",
            })?;
        if !source_dir.is_dir() {
            return Err(TaskError::InvalidPath {
                path: source_dir,
                reason: "not a directory".to_string(),
            });
        }

        let target_dir = self
            .target_dir
            .clone()
            .ok_or(TaskError::MissingConfiguration {
                field: "target_dir",
            })?;
        fs::create_dir_all(&target_dir).map_err(|e| {
            TaskError::io(
                format!("failed to create target directory {}", target_dir.display()),
                e,
            )
        })?;

        let jdk_libs_dir = self
            .jdk_libs_dir
            .clone()
            .ok_or(TaskError::MissingConfiguration {
                field: "jdk_libs_dir",
            })?;
        if !jdk_libs_dir.is_dir() {
            return Err(TaskError::InvalidPath {
                path: jdk_libs_dir,
                reason: "not a directory".to_string(),
            });
        }

        Ok(ValidatedConfig {
            classpath,
            source_dir,
            target_dir,
            jdk_libs_dir,
        })
    }
}

/// Computed once at configuration construction; never read deeper in the
/// pipeline. `JAVA_HOME` stands in for the JVM's `java.home` property.
pub fn default_jdk_libs_dir() -> Option<PathBuf> {
    env::var_os("JAVA_HOME").map(|home| PathBuf::from(home).join("lib"))
}
