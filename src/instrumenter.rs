use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::classpath::CLASSPATH_DELIMITER;
use crate::error::{Result, TaskError};

/// The transform operation every engine exposes. One instance is constructed
/// per run and reused sequentially across artifacts; errors are reported as
/// the failure cause for the artifact being processed.
pub trait Instrument {
    fn instrument(&self, input: &[u8]) -> anyhow::Result<Vec<u8>>;
}

fn java_command(jar: &Path) -> Command {
    let java_bin = std::env::var("CLASS_INSTRUMENT_JAVA").unwrap_or_else(|_| "java".to_string());

    #[cfg(windows)]
    {
        let lower = java_bin.to_ascii_lowercase();
        if lower.ends_with(".cmd") || lower.ends_with(".bat") {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(&java_bin).arg("-jar").arg(jar);
            return cmd;
        }
    }

    let mut cmd = Command::new(java_bin);
    cmd.arg("-jar").arg(jar);
    cmd
}

/// Drives an external instrumenter jar: artifact bytes go in on stdin, the
/// transformed bytes come back on stdout, the resolved classpath is passed
/// once as an argument.
#[derive(Debug, Clone)]
pub struct JavaInstrumenter {
    jar: PathBuf,
    classpath_arg: String,
}

impl JavaInstrumenter {
    pub fn new(jar: PathBuf, classpath: &[PathBuf]) -> Result<Self> {
        if !jar.is_file() {
            return Err(TaskError::InstrumenterInit(format!(
                "instrumenter jar not found: {}",
                jar.display()
            )));
        }
        let classpath_arg = classpath
            .iter()
            .map(|p| p.to_string_lossy())
            .collect::<Vec<_>>()
            .join(&CLASSPATH_DELIMITER.to_string());
        Ok(JavaInstrumenter { jar, classpath_arg })
    }
}

impl Instrument for JavaInstrumenter {
    fn instrument(&self, input: &[u8]) -> anyhow::Result<Vec<u8>> {
        use anyhow::{Context, bail};

        let mut child = java_command(&self.jar)
            .arg("--classpath")
            .arg(&self.classpath_arg)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .context("failed to execute java (ensure JRE/JDK is installed)")?;

        // Feed stdin from a separate thread so a child that writes before
        // draining its input cannot deadlock against us.
        let mut stdin = child
            .stdin
            .take()
            .context("instrumenter child has no stdin")?;
        let payload = input.to_vec();
        let writer = std::thread::spawn(move || stdin.write_all(&payload));

        let output = child
            .wait_with_output()
            .context("failed to wait for instrumenter")?;
        let write_result = writer
            .join()
            .map_err(|_| anyhow::anyhow!("stdin writer thread panicked"))?;

        // A child that dies early breaks the stdin pipe; its stderr is the
        // more useful failure, so check the exit status first.
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("instrumenter failed: {}", stderr.trim());
        }
        write_result.context("failed to write artifact bytes to instrumenter")?;

        Ok(output.stdout)
    }
}
