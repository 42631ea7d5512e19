use std::fs;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};

use crate::classpath;
use crate::config::TaskConfig;
use crate::error::{Result, TaskError};
use crate::instrumenter::Instrument;
use crate::scan::scan_artifacts;

/// Outcome of a fully successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub artifacts_instrumented: usize,
    pub classpath_entries: usize,
    pub duration_ms: u64,
}

/// Runs the whole pipeline: validate, assemble the classpath, construct the
/// instrumenter, then read/transform/write each discovered artifact in
/// sequence. The first failure of any step aborts the run; outputs already
/// written stay on disk.
///
/// The instrumenter is built once from the resolved classpath and reused for
/// every artifact, so `make_instrumenter` runs before any artifact is read.
pub fn run<I, F>(config: &TaskConfig, make_instrumenter: F) -> Result<RunSummary>
where
    I: Instrument,
    F: FnOnce(&[PathBuf]) -> Result<I>,
{
    let start = Instant::now();
    let config = config.validate()?;

    debug!("resolving instrumentation classpath");
    let resolved = classpath::assemble(&config.classpath, &config.jdk_libs_dir)?;
    info!(entries = resolved.len(), "classpath resolved");

    info!("creating instrumenter");
    let instrumenter = make_instrumenter(&resolved)?;

    info!("scanning {}", config.source_dir.display());
    let artifacts = scan_artifacts(&config.source_dir, &config.target_dir)?;

    for artifact in &artifacts {
        info!("instrumenting {}", artifact.input_path.display());

        let input = fs::read(&artifact.input_path).map_err(|e| {
            TaskError::io(
                format!("failed to read {}", artifact.input_path.display()),
                e,
            )
        })?;

        let output =
            instrumenter
                .instrument(&input)
                .map_err(|e| TaskError::Instrumentation {
                    artifact: artifact.input_path.clone(),
                    reason: format!("{e:#}"),
                })?;
        debug!(
            "file size changed from {} to {}",
            input.len(),
            output.len()
        );

        // The mirrored relative path may introduce subdirectories that did
        // not exist when the target root was created.
        if let Some(parent) = artifact.output_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                TaskError::io(format!("failed to create {}", parent.display()), e)
            })?;
        }
        fs::write(&artifact.output_path, &output).map_err(|e| {
            TaskError::io(
                format!("failed to write {}", artifact.output_path.display()),
                e,
            )
        })?;
    }

    Ok(RunSummary {
        artifacts_instrumented: artifacts.len(),
        classpath_entries: resolved.len(),
        duration_ms: start.elapsed().as_millis() as u64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::files_with_extension;
    use std::cell::Cell;
    use std::rc::Rc;

    fn temp_dir(prefix: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        p.push(format!(
            "{prefix}-{}-{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        p
    }

    fn workspace(prefix: &str) -> (PathBuf, TaskConfig) {
        let base = temp_dir(prefix);
        fs::create_dir_all(base.join("classes")).unwrap();
        fs::create_dir_all(base.join("jdk/lib")).unwrap();
        fs::write(base.join("jdk/lib/rt.jar"), b"stub").unwrap();

        let config = TaskConfig {
            classpath: Some("/libs/a.jar;/libs/b.jar".to_string()),
            source_dir: Some(base.join("classes")),
            target_dir: Some(base.join("out")),
            jdk_libs_dir: Some(base.join("jdk/lib")),
        };
        (base, config)
    }

    struct PassThrough;

    impl Instrument for PassThrough {
        fn instrument(&self, input: &[u8]) -> anyhow::Result<Vec<u8>> {
            Ok(input.to_vec())
        }
    }

    struct FailAlways {
        calls: Rc<Cell<usize>>,
    }

    impl Instrument for FailAlways {
        fn instrument(&self, _input: &[u8]) -> anyhow::Result<Vec<u8>> {
            self.calls.set(self.calls.get() + 1);
            anyhow::bail!("unresolved symbol")
        }
    }

    struct FailOnSecond {
        calls: Rc<Cell<usize>>,
    }

    impl Instrument for FailOnSecond {
        fn instrument(&self, input: &[u8]) -> anyhow::Result<Vec<u8>> {
            self.calls.set(self.calls.get() + 1);
            if self.calls.get() > 1 {
                anyhow::bail!("unresolved symbol")
            }
            Ok(input.to_vec())
        }
    }

    #[test]
    fn noop_run_mirrors_the_source_tree_exactly() {
        let (base, config) = workspace("instrument-driver");
        fs::create_dir_all(base.join("classes/pkg/sub")).unwrap();
        fs::write(base.join("classes/pkg/Foo.class"), b"foo bytes").unwrap();
        fs::write(base.join("classes/pkg/sub/Bar.class"), b"bar bytes").unwrap();
        fs::write(base.join("classes/pkg/Readme.md"), b"skip").unwrap();

        let mut seen_classpath = Vec::new();
        let summary = run(&config, |cp| {
            seen_classpath = cp.to_vec();
            Ok(PassThrough)
        })
        .unwrap();

        assert_eq!(summary.artifacts_instrumented, 2);
        assert_eq!(summary.classpath_entries, 3);
        assert_eq!(seen_classpath[0], PathBuf::from("/libs/a.jar"));
        assert_eq!(seen_classpath[1], PathBuf::from("/libs/b.jar"));
        assert_eq!(seen_classpath[2], base.join("jdk/lib/rt.jar"));

        // Round-trip through the no-op engine and nothing else in the target.
        assert_eq!(
            fs::read(base.join("out/pkg/Foo.class")).unwrap(),
            b"foo bytes"
        );
        assert_eq!(
            fs::read(base.join("out/pkg/sub/Bar.class")).unwrap(),
            b"bar bytes"
        );
        let written = files_with_extension(&base.join("out"), "class").unwrap();
        assert_eq!(written.len(), 2);
        assert!(!base.join("out/pkg/Readme.md").exists());

        let _ = fs::remove_dir_all(base);
    }

    #[test]
    fn invalid_source_dir_aborts_before_anything_is_written() {
        let (base, mut config) = workspace("instrument-driver");
        config.source_dir = Some(base.join("missing"));

        let err = run(&config, |_| Ok(PassThrough)).unwrap_err();
        assert!(matches!(err, TaskError::InvalidPath { .. }));
        assert!(!base.join("out").exists());

        let _ = fs::remove_dir_all(base);
    }

    #[test]
    fn first_transform_failure_stops_all_further_processing() {
        let (base, config) = workspace("instrument-driver");
        fs::create_dir_all(base.join("classes/pkg")).unwrap();
        fs::write(base.join("classes/pkg/Foo.class"), b"foo").unwrap();
        fs::write(base.join("classes/pkg/Bar.class"), b"bar").unwrap();

        let calls = Rc::new(Cell::new(0));
        let err = run(&config, |_| {
            Ok(FailAlways {
                calls: calls.clone(),
            })
        })
        .unwrap_err();

        match &err {
            TaskError::Instrumentation { reason, .. } => {
                assert!(reason.contains("unresolved symbol"))
            }
            other => panic!("expected Instrumentation, got {other:?}"),
        }
        assert_eq!(calls.get(), 1);
        assert!(
            files_with_extension(&base.join("out"), "class")
                .unwrap()
                .is_empty()
        );

        let _ = fs::remove_dir_all(base);
    }

    #[test]
    fn outputs_written_before_a_later_failure_remain_on_disk() {
        let (base, config) = workspace("instrument-driver");
        fs::create_dir_all(base.join("classes/pkg")).unwrap();
        fs::write(base.join("classes/pkg/Foo.class"), b"foo bytes").unwrap();
        fs::write(base.join("classes/pkg/Bar.class"), b"bar bytes").unwrap();

        let calls = Rc::new(Cell::new(0));
        let err = run(&config, |_| {
            Ok(FailOnSecond {
                calls: calls.clone(),
            })
        })
        .unwrap_err();

        assert!(matches!(err, TaskError::Instrumentation { .. }));
        assert_eq!(calls.get(), 2);

        // Exactly one artifact made it to disk before the abort, and it is
        // untouched. Walk order decides which one, so compare against the
        // matching input rather than a fixed name.
        let written = files_with_extension(&base.join("out"), "class").unwrap();
        assert_eq!(written.len(), 1);
        let relative = written[0].strip_prefix(base.join("out")).unwrap();
        assert_eq!(
            fs::read(&written[0]).unwrap(),
            fs::read(base.join("classes").join(relative)).unwrap()
        );

        let _ = fs::remove_dir_all(base);
    }

    #[test]
    fn instrumenter_construction_failure_aborts_before_any_read() {
        let (base, config) = workspace("instrument-driver");
        fs::create_dir_all(base.join("classes/pkg")).unwrap();
        fs::write(base.join("classes/pkg/Foo.class"), b"foo").unwrap();

        let err = run(&config, |_| -> Result<PassThrough> {
            Err(TaskError::InstrumenterInit("bad classpath entry".into()))
        })
        .unwrap_err();

        assert!(matches!(err, TaskError::InstrumenterInit(_)));
        assert!(
            files_with_extension(&base.join("out"), "class")
                .unwrap()
                .is_empty()
        );

        let _ = fs::remove_dir_all(base);
    }
}
