//! # class-instrumenter
//!
//! A build-step driver that pipes compiled Java classes through an external
//! bytecode instrumenter and mirrors the source tree into a target directory.
//! The run is all-or-nothing: the first failing step aborts it.
//!
//! ## Architecture
//!
//! - **cli**: Command-line surface; every path setting stays optional so
//!   validation owns the missing-setting failures
//! - **config**: Task settings and their validation order
//! - **error**: Error taxonomy shared across the pipeline
//! - **classpath**: Resolution classpath assembly (user entries + JDK jars)
//! - **scan**: Recursive `.class` artifact discovery with mirrored output paths
//! - **instrumenter**: The external engine seam and its `java -jar` driver
//! - **driver**: The per-run pipeline tying the pieces together
//! - **logger**: tracing subscriber setup

pub mod classpath;
pub mod cli;
pub mod config;
pub mod driver;
pub mod error;
pub mod instrumenter;
pub mod logger;
pub mod scan;
