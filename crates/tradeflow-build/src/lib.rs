//! tradeflow Docker Image Build pipeline
//!
//! This crate provides the staging / build / cleanup pipeline used by the
//! tradeflow CLI: it stages the trading-app settings, service credentials and
//! the compiled binary into the Docker build context, invokes `docker build`
//! with a fixed argument shape, and removes the staged secrets afterwards.

pub mod builder;
pub mod cleanup;
pub mod error;
pub mod pipeline;
pub mod plan;
pub mod request;
pub mod stager;

pub use builder::{DockerCli, ImageBuilder, docker_build_args};
pub use cleanup::cleanup;
pub use error::{BuildError, CleanupWarning, PipelineError, StagingError};
pub use pipeline::run_pipeline;
pub use plan::StagingPlan;
pub use request::{AccountMode, BuildRequest};
