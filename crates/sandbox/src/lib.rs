// SPDX-License-Identifier: MIT

//! Sandbox execution subsystem: runs untrusted code inside disposable,
//! resource-limited containers and turns the result into a classified,
//! display-ready outcome.

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod admission;
pub mod classifier;
pub mod config;
pub mod container;
pub mod error;
pub mod idle_gc;
pub mod lifecycle;
pub mod orphan_sweep;
pub mod path_mapper;
pub mod preamble;
pub mod registry;
pub mod sink;

pub use admission::AdmissionController;
pub use classifier::{classify, Classification};
pub use config::SandboxConfig;
pub use container::{ContainerEngine, ContainerError, ContainerSpec};
pub use error::SandboxError;
pub use lifecycle::{ContainerLifecycleManager, SubmitOutcome, SubmitRequest};
pub use path_mapper::PathRoots;
pub use registry::{ContainerHandle, SessionRegistry};
pub use sink::{ExecutionRecordSink, NullSink, SinkError};
