// SPDX-License-Identifier: MIT

//! Durable backing store for the Execution Record Sink contract (see
//! `codebox_sandbox::sink::ExecutionRecordSink`). See spec §4.7 / §6.
//!
//! Grounded in the teacher's snapshot persistence
//! (`daemon/src/storage/snapshot.rs`): a versioned `serde_json` record
//! written through a dedicated error enum. The execution record sink only
//! ever inserts, never mutates or replays state, so the full WAL +
//! snapshot + migration machinery the teacher uses for crash recovery has
//! no counterpart here — one line, one record, appended once.

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod jsonl_sink;

pub use jsonl_sink::{JsonlExecutionSink, StorageError};
