// SPDX-License-Identifier: MIT

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! codebox-core: shared identifiers and data model for the sandbox
//! execution subsystem.

pub mod chat_key;
pub mod clock;
pub mod record;
pub mod stop_type;

pub use chat_key::{ChatKey, ContainerKey};
pub use clock::{Clock, FakeClock, SystemClock};
pub use record::{ExecutionRecord, TriggeringMessage};
pub use stop_type::StopType;
