// SPDX-License-Identifier: MIT

//! Chat session and container key identifiers.
//!
//! `ChatKey` is the opaque partition key the outer platform assigns to a
//! conversation; it never changes shape here, only gets carried around.
//! `ContainerKey` is derived deterministically from a `ChatKey` and names
//! the per-session share directory and the `docker` container family for
//! that session.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Opaque identifier for a chat session; partitions all per-session state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatKey(pub String);

impl ChatKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ChatKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ChatKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Borrow<str> for ChatKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Deterministic per-session key derived from a `ChatKey` (`sandbox_<chat_key>`).
///
/// Two containers launched for the same chat key share the same
/// `ContainerKey`; the actual `docker` container name adds a random suffix
/// so consecutive launches never collide while the old one is still being
/// torn down.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContainerKey(pub String);

impl ContainerKey {
    /// Derive the container key for a chat session.
    pub fn for_chat(chat_key: &ChatKey) -> Self {
        Self(format!("sandbox_{}", chat_key.as_str()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[path = "chat_key_tests.rs"]
mod tests;
