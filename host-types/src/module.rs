//! Types returned by application callbacks to carry events and log output
//! back to the host for emission after a successful commit.

use ics20_primitives::prelude::*;

/// Logs and events produced during module callbacks
#[derive(Clone, Debug, Default)]
pub struct ModuleExtras {
    pub events: Vec<ModuleEvent>,
    pub log: Vec<String>,
}

impl ModuleExtras {
    pub fn empty() -> Self {
        ModuleExtras {
            events: Vec::new(),
            log: Vec::new(),
        }
    }
}

/// An event produced by a module callback, emitted by the host only after
/// the enclosing transition commits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleEvent {
    pub kind: String,
    pub attributes: Vec<ModuleEventAttribute>,
}

/// A single key/value pair in a [`ModuleEvent`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleEventAttribute {
    pub key: String,
    pub value: String,
}

impl<K: ToString, V: ToString> From<(K, V)> for ModuleEventAttribute {
    fn from((k, v): (K, V)) -> Self {
        Self {
            key: k.to_string(),
            value: v.to_string(),
        }
    }
}
