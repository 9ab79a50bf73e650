use std::collections::HashMap;

use crate::error::PolicyError;

/// A value held under one `(path, name)` coordinate of the store.
///
/// Mirrors the two registry kinds the engine writes: `REG_DWORD` for
/// policy flags and `REG_SZ` for autostart commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyValue {
    Dword(u32),
    Text(String),
}

impl PolicyValue {
    pub fn as_dword(&self) -> Option<u32> {
        match self {
            PolicyValue::Dword(value) => Some(*value),
            PolicyValue::Text(_) => None,
        }
    }

    /// Kind name used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            PolicyValue::Dword(_) => "number",
            PolicyValue::Text(_) => "string",
        }
    }
}

/// Durable hierarchical key-value storage scoped to the current user.
///
/// `set` creates the path when it is missing and overwrites any
/// previous value, so writing the same value twice is a no-op for the
/// observable state. `get` returns `Ok(None)` when either the path or
/// the value does not exist; `delete` succeeds when there is nothing
/// to delete.
pub trait PolicyStore {
    fn get(&self, path: &str, name: &str) -> Result<Option<PolicyValue>, PolicyError>;

    fn set(&mut self, path: &str, name: &str, value: &PolicyValue) -> Result<(), PolicyError>;

    fn delete(&mut self, path: &str, name: &str) -> Result<(), PolicyError>;
}

/// In-memory store backing the engine's unit tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryPolicyStore {
    values: HashMap<(String, String), PolicyValue>,
}

impl MemoryPolicyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored values across all paths.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl PolicyStore for MemoryPolicyStore {
    fn get(&self, path: &str, name: &str) -> Result<Option<PolicyValue>, PolicyError> {
        Ok(self
            .values
            .get(&(path.to_string(), name.to_string()))
            .cloned())
    }

    fn set(&mut self, path: &str, name: &str, value: &PolicyValue) -> Result<(), PolicyError> {
        self.values
            .insert((path.to_string(), name.to_string()), value.clone());
        Ok(())
    }

    fn delete(&mut self, path: &str, name: &str) -> Result<(), PolicyError> {
        self.values.remove(&(path.to_string(), name.to_string()));
        Ok(())
    }
}
