use std::collections::BTreeMap;

use thiserror::Error;

use crate::schema::MetaField;

const SECURE_PREFIX: &str = "secure_";
const PROBE_KEY: &str = "__secure_test__";

/// Errors raised by side-channel backends.
#[derive(Debug, Error)]
pub enum SideChannelError {
    #[error("side channel unavailable: {0}")]
    Unavailable(String),
    #[error("side channel io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("side channel payload is not valid json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Origin-scoped key-value storage for fields kept out of shareable links.
pub trait SideChannel {
    fn get(&self, key: &str) -> Result<Option<String>, SideChannelError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), SideChannelError>;
    fn remove(&mut self, key: &str) -> Result<(), SideChannelError>;

    /// Whether the backend accepts writes. Defaults to [`roundtrip_probe`].
    fn probe(&mut self) -> bool {
        roundtrip_probe(self)
    }
}

/// Storage key for a sensitive metadata field.
pub fn secure_key(field: MetaField) -> String {
    format!("{SECURE_PREFIX}{}", field.as_str())
}

/// Round-trips a throwaway key to check the backend actually accepts writes.
pub fn roundtrip_probe<S: SideChannel + ?Sized>(channel: &mut S) -> bool {
    channel.set(PROBE_KEY, "1").is_ok() && channel.remove(PROBE_KEY).is_ok()
}

/// In-memory side channel used by tests and embedders without persistence.
#[derive(Debug, Clone, Default)]
pub struct MemorySideChannel {
    entries: BTreeMap<String, String>,
}

impl MemorySideChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }
}

impl SideChannel for MemorySideChannel {
    fn get(&self, key: &str) -> Result<Option<String>, SideChannelError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SideChannelError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), SideChannelError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Backend that refuses every operation, like a browser with storage blocked.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledSideChannel;

impl SideChannel for DisabledSideChannel {
    fn get(&self, _key: &str) -> Result<Option<String>, SideChannelError> {
        Err(SideChannelError::Unavailable("storage disabled".into()))
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), SideChannelError> {
        Err(SideChannelError::Unavailable("storage disabled".into()))
    }

    fn remove(&mut self, _key: &str) -> Result<(), SideChannelError> {
        Err(SideChannelError::Unavailable("storage disabled".into()))
    }
}
