//! Per-day draft cache with debounced persistence.
//!
//! Writes land in memory and in a [`Mirror`] right away. The [`DaySink`] only
//! sees the value once the key has been quiet for the debounce interval, or
//! when it is flushed explicitly.

mod cache;
mod key;
mod mirror;

pub use cache::*;
pub use key::*;
pub use mirror::*;

/// A value the sink will never accept. The cache drops it instead of
/// retrying.
#[derive(Debug, thiserror::Error)]
#[error("rejected by sink: {0}")]
pub struct Rejected(pub String);

/// Persists a settled day value.
///
/// Returning [`Rejected`] discards the value, any other error keeps it
/// pending for the next flush.
#[async_trait::async_trait]
pub trait DaySink<V>: Send + Sync {
    async fn persist(&self, key: &DayKey, value: &V) -> anyhow::Result<()>;
}
