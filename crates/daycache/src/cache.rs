use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
    time::Duration,
};

use serde::{Serialize, de::DeserializeOwned};
use tokio::sync::{Mutex, RwLock};

use crate::{DayKey, DaySink, Mirror, Rejected};

/// Debounced write-behind cache of per-day values.
///
/// Every `write` restarts the quiet period of its key. A pending value reaches
/// the sink at most once, unless persisting it fails.
pub struct DayCache<V> {
    inner: Arc<Inner<V>>,
}

impl<V> Clone for DayCache<V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

struct Inner<V> {
    entries: RwLock<HashMap<DayKey, Entry<V>>>,
    mirror: Arc<dyn Mirror>,
    sink: Arc<dyn DaySink<V>>,
    debounce: Duration,
    generation: AtomicU64,
    flushing: Mutex<()>,
}

struct Entry<V> {
    value: V,
    generation: u64,
    pending: bool,
}

impl<V> DayCache<V>
where
    V: Serialize + DeserializeOwned + Clone + Send + Sync + 'static,
{
    pub fn new(
        mirror: Arc<dyn Mirror>,
        sink: Arc<dyn DaySink<V>>,
        debounce: Duration,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                entries: RwLock::new(HashMap::new()),
                mirror,
                sink,
                debounce,
                generation: AtomicU64::new(1),
                flushing: Mutex::new(()),
            }),
        }
    }

    pub fn debounce(&self) -> Duration {
        self.inner.debounce
    }

    pub async fn read(&self, key: &DayKey) -> Option<V> {
        self.inner
            .entries
            .read()
            .await
            .get(key)
            .map(|entry| entry.value.clone())
    }

    /// Stores `value` optimistically and schedules its persistence.
    pub async fn write(&self, key: DayKey, value: V) -> anyhow::Result<()> {
        let serialized = serde_json::to_string(&value)?;
        let generation = self.inner.generation.fetch_add(1, Ordering::Relaxed);

        {
            let mut entries = self.inner.entries.write().await;
            entries.insert(
                key.clone(),
                Entry {
                    value,
                    generation,
                    pending: true,
                },
            );
            self.inner.mirror.set(key.to_string(), serialized).await;
        }

        let inner = self.inner.clone();
        tokio::spawn(async move {
            tokio::time::sleep(inner.debounce).await;

            if let Err(err) = inner.flush(&key, Some(generation)).await {
                tracing::warn!(key = %key, "debounced flush failed: {err}");
            }
        });

        Ok(())
    }

    /// Drops the cached value, its mirror copy and any pending flush.
    ///
    /// Waits for a persist already in progress, so nothing from the dropped
    /// value reaches the sink once this returns.
    pub async fn invalidate(&self, key: &DayKey) {
        let _guard = self.inner.flushing.lock().await;
        let mut entries = self.inner.entries.write().await;
        entries.remove(key);
        self.inner.mirror.remove(&key.to_string()).await;
    }

    /// Persists the pending value of `key` now. Returns whether anything was
    /// sent to the sink.
    pub async fn flush(&self, key: &DayKey) -> anyhow::Result<bool> {
        self.inner.flush(key, None).await
    }

    /// Persists every pending value, returns how many were sent.
    pub async fn flush_all(&self) -> anyhow::Result<usize> {
        let keys = self
            .inner
            .entries
            .read()
            .await
            .iter()
            .filter(|(_, entry)| entry.pending)
            .map(|(key, _)| key.clone())
            .collect::<Vec<_>>();

        let mut flushed = 0;
        let mut last_err = None;

        for key in keys {
            match self.inner.flush(&key, None).await {
                Ok(true) => flushed += 1,
                Ok(false) => {}
                Err(err) => {
                    tracing::error!(key = %key, "flush failed: {err}");
                    last_err = Some(err);
                }
            }
        }

        match last_err {
            Some(err) => Err(err),
            None => Ok(flushed),
        }
    }

    /// Reloads values from the mirror. Entries already cached are kept and
    /// restored values are not scheduled for persistence.
    pub async fn restore(&self) -> usize {
        let mut restored = 0;
        let mut entries = self.inner.entries.write().await;

        for (raw_key, raw_value) in self.inner.mirror.entries().await {
            let key = match raw_key.parse::<DayKey>() {
                Ok(key) => key,
                Err(err) => {
                    tracing::warn!(key = %raw_key, "skipping mirror entry: {err}");
                    continue;
                }
            };

            if entries.contains_key(&key) {
                continue;
            }

            let value = match serde_json::from_str::<V>(&raw_value) {
                Ok(value) => value,
                Err(err) => {
                    tracing::warn!(key = %raw_key, "skipping mirror entry: {err}");
                    continue;
                }
            };

            let generation = self.inner.generation.fetch_add(1, Ordering::Relaxed);
            entries.insert(
                key,
                Entry {
                    value,
                    generation,
                    pending: false,
                },
            );
            restored += 1;
        }

        restored
    }
}

impl<V: Clone> Inner<V> {
    async fn flush(&self, key: &DayKey, expected: Option<u64>) -> anyhow::Result<bool> {
        let _guard = self.flushing.lock().await;

        let (value, generation) = {
            let mut entries = self.entries.write().await;
            let Some(entry) = entries.get_mut(key) else {
                return Ok(false);
            };

            if !entry.pending || expected.is_some_and(|g| g != entry.generation) {
                return Ok(false);
            }

            entry.pending = false;
            (entry.value.clone(), entry.generation)
        };

        if let Err(err) = self.sink.persist(key, &value).await {
            if err.is::<Rejected>() {
                let mut entries = self.entries.write().await;
                if entries.get(key).is_some_and(|e| e.generation == generation) {
                    entries.remove(key);
                    self.mirror.remove(&key.to_string()).await;
                }

                tracing::warn!(key = %key, "day discarded: {err}");
                return Ok(false);
            }

            if let Some(entry) = self.entries.write().await.get_mut(key) {
                if entry.generation == generation {
                    entry.pending = true;
                }
            }

            return Err(err);
        }

        tracing::debug!(key = %key, "day flushed");

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicBool;

    use super::*;
    use crate::MemoryMirror;

    #[derive(Default)]
    struct RecordingSink {
        persisted: Mutex<Vec<(DayKey, Vec<u32>)>>,
        fail: AtomicBool,
        reject: AtomicBool,
        delay_ms: AtomicU64,
    }

    #[async_trait::async_trait]
    impl DaySink<Vec<u32>> for RecordingSink {
        async fn persist(&self, key: &DayKey, value: &Vec<u32>) -> anyhow::Result<()> {
            if self.fail.load(Ordering::Relaxed) {
                anyhow::bail!("sink unavailable");
            }

            if self.reject.load(Ordering::Relaxed) {
                return Err(Rejected("food name is required".to_owned()).into());
            }

            let delay = self.delay_ms.load(Ordering::Relaxed);
            if delay > 0 {
                sleep_ms(delay).await;
            }

            self.persisted.lock().await.push((key.clone(), value.clone()));

            Ok(())
        }
    }

    fn key(date: &str) -> DayKey {
        DayKey::new("01JUSER", date.parse().unwrap())
    }

    fn setup() -> (DayCache<Vec<u32>>, Arc<RecordingSink>, MemoryMirror) {
        let sink = Arc::new(RecordingSink::default());
        let mirror = MemoryMirror::default();
        let cache = DayCache::<Vec<u32>>::new(
            Arc::new(mirror.clone()),
            sink.clone(),
            Duration::from_millis(1500),
        );

        (cache, sink, mirror)
    }

    async fn sleep_ms(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeated_writes_flush_once_with_last_value() {
        let (cache, sink, mirror) = setup();
        let day = key("2024-03-04");

        cache.write(day.clone(), vec![1]).await.unwrap();
        sleep_ms(1000).await;
        cache.write(day.clone(), vec![1, 2]).await.unwrap();
        sleep_ms(1000).await;
        cache.write(day.clone(), vec![1, 2, 3]).await.unwrap();

        assert_eq!(cache.read(&day).await, Some(vec![1, 2, 3]));
        assert_eq!(mirror.get(&day.to_string()).await.as_deref(), Some("[1,2,3]"));

        sleep_ms(1000).await;
        assert!(sink.persisted.lock().await.is_empty());

        sleep_ms(600).await;
        assert_eq!(*sink.persisted.lock().await, vec![(day, vec![1, 2, 3])]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalidate_cancels_pending_flush() {
        let (cache, sink, mirror) = setup();
        let day = key("2024-03-04");

        cache.write(day.clone(), vec![7]).await.unwrap();
        cache.invalidate(&day).await;

        sleep_ms(2000).await;
        assert!(sink.persisted.lock().await.is_empty());
        assert_eq!(cache.read(&day).await, None);
        assert_eq!(mirror.get(&day.to_string()).await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_explicit_flush_is_not_repeated_by_timer() {
        let (cache, sink, _) = setup();
        let day = key("2024-03-04");

        cache.write(day.clone(), vec![4]).await.unwrap();
        assert!(cache.flush(&day).await.unwrap());
        assert!(!cache.flush(&day).await.unwrap());

        sleep_ms(2000).await;
        assert_eq!(sink.persisted.lock().await.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_flush_all_sends_every_pending_day() {
        let (cache, sink, _) = setup();

        cache.write(key("2024-03-04"), vec![1]).await.unwrap();
        cache.write(key("2024-03-05"), vec![2]).await.unwrap();

        assert_eq!(cache.flush_all().await.unwrap(), 2);
        assert_eq!(cache.flush_all().await.unwrap(), 0);

        let mut persisted = sink.persisted.lock().await.clone();
        persisted.sort();
        assert_eq!(
            persisted,
            vec![(key("2024-03-04"), vec![1]), (key("2024-03-05"), vec![2])]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_persist_stays_pending() {
        let (cache, sink, _) = setup();
        let day = key("2024-03-04");

        sink.fail.store(true, Ordering::Relaxed);
        cache.write(day.clone(), vec![9]).await.unwrap();
        sleep_ms(2000).await;
        assert!(cache.flush_all().await.is_err());

        sink.fail.store(false, Ordering::Relaxed);
        assert_eq!(cache.flush_all().await.unwrap(), 1);
        assert_eq!(*sink.persisted.lock().await, vec![(day, vec![9])]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejected_value_is_dropped() {
        let (cache, sink, mirror) = setup();
        let bad = key("2024-03-04");
        let good = DayKey::new("01JOTHER", "2024-03-04".parse().unwrap());

        sink.reject.store(true, Ordering::Relaxed);
        cache.write(bad.clone(), vec![0]).await.unwrap();
        assert!(!cache.flush(&bad).await.unwrap());
        sink.reject.store(false, Ordering::Relaxed);

        assert_eq!(cache.read(&bad).await, None);
        assert_eq!(mirror.get(&bad.to_string()).await, None);

        cache.write(good.clone(), vec![3]).await.unwrap();
        assert_eq!(cache.flush_all().await.unwrap(), 1);
        assert_eq!(*sink.persisted.lock().await, vec![(good, vec![3])]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalidate_waits_for_running_persist() {
        let (cache, sink, _) = setup();
        let day = key("2024-03-04");

        sink.delay_ms.store(200, Ordering::Relaxed);
        cache.write(day.clone(), vec![1]).await.unwrap();

        let flushing = {
            let cache = cache.clone();
            let day = day.clone();
            tokio::spawn(async move { cache.flush(&day).await })
        };
        sleep_ms(10).await;

        cache.invalidate(&day).await;
        sink.persisted.lock().await.push((day.clone(), vec![2]));

        assert!(flushing.await.unwrap().unwrap());
        assert_eq!(
            *sink.persisted.lock().await,
            vec![(day.clone(), vec![1]), (day, vec![2])]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_restore_reloads_from_mirror() {
        let (cache, sink, mirror) = setup();
        let day = key("2024-03-04");

        cache.write(day.clone(), vec![5, 6]).await.unwrap();
        cache.flush(&day).await.unwrap();

        mirror.set("garbage".to_owned(), "[1]".to_owned()).await;

        let restarted = DayCache::<Vec<u32>>::new(
            Arc::new(mirror.clone()),
            sink.clone(),
            Duration::from_millis(1500),
        );
        assert_eq!(restarted.read(&day).await, None);
        assert_eq!(restarted.restore().await, 1);
        assert_eq!(restarted.read(&day).await, Some(vec![5, 6]));
        assert_eq!(restarted.flush_all().await.unwrap(), 0);
    }
}
