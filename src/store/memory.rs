//! Thread-safe in-memory [`TokenCache`] with clock-driven TTL eviction.

// self
use crate::{
	_prelude::*,
	clock::{Clock, SystemClock},
	store::{CacheFuture, CacheKey, CacheValue, TokenCache},
};

#[derive(Clone, Debug)]
struct Entry {
	value: CacheValue,
	evict_at: Option<OffsetDateTime>,
}
impl Entry {
	fn is_live_at(&self, instant: OffsetDateTime) -> bool {
		self.evict_at.is_none_or(|deadline| deadline > instant)
	}
}

type CacheMap = Arc<RwLock<HashMap<CacheKey, Entry>>>;

/// Process-local cache for single-instance deployments, tests, and demos.
#[derive(Clone, Debug)]
pub struct MemoryCache {
	map: CacheMap,
	clock: Arc<dyn Clock>,
}
impl MemoryCache {
	/// Creates an empty cache that evaluates TTLs against `clock`.
	pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
		Self { map: Default::default(), clock }
	}

	/// Returns the eviction deadline recorded for `key`, if the entry exists and carries a TTL.
	pub fn evict_at(&self, key: CacheKey) -> Option<OffsetDateTime> {
		self.map.read().get(&key).and_then(|entry| entry.evict_at)
	}

	/// Number of live entries.
	pub fn len(&self) -> usize {
		let now = self.clock.now();

		self.map.read().values().filter(|entry| entry.is_live_at(now)).count()
	}

	/// Returns `true` when no live entries remain.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	fn read_now(&self, key: CacheKey) -> Option<CacheValue> {
		let now = self.clock.now();
		{
			let guard = self.map.read();

			match guard.get(&key) {
				Some(entry) if entry.is_live_at(now) => return Some(entry.value.clone()),
				Some(_) => {},
				None => return None,
			}
		}

		// Expired: evict unless a concurrent writer replaced it in the meantime.
		let mut guard = self.map.write();

		if guard.get(&key).is_some_and(|entry| !entry.is_live_at(now)) {
			guard.remove(&key);
		}

		None
	}

	fn write_now(&self, key: CacheKey, value: CacheValue, ttl: Option<Duration>) {
		let evict_at = ttl.and_then(|ttl| self.clock.now().checked_add(ttl));

		self.map.write().insert(key, Entry { value, evict_at });
	}

	fn delete_now(&self, key: CacheKey) -> Option<CacheValue> {
		let now = self.clock.now();

		self.map.write().remove(&key).filter(|entry| entry.is_live_at(now)).map(|entry| entry.value)
	}
}
impl Default for MemoryCache {
	fn default() -> Self {
		Self::with_clock(Arc::new(SystemClock))
	}
}
impl TokenCache for MemoryCache {
	fn read(&self, key: CacheKey) -> CacheFuture<'_, Option<CacheValue>> {
		Box::pin(async move { Ok(self.read_now(key)) })
	}

	fn write(
		&self,
		key: CacheKey,
		value: CacheValue,
		ttl: Option<Duration>,
	) -> CacheFuture<'_, ()> {
		Box::pin(async move {
			self.write_now(key, value, ttl);

			Ok(())
		})
	}

	fn delete(&self, key: CacheKey) -> CacheFuture<'_, Option<CacheValue>> {
		Box::pin(async move { Ok(self.delete_now(key)) })
	}
}
