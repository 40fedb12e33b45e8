//! Bounded texture caches keyed by seed, body kind and variant.
//!
//! One cache per texture kind, each with its own capacity. Entries are shared
//! `Arc<TextureBuffer>` so a cached texture can be handed to many descriptors
//! without copying pixels. The cache is an explicit value passed to whoever
//! needs it; there is no global instance.

use crate::config::CacheConfig;
use gen_core::{Seed, TextureBuffer};
use lru::LruCache;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Which texture a cache entry holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureKind {
    Planet,
    Atmosphere,
    Moon,
    Asteroid,
}

impl TextureKind {
    pub const ALL: [TextureKind; 4] = [
        TextureKind::Planet,
        TextureKind::Atmosphere,
        TextureKind::Moon,
        TextureKind::Asteroid,
    ];

    pub fn index(self) -> usize {
        match self {
            TextureKind::Planet => 0,
            TextureKind::Atmosphere => 1,
            TextureKind::Moon => 2,
            TextureKind::Asteroid => 3,
        }
    }
}

/// Cache key: seed, kind and a variant discriminator (theme id, moon type...),
/// plus the synthesis settings that change the pixels.
///
/// Factories with different texture configs may share one cache, so the edge
/// length and octave count are part of the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub seed: Seed,
    pub kind: TextureKind,
    pub variant: i32,
    pub size: u32,
    pub octaves: u32,
}

impl CacheKey {
    pub fn new(seed: Seed, kind: TextureKind, variant: i32) -> Self {
        Self {
            seed,
            kind,
            variant,
            size: 0,
            octaves: 0,
        }
    }

    /// The same key for a texture of edge length `size` built with `octaves`.
    pub fn with_texture(self, size: u32, octaves: u32) -> Self {
        Self {
            size,
            octaves,
            ..self
        }
    }

    /// Packed integer form `seed * 10 + kind`, as older save tooling expects.
    /// Lossy: ignores the variant and can collide; the struct itself cannot.
    pub fn packed(&self) -> i64 {
        self.seed.wrapping_mul(10).wrapping_add(self.kind.index() as i64)
    }
}

/// Which entries go first once a cache is over capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EvictionPolicy {
    /// Least recently used (hits refresh an entry).
    #[default]
    Lru,
    /// Oldest inserted, regardless of hits.
    OldestInserted,
}

/// Counters for one cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub len: usize,
    pub capacity: usize,
}

impl CacheStats {
    fn merge(self, other: CacheStats) -> CacheStats {
        CacheStats {
            hits: self.hits + other.hits,
            misses: self.misses + other.misses,
            evictions: self.evictions + other.evictions,
            len: self.len + other.len,
            capacity: self.capacity + other.capacity,
        }
    }
}

/// Single-threaded bounded texture cache.
pub struct TextureCache {
    entries: LruCache<CacheKey, Arc<TextureBuffer>>,
    capacity: usize,
    trim_to: usize,
    policy: EvictionPolicy,
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl TextureCache {
    /// Cache holding at most `capacity` entries; once exceeded it trims down to
    /// `capacity * trim_ratio` (at least one entry is always kept).
    pub fn new(capacity: usize, trim_ratio: f32, policy: EvictionPolicy) -> Self {
        let capacity = capacity.max(1);
        let trim_to = ((capacity as f32 * trim_ratio.clamp(0.0, 1.0)).floor() as usize).clamp(1, capacity);
        Self {
            entries: LruCache::unbounded(),
            capacity,
            trim_to,
            policy,
            hits: 0,
            misses: 0,
            evictions: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.contains(key)
    }

    /// Look up an entry, counting a hit or a miss.
    pub fn get(&mut self, key: &CacheKey) -> Option<Arc<TextureBuffer>> {
        let found = match self.policy {
            EvictionPolicy::Lru => self.entries.get(key).cloned(),
            EvictionPolicy::OldestInserted => self.entries.peek(key).cloned(),
        };
        if found.is_some() {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        found
    }

    /// Store `texture` unless `key` is already present; returns the stored value.
    pub fn insert(&mut self, key: CacheKey, texture: Arc<TextureBuffer>) -> Arc<TextureBuffer> {
        if let Some(existing) = self.entries.peek(&key) {
            return existing.clone();
        }
        self.entries.put(key, texture.clone());
        self.evict_if_needed();
        texture
    }

    /// Return the cached value for `key`, or build, store and return it.
    pub fn get_or_create(
        &mut self,
        key: CacheKey,
        factory: impl FnOnce() -> TextureBuffer,
    ) -> Arc<TextureBuffer> {
        match self.get(&key) {
            Some(texture) => texture,
            None => self.insert(key, Arc::new(factory())),
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
            len: self.entries.len(),
            capacity: self.capacity,
        }
    }

    fn evict_if_needed(&mut self) {
        if self.entries.len() <= self.capacity {
            return;
        }
        while self.entries.len() > self.trim_to {
            match self.entries.pop_lru() {
                Some((key, _)) => {
                    log::trace!("Evicted {:?}", key);
                    self.evictions += 1;
                }
                None => break,
            }
        }
    }
}

/// Thread-safe set of per-kind texture caches.
///
/// Misses are generated outside the lock. Two threads missing the same key at
/// once may both generate it; the first insert wins and both get that value.
pub struct GenerationCache {
    caches: [Mutex<TextureCache>; 4],
}

impl Default for GenerationCache {
    fn default() -> Self {
        Self::new(&CacheConfig::default())
    }
}

impl GenerationCache {
    pub fn new(config: &CacheConfig) -> Self {
        let make = |capacity| Mutex::new(TextureCache::new(capacity, config.trim_ratio, config.policy));
        Self {
            caches: [
                make(config.planet_capacity),
                make(config.atmosphere_capacity),
                make(config.moon_capacity),
                make(config.asteroid_capacity),
            ],
        }
    }

    fn lock(&self, kind: TextureKind) -> MutexGuard<'_, TextureCache> {
        // Entries are regenerable values, so a panic mid-update cannot leave them inconsistent.
        self.caches[kind.index()]
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the cached texture for `key`, calling `factory` only on a miss.
    pub fn get_or_create(
        &self,
        key: CacheKey,
        factory: impl FnOnce() -> TextureBuffer,
    ) -> Arc<TextureBuffer> {
        if let Some(texture) = self.lock(key.kind).get(&key) {
            log::trace!("Cache hit {:?}", key);
            return texture;
        }
        log::trace!("Cache miss {:?}", key);
        let texture = Arc::new(factory());
        self.lock(key.kind).insert(key, texture)
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.lock(key.kind).contains(key)
    }

    pub fn stats(&self, kind: TextureKind) -> CacheStats {
        self.lock(kind).stats()
    }

    /// Counters summed over every kind.
    pub fn total_stats(&self) -> CacheStats {
        TextureKind::ALL
            .iter()
            .map(|kind| self.stats(*kind))
            .fold(CacheStats::default(), CacheStats::merge)
    }

    pub fn clear(&self) {
        for kind in TextureKind::ALL {
            self.lock(kind).clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gen_core::Pixel;
    use std::cell::Cell;

    fn texture(seed: Seed) -> TextureBuffer {
        let shade = (seed.rem_euclid(256)) as u8;
        TextureBuffer::filled(4, 4, Pixel::new(shade, shade, shade, 255)).unwrap()
    }

    fn key(seed: Seed) -> CacheKey {
        CacheKey::new(seed, TextureKind::Planet, 0)
    }

    #[test]
    fn factory_runs_once_per_key() {
        let mut cache = TextureCache::new(8, 1.0, EvictionPolicy::Lru);
        let calls = Cell::new(0);
        for _ in 0..5 {
            cache.get_or_create(key(1), || {
                calls.set(calls.get() + 1);
                texture(1)
            });
        }
        assert_eq!(calls.get(), 1);
        let stats = cache.stats();
        assert_eq!((stats.hits, stats.misses), (4, 1));
    }

    #[test]
    fn lru_keeps_recently_used() {
        let mut cache = TextureCache::new(2, 1.0, EvictionPolicy::Lru);
        cache.get_or_create(key(1), || texture(1));
        cache.get_or_create(key(2), || texture(2));
        cache.get_or_create(key(1), || texture(1));
        cache.get_or_create(key(3), || texture(3));
        assert!(cache.contains(&key(1)));
        assert!(!cache.contains(&key(2)));
        assert!(cache.contains(&key(3)));
    }

    #[test]
    fn oldest_inserted_ignores_hits() {
        let mut cache = TextureCache::new(2, 1.0, EvictionPolicy::OldestInserted);
        cache.get_or_create(key(1), || texture(1));
        cache.get_or_create(key(2), || texture(2));
        cache.get_or_create(key(1), || texture(1));
        cache.get_or_create(key(3), || texture(3));
        assert!(!cache.contains(&key(1)));
        assert!(cache.contains(&key(2)));
        assert!(cache.contains(&key(3)));
    }

    #[test]
    fn trims_to_threshold_when_over_capacity() {
        let mut cache = TextureCache::new(10, 0.5, EvictionPolicy::Lru);
        for seed in 0..10 {
            cache.get_or_create(key(seed), || texture(seed));
        }
        assert_eq!(cache.len(), 10);
        cache.get_or_create(key(10), || texture(10));
        assert_eq!(cache.len(), 5);
        assert!(cache.contains(&key(10)));
        assert_eq!(cache.stats().evictions, 6);
    }

    #[test]
    fn regenerated_after_eviction_is_identical() {
        let mut cache = TextureCache::new(1, 1.0, EvictionPolicy::Lru);
        let first = cache.get_or_create(key(7), || texture(7));
        cache.get_or_create(key(8), || texture(8));
        assert!(!cache.contains(&key(7)));
        let again = cache.get_or_create(key(7), || texture(7));
        assert_eq!(*first, *again);
    }

    #[test]
    fn insert_keeps_first_value() {
        let mut cache = TextureCache::new(4, 1.0, EvictionPolicy::Lru);
        let a = cache.insert(key(1), Arc::new(texture(1)));
        let b = cache.insert(key(1), Arc::new(texture(2)));
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn kinds_are_cached_separately() {
        let cache = GenerationCache::default();
        let planet = CacheKey::new(1, TextureKind::Planet, 0);
        let moon = CacheKey::new(1, TextureKind::Moon, 0);
        cache.get_or_create(planet, || texture(1));
        assert!(cache.contains(&planet));
        assert!(!cache.contains(&moon));
        assert_eq!(cache.stats(TextureKind::Planet).len, 1);
        assert_eq!(cache.stats(TextureKind::Moon).len, 0);
        assert_eq!(cache.total_stats().misses, 1);
    }

    #[test]
    fn shared_across_threads() {
        let cache = Arc::new(GenerationCache::default());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cache = cache.clone();
                std::thread::spawn(move || cache.get_or_create(key(3), || texture(3)))
            })
            .collect();
        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(results.iter().all(|t| **t == texture(3)));
        assert_eq!(cache.stats(TextureKind::Planet).len, 1);
    }

    #[test]
    fn packed_key_matches_legacy_form() {
        assert_eq!(CacheKey::new(12, TextureKind::Moon, 3).packed(), 122);
    }

    #[test]
    fn texture_settings_separate_keys() {
        let cache = GenerationCache::default();
        let base = CacheKey::new(5, TextureKind::Planet, 0);
        let small = base.with_texture(8, 5);
        let large = base.with_texture(16, 5);
        assert_ne!(small, large);
        let a = cache.get_or_create(small, || TextureBuffer::placeholder(8));
        let b = cache.get_or_create(large, || TextureBuffer::placeholder(16));
        assert_eq!(a.width(), 8);
        assert_eq!(b.width(), 16);
        assert_eq!(cache.stats(TextureKind::Planet).misses, 2);
    }
}
