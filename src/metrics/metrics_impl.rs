use crate::metrics::snapshot::CacheMetricsSnapshot;
use crate::metrics::traits::CoreMetricsRecorder;

/// Counters owned by the cache's guarded state.
#[derive(Debug, Default)]
pub struct CacheMetrics {
    pub get_calls: u64,
    pub get_hits: u64,
    pub get_misses: u64,
    pub insert_calls: u64,
    pub insert_updates: u64,
    pub insert_new: u64,
    pub evict_calls: u64,
    pub evicted_entries: u64,
    pub remove_calls: u64,
    pub removed_entries: u64,
    pub clear_calls: u64,
    pub invariant_faults: u64,
}

impl CacheMetrics {
    /// Copies the counters, adding the gauges only the caller knows.
    pub fn snapshot(&self, cache_len: usize, capacity: usize) -> CacheMetricsSnapshot {
        CacheMetricsSnapshot {
            get_calls: self.get_calls,
            get_hits: self.get_hits,
            get_misses: self.get_misses,
            insert_calls: self.insert_calls,
            insert_updates: self.insert_updates,
            insert_new: self.insert_new,
            evict_calls: self.evict_calls,
            evicted_entries: self.evicted_entries,
            remove_calls: self.remove_calls,
            removed_entries: self.removed_entries,
            clear_calls: self.clear_calls,
            invariant_faults: self.invariant_faults,
            cache_len,
            capacity,
        }
    }
}

impl CoreMetricsRecorder for CacheMetrics {
    fn record_get_hit(&mut self) {
        self.get_calls += 1;
        self.get_hits += 1;
    }

    fn record_get_miss(&mut self) {
        self.get_calls += 1;
        self.get_misses += 1;
    }

    fn record_insert_call(&mut self) {
        self.insert_calls += 1;
    }

    fn record_insert_new(&mut self) {
        self.insert_new += 1;
    }

    fn record_insert_update(&mut self) {
        self.insert_updates += 1;
    }

    fn record_evict_call(&mut self) {
        self.evict_calls += 1;
    }

    fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }

    fn record_remove(&mut self, found: bool) {
        self.remove_calls += 1;
        if found {
            self.removed_entries += 1;
        }
    }

    fn record_clear(&mut self) {
        self.clear_calls += 1;
    }

    fn record_invariant_fault(&mut self) {
        self.invariant_faults += 1;
    }
}
