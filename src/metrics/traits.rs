//! # Metrics Traits
//!
//! Recording and snapshotting are split so the cache only depends on the
//! write side while tests and benches only depend on the read side.
//!
//! ```text
//!   ┌─────────────────────────────┐      ┌──────────────────────────────┐
//!   │     CoreMetricsRecorder     │      │ MetricsSnapshotProvider<S>   │
//!   │  get hit/miss, insert,      │      │  snapshot() → S              │
//!   │  evict, remove, clear       │      │  (tests, benches, exporters) │
//!   └─────────────────────────────┘      └──────────────────────────────┘
//! ```

/// Counters common to every cache operation.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&mut self);
    fn record_get_miss(&mut self);
    fn record_insert_call(&mut self);
    fn record_insert_new(&mut self);
    fn record_insert_update(&mut self);
    fn record_evict_call(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_remove(&mut self, found: bool);
    fn record_clear(&mut self);
    fn record_invariant_fault(&mut self);
}

/// Produces a point-in-time copy of the counters.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}
