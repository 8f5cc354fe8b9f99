//! Advisory counters reported to the job monitor.
//!
//! Counters are written by every emitter on every worker and are only ever
//! summed. They are not exactly-once: a retried or speculatively re-executed
//! emitter counts its edges again. Nothing in the pass reads a counter to make
//! a decision.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Named counters exposed by the pass.
#[derive(Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum Counter {
    /// Derived edge records emitted, two per derived edge.
    EdgesCreated,
}

impl Counter {
    /// The stable name under which the counter is reported.
    pub fn name(self) -> &'static str {
        match self {
            Counter::EdgesCreated => "edges-created",
        }
    }
}

impl fmt::Display for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.name()) }
}

/// A best-effort sink for the edges-created count.
pub trait EdgeCounter: Send + Sync {
    /// Adds `count` to the counter.
    fn increment(&self, count: u64);
    /// The current value, as observed by this process.
    fn get(&self) -> u64;
}

/// A process-wide counter shared by all workers in the process.
#[derive(Debug, Default)]
pub struct AtomicEdgeCounter {
    count: AtomicU64,
}

impl AtomicEdgeCounter {
    /// A counter starting at zero.
    pub fn new() -> Self { Self::default() }
}

impl EdgeCounter for AtomicEdgeCounter {
    fn increment(&self, count: u64) { self.count.fetch_add(count, Ordering::Relaxed); }
    fn get(&self) -> u64 { self.count.load(Ordering::Relaxed) }
}

/// A counter that discards increments.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopEdgeCounter;

impl EdgeCounter for NoopEdgeCounter {
    fn increment(&self, _count: u64) { }
    fn get(&self) -> u64 { 0 }
}
