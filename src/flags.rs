//! Parsed debug-flag configuration.
//!
//! The command-line parser (an external collaborator) turns flag text into a
//! [`DebugFlags`] value; [`crate::ClassRegistry::initialize`] turns that
//! value into the published class mask. One boolean per class keeps the
//! parser trivial and the mapping auditable in one place.

use crate::class::TraceClassSet;
use serde::{Deserialize, Serialize};

/// Debug-trace configuration, one switch per trace class.
///
/// All switches default to off. The struct is plain data so it can be
/// embedded in a larger runtime configuration and round-tripped through
/// serde like any other config section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugFlags {
    /// Scheduler decisions.
    pub scheduler: bool,
    /// Bytecode interpreter.
    pub interpreter: bool,
    /// Weak reference processing.
    pub weak: bool,
    /// CAF garbage collection.
    pub caf_gc: bool,
    /// Garbage collector.
    pub gc: bool,
    /// Block allocator.
    pub block_alloc: bool,
    /// Sanity checking.
    pub sanity: bool,
    /// Stable name tables.
    pub stable_names: bool,
    /// Software transactional memory.
    pub stm: bool,
    /// Profiler internals.
    pub prof: bool,
    /// Simulated multiprocessor scheduling (coarse switch).
    pub sim: bool,
    /// Distributed parallelism (coarse switch).
    pub par: bool,
    /// Runtime linker.
    pub linker: bool,
    /// Stack squeezing.
    pub squeeze: bool,
    /// Timestamped scheduler events for profiling tools.
    pub event_sched: bool,
    /// Detailed distributed-scheduler classes.
    #[cfg(feature = "par")]
    pub par_debug: ParDebugFlags,
    /// Detailed simulation-scheduler classes.
    #[cfg(feature = "sim")]
    pub sim_debug: SimDebugFlags,
}

impl DebugFlags {
    /// Computes the class mask selected by these flags.
    #[must_use]
    pub const fn to_classes(&self) -> TraceClassSet {
        let mut set = TraceClassSet::EMPTY;
        if self.scheduler {
            set = set.union(TraceClassSet::SCHED);
        }
        if self.interpreter {
            set = set.union(TraceClassSet::INTERP);
        }
        if self.weak {
            set = set.union(TraceClassSet::WEAK);
        }
        if self.caf_gc {
            set = set.union(TraceClassSet::CAF_GC);
        }
        if self.gc {
            set = set.union(TraceClassSet::GC);
        }
        if self.block_alloc {
            set = set.union(TraceClassSet::BLOCK_ALLOC);
        }
        if self.sanity {
            set = set.union(TraceClassSet::SANITY);
        }
        if self.stable_names {
            set = set.union(TraceClassSet::STABLE_NAMES);
        }
        if self.stm {
            set = set.union(TraceClassSet::STM);
        }
        if self.prof {
            set = set.union(TraceClassSet::PROF);
        }
        if self.sim {
            set = set.union(TraceClassSet::SIM);
        }
        if self.par {
            set = set.union(TraceClassSet::PAR);
        }
        if self.linker {
            set = set.union(TraceClassSet::LINKER);
        }
        if self.squeeze {
            set = set.union(TraceClassSet::SQUEEZE);
        }
        if self.event_sched {
            set = set.union(TraceClassSet::EVENT_SCHED);
        }
        #[cfg(feature = "par")]
        {
            set = set.union(self.par_debug.to_classes());
        }
        #[cfg(feature = "sim")]
        {
            set = set.union(self.sim_debug.to_classes());
        }
        set
    }
}

/// Switches for the distributed-scheduler debug classes.
#[cfg(feature = "par")]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParDebugFlags {
    /// Verbose general chatter.
    pub verbose: bool,
    /// Blocked-thread queues.
    pub blocked_queue: bool,
    /// Cross-node scheduling.
    pub schedule: bool,
    /// Remote reference freeing.
    pub free: bool,
    /// Thread resumption.
    pub resume: bool,
    /// Reference weights.
    pub weight: bool,
    /// Remote fetches.
    pub fetch: bool,
    /// Work requests to idle peers.
    pub work_request: bool,
    /// Global address tables.
    pub tables: bool,
    /// Raw packet traffic.
    pub packet: bool,
    /// Graph packing.
    pub pack: bool,
    /// Paranoid checks.
    pub paranoia: bool,
}

#[cfg(feature = "par")]
impl ParDebugFlags {
    /// Computes the class mask selected by these flags.
    #[must_use]
    pub const fn to_classes(&self) -> TraceClassSet {
        use crate::class::par;
        let mut set = TraceClassSet::EMPTY;
        if self.verbose {
            set = set.union(par::VERBOSE);
        }
        if self.blocked_queue {
            set = set.union(par::BLOCKED_QUEUE);
        }
        if self.schedule {
            set = set.union(par::SCHEDULE);
        }
        if self.free {
            set = set.union(par::FREE);
        }
        if self.resume {
            set = set.union(par::RESUME);
        }
        if self.weight {
            set = set.union(par::WEIGHT);
        }
        if self.fetch {
            set = set.union(par::FETCH);
        }
        if self.work_request {
            set = set.union(par::WORK_REQUEST);
        }
        if self.tables {
            set = set.union(par::TABLES);
        }
        if self.packet {
            set = set.union(par::PACKET);
        }
        if self.pack {
            set = set.union(par::PACK);
        }
        if self.paranoia {
            set = set.union(par::PARANOIA);
        }
        set
    }
}

/// Switches for the simulation-scheduler debug classes.
#[cfg(feature = "sim")]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimDebugFlags {
    /// Full event trace.
    pub event_trace: bool,
    /// Event statistics.
    pub event_stats: bool,
    /// Blocked-thread queues.
    pub blocked_queue: bool,
    /// Graph packing.
    pub pack: bool,
    /// Task queue checks.
    pub task_queue_check: bool,
    /// Thunk stealing.
    pub thunk_stealing: bool,
    /// Randomized stealing.
    pub random_steal: bool,
    /// Work finding.
    pub find_work: bool,
    /// Priority queueing.
    pub priority: bool,
    /// Lightweight checks.
    pub check_light: bool,
    /// Sorted run queues.
    pub sorted_queue: bool,
    /// Block-on-fetch events.
    pub block_on_fetch: bool,
    /// Pack-buffer management.
    pub pack_buffer: bool,
    /// Block-on-fetch sanity checks.
    pub fetch_sanity: bool,
}

#[cfg(feature = "sim")]
impl SimDebugFlags {
    /// Computes the class mask selected by these flags.
    #[must_use]
    pub const fn to_classes(&self) -> TraceClassSet {
        use crate::class::sim;
        let mut set = TraceClassSet::EMPTY;
        if self.event_trace {
            set = set.union(sim::EVENT_TRACE);
        }
        if self.event_stats {
            set = set.union(sim::EVENT_STATS);
        }
        if self.blocked_queue {
            set = set.union(sim::BLOCKED_QUEUE);
        }
        if self.pack {
            set = set.union(sim::PACK);
        }
        if self.task_queue_check {
            set = set.union(sim::TASK_QUEUE_CHECK);
        }
        if self.thunk_stealing {
            set = set.union(sim::THUNK_STEALING);
        }
        if self.random_steal {
            set = set.union(sim::RANDOM_STEAL);
        }
        if self.find_work {
            set = set.union(sim::FIND_WORK);
        }
        if self.priority {
            set = set.union(sim::PRIORITY);
        }
        if self.check_light {
            set = set.union(sim::CHECK_LIGHT);
        }
        if self.sorted_queue {
            set = set.union(sim::SORTED_QUEUE);
        }
        if self.block_on_fetch {
            set = set.union(sim::BLOCK_ON_FETCH);
        }
        if self.pack_buffer {
            set = set.union(sim::PACK_BUFFER);
        }
        if self.fetch_sanity {
            set = set.union(sim::FETCH_SANITY);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_flags_enable_nothing() {
        assert!(DebugFlags::default().to_classes().is_empty());
    }

    #[test]
    fn each_flag_maps_to_its_class() {
        let flags = DebugFlags {
            scheduler: true,
            gc: true,
            ..DebugFlags::default()
        };
        let classes = flags.to_classes();
        assert_eq!(classes, TraceClassSet::SCHED | TraceClassSet::GC);

        let flags = DebugFlags {
            stm: true,
            event_sched: true,
            ..DebugFlags::default()
        };
        let classes = flags.to_classes();
        assert_eq!(classes, TraceClassSet::STM | TraceClassSet::EVENT_SCHED);
    }

    #[test]
    fn all_general_flags_cover_the_low_bits() {
        let flags = DebugFlags {
            scheduler: true,
            interpreter: true,
            weak: true,
            caf_gc: true,
            gc: true,
            block_alloc: true,
            sanity: true,
            stable_names: true,
            stm: true,
            prof: true,
            sim: true,
            par: true,
            linker: true,
            squeeze: true,
            ..DebugFlags::default()
        };
        assert_eq!(flags.to_classes().bits(), (1 << 14) - 1);
    }

    #[test]
    fn flags_deserialize_with_defaults() {
        let flags: DebugFlags = serde_json::from_str(r#"{"gc": true}"#).unwrap();
        assert!(flags.gc);
        assert!(!flags.scheduler);
        assert_eq!(flags.to_classes(), TraceClassSet::GC);
    }

    #[cfg(feature = "par")]
    #[test]
    fn par_debug_flags_land_in_the_family_range() {
        let flags = DebugFlags {
            par_debug: ParDebugFlags {
                fetch: true,
                ..ParDebugFlags::default()
            },
            ..DebugFlags::default()
        };
        assert_eq!(flags.to_classes(), crate::class::par::FETCH);
    }
}
