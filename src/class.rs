//! Trace class bitmask.
//!
//! Every trace message belongs to one or more named classes, each bound to a
//! fixed bit position. The bit layout is a stable external contract: tools
//! that inspect a raw enabled-class mask rely on these positions not moving.

use core::fmt;
use core::ops::{BitAnd, BitOr, BitOrAssign};

/// A set of trace classes, represented as a `u32` bitmask.
///
/// Class constants may be OR-ed together to tag a message with several
/// classes at once or to enable several classes in one mask:
///
/// ```
/// use tracegate::TraceClassSet;
///
/// let mask = TraceClassSet::SCHED | TraceClassSet::GC;
/// assert!(mask.intersects(TraceClassSet::GC));
/// assert!(!mask.intersects(TraceClassSet::LINKER));
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TraceClassSet(u32);

impl TraceClassSet {
    /// The empty set; no classes.
    pub const EMPTY: Self = Self(0);

    /// Scheduler decisions: run-queue churn, thread state transitions.
    pub const SCHED: Self = Self(1 << 0);
    /// Bytecode interpreter execution.
    pub const INTERP: Self = Self(1 << 1);
    /// Weak reference processing.
    pub const WEAK: Self = Self(1 << 2);
    /// Garbage collection of constant applicative forms.
    pub const CAF_GC: Self = Self(1 << 3);
    /// Garbage collector phases and statistics.
    pub const GC: Self = Self(1 << 4);
    /// Block allocator activity.
    pub const BLOCK_ALLOC: Self = Self(1 << 5);
    /// Heap and stack sanity checking.
    pub const SANITY: Self = Self(1 << 6);
    /// Stable name and stable pointer tables.
    pub const STABLE_NAMES: Self = Self(1 << 7);
    /// Software transactional memory operations.
    pub const STM: Self = Self(1 << 8);
    /// Profiler internals.
    pub const PROF: Self = Self(1 << 9);
    /// Simulated multiprocessor scheduling (coarse class; the detailed
    /// family lives in [`sim`]).
    pub const SIM: Self = Self(1 << 10);
    /// Distributed message-passing parallelism (coarse class; the detailed
    /// family lives in [`par`]).
    pub const PAR: Self = Self(1 << 11);
    /// Runtime linker.
    pub const LINKER: Self = Self(1 << 12);
    /// Stack squeezing and update-frame collapsing.
    pub const SQUEEZE: Self = Self(1 << 13);

    /// Timestamped scheduler events for profiling tools.
    ///
    /// Unlike the debug classes above, this class exists for machine
    /// consumption; it is normally switched on by profiling configuration
    /// rather than by hand.
    pub const EVENT_SCHED: Self = Self(1 << 29);

    /// Creates a set from a raw bitmask.
    ///
    /// For raw-mask consumers; bit positions are stable (see module docs).
    #[inline]
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Returns the raw bitmask.
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Returns true if no class is set.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the union of the two sets.
    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Returns the classes present in both sets.
    #[inline]
    #[must_use]
    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// Returns true if the two sets share at least one class.
    #[inline]
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Returns true if every class in `other` is also in `self`.
    #[inline]
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for TraceClassSet {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for TraceClassSet {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl BitAnd for TraceClassSet {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self {
        self.intersection(rhs)
    }
}

impl fmt::Debug for TraceClassSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TraceClassSet({:#010x})", self.0)
    }
}

/// Detailed debug classes for the distributed message-passing scheduler.
///
/// These share bit positions 14-28 with the [`sim`] family. The two
/// schedulers never coexist in one build (enforced by a compile error when
/// both features are enabled), so the overlap is safe by construction.
///
/// Bit 20 is intentionally unassigned in this family.
#[cfg(feature = "par")]
pub mod par {
    use super::TraceClassSet;

    /// Verbose general chatter.
    pub const VERBOSE: TraceClassSet = TraceClassSet(1 << 14);
    /// Blocked-thread queue manipulation.
    pub const BLOCKED_QUEUE: TraceClassSet = TraceClassSet(1 << 15);
    /// Cross-node scheduling decisions.
    pub const SCHEDULE: TraceClassSet = TraceClassSet(1 << 16);
    /// Remote reference freeing.
    pub const FREE: TraceClassSet = TraceClassSet(1 << 17);
    /// Thread resumption after remote fetch.
    pub const RESUME: TraceClassSet = TraceClassSet(1 << 18);
    /// Reference-weight bookkeeping.
    pub const WEIGHT: TraceClassSet = TraceClassSet(1 << 19);
    /// Remote data fetching.
    pub const FETCH: TraceClassSet = TraceClassSet(1 << 21);
    /// Work-request messages sent to idle peers.
    pub const WORK_REQUEST: TraceClassSet = TraceClassSet(1 << 22);
    /// Global address table maintenance.
    pub const TABLES: TraceClassSet = TraceClassSet(1 << 23);
    /// Raw packet traffic.
    pub const PACKET: TraceClassSet = TraceClassSet(1 << 24);
    /// Graph packing for transmission.
    pub const PACK: TraceClassSet = TraceClassSet(1 << 25);
    /// Paranoid consistency checks.
    pub const PARANOIA: TraceClassSet = TraceClassSet(1 << 26);
}

/// Detailed debug classes for the simulated multiprocessor scheduler.
///
/// These share bit positions 14-28 with the [`par`] family; see that module
/// for the exclusivity rule.
#[cfg(feature = "sim")]
pub mod sim {
    use super::TraceClassSet;

    /// Full event trace of the simulation.
    pub const EVENT_TRACE: TraceClassSet = TraceClassSet(1 << 14);
    /// Aggregated event statistics.
    pub const EVENT_STATS: TraceClassSet = TraceClassSet(1 << 15);
    /// Blocked-thread queue manipulation.
    pub const BLOCKED_QUEUE: TraceClassSet = TraceClassSet(1 << 16);
    /// Graph packing for simulated communication.
    pub const PACK: TraceClassSet = TraceClassSet(1 << 17);
    /// Task queue consistency checks.
    pub const TASK_QUEUE_CHECK: TraceClassSet = TraceClassSet(1 << 18);
    /// Thunk stealing between simulated processors.
    pub const THUNK_STEALING: TraceClassSet = TraceClassSet(1 << 19);
    /// Randomized work stealing.
    pub const RANDOM_STEAL: TraceClassSet = TraceClassSet(1 << 20);
    /// Work-finding on idle simulated processors.
    pub const FIND_WORK: TraceClassSet = TraceClassSet(1 << 21);
    /// Reserved; kept so later additions do not shift the layout.
    pub const RESERVED: TraceClassSet = TraceClassSet(1 << 22);
    /// Priority-based queueing.
    pub const PRIORITY: TraceClassSet = TraceClassSet(1 << 23);
    /// Lightweight consistency checks.
    pub const CHECK_LIGHT: TraceClassSet = TraceClassSet(1 << 24);
    /// Sorted run-queue maintenance.
    pub const SORTED_QUEUE: TraceClassSet = TraceClassSet(1 << 25);
    /// Threads blocking on simulated fetches.
    pub const BLOCK_ON_FETCH: TraceClassSet = TraceClassSet(1 << 26);
    /// Pack-buffer management.
    pub const PACK_BUFFER: TraceClassSet = TraceClassSet(1 << 27);
    /// Sanity checking of the block-on-fetch machinery.
    pub const FETCH_SANITY: TraceClassSet = TraceClassSet(1 << 28);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_positions_are_stable() {
        assert_eq!(TraceClassSet::SCHED.bits(), 1 << 0);
        assert_eq!(TraceClassSet::INTERP.bits(), 1 << 1);
        assert_eq!(TraceClassSet::WEAK.bits(), 1 << 2);
        assert_eq!(TraceClassSet::CAF_GC.bits(), 1 << 3);
        assert_eq!(TraceClassSet::GC.bits(), 1 << 4);
        assert_eq!(TraceClassSet::BLOCK_ALLOC.bits(), 1 << 5);
        assert_eq!(TraceClassSet::SANITY.bits(), 1 << 6);
        assert_eq!(TraceClassSet::STABLE_NAMES.bits(), 1 << 7);
        assert_eq!(TraceClassSet::STM.bits(), 1 << 8);
        assert_eq!(TraceClassSet::PROF.bits(), 1 << 9);
        assert_eq!(TraceClassSet::SIM.bits(), 1 << 10);
        assert_eq!(TraceClassSet::PAR.bits(), 1 << 11);
        assert_eq!(TraceClassSet::LINKER.bits(), 1 << 12);
        assert_eq!(TraceClassSet::SQUEEZE.bits(), 1 << 13);
        assert_eq!(TraceClassSet::EVENT_SCHED.bits(), 1 << 29);
    }

    #[test]
    fn set_algebra() {
        let mask = TraceClassSet::SCHED | TraceClassSet::GC;
        assert!(mask.intersects(TraceClassSet::SCHED));
        assert!(mask.intersects(TraceClassSet::GC));
        assert!(!mask.intersects(TraceClassSet::INTERP));
        assert!(mask.contains(TraceClassSet::GC));
        assert!(!mask.contains(TraceClassSet::GC | TraceClassSet::STM));
        assert_eq!(
            (mask & TraceClassSet::GC).bits(),
            TraceClassSet::GC.bits()
        );
        assert!(TraceClassSet::EMPTY.is_empty());
        assert!(!mask.is_empty());
    }

    #[test]
    fn raw_bits_round_trip() {
        let mask = TraceClassSet::STM | TraceClassSet::SQUEEZE;
        assert_eq!(TraceClassSet::from_bits(mask.bits()), mask);
    }

    #[cfg(feature = "par")]
    #[test]
    fn par_family_skips_bit_20() {
        let all = super::par::VERBOSE
            | super::par::BLOCKED_QUEUE
            | super::par::SCHEDULE
            | super::par::FREE
            | super::par::RESUME
            | super::par::WEIGHT
            | super::par::FETCH
            | super::par::WORK_REQUEST
            | super::par::TABLES
            | super::par::PACKET
            | super::par::PACK
            | super::par::PARANOIA;
        assert_eq!(all.bits() & (1 << 20), 0);
    }

    #[cfg(feature = "sim")]
    #[test]
    fn sim_family_covers_14_through_28() {
        let all = super::sim::EVENT_TRACE
            | super::sim::EVENT_STATS
            | super::sim::BLOCKED_QUEUE
            | super::sim::PACK
            | super::sim::TASK_QUEUE_CHECK
            | super::sim::THUNK_STEALING
            | super::sim::RANDOM_STEAL
            | super::sim::FIND_WORK
            | super::sim::RESERVED
            | super::sim::PRIORITY
            | super::sim::CHECK_LIGHT
            | super::sim::SORTED_QUEUE
            | super::sim::BLOCK_ON_FETCH
            | super::sim::PACK_BUFFER
            | super::sim::FETCH_SANITY;
        let expected: u32 = ((1u32 << 29) - 1) & !((1 << 14) - 1);
        assert_eq!(all.bits(), expected);
    }
}
