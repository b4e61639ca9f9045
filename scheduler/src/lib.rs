//! A scheduler library.
//!
//! This library provides the traits and structures necessary
//! to simulate a single core process scheduler, together with
//! a round robin implementation.
//!

use std::num::NonZeroUsize;

mod scheduler;

pub use crate::scheduler::{
    InterruptResult, Pid, Process, ProcessState, Scheduler, SchedulingDecision,
};

mod schedulers;

pub use schedulers::RoundRobin;

/// Returns a structure that implements the `Scheduler` trait with a round robin scheduler policy
///
/// * `timeslice` - the time quanta that a process can run before it is preempted
/// * `processes` - the `(pid, work)` pairs of the processes to schedule. The
///                 processes enter the ready queue in this order and keep it
///                 for the whole run. PIDs have to be unique.
pub fn round_robin<I>(timeslice: NonZeroUsize, processes: I) -> impl Scheduler
where
    I: IntoIterator<Item = (Pid, NonZeroUsize)>,
{
    RoundRobin::new(timeslice, processes)
}
