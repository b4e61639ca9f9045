use std::fmt::{self, Display};
use std::num::NonZeroUsize;

/// The PID of a process
///
/// PIDs are supplied by whoever creates the processes and are
/// unique for a run. Any integer is a valid PID, including 0 and
/// negative values.
#[derive(PartialEq, Eq, Copy, Clone, Hash, Ord, PartialOrd)]
#[repr(transparent)]
pub struct Pid(i64);

impl Pid {
    pub fn new(pid: i64) -> Pid {
        Pid(pid)
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl PartialEq<i64> for Pid {
    fn eq(&self, other: &i64) -> bool {
        self.0 == *other
    }
}

impl Display for Pid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Pid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The action that the scheduler asks the processor to take.
///
/// This is returned by the [`Scheduler::next`] function.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SchedulingDecision {
    /// Run the process with PID `pid` for exactly `timeslice` time units.
    ///
    /// The timeslice is never larger than the work the process has left.
    Run { pid: Pid, timeslice: NonZeroUsize },

    /// There are no more processes to schedule.
    Done,
}

impl Display for SchedulingDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchedulingDecision::Run { pid, timeslice } => {
                write!(f, "Run {} for {} slices", pid, timeslice)
            }
            SchedulingDecision::Done => {
                write!(f, "Done, no more processes")
            }
        }
    }
}

/// The outcome of a timer interrupt.
///
/// This is returned by the [`Scheduler::interrupt`] function.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum InterruptResult {
    /// The process used its timeslice and still has work left.
    /// It was placed at the back of the ready queue.
    Preempted(Pid),

    /// The process finished all of its work and was terminated.
    Exited(Pid),

    /// The interrupt arrived while no process was scheduled.
    NoRunningProcess,
}

impl Display for InterruptResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InterruptResult::Preempted(pid) => write!(f, "Preempted {}", pid),
            InterruptResult::Exited(pid) => write!(f, "Exited {}", pid),
            InterruptResult::NoRunningProcess => write!(f, "No running process"),
        }
    }
}

/// The trait that any scheduler has to implement.
pub trait Scheduler {
    /// Returns the action that the processor has to perform next.
    fn next(&mut self) -> SchedulingDecision;

    /// The scheduler is informed that the timeslice granted by the
    /// last [`SchedulingDecision::Run`] has been fully executed.
    fn interrupt(&mut self) -> InterruptResult;

    /// Returns the list of processes.
    fn list(&self) -> Vec<&dyn Process>;
}

/// The state of a process.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ProcessState {
    /// The process is ready to be scheduled.
    Ready,

    /// The process is currently scheduled.
    Running,

    /// The process has completed all of its work. It is never
    /// scheduled again.
    Terminated,
}

impl Display for ProcessState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessState::Ready => write!(f, "Ready"),
            ProcessState::Running => write!(f, "Running"),
            ProcessState::Terminated => write!(f, "Terminated"),
        }
    }
}

/// The trait that the Process Control Block (PCB) has to implement.
///
/// The PCB can be implemented with any data structure as long as
/// it implements this trait.
pub trait Process {
    /// Return the PID of the process.
    fn pid(&self) -> Pid;

    /// Return the state of the process.
    fn state(&self) -> ProcessState;

    /// Returns the program counter, the number of work units
    /// completed so far.
    fn pc(&self) -> usize;

    /// Returns the total number of work units the process needs.
    fn total_work(&self) -> NonZeroUsize;

    /// Returns the number of work units left.
    fn remaining(&self) -> usize {
        self.total_work().get() - self.pc()
    }
}
