//! A processor simulation library
//!
//! This is used for simulating scheduler from the [`scheduler`] crate.

use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt::Display;
use std::num::NonZeroUsize;

use log::debug;
use scheduler::{InterruptResult, Pid, ProcessState, Scheduler, SchedulingDecision};

/// Running iteration log
///
/// One log is produced for every timer interrupt.
#[derive(Debug)]
pub struct Log {
    /// The interrupt number, starting from 1.
    pub interrupt: usize,

    /// The action requested by the scheduler.
    pub decision: SchedulingDecision,

    /// What the scheduler did with the process when its timeslice expired.
    pub result: InterruptResult,

    /// The list of processes and their corresponding states
    /// returned by the scheduler after the interrupt.
    pub processes: HashMap<Pid, ProcessInfo>,
}

impl Log {
    fn new(
        interrupt: usize,
        decision: SchedulingDecision,
        result: InterruptResult,
        processes: HashMap<Pid, ProcessInfo>,
    ) -> Log {
        Log {
            interrupt,
            decision,
            result,
            processes,
        }
    }

    /// The processes sorted by PID.
    pub fn sorted(&self) -> Vec<&ProcessInfo> {
        let mut processes = self.processes.values().collect::<Vec<&ProcessInfo>>();
        processes.sort_by_key(|process| process.pid);
        processes
    }
}

impl Display for Log {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Interrupt {}:", self.interrupt)?;
        for process in self.sorted() {
            writeln!(f, "{}", process)?;
        }
        Ok(())
    }
}

impl PartialEq<Log> for Log {
    fn eq(&self, other: &Log) -> bool {
        self.interrupt == other.interrupt
            && self.decision == other.decision
            && self.result == other.result
            && self.processes == other.processes
    }
}

/// Information about a process state.
#[derive(Debug, PartialEq)]
pub struct ProcessInfo {
    /// The PID of the process.
    pub pid: Pid,

    /// The process state.
    pub state: ProcessState,

    /// The program counter (work units completed).
    pub pc: usize,

    /// The total work units of the process.
    pub total_work: NonZeroUsize,
}

impl ProcessInfo {
    fn new(pid: Pid, state: ProcessState, pc: usize, total_work: NonZeroUsize) -> ProcessInfo {
        ProcessInfo {
            pid,
            state,
            pc,
            total_work,
        }
    }
}

impl Display for ProcessInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PID {}: {}, at pc {}", self.pid, self.state, self.pc)
    }
}

/// The processor simulator.
pub struct Processor<S: Scheduler> {
    scheduler: S,
    interrupts: usize,
}

impl<S: Scheduler> Processor<S> {
    /// Run a scheduler to completion and collect a log for every interrupt.
    ///
    /// * `scheduler` - the scheduler to use for the simulation.
    ///
    /// ## Example
    ///
    /// ```rust
    /// use processor::Processor;
    /// use scheduler::Pid;
    /// use std::num::NonZeroUsize;
    ///
    /// let work = |units| NonZeroUsize::new(units).unwrap();
    /// let logs = Processor::run(scheduler::round_robin(
    ///     work(2),
    ///     [(Pid::new(1), work(3)), (Pid::new(2), work(2))],
    /// ));
    ///
    /// assert_eq!(logs.len(), 3);
    /// ```
    pub fn run(scheduler: S) -> Vec<Log> {
        let mut logs = vec![];
        let result: Result<usize, Infallible> = Self::run_with(scheduler, |log| {
            logs.push(log);
            Ok(())
        });
        match result {
            Ok(_) => logs,
            Err(never) => match never {},
        }
    }

    /// Run a scheduler to completion, handing every log to `on_interrupt`
    /// as soon as it is produced.
    ///
    /// Stops at the first error returned by `on_interrupt`. Returns the
    /// number of interrupts on success.
    pub fn run_with<E, F>(scheduler: S, mut on_interrupt: F) -> Result<usize, E>
    where
        F: FnMut(Log) -> Result<(), E>,
    {
        let mut processor = Processor {
            scheduler,
            interrupts: 0,
        };

        while let Some(log) = processor.step() {
            on_interrupt(log)?;
        }

        debug!("DONE after {} interrupts", processor.interrupts);
        Ok(processor.interrupts)
    }

    /// Dispatch one process, execute its timeslice and take the snapshot.
    fn step(&mut self) -> Option<Log> {
        let decision = self.scheduler.next();
        debug!("{}", decision);

        match decision {
            SchedulingDecision::Run { pid, timeslice } => {
                debug!("{}: EXEC {}", pid, timeslice);
                let result = self.scheduler.interrupt();
                debug!("{}", result);

                self.interrupts += 1;
                Some(Log::new(self.interrupts, decision, result, self.snapshot()))
            }
            SchedulingDecision::Done => None,
        }
    }

    fn snapshot(&self) -> HashMap<Pid, ProcessInfo> {
        let mut process_map = HashMap::new();
        for process in self.scheduler.list() {
            process_map.insert(
                process.pid(),
                ProcessInfo::new(
                    process.pid(),
                    process.state(),
                    process.pc(),
                    process.total_work(),
                ),
            );
        }
        process_map
    }
}

/// Format the [`Processor`]'s logs to a [`String`].
///
/// * `logs` - the logs returned by the [`Processor`].
///
/// ## Example
///
/// ```rust
/// use processor::Processor;
/// use processor::format_logs;
/// use scheduler::Pid;
/// use std::num::NonZeroUsize;
///
/// let work = |units| NonZeroUsize::new(units).unwrap();
/// let logs = Processor::run(scheduler::round_robin(work(2), [(Pid::new(1), work(1))]));
///
/// assert_eq!(format_logs(&logs), "Interrupt 1:\nPID 1: Terminated, at pc 1\n");
/// ```
pub fn format_logs(logs: &[Log]) -> String {
    logs.iter().map(|log| log.to_string()).collect()
}
