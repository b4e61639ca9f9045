use std::collections::VecDeque;
use std::num::NonZeroUsize;

use log::trace;

use crate::InterruptResult::{Exited, NoRunningProcess, Preempted};
use crate::ProcessState::{Ready, Running, Terminated};
use crate::SchedulingDecision::{Done, Run};
use crate::{InterruptResult, Pid, Process, ProcessState, Scheduler, SchedulingDecision};

#[derive(Copy, Clone, Debug, PartialEq)]
struct PCB {
    pid: Pid,
    state: ProcessState,
    pc: usize,
    total_work: NonZeroUsize,
}

impl PCB {
    fn new(pid: Pid, total_work: NonZeroUsize) -> Self {
        PCB {
            pid,
            state: Ready,
            pc: 0,
            total_work,
        }
    }
}

impl Process for PCB {
    fn pid(&self) -> Pid {
        self.pid
    }

    fn state(&self) -> ProcessState {
        self.state
    }

    fn pc(&self) -> usize {
        self.pc
    }

    fn total_work(&self) -> NonZeroUsize {
        self.total_work
    }
}

pub struct RoundRobin {
    processes: Vec<PCB>,
    ready_queue: VecDeque<usize>,
    current_process: Option<usize>,
    preempted: Option<usize>,
    timeslice: NonZeroUsize,
}

impl RoundRobin {
    pub fn new<I>(timeslice: NonZeroUsize, processes: I) -> Self
    where
        I: IntoIterator<Item = (Pid, NonZeroUsize)>,
    {
        let processes: Vec<PCB> = processes
            .into_iter()
            .map(|(pid, work)| PCB::new(pid, work))
            .collect();
        let ready_queue = (0..processes.len()).collect();

        RoundRobin {
            processes,
            ready_queue,
            current_process: None,
            preempted: None,
            timeslice,
        }
    }

    /// The slice the process at `index` gets on its next dispatch.
    fn slice_for(&self, index: usize) -> usize {
        self.timeslice.get().min(self.processes[index].remaining())
    }
}

impl Scheduler for RoundRobin {
    fn next(&mut self) -> SchedulingDecision {
        if let Some(index) = self.preempted.take() {
            let process = &mut self.processes[index];
            if process.state == Running {
                process.state = Ready;
            }
        }

        while let Some(index) = self.ready_queue.pop_front() {
            if self.processes[index].state == Terminated {
                continue;
            }

            let Some(timeslice) = NonZeroUsize::new(self.slice_for(index)) else {
                self.processes[index].state = Terminated;
                continue;
            };

            let process = &mut self.processes[index];
            process.state = Running;
            self.current_process = Some(index);

            trace!("dispatch {} at pc {}", process.pid, process.pc);
            return Run {
                pid: process.pid,
                timeslice,
            };
        }

        Done
    }

    fn interrupt(&mut self) -> InterruptResult {
        let Some(index) = self.current_process.take() else {
            return NoRunningProcess;
        };

        let executed = self.slice_for(index);
        let process = &mut self.processes[index];
        process.pc += executed;

        if process.pc == process.total_work.get() {
            process.state = Terminated;
            trace!("terminate {} at pc {}", process.pid, process.pc);
            Exited(process.pid)
        } else {
            // stays Running until the next dispatch
            self.preempted = Some(index);
            self.ready_queue.push_back(index);
            Preempted(process.pid)
        }
    }

    fn list(&self) -> Vec<&dyn Process> {
        let mut vec: Vec<&dyn Process> = Vec::new();
        for process in &self.processes {
            vec.push(process);
        }
        vec
    }
}
