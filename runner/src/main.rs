use std::io::{self, Read, Write};
use std::num::NonZeroUsize;
use std::process;

use anyhow::Context;
use env_logger::Builder;
use log::info;

use processor::Processor;
use scheduler::round_robin;

mod input;

/// The number of work units a process may run before it is preempted.
const TIME_QUANTUM: NonZeroUsize = match NonZeroUsize::new(2) {
    Some(quantum) => quantum,
    None => panic!("the time quantum cannot be 0"),
};

fn main() {
    Builder::from_default_env()
        .format(|buf, record| writeln!(buf, "{}", record.args()))
        .init();

    if let Err(err) = simulate() {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

fn simulate() -> anyhow::Result<()> {
    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read the process list")?;

    let processes = input::parse(&text)?;
    info!(
        "{} processes, time quantum {}",
        processes.len(),
        TIME_QUANTUM
    );

    let mut stdout = io::stdout().lock();
    Processor::run_with(round_robin(TIME_QUANTUM, processes), |log| {
        write!(stdout, "{}", log)?;
        stdout.flush()
    })
    .context("Failed to write the process states")?;

    writeln!(stdout, "All processes completed.")?;
    stdout.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests;
