use scheduler::{round_robin, Pid, Scheduler};

use std::env;
use std::fs;

use processor::format_logs;
use processor::Log;
use std::num::NonZeroUsize;


static SCHEDULER: &str = "round-robin";

fn write_logs(folder: &str, name: &str, logs: &str) {
    let timeslice = arguments();
    fs::create_dir_all(format!("../outputs/{SCHEDULER}/{folder}")).unwrap();
    fs::write(
        format!("../outputs/{SCHEDULER}/{folder}/{name}___{timeslice}.log"),
        logs,
    )
    .unwrap();
}

fn read_logs(folder: &str, name: &str) -> String {
    let timeslice = arguments();
    fs::read_to_string(format!(
        "../outputs/{SCHEDULER}/{folder}/{name}___{timeslice}.log"
    ))
    .unwrap()
}

fn run(folder: &str, name: &str, logs: &[Log]) {
    let output = format_logs(logs);

    if env::var("WRITE_OUTPUT").is_ok() {
        write_logs(folder, name, &output);
    } else {
        let reference = read_logs(folder, name);

        println!("\nleft = Correct Output\nright = Your Output\n");
        use pretty_assertions::assert_eq;
        assert_eq!(reference, output);
    }
}

fn arguments() -> usize {
    env::var("TIMESLICE")
        .unwrap_or("2".to_string())
        .parse::<usize>()
        .unwrap()
}

fn scheduler(processes: &[(i64, usize)]) -> impl Scheduler {
    let timeslice = arguments();

    println!("Timeslice {timeslice}");
    round_robin(
        NonZeroUsize::new(timeslice).unwrap(),
        processes
            .iter()
            .map(|&(pid, work)| (Pid::new(pid), NonZeroUsize::new(work).unwrap()))
            .collect::<Vec<_>>(),
    )
}
