//! Reading the process list.
//!
//! The input is a stream of whitespace separated integers: the number of
//! processes followed by one `pid work` pair per process.

use std::collections::HashSet;
use std::error::Error;
use std::fmt::{self, Display};
use std::num::NonZeroUsize;
use std::str::SplitWhitespace;

use scheduler::Pid;

/// The reasons a process list is rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum InputError {
    /// The process count is missing or is not an integer.
    MissingOrMalformedCount,

    /// The process count is zero or negative.
    NonPositiveCount(i64),

    /// A `pid work` pair is missing or contains a token that is not an integer.
    MalformedPair {
        /// The position of the pair, starting from 1.
        index: usize,
    },

    /// A process asks for zero or negative work.
    NonPositiveWork { pid: Pid, work: i64 },

    /// Two processes have the same PID.
    DuplicateId(Pid),
}

impl Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::MissingOrMalformedCount => {
                write!(f, "Invalid input for number of processes")
            }
            InputError::NonPositiveCount(count) => {
                write!(f, "Invalid number of processes: {}", count)
            }
            InputError::MalformedPair { index } => {
                write!(f, "Invalid input format for process data (entry {})", index)
            }
            InputError::NonPositiveWork { pid, work } => {
                write!(f, "Invalid work units for PID {}: {}", pid, work)
            }
            InputError::DuplicateId(pid) => {
                write!(f, "Duplicate PID {} detected", pid)
            }
        }
    }
}

impl Error for InputError {}

fn integer(tokens: &mut SplitWhitespace<'_>) -> Option<i64> {
    tokens.next()?.parse().ok()
}

/// Parse and validate a process list.
///
/// Returns the `(pid, work)` pairs in input order. Anything after the
/// last announced pair is ignored.
pub fn parse(input: &str) -> Result<Vec<(Pid, NonZeroUsize)>, InputError> {
    let mut tokens = input.split_whitespace();

    let count = integer(&mut tokens).ok_or(InputError::MissingOrMalformedCount)?;
    if count <= 0 {
        return Err(InputError::NonPositiveCount(count));
    }

    let mut processes = Vec::new();
    let mut pids = HashSet::new();
    for index in 1..=count as usize {
        let malformed = InputError::MalformedPair { index };
        let pid = integer(&mut tokens).ok_or_else(|| malformed.clone())?;
        let work = integer(&mut tokens).ok_or(malformed)?;
        let pid = Pid::new(pid);

        let units = usize::try_from(work).ok().and_then(NonZeroUsize::new);
        let Some(units) = units else {
            return Err(InputError::NonPositiveWork { pid, work });
        };

        if !pids.insert(pid) {
            return Err(InputError::DuplicateId(pid));
        }

        processes.push((pid, units));
    }

    Ok(processes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(processes: &[(Pid, NonZeroUsize)]) -> Vec<(i64, usize)> {
        processes
            .iter()
            .map(|(pid, work)| (pid.get(), work.get()))
            .collect()
    }

    #[test]
    fn keeps_input_order() {
        let processes = parse("3\n3 5\n1 2\n2 4\n").unwrap();
        assert_eq!(pairs(&processes), vec![(3, 5), (1, 2), (2, 4)]);
    }

    #[test]
    fn any_whitespace_separates_tokens() {
        let processes = parse("  2 10\t1   20\n\n 3 ").unwrap();
        assert_eq!(pairs(&processes), vec![(10, 1), (20, 3)]);
    }

    #[test]
    fn ignores_trailing_tokens() {
        let processes = parse("1\n1 3\n2 2\n").unwrap();
        assert_eq!(pairs(&processes), vec![(1, 3)]);
    }

    #[test]
    fn accepts_zero_and_negative_pids() {
        let processes = parse("2\n0 3\n-4 1\n").unwrap();
        assert_eq!(pairs(&processes), vec![(0, 3), (-4, 1)]);
    }

    #[test]
    fn missing_count() {
        assert_eq!(parse(""), Err(InputError::MissingOrMalformedCount));
        assert_eq!(parse("   \n"), Err(InputError::MissingOrMalformedCount));
    }

    #[test]
    fn malformed_count() {
        assert_eq!(parse("two\n1 1\n"), Err(InputError::MissingOrMalformedCount));
        assert_eq!(parse("1.5\n1 1\n"), Err(InputError::MissingOrMalformedCount));
    }

    #[test]
    fn non_positive_count() {
        assert_eq!(parse("0\n"), Err(InputError::NonPositiveCount(0)));
        assert_eq!(parse("-3\n1 1\n"), Err(InputError::NonPositiveCount(-3)));
    }

    #[test]
    fn missing_pair() {
        assert_eq!(
            parse("3\n1 2\n2 2\n"),
            Err(InputError::MalformedPair { index: 3 })
        );
        assert_eq!(parse("1\n7\n"), Err(InputError::MalformedPair { index: 1 }));
    }

    #[test]
    fn malformed_pair() {
        assert_eq!(
            parse("2\n1 2\nx 2\n"),
            Err(InputError::MalformedPair { index: 2 })
        );
        assert_eq!(
            parse("2\n1 two\n2 2\n"),
            Err(InputError::MalformedPair { index: 1 })
        );
    }

    #[test]
    fn non_positive_work() {
        assert_eq!(
            parse("2\n1 2\n2 0\n"),
            Err(InputError::NonPositiveWork {
                pid: Pid::new(2),
                work: 0
            })
        );
        assert_eq!(
            parse("1\n4 -1\n"),
            Err(InputError::NonPositiveWork {
                pid: Pid::new(4),
                work: -1
            })
        );
    }

    #[test]
    fn duplicate_pid() {
        assert_eq!(
            parse("2\n5 4\n5 1\n"),
            Err(InputError::DuplicateId(Pid::new(5)))
        );
    }

    #[test]
    fn work_is_checked_before_duplicates() {
        assert_eq!(
            parse("2\n5 4\n5 0\n"),
            Err(InputError::NonPositiveWork {
                pid: Pid::new(5),
                work: 0
            })
        );
    }

    #[test]
    fn messages_name_the_offending_value() {
        assert_eq!(
            InputError::NonPositiveCount(0).to_string(),
            "Invalid number of processes: 0"
        );
        assert_eq!(
            InputError::DuplicateId(Pid::new(5)).to_string(),
            "Duplicate PID 5 detected"
        );
        assert_eq!(
            InputError::NonPositiveWork {
                pid: Pid::new(3),
                work: -2
            }
            .to_string(),
            "Invalid work units for PID 3: -2"
        );
    }
}
