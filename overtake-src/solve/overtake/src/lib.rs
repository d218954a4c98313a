//! Minimum overtakes between a starting order and a finishing order.
//!
//! Each case on the input is `n`, then the starting order, then the
//! finishing order, both permutations of the competitor ids `1..=n`.
//! Cases repeat until the input ends at a case boundary. The answer for a
//! case is the number of inversions of the finishing order written as
//! starting positions, one line per case.

use std::io::{self, Read, Write};

use input::{scan, ByteSource, InputError, Source};
use readable::Usize1;
use seq::MergeCounter;
use thiserror::Error;
use tracing::{debug, info};
use uslice::Permutation;

#[derive(Debug, Error)]
pub enum SolveError {
    #[error("case {case}: malformed input")]
    Malformed {
        case: usize,
        #[source]
        source: InputError,
    },
    #[error("case {case}: input ended before all {expected} ids were read")]
    Truncated { case: usize, expected: usize },
    #[error("failed to write output")]
    Io(#[from] io::Error),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    AwaitingCaseSize,
    ReadingCase { n: usize },
    Done,
}

/// Number of adjacent swaps turning `start` into `finish`.
///
/// Both are 0-based permutations of `0..n`.
pub fn overtakes(
    start: &[usize],
    finish: &[usize],
    counter: &mut MergeCounter<usize>,
) -> u64 {
    let mut mapped = start.relabel(finish);
    counter.sort_count(&mut mapped)
}

fn read_case<S: Source>(
    source: &mut S,
    n: usize,
) -> Result<(Vec<usize>, Vec<usize>), InputError> {
    scan! {
        from source,
        start: [Usize1; n],
        finish: [Usize1; n],
    }
    // only the range is checked; repeated ids give an unspecified count
    if let Some(&id) = start.iter().chain(&finish).find(|&&id| id >= n) {
        return Err(InputError::OutOfRange {
            value: id as i64 + 1,
            ty: "competitor id",
        });
    }
    Ok((start, finish))
}

/// Case-by-case driver.
///
/// Answers are accumulated in memory and only reach a writer through
/// [`Solver::flush`]. A failed case leaves the lines of every earlier case
/// intact and adds nothing for itself.
pub struct Solver {
    counter: MergeCounter<usize>,
    out: Vec<u8>,
    cases: usize,
    state: State,
}

impl Default for Solver {
    fn default() -> Self { Self::new() }
}

impl Solver {
    pub fn new() -> Self {
        Self {
            counter: MergeCounter::new(),
            out: vec![],
            cases: 0,
            state: State::AwaitingCaseSize,
        }
    }

    pub fn state(&self) -> State { self.state }
    pub fn cases(&self) -> usize { self.cases }
    pub fn output(&self) -> &[u8] { &self.out }

    /// Performs one transition and returns the new state.
    ///
    /// Any error is fatal: the solver moves to [`State::Done`].
    pub fn step<S: Source>(
        &mut self,
        source: &mut S,
    ) -> Result<State, SolveError> {
        let case = self.cases + 1;
        match self.state {
            State::AwaitingCaseSize => {
                self.state = match source.next::<usize>() {
                    Ok(Some(n)) => State::ReadingCase { n },
                    Ok(None) => State::Done,
                    Err(source) => {
                        return Err(self.fail(SolveError::Malformed {
                            case,
                            source,
                        }))
                    }
                };
            }
            State::ReadingCase { n } => {
                let (start, finish) = match read_case(source, n) {
                    Ok(orders) => orders,
                    Err(InputError::UnexpectedEof) => {
                        return Err(self.fail(SolveError::Truncated {
                            case,
                            expected: 2 * n,
                        }))
                    }
                    Err(source) => {
                        return Err(self.fail(SolveError::Malformed {
                            case,
                            source,
                        }))
                    }
                };
                let count = overtakes(&start, &finish, &mut self.counter);
                writeln!(self.out, "{count}")?;
                debug!(case, n, overtakes = count, "solved case");
                self.cases = case;
                self.state = State::AwaitingCaseSize;
            }
            State::Done => {}
        }
        Ok(self.state)
    }

    fn fail(&mut self, err: SolveError) -> SolveError {
        self.state = State::Done;
        err
    }

    /// Steps until the input is exhausted; returns the number of cases.
    pub fn run<S: Source>(
        &mut self,
        source: &mut S,
    ) -> Result<usize, SolveError> {
        while self.step(source)? != State::Done {}
        info!(cases = self.cases, "input exhausted");
        Ok(self.cases)
    }

    /// Writes and clears the accumulated lines.
    pub fn flush<W: Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.out)?;
        writer.flush()?;
        self.out.clear();
        Ok(())
    }
}

/// Solves every case of `input` and writes all answers to `output` at
/// once. Nothing is written if any case fails.
pub fn solve<R: Read, W: Write>(
    input: R,
    mut output: W,
) -> Result<usize, SolveError> {
    let mut source = ByteSource::new(input);
    let mut solver = Solver::new();
    let cases = solver.run(&mut source)?;
    solver.flush(&mut output)?;
    Ok(cases)
}

#[cfg(test)]
fn solve_str(input: &str) -> Result<String, SolveError> {
    let mut out = vec![];
    solve(input.as_bytes(), &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

#[test]
fn sanity_check() {
    assert_eq!(solve_str("3\n1 2 3\n3 1 2\n").unwrap(), "2\n");
    assert_eq!(solve_str("2\n1 2\n2 1\n1\n1\n1\n").unwrap(), "1\n0\n");
    assert_eq!(solve_str("").unwrap(), "");
    assert_eq!(solve_str(" \n\t").unwrap(), "");
    assert_eq!(solve_str("0").unwrap(), "0\n");
    assert_eq!(solve_str("0 0\n0\n").unwrap(), "0\n0\n0\n");
    assert_eq!(solve_str("3 3 2 1 1 2 3").unwrap(), "3\n");
}

#[test]
fn mapped_order() {
    let mut counter = MergeCounter::new();
    assert_eq!(overtakes(&[0, 1, 2], &[2, 0, 1], &mut counter), 2);
    assert_eq!(overtakes(&[2, 0, 1], &[2, 0, 1], &mut counter), 0);
    assert_eq!(overtakes(&[2, 0, 1], &[1, 0, 2], &mut counter), 3);
    assert_eq!(overtakes(&[], &[], &mut counter), 0);
}

#[test]
fn malformed() {
    let err = solve_str("3\n1 x 3\n3 2 1\n").unwrap_err();
    assert!(matches!(
        err,
        SolveError::Malformed {
            case: 1,
            source: InputError::ExpectedDigit { found: Some(b'x'), .. },
        }
    ));

    let err = solve_str("1\n1\n1\n-3\n").unwrap_err();
    assert!(matches!(
        err,
        SolveError::Malformed {
            case: 2,
            source: InputError::OutOfRange { value: -3, .. },
        }
    ));

    let err = solve_str("2\n1 3\n1 2\n").unwrap_err();
    assert!(matches!(
        err,
        SolveError::Malformed {
            case: 1,
            source: InputError::OutOfRange { value: 3, .. },
        }
    ));

    let err = solve_str("2\n1 2\n0 1\n").unwrap_err();
    assert!(matches!(
        err,
        SolveError::Malformed {
            case: 1,
            source: InputError::OutOfRange { value: 0, .. },
        }
    ));
}

#[test]
fn truncated() {
    let err = solve_str("2\n1 2\n2\n").unwrap_err();
    assert!(matches!(err, SolveError::Truncated { case: 1, expected: 4 }));

    let err = solve_str("1\n1\n1\n3\n").unwrap_err();
    assert!(matches!(err, SolveError::Truncated { case: 2, expected: 6 }));
}

#[test]
fn keeps_completed_cases() {
    let mut src = ByteSource::from("2\n2 1\n1 2\n1\n1\n1\n3\n1 x 3\n");
    let mut solver = Solver::new();
    let err = solver.run(&mut src).unwrap_err();
    assert!(matches!(err, SolveError::Malformed { case: 3, .. }));
    assert_eq!(solver.cases(), 2);
    assert_eq!(solver.state(), State::Done);
    assert_eq!(solver.output(), b"1\n0\n");

    let mut out = vec![];
    solver.flush(&mut out).unwrap();
    assert_eq!(out, b"1\n0\n");
    assert!(solver.output().is_empty());

    // nothing reaches the writer through `solve`
    let mut out = vec![];
    assert!(solve(&b"1\n1\n1\n2\n1\n"[..], &mut out).is_err());
    assert!(out.is_empty());
}

#[test]
fn transitions() {
    let mut src = ByteSource::from("2 1 2 2 1");
    let mut solver = Solver::new();
    assert_eq!(solver.state(), State::AwaitingCaseSize);
    assert_eq!(solver.step(&mut src).unwrap(), State::ReadingCase { n: 2 });
    assert_eq!(solver.step(&mut src).unwrap(), State::AwaitingCaseSize);
    assert_eq!(solver.output(), b"1\n");
    assert_eq!(solver.step(&mut src).unwrap(), State::Done);
    assert_eq!(solver.step(&mut src).unwrap(), State::Done);
    assert_eq!(solver.cases(), 1);
}

#[test]
fn random_cases() {
    use std::fmt::Write;

    use naive::InversionPairs;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use random::{Gen, Perm};

    let mut rng = ChaCha20Rng::from_seed([0; 32]);
    let mut input = String::new();
    let mut expected = String::new();
    for _ in 0..40 {
        let n = (0..300_usize).generate(&mut rng);
        let start = Perm { len: n }.generate(&mut rng);
        let finish = Perm { len: n }.generate(&mut rng);

        writeln!(input, "{n}").unwrap();
        for order in [&start, &finish] {
            let line: Vec<_> =
                order.iter().map(|x| (x + 1).to_string()).collect();
            writeln!(input, "{}", line.join(" ")).unwrap();
        }
        let count = start.relabel(&finish).inversion_pairs();
        writeln!(expected, "{count}").unwrap();

        // same order, then reversed order
        let reversed: Vec<_> = start.iter().rev().copied().collect();
        let mut counter = MergeCounter::new();
        assert_eq!(overtakes(&start, &start, &mut counter), 0);
        assert_eq!(
            overtakes(&start, &reversed, &mut counter),
            (n * n.saturating_sub(1) / 2) as u64
        );
    }
    assert_eq!(solve_str(&input).unwrap(), expected);
}
