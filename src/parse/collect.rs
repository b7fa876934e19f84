//! Match collection for every position of a session.
//!
//! Queries are read-only against the preprocessed finders, so positions are
//! mapped in parallel on a dedicated `rayon::ThreadPool` sized by the
//! session's task count. The result is ordered by position regardless of how
//! the work was scheduled.

use log::debug;
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::find::{Match, MatchFinder};

/// One candidate match together with the shortest length its finder allows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub found: Match,
    pub min_length: usize,
}

/// All candidates found at one position, from every finder in order.
fn candidates_at(finders: &[Box<dyn MatchFinder>], buffer: &[u8], position: usize) -> Vec<Candidate> {
    let mut out = Vec::new();
    for finder in finders {
        let min_length = finder.limitations().min_length;
        out.extend(
            finder
                .find_matches_at_position(buffer, position)
                .into_iter()
                .map(|found| Candidate { found, min_length }),
        );
    }
    out
}

/// Candidates for each unit step of `buffer[start..]`; entry `i` belongs to
/// position `start + i * unit`.
pub fn collect_candidates(
    finders: &[Box<dyn MatchFinder>],
    buffer: &[u8],
    start: usize,
    unit: usize,
    task_count: usize,
) -> Result<Vec<Vec<Candidate>>> {
    let positions: Vec<usize> = (start..buffer.len()).step_by(unit).collect();

    let table = if task_count <= 1 || positions.len() < 2 {
        positions
            .iter()
            .map(|&p| candidates_at(finders, buffer, p))
            .collect()
    } else {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(task_count)
            .build()
            .map_err(|e| Error::config(format!("cannot start {} match workers: {}", task_count, e)))?;
        pool.install(|| {
            positions
                .par_iter()
                .map(|&p| candidates_at(finders, buffer, p))
                .collect::<Vec<_>>()
        })
    };

    debug!(
        "collected candidates for {} positions on {} worker(s)",
        positions.len(),
        task_count.max(1)
    );
    Ok(table)
}
