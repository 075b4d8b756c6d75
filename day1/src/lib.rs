use std::{
    io,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::{debug, info};
use util::{parse_integer_line, read_lines, BadInput};

pub const DEFAULT_INPUT: &str = "./input.txt";

#[derive(Error, Debug)]
pub enum CalorieError {
    #[error("Unable to read input at {}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Line {line_no} is not an integer")]
    Parse {
        line_no: usize,
        #[source]
        source: BadInput,
    },

    #[error("Group total overflows at line {line_no}")]
    GroupOverflow { line_no: usize },

    #[error("Sum of the three largest totals overflows")]
    SumOverflow,
}

impl CalorieError {
    /// Graphical report for errors that point into a line. The message chain
    /// alone covers the rest.
    pub fn diagnostic(&self) -> Option<String> {
        match self {
            Self::Parse { source, .. } => Some(source.render()),
            _ => None,
        }
    }
}

/// The three largest group totals seen so far, smallest first.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TopThree {
    maxes: [i64; 3],
}

impl TopThree {
    pub fn insert(&mut self, total: i64) {
        // Always ascending, so the minimum is the only slot to challenge.
        if total > self.maxes[0] {
            self.maxes[0] = total;
            self.maxes.sort_unstable();
        }
    }

    pub fn values(&self) -> [i64; 3] {
        self.maxes
    }

    pub fn sum(&self) -> Result<i64, CalorieError> {
        self.maxes
            .iter()
            .try_fold(0i64, |acc, &v| acc.checked_add(v))
            .ok_or(CalorieError::SumOverflow)
    }
}

#[derive(Debug, Default)]
pub struct Aggregator {
    current_total: i64,
    line_no: usize,
    groups: usize,
    top: TopThree,
}

impl Aggregator {
    /// Feeds one line. A blank line closes the current group.
    pub fn push_line(&mut self, line: &str) -> Result<(), CalorieError> {
        self.line_no += 1;

        if line.is_empty() {
            self.close_group();
            return Ok(());
        }

        let line_no = self.line_no;
        let calories =
            parse_integer_line(line).map_err(|source| CalorieError::Parse { line_no, source })?;
        self.current_total = self
            .current_total
            .checked_add(calories)
            .ok_or(CalorieError::GroupOverflow { line_no })?;

        Ok(())
    }

    fn close_group(&mut self) {
        debug!(group = self.groups, total = self.current_total, "group closed");
        self.top.insert(self.current_total);
        self.groups += 1;
        self.current_total = 0;
    }

    /// Closes the last group, whether or not the input ended in a blank line.
    pub fn finish(mut self) -> TopThree {
        self.close_group();
        debug!(top = ?self.top.values(), groups = self.groups, "input exhausted");
        self.top
    }
}

/// Runs the whole input through an [`Aggregator`]. `origin` only names the
/// input in errors.
pub fn find_top_three(
    input: impl Iterator<Item = io::Result<String>>,
    origin: &Path,
) -> Result<TopThree, CalorieError> {
    let mut aggregator = Aggregator::default();

    for line in input {
        let line = line.map_err(|source| CalorieError::FileAccess {
            path: origin.to_path_buf(),
            source,
        })?;

        aggregator.push_line(&line)?;
    }

    Ok(aggregator.finish())
}

pub fn get_biggest_three_total(path: &Path) -> Result<i64, CalorieError> {
    info!(path = %path.display(), "reading calories");

    let lines = read_lines(path).map_err(|source| CalorieError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;

    find_top_three(lines, path)?.sum()
}
