// ********* Input data structures ***********

use snafu::prelude::*;
use std::collections::HashMap;

/// One voter's ranked choices, most preferred first.
///
/// A ballot is never empty and never contains a blank name. In most cases it
/// is enough to let the builder or the readers construct ballots.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct Ballot {
    candidates: Vec<String>,
}

impl Ballot {
    /// Builds a ballot out of raw choices, in order of preference.
    ///
    /// Each choice is trimmed and the blank ones are skipped. Returns `None`
    /// when nothing is left. Repeated names are kept as-is.
    ///
    /// ```
    /// use borda_count::Ballot;
    ///
    /// let b = Ballot::from_choices([" Anna ", "", "Bob"]).unwrap();
    /// assert_eq!(b.candidates(), &["Anna".to_string(), "Bob".to_string()]);
    /// assert!(Ballot::from_choices(["  ", ""]).is_none());
    /// ```
    pub fn from_choices<I, S>(choices: I) -> Option<Ballot>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let candidates: Vec<String> = choices
            .into_iter()
            .filter_map(|c| {
                let name = c.as_ref().trim();
                if name.is_empty() {
                    None
                } else {
                    Some(name.to_string())
                }
            })
            .collect();
        if candidates.is_empty() {
            None
        } else {
            Some(Ballot { candidates })
        }
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// The number of ranked names on this ballot. Always at least 1.
    pub fn num_ranked(&self) -> usize {
        self.candidates.len()
    }
}

/// The rank given to header columns whose suffix is not an integer.
///
/// Such columns are kept and sorted after every numbered column.
pub const UNPARSABLE_RANK: i64 = 10_000;

/// A header column that carries one preference position.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RankColumn {
    /// Position of the column in the header row (0-based).
    pub index: usize,
    /// The label as written in the header.
    pub label: String,
    /// The rank read from the label, or `UNPARSABLE_RANK`.
    pub rank: i64,
}

// ******** Output data structures *********

/// Total Borda points per candidate.
pub type ScoreTable = HashMap<String, u64>;

/// Candidates with their score, best first.
pub type RankedResult = Vec<(String, u64)>;

// ********* Configuration **********

/// The number of candidates to report. Always at least 1.
#[derive(Eq, PartialEq, Debug, Clone, Copy, PartialOrd, Ord, Hash)]
pub struct TopCount(usize);

impl TopCount {
    /// Default of the command line interface.
    pub const DEFAULT_CLI: TopCount = TopCount(3);
    /// Default of the upload form.
    pub const DEFAULT_FORM: TopCount = TopCount(5);

    pub fn new(x: usize) -> Result<TopCount, BordaErrors> {
        ensure!(
            x >= 1,
            InvalidTopCountSnafu {
                value: x.to_string()
            }
        );
        Ok(TopCount(x))
    }

    /// Parses a user-provided value, rejecting anything that is not a
    /// positive integer.
    pub fn strict(text: &str) -> Result<TopCount, BordaErrors> {
        let x = text
            .trim()
            .parse::<usize>()
            .ok()
            .context(InvalidTopCountSnafu { value: text })?;
        TopCount::new(x)
    }

    /// Parses a user-provided value, falling back to the form default when
    /// it is missing or invalid.
    pub fn lenient(text: Option<&str>) -> TopCount {
        text.and_then(|t| TopCount::strict(t).ok())
            .unwrap_or(TopCount::DEFAULT_FORM)
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for TopCount {
    fn default() -> Self {
        TopCount::DEFAULT_CLI
    }
}

/// Errors that prevent the ballots from being read or tabulated.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum BordaErrors {
    #[snafu(display("Error opening ballot file {path}: {source}"))]
    OpeningCsv { source: csv::Error, path: String },
    #[snafu(display("Error reading the header row: {source}"))]
    CsvHeader { source: csv::Error },
    #[snafu(display("Error parsing line {lineno}: {source}"))]
    CsvLineParse { source: csv::Error, lineno: u64 },
    #[snafu(display("The number of candidates to report must be a positive integer, got {value:?}"))]
    InvalidTopCount { value: String },
}
