use log::debug;

pub use crate::config::*;
use crate::reader::detect_rank_columns;

/// A builder for turning the rows of a table into ballots.
///
/// The rank columns are detected once from the header. Every row is then
/// read along these columns, in rank order.
///
/// ```
/// pub use borda_count::builder::BallotBuilder;
///
/// let mut builder = BallotBuilder::new(&["Voter", "Rank 2", "Rank 1"]);
/// builder.add_row(&["v1", "Bob", "Anna"]);
/// builder.add_row(&["v2", "", "  "]);
///
/// let ballots = builder.build();
/// assert_eq!(ballots.len(), 1);
/// assert_eq!(ballots[0].candidates(), &["Anna".to_string(), "Bob".to_string()]);
/// ```
pub struct BallotBuilder {
    pub(crate) _columns: Vec<RankColumn>,
    pub(crate) _ballots: Vec<Ballot>,
    pub(crate) _rows_seen: usize,
}

impl BallotBuilder {
    pub fn new<S: AsRef<str>>(header: &[S]) -> BallotBuilder {
        let columns = detect_rank_columns(header);
        debug!("BallotBuilder: rank columns: {:?}", columns);
        BallotBuilder {
            _columns: columns,
            _ballots: Vec::new(),
            _rows_seen: 0,
        }
    }

    /// The rank columns, in the order ballots are read.
    pub fn rank_columns(&self) -> &[RankColumn] {
        &self._columns
    }

    /// Adds a data row. Cells missing at the end of a short row count as blank.
    ///
    /// Returns true if the row produced a ballot.
    pub fn add_row<S: AsRef<str>>(&mut self, cells: &[S]) -> bool {
        self._rows_seen += 1;
        let choices = self
            ._columns
            .iter()
            .map(|col| cells.get(col.index).map(|c| c.as_ref()).unwrap_or(""));
        match Ballot::from_choices(choices) {
            Some(ballot) => {
                self._ballots.push(ballot);
                true
            }
            None => {
                debug!("add_row: row {}: no ranked choice, skipping", self._rows_seen);
                false
            }
        }
    }

    /// Ballots collected so far.
    pub fn num_ballots(&self) -> usize {
        self._ballots.len()
    }

    pub fn build(self) -> Vec<Ballot> {
        debug!(
            "build: {} ballots out of {} rows",
            self._ballots.len(),
            self._rows_seen
        );
        self._ballots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_logs() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn short_rows_are_blank() {
        let mut b = BallotBuilder::new(&["Rank 1", "Rank 2", "Rank 3"]);
        assert!(b.add_row(&["Alice"]));
        assert!(b.add_row(&["Bob", "Alice"]));
        let ballots = b.build();
        assert_eq!(ballots[0].candidates(), &["Alice"]);
        assert_eq!(ballots[1].candidates(), &["Bob", "Alice"]);
    }

    #[test]
    fn gaps_are_skipped() {
        let mut b = BallotBuilder::new(&["Rank 1", "Rank 2", "Rank 3"]);
        assert!(b.add_row(&["", "Carol", " Dan "]));
        assert_eq!(b.build()[0].candidates(), &["Carol", "Dan"]);
    }

    #[test]
    fn no_rank_columns_no_ballots() {
        init_logs();
        let mut b = BallotBuilder::new(&["Name", "Email"]);
        assert!(b.rank_columns().is_empty());
        assert!(!b.add_row(&["Alice", "a@example.com"]));
        assert_eq!(b.num_ballots(), 0);
        assert!(b.build().is_empty());
    }

    #[test]
    fn other_columns_are_ignored() {
        let mut b = BallotBuilder::new(&["Timestamp", "Rank 1", "Comment", "Rank 2"]);
        b.add_row(&["2024-01-01", "Eve", "great", "Frank"]);
        assert_eq!(b.build()[0].candidates(), &["Eve", "Frank"]);
    }
}
