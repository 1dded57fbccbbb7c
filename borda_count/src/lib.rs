/*!

Borda count tabulation of ranked-choice ballots.

Every ballot lists candidates in order of preference. With `k` names on a
ballot, the first one receives `k` points, the second `k - 1` and so on until
the last one, which receives 1 point. The points are added up over all the
ballots and the candidates are reported from the highest to the lowest total.

```
use borda_count::*;

let data = "Rank 1,Rank 2\nAlice,Bob\nBob,Alice\nAlice,\n";
let ballots = read_ballots(data.as_bytes())?;
let scores = borda_scores(&ballots);
let top = top_x(&scores, 2);
assert_eq!(top, vec![("Alice".to_string(), 4), ("Bob".to_string(), 3)]);
# Ok::<(), BordaErrors>(())
```

See the [manual] for the input format.
 */

mod config;
use log::{debug, info};

pub mod builder;
pub mod manual;
mod reader;

pub use crate::config::*;
pub use crate::reader::{detect_rank_columns, read_ballots, read_ranked_csv};

/// Computes the Borda score of every candidate.
///
/// Each ballot is scored with its own length: a voter who ranks only two
/// candidates gives at most 2 points, whatever the number of rank columns.
pub fn borda_scores(ballots: &[Ballot]) -> ScoreTable {
    info!("borda_scores: processing {} ballots", ballots.len());
    let mut scores = ScoreTable::new();
    for ballot in ballots.iter() {
        let k = ballot.num_ranked() as u64;
        for (position, candidate) in ballot.candidates().iter().enumerate() {
            *scores.entry(candidate.clone()).or_insert(0) += k - position as u64;
        }
    }
    debug!("borda_scores: {} candidates scored", scores.len());
    scores
}

/// Returns the `x` best candidates, by decreasing score.
///
/// Candidates with the same score are sorted by name. If there are fewer than
/// `x` candidates, all of them are returned.
///
/// # Panics
///
/// If `x` is 0. Callers must check the count first, for example with `TopCount`.
pub fn top_x(scores: &ScoreTable, x: usize) -> RankedResult {
    assert!(x >= 1, "top_x: the number of candidates must be positive");
    let mut sorted: RankedResult = scores
        .iter()
        .map(|(name, score)| (name.clone(), *score))
        .collect();
    sorted.sort_by(|(n1, s1), (n2, s2)| s2.cmp(s1).then_with(|| n1.cmp(n2)));
    sorted.truncate(x);
    sorted
}

/// Runs the full pipeline on a CSV source: reading, scoring and selection.
///
/// Returns the number of ballots, the score table and the top candidates.
pub fn tabulate<R: std::io::Read>(
    source: R,
    top: TopCount,
) -> Result<(usize, ScoreTable, RankedResult), BordaErrors> {
    let ballots = read_ballots(source)?;
    let scores = borda_scores(&ballots);
    let ranked = top_x(&scores, top.get());
    Ok((ballots.len(), scores, ranked))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_logs() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn ballots(rows: &[&[&str]]) -> Vec<Ballot> {
        rows.iter()
            .filter_map(|r| Ballot::from_choices(r.iter()))
            .collect()
    }

    fn table(entries: &[(&str, u64)]) -> ScoreTable {
        entries.iter().map(|(n, s)| (n.to_string(), *s)).collect()
    }

    fn pairs(entries: &[(&str, u64)]) -> RankedResult {
        entries.iter().map(|(n, s)| (n.to_string(), *s)).collect()
    }

    #[test]
    fn example_scores() {
        init_logs();
        let b = ballots(&[&["Alice", "Bob"], &["Bob", "Alice"], &["Alice"]]);
        let scores = borda_scores(&b);
        assert_eq!(scores, table(&[("Alice", 4), ("Bob", 3)]));
        assert_eq!(top_x(&scores, 2), pairs(&[("Alice", 4), ("Bob", 3)]));
    }

    #[test]
    fn ballot_length_sets_the_points() {
        let b = ballots(&[&["A", "B", "C", "D"], &["D", "C"]]);
        let scores = borda_scores(&b);
        assert_eq!(scores, table(&[("A", 4), ("B", 3), ("C", 3), ("D", 3)]));
    }

    #[test]
    fn duplicates_double_count() {
        let b = ballots(&[&["A", "A"]]);
        assert_eq!(borda_scores(&b), table(&[("A", 3)]));
    }

    #[test]
    fn no_ballots_no_scores() {
        let scores = borda_scores(&[]);
        assert!(scores.is_empty());
        assert!(top_x(&scores, 3).is_empty());
    }

    #[test]
    fn total_points() {
        let b = ballots(&[
            &["A", "B", "C"],
            &["B"],
            &["C", "A", "D", "E", "B"],
            &["E", "D"],
        ]);
        let expected: u64 = b
            .iter()
            .map(|x| {
                let k = x.num_ranked() as u64;
                k * (k + 1) / 2
            })
            .sum();
        assert_eq!(borda_scores(&b).values().sum::<u64>(), expected);
        assert_eq!(expected, 6 + 1 + 15 + 3);
    }

    #[test]
    fn ballot_order_does_not_matter() {
        let rows: [&[&str]; 4] = [&["A", "B"], &["C"], &["B", "C", "A"], &["A", "C"]];
        let forward = borda_scores(&ballots(&rows));
        let mut reversed_rows = rows;
        reversed_rows.reverse();
        let backward = borda_scores(&ballots(&reversed_rows));
        assert_eq!(forward, backward);
    }

    #[test]
    fn ties_sorted_by_name() {
        let scores = table(&[("Zed", 5), ("amy", 5), ("Bob", 5), ("Al", 7), ("Cy", 1)]);
        assert_eq!(
            top_x(&scores, 10),
            pairs(&[("Al", 7), ("Bob", 5), ("Zed", 5), ("amy", 5), ("Cy", 1)])
        );
    }

    #[test]
    fn truncation() {
        let scores = table(&[("A", 3), ("B", 2), ("C", 1)]);
        for x in 1..6 {
            assert_eq!(top_x(&scores, x).len(), x.min(scores.len()));
        }
        assert_eq!(top_x(&scores, 1), pairs(&[("A", 3)]));
    }

    #[test]
    fn top_x_is_stable_on_its_output() {
        let scores = table(&[("D", 2), ("C", 2), ("B", 9), ("A", 0)]);
        let first = top_x(&scores, 3);
        let again: ScoreTable = first.iter().cloned().collect();
        assert_eq!(top_x(&again, 3), first);
        assert_eq!(top_x(&again, 2), first[..2].to_vec());
    }

    #[test]
    #[should_panic]
    fn top_zero_is_a_bug() {
        top_x(&table(&[("A", 1)]), 0);
    }

    #[test]
    fn tabulate_pipeline() {
        init_logs();
        let data = "Rank 1,Rank 2\nAlice,Bob\nBob,Alice\nAlice,\n";
        let (n, scores, top) = tabulate(data.as_bytes(), TopCount::new(1).unwrap()).unwrap();
        assert_eq!(n, 3);
        assert_eq!(scores.len(), 2);
        assert_eq!(top, pairs(&[("Alice", 4)]));
    }
}
