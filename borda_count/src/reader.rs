// Primitives for reading ballots out of CSV files.

use std::io;
use std::num::IntErrorKind;
use std::path::Path;

use log::{debug, info};
use snafu::prelude::*;

use crate::builder::BallotBuilder;
use crate::config::*;

const RANK_PREFIX: &str = "rank ";

/// Finds the rank columns of a header row, sorted by rank.
///
/// A column is a rank column when its label, trimmed and lowercased, starts
/// with `"rank "`. The rank is the second word of the label. Labels such as
/// `Rank X` are still accepted: they get `UNPARSABLE_RANK` and therefore come
/// after all the numbered columns, in the order of the header.
pub fn detect_rank_columns<S: AsRef<str>>(header: &[S]) -> Vec<RankColumn> {
    let mut columns: Vec<RankColumn> = header
        .iter()
        .enumerate()
        .filter(|(_, label)| {
            label
                .as_ref()
                .trim()
                .to_lowercase()
                .starts_with(RANK_PREFIX)
        })
        .map(|(index, label)| RankColumn {
            index,
            label: label.as_ref().to_string(),
            rank: rank_of_label(label.as_ref()),
        })
        .collect();
    // Stable: ties keep their header order.
    columns.sort_by_key(|c| c.rank);
    columns
}

// Integers that do not fit still sort by their sign.
fn rank_of_label(label: &str) -> i64 {
    match label.split_whitespace().nth(1).map(|s| s.parse::<i64>()) {
        Some(Ok(rank)) => rank,
        Some(Err(e)) if *e.kind() == IntErrorKind::PosOverflow => i64::MAX,
        Some(Err(e)) if *e.kind() == IntErrorKind::NegOverflow => i64::MIN,
        x => {
            debug!(
                "rank_of_label: could not read a rank from {:?} ({:?}), sorting it last",
                label, x
            );
            UNPARSABLE_RANK
        }
    }
}

/// Reads all the ballots of a CSV source that starts with a header row.
///
/// Rows without any ranked name are dropped. An empty source, or one with
/// only a header, gives no ballots.
pub fn read_ballots<R: io::Read>(source: R) -> Result<Vec<Ballot>, BordaErrors> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(source);
    read_records(&mut rdr)
}

/// Reads all the ballots of a CSV file. See `read_ballots`.
pub fn read_ranked_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Ballot>, BordaErrors> {
    let p = path.as_ref().display().to_string();
    info!("read_ranked_csv: reading {:?}", p);
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path.as_ref())
        .context(OpeningCsvSnafu { path: p })?;
    read_records(&mut rdr)
}

fn read_records<R: io::Read>(rdr: &mut csv::Reader<R>) -> Result<Vec<Ballot>, BordaErrors> {
    let header: Vec<String> = rdr
        .headers()
        .context(CsvHeaderSnafu {})?
        .iter()
        .map(|s| s.to_string())
        .collect();
    debug!("read_records: header: {:?}", header);
    let mut builder = BallotBuilder::new(&header);

    for (idx, line_r) in rdr.records().enumerate() {
        // The header is line 1.
        let lineno = (idx + 2) as u64;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        let cells: Vec<&str> = line.iter().collect();
        builder.add_row(&cells);
    }
    let ballots = builder.build();
    info!("read_records: found {} ballots", ballots.len());
    Ok(ballots)
}
