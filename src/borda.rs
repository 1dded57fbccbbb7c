use log::{debug, info, warn};

use borda_count::*;
use snafu::prelude::*;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use text_diff::print_diff;

use crate::args::Args;
use crate::borda::config_reader::*;

pub mod config_reader;
mod io_xlsx;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum TallyError {
    #[snafu(display("CSV not found: {path}"))]
    MissingInput { path: String },
    #[snafu(display("Error reading ballots from {path}: {source}"))]
    ReadingBallots { source: BordaErrors, path: String },
    #[snafu(display("Error opening file {path}: {source}"))]
    OpeningExcel {
        source: calamine::XlsxError,
        path: String,
    },
    #[snafu(display("No worksheet in {path}"))]
    EmptyExcel { path: String },
    #[snafu(display("No worksheet named {name:?} in {path}"))]
    MissingWorksheet { name: String, path: String },
    #[snafu(display("Unexpected cell at line {lineno}: {content}"))]
    ExcelWrongCellType { lineno: u64, content: String },
    #[snafu(display("Error opening file {path}: {source}"))]
    OpeningJson {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing JSON: {source}"))]
    ParsingJson { source: serde_json::Error },
    #[snafu(display("Error writing file {path}: {source}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Unknown input type {input_type:?} (expected csv or xlsx)"))]
    UnknownInputType { input_type: String },
    #[snafu(display("No ballot file: pass a path or a configuration with cvrFileSources"))]
    NoFileSource {},
    #[snafu(display("{source}"))]
    InvalidTopCount { source: BordaErrors },
    #[snafu(display("No ballots found in CSV (no Rank columns or empty rows)"))]
    NoBallots {},
    #[snafu(display("Difference detected between calculated summary and reference summary"))]
    ReferenceMismatch {},
}

pub type TallyResult<T> = Result<T, TallyError>;

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum InputType {
    Csv,
    Xlsx,
}

impl InputType {
    pub fn parse(s: &str) -> TallyResult<InputType> {
        match s {
            "csv" => Ok(InputType::Csv),
            "xlsx" | "excel" => Ok(InputType::Xlsx),
            x => UnknownInputTypeSnafu { input_type: x }.fail(),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct RankedEntry {
    pub rank: usize,
    pub candidate: String,
    pub score: u64,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct ElectionSummary {
    pub config: OutputConfig,
    pub ballots: usize,
    pub candidates: usize,
    pub results: Vec<RankedEntry>,
}

impl ElectionSummary {
    fn new(contest: String, top: TopCount, ballots: &[Ballot], scores: &ScoreTable) -> Self {
        let results = top_x(scores, top.get())
            .into_iter()
            .enumerate()
            .map(|(idx, (candidate, score))| RankedEntry {
                rank: idx + 1,
                candidate,
                score,
            })
            .collect();
        ElectionSummary {
            config: OutputConfig {
                contest,
                top_count: top.get(),
            },
            ballots: ballots.len(),
            candidates: scores.len(),
            results,
        }
    }

    /// The plain text report printed on the standard output.
    pub fn report(&self) -> String {
        let mut lines: Vec<String> = vec![
            format!("Total ballots: {}", self.ballots),
            format!("Candidates scored: {}", self.candidates),
            String::new(),
            format!("Top {} (Borda):", self.config.top_count),
        ];
        for entry in self.results.iter() {
            lines.push(format!("{}. {}: {}", entry.rank, entry.candidate, entry.score));
        }
        lines.join("\n")
    }
}

/// A file to read, with its location already resolved.
#[derive(Eq, PartialEq, Debug, Clone)]
struct ResolvedSource {
    path: PathBuf,
    input_type: InputType,
    worksheet: Option<String>,
}

fn resolve_sources(
    args: &Args,
    config: &BordaConfig,
    root_p: &Path,
) -> TallyResult<Vec<ResolvedSource>> {
    if let Some(input) = args.path.as_ref().or(args.input.as_ref()) {
        let input_type = match &args.input_type {
            Some(s) => InputType::parse(s)?,
            None => InputType::Csv,
        };
        return Ok(vec![ResolvedSource {
            path: PathBuf::from(input),
            input_type,
            worksheet: args.excel_worksheet_name.clone(),
        }]);
    }
    ensure!(!config.cvr_file_sources.is_empty(), NoFileSourceSnafu {});
    config
        .cvr_file_sources
        .iter()
        .map(|cfs| -> TallyResult<ResolvedSource> {
            Ok(ResolvedSource {
                path: root_p.join(&cfs.file_path),
                input_type: cfs.input_type()?,
                worksheet: cfs.excel_worksheet_name.clone(),
            })
        })
        .collect()
}

fn read_ranking_data(source: &ResolvedSource) -> TallyResult<Vec<Ballot>> {
    let p = source.path.display().to_string();
    ensure!(source.path.exists(), MissingInputSnafu { path: p.clone() });
    info!("Attempting to read rank file {:?}", p);
    match source.input_type {
        InputType::Csv => read_ranked_csv(&source.path).context(ReadingBallotsSnafu { path: p }),
        InputType::Xlsx => io_xlsx::read_excel_file(&p, source.worksheet.as_deref()),
    }
}

fn resolve_top_count(args: &Args, config: &BordaConfig) -> TallyResult<TopCount> {
    if let Some(s) = &args.top {
        return TopCount::strict(s).context(InvalidTopCountSnafu {});
    }
    Ok(config.rules.top_count()?.unwrap_or_default())
}

fn write_summary(summary: &ElectionSummary, out: &str) -> TallyResult<()> {
    let pretty_js = serde_json::to_string_pretty(summary).context(ParsingJsonSnafu {})?;
    if out == "stdout" {
        println!("{}", pretty_js);
        return Ok(());
    }
    let out_p = Path::new(out);
    if let Some(parent) = out_p.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).context(WritingOutputSnafu { path: out })?;
        }
    }
    info!("Writing summary to {:?}", out);
    fs::write(out_p, pretty_js).context(WritingOutputSnafu { path: out })
}

fn check_reference(summary: &ElectionSummary, reference_path: &str) -> TallyResult<()> {
    let summary_ref = read_summary(reference_path)?;
    let summary_js = serde_json::to_value(summary).context(ParsingJsonSnafu {})?;
    if summary_ref != summary_js {
        warn!("Found differences with the reference summary {:?}", reference_path);
        let pretty_ref = serde_json::to_string_pretty(&summary_ref).context(ParsingJsonSnafu {})?;
        let pretty_js = serde_json::to_string_pretty(&summary_js).context(ParsingJsonSnafu {})?;
        print_diff(pretty_ref.as_str(), pretty_js.as_str(), "\n");
        return ReferenceMismatchSnafu {}.fail();
    }
    info!("Summary matches the reference {:?}", reference_path);
    Ok(())
}

/// Reads the ballots, scores them and reports the result.
pub fn run_election(args: &Args) -> TallyResult<ElectionSummary> {
    let (config, root_p) = match &args.config {
        Some(config_path) => {
            let config = read_config(config_path)?;
            let root_p = Path::new(config_path)
                .parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_default();
            (config, root_p)
        }
        None => (BordaConfig::default(), PathBuf::new()),
    };
    info!("config: {:?}", config);

    let top = resolve_top_count(args, &config)?;
    let sources = resolve_sources(args, &config, &root_p)?;
    debug!("sources: {:?}", sources);

    let mut ballots: Vec<Ballot> = Vec::new();
    for source in sources.iter() {
        let mut file_ballots = read_ranking_data(source)?;
        info!("{} ballots in {:?}", file_ballots.len(), source.path);
        ballots.append(&mut file_ballots);
    }
    ensure!(!ballots.is_empty(), NoBallotsSnafu {});

    let scores = borda_scores(&ballots);
    let contest = config
        .output_settings
        .contest_name
        .clone()
        .unwrap_or_else(|| "Borda count".to_string());
    let summary = ElectionSummary::new(contest, top, &ballots, &scores);
    println!("{}", summary.report());

    // An empty --out means no JSON output, even with an output directory.
    let out = match &args.out {
        Some(o) if o.trim().is_empty() => None,
        Some(o) => Some(o.clone()),
        None => config
            .output_settings
            .output_directory
            .as_ref()
            .map(|d| root_p.join(d).join("summary.json").display().to_string()),
    };
    if let Some(out) = out {
        write_summary(&summary, &out)?;
    }

    if let Some(reference_path) = &args.reference {
        check_reference(&summary, reference_path)?;
    }

    Ok(summary)
}
