use crate::borda::*;

use serde::{Deserialize, Serialize};
use serde_json::Value as JSValue;

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(rename = "contestName", default)]
    pub contest_name: Option<String>,
    #[serde(rename = "outputDirectory", default)]
    pub output_directory: Option<String>,
}

/// The contest description written at the top of the summary.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub contest: String,
    #[serde(rename = "topCount")]
    pub top_count: usize,
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct FileSource {
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(rename = "filePath")]
    pub file_path: String,
    #[serde(rename = "excelWorksheetName", default)]
    pub excel_worksheet_name: Option<String>,
}

fn default_provider() -> String {
    "csv".to_string()
}

impl FileSource {
    pub fn input_type(&self) -> TallyResult<InputType> {
        InputType::parse(&self.provider)
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct BordaRules {
    #[serde(rename = "topCount", default)]
    _top_count: Option<JSValue>,
}

impl BordaRules {
    /// The number of candidates to report, if the configuration sets it.
    /// Accepts a number or a string holding a number.
    pub fn top_count(&self) -> TallyResult<Option<TopCount>> {
        let text = match &self._top_count {
            None | Some(JSValue::Null) => return Ok(None),
            Some(JSValue::String(s)) => s.clone(),
            Some(x) => x.to_string(),
        };
        TopCount::strict(&text)
            .map(Some)
            .context(InvalidTopCountSnafu {})
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct BordaConfig {
    #[serde(rename = "outputSettings", default)]
    pub output_settings: OutputSettings,
    #[serde(rename = "cvrFileSources", default)]
    pub cvr_file_sources: Vec<FileSource>,
    #[serde(default)]
    pub rules: BordaRules,
}

pub fn read_config(path: &str) -> TallyResult<BordaConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let config: BordaConfig =
        serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(config)
}

pub fn read_summary(path: &str) -> TallyResult<JSValue> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    let js: JSValue = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    debug!("read_summary: {:?}", js);
    Ok(js)
}
