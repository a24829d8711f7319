//! Export of finished match records.
//!
//! `JsonExport` keeps one JSON file per pairing and appends a row per match.
//! Failing to export never stops play; the controller only raises an
//! error indicator.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use time::format_description;
use time::OffsetDateTime;
use tracing::debug;

use crate::error::ExportError;
use crate::ledger::MatchRecord;

/// Persists completed ledger records.
pub trait ExportSink: Send {
    /// Write `record`, returning where it went.
    fn export(&mut self, record: &MatchRecord) -> Result<PathBuf, ExportError>;
}

/// Export configuration file contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSettings {
    pub directory: PathBuf,
    /// Add a `yyyyMMddHHmmssfff` stamp to the file name.
    #[serde(default)]
    pub timestamp: bool,
    /// Put the stamp in front of the name instead of after it.
    #[serde(default)]
    pub timestamp_prepend: bool,
}

impl ExportSettings {
    pub fn load(path: &Path) -> Result<Self, ExportError> {
        let text = fs::read_to_string(path)?;
        let settings: ExportSettings = serde_json::from_str(&text)
            .map_err(|e| ExportError::InvalidConfig(format!("{}: {e}", path.display())))?;
        if settings.directory.as_os_str().is_empty() {
            return Err(ExportError::InvalidConfig("directory is empty".into()));
        }
        Ok(settings)
    }
}

/// One exported match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRow {
    pub match_number: u32,
    pub teams: Vec<ExportTeam>,
    pub num_of_rounds: u32,
    pub rounds_played: u32,
    pub accumulated_minutes: f64,
    pub machine_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportTeam {
    pub label: String,
    pub number: u8,
    pub size: u32,
    pub accumulated_points: f32,
    pub wins: u32,
}

impl ExportRow {
    pub fn from_record(record: &MatchRecord, machine_name: &str) -> Self {
        Self {
            match_number: record.match_number,
            teams: record
                .teams
                .iter()
                .map(|t| ExportTeam {
                    label: t.label.clone(),
                    number: t.number,
                    size: t.size,
                    accumulated_points: t.accumulated_points,
                    wins: t.wins,
                })
                .collect(),
            num_of_rounds: record.num_of_rounds,
            rounds_played: record.rounds_played,
            accumulated_minutes: record.accumulated_minutes(),
            machine_name: machine_name.to_string(),
        }
    }
}

pub struct JsonExport {
    settings: ExportSettings,
    machine_name: String,
}

impl JsonExport {
    pub fn new(settings: ExportSettings) -> Self {
        Self {
            settings,
            machine_name: machine_name(),
        }
    }

    pub fn from_config_file(path: &Path) -> Result<Self, ExportError> {
        Ok(Self::new(ExportSettings::load(path)?))
    }

    /// `LabelTeamA-vs-LabelTeamB.json`, stamped as configured.
    pub fn file_name(&self, record: &MatchRecord, now: OffsetDateTime) -> Result<String, ExportError> {
        let base: String = record
            .teams
            .iter()
            .map(|t| format!("{}Team{}", sanitize(&t.label), t.number))
            .collect::<Vec<_>>()
            .join("-vs-");
        if !self.settings.timestamp {
            return Ok(format!("{base}.json"));
        }
        let stamp = file_stamp(now)?;
        Ok(if self.settings.timestamp_prepend {
            format!("{stamp}_{base}.json")
        } else {
            format!("{base}_{stamp}.json")
        })
    }
}

impl ExportSink for JsonExport {
    fn export(&mut self, record: &MatchRecord) -> Result<PathBuf, ExportError> {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        fs::create_dir_all(&self.settings.directory)?;
        let path = self.settings.directory.join(self.file_name(record, now)?);

        let mut rows: Vec<ExportRow> = if path.exists() {
            serde_json::from_str(&fs::read_to_string(&path)?)?
        } else {
            Vec::new()
        };
        rows.push(ExportRow::from_record(record, &self.machine_name));
        fs::write(&path, serde_json::to_string_pretty(&rows)?)?;
        debug!(path = %path.display(), rows = rows.len(), "match exported");
        Ok(path)
    }
}

fn file_stamp(now: OffsetDateTime) -> Result<String, ExportError> {
    let format =
        format_description::parse("[year][month][day][hour][minute][second][subsecond digits:3]")
            .map_err(|e| ExportError::Timestamp(e.to_string()))?;
    now.format(&format)
        .map_err(|e| ExportError::Timestamp(e.to_string()))
}

fn sanitize(label: &str) -> String {
    label.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
}

fn machine_name() -> String {
    std::env::var("HOSTNAME")
        .or_else(|_| std::env::var("COMPUTERNAME"))
        .unwrap_or_else(|_| "unknown".to_string())
}
