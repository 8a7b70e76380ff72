//! Arena results storage and reporting

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::match_runner::MatchResult;

#[derive(Error, Debug)]
pub enum ResultsError {
    #[error("failed to serialize results: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to access results file: {0}")]
    Io(#[from] std::io::Error),
}

/// Complete arena results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArenaResults {
    /// Name/description of the run
    pub name: String,
    /// Participating strategies
    pub participants: Vec<String>,
    /// All match results
    pub matches: Vec<MatchEntry>,
    /// Configuration used
    pub settings: ArenaSettings,
}

/// A single match entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchEntry {
    pub first: String,
    pub second: String,
    pub result: MatchResult,
}

/// Settings recorded alongside the results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaSettings {
    pub games_per_match: u32,
    pub search_depth: u8,
    pub max_turns: u32,
    pub level_id: Option<u32>,
    pub seed: Option<u64>,
}

impl Default for ArenaSettings {
    fn default() -> Self {
        Self {
            games_per_match: 10,
            search_depth: 3,
            max_turns: 100,
            level_id: None,
            seed: None,
        }
    }
}

impl ArenaResults {
    pub fn new(name: &str, participants: Vec<String>, settings: ArenaSettings) -> Self {
        Self {
            name: name.to_string(),
            participants,
            matches: Vec::new(),
            settings,
        }
    }

    /// Add a match result
    pub fn add_match(&mut self, first: &str, second: &str, result: MatchResult) {
        self.matches.push(MatchEntry {
            first: first.to_string(),
            second: second.to_string(),
            result,
        });
    }

    /// Save results to JSON file
    pub fn save(&self, path: &Path) -> Result<(), ResultsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load results from JSON file
    pub fn load(path: &Path) -> Result<Self, ResultsError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Generate a text report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();
        report.push_str(&format!("=== Arena: {} ===\n\n", self.name));
        report.push_str(&format!("Participants: {}\n", self.participants.join(", ")));
        report.push_str(&format!(
            "Settings: {} games/match, depth {}, {} turns max",
            self.settings.games_per_match, self.settings.search_depth, self.settings.max_turns
        ));
        if let Some(id) = self.settings.level_id {
            report.push_str(&format!(", level {id}"));
        }
        report.push_str("\n\n");

        report.push_str("Results:\n");
        report.push_str(&format!(
            "{:<16} vs {:<16} {:>5}-{:<5}-{:<5} {:>6}\n",
            "First", "Second", "W", "L", "D", "Score"
        ));
        report.push_str(&"-".repeat(64));
        report.push('\n');

        for entry in &self.matches {
            report.push_str(&format!(
                "{:<16} vs {:<16} {:>5}-{:<5}-{:<5} {:>5.1}%\n",
                entry.first,
                entry.second,
                entry.result.wins,
                entry.result.losses,
                entry.result.draws,
                entry.result.score() * 100.0
            ));
        }

        report
    }

    /// Print report to stdout
    pub fn print_report(&self) {
        println!("{}", self.generate_report());
    }
}
