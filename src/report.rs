use ansi_term::Colour::{Green, Yellow};
use ansi_term::Style;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::io;

/// Why a structure was passed over
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingSerialize,
    MissingDeserialize,
    MissingBoth,
}

impl SkipReason {
    fn describe(&self) -> &'static str {
        match self {
            SkipReason::MissingSerialize => "missing serialize marker",
            SkipReason::MissingDeserialize => "missing deserialize marker",
            SkipReason::MissingBoth => "missing both markers",
        }
    }
}

/// What the pipeline decided for one structure under one target
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct StructureOutcome {
    pub target: String,
    pub structure: String,
    /// None means code was generated
    pub skip_reason: Option<SkipReason>,
}

/// Everything one pipeline run decided, in decision order.
///
/// The report is a plain value: hosts can render it for a terminal with
/// [`GenerationReport::render_human`], or persist it as JSON for other
/// tooling with [`GenerationReport::write_json`].
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub translation_unit: String,
    pub outcomes: Vec<StructureOutcome>,
}

impl GenerationReport {
    pub fn new(translation_unit: &str) -> Self {
        Self {
            translation_unit: translation_unit.to_string(),
            outcomes: Vec::new(),
        }
    }

    pub(crate) fn record_generated(&mut self, target: &str, structure: &str) {
        self.outcomes.push(StructureOutcome {
            target: target.to_string(),
            structure: structure.to_string(),
            skip_reason: None,
        });
    }

    pub(crate) fn record_skipped(&mut self, target: &str, structure: &str, reason: SkipReason) {
        self.outcomes.push(StructureOutcome {
            target: target.to_string(),
            structure: structure.to_string(),
            skip_reason: Some(reason),
        });
    }

    pub fn generated_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.skip_reason.is_none())
            .count()
    }

    pub fn skipped_count(&self) -> usize {
        self.outcomes.len() - self.generated_count()
    }

    /// Renders a colored summary for terminals
    pub fn render_human(&self) -> String {
        let mut text = String::new();

        let heading = format!("sergen: {}", self.translation_unit);
        let _ = writeln!(text, "{}", Style::new().bold().paint(heading));

        for outcome in &self.outcomes {
            match &outcome.skip_reason {
                None => {
                    let _ = writeln!(
                        text,
                        "  {} {} ({})",
                        Green.paint("generated"),
                        outcome.structure,
                        outcome.target
                    );
                }
                Some(reason) => {
                    let _ = writeln!(
                        text,
                        "  {} {} ({}): {}",
                        Yellow.paint("skipped"),
                        outcome.structure,
                        outcome.target,
                        reason.describe()
                    );
                }
            }
        }

        let _ = writeln!(
            text,
            "{} generated, {} skipped",
            self.generated_count(),
            self.skipped_count()
        );
        text
    }

    /// Persists the report as pretty JSON for downstream tooling
    pub fn write_json(&self, out: &mut dyn io::Write) -> Result<()> {
        serde_json::to_writer_pretty(out, self)
            .context("Failed to serialize generation report")?;
        Ok(())
    }
}
