//! Result rendering: plain text or JSON.

use anyhow::Result;
use serde::Serialize;

use rotator_core::{GenerationIndex, SimulationStep};
use rotator_vault::{HeldArchive, RotationOutcome};

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    #[must_use]
    pub fn from_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Text
        }
    }
}

/// Render a rotation outcome. `None` means the input was missing and ignored.
///
/// Text output is empty for a completed rotation; progress is logged instead.
pub fn format_outcome(outcome: Option<&RotationOutcome>, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(&outcome),
        OutputFormat::Text => Ok(match outcome {
            Some(outcome) if outcome.dry_run => {
                let mut out = format!(
                    "would move {} -> {} (rotation_id={}, slot={})\n",
                    outcome.source.display(),
                    outcome.destination.display(),
                    outcome.decision.generation,
                    outcome.decision.slot
                );
                for path in &outcome.removed {
                    out.push_str(&format!("would remove {}\n", path.display()));
                }
                out
            }
            _ => String::new(),
        }),
    }
}

/// Render the current rotation set.
pub fn format_held(held: &[HeldArchive], format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return to_json(&held);
    }
    if held.is_empty() {
        return Ok("(no archives)\n".to_string());
    }
    let rows: Vec<[String; 4]> = held
        .iter()
        .map(|h| {
            [
                h.file.generation.to_string(),
                h.slot.to_string(),
                h.file.stamped_at.to_string(),
                h.file.path.display().to_string(),
            ]
        })
        .collect();
    Ok(table(["rotation_id", "slot", "stamped_at", "path"], &rows))
}

/// Render a simulated schedule.
pub fn format_simulation(steps: &[SimulationStep], format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return to_json(&steps);
    }
    let rows: Vec<[String; 4]> = steps
        .iter()
        .map(|step| {
            [
                step.decision.generation.to_string(),
                step.decision.slot.to_string(),
                join(step.decision.evict.iter().copied()),
                join(step.held.iter().copied()),
            ]
        })
        .collect();
    Ok(table(["rotation_id", "slot", "evict", "held"], &rows))
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}

fn join(ids: impl Iterator<Item = GenerationIndex>) -> String {
    let parts: Vec<String> = ids.map(|id| id.to_string()).collect();
    if parts.is_empty() {
        "-".to_string()
    } else {
        parts.join(",")
    }
}

fn table<const N: usize>(header: [&str; N], rows: &[[String; N]]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.len()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.len());
        }
    }

    let mut out = String::new();
    let header: Vec<String> = header.iter().map(ToString::to_string).collect();
    for row in std::iter::once(header.as_slice()).chain(rows.iter().map(|r| r.as_slice())) {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    }
    out
}
