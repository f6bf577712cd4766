use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, anyhow};
use tracing::{debug, info};

use crate::class::ClassRecord;
use crate::cli::Command;
use crate::color::SubjectColor;
use crate::config::{OutputFormat, Settings};
use crate::layout::layout_week;
use crate::render::Renderer;
use crate::time_slot::parse_time_slot;

pub fn dispatch(settings: &Settings, renderer: &Renderer, command: Command) -> anyhow::Result<()> {
    debug!(?command, "dispatching command");

    match command {
        Command::Layout { input, format } => cmd_layout(settings, renderer, &input, format),
        Command::Color { subject } => cmd_color(renderer, &subject),
        Command::Slot { time_slot } => cmd_slot(renderer, &time_slot),
        Command::Hours => cmd_hours(settings, renderer),
    }
}

fn cmd_layout(
    settings: &Settings,
    renderer: &Renderer,
    input: &Path,
    format: Option<OutputFormat>,
) -> anyhow::Result<()> {
    info!(input = %input.display(), "command layout");
    let classes = load_classes(input)?;
    let layout = layout_week(&classes, &settings.grid);
    renderer.print_week(&layout, format.unwrap_or(settings.render.format))
}

fn cmd_color(renderer: &Renderer, subject: &str) -> anyhow::Result<()> {
    info!("command color");
    let color = SubjectColor::for_subject(Some(subject));
    renderer.print_color(subject, color)
}

fn cmd_slot(renderer: &Renderer, time_slot: &str) -> anyhow::Result<()> {
    info!("command slot");
    renderer.print_slot(time_slot, parse_time_slot(time_slot))
}

fn cmd_hours(settings: &Settings, renderer: &Renderer) -> anyhow::Result<()> {
    info!("command hours");
    renderer.print_hour_marks(&settings.grid.hour_marks(), settings.grid.column_height())
}

/// Reads a class list as the REST layer returns it: a JSON array of class
/// records. `-` reads stdin.
#[tracing::instrument]
pub fn load_classes(input: &Path) -> anyhow::Result<Vec<ClassRecord>> {
    let raw = if input == Path::new("-") {
        let mut stdin = String::new();
        io::stdin()
            .read_to_string(&mut stdin)
            .context("failed reading stdin")?;
        stdin
    } else {
        fs::read_to_string(input).with_context(|| format!("failed to read {}", input.display()))?
    };

    parse_classes(&raw).with_context(|| format!("failed to decode {}", input.display()))
}

pub fn parse_classes(raw: &str) -> anyhow::Result<Vec<ClassRecord>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("empty class list"));
    }
    let classes: Vec<ClassRecord> = serde_json::from_str(trimmed)?;
    debug!(count = classes.len(), "decoded classes");
    Ok(classes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_classes_rejects_empty_and_malformed_input() {
        assert!(parse_classes("   ").is_err());
        assert!(parse_classes("{\"id\": 1}").is_err());
        assert!(parse_classes("[{\"name\": \"no id\"}]").is_err());
    }

    #[test]
    fn parse_classes_accepts_empty_array() {
        assert!(parse_classes("[]").expect("empty list decodes").is_empty());
    }

    #[test]
    fn load_classes_reports_missing_file() {
        let err = load_classes(Path::new("/nonexistent/classgrid/classes.json"))
            .expect_err("missing file fails");
        assert!(format!("{err:#}").contains("failed to read"));
    }
}
