use std::io::{self, IsTerminal, Write};

use unicode_width::UnicodeWidthStr;

use crate::class::weekday_name;
use crate::color::SubjectColor;
use crate::config::{OutputFormat, RenderSettings};
use crate::geometry::HourMark;
use crate::layout::{DayLayout, WeekLayout};
use crate::time_slot::TimeInterval;

#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(settings: &RenderSettings) -> Self {
        Self {
            color: settings.color && io::stdout().is_terminal(),
        }
    }

    /// Renderer that never emits escape codes, for writing into buffers.
    pub fn plain() -> Self {
        Self { color: false }
    }

    #[tracing::instrument(skip(self, layout))]
    pub fn print_week(&self, layout: &WeekLayout, format: OutputFormat) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        self.write_week(&mut out, layout, format)
    }

    pub fn write_week<W: Write>(
        &self,
        mut writer: W,
        layout: &WeekLayout,
        format: OutputFormat,
    ) -> anyhow::Result<()> {
        match format {
            OutputFormat::Json => {
                serde_json::to_writer_pretty(&mut writer, layout)?;
                writeln!(writer)?;
            }
            OutputFormat::Table => {
                for (idx, day) in layout.days.iter().enumerate() {
                    if idx > 0 {
                        writeln!(writer)?;
                    }
                    self.write_day(&mut writer, day)?;
                }
            }
        }
        Ok(())
    }

    fn write_day<W: Write>(&self, mut writer: W, day: &DayLayout) -> anyhow::Result<()> {
        writeln!(writer, "{}", self.paint(weekday_name(day.day), "1"))?;
        if day.blocks.is_empty() {
            writeln!(writer, "  no classes")?;
            return Ok(());
        }

        let headers = [
            "ID", "Time", "Class", "Subject", "Teacher", "Seats", "Col", "Top", "Height", "Left",
            "Width", "Color",
        ]
        .iter()
        .map(|header| header.to_string())
        .collect::<Vec<_>>();

        let rows = day
            .blocks
            .iter()
            .map(|block| {
                vec![
                    self.paint(&block.id.to_string(), "33"),
                    block.time_slot.to_string(),
                    block.name.clone(),
                    self.paint_color(block.subject.as_deref().unwrap_or_default(), block.color),
                    block.teacher_name.clone().unwrap_or_default(),
                    block.enrollment.clone().unwrap_or_default(),
                    format!("{}/{}", block.column + 1, block.column_count),
                    format!("{:.1}", block.rect.top),
                    format!("{:.1}", block.rect.height),
                    format!("{:.1}%", block.rect.left),
                    format!("{:.1}%", block.rect.width),
                    block.color.to_string(),
                ]
            })
            .collect::<Vec<_>>();

        write_table(&mut writer, headers, rows)
    }

    pub fn print_hour_marks(&self, marks: &[HourMark], column_height: f64) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        self.write_hour_marks(&mut out, marks, column_height)
    }

    pub fn write_hour_marks<W: Write>(
        &self,
        mut writer: W,
        marks: &[HourMark],
        column_height: f64,
    ) -> anyhow::Result<()> {
        let headers = vec!["Hour".to_string(), "Top".to_string()];
        let rows = marks
            .iter()
            .map(|mark| vec![mark.label.clone(), format!("{:.1}", mark.top)])
            .collect::<Vec<_>>();
        write_table(&mut writer, headers, rows)?;
        writeln!(writer, "column height {column_height:.1}")?;
        Ok(())
    }

    pub fn print_color(&self, subject: &str, color: SubjectColor) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        let swatch = self.paint_color("■", color);
        writeln!(out, "{swatch} {color}  {subject}")?;
        Ok(())
    }

    pub fn print_slot(&self, raw: &str, interval: Option<TimeInterval>) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        self.write_slot(&mut out, raw, interval)
    }

    /// Start and end are minutes since midnight.
    pub fn write_slot<W: Write>(
        &self,
        mut writer: W,
        raw: &str,
        interval: Option<TimeInterval>,
    ) -> anyhow::Result<()> {
        match interval {
            Some(interval) if interval.is_degenerate() => writeln!(
                writer,
                "{}-{} {}",
                interval.start,
                interval.end,
                self.paint("(ends before it starts; never overlaps)", "33")
            )?,
            Some(interval) => writeln!(
                writer,
                "{}-{} ({} min)",
                interval.start,
                interval.end,
                interval.duration()
            )?,
            None => writeln!(writer, "{} {raw:?}", self.paint("not a valid time slot:", "31"))?,
        }
        Ok(())
    }

    fn paint_color(&self, text: &str, color: SubjectColor) -> String {
        self.paint(text, &color.ansi_code())
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if !self.color || text.is_empty() {
            return text.to_string();
        }
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

fn write_table<W: Write>(
    mut writer: W,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
) -> anyhow::Result<()> {
    let column_count = headers.len();
    let mut widths = vec![0usize; column_count];

    for (idx, header) in headers.iter().enumerate() {
        widths[idx] = widths[idx].max(UnicodeWidthStr::width(header.as_str()));
    }

    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(UnicodeWidthStr::width(strip_ansi(cell).as_str()));
        }
    }

    for idx in 0..column_count {
        write!(writer, "{:width$} ", headers[idx], width = widths[idx])?;
    }
    writeln!(writer)?;

    for idx in 0..column_count {
        write!(writer, "{:-<width$} ", "", width = widths[idx])?;
    }
    writeln!(writer)?;

    for row in rows {
        for idx in 0..column_count {
            let cell = &row[idx];
            let visible_width = UnicodeWidthStr::width(strip_ansi(cell).as_str());
            let padding = widths[idx].saturating_sub(visible_width);
            write!(writer, "{}{} ", cell, " ".repeat(padding))?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut escaped = false;

    for ch in s.chars() {
        if escaped {
            if ch == 'm' {
                escaped = false;
            }
            continue;
        }

        if ch == '\x1b' {
            escaped = true;
            continue;
        }

        out.push(ch);
    }

    out
}
