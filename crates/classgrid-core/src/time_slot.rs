use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{
  Deserialize,
  Serialize
};

/// Wall-clock span inside a single day,
/// in minutes since midnight.
///
/// Parsing does not enforce
/// `end > start`; such spans are
/// *degenerate* and are treated as empty:
/// they overlap nothing, not even an
/// identical degenerate span.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
)]
pub struct TimeInterval {
  pub start: u32,
  pub end:   u32
}

impl TimeInterval {
  #[must_use]
  pub fn new(
    start: u32,
    end: u32
  ) -> Self {
    Self { start, end }
  }

  #[must_use]
  pub fn is_degenerate(&self) -> bool {
    self.end <= self.start
  }

  /// Minutes covered; zero for
  /// degenerate spans.
  #[must_use]
  pub fn duration(&self) -> u32 {
    self.end.saturating_sub(self.start)
  }

  /// Strict overlap: spans that only
  /// touch at an endpoint do not overlap.
  #[must_use]
  pub fn overlaps(
    &self,
    other: &TimeInterval
  ) -> bool {
    if self.is_degenerate()
      || other.is_degenerate()
    {
      return false;
    }
    self.start < other.end
      && self.end > other.start
  }
}

impl fmt::Display for TimeInterval {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    write!(
      f,
      "{:02}:{:02}-{:02}:{:02}",
      self.start / 60,
      self.start % 60,
      self.end / 60,
      self.end % 60
    )
  }
}

fn time_slot_regex() -> Option<&'static Regex>
{
  static TIME_SLOT_RE: OnceLock<
    Option<Regex>
  > = OnceLock::new();
  TIME_SLOT_RE
    .get_or_init(|| {
      Regex::new(
        r"^(?P<sh>\d{1,2}):(?P<sm>\d{2})\s*-\s*(?P<eh>\d{1,2}):(?P<em>\d{2})$",
      )
      .map_err(|error| {
        tracing::error!(%error, "time slot regex failed to compile");
      })
      .ok()
    })
    .as_ref()
}

/// Parses `HH:MM-HH:MM` into minutes
/// since midnight.
///
/// Returns `None` for anything that is
/// not a valid slot; callers drop such
/// classes from the timetable.
#[must_use]
pub fn parse_time_slot(
  raw: &str
) -> Option<TimeInterval> {
  let captures = time_slot_regex()?
    .captures(raw.trim())?;

  let start = clock_minutes(
    captures.name("sh")?.as_str(),
    captures.name("sm")?.as_str()
  )?;
  let end = clock_minutes(
    captures.name("eh")?.as_str(),
    captures.name("em")?.as_str()
  )?;

  Some(TimeInterval { start, end })
}

fn clock_minutes(
  hour: &str,
  minute: &str
) -> Option<u32> {
  let hour = hour.parse::<u32>().ok()?;
  let minute =
    minute.parse::<u32>().ok()?;
  if hour > 23 || minute > 59 {
    return None;
  }
  Some(hour * 60 + minute)
}
