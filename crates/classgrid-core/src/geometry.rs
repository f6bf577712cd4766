use chrono::Weekday;
use serde::{
  Deserialize,
  Serialize
};

use crate::time_slot::TimeInterval;

pub const BASE_Z_INDEX: i32 = 10;

fn grid_default_start_hour() -> u32 {
  8
}

fn grid_default_end_hour() -> u32 {
  19
}

fn grid_default_hour_height() -> f64 {
  80.0
}

fn grid_default_gutter() -> f64 {
  4.0
}

fn grid_default_days() -> Vec<Weekday>
{
  vec![
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
  ]
}

/// Shape of the weekly grid: which
/// hours and days are drawn and how many
/// pixels an hour takes.
#[derive(
  Debug, Clone, PartialEq, Serialize,
  Deserialize,
)]
#[serde(deny_unknown_fields)]
pub struct GridSettings {
  #[serde(
    default = "grid_default_start_hour"
  )]
  pub start_hour:  u32,
  #[serde(
    default = "grid_default_end_hour"
  )]
  pub end_hour:    u32,
  #[serde(
    default = "grid_default_hour_height"
  )]
  pub hour_height: f64,
  #[serde(
    default = "grid_default_gutter"
  )]
  pub gutter:      f64,
  #[serde(
    default = "grid_default_days",
    with = "weekday_list"
  )]
  pub days:        Vec<Weekday>
}

impl Default for GridSettings {
  fn default() -> Self {
    Self {
      start_hour:  grid_default_start_hour(
      ),
      end_hour:    grid_default_end_hour(),
      hour_height:
        grid_default_hour_height(),
      gutter:      grid_default_gutter(),
      days:        grid_default_days()
    }
  }
}

/// Horizontal ruling of the time column.
#[derive(
  Debug, Clone, PartialEq, Serialize,
)]
pub struct HourMark {
  pub hour:  u32,
  pub label: String,
  pub top:   f64
}

/// Where a class block sits inside its
/// day column. `top`/`height` are pixels,
/// `left`/`width` percentages of the
/// column.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Serialize,
)]
pub struct BlockRect {
  pub top:     f64,
  pub height:  f64,
  pub left:    f64,
  pub width:   f64,
  pub z_index: i32
}

impl GridSettings {
  /// Brings hand-edited values back into
  /// a drawable range.
  pub fn sanitize(&mut self) {
    if self.start_hour > 23 {
      self.start_hour = 23;
    }
    if self.end_hour > 24 {
      self.end_hour = 24;
    }
    if self.end_hour <= self.start_hour {
      self.end_hour = self.start_hour + 1;
    }

    if !self.hour_height.is_finite()
      || self.hour_height <= 0.0
    {
      self.hour_height =
        grid_default_hour_height();
    }
    if !self.gutter.is_finite()
      || self.gutter < 0.0
    {
      self.gutter = 0.0;
    }

    let mut seen = Vec::with_capacity(
      self.days.len()
    );
    self.days.retain(|day| {
      if seen.contains(day) {
        false
      } else {
        seen.push(*day);
        true
      }
    });
    if self.days.is_empty() {
      self.days = grid_default_days();
    }
  }

  /// Drawn hours, capped to one day even
  /// when the settings were never
  /// sanitized.
  fn hour_window(
    &self
  ) -> std::ops::Range<u32> {
    let start = self.start_hour.min(24);
    start..self.end_hour.clamp(start, 24)
  }

  #[must_use]
  pub fn column_height(&self) -> f64 {
    let window = self.hour_window();
    f64::from(window.end - window.start)
      * self.hour_height
  }

  #[must_use]
  pub fn hour_marks(
    &self
  ) -> Vec<HourMark> {
    self
      .hour_window()
      .map(|hour| HourMark {
        hour,
        label: format!("{hour:02}:00"),
        top: f64::from(
          hour - self.start_hour
        ) * self.hour_height
      })
      .collect()
  }

  /// Maps a placed class to its block.
  ///
  /// Positions are not clamped to the
  /// visible window; classes outside it
  /// land above or below the column.
  #[must_use]
  pub fn block_rect(
    &self,
    interval: TimeInterval,
    column: usize,
    column_count: usize
  ) -> BlockRect {
    let day_start =
      f64::from(self.start_hour) * 60.0;
    let top = (f64::from(interval.start)
      - day_start)
      / 60.0
      * self.hour_height;
    let height = if interval.is_degenerate()
    {
      0.0
    } else {
      f64::from(interval.duration()) / 60.0
        * self.hour_height
        - self.gutter
    };

    let width = if column_count > 1 {
      100.0 / column_count as f64
    } else {
      100.0
    };
    let left = column as f64 * width;

    BlockRect {
      top,
      height,
      left,
      width,
      z_index: BASE_Z_INDEX
        .saturating_add(
          i32::try_from(column)
            .unwrap_or(i32::MAX)
        )
    }
  }
}

pub mod weekday_list {
  use chrono::Weekday;
  use serde::{
    Deserialize,
    Deserializer,
    Serializer
  };

  use crate::class::{
    parse_weekday,
    weekday_name
  };

  pub fn serialize<S>(
    days: &[Weekday],
    serializer: S
  ) -> Result<S::Ok, S::Error>
  where
    S: Serializer
  {
    serializer.collect_seq(
      days.iter().map(|day| {
        weekday_name(*day)
      })
    )
  }

  pub fn deserialize<'de, D>(
    deserializer: D
  ) -> Result<Vec<Weekday>, D::Error>
  where
    D: Deserializer<'de>
  {
    let raw = Vec::<String>::deserialize(
      deserializer
    )?;
    raw
      .iter()
      .map(|name| {
        parse_weekday(name).ok_or_else(
          || {
            serde::de::Error::custom(
              format!(
                "unknown weekday: \
                 {name}"
              )
            )
          }
        )
      })
      .collect()
  }
}
