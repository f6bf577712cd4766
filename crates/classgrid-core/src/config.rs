use std::fmt;
use std::fs;
use std::path::{
  Path,
  PathBuf
};
use std::str::FromStr;

use anyhow::{
  Context,
  anyhow
};
use serde::{
  Deserialize,
  Serialize
};
use tracing::{
  debug,
  info,
  warn
};

use crate::class::parse_weekday;
use crate::geometry::GridSettings;

const CONFIG_FILE_NAME: &str =
  "classgrid.toml";
const CONFIG_DIR_NAME: &str =
  "classgrid";
const CONFIG_ENV_VAR: &str =
  "CLASSGRID_CONFIG";

#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
  #[default]
  Table,
  Json
}

impl FromStr for OutputFormat {
  type Err = anyhow::Error;

  fn from_str(
    s: &str
  ) -> Result<Self, Self::Err> {
    match s
      .trim()
      .to_ascii_lowercase()
      .as_str()
    {
      | "table" => Ok(Self::Table),
      | "json" => Ok(Self::Json),
      | other => {
        Err(anyhow!(
          "invalid output format: \
           {other}"
        ))
      }
    }
  }
}

impl fmt::Display for OutputFormat {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    match self {
      | Self::Table => {
        f.write_str("table")
      }
      | Self::Json => f.write_str("json")
    }
  }
}

fn render_default_color() -> bool {
  true
}

#[derive(
  Debug,
  Clone,
  PartialEq,
  Serialize,
  Deserialize,
)]
#[serde(deny_unknown_fields)]
pub struct RenderSettings {
  #[serde(
    default = "render_default_color"
  )]
  pub color:  bool,
  #[serde(default)]
  pub format: OutputFormat
}

impl Default for RenderSettings {
  fn default() -> Self {
    Self {
      color:  render_default_color(),
      format: OutputFormat::default()
    }
  }
}

#[derive(
  Debug,
  Clone,
  Default,
  PartialEq,
  Serialize,
  Deserialize,
)]
#[serde(deny_unknown_fields)]
pub struct Settings {
  #[serde(default)]
  pub grid:        GridSettings,
  #[serde(default)]
  pub render:      RenderSettings,
  #[serde(skip)]
  pub loaded_file: Option<PathBuf>
}

impl Settings {
  #[tracing::instrument(skip(
    config_override
  ))]
  pub fn load(
    config_override: Option<&Path>
  ) -> anyhow::Result<Self> {
    let path = resolve_config_path(
      config_override
    );

    let mut settings =
      if let Some(path) = path {
        info!(config = %path.display(), "loading config");
        Self::load_file(&path)?
      } else {
        warn!(
          "no config file found; \
           using defaults"
        );
        Self::default()
      };

    settings.grid.sanitize();
    Ok(settings)
  }

  #[tracing::instrument]
  pub fn load_file(
    path: &Path
  ) -> anyhow::Result<Self> {
    let path = expand_tilde(path);
    let text =
      fs::read_to_string(&path)
        .with_context(|| {
          format!(
            "failed to read {}",
            path.display()
          )
        })?;

    let mut settings =
      toml::from_str::<Settings>(&text)
        .with_context(|| {
          format!(
            "invalid config file {}",
            path.display()
          )
        })?;
    settings.loaded_file = Some(path);
    Ok(settings)
  }

  /// Applies `key=value` overrides on
  /// top of the loaded file. Keys may
  /// carry an `rc.` prefix.
  #[tracing::instrument(skip(
    self, overrides
  ))]
  pub fn apply_overrides<I>(
    &mut self,
    overrides: I
  ) -> anyhow::Result<()>
  where
    I: IntoIterator<
      Item = (String, String)
    >
  {
    for (k, v) in overrides {
      let key = k
        .strip_prefix("rc.")
        .unwrap_or(&k)
        .trim()
        .to_string();
      let value = v.trim();
      debug!(key = %key, value = %value, "applying override");

      match key.as_str() {
        | "grid.start_hour" => {
          self.grid.start_hour =
            parse_number(&key, value)?;
        }
        | "grid.end_hour" => {
          self.grid.end_hour =
            parse_number(&key, value)?;
        }
        | "grid.hour_height" => {
          self.grid.hour_height =
            parse_number(&key, value)?;
        }
        | "grid.gutter" => {
          self.grid.gutter =
            parse_number(&key, value)?;
        }
        | "grid.days" => {
          self.grid.days =
            parse_day_list(value)?;
        }
        | "render.color" => {
          self.render.color =
            parse_bool(value)
              .ok_or_else(|| {
                anyhow!(
                  "invalid color \
                   setting: {value}"
                )
              })?;
        }
        | "render.format" => {
          self.render.format =
            value.parse()?;
        }
        | other => {
          return Err(anyhow!(
            "unknown config key: \
             {other}"
          ));
        }
      }
    }

    self.grid.sanitize();
    Ok(())
  }
}

fn resolve_config_path(
  override_path: Option<&Path>
) -> Option<PathBuf> {
  if let Some(path) = override_path {
    return Some(path.to_path_buf());
  }

  if let Ok(raw) =
    std::env::var(CONFIG_ENV_VAR)
  {
    let trimmed = raw.trim();
    if trimmed == "/dev/null" {
      return None;
    }
    if !trimmed.is_empty() {
      return Some(PathBuf::from(
        trimmed
      ));
    }
  }

  let candidate = dirs::config_dir()?
    .join(CONFIG_DIR_NAME)
    .join(CONFIG_FILE_NAME);
  if candidate.exists() {
    return Some(candidate);
  }

  debug!(candidate = %candidate.display(), "default config file absent");
  None
}

fn parse_number<T>(
  key: &str,
  value: &str
) -> anyhow::Result<T>
where
  T: FromStr,
  T::Err: std::error::Error
    + Send
    + Sync
    + 'static
{
  value.parse::<T>().with_context(
    || {
      format!(
        "invalid value for {key}: \
         {value}"
      )
    }
  )
}

fn parse_day_list(
  value: &str
) -> anyhow::Result<Vec<chrono::Weekday>>
{
  value
    .split(',')
    .map(str::trim)
    .filter(|name| !name.is_empty())
    .map(|name| {
      parse_weekday(name).ok_or_else(
        || {
          anyhow!(
            "unknown weekday: {name}"
          )
        }
      )
    })
    .collect()
}

fn expand_tilde(
  path: &Path
) -> PathBuf {
  let text = path.to_string_lossy();
  if let Some(rest) =
    text.strip_prefix("~/")
    && let Some(home) = dirs::home_dir()
  {
    return home.join(rest);
  }
  path.to_path_buf()
}

fn parse_bool(s: &str) -> Option<bool> {
  match s
    .trim()
    .to_ascii_lowercase()
    .as_str()
  {
    | "1" | "y" | "yes" | "on"
    | "true" => Some(true),
    | "0" | "n" | "no" | "off"
    | "false" => Some(false),
    | _ => None
  }
}
