pub mod class;
pub mod cli;
pub mod color;
pub mod columns;
pub mod commands;
pub mod config;
pub mod geometry;
pub mod layout;
pub mod overlap;
pub mod render;
pub mod time_slot;
pub mod view;

use std::ffi::OsString;

use clap::Parser;
use tracing::{
  debug,
  info
};

#[tracing::instrument(skip_all)]
pub fn run(
  raw_args: Vec<OsString>
) -> anyhow::Result<()> {
  let cli =
    cli::GlobalCli::parse_from(raw_args);

  cli::init_tracing(
    cli.verbose,
    cli.quiet
  )?;

  info!(
    verbose = cli.verbose,
    quiet = cli.quiet,
    "starting classgrid"
  );
  debug!(overrides = cli.rc_overrides.len(), "parsed rc overrides");

  let mut settings =
    config::Settings::load(
      cli.config.as_deref()
    )?;
  settings.apply_overrides(
    cli
      .rc_overrides
      .into_iter()
      .map(|kv| (kv.key, kv.value))
  )?;

  let renderer = render::Renderer::new(
    &settings.render
  );

  commands::dispatch(
    &settings,
    &renderer,
    cli.command
  )?;

  info!("done");
  Ok(())
}
