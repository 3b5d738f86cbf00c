//! Drives the colwm core from a script of display events instead of a display, printing every
//! action the core asks for. See `colwm::replay` for the script format.
use anyhow::{Context, Result};
use clap::{arg, command, value_parser, ArgMatches};
use colwm::{Config, ReplayDisplayServer, ReplayHandle};
use colwm_core::{ExitReason, Manager};

fn main() -> Result<()> {
    colwm::utils::log::setup_logging();
    let matches = get_command().get_matches();
    let config = config_from(&matches);
    tracing::debug!("replaying with {:?}", config);

    let rt = tokio::runtime::Builder::new_current_thread()
        .build()
        .context("couldn't init Tokio runtime")?;

    let mut manager = Manager::<ReplayHandle, Config, ReplayDisplayServer>::new(config)
        .context("couldn't start the replay display server")?;
    manager.register_child_hook();
    let reason = rt.block_on(manager.start_event_loop());
    tracing::info!("replay completed: {:?}", reason);

    if matches.get_flag("dump-state") {
        let state = serde_json::to_string_pretty(&manager.state)
            .context("couldn't serialize the final state")?;
        eprintln!("{state}");
    }
    if reason == ExitReason::Restart {
        tracing::info!("restart requested, nothing to restart in a replay");
    }
    Ok(())
}

fn get_command() -> clap::Command {
    command!("colwm replay")
        .about("Replays display events read from $COLWM_REPLAY or stdin against the colwm core")
        .help_template(colwm::utils::get_help_template())
        .args(&[
            arg!(-c --columns <COUNT> "Number of columns")
                .value_parser(value_parser!(usize))
                .required(false),
            arg!(-t --titlebar <PIXELS> "Titlebar height")
                .value_parser(value_parser!(i32))
                .required(false),
            arg!(--hspacing <PIXELS> "Gap between columns")
                .value_parser(value_parser!(i32))
                .required(false),
            arg!(--vspacing <PIXELS> "Gap between the panes of a column")
                .value_parser(value_parser!(i32))
                .required(false),
            arg!(--"double-click" <MILLIS> "Double click threshold")
                .value_parser(value_parser!(u64))
                .required(false),
            arg!(--"dump-state" "Print the final layout as JSON on stderr"),
        ])
}

fn config_from(matches: &ArgMatches) -> Config {
    let mut config = Config::default();
    if let Some(columns) = matches.get_one::<usize>("columns") {
        config.column_count = *columns;
    }
    if let Some(titlebar) = matches.get_one::<i32>("titlebar") {
        config.titlebar_height = *titlebar;
    }
    if let Some(hspacing) = matches.get_one::<i32>("hspacing") {
        config.horizontal_spacing = *hspacing;
    }
    if let Some(vspacing) = matches.get_one::<i32>("vspacing") {
        config.vertical_spacing = *vspacing;
    }
    if let Some(ms) = matches.get_one::<u64>("double-click") {
        config.double_click_ms = *ms;
    }
    config
}
