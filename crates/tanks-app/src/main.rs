use std::io::BufRead;

use anyhow::Context;
use tracing::{info, warn};

use tanks_app::console::{self, ConsoleAction};
use tanks_app::game_loop::LoopOptions;
use tanks_app::logger;
use tanks_app::settings::AppSettings;
use tanks_app::skirmish::Skirmish;
use tanks_app::state::{AppState, GameLoopCommand};
use tanks_sim::export::JsonExport;
use tanks_sim::MatchController;

fn main() -> anyhow::Result<()> {
    let mut settings = AppSettings::from_env()?;
    if let Some(path) = std::env::args_os().nth(1) {
        settings = settings.with_config_file(path);
    }
    logger::init_logger(settings.log_to_file)?;

    let config = settings.match_config()?;
    let seed = config.seed;
    let mut controller = MatchController::with_arena(config).context("setting up the arena")?;
    if let Some(path) = &settings.export_config {
        match JsonExport::from_config_file(path) {
            Ok(sink) => controller = controller.with_export(Box::new(sink)),
            Err(err) => {
                warn!(%err, path = %path.display(), "export disabled");
                controller.mark_export_unavailable(&err.to_string());
            }
        }
    }

    let options = LoopOptions {
        auto_continue: settings.auto_continue,
        skirmish: settings.skirmish.then(|| Skirmish::new(seed)),
    };
    let state = AppState::new();
    console::start_match(&state, controller, options)?;
    info!(variant = ?settings.variant, "match started; enter to continue, q to quit");

    for line in std::io::stdin().lock().lines() {
        let line = line.context("reading stdin")?;
        match console::parse_line(&line) {
            Ok(ConsoleAction::Command(cmd)) => console::send_command(&state, GameLoopCommand::Match(cmd))?,
            Ok(ConsoleAction::Status) => {
                if let Some(snapshot) = console::get_snapshot(&state)? {
                    println!("{}", console::format_status(&snapshot));
                }
            }
            Ok(ConsoleAction::Quit) => break,
            Err(err) => println!("{err:#}"),
        }
    }

    // The loop may already have stopped on its own.
    let _ = console::send_command(&state, GameLoopCommand::Shutdown);
    Ok(())
}
