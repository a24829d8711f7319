//! Console front end.
//!
//! Bridges lines typed on stdin to the game loop thread, the way a UI would
//! bridge button presses.

use anyhow::{anyhow, bail, Context};

use tanks_core::commands::MatchCommand;
use tanks_core::state::MatchSnapshot;
use tanks_core::types::RosterId;
use tanks_sim::MatchController;

use crate::game_loop::{self, LoopOptions};
use crate::state::{AppState, GameLoopCommand};

/// What a console line asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleAction {
    Command(MatchCommand),
    Status,
    Quit,
}

/// Start the match. Spawns the game loop thread if not already running.
pub fn start_match(state: &AppState, controller: MatchController, options: LoopOptions) -> anyhow::Result<()> {
    let mut running = state.running.lock().map_err(|e| anyhow!("{e}"))?;
    if *running {
        bail!("match already running");
    }

    let cmd_tx = game_loop::spawn_game_loop(controller, state.latest_snapshot.clone(), options)
        .context("spawning game loop thread")?;

    let mut tx_lock = state.command_tx.lock().map_err(|e| anyhow!("{e}"))?;
    *tx_lock = Some(cmd_tx);
    *running = true;
    Ok(())
}

/// Forward a command to the game loop thread.
pub fn send_command(state: &AppState, command: GameLoopCommand) -> anyhow::Result<()> {
    let tx_lock = state.command_tx.lock().map_err(|e| anyhow!("{e}"))?;
    match tx_lock.as_ref() {
        Some(tx) => tx
            .send(command)
            .map_err(|e| anyhow!("failed to send command: {e}")),
        None => bail!("match not started"),
    }
}

pub fn get_snapshot(state: &AppState) -> anyhow::Result<Option<MatchSnapshot>> {
    let lock = state.latest_snapshot.lock().map_err(|e| anyhow!("{e}"))?;
    Ok(lock.clone())
}

/// Parse one console line.
///
/// An empty line or `c` continues, `q` quits, `s` prints the standings.
/// Options: `rounds N`, `minutes M`, `size ROSTER N`, `team ROSTER N`.
pub fn parse_line(line: &str) -> anyhow::Result<ConsoleAction> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(ConsoleAction::Command(MatchCommand::Continue));
    };

    let action = match head.to_ascii_lowercase().as_str() {
        "c" | "continue" => ConsoleAction::Command(MatchCommand::Continue),
        "q" | "quit" => ConsoleAction::Quit,
        "s" | "status" => ConsoleAction::Status,
        "rounds" => ConsoleAction::Command(MatchCommand::SetNumOfRounds {
            rounds: next_arg(&mut words, head, "count")?.parse().context("rounds")?,
        }),
        "minutes" => ConsoleAction::Command(MatchCommand::SetMinutesPerRound {
            minutes: next_arg(&mut words, head, "minutes")?.parse().context("minutes")?,
        }),
        "size" => {
            let roster = RosterId(next_arg(&mut words, head, "roster")?.parse().context("roster")?);
            let size = next_arg(&mut words, head, "size")?.parse().context("size")?;
            ConsoleAction::Command(MatchCommand::SetRosterSize { roster, size })
        }
        "team" => {
            let roster = RosterId(next_arg(&mut words, head, "roster")?.parse().context("roster")?);
            let team = next_arg(&mut words, head, "team")?.parse().context("team")?;
            ConsoleAction::Command(MatchCommand::SetTeamNumber { roster, team })
        }
        other => bail!("unknown command {other:?}"),
    };
    Ok(action)
}

fn next_arg<'a>(
    words: &mut impl Iterator<Item = &'a str>,
    head: &str,
    name: &str,
) -> anyhow::Result<&'a str> {
    words.next().ok_or_else(|| anyhow!("{head}: missing {name}"))
}

/// One-line-per-roster standings for the `s` command.
pub fn format_status(snapshot: &MatchSnapshot) -> String {
    let mut out = format!(
        "match {} round {}/{} {:?}",
        snapshot.match_number, snapshot.round_number, snapshot.num_of_rounds, snapshot.phase
    );
    if let Some(timer) = &snapshot.timer {
        out.push_str(&format!(" {}", timer.text));
    }
    for roster in &snapshot.rosters {
        out.push_str(&format!(
            "\n  {} (team {}): {}/{} left, {:.2} pts, {} wins",
            roster.label, roster.team_number, roster.left, roster.size, roster.accumulated_points, roster.wins
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tanks_core::config::MatchConfig;

    #[test]
    fn test_parse_continue_and_quit() {
        assert_eq!(parse_line("").unwrap(), ConsoleAction::Command(MatchCommand::Continue));
        assert_eq!(parse_line("  c ").unwrap(), ConsoleAction::Command(MatchCommand::Continue));
        assert_eq!(parse_line("Q").unwrap(), ConsoleAction::Quit);
        assert_eq!(parse_line("s").unwrap(), ConsoleAction::Status);
    }

    #[test]
    fn test_parse_options() {
        assert_eq!(
            parse_line("rounds 5").unwrap(),
            ConsoleAction::Command(MatchCommand::SetNumOfRounds { rounds: 5 })
        );
        assert_eq!(
            parse_line("minutes 1.5").unwrap(),
            ConsoleAction::Command(MatchCommand::SetMinutesPerRound { minutes: 1.5 })
        );
        assert_eq!(
            parse_line("size 1 4").unwrap(),
            ConsoleAction::Command(MatchCommand::SetRosterSize { roster: RosterId(1), size: 4 })
        );
        assert_eq!(
            parse_line("team 0 7").unwrap(),
            ConsoleAction::Command(MatchCommand::SetTeamNumber { roster: RosterId(0), team: 7 })
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_line("rounds").is_err());
        assert!(parse_line("rounds many").is_err());
        assert!(parse_line("size 1").is_err());
        assert!(parse_line("fire").is_err());
    }

    #[test]
    fn test_send_before_start_fails() {
        let state = AppState::new();
        assert!(send_command(&state, GameLoopCommand::Shutdown).is_err());
        assert!(get_snapshot(&state).unwrap().is_none());
    }

    #[test]
    fn test_start_twice_fails() {
        let state = AppState::new();
        let config = MatchConfig::platoon_battle();
        start_match(&state, MatchController::with_arena(config.clone()).unwrap(), LoopOptions::default()).unwrap();
        assert!(*state.running.lock().unwrap());

        let again = start_match(&state, MatchController::with_arena(config).unwrap(), LoopOptions::default());
        assert!(again.is_err());
        send_command(&state, GameLoopCommand::Shutdown).unwrap();
    }

    #[test]
    fn test_status_lists_rosters() {
        let mut controller = MatchController::with_arena(MatchConfig::platoon_battle().with_await_start(false)).unwrap();
        let mut snap = controller.tick().unwrap();
        for _ in 0..5 {
            snap = controller.tick().unwrap();
        }
        let status = format_status(&snap);
        assert!(status.starts_with("match 1 round 1/3"));
        assert!(status.contains("Human (team 1): 1/1 left"));
        assert!(status.contains("AI (team 2): 3/3 left"));
    }
}
