//! Game loop thread: advances the match controller at 30Hz and publishes
//! snapshots.
//!
//! Commands arrive via an `mpsc` channel. The latest snapshot is stored in
//! shared state for polling, and presentation events are written to the log.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use tracing::{error, info, warn};

use tanks_core::commands::MatchCommand;
use tanks_core::constants::TICK_RATE;
use tanks_core::enums::{AlertLevel, PhaseKind};
use tanks_core::events::PresentationEvent;
use tanks_core::state::MatchSnapshot;
use tanks_sim::error::MatchError;
use tanks_sim::MatchController;

use crate::skirmish::Skirmish;
use crate::state::GameLoopCommand;

/// Nominal duration of one tick.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

#[derive(Default)]
pub struct LoopOptions {
    /// Press Continue on the player's behalf in Briefing and Ending.
    pub auto_continue: bool,
    pub skirmish: Option<Skirmish>,
}

/// Spawns the game loop in a new thread and returns its command sender.
pub fn spawn_game_loop(
    controller: MatchController,
    latest_snapshot: Arc<Mutex<Option<MatchSnapshot>>>,
    options: LoopOptions,
) -> std::io::Result<mpsc::Sender<GameLoopCommand>> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    std::thread::Builder::new()
        .name("tanks-game-loop".into())
        .spawn(move || {
            run_game_loop(controller, cmd_rx, &latest_snapshot, options);
        })?;

    Ok(cmd_tx)
}

/// Runs until Shutdown, channel disconnect, or a controller error.
fn run_game_loop(
    mut controller: MatchController,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<MatchSnapshot>>,
    mut options: LoopOptions,
) {
    let mut next_tick_time = Instant::now();
    let mut last_phase = None;

    loop {
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Match(cmd)) => controller.queue_command(cmd),
                Ok(GameLoopCommand::Shutdown) => return,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        match controller.tick() {
            Ok(snapshot) => {
                report(&snapshot);
                if last_phase != Some(snapshot.phase) {
                    last_phase = Some(snapshot.phase);
                    if options.auto_continue
                        && matches!(snapshot.phase, PhaseKind::Briefing | PhaseKind::Ending)
                    {
                        controller.queue_command(MatchCommand::Continue);
                    }
                }
                if let Some(skirmish) = options.skirmish.as_mut() {
                    controller.queue_commands(skirmish.commands(&snapshot));
                }
                if let Ok(mut lock) = latest_snapshot.lock() {
                    *lock = Some(snapshot);
                }
            }
            // The controller falls back to Briefing and waits for continue.
            Err(MatchError::Setup(err)) => {
                warn!(%err, "match setup failed");
                last_phase = None;
            }
            Err(err) => {
                error!(%err, "match controller failed; stopping game loop");
                return;
            }
        }

        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind, reset to avoid a catch-up spiral
            next_tick_time = now;
        }
    }
}

fn report(snapshot: &MatchSnapshot) {
    for event in &snapshot.events {
        match event {
            PresentationEvent::MatchSetup { match_number, title } => {
                info!(match_number, "{}", title.replace('\n', " | "))
            }
            PresentationEvent::RoundBanner { text, .. } => info!("{text}"),
            PresentationEvent::RoundStarted { round } => info!(round, "round started"),
            PresentationEvent::TankDestroyed { tank } => info!(%tank, "tank destroyed"),
            PresentationEvent::TallyChanged { roster, left, tally } => {
                info!(%roster, left, "{tally}")
            }
            PresentationEvent::RoundEnded { round, message, .. } => {
                info!(round, "{}", message.replace('\n', " | "))
            }
            PresentationEvent::MatchEnded { match_number, outcome } => {
                info!(match_number, ?outcome, "match ended")
            }
        }
    }
    for alert in &snapshot.alerts {
        match alert.level {
            AlertLevel::Info => info!(tick = alert.tick, "{}", alert.message),
            AlertLevel::Warning => warn!(tick = alert.tick, "{}", alert.message),
            AlertLevel::Error => error!(tick = alert.tick, "{}", alert.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tanks_core::config::MatchConfig;
    use tanks_core::enums::RoundEndMode;

    fn fast_config() -> MatchConfig {
        MatchConfig::platoon_battle()
            .with_await_start(false)
            .with_round_start_delay(0.0)
            .with_minutes_per_round(0.01)
            .with_round_end(RoundEndMode::AutoAfter { secs: 0.0 })
            .with_num_of_rounds(1)
    }

    fn wait_for(
        snapshot: &Mutex<Option<MatchSnapshot>>,
        pred: impl Fn(&MatchSnapshot) -> bool,
    ) -> bool {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if let Some(snap) = snapshot.lock().unwrap().as_ref() {
                if pred(snap) {
                    return true;
                }
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        false
    }

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::Match(MatchCommand::Continue)).unwrap();
        tx.send(GameLoopCommand::Match(MatchCommand::SetNumOfRounds { rounds: 2 }))
            .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let mut commands = Vec::new();
        while let Ok(cmd) = rx.try_recv() {
            commands.push(cmd);
        }

        assert_eq!(commands.len(), 3);
        assert!(matches!(commands[0], GameLoopCommand::Match(MatchCommand::Continue)));
        assert!(matches!(
            commands[1],
            GameLoopCommand::Match(MatchCommand::SetNumOfRounds { rounds: 2 })
        ));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_loop_publishes_snapshots_and_shuts_down() {
        let controller = MatchController::with_arena(fast_config()).unwrap();
        let latest = Arc::new(Mutex::new(None));
        let tx = spawn_game_loop(controller, Arc::clone(&latest), LoopOptions::default()).unwrap();

        assert!(wait_for(&latest, |s| s.phase == PhaseKind::Playing));
        tx.send(GameLoopCommand::Shutdown).unwrap();
    }

    #[test]
    fn test_timed_round_finishes_match_in_loop() {
        let controller = MatchController::with_arena(fast_config()).unwrap();
        let latest = Arc::new(Mutex::new(None));
        let tx = spawn_game_loop(controller, Arc::clone(&latest), LoopOptions::default()).unwrap();

        // A 0.6s round, the intermission, then the next match is set up.
        assert!(wait_for(&latest, |s| s.match_number >= 2));
        tx.send(GameLoopCommand::Shutdown).unwrap();
    }

    #[test]
    fn test_snapshot_serialization_under_3ms() {
        let mut controller = MatchController::with_arena(MatchConfig::platoon_battle().with_await_start(false))
            .unwrap();
        for _ in 0..100 {
            controller.tick().unwrap();
        }

        let snapshot = controller.tick().unwrap();
        let start = Instant::now();
        let json = serde_json::to_string(&snapshot).unwrap();
        let elapsed = start.elapsed();

        assert!(
            elapsed < Duration::from_millis(3),
            "Snapshot serialization took {:?}, should be <3ms",
            elapsed
        );
        assert!(!json.is_empty());
    }

    #[test]
    fn test_tick_duration_constant() {
        let expected_nanos = 1_000_000_000u64 / 30;
        assert_eq!(TICK_DURATION.as_nanos(), expected_nanos as u128);
    }
}
