//! Match controller: the round/match loop.
//!
//! `MatchController` owns the hecs world, the rosters, the result ledger,
//! the spawn provider and the optional export sink. The host calls
//! `advance(dt)` once per scheduling tick; the controller drains queued
//! commands, feeds the phase machine and runs the entry hooks of every
//! phase it transitions into. Completely headless and deterministic for a
//! given seed and command sequence.

use std::collections::VecDeque;

use hecs::World;
use tracing::{debug, error, info, warn};

use tanks_core::commands::MatchCommand;
use tanks_core::config::{MatchConfig, RosterMembers, ScoringPolicy};
use tanks_core::constants::DT;
use tanks_core::enums::{AlertLevel, MatchOutcome, RoundOutcome};
use tanks_core::error::ConfigError;
use tanks_core::events::{Alert, PresentationEvent};
use tanks_core::state::{MatchSnapshot, TimerView};
use tanks_core::types::{Framing, RosterId, SimTime};
use tanks_rules::clock::timer_view;
use tanks_rules::fsm::{self, Phase, PhaseInput, PhaseStatus, PhaseTiming};
use tanks_rules::scoring::{scoring_for, RosterTally, RoundScoring, Standing};
use tanks_rules::terminal::terminal_reached;

use crate::error::{MatchError, SetupError};
use crate::export::ExportSink;
use crate::ledger::{ResultLedger, TeamEntry, TeamScore};
use crate::presentation::{self, MessageStyle};
use crate::roster::{Roster, TallyObserver};
use crate::spawn::{SpawnProvider, SpawnSurface};
use crate::systems;
use crate::systems::damage::DamageOutcome;

/// Turns roster count changes into tally events.
struct TallyFeed<'a> {
    events: &'a mut Vec<PresentationEvent>,
}

impl TallyObserver for TallyFeed<'_> {
    fn count_changed(&mut self, roster: &Roster) {
        self.events.push(PresentationEvent::TallyChanged {
            roster: roster.id(),
            left: roster.count_left(),
            tally: presentation::tally_line(roster),
        });
    }
}

/// Recount every roster, in registration order.
fn recompute_tallies(
    rosters: &mut [Roster],
    world: &World,
    events: &mut Vec<PresentationEvent>,
) -> Vec<RosterTally> {
    let mut feed = TallyFeed { events };
    rosters
        .iter_mut()
        .map(|r| {
            let left = r.recompute_live_count(world, &mut feed);
            RosterTally {
                roster: r.id(),
                size: r.size(),
                left,
            }
        })
        .collect()
}

fn message_style(policy: &ScoringPolicy) -> MessageStyle {
    match policy {
        ScoringPolicy::PointsProportional { .. } => MessageStyle::Points,
        ScoringPolicy::WinnerTakesRound { .. } => MessageStyle::Knockout,
    }
}

/// The match controller. Owns the ECS world and all match state.
pub struct MatchController {
    config: MatchConfig,
    timing: PhaseTiming,
    scoring: Box<dyn RoundScoring>,
    world: World,
    time: SimTime,
    phase: Phase,
    rosters: Vec<Roster>,
    ledger: ResultLedger,
    ledger_index: Option<usize>,
    spawner: Box<dyn SpawnProvider>,
    export: Option<Box<dyn ExportSink>>,
    export_error: bool,
    /// Set after a failed setup: the next match waits for "continue".
    setup_failed: bool,
    match_number: u32,
    round_number: u32,
    command_queue: VecDeque<MatchCommand>,
    events: Vec<PresentationEvent>,
    alerts: Vec<Alert>,
    info_text: String,
    framing: Option<Framing>,
    last_round: Option<RoundOutcome>,
    match_outcome: Option<MatchOutcome>,
}

impl MatchController {
    /// Create a controller. The configuration is validated up front.
    pub fn new(config: MatchConfig, spawner: Box<dyn SpawnProvider>) -> Result<Self, SetupError> {
        config.validate()?;
        let rosters = config
            .rosters
            .iter()
            .enumerate()
            .map(|(i, rc)| Roster::new(RosterId(i as u8), rc))
            .collect();
        let mut controller = Self {
            timing: PhaseTiming::from(&config),
            scoring: scoring_for(&config.scoring),
            config,
            world: World::new(),
            time: SimTime::default(),
            phase: Phase::Briefing,
            rosters,
            ledger: ResultLedger::new(),
            ledger_index: None,
            spawner,
            export: None,
            export_error: false,
            setup_failed: false,
            match_number: 0,
            round_number: 0,
            command_queue: VecDeque::new(),
            events: Vec::new(),
            alerts: Vec::new(),
            info_text: String::new(),
            framing: None,
            last_round: None,
            match_outcome: None,
        };
        controller.enter_briefing();
        info!(
            scoring = controller.scoring.name(),
            rosters = controller.rosters.len(),
            "match controller ready"
        );
        Ok(controller)
    }

    /// Create a controller spawning onto the default flat arena.
    pub fn with_arena(config: MatchConfig) -> Result<Self, SetupError> {
        let surface = SpawnSurface::arena(config.seed)?;
        Self::new(config, Box::new(surface))
    }

    /// Attach an export sink for finished matches.
    pub fn with_export(mut self, sink: Box<dyn ExportSink>) -> Self {
        self.export = Some(sink);
        self
    }

    /// The export sink could not be configured: show the error indicator.
    pub fn mark_export_unavailable(&mut self, reason: &str) {
        warn!(reason, "export unavailable");
        self.export_error = true;
        self.push_alert(AlertLevel::Warning, format!("Export unavailable: {reason}"));
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: MatchCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = MatchCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance by one nominal tick.
    pub fn tick(&mut self) -> Result<MatchSnapshot, MatchError> {
        self.advance(DT)
    }

    /// Advance the match loop by `dt` seconds and return the resulting snapshot.
    pub fn advance(&mut self, dt: f64) -> Result<MatchSnapshot, MatchError> {
        let continue_pressed = self.process_commands();

        let terminal = if matches!(self.phase, Phase::Playing { .. }) {
            let tallies = recompute_tallies(&mut self.rosters, &self.world, &mut self.events);
            terminal_reached(self.config.terminal, &tallies)
        } else {
            false
        };

        let mut timing = self.timing;
        if self.setup_failed {
            timing.await_start = true;
        }
        let input = PhaseInput {
            dt,
            continue_pressed,
            terminal_reached: terminal,
            match_over: self.match_outcome.is_some(),
        };

        self.time.advance(dt);
        match fsm::advance(&self.phase, &input, &timing) {
            PhaseStatus::Continue(phase) => self.phase = phase,
            PhaseStatus::Transition(next) => self.transition(next)?,
        }

        Ok(self.build_snapshot())
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn rosters(&self) -> &[Roster] {
        &self.rosters
    }

    pub fn ledger(&self) -> &ResultLedger {
        &self.ledger
    }

    pub fn match_number(&self) -> u32 {
        self.match_number
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn export_error(&self) -> bool {
        self.export_error
    }

    /// Process all queued commands. Returns whether "continue" was pressed.
    fn process_commands(&mut self) -> bool {
        let mut continue_pressed = false;
        while let Some(command) = self.command_queue.pop_front() {
            match command {
                MatchCommand::Continue => continue_pressed = true,
                MatchCommand::DamageTank { tank, amount } => {
                    if !matches!(self.phase, Phase::Playing { .. }) {
                        debug!(%tank, "damage outside play ignored");
                        continue;
                    }
                    if systems::damage::apply(&mut self.world, tank, amount)
                        == DamageOutcome::Destroyed
                    {
                        self.events.push(PresentationEvent::TankDestroyed { tank });
                    }
                }
                option if option.is_option() => self.handle_option(option),
                _ => {}
            }
        }
        continue_pressed
    }

    /// Apply a start-options command. Only honoured between matches.
    fn handle_option(&mut self, command: MatchCommand) {
        if !matches!(self.phase, Phase::Briefing | Phase::Intermission { .. }) {
            warn!(?command, phase = ?self.phase.kind(), "options are locked during a match");
            self.push_alert(
                AlertLevel::Warning,
                "Options can only be changed between matches".into(),
            );
            return;
        }
        match self.edited_config(&command) {
            Ok(config) => {
                info!(?command, "match options changed");
                for (roster, rc) in self.rosters.iter_mut().zip(&config.rosters) {
                    roster.configure(rc);
                }
                self.timing = PhaseTiming::from(&config);
                self.config = config;
                if matches!(self.phase, Phase::Briefing) {
                    self.info_text =
                        presentation::match_title(self.match_number + 1, &self.rosters);
                }
            }
            Err(e) => {
                warn!(?command, error = %e, "rejected match option");
                self.push_alert(AlertLevel::Warning, format!("Rejected option: {e}"));
            }
        }
    }

    /// A copy of the configuration with `command` applied, if still valid.
    fn edited_config(&self, command: &MatchCommand) -> Result<MatchConfig, ConfigError> {
        let mut config = self.config.clone();
        match *command {
            MatchCommand::SetNumOfRounds { rounds } => config.num_of_rounds = rounds,
            MatchCommand::SetMinutesPerRound { minutes } => {
                config.round_duration_secs = Some(minutes * 60.0)
            }
            MatchCommand::SetRosterSize { roster, size } => {
                let rc = config
                    .rosters
                    .get_mut(roster.index())
                    .ok_or(ConfigError::UnknownRoster(roster))?;
                match &mut rc.members {
                    RosterMembers::Fixed { size: s } => *s = size,
                    RosterMembers::Players { .. } => return Err(ConfigError::NotResizable(roster)),
                }
            }
            MatchCommand::SetTeamNumber { roster, team } => {
                config
                    .rosters
                    .get_mut(roster.index())
                    .ok_or(ConfigError::UnknownRoster(roster))?
                    .team_number = team;
            }
            MatchCommand::Continue | MatchCommand::DamageTank { .. } => {}
        }
        config.validate()?;
        Ok(config)
    }

    /// Run the entry hook of `next` and make it the current phase.
    fn transition(&mut self, next: Phase) -> Result<(), MatchError> {
        info!(from = ?self.phase.kind(), to = ?next.kind(), round = self.round_number, "phase transition");
        match next {
            Phase::Briefing => self.enter_briefing(),
            Phase::Starting { .. } => {
                if let Err(e) = self.enter_starting() {
                    error!(error = %e, "match setup failed");
                    self.push_alert(AlertLevel::Error, format!("Match setup failed: {e}"));
                    self.abort_setup();
                    return Err(e.into());
                }
            }
            Phase::Playing { .. } => self.enter_playing(),
            Phase::Ending { round_elapsed, .. } => self.enter_ending(round_elapsed)?,
            Phase::Intermission { .. } => self.finish_match()?,
        }
        self.phase = next;
        Ok(())
    }

    fn enter_briefing(&mut self) {
        self.info_text = presentation::match_title(self.match_number + 1, &self.rosters);
    }

    /// Round setup: one-time match setup on round 1, then reset every tank,
    /// lock controls, frame the camera and show the banner.
    fn enter_starting(&mut self) -> Result<(), SetupError> {
        if self.round_number == 0 {
            self.setup_match()?;
        }
        for roster in &mut self.rosters {
            roster.reset_all(&mut self.world, self.spawner.as_mut())?;
            roster.disable_controls(&mut self.world);
        }
        recompute_tallies(&mut self.rosters, &self.world, &mut self.events);
        self.framing = systems::framing::compute(&self.world, self.config.aspect);

        self.round_number += 1;
        self.last_round = None;
        let text = presentation::round_banner(self.round_number, self.config.num_of_rounds);
        self.events.push(PresentationEvent::RoundBanner {
            round: self.round_number,
            text: text.clone(),
        });
        self.info_text = text;
        Ok(())
    }

    /// Build the rosters and open a ledger record for a new match.
    fn setup_match(&mut self) -> Result<(), SetupError> {
        self.config.validate()?;
        self.scoring = scoring_for(&self.config.scoring);

        for (roster, rc) in self.rosters.iter_mut().zip(&self.config.rosters) {
            roster.initialize(
                rc,
                self.config.num_of_rounds,
                self.config.starting_health,
                &mut self.world,
                self.spawner.as_mut(),
            )?;
        }

        self.match_number += 1;
        self.match_outcome = None;
        self.setup_failed = false;
        let teams: Vec<TeamEntry> = self
            .rosters
            .iter()
            .map(|r| TeamEntry {
                label: r.label().to_string(),
                number: r.team_number(),
                size: r.size(),
            })
            .collect();
        self.ledger_index = Some(self.ledger.add_result(
            self.match_number,
            &teams,
            self.config.num_of_rounds,
        ));

        let title = presentation::match_title(self.match_number, &self.rosters);
        info!(match_number = self.match_number, scoring = self.scoring.name(), "match set up");
        self.events.push(PresentationEvent::MatchSetup {
            match_number: self.match_number,
            title,
        });
        Ok(())
    }

    /// Undo a partial setup and fall back to waiting for "continue".
    /// A match already under way is abandoned and its ledger record closed.
    fn abort_setup(&mut self) {
        let open_record = self
            .ledger_index
            .filter(|&i| self.ledger.get(i).is_some_and(|r| !r.finalized));
        if let Some(index) = open_record {
            let scores = self.team_scores();
            match self.ledger.abandon(&scores, self.round_number, Some(index)) {
                Ok(()) => warn!(
                    match_number = self.match_number,
                    rounds_played = self.round_number,
                    "match abandoned"
                ),
                Err(e) => error!(error = %e, "could not close abandoned match record"),
            }
        }
        self.match_outcome = None;
        for roster in &mut self.rosters {
            roster.clear(&mut self.world);
        }
        self.round_number = 0;
        self.framing = None;
        self.setup_failed = true;
        self.phase = Phase::Briefing;
    }

    fn enter_playing(&mut self) {
        for roster in &self.rosters {
            roster.enable_controls(&mut self.world);
        }
        self.info_text.clear();
        self.events.push(PresentationEvent::RoundStarted {
            round: self.round_number,
        });
    }

    /// Score the round from fresh counts and record it.
    fn enter_ending(&mut self, round_elapsed: f64) -> Result<(), MatchError> {
        for roster in &self.rosters {
            roster.disable_controls(&mut self.world);
        }
        let tallies = recompute_tallies(&mut self.rosters, &self.world, &mut self.events);
        let resolution = self.scoring.resolve_round(&tallies);

        let round_index = self.round_number.saturating_sub(1) as usize;
        if let Some(points) = &resolution.points {
            for (roster, pts) in self.rosters.iter_mut().zip(points) {
                roster.record_round_points(round_index, *pts)?;
            }
        }
        if let Some(winner) = resolution.outcome.winner() {
            if let Some(roster) = self.rosters.get_mut(winner.index()) {
                roster.record_win();
            }
        }
        let total = self.ledger.accumulate_time(round_elapsed, self.ledger_index)?;

        let standings: Vec<Standing> = self
            .rosters
            .iter()
            .map(|r| Standing {
                roster: r.id(),
                accumulated_points: r.accumulated_points(),
                wins: r.wins(),
            })
            .collect();
        self.match_outcome =
            self.scoring
                .match_outcome(&standings, self.round_number, self.config.num_of_rounds);
        self.last_round = Some(resolution.outcome);

        let message = presentation::round_end_message(
            message_style(&self.config.scoring),
            &self.rosters,
            self.round_number,
            resolution.outcome,
            self.match_outcome,
        );
        info!(
            round = self.round_number,
            outcome = ?resolution.outcome,
            match_outcome = ?self.match_outcome,
            match_secs = total,
            "round ended"
        );
        self.events.push(PresentationEvent::RoundEnded {
            round: self.round_number,
            outcome: resolution.outcome,
            message: message.clone(),
        });
        self.info_text = message;
        Ok(())
    }

    /// Close the ledger record, export it and tear the rosters down.
    fn finish_match(&mut self) -> Result<(), MatchError> {
        let scores = self.team_scores();
        self.ledger
            .amend_final_score(&scores, self.round_number, self.ledger_index)?;

        if let (Some(sink), Some(record)) = (
            self.export.as_mut(),
            self.ledger_index.and_then(|i| self.ledger.get(i)),
        ) {
            match sink.export(record) {
                Ok(path) => {
                    info!(path = %path.display(), "match exported");
                    self.export_error = false;
                }
                Err(e) => {
                    warn!(error = %e, "match export failed");
                    self.export_error = true;
                    self.alerts.push(Alert {
                        level: AlertLevel::Warning,
                        message: format!("Export failed: {e}"),
                        tick: self.time.tick,
                    });
                }
            }
        }

        for roster in &mut self.rosters {
            roster.clear(&mut self.world);
        }
        let outcome = self.match_outcome.unwrap_or(MatchOutcome::Draw);
        info!(match_number = self.match_number, ?outcome, "match finished");
        self.events.push(PresentationEvent::MatchEnded {
            match_number: self.match_number,
            outcome,
        });
        self.round_number = 0;
        self.framing = None;
        Ok(())
    }

    fn team_scores(&self) -> Vec<TeamScore> {
        self.rosters
            .iter()
            .map(|r| TeamScore {
                accumulated_points: r.accumulated_points(),
                wins: r.wins(),
            })
            .collect()
    }

    fn push_alert(&mut self, level: AlertLevel, message: String) {
        self.alerts.push(Alert {
            level,
            message,
            tick: self.time.tick,
        });
    }

    fn timer(&self) -> Option<TimerView> {
        let duration = self.config.round_duration_secs?;
        let remaining = match self.phase {
            Phase::Starting { .. } => duration,
            Phase::Playing { time_left, .. } => time_left.unwrap_or(duration),
            Phase::Ending { round_elapsed, .. } => duration - round_elapsed,
            Phase::Briefing | Phase::Intermission { .. } => return None,
        };
        Some(timer_view(remaining, self.config.critical_secs))
    }

    fn build_snapshot(&mut self) -> MatchSnapshot {
        MatchSnapshot {
            time: self.time,
            phase: self.phase.kind(),
            match_number: self.match_number,
            round_number: self.round_number,
            num_of_rounds: self.config.num_of_rounds,
            timer: self.timer(),
            rosters: systems::snapshot::build_rosters(&self.rosters),
            tanks: systems::snapshot::build_tanks(&self.world),
            framing: self.framing,
            info_text: self.info_text.clone(),
            last_round: self.last_round,
            match_outcome: self.match_outcome,
            events: std::mem::take(&mut self.events),
            alerts: std::mem::take(&mut self.alerts),
            export_error: self.export_error,
        }
    }
}
