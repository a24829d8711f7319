use crate::commands::MatchCommand;
use crate::config::*;
use crate::constants::*;
use crate::enums::*;
use crate::error::ConfigError;
use crate::events::PresentationEvent;
use crate::types::*;

// ---- Types ----

#[test]
fn test_sim_time_advance() {
    let mut time = SimTime::default();
    time.advance(DT);
    time.advance(DT);
    assert_eq!(time.tick, 2);
    assert!((time.elapsed_secs - 2.0 / 30.0).abs() < 1e-12);
}

#[test]
fn test_placement_normalizes_yaw() {
    let p = Placement::new(glam::Vec3::ZERO, -90.0);
    assert!((p.yaw_degrees - 270.0).abs() < 1e-4);
    let p = Placement::new(glam::Vec3::ZERO, 720.0);
    assert!(p.yaw_degrees.abs() < 1e-4);
}

#[test]
fn test_rgb_hex() {
    assert_eq!(Rgb(42, 100, 178).hex(), "2A64B2");
    assert_eq!(Rgb(0, 0, 0).hex(), "000000");
}

#[test]
fn test_tank_id_display() {
    let id = TankId::new(RosterId(1), 2);
    assert_eq!(id.to_string(), "roster-1/tank-2");
}

// ---- Serialization ----

#[test]
fn test_command_serialization_roundtrip() {
    let commands = vec![
        MatchCommand::Continue,
        MatchCommand::DamageTank {
            tank: TankId::new(RosterId(0), 1),
            amount: 25.0,
        },
        MatchCommand::SetNumOfRounds { rounds: 5 },
        MatchCommand::SetTeamNumber {
            roster: RosterId(1),
            team: 7,
        },
    ];
    for cmd in &commands {
        let json = serde_json::to_string(cmd).unwrap();
        let back: MatchCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(&back, cmd, "Roundtrip changed {json}");
    }
}

#[test]
fn test_command_json_is_tagged() {
    let json = serde_json::to_string(&MatchCommand::Continue).unwrap();
    assert_eq!(json, r#"{"type":"Continue"}"#);
    let cmd: MatchCommand = serde_json::from_str(r#"{"type":"SetNumOfRounds","rounds":4}"#).unwrap();
    assert_eq!(cmd, MatchCommand::SetNumOfRounds { rounds: 4 });
    assert!(cmd.is_option());
    assert!(!MatchCommand::Continue.is_option());
}

#[test]
fn test_event_serialization() {
    let event = PresentationEvent::RoundEnded {
        round: 2,
        outcome: RoundOutcome::Winner(RosterId(1)),
        message: "AI Wins Round 2!".into(),
    };
    let json = serde_json::to_string(&event).unwrap();
    assert!(json.contains(r#""type":"RoundEnded""#));
    let back: PresentationEvent = serde_json::from_str(&json).unwrap();
    assert_eq!(back, event);
}

#[test]
fn test_config_json_roundtrip() {
    let config = MatchConfig::duel();
    let json = serde_json::to_string_pretty(&config).unwrap();
    let back: MatchConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}

#[test]
fn test_scoring_policy_partial_credit_defaults() {
    let policy: ScoringPolicy =
        serde_json::from_str(r#"{"policy":"PointsProportional","points_per_win":3.0}"#).unwrap();
    assert_eq!(
        policy,
        ScoringPolicy::PointsProportional {
            points_per_win: 3.0,
            partial_credit: PartialCredit::Symmetric,
        }
    );
}

// ---- Presets ----

#[test]
fn test_platoon_battle_preset() {
    let config = MatchConfig::platoon_battle();
    assert_eq!(config.num_of_rounds, 3);
    assert_eq!(config.round_duration_secs, Some(180.0));
    assert_eq!(config.round_start_delay_secs, 2.5);
    assert_eq!(config.round_end, RoundEndMode::Acknowledge);
    assert!(config.await_start);
    assert_eq!(config.terminal, TerminalRule::AnyRosterEliminated);
    assert_eq!(config.rosters.len(), 2);
    assert!(config.validate().is_ok());
}

#[test]
fn test_duel_preset() {
    let config = MatchConfig::duel();
    assert_eq!(config.round_duration_secs, None);
    assert_eq!(
        config.scoring,
        ScoringPolicy::WinnerTakesRound {
            wins_to_win: Some(5)
        }
    );
    assert_eq!(config.num_of_rounds, 9);
    assert_eq!(config.terminal, TerminalRule::LastTankStanding);
    assert!(config.validate().is_ok());
}

#[test]
fn test_free_for_all_preset() {
    let config = MatchConfig::free_for_all(4);
    assert_eq!(config.rosters.len(), 4);
    assert!(config.rosters.iter().all(|r| r.members.len() == 1));
    let teams: Vec<u8> = config.rosters.iter().map(|r| r.team_number).collect();
    assert_eq!(teams, vec![1, 2, 3, 4]);
    assert!(config.validate().is_ok());
}

#[test]
fn test_builders() {
    let config = MatchConfig::platoon_battle()
        .with_num_of_rounds(5)
        .with_minutes_per_round(1.5)
        .with_platoon_size(6)
        .with_seed(7);
    assert_eq!(config.num_of_rounds, 5);
    assert_eq!(config.round_duration_secs, Some(90.0));
    assert_eq!(config.round_duration_minutes(), Some(1.5));
    assert_eq!(config.rosters[1].members, RosterMembers::Fixed { size: 6 });
    // Player rosters are untouched by platoon sizing
    assert_eq!(config.rosters[0].members.len(), 1);
    assert_eq!(config.seed, 7);

    let untimed = config.with_untimed_rounds();
    assert_eq!(untimed.round_duration_secs, None);
    assert_eq!(untimed.round_duration_minutes(), None);
    assert!(untimed.validate().is_ok());
}

// ---- Validation ----

#[test]
fn test_validate_rejects_empty_roster() {
    let config = MatchConfig::platoon_battle().with_platoon_size(0);
    assert_eq!(config.validate(), Err(ConfigError::EmptyRoster(RosterId(1))));
}

#[test]
fn test_validate_rejects_missing_roster() {
    let mut config = MatchConfig::platoon_battle();
    config.rosters.pop();
    assert_eq!(config.validate(), Err(ConfigError::TooFewRosters(1)));
}

#[test]
fn test_validate_rejects_zero_rounds() {
    let config = MatchConfig::platoon_battle().with_num_of_rounds(0);
    assert_eq!(config.validate(), Err(ConfigError::ZeroRounds));
}

#[test]
fn test_validate_rejects_bad_timing() {
    let config = MatchConfig::platoon_battle().with_minutes_per_round(0.0);
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidRoundDuration { .. })
    ));

    let config = MatchConfig::platoon_battle().with_round_start_delay(-1.0);
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidDelay { .. })
    ));

    let config =
        MatchConfig::duel().with_round_end(RoundEndMode::AutoAfter { secs: -0.5 });
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidDelay { .. })
    ));
}

#[test]
fn test_validate_rejects_too_many_rounds() {
    let config = MatchConfig::platoon_battle().with_num_of_rounds(MAX_NUM_OF_ROUNDS);
    assert!(config.validate().is_ok());

    let config = MatchConfig::platoon_battle().with_num_of_rounds(u32::MAX);
    assert_eq!(
        config.validate(),
        Err(ConfigError::TooManyRounds {
            rounds: u32::MAX,
            max: MAX_NUM_OF_ROUNDS,
        })
    );
}

#[test]
fn test_validate_rejects_unbounded_round_duration() {
    let config = MatchConfig::platoon_battle().with_minutes_per_round(MAX_MINUTES_PER_ROUND);
    assert!(config.validate().is_ok());

    for minutes in [f64::INFINITY, f64::NAN, MAX_MINUTES_PER_ROUND + 0.5] {
        let config = MatchConfig::platoon_battle().with_minutes_per_round(minutes);
        assert!(
            matches!(config.validate(), Err(ConfigError::InvalidRoundDuration { .. })),
            "{minutes} minutes accepted"
        );
    }
}

#[test]
fn test_validate_rejects_non_finite_delays() {
    let configs = [
        MatchConfig::platoon_battle().with_round_start_delay(f64::NAN),
        MatchConfig::platoon_battle().with_intermission(f64::INFINITY),
        MatchConfig::duel().with_round_end(RoundEndMode::AutoAfter { secs: f64::NAN }),
    ];
    for config in configs {
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidDelay { .. })
        ));
    }

    let mut config = MatchConfig::platoon_battle();
    config.critical_secs = f64::NAN;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidDelay { name: "critical time", .. })
    ));
}

#[test]
fn test_validate_rejects_oversized_roster() {
    let config = MatchConfig::platoon_battle().with_platoon_size(MAX_ROSTER_SIZE as u32);
    assert!(config.validate().is_ok());

    let config = MatchConfig::platoon_battle().with_platoon_size(70_000);
    assert_eq!(
        config.validate(),
        Err(ConfigError::RosterTooLarge {
            roster: RosterId(1),
            size: 70_000,
            max: MAX_ROSTER_SIZE,
        })
    );
}

#[test]
fn test_validate_rejects_team_number_out_of_range() {
    let mut config = MatchConfig::platoon_battle();
    config.rosters[0].team_number = MAX_TEAM_NUMBER + 1;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::TeamNumberOutOfRange { team: 33, .. })
    ));
    config.rosters[0].team_number = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_bad_scoring() {
    let config = MatchConfig::duel().with_scoring(ScoringPolicy::WinnerTakesRound {
        wins_to_win: Some(0),
    });
    assert_eq!(config.validate(), Err(ConfigError::ZeroWinsToWin));

    let config = MatchConfig::platoon_battle().with_scoring(ScoringPolicy::PointsProportional {
        points_per_win: 0.0,
        partial_credit: PartialCredit::Symmetric,
    });
    assert!(matches!(
        config.validate(),
        Err(ConfigError::InvalidPointsPerWin(_))
    ));

    let config = MatchConfig::platoon_battle().with_scoring(ScoringPolicy::PointsProportional {
        points_per_win: f32::INFINITY,
        partial_credit: PartialCredit::Symmetric,
    });
    assert!(config.validate().is_err());
}

#[test]
fn test_error_messages() {
    let err = ConfigError::EmptyRoster(RosterId(0));
    assert_eq!(err.to_string(), "roster-0 has no tanks");
}
