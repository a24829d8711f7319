use tanks_core::config::{MatchConfig, ScoringPolicy};
use tanks_core::enums::*;
use tanks_core::types::RosterId;

use crate::clock::{format_clock, timer_view};
use crate::fsm::{advance, Phase, PhaseInput, PhaseStatus, PhaseTiming};
use crate::scoring::{scoring_for, RosterTally, Standing};
use crate::terminal::terminal_reached;

fn timing() -> PhaseTiming {
    PhaseTiming {
        round_start_delay_secs: 2.0,
        round_duration_secs: Some(10.0),
        round_end: RoundEndMode::Acknowledge,
        intermission_secs: 0.5,
        await_start: true,
    }
}

fn input(dt: f64) -> PhaseInput {
    PhaseInput {
        dt,
        ..Default::default()
    }
}

fn tally(roster: u8, size: u32, left: u32) -> RosterTally {
    RosterTally {
        roster: RosterId(roster),
        size,
        left,
    }
}

fn standing(roster: u8, points: f32, wins: u32) -> Standing {
    Standing {
        roster: RosterId(roster),
        accumulated_points: points,
        wins,
    }
}

// ---- Phase machine ----

#[test]
fn test_briefing_waits_for_continue() {
    let t = timing();
    let status = advance(&Phase::Briefing, &input(1.0), &t);
    assert_eq!(status, PhaseStatus::Continue(Phase::Briefing));

    let status = advance(
        &Phase::Briefing,
        &PhaseInput {
            continue_pressed: true,
            ..input(0.1)
        },
        &t,
    );
    assert_eq!(status, PhaseStatus::Transition(Phase::Starting { delay_left: 2.0 }));
}

#[test]
fn test_briefing_skipped_without_await_start() {
    let t = PhaseTiming {
        await_start: false,
        ..timing()
    };
    let status = advance(&Phase::Briefing, &input(0.0), &t);
    assert!(status.is_transition());
    assert_eq!(status.phase().kind(), PhaseKind::Starting);
}

#[test]
fn test_starting_holds_then_plays() {
    let t = timing();
    let status = advance(&Phase::Starting { delay_left: 2.0 }, &input(1.5), &t);
    assert_eq!(status, PhaseStatus::Continue(Phase::Starting { delay_left: 0.5 }));

    let status = advance(&status.phase(), &input(0.5), &t);
    assert_eq!(
        status,
        PhaseStatus::Transition(Phase::Playing {
            time_left: Some(10.0),
            elapsed: 0.0
        })
    );
}

#[test]
fn test_starting_ignores_continue() {
    let t = timing();
    let status = advance(
        &Phase::Starting { delay_left: 2.0 },
        &PhaseInput {
            continue_pressed: true,
            ..input(0.5)
        },
        &t,
    );
    assert!(!status.is_transition());
}

#[test]
fn test_playing_counts_down() {
    let t = timing();
    let status = advance(&t.playing(), &input(4.0), &t);
    assert_eq!(
        status,
        PhaseStatus::Continue(Phase::Playing {
            time_left: Some(6.0),
            elapsed: 4.0
        })
    );
}

#[test]
fn test_playing_ends_on_timeout() {
    let t = timing();
    let mut phase = t.playing();
    let mut transitions = 0;
    for _ in 0..12 {
        let status = advance(&phase, &input(1.0), &t);
        if status.is_transition() {
            transitions += 1;
            assert_eq!(
                status.phase(),
                Phase::Ending {
                    round_elapsed: 10.0,
                    hold_left: None
                },
                "Elapsed time is capped at the round duration"
            );
            break;
        }
        phase = status.phase();
    }
    assert_eq!(transitions, 1);
}

#[test]
fn test_playing_ends_on_terminal_condition() {
    let t = timing();
    let status = advance(
        &t.playing(),
        &PhaseInput {
            terminal_reached: true,
            ..input(1.0)
        },
        &t,
    );
    assert_eq!(
        status,
        PhaseStatus::Transition(Phase::Ending {
            round_elapsed: 1.0,
            hold_left: None
        })
    );
}

#[test]
fn test_untimed_round_runs_until_terminal() {
    let t = PhaseTiming {
        round_duration_secs: None,
        ..timing()
    };
    let mut phase = t.playing();
    for _ in 0..1000 {
        let status = advance(&phase, &input(1.0), &t);
        assert!(!status.is_transition(), "Untimed round must not expire");
        phase = status.phase();
    }
    assert_eq!(
        phase,
        Phase::Playing {
            time_left: None,
            elapsed: 1000.0
        }
    );
}

#[test]
fn test_ending_waits_for_acknowledge() {
    let t = timing();
    let ending = t.ending(5.0);
    let status = advance(&ending, &input(100.0), &t);
    assert_eq!(status, PhaseStatus::Continue(ending));

    let status = advance(
        &ending,
        &PhaseInput {
            continue_pressed: true,
            ..input(0.1)
        },
        &t,
    );
    assert_eq!(status, PhaseStatus::Transition(t.starting()));
}

#[test]
fn test_ending_leaves_to_intermission_when_match_over() {
    let t = timing();
    let status = advance(
        &t.ending(5.0),
        &PhaseInput {
            continue_pressed: true,
            match_over: true,
            ..input(0.1)
        },
        &t,
    );
    assert_eq!(
        status,
        PhaseStatus::Transition(Phase::Intermission { delay_left: 0.5 })
    );
}

#[test]
fn test_ending_auto_hold() {
    let t = PhaseTiming {
        round_end: RoundEndMode::AutoAfter { secs: 3.0 },
        ..timing()
    };
    let ending = t.ending(5.0);
    assert_eq!(
        ending,
        Phase::Ending {
            round_elapsed: 5.0,
            hold_left: Some(3.0)
        }
    );
    let status = advance(&ending, &input(2.0), &t);
    assert!(!status.is_transition());
    let status = advance(&status.phase(), &input(1.0), &t);
    assert_eq!(status, PhaseStatus::Transition(t.starting()));
}

#[test]
fn test_intermission_returns_to_briefing() {
    let t = timing();
    let status = advance(&t.intermission(), &input(0.25), &t);
    assert!(!status.is_transition());
    let status = advance(&status.phase(), &input(0.25), &t);
    assert_eq!(status, PhaseStatus::Transition(Phase::Briefing));
}

#[test]
fn test_timing_from_config() {
    let t = PhaseTiming::from(&MatchConfig::duel());
    assert_eq!(t.round_duration_secs, None);
    assert_eq!(t.round_start_delay_secs, 3.0);
    assert!(!t.await_start);
}

// ---- Terminal conditions ----

#[test]
fn test_any_roster_eliminated() {
    let rule = TerminalRule::AnyRosterEliminated;
    assert!(!terminal_reached(rule, &[tally(0, 4, 1), tally(1, 4, 4)]));
    assert!(terminal_reached(rule, &[tally(0, 4, 0), tally(1, 4, 2)]));
    assert!(terminal_reached(rule, &[tally(0, 4, 0), tally(1, 4, 0)]));
}

#[test]
fn test_last_tank_standing() {
    let rule = TerminalRule::LastTankStanding;
    let ffa = [tally(0, 1, 1), tally(1, 1, 0), tally(2, 1, 1)];
    assert!(!terminal_reached(rule, &ffa));
    let ffa = [tally(0, 1, 0), tally(1, 1, 0), tally(2, 1, 1)];
    assert!(terminal_reached(rule, &ffa));
    let ffa = [tally(0, 1, 0), tally(1, 1, 0), tally(2, 1, 0)];
    assert!(terminal_reached(rule, &ffa));
}

// ---- Points-proportional scoring ----

fn points_policy(partial_credit: PartialCredit) -> ScoringPolicy {
    ScoringPolicy::PointsProportional {
        points_per_win: 3.0,
        partial_credit,
    }
}

#[test]
fn test_points_clean_sweep() {
    // A wiped out, B has 2 of 4 left: B takes the round and full points,
    // A is credited for the 2 of 4 B tanks it destroyed.
    let scoring = scoring_for(&points_policy(PartialCredit::Symmetric));
    let res = scoring.resolve_round(&[tally(0, 4, 0), tally(1, 4, 2)]);
    assert_eq!(res.outcome, RoundOutcome::Winner(RosterId(1)));
    assert_eq!(res.points, Some(vec![1.5, 3.0]));
}

#[test]
fn test_points_timeout_is_draw_with_partial_credit() {
    let scoring = scoring_for(&points_policy(PartialCredit::Symmetric));
    let res = scoring.resolve_round(&[tally(0, 4, 3), tally(1, 4, 1)]);
    assert_eq!(res.outcome, RoundOutcome::Draw);
    assert_eq!(res.points, Some(vec![2.25, 0.75]));
}

#[test]
fn test_points_mutual_wipe_is_draw() {
    let scoring = scoring_for(&points_policy(PartialCredit::Symmetric));
    let res = scoring.resolve_round(&[tally(0, 4, 0), tally(1, 4, 0)]);
    assert_eq!(res.outcome, RoundOutcome::Draw);
    let points = res.points.unwrap();
    assert_eq!(points[0], points[1], "A mutual wipe-out keeps totals level");
}

#[test]
fn test_points_first_roster_only() {
    let scoring = scoring_for(&points_policy(PartialCredit::FirstRosterOnly));
    let res = scoring.resolve_round(&[tally(0, 3, 2), tally(1, 3, 1)]);
    assert_eq!(res.outcome, RoundOutcome::Draw);
    assert_eq!(res.points, Some(vec![2.0, 0.0]));

    let res = scoring.resolve_round(&[tally(0, 3, 0), tally(1, 3, 1)]);
    assert_eq!(res.outcome, RoundOutcome::Winner(RosterId(1)));
    assert_eq!(res.points, Some(vec![2.0, 3.0]));
}

#[test]
fn test_points_three_rosters() {
    let scoring = scoring_for(&points_policy(PartialCredit::Symmetric));
    let res = scoring.resolve_round(&[tally(0, 2, 0), tally(1, 2, 0), tally(2, 2, 1)]);
    assert_eq!(res.outcome, RoundOutcome::Winner(RosterId(2)));
    let points = res.points.unwrap();
    assert_eq!(points[2], 3.0);
    // Roster 0 faces 4 opponents of which 3 are gone.
    assert!((points[0] - 2.25).abs() < 1e-6);
}

#[test]
fn test_points_match_decided_only_after_last_round() {
    let scoring = scoring_for(&points_policy(PartialCredit::Symmetric));
    let standings = [standing(0, 1.0, 0), standing(1, 6.0, 2)];
    assert_eq!(scoring.match_outcome(&standings, 2, 3), None);
    assert_eq!(
        scoring.match_outcome(&standings, 3, 3),
        Some(MatchOutcome::Winner(RosterId(1)))
    );
}

#[test]
fn test_points_match_rounding_noise_is_a_draw() {
    let scoring = scoring_for(&points_policy(PartialCredit::Symmetric));
    // Three rounds of 0.75 summed on one side, 2.25 written on the other.
    let summed: f32 = [0.75f32, 0.75, 0.75].iter().sum::<f32>() + 1e-6;
    let standings = [standing(0, summed, 0), standing(1, 2.25, 0)];
    assert_eq!(
        scoring.match_outcome(&standings, 3, 3),
        Some(MatchOutcome::Draw)
    );

    // A real margin, however small in game terms, still decides it.
    let standings = [standing(0, 2.25, 0), standing(1, 2.2505, 0)];
    assert_eq!(
        scoring.match_outcome(&standings, 3, 3),
        Some(MatchOutcome::Winner(RosterId(1)))
    );
}

#[test]
fn test_points_match_ignores_win_counts() {
    let scoring = scoring_for(&points_policy(PartialCredit::Symmetric));
    // More wins but fewer points still loses.
    let standings = [standing(0, 7.5, 1), standing(1, 6.0, 2)];
    assert_eq!(
        scoring.match_outcome(&standings, 3, 3),
        Some(MatchOutcome::Winner(RosterId(0)))
    );
    let standings = [standing(0, 4.5, 1), standing(1, 4.5, 1)];
    assert_eq!(
        scoring.match_outcome(&standings, 3, 3),
        Some(MatchOutcome::Draw)
    );
}

// ---- Winner-takes-round scoring ----

#[test]
fn test_knockout_first_active_roster_wins() {
    let scoring = scoring_for(&ScoringPolicy::WinnerTakesRound {
        wins_to_win: Some(5),
    });
    let res = scoring.resolve_round(&[tally(0, 1, 0), tally(1, 1, 1)]);
    assert_eq!(res.outcome, RoundOutcome::Winner(RosterId(1)));
    assert_eq!(res.points, None);

    // Tie-break: registration order.
    let res = scoring.resolve_round(&[tally(0, 1, 1), tally(1, 1, 1)]);
    assert_eq!(res.outcome, RoundOutcome::Winner(RosterId(0)));
}

#[test]
fn test_knockout_no_survivor_is_draw() {
    let scoring = scoring_for(&ScoringPolicy::WinnerTakesRound { wins_to_win: None });
    let res = scoring.resolve_round(&[tally(0, 1, 0), tally(1, 1, 0)]);
    assert_eq!(res.outcome, RoundOutcome::Draw);
}

#[test]
fn test_knockout_match_ends_at_target_wins() {
    let scoring = scoring_for(&ScoringPolicy::WinnerTakesRound {
        wins_to_win: Some(5),
    });
    assert_eq!(
        scoring.match_outcome(&[standing(0, 0.0, 4), standing(1, 0.0, 3)], 7, 9),
        None
    );
    assert_eq!(
        scoring.match_outcome(&[standing(0, 0.0, 4), standing(1, 0.0, 5)], 9, 9),
        Some(MatchOutcome::Winner(RosterId(1)))
    );
}

#[test]
fn test_knockout_round_cap() {
    let scoring = scoring_for(&ScoringPolicy::WinnerTakesRound {
        wins_to_win: Some(5),
    });
    // Draws used up the rounds without anyone reaching the target.
    assert_eq!(
        scoring.match_outcome(&[standing(0, 0.0, 4), standing(1, 0.0, 4)], 9, 9),
        Some(MatchOutcome::Draw)
    );
    assert_eq!(
        scoring.match_outcome(&[standing(0, 0.0, 4), standing(1, 0.0, 3)], 9, 9),
        Some(MatchOutcome::Winner(RosterId(0)))
    );
}

#[test]
fn test_scoring_names() {
    assert_eq!(
        scoring_for(&ScoringPolicy::default()).name(),
        "points-proportional"
    );
    assert_eq!(
        scoring_for(&ScoringPolicy::WinnerTakesRound { wins_to_win: None }).name(),
        "winner-takes-round"
    );
}

// ---- Clock ----

#[test]
fn test_format_clock() {
    assert_eq!(format_clock(180.0), "03:00");
    assert_eq!(format_clock(59.9), "00:59");
    assert_eq!(format_clock(61.0), "01:01");
    assert_eq!(format_clock(-3.0), "00:00");
}

#[test]
fn test_timer_view_critical() {
    let view = timer_view(20.0, 15.0);
    assert!(!view.critical);
    let view = timer_view(15.0, 15.0);
    assert!(view.critical);
    assert_eq!(view.text, "00:15");
}
