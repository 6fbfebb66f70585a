use fdk_challenge::*;

fn d(v: i64) -> Micros {
    Micros::from_dollars(v)
}

fn run_days(cfg: &ChallengeConfig, days: &[[i64; 2]]) -> (ChallengeState, Vec<DailyRecord>) {
    let mut state = ChallengeState::new(cfg);
    let mut records = Vec::new();
    for day in days {
        let sub = submit(cfg, &state, &DayInputs::new(vec![d(day[0]), d(day[1])])).unwrap();
        records.push(sub.record);
        state = sub.state;
    }
    (state, records)
}

#[test]
fn replay_yields_the_live_state() {
    let cfg = ChallengeConfig::sane_defaults();
    let (live, records) = run_days(&cfg, &[[120, -40], [-80, -80], [240, 0], [90, -30]]);

    let replayed = replay(&cfg, &records).unwrap();
    assert_eq!(replayed, live);

    // Idempotence: replaying again changes nothing.
    assert_eq!(replay(&cfg, &records).unwrap(), replayed);
}

#[test]
fn replay_rejects_out_of_order_records() {
    let cfg = ChallengeConfig::sane_defaults();
    let (_, records) = run_days(&cfg, &[[120, -40], [-80, -80]]);

    let swapped = vec![records[1].clone(), records[0].clone()];
    let err = replay(&cfg, &swapped).unwrap_err();
    assert_eq!(err, ReplayError::DayOutOfOrder { expected: 1, got: 2 });
}

#[test]
fn replay_rejects_tampered_pl() {
    let cfg = ChallengeConfig::sane_defaults();
    let (_, mut records) = run_days(&cfg, &[[120, -40]]);

    records[0].daily_pl = d(999);
    let err = replay(&cfg, &records).unwrap_err();
    assert_eq!(err, ReplayError::PlMismatch { day_number: 1 });
}

#[test]
fn replay_auto_confirms_past_a_pending_advance() {
    let cfg = ChallengeConfig {
        phase_advance_confirmation: true,
        ..ChallengeConfig::sane_defaults()
    };

    // Drive to the phase-one target, confirm, trade one more day.
    let mut state = ChallengeState::new(&cfg);
    let mut records = Vec::new();
    for day in [[240, 0], [240, 0]] {
        let sub = submit(&cfg, &state, &DayInputs::new(vec![d(day[0]), d(day[1])])).unwrap();
        records.push(sub.record);
        state = sub.state;
    }
    assert_eq!(state.status, ChallengeStatus::PendingPhaseAdvance);
    state = confirm_phase_advance(&state).unwrap();
    let sub = submit(&cfg, &state, &DayInputs::new(vec![d(90), d(-30)])).unwrap();
    records.push(sub.record);
    state = sub.state;

    // The pending stop is invisible to replay: the phase-two record proves
    // the confirmation happened.
    assert_eq!(replay(&cfg, &records).unwrap(), state);
}
