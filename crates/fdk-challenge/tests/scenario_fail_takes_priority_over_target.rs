use fdk_challenge::*;

fn d(v: i64) -> Micros {
    Micros::from_dollars(v)
}

// A day that simultaneously breaches the daily loss limit and lands the
// balance above the phase target must fail — limit checks run first.
#[test]
fn limit_breach_beats_phase_target() {
    let cfg = ChallengeConfig::sane_defaults();

    // Balance well above the phase-one level before the day starts.
    let state = ChallengeState {
        balance: d(6_800),
        peak_balance: d(6_800),
        ..ChallengeState::new(&cfg)
    };

    // −300 breaches the limit; the resulting 6,500 still clears 6,480.
    let sub = submit(&cfg, &state, &DayInputs::new(vec![d(-150), d(-150)])).unwrap();

    assert_eq!(sub.state.status, ChallengeStatus::Fail);
    assert_eq!(sub.state.phase, Phase::One);
}

#[test]
fn evaluator_reports_loss_limit_reason_first() {
    let cfg = ChallengeConfig::sane_defaults();
    // Drawdown simultaneously past the max — the loss-limit rule still wins.
    let dec = evaluate(d(-300), d(5_000), d(1_000), Phase::One, &cfg);
    assert_eq!(dec.status, ChallengeStatus::Fail);
    assert_eq!(dec.reason, ReasonCode::DailyLossLimitBreached);
}
