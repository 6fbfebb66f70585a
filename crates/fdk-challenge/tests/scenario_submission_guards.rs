use fdk_challenge::*;

fn d(v: i64) -> Micros {
    Micros::from_dollars(v)
}

// Pass and Fail are absorbing: nothing moves a closed challenge.
#[test]
fn terminal_status_rejects_submission() {
    let cfg = ChallengeConfig::sane_defaults();

    for terminal in [ChallengeStatus::Fail, ChallengeStatus::Pass] {
        let state = ChallengeState {
            status: terminal,
            ..ChallengeState::new(&cfg)
        };
        let err = submit(&cfg, &state, &DayInputs::new(vec![d(10), d(10)])).unwrap_err();
        assert_eq!(err, SubmitError::ChallengeClosed(terminal));
    }
}

#[test]
fn wrong_trade_count_rejected() {
    let cfg = ChallengeConfig::sane_defaults();
    let state = ChallengeState::new(&cfg);

    let err = submit(&cfg, &state, &DayInputs::new(vec![d(10)])).unwrap_err();
    assert_eq!(
        err,
        SubmitError::WrongTradeCount {
            expected: 2,
            got: 1
        }
    );
}

// submit never mutates its input — the caller applies the returned state
// only after the durable write succeeds.
#[test]
fn submit_leaves_input_state_untouched() {
    let cfg = ChallengeConfig::sane_defaults();
    let state = ChallengeState::new(&cfg);
    let before = state.clone();

    let _ = submit(&cfg, &state, &DayInputs::new(vec![d(240), d(-80)])).unwrap();
    assert_eq!(state, before);
}
