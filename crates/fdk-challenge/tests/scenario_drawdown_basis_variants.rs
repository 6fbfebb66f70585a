use fdk_challenge::*;

fn d(v: i64) -> Micros {
    Micros::from_dollars(v)
}

// The two bases diverge once the balance has been above the start: the
// peak-relative drawdown keeps measuring from the high-water mark.
#[test]
fn peak_and_starting_bases_diverge_after_a_run_up() {
    let peak_cfg = ChallengeConfig::sane_defaults();
    let start_cfg = ChallengeConfig {
        drawdown_basis: DrawdownBasis::StartingBalance,
        ..ChallengeConfig::sane_defaults()
    };

    // Balance ran up to 6,400, then fell back to 6,100.
    let peak = d(6_400);
    let balance = d(6_100);

    assert_eq!(drawdown_from(&peak_cfg, peak, balance), d(300));
    // Still above the start — no drawdown under the static basis.
    assert_eq!(drawdown_from(&start_cfg, peak, balance), Micros::ZERO);
}

#[test]
fn starting_basis_only_fails_below_the_start() {
    let cfg = ChallengeConfig {
        drawdown_basis: DrawdownBasis::StartingBalance,
        ..ChallengeConfig::sane_defaults()
    };

    // Run up to 6,800 then lose 280: the peak-relative drawdown would be
    // 280, but measured from the start it is 0 — still ongoing.
    let state = ChallengeState {
        balance: d(6_800),
        peak_balance: d(6_800),
        ..ChallengeState::new(&cfg)
    };
    let sub = submit(&cfg, &state, &DayInputs::new(vec![d(-140), d(-140)])).unwrap();

    assert_eq!(sub.state.balance, d(6_520));
    assert_eq!(sub.record.drawdown, Micros::ZERO);
    assert_eq!(sub.state.status, ChallengeStatus::Ongoing);
}

#[test]
fn drawdown_never_negative() {
    let cfg = ChallengeConfig::sane_defaults();
    assert_eq!(drawdown_from(&cfg, d(6_000), d(6_500)), Micros::ZERO);
}
