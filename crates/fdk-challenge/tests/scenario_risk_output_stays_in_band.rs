use fdk_challenge::*;

fn d(v: i64) -> Micros {
    Micros::from_dollars(v)
}

// Sweep a grid of starting risks and P/L values; every output must land in
// [risk_floor, min(risk_cap, daily_loss_limit / trades_per_day)].
#[test]
fn adjusted_risk_always_within_bounds() {
    let cfg = ChallengeConfig::sane_defaults();
    let upper = cfg.risk_cap.min(cfg.max_safe_risk());

    for risk in (0_i64..=200).step_by(5) {
        for pl in [-500_i64, -160, -1, 0, 1, 160, 500] {
            let out = next_risk(d(pl), d(risk), &cfg);
            assert!(
                out >= cfg.risk_floor.min(upper) && out <= upper,
                "risk {risk} pl {pl} -> {out}"
            );
        }
    }
}

#[test]
fn safety_ceiling_wins_over_floor() {
    // Pathological config: floor above the safety ceiling. The ceiling is
    // the hard rule — a full-loss day must not breach the daily limit.
    let cfg = ChallengeConfig {
        daily_loss_limit: d(60),
        risk_floor: d(50),
        risk_cap: d(90),
        ..ChallengeConfig::sane_defaults()
    };
    // Ceiling = 60 / 2 = 30 < floor 50.
    assert_eq!(next_risk(d(-10), d(80), &cfg), d(30));
}
