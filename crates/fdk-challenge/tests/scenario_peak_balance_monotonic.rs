use fdk_challenge::*;

fn d(v: i64) -> Micros {
    Micros::from_dollars(v)
}

#[test]
fn peak_never_decreases_across_submissions() {
    let cfg = ChallengeConfig::sane_defaults();
    let mut state = ChallengeState::new(&cfg);

    let days: &[[i64; 2]] = &[
        [120, -40],
        [-80, -80],
        [240, 0],
        [-100, -100],
        [60, 60],
        [0, 0],
    ];

    let mut prev_peak = state.peak_balance;
    for (i, day) in days.iter().enumerate() {
        let inputs = DayInputs::new(vec![d(day[0]), d(day[1])]);
        let sub = submit(&cfg, &state, &inputs).unwrap();
        assert!(
            sub.state.peak_balance >= prev_peak,
            "day {}: peak went backwards",
            i + 1
        );
        assert!(sub.state.peak_balance >= sub.state.balance);
        prev_peak = sub.state.peak_balance;
        state = sub.state;
    }
}
