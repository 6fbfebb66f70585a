use fdk_challenge::{ChallengeConfig, ChallengeState, InputPolicy, Micros};
use fdk_pipeline::{prepare, prepare_counts, Session};

fn session(policy: InputPolicy) -> Session {
    let config = ChallengeConfig {
        input_policy: policy,
        ..ChallengeConfig::sane_defaults()
    };
    let state = ChallengeState::new(&config);
    Session {
        user: "nico".to_string(),
        config,
        state,
    }
}

fn raw(entries: &[&str]) -> Vec<String> {
    entries.iter().map(|s| s.to_string()).collect()
}

#[test]
fn coerce_session_zeroes_bad_entries() {
    let s = session(InputPolicy::Coerce);
    let sub = prepare(&s, &raw(&["240", "garbage"])).unwrap();
    assert_eq!(sub.record.daily_pl, Micros::from_dollars(240));
}

#[test]
fn reject_session_refuses_bad_entries() {
    let s = session(InputPolicy::Reject);
    let err = prepare(&s, &raw(&["240", "garbage"])).unwrap_err();
    assert!(err.to_string().contains("trade entries rejected"));
}

#[test]
fn prepare_counts_uses_current_risk() {
    let s = session(InputPolicy::Coerce);
    // 1 win at 3R on $80 risk, 1 loss: +240 − 80.
    let sub = prepare_counts(&s, 1, 1).unwrap();
    assert_eq!(sub.record.daily_pl, Micros::from_dollars(160));
    assert_eq!(sub.record.risk_used, Micros::from_dollars(80));
}

#[test]
fn prepare_counts_refuses_short_days() {
    let s = session(InputPolicy::Coerce);
    assert!(prepare_counts(&s, 1, 0).is_err());
}

#[test]
fn prepare_does_not_touch_the_session() {
    let s = session(InputPolicy::Coerce);
    let before = s.state.clone();
    let _ = prepare(&s, &raw(&["240", "-80"])).unwrap();
    assert_eq!(s.state, before);
}
