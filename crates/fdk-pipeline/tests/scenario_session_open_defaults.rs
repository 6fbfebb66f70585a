use fdk_challenge::{ChallengeConfig, ChallengeState, ChallengeStatus, Micros};
use fdk_pipeline::Session;
use fdk_store::UserStore;

#[test]
fn fresh_store_opens_with_defaults() {
    let root = tempfile::tempdir().unwrap();
    let store = UserStore::open(root.path(), "nico").unwrap();

    let session = Session::open(&store).unwrap();
    assert_eq!(session.user, "nico");
    assert_eq!(session.config, ChallengeConfig::sane_defaults());
    assert_eq!(session.state, ChallengeState::new(&session.config));
    assert_eq!(session.state.status, ChallengeStatus::Ongoing);
}

#[test]
fn saved_state_survives_reopen() {
    let root = tempfile::tempdir().unwrap();
    let store = UserStore::open(root.path(), "nico").unwrap();

    let cfg = ChallengeConfig::sane_defaults();
    let mut state = ChallengeState::new(&cfg);
    state.balance = Micros::from_dollars(6_160);
    state.current_risk = Micros::from_dollars(90);
    state.day_number = 2;
    store.save_state(&state).unwrap();

    let session = Session::open(&store).unwrap();
    assert_eq!(session.state, state);
}

#[test]
fn saved_config_shapes_the_fresh_state() {
    let root = tempfile::tempdir().unwrap();
    let store = UserStore::open(root.path(), "nico").unwrap();

    let mut dto = fdk_config::ChallengeConfigDto::default();
    dto.starting_balance = 10_000;
    dto.initial_risk = 50;
    store.save_config_dto(&dto).unwrap();

    let session = Session::open(&store).unwrap();
    assert_eq!(session.state.balance, Micros::from_dollars(10_000));
    assert_eq!(session.state.current_risk, Micros::from_dollars(50));
}
