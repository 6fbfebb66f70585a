use fdk_challenge::{ChallengeConfig, ChallengeState, Micros};
use fdk_store::UserStore;

#[test]
fn state_roundtrips_through_disk() {
    let root = tempfile::tempdir().unwrap();
    let store = UserStore::open(root.path(), "nico").unwrap();

    // Nothing saved yet.
    assert_eq!(store.load_state().unwrap(), None);

    let cfg = ChallengeConfig::sane_defaults();
    let mut state = ChallengeState::new(&cfg);
    state.balance = Micros::from_dollars(6_160);
    state.day_number = 2;

    store.save_state(&state).unwrap();
    assert_eq!(store.load_state().unwrap(), Some(state));
}

#[test]
fn users_do_not_see_each_others_state() {
    let root = tempfile::tempdir().unwrap();
    let cfg = ChallengeConfig::sane_defaults();

    let nico = UserStore::open(root.path(), "nico").unwrap();
    let adrian = UserStore::open(root.path(), "adrian").unwrap();

    nico.save_state(&ChallengeState::new(&cfg)).unwrap();

    assert!(nico.load_state().unwrap().is_some());
    assert_eq!(adrian.load_state().unwrap(), None);
}

#[test]
fn clear_state_resets_only_the_state() {
    let root = tempfile::tempdir().unwrap();
    let store = UserStore::open(root.path(), "nico").unwrap();
    let cfg = ChallengeConfig::sane_defaults();

    store.save_state(&ChallengeState::new(&cfg)).unwrap();
    store
        .save_config_dto(&fdk_config::ChallengeConfigDto::default())
        .unwrap();

    store.clear_state().unwrap();
    assert_eq!(store.load_state().unwrap(), None);
    // Config survives a reset.
    assert!(store.load_config().unwrap().is_some());
}

#[test]
fn empty_user_name_is_refused() {
    let root = tempfile::tempdir().unwrap();
    assert!(UserStore::open(root.path(), "").is_err());
    assert!(UserStore::open(root.path(), "   ").is_err());
}

#[test]
fn path_hostile_user_name_is_refused() {
    let root = tempfile::tempdir().unwrap();
    assert!(UserStore::open(root.path(), "../evil").is_err());
    assert!(UserStore::open(root.path(), "a/b").is_err());
}

#[test]
fn stored_config_roundtrips_and_validates() {
    let root = tempfile::tempdir().unwrap();
    let store = UserStore::open(root.path(), "nico").unwrap();

    assert_eq!(store.load_config().unwrap(), None);

    let mut dto = fdk_config::ChallengeConfigDto::default();
    dto.daily_loss_limit = 250;
    store.save_config_dto(&dto).unwrap();

    let cfg = store.load_config().unwrap().unwrap();
    assert_eq!(cfg.daily_loss_limit, Micros::from_dollars(250));

    // Invalid configs never reach disk.
    dto.risk_floor = 200;
    assert!(store.save_config_dto(&dto).is_err());
    assert_eq!(
        store.load_config().unwrap().unwrap().daily_loss_limit,
        Micros::from_dollars(250)
    );
}
