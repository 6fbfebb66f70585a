use fdk_challenge::{ChallengeStatus, Micros, Phase};
use fdk_pipeline::{confirm_phase_advance, Session};
use fdk_store::UserStore;

#[test]
fn confirmation_is_written_through_to_the_store() {
    let root = tempfile::tempdir().unwrap();
    let store = UserStore::open(root.path(), "nico").unwrap();

    // Park a session at the pending gate.
    let mut dto = fdk_config::ChallengeConfigDto::default();
    dto.phase_advance_confirmation = true;
    store.save_config_dto(&dto).unwrap();

    let mut session = Session::open(&store).unwrap();
    session.state.balance = Micros::from_dollars(6_480);
    session.state.peak_balance = Micros::from_dollars(6_480);
    session.state.status = ChallengeStatus::PendingPhaseAdvance;
    store.save_state(&session.state).unwrap();

    confirm_phase_advance(&store, &mut session).unwrap();
    assert_eq!(session.state.phase, Phase::Two);
    assert_eq!(session.state.status, ChallengeStatus::Ongoing);

    // A reopened session sees the confirmed transition.
    let reopened = Session::open(&store).unwrap();
    assert_eq!(reopened.state, session.state);
}

#[test]
fn confirmation_without_pending_state_fails_and_persists_nothing() {
    let root = tempfile::tempdir().unwrap();
    let store = UserStore::open(root.path(), "nico").unwrap();
    let mut session = Session::open(&store).unwrap();

    assert!(confirm_phase_advance(&store, &mut session).is_err());
    assert_eq!(store.load_state().unwrap(), None);
}
