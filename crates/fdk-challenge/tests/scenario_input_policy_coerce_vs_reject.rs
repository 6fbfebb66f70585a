use fdk_challenge::*;

fn raw(entries: &[&str]) -> Vec<String> {
    entries.iter().map(|s| s.to_string()).collect()
}

#[test]
fn coerce_turns_garbage_into_zero() {
    let amounts =
        parse_trade_amounts(&raw(&["240", "oops", ""]), InputPolicy::Coerce).unwrap();
    assert_eq!(
        amounts,
        vec![Micros::from_dollars(240), Micros::ZERO, Micros::ZERO]
    );
}

#[test]
fn reject_names_the_offending_entry() {
    let err = parse_trade_amounts(&raw(&["240", "oops"]), InputPolicy::Reject).unwrap_err();
    assert_eq!(err.index, 1);
    assert_eq!(err.raw, "oops");
    assert!(err.to_string().contains("trade 2"));
}

// An empty slot means "no trade taken" and is zero under either policy.
#[test]
fn empty_entry_is_zero_under_both_policies() {
    for policy in [InputPolicy::Coerce, InputPolicy::Reject] {
        let amounts = parse_trade_amounts(&raw(&["", "  "]), policy).unwrap();
        assert_eq!(amounts, vec![Micros::ZERO, Micros::ZERO]);
    }
}

#[test]
fn decimal_entries_parse_exactly() {
    let amounts =
        parse_trade_amounts(&raw(&["12.50", "-3.25"]), InputPolicy::Reject).unwrap();
    assert_eq!(amounts[0], Micros::new(12_500_000));
    assert_eq!(amounts[1], Micros::new(-3_250_000));
}
