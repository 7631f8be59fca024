use super::*;

#[test]
fn new_has_nothing_pending() {
    assert_eq!(Transitions::new().pending(), None);
}

#[test]
fn schedule_then_take_runs_once() {
    let mut t = Transitions::new();
    let token = t.schedule(Continuation::Navigate(1));
    assert_eq!(t.pending(), Some(Continuation::Navigate(1)));
    assert_eq!(t.take(token), Some(Continuation::Navigate(1)));
    assert_eq!(t.take(token), None);
    assert_eq!(t.pending(), None);
}

#[test]
fn rescheduling_invalidates_previous_token() {
    let mut t = Transitions::new();
    let old = t.schedule(Continuation::Settle);
    let new = t.schedule(Continuation::Navigate(-1));
    assert_ne!(old, new);
    assert_eq!(t.take(old), None);
    assert_eq!(t.take(new), Some(Continuation::Navigate(-1)));
}

#[test]
fn cancel_invalidates_token() {
    let mut t = Transitions::new();
    let token = t.schedule(Continuation::Navigate(1));
    assert!(t.cancel());
    assert_eq!(t.take(token), None);
    assert!(!t.cancel());
}

#[test]
fn token_from_before_cancel_stays_dead_after_new_schedule() {
    let mut t = Transitions::new();
    let stale = t.schedule(Continuation::Navigate(1));
    t.cancel();
    let fresh = t.schedule(Continuation::Settle);
    assert_eq!(t.take(stale), None);
    assert_eq!(t.take(fresh), Some(Continuation::Settle));
}
