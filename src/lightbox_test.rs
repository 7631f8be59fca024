use super::*;

// =============================================================
// Helpers
// =============================================================

const WIDTH: f64 = 1000.0;

fn core(n: usize) -> LightboxCore {
    let gallery = Gallery::new((0..n).map(|i| format!("p{i}.png")).collect()).unwrap();
    LightboxCore::new(gallery, &ViewerConfig::default())
}

fn opened(n: usize, at: usize) -> LightboxCore {
    let mut lb = core(n);
    lb.open(at).unwrap();
    lb
}

fn pt(x: f64, t_ms: f64) -> Sample {
    Sample::new(1, x, 300.0, t_ms)
}

fn scheduled(effects: &[Effect]) -> Option<(TransitionToken, u32)> {
    effects.iter().find_map(|e| match e {
        Effect::Schedule { token, after_ms } => Some((*token, *after_ms)),
        _ => None,
    })
}

fn shown(effects: &[Effect]) -> Option<&PanelView> {
    effects.iter().find_map(|e| match e {
        Effect::ShowPanel(view) => Some(view),
        _ => None,
    })
}

/// Drag left by 60 px and release; returns the release effects.
fn swipe_left(lb: &mut LightboxCore) -> Vec<Effect> {
    lb.on_pointer_down(pt(500.0, 0.0));
    lb.on_pointer_move(pt(470.0, 200.0));
    lb.on_pointer_move(pt(440.0, 400.0));
    lb.on_pointer_up(pt(440.0, 600.0), WIDTH)
}

// =============================================================
// Offset / Key
// =============================================================

#[test]
fn offset_css_values() {
    assert_eq!(Offset::Zero.css(), "");
    assert_eq!(Offset::Px(-12.5).css(), "translateX(-12.5px)");
    assert_eq!(Offset::OffScreen(1).css(), "translateX(-100vw)");
    assert_eq!(Offset::OffScreen(-1).css(), "translateX(100vw)");
}

#[test]
fn key_mapping() {
    assert_eq!(Key::from_browser("Escape"), Key::Escape);
    assert_eq!(Key::from_browser("ArrowLeft"), Key::ArrowLeft);
    assert_eq!(Key::from_browser("ArrowRight"), Key::ArrowRight);
    assert_eq!(Key::from_browser("a"), Key::Other);
}

#[test]
fn activation_keys() {
    assert!(is_activation_key("Enter"));
    assert!(is_activation_key(" "));
    assert!(!is_activation_key("Tab"));
}

// =============================================================
// open / close
// =============================================================

#[test]
fn open_shows_overlay_and_locks_scroll() {
    let mut lb = core(3);
    let effects = lb.open(1).unwrap();
    assert!(lb.is_open());
    assert!(effects.contains(&Effect::ShowOverlay));
    assert!(effects.contains(&Effect::SetScrollLock(true)));
    let view = shown(&effects).unwrap();
    assert_eq!(view.src, "p1.png");
    assert_eq!(view.counter, "2 / 3");
}

#[test]
fn open_out_of_range_is_error() {
    let mut lb = core(3);
    assert!(lb.open(3).is_err());
    assert!(!lb.is_open());
}

#[test]
fn close_hides_and_unlocks() {
    let mut lb = opened(3, 0);
    let effects = lb.close();
    assert!(!lb.is_open());
    assert_eq!(
        effects,
        vec![
            Effect::HideOverlay,
            Effect::SetScrollLock(false),
            Effect::SetTransition(None),
            Effect::SetOffset(Offset::Zero),
        ]
    );
}

#[test]
fn close_when_closed_is_noop() {
    let mut lb = core(3);
    assert!(lb.close().is_empty());
}

#[test]
fn reopen_same_index_yields_same_effects() {
    let mut lb = core(4);
    let first = lb.open(2).unwrap();
    lb.step(1);
    lb.close();
    let second = lb.open(2).unwrap();
    assert_eq!(first, second);
}

// =============================================================
// Keys, buttons, backdrop
// =============================================================

#[test]
fn arrow_keys_step_and_wrap() {
    let mut lb = opened(3, 0);
    let effects = lb.on_key(Key::ArrowLeft);
    assert_eq!(shown(&effects).unwrap().index, 2);
    let effects = lb.on_key(Key::ArrowRight);
    assert_eq!(shown(&effects).unwrap().index, 0);
}

#[test]
fn escape_closes() {
    let mut lb = opened(3, 0);
    lb.on_key(Key::Escape);
    assert!(!lb.is_open());
}

#[test]
fn keys_ignored_while_closed() {
    let mut lb = core(3);
    assert!(lb.on_key(Key::ArrowRight).is_empty());
    assert_eq!(lb.index(), 0);
}

#[test]
fn unknown_key_ignored() {
    let mut lb = opened(3, 1);
    assert!(lb.on_key(Key::Other).is_empty());
    assert_eq!(lb.index(), 1);
}

#[test]
fn controls_map_to_actions() {
    let mut lb = opened(3, 1);
    assert_eq!(shown(&lb.on_control(Control::Next)).unwrap().index, 2);
    assert_eq!(shown(&lb.on_control(Control::Prev)).unwrap().index, 1);
    lb.on_control(Control::Close);
    assert!(!lb.is_open());
}

#[test]
fn backdrop_click_closes() {
    let mut lb = opened(3, 1);
    lb.on_backdrop_click();
    assert!(!lb.is_open());
}

// =============================================================
// Drag
// =============================================================

#[test]
fn pointer_down_captures_and_suspends_transition() {
    let mut lb = opened(3, 0);
    let effects = lb.on_pointer_down(pt(500.0, 0.0));
    assert_eq!(effects, vec![Effect::CapturePointer(1), Effect::SetTransition(None)]);
    assert!(lb.is_dragging());
}

#[test]
fn pointer_down_while_closed_ignored() {
    let mut lb = core(3);
    assert!(lb.on_pointer_down(pt(500.0, 0.0)).is_empty());
    assert!(!lb.is_dragging());
}

#[test]
fn second_pointer_down_ignored() {
    let mut lb = opened(3, 0);
    lb.on_pointer_down(pt(500.0, 0.0));
    assert!(lb.on_pointer_down(Sample::new(2, 10.0, 10.0, 5.0)).is_empty());
}

#[test]
fn pointer_move_tracks_offset() {
    let mut lb = opened(3, 0);
    lb.on_pointer_down(pt(500.0, 0.0));
    let effects = lb.on_pointer_move(pt(475.0, 100.0));
    assert_eq!(effects, vec![Effect::SetOffset(Offset::Px(-25.0))]);
}

#[test]
fn tap_snaps_back_without_navigating() {
    let mut lb = opened(3, 1);
    lb.on_pointer_down(pt(500.0, 0.0));
    let effects = lb.on_pointer_up(pt(500.0, 30.0), WIDTH);
    assert!(effects.contains(&Effect::SetOffset(Offset::Zero)));
    assert!(effects.contains(&Effect::SetTransition(Some(160))));
    let (token, after) = scheduled(&effects).unwrap();
    assert_eq!(after, 160);
    assert_eq!(lb.on_transition_end(token), vec![Effect::SetTransition(None)]);
    assert_eq!(lb.index(), 1);
}

#[test]
fn swipe_left_slides_off_then_advances() {
    let mut lb = opened(3, 2);
    let effects = swipe_left(&mut lb);
    assert!(effects.contains(&Effect::SetOffset(Offset::OffScreen(1))));
    let (token, after) = scheduled(&effects).unwrap();
    assert_eq!(after, 150);
    assert_eq!(lb.index(), 2);

    let done = lb.on_transition_end(token);
    assert_eq!(done[0], Effect::SetTransition(None));
    assert_eq!(done[1], Effect::SetOffset(Offset::Zero));
    assert_eq!(shown(&done).unwrap().index, 0);
    assert_eq!(lb.index(), 0);
}

#[test]
fn swipe_right_retreats() {
    let mut lb = opened(3, 0);
    lb.on_pointer_down(pt(500.0, 0.0));
    lb.on_pointer_move(pt(530.0, 300.0));
    lb.on_pointer_move(pt(560.0, 600.0));
    let effects = lb.on_pointer_up(pt(560.0, 900.0), WIDTH);
    assert!(effects.contains(&Effect::SetOffset(Offset::OffScreen(-1))));
    let (token, _) = scheduled(&effects).unwrap();
    lb.on_transition_end(token);
    assert_eq!(lb.index(), 2);
}

#[test]
fn pointer_up_without_drag_ignored() {
    let mut lb = opened(3, 0);
    assert!(lb.on_pointer_up(pt(0.0, 0.0), WIDTH).is_empty());
}

// =============================================================
// Cancellation
// =============================================================

#[test]
fn close_mid_fling_does_not_resurrect() {
    let mut lb = opened(3, 0);
    let effects = swipe_left(&mut lb);
    let (token, _) = scheduled(&effects).unwrap();
    lb.close();
    assert!(lb.on_transition_end(token).is_empty());
    assert!(!lb.is_open());
    assert_eq!(lb.index(), 0);
}

#[test]
fn reopen_before_stale_timer_fires_ignores_it() {
    let mut lb = opened(3, 0);
    let (token, _) = scheduled(&swipe_left(&mut lb)).unwrap();
    lb.close();
    lb.open(1).unwrap();
    assert!(lb.on_transition_end(token).is_empty());
    assert_eq!(lb.index(), 1);
}

#[test]
fn close_mid_drag_drops_session() {
    let mut lb = opened(3, 0);
    lb.on_pointer_down(pt(500.0, 0.0));
    lb.close();
    assert!(!lb.is_dragging());
}

#[test]
fn pointer_down_during_fling_ignored() {
    let mut lb = opened(3, 0);
    swipe_left(&mut lb);
    assert!(lb.on_pointer_down(pt(200.0, 700.0)).is_empty());
    assert!(!lb.is_dragging());
}

#[test]
fn pointer_down_during_snap_back_supersedes_it() {
    let mut lb = opened(3, 0);
    lb.on_pointer_down(pt(500.0, 0.0));
    let (token, _) = scheduled(&lb.on_pointer_up(pt(505.0, 50.0), WIDTH)).unwrap();
    assert!(!lb.on_pointer_down(pt(500.0, 60.0)).is_empty());
    assert!(lb.on_transition_end(token).is_empty());
    assert!(lb.is_dragging());
}

#[test]
fn arrow_during_fling_completes_it_first() {
    let mut lb = opened(5, 0);
    let (token, _) = scheduled(&swipe_left(&mut lb)).unwrap();
    let effects = lb.on_key(Key::ArrowRight);
    assert_eq!(lb.index(), 2);
    assert!(effects.contains(&Effect::SetOffset(Offset::Zero)));
    assert!(lb.on_transition_end(token).is_empty());
    assert_eq!(lb.index(), 2);
}

#[test]
fn single_panel_gallery_wraps_to_itself() {
    let mut lb = opened(1, 0);
    let (token, _) = scheduled(&swipe_left(&mut lb)).unwrap();
    let done = lb.on_transition_end(token);
    assert_eq!(shown(&done).unwrap().counter, "1 / 1");
}
