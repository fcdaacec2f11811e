use super::*;

fn secs(v: &[f64]) -> Vec<PhaseDuration> {
    v.iter().copied().map(PhaseDuration::Seconds).collect()
}

#[test]
fn starts_at_phase_zero() {
    let seq = Sequencer::new(secs(&[1.0, 2.0]), EndPolicy::Clamp).unwrap();
    assert_eq!(seq.state(), SequencerState::default());
    assert_eq!(seq.progress(), 0.0);
    assert_eq!(seq.len(), 2);
}

#[test]
fn exact_duration_moves_to_next_phase() {
    let mut seq = Sequencer::new(secs(&[1.0, 2.0]), EndPolicy::Clamp).unwrap();
    for _ in 0..3 {
        let t = seq.advance(0.25);
        assert_eq!(t.phase_index, 0);
        assert!(!t.changed);
    }
    let t = seq.advance(0.25);
    assert_eq!(t.phase_index, 1);
    assert!(t.changed);
    assert_eq!(seq.state().phase_elapsed, 0.0);
    assert_eq!(t.progress, 0.0);
}

#[test]
fn remainder_carries_into_next_phase() {
    let mut seq = Sequencer::new(secs(&[1.0, 2.0]), EndPolicy::Clamp).unwrap();
    let t = seq.advance(1.5);
    assert_eq!(t.phase_index, 1);
    assert_eq!(seq.state().phase_elapsed, 0.5);
    assert_eq!(t.progress, 0.25);
    assert_eq!(t.global_elapsed, 1.5);
}

#[test]
fn one_advance_can_cross_several_phases() {
    let mut seq = Sequencer::new(secs(&[0.5, 0.5, 4.0]), EndPolicy::Clamp).unwrap();
    let t = seq.advance(1.25);
    assert_eq!(t.phase_index, 2);
    assert_eq!(seq.state().phase_elapsed, 0.25);
}

#[test]
fn clamp_holds_last_phase() {
    let mut seq = Sequencer::new(secs(&[1.0, 1.0]), EndPolicy::Clamp).unwrap();
    seq.advance(5.0);
    let t = seq.advance(1.0);
    assert_eq!(t.phase_index, 1);
    assert_eq!(t.progress, 1.0);
    assert!(!t.changed);
}

#[test]
fn indefinite_phase_never_ends() {
    let mut durations = secs(&[1.0]);
    durations.push(PhaseDuration::Indefinite);
    let mut seq = Sequencer::new(durations, EndPolicy::Clamp).unwrap();
    seq.advance(1.0);
    for _ in 0..100 {
        let t = seq.advance(10.0);
        assert_eq!(t.phase_index, 1);
        assert_eq!(t.progress, 0.0);
    }
    assert_eq!(seq.state().global_elapsed, 1001.0);
}

#[test]
fn loop_with_skip_revisits_interior_phase() {
    let mut seq = Sequencer::new(secs(&[1.0, 1.0, 1.0]), EndPolicy::Loop { restart_at: 1 }).unwrap();
    let mut visited = Vec::new();
    for _ in 0..8 {
        visited.push(seq.advance(0.5).phase_index);
    }
    // 0.5 1.0 | 1.5 2.0 | 2.5 3.0 | 3.5 4.0
    assert_eq!(visited, vec![0, 1, 1, 2, 2, 1, 1, 2]);
    assert!(!visited[2..].contains(&0));
}

#[test]
fn loop_to_zero_cycles_everything() {
    let mut seq = Sequencer::new(secs(&[1.0, 1.0]), EndPolicy::Loop { restart_at: 0 }).unwrap();
    let t = seq.advance(2.0);
    assert_eq!(t.phase_index, 0);
    assert!(t.changed);
}

#[test]
fn shortest_loop_cycle_still_returns() {
    let mut seq = Sequencer::new(
        secs(&[1.0, MIN_PHASE_SECONDS]),
        EndPolicy::Loop { restart_at: 1 },
    )
    .unwrap();
    let t = seq.advance(1.1);
    assert_eq!(t.phase_index, 1);
    assert!(t.changed);
    assert!(seq.state().phase_elapsed < MIN_PHASE_SECONDS);
}

#[test]
fn huge_advance_skips_whole_loop_cycles() {
    let mut seq =
        Sequencer::new(secs(&[1.0, 0.5, 0.25]), EndPolicy::Loop { restart_at: 1 }).unwrap();
    let t = seq.advance(1e12);
    assert!(t.phase_index == 1 || t.phase_index == 2);
    assert!(seq.state().phase_elapsed < 0.75);
    assert!(t.progress.is_finite());
}

#[test]
fn cycle_skip_keeps_the_remainder() {
    let mut seq =
        Sequencer::new(secs(&[1.0, 0.5, 0.25]), EndPolicy::Loop { restart_at: 1 }).unwrap();
    // Opening phase, four full cycles, then 0.1 s into phase 1.
    let t = seq.advance(1.0 + 4.0 * 0.75 + 0.1);
    assert_eq!(t.phase_index, 1);
    assert!((seq.state().phase_elapsed - 0.1).abs() < 1e-9);
}

#[test]
fn reset_restores_initial_state() {
    let mut seq = Sequencer::new(secs(&[1.0, 1.0]), EndPolicy::Loop { restart_at: 1 }).unwrap();
    seq.advance(3.7);
    seq.reset();
    assert_eq!(seq.state(), SequencerState::default());
}

#[test]
fn negative_and_nan_deltas_are_ignored() {
    let mut seq = Sequencer::new(secs(&[1.0]), EndPolicy::Clamp).unwrap();
    seq.advance(-1.0);
    seq.advance(f64::NAN);
    assert_eq!(seq.state(), SequencerState::default());
}

#[test]
fn rejects_bad_configuration() {
    assert!(Sequencer::new(Vec::new(), EndPolicy::Clamp).is_err());
    assert!(Sequencer::new(secs(&[0.0]), EndPolicy::Clamp).is_err());
    assert!(Sequencer::new(secs(&[-1.0]), EndPolicy::Clamp).is_err());
    assert!(Sequencer::new(secs(&[f64::NAN]), EndPolicy::Clamp).is_err());
    assert!(Sequencer::new(secs(&[1.0, 1e-20]), EndPolicy::Loop { restart_at: 1 }).is_err());
    assert!(Sequencer::new(secs(&[MIN_PHASE_SECONDS]), EndPolicy::Clamp).is_ok());
    assert!(Sequencer::new(secs(&[1.0]), EndPolicy::Loop { restart_at: 1 }).is_err());
}

#[test]
fn end_policy_json_shape() {
    let p: EndPolicy = serde_json::from_str(r#"{"policy":"loop","restart_at":2}"#).unwrap();
    assert_eq!(p, EndPolicy::Loop { restart_at: 2 });
    let p: EndPolicy = serde_json::from_str(r#"{"policy":"clamp"}"#).unwrap();
    assert_eq!(p, EndPolicy::Clamp);
}
