use super::*;
use crate::timeline::phase::PhaseKind;

#[test]
fn presets_validate() {
    for name in PRESET_NAMES {
        let show = Show::preset(name, 500).unwrap();
        show.validate().unwrap();
        assert_eq!(show.drone_count, 500);
    }
    assert!(Show::preset("nope", 10).is_none());
}

#[test]
fn flag_wave_follows_launch_timing() {
    let show = Show::flag_wave(DEFAULT_DRONES);
    let names: Vec<_> = show.phases.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["station", "launch", "wave"]);
    assert_eq!(show.phases[0].duration, PhaseDuration::Seconds(1.5));
    assert_eq!(show.phases[1].duration, PhaseDuration::Seconds(3.0));
    assert!(show.phases[2].duration.is_indefinite());
    assert_eq!(show.end, EndPolicy::Clamp);
    assert!(matches!(show.coloring, Coloring::Image(_)));
}

#[test]
fn monkey_king_loops_back_to_silhouette() {
    let show = Show::monkey_king(1000);
    let EndPolicy::Loop { restart_at } = show.end else {
        panic!("expected loop policy");
    };
    assert_eq!(show.phases[restart_at].name, "silhouette");
    assert!(matches!(
        show.phases.last().map(|p| &p.kind),
        Some(PhaseKind::Morph { to, .. }) if to == "silhouette"
    ));
}

#[test]
fn monkey_king_palettes_match_named_colors() {
    let show = Show::monkey_king(100);
    let Coloring::Palette(pal) = &show.coloring else {
        panic!("expected palette coloring");
    };
    assert_eq!(pal.palettes["station"].primary, Rgb::CYAN);
    assert_eq!(pal.palettes["staff"].primary, hex(0xff, 0xd7, 0x00));
    assert_eq!(pal.palettes.len(), 3);
}

#[test]
fn preset_round_trips_through_json() {
    let show = Show::monkey_king(64);
    let json = show.to_json_pretty().unwrap();
    let back = Show::from_reader(json.as_bytes()).unwrap();
    assert_eq!(back, show);
}
