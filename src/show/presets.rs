use std::collections::BTreeMap;

use crate::animation::ease::Ease;
use crate::color::palette::PaletteEntry;
use crate::formation::{FlagSpec, FormationSpec, SilhouetteSpec, StaffSpec, StationSpec};
use crate::foundation::core::Rgb;
use crate::show::model::{Coloring, ImageColoring, Motion, PaletteColoring, Show};
use crate::timeline::phase::{PhaseDef, PhaseDuration};
use crate::timeline::sequencer::EndPolicy;

/// Names accepted by [`Show::preset`].
pub const PRESET_NAMES: &[&str] = &["flag-wave", "monkey-king"];

/// Drone count used when a caller does not pick one.
pub const DEFAULT_DRONES: usize = 10_000;

impl Show {
    /// Built-in show by name (see [`PRESET_NAMES`]).
    pub fn preset(name: &str, drone_count: usize) -> Option<Self> {
        match name {
            "flag-wave" => Some(Self::flag_wave(drone_count)),
            "monkey-king" => Some(Self::monkey_king(drone_count)),
            _ => None,
        }
    }

    /// Staging grid, a 3 s launch into a flag, then an endless flutter.
    ///
    /// Clamps at the end and colors drones from the subject image.
    pub fn flag_wave(drone_count: usize) -> Self {
        let mut formations = BTreeMap::new();
        formations.insert(
            "station".to_owned(),
            FormationSpec::Station(StationSpec::default()),
        );
        formations.insert("flag".to_owned(), FormationSpec::Flag(FlagSpec::default()));

        Self {
            drone_count,
            seed: 0,
            formations,
            phases: vec![
                PhaseDef::hold("station", PhaseDuration::Seconds(1.5), "station"),
                PhaseDef::morph(
                    "launch",
                    PhaseDuration::Seconds(3.0),
                    "station",
                    "flag",
                    Ease::OutQuart,
                ),
                PhaseDef::wave("wave", PhaseDuration::Indefinite, "flag"),
            ],
            end: EndPolicy::Clamp,
            coloring: Coloring::Image(ImageColoring::default()),
            motion: Motion::default(),
        }
    }

    /// Staging grid into a body silhouette, then silhouette and staff trade places forever.
    ///
    /// The launch from the grid plays once; the loop restarts at the silhouette hold. One
    /// palette color per frame.
    pub fn monkey_king(drone_count: usize) -> Self {
        let mut formations = BTreeMap::new();
        formations.insert(
            "station".to_owned(),
            FormationSpec::Station(StationSpec::default()),
        );
        formations.insert(
            "silhouette".to_owned(),
            FormationSpec::Silhouette(SilhouetteSpec::default()),
        );
        formations.insert(
            "staff".to_owned(),
            FormationSpec::Staff(StaffSpec::default()),
        );

        let mut palettes = BTreeMap::new();
        palettes.insert(
            "station".to_owned(),
            PaletteEntry::new(hex(0x00, 0xff, 0xff), hex(0x00, 0x88, 0xff)),
        );
        palettes.insert(
            "silhouette".to_owned(),
            PaletteEntry::new(hex(0xff, 0xaa, 0x00), hex(0xff, 0x44, 0x00)),
        );
        palettes.insert(
            "staff".to_owned(),
            PaletteEntry::new(hex(0xff, 0xd7, 0x00), hex(0xff, 0x66, 0x00)),
        );

        let secs = PhaseDuration::Seconds;
        Self {
            drone_count,
            seed: 0,
            formations,
            phases: vec![
                PhaseDef::hold("station", secs(1.5), "station"),
                PhaseDef::morph("assemble", secs(3.0), "station", "silhouette", Ease::OutQuart),
                PhaseDef::hold("silhouette", secs(4.0), "silhouette"),
                PhaseDef::morph("summon", secs(3.0), "silhouette", "staff", Ease::InOutCubic),
                PhaseDef::hold("staff", secs(3.0), "staff"),
                PhaseDef::morph("return", secs(3.0), "staff", "silhouette", Ease::InOutCubic),
            ],
            end: EndPolicy::Loop { restart_at: 2 },
            coloring: Coloring::Palette(PaletteColoring {
                palettes,
                pulse_hz: 0.5,
            }),
            motion: Motion::default(),
        }
    }
}

fn hex(r: u8, g: u8, b: u8) -> Rgb {
    Rgb::new(
        f64::from(r) / 255.0,
        f64::from(g) / 255.0,
        f64::from(b) / 255.0,
    )
}

#[cfg(test)]
#[path = "../../tests/unit/show/presets.rs"]
mod tests;
