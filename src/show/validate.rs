use std::fmt;

use crate::formation::FormationSpec;
use crate::foundation::error::{SwarmError, SwarmResult};
use crate::show::model::{Coloring, Show};
use crate::timeline::phase::PhaseDuration;
use crate::timeline::sequencer::{EndPolicy, MIN_PHASE_SECONDS};

/// `$`-rooted location inside a show document, e.g. `$.phases[2].to`.
#[derive(Clone, Debug)]
struct JsonPath(String);

impl JsonPath {
    fn root() -> Self {
        Self("$".to_owned())
    }

    fn field(&self, name: &str) -> Self {
        Self(format!("{}.{name}", self.0))
    }

    fn index(&self, i: usize) -> Self {
        Self(format!("{}[{i}]", self.0))
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Every problem found in a show, one `path: message` line each.
#[derive(Debug, Default)]
pub(crate) struct Report {
    issues: Vec<String>,
}

impl Report {
    fn flag(&mut self, at: &JsonPath, msg: impl fmt::Display) {
        self.issues.push(format!("{at}: {msg}"));
    }

    pub(crate) fn issues(&self) -> &[String] {
        &self.issues
    }

    pub(crate) fn into_result(self) -> SwarmResult<()> {
        if self.issues.is_empty() {
            return Ok(());
        }
        Err(SwarmError::validation(format!(
            "show validation failed: {}",
            self.issues.join("\n")
        )))
    }
}

pub(crate) fn check_show(show: &Show) -> Report {
    let mut report = Report::default();
    let root = JsonPath::root();

    if show.drone_count == 0 {
        report.flag(&root.field("drone_count"), "drone_count must be > 0");
    }

    let formations = root.field("formations");
    for (name, spec) in &show.formations {
        check_formation(spec, &formations.field(name), &mut report);
    }

    check_phases(show, &mut report);
    check_coloring(show, &mut report);

    let motion = root.field("motion");
    let m = &show.motion;
    for (field, v) in [
        ("wave_amplitude", m.wave_amplitude),
        ("hover_amplitude", m.hover_amplitude),
    ] {
        if !v.is_finite() || v < 0.0 {
            report.flag(&motion.field(field), "must be finite and >= 0");
        }
    }
    if !(0.0..=0.95).contains(&m.stagger_spread) {
        report.flag(
            &motion.field("stagger_spread"),
            "stagger_spread must be in [0, 0.95]",
        );
    }

    report
}

fn check_phases(show: &Show, report: &mut Report) {
    let phases = JsonPath::root().field("phases");
    if show.phases.is_empty() {
        report.flag(&phases, "phases must not be empty");
    }

    for (i, phase) in show.phases.iter().enumerate() {
        let at = phases.index(i);

        if phase.name.trim().is_empty() {
            report.flag(&at.field("name"), "phase name must not be empty");
        }
        if let PhaseDuration::Seconds(s) = phase.duration
            && (!s.is_finite() || s < MIN_PHASE_SECONDS)
        {
            report.flag(
                &at.field("duration"),
                format_args!(
                    "duration must be finite and >= {MIN_PHASE_SECONDS} s (or \"indefinite\")"
                ),
            );
        }
        for (field, name) in phase.formation_refs() {
            if !show.formations.contains_key(name) {
                report.flag(&at.field(field), format_args!("undefined formation \"{name}\""));
            }
        }
    }

    if let EndPolicy::Loop { restart_at } = show.end
        && restart_at >= show.phases.len()
    {
        report.flag(
            &JsonPath::root().field("end").field("restart_at"),
            format_args!(
                "restart_at must be < {} (number of phases)",
                show.phases.len()
            ),
        );
    }
}

fn check_coloring(show: &Show, report: &mut Report) {
    let coloring = JsonPath::root().field("coloring");
    match &show.coloring {
        Coloring::Image(img) => {
            for (field, v) in [("yellow_boost", img.yellow_boost), ("sparkle", img.sparkle)] {
                if !v.is_finite() || v < 0.0 {
                    report.flag(&coloring.field(field), "must be finite and >= 0");
                }
            }
        }
        Coloring::Palette(pal) => {
            if !pal.pulse_hz.is_finite() || pal.pulse_hz < 0.0 {
                report.flag(
                    &coloring.field("pulse_hz"),
                    "pulse_hz must be finite and >= 0",
                );
            }
            let mut used = show
                .phases
                .iter()
                .flat_map(|p| p.formation_refs().into_iter().map(|(_, name)| name))
                .collect::<Vec<_>>();
            used.sort_unstable();
            used.dedup();
            for name in used {
                if !pal.palettes.contains_key(name) {
                    report.flag(
                        &coloring.field("palettes"),
                        format_args!("missing palette for formation \"{name}\""),
                    );
                }
            }
        }
    }
}

fn check_formation(spec: &FormationSpec, path: &JsonPath, report: &mut Report) {
    let bad_size = |v: f64| !v.is_finite() || v <= 0.0;

    match spec {
        FormationSpec::Station(s) => {
            if bad_size(s.spacing) {
                report.flag(&path.field("spacing"), "spacing must be finite and > 0");
            }
            if !s.jitter.is_finite() || s.jitter < 0.0 {
                report.flag(&path.field("jitter"), "jitter must be finite and >= 0");
            }
            if s.uv_columns == Some(0) {
                report.flag(&path.field("uv_columns"), "uv_columns must be >= 1 when set");
            }
        }
        FormationSpec::Flag(s) => {
            if s.columns == 0 {
                report.flag(&path.field("columns"), "columns must be >= 1");
            }
            if bad_size(s.width) {
                report.flag(&path.field("width"), "width must be finite and > 0");
            }
            if bad_size(s.height) {
                report.flag(&path.field("height"), "height must be finite and > 0");
            }
            if !s.lift.is_finite() {
                report.flag(&path.field("lift"), "lift must be finite");
            }
        }
        FormationSpec::Staff(s) => {
            for (field, v) in [
                ("length", s.length),
                ("radius", s.radius),
                ("cap_radius", s.cap_radius),
                ("cap_length", s.cap_length),
            ] {
                if bad_size(v) {
                    report.flag(&path.field(field), "must be finite and > 0");
                }
            }
            if !s.center_y.is_finite() {
                report.flag(&path.field("center_y"), "center_y must be finite");
            }
        }
        FormationSpec::Silhouette(s) => {
            for (i, region) in s.regions.iter().enumerate() {
                let at = path.field("regions").index(i);
                if region.radii.iter().any(|r| bad_size(*r)) {
                    report.flag(&at.field("radii"), "radii must be finite and > 0");
                }
                if region.center.iter().any(|c| !c.is_finite()) {
                    report.flag(&at.field("center"), "center must be finite");
                }
                if !region.weight.is_finite() || region.weight < 0.0 {
                    report.flag(&at.field("weight"), "weight must be finite and >= 0");
                }
            }
            let bad_box = s
                .fill
                .min
                .iter()
                .zip(s.fill.max.iter())
                .any(|(lo, hi)| !lo.is_finite() || !hi.is_finite() || lo > hi);
            if bad_box {
                report.flag(&path.field("fill"), "fill box needs finite min <= max");
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/show/validate.rs"]
mod tests;
