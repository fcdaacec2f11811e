//! Show configuration: the JSON boundary object, its validation, and the built-in presets.

pub(crate) mod model;
pub(crate) mod presets;
pub(crate) mod validate;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::error::{SwarmError, SwarmResult};
use crate::show::validate::check_show;

pub use model::{Coloring, ImageColoring, Motion, PaletteColoring, Show};
pub use presets::PRESET_NAMES;

impl Show {
    /// Parse a show from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> SwarmResult<Self> {
        serde_json::from_reader(r).map_err(|e| SwarmError::serde(format!("parse show JSON: {e}")))
    }

    /// Parse a show from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> SwarmResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            SwarmError::validation(format!("open show JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check every field, reporting all problems at once with their JSON paths.
    pub fn validate(&self) -> SwarmResult<()> {
        check_show(self).into_result()
    }

    /// Pretty JSON form, suitable for [`Show::from_reader`].
    pub fn to_json_pretty(&self) -> SwarmResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SwarmError::serde(format!("serialize show JSON: {e}")))
    }

    /// Index of the phase named `name`, if any.
    pub fn phase_index(&self, name: &str) -> Option<usize> {
        self.phases.iter().position(|p| p.name == name)
    }
}
