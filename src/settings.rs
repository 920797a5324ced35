//! Optional TOML settings file
//!
//! ```toml
//! threads = 8
//!
//! [curvature]
//! superelevation_in = 4.0
//! unbalanced_superelevation_in = 3.0
//! max_speed_mph = 150.0
//! densify_spacing = 30.0
//!
//! [extraction]
//! missing_geometry = "straight_line"
//! ```

use std::path::Path;

use curvspeed_core::{CurvatureConfig, ExtractionConfig};
use serde::Deserialize;

use crate::error::CliError;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Worker threads for segment evaluation, all cores when unset
    pub threads: Option<usize>,
    pub curvature: CurvatureConfig,
    pub extraction: ExtractionConfig,
}

impl Settings {
    /// Reads settings from `path`, or returns the defaults when there is none
    pub fn load(path: Option<&Path>) -> Result<Self, CliError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let text = std::fs::read_to_string(path).map_err(|e| {
            std::io::Error::new(
                e.kind(),
                format!("Failed to read settings '{}': {}", path.display(), e),
            )
        })?;
        let settings = Self::parse(&text)?;
        tracing::debug!("Loaded settings from {}: {settings:?}", path.display());
        Ok(settings)
    }

    pub fn parse(text: &str) -> Result<Self, CliError> {
        let settings: Settings = toml::from_str(text)?;
        settings.curvature.validate()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curvspeed_core::MissingGeometryPolicy;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(Settings::parse("").unwrap(), Settings::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let settings = Settings::parse(
            r#"
            threads = 2

            [curvature]
            max_speed_mph = 110.0

            [extraction]
            missing_geometry = "skip"
            "#,
        )
        .unwrap();

        assert_eq!(settings.threads, Some(2));
        assert_eq!(settings.curvature.max_speed_mph, 110.0);
        assert_eq!(settings.curvature.densify_spacing, 30.0);
        assert_eq!(
            settings.extraction.missing_geometry,
            MissingGeometryPolicy::Skip
        );
    }

    #[test]
    fn invalid_values_are_rejected() {
        let result = Settings::parse("[curvature]\ndensify_spacing = -3.0\n");
        assert!(matches!(result, Err(CliError::Core(_))));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = Settings::parse("[curvature]\nmax_sped = 10.0\n");
        assert!(matches!(result, Err(CliError::SettingsError(_))));
    }
}
