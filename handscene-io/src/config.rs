//! TOML configuration loading

use handscene_core::{Error, HandsceneConfig, Result};
use std::fs;
use std::path::Path;
use tracing::info;

/// Parse and validate a configuration document
pub fn parse_config(content: &str) -> Result<HandsceneConfig> {
    let config: HandsceneConfig = toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

/// Load a configuration file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<HandsceneConfig> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Load a configuration file, falling back to defaults when it does not exist
///
/// A file that exists but does not parse is still an error.
pub fn load_config_or_default<P: AsRef<Path>>(path: P) -> Result<HandsceneConfig> {
    let path = path.as_ref();
    if !path.exists() {
        info!(path = %path.display(), "no config file, using defaults");
        return Ok(HandsceneConfig::default());
    }
    let config = load_config(path)?;
    info!(path = %path.display(), "loaded config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use handscene_core::{Delegate, Rgb};

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(parse_config("").unwrap(), HandsceneConfig::default());
    }

    #[test]
    fn test_partial_sections() {
        let config = parse_config(
            r##"
            [scene]
            zoom = 40.0

            [tool]
            touch_radius = 2.0
            touch_color = "#FF0000"

            [tracker]
            delegate = "gpu"
            num_hands = 1
            "##,
        )
        .unwrap();

        assert_eq!(config.scene.zoom, 40.0);
        assert_eq!(config.scene.depth_scale, 5.0);
        assert_eq!(config.tool.touch_radius, 2.0);
        assert_eq!(config.tool.touch_color, Rgb::new(255, 0, 0));
        assert_eq!(config.tool.idle_color, Rgb::new(0, 255, 255));
        assert_eq!(config.tracker.delegate, Delegate::Gpu);
        assert_eq!(config.tracker.num_hands, 1);
    }

    #[test]
    fn test_bad_colour_is_config_error() {
        let result = parse_config("[skeleton]\njoint_color = \"red\"\n");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let result = parse_config("[scene]\nzoom = 0.0\n");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let config = load_config_or_default("does/not/exist/handscene.toml").unwrap();
        assert_eq!(config, HandsceneConfig::default());
    }
}
