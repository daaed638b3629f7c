use flipside_core::SessionConfig;
use std::path::Path;

/// Read a session config from a TOML file, missing keys keep their defaults.
pub(crate) fn load(path: &Path) -> anyhow::Result<SessionConfig> {
    let text = std::fs::read_to_string(path)?;
    parse(&text)
}

pub(crate) fn parse(text: &str) -> anyhow::Result<SessionConfig> {
    let config: SessionConfig = toml::from_str(text)?;
    if config.levels_per_step == 0 {
        log::warn!("levels_per_step of 0 treated as 1");
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(parse("").unwrap(), SessionConfig::default());
    }

    #[test]
    fn partial_timings() {
        let config = parse(
            r#"
            levels_per_step = 2

            [timings]
            preview_ms = 1000
            interstitial_ms = 750
            "#,
        )
        .unwrap();

        assert_eq!(config.levels_per_step, 2);
        assert_eq!(config.timings.preview_ms, 1000);
        assert_eq!(config.timings.interstitial_ms, 750);
        assert_eq!(config.timings.mismatch_ms, 300);
    }

    #[test]
    fn wrong_types_are_rejected() {
        assert!(parse("levels_per_step = \"three\"").is_err());
    }
}
