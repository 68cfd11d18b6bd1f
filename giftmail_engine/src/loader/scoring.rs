//! Gift scoring configuration loader.
//!
//! Point values, quality multipliers and the birthday multiplier come from
//! `scoring.toml`. Missing keys take their default values, and an unreadable
//! file falls back to the defaults entirely.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, ensure};
use log::{info, warn};

use crate::gift_taste::GiftScoring;

/// Loads gift scoring from a TOML file, falling back to defaults on error.
///
/// Never fails. Problems with the file are logged at `warn!`.
pub fn load_scoring(toml_path: &Path) -> GiftScoring {
    match try_load_scoring(toml_path) {
        Ok(scoring) => {
            info!("gift scoring loaded from '{}'", toml_path.display());
            scoring
        },
        Err(e) => {
            warn!(
                "Could not load gift scoring from '{}': {e:#}. Using hardcoded defaults.",
                toml_path.display()
            );
            GiftScoring::default()
        },
    }
}

/// Attempts to load gift scoring from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed, or holds a negative multiplier.
fn try_load_scoring(toml_path: &Path) -> Result<GiftScoring> {
    let text = fs::read_to_string(toml_path)
        .with_context(|| format!("reading scoring data from '{}'", toml_path.display()))?;
    let scoring: GiftScoring =
        toml::from_str(&text).with_context(|| format!("parsing scoring data from '{}'", toml_path.display()))?;

    let multipliers = [
        scoring.quality.silver,
        scoring.quality.gold,
        scoring.quality.iridium,
        scoring.birthday_multiplier,
    ];
    ensure!(
        multipliers.iter().all(|m| m.is_finite() && *m >= 0.0),
        "multipliers must be finite and non-negative"
    );
    Ok(scoring)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let file = write_temp("birthday_multiplier = 5.0\n[points]\nloved = 100\n");
        let scoring = load_scoring(file.path());
        assert!((scoring.birthday_multiplier - 5.0).abs() < f64::EPSILON);
        assert_eq!(scoring.points.loved, 100);
        assert_eq!(scoring.points.liked, 45);
        assert_eq!(scoring.quality, GiftScoring::default().quality);
    }

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let scoring = load_scoring(&dir.path().join("nope.toml"));
        assert_eq!(scoring, GiftScoring::default());
    }

    #[test]
    fn garbage_and_negative_multipliers_use_defaults() {
        let garbage = write_temp("points = \"lots\"");
        assert_eq!(load_scoring(garbage.path()), GiftScoring::default());

        let negative = write_temp("[quality]\ngold = -2.0\n");
        assert_eq!(load_scoring(negative.path()), GiftScoring::default());
    }
}
