//! Loading level snapshots from disk.

use anyhow::{Context, Result};
use fragseek_media::{LevelDetails, MediaPlaylist};
use std::path::Path;

/// Load a level from an `.m3u8` media playlist or a `.json` snapshot.
pub fn load_level(path: &Path) -> Result<LevelDetails> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read playlist: {:?}", path))?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let level = if is_json {
        LevelDetails::from_json(&content)
            .with_context(|| format!("Failed to load level snapshot: {:?}", path))?
    } else {
        MediaPlaylist::parse(&content)
            .with_context(|| format!("Failed to parse playlist: {:?}", path))?
            .to_level_details()
    };

    tracing::debug!(
        fragments = level.fragments.len(),
        start_sn = level.start_sn,
        live = level.live,
        "Loaded level from {:?}",
        path
    );
    Ok(level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_m3u8() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("level.m3u8");
        fs::write(&path, "#EXTM3U\n#EXTINF:4,\na.ts\n#EXTINF:4,\nb.ts\n#EXT-X-ENDLIST\n").unwrap();

        let level = load_level(&path).unwrap();
        assert_eq!(level.fragments.len(), 2);
        assert!(!level.live);
    }

    #[test]
    fn test_load_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("level.JSON");
        fs::write(
            &path,
            r#"{"fragments":[{"sn":3,"start":0,"duration":2},{"sn":4,"start":2,"duration":2}]}"#,
        )
        .unwrap();

        let level = load_level(&path).unwrap();
        assert_eq!(level.start_sn, 3);
        assert_eq!(level.end(), 4.0);
    }

    #[test]
    fn test_load_invalid_json_sequence() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("level.json");
        fs::write(
            &path,
            r#"{"fragments":[{"sn":4,"start":0,"duration":2},{"sn":3,"start":2,"duration":2}]}"#,
        )
        .unwrap();

        let err = load_level(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Invalid fragment sequence"));
    }
}
