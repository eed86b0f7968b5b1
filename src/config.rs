//! Locations of the two JSON side files (env overrides, cwd defaults).

use std::env;
use std::path::PathBuf;

/// Path of the last-session cache file.
///
/// Reads the `SPYGAME_CACHE_FILE` env var or defaults to
/// `player_cache.json` in the working directory.
pub fn cache_file() -> PathBuf {
    env::var("SPYGAME_CACHE_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("player_cache.json"))
}

/// Path of the custom-locations file.
///
/// Reads the `SPYGAME_LOCATIONS_FILE` env var or defaults to
/// `custom_locations.json` in the working directory.
pub fn locations_file() -> PathBuf {
    env::var("SPYGAME_LOCATIONS_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("custom_locations.json"))
}
