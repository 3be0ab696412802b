//! Season timing configuration: which match clock parameters the server runs
//! with, loaded from disk with a baked-in season table as fallback.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::{info, warn};

use crate::state::timer::{CueCheckpoint, CueKind, TimerSettings};

/// Default location on disk where the server looks for the JSON season table.
const DEFAULT_CONFIG_PATH: &str = "config/seasons.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "ARENA_LIVE_BACK_CONFIG_PATH";
/// Environment variable selecting the active season by name.
const SEASON_ENV: &str = "ARENA_LIVE_BACK_SEASON";
/// Season used when nothing is selected.
const DEFAULT_SEASON: &str = "pegboard-2024";

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    seasons: IndexMap<String, TimerSettings>,
    active: String,
}

impl AppConfig {
    /// Load the season table from disk and pick the active season from the
    /// environment, falling back to the built-in table and default season.
    pub fn load() -> Self {
        let seasons = load_seasons();
        let active = resolve_active_season(&seasons);
        info!(season = %active, "selected match timing season");
        Self { seasons, active }
    }

    /// Name of the active season.
    pub fn season(&self) -> &str {
        &self.active
    }

    /// Match clock parameters of the active season.
    pub fn timer_settings(&self) -> TimerSettings {
        self.seasons[&self.active].clone()
    }

    /// Names of all known seasons, in table order.
    pub fn season_names(&self) -> Vec<String> {
        self.seasons.keys().cloned().collect()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seasons: builtin_seasons(),
            active: DEFAULT_SEASON.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
/// JSON representation of the season table file.
struct RawConfig {
    seasons: IndexMap<String, RawSeason>,
}

#[derive(Debug, Deserialize)]
/// JSON representation of a single season's clock parameters.
struct RawSeason {
    phase1_seconds: u32,
    transition_offset_seconds: u32,
    #[serde(default = "default_transition_countdown")]
    transition_countdown_seconds: u32,
    phase2_seconds: u32,
    #[serde(default = "default_imminent_offset")]
    imminent_cue_offset_seconds: u32,
    #[serde(default)]
    checkpoints: Vec<RawCheckpoint>,
}

#[derive(Debug, Deserialize)]
/// JSON representation of a remaining-time cue mark.
struct RawCheckpoint {
    at_remaining: u32,
    cue: CueKind,
}

fn default_transition_countdown() -> u32 {
    8
}

fn default_imminent_offset() -> u32 {
    3
}

impl From<RawSeason> for TimerSettings {
    fn from(value: RawSeason) -> Self {
        Self {
            phase1_seconds: value.phase1_seconds,
            transition_offset_seconds: value.transition_offset_seconds,
            transition_countdown_seconds: value.transition_countdown_seconds,
            phase2_seconds: value.phase2_seconds,
            imminent_cue_offset_seconds: value.imminent_cue_offset_seconds,
            checkpoints: value
                .checkpoints
                .into_iter()
                .map(|raw| CueCheckpoint {
                    at_remaining: raw.at_remaining,
                    cue: raw.cue,
                })
                .collect(),
        }
    }
}

/// Read the season table from disk, merging file entries over the built-ins
/// so a partial file can override a single season.
fn load_seasons() -> IndexMap<String, TimerSettings> {
    let mut seasons = builtin_seasons();
    let path = resolve_config_path();

    match fs::read_to_string(&path) {
        Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
            Ok(raw) => {
                let count = raw.seasons.len();
                merge_raw_seasons(&mut seasons, raw);
                info!(path = %path.display(), count, "loaded season table from config");
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to parse season table; using built-in seasons"
                );
            }
        },
        Err(err) if err.kind() == ErrorKind::NotFound => {
            info!(
                path = %path.display(),
                "season table not found; using built-in seasons"
            );
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                error = %err,
                "failed to read season table; using built-in seasons"
            );
        }
    }

    seasons
}

/// Merge file entries over the table, dropping seasons whose parameters can
/// never produce a transition. The transition fires when phase 1's remaining
/// time falls to the offset, so the offset must be below the phase duration.
fn merge_raw_seasons(seasons: &mut IndexMap<String, TimerSettings>, raw: RawConfig) {
    for (name, season) in raw.seasons {
        if season.transition_offset_seconds >= season.phase1_seconds {
            warn!(
                season = %name,
                phase1_seconds = season.phase1_seconds,
                transition_offset_seconds = season.transition_offset_seconds,
                "transition offset not below phase 1 duration; ignoring season entry"
            );
            continue;
        }
        seasons.insert(name, season.into());
    }
}

/// Pick the active season from the environment, falling back to the default
/// (or the table's first entry when even the default is missing).
fn resolve_active_season(seasons: &IndexMap<String, TimerSettings>) -> String {
    let requested = env::var(SEASON_ENV).ok().filter(|name| !name.is_empty());

    if let Some(name) = requested {
        if seasons.contains_key(&name) {
            return name;
        }
        warn!(season = %name, "unknown season requested; falling back to default");
    }

    if seasons.contains_key(DEFAULT_SEASON) {
        return DEFAULT_SEASON.to_string();
    }

    seasons
        .keys()
        .next()
        .cloned()
        .unwrap_or_else(|| DEFAULT_SEASON.to_string())
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Built-in season table shipped with the binary, one entry per game ruleset.
fn builtin_seasons() -> IndexMap<String, TimerSettings> {
    let mut seasons = IndexMap::new();

    seasons.insert(
        "pegboard-2024".to_string(),
        TimerSettings {
            phase1_seconds: 150,
            transition_offset_seconds: 120,
            transition_countdown_seconds: 8,
            phase2_seconds: 120,
            imminent_cue_offset_seconds: 3,
            checkpoints: vec![CueCheckpoint {
                at_remaining: 30,
                cue: CueKind::EndgameStart,
            }],
        },
    );

    seasons.insert(
        "ringfall-2025".to_string(),
        TimerSettings {
            phase1_seconds: 120,
            transition_offset_seconds: 90,
            transition_countdown_seconds: 8,
            phase2_seconds: 120,
            imminent_cue_offset_seconds: 3,
            checkpoints: vec![
                CueCheckpoint {
                    at_remaining: 40,
                    cue: CueKind::RingWarning,
                },
                CueCheckpoint {
                    at_remaining: 15,
                    cue: CueKind::EndgameStart,
                },
            ],
        },
    );

    seasons
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_table_contains_the_default_season() {
        let seasons = builtin_seasons();
        let settings = &seasons[DEFAULT_SEASON];
        assert_eq!(settings.phase1_seconds, 150);
        assert_eq!(settings.transition_offset_seconds, 120);
        assert_eq!(settings.transition_countdown_seconds, 8);
        assert_eq!(settings.phase2_seconds, 120);
    }

    #[test]
    fn raw_season_parses_with_defaults() {
        let raw: RawConfig = serde_json::from_str(
            r#"{
                "seasons": {
                    "test-season": {
                        "phase1_seconds": 90,
                        "transition_offset_seconds": 60,
                        "phase2_seconds": 100,
                        "checkpoints": [
                            { "at_remaining": 20, "cue": "endgame_start" }
                        ]
                    }
                }
            }"#,
        )
        .expect("season table should parse");

        let settings: TimerSettings = raw
            .seasons
            .into_iter()
            .next()
            .map(|(_, season)| season.into())
            .expect("one season");

        assert_eq!(settings.phase1_seconds, 90);
        assert_eq!(settings.transition_countdown_seconds, 8);
        assert_eq!(settings.imminent_cue_offset_seconds, 3);
        assert_eq!(settings.checkpoints.len(), 1);
        assert_eq!(settings.checkpoints[0].cue, CueKind::EndgameStart);
    }

    #[test]
    fn season_with_unreachable_transition_is_dropped() {
        let raw: RawConfig = serde_json::from_str(
            r#"{
                "seasons": {
                    "broken-season": {
                        "phase1_seconds": 60,
                        "transition_offset_seconds": 60,
                        "phase2_seconds": 100
                    },
                    "pegboard-2024": {
                        "phase1_seconds": 140,
                        "transition_offset_seconds": 110,
                        "phase2_seconds": 110
                    }
                }
            }"#,
        )
        .expect("season table should parse");

        let mut seasons = builtin_seasons();
        merge_raw_seasons(&mut seasons, raw);

        assert!(!seasons.contains_key("broken-season"));
        // The valid override still lands.
        assert_eq!(seasons[DEFAULT_SEASON].phase1_seconds, 140);
    }

    #[test]
    fn fallback_uses_first_entry_when_default_is_absent() {
        let mut seasons = builtin_seasons();
        seasons.shift_remove(DEFAULT_SEASON);
        let active = resolve_active_season(&seasons);
        assert_eq!(active, "ringfall-2025");
    }
}
