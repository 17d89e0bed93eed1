use anyhow::{bail, Context, Result};
use pilot_core::RoutineDurations;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::state::ensure_pilot_home;

pub const DIRECTIONS_KEY_ENV: &str = "LIFEPILOT_DIRECTIONS_KEY";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub profile: ProfileSection,
    pub routine: RoutineDurations,
    pub directions: DirectionsSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileSection {
    /// IANA zone used to read `--start` and print milestones.
    pub timezone: String,
    /// Origin for travel estimates.
    pub home_address: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectionsSection {
    pub base_url: String,
    /// driving | walking | bicycling | transit
    pub mode: String,
    /// Prefer the env var; this is for single-user machines.
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ProfileSection {
    fn default() -> Self {
        Self {
            timezone: "America/Chicago".to_string(),
            home_address: None,
        }
    }
}

impl Default for DirectionsSection {
    fn default() -> Self {
        Self {
            base_url: "https://maps.googleapis.com/maps/api/directions/json".to_string(),
            mode: "driving".to_string(),
            api_key: None,
            timeout_secs: 10,
        }
    }
}

impl DirectionsSection {
    /// Env var wins over the config file.
    pub fn resolve_api_key(&self) -> Option<String> {
        std::env::var(DIRECTIONS_KEY_ENV)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| self.api_key.clone())
    }
}

/// Keep the first and last four characters; keys of eight or fewer
/// characters are masked entirely so nothing of a short key leaks.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}{}{tail}", "*".repeat(chars.len() - 8))
}

impl Config {
    /// Copy safe to print: secrets replaced by their masked form.
    pub fn redacted(&self) -> Config {
        let mut out = self.clone();
        out.directions.api_key = out.directions.api_key.as_deref().map(mask_secret);
        out
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_pilot_home()?.join("config.toml"))
}

pub fn load_config() -> Result<Config> {
    let p = config_path()?;
    if !p.exists() {
        tracing::debug!(path = %p.display(), "no config file, using defaults");
        return Ok(Config::default());
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    let cfg: Config = toml::from_str(&s).context("parse config.toml")?;
    cfg.routine
        .validate()
        .with_context(|| format!("invalid [routine] in {}", p.display()))?;
    Ok(cfg)
}

pub fn save_config(cfg: &Config) -> Result<()> {
    let p = config_path()?;
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(&p, s).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default())?;
    println!("Wrote {}", p.display());
    Ok(())
}

/// Store the directions API key in config.toml, returning its masked form.
pub fn set_directions_key(key: &str) -> Result<String> {
    let key = key.trim();
    if key.is_empty() {
        bail!("API key cannot be empty");
    }
    let mut cfg = load_config()?;
    cfg.directions.api_key = Some(key.to_string());
    save_config(&cfg)?;
    Ok(mask_secret(key))
}

/// Remove a stored directions API key. Returns false if none was set.
pub fn unset_directions_key() -> Result<bool> {
    let mut cfg = load_config()?;
    if cfg.directions.api_key.take().is_none() {
        return Ok(false);
    }
    save_config(&cfg)?;
    Ok(true)
}
