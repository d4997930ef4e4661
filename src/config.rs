use std::path::PathBuf;
use std::time::Duration;
use std::{env, io};

use serde::Serialize;
use tracing::debug;

use crate::sources::ResourceLocation;

pub const DEFAULT_DATA_LOCATION: &str = "data.json";
pub const DEFAULT_BOUNDARIES_LOCATION: &str =
    "https://raw.githubusercontent.com/johan/world.geo.json/master/countries.geo.json";
pub const DEFAULT_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAP_MAX_ZOOM: u8 = 6;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub data_location: ResourceLocation,
    pub boundaries_location: ResourceLocation,
    pub aliases_file: Option<PathBuf>,
    pub fetch_timeout_secs: u64,
    pub tile_url: String,
    pub map_max_zoom: u8,
}

#[derive(Clone, Debug, Serialize)]
pub struct PublicAppConfig {
    pub data_location: String,
    pub boundaries_location: String,
    pub has_alias_overrides: bool,
    pub fetch_timeout_secs: u64,
    pub tile_url: String,
    pub map_max_zoom: u8,
}

impl AppConfig {
    pub fn from_env() -> Self {
        load_dotenv_if_applicable();
        Self {
            data_location: ResourceLocation::parse(
                &env::var("WORLD_TOUR_DATA").unwrap_or_else(|_| DEFAULT_DATA_LOCATION.into()),
            ),
            boundaries_location: ResourceLocation::parse(
                &env::var("WORLD_TOUR_BOUNDARIES")
                    .unwrap_or_else(|_| DEFAULT_BOUNDARIES_LOCATION.into()),
            ),
            aliases_file: env::var("WORLD_TOUR_ALIASES_FILE")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            fetch_timeout_secs: parse_u64(
                "WORLD_TOUR_FETCH_TIMEOUT_SECS",
                DEFAULT_FETCH_TIMEOUT_SECS,
            )
            .max(1),
            tile_url: env::var("WORLD_TOUR_TILE_URL")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_TILE_URL.to_string()),
            map_max_zoom: parse_u8("WORLD_TOUR_MAP_MAX_ZOOM", DEFAULT_MAP_MAX_ZOOM),
        }
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn public_profile(&self) -> PublicAppConfig {
        PublicAppConfig {
            data_location: self.data_location.to_string(),
            boundaries_location: self.boundaries_location.to_string(),
            has_alias_overrides: self.aliases_file.is_some(),
            fetch_timeout_secs: self.fetch_timeout_secs,
            tile_url: self.tile_url.clone(),
            map_max_zoom: self.map_max_zoom,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_location: ResourceLocation::parse(DEFAULT_DATA_LOCATION),
            boundaries_location: ResourceLocation::parse(DEFAULT_BOUNDARIES_LOCATION),
            aliases_file: None,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            tile_url: DEFAULT_TILE_URL.to_string(),
            map_max_zoom: DEFAULT_MAP_MAX_ZOOM,
        }
    }
}

fn load_dotenv_if_applicable() {
    if !should_load_dotenv() {
        debug!("skipping .env load outside dev mode");
        return;
    }

    if let Err(err) = dotenvy::dotenv() {
        match &err {
            dotenvy::Error::Io(io_err) if io_err.kind() == io::ErrorKind::NotFound => {}
            _ => debug!(?err, "unable to load .env file"),
        }
    }
}

fn should_load_dotenv() -> bool {
    cfg!(debug_assertions) || parse_bool("ALLOW_DOTENV", false)
}

fn parse_bool(key: &str, default: bool) -> bool {
    env::var(key)
        .map(|v| matches!(v.trim(), "1" | "true" | "TRUE" | "True"))
        .unwrap_or(default)
}

fn parse_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(default)
}

fn parse_u8(key: &str, default: u8) -> u8 {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<u8>().ok())
        .unwrap_or(default)
}
