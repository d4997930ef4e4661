use std::fmt;
use std::path::PathBuf;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::dataset::Catalog;
use crate::errors::{AppError, AppResult};
use crate::geo::BoundaryCollection;

/// Where a startup document lives: a remote URL or a local file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceLocation {
    Url(Url),
    Path(PathBuf),
}

impl ResourceLocation {
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            if let Ok(url) = Url::parse(trimmed) {
                return ResourceLocation::Url(url);
            }
        }
        ResourceLocation::Path(PathBuf::from(trimmed))
    }
}

impl fmt::Display for ResourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceLocation::Url(url) => write!(f, "{url}"),
            ResourceLocation::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

#[async_trait]
pub trait DashboardSource: Send + Sync {
    async fn load_dataset(&self) -> AppResult<Catalog>;
    async fn load_boundaries(&self) -> AppResult<BoundaryCollection>;
}

/// Fetches both documents from configured locations.
#[derive(Clone)]
pub struct LocationSource {
    http: Client,
    dataset: ResourceLocation,
    boundaries: ResourceLocation,
}

impl LocationSource {
    pub fn new(config: &AppConfig) -> AppResult<Self> {
        let http = Client::builder()
            .user_agent(concat!("world-tour-dashboard/", env!("CARGO_PKG_VERSION")))
            .timeout(config.fetch_timeout())
            .build()?;
        Ok(Self {
            http,
            dataset: config.data_location.clone(),
            boundaries: config.boundaries_location.clone(),
        })
    }

    async fn fetch(&self, location: &ResourceLocation) -> AppResult<Vec<u8>> {
        debug!(%location, "fetching");
        let bytes = match location {
            ResourceLocation::Url(url) => self
                .http
                .get(url.clone())
                .send()
                .await?
                .error_for_status()?
                .bytes()
                .await?
                .to_vec(),
            ResourceLocation::Path(path) => tokio::fs::read(path).await?,
        };
        Ok(bytes)
    }
}

#[async_trait]
impl DashboardSource for LocationSource {
    async fn load_dataset(&self) -> AppResult<Catalog> {
        let bytes = self
            .fetch(&self.dataset)
            .await
            .map_err(|err| AppError::load("dataset", err))?;
        let catalog = Catalog::from_json(&bytes).map_err(|err| AppError::load("dataset", err))?;
        info!(
            location = %self.dataset,
            countries = catalog.len(),
            "dataset loaded"
        );
        Ok(catalog)
    }

    async fn load_boundaries(&self) -> AppResult<BoundaryCollection> {
        let bytes = self
            .fetch(&self.boundaries)
            .await
            .map_err(|err| AppError::load("boundaries", err))?;
        let boundaries = BoundaryCollection::from_geojson_slice(&bytes)
            .map_err(|err| AppError::load("boundaries", err))?;
        info!(
            location = %self.boundaries,
            features = boundaries.len(),
            "boundaries loaded"
        );
        Ok(boundaries)
    }
}
