use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::aliases::{AliasResolver, AliasTable};
use crate::config::AppConfig;
use crate::dataset::Catalog;
use crate::errors::AppResult;
use crate::geo::BoundaryCollection;
use crate::map::{FeatureStyle, MapLayer, MapSetup};
use crate::render::{
    render_checklist, render_continent_summary, render_results, render_stats, render_timeline,
    StatsFragment,
};
use crate::selection::SelectionStore;
use crate::sources::{DashboardSource, LocationSource};
use crate::views;

pub type SharedDashboard = Arc<Mutex<Dashboard>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapOptions {
    pub tile_url: String,
    pub max_zoom: u8,
}

impl MapOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            tile_url: config.tile_url.clone(),
            max_zoom: config.map_max_zoom,
        }
    }
}

impl Default for MapOptions {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

/// A user interaction that may change what the dashboard shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardAction {
    Toggle(String),
    SetChecked { name: String, checked: bool },
    SelectAll,
    Clear,
    Search(String),
    MapClick(String),
}

/// Everything a selection change redraws, delivered as one update.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderPass {
    pub checklist: Option<String>,
    pub results: String,
    pub timeline: String,
    pub map_styles: Vec<FeatureStyle>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InitialRender {
    pub stats: StatsFragment,
    pub continents: String,
    pub checklist: String,
    pub map_ready: bool,
    pub pass: RenderPass,
}

pub struct Dashboard {
    catalog: Catalog,
    resolver: AliasResolver,
    selection: SelectionStore,
    map: Option<MapLayer>,
    map_options: MapOptions,
    search: String,
}

impl Dashboard {
    pub fn new(
        catalog: Catalog,
        aliases: AliasTable,
        boundaries: Option<BoundaryCollection>,
        map_options: MapOptions,
    ) -> Self {
        let resolver = AliasResolver::new(&catalog, aliases);
        let selection = SelectionStore::new(&catalog);
        Self {
            catalog,
            resolver,
            selection,
            map: boundaries.map(MapLayer::new),
            map_options,
            search: String::new(),
        }
    }

    /// Loads dataset and boundaries concurrently.
    ///
    /// A dataset failure aborts startup. A boundary failure only leaves the
    /// map uninitialized.
    pub async fn bootstrap(
        source: &dyn DashboardSource,
        aliases: AliasTable,
        map_options: MapOptions,
    ) -> AppResult<Self> {
        let (dataset, boundaries) = tokio::join!(source.load_dataset(), source.load_boundaries());
        let catalog = dataset.map_err(|err| {
            error!(?err, "dataset unavailable; dashboard cannot start");
            err
        })?;
        let boundaries = match boundaries {
            Ok(collection) => Some(collection),
            Err(err) => {
                warn!(?err, "boundary data unavailable; map stays uninitialized");
                None
            }
        };
        Ok(Self::new(catalog, aliases, boundaries, map_options))
    }

    pub async fn start(config: &AppConfig) -> AppResult<Self> {
        let aliases = AliasTable::load(config.aliases_file.as_deref())?;
        let source = LocationSource::new(config)?;
        let dashboard = Self::bootstrap(&source, aliases, MapOptions::from_config(config)).await?;
        info!(
            countries = dashboard.catalog.len(),
            map_ready = dashboard.map.is_some(),
            "dashboard ready"
        );
        Ok(dashboard)
    }

    pub fn into_shared(self) -> SharedDashboard {
        Arc::new(Mutex::new(self))
    }

    pub fn selection(&self) -> &SelectionStore {
        &self.selection
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn initial_render(&self) -> InitialRender {
        InitialRender {
            stats: render_stats(&views::global_stats(&self.catalog)),
            continents: render_continent_summary(&views::continent_summary(&self.catalog)),
            checklist: self.render_checklist(),
            map_ready: self.map.is_some(),
            pass: self.render_pass(false),
        }
    }

    /// Applies one interaction and returns the single redraw it causes.
    ///
    /// `None` means the action was ignored and nothing needs redrawing.
    pub fn apply(&mut self, action: DashboardAction) -> Option<RenderPass> {
        let rerender_checklist = match &action {
            DashboardAction::Toggle(name) => {
                if !self.selection.toggle(name) {
                    return None;
                }
                true
            }
            DashboardAction::SetChecked { name, checked } => {
                if !self.selection.set_checked(name, *checked) {
                    return None;
                }
                false
            }
            DashboardAction::SelectAll => {
                self.selection.select_all();
                true
            }
            DashboardAction::Clear => {
                self.selection.clear();
                true
            }
            DashboardAction::Search(text) => {
                self.search = text.clone();
                true
            }
            DashboardAction::MapClick(feature) => {
                let Some(target) = MapLayer::click_target(feature, &self.resolver) else {
                    debug!(feature = feature.as_str(), "map click outside dataset ignored");
                    return None;
                };
                self.selection.toggle(target);
                true
            }
        };
        debug!(?action, selected = self.selection.len(), "rendering");
        Some(self.render_pass(rerender_checklist))
    }

    pub fn map_setup(&self) -> Option<MapSetup<'_>> {
        self.map.as_ref().map(|layer| {
            layer.setup(
                &self.map_options.tile_url,
                self.map_options.max_zoom,
                &self.resolver,
                &self.selection,
            )
        })
    }

    fn render_checklist(&self) -> String {
        render_checklist(&views::checklist(&self.catalog, &self.selection, &self.search))
    }

    fn render_pass(&self, include_checklist: bool) -> RenderPass {
        RenderPass {
            checklist: include_checklist.then(|| self.render_checklist()),
            results: render_results(&views::filtered_results(&self.catalog, &self.selection)),
            timeline: render_timeline(&views::filtered_timeline(&self.catalog, &self.selection)),
            map_styles: self
                .map
                .as_ref()
                .map(|layer| layer.styles(&self.resolver, &self.selection))
                .unwrap_or_default(),
        }
    }
}
