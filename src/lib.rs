mod aliases;
#[cfg(feature = "desktop")]
mod commands;
mod config;
mod dashboard;
mod dataset;
mod errors;
mod geo;
mod map;
mod render;
mod selection;
mod sources;
mod views;

use once_cell::sync::OnceCell;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub use crate::aliases::{AliasResolver, AliasTable};
pub use crate::config::{AppConfig, PublicAppConfig};
pub use crate::dashboard::{
    Dashboard, DashboardAction, InitialRender, MapOptions, RenderPass, SharedDashboard,
};
pub use crate::dataset::{Catalog, CountryRecord, CountrySummary, VideoEntry};
pub use crate::errors::{AppError, AppResult};
pub use crate::geo::{BoundaryCollection, BoundaryFeature};
pub use crate::map::{FeatureStyle, MapLayer, MapSetup, MapStyle};
pub use crate::render::{NO_COUNTRIES_SELECTED, NO_TIMELINE_ITEMS};
pub use crate::selection::SelectionStore;
pub use crate::sources::{DashboardSource, LocationSource, ResourceLocation};
pub use crate::views::{ChecklistItem, ContinentCount, GlobalStats, TimelineItem};

pub struct AppState {
    dashboard: SharedDashboard,
    config: AppConfig,
}

impl AppState {
    pub async fn initialize(config: AppConfig) -> AppResult<Self> {
        init_tracing();
        let dashboard = Dashboard::start(&config).await?;
        Ok(Self {
            dashboard: dashboard.into_shared(),
            config,
        })
    }

    /// Actions are serialized by the lock; each yields at most one render pass.
    pub fn apply(&self, action: DashboardAction) -> Option<RenderPass> {
        self.dashboard.lock().apply(action)
    }
}

pub fn init_tracing() {
    static INIT: OnceCell<()> = OnceCell::new();
    let _ = INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info,world_tour_dashboard_lib=debug"));
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    });
}

#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    use tauri::Manager;

    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .setup(|app| {
            let state = tauri::async_runtime::block_on(AppState::initialize(AppConfig::from_env()))
                .map_err(|err| -> Box<dyn std::error::Error> { Box::new(err) })?;
            app.manage(state);
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::dashboard_snapshot,
            commands::map_setup,
            commands::toggle_country,
            commands::set_country_checked,
            commands::select_all_countries,
            commands::clear_selection,
            commands::set_search_text,
            commands::map_feature_click
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
