use serde::Serialize;

use crate::config::PublicAppConfig;
use crate::dashboard::{DashboardAction, InitialRender, RenderPass};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct DashboardSnapshot {
    pub config: PublicAppConfig,
    pub initial: InitialRender,
}

#[tauri::command]
pub fn dashboard_snapshot(state: tauri::State<'_, AppState>) -> DashboardSnapshot {
    DashboardSnapshot {
        config: state.config.public_profile(),
        initial: state.dashboard.lock().initial_render(),
    }
}

#[tauri::command]
pub fn map_setup(
    state: tauri::State<'_, AppState>,
) -> Result<Option<serde_json::Value>, String> {
    state
        .dashboard
        .lock()
        .map_setup()
        .map(|setup| serde_json::to_value(setup).map_err(|err| err.to_string()))
        .transpose()
}

#[tauri::command]
pub fn toggle_country(state: tauri::State<'_, AppState>, name: String) -> Option<RenderPass> {
    state.apply(DashboardAction::Toggle(name))
}

#[tauri::command]
pub fn set_country_checked(
    state: tauri::State<'_, AppState>,
    name: String,
    checked: bool,
) -> Option<RenderPass> {
    state.apply(DashboardAction::SetChecked { name, checked })
}

#[tauri::command]
pub fn select_all_countries(state: tauri::State<'_, AppState>) -> Option<RenderPass> {
    state.apply(DashboardAction::SelectAll)
}

#[tauri::command]
pub fn clear_selection(state: tauri::State<'_, AppState>) -> Option<RenderPass> {
    state.apply(DashboardAction::Clear)
}

#[tauri::command]
pub fn set_search_text(state: tauri::State<'_, AppState>, text: String) -> Option<RenderPass> {
    state.apply(DashboardAction::Search(text))
}

#[tauri::command]
pub fn map_feature_click(state: tauri::State<'_, AppState>, name: String) -> Option<RenderPass> {
    state.apply(DashboardAction::MapClick(name))
}
