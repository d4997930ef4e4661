use serde::Serialize;
use serde_json::Value;

use crate::aliases::AliasResolver;
use crate::geo::{BoundaryCollection, BoundaryFeature};
use crate::selection::SelectionStore;

const BORDER_COLOR: &str = "#1f2937";
const BORDER_WEIGHT: u8 = 1;
const HOVER_BORDER_WEIGHT: u8 = 2;
const VISITED_FILL: &str = "#34d399";
const VISITED_OPACITY: f32 = 0.65;
const UNVISITED_FILL: &str = "#0b1120";
const UNVISITED_OPACITY: f32 = 0.25;

pub const MAP_CENTER: [f64; 2] = [20.0, 0.0];
pub const MAP_INITIAL_ZOOM: u8 = 2;
pub const MAP_ATTRIBUTION: &str = "&copy; OpenStreetMap";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapStyle {
    pub color: &'static str,
    pub weight: u8,
    pub fill_color: &'static str,
    pub fill_opacity: f32,
}

impl MapStyle {
    pub fn for_state(visited: bool) -> Self {
        if visited {
            Self {
                color: BORDER_COLOR,
                weight: BORDER_WEIGHT,
                fill_color: VISITED_FILL,
                fill_opacity: VISITED_OPACITY,
            }
        } else {
            Self {
                color: BORDER_COLOR,
                weight: BORDER_WEIGHT,
                fill_color: UNVISITED_FILL,
                fill_opacity: UNVISITED_OPACITY,
            }
        }
    }

}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureStyle {
    pub name: String,
    pub visited: bool,
    pub style: MapStyle,
}

#[derive(Debug, Clone, Serialize)]
pub struct MapFeatureView<'a> {
    pub name: &'a str,
    pub tooltip: &'a str,
    pub geometry: &'a Value,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapSetup<'a> {
    pub tile_url: &'a str,
    pub max_zoom: u8,
    pub attribution: &'static str,
    pub center: [f64; 2],
    pub zoom: u8,
    /// Border weight the widget applies locally while a feature is hovered.
    pub hover_weight: u8,
    pub features: Vec<MapFeatureView<'a>>,
    pub styles: Vec<FeatureStyle>,
}

/// Choropleth layer over the boundary features.
#[derive(Debug, Clone, Default)]
pub struct MapLayer {
    boundaries: BoundaryCollection,
}

impl MapLayer {
    pub fn new(boundaries: BoundaryCollection) -> Self {
        Self { boundaries }
    }

    pub fn features(&self) -> &[BoundaryFeature] {
        &self.boundaries.features
    }

    pub fn is_visited(
        name: &str,
        resolver: &AliasResolver,
        selection: &SelectionStore,
    ) -> bool {
        selection.contains(name) || resolver.is_visited_by_alias(name, selection)
    }

    /// Full restyle, one entry per feature in layer order.
    pub fn styles(&self, resolver: &AliasResolver, selection: &SelectionStore) -> Vec<FeatureStyle> {
        self.features()
            .iter()
            .map(|feature| {
                let visited = Self::is_visited(&feature.name, resolver, selection);
                FeatureStyle {
                    name: feature.name.clone(),
                    visited,
                    style: MapStyle::for_state(visited),
                }
            })
            .collect()
    }

    /// Canonical country a click on `name` should toggle, if any.
    pub fn click_target<'r>(name: &str, resolver: &'r AliasResolver) -> Option<&'r str> {
        resolver.resolve_canonical(name)
    }

    pub fn setup<'a>(
        &'a self,
        tile_url: &'a str,
        max_zoom: u8,
        resolver: &AliasResolver,
        selection: &SelectionStore,
    ) -> MapSetup<'a> {
        MapSetup {
            tile_url,
            max_zoom,
            attribution: MAP_ATTRIBUTION,
            center: MAP_CENTER,
            zoom: MAP_INITIAL_ZOOM,
            hover_weight: HOVER_BORDER_WEIGHT,
            features: self
                .features()
                .iter()
                .map(|feature| MapFeatureView {
                    name: &feature.name,
                    tooltip: &feature.name,
                    geometry: &feature.geometry,
                })
                .collect(),
            styles: self.styles(resolver, selection),
        }
    }
}
