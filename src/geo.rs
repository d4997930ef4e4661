use serde::Serialize;
use serde_json::Value;

use crate::errors::{AppError, AppResult};

/// One boundary polygon from the external GeoJSON.
///
/// Geometry is opaque here; it is passed back to the map widget unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundaryFeature {
    pub name: String,
    pub geometry: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BoundaryCollection {
    pub features: Vec<BoundaryFeature>,
}

impl BoundaryCollection {
    pub fn from_geojson_slice(bytes: &[u8]) -> AppResult<Self> {
        let value: Value = serde_json::from_slice(bytes)
            .map_err(|err| AppError::Parse(format!("invalid boundary GeoJSON: {err}")))?;
        Self::from_geojson_value(value)
    }

    pub fn from_geojson_value(value: Value) -> AppResult<Self> {
        let Value::Object(mut obj) = value else {
            return Err(not_a_collection());
        };
        if obj.get("type").and_then(Value::as_str) != Some("FeatureCollection") {
            return Err(not_a_collection());
        }
        let Some(Value::Array(raw_features)) = obj.remove("features") else {
            return Err(not_a_collection());
        };

        let mut features = Vec::with_capacity(raw_features.len());
        for (index, raw) in raw_features.into_iter().enumerate() {
            let Value::Object(mut feature) = raw else {
                return Err(invalid_feature(index, "feature must be an object"));
            };
            let name = feature
                .get("properties")
                .and_then(|props| props.get("name"))
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| invalid_feature(index, "feature missing properties.name"))?;
            let geometry = feature.remove("geometry").unwrap_or(Value::Null);
            features.push(BoundaryFeature { name, geometry });
        }

        Ok(Self { features })
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

fn not_a_collection() -> AppError {
    AppError::Parse("boundary data is not a GeoJSON FeatureCollection".into())
}

fn invalid_feature(index: usize, reason: &str) -> AppError {
    AppError::Parse(format!("invalid boundary feature {index}: {reason}"))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn keeps_names_and_geometry() {
        let collection = BoundaryCollection::from_geojson_value(json!({
            "type": "FeatureCollection",
            "features": [
                {
                    "type": "Feature",
                    "id": "BRA",
                    "properties": { "name": "Brazil" },
                    "geometry": { "type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 0]]] }
                },
                {
                    "type": "Feature",
                    "properties": { "name": "Russian Federation" },
                    "geometry": null
                }
            ]
        }))
        .unwrap();

        assert_eq!(collection.len(), 2);
        assert_eq!(collection.features[0].name, "Brazil");
        assert_eq!(collection.features[0].geometry["type"], "Polygon");
        assert_eq!(collection.features[1].geometry, Value::Null);
    }

    #[test]
    fn rejects_other_documents() {
        let err = BoundaryCollection::from_geojson_value(json!({ "type": "Feature" })).unwrap_err();
        assert!(err.to_string().contains("FeatureCollection"));
        assert!(BoundaryCollection::from_geojson_slice(b"not json").is_err());
    }

    #[test]
    fn reports_feature_without_name() {
        let err = BoundaryCollection::from_geojson_value(json!({
            "type": "FeatureCollection",
            "features": [
                { "type": "Feature", "properties": { "name": "Chad" } },
                { "type": "Feature", "properties": { "ADMIN": "Peru" } }
            ]
        }))
        .unwrap_err();
        assert!(err.to_string().contains("feature 1"));
    }
}
