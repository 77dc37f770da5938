use serde::{Deserialize, Serialize};

/// GeoJSON `Point`; coordinates are `[longitude, latitude]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(rename = "type", default = "point_kind", skip_deserializing)]
    kind: &'static str,
    /// `[longitude, latitude]`.
    pub coordinates: [f64; 2],
}

const fn point_kind() -> &'static str {
    "Point"
}

impl GeoPoint {
    /// Point at the given position.
    #[must_use]
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            kind: "Point",
            coordinates: [longitude, latitude],
        }
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.coordinates[0]
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.coordinates[1]
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn geojson_shape() {
        let point = GeoPoint::new(-71.09, 42.36);
        assert_eq!(
            serde_json::to_value(point).expect("serialize"),
            json!({ "type": "Point", "coordinates": [-71.09, 42.36] })
        );

        let parsed: GeoPoint =
            serde_json::from_value(json!({ "type": "Point", "coordinates": [2.35, 48.85] }))
                .expect("deserialize");
        assert_eq!(parsed, GeoPoint::new(2.35, 48.85));
        assert!((parsed.latitude() - 48.85).abs() < f64::EPSILON);
    }
}
