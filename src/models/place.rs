use std::fmt;
use serde::{Deserialize, Serialize};

/// A named location with coordinates, as resolved by the geocoder or
/// stored in the favorites file
#[derive(Clone, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub address: String,
    pub lat: f64,
    pub long: f64,
}

impl Place {
    /// Returns true if the other place refers to the same location
    ///
    /// # Arguments
    ///
    /// * 'other' - the place to compare with
    pub fn same_location(&self, other: &Place) -> bool {
        self.name == other.name && self.lat == other.lat && self.long == other.long
    }
}

/// Implementation of the Display Trait for pretty print
impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.address.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} ({})", self.name, self.address)
        }
    }
}

#[derive(Deserialize)]
pub struct PhotonResponse {
    pub features: Vec<PhotonFeature>,
}

#[derive(Deserialize)]
pub struct PhotonFeature {
    pub properties: PhotonProperties,
    pub geometry: PhotonGeometry,
}

#[derive(Deserialize, Default)]
pub struct PhotonProperties {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub postcode: String,
}

#[derive(Deserialize, Default)]
pub struct PhotonGeometry {
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_photon_document() {
        let json = r#"{
            "features": [
                {
                    "geometry": {"coordinates": [2.3483915, 48.8534951], "type": "Point"},
                    "type": "Feature",
                    "properties": {
                        "osm_type": "R",
                        "osm_id": 71525,
                        "country": "France",
                        "name": "Paris",
                        "state": "Ile-de-France",
                        "type": "city"
                    }
                }
            ],
            "type": "FeatureCollection"
        }"#;

        let resp: PhotonResponse = serde_json::from_str(json).unwrap();

        assert_eq!(resp.features.len(), 1);
        assert_eq!(resp.features[0].properties.name, "Paris");
        assert_eq!(resp.features[0].properties.street, "");
        assert_eq!(resp.features[0].geometry.coordinates[1], 48.8534951);
    }

    #[test]
    fn same_location_compares_identity() {
        let a = Place { name: "Lyon".to_string(), address: "France".to_string(), lat: 45.76, long: 4.83 };
        let mut b = a.clone();
        assert!(a.same_location(&b));

        b.lat = 45.77;
        assert!(!a.same_location(&b));
    }
}
