pub mod errors;

use std::time::Duration;
use log::info;
use ureq::Agent;
use crate::manager_places::errors::PlacesError;
use crate::models::place::{Place, PhotonFeature, PhotonResponse};

/// Struct for resolving free text place queries through the Photon
/// geocoder
pub struct Photon {
    agent: Agent,
}

impl Photon {
    /// Returns a Photon struct ready for searching places
    pub fn new() -> Photon {
        let config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(30)))
            .build();

        let agent = config.into();

        Self { agent }
    }

    /// Searches for places matching the query and returns them in the
    /// order the geocoder ranked them. Features without a usable name
    /// are skipped.
    ///
    /// # Arguments
    ///
    /// * 'query' - free text to search for
    pub fn search(&self, query: &str) -> Result<Vec<Place>, PlacesError> {
        info!("searching places for '{}'", query);

        let json = self.agent
            .get("https://photon.komoot.io/api")
            .query("q", query)
            .query("limit", "10")
            .call()?
            .body_mut()
            .read_to_string()?;

        let response: PhotonResponse = serde_json::from_str(&json)?;

        Ok(response.features.iter().filter_map(feature_to_place).collect())
    }
}

/// Folds one geocoder feature into a Place, or None when no usable name
/// can be derived
///
/// # Arguments
///
/// * 'feature' - the geocoder feature
fn feature_to_place(feature: &PhotonFeature) -> Option<Place> {
    let props = &feature.properties;

    let name = [&props.name, &props.street, &props.city]
        .into_iter()
        .find(|n| !n.is_empty())?
        .clone();

    let mut address_parts: Vec<&str> = [&props.street, &props.city, &props.state, &props.country]
        .into_iter()
        .filter(|p| !p.is_empty() && **p != name)
        .map(|p| p.as_str())
        .collect();
    if !props.postcode.is_empty() {
        address_parts.push(&props.postcode);
    }

    let (long, lat) = match feature.geometry.coordinates[..] {
        [long, lat, ..] => (long, lat),
        _ => (0.0, 0.0),
    };

    Some(Place {
        name,
        address: address_parts.join(", "),
        lat,
        long,
    })
}
