use thiserror::Error;

#[derive(Error, Debug)]
#[error("error in communication with the Photon geocoder: {0}")]
pub struct PlacesError(pub String);
impl From<serde_json::Error> for PlacesError {
    fn from(e: serde_json::Error) -> PlacesError {
        PlacesError(format!("json document error: {}", e.to_string()))
    }
}
impl From<ureq::Error> for PlacesError {
    fn from(e: ureq::Error) -> PlacesError {
        PlacesError(format!("http request error: {}", e.to_string()))
    }
}
