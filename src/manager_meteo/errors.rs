use thiserror::Error;

#[derive(Error, Debug)]
#[error("error in communication with Open-Meteo: {0}")]
pub struct MeteoError(pub String);
impl From<serde_json::Error> for MeteoError {
    fn from(e: serde_json::Error) -> MeteoError {
        MeteoError(format!("json document error: {}", e.to_string()))
    }
}
impl From<ureq::Error> for MeteoError {
    fn from(e: ureq::Error) -> MeteoError {
        MeteoError(format!("http request error: {}", e.to_string()))
    }
}
