use thiserror::Error;

#[derive(Debug, Error)]
pub enum TravelTimeError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: String, message: String },

    #[error("Expected {expected} elements for origin {origin}, got {actual}")]
    ElementCount {
        origin: String,
        expected: usize,
        actual: usize,
    },

    #[error("No API key configured, set {0}")]
    MissingApiKey(&'static str),

    #[error("Invalid coordinates '{0}', expected 'lat,lng'")]
    InvalidCoordinates(String),

    #[error("Cache error: {0}")]
    Cache(#[from] std::io::Error),

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),
}
