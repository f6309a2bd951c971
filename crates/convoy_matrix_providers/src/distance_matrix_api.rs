use std::fmt::Display;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::TravelTimeError;

pub const DISTANCE_MATRIX_API_URL: &str = "https://maps.googleapis.com/maps/api/distancematrix/json";

#[derive(Deserialize, Serialize, JsonSchema, Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TravelMode {
    #[default]
    Driving,
    Bicycling,
    Walking,
}

impl Display for TravelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                TravelMode::Driving => "driving",
                TravelMode::Bicycling => "bicycling",
                TravelMode::Walking => "walking",
            }
        )
    }
}

#[derive(Deserialize)]
struct Duration {
    /// Seconds
    value: f64,
}

#[derive(Deserialize)]
struct Element {
    status: String,
    duration: Option<Duration>,
}

#[derive(Deserialize)]
struct Row {
    elements: Vec<Element>,
}

#[derive(Deserialize)]
struct DistanceMatrixResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    rows: Vec<Row>,
}

pub struct DistanceMatrixClient {
    api_key: String,
    client: reqwest::Client,
}

impl DistanceMatrixClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            client: reqwest::Client::new(),
        }
    }

    /// Travel times in seconds from `origin` to every destination, in destination order.
    pub async fn fetch_row(
        &self,
        origin: &str,
        destinations: &[String],
        mode: TravelMode,
    ) -> Result<Vec<Option<f64>>, TravelTimeError> {
        let mode = mode.to_string();
        let destinations_param = destinations.join("|");

        let response = self
            .client
            .get(DISTANCE_MATRIX_API_URL)
            .query(&[
                ("origins", origin),
                ("destinations", destinations_param.as_str()),
                ("mode", mode.as_str()),
                ("departure_time", "now"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16().to_string();
            let message = response.text().await.unwrap_or_default();
            return Err(TravelTimeError::Api { status, message });
        }

        let body = response.text().await?;
        debug!(origin, "DistanceMatrixApi: received row");
        parse_row(origin, &body, destinations.len())
    }
}

/// Elements that are not `OK` become missing entries.
fn parse_row(origin: &str, body: &str, expected: usize) -> Result<Vec<Option<f64>>, TravelTimeError> {
    let response: DistanceMatrixResponse = serde_json::from_str(body)?;

    if response.status != "OK" {
        return Err(TravelTimeError::Api {
            status: response.status,
            message: response.error_message.unwrap_or_default(),
        });
    }

    let elements = response
        .rows
        .into_iter()
        .next()
        .map(|row| row.elements)
        .unwrap_or_default();

    if elements.len() != expected {
        return Err(TravelTimeError::ElementCount {
            origin: origin.to_owned(),
            expected,
            actual: elements.len(),
        });
    }

    Ok(elements
        .into_iter()
        .enumerate()
        .map(|(destination, element)| match (element.status.as_str(), element.duration) {
            ("OK", Some(duration)) => Some(duration.value),
            (status, _) => {
                warn!(origin, destination, status, "DistanceMatrixApi: no route");
                None
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_row() {
        let body = r#"{
            "status": "OK",
            "origin_addresses": ["Depot"],
            "destination_addresses": ["Depot", "A", "B"],
            "rows": [{ "elements": [
                { "status": "OK", "duration": { "value": 0, "text": "1 min" } },
                { "status": "OK", "duration": { "value": 610, "text": "10 mins" } },
                { "status": "ZERO_RESULTS" }
            ]}]
        }"#;

        assert_eq!(
            parse_row("Depot", body, 3).unwrap(),
            vec![Some(0.0), Some(610.0), None]
        );
    }

    #[test]
    fn test_parse_row_request_denied() {
        let body = r#"{ "status": "REQUEST_DENIED", "error_message": "invalid key", "rows": [] }"#;

        match parse_row("Depot", body, 2) {
            Err(TravelTimeError::Api { status, message }) => {
                assert_eq!(status, "REQUEST_DENIED");
                assert_eq!(message, "invalid key");
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn test_parse_row_wrong_element_count() {
        let body = r#"{ "status": "OK", "rows": [{ "elements": [
            { "status": "OK", "duration": { "value": 10 } }
        ]}]}"#;

        assert!(matches!(
            parse_row("Depot", body, 2),
            Err(TravelTimeError::ElementCount {
                expected: 2,
                actual: 1,
                ..
            })
        ));
    }
}
