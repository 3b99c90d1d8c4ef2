use serde_json::{json, Value};
use std::time::Duration;

use crate::config::Config;

const PLACES_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";
const GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Thin client over the Google Places/Geocoding APIs. Every call degrades to
/// a deterministic mock response when no API key is configured or the
/// upstream request fails, so callers never see a hard failure from this
/// collaborator.
#[derive(Debug, Clone)]
pub struct PlacesService {
    api_key: Option<String>,
    client: reqwest::Client,
}

impl PlacesService {
    pub fn new(config: &Config) -> Self {
        if config.google_places_api_key.is_none() {
            tracing::warn!("GOOGLE_PLACES_API_KEY not configured, serving mock location data");
        }

        Self {
            api_key: config.google_places_api_key.clone(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_default(),
        }
    }

    pub async fn autocomplete(&self, input: &str, session_token: Option<&str>) -> Value {
        let api_key = match &self.api_key {
            Some(key) => key,
            None => return Self::mock_autocomplete(input),
        };

        let mut params = vec![
            ("input".to_string(), input.to_string()),
            ("key".to_string(), api_key.clone()),
            ("types".to_string(), "(cities)".to_string()),
        ];
        if let Some(token) = session_token {
            params.push(("sessiontoken".to_string(), token.to_string()));
        }

        let url = format!("{}/autocomplete/json", PLACES_BASE_URL);
        match self.client.get(&url).query(&params).send().await {
            Ok(response) if response.status().is_success() => response
                .json::<Value>()
                .await
                .unwrap_or_else(|_| Self::mock_autocomplete(input)),
            Ok(response) => {
                tracing::error!("places autocomplete returned {}", response.status());
                Self::mock_autocomplete(input)
            }
            Err(err) => {
                tracing::error!("places autocomplete request failed: {}", err);
                Self::mock_autocomplete(input)
            }
        }
    }

    pub async fn place_details(&self, place_id: &str, session_token: Option<&str>) -> Value {
        let api_key = match &self.api_key {
            Some(key) => key,
            None => return Self::mock_place_details(place_id),
        };

        let mut params = vec![
            ("place_id".to_string(), place_id.to_string()),
            ("key".to_string(), api_key.clone()),
            (
                "fields".to_string(),
                "formatted_address,geometry,name,place_id".to_string(),
            ),
        ];
        if let Some(token) = session_token {
            params.push(("sessiontoken".to_string(), token.to_string()));
        }

        let url = format!("{}/details/json", PLACES_BASE_URL);
        match self.client.get(&url).query(&params).send().await {
            Ok(response) if response.status().is_success() => response
                .json::<Value>()
                .await
                .unwrap_or_else(|_| Self::mock_place_details(place_id)),
            Ok(response) => {
                tracing::error!("places details returned {}", response.status());
                Self::mock_place_details(place_id)
            }
            Err(err) => {
                tracing::error!("places details request failed: {}", err);
                Self::mock_place_details(place_id)
            }
        }
    }

    pub async fn geocode(&self, address: &str) -> Value {
        let api_key = match &self.api_key {
            Some(key) => key,
            None => return Self::mock_geocode(address),
        };

        let params = [
            ("address".to_string(), address.to_string()),
            ("key".to_string(), api_key.clone()),
        ];

        match self.client.get(GEOCODE_URL).query(&params).send().await {
            Ok(response) if response.status().is_success() => response
                .json::<Value>()
                .await
                .unwrap_or_else(|_| Self::mock_geocode(address)),
            Ok(response) => {
                tracing::error!("geocode returned {}", response.status());
                Self::mock_geocode(address)
            }
            Err(err) => {
                tracing::error!("geocode request failed: {}", err);
                Self::mock_geocode(address)
            }
        }
    }

    /// Distance is always computed locally; the coordinates come from the
    /// caller and no index or provider round-trip is involved.
    pub fn distance(&self, origin: (f64, f64), destination: (f64, f64)) -> Value {
        let km = haversine_km(origin, destination);
        let miles = km * 0.621371;

        json!({
            "origin": { "lat": origin.0, "lng": origin.1 },
            "destination": { "lat": destination.0, "lng": destination.1 },
            "distance_km": (km * 100.0).round() / 100.0,
            "distance_miles": (miles * 100.0).round() / 100.0,
            "formatted": format!("{:.1} km", km),
        })
    }

    fn mock_autocomplete(input: &str) -> Value {
        json!({
            "status": "OK",
            "predictions": [
                {
                    "description": format!("{}, NY, USA", input),
                    "place_id": "mock_place_1",
                    "structured_formatting": {
                        "main_text": input,
                        "secondary_text": "NY, USA"
                    }
                },
                {
                    "description": format!("{}, CA, USA", input),
                    "place_id": "mock_place_2",
                    "structured_formatting": {
                        "main_text": input,
                        "secondary_text": "CA, USA"
                    }
                }
            ],
            "mock": true
        })
    }

    fn mock_place_details(place_id: &str) -> Value {
        json!({
            "status": "OK",
            "result": {
                "place_id": place_id,
                "name": "Springfield",
                "formatted_address": "Springfield, IL, USA",
                "geometry": {
                    "location": { "lat": 39.7817, "lng": -89.6501 }
                }
            },
            "mock": true
        })
    }

    fn mock_geocode(address: &str) -> Value {
        json!({
            "status": "OK",
            "results": [
                {
                    "formatted_address": address,
                    "geometry": {
                        "location": { "lat": 39.7817, "lng": -89.6501 }
                    },
                    "place_id": "mock_geocode_1"
                }
            ],
            "mock": true
        })
    }
}

/// Great-circle distance in kilometers.
pub fn haversine_km(origin: (f64, f64), destination: (f64, f64)) -> f64 {
    const EARTH_RADIUS_KM: f64 = 6371.0;

    let (lat1, lng1) = origin;
    let (lat2, lng2) = destination;

    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn haversine_zero_for_identical_points() {
        let point = (40.7128, -74.0060);
        assert!(haversine_km(point, point) < f64::EPSILON);
    }

    #[test]
    fn haversine_new_york_to_los_angeles() {
        let new_york = (40.7128, -74.0060);
        let los_angeles = (34.0522, -118.2437);

        let km = haversine_km(new_york, los_angeles);
        // Roughly 3935 km; allow for coordinate rounding.
        assert!((3900.0..4000.0).contains(&km), "got {} km", km);
    }

    #[test]
    fn mock_autocomplete_echoes_the_input() {
        let value = PlacesService::mock_autocomplete("Chicago");
        let first = &value["predictions"][0]["description"];
        assert!(first.as_str().unwrap().starts_with("Chicago"));
        assert_eq!(value["mock"], serde_json::json!(true));
    }
}
