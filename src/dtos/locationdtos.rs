use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct AutocompleteQueryDto {
    #[validate(length(min = 2, max = 100, message = "Input must be between 2 and 100 characters"))]
    pub input: String,

    pub sessiontoken: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct PlaceDetailsQueryDto {
    #[validate(length(min = 1, message = "place_id is required"))]
    pub place_id: String,

    pub sessiontoken: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct GeocodeQueryDto {
    #[validate(length(min = 2, max = 255, message = "Address must be between 2 and 255 characters"))]
    pub address: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct DistanceQueryDto {
    pub origin_lat: f64,
    pub origin_lng: f64,
    pub dest_lat: f64,
    pub dest_lng: f64,
}
