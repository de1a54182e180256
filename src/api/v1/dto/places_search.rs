/*
 * Responsibility
 * - POST /places_search の request DTO
 * - 各キーは省略可 (省略 = 空配列)
 */
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PlacesSearchRequest {
    pub states: Vec<String>,
    pub cities: Vec<String>,
    pub amenities: Vec<String>,
}

impl PlacesSearchRequest {
    /// No location filter: every place is a candidate.
    pub fn is_unscoped(&self) -> bool {
        self.states.is_empty() && self.cities.is_empty()
    }
}
