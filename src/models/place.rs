use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Base, Entity, Kind, ModelError, field};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Place {
    #[serde(flatten)]
    pub base: Base,
    pub city_id: String,
    pub user_id: String,
    pub name: String,
    pub description: String,
    pub number_rooms: i64,
    pub number_bathrooms: i64,
    pub max_guest: i64,
    pub price_by_night: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub amenity_ids: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Place {
    pub fn has_amenity(&self, amenity_id: &str) -> bool {
        self.amenity_ids.iter().any(|id| id == amenity_id)
    }

    /// Returns false if the amenity was already linked.
    pub fn link_amenity(&mut self, amenity_id: &str) -> bool {
        if self.has_amenity(amenity_id) {
            return false;
        }
        self.amenity_ids.push(amenity_id.to_string());
        self.base.touch();
        true
    }

    /// Returns false if the amenity was not linked.
    pub fn unlink_amenity(&mut self, amenity_id: &str) -> bool {
        let before = self.amenity_ids.len();
        self.amenity_ids.retain(|id| id != amenity_id);
        if self.amenity_ids.len() == before {
            return false;
        }
        self.base.touch();
        true
    }
}

impl Entity for Place {
    const KIND: Kind = Kind::Place;
    const PROTECTED: &'static [&'static str] = &["user_id", "city_id"];

    fn base(&self) -> &Base {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Base {
        &mut self.base
    }

    fn set_field(&mut self, key: &str, value: Value) -> Result<(), ModelError> {
        match key {
            "city_id" => self.city_id = field(key, value)?,
            "user_id" => self.user_id = field(key, value)?,
            "name" => self.name = field(key, value)?,
            "description" => self.description = field(key, value)?,
            "number_rooms" => self.number_rooms = field(key, value)?,
            "number_bathrooms" => self.number_bathrooms = field(key, value)?,
            "max_guest" => self.max_guest = field(key, value)?,
            "price_by_night" => self.price_by_night = field(key, value)?,
            "latitude" => self.latitude = field(key, value)?,
            "longitude" => self.longitude = field(key, value)?,
            "amenity_ids" => self.amenity_ids = field(key, value)?,
            _ => {
                self.extra.insert(key.to_string(), value);
            }
        }
        Ok(())
    }
}
