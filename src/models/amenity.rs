use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Base, Entity, Kind, ModelError, field};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Amenity {
    #[serde(flatten)]
    pub base: Base,
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Entity for Amenity {
    const KIND: Kind = Kind::Amenity;
    const PROTECTED: &'static [&'static str] = &[];

    fn base(&self) -> &Base {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Base {
        &mut self.base
    }

    fn set_field(&mut self, key: &str, value: Value) -> Result<(), ModelError> {
        match key {
            "name" => self.name = field(key, value)?,
            _ => {
                self.extra.insert(key.to_string(), value);
            }
        }
        Ok(())
    }
}
