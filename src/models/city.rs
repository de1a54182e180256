use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Base, Entity, Kind, ModelError, field};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct City {
    #[serde(flatten)]
    pub base: Base,
    pub state_id: String,
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Entity for City {
    const KIND: Kind = Kind::City;
    const PROTECTED: &'static [&'static str] = &["state_id"];

    fn base(&self) -> &Base {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Base {
        &mut self.base
    }

    fn set_field(&mut self, key: &str, value: Value) -> Result<(), ModelError> {
        match key {
            "state_id" => self.state_id = field(key, value)?,
            "name" => self.name = field(key, value)?,
            _ => {
                self.extra.insert(key.to_string(), value);
            }
        }
        Ok(())
    }
}
