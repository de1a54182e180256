use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{Base, Entity, Kind, ModelError, field};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Review {
    #[serde(flatten)]
    pub base: Base,
    pub place_id: String,
    pub user_id: String,
    pub text: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Entity for Review {
    const KIND: Kind = Kind::Review;
    const PROTECTED: &'static [&'static str] = &["user_id", "place_id"];

    fn base(&self) -> &Base {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Base {
        &mut self.base
    }

    fn set_field(&mut self, key: &str, value: Value) -> Result<(), ModelError> {
        match key {
            "place_id" => self.place_id = field(key, value)?,
            "user_id" => self.user_id = field(key, value)?,
            "text" => self.text = field(key, value)?,
            _ => {
                self.extra.insert(key.to_string(), value);
            }
        }
        Ok(())
    }
}
