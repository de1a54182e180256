use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use super::{Base, Entity, Kind, ModelError, field};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct User {
    #[serde(flatten)]
    pub base: Base,
    pub email: String,
    /// Hex SHA-256 digest, never the plain text.
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

pub fn hash_password(plain: &str) -> String {
    hex::encode(Sha256::digest(plain.as_bytes()))
}

impl Entity for User {
    const KIND: Kind = Kind::User;
    const PROTECTED: &'static [&'static str] = &["email"];

    fn base(&self) -> &Base {
        &self.base
    }

    fn base_mut(&mut self) -> &mut Base {
        &mut self.base
    }

    fn set_field(&mut self, key: &str, value: Value) -> Result<(), ModelError> {
        match key {
            "email" => self.email = field(key, value)?,
            "password" => {
                let plain: String = field(key, value)?;
                self.password = hash_password(&plain);
            }
            "first_name" => self.first_name = field(key, value)?,
            "last_name" => self.last_name = field(key, value)?,
            _ => {
                self.extra.insert(key.to_string(), value);
            }
        }
        Ok(())
    }
}
