/*
 * Responsibility
 * - エンティティ共通の型 (Kind / Base / Record / Entity trait)
 * - update で触れてはいけない protected field の判定
 * - JSON 表現 (to_dict) の組み立て
 */
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

pub mod amenity;
pub mod city;
pub mod place;
pub mod review;
pub mod state;
pub mod user;

pub use amenity::Amenity;
pub use city::City;
pub use place::Place;
pub use review::Review;
pub use state::State;
pub use user::User;

/// Fields owned by the system. Never taken from a request body.
pub const BASE_FIELDS: &[&str] = &["id", "created_at", "updated_at", "__class__"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    Amenity,
    City,
    Place,
    Review,
    State,
    User,
}

impl Kind {
    pub const ALL: [Kind; 6] = [
        Kind::Amenity,
        Kind::City,
        Kind::Place,
        Kind::Review,
        Kind::State,
        Kind::User,
    ];

    pub fn class_name(&self) -> &'static str {
        match self {
            Kind::Amenity => "Amenity",
            Kind::City => "City",
            Kind::Place => "Place",
            Kind::Review => "Review",
            Kind::State => "State",
            Kind::User => "User",
        }
    }

    /// Key used by `/stats`.
    pub fn plural(&self) -> &'static str {
        match self {
            Kind::Amenity => "amenities",
            Kind::City => "cities",
            Kind::Place => "places",
            Kind::Review => "reviews",
            Kind::State => "states",
            Kind::User => "users",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.class_name())
    }
}

/// Navigational link from a child record to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForeignKey {
    StateId,
    CityId,
    UserId,
    PlaceId,
}

impl ForeignKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            ForeignKey::StateId => "state_id",
            ForeignKey::CityId => "city_id",
            ForeignKey::UserId => "user_id",
            ForeignKey::PlaceId => "place_id",
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("Invalid {field}")]
    InvalidField { field: String },
    #[error("expected {expected} record, got {actual}")]
    KindMismatch { expected: Kind, actual: Kind },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Base {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Base {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Default for Base {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode a request value into the type of the named field.
pub(crate) fn field<T: DeserializeOwned>(key: &str, value: Value) -> Result<T, ModelError> {
    serde_json::from_value(value).map_err(|_| ModelError::InvalidField {
        field: key.to_string(),
    })
}

/// A typed entity stored behind the storage gateway.
pub trait Entity:
    Default + Clone + Send + Sync + Into<Record> + TryFrom<Record, Error = ModelError>
{
    const KIND: Kind;

    /// Fields an update must never modify, in addition to [`BASE_FIELDS`].
    const PROTECTED: &'static [&'static str];

    fn base(&self) -> &Base;
    fn base_mut(&mut self) -> &mut Base;

    /// Typed setter. Unknown keys end up in the entity's extra attributes.
    fn set_field(&mut self, key: &str, value: Value) -> Result<(), ModelError>;

    fn id(&self) -> &str {
        &self.base().id
    }

    fn is_protected(key: &str) -> bool {
        BASE_FIELDS.contains(&key) || Self::PROTECTED.contains(&key)
    }

    /// Build a fresh entity from a create body. System fields in the body are ignored.
    fn from_body(data: Map<String, Value>) -> Result<Self, ModelError> {
        let mut entity = Self::default();
        for (key, value) in data {
            if BASE_FIELDS.contains(&key.as_str()) {
                continue;
            }
            entity.set_field(&key, value)?;
        }
        Ok(entity)
    }

    /// Apply an update body, skipping protected fields, and refresh `updated_at`.
    fn apply_update(&mut self, data: Map<String, Value>) -> Result<(), ModelError> {
        for (key, value) in data {
            if Self::is_protected(&key) {
                continue;
            }
            self.set_field(&key, value)?;
        }
        self.base_mut().touch();
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "__class__")]
pub enum Record {
    Amenity(Amenity),
    City(City),
    Place(Place),
    Review(Review),
    State(State),
    User(User),
}

impl Record {
    pub fn kind(&self) -> Kind {
        match self {
            Record::Amenity(_) => Kind::Amenity,
            Record::City(_) => Kind::City,
            Record::Place(_) => Kind::Place,
            Record::Review(_) => Kind::Review,
            Record::State(_) => Kind::State,
            Record::User(_) => Kind::User,
        }
    }

    pub fn base(&self) -> &Base {
        match self {
            Record::Amenity(e) => &e.base,
            Record::City(e) => &e.base,
            Record::Place(e) => &e.base,
            Record::Review(e) => &e.base,
            Record::State(e) => &e.base,
            Record::User(e) => &e.base,
        }
    }

    pub fn id(&self) -> &str {
        &self.base().id
    }

    pub fn foreign_key(&self, key: ForeignKey) -> Option<&str> {
        match (self, key) {
            (Record::City(c), ForeignKey::StateId) => Some(&c.state_id),
            (Record::Place(p), ForeignKey::CityId) => Some(&p.city_id),
            (Record::Place(p), ForeignKey::UserId) => Some(&p.user_id),
            (Record::Review(r), ForeignKey::PlaceId) => Some(&r.place_id),
            (Record::Review(r), ForeignKey::UserId) => Some(&r.user_id),
            _ => None,
        }
    }

    /// Public JSON representation. Passwords never leave the process.
    pub fn to_dict(&self) -> Value {
        let mut value = serde_json::to_value(self).unwrap_or(Value::Null);
        if let (Record::User(_), Some(object)) = (self, value.as_object_mut()) {
            object.remove("password");
        }
        value
    }
}

macro_rules! record_conversions {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Record {
                fn from(entity: $variant) -> Self {
                    Record::$variant(entity)
                }
            }

            impl TryFrom<Record> for $variant {
                type Error = ModelError;

                fn try_from(record: Record) -> Result<Self, Self::Error> {
                    match record {
                        Record::$variant(entity) => Ok(entity),
                        other => Err(ModelError::KindMismatch {
                            expected: Kind::$variant,
                            actual: other.kind(),
                        }),
                    }
                }
            }
        )*
    };
}

record_conversions!(Amenity, City, Place, Review, State, User);
