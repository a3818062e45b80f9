use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A stored player record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Player {
    pub id: i64,
    pub name: String,
}

/// Body of `POST /player`. Unknown fields (including `id`) are ignored.
#[derive(Debug, Default)]
pub struct CreatePlayer {
    pub name: Option<String>,
}

/// A player that passed validation and has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlayer {
    name: String,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name is required")]
    MissingName,
}

impl CreatePlayer {
    /// Decodes a JSON object body. The `name` key matches regardless of case;
    /// an exact `name` wins over other spellings.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        let mut fields: Map<String, Value> = serde_json::from_slice(body)?;

        let value = match fields.remove("name") {
            Some(value) => Some(value),
            None => fields
                .into_iter()
                .find(|(key, _)| key.eq_ignore_ascii_case("name"))
                .map(|(_, value)| value),
        };

        let name = match value {
            Some(value) => serde_json::from_value::<Option<String>>(value)?,
            None => None,
        };

        Ok(Self { name })
    }

    pub fn validate(self) -> Result<NewPlayer, ValidationError> {
        match self.name {
            Some(name) if !name.is_empty() => Ok(NewPlayer { name }),
            _ => Err(ValidationError::MissingName),
        }
    }
}

impl NewPlayer {
    pub fn name(&self) -> &str {
        &self.name
    }
}
