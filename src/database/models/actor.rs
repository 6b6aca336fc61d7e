use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::field::Field;
use super::{optional_text, required_text, IntValue, ValidationError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Actor {
    pub id: i32,
    pub name: String,
    pub gender: Option<String>,
    pub age: Option<i32>,
}

/// Body of `POST /actors`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewActor {
    pub name: Option<String>,
    pub gender: Option<String>,
    pub age: Option<IntValue>,
}

/// An actor that passed validation and is ready to insert.
#[derive(Debug, Clone, PartialEq)]
pub struct ActorFields {
    pub name: String,
    pub gender: Option<String>,
    pub age: Option<i32>,
}

impl NewActor {
    pub fn validate(self) -> Result<ActorFields, ValidationError> {
        let name = required_text("name", self.name)?;
        Ok(ActorFields {
            name,
            gender: optional_text("gender", self.gender)?,
            age: self.age.map(|age| age.0),
        })
    }
}

/// Body of `PATCH /actors/:id`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActorPatch {
    #[serde(default)]
    pub name: Field<String>,
    #[serde(default)]
    pub gender: Field<String>,
    #[serde(default)]
    pub age: Field<IntValue>,
}

impl ActorPatch {
    /// Applies the fields present in the patch, leaving the rest untouched.
    pub fn apply(self, mut actor: Actor) -> Result<Actor, ValidationError> {
        match self.name {
            Field::Absent => {}
            Field::Null => return Err(ValidationError::Required("name")),
            Field::Value(name) => actor.name = required_text("name", Some(name))?,
        }
        if let Field::Value(gender) = &self.gender {
            optional_text("gender", Some(gender.clone()))?;
        }
        self.gender.apply_to(&mut actor.gender);
        self.age.map(|age| age.0).apply_to(&mut actor.age);
        Ok(actor)
    }
}
