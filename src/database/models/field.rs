use serde::{Deserialize, Deserializer};

/// A field in a partial-update body.
///
/// Distinguishes a key that was left out of the body (`Absent`) from one
/// that was sent as an explicit `null` (`Null`). Struct fields using it
/// must carry `#[serde(default)]` so a missing key lands on `Absent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field<T> {
    Absent,
    Null,
    Value(T),
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Absent
    }
}

impl<T> Field<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Field<U> {
        match self {
            Field::Absent => Field::Absent,
            Field::Null => Field::Null,
            Field::Value(value) => Field::Value(f(value)),
        }
    }

    /// Writes the field into a nullable column slot. Absent leaves it alone.
    pub fn apply_to(self, slot: &mut Option<T>) {
        match self {
            Field::Absent => {}
            Field::Null => *slot = None,
            Field::Value(value) => *slot = Some(value),
        }
    }
}

impl<'de, T> Deserialize<'de> for Field<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Field::Value(value),
            None => Field::Null,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Body {
        #[serde(default)]
        age: Field<i32>,
    }

    #[test]
    fn distinguishes_absent_null_and_value() {
        let absent: Body = serde_json::from_str("{}").unwrap();
        let null: Body = serde_json::from_str(r#"{"age": null}"#).unwrap();
        let value: Body = serde_json::from_str(r#"{"age": 50}"#).unwrap();

        assert_eq!(absent.age, Field::Absent);
        assert_eq!(null.age, Field::Null);
        assert_eq!(value.age, Field::Value(50));
    }

    #[test]
    fn apply_to_respects_presence() {
        let mut slot = Some(30);
        Field::Absent.apply_to(&mut slot);
        assert_eq!(slot, Some(30));
        Field::Value(50).apply_to(&mut slot);
        assert_eq!(slot, Some(50));
        Field::<i32>::Null.apply_to(&mut slot);
        assert_eq!(slot, None);
    }
}
