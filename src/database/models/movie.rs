use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

use super::field::Field;
use super::{required_text, ValidationError};

const RELEASE_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Movie {
    pub id: i32,
    pub title: String,
    pub release_date: Option<ReleaseDate>,
}

/// Release timestamp stored as `TIMESTAMP` (no zone).
///
/// Accepts `2010-07-16`, `2010-07-16T20:00:00`, `2010-07-16 20:00:00` and
/// RFC 3339 (converted to UTC). Always renders as `2010-07-16T00:00:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, sqlx::Type)]
#[sqlx(transparent)]
pub struct ReleaseDate(pub NaiveDateTime);

impl FromStr for ReleaseDate {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self(dt.naive_utc()));
        }
        for format in [RELEASE_DATE_FORMAT, "%Y-%m-%d %H:%M:%S"] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
                return Ok(Self(dt));
            }
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(|date| Self(date.and_time(NaiveTime::MIN)))
            .map_err(|_| ValidationError::InvalidDate(s.to_string()))
    }
}

impl fmt::Display for ReleaseDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(RELEASE_DATE_FORMAT))
    }
}

impl Serialize for ReleaseDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ReleaseDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

/// Body of `POST /movies`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewMovie {
    pub title: Option<String>,
    pub release_date: Option<ReleaseDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MovieFields {
    pub title: String,
    pub release_date: Option<ReleaseDate>,
}

impl NewMovie {
    pub fn validate(self) -> Result<MovieFields, ValidationError> {
        let title = required_text("title", self.title)?;
        Ok(MovieFields {
            title,
            release_date: self.release_date,
        })
    }
}

/// Body of `PATCH /movies/:id`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MoviePatch {
    #[serde(default)]
    pub title: Field<String>,
    #[serde(default)]
    pub release_date: Field<ReleaseDate>,
}

impl MoviePatch {
    pub fn apply(self, mut movie: Movie) -> Result<Movie, ValidationError> {
        match self.title {
            Field::Absent => {}
            Field::Null => return Err(ValidationError::Required("title")),
            Field::Value(title) => movie.title = required_text("title", Some(title))?,
        }
        self.release_date.apply_to(&mut movie.release_date);
        Ok(movie)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn midnight(y: i32, m: u32, d: u32) -> ReleaseDate {
        ReleaseDate(NaiveDate::from_ymd_opt(y, m, d).unwrap().and_time(NaiveTime::MIN))
    }

    #[test]
    fn parses_accepted_release_date_forms() {
        assert_eq!("2010-07-16".parse::<ReleaseDate>().unwrap(), midnight(2010, 7, 16));
        assert_eq!(
            "2010-07-16T00:00:00".parse::<ReleaseDate>().unwrap(),
            midnight(2010, 7, 16)
        );
        assert_eq!(
            "2010-07-16 00:00:00".parse::<ReleaseDate>().unwrap(),
            midnight(2010, 7, 16)
        );
        assert_eq!(
            "2010-07-16T02:00:00+02:00".parse::<ReleaseDate>().unwrap(),
            midnight(2010, 7, 16)
        );
        assert!("16/07/2010".parse::<ReleaseDate>().is_err());
    }

    #[test]
    fn renders_without_zone() {
        let value = serde_json::to_value(midnight(1980, 1, 15)).unwrap();
        assert_eq!(value, serde_json::json!("1980-01-15T00:00:00"));
    }

    #[test]
    fn new_movie_requires_title() {
        let movie: NewMovie = serde_json::from_str(
            r#"{"release_date": "2020-01-15", "bogus_field": "Ooops I added an extra field"}"#,
        )
        .unwrap();
        assert_eq!(movie.validate(), Err(ValidationError::Required("title")));
    }

    #[test]
    fn patch_release_date_only() {
        let movie = Movie {
            id: 3,
            title: "movie_title1".to_string(),
            release_date: Some(midnight(1980, 1, 15)),
        };
        let patch: MoviePatch = serde_json::from_str(r#"{"release_date": "2015-02-02"}"#).unwrap();
        let updated = patch.apply(movie).unwrap();
        assert_eq!(updated.title, "movie_title1");
        assert_eq!(updated.release_date, Some(midnight(2015, 2, 2)));
    }
}
