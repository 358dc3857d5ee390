use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

use crate::check;
use crate::enumeration;
use crate::record::{Entity, KeyLookup};
use crate::slots::{self, Slots};
use crate::violation::ConstraintViolation;
use crate::{Enumeration, Record};

/// Longest accepted movie title, in characters.
pub const MAX_TITLE_LENGTH: usize = 120;

/// Motion-picture content rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enumeration)]
pub enum MovieRating {
    #[enumeration(label = "General Audiences")]
    G,
    #[enumeration(label = "Parental Guidance")]
    PG,
    #[enumeration(label = "Not Under 13")]
    PG13,
    #[enumeration(label = "Restricted")]
    R,
    #[enumeration(label = "Not Under 17")]
    NC17,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Enumeration)]
pub enum Genre {
    Action,
    Animation,
    Crime,
    War,
    #[enumeration(label = "Sci-Fi")]
    SciFi,
    Adventure,
    Fantasy,
    Comedy,
    Documentary,
    Drama,
    Family,
    #[enumeration(label = "Film-Noir")]
    FilmNoir,
    Horror,
    Musical,
    Romance,
}

/// The first public film screening; earlier release dates are rejected.
pub fn first_screening() -> NaiveDate {
    NaiveDate::from_ymd_opt(1895, 12, 28).unwrap_or(NaiveDate::MIN)
}

/// A movie, identified by a positive integer id in canonical decimal form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Record)]
#[record(collection = "movies", kind = "movie")]
pub struct Movie {
    #[record(key)]
    #[serde(rename = "movieId")]
    movie_id: String,
    title: String,
    #[serde(rename = "releaseDate", skip_serializing_if = "Option::is_none")]
    release_date: Option<NaiveDate>,
    #[serde(with = "enumeration::as_code")]
    rating: MovieRating,
    #[serde(with = "enumeration::as_codes")]
    genres: Vec<Genre>,
}

impl Movie {
    pub fn movie_id(&self) -> &str {
        &self.movie_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn release_date(&self) -> Option<NaiveDate> {
        self.release_date
    }

    pub fn rating(&self) -> MovieRating {
        self.rating
    }

    pub fn genres(&self) -> &[Genre] {
        &self.genres
    }

    pub fn check_movie_id(value: &Value) -> Result<String, ConstraintViolation> {
        let id = check::non_empty_string(value).ok_or_else(|| {
            ConstraintViolation::range("The movie ID must be a non-empty string!")
        })?;
        // Canonical decimal only, so "5", "05" and "+5" cannot coexist.
        match id.parse::<u64>() {
            Ok(n) if n >= 1 && n.to_string() == id => Ok(id.to_string()),
            _ => Err(ConstraintViolation::range(
                "The movie ID must be a positive integer without leading zeros!",
            )),
        }
    }

    pub fn check_movie_id_as_id(
        value: Option<&Value>,
        taken: &dyn KeyLookup,
    ) -> Result<String, ConstraintViolation> {
        let value = value.ok_or_else(|| {
            ConstraintViolation::mandatory("A value for the movie ID must be provided!")
        })?;
        let id = Self::check_movie_id(value)?;
        if taken.contains_key(&id) {
            return Err(ConstraintViolation::uniqueness(
                "There is already a movie record with this ID!",
            ));
        }
        Ok(id)
    }

    pub fn check_title(value: Option<&Value>) -> Result<String, ConstraintViolation> {
        let value =
            value.ok_or_else(|| ConstraintViolation::mandatory("A title must be provided!"))?;
        let title = check::non_empty_string(value)
            .ok_or_else(|| ConstraintViolation::range("The title must be a non-empty string!"))?;
        if title.chars().count() > MAX_TITLE_LENGTH {
            return Err(ConstraintViolation::range(format!(
                "The title must not exceed {} characters!",
                MAX_TITLE_LENGTH
            )));
        }
        Ok(title.to_string())
    }

    pub fn check_release_date(
        value: Option<&Value>,
    ) -> Result<Option<NaiveDate>, ConstraintViolation> {
        let value = match value {
            Some(value) => value,
            None => return Ok(None),
        };
        let date = value
            .as_str()
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
            .ok_or_else(|| {
                ConstraintViolation::pattern("The release date must be a date of the form YYYY-MM-DD!")
            })?;
        if date < first_screening() {
            return Err(ConstraintViolation::interval(
                "The release date must not be before 1895-12-28!",
            ));
        }
        Ok(Some(date))
    }

    pub fn check_rating(value: Option<&Value>) -> Result<MovieRating, ConstraintViolation> {
        enumeration::check_code("rating", value)
    }

    pub fn check_genres(value: Option<&Value>) -> Result<Vec<Genre>, ConstraintViolation> {
        enumeration::check_codes("genre", value)
    }

    pub fn set_title(&mut self, value: impl Into<Value>) -> Result<(), ConstraintViolation> {
        self.title = Self::check_title(slots::provided(&value.into()))?;
        Ok(())
    }

    pub fn set_release_date(&mut self, value: impl Into<Value>) -> Result<(), ConstraintViolation> {
        self.release_date = Self::check_release_date(slots::provided(&value.into()))?;
        Ok(())
    }

    pub fn set_rating(&mut self, value: impl Into<Value>) -> Result<(), ConstraintViolation> {
        self.rating = Self::check_rating(slots::provided(&value.into()))?;
        Ok(())
    }

    pub fn set_genres(&mut self, value: impl Into<Value>) -> Result<(), ConstraintViolation> {
        self.genres = Self::check_genres(slots::provided(&value.into()))?;
        Ok(())
    }
}

impl Entity for Movie {
    const KEY_SLOT: &'static str = "movieId";

    fn from_slots(slots: &Slots, taken: &dyn KeyLookup) -> Result<Self, ConstraintViolation> {
        Ok(Movie {
            movie_id: Self::check_movie_id_as_id(slots.get("movieId"), taken)?,
            title: Self::check_title(slots.get("title"))?,
            release_date: Self::check_release_date(slots.get("releaseDate"))?,
            rating: Self::check_rating(slots.get("rating"))?,
            genres: Self::check_genres(slots.get("genres"))?,
        })
    }

    fn key_from_slots(slots: &Slots) -> Option<String> {
        Self::check_movie_id(slots.get("movieId")?).ok()
    }

    fn apply_update(&mut self, slots: &Slots) -> Result<Vec<&'static str>, ConstraintViolation> {
        let mut changed = Vec::new();

        let title = Self::check_title(slots.get("title"))?;
        if title != self.title {
            self.title = title;
            changed.push("title");
        }

        let release_date = Self::check_release_date(slots.get("releaseDate"))?;
        if release_date != self.release_date {
            self.release_date = release_date;
            changed.push("releaseDate");
        }

        let rating = Self::check_rating(slots.get("rating"))?;
        if rating != self.rating {
            self.rating = rating;
            changed.push("rating");
        }

        let genres = Self::check_genres(slots.get("genres"))?;
        if !enumeration::same_selection(&genres, &self.genres) {
            self.genres = genres;
            changed.push("genres");
        }

        Ok(changed)
    }
}

impl fmt::Display for Movie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Movie{{ movieId: {}, title: {}", self.movie_id, self.title)?;
        if let Some(date) = self.release_date {
            write!(f, ", releaseDate: {}", date)?;
        }
        write!(
            f,
            ", rating: {}, genres: {} }}",
            self.rating.label(),
            enumeration::selection_to_string(&self.genres)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::NoKeysTaken;
    use serde_json::json;

    fn pulp_fiction() -> Slots {
        Slots::new()
            .with("movieId", "1")
            .with("title", "Pulp Fiction")
            .with("releaseDate", "1994-05-12")
            .with("rating", MovieRating::R.code())
            .with("genres", json!([Genre::Crime.code(), Genre::Drama.code()]))
    }

    #[test]
    fn enumerations_match_their_tables() {
        assert_eq!(MovieRating::MAX, 5);
        assert_eq!(Genre::MAX, 15);
        assert_eq!(MovieRating::PG13.label(), "Not Under 13");
        assert_eq!(Genre::from_code(5), Some(Genre::SciFi));
        assert_eq!(Genre::SciFi.label(), "Sci-Fi");
    }

    #[test]
    fn construct_reads_back_values() {
        let movie = Movie::from_slots(&pulp_fiction(), &NoKeysTaken).unwrap();

        assert_eq!(movie.movie_id(), "1");
        assert_eq!(movie.title(), "Pulp Fiction");
        assert_eq!(movie.release_date(), NaiveDate::from_ymd_opt(1994, 5, 12));
        assert_eq!(movie.rating(), MovieRating::R);
        assert_eq!(movie.genres(), &[Genre::Crime, Genre::Drama]);
    }

    #[test]
    fn release_date_is_optional() {
        let mut slots = pulp_fiction();
        slots.remove("releaseDate");

        let movie = Movie::from_slots(&slots, &NoKeysTaken).unwrap();
        assert_eq!(movie.release_date(), None);
    }

    #[test]
    fn movie_id_checks() {
        assert!(matches!(
            Movie::check_movie_id(&json!("-3")),
            Err(ConstraintViolation::Range(_))
        ));
        assert!(matches!(
            Movie::check_movie_id(&json!("abc")),
            Err(ConstraintViolation::Range(_))
        ));
        assert!(matches!(
            Movie::check_movie_id(&json!(7)),
            Err(ConstraintViolation::Range(_))
        ));
        assert_eq!(Movie::check_movie_id(&json!("42")), Ok("42".to_string()));
    }

    #[test]
    fn movie_id_must_be_canonical_and_positive() {
        for id in ["0", "05", "+5", " 5"] {
            assert!(
                matches!(
                    Movie::check_movie_id(&json!(id)),
                    Err(ConstraintViolation::Range(_))
                ),
                "{:?} should be rejected",
                id
            );
        }
    }

    #[test]
    fn title_length_is_bounded() {
        let long = "x".repeat(MAX_TITLE_LENGTH + 1);
        assert!(matches!(
            Movie::check_title(Some(&json!(long))),
            Err(ConstraintViolation::Range(_))
        ));
        let longest = "é".repeat(MAX_TITLE_LENGTH);
        assert!(Movie::check_title(Some(&json!(longest))).is_ok());
    }

    #[test]
    fn release_date_checks() {
        assert!(matches!(
            Movie::check_release_date(Some(&json!("12.05.1994"))),
            Err(ConstraintViolation::Pattern(_))
        ));
        assert!(matches!(
            Movie::check_release_date(Some(&json!("1895-12-27"))),
            Err(ConstraintViolation::Interval(_))
        ));
        assert_eq!(
            Movie::check_release_date(Some(&json!("1895-12-28"))),
            Ok(Some(first_screening()))
        );
    }

    #[test]
    fn genres_are_mandatory_and_bounded() {
        let mut slots = pulp_fiction();
        slots.set("genres", json!([]));
        let err = Movie::from_slots(&slots, &NoKeysTaken).unwrap_err();
        assert!(matches!(err, ConstraintViolation::MandatoryValue(_)));

        slots.set("genres", json!([3, 16]));
        let err = Movie::from_slots(&slots, &NoKeysTaken).unwrap_err();
        assert!(matches!(err, ConstraintViolation::Range(_)));
    }

    #[test]
    fn rating_is_mandatory() {
        let mut slots = pulp_fiction();
        slots.remove("rating");
        let err = Movie::from_slots(&slots, &NoKeysTaken).unwrap_err();
        assert_eq!(err, ConstraintViolation::MandatoryValue("A rating must be provided!".into()));
    }

    #[test]
    fn apply_update_compares_selections() {
        let mut movie = Movie::from_slots(&pulp_fiction(), &NoKeysTaken).unwrap();

        assert!(movie.apply_update(&pulp_fiction()).unwrap().is_empty());

        let changed = movie
            .apply_update(
                &pulp_fiction()
                    .with("genres", json!([Genre::Drama.code(), Genre::Crime.code()]))
                    .with("rating", "2"),
            )
            .unwrap();
        assert_eq!(changed, vec!["rating", "genres"]);
        assert_eq!(movie.rating(), MovieRating::PG);
        assert_eq!(movie.genres(), &[Genre::Drama, Genre::Crime]);
    }

    #[test]
    fn setters() {
        let mut movie = Movie::from_slots(&pulp_fiction(), &NoKeysTaken).unwrap();

        movie.set_rating(MovieRating::NC17.code()).unwrap();
        assert_eq!(movie.rating(), MovieRating::NC17);

        movie.set_release_date(Value::Null).unwrap();
        assert_eq!(movie.release_date(), None);

        assert!(movie.set_genres(json!("Drama")).is_err());
        assert_eq!(movie.genres(), &[Genre::Crime, Genre::Drama]);
    }

    #[test]
    fn serializes_codes_and_iso_dates() {
        let movie = Movie::from_slots(&pulp_fiction(), &NoKeysTaken).unwrap();
        let row = serde_json::to_value(&movie).unwrap();
        assert_eq!(
            row,
            json!({
                "movieId": "1",
                "title": "Pulp Fiction",
                "releaseDate": "1994-05-12",
                "rating": 4,
                "genres": [3, 10],
            })
        );
    }

    #[test]
    fn display_uses_labels() {
        let movie = Movie::from_slots(&pulp_fiction(), &NoKeysTaken).unwrap();
        assert_eq!(
            movie.to_string(),
            "Movie{ movieId: 1, title: Pulp Fiction, releaseDate: 1994-05-12, \
             rating: Restricted, genres: Crime, Drama }"
        );
    }
}
