use std::collections::BTreeMap;
use std::fmt;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use crate::modules::types::{EntryFields, Submission};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    #[display("title")]
    Title,
    #[display("genre")]
    Genre,
    #[display("season")]
    Season,
    #[display("rating")]
    Rating,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Title, Field::Genre, Field::Season, Field::Rating];

    pub fn raw<'a>(&self, submission: &'a Submission) -> &'a str {
        match self {
            Field::Title => &submission.title,
            Field::Genre => &submission.genre,
            Field::Season => &submission.season,
            Field::Rating => &submission.rating,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum FieldError {
    #[display("Please enter a title.")]
    EmptyTitle,
    #[display("Please enter at least one genre.")]
    EmptyGenre,
    #[display("Please enter a valid season number.")]
    InvalidSeason,
    #[display("Please enter a rating from 1 to 10.")]
    InvalidRating,
}

impl FieldError {
    pub fn field(&self) -> Field {
        match self {
            FieldError::EmptyTitle => Field::Title,
            FieldError::EmptyGenre => Field::Genre,
            FieldError::InvalidSeason => Field::Season,
            FieldError::InvalidRating => Field::Rating,
        }
    }
}

/// Error indicators of one form, at most one per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<Field, FieldError>,
}

impl FieldErrors {
    pub fn show(&mut self, error: FieldError) {
        self.errors.insert(error.field(), error);
    }

    pub fn clear(&mut self, field: Field) {
        self.errors.remove(&field);
    }

    pub fn clear_all(&mut self) {
        self.errors.clear();
    }

    pub fn get(&self, field: Field) -> Option<FieldError> {
        self.errors.get(&field).copied()
    }

    pub fn is_invalid(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, FieldError)> + '_ {
        self.errors.iter().map(|(field, error)| (*field, *error))
    }

    /// Shows or clears the indicator of `field` according to `result`.
    pub fn apply(&mut self, field: Field, result: Result<(), FieldError>) -> bool {
        match result {
            Ok(()) => {
                self.clear(field);
                true
            }
            Err(error) => {
                self.show(error);
                false
            }
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, error) in self.iter() {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {error}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// Unsigned `0x`, `0o` and `0b` literals, as number inputs accept them.
fn parse_radix(value: &str) -> Option<f64> {
    let prefix = value.get(..2)?.to_ascii_lowercase();
    let radix = match prefix.as_str() {
        "0x" => 16,
        "0o" => 8,
        "0b" => 2,
        _ => return None,
    };
    let digits = &value[2..];
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    u64::from_str_radix(digits, radix).ok().map(|n| n as f64)
}

fn parse_number(raw: &str) -> Option<f64> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }
    parse_radix(value)
        .or_else(|| value.parse::<f64>().ok())
        .filter(|n| n.is_finite())
}

fn parse_season(raw: &str) -> Option<u32> {
    let season = parse_number(raw)?;
    if season < 1.0 || season.fract() != 0.0 || season > u32::MAX as f64 {
        return None;
    }
    Some(season as u32)
}

fn parse_rating(raw: &str) -> Option<f64> {
    parse_number(raw).filter(|rating| (1.0..=10.0).contains(rating))
}

pub fn validate_field(field: Field, raw: &str) -> Result<(), FieldError> {
    match field {
        Field::Title if raw.trim().is_empty() => Err(FieldError::EmptyTitle),
        Field::Genre if raw.trim().is_empty() => Err(FieldError::EmptyGenre),
        Field::Season if parse_season(raw).is_none() => Err(FieldError::InvalidSeason),
        Field::Rating if parse_rating(raw).is_none() => Err(FieldError::InvalidRating),
        _ => Ok(()),
    }
}

/// Checks every field and reports all failures, not only the first.
pub fn validate_form(submission: &Submission) -> Result<EntryFields, FieldErrors> {
    let mut errors = FieldErrors::default();
    for field in Field::ALL {
        errors.apply(field, validate_field(field, field.raw(submission)));
    }

    match (parse_season(&submission.season), parse_rating(&submission.rating)) {
        (Some(season), Some(rating)) if errors.is_empty() => Ok(EntryFields {
            title: submission.title.trim().to_string(),
            genre: submission.genre.trim().to_string(),
            season,
            rating,
            recommended: submission.recommended,
        }),
        _ => Err(errors),
    }
}

impl TryFrom<Submission> for EntryFields {
    type Error = FieldErrors;

    fn try_from(submission: Submission) -> Result<Self, Self::Error> {
        validate_form(&submission)
    }
}
