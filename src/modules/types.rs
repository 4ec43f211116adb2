use derive_more::with_trait::Display;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, Serialize, Deserialize)]
#[display("#{_0}")]
#[serde(transparent)]
pub struct EntryId(pub u64);

/// Inline image payload, kept as a `data:` URL so it can be displayed as-is.
#[derive(Debug, Clone, PartialEq, Eq, Display, Serialize)]
#[display("{mime} image ({} bytes encoded)", data_url.len())]
pub struct ImageData {
    pub(crate) mime: String,
    pub(crate) data_url: String,
}

impl ImageData {
    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn data_url(&self) -> &str {
        &self.data_url
    }
}

/// Field values that passed validation. Only `validate_form` builds one;
/// deserializing goes through the same checks.
#[derive(Debug, Clone, PartialEq, Display, Serialize, Deserialize)]
#[serde(try_from = "Submission")]
#[display("{title} [{genre}] S{season} {rating}/10")]
pub struct EntryFields {
    pub(crate) title: String,
    pub(crate) genre: String,
    pub(crate) season: u32,
    pub(crate) rating: f64,
    pub(crate) recommended: bool,
}

impl EntryFields {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn genre(&self) -> &str {
        &self.genre
    }

    pub fn season(&self) -> u32 {
        self.season
    }

    pub fn rating(&self) -> f64 {
        self.rating
    }

    pub fn recommended(&self) -> bool {
        self.recommended
    }
}

#[derive(Debug, Clone, PartialEq, Display, Serialize)]
#[display("{id} {fields}")]
pub struct Entry {
    pub(crate) id: EntryId,
    #[serde(flatten)]
    pub(crate) fields: EntryFields,
    pub(crate) image: Option<ImageData>,
}

impl Entry {
    pub fn id(&self) -> EntryId {
        self.id
    }

    pub fn fields(&self) -> &EntryFields {
        &self.fields
    }

    pub fn image(&self) -> Option<&ImageData> {
        self.image.as_ref()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawValue {
    Text(String),
    Integer(i64),
    Float(f64),
}

/// Accepts `season = "2"` as well as `season = 2`.
fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(match RawValue::deserialize(deserializer)? {
        RawValue::Text(text) => text,
        RawValue::Integer(n) => n.to_string(),
        RawValue::Float(n) => n.to_string(),
    })
}

/// Raw values as typed into the add or edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub genre: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub season: String,
    #[serde(default, deserialize_with = "text_or_number")]
    pub rating: String,
    #[serde(default)]
    pub recommended: bool,
    /// Only honoured by the add form.
    #[serde(default)]
    pub image: Option<std::path::PathBuf>,
}

impl Submission {
    pub fn new(title: impl Into<String>,
               genre: impl Into<String>,
               season: impl Into<String>,
               rating: impl Into<String>,
               recommended: bool) -> Self {
        Self {
            title: title.into(),
            genre: genre.into(),
            season: season.into(),
            rating: rating.into(),
            recommended,
            image: None,
        }
    }

    pub fn with_image(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        self.image = Some(path.into());
        self
    }
}

impl From<&Entry> for Submission {
    fn from(entry: &Entry) -> Self {
        Submission::new(entry.fields.title.clone(),
                        entry.fields.genre.clone(),
                        entry.fields.season.to_string(),
                        entry.fields.rating.to_string(),
                        entry.fields.recommended)
    }
}
