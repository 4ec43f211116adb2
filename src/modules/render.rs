use serde::Serialize;
use std::fmt;
use crate::modules::types::{Entry, EntryId, ImageData};

pub const MAX_STARS: u8 = 5;

/// Filled stars for a rating on the 1..=10 scale, two points per star.
/// Halves round up, so a rating of 1 still earns one star.
pub fn star_count(rating: f64) -> u8 {
    let stars = (rating / 2.0 + 0.5).floor();
    stars.clamp(0.0, MAX_STARS as f64) as u8
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditAction {
    pub id: EntryId,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryCard {
    pub id: EntryId,
    pub title: String,
    pub genre: String,
    pub season: u32,
    pub rating: f64,
    pub stars: u8,
    pub rating_label: String,
    pub rating_aria: String,
    pub recommended: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageData>,
    pub edit: EditAction,
}

impl EntryCard {
    pub fn from_entry(entry: &Entry) -> Self {
        let fields = entry.fields();
        Self {
            id: entry.id(),
            title: fields.title().to_string(),
            genre: fields.genre().to_string(),
            season: fields.season(),
            rating: fields.rating(),
            stars: star_count(fields.rating()),
            rating_label: format!("({}/10)", fields.rating()),
            rating_aria: format!("Rating: {} out of 10", fields.rating()),
            recommended: fields.recommended(),
            image: entry.image().cloned(),
            edit: EditAction {
                id: entry.id(),
                label: format!("Edit anime {}", fields.title()),
            },
        }
    }

    pub fn star_bar(&self) -> String {
        (0..MAX_STARS)
            .map(|i| if i < self.stars { '★' } else { '☆' })
            .collect()
    }
}

impl fmt::Display for EntryCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f,
               "{} {} | Genre: {} | Season: {} | {} {}",
               self.id, self.title, self.genre, self.season, self.star_bar(), self.rating_label)?;
        if self.recommended {
            write!(f, " | Recommended")?;
        }
        if let Some(image) = &self.image {
            write!(f, " | {image}")?;
        }
        Ok(())
    }
}

/// Both list projections. Each list owns its cards.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ViewModel {
    pub all: Vec<EntryCard>,
    pub recommended: Vec<EntryCard>,
}

impl fmt::Display for ViewModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Watched ({})", self.all.len())?;
        for card in &self.all {
            writeln!(f, "  {card}")?;
        }
        writeln!(f, "Recommended ({})", self.recommended.len())?;
        for card in &self.recommended {
            writeln!(f, "  {card}")?;
        }
        Ok(())
    }
}

pub fn render(entries: &[Entry]) -> ViewModel {
    let mut view = ViewModel::default();
    for entry in entries {
        view.all.push(EntryCard::from_entry(entry));
        if entry.fields().recommended() {
            view.recommended.push(EntryCard::from_entry(entry));
        }
    }
    view
}
