use serde::Deserialize;
use std::fs;
use crate::modules::edit::{DismissSignal, FormKind};
use crate::modules::types::{EntryId, Submission};
use crate::modules::validation::Field;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub log_file: String,
    pub log_level: String,
    pub output: OutputFormat,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            log_file: "animelist.log".to_string(),
            log_level: "info".to_string(),
            output: OutputFormat::Text,
        }
    }
}

/// One UI event of a scripted session.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    Add(Submission),
    OpenEdit { id: EntryId },
    Edit(Submission),
    Close { signal: DismissSignal },
    Blur { form: FormKind, field: Field, value: String },
    Input { form: FormKind, field: Field },
}

#[derive(Debug, Deserialize, Default)]
pub struct Script {
    #[serde(default, rename = "event")]
    pub events: Vec<Event>,
}

pub fn load_run_config(path: &str) -> Result<RunConfig, Box<dyn std::error::Error>> {
    let text = fs::read_to_string(path)?;
    let config: RunConfig = toml::from_str(&text)?;
    Ok(config)
}

pub fn load_script(path: &str) -> Result<Script, Box<dyn std::error::Error>> {
    let text = fs::read_to_string(path)?;
    let script: Script = toml::from_str(&text)?;
    Ok(script)
}

pub fn is_not_found(err: &Box<dyn std::error::Error>) -> bool {
    err.downcast_ref::<std::io::Error>()
        .map(|io_err| io_err.kind() == std::io::ErrorKind::NotFound)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_parses_every_event_kind() {
        let text = r#"
            [[event]]
            type = "add"
            title = "Naruto"
            genre = "Action"
            season = "1"
            rating = "8"
            recommended = true
            image = "covers/naruto.png"

            [[event]]
            type = "open_edit"
            id = 1

            [[event]]
            type = "edit"
            title = "Naruto Shippuden"
            genre = "Action"
            season = "2"
            rating = "9"

            [[event]]
            type = "close"
            signal = "close_button"

            [[event]]
            type = "blur"
            form = "add"
            field = "rating"
            value = "11"

            [[event]]
            type = "input"
            form = "edit"
            field = "title"
        "#;
        let script: Script = toml::from_str(text).unwrap();

        assert_eq!(script.events.len(), 6);
        match &script.events[0] {
            Event::Add(submission) => {
                assert_eq!(submission.title, "Naruto");
                assert!(submission.recommended);
                assert_eq!(submission.image.as_deref(), Some(std::path::Path::new("covers/naruto.png")));
            }
            other => panic!("unexpected event {other:?}"),
        }
        assert_eq!(script.events[1], Event::OpenEdit { id: EntryId(1) });
        assert!(matches!(&script.events[2], Event::Edit(s) if !s.recommended && s.season == "2"));
        assert_eq!(script.events[3], Event::Close { signal: DismissSignal::CloseButton });
        assert_eq!(script.events[4],
                   Event::Blur { form: FormKind::Add, field: Field::Rating, value: "11".to_string() });
        assert_eq!(script.events[5], Event::Input { form: FormKind::Edit, field: Field::Title });
    }

    #[test]
    fn run_config_fills_defaults() {
        let config: RunConfig = toml::from_str("output = \"json\"").unwrap();
        assert_eq!(config.output, OutputFormat::Json);
        assert_eq!(config.log_file, "animelist.log");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = load_script("/nonexistent/session.toml").unwrap_err();
        assert!(is_not_found(&err));
    }
}
