//! Placeholder substitution for note file names and bodies.
//!
//! Templates are plain text. Each `{{name}}` token in the vocabulary is
//! replaced literally, every occurrence, and anything else is left alone so
//! that user templates stay portable.

use chrono::NaiveDate;

use crate::{notify::Notifier, types::Album, vault::Vault};

/// The `genre` placeholder always renders this; album payloads carry no genre.
pub const DEFAULT_GENRE: &str = "Pop";

pub const NOTE_EXTENSION: &str = ".md";

pub const DEFAULT_TEMPLATE: &str = r#"---
category:
  - "[[Albums]]"
cover: {{coverUrl}}
tags:
  - music
  - albums
  - references
genre: {{genre}}
artist: "[[{{artist}}]]"
year: {{publishYear}}
created: {{date}}
rating: 
---
"#;

const FORBIDDEN: [char; 9] = ['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Placeholder to value, in substitution order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderVariables(Vec<(&'static str, String)>);

impl RenderVariables {
    pub fn get(&self, placeholder: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| *key == placeholder)
            .map(|(_, value)| &value[..])
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(key, value)| (*key, &value[..]))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedNote {
    pub file_name: String,
    pub content: String,
}

pub fn variables(album: &Album, today: NaiveDate) -> RenderVariables {
    let year = album.year();
    let cover = album.cover_url().to_owned();

    RenderVariables(vec![
        ("{{title}}", album.name.clone()),
        ("{{artist}}", album.artist_names()),
        ("{{year}}", year.clone()),
        ("{{date}}", today.format("%Y-%m-%d").to_string()),
        ("{{cover}}", cover.clone()),
        ("{{coverUrl}}", cover),
        ("{{publishYear}}", year),
        ("{{genre}}", DEFAULT_GENRE.to_owned()),
        ("{{tracks}}", album.total_tracks.to_string()),
        ("{{url}}", album.external_urls.spotify.clone()),
        ("{{id}}", album.id.clone()),
    ])
}

pub fn substitute(pattern: &str, vars: &RenderVariables) -> String {
    vars.iter()
        .fold(pattern.to_owned(), |text, (key, value)| text.replace(key, value))
}

pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .filter(|c| !FORBIDDEN.contains(c))
        .collect::<String>()
        .trim()
        .to_owned()
}

pub fn render(
    album: &Album,
    file_name_format: &str,
    body_pattern: &str,
    today: NaiveDate,
) -> RenderedNote {
    let vars = variables(album, today);

    let file_name = vars.iter().fold(file_name_format.to_owned(), |name, (key, value)| {
        name.replace(key, &sanitize_file_name(value))
    });
    let file_name = sanitize_file_name(&file_name) + NOTE_EXTENSION;

    RenderedNote {
        file_name,
        content: substitute(body_pattern, &vars),
    }
}

/// The note body pattern: the configured template file when it can be read
/// and is non-empty, the built-in template otherwise.
pub fn body_pattern(vault: &dyn Vault, template_file: &str, notifier: &dyn Notifier) -> String {
    if template_file.is_empty() {
        return DEFAULT_TEMPLATE.to_owned();
    }

    match vault.read(template_file) {
        Ok(content) if !content.is_empty() => content,
        Ok(_) => DEFAULT_TEMPLATE.to_owned(),
        Err(err) => {
            tracing::warn!(error = %err, template_file, "template unavailable");
            notifier.notice(&format!(
                "Template file not found: {template_file}. Using default template."
            ));
            DEFAULT_TEMPLATE.to_owned()
        }
    }
}
