/// Node text templates: parsing and interpolation.
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::schema::state::Playthrough;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("template parse error: {0}")]
    Parse(String),
}

/// A player field reachable from templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerField {
    Name,
    Gender,
}

/// A segment of a parsed template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TemplateSegment {
    /// Literal text, emitted as-is.
    Literal(String),
    /// `{player.name}` / `{player.gender}`.
    Player(PlayerField),
    /// `{state.key}`; renders empty when the key is unset.
    State(String),
}

/// A parsed template, as a sequence of segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub segments: Vec<TemplateSegment>,
}

impl Template {
    /// Parse a template string into a sequence of segments.
    ///
    /// `{player.name}`, `{player.gender}` and `{state.<key>}` are
    /// references; `{{` and `}}` are literal braces.
    pub fn parse(input: &str) -> Result<Template, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = input.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.next_if_eq(&'{').is_some() => literal.push('{'),
                '}' if chars.next_if_eq(&'}').is_some() => literal.push('}'),
                '}' => return Err(TemplateError::Parse("unmatched closing brace".to_string())),
                '{' => {
                    let mut reference = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some('{') => {
                                return Err(TemplateError::Parse(
                                    "nested braces are not allowed".to_string(),
                                ))
                            }
                            Some(c) => reference.push(c),
                            None => return Err(TemplateError::Parse("unclosed brace".to_string())),
                        }
                    }

                    let segment = match reference.split_once('.') {
                        Some(("player", "name")) => TemplateSegment::Player(PlayerField::Name),
                        Some(("player", "gender")) => TemplateSegment::Player(PlayerField::Gender),
                        Some(("state", key)) if !key.is_empty() => {
                            TemplateSegment::State(key.to_string())
                        }
                        _ => {
                            return Err(TemplateError::Parse(format!(
                                "unknown reference '{{{}}}'",
                                reference
                            )))
                        }
                    };

                    if !literal.is_empty() {
                        segments.push(TemplateSegment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(segment);
                }
                c => literal.push(c),
            }
        }

        if !literal.is_empty() {
            segments.push(TemplateSegment::Literal(literal));
        }

        Ok(Template { segments })
    }

    /// Interpolate against the current playthrough.
    pub fn render(&self, playthrough: &Playthrough) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                TemplateSegment::Literal(text) => out.push_str(text),
                TemplateSegment::Player(PlayerField::Name) => out.push_str(&playthrough.player.name),
                TemplateSegment::Player(PlayerField::Gender) => {
                    if let Some(gender) = &playthrough.player.gender {
                        out.push_str(gender);
                    }
                }
                TemplateSegment::State(key) => {
                    if let Some(value) = playthrough.state.get(key) {
                        out.push_str(&value.to_string());
                    }
                }
            }
        }
        out
    }
}
