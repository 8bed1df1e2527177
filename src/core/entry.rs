use thiserror::Error;

const MAX_ENTRY_CHARS: usize = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditField {
    Angle,
    Strength,
}

impl EditField {
    pub fn label(self) -> &'static str {
        match self {
            Self::Angle => "angle",
            Self::Strength => "strength",
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum EntryError {
    #[error("'{text}' is not a number")]
    NotANumber { text: String },
    #[error("'{text}' is not a finite number")]
    NotFinite { text: String },
}

pub fn parse_entry(text: &str) -> Result<f64, EntryError> {
    let trimmed = text.trim();
    let value = trimmed
        .parse::<f64>()
        .map_err(|_| EntryError::NotANumber {
            text: trimmed.to_string(),
        })?;
    if !value.is_finite() {
        return Err(EntryError::NotFinite {
            text: trimmed.to_string(),
        });
    }
    Ok(value)
}

/// How a committed value is shown when a field is not being edited.
pub fn format_committed(value: f64) -> String {
    format!("{value:.1}")
}

/// In-progress edit of one numeric field.
#[derive(Clone, Debug, PartialEq)]
pub struct TextEntry {
    field: EditField,
    buffer: String,
}

impl TextEntry {
    pub fn begin(field: EditField, committed: f64) -> Self {
        Self {
            field,
            buffer: format_committed(committed),
        }
    }

    pub fn field(&self) -> EditField {
        self.field
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn push_char(&mut self, ch: char) {
        if ch.is_control() || self.buffer.chars().count() >= MAX_ENTRY_CHARS {
            return;
        }
        self.buffer.push(ch);
    }

    pub fn backspace(&mut self) {
        self.buffer.pop();
    }

    pub fn parse(&self) -> Result<f64, EntryError> {
        parse_entry(&self.buffer)
    }
}
