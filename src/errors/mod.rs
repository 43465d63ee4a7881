use derive_more::Display;
use std::error::Error;

#[derive(Debug, Display, Clone, PartialEq)]
#[display(fmt = "{}.{}", text, "cause_suffix(cause)")]
pub struct ElectionError {
    text: String,
    cause: String,
}

pub(crate) type Result<T> = std::result::Result<T, ElectionError>;

pub fn new_err<T>(text: String, cause: String) -> Result<T> {
    Err(ElectionError { text, cause })
}

impl ElectionError {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cause(&self) -> &str {
        &self.cause
    }
}

fn cause_suffix(cause: &str) -> String {
    if cause.is_empty() {
        String::new()
    } else {
        format!(" Cause: {}", cause)
    }
}

impl Error for ElectionError {}

pub(crate) fn new_multiple_err<T>(text: String, causes: Vec<ElectionError>) -> Result<T> {
    let mut error_string = String::new();

    if !causes.is_empty() {
        error_string.push_str("Errors: ");
    }

    for (error_index, err) in causes.iter().enumerate() {
        error_string.push_str(&format!("{}) {} ", error_index + 1, err));
    }
    Err(ElectionError {
        text,
        cause: error_string.trim_end().to_string(),
    })
}
