//! Reading of the small literal structures used as puzzle input,
//! e.g. `[1, 2, 3]` or `[E,E,_,W,W]`.

use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LiteralError {
    #[error("Expected a list literal like [1, 2, 3], found {0:?}")]
    NotAList(String),

    #[error("Invalid element {0:?} in list literal")]
    InvalidElement(String),
}

/// Split a bracketed, comma separated list into its trimmed elements.
///
/// Quotes around elements are dropped, so `['E', 'W']` and `[E, W]` read
/// the same.
pub(crate) fn parse_list(s: &str) -> Result<Vec<String>, LiteralError> {
    lazy_static! {
        static ref RE: Regex = Regex::new(r"^\s*\[(?P<body>[^\[\]]*)\]\s*$").unwrap();
    };

    let cap = RE
        .captures(s)
        .ok_or_else(|| LiteralError::NotAList(s.trim().to_string()))?;

    let body = cap["body"].trim();
    if body.is_empty() {
        return Ok(Vec::new());
    }

    body.split(',')
        .map(|element| {
            let element = element.trim().trim_matches(|c: char| c == '\'' || c == '"');
            if element.is_empty() {
                Err(LiteralError::InvalidElement(element.to_string()))
            } else {
                Ok(element.to_string())
            }
        })
        .collect()
}

/// Parse a list literal whose elements are all of one type.
pub(crate) fn parse_values<T: FromStr>(s: &str) -> Result<Vec<T>, LiteralError> {
    parse_list(s)?
        .into_iter()
        .map(|e| e.parse::<T>().map_err(|_| LiteralError::InvalidElement(e)))
        .collect()
}
