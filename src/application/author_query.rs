// src/application/author_query.rs
use crate::constants::{MISSING_SEARCH_PARAMS, SEARCH_ALL};
use crate::domain::DomainError;

/// Parsed `firstName` filter of the author search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorQuery {
    All,
    /// Case-insensitive literal prefix of `first_name`
    Prefix(String),
}

impl AuthorQuery {
    pub fn parse(first_name: Option<&str>) -> Result<Self, DomainError> {
        match first_name {
            None | Some("") => Err(DomainError::Validation(MISSING_SEARCH_PARAMS.to_string())),
            Some(SEARCH_ALL) => Ok(Self::All),
            Some(term) => Ok(Self::Prefix(term.to_string())),
        }
    }

    /// Lowercased `LIKE` pattern for the prefix, with the wildcard characters of the term
    /// escaped so the term only ever matches literally. Pair with `ESCAPE '\'` and a
    /// lowercased column.
    pub fn like_pattern(&self) -> Option<String> {
        match self {
            Self::All => None,
            Self::Prefix(term) => {
                let term = term.to_lowercase();
                let mut pattern = String::with_capacity(term.len() + 1);
                for c in term.chars() {
                    if matches!(c, '%' | '_' | '\\') {
                        pattern.push('\\');
                    }
                    pattern.push(c);
                }
                pattern.push('%');
                Some(pattern)
            }
        }
    }

    /// In-memory equivalent of the SQL match, used by the mock repository
    pub fn matches(&self, first_name: &str) -> bool {
        match self {
            Self::All => true,
            Self::Prefix(term) => first_name.to_lowercase().starts_with(&term.to_lowercase()),
        }
    }
}
