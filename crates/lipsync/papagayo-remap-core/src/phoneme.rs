//! Phoneme token to mouth-shape index lookup.
//!
//! A table is built once and never mutated. Shape indices are positions in
//! the reference mouth strip, so the token order of a table is the order the
//! mouth images must appear in.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::error::RemapError;

/// Ordinal position of a mouth shape within the reference strip.
pub type ShapeIndex = i32;

/// Sentinel returned for tokens absent from the table.
pub const UNRESOLVED: ShapeIndex = -1;

/// Preston Blair phoneme set, in strip order.
pub const PRESTON_BLAIR: [&str; 10] = [
    "AI", "E", "etc", "FV", "L", "MBP", "O", "rest", "U", "WQ",
];

/// Extra tokens of the extended Preston Blair set, appended after the base set.
pub const PRESTON_BLAIR_EXTENSION: [&str; 1] = ["TH"];

/// Which phoneme table to build.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "tokens")]
pub enum PhonemeSet {
    PrestonBlair,
    #[default]
    PrestonBlairExtended,
    /// Tokens in strip order; index = position.
    Custom(Vec<String>),
}

impl PhonemeSet {
    pub fn build(&self) -> Result<PhonemeTable, RemapError> {
        match self {
            PhonemeSet::PrestonBlair => Ok(PhonemeTable::preston_blair()),
            PhonemeSet::PrestonBlairExtended => Ok(PhonemeTable::preston_blair_extended()),
            PhonemeSet::Custom(tokens) => PhonemeTable::from_tokens(tokens.iter().cloned()),
        }
    }
}

/// Immutable case-sensitive mapping from phoneme token to shape index.
#[derive(Clone, Debug, PartialEq)]
pub struct PhonemeTable {
    tokens: Vec<String>,
    index: HashMap<String, ShapeIndex>,
}

impl PhonemeTable {
    /// Build a table where each token's shape index is its position.
    /// Rejects empty lists, empty tokens and duplicates.
    pub fn from_tokens<I, S>(tokens: I) -> Result<Self, RemapError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tokens: Vec<String> = tokens.into_iter().map(Into::into).collect();
        if tokens.is_empty() {
            return Err(RemapError::InvalidPhonemeTable {
                reason: "table has no tokens".into(),
            });
        }
        let mut index = HashMap::with_capacity(tokens.len());
        for (i, token) in tokens.iter().enumerate() {
            if token.is_empty() || token.contains(char::is_whitespace) {
                return Err(RemapError::InvalidPhonemeTable {
                    reason: format!("token {i} is empty or contains whitespace"),
                });
            }
            let shape = ShapeIndex::try_from(i).map_err(|_| RemapError::InvalidPhonemeTable {
                reason: "too many tokens".into(),
            })?;
            if index.insert(token.clone(), shape).is_some() {
                return Err(RemapError::InvalidPhonemeTable {
                    reason: format!("duplicate token '{token}'"),
                });
            }
        }
        Ok(Self { tokens, index })
    }

    pub fn preston_blair() -> Self {
        Self::from_static(PRESTON_BLAIR.iter())
    }

    /// Preston Blair plus `TH` at index 10.
    pub fn preston_blair_extended() -> Self {
        Self::from_static(PRESTON_BLAIR.iter().chain(PRESTON_BLAIR_EXTENSION.iter()))
    }

    fn from_static<'a>(tokens: impl Iterator<Item = &'a &'static str>) -> Self {
        let tokens: Vec<String> = tokens.map(|t| (*t).to_string()).collect();
        let index = tokens
            .iter()
            .enumerate()
            .map(|(i, t)| (t.clone(), i as ShapeIndex))
            .collect();
        Self { tokens, index }
    }

    /// Shape index for `token`, or [`UNRESOLVED`].
    #[inline]
    pub fn lookup(&self, token: &str) -> ShapeIndex {
        self.index.get(token).copied().unwrap_or(UNRESOLVED)
    }

    #[inline]
    pub fn contains(&self, token: &str) -> bool {
        self.index.contains_key(token)
    }

    /// Tokens in shape-index order.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl Default for PhonemeTable {
    fn default() -> Self {
        Self::preston_blair_extended()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preston_blair_is_alphabetical_strip_order() {
        let table = PhonemeTable::preston_blair();
        assert_eq!(table.lookup("AI"), 0);
        assert_eq!(table.lookup("E"), 1);
        assert_eq!(table.lookup("etc"), 2);
        assert_eq!(table.lookup("rest"), 7);
        assert_eq!(table.lookup("WQ"), 9);
        assert_eq!(table.lookup("TH"), UNRESOLVED);
    }

    #[test]
    fn extended_appends_th() {
        let table = PhonemeTable::preston_blair_extended();
        assert_eq!(table.len(), 11);
        assert_eq!(table.lookup("TH"), 10);
        assert_eq!(table.tokens().last().map(String::as_str), Some("TH"));
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let table = PhonemeTable::default();
        assert_eq!(table.lookup("ai"), UNRESOLVED);
        assert_eq!(table.lookup("Rest"), UNRESOLVED);
        assert!(table.contains("rest"));
    }

    #[test]
    fn custom_tables_reject_duplicates_and_empty() {
        assert!(PhonemeTable::from_tokens(Vec::<String>::new()).is_err());
        assert!(PhonemeTable::from_tokens(["A", "B", "A"]).is_err());
        assert!(PhonemeTable::from_tokens(["A", ""]).is_err());

        let table = PhonemeTable::from_tokens(["closed", "open"]).unwrap();
        assert_eq!(table.lookup("open"), 1);
    }

    #[test]
    fn phoneme_set_serde_shape() {
        let set: PhonemeSet =
            serde_json::from_str(r#"{"kind":"custom","tokens":["a","b"]}"#).unwrap();
        assert_eq!(set, PhonemeSet::Custom(vec!["a".into(), "b".into()]));
        let set: PhonemeSet = serde_json::from_str(r#"{"kind":"preston_blair"}"#).unwrap();
        assert_eq!(set.build().unwrap().len(), 10);
    }
}
