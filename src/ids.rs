//! Typed identifiers for every tournament entity.
//!
//! Every id is a 3-letter type tag, an underscore, and a 32-hex token
//! (e.g. `brk_337f327d4d7e4ad1a4266a4e7a0699ac`). The tag makes a foreign
//! key self-describing: a `Pot` can only point at a `div_...` division and
//! a `sqd_...` squad, and route parameters are checked before they are
//! interpolated into a URL.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Length of the hex token following the type tag.
const TOKEN_LEN: usize = 32;

/// The entity type encoded in an id's 3-letter tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Tournament,
    Event,
    Division,
    Squad,
    Lane,
    Pot,
    Bracket,
    Eliminator,
    Player,
    DivEntry,
    PotEntry,
    BrktEntry,
    ElimEntry,
}

impl EntityKind {
    /// The 3-letter tag used as the id prefix.
    pub const fn tag(self) -> &'static str {
        match self {
            EntityKind::Tournament => "tmt",
            EntityKind::Event => "evt",
            EntityKind::Division => "div",
            EntityKind::Squad => "sqd",
            EntityKind::Lane => "lan",
            EntityKind::Pot => "pot",
            EntityKind::Bracket => "brk",
            EntityKind::Eliminator => "elm",
            EntityKind::Player => "ply",
            EntityKind::DivEntry => "den",
            EntityKind::PotEntry => "pen",
            EntityKind::BrktEntry => "ben",
            EntityKind::ElimEntry => "een",
        }
    }

    fn from_tag(tag: &str) -> Option<Self> {
        let kind = match tag {
            "tmt" => EntityKind::Tournament,
            "evt" => EntityKind::Event,
            "div" => EntityKind::Division,
            "sqd" => EntityKind::Squad,
            "lan" => EntityKind::Lane,
            "pot" => EntityKind::Pot,
            "brk" => EntityKind::Bracket,
            "elm" => EntityKind::Eliminator,
            "ply" => EntityKind::Player,
            "den" => EntityKind::DivEntry,
            "pen" => EntityKind::PotEntry,
            "ben" => EntityKind::BrktEntry,
            "een" => EntityKind::ElimEntry,
            _ => return None,
        };
        Some(kind)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// A tagged entity id.
///
/// Stored as its string form so it can be used directly as a JSON value,
/// a map key, and a route parameter.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Generate a fresh id for `kind`.
    pub fn generate(kind: EntityKind) -> Self {
        Self(format!("{}_{}", kind.tag(), Uuid::new_v4().simple()))
    }

    /// Check that `s` is a well-formed id of the expected kind.
    pub fn is_valid(s: &str, kind: EntityKind) -> bool {
        let Some((tag, token)) = s.split_once('_') else {
            return false;
        };
        tag == kind.tag()
            && token.len() == TOKEN_LEN
            && token.bytes().all(|b| b.is_ascii_hexdigit() && !b.is_ascii_uppercase())
    }

    /// Parse `s` as an id of the expected kind.
    pub fn parse(s: &str, kind: EntityKind) -> Result<Self, IdError> {
        if Self::is_valid(s, kind) {
            Ok(Self(s.to_string()))
        } else {
            Err(IdError {
                id: s.to_string(),
                expected: kind,
            })
        }
    }

    /// The kind encoded in this id's tag, if the tag is known.
    pub fn kind(&self) -> Option<EntityKind> {
        self.0.split_once('_').and_then(|(tag, _)| EntityKind::from_tag(tag))
    }

    /// Whether this id carries the expected tag and shape.
    pub fn has_kind(&self, kind: EntityKind) -> bool {
        Self::is_valid(&self.0, kind)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An id that does not match the expected tag or shape.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid id {id:?}: expected a {expected} id")]
pub struct IdError {
    pub id: String,
    pub expected: EntityKind,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_round_trips() {
        let id = EntityId::generate(EntityKind::Bracket);
        assert!(id.as_str().starts_with("brk_"));
        assert_eq!(id.as_str().len(), 3 + 1 + 32);
        assert!(EntityId::is_valid(id.as_str(), EntityKind::Bracket));
        assert_eq!(id.kind(), Some(EntityKind::Bracket));
    }

    #[test]
    fn test_wrong_tag_rejected() {
        let id = EntityId::generate(EntityKind::Pot);
        assert!(!EntityId::is_valid(id.as_str(), EntityKind::Bracket));
        assert!(EntityId::parse(id.as_str(), EntityKind::Bracket).is_err());
    }

    #[test]
    fn test_malformed_tokens_rejected() {
        assert!(!EntityId::is_valid("div", EntityKind::Division));
        assert!(!EntityId::is_valid("div_short", EntityKind::Division));
        assert!(!EntityId::is_valid(
            "div_ZZ7f327d4d7e4ad1a4266a4e7a0699ac",
            EntityKind::Division
        ));
        // Uppercase hex is not the canonical form.
        assert!(!EntityId::is_valid(
            "div_337F327D4D7E4AD1A4266A4E7A0699AC",
            EntityKind::Division
        ));
    }

    #[test]
    fn test_has_kind_checks_shape_too() {
        let id = EntityId::parse(
            "sqd_337f327d4d7e4ad1a4266a4e7a0699ac",
            EntityKind::Squad,
        )
        .unwrap();
        assert!(id.has_kind(EntityKind::Squad));
        assert!(!id.has_kind(EntityKind::Lane));
    }
}
