use std::fmt::Display;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Discriminator for the reference tables the dropdowns feed from.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum LookupKind {
    #[default]
    City,
    Area,
    Category,
    Qualification,
    AgreementType,
}

impl LookupKind {
    pub const ALL: [LookupKind; 5] = [
        LookupKind::City,
        LookupKind::Area,
        LookupKind::Category,
        LookupKind::Qualification,
        LookupKind::AgreementType,
    ];

    /// Backend resource segment for this kind.
    pub fn resource(self) -> &'static str {
        match self {
            LookupKind::City => "cities",
            LookupKind::Area => "areas",
            LookupKind::Category => "categories",
            LookupKind::Qualification => "qualifications",
            LookupKind::AgreementType => "agreements",
        }
    }
}

impl Display for LookupKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupKind::City => write!(f, "city"),
            LookupKind::Area => write!(f, "area"),
            LookupKind::Category => write!(f, "category"),
            LookupKind::Qualification => write!(f, "qualification"),
            LookupKind::AgreementType => write!(f, "agreement_type"),
        }
    }
}

impl TryFrom<&str> for LookupKind {
    type Error = String;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.trim().to_lowercase().as_str() {
            "city" => Ok(LookupKind::City),
            "area" => Ok(LookupKind::Area),
            "category" => Ok(LookupKind::Category),
            "qualification" => Ok(LookupKind::Qualification),
            "agreement_type" => Ok(LookupKind::AgreementType),
            other => Err(format!("unknown lookup kind: {other}")),
        }
    }
}

/// One named reference row (city, area, category, qualification, agreement
/// type).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Lookup {
    pub id: i32,
    pub academy_id: i32,
    pub kind: LookupKind,
    pub name: String,
    pub archived: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewLookup {
    pub academy_id: i32,
    pub kind: LookupKind,
    pub name: String,
}

impl NewLookup {
    #[must_use]
    pub fn new(academy_id: i32, kind: LookupKind, name: String) -> Self {
        Self {
            academy_id,
            kind,
            name: name.trim().to_string(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpdateLookup {
    pub name: String,
}

impl UpdateLookup {
    #[must_use]
    pub fn new(name: String) -> Self {
        Self {
            name: name.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_kind_round_trip() {
        for kind in LookupKind::ALL {
            assert_eq!(LookupKind::try_from(kind.to_string().as_str()).unwrap(), kind);
        }
        assert!(LookupKind::try_from("planet").is_err());
    }
}
