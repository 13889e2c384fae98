//! Roles an account can hold across the eTour and SMOS desks.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Administrator,
    Teacher,
    Student,
    Parent,
    AgencyOperator,
    PointOperator,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Administrator,
        Role::Teacher,
        Role::Student,
        Role::Parent,
        Role::AgencyOperator,
        Role::PointOperator,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Administrator => "administrator",
            Self::Teacher => "teacher",
            Self::Student => "student",
            Self::Parent => "parent",
            Self::AgencyOperator => "agency_operator",
            Self::PointOperator => "point_operator",
        }
    }

    /// Accepts the snake_case name, ignoring case and surrounding spaces.
    pub fn parse(s: &str) -> Option<Self> {
        let wanted = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|r| r.as_str() == wanted)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
