//! # Resource Kinds
//!
//! The kinds of owned entities the platform authorizes access to.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kinds of resources that capabilities operate on.
///
/// Every owned entity in the platform belongs to exactly one kind. The
/// kind determines which capability variants exist for it and which
/// access-rule shape each operation uses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    /// A course, the container materials are submitted into.
    Course,
    /// A study material uploaded into a course.
    Material,
    /// A star rating attached to a material.
    Rating,
    /// A written review attached to a material.
    Review,
    /// A tag attached to materials.
    Tag,
    /// A user account (credentials, profile).
    Account,
    /// A role definition or assignment.
    Role,
}

impl ResourceKind {
    /// Get the string representation of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Course => "course",
            ResourceKind::Material => "material",
            ResourceKind::Rating => "rating",
            ResourceKind::Review => "review",
            ResourceKind::Tag => "tag",
            ResourceKind::Account => "account",
            ResourceKind::Role => "role",
        }
    }

    /// Parse a resource kind from its string representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "course" => Some(ResourceKind::Course),
            "material" => Some(ResourceKind::Material),
            "rating" => Some(ResourceKind::Rating),
            "review" => Some(ResourceKind::Review),
            "tag" => Some(ResourceKind::Tag),
            "account" => Some(ResourceKind::Account),
            "role" => Some(ResourceKind::Role),
            _ => None,
        }
    }

    /// Get all resource kinds.
    pub fn all() -> Vec<Self> {
        vec![
            ResourceKind::Course,
            ResourceKind::Material,
            ResourceKind::Rating,
            ResourceKind::Review,
            ResourceKind::Tag,
            ResourceKind::Account,
            ResourceKind::Role,
        ]
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
