//! User account model
//!
//! Accounts are the credential store of the school backend. Each account has
//! a role that decides what it may do through the API, and may point at the
//! teacher or student record it belongs to.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A registered login account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    /// Unique identifier, assigned by the store
    pub id: i64,
    /// Login name (unique)
    pub username: String,
    /// Password hash (argon2, PHC string)
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Account role
    pub role: UserRole,
    /// Teacher id for teacher accounts, student id for parent accounts
    pub related_id: Option<i64>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl UserAccount {
    /// Create a new account.
    ///
    /// The password must already be hashed, see `services::password::hash_password()`.
    /// The id is filled in by the repository on insert.
    pub fn new(
        username: String,
        password_hash: String,
        role: UserRole,
        related_id: Option<i64>,
    ) -> Self {
        Self {
            id: 0,
            username,
            password_hash,
            role,
            related_id,
            created_at: Utc::now(),
        }
    }
}

/// Account role.
///
/// - Admin: manages every record and registers accounts
/// - Teacher: reads records, linked to a teacher
/// - Parent: reads records, linked to a student
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Teacher,
    Parent,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Admin => write!(f, "admin"),
            UserRole::Teacher => write!(f, "teacher"),
            UserRole::Parent => write!(f, "parent"),
        }
    }
}

impl FromStr for UserRole {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(UserRole::Admin),
            "teacher" => Ok(UserRole::Teacher),
            "parent" => Ok(UserRole::Parent),
            _ => Err(anyhow::anyhow!("Invalid user role: {}", s)),
        }
    }
}
