//! User profiles and sessions.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Account role.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Farmer,
    /// May edit the crop library
    Admin,
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "farmer" | "user" => Ok(UserRole::Farmer),
            "admin" => Ok(UserRole::Admin),
            _ => Err(format!("Invalid user role: {s}")),
        }
    }
}

impl UserRole {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Farmer => "farmer",
            UserRole::Admin => "admin",
        }
    }
}

/// Whether an account may sign in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    #[default]
    Active,
    /// Sign-in refused and existing sessions rejected
    Blocked,
}

impl FromStr for AccountStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(AccountStatus::Active),
            "blocked" => Ok(AccountStatus::Blocked),
            _ => Err(format!("Invalid account status: {s}")),
        }
    }
}

impl AccountStatus {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "active",
            AccountStatus::Blocked => "blocked",
        }
    }

    /// The other status.
    pub fn toggled(self) -> Self {
        match self {
            AccountStatus::Active => AccountStatus::Blocked,
            AccountStatus::Blocked => AccountStatus::Active,
        }
    }
}

/// Cached profile of the signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    pub name: String,
    #[serde(default)]
    pub role: UserRole,
}

/// Result of signing in: the bearer token and the profile it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthSession {
    pub token: String,
    pub user: UserProfile,
}

/// An account as listed to admins.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserAccount {
    pub id: i64,
    pub name: String,
    pub role: UserRole,
    pub status: AccountStatus,
}
