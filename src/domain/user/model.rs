//! User domain entity and role profiles

use chrono::{DateTime, Utc};

/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    /// Rents properties; owns bookings, reviews and saved properties
    Tenant,
    /// Lists properties and manages their calendars
    Landlord,
    /// Platform operator
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tenant => "TENANT",
            Self::Landlord => "LANDLORD",
            Self::Admin => "ADMIN",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "LANDLORD" => Self::Landlord,
            "ADMIN" => Self::Admin,
            _ => Self::Tenant,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Platform account. Role-specific data lives on the Tenant/Landlord profile
/// row keyed by `user_id`.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn new(id: impl Into<String>, email: impl Into<String>, password_hash: impl Into<String>, role: UserRole) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            email: email.into(),
            password_hash: password_hash.into(),
            first_name: None,
            last_name: None,
            phone_number: None,
            role,
            is_active: true,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

/// Tenant profile. Its `id` is the identity bookings and reviews are keyed
/// by, distinct from the session's user id.
#[derive(Debug, Clone)]
pub struct TenantProfile {
    pub id: String,
    pub user_id: String,
    pub bio: Option<String>,
    pub occupation: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TenantProfile {
    pub fn new(id: impl Into<String>, user_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            user_id: user_id.into(),
            bio: None,
            occupation: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Landlord profile. Property ownership is keyed by its `id`.
#[derive(Debug, Clone)]
pub struct LandlordProfile {
    pub id: String,
    pub user_id: String,
    pub bio: Option<String>,
    pub business_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LandlordProfile {
    pub fn new(id: impl Into<String>, user_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            user_id: user_id.into(),
            bio: None,
            business_name: None,
            created_at: now,
            updated_at: now,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_display_roundtrip() {
        for role in &[UserRole::Tenant, UserRole::Landlord, UserRole::Admin] {
            assert_eq!(&UserRole::from_str(role.as_str()), role);
        }
    }

    #[test]
    fn unknown_role_defaults_to_tenant() {
        assert_eq!(UserRole::from_str("SUPERUSER"), UserRole::Tenant);
    }

    #[test]
    fn new_user_is_active() {
        let u = User::new("u-1", "a@b.c", "hash", UserRole::Landlord);
        assert!(u.is_active);
        assert!(!u.is_admin());
        assert!(u.last_login_at.is_none());
    }
}
