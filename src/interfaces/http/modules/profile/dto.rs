//! Profile DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::user::{LandlordProfile, TenantProfile, User};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TenantProfileDto {
    pub id: String,
    pub bio: Option<String>,
    pub occupation: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LandlordProfileDto {
    pub id: String,
    pub bio: Option<String>,
    pub business_name: Option<String>,
}

/// Account plus whichever role profiles the user carries
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProfileResponse {
    pub id: String,
    pub email: String,
    pub role: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone_number: Option<String>,
    pub tenant: Option<TenantProfileDto>,
    pub landlord: Option<LandlordProfileDto>,
}

impl ProfileResponse {
    pub fn from_parts(
        user: User,
        tenant: Option<TenantProfile>,
        landlord: Option<LandlordProfile>,
    ) -> Self {
        Self {
            id: user.id,
            email: user.email,
            role: user.role.as_str().to_string(),
            first_name: user.first_name,
            last_name: user.last_name,
            phone_number: user.phone_number,
            tenant: tenant.map(|t| TenantProfileDto {
                id: t.id,
                bio: t.bio,
                occupation: t.occupation,
            }),
            landlord: landlord.map(|l| LandlordProfileDto {
                id: l.id,
                bio: l.bio,
                business_name: l.business_name,
            }),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProfileRequest {
    #[validate(length(max = 100))]
    pub first_name: Option<String>,
    #[validate(length(max = 100))]
    pub last_name: Option<String>,
    #[validate(length(max = 30))]
    pub phone_number: Option<String>,
    #[validate(length(max = 1000))]
    pub bio: Option<String>,
    /// Tenant-only field
    #[validate(length(max = 100))]
    pub occupation: Option<String>,
    /// Landlord-only field
    #[validate(length(max = 200))]
    pub business_name: Option<String>,
}
