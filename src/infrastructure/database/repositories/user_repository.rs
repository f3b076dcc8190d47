//! SeaORM implementation of UserRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set, TransactionTrait,
};
use uuid::Uuid;

use crate::domain::user::{LandlordProfile, TenantProfile, User, UserRepository, UserRole};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{landlord, tenant, user};

use super::db_err;

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn role_to_domain(r: user::UserRole) -> UserRole {
    match r {
        user::UserRole::Tenant => UserRole::Tenant,
        user::UserRole::Landlord => UserRole::Landlord,
        user::UserRole::Admin => UserRole::Admin,
    }
}

fn role_to_entity(r: UserRole) -> user::UserRole {
    match r {
        UserRole::Tenant => user::UserRole::Tenant,
        UserRole::Landlord => user::UserRole::Landlord,
        UserRole::Admin => user::UserRole::Admin,
    }
}

fn model_to_domain(m: user::Model) -> User {
    User {
        id: m.id,
        email: m.email,
        password_hash: m.password_hash,
        first_name: m.first_name,
        last_name: m.last_name,
        phone_number: m.phone_number,
        role: role_to_domain(m.role),
        is_active: m.is_active,
        created_at: m.created_at,
        updated_at: m.updated_at,
        last_login_at: m.last_login_at,
    }
}

fn domain_to_active(u: &User) -> user::ActiveModel {
    user::ActiveModel {
        id: Set(u.id.clone()),
        email: Set(u.email.clone()),
        password_hash: Set(u.password_hash.clone()),
        first_name: Set(u.first_name.clone()),
        last_name: Set(u.last_name.clone()),
        phone_number: Set(u.phone_number.clone()),
        role: Set(role_to_entity(u.role)),
        is_active: Set(u.is_active),
        created_at: Set(u.created_at),
        updated_at: Set(u.updated_at),
        last_login_at: Set(u.last_login_at),
    }
}

fn tenant_to_domain(m: tenant::Model) -> TenantProfile {
    TenantProfile {
        id: m.id,
        user_id: m.user_id,
        bio: m.bio,
        occupation: m.occupation,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

fn landlord_to_domain(m: landlord::Model) -> LandlordProfile {
    LandlordProfile {
        id: m.id,
        user_id: m.user_id,
        bio: m.bio,
        business_name: m.business_name,
        created_at: m.created_at,
        updated_at: m.updated_at,
    }
}

// ── UserRepository impl ─────────────────────────────────────────

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let model = user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn count(&self) -> DomainResult<u64> {
        user::Entity::find().count(&self.db).await.map_err(db_err)
    }

    async fn create_with_profile(&self, u: User) -> DomainResult<User> {
        debug!("Creating user {} with {} profile", u.id, u.role);

        let txn = self.db.begin().await.map_err(db_err)?;

        domain_to_active(&u).insert(&txn).await.map_err(db_err)?;

        match u.role {
            UserRole::Landlord => {
                let profile = LandlordProfile::new(Uuid::new_v4().to_string(), &u.id);
                landlord::ActiveModel {
                    id: Set(profile.id),
                    user_id: Set(profile.user_id),
                    bio: Set(None),
                    business_name: Set(None),
                    created_at: Set(profile.created_at),
                    updated_at: Set(profile.updated_at),
                }
                .insert(&txn)
                .await
                .map_err(db_err)?;
            }
            // Admins get a tenant profile too so they can exercise tenant flows
            UserRole::Tenant | UserRole::Admin => {
                let profile = TenantProfile::new(Uuid::new_v4().to_string(), &u.id);
                tenant::ActiveModel {
                    id: Set(profile.id),
                    user_id: Set(profile.user_id),
                    bio: Set(None),
                    occupation: Set(None),
                    created_at: Set(profile.created_at),
                    updated_at: Set(profile.updated_at),
                }
                .insert(&txn)
                .await
                .map_err(db_err)?;
            }
        }

        txn.commit().await.map_err(db_err)?;
        Ok(u)
    }

    async fn update(&self, u: User) -> DomainResult<User> {
        let existing = user::Entity::find_by_id(&u.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if existing.is_none() {
            return Err(DomainError::not_found("User", "id", &u.id));
        }

        domain_to_active(&u).update(&self.db).await.map_err(db_err)?;
        Ok(u)
    }

    async fn find_tenant_by_user_id(&self, user_id: &str) -> DomainResult<Option<TenantProfile>> {
        let model = tenant::Entity::find()
            .filter(tenant::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(tenant_to_domain))
    }

    async fn find_landlord_by_user_id(
        &self,
        user_id: &str,
    ) -> DomainResult<Option<LandlordProfile>> {
        let model = landlord::Entity::find()
            .filter(landlord::Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(landlord_to_domain))
    }

    async fn create_tenant_profile(&self, p: TenantProfile) -> DomainResult<TenantProfile> {
        debug!("Provisioning tenant profile for user {}", p.user_id);
        tenant::ActiveModel {
            id: Set(p.id.clone()),
            user_id: Set(p.user_id.clone()),
            bio: Set(p.bio.clone()),
            occupation: Set(p.occupation.clone()),
            created_at: Set(p.created_at),
            updated_at: Set(p.updated_at),
        }
        .insert(&self.db)
        .await
        .map_err(db_err)?;
        Ok(p)
    }

    async fn update_tenant_profile(&self, p: TenantProfile) -> DomainResult<TenantProfile> {
        let existing = tenant::Entity::find_by_id(&p.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if existing.is_none() {
            return Err(DomainError::not_found("Tenant", "id", &p.id));
        }

        tenant::ActiveModel {
            id: Set(p.id.clone()),
            user_id: Set(p.user_id.clone()),
            bio: Set(p.bio.clone()),
            occupation: Set(p.occupation.clone()),
            created_at: Set(p.created_at),
            updated_at: Set(p.updated_at),
        }
        .update(&self.db)
        .await
        .map_err(db_err)?;
        Ok(p)
    }

    async fn update_landlord_profile(&self, p: LandlordProfile) -> DomainResult<LandlordProfile> {
        let existing = landlord::Entity::find_by_id(&p.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if existing.is_none() {
            return Err(DomainError::not_found("Landlord", "id", &p.id));
        }

        landlord::ActiveModel {
            id: Set(p.id.clone()),
            user_id: Set(p.user_id.clone()),
            bio: Set(p.bio.clone()),
            business_name: Set(p.business_name.clone()),
            created_at: Set(p.created_at),
            updated_at: Set(p.updated_at),
        }
        .update(&self.db)
        .await
        .map_err(db_err)?;
        Ok(p)
    }
}
