//! In-memory storage implementation
//!
//! Implements every repository trait over DashMaps. Used by unit tests and
//! for running the service without a database.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use dashmap::DashMap;

use crate::domain::availability::{AvailabilityRepository, AvailabilityWindow};
use crate::domain::booking::{Booking, BookingRepository, BookingStatus};
use crate::domain::property::{Property, PropertyFilter, PropertyRepository};
use crate::domain::repositories::RepositoryProvider;
use crate::domain::review::{Review, ReviewRepository};
use crate::domain::saved_property::{SavedProperty, SavedPropertyRepository};
use crate::domain::user::{LandlordProfile, TenantProfile, User, UserRepository, UserRole};
use crate::domain::{DomainError, DomainResult};
use crate::shared::{PaginatedResult, PaginationParams};

/// In-memory storage for development and testing
#[derive(Default)]
pub struct InMemoryStorage {
    users: DashMap<String, User>,
    tenants: DashMap<String, TenantProfile>,
    landlords: DashMap<String, LandlordProfile>,
    properties: DashMap<String, Property>,
    bookings: DashMap<String, Booking>,
    availability: DashMap<String, AvailabilityWindow>,
    reviews: DashMap<String, Review>,
    saved_properties: DashMap<String, SavedProperty>,
    // Serializes check-then-insert paths the way a DB transaction would
    write_lock: Mutex<()>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn tenant_for_user(&self, user_id: &str) -> Option<TenantProfile> {
        self.tenants
            .iter()
            .find(|e| e.value().user_id == user_id)
            .map(|e| e.value().clone())
    }
}

// ── UserRepository ──────────────────────────────────────────────

#[async_trait]
impl UserRepository for InMemoryStorage {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<User>> {
        Ok(self.users.get(id).map(|e| e.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        Ok(self
            .users
            .iter()
            .find(|e| e.value().email == email)
            .map(|e| e.value().clone()))
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.users.len() as u64)
    }

    async fn create_with_profile(&self, user: User) -> DomainResult<User> {
        let _guard = self.write_lock.lock().unwrap();
        if self
            .users
            .iter()
            .any(|e| e.value().email == user.email)
        {
            return Err(DomainError::Conflict(format!(
                "Duplicate record: email {}",
                user.email
            )));
        }

        match user.role {
            UserRole::Landlord => {
                let profile =
                    LandlordProfile::new(uuid::Uuid::new_v4().to_string(), &user.id);
                self.landlords.insert(profile.id.clone(), profile);
            }
            UserRole::Tenant | UserRole::Admin => {
                let profile = TenantProfile::new(uuid::Uuid::new_v4().to_string(), &user.id);
                self.tenants.insert(profile.id.clone(), profile);
            }
        }

        self.users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> DomainResult<User> {
        if !self.users.contains_key(&user.id) {
            return Err(DomainError::not_found("User", "id", &user.id));
        }
        self.users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn find_tenant_by_user_id(&self, user_id: &str) -> DomainResult<Option<TenantProfile>> {
        Ok(self.tenant_for_user(user_id))
    }

    async fn find_landlord_by_user_id(
        &self,
        user_id: &str,
    ) -> DomainResult<Option<LandlordProfile>> {
        Ok(self
            .landlords
            .iter()
            .find(|e| e.value().user_id == user_id)
            .map(|e| e.value().clone()))
    }

    async fn create_tenant_profile(&self, profile: TenantProfile) -> DomainResult<TenantProfile> {
        let _guard = self.write_lock.lock().unwrap();
        if self.tenant_for_user(&profile.user_id).is_some() {
            return Err(DomainError::Conflict(format!(
                "Duplicate record: tenant profile for user {}",
                profile.user_id
            )));
        }
        self.tenants.insert(profile.id.clone(), profile.clone());
        Ok(profile)
    }

    async fn update_tenant_profile(&self, profile: TenantProfile) -> DomainResult<TenantProfile> {
        if !self.tenants.contains_key(&profile.id) {
            return Err(DomainError::not_found("Tenant", "id", &profile.id));
        }
        self.tenants.insert(profile.id.clone(), profile.clone());
        Ok(profile)
    }

    async fn update_landlord_profile(
        &self,
        profile: LandlordProfile,
    ) -> DomainResult<LandlordProfile> {
        if !self.landlords.contains_key(&profile.id) {
            return Err(DomainError::not_found("Landlord", "id", &profile.id));
        }
        self.landlords.insert(profile.id.clone(), profile.clone());
        Ok(profile)
    }
}

// ── PropertyRepository ──────────────────────────────────────────

#[async_trait]
impl PropertyRepository for InMemoryStorage {
    async fn save(&self, property: Property) -> DomainResult<Property> {
        self.properties
            .insert(property.id.clone(), property.clone());
        Ok(property)
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Property>> {
        Ok(self.properties.get(id).map(|e| e.value().clone()))
    }

    async fn list(
        &self,
        filter: PropertyFilter,
        pagination: PaginationParams,
    ) -> DomainResult<PaginatedResult<Property>> {
        let mut items: Vec<Property> = self
            .properties
            .iter()
            .map(|e| e.value().clone())
            .filter(|p| p.is_active)
            .filter(|p| filter.city.as_ref().map_or(true, |c| &p.city == c))
            .filter(|p| filter.min_price.map_or(true, |m| p.price_per_month >= m))
            .filter(|p| filter.max_price.map_or(true, |m| p.price_per_month <= m))
            .filter(|p| filter.bedrooms.map_or(true, |b| p.bedrooms >= b))
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = items.len() as u64;
        let items = items
            .into_iter()
            .skip(pagination.offset() as usize)
            .take(pagination.limit as usize)
            .collect();
        Ok(PaginatedResult::new(
            items,
            total,
            pagination.page,
            pagination.limit,
        ))
    }

    async fn find_for_landlord(&self, landlord_id: &str) -> DomainResult<Vec<Property>> {
        let mut items: Vec<Property> = self
            .properties
            .iter()
            .filter(|e| e.value().landlord_id == landlord_id)
            .map(|e| e.value().clone())
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    async fn update(&self, property: Property) -> DomainResult<Property> {
        if !self.properties.contains_key(&property.id) {
            return Err(DomainError::not_found("Property", "id", &property.id));
        }
        self.properties
            .insert(property.id.clone(), property.clone());
        Ok(property)
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        self.properties
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("Property", "id", id))
    }

    async fn update_rating(
        &self,
        property_id: &str,
        average_rating: f64,
        total_reviews: i32,
    ) -> DomainResult<()> {
        let mut entry = self
            .properties
            .get_mut(property_id)
            .ok_or_else(|| DomainError::not_found("Property", "id", property_id))?;
        entry.average_rating = average_rating;
        entry.total_reviews = total_reviews;
        Ok(())
    }
}

// ── BookingRepository ───────────────────────────────────────────

#[async_trait]
impl BookingRepository for InMemoryStorage {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Booking>> {
        Ok(self.bookings.get(id).map(|e| e.value().clone()))
    }

    async fn find_for_property(&self, property_id: &str) -> DomainResult<Vec<Booking>> {
        let mut items: Vec<Booking> = self
            .bookings
            .iter()
            .filter(|e| e.value().property_id == property_id)
            .map(|e| e.value().clone())
            .collect();
        items.sort_by_key(|b| b.check_in_date);
        Ok(items)
    }

    async fn find_active_for_property(&self, property_id: &str) -> DomainResult<Vec<Booking>> {
        let mut items: Vec<Booking> = self
            .bookings
            .iter()
            .filter(|e| e.value().property_id == property_id && e.value().is_active())
            .map(|e| e.value().clone())
            .collect();
        items.sort_by_key(|b| b.check_in_date);
        Ok(items)
    }

    async fn find_for_tenant(&self, tenant_id: &str) -> DomainResult<Vec<Booking>> {
        let mut items: Vec<Booking> = self
            .bookings
            .iter()
            .filter(|e| e.value().tenant_id == tenant_id)
            .map(|e| e.value().clone())
            .collect();
        items.sort_by_key(|b| std::cmp::Reverse(b.check_in_date));
        Ok(items)
    }

    async fn find_conflicting(
        &self,
        property_id: &str,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> DomainResult<Vec<Booking>> {
        Ok(self
            .bookings
            .iter()
            .filter(|e| {
                let b = e.value();
                b.property_id == property_id
                    && b.is_active()
                    && b.overlaps(check_in, check_out)
            })
            .map(|e| e.value().clone())
            .collect())
    }

    async fn create_if_available(&self, booking: Booking) -> DomainResult<Booking> {
        let _guard = self.write_lock.lock().unwrap();

        let conflict = self.bookings.iter().any(|e| {
            let b = e.value();
            b.property_id == booking.property_id
                && b.is_active()
                && b.overlaps(booking.check_in_date, booking.check_out_date)
        });
        let blocked = self.availability.iter().any(|e| {
            let w = e.value();
            w.property_id == booking.property_id
                && !w.is_available
                && w.overlaps_stay(booking.check_in_date, booking.check_out_date)
        });
        if conflict || blocked {
            return Err(DomainError::Conflict(
                "Property is not available for the selected dates".to_string(),
            ));
        }

        self.bookings.insert(booking.id.clone(), booking.clone());
        Ok(booking)
    }

    async fn update_status(&self, id: &str, status: BookingStatus) -> DomainResult<Booking> {
        let mut entry = self
            .bookings
            .get_mut(id)
            .ok_or_else(|| DomainError::not_found("Booking", "id", id))?;
        entry.status = status;
        entry.updated_at = chrono::Utc::now();
        Ok(entry.value().clone())
    }

    async fn find_first_unreviewed_completed(
        &self,
        property_id: &str,
        tenant_id: &str,
    ) -> DomainResult<Option<Booking>> {
        let mut completed: Vec<Booking> = self
            .bookings
            .iter()
            .filter(|e| {
                let b = e.value();
                b.property_id == property_id
                    && b.tenant_id == tenant_id
                    && b.is_completed()
            })
            .map(|e| e.value().clone())
            .collect();
        completed.sort_by_key(|b| b.check_in_date);

        Ok(completed.into_iter().find(|b| {
            !self
                .reviews
                .iter()
                .any(|r| r.value().booking_id == b.id)
        }))
    }

    async fn count_completed(&self, property_id: &str, tenant_id: &str) -> DomainResult<u64> {
        Ok(self
            .bookings
            .iter()
            .filter(|e| {
                let b = e.value();
                b.property_id == property_id
                    && b.tenant_id == tenant_id
                    && b.is_completed()
            })
            .count() as u64)
    }
}

// ── AvailabilityRepository ──────────────────────────────────────

#[async_trait]
impl AvailabilityRepository for InMemoryStorage {
    async fn save(&self, window: AvailabilityWindow) -> DomainResult<AvailabilityWindow> {
        self.availability.insert(window.id.clone(), window.clone());
        Ok(window)
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<AvailabilityWindow>> {
        Ok(self.availability.get(id).map(|e| e.value().clone()))
    }

    async fn find_for_property(&self, property_id: &str) -> DomainResult<Vec<AvailabilityWindow>> {
        let mut items: Vec<AvailabilityWindow> = self
            .availability
            .iter()
            .filter(|e| e.value().property_id == property_id)
            .map(|e| e.value().clone())
            .collect();
        items.sort_by_key(|w| w.start_date);
        Ok(items)
    }

    async fn find_overlapping(
        &self,
        property_id: &str,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> DomainResult<Vec<AvailabilityWindow>> {
        let mut items: Vec<AvailabilityWindow> = self
            .availability
            .iter()
            .filter(|e| {
                let w = e.value();
                w.property_id == property_id && w.overlaps_stay(check_in, check_out)
            })
            .map(|e| e.value().clone())
            .collect();
        items.sort_by_key(|w| w.start_date);
        Ok(items)
    }

    async fn update(&self, window: AvailabilityWindow) -> DomainResult<AvailabilityWindow> {
        if !self.availability.contains_key(&window.id) {
            return Err(DomainError::not_found("AvailabilityWindow", "id", &window.id));
        }
        self.availability.insert(window.id.clone(), window.clone());
        Ok(window)
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        self.availability
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("AvailabilityWindow", "id", id))
    }
}

// ── ReviewRepository ────────────────────────────────────────────

#[async_trait]
impl ReviewRepository for InMemoryStorage {
    async fn save(&self, review: Review) -> DomainResult<Review> {
        let _guard = self.write_lock.lock().unwrap();
        if self
            .reviews
            .iter()
            .any(|e| e.value().booking_id == review.booking_id)
        {
            return Err(DomainError::Conflict(format!(
                "Duplicate record: review for booking {}",
                review.booking_id
            )));
        }
        self.reviews.insert(review.id.clone(), review.clone());
        Ok(review)
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Review>> {
        Ok(self.reviews.get(id).map(|e| e.value().clone()))
    }

    async fn find_by_booking_id(&self, booking_id: &str) -> DomainResult<Option<Review>> {
        Ok(self
            .reviews
            .iter()
            .find(|e| e.value().booking_id == booking_id)
            .map(|e| e.value().clone()))
    }

    async fn find_for_property(&self, property_id: &str) -> DomainResult<Vec<Review>> {
        let mut items: Vec<Review> = self
            .reviews
            .iter()
            .filter(|e| e.value().property_id == property_id)
            .map(|e| e.value().clone())
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    async fn update(&self, review: Review) -> DomainResult<Review> {
        if !self.reviews.contains_key(&review.id) {
            return Err(DomainError::not_found("Review", "id", &review.id));
        }
        self.reviews.insert(review.id.clone(), review.clone());
        Ok(review)
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        self.reviews
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found("Review", "id", id))
    }
}

// ── SavedPropertyRepository ─────────────────────────────────────

#[async_trait]
impl SavedPropertyRepository for InMemoryStorage {
    async fn save(&self, saved: SavedProperty) -> DomainResult<SavedProperty> {
        let _guard = self.write_lock.lock().unwrap();
        if self.saved_properties.iter().any(|e| {
            e.value().tenant_id == saved.tenant_id && e.value().property_id == saved.property_id
        }) {
            return Err(DomainError::Conflict(format!(
                "Duplicate record: property {} already saved",
                saved.property_id
            )));
        }
        self.saved_properties
            .insert(saved.id.clone(), saved.clone());
        Ok(saved)
    }

    async fn find(
        &self,
        tenant_id: &str,
        property_id: &str,
    ) -> DomainResult<Option<SavedProperty>> {
        Ok(self
            .saved_properties
            .iter()
            .find(|e| e.value().tenant_id == tenant_id && e.value().property_id == property_id)
            .map(|e| e.value().clone()))
    }

    async fn find_for_tenant(&self, tenant_id: &str) -> DomainResult<Vec<SavedProperty>> {
        let mut items: Vec<SavedProperty> = self
            .saved_properties
            .iter()
            .filter(|e| e.value().tenant_id == tenant_id)
            .map(|e| e.value().clone())
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items)
    }

    async fn delete(&self, tenant_id: &str, property_id: &str) -> DomainResult<()> {
        let id = self
            .saved_properties
            .iter()
            .find(|e| e.value().tenant_id == tenant_id && e.value().property_id == property_id)
            .map(|e| e.key().clone());
        let Some(id) = id else {
            return Err(DomainError::not_found(
                "SavedProperty",
                "property_id",
                property_id,
            ));
        };
        self.saved_properties.remove(&id);
        Ok(())
    }
}

// ── RepositoryProvider ──────────────────────────────────────────

impl RepositoryProvider for InMemoryStorage {
    fn users(&self) -> &dyn UserRepository {
        self
    }

    fn properties(&self) -> &dyn PropertyRepository {
        self
    }

    fn bookings(&self) -> &dyn BookingRepository {
        self
    }

    fn availability(&self) -> &dyn AvailabilityRepository {
        self
    }

    fn reviews(&self) -> &dyn ReviewRepository {
        self
    }

    fn saved_properties(&self) -> &dyn SavedPropertyRepository {
        self
    }
}
