//! Organization repository for database operations.

use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set};
use solvy_core::reports::OrganizationProfile;
use solvy_shared::types::{Currency, OrganizationId};
use uuid::Uuid;

use crate::entities::organizations;

/// Organization repository for lookups and creation.
#[derive(Debug, Clone)]
pub struct OrganizationRepository {
    db: DatabaseConnection,
}

impl OrganizationRepository {
    /// Creates a new organization repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds an organization by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<organizations::Model>, DbErr> {
        organizations::Entity::find_by_id(id).one(&self.db).await
    }

    /// Finds an organization by slug.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<organizations::Model>, DbErr> {
        organizations::Entity::find()
            .filter(organizations::Column::Slug.eq(slug))
            .one(&self.db)
            .await
    }

    /// Loads the reporting profile of an organization.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_profile(&self, id: Uuid) -> Result<Option<OrganizationProfile>, DbErr> {
        Ok(self.find_by_id(id).await?.map(|org| to_profile(&org)))
    }

    /// Creates a new organization.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails (e.g. duplicate slug).
    pub async fn create(
        &self,
        name: &str,
        slug: &str,
        org_type: &str,
        currency: Currency,
    ) -> Result<organizations::Model, DbErr> {
        self.create_with_id(Uuid::now_v7(), name, slug, org_type, currency)
            .await
    }

    /// Creates a new organization with a caller-chosen ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails (e.g. duplicate ID or slug).
    pub async fn create_with_id(
        &self,
        id: Uuid,
        name: &str,
        slug: &str,
        org_type: &str,
        currency: Currency,
    ) -> Result<organizations::Model, DbErr> {
        let now = chrono::Utc::now().into();

        organizations::ActiveModel {
            id: Set(id),
            name: Set(name.to_string()),
            slug: Set(slug.to_string()),
            org_type: Set(org_type.to_string()),
            base_currency: Set(currency.code().to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
    }
}

/// Converts an organization row into the profile used by reports.
///
/// Unknown currency codes fall back to the default reporting currency.
pub fn to_profile(org: &organizations::Model) -> OrganizationProfile {
    OrganizationProfile {
        id: OrganizationId::from_uuid(org.id),
        name: org.name.clone(),
        org_type: org.org_type.clone(),
        currency: org.base_currency.trim().parse().unwrap_or_default(),
    }
}
