//! Account entity (database row mapping).

use chrono::{DateTime, Utc};
use domain::models::{CoachAccount, SlugHolder};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the users table.
#[derive(Debug, Clone, FromRow)]
pub struct AccountEntity {
    pub id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub is_coach: bool,
    pub brand_name: Option<String>,
    pub brand_color: Option<String>,
    pub brand_logo: Option<String>,
    pub invite_slug: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<AccountEntity> for CoachAccount {
    fn from(entity: AccountEntity) -> Self {
        Self {
            id: entity.id,
            email: entity.email,
            name: entity.name,
            is_coach: entity.is_coach,
            brand_name: entity.brand_name,
            brand_color: entity.brand_color,
            brand_logo: entity.brand_logo,
            invite_slug: entity.invite_slug,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Row of an account currently holding an invite slug.
#[derive(Debug, Clone, FromRow)]
pub struct SlugHolderEntity {
    pub id: Uuid,
    pub invite_slug: String,
}

impl From<SlugHolderEntity> for SlugHolder {
    fn from(entity: SlugHolderEntity) -> Self {
        Self {
            id: entity.id,
            invite_slug: entity.invite_slug,
        }
    }
}
