//! Account repository for coach branding and slug queries.

use domain::models::{CoachBrandingUpdate, Patch};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::{AccountEntity, SlugHolderEntity};
use crate::metrics::QueryTimer;

const ACCOUNT_COLUMNS: &str = "id, email, name, is_coach, brand_name, brand_color, brand_logo, \
                               invite_slug, created_at, updated_at";

/// Splits a patch into a "touch this column" flag and the value to bind.
fn patch_binding(patch: &Patch<String>) -> (bool, Option<&str>) {
    match patch {
        Patch::Unchanged => (false, None),
        Patch::Clear => (true, None),
        Patch::Set(value) => (true, Some(value.as_str())),
    }
}

/// Repository for account-related database operations.
#[derive(Clone)]
pub struct AccountRepository {
    pool: PgPool,
}

impl AccountRepository {
    /// Creates a new AccountRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an account by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<AccountEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_account_by_id");
        let sql = format!("SELECT {ACCOUNT_COLUMNS} FROM users WHERE id = $1");
        timer.observe(
            sqlx::query_as::<_, AccountEntity>(&sql)
                .bind(id)
                .fetch_optional(&self.pool)
                .await,
        )
    }

    /// Find the coach owning a public slug. Matching is case-insensitive and
    /// non-coach accounts never match.
    pub async fn find_coach_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<AccountEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_coach_by_slug");
        let sql = format!(
            "SELECT {ACCOUNT_COLUMNS} FROM users \
             WHERE lower(invite_slug) = $1 AND is_coach = true \
             LIMIT 1"
        );
        timer.observe(
            sqlx::query_as::<_, AccountEntity>(&sql)
                .bind(slug.to_lowercase())
                .fetch_optional(&self.pool)
                .await,
        )
    }

    /// Accounts currently holding `normalized_slug`, in any letter case.
    pub async fn find_slug_holders(
        &self,
        normalized_slug: &str,
    ) -> Result<Vec<SlugHolderEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_slug_holders");
        timer.observe(
            sqlx::query_as::<_, SlugHolderEntity>(
                r#"
                SELECT id, lower(invite_slug) AS invite_slug
                FROM users
                WHERE invite_slug IS NOT NULL AND lower(invite_slug) = lower($1)
                "#,
            )
            .bind(normalized_slug)
            .fetch_all(&self.pool)
            .await,
        )
    }

    /// Apply a validated branding update. Unchanged fields keep their
    /// stored value; cleared fields become NULL.
    pub async fn update_branding(
        &self,
        id: Uuid,
        update: &CoachBrandingUpdate,
    ) -> Result<Option<AccountEntity>, sqlx::Error> {
        let timer = QueryTimer::new("update_coach_branding");

        let (set_name, brand_name) = patch_binding(&update.brand_name);
        let (set_color, brand_color) = patch_binding(&update.brand_color);
        let (set_logo, brand_logo) = patch_binding(&update.brand_logo);
        let (set_slug, invite_slug) = patch_binding(&update.invite_slug);

        let sql = format!(
            r#"
            UPDATE users SET
                brand_name = CASE WHEN $2 THEN $3 ELSE brand_name END,
                brand_color = CASE WHEN $4 THEN $5 ELSE brand_color END,
                brand_logo = CASE WHEN $6 THEN $7 ELSE brand_logo END,
                invite_slug = CASE WHEN $8 THEN $9 ELSE invite_slug END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {ACCOUNT_COLUMNS}
            "#
        );

        timer.observe(
            sqlx::query_as::<_, AccountEntity>(&sql)
                .bind(id)
                .bind(set_name)
                .bind(brand_name)
                .bind(set_color)
                .bind(brand_color)
                .bind(set_logo)
                .bind(brand_logo)
                .bind(set_slug)
                .bind(invite_slug)
                .fetch_optional(&self.pool)
                .await,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_binding() {
        assert_eq!(patch_binding(&Patch::Unchanged), (false, None));
        assert_eq!(patch_binding(&Patch::Clear), (true, None));
        assert_eq!(
            patch_binding(&Patch::Set("fitpro".to_string())),
            (true, Some("fitpro"))
        );
    }
}
