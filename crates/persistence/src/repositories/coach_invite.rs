//! Coach invite repository.

use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::entities::{CoachInviteEntity, InviteWithCoachEntity};
use crate::metrics::QueryTimer;

/// Repository for coach invite database operations.
#[derive(Clone)]
pub struct CoachInviteRepository {
    pool: PgPool,
}

impl CoachInviteRepository {
    /// Creates a new CoachInviteRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All invites issued by a coach, oldest first.
    pub async fn list_for_coach(
        &self,
        coach_id: Uuid,
    ) -> Result<Vec<CoachInviteEntity>, sqlx::Error> {
        let timer = QueryTimer::new("list_coach_invites");
        timer.observe(
            sqlx::query_as::<_, CoachInviteEntity>(
                r#"
                SELECT id, coach_id, invite_token, invite_email, client_id,
                       invite_status, invite_sent_at, created_at
                FROM coach_clients
                WHERE coach_id = $1
                ORDER BY created_at ASC, id ASC
                "#,
            )
            .bind(coach_id)
            .fetch_all(&self.pool)
            .await,
        )
    }

    /// Persist a public invite for `coach_id` with `token`.
    ///
    /// If a concurrent request already stored one, that invite is returned
    /// instead so every caller observes the same token.
    pub async fn create_public_invite(
        &self,
        coach_id: Uuid,
        token: &str,
    ) -> Result<CoachInviteEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_public_invite");

        let inserted = sqlx::query_as::<_, CoachInviteEntity>(
            r#"
            INSERT INTO coach_clients (coach_id, invite_token, invite_status)
            VALUES ($1, $2, 'pending')
            ON CONFLICT (coach_id) WHERE invite_email IS NULL AND client_id IS NULL
            DO NOTHING
            RETURNING id, coach_id, invite_token, invite_email, client_id,
                      invite_status, invite_sent_at, created_at
            "#,
        )
        .bind(coach_id)
        .bind(token)
        .fetch_optional(&self.pool)
        .await;

        let inserted = match inserted {
            Ok(row) => row,
            Err(e) => return timer.observe(Err(e)),
        };
        if let Some(invite) = inserted {
            return timer.observe(Ok(invite));
        }
        debug!(coach_id = %coach_id, "Public invite already exists; returning it");

        timer.observe(
            sqlx::query_as::<_, CoachInviteEntity>(
                r#"
                SELECT id, coach_id, invite_token, invite_email, client_id,
                       invite_status, invite_sent_at, created_at
                FROM coach_clients
                WHERE coach_id = $1 AND invite_email IS NULL AND client_id IS NULL
                LIMIT 1
                "#,
            )
            .bind(coach_id)
            .fetch_one(&self.pool)
            .await,
        )
    }

    /// Find an invite by token together with its coach's branding.
    pub async fn find_by_token_with_coach(
        &self,
        token: &str,
    ) -> Result<Option<InviteWithCoachEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_invite_by_token");
        timer.observe(
            sqlx::query_as::<_, InviteWithCoachEntity>(
                r#"
                SELECT cc.invite_token, cc.invite_email, cc.invite_status,
                       u.id, u.email, u.name, u.is_coach, u.brand_name, u.brand_color,
                       u.brand_logo, u.invite_slug, u.created_at, u.updated_at
                FROM coach_clients cc
                JOIN users u ON u.id = cc.coach_id
                WHERE cc.invite_token = $1
                "#,
            )
            .bind(token)
            .fetch_optional(&self.pool)
            .await,
        )
    }
}
