use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use storefront_core::payment::{PaymentSession, SessionStatus};
use storefront_core::repository::PaymentSessionRepository;

pub struct PgPaymentSessionRepository {
    pool: PgPool,
}

impl PgPaymentSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    session_id: String,
    item_id: Uuid,
    quantity: i32,
    amount: i64,
    currency: String,
    status: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

fn parse_status(s: &str) -> Result<SessionStatus, Box<dyn std::error::Error + Send + Sync>> {
    match s {
        "OPEN" => Ok(SessionStatus::Open),
        "COMPLETED" => Ok(SessionStatus::Completed),
        "EXPIRED" => Ok(SessionStatus::Expired),
        other => Err(format!("Unknown session status: {other}").into()),
    }
}

#[async_trait]
impl PaymentSessionRepository for PgPaymentSessionRepository {
    async fn record_session(
        &self,
        session: &PaymentSession,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        sqlx::query(
            r#"
            INSERT INTO payment_sessions (session_id, item_id, quantity, amount, currency, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(&session.session_id)
        .bind(session.item_id)
        .bind(session.quantity as i32)
        .bind(session.amount)
        .bind(&session.currency)
        .bind(session.status.as_str())
        .bind(session.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_session(
        &self,
        session_id: &str,
    ) -> Result<Option<PaymentSession>, Box<dyn std::error::Error + Send + Sync>> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT session_id, item_id, quantity, amount, currency, status, created_at
            FROM payment_sessions WHERE session_id = $1
            "#,
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(Some(PaymentSession {
                session_id: row.session_id,
                item_id: row.item_id,
                quantity: row.quantity.max(1) as u32,
                amount: row.amount,
                currency: row.currency.trim_end().to_string(),
                status: parse_status(&row.status)?,
                created_at: row.created_at,
            })),
            None => Ok(None),
        }
    }

    async fn update_session_status(
        &self,
        session_id: &str,
        status: SessionStatus,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        let result = sqlx::query(
            "UPDATE payment_sessions SET status = $1 WHERE session_id = $2",
        )
        .bind(status.as_str())
        .bind(session_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
