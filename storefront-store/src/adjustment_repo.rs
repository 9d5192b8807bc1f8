use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use storefront_core::adjustment::{Adjustment, AdjustmentDraft, AdjustmentKind};
use storefront_core::repository::AdjustmentRepository;

/// Discounts and taxes live in separate tables with an identical shape;
/// one repository serves both, picking the table from the kind.
pub struct PgAdjustmentRepository {
    pool: PgPool,
}

impl PgAdjustmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn table(kind: AdjustmentKind) -> &'static str {
    match kind {
        AdjustmentKind::Discount => "discounts",
        AdjustmentKind::Tax => "taxes",
    }
}

#[derive(sqlx::FromRow)]
struct AdjustmentRow {
    id: Uuid,
    label: String,
    percent: Decimal,
}

impl AdjustmentRow {
    fn into_adjustment(self, kind: AdjustmentKind) -> Adjustment {
        Adjustment {
            id: self.id,
            kind,
            label: self.label,
            percent: self.percent,
        }
    }
}

#[async_trait]
impl AdjustmentRepository for PgAdjustmentRepository {
    async fn create_adjustment(
        &self,
        kind: AdjustmentKind,
        draft: AdjustmentDraft,
    ) -> Result<Adjustment, Box<dyn std::error::Error + Send + Sync>> {
        let id = Uuid::new_v4();

        sqlx::query(&format!(
            "INSERT INTO {} (id, label, percent) VALUES ($1, $2, $3)",
            table(kind)
        ))
        .bind(id)
        .bind(&draft.label)
        .bind(draft.percent)
        .execute(&self.pool)
        .await?;

        Ok(Adjustment { id, kind, label: draft.label, percent: draft.percent })
    }

    async fn get_adjustment(
        &self,
        kind: AdjustmentKind,
        id: Uuid,
    ) -> Result<Option<Adjustment>, Box<dyn std::error::Error + Send + Sync>> {
        let row = sqlx::query_as::<_, AdjustmentRow>(&format!(
            "SELECT id, label, percent FROM {} WHERE id = $1",
            table(kind)
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_adjustment(kind)))
    }

    async fn list_adjustments(
        &self,
        kind: AdjustmentKind,
    ) -> Result<Vec<Adjustment>, Box<dyn std::error::Error + Send + Sync>> {
        let rows = sqlx::query_as::<_, AdjustmentRow>(&format!(
            "SELECT id, label, percent FROM {} ORDER BY label",
            table(kind)
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_adjustment(kind)).collect())
    }

    async fn update_adjustment(
        &self,
        kind: AdjustmentKind,
        id: Uuid,
        draft: AdjustmentDraft,
    ) -> Result<Option<Adjustment>, Box<dyn std::error::Error + Send + Sync>> {
        let row = sqlx::query_as::<_, AdjustmentRow>(&format!(
            "UPDATE {} SET label = $1, percent = $2 WHERE id = $3 RETURNING id, label, percent",
            table(kind)
        ))
        .bind(&draft.label)
        .bind(draft.percent)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_adjustment(kind)))
    }

    async fn delete_adjustment(
        &self,
        kind: AdjustmentKind,
        id: Uuid,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        let result = sqlx::query(&format!("DELETE FROM {} WHERE id = $1", table(kind)))
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
