use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use storefront_core::item::{Item, ItemFilter, ValidItem};
use storefront_core::repository::ItemRepository;

pub struct PgItemRepository {
    pool: PgPool,
}

impl PgItemRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal struct for type-safe querying
#[derive(sqlx::FromRow)]
struct ItemRow {
    id: Uuid,
    name: String,
    description: String,
    price: Decimal,
    currency: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Item {
            id: row.id,
            name: row.name,
            description: row.description,
            price: row.price,
            currency: row.currency.trim_end().to_string(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const ITEM_COLUMNS: &str = "id, name, description, price, currency, created_at, updated_at";

#[async_trait]
impl ItemRepository for PgItemRepository {
    async fn create_item(
        &self,
        item: ValidItem,
    ) -> Result<Item, Box<dyn std::error::Error + Send + Sync>> {
        let created = item.into_item(Uuid::new_v4(), Utc::now());

        sqlx::query(
            r#"
            INSERT INTO items (id, name, description, price, currency, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(created.id)
        .bind(&created.name)
        .bind(&created.description)
        .bind(created.price)
        .bind(&created.currency)
        .bind(created.created_at)
        .bind(created.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(created)
    }

    async fn get_item(
        &self,
        id: Uuid,
    ) -> Result<Option<Item>, Box<dyn std::error::Error + Send + Sync>> {
        let row = sqlx::query_as::<_, ItemRow>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Item::from))
    }

    async fn list_items(
        &self,
        filter: &ItemFilter,
    ) -> Result<Vec<Item>, Box<dyn std::error::Error + Send + Sync>> {
        // NULL-guarded predicates so one statement serves every filter combination
        let rows = sqlx::query_as::<_, ItemRow>(&format!(
            r#"
            SELECT {ITEM_COLUMNS} FROM items
            WHERE ($1::TEXT IS NULL OR name ILIKE '%' || $1 || '%')
              AND ($2::NUMERIC IS NULL OR price >= $2)
              AND ($3::NUMERIC IS NULL OR price <= $3)
            ORDER BY name
            "#
        ))
        .bind(filter.name.as_deref())
        .bind(filter.min_price)
        .bind(filter.max_price)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Item::from).collect())
    }

    async fn update_item(
        &self,
        id: Uuid,
        item: ValidItem,
    ) -> Result<Option<Item>, Box<dyn std::error::Error + Send + Sync>> {
        let row = sqlx::query_as::<_, ItemRow>(&format!(
            r#"
            UPDATE items
            SET name = $1, description = $2, price = $3, currency = $4, updated_at = NOW()
            WHERE id = $5
            RETURNING {ITEM_COLUMNS}
            "#
        ))
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.price)
        .bind(&item.currency)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Item::from))
    }

    async fn delete_item(
        &self,
        id: Uuid,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        let result = sqlx::query("DELETE FROM items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
