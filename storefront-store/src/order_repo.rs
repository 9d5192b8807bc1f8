use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use storefront_core::order::{Order, OrderLine, OrderStatus};
use storefront_core::repository::OrderRepository;

pub struct PgOrderRepository {
    pool: PgPool,
}

impl PgOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert_lines(
        tx: &mut Transaction<'_, Postgres>,
        order_id: Uuid,
        lines: &[OrderLine],
    ) -> Result<(), sqlx::Error> {
        for line in lines {
            sqlx::query(
                r#"
                INSERT INTO order_lines (id, order_id, item_id, name, unit_price, quantity)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(order_id)
            .bind(line.item_id)
            .bind(&line.name)
            .bind(line.unit_price)
            .bind(line.quantity as i32)
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }

    async fn fetch_lines(
        &self,
        order_id: Uuid,
    ) -> Result<Vec<OrderLine>, sqlx::Error> {
        let rows = sqlx::query_as::<_, LineRow>(
            "SELECT item_id, name, unit_price, quantity FROM order_lines WHERE order_id = $1",
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(OrderLine::from).collect())
    }
}

// Internal structs for type-safe querying
#[derive(sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    status: String,
    discount_id: Option<Uuid>,
    tax_id: Option<Uuid>,
    total_price: Decimal,
    currency: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(sqlx::FromRow)]
struct LineRow {
    item_id: Uuid,
    name: String,
    unit_price: Decimal,
    quantity: i32,
}

impl From<LineRow> for OrderLine {
    fn from(row: LineRow) -> Self {
        OrderLine {
            item_id: row.item_id,
            name: row.name,
            unit_price: row.unit_price,
            quantity: row.quantity.max(1) as u32,
        }
    }
}

impl OrderRow {
    fn into_order(self, lines: Vec<OrderLine>) -> Result<Order, Box<dyn std::error::Error + Send + Sync>> {
        Ok(Order {
            id: self.id,
            status: OrderStatus::parse(&self.status)?,
            lines,
            discount_id: self.discount_id,
            tax_id: self.tax_id,
            total_price: self.total_price,
            currency: self.currency.trim_end().to_string(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

const ORDER_COLUMNS: &str =
    "id, status, discount_id, tax_id, total_price, currency, created_at, updated_at";

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn create_order(
        &self,
        order: &Order,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO orders (id, status, discount_id, tax_id, total_price, currency, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(order.id)
        .bind(order.status.as_str())
        .bind(order.discount_id)
        .bind(order.tax_id)
        .bind(order.total_price)
        .bind(&order.currency)
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&mut *tx)
        .await?;

        Self::insert_lines(&mut tx, order.id, &order.lines).await?;

        tx.commit().await?;

        Ok(())
    }

    async fn get_order(
        &self,
        id: Uuid,
    ) -> Result<Option<Order>, Box<dyn std::error::Error + Send + Sync>> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => {
                let lines = self.fetch_lines(row.id).await?;
                Ok(Some(row.into_order(lines)?))
            }
            None => Ok(None),
        }
    }

    async fn list_orders(&self) -> Result<Vec<Order>, Box<dyn std::error::Error + Send + Sync>> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        let mut orders = Vec::with_capacity(rows.len());
        for row in rows {
            let lines = self.fetch_lines(row.id).await?;
            orders.push(row.into_order(lines)?);
        }

        Ok(orders)
    }

    async fn update_order(
        &self,
        id: Uuid,
        lines: &[OrderLine],
        discount_id: Option<Uuid>,
        tax_id: Option<Uuid>,
        currency: &str,
        total_price: Decimal,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE orders
            SET discount_id = $1, tax_id = $2, currency = $3, total_price = $4,
                updated_at = NOW()
            WHERE id = $5
            "#,
        )
        .bind(discount_id)
        .bind(tax_id)
        .bind(currency)
        .bind(total_price)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        sqlx::query("DELETE FROM order_lines WHERE order_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        Self::insert_lines(&mut tx, id, lines).await?;

        tx.commit().await?;

        Ok(true)
    }

    async fn update_order_status(
        &self,
        id: Uuid,
        status: OrderStatus,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        let result = sqlx::query(
            "UPDATE orders SET status = $1, updated_at = NOW() WHERE id = $2",
        )
        .bind(status.as_str())
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_order(
        &self,
        id: Uuid,
    ) -> Result<bool, Box<dyn std::error::Error + Send + Sync>> {
        // order_lines cascade on delete
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
