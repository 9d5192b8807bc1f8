use axum::{
    extract::{Path, State},
    response::Html,
    routing::get,
    Router,
};
use uuid::Uuid;

use storefront_core::item::Item;

use crate::{error::AppError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route("/item/{id}", get(item_page))
}

/// GET /item/:id
/// Render the item's details page with a buy button wired to /buy/:id.
async fn item_page(
    State(state): State<AppState>,
    Path(item_id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    let item = state
        .items
        .get_item(item_id)
        .await
        .map_err(|e| AppError::InternalServerError(e.to_string()))?
        .ok_or_else(|| AppError::NotFoundError(format!("No item with id {item_id}")))?;

    Ok(Html(render_item_page(&item, &state.checkout.publishable_key)))
}

fn render_item_page(item: &Item, publishable_key: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>{name}</title>
</head>
<body>
    <h1>{name}</h1>
    <p>{description}</p>
    <p>{price} {currency}</p>
    <button id="buy-button">Buy</button>
    <script>
        const publishableKey = "{publishable_key}";
        document.getElementById("buy-button").addEventListener("click", async () => {{
            const response = await fetch("/buy/{id}");
            if (!response.ok) {{
                alert("Could not start checkout");
                return;
            }}
            const session = await response.json();
            window.location = session.url;
        }});
    </script>
</body>
</html>
"#,
        name = escape_html(&item.name),
        description = escape_html(&item.description),
        price = item.price,
        currency = item.currency.to_uppercase(),
        publishable_key = publishable_key,
        id = item.id,
    )
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    #[test]
    fn page_embeds_item_and_key() {
        let item = Item {
            id: Uuid::new_v4(),
            name: "Mug & Co <special>".to_string(),
            description: "A mug".to_string(),
            price: dec!(12.50),
            currency: "usd".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let page = render_item_page(&item, "pk_test_abc");
        assert!(page.contains("Mug &amp; Co &lt;special&gt;"));
        assert!(page.contains("12.50 USD"));
        assert!(page.contains("pk_test_abc"));
        assert!(page.contains(&format!("/buy/{}", item.id)));
    }
}
