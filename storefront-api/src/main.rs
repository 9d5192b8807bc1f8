use std::net::SocketAddr;
use std::sync::Arc;

use storefront_api::{
    app,
    state::{AppState, AuthConfig, CheckoutConfig},
};
use storefront_store::adjustment_repo::PgAdjustmentRepository;
use storefront_store::item_repo::PgItemRepository;
use storefront_store::order_repo::PgOrderRepository;
use storefront_store::session_repo::PgPaymentSessionRepository;
use storefront_store::{DbClient, StripeGateway};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storefront_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = storefront_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting Storefront API on port {}", config.server.port);

    // Database Connection
    let db = DbClient::new(&config.database.url)
        .await
        .expect("Failed to connect to Postgres");
    db.migrate().await.expect("Failed to run migrations");

    // Payment Provider
    let gateway = StripeGateway::new(&config.stripe.api_base, &config.stripe.secret_key);

    let app_state = AppState {
        items: Arc::new(PgItemRepository::new(db.pool.clone())),
        orders: Arc::new(PgOrderRepository::new(db.pool.clone())),
        adjustments: Arc::new(PgAdjustmentRepository::new(db.pool.clone())),
        sessions: Arc::new(PgPaymentSessionRepository::new(db.pool.clone())),
        checkout_provider: Arc::new(gateway),
        checkout: CheckoutConfig {
            publishable_key: config.stripe.publishable_key.clone(),
            success_url: config.stripe.success_url.clone(),
            cancel_url: config.stripe.cancel_url.clone(),
            default_currency: config.stripe.default_currency.clone(),
        },
        auth: AuthConfig {
            secret: config.auth.jwt_secret.clone(),
            expiration: config.auth.jwt_expiration_seconds,
            admin_username: config.auth.admin_username.clone(),
            admin_password: config.auth.admin_password.clone(),
        },
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
