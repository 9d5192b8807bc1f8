pub mod adjustment_repo;
pub mod app_config;
pub mod database;
pub mod item_repo;
pub mod order_repo;
pub mod session_repo;
pub mod stripe;

pub use database::DbClient;
pub use stripe::StripeGateway;
