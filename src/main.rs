#[macro_use]
extern crate rocket;

mod api;
mod db;
mod env;
mod error;
mod models;
mod telemetry;
#[cfg(test)]
mod test;

use api::{api_get_expert, health};
use once_cell::sync::Lazy;
use rocket::{Build, Rocket};
use std::sync::Mutex;
use telemetry::{OtelGuard, TelemetryFairing, init_telemetry};

use sqlx::SqlitePool;
use tracing::info;

pub static TELEMETRY_GUARD: Lazy<Mutex<Option<OtelGuard>>> = Lazy::new(|| Mutex::new(None));

#[launch]
async fn rocket() -> _ {
    if let Err(e) = env::load_environment() {
        eprintln!("Failed to load environment files: {}", e);
    }

    init_telemetry();

    let pool = SqlitePool::connect(&database_url())
        .await
        .expect("Failed to connect to SQLite database");

    info!("Running database migrations...");
    match sqlx::migrate!("./migrations").run(&pool).await {
        Ok(_) => info!("Migrations completed successfully"),
        Err(e) => {
            tracing::error!("Failed to run migrations: {}", e);
            panic!("Database migration failed: {}", e);
        }
    }

    init_rocket(pool).await
}

pub fn database_url() -> String {
    std::env::var("DATABASE_URL").expect("DATABASE_URL must be set")
}

pub async fn init_rocket(pool: SqlitePool) -> Rocket<Build> {
    info!("Starting wingman expert API");

    rocket::build()
        .manage(pool)
        .mount("/", routes![api_get_expert, health])
        .attach(TelemetryFairing)
        .attach(rocket::fairing::AdHoc::on_shutdown(
            "Telemetry shutdown",
            |_| {
                Box::pin(async {
                    telemetry::shutdown_telemetry();
                })
            },
        ))
}
