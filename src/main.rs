use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use wedding_planner::{
    config::{database, settings},
    core::{report, user},
    errors::Result,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Load config.toml with environment overrides
    let settings = settings::load_default_settings()
        .inspect_err(|e| error!("Failed to load settings: {}", e))?;
    info!(
        "Settings loaded: {} seats per table, admin {}",
        settings.seating.seats_per_table, settings.admin.email
    );

    // 4. Connect and create the schema
    std::fs::create_dir_all("data")?;
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database schema ready."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Seed the administrator account
    let admin = user::ensure_admin(&db, &settings.admin).await?;
    info!("Admin account: {} (id {})", admin.email, admin.id);

    // 6. Print the cross-wedding summary
    let summary = report::weddings_summary(&db).await?;
    info!("{} weddings on record", summary.len());
    for row in &summary {
        let date = row
            .date
            .map_or_else(|| "no date".to_string(), wedding_planner::core::invitation::format_date);
        info!(
            "#{} {} ({}): {}",
            row.id,
            row.name,
            date,
            report::format_amount(row.total)
        );
    }

    Ok(())
}
