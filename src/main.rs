use invoice_dao::config::Config;
use invoice_dao::db::{init_db_with_schema, BUNDLED_SCHEMA};
use invoice_dao::{InvoiceItemRepository, InvoiceRepository, Repositories};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let external_schema = match config.load_schema_script() {
        Ok(script) => script,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };
    let ddl = external_schema.as_deref().unwrap_or(BUNDLED_SCHEMA);

    let pool =
        match init_db_with_schema(&config.database_path, config.max_connections, ddl).await {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Failed to initialize database: {}", e);
                std::process::exit(1);
            }
        };

    let repos = Repositories::new(pool);

    if let Err(e) = repos.invoices.health_check().await {
        eprintln!("Invoice repository health check failed: {}", e);
        std::process::exit(1);
    }
    if let Err(e) = repos.items.health_check().await {
        eprintln!("Invoice item repository health check failed: {}", e);
        std::process::exit(1);
    }

    tracing::info!(
        database_path = %config.database_path,
        "Invoice storage ready"
    );
}
