use anyhow::{anyhow, Result};
use sqlx::Row;
use std::env;
use std::io;
use timesync::config::Config;
use timesync::database::connection::{sqlite_file_path, DatabaseManager};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    dotenvy::dotenv().ok();

    let args: Vec<String> = env::args().collect();
    let command = args.get(1).map(|s| s.as_str()).unwrap_or("migrate");

    match command {
        "migrate" | "up" => run_migrations().await,
        "check" => check_database().await,
        "reset" => reset_database().await,
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {command}");
            print_help();
            std::process::exit(1);
        }
    }
}

async fn connect() -> Result<DatabaseManager> {
    let config = Config::from_env()?;
    println!("Database URL: {}", mask_url(&config.database_url));
    DatabaseManager::new(&config.database_url)
        .await
        .map_err(|e| anyhow!("Failed to connect to database: {}", e))
}

async fn run_migrations() -> Result<()> {
    println!("TimeSync - Database Migration Tool");

    let db_manager = connect().await?;
    db_manager
        .run_migrations()
        .await
        .map_err(|e| anyhow!("Migration failed: {}", e))?;

    println!("Migrations completed successfully");
    Ok(())
}

async fn check_database() -> Result<()> {
    println!("Checking database connection and schema...");

    let db_manager = connect().await?;
    match list_tables(&db_manager).await {
        Ok(tables) if tables.is_empty() => {
            println!("Database is reachable but has no tables; run 'migrate up'");
        }
        Ok(tables) => {
            println!("Found tables:");
            for table in tables {
                println!("  - {table}");
            }
        }
        Err(e) => println!("Database check failed: {e}"),
    }

    Ok(())
}

async fn reset_database() -> Result<()> {
    let config = Config::from_env()?;
    let path = sqlite_file_path(&config.database_url)
        .ok_or_else(|| anyhow!("Reset is only supported for file-backed SQLite databases"))?;

    println!("WARNING: This will delete ALL data in {}", path.display());
    println!("Continue? (yes/no)");

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    if input.trim().to_lowercase() != "yes" {
        println!("Reset cancelled.");
        return Ok(());
    }

    if path.exists() {
        std::fs::remove_file(path)?;
        println!("Deleted database file: {}", path.display());
    }

    run_migrations().await?;
    println!("Database reset completed");
    Ok(())
}

async fn list_tables(db_manager: &DatabaseManager) -> Result<Vec<String>> {
    let rows = sqlx::query("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
        .fetch_all(&db_manager.pool)
        .await?;

    Ok(rows.iter().map(|row| row.get::<String, _>("name")).collect())
}

fn mask_url(url: &str) -> String {
    match sqlite_file_path(url).and_then(|path| path.file_name()) {
        Some(filename) => format!("sqlite:.../{}", filename.to_string_lossy()),
        None => url.to_string(),
    }
}

fn print_help() {
    println!("TimeSync - Database Migration Tool");
    println!();
    println!("USAGE:");
    println!("    migrate [COMMAND]");
    println!();
    println!("COMMANDS:");
    println!("    migrate, up    Run database migrations (default)");
    println!("    check          List the tables in the configured database");
    println!("    reset          Delete the SQLite file and recreate the schema");
    println!("    help           Show this help message");
    println!();
    println!("ENVIRONMENT:");
    println!("    DATABASE_URL   Database connection string (default: sqlite:./data/timesync.db)");
}
