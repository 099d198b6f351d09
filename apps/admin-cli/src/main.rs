use backend::config::db::{db_url, is_sqlite_memory};
use backend::infra::db::connect_db;
use backend::services::{seed, usuarios};
use backend::telemetry;
use clap::{Parser, Subcommand};
use migration::{migrate, MigrationCommand};
use sea_orm::DatabaseConnection;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "jurix-admin")]
#[command(about = "JurixPrev database administration")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a migration command: up | down | fresh | reset | refresh | status
    Migrate {
        #[arg(value_parser = parse_migration_command)]
        command: MigrationCommand,
    },
    /// Create or promote the administrative account and reset its password
    SeedAdmin {
        #[arg(long, env = "ADMIN_LOGIN")]
        login: String,
        #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long, env = "ADMIN_NAME", default_value = "Administrador")]
        name: String,
    },
    /// Insert the demo clients and documents while those tables are empty
    SeedDemo {
        #[arg(long)]
        owner_login: String,
    },
}

fn parse_migration_command(raw: &str) -> Result<MigrationCommand, String> {
    raw.parse()
}

#[tokio::main]
async fn main() {
    telemetry::init_cli_tracing();

    let args = Args::parse();

    let url = match db_url() {
        Ok(url) => url,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };
    if is_sqlite_memory(&url) {
        eprintln!("In-memory SQLite is discarded when the command exits; point DATABASE_URL at a real database.");
        std::process::exit(2);
    }

    let conn = match connect_db(&url).await {
        Ok(conn) => conn,
        Err(e) => {
            error!(error = %e, "could not connect to database");
            std::process::exit(1);
        }
    };

    if let Err(message) = run(&conn, args.command).await {
        error!(%message, "command failed");
        std::process::exit(1);
    }
}

async fn run(conn: &DatabaseConnection, command: Command) -> Result<(), String> {
    match command {
        Command::Migrate { command } => {
            migrate(conn, command).await.map_err(|e| e.to_string())?;
        }
        Command::SeedAdmin {
            login,
            password,
            name,
        } => {
            // Applying pending migrations first lets a fresh database be seeded in one step.
            migrate(conn, MigrationCommand::Up)
                .await
                .map_err(|e| e.to_string())?;
            let (usuario, created) = usuarios::upsert_admin(conn, &login, &password, &name)
                .await
                .map_err(|e| e.to_string())?;
            info!(usuario_id = %usuario.id, created, "administrator ready");
        }
        Command::SeedDemo { owner_login } => {
            let summary = seed::seed_demo(conn, &owner_login)
                .await
                .map_err(|e| e.to_string())?;
            info!(
                clientes = summary.clientes_total,
                documentos = summary.documentos_total,
                inserted_clientes = summary.clientes_inserted,
                inserted_documentos = summary.documentos_inserted,
                "demo data ready"
            );
        }
    }
    Ok(())
}
