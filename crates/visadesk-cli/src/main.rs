use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use visadesk_cli::seeder::{self, SeedConfig};
use visadesk_config::StorageConfig;
use visadesk_db::{PgStore, UserRepository, init_db_pool, run_migrations};
use visadesk_models::Email;
use visadesk_models::users::{UserRole, validate_password_bytes};

#[derive(Parser)]
#[command(name = "visadesk-cli")]
#[command(about = "VisaDesk CLI - Administrative tools for VisaDesk", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new administrator account
    CreateAdmin {
        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Apply database migrations
    Migrate,
    /// Seed the database with fake applicants and pending applications
    Seed {
        /// Number of applicants to create
        #[arg(short = 'u', long, default_value = "10")]
        users: usize,

        /// Number of applications per applicant
        #[arg(short = 'a', long, default_value = "2")]
        applications_per_user: usize,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();

    let pool = init_db_pool(&StorageConfig::from_env()).await?;

    match cli.command {
        Commands::CreateAdmin { email, password } => {
            handle_create_admin(&PgStore::new(pool), email, password).await
        }
        Commands::Migrate => {
            run_migrations(&pool).await?;
            println!("✅ Migrations applied");
            Ok(())
        }
        Commands::Seed {
            users,
            applications_per_user,
        } => {
            let store = PgStore::new(pool);
            let summary =
                seeder::seed(&store, &store, SeedConfig::new(users, applications_per_user)).await?;
            println!(
                "\n✅ Seeded {} applicants and {} applications (password: {})",
                summary.users,
                summary.applications,
                seeder::SEED_PASSWORD
            );
            Ok(())
        }
    }
}

async fn handle_create_admin(
    store: &PgStore,
    email: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let email = match email {
        Some(email) => email,
        None => Input::new()
            .with_prompt("Email address")
            .interact_text()
            .context("Failed to read email")?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()
            .context("Failed to read password")?,
    };

    if password.chars().count() < 6 {
        bail!("Password must be at least 6 characters");
    }
    validate_password_bytes(&password).context("Password must be at most 72 bytes")?;

    let email = Email::new(&email)?;
    let user = store
        .create(email, &password, UserRole::Admin)
        .await
        .map_err(|e| e.error)
        .context("Error creating admin")?;

    println!("\n✅ Admin created successfully!");
    println!("   ID: {}", user.id);
    println!("   Email: {}", user.email);
    Ok(())
}
