//! Nordora CLI - browse the furniture catalog, manage a cart and edit stock.
//!
//! # Usage
//!
//! ```bash
//! # Browse and shop
//! nordora products list
//! nordora cart add 3
//! nordora cart qty 3 2
//! nordora cart show
//!
//! # Stock management (requires a staff session)
//! NORDORA_USERS_FILE=staff.yaml nordora login admin
//! nordora products add --name "Mesa Roble" --dimensions "180 x 90 cm" --price 449.00 --image mesa.jpg
//! nordora products delete 9
//!
//! # Provision an account
//! nordora hash-password
//! ```
//!
//! # Commands
//!
//! - `products` - List and manage the catalog
//! - `cart` - Show and change the cart
//! - `login` / `logout` / `whoami` - Staff session
//! - `hash-password` - Produce an Argon2 hash for the account directory
//!
//! # Environment Variables
//!
//! See `nordora_storefront::config` for the storefront settings. In addition:
//! - `NORDORA_PASSWORD` - Password for `login` / `hash-password` instead of stdin
//! - `NORDORA_LOG_FORMAT` - `json` for structured logs (default: text)
//! - `RUST_LOG` - Log filter (default: `nordora_storefront=info,nordora_cli=info`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nordora_core::{Price, ProductDraft, ProductId};
use nordora_storefront::config::StorefrontConfig;
use nordora_storefront::services::auth::AuthService;
use nordora_storefront::storage::{FileStorage, KeyValueStorage, MemoryStorage};
use nordora_storefront::store::Store;

mod commands;

use commands::CliError;
use commands::products::ProductFields;

#[derive(Parser)]
#[command(name = "nordora")]
#[command(author, version, about = "Nordora furniture storefront")]
struct Cli {
    /// Keep all state in memory for this run instead of the data directory
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse and manage the product catalog
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// Show and change the shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Sign in to manage stock (password from `NORDORA_PASSWORD` or stdin)
    Login {
        /// Account username
        username: String,
    },
    /// End the staff session
    Logout,
    /// Show the signed-in account
    Whoami,
    /// Hash a password for the account directory (from `NORDORA_PASSWORD` or stdin)
    HashPassword,
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List all products
    List,
    /// Add a product (staff only)
    Add {
        /// Use this id instead of the next free one
        #[arg(long)]
        id: Option<i32>,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Dimensions, e.g. "220 x 90 x 85 cm"
        #[arg(short, long)]
        dimensions: String,

        /// Price in euros
        #[arg(short, long)]
        price: Price,

        /// Image file name or URL
        #[arg(short, long)]
        image: String,
    },
    /// Change fields of a product (staff only)
    Update {
        /// Product id
        id: i32,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        dimensions: Option<String>,

        #[arg(short, long)]
        price: Option<Price>,

        #[arg(short, long)]
        image: Option<String>,
    },
    /// Remove a product from the catalog (staff only)
    Delete {
        /// Product id
        id: i32,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart and its total
    Show,
    /// Add a product with quantity one
    Add {
        /// Product id
        id: i32,
    },
    /// Remove a product
    Remove {
        /// Product id
        id: i32,
    },
    /// Set the quantity of a product; zero or less removes it
    Qty {
        /// Product id
        id: i32,
        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove every product
    Clear,
}

/// Log to stderr so command output on stdout stays clean.
///
/// `NORDORA_LOG_FORMAT=json` switches to one JSON object per event.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "nordora_storefront=info,nordora_cli=info".into());

    let json = std::env::var("NORDORA_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let json_layer = json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

fn main() {
    let _ = dotenvy::dotenv();
    init_tracing();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = StorefrontConfig::from_env()?;

    if cli.ephemeral {
        let storage = MemoryStorage::new();
        execute(cli.command, &storage, &config)
    } else {
        let storage = FileStorage::open(&config.data_dir)?;
        execute(cli.command, &storage, &config)
    }
}

fn execute<S: KeyValueStorage>(
    command: Commands,
    storage: &S,
    config: &StorefrontConfig,
) -> Result<(), CliError> {
    let auth = AuthService::new(storage, config.session_lifetime);
    let now = Utc::now();

    match command {
        Commands::Products { action } => {
            let mut store = Store::open(storage);
            match action {
                ProductsAction::List => commands::products::list(&mut store),
                ProductsAction::Add {
                    id,
                    name,
                    dimensions,
                    price,
                    image,
                } => {
                    commands::require_staff(&auth, now)?;
                    let draft = ProductDraft::new(&image, &name, &dimensions, price);
                    commands::products::add(&mut store, id.map(ProductId::new), draft)?;
                }
                ProductsAction::Update {
                    id,
                    name,
                    dimensions,
                    price,
                    image,
                } => {
                    commands::require_staff(&auth, now)?;
                    let fields = ProductFields {
                        name,
                        dimensions,
                        price,
                        image,
                    };
                    commands::products::update(&mut store, ProductId::new(id), &fields)?;
                }
                ProductsAction::Delete { id } => {
                    commands::require_staff(&auth, now)?;
                    commands::products::delete(&mut store, ProductId::new(id))?;
                }
            }
            store.close();
        }
        Commands::Cart { action } => {
            let mut store = Store::open(storage);
            match action {
                CartAction::Show => {}
                CartAction::Add { id } => commands::cart::add(&mut store, ProductId::new(id))?,
                CartAction::Remove { id } => {
                    commands::cart::remove(&mut store, ProductId::new(id))?;
                }
                CartAction::Qty { id, quantity } => {
                    commands::cart::set_quantity(&mut store, ProductId::new(id), quantity)?;
                }
                CartAction::Clear => commands::cart::clear(&mut store)?,
            }
            commands::cart::show(&mut store);
            store.close();
        }
        Commands::Login { username } => {
            let users_file = config.require_users_file()?;
            commands::auth::login(&auth, users_file, &username, now)?;
        }
        Commands::Logout => commands::auth::logout(&auth)?,
        Commands::Whoami => commands::auth::whoami(&auth, now)?,
        Commands::HashPassword => commands::auth::hash_password()?,
    }
    Ok(())
}
