//! Luxe CLI - the storefront from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog, remembering filters between runs
//! luxe browse --search backpack --sort price-low
//!
//! # Product page, adding two to the cart
//! luxe product 1 --add 2
//!
//! # Cart and wishlist
//! luxe cart show
//! luxe cart set 1 3
//! luxe wishlist toggle 5
//! luxe wishlist move-to-cart
//!
//! # Checkout
//! luxe checkout --full-name "Jane Doe" --email jane@example.com ...
//!
//! # Account
//! LUXE_PASSWORD=... luxe login -u johnd
//! luxe profile
//! luxe logout
//! ```
//!
//! # Commands
//!
//! - `browse` - Product grid (`/`)
//! - `product` - Product page (`/product/:id`)
//! - `cart` - Cart page (`/cart`)
//! - `wishlist` - Wishlist page (`/wishlist`)
//! - `checkout` - Checkout (`/checkout`)
//! - `profile` - Profile page (`/profile`)
//! - `login` / `logout` - Login page (`/login`)
//! - `filters` - Filter panel

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use secrecy::SecretString;
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use luxe_core::{ProductId, SortBy};
use luxe_storefront::checkout::{DEFAULT_COUNTRY, PaymentInfo, PaymentMethod, ShippingInfo};
use luxe_storefront::config::StorefrontConfig;

mod commands;
mod error;
mod output;

use commands::App;
use commands::browse::FilterChanges;
use error::AppError;

#[derive(Parser)]
#[command(name = "luxe")]
#[command(author, version, about = "Luxe storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product grid
    Browse {
        /// Search titles and categories
        #[arg(short, long)]
        search: Option<String>,

        /// Only show this category (`all` for every category)
        #[arg(short, long)]
        category: Option<String>,

        /// Sort order (`default`, `price-low`, `price-high`, `name-az`, `name-za`)
        #[arg(long)]
        sort: Option<SortBy>,
    },
    /// Show a product
    Product {
        /// Product ID
        id: ProductId,

        /// Add this many to the cart
        #[arg(short, long)]
        add: Option<u32>,

        /// Save or unsave in the wishlist
        #[arg(short, long)]
        wishlist: bool,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
    /// Check out the cart
    Checkout(Box<CheckoutArgs>),
    /// Show the signed-in shopper
    Profile,
    /// Sign in
    Login {
        /// Catalog username
        #[arg(short, long)]
        username: String,

        /// Password
        #[arg(long, env = "LUXE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign out (cart and wishlist are kept)
    Logout,
    /// Show or change product filters
    Filters {
        #[command(subcommand)]
        action: FilterAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// List cart lines and totals
    Show,
    /// Add a product
    Add {
        /// Product ID
        id: ProductId,

        /// Units to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Set a line's quantity (0 or less removes it)
    Set {
        /// Product ID
        id: ProductId,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Remove a product
    Remove {
        /// Product ID
        id: ProductId,
    },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum WishlistAction {
    /// List saved products
    Show,
    /// Save a product, or unsave it if already saved
    Toggle {
        /// Product ID
        id: ProductId,
    },
    /// Unsave a product
    Remove {
        /// Product ID
        id: ProductId,
    },
    /// Add every saved product to the cart
    MoveToCart,
}

#[derive(Subcommand)]
enum FilterAction {
    /// Show current filters and available categories
    Show,
    /// Set the price range
    PriceRange {
        /// Lower bound
        min: Decimal,

        /// Upper bound
        max: Decimal,
    },
}

#[derive(clap::Args)]
struct CheckoutArgs {
    /// Full name
    #[arg(long, default_value = "")]
    full_name: String,

    /// Email address
    #[arg(long, default_value = "")]
    email: String,

    /// Phone number
    #[arg(long, default_value = "")]
    phone: String,

    /// Street address
    #[arg(long, default_value = "")]
    address: String,

    /// City
    #[arg(long, default_value = "")]
    city: String,

    /// State
    #[arg(long, default_value = "")]
    state: String,

    /// ZIP code
    #[arg(long, default_value = "")]
    zip_code: String,

    /// Country
    #[arg(long, default_value = DEFAULT_COUNTRY)]
    country: String,

    /// Payment method (`credit-card`, `paypal`, `apple-pay`)
    #[arg(long, default_value = "credit-card")]
    payment_method: PaymentMethod,

    /// Card number
    #[arg(long, default_value = "")]
    card_number: String,

    /// Name on card
    #[arg(long, default_value = "")]
    card_name: String,

    /// Expiry date (MM/YY)
    #[arg(long, default_value = "")]
    expiry_date: String,

    /// CVV
    #[arg(long, default_value = "")]
    cvv: String,

    /// Skip the post-order delays
    #[arg(long)]
    no_wait: bool,
}

impl CheckoutArgs {
    fn into_forms(self) -> (ShippingInfo, PaymentInfo, bool) {
        let shipping = ShippingInfo {
            full_name: self.full_name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            city: self.city,
            state: self.state,
            zip_code: self.zip_code,
            country: self.country,
        };
        let payment = PaymentInfo {
            card_number: self.card_number,
            card_name: self.card_name,
            expiry_date: self.expiry_date,
            cvv: self.cvv,
            payment_method: self.payment_method,
        };
        (shipping, payment, !self.no_wait)
    }
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            sample_rate: config.sentry_sample_rate,
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

fn init_tracing() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "luxe_cli=info,luxe_storefront=info".into());

    // Logs go to stderr so command output on stdout stays clean
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load configuration from environment (needed for Sentry init)
    let config = StorefrontConfig::from_env();

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = config.as_ref().ok().and_then(init_sentry);
    init_tracing();

    let result = match config {
        Ok(config) => run(cli, &config).await,
        Err(e) => Err(AppError::from(e)),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            e.report();
            output::error(&e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, config: &StorefrontConfig) -> error::Result<()> {
    let mut app = App::open(config)?;

    match cli.command {
        Commands::Browse {
            search,
            category,
            sort,
        } => {
            let changes = FilterChanges {
                search,
                category,
                sort,
            };
            commands::browse::browse(&mut app, changes).await?;
        }
        Commands::Product { id, add, wishlist } => {
            commands::browse::product(&mut app, id, add, wishlist).await?;
        }
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&app),
            CartAction::Add { id, quantity } => commands::cart::add(&mut app, id, quantity).await?,
            CartAction::Set { id, quantity } => commands::cart::set(&mut app, id, quantity)?,
            CartAction::Remove { id } => commands::cart::remove(&mut app, id)?,
            CartAction::Clear => commands::cart::clear(&mut app),
        },
        Commands::Wishlist { action } => match action {
            WishlistAction::Show => commands::cart::show_wishlist(&app),
            WishlistAction::Toggle { id } => {
                commands::cart::toggle_wishlist(&mut app, id).await?;
            }
            WishlistAction::Remove { id } => commands::cart::remove_from_wishlist(&mut app, id)?,
            WishlistAction::MoveToCart => commands::cart::move_wishlist_to_cart(&mut app),
        },
        Commands::Checkout(args) => {
            let (shipping, payment, wait) = args.into_forms();
            commands::checkout::run(&mut app, shipping, payment, wait).await?;
        }
        Commands::Profile => commands::account::profile(&app).await,
        Commands::Login { username, password } => {
            let password = SecretString::from(password);
            commands::account::login(&mut app, &username, &password).await?;
        }
        Commands::Logout => commands::account::logout(&mut app),
        Commands::Filters { action } => match action {
            FilterAction::Show => commands::browse::show_filters(&app).await,
            FilterAction::PriceRange { min, max } => {
                commands::browse::set_price_range(&mut app, min, max)?;
            }
        },
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_checkout_defaults() {
        let cli = Cli::try_parse_from(["luxe", "checkout", "--email", "jane@example.com"])
            .unwrap_or_else(|e| panic!("{e}"));
        let Commands::Checkout(args) = cli.command else {
            panic!("expected checkout");
        };
        let (shipping, payment, wait) = args.into_forms();
        assert_eq!(shipping.email, "jane@example.com");
        assert_eq!(shipping.country, "United States");
        assert_eq!(payment.payment_method, PaymentMethod::CreditCard);
        assert!(wait);
    }

    #[test]
    fn test_parse_negative_quantity() {
        let cli = Cli::try_parse_from(["luxe", "cart", "set", "3", "-1"])
            .unwrap_or_else(|e| panic!("{e}"));
        assert!(matches!(
            cli.command,
            Commands::Cart {
                action: CartAction::Set { quantity: -1, .. }
            }
        ));
    }

    #[test]
    fn test_parse_sort_order() {
        let cli = Cli::try_parse_from(["luxe", "browse", "--sort", "price-high"])
            .unwrap_or_else(|e| panic!("{e}"));
        assert!(matches!(
            cli.command,
            Commands::Browse {
                sort: Some(SortBy::PriceDesc),
                ..
            }
        ));
        assert!(Cli::try_parse_from(["luxe", "browse", "--sort", "cheapest"]).is_err());
    }
}
