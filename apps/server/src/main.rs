use anyhow::Context;
use clap::{Parser, Subcommand};
use salon_bookings::{
    CreateShopRequest, CreateStylistRequest, CustomerSignupRequest, SalonServices, ServiceEntry,
    ServiceType,
};
use salon_config::load as load_config;
use salon_database::{
    clear_all, BlobRepository, BookingRepository, ClearedCounts, CustomerRepository, SqlitePool,
    StylistQuery, StylistRepository, ShopRepository,
};
use salon_gateway::{create_router, GatewayState};
use salon_runtime::{telemetry, BackendServices};
use tokio::net::TcpListener;
use tracing::info;

#[derive(Parser)]
#[command(name = "salon-backend")]
#[command(about = "Salon booking backend (serves HTTP by default)")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Insert a demo shop, stylist and customer
    SeedData,
    /// Print every shop, stylist, customer, booking and blob
    DumpData,
    /// Delete all rows from the database
    ClearData,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    telemetry::init_tracing().context("failed to initialise tracing")?;
    let config = load_config().context("failed to load configuration")?;
    let backend = BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => run_server(backend, &config.http.bind_address()).await,
        Commands::SeedData => {
            let seeded = seed_data(&backend.services).await?;
            println!("Database seeded with demo data:");
            println!("- shop {}", seeded.shop_id);
            println!("- stylist {} ({})", seeded.stylist_id, SEED_STYLIST_EMAIL);
            println!("- customer {} ({})", seeded.customer_id, SEED_CUSTOMER_EMAIL);
            println!("Run 'dump-data' to see the inserted data");
            Ok(())
        }
        Commands::DumpData => dump_data(&backend.db_pool).await,
        Commands::ClearData => {
            let cleared = clear_data(&backend.db_pool).await?;
            println!("Database cleared ({} rows):", cleared.total());
            println!("- {} bookings deleted", cleared.bookings);
            println!("- {} blobs deleted", cleared.blobs);
            println!("- {} price list entries deleted", cleared.stylist_services);
            println!("- {} stylists deleted", cleared.stylists);
            println!("- {} customers deleted", cleared.customers);
            println!("- {} shops deleted", cleared.shops);
            Ok(())
        }
    }
}

async fn run_server(backend: BackendServices, address: &str) -> anyhow::Result<()> {
    info!("starting salon backend");

    let state = GatewayState::from_services(backend.db_pool, backend.services);
    let app = create_router(state);

    let listener = TcpListener::bind(address)
        .await
        .with_context(|| format!("failed to bind http listener on {address}"))?;

    info!(%address, "http server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(salon_runtime::shutdown_signal())
        .await
        .context("http server error")?;

    info!("backend shut down");
    Ok(())
}

const SEED_STYLIST_EMAIL: &str = "stylist@example.com";
const SEED_CUSTOMER_EMAIL: &str = "customer@example.com";
const SEED_PASSWORD: &str = "password123";

struct SeededIds {
    shop_id: String,
    stylist_id: String,
    customer_id: String,
}

async fn seed_data(services: &SalonServices) -> anyhow::Result<SeededIds> {
    info!("seeding database with demo data");

    let shop = services
        .shops
        .create_shop(CreateShopRequest {
            name: "Downtown Cuts".to_string(),
            address: "1 Main Street".to_string(),
        })
        .await
        .context("failed to insert demo shop")?;

    let stylist = services
        .stylists
        .create_stylist(CreateStylistRequest {
            first_name: "Sam".to_string(),
            last_name: "Shears".to_string(),
            description: Some("Cuts, colour and everything in between".to_string()),
            icon_path: None,
            services: vec![
                ServiceEntry::new(ServiceType::Haircut, 30.0),
                ServiceEntry::new(ServiceType::HairColoring, 85.0),
                ServiceEntry::new(ServiceType::HairStyling, 45.0),
            ],
            email: SEED_STYLIST_EMAIL.to_string(),
            password: SEED_PASSWORD.to_string(),
            shop_id: Some(shop.public_id.clone()),
        })
        .await
        .context("failed to insert demo stylist (already seeded?)")?;

    let customer = services
        .customers
        .sign_up(CustomerSignupRequest {
            email: SEED_CUSTOMER_EMAIL.to_string(),
            password: SEED_PASSWORD.to_string(),
            first_name: "Casey".to_string(),
            last_name: "Client".to_string(),
            phone: Some("555-0100".to_string()),
        })
        .await
        .context("failed to insert demo customer (already seeded?)")?;

    Ok(SeededIds {
        shop_id: shop.public_id,
        stylist_id: stylist.public_id,
        customer_id: customer.public_id,
    })
}

async fn dump_data(pool: &SqlitePool) -> anyhow::Result<()> {
    let shops = ShopRepository::new(pool.clone())
        .list()
        .await
        .context("failed to fetch shops")?;

    println!("=== SHOPS ===");
    if shops.is_empty() {
        println!("No shops found in database");
    } else {
        println!("{:<28} {:<30} {:<40} {:<10}", "Public ID", "Name", "Address", "Stylists");
        println!("{}", "-".repeat(110));
        for shop in shops {
            println!(
                "{:<28} {:<30} {:<40} {:<10}",
                shop.public_id,
                shop.name,
                shop.address,
                shop.stylist_ids.len()
            );
        }
    }

    let stylists = StylistRepository::new(pool.clone())
        .list(&StylistQuery::default())
        .await
        .context("failed to fetch stylists")?;

    println!("\n=== STYLISTS ===");
    if stylists.is_empty() {
        println!("No stylists found in database");
    } else {
        println!("{:<28} {:<25} {:<30} {:<28} {}", "Public ID", "Name", "Email", "Shop", "Services");
        println!("{}", "-".repeat(140));
        for stylist in stylists {
            let services = stylist
                .services
                .iter()
                .map(|offer| format!("{} {:.2}", offer.service_type, offer.price))
                .collect::<Vec<_>>()
                .join(", ");
            println!(
                "{:<28} {:<25} {:<30} {:<28} {}",
                stylist.public_id,
                format!("{} {}", stylist.first_name, stylist.last_name),
                stylist.email,
                stylist.shop_public_id.as_deref().unwrap_or("NULL"),
                services
            );
        }
    }

    let customers = CustomerRepository::new(pool.clone())
        .list()
        .await
        .context("failed to fetch customers")?;

    println!("\n=== CUSTOMERS ===");
    if customers.is_empty() {
        println!("No customers found in database");
    } else {
        println!("{:<28} {:<25} {:<30} {:<15}", "Public ID", "Name", "Email", "Phone");
        println!("{}", "-".repeat(100));
        for customer in customers {
            println!(
                "{:<28} {:<25} {:<30} {:<15}",
                customer.public_id,
                format!("{} {}", customer.first_name, customer.last_name),
                customer.email,
                customer.phone.as_deref().unwrap_or("NULL")
            );
        }
    }

    let bookings = BookingRepository::new(pool.clone())
        .list()
        .await
        .context("failed to fetch bookings")?;

    println!("\n=== BOOKINGS ===");
    if bookings.is_empty() {
        println!("No bookings found in database");
    } else {
        println!(
            "{:<28} {:<28} {:<28} {:<15} {:<8} {:<26} {:<10}",
            "Public ID", "Customer", "Stylist", "Service", "Price", "Scheduled At", "Status"
        );
        println!("{}", "-".repeat(150));
        for booking in bookings {
            println!(
                "{:<28} {:<28} {:<28} {:<15} {:<8.2} {:<26} {:<10}",
                booking.public_id,
                booking.customer_public_id,
                booking.stylist_public_id,
                booking.service_type.as_str(),
                booking.price,
                booking.scheduled_at.to_rfc3339(),
                booking.status.as_str()
            );
        }
    }

    let blobs = BlobRepository::new(pool.clone())
        .list()
        .await
        .context("failed to fetch blobs")?;

    println!("\n=== BLOBS ===");
    if blobs.is_empty() {
        println!("No blobs found in database");
    } else {
        println!("{:<28} {:<10} {:<40} {:<28}", "Public ID", "Type", "File Name", "Owner");
        println!("{}", "-".repeat(110));
        for blob in blobs {
            println!(
                "{:<28} {:<10} {:<40} {:<28}",
                blob.public_id, blob.blob_type, blob.file_name, blob.user_id
            );
        }
    }

    Ok(())
}

async fn clear_data(pool: &SqlitePool) -> anyhow::Result<ClearedCounts> {
    info!("clearing all data from database");
    clear_all(pool).await.context("failed to clear database")
}
