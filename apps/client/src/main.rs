use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use colored::*;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

const ICON_FOLDER: &str = "icons";

#[derive(Parser)]
#[command(name = "salon-client")]
#[command(about = "Drives the salon booking API from the command line")]
#[command(version = "1.0")]
struct Cli {
    #[arg(long, default_value = "http://localhost:8000")]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a shop
    CreateShop {
        #[arg(long)]
        name: String,
        #[arg(long)]
        address: String,
    },
    /// Sign up a stylist with a price list and an optional icon
    SignupStylist {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        description: Option<String>,
        /// Price list entry as TYPE=PRICE, e.g. HAIRCUT=30. Repeatable.
        #[arg(long = "service", required = true)]
        services: Vec<String>,
        #[arg(long)]
        shop_id: Option<String>,
        /// Local icon file name; it is stored under a timestamped name.
        #[arg(long)]
        icon: Option<String>,
    },
    /// Show a stylist and their bookings
    ShowStylist {
        #[arg(long)]
        id: String,
    },
    /// Sign up a customer
    SignupCustomer {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Book a stylist's service for a customer
    Book {
        #[arg(long)]
        customer_id: String,
        #[arg(long)]
        stylist_id: String,
        #[arg(long)]
        service_type: String,
        /// Appointment time in RFC 3339, e.g. 2024-06-01T10:00:00Z
        #[arg(long)]
        at: DateTime<Utc>,
    },
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Shop {
    id: String,
    name: String,
    address: String,
    stylist_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct ServiceOffer {
    #[serde(rename = "type")]
    service_type: String,
    price: f64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Stylist {
    id: String,
    first_name: String,
    last_name: String,
    description: Option<String>,
    icon_path: Option<String>,
    services: Vec<ServiceOffer>,
    email: String,
    shop_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Blob {
    id: String,
    #[serde(rename = "type")]
    blob_type: String,
    file_name: String,
    user_id: String,
}

#[derive(Debug, Deserialize)]
struct StylistSignup {
    stylist: Stylist,
    icon: Option<Blob>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Customer {
    id: String,
    email: String,
    first_name: String,
    last_name: String,
    phone: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Booking {
    id: String,
    customer_id: String,
    stylist_id: String,
    service_type: String,
    price: f64,
    scheduled_at: DateTime<Utc>,
    status: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
    message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct IconRequest {
    #[serde(rename = "type")]
    blob_type: &'static str,
    file_name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StylistSignupRequest {
    first_name: String,
    last_name: String,
    description: Option<String>,
    services: Vec<ServiceOffer>,
    email: String,
    password: String,
    shop_id: Option<String>,
    icon: Option<IconRequest>,
}

/// Name under which an uploaded icon is stored: the original stem plus a
/// millisecond UTC timestamp, keeping the extension.
fn timestamped_file_name(original: &str, now: DateTime<Utc>) -> String {
    let path = Path::new(original);
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("icon");
    let timestamp = now.format("%Y%m%d%H%M%S%3f");

    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => format!("{stem}_{timestamp}.{ext}"),
        None => format!("{stem}_{timestamp}"),
    }
}

fn parse_service(entry: &str) -> Result<ServiceOffer> {
    let (service_type, price) = entry
        .split_once('=')
        .with_context(|| format!("service '{entry}' must look like TYPE=PRICE"))?;
    let price = price
        .trim()
        .parse::<f64>()
        .with_context(|| format!("price in '{entry}' is not a number"))?;

    Ok(ServiceOffer {
        service_type: service_type.trim().to_uppercase(),
        price,
    })
}

struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    fn new(base_url: String) -> Self {
        let client = Client::new();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn read<T: DeserializeOwned>(response: Response, expected: StatusCode, action: &str) -> Result<T> {
        let status = response.status();
        if status != expected {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|body| format!("{} {}", body.error, body.message))
                .unwrap_or(text);
            return Err(anyhow::anyhow!("{action} failed ({status}): {message}"));
        }

        response
            .json()
            .await
            .with_context(|| format!("failed to parse response of {action}"))
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B, action: &str) -> Result<T> {
        let response = self
            .client
            .post(format!("{}{path}", self.base_url))
            .json(body)
            .send()
            .await
            .with_context(|| format!("failed to send {action}"))?;

        Self::read(response, StatusCode::CREATED, action).await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, action: &str) -> Result<T> {
        let response = self
            .client
            .get(format!("{}{path}", self.base_url))
            .send()
            .await
            .with_context(|| format!("failed to send {action}"))?;

        Self::read(response, StatusCode::OK, action).await
    }

    async fn create_shop(&self, name: String, address: String) -> Result<Shop> {
        println!("🏪 Creating shop: {name}");
        let body = serde_json::json!({ "name": name, "address": address });
        let shop: Shop = self.post("/shop", &body, "create shop").await?;
        println!("✅ Shop created: {}", shop.id.green());
        Ok(shop)
    }

    async fn signup_stylist(&self, request: StylistSignupRequest) -> Result<StylistSignup> {
        println!("✂️  Signing up stylist: {} {}", request.first_name, request.last_name);
        let signup: StylistSignup = self.post("/stylist/signup", &request, "stylist signup").await?;
        println!("✅ Stylist created: {}", signup.stylist.id.green());
        if let Some(icon) = &signup.icon {
            println!(
                "🖼  Icon recorded: {} ({})",
                icon.file_name.cyan(),
                signup.stylist.icon_path.as_deref().unwrap_or("-")
            );
        }
        Ok(signup)
    }

    async fn show_stylist(&self, id: &str) -> Result<()> {
        let stylist: Stylist = self.get(&format!("/stylist/{id}"), "fetch stylist").await?;
        let bookings: Vec<Booking> = self
            .get(&format!("/stylist/{id}/bookings"), "fetch stylist bookings")
            .await?;

        println!("{} {} <{}>", stylist.first_name.bold(), stylist.last_name.bold(), stylist.email);
        if let Some(description) = &stylist.description {
            println!("  {description}");
        }
        println!("  shop: {}", stylist.shop_id.as_deref().unwrap_or("none"));
        println!("  icon: {}", stylist.icon_path.as_deref().unwrap_or("none"));
        println!("  services:");
        for offer in &stylist.services {
            println!("    {:<16} {:>8.2}", offer.service_type, offer.price);
        }
        println!("  bookings: {}", bookings.len().to_string().yellow());
        for booking in &bookings {
            println!(
                "    {} {} {} {}",
                booking.scheduled_at.to_rfc3339(),
                booking.service_type,
                booking.customer_id,
                booking.status.yellow()
            );
        }
        Ok(())
    }

    async fn signup_customer(&self, body: serde_json::Value) -> Result<Customer> {
        println!("🙋 Signing up customer");
        let customer: Customer = self.post("/customer/signup", &body, "customer signup").await?;
        println!(
            "✅ Customer created: {} ({} {})",
            customer.id.green(),
            customer.first_name,
            customer.last_name
        );
        Ok(customer)
    }

    async fn book(&self, body: serde_json::Value) -> Result<Booking> {
        println!("📅 Creating booking");
        let booking: Booking = self.post("/booking", &body, "create booking").await?;
        println!(
            "✅ Booking {} at {} for {:.2}: {}",
            booking.id.green(),
            booking.scheduled_at.to_rfc3339(),
            booking.price,
            booking.status.yellow()
        );
        Ok(booking)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let api = ApiClient::new(cli.api_url);

    let outcome = match cli.command {
        Commands::CreateShop { name, address } => api.create_shop(name, address).await.map(|_| ()),
        Commands::SignupStylist {
            first_name,
            last_name,
            email,
            password,
            description,
            services,
            shop_id,
            icon,
        } => {
            let services = services
                .iter()
                .map(|entry| parse_service(entry))
                .collect::<Result<Vec<_>>>()?;
            let icon = icon.map(|original| IconRequest {
                blob_type: "icon",
                file_name: timestamped_file_name(&original, Utc::now()),
            });
            if let Some(icon) = &icon {
                println!("⬆️  Upload the icon to storage as {}/{}", ICON_FOLDER, icon.file_name);
            }

            api.signup_stylist(StylistSignupRequest {
                first_name,
                last_name,
                description,
                services,
                email,
                password,
                shop_id,
                icon,
            })
            .await
            .map(|_| ())
        }
        Commands::ShowStylist { id } => api.show_stylist(&id).await,
        Commands::SignupCustomer {
            first_name,
            last_name,
            email,
            password,
            phone,
        } => api
            .signup_customer(serde_json::json!({
                "firstName": first_name,
                "lastName": last_name,
                "email": email,
                "password": password,
                "phone": phone,
            }))
            .await
            .map(|_| ()),
        Commands::Book {
            customer_id,
            stylist_id,
            service_type,
            at,
        } => api
            .book(serde_json::json!({
                "customerId": customer_id,
                "stylistId": stylist_id,
                "serviceType": service_type.to_uppercase(),
                "scheduledAt": at,
            }))
            .await
            .map(|_| ()),
    };

    if let Err(error) = &outcome {
        eprintln!("{} {error:#}", "❌".red());
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    #[test]
    fn icon_names_get_millisecond_timestamps() {
        let now = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap()
            + chrono::Duration::milliseconds(42);

        assert_eq!(
            timestamped_file_name("portrait.png", now),
            "portrait_20240309140507042.png"
        );
        assert_eq!(timestamped_file_name("photos/me.jpeg", now), "me_20240309140507042.jpeg");
        assert_eq!(timestamped_file_name("avatar", now), "avatar_20240309140507042");
    }

    #[test]
    fn icon_timestamp_is_taken_in_utc() {
        let berlin = FixedOffset::east_opt(2 * 3600).unwrap();
        let local = berlin.with_ymd_and_hms(2024, 6, 1, 0, 30, 0).unwrap();

        assert_eq!(
            timestamped_file_name("me.png", local.with_timezone(&Utc)),
            "me_20240531223000000.png"
        );
    }

    #[test]
    fn service_entries_parse_type_and_price() {
        assert_eq!(
            parse_service("haircut=30").unwrap(),
            ServiceOffer {
                service_type: "HAIRCUT".to_string(),
                price: 30.0
            }
        );
        assert!(parse_service("HAIRCUT").is_err());
        assert!(parse_service("HAIRCUT=cheap").is_err());
    }
}
