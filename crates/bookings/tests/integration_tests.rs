//! Services wired to a real SQLite database.

use chrono::{TimeZone, Utc};
use salon_bookings::{
    BookingStatus, CreateBlobRequest, CreateBookingRequest, CreateShopRequest,
    CreateStylistRequest, CustomerSignupRequest, IconUpload, SalonError, SalonServices,
    ServiceEntry, ServiceType, StylistFilter, StylistSignupRequest,
};
use salon_config::DatabaseConfig;
use tempfile::TempDir;

async fn services() -> (SalonServices, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let config = DatabaseConfig {
        url: format!("sqlite://{}", temp_dir.path().join("salon.db").display()),
        max_connections: 2,
    };
    let pool = salon_database::initialize_database(&config).await.unwrap();
    (SalonServices::from_pool(pool), temp_dir)
}

fn stylist_request(email: &str, shop_id: Option<String>) -> CreateStylistRequest {
    CreateStylistRequest {
        first_name: "Ada".to_string(),
        last_name: "Shears".to_string(),
        description: None,
        icon_path: None,
        services: vec![
            ServiceEntry::new(ServiceType::MakeUp, 40.0),
            ServiceEntry::new(ServiceType::Haircut, 30.0),
            ServiceEntry::new(ServiceType::Nail, 15.5),
        ],
        email: email.to_string(),
        password: "scissors".to_string(),
        shop_id,
    }
}

#[tokio::test]
async fn stylist_in_shop_round_trips() {
    let (services, _temp_dir) = services().await;

    let shop = services
        .shops
        .create_shop(CreateShopRequest {
            name: "Downtown".to_string(),
            address: "1 Main".to_string(),
        })
        .await
        .unwrap();
    let stylist = services
        .stylists
        .create_stylist(stylist_request("ada@example.com", Some(shop.public_id.clone())))
        .await
        .unwrap();

    let fetched = services.stylists.get_stylist(&stylist.public_id).await.unwrap();
    let types: Vec<_> = fetched.services.iter().map(|o| o.service_type).collect();
    assert_eq!(types, vec![ServiceType::MakeUp, ServiceType::Haircut, ServiceType::Nail]);
    assert_eq!(fetched.shop_public_id.as_deref(), Some(shop.public_id.as_str()));

    let shop = services.shops.get_shop(&shop.public_id).await.unwrap();
    assert_eq!(shop.stylist_ids, vec![stylist.public_id.clone()]);

    let by_filter = services
        .stylists
        .list_stylists(StylistFilter {
            shop_id: Some(shop.public_id),
            service_type: Some(ServiceType::Nail),
        })
        .await
        .unwrap();
    assert_eq!(by_filter.len(), 1);
}

#[tokio::test]
async fn missing_shop_persists_no_stylist() {
    let (services, _temp_dir) = services().await;

    let err = services
        .stylists
        .create_stylist(stylist_request("ada@example.com", Some("ghost".to_string())))
        .await
        .unwrap_err();

    assert!(matches!(err, SalonError::NotFound { entity: "shop", .. }));
    assert!(services
        .stylists
        .list_stylists(StylistFilter::default())
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn signup_with_icon_and_booking_lifecycle() {
    let (services, _temp_dir) = services().await;

    let signed_up = services
        .stylists
        .sign_up(StylistSignupRequest {
            stylist: stylist_request("ada@example.com", None),
            icon: Some(IconUpload {
                blob_type: "icon".to_string(),
                file_name: "ada_20240101120000000.png".to_string(),
            }),
        })
        .await
        .unwrap();
    let stylist = signed_up.stylist;
    let icons = services.blobs.list_for_user(&stylist.public_id).await.unwrap();
    assert_eq!(icons.len(), 1);

    let customer = services
        .customers
        .sign_up(CustomerSignupRequest {
            email: "cleo@example.com".to_string(),
            password: "hunter22".to_string(),
            first_name: "Cleo".to_string(),
            last_name: "Client".to_string(),
            phone: None,
        })
        .await
        .unwrap();

    services
        .blobs
        .create_blob(CreateBlobRequest {
            blob_type: "icon".to_string(),
            file_name: "cleo.png".to_string(),
            user_id: customer.public_id.clone(),
        })
        .await
        .unwrap();

    let booking = services
        .bookings
        .create_booking(CreateBookingRequest {
            customer_id: customer.public_id.clone(),
            stylist_id: stylist.public_id.clone(),
            service_type: ServiceType::Nail,
            scheduled_at: Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap(),
        })
        .await
        .unwrap();
    assert_eq!(booking.price, 15.5);
    assert_eq!(booking.status, BookingStatus::Pending);

    let cancelled = services
        .bookings
        .update_status(&booking.public_id, BookingStatus::Cancelled)
        .await
        .unwrap();
    assert_eq!(cancelled.status, BookingStatus::Cancelled);

    assert_eq!(
        services
            .bookings
            .list_for_customer(&customer.public_id)
            .await
            .unwrap()
            .len(),
        1
    );
}

#[tokio::test]
async fn duplicate_stylist_email_is_a_conflict() {
    let (services, _temp_dir) = services().await;

    services
        .stylists
        .create_stylist(stylist_request("ada@example.com", None))
        .await
        .unwrap();
    let err = services
        .stylists
        .create_stylist(stylist_request("ada@example.com", None))
        .await
        .unwrap_err();

    assert!(matches!(err, SalonError::Conflict { .. }));
}
