use dealership_catalog::catalog::{self, DashboardStats, FilterState};
use dealership_catalog::media::CloudinaryUploader;
use dealership_catalog::store::{DocumentStore, FirestoreStore};
use dealership_catalog::{AppConfig, ListingRepository, SiteContentRepository};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("🚗 Dealership Catalog");
    info!("=====================");

    let config = AppConfig::from_env()?;

    let store = Arc::new(
        FirestoreStore::new(&config.firestore_project_id, &config.firestore_database)?
            .with_api_key(config.firestore_api_key.clone())
            .with_auth_token(config.firestore_auth_token.clone()),
    );
    let uploader = Arc::new(CloudinaryUploader::new(
        &config.cloudinary_cloud_name,
        &config.cloudinary_upload_preset,
    )?);

    info!("Using {} document store", store.backend_name());
    let listings = ListingRepository::new(store.clone(), uploader);
    let site = SiteContentRepository::new(store);

    let content = site.get_content().await;
    info!("{}", content.home.hero_title);

    let inventory = listings.list_all().await;
    info!("Loaded {} listings", inventory.len());

    for listing in catalog::featured(&inventory, 3) {
        info!("⭐ {} {} ({})", listing.year, listing.display_name(), catalog::format_price(listing.price));
    }

    match listings.list_inquiries().await {
        Ok(inquiries) => {
            let stats = DashboardStats::collect(&inventory, &inquiries);
            info!(
                "{} listings ({} available, {} reserved, {} sold), {} inquiries, stock value {}",
                stats.total_listings,
                stats.available,
                stats.reserved,
                stats.sold,
                stats.total_inquiries,
                catalog::format_price(stats.inventory_value)
            );
        }
        Err(e) => warn!("Could not load inquiries: {}", e),
    }

    let filter = FilterState {
        search: std::env::args().nth(1).unwrap_or_default(),
        ..FilterState::default()
    };

    for (i, listing) in catalog::filter(&inventory, &filter).iter().enumerate() {
        println!("{}. {} {} [{}]", i + 1, listing.year, listing.display_name(), listing.status);
        println!("   {} · {} · {} km", catalog::format_price(listing.price), listing.condition, listing.mileage);
        if !listing.features.is_empty() {
            println!("   Features: {}", listing.features.join(", "));
        }
        if let Some(image) = listing.primary_image() {
            println!("   Image: {}", image);
        }
        if let Some(link) =
            catalog::whatsapp_link(&content.contact.whatsapp, &catalog::listing_enquiry_text(listing))
        {
            println!("   WhatsApp: {}", link);
        }
        println!("   ID: {}", listing.id);
        println!();
    }

    // Save the full inventory
    let json = serde_json::to_string_pretty(&inventory)?;
    tokio::fs::write("inventory_snapshot.json", json).await?;
    info!("💾 Saved {} listings to inventory_snapshot.json", inventory.len());

    Ok(())
}
