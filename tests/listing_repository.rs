use chrono::Utc;
use dealership_catalog::media::{MediaFile, MemoryUploader};
use dealership_catalog::models::{
    Condition, FuelType, ListingPatch, ListingStatus, NewInquiry, NewListing, Transmission,
};
use dealership_catalog::repository::{INQUIRIES_COLLECTION, LISTINGS_COLLECTION};
use dealership_catalog::store::{DocumentStore, MemoryStore};
use dealership_catalog::{ListingRepository, RepositoryError};
use serde_json::json;
use std::sync::Arc;

fn new_listing(make: &str, model: &str, price: u64) -> NewListing {
    NewListing {
        make: make.to_string(),
        model: model.to_string(),
        year: 2017,
        price,
        mileage: 78_000,
        transmission: Transmission::Automatic,
        fuel_type: FuelType::Petrol,
        condition: Condition::ForeignUsed,
        status: None,
        description: "Clean unit, accident free.".to_string(),
        color: "Pearl White".to_string(),
        engine_size: "1800cc".to_string(),
        features: vec!["Sunroof".to_string(), "ABS".to_string()],
        is_featured: false,
    }
}

fn image(name: &str) -> MediaFile {
    MediaFile::new(name, "image/jpeg", vec![0xFF, 0xD8, 0xFF])
}

fn video(name: &str) -> MediaFile {
    MediaFile::new(name, "video/mp4", vec![0, 0, 0, 0x18])
}

fn setup() -> (Arc<MemoryStore>, Arc<MemoryUploader>, ListingRepository) {
    let store = Arc::new(MemoryStore::new());
    let uploader = Arc::new(MemoryUploader::new());
    let repository = ListingRepository::new(store.clone(), uploader.clone());
    (store, uploader, repository)
}

#[tokio::test]
async fn create_uploads_images_in_order_without_video() {
    let (_store, _uploader, repository) = setup();
    let started = Utc::now().timestamp_millis();

    let files = [image("front.jpg"), image("side.jpg"), image("interior.jpg")];
    let listing = repository
        .create(new_listing("Toyota", "Harrier", 3_200_000), &files, None)
        .await
        .unwrap();

    assert!(!listing.id.is_empty());
    assert_eq!(listing.images.len(), 3);
    assert!(listing.images[0].ends_with("front.jpg"));
    assert!(listing.images[2].ends_with("interior.jpg"));
    assert_eq!(listing.video_url, None);
    assert!(listing.created_at >= started);
    assert_eq!(listing.status, ListingStatus::Available);

    let stored = repository.get_by_id(&listing.id).await.unwrap().unwrap();
    assert_eq!(stored, listing);
}

#[tokio::test]
async fn create_with_video_stores_video_url() {
    let (_store, _uploader, repository) = setup();
    let clip = video("walkaround.mp4");

    let listing = repository
        .create(new_listing("Mazda", "CX-5", 2_900_000), &[], Some(&clip))
        .await
        .unwrap();

    let url = listing.video_url.unwrap();
    assert!(url.starts_with("memory://video/"));
    assert!(listing.images.is_empty());
}

#[tokio::test]
async fn failed_upload_aborts_create_before_any_write() {
    let store = Arc::new(MemoryStore::new());
    let uploader = Arc::new(MemoryUploader::failing_on(&["broken.jpg"]));
    let repository = ListingRepository::new(store.clone(), uploader);

    let err = repository
        .create(
            new_listing("Nissan", "Note", 850_000),
            &[image("ok.jpg"), image("broken.jpg")],
            None,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, RepositoryError::Upload(_)));
    assert!(err.to_string().contains("upload failed"));
    assert!(repository.list_all().await.is_empty());
}

#[tokio::test]
async fn list_all_is_newest_first() {
    let (store, _uploader, repository) = setup();
    let base = json!({
        "make": "Subaru", "model": "Forester", "year": 2016, "price": 2_000_000,
        "transmission": "Automatic", "fuelType": "Petrol", "condition": "Used",
    });

    for (id, created_at) in [("old", json!(1_000)), ("new", json!("2024-01-01T00:00:00Z")), ("mid", json!(5_000))] {
        let mut fields = base.as_object().cloned().unwrap();
        fields.insert("createdAt".to_string(), created_at);
        store.put(LISTINGS_COLLECTION, id, fields).await;
    }

    let ids: Vec<String> = repository.list_all().await.into_iter().map(|l| l.id).collect();
    assert_eq!(ids, vec!["new", "mid", "old"]);
}

#[tokio::test]
async fn list_all_skips_malformed_documents() {
    let (store, _uploader, repository) = setup();
    repository
        .create(new_listing("Honda", "Fit", 700_000), &[], None)
        .await
        .unwrap();
    store
        .put(
            LISTINGS_COLLECTION,
            "junk",
            json!({ "model": "no make", "createdAt": 1 }).as_object().cloned().unwrap(),
        )
        .await;

    let listings = repository.list_all().await;
    assert_eq!(listings.len(), 1);
    assert_eq!(listings[0].make, "Honda");
}

#[tokio::test]
async fn list_all_degrades_to_empty_when_store_is_down() {
    let (store, _uploader, repository) = setup();
    repository
        .create(new_listing("Toyota", "Vitz", 650_000), &[], None)
        .await
        .unwrap();

    store.set_offline(true);
    assert!(repository.list_all().await.is_empty());
    assert!(repository.try_list_all().await.is_err());
}

#[tokio::test]
async fn status_only_update_leaves_other_fields_untouched() {
    let (_store, _uploader, repository) = setup();
    let before = repository
        .create(
            new_listing("Toyota", "Prado", 6_500_000),
            &[image("a.jpg"), image("b.jpg")],
            Some(&video("tour.mp4")),
        )
        .await
        .unwrap();

    repository
        .update(&before.id, ListingPatch::status(ListingStatus::Sold), &[], None)
        .await
        .unwrap();

    let after = repository.get_by_id(&before.id).await.unwrap().unwrap();
    assert_eq!(after.status, ListingStatus::Sold);

    let mut expected = before.clone();
    expected.status = ListingStatus::Sold;
    assert_eq!(after, expected);
}

#[tokio::test]
async fn new_images_append_to_the_patch_list_not_the_stored_one() {
    let (_store, _uploader, repository) = setup();
    let listing = repository
        .create(
            new_listing("BMW", "320i", 4_100_000),
            &[image("one.jpg"), image("two.jpg")],
            None,
        )
        .await
        .unwrap();

    // Gallery grown from the full current list
    let patch = ListingPatch {
        images: Some(listing.images.clone()),
        ..ListingPatch::default()
    };
    repository
        .update(&listing.id, patch, &[image("three.jpg")], None)
        .await
        .unwrap();
    let grown = repository.get_by_id(&listing.id).await.unwrap().unwrap();
    assert_eq!(grown.images.len(), 3);
    assert_eq!(&grown.images[..2], &listing.images[..]);
    assert!(grown.images[2].ends_with("three.jpg"));

    // No images in the patch: uploads become the whole list
    repository
        .update(&listing.id, ListingPatch::default(), &[image("four.jpg")], None)
        .await
        .unwrap();
    let replaced = repository.get_by_id(&listing.id).await.unwrap().unwrap();
    assert_eq!(replaced.images.len(), 1);
    assert!(replaced.images[0].ends_with("four.jpg"));
}

#[tokio::test]
async fn new_video_replaces_stored_video() {
    let (_store, _uploader, repository) = setup();
    let listing = repository
        .create(new_listing("Audi", "A4", 3_800_000), &[], Some(&video("old.mp4")))
        .await
        .unwrap();

    repository
        .update(&listing.id, ListingPatch::default(), &[], Some(&video("new.mp4")))
        .await
        .unwrap();

    let updated = repository.get_by_id(&listing.id).await.unwrap().unwrap();
    assert!(updated.video_url.unwrap().ends_with("new.mp4"));
    assert_eq!(updated.created_at, listing.created_at);
}

#[tokio::test]
async fn video_can_be_removed() {
    let (_store, _uploader, repository) = setup();
    let listing = repository
        .create(new_listing("Mazda", "CX-5", 3_100_000), &[image("one.jpg")], Some(&video("tour.mp4")))
        .await
        .unwrap();
    assert!(listing.video_url.is_some());

    repository
        .update(&listing.id, ListingPatch::clear_video(), &[], None)
        .await
        .unwrap();

    let updated = repository.get_by_id(&listing.id).await.unwrap().unwrap();
    assert_eq!(updated.video_url, None);
    assert_eq!(updated.images, listing.images);
    assert_eq!(updated.make, "Mazda");
}

#[tokio::test]
async fn updating_a_missing_listing_fails() {
    let (_store, _uploader, repository) = setup();

    let err = repository
        .update("missing", ListingPatch::status(ListingStatus::Reserved), &[], None)
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    let err = repository
        .update("missing", ListingPatch::default(), &[], None)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn delete_removes_listing_but_keeps_inquiries() {
    let (store, _uploader, repository) = setup();
    let listing = repository
        .create(new_listing("Isuzu", "D-Max", 3_300_000), &[], None)
        .await
        .unwrap();
    repository
        .add_inquiry(NewInquiry {
            listing: Some(dealership_catalog::models::ListingRef {
                id: listing.id.clone(),
                name: listing.display_name(),
            }),
            name: "Mwangi".to_string(),
            phone: "0722000000".to_string(),
            message: "Can I view it on Saturday?".to_string(),
        })
        .await
        .unwrap();

    repository.delete(&listing.id).await.unwrap();

    assert_eq!(repository.get_by_id(&listing.id).await.unwrap(), None);
    assert!(repository.list_all().await.iter().all(|l| l.id != listing.id));

    let inquiries = repository.list_inquiries().await.unwrap();
    assert_eq!(inquiries.len(), 1);
    assert_eq!(inquiries[0].listing.as_ref().unwrap().name, "Isuzu D-Max");
    assert_eq!(store.list(INQUIRIES_COLLECTION, "createdAt").await.unwrap().len(), 1);
}

#[tokio::test]
async fn get_by_id_of_unknown_id_is_not_found() {
    let (_store, _uploader, repository) = setup();
    assert_eq!(repository.get_by_id("nope").await.unwrap(), None);
}

#[tokio::test]
async fn writes_propagate_store_failures() {
    let (store, _uploader, repository) = setup();
    store.set_offline(true);

    assert!(repository
        .create(new_listing("Toyota", "Axio", 1_100_000), &[], None)
        .await
        .is_err());
    assert!(repository.delete("any").await.is_err());
    assert!(repository
        .add_inquiry(NewInquiry {
            listing: None,
            name: "A".to_string(),
            phone: "1".to_string(),
            message: "m".to_string(),
        })
        .await
        .is_err());
}
