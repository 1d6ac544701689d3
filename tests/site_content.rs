use dealership_catalog::models::{
    AboutContent, ContactContent, ContactContentPatch, HomeContent, HomeContentPatch,
    ShowroomContent, SiteContent, SiteContentPatch,
};
use dealership_catalog::repository::{SITE_CONTENT_COLLECTION, SITE_CONTENT_KEY};
use dealership_catalog::store::MemoryStore;
use dealership_catalog::SiteContentRepository;
use serde_json::json;
use std::sync::Arc;

fn setup() -> (Arc<MemoryStore>, SiteContentRepository) {
    let store = Arc::new(MemoryStore::new());
    let repository = SiteContentRepository::new(store.clone());
    (store, repository)
}

fn hero_title(title: &str) -> SiteContentPatch {
    SiteContentPatch {
        home: Some(HomeContentPatch {
            hero_title: Some(title.to_string()),
            ..HomeContentPatch::default()
        }),
        ..SiteContentPatch::default()
    }
}

#[tokio::test]
async fn empty_store_reads_as_defaults() {
    let (_store, repository) = setup();
    let content = repository.get_content().await;

    assert_eq!(content, SiteContent::default());
    assert_eq!(content.home, HomeContent::default());
    assert!(!content.contact.phone.is_empty());
}

#[tokio::test]
async fn unreachable_store_reads_as_defaults() {
    let (store, repository) = setup();
    repository.update_content(hero_title("Custom")).await.unwrap();

    store.set_offline(true);
    assert_eq!(repository.get_content().await, SiteContent::default());
    assert!(repository.try_get_content().await.is_err());
}

#[tokio::test]
async fn updating_one_field_leaves_everything_else() {
    let (_store, repository) = setup();
    repository.update_content(hero_title("Mid-Year Deals")).await.unwrap();

    let content = repository.get_content().await;
    assert_eq!(content.home.hero_title, "Mid-Year Deals");
    assert_eq!(content.home.hero_subtitle, HomeContent::default().hero_subtitle);
    assert_eq!(content.about, AboutContent::default());
    assert_eq!(content.showroom, ShowroomContent::default());
    assert_eq!(content.contact, ContactContent::default());
}

#[tokio::test]
async fn partial_writes_merge_within_a_section() {
    let (_store, repository) = setup();
    repository
        .update_content(SiteContentPatch {
            contact: Some(ContactContentPatch {
                phone: Some("+254 711 111 111".to_string()),
                email: Some("hello@example.co.ke".to_string()),
                ..ContactContentPatch::default()
            }),
            ..SiteContentPatch::default()
        })
        .await
        .unwrap();
    repository
        .update_content(SiteContentPatch {
            contact: Some(ContactContentPatch {
                phone: Some("+254 722 222 222".to_string()),
                ..ContactContentPatch::default()
            }),
            ..SiteContentPatch::default()
        })
        .await
        .unwrap();
    repository.update_content(hero_title("Welcome")).await.unwrap();

    let content = repository.get_content().await;
    assert_eq!(content.contact.phone, "+254 722 222 222");
    assert_eq!(content.contact.email, "hello@example.co.ke");
    assert_eq!(content.contact.address, ContactContent::default().address);
    assert_eq!(content.home.hero_title, "Welcome");
}

#[tokio::test]
async fn fields_added_later_fall_back_to_defaults() {
    let (store, repository) = setup();
    store
        .put(
            SITE_CONTENT_COLLECTION,
            SITE_CONTENT_KEY,
            json!({
                "home": { "heroTitle": "Old Title" },
                "about": "not an object",
            })
            .as_object()
            .cloned()
            .unwrap(),
        )
        .await;

    let content = repository.get_content().await;
    assert_eq!(content.home.hero_title, "Old Title");
    assert_eq!(content.home.hero_button_text, HomeContent::default().hero_button_text);
    assert_eq!(content.home.hero_background_video, None);
    assert_eq!(content.about, AboutContent::default());
}

#[tokio::test]
async fn one_bad_field_keeps_the_rest_of_its_section() {
    let (store, repository) = setup();
    store
        .put(
            SITE_CONTENT_COLLECTION,
            SITE_CONTENT_KEY,
            json!({
                "home": { "heroTitle": null, "heroSubtitle": "Custom subtitle", "heroButtonText": 7 },
                "contact": { "whatsapp": 254711111111u64, "phone": "+254 711 111 111", "email": false },
            })
            .as_object()
            .cloned()
            .unwrap(),
        )
        .await;

    let content = repository.get_content().await;
    assert_eq!(content.home.hero_title, HomeContent::default().hero_title);
    assert_eq!(content.home.hero_subtitle, "Custom subtitle");
    assert_eq!(content.home.hero_button_text, "7");
    assert_eq!(content.contact.phone, "+254 711 111 111");
    assert_eq!(content.contact.whatsapp, "254711111111");
    assert_eq!(content.contact.email, ContactContent::default().email);
    assert_eq!(content.showroom, ShowroomContent::default());
}

#[tokio::test]
async fn empty_patch_writes_nothing() {
    let (_store, repository) = setup();
    repository
        .update_content(SiteContentPatch::default())
        .await
        .unwrap();
    assert_eq!(repository.get_content().await, SiteContent::default());
}
