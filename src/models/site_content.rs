use serde::{Deserialize, Serialize};

/// Editable marketing copy. A single instance exists, stored under a fixed key.
///
/// Every section derives `#[serde(default)]`, so a stored document that lacks a
/// field (or a whole section) decodes with the hard-coded value from the
/// section's `Default` impl.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SiteContent {
    pub home: HomeContent,
    pub about: AboutContent,
    pub showroom: ShowroomContent,
    pub contact: ContactContent,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct HomeContent {
    pub hero_title: String,
    pub hero_subtitle: String,
    pub hero_button_text: String,
    pub why_choose_us_title: String,
    pub why_choose_us_text: String,
    pub hero_background_image: Option<String>,
    pub hero_background_video: Option<String>,
}

impl Default for HomeContent {
    fn default() -> Self {
        Self {
            hero_title: "Drive Your Dream Car Today".to_string(),
            hero_subtitle: "Kenya's most trusted car dealership. We import high-quality foreign used vehicles and offer the best locally used deals.".to_string(),
            hero_button_text: "View Inventory".to_string(),
            why_choose_us_title: "Why Choose Us".to_string(),
            why_choose_us_text: "Every car undergoes a rigorous mechanical inspection before hitting our showroom floor.".to_string(),
            hero_background_image: None,
            hero_background_video: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct AboutContent {
    pub title: String,
    pub subtitle: String,
    pub story: String,
    pub mission: String,
    pub values_integrity: String,
    pub values_quality: String,
    pub values_customer: String,
}

impl Default for AboutContent {
    fn default() -> Self {
        Self {
            title: "About Nairobi Premium Motors".to_string(),
            subtitle: "Driving Kenya Forward Since 2015".to_string(),
            story: "Founded in 2015, Nairobi Premium Motors has come a long way from its beginnings in a small yard on Ngong Road. We now serve customers all over Kenya.".to_string(),
            mission: "To provide Kenyan car buyers with transparent, safe, and high-quality vehicle options, removing the anxiety often associated with buying used cars.".to_string(),
            values_integrity: "We do not tamper with mileages. We sell cars as they are, with full disclosure on condition.".to_string(),
            values_quality: "We only stock Grade 4 and above for imports, and strictly vetted locally used units.".to_string(),
            values_customer: "We walk with you from selection, to financing, to insurance and after-sales service.".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ShowroomContent {
    pub title: String,
    pub description: String,
    pub experience_title: String,
    pub experience_text: String,
}

impl Default for ShowroomContent {
    fn default() -> Self {
        Self {
            title: "Visit Our Showroom".to_string(),
            description: "Experience our premium collection in person. Take a test drive today.".to_string(),
            experience_title: "The Premium Experience".to_string(),
            experience_text: "Our team assists with financing, insurance, and transfer of ownership logistics.".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactContent {
    pub phone: String,
    pub whatsapp: String,
    pub email: String,
    pub address: String,
    pub opening_hours: String,
}

impl Default for ContactContent {
    fn default() -> Self {
        Self {
            phone: "+254 700 000 000".to_string(),
            whatsapp: "254700000000".to_string(),
            email: "sales@nairobipremiummotors.co.ke".to_string(),
            address: "Ngong Road, Nairobi, Kenya".to_string(),
            opening_hours: "Mon - Sat: 8:00 AM - 6:00 PM".to_string(),
        }
    }
}

/// Partial site-content write. Absent sections and absent fields are left as
/// they are in storage.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct SiteContentPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub home: Option<HomeContentPatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<AboutContentPatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showroom: Option<ShowroomContentPatch>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<ContactContentPatch>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HomeContentPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_button_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub why_choose_us_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub why_choose_us_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_background_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hero_background_video: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AboutContentPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub story: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mission: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values_integrity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values_quality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values_customer: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ShowroomContentPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_text: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContactContentPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<String>,
}
