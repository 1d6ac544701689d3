use crate::models::Listing;
use reqwest::Url;

/// Makes offered in the inventory filter and the admin form
pub const KNOWN_MAKES: [&str; 12] = [
    "Toyota",
    "Nissan",
    "Mazda",
    "Subaru",
    "Honda",
    "Mitsubishi",
    "Mercedes-Benz",
    "BMW",
    "Audi",
    "Volkswagen",
    "Land Rover",
    "Isuzu",
];

/// `KES 1,250,000`
pub fn format_price(price: u64) -> String {
    let digits = price.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    format!("KES {}", grouped)
}

/// Click-to-chat link with a prefilled message. Non-digits in the number are
/// dropped.
pub fn whatsapp_link(number: &str, text: &str) -> Option<String> {
    let digits: String = number.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    Url::parse_with_params(&format!("https://wa.me/{}", digits), &[("text", text)])
        .ok()
        .map(String::from)
}

/// Message prefilled by the "WhatsApp us" button on a listing page
pub fn listing_enquiry_text(listing: &Listing) -> String {
    format!(
        "Hi, I'm interested in the {} {} {} ({})",
        listing.year,
        listing.make,
        listing.model,
        format_price(listing.price)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_price(0), "KES 0");
        assert_eq!(format_price(999), "KES 999");
        assert_eq!(format_price(1_000), "KES 1,000");
        assert_eq!(format_price(1_250_000), "KES 1,250,000");
        assert_eq!(format_price(12_000_000), "KES 12,000,000");
    }

    #[test]
    fn whatsapp_link_encodes_text() {
        let link = whatsapp_link("+254 700 000 000", "Hi there").unwrap();
        assert_eq!(link, "https://wa.me/254700000000?text=Hi+there");
        assert_eq!(whatsapp_link("n/a", "Hi"), None);
    }

    #[test]
    fn enquiry_text_names_the_car() {
        let listing: Listing = serde_json::from_value(serde_json::json!({
            "id": "x", "make": "Toyota", "model": "Prado", "year": 2018, "price": 6500000,
            "mileage": 0, "transmission": "Automatic", "fuelType": "Diesel",
            "condition": "Foreign Used", "status": "Available", "images": [],
            "videoUrl": null, "description": "", "color": "", "engineSize": "",
            "features": [], "isFeatured": false, "createdAt": 0
        }))
        .unwrap();

        assert_eq!(
            listing_enquiry_text(&listing),
            "Hi, I'm interested in the 2018 Toyota Prado (KES 6,500,000)"
        );
    }
}
