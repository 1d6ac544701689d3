//! Mapping between stored documents and domain records.
//!
//! Stored documents are not trusted to match the domain shape: fields added
//! after a listing was written are backfilled, numbers written by loosely
//! typed clients are coerced, and timestamps in any of the shapes the store
//! has produced over time are normalized to epoch millis.

use crate::error::RepositoryError;
use crate::models::{Inquiry, Listing, ListingRef, ListingStatus, NewInquiry, NewListing};
use crate::store::{Document, Fields};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};
use tracing::warn;

const REQUIRED_LISTING_FIELDS: [&str; 7] = [
    "make",
    "model",
    "year",
    "price",
    "transmission",
    "fuelType",
    "condition",
];

fn decode_error(id: &str, reason: impl Into<String>) -> RepositoryError {
    RepositoryError::Decode {
        id: id.to_string(),
        reason: reason.into(),
    }
}

fn is_absent(fields: &Fields, key: &str) -> bool {
    fields.get(key).map_or(true, Value::is_null)
}

fn backfill(fields: &mut Fields, key: &str, default: Value) {
    if is_absent(fields, key) {
        fields.insert(key.to_string(), default);
    }
}

/// Integers, floats (rounded) and numeric strings
fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(round_float)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(round_float))
        }
        _ => None,
    }
}

fn round_float(f: f64) -> Option<i64> {
    let rounded = f.round();
    (rounded.is_finite() && rounded.abs() < i64::MAX as f64).then_some(rounded as i64)
}

fn is_fractional(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.as_i64().is_none() && n.as_f64().map_or(false, |f| f.fract() != 0.0),
        Value::String(s) => s.trim().parse::<f64>().map_or(false, |f| f.fract() != 0.0),
        _ => false,
    }
}

fn coerce_field(fields: &mut Fields, id: &str, key: &str, non_negative: bool) -> Result<(), RepositoryError> {
    let Some(value) = fields.get(key) else {
        return Ok(());
    };
    let n = coerce_integer(value)
        .ok_or_else(|| decode_error(id, format!("`{}` is not an integer: {}", key, value)))?;
    if non_negative && n < 0 {
        return Err(decode_error(id, format!("`{}` is negative", key)));
    }
    if is_fractional(value) {
        warn!("Listing {} has fractional `{}` {}, rounded to {}", id, key, value, n);
    }
    fields.insert(key.to_string(), json!(n));
    Ok(())
}

/// Epoch millis from an integer, a float, an RFC 3339 string or a
/// `{seconds, nanos}` object
pub fn normalize_timestamp(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(round_float)),
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.timestamp_millis())
            .or_else(|| s.trim().parse::<i64>().ok()),
        Value::Object(map) => {
            let seconds = map.get("seconds").or_else(|| map.get("_seconds")).and_then(coerce_integer)?;
            let nanos = map
                .get("nanos")
                .or_else(|| map.get("nanoseconds"))
                .or_else(|| map.get("_nanoseconds"))
                .and_then(coerce_integer)
                .unwrap_or(0);
            seconds.checked_mul(1000)?.checked_add(nanos / 1_000_000)
        }
        _ => None,
    }
}

/// Decode and validate a stored listing. `now` is used when the stored
/// creation time is missing or unreadable.
pub fn decode_listing(doc: Document, now: i64) -> Result<Listing, RepositoryError> {
    let Document { id, mut fields } = doc;

    if id.is_empty() {
        return Err(decode_error(&id, "empty id"));
    }
    if let Some(missing) = REQUIRED_LISTING_FIELDS.iter().find(|key| is_absent(&fields, key)) {
        return Err(decode_error(&id, format!("missing field `{}`", missing)));
    }

    coerce_field(&mut fields, &id, "year", false)?;
    coerce_field(&mut fields, &id, "price", true)?;
    backfill(&mut fields, "mileage", json!(0));
    coerce_field(&mut fields, &id, "mileage", true)?;

    let created_at = fields
        .get("createdAt")
        .and_then(normalize_timestamp)
        .unwrap_or(now);
    fields.insert("createdAt".to_string(), json!(created_at));

    let has_video = matches!(fields.get("videoUrl"), Some(Value::String(s)) if !s.trim().is_empty());
    if !has_video {
        fields.insert("videoUrl".to_string(), Value::Null);
    }

    backfill(&mut fields, "images", json!([]));
    backfill(&mut fields, "features", json!([]));
    backfill(&mut fields, "isFeatured", json!(false));
    backfill(&mut fields, "status", json!(ListingStatus::Available));
    backfill(&mut fields, "description", json!(""));
    backfill(&mut fields, "color", json!(""));
    backfill(&mut fields, "engineSize", json!(""));

    fields.insert("id".to_string(), json!(id));

    serde_json::from_value(Value::Object(fields)).map_err(|e| decode_error(&id, e.to_string()))
}

/// Fields written for a newly created listing
pub fn encode_new_listing(
    listing: &NewListing,
    images: Vec<String>,
    video_url: Option<String>,
    created_at: i64,
) -> Result<Fields, RepositoryError> {
    let mut fields = match serde_json::to_value(listing)? {
        Value::Object(fields) => fields,
        other => return Err(decode_error("", format!("listing encoded as {}", other))),
    };

    fields.insert(
        "status".to_string(),
        json!(listing.status.unwrap_or_default()),
    );
    fields.insert("images".to_string(), json!(images));
    fields.insert("videoUrl".to_string(), json!(video_url));
    fields.insert("createdAt".to_string(), json!(created_at));

    Ok(fields)
}

fn string_field(fields: &Fields, key: &str) -> String {
    fields
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

pub fn decode_inquiry(doc: Document, now: DateTime<Utc>) -> Inquiry {
    let fields = &doc.fields;

    let listing = fields
        .get("carId")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .map(|id| ListingRef {
            id: id.to_string(),
            name: string_field(fields, "carName"),
        });

    let submitted_at = fields
        .get("date")
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|| {
            fields
                .get("createdAt")
                .and_then(normalize_timestamp)
                .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
        })
        .unwrap_or(now);

    Inquiry {
        id: doc.id.clone(),
        listing,
        name: string_field(fields, "name"),
        phone: string_field(fields, "phone"),
        message: string_field(fields, "message"),
        submitted_at,
    }
}

pub fn encode_new_inquiry(inquiry: &NewInquiry, submitted_at: DateTime<Utc>) -> Fields {
    let mut fields = Fields::new();
    if let Some(listing) = &inquiry.listing {
        fields.insert("carId".to_string(), json!(listing.id));
        fields.insert("carName".to_string(), json!(listing.name));
    }
    fields.insert("name".to_string(), json!(inquiry.name));
    fields.insert("phone".to_string(), json!(inquiry.phone));
    fields.insert("message".to_string(), json!(inquiry.message));
    fields.insert("date".to_string(), json!(submitted_at.to_rfc3339()));
    fields.insert("createdAt".to_string(), json!(submitted_at.timestamp_millis()));
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Condition, FuelType, Transmission};

    fn doc(id: &str, value: Value) -> Document {
        Document {
            id: id.to_string(),
            fields: value.as_object().cloned().unwrap(),
        }
    }

    fn minimal() -> Value {
        json!({
            "make": "Toyota",
            "model": "Prado",
            "year": 2018,
            "price": 6_500_000,
            "transmission": "Automatic",
            "fuelType": "Diesel",
            "condition": "Foreign Used",
        })
    }

    #[test]
    fn backfills_fields_missing_from_older_documents() {
        let listing = decode_listing(doc("a1", minimal()), 42).unwrap();

        assert_eq!(listing.id, "a1");
        assert_eq!(listing.condition, Condition::ForeignUsed);
        assert_eq!(listing.fuel_type, FuelType::Diesel);
        assert_eq!(listing.transmission, Transmission::Automatic);
        assert_eq!(listing.status, ListingStatus::Available);
        assert!(listing.images.is_empty());
        assert!(listing.features.is_empty());
        assert_eq!(listing.video_url, None);
        assert_eq!(listing.mileage, 0);
        assert_eq!(listing.created_at, 42);
    }

    #[test]
    fn normalizes_store_timestamps() {
        assert_eq!(normalize_timestamp(&json!(1_700_000_000_000i64)), Some(1_700_000_000_000));
        assert_eq!(
            normalize_timestamp(&json!("2024-05-01T10:00:00Z")),
            Some(1_714_557_600_000)
        );
        assert_eq!(
            normalize_timestamp(&json!({ "seconds": 1_714_557_600, "nanos": 500_000_000 })),
            Some(1_714_557_600_500)
        );
        assert_eq!(normalize_timestamp(&json!(true)), None);
    }

    #[test]
    fn coerces_loosely_typed_numbers() {
        let mut value = minimal();
        value["price"] = json!(1_250_000.0);
        value["year"] = json!("2015");
        value["mileage"] = json!(85000.0);

        let listing = decode_listing(doc("a2", value), 0).unwrap();
        assert_eq!(listing.price, 1_250_000);
        assert_eq!(listing.year, 2015);
        assert_eq!(listing.mileage, 85_000);
    }

    #[test]
    fn out_of_range_timestamps_fall_back_to_read_time() {
        let huge = json!({ "seconds": i64::MAX / 10, "nanos": 0 });
        assert_eq!(normalize_timestamp(&huge), None);

        let mut value = minimal();
        value["createdAt"] = huge;
        let listing = decode_listing(doc("a4", value), 99).unwrap();
        assert_eq!(listing.created_at, 99);
    }

    #[test]
    fn fractional_numbers_are_rounded() {
        let mut value = minimal();
        value["price"] = json!(1_250_000.5);
        value["mileage"] = json!("85000.4");

        let listing = decode_listing(doc("a5", value), 0).unwrap();
        assert_eq!(listing.price, 1_250_001);
        assert_eq!(listing.mileage, 85_000);
    }

    #[test]
    fn empty_video_url_reads_as_none() {
        let mut value = minimal();
        value["videoUrl"] = json!("");
        let listing = decode_listing(doc("a3", value), 0).unwrap();
        assert_eq!(listing.video_url, None);
    }

    #[test]
    fn rejects_malformed_documents() {
        let mut no_make = minimal();
        no_make.as_object_mut().unwrap().remove("make");
        assert!(decode_listing(doc("b1", no_make), 0).is_err());

        let mut negative = minimal();
        negative["price"] = json!(-5);
        assert!(decode_listing(doc("b2", negative), 0).is_err());

        let mut unknown = minimal();
        unknown["condition"] = json!("Salvage");
        assert!(decode_listing(doc("b3", unknown), 0).is_err());

        assert!(decode_listing(doc("", minimal()), 0).is_err());
    }

    #[test]
    fn inquiry_keeps_listing_snapshot() {
        let inquiry = decode_inquiry(
            doc(
                "q1",
                json!({
                    "carId": "a1",
                    "carName": "Toyota Prado",
                    "name": "Wanjiru",
                    "phone": "0712345678",
                    "message": "Is it still available?",
                    "date": "2024-05-01T10:00:00Z",
                }),
            ),
            Utc::now(),
        );

        let listing = inquiry.listing.unwrap();
        assert_eq!(listing.id, "a1");
        assert_eq!(listing.name, "Toyota Prado");
        assert_eq!(inquiry.submitted_at.timestamp_millis(), 1_714_557_600_000);
    }

    #[test]
    fn general_inquiry_has_no_listing() {
        let inquiry = decode_inquiry(
            doc("q2", json!({ "name": "Otieno", "phone": "0700", "message": "Hello" })),
            Utc::now(),
        );
        assert!(inquiry.listing.is_none());
    }
}
