//! Assembly of raw content-source records into presentation-ready catalog
//! types.
//!
//! Records arrive either flat or wrapped in an `attributes` envelope; both
//! shapes are accepted transparently. Assembly is a pure mapping stage over
//! already-fetched JSON: no network calls, and media fields are delegated to
//! [`resolve_media_url`].

use serde::Serialize;
use serde_json::Value;

use crate::media::resolve_media_url;

const DEFAULT_NAME: &str = "Unnamed Product";
const DEFAULT_PRICE: &str = "Price not available";
const DEFAULT_CATEGORY_NAME: &str = "Category";
const DEFAULT_CATEGORY_DESCRIPTION: &str = "Discover our collection";

/// Badge flags shown on product cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ItemTags {
    pub is_new: bool,
    pub is_sale: bool,
}

/// A normalized, presentation-ready catalog record.
///
/// Constructed fresh on every fetch and owned by the response that carries
/// it; never cached or mutated after assembly. `name`/`price`/`description`
/// are always strings (placeholder defaults, never null) so presentation
/// layers need no null checks on them.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogItem {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub price: String,
    pub description: String,
    pub primary_image_url: Option<String>,
    pub secondary_image_url: Option<String>,
    pub tags: ItemTags,
    pub colors: Vec<String>,
    pub category: String,
    pub variant: String,
}

/// A product with the extra fields the detail view needs.
#[derive(Debug, Clone, Serialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub item: CatalogItem,
    /// Main image followed by every resolvable gallery image, in order.
    pub images: Vec<String>,
    pub sizes: Vec<String>,
    pub sku: String,
    pub features: Vec<String>,
}

/// A browsable category tile.
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub image_url: String,
}

/// A promotional banner slide.
#[derive(Debug, Clone, Serialize)]
pub struct Banner {
    pub id: i64,
    pub image_url: Option<String>,
}

/// Assembles one raw product record into a [`CatalogItem`].
#[must_use]
pub fn assemble_product(record: &Value, base_url: &str) -> CatalogItem {
    let fields = record_fields(record);

    let primary_image_url = fields
        .get("image")
        .and_then(|image| resolve_media_url(image, base_url));
    // Hover-swap degrades to "no visible change" when no distinct gallery
    // image resolves.
    let secondary_image_url = fields
        .get("gallery")
        .and_then(|gallery| resolve_media_url(gallery, base_url))
        .or_else(|| primary_image_url.clone());

    CatalogItem {
        id: record_id(record),
        name: string_field(fields, "name", DEFAULT_NAME),
        slug: string_field(fields, "slug", ""),
        price: price_field(fields),
        description: string_field(fields, "description", ""),
        primary_image_url,
        secondary_image_url,
        tags: ItemTags {
            is_new: bool_field(fields, "isNew"),
            is_sale: bool_field(fields, "isSale"),
        },
        colors: string_or_list(fields.get("colors")),
        category: string_field(fields, "category", ""),
        variant: string_field(fields, "type", ""),
    }
}

/// Assembles every record in a collection into catalog items.
#[must_use]
pub fn assemble_products(records: &[Value], base_url: &str) -> Vec<CatalogItem> {
    records
        .iter()
        .map(|record| assemble_product(record, base_url))
        .collect()
}

/// Assembles one raw product record into a [`ProductDetail`].
///
/// `images` starts with the main image and appends each resolvable gallery
/// entry; the gallery may be a direct array or a `data`-wrapped array.
#[must_use]
pub fn assemble_product_detail(record: &Value, base_url: &str) -> ProductDetail {
    let fields = record_fields(record);
    let item = assemble_product(record, base_url);

    let mut images = Vec::new();
    if let Some(main) = item.primary_image_url.clone() {
        images.push(main);
    }
    images.extend(gallery_image_urls(fields, base_url));

    ProductDetail {
        images,
        sizes: string_or_list(fields.get("sizes")),
        sku: string_field(fields, "sku", ""),
        features: string_or_list(fields.get("features")),
        item,
    }
}

/// Assembles one raw category record.
///
/// Returns `None` for records explicitly flagged inactive and for records
/// whose image does not resolve — category tiles are image-led, so an entry
/// without a displayable image is dropped from listings.
#[must_use]
pub fn assemble_category(record: &Value, base_url: &str) -> Option<Category> {
    let fields = record_fields(record);
    if !is_active(fields) {
        return None;
    }

    let image_url = fields
        .get("image")
        .and_then(|image| resolve_media_url(image, base_url))?;

    Some(Category {
        id: record_id(record),
        name: string_field(fields, "name", DEFAULT_CATEGORY_NAME),
        slug: string_field(fields, "slug", ""),
        description: string_field(fields, "description", DEFAULT_CATEGORY_DESCRIPTION),
        image_url,
    })
}

/// Assembles a category collection, dropping inactive and imageless entries.
#[must_use]
pub fn assemble_categories(records: &[Value], base_url: &str) -> Vec<Category> {
    records
        .iter()
        .filter_map(|record| assemble_category(record, base_url))
        .collect()
}

/// Assembles one raw banner record, or `None` when explicitly inactive.
#[must_use]
pub fn assemble_banner(record: &Value, base_url: &str) -> Option<Banner> {
    let fields = record_fields(record);
    if !is_active(fields) {
        return None;
    }

    Some(Banner {
        id: record_id(record),
        image_url: fields
            .get("image")
            .and_then(|image| resolve_media_url(image, base_url)),
    })
}

/// Assembles a banner collection, dropping inactive entries.
#[must_use]
pub fn assemble_banners(records: &[Value], base_url: &str) -> Vec<Banner> {
    records
        .iter()
        .filter_map(|record| assemble_banner(record, base_url))
        .collect()
}

/// Unwraps the `attributes` envelope when present, otherwise the record
/// itself.
fn record_fields(record: &Value) -> &Value {
    record
        .get("attributes")
        .filter(|attributes| attributes.is_object())
        .unwrap_or(record)
}

/// The record id always lives at the top level, outside any envelope.
fn record_id(record: &Value) -> i64 {
    record.get("id").and_then(Value::as_i64).unwrap_or(0)
}

/// A record is active unless it carries an explicit `isActive: false`.
fn is_active(fields: &Value) -> bool {
    fields.get("isActive").and_then(Value::as_bool) != Some(false)
}

fn string_field(fields: &Value, key: &str, default: &str) -> String {
    fields
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or(default)
        .to_string()
}

fn bool_field(fields: &Value, key: &str) -> bool {
    fields.get(key).and_then(Value::as_bool).unwrap_or(false)
}

/// Prices arrive as strings or bare JSON numbers depending on the content
/// model revision; both render to their display string.
fn price_field(fields: &Value) -> String {
    match fields.get("price") {
        Some(Value::String(price)) if !price.is_empty() => price.clone(),
        Some(Value::Number(price)) => price.to_string(),
        _ => DEFAULT_PRICE.to_string(),
    }
}

/// Total list normalization: array kept (string entries only), non-empty
/// scalar wrapped in a singleton, anything else empty.
fn string_or_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(entries)) => entries
            .iter()
            .filter_map(Value::as_str)
            .map(ToOwned::to_owned)
            .collect(),
        Some(Value::String(scalar)) if !scalar.is_empty() => vec![scalar.clone()],
        _ => Vec::new(),
    }
}

/// Resolves every gallery entry to a URL, accepting both the direct-array
/// and the `data`-wrapped gallery shapes.
fn gallery_image_urls(fields: &Value, base_url: &str) -> Vec<String> {
    let Some(gallery) = fields.get("gallery") else {
        return Vec::new();
    };

    let entries = match gallery {
        Value::Array(entries) => entries.as_slice(),
        Value::Object(_) => match gallery.get("data").and_then(Value::as_array) {
            Some(entries) => entries.as_slice(),
            None => return Vec::new(),
        },
        _ => return Vec::new(),
    };

    entries
        .iter()
        .filter_map(|entry| resolve_media_url(entry, base_url))
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    const BASE: &str = "https://cms.example.com";

    fn enveloped_product() -> Value {
        json!({
            "id": 7,
            "attributes": {
                "name": "Schiffli Kurta",
                "slug": "schiffli-kurta",
                "price": "PKR 4,990",
                "description": "Embroidered front panel.",
                "colors": ["Black", "White"],
                "isNew": true,
                "category": "men",
                "type": "stitched",
                "image": { "data": { "attributes": { "url": "/uploads/kurta.jpg" } } },
                "gallery": { "data": [
                    { "attributes": { "url": "/uploads/kurta-back.jpg" } },
                    { "attributes": { "url": "/uploads/kurta-detail.jpg" } }
                ] }
            }
        })
    }

    // -----------------------------------------------------------------------
    // assemble_product
    // -----------------------------------------------------------------------

    #[test]
    fn assemble_product_accepts_attributes_envelope() {
        let item = assemble_product(&enveloped_product(), BASE);
        assert_eq!(item.id, 7);
        assert_eq!(item.name, "Schiffli Kurta");
        assert_eq!(item.category, "men");
        assert_eq!(item.variant, "stitched");
        assert!(item.tags.is_new);
        assert!(!item.tags.is_sale);
        assert_eq!(
            item.primary_image_url.as_deref(),
            Some("https://cms.example.com/uploads/kurta.jpg")
        );
    }

    #[test]
    fn assemble_product_accepts_flat_record() {
        let record = json!({
            "id": 3,
            "name": "Plain Tee",
            "price": "950",
            "image": { "url": "/uploads/tee.png" }
        });
        let item = assemble_product(&record, BASE);
        assert_eq!(item.id, 3);
        assert_eq!(item.name, "Plain Tee");
        assert_eq!(
            item.primary_image_url.as_deref(),
            Some("https://cms.example.com/uploads/tee.png")
        );
    }

    #[test]
    fn assemble_product_applies_placeholder_defaults() {
        let item = assemble_product(&json!({ "id": 1 }), BASE);
        assert_eq!(item.name, "Unnamed Product");
        assert_eq!(item.price, "Price not available");
        assert_eq!(item.description, "");
        assert_eq!(item.slug, "");
        assert!(item.primary_image_url.is_none());
        assert!(item.colors.is_empty());
    }

    #[test]
    fn assemble_product_renders_numeric_price() {
        let item = assemble_product(&json!({ "id": 1, "price": 1250 }), BASE);
        assert_eq!(item.price, "1250");
    }

    #[test]
    fn secondary_image_comes_from_first_gallery_entry() {
        let item = assemble_product(&enveloped_product(), BASE);
        assert_eq!(
            item.secondary_image_url.as_deref(),
            Some("https://cms.example.com/uploads/kurta-back.jpg")
        );
    }

    #[test]
    fn secondary_image_falls_back_to_primary_without_gallery() {
        let record = json!({ "id": 2, "image": { "url": "/uploads/only.png" } });
        let item = assemble_product(&record, BASE);
        assert_eq!(item.secondary_image_url, item.primary_image_url);
        assert!(item.secondary_image_url.is_some());
    }

    #[test]
    fn colors_scalar_wraps_into_singleton() {
        let item = assemble_product(&json!({ "id": 1, "colors": "Navy" }), BASE);
        assert_eq!(item.colors, vec!["Navy".to_string()]);
    }

    #[test]
    fn colors_array_is_kept_in_order() {
        let item = assemble_product(&json!({ "id": 1, "colors": ["Red", "Blue"] }), BASE);
        assert_eq!(item.colors, vec!["Red".to_string(), "Blue".to_string()]);
    }

    #[test]
    fn colors_absent_or_empty_yield_empty_list() {
        assert!(assemble_product(&json!({ "id": 1 }), BASE).colors.is_empty());
        assert!(assemble_product(&json!({ "id": 1, "colors": "" }), BASE)
            .colors
            .is_empty());
        assert!(assemble_product(&json!({ "id": 1, "colors": null }), BASE)
            .colors
            .is_empty());
    }

    // -----------------------------------------------------------------------
    // assemble_product_detail
    // -----------------------------------------------------------------------

    #[test]
    fn detail_images_start_with_main_then_gallery() {
        let detail = assemble_product_detail(&enveloped_product(), BASE);
        assert_eq!(
            detail.images,
            vec![
                "https://cms.example.com/uploads/kurta.jpg",
                "https://cms.example.com/uploads/kurta-back.jpg",
                "https://cms.example.com/uploads/kurta-detail.jpg",
            ]
        );
    }

    #[test]
    fn detail_handles_direct_array_gallery() {
        let record = json!({
            "id": 4,
            "image": { "url": "/uploads/main.png" },
            "gallery": [{ "url": "/uploads/g1.png" }, { "url": "/uploads/g2.png" }]
        });
        let detail = assemble_product_detail(&record, BASE);
        assert_eq!(detail.images.len(), 3);
        assert_eq!(detail.images[1], "https://cms.example.com/uploads/g1.png");
    }

    #[test]
    fn detail_skips_unresolvable_gallery_entries() {
        let record = json!({
            "id": 4,
            "gallery": [{ "caption": "no url" }, { "url": "/uploads/ok.png" }]
        });
        let detail = assemble_product_detail(&record, BASE);
        assert_eq!(
            detail.images,
            vec!["https://cms.example.com/uploads/ok.png"]
        );
    }

    #[test]
    fn detail_normalizes_sizes_and_defaults_sku() {
        let record = json!({ "id": 5, "sizes": "M" });
        let detail = assemble_product_detail(&record, BASE);
        assert_eq!(detail.sizes, vec!["M".to_string()]);
        assert_eq!(detail.sku, "");
        assert!(detail.features.is_empty());
    }

    // -----------------------------------------------------------------------
    // assemble_category / assemble_banner
    // -----------------------------------------------------------------------

    #[test]
    fn category_defaults_name_and_description() {
        let record = json!({ "id": 9, "image": { "url": "/uploads/cat.png" } });
        let category = assemble_category(&record, BASE).expect("category should assemble");
        assert_eq!(category.name, "Category");
        assert_eq!(category.description, "Discover our collection");
        assert_eq!(
            category.image_url,
            "https://cms.example.com/uploads/cat.png"
        );
    }

    #[test]
    fn category_without_resolvable_image_is_dropped() {
        let record = json!({ "id": 9, "name": "Men" });
        assert!(assemble_category(&record, BASE).is_none());
    }

    #[test]
    fn inactive_category_is_dropped() {
        let record = json!({ "id": 9, "isActive": false, "image": { "url": "/uploads/c.png" } });
        assert!(assemble_category(&record, BASE).is_none());
    }

    #[test]
    fn missing_is_active_flag_means_active() {
        let records = vec![
            json!({ "id": 1, "image": { "url": "/uploads/a.png" } }),
            json!({ "id": 2, "isActive": true, "image": { "url": "/uploads/b.png" } }),
            json!({ "id": 3, "isActive": false, "image": { "url": "/uploads/c.png" } }),
        ];
        let categories = assemble_categories(&records, BASE);
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].id, 1);
        assert_eq!(categories[1].id, 2);
    }

    #[test]
    fn banner_resolves_enveloped_image() {
        let record = json!({
            "id": 11,
            "attributes": {
                "image": { "data": { "attributes": { "url": "/uploads/hero.jpg" } } }
            }
        });
        let banner = assemble_banner(&record, BASE).expect("banner should assemble");
        assert_eq!(banner.id, 11);
        assert_eq!(
            banner.image_url.as_deref(),
            Some("https://cms.example.com/uploads/hero.jpg")
        );
    }

    #[test]
    fn inactive_banner_is_dropped_but_imageless_banner_is_kept() {
        let records = vec![
            json!({ "id": 1, "isActive": false, "image": { "url": "/uploads/a.png" } }),
            json!({ "id": 2 }),
        ];
        let banners = assemble_banners(&records, BASE);
        assert_eq!(banners.len(), 1);
        assert_eq!(banners[0].id, 2);
        assert!(banners[0].image_url.is_none());
    }

    #[test]
    fn assembled_name_is_always_a_string() {
        for record in [
            json!({ "id": 1 }),
            json!({ "id": 1, "name": null }),
            json!({ "id": 1, "name": 42 }),
            json!({ "id": 1, "attributes": { "name": "" } }),
        ] {
            let item = assemble_product(&record, BASE);
            assert_eq!(item.name, "Unnamed Product", "record: {record}");
        }
    }
}
