//! Content-source access layer for the vitrine storefront.
//!
//! Wraps the headless content-management backend behind a typed client and a
//! single, shared normalization stage: every media reference goes through
//! [`resolve_media_url`] and every raw catalog record through the assemblers
//! in [`assemble`], so the variant upstream JSON shapes are handled in exactly
//! one place.

mod assemble;
mod client;
mod error;
mod media;
mod types;

pub use assemble::{
    assemble_banner, assemble_banners, assemble_categories, assemble_category, assemble_product,
    assemble_product_detail, assemble_products, Banner, CatalogItem, Category, ItemTags,
    ProductDetail,
};
pub use client::CmsClient;
pub use error::CmsError;
pub use media::resolve_media_url;
