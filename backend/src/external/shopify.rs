//! Shopify order payloads
//!
//! Converts Shopify Admin API orders into Roast Mate orders. Package size and
//! grind are parsed from the free-text product title and line item properties.

use serde::{Deserialize, Serialize};

use crate::config::ImportConfig;

/// Title marker for the large bag size
const LARGE_BAG_MARKER: &str = "1kg";
const LARGE_BAG_SIZE_G: u32 = 1000;

/// Shopify order as returned by `/admin/api/<version>/orders.json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopifyOrder {
    pub id: u64,
    pub name: String,
    pub customer: Option<ShopifyCustomer>,
    pub line_items: Vec<ShopifyLineItem>,
    pub cancelled_at: Option<String>,
    pub closed_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopifyCustomer {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopifyLineItem {
    pub id: u64,
    pub variant_id: Option<u64>,
    pub name: String,
    pub quantity: u32,
    #[serde(default)]
    pub properties: Vec<ShopifyProperty>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopifyProperty {
    pub name: String,
    pub value: String,
}

/// A marketplace order reduced to what planning needs
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedOrder {
    pub source_order_id: String,
    pub customer_name: String,
    pub items: Vec<ImportedItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportedItem {
    pub variant_id: String,
    pub product_name: String,
    pub size_g: u32,
    pub grind_type: String,
    pub quantity: u32,
}

impl ShopifyOrder {
    /// Cancelled or closed orders are not roasted for
    pub fn is_open(&self) -> bool {
        self.cancelled_at.is_none() && self.closed_at.is_none()
    }

    /// `First Last`, falling back to the order name (e.g. `#1001`)
    pub fn customer_name(&self) -> String {
        let full = self
            .customer
            .as_ref()
            .map(|c| {
                format!(
                    "{} {}",
                    c.first_name.as_deref().unwrap_or(""),
                    c.last_name.as_deref().unwrap_or("")
                )
            })
            .unwrap_or_default();
        let full = full.trim();
        if full.is_empty() {
            self.name.clone()
        } else {
            full.to_string()
        }
    }

    pub fn to_imported(&self, defaults: &ImportConfig) -> ImportedOrder {
        ImportedOrder {
            source_order_id: self.id.to_string(),
            customer_name: self.customer_name(),
            items: self
                .line_items
                .iter()
                .map(|line| ImportedItem {
                    variant_id: line.variant_id.unwrap_or(line.id).to_string(),
                    product_name: line.name.clone(),
                    size_g: parse_size(&line.name, defaults.default_size_g),
                    grind_type: parse_grind(&line.properties, &defaults.default_grind),
                    quantity: line.quantity,
                })
                .collect(),
        }
    }
}

/// Bag size in grams from a product title
pub fn parse_size(title: &str, default_size_g: u32) -> u32 {
    if title.to_lowercase().contains(LARGE_BAG_MARKER) {
        LARGE_BAG_SIZE_G
    } else {
        default_size_g
    }
}

/// Grind from the first property whose name mentions grind
pub fn parse_grind(properties: &[ShopifyProperty], default_grind: &str) -> String {
    properties
        .iter()
        .find(|p| p.name.to_lowercase().contains("grind"))
        .map(|p| p.value.as_str())
        .filter(|v| !v.is_empty())
        .unwrap_or(default_grind)
        .to_string()
}
