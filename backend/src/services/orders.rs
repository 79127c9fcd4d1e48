//! Marketplace order import service

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use shared::validation::{validate_order_line_size, validate_variant_mapping};
use uuid::Uuid;
use validator::Validate;

use crate::config::ImportConfig;
use crate::error::{AppError, AppResult};
use crate::external::shopify::{ImportedOrder, ShopifyOrder};
use crate::models::{Order, OrderItem, OrderSource, OrderStatus, VariantMapping};

/// Input for a Shopify import
#[derive(Debug, Deserialize)]
pub struct ShopifyImportInput {
    pub orders: Vec<ShopifyOrder>,
    #[serde(default)]
    pub mappings: Vec<VariantMapping>,
    #[serde(default)]
    pub existing_source_order_ids: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped_closed: usize,
    pub skipped_existing: usize,
    pub unmapped_items: usize,
    pub orders: Vec<Order>,
}

/// Order import service
#[derive(Clone)]
pub struct OrderImportService {
    defaults: ImportConfig,
}

impl OrderImportService {
    pub fn new(defaults: ImportConfig) -> Self {
        Self { defaults }
    }

    /// Import Shopify orders, mapping each variant onto the catalogue
    pub fn import_shopify(&self, input: ShopifyImportInput) -> AppResult<ImportSummary> {
        for (i, mapping) in input.mappings.iter().enumerate() {
            mapping.validate()?;
            validate_variant_mapping(mapping).map_err(|message| AppError::Validation {
                field: format!("mappings[{}]", i),
                message: message.to_string(),
            })?;
        }

        let mappings: HashMap<&str, &VariantMapping> = input
            .mappings
            .iter()
            .map(|m| (m.variant_id.as_str(), m))
            .collect();
        let mut known: HashSet<String> = input.existing_source_order_ids.into_iter().collect();

        let mut summary = ImportSummary {
            imported: 0,
            skipped_closed: 0,
            skipped_existing: 0,
            unmapped_items: 0,
            orders: Vec::new(),
        };

        for shopify_order in &input.orders {
            if !shopify_order.is_open() {
                summary.skipped_closed += 1;
                continue;
            }

            let imported = shopify_order.to_imported(&self.defaults);
            if !known.insert(imported.source_order_id.clone()) {
                summary.skipped_existing += 1;
                continue;
            }

            let order = self.to_order(imported, &mappings);
            summary.unmapped_items += order
                .items
                .iter()
                .filter(|i| i.mapped_coffee_id.is_none() && i.mapped_blend_id.is_none())
                .count();
            summary.orders.push(order);
        }

        summary.imported = summary.orders.len();
        tracing::info!(
            "Imported {} Shopify orders ({} closed, {} already known, {} unmapped items)",
            summary.imported,
            summary.skipped_closed,
            summary.skipped_existing,
            summary.unmapped_items
        );

        Ok(summary)
    }

    fn to_order(
        &self,
        imported: ImportedOrder,
        mappings: &HashMap<&str, &VariantMapping>,
    ) -> Order {
        let items = imported
            .items
            .iter()
            .cloned()
            .map(|item| {
                if let Err(reason) = validate_order_line_size(item.size_g, item.quantity) {
                    tracing::warn!(
                        "Order {} item {}: {}",
                        imported.source_order_id,
                        item.variant_id,
                        reason
                    );
                }
                let mapping = mappings.get(item.variant_id.as_str());
                OrderItem {
                    mapped_coffee_id: mapping.and_then(|m| m.coffee_id),
                    mapped_blend_id: mapping.and_then(|m| m.blend_id),
                    mapped_is_blend: mapping.map(|m| m.is_blend).unwrap_or(false),
                    variant_id: item.variant_id,
                    product_name: item.product_name,
                    size_g: item.size_g,
                    grind_type: item.grind_type,
                    quantity: item.quantity,
                }
            })
            .collect();

        Order {
            id: Uuid::new_v4(),
            source: OrderSource::Shopify,
            source_order_id: imported.source_order_id,
            customer_name: imported.customer_name,
            status: OrderStatus::Imported,
            items,
        }
    }
}
