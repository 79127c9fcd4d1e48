//! Customer order models and the order lines fed to the allocation engine

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Where an order came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OrderSource {
    Shopify,
    Manual,
}

/// Order status within a roast session
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Imported,
    Included,
    Skipped,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Imported => "imported",
            OrderStatus::Included => "included",
            OrderStatus::Skipped => "skipped",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "imported" => Some(OrderStatus::Imported),
            "included" => Some(OrderStatus::Included),
            "skipped" => Some(OrderStatus::Skipped),
            _ => None,
        }
    }
}

/// A customer order with its packaged line items
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub source: OrderSource,
    pub source_order_id: String,
    pub customer_name: String,
    #[serde(default)]
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
}

impl Order {
    pub fn is_included(&self) -> bool {
        self.status == OrderStatus::Included
    }

    /// Starting a session pulls in every order not yet assigned to one
    pub fn attach_to_session(&mut self) {
        if self.status == OrderStatus::Imported {
            self.status = OrderStatus::Included;
        }
    }

    /// Toggle between skipped and included
    pub fn set_skipped(&mut self, skipped: bool) {
        self.status = if skipped {
            OrderStatus::Skipped
        } else {
            OrderStatus::Included
        };
    }
}

/// A packaged product on an order, with its catalogue mapping
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub variant_id: String,
    pub product_name: String,
    pub size_g: u32,
    pub grind_type: String,
    pub quantity: u32,
    pub mapped_coffee_id: Option<Uuid>,
    pub mapped_blend_id: Option<Uuid>,
    #[serde(default)]
    pub mapped_is_blend: bool,
}

impl OrderItem {
    /// Bagging label, e.g. `House Espresso 1000g Espresso`
    pub fn sku(&self) -> String {
        format!("{} {}g {}", self.product_name, self.size_g, self.grind_type)
    }

    /// Roasted grams of finished product on this item
    pub fn roasted_g(&self) -> f64 {
        f64::from(self.size_g) * f64::from(self.quantity)
    }
}

/// Maps a marketplace variant onto a coffee or a blend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
pub struct VariantMapping {
    #[validate(length(min = 1, message = "Variant ID is required"))]
    pub variant_id: String,
    pub title: String,
    pub is_blend: bool,
    pub coffee_id: Option<Uuid>,
    pub blend_id: Option<Uuid>,
}

/// What an order line resolves to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum OrderTarget {
    Coffee(Uuid),
    Blend(Uuid),
    Unmapped,
}

impl OrderTarget {
    /// Resolve the flag-based mapping shape used by stored order items.
    ///
    /// The blend id is only authoritative when `is_blend` is set; otherwise a
    /// coffee id, if any, wins.
    pub fn from_mapping(is_blend: bool, coffee_id: Option<Uuid>, blend_id: Option<Uuid>) -> Self {
        match (is_blend, blend_id, coffee_id) {
            (true, Some(blend_id), _) => OrderTarget::Blend(blend_id),
            (_, _, Some(coffee_id)) => OrderTarget::Coffee(coffee_id),
            _ => OrderTarget::Unmapped,
        }
    }
}

/// One unit of demand for the allocation engine
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct OrderLine {
    pub target: OrderTarget,
    pub size_g: u32,
    pub quantity: u32,
}

impl OrderLine {
    pub fn coffee(coffee_id: Uuid, size_g: u32, quantity: u32) -> Self {
        Self {
            target: OrderTarget::Coffee(coffee_id),
            size_g,
            quantity,
        }
    }

    pub fn blend(blend_id: Uuid, size_g: u32, quantity: u32) -> Self {
        Self {
            target: OrderTarget::Blend(blend_id),
            size_g,
            quantity,
        }
    }

    /// Grams of finished product demanded by this line
    pub fn base_needed(&self) -> f64 {
        f64::from(self.size_g) * f64::from(self.quantity)
    }
}

impl From<&OrderItem> for OrderLine {
    fn from(item: &OrderItem) -> Self {
        Self {
            target: OrderTarget::from_mapping(
                item.mapped_is_blend,
                item.mapped_coffee_id,
                item.mapped_blend_id,
            ),
            size_g: item.size_g,
            quantity: item.quantity,
        }
    }
}

/// Flatten the included orders into engine order lines, preserving arrival order
pub fn included_order_lines(orders: &[Order]) -> Vec<OrderLine> {
    orders
        .iter()
        .filter(|order| order.is_included())
        .flat_map(|order| order.items.iter().map(OrderLine::from))
        .collect()
}
