//! Fixed in-memory order and FAQ stores

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Default number of FAQ hits returned by a search
pub const DEFAULT_TOP_K: usize = 3;

/// An order record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub order_id: String,
    pub status: String,
    pub eta: String,
    pub items: u32,
    pub total: f64,
}

impl OrderRecord {
    fn new(order_id: &str, status: &str, eta: &str, items: u32, total: f64) -> Self {
        Self {
            order_id: order_id.to_string(),
            status: status.to_string(),
            eta: eta.to_string(),
            items,
            total,
        }
    }
}

/// Result of an order lookup: the record, or a marker naming the missing id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OrderLookup {
    Found(OrderRecord),
    NotFound { error: String, order_id: String },
}

impl OrderLookup {
    pub fn is_found(&self) -> bool {
        matches!(self, OrderLookup::Found(_))
    }
}

/// A FAQ entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub title: String,
    pub snippet: String,
}

impl FaqEntry {
    fn new(title: &str, snippet: &str) -> Self {
        Self {
            title: title.to_string(),
            snippet: snippet.to_string(),
        }
    }

    fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle) || self.snippet.to_lowercase().contains(needle)
    }
}

/// Immutable backing data for both tools
#[derive(Debug, Clone)]
pub struct ToolStore {
    orders: HashMap<String, OrderRecord>,
    faq: Vec<FaqEntry>,
}

impl ToolStore {
    /// Build a store from explicit data
    pub fn new(orders: Vec<OrderRecord>, faq: Vec<FaqEntry>) -> Self {
        Self {
            orders: orders
                .into_iter()
                .map(|o| (o.order_id.clone(), o))
                .collect(),
            faq,
        }
    }

    /// The canned demo data
    pub fn seeded() -> Self {
        Self::new(
            vec![
                OrderRecord::new("12345", "Shipped", "2025-09-20", 3, 129.50),
                OrderRecord::new("55555", "Processing", "2025-09-17", 1, 19.99),
            ],
            vec![
                FaqEntry::new(
                    "Return policy",
                    "You can return items within 30 days with receipt.",
                ),
                FaqEntry::new(
                    "Shipping delays",
                    "Delays may occur during holidays or extreme weather.",
                ),
                FaqEntry::new(
                    "Refund timeline",
                    "Refunds usually take 5–7 business days to appear.",
                ),
            ],
        )
    }

    /// Look up an order by id
    pub fn order_lookup(&self, order_id: &str) -> OrderLookup {
        match self.orders.get(order_id) {
            Some(record) => OrderLookup::Found(record.clone()),
            None => OrderLookup::NotFound {
                error: "Order not found".to_string(),
                order_id: order_id.to_string(),
            },
        }
    }

    /// Case-insensitive substring search over titles and snippets, first
    /// `top_k` hits in store order
    pub fn kb_search(&self, query: &str, top_k: usize) -> Vec<FaqEntry> {
        let needle = query.to_lowercase();
        self.faq
            .iter()
            .filter(|entry| entry.matches(&needle))
            .take(top_k)
            .cloned()
            .collect()
    }

    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    pub fn faq_count(&self) -> usize {
        self.faq.len()
    }
}

impl Default for ToolStore {
    fn default() -> Self {
        Self::seeded()
    }
}
