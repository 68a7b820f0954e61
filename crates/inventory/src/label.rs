use serde::{Deserialize, Serialize};

use retailops_core::ItemId;

/// Shelf/price label data for one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    pub item_id: ItemId,
    pub code: String,
    pub name: String,
    pub sell_price: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_name: Option<String>,
}
