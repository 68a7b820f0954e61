use serde::{Deserialize, Serialize};

use retailops_core::validate::{
    Validate, optional_non_empty, require_non_empty, require_non_negative,
};
use retailops_core::{CategoryId, DomainResult, ItemId, Page, UnitId};

/// Stock-keeping item as listed per branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub code: String,
    pub name: String,
    pub unit_id: UnitId,
    pub category_id: CategoryId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
    pub purchase_price: i64,
    pub sell_price: i64,
    #[serde(default)]
    pub stock: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_stock: Option<i64>,
}

retailops_core::impl_entity!(Item, ItemId);

impl Item {
    pub fn is_low_stock(&self) -> bool {
        self.min_stock.is_some_and(|min| self.stock <= min)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_id: Option<UnitId>,
    #[serde(flatten)]
    pub page: Page,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItem {
    pub code: String,
    pub name: String,
    pub unit_id: UnitId,
    pub category_id: CategoryId,
    pub purchase_price: i64,
    pub sell_price: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_stock: Option<i64>,
}

impl Validate for CreateItem {
    fn validate(&self) -> DomainResult<()> {
        require_non_empty("code", &self.code)?;
        require_non_empty("name", &self.name)?;
        require_non_negative("purchasePrice", self.purchase_price)?;
        require_non_negative("sellPrice", self.sell_price)?;
        if let Some(min) = self.min_stock {
            require_non_negative("minStock", min)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_id: Option<UnitId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_price: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sell_price: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_stock: Option<i64>,
}

impl Validate for UpdateItem {
    fn validate(&self) -> DomainResult<()> {
        optional_non_empty("code", self.code.as_deref())?;
        optional_non_empty("name", self.name.as_deref())?;
        for (field, value) in [
            ("purchasePrice", self.purchase_price),
            ("sellPrice", self.sell_price),
            ("minStock", self.min_stock),
        ] {
            if let Some(v) = value {
                require_non_negative(field, v)?;
            }
        }
        Ok(())
    }
}

/// Item as displayed on the sales floor (front stock) of a branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrontStockItem {
    pub item_id: ItemId,
    pub code: String,
    pub name: String,
    pub stock: i64,
    pub sell_price: i64,
}

impl retailops_core::Entity for FrontStockItem {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.item_id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrontStockFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(flatten)]
    pub page: Page,
}

retailops_core::impl_page_filter!(ItemFilter, FrontStockFilter);
