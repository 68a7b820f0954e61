//! Printable reports: sale receipts and shelf labels.

use serde_json::json;

use retailops_core::{ItemId, TransactionId};
use retailops_inventory::Label;
use retailops_sales::Receipt;

use super::QueryOutcome;
use crate::api::NO_QUERY;
use crate::client::RetailClient;
use crate::error::ClientResult;
use crate::query::{Operation, QueryKey, Resource};

pub const RECEIPT_PATH: &str = "/reports/receipt";
pub const LABELS_PATH: &str = "/reports/labels";

pub struct ReportService<'a> {
    client: &'a RetailClient,
}

impl<'a> ReportService<'a> {
    pub(crate) fn new(client: &'a RetailClient) -> Self {
        Self { client }
    }

    pub async fn receipt(&self, transaction_id: Option<&TransactionId>) -> ClientResult<QueryOutcome<Receipt>> {
        let Some(id) = transaction_id else {
            return Ok(QueryOutcome::Disabled);
        };
        let key = QueryKey::from_value(
            Resource::Receipt,
            Operation::Report,
            &json!({ "transactionId": id.to_string() }),
        );
        let path = format!("{RECEIPT_PATH}/{id}");
        let api = self.client.api();
        let receipt = self
            .client
            .query(&key, || api.get_data::<Receipt>(&path, NO_QUERY))
            .await?;
        Ok(QueryOutcome::Ready(receipt))
    }

    /// Labels for a set of items. The request order of `item_ids` does not
    /// matter and duplicates are ignored.
    pub async fn labels(&self, item_ids: &[ItemId]) -> ClientResult<QueryOutcome<Vec<Label>>> {
        if item_ids.is_empty() {
            return Ok(QueryOutcome::Disabled);
        }

        let mut ids = item_ids.to_vec();
        ids.sort();
        ids.dedup();
        let ids: Vec<String> = ids.iter().map(ToString::to_string).collect();

        let key = QueryKey::from_value(Resource::Label, Operation::Report, &json!({ "itemIds": ids }));
        let pairs = vec![("ids".to_string(), ids.join(","))];
        let api = self.client.api();
        let labels = self
            .client
            .query(&key, || api.get_data::<Vec<Label>>(LABELS_PATH, &pairs))
            .await?;
        Ok(QueryOutcome::Ready(labels))
    }
}
