//! Dashboard overview metrics for the selected branch.

use retailops_accounting::{Overview, OverviewFilter};
use retailops_core::Validate;

use super::{QueryOutcome, with_branch};
use crate::client::RetailClient;
use crate::error::ClientResult;
use crate::query::key::{query_pairs, strip_nulls};
use crate::query::{Operation, QueryKey, Resource};

pub const OVERVIEW_PATH: &str = "/overview";

pub struct OverviewService<'a> {
    client: &'a RetailClient,
}

impl<'a> OverviewService<'a> {
    pub(crate) fn new(client: &'a RetailClient) -> Self {
        Self { client }
    }

    /// Disabled until a branch is selected.
    pub async fn summary(&self, filter: &OverviewFilter) -> ClientResult<QueryOutcome<Overview>> {
        filter.validate()?;
        let Some(branch_id) = self.client.branch().selected_id() else {
            return Ok(QueryOutcome::Disabled);
        };

        let params = with_branch(serde_json::to_value(filter)?, branch_id);
        let key = QueryKey::from_value(Resource::Overview, Operation::Summary, &params);
        let pairs = query_pairs(&strip_nulls(&params));
        let api = self.client.api();
        let overview = self
            .client
            .query(&key, || api.get_data::<Overview>(OVERVIEW_PATH, &pairs))
            .await?;
        Ok(QueryOutcome::Ready(overview))
    }
}
