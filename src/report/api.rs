//! FlexReport API operations

use super::types::ReportInfo;
use crate::error::{Error, Result};
use crate::graphql::{operations, value_at, GraphQlClient, GraphQlRequest};
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info};

/// Anything that can report the current state of a FlexReport
#[async_trait]
pub trait ReportSource: Send + Sync {
    /// Fetch the latest report info
    async fn report_info(&self, report_id: &str) -> Result<ReportInfo>;
}

/// FlexReport operations over an authenticated GraphQL client
#[derive(Debug)]
pub struct FlexReportApi {
    client: GraphQlClient,
}

impl FlexReportApi {
    /// Wrap an authenticated client
    pub fn new(client: GraphQlClient) -> Result<Self> {
        if !client.is_authenticated() {
            return Err(Error::NotAuthenticated);
        }
        Ok(Self { client })
    }

    /// Query `node(id)` for name, status and download contents
    pub async fn get_report_info(&self, report_id: &str) -> Result<ReportInfo> {
        let response = self
            .client
            .execute_authenticated(&operations::report_info(report_id))
            .await?;

        let node = value_at(&response, "data.node")
            .ok_or_else(|| Error::missing_field("data.node"))?;
        let info: ReportInfo = serde_json::from_value(node.clone())?;

        debug!(report_id, status = ?info.status(), "Fetched report info");
        Ok(info)
    }

    /// Trigger an execution. Only transport and GraphQL success are checked.
    pub async fn execute_report(&self, report_id: &str) -> Result<()> {
        self.client
            .execute_authenticated(&operations::trigger_execution(report_id))
            .await?;
        info!(report_id, "Report execution triggered");
        Ok(())
    }

    /// Send a `createFlexReport` mutation and return the raw response.
    ///
    /// GraphQL `errors` are not checked here: a response can carry both an
    /// error and the created report.
    pub async fn create_report(&self, request: &GraphQlRequest) -> Result<Value> {
        self.client.execute_authenticated_raw(request).await
    }
}

#[async_trait]
impl ReportSource for FlexReportApi {
    async fn report_info(&self, report_id: &str) -> Result<ReportInfo> {
        self.get_report_info(report_id).await
    }
}
