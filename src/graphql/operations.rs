//! Operation documents sent to the CloudHealth GraphQL API

use super::GraphQlRequest;
use serde_json::json;

/// `loginAPI(apiKey) -> accessToken`
pub const LOGIN: &str =
    "mutation Login($apiKey: String!) { loginAPI(apiKey: $apiKey) { accessToken } }";

/// `node(id) -> FlexReport { name, result { status, contents { preSignedUrl } } }`
pub const REPORT_INFO: &str = r"query queryReport($id: ID!) {
  node(id: $id) {
    id
    ... on FlexReport {
      name
      result {
        status
        reportUpdatedOn
        contents {
          preSignedUrl
        }
      }
    }
  }
}";

/// `triggerFlexReportExecution(id)`
pub const TRIGGER_EXECUTION: &str =
    "mutation executeFlexReport($id: ID!) { triggerFlexReportExecution(id: $id) }";

/// `createFlexReport(input) -> { id, name }`
pub const CREATE_REPORT: &str = r"mutation CreateFlexReport(
  $name: String!,
  $description: String!,
  $sqlStatement: String!,
  $needBackLinkingForTags: Boolean!,
  $dataGranularity: FlexReportDataGranularity!,
  $limit: Int!,
  $timeRangeLast: Int!,
  $excludeCurrent: Boolean!
) {
  createFlexReport(input: {
    name: $name,
    description: $description,
    notification: { sendUserEmail: false },
    query: {
      sqlStatement: $sqlStatement,
      needBackLinkingForTags: $needBackLinkingForTags,
      dataGranularity: $dataGranularity,
      limit: $limit,
      timeRange: { last: $timeRangeLast, excludeCurrent: $excludeCurrent }
    }
  }) {
    id
    name
  }
}";

/// Build the login mutation
pub fn login(api_key: &str) -> GraphQlRequest {
    GraphQlRequest::new(LOGIN).variables(json!({ "apiKey": api_key }))
}

/// Build the report info query
pub fn report_info(report_id: &str) -> GraphQlRequest {
    GraphQlRequest::new(REPORT_INFO).variables(json!({ "id": report_id }))
}

/// Build the execution trigger mutation
pub fn trigger_execution(report_id: &str) -> GraphQlRequest {
    GraphQlRequest::new(TRIGGER_EXECUTION).variables(json!({ "id": report_id }))
}
