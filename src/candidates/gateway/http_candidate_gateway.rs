use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::candidates::dto::{CandidateDto, CandidateOutput};
use crate::candidates::gateway::CandidateGateway;
use crate::core::election::{ElectionError, ElectionResult};

const CANDIDATE_ROUTE: &str = "/v1/candidate/";

// Reqwest-backed client of the candidate service. It only reports status and transport
// failures; it never interprets them.
#[derive(Debug, Clone)]
pub(crate) struct HttpCandidateGateway {
    client: Client,
    base_url: String,
}

impl HttpCandidateGateway {
    pub(crate) fn new(base_url: &str, timeout: Duration) -> ElectionResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, id: Option<&str>) -> String {
        format!("{}{}{}", self.base_url, CANDIDATE_ROUTE, id.unwrap_or(""))
    }

    async fn fetch<T: DeserializeOwned>(&self, url: String) -> ElectionResult<T> {
        debug!(url = url.as_str(), "fetching candidates");
        let response = self.client
            .get(url.as_str())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(status_error(status, url.as_str()));
        }
        let body = response.bytes().await?;
        serde_json::from_slice(body.as_ref()).map_err(|err| ElectionError::remote(
            format!("invalid candidate payload from {}: {}", url, err).as_str(), Some(status.as_u16()), false))
    }
}

fn status_error(status: StatusCode, url: &str) -> ElectionError {
    let retryable = status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS;
    ElectionError::remote(
        format!("candidate service returned {} for {}", status, url).as_str(), Some(status.as_u16()), retryable)
}

#[async_trait]
impl CandidateGateway for HttpCandidateGateway {
    async fn get_all(&self) -> ElectionResult<Vec<CandidateDto>> {
        let outputs: Vec<CandidateOutput> = self.fetch(self.url(None)).await?;
        Ok(outputs.into_iter().map(CandidateDto::from).collect())
    }

    async fn get_by_id(&self, id: &str) -> ElectionResult<CandidateDto> {
        let output: CandidateOutput = self.fetch(self.url(Some(id))).await?;
        Ok(CandidateDto::from(output))
    }
}

impl From<reqwest::Error> for ElectionError {
    fn from(err: reqwest::Error) -> Self {
        let retryable = err.is_timeout() || err.is_connect();
        ElectionError::remote(
            format!("candidate service call failed {:?}", err).as_str(), err.status().map(|s| s.as_u16()), retryable)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};
    use crate::candidates::gateway::CandidateGateway;
    use crate::candidates::gateway::http_candidate_gateway::HttpCandidateGateway;
    use crate::core::election::ElectionError;

    async fn create_test_gateway(mock_server: &MockServer) -> HttpCandidateGateway {
        HttpCandidateGateway::new(mock_server.uri().as_str(), Duration::from_secs(2)).expect("should build gateway")
    }

    #[tokio::test]
    async fn test_should_get_all_candidates() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/candidate/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "name": "Maria", "partyOutput": {"id": "p-1"}},
                {"id": 2, "name": "Joao", "partyId": "p-2"}
            ])))
            .mount(&mock_server)
            .await;

        let gateway = create_test_gateway(&mock_server).await;
        let candidates = gateway.get_all().await.expect("should get candidates");
        assert_eq!(2, candidates.len());
        assert!(candidates[0].belongs_to("p-1"));
        assert!(candidates[1].belongs_to("p-2"));
    }

    #[tokio::test]
    async fn test_should_get_candidate_by_id() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/candidate/42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(
                {"id": 42, "numberElection": 1301, "partyOutput": {"id": 13}}
            )))
            .mount(&mock_server)
            .await;

        let gateway = create_test_gateway(&mock_server).await;
        let candidate = gateway.get_by_id("42").await.expect("should get candidate");
        assert_eq!("42", candidate.candidate_id.as_str());
        assert_eq!(Some("13".to_string()), candidate.party_id);
    }

    #[tokio::test]
    async fn test_should_report_server_error_status() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/candidate/"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let gateway = create_test_gateway(&mock_server).await;
        let err = gateway.get_all().await.unwrap_err();
        assert!(matches!(err, ElectionError::Remote { status: Some(500), retryable: true, .. }));
    }

    #[tokio::test]
    async fn test_should_report_client_error_status() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/candidate/404"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let gateway = create_test_gateway(&mock_server).await;
        let err = gateway.get_by_id("404").await.unwrap_err();
        assert!(matches!(err, ElectionError::Remote { status: Some(404), retryable: false, .. }));
    }

    #[tokio::test]
    async fn test_should_report_invalid_payload() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/candidate/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&mock_server)
            .await;

        let gateway = create_test_gateway(&mock_server).await;
        let err = gateway.get_all().await.unwrap_err();
        assert!(matches!(err, ElectionError::Remote { status: Some(200), .. }));
    }

    #[tokio::test]
    async fn test_should_report_transport_failure() {
        // nothing listens on port 9 (discard) in the test environment
        let gateway = HttpCandidateGateway::new("http://127.0.0.1:9", Duration::from_secs(2)).expect("should build gateway");
        let err = gateway.get_all().await.unwrap_err();
        assert!(matches!(err, ElectionError::Remote { status: None, .. }));
    }
}
