use super::models::{EventsResponse, Organization, OrganizationsResponse};
use super::EventbriteApi;
use crate::config::Config;
use crate::error::{eventbrite_error, SyncResult};
use async_trait::async_trait;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

/// Query parameters selecting upcoming published events, soonest first
pub const EVENT_QUERY: [(&str, &str); 4] = [
    ("status", "live"),
    ("order_by", "start_asc"),
    ("time_filter", "current_future"),
    ("expand", "venue,ticket_availability"),
];

/// HTTP client for the Eventbrite v3 API
#[derive(Clone)]
pub struct EventbriteClient {
    client: Client,
    base_url: Url,
    token: String,
}

impl EventbriteClient {
    /// Create a client from the loaded configuration
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            base_url: config.api_base_url.clone(),
            token: config.eventbrite_token.clone(),
        }
    }

    /// URL listing the caller's organizations
    pub fn organizations_url(&self) -> SyncResult<Url> {
        Ok(self.base_url.join("users/me/organizations/")?)
    }

    /// URL listing an organization's upcoming events
    pub fn events_url(&self, organization_id: &str) -> SyncResult<Url> {
        let mut url = self
            .base_url
            .join(&format!("organizations/{}/events/", organization_id))?;
        url.query_pairs_mut().extend_pairs(EVENT_QUERY.iter().copied());
        Ok(url)
    }

    /// GET a JSON document, failing on transport errors and non-2xx statuses
    async fn get_json<T: DeserializeOwned>(&self, url: Url, what: &str) -> SyncResult<T> {
        debug!("GET {}", url.path());

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .send()
            .await
            .map_err(|e| eventbrite_error(&format!("Failed to fetch {}: {}", what, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(eventbrite_error(&format!(
                "Failed to fetch {}: HTTP {} - {}",
                what, status, error_body
            )));
        }

        response.json::<T>().await.map_err(|e| {
            eventbrite_error(&format!("Failed to parse {} response: {}", what, e))
        })
    }
}

#[async_trait]
impl EventbriteApi for EventbriteClient {
    async fn list_organizations(&self) -> SyncResult<Vec<Organization>> {
        let url = self.organizations_url()?;
        let response: OrganizationsResponse = self.get_json(url, "organizations").await?;
        Ok(response.organizations)
    }

    async fn list_events(&self, organization_id: &str) -> SyncResult<Vec<Value>> {
        let url = self.events_url(organization_id)?;
        let response: EventsResponse = self.get_json(url, "events").await?;
        Ok(response.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FileConfig;

    fn client(base: &str) -> EventbriteClient {
        let config = Config::from_sources(
            |key| match key {
                "EVENTBRITE_TOKEN" => Some("token".to_string()),
                "EVENTBRITE_API_URL" => Some(base.to_string()),
                _ => None,
            },
            FileConfig::default(),
        )
        .unwrap();
        EventbriteClient::new(&config)
    }

    #[test]
    fn test_organizations_url() {
        let url = client("https://www.eventbriteapi.com/v3/")
            .organizations_url()
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.eventbriteapi.com/v3/users/me/organizations/"
        );
    }

    #[test]
    fn test_events_url_has_fixed_query() {
        let url = client("https://www.eventbriteapi.com/v3")
            .events_url("77223082953")
            .unwrap();

        assert_eq!(url.path(), "/v3/organizations/77223082953/events/");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("status".to_string(), "live".to_string()),
                ("order_by".to_string(), "start_asc".to_string()),
                ("time_filter".to_string(), "current_future".to_string()),
                ("expand".to_string(), "venue,ticket_availability".to_string()),
            ]
        );
    }

    #[test]
    fn test_responses_default_to_empty_lists() {
        let orgs: OrganizationsResponse = serde_json::from_str("{}").unwrap();
        assert!(orgs.organizations.is_empty());
        let events: EventsResponse = serde_json::from_str(r#"{"pagination": {}}"#).unwrap();
        assert!(events.events.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_api_is_eventbrite_error() {
        let client = client("http://127.0.0.1:9/v3/");
        let result = client.list_organizations().await;
        assert!(matches!(result, Err(crate::error::Error::Eventbrite(_))));
    }
}
