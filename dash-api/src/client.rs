//! `reqwest`-backed implementation of the analytics and auth APIs.

use crate::analytics::{AnalyticsApi, AnalyticsQuery, BAR_CHART_PATH, LINE_CHART_PATH};
use crate::auth::{
    AuthApi, AuthError, LOGIN_FAILED, LOGIN_PATH, LOGOUT_PATH, SIGNUP_FAILED, SIGNUP_PATH,
    VERIFY_PATH,
};
use crate::error::{ApiError, Result};
use crate::models::{BarChartData, Credentials, LineChartData, MessageBody};
use async_trait::async_trait;
use dash_core::DashboardConfig;
use log::{debug, error, warn};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
#[cfg(target_arch = "wasm32")]
use crate::timeout::{deadline, with_timeout};

/// HTTP client bound to one API base URL. Cheap to clone.
#[derive(Debug, Clone)]
pub struct HttpClient {
    base_url: String,
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    pub fn new(config: &DashboardConfig) -> Result<Self> {
        let builder = Client::builder();
        // On WASM the deadline is enforced per request in `send`.
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(config.request_timeout);

        Ok(Self {
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
            timeout: config.request_timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        #[cfg(target_arch = "wasm32")]
        let builder = builder.fetch_credentials_include();
        builder
    }

    pub fn bar_chart_request(&self, query: &AnalyticsQuery) -> RequestBuilder {
        self.request(Method::GET, BAR_CHART_PATH)
            .query(&query.bar_params())
    }

    pub fn line_chart_request(&self, query: &AnalyticsQuery) -> RequestBuilder {
        self.request(Method::GET, LINE_CHART_PATH)
            .query(&query.line_params())
    }

    /// Send `request`, bounded by the configured timeout.
    async fn send(&self, request: RequestBuilder, path: &str) -> Result<Response> {
        debug!("Requesting {path}");
        #[cfg(target_arch = "wasm32")]
        {
            let sending = async move { request.send().await.map_err(ApiError::from) };
            with_timeout(sending, deadline(self.timeout), path, self.timeout).await
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            Ok(request.send().await?)
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, request: RequestBuilder, path: &str) -> Result<T> {
        let response = self.send(request, path).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                path: path.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.json::<T>().await?)
    }

    async fn post_credentials(
        &self,
        path: &str,
        credentials: &Credentials,
        fallback: &str,
    ) -> std::result::Result<Response, AuthError> {
        let request = self.request(Method::POST, path).json(credentials);
        let response = self.send(request, path).await.map_err(|e| {
            warn!("{path} request failed: {e}");
            AuthError::Unexpected
        })?;

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        debug!("{path} rejected with status {status}");
        Err(AuthError::from_error_body(&body, fallback))
    }
}

#[async_trait(?Send)]
impl AnalyticsApi for HttpClient {
    async fn bar_chart(&self, query: &AnalyticsQuery) -> Result<BarChartData> {
        self.get_json(self.bar_chart_request(query), BAR_CHART_PATH)
            .await
    }

    async fn line_chart(&self, query: &AnalyticsQuery) -> Result<LineChartData> {
        self.get_json(self.line_chart_request(query), LINE_CHART_PATH)
            .await
    }
}

#[async_trait(?Send)]
impl AuthApi for HttpClient {
    async fn signup(&self, credentials: &Credentials) -> std::result::Result<String, AuthError> {
        let response = self
            .post_credentials(SIGNUP_PATH, credentials, SIGNUP_FAILED)
            .await?;
        let body = response.json::<MessageBody>().await.map_err(|e| {
            warn!("Unreadable signup response: {e}");
            AuthError::Unexpected
        })?;
        Ok(body.message.unwrap_or_default())
    }

    async fn login(&self, credentials: &Credentials) -> std::result::Result<String, AuthError> {
        let response = self
            .post_credentials(LOGIN_PATH, credentials, LOGIN_FAILED)
            .await?;
        Ok(response.text().await.unwrap_or_default())
    }

    async fn logout(&self) {
        match self.send(self.request(Method::POST, LOGOUT_PATH), LOGOUT_PATH).await {
            Ok(response) if !response.status().is_success() => {
                error!("Logout failed with status {}", response.status());
            }
            Ok(_) => {}
            Err(e) => error!("Logout failed: {e}"),
        }
    }

    async fn verify(&self) -> bool {
        match self.send(self.request(Method::GET, VERIFY_PATH), VERIFY_PATH).await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!("Session verification failed: {e}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use dash_core::{AgeGroup, FilterState, Gender, Series};

    fn client() -> HttpClient {
        let config = DashboardConfig {
            api_base_url: "https://api.example.test/".to_string(),
            ..DashboardConfig::default()
        };
        HttpClient::new(&config).unwrap()
    }

    #[test]
    fn test_base_url_is_normalized() {
        let client = client();
        assert_eq!(client.base_url(), "https://api.example.test");
        assert_eq!(client.url(VERIFY_PATH), "https://api.example.test/auth/verify");
    }

    #[test]
    fn test_timeout_comes_from_config() {
        let config = DashboardConfig {
            request_timeout: Duration::from_millis(2_500),
            ..DashboardConfig::default()
        };
        assert_eq!(HttpClient::new(&config).unwrap().timeout(), Duration::from_millis(2_500));
    }

    #[test]
    fn test_bar_chart_request_url() {
        let state = FilterState {
            start_date: NaiveDate::from_ymd_opt(2022, 11, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2022, 11, 7).unwrap(),
            age_group: AgeGroup::Youth,
            ..Default::default()
        };
        let request = client()
            .bar_chart_request(&AnalyticsQuery::from(&state))
            .build()
            .unwrap();
        assert_eq!(request.method(), &Method::GET);
        assert_eq!(
            request.url().as_str(),
            "https://api.example.test/analytics/bar-chart?startDate=2022-11-01&endDate=2022-11-07&ageGroup=15-25&gender="
        );
    }

    #[test]
    fn test_line_chart_request_carries_feature() {
        let state = FilterState {
            age_group: AgeGroup::Adult,
            gender: Gender::Female,
            selected_series: Series::C,
            ..Default::default()
        };
        let request = client()
            .line_chart_request(&AnalyticsQuery::from(&state))
            .build()
            .unwrap();
        assert_eq!(request.url().path(), "/analytics/line-chart");
        assert_eq!(
            request.url().query(),
            Some("startDate=2022-10-04&endDate=2022-10-10&ageGroup=%3E25&gender=Female&feature=C")
        );
    }
}
