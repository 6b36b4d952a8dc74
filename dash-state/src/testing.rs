//! Scripted API doubles shared by the unit tests.

use async_trait::async_trait;
use dash_api::analytics::{AnalyticsApi, AnalyticsQuery, BAR_CHART_PATH, LINE_CHART_PATH};
use dash_api::auth::{AuthApi, AuthError};
use dash_api::models::{BarChartData, Credentials, LineChartData, SeriesTotals, TrendPoint};
use dash_api::{with_timeout, ApiError, Result};
use dash_core::dates::format_date;
use std::cell::{Cell, RefCell};
use std::future;
use std::time::Duration;

/// Answers every query with data derived from it and records the calls.
#[derive(Default)]
pub struct RecordingAnalytics {
    pub bar_calls: RefCell<Vec<AnalyticsQuery>>,
    pub line_calls: RefCell<Vec<AnalyticsQuery>>,
    pub fail_bar: Cell<bool>,
    pub fail_line: Cell<bool>,
    /// The line request never answers.
    pub stall_line: Cell<bool>,
    /// The line request runs into its deadline.
    pub time_out_line: Cell<bool>,
}

#[async_trait(?Send)]
impl AnalyticsApi for RecordingAnalytics {
    async fn bar_chart(&self, query: &AnalyticsQuery) -> Result<BarChartData> {
        self.bar_calls.borrow_mut().push(*query);
        if self.fail_bar.get() {
            return Err(ApiError::Status {
                path: BAR_CHART_PATH.to_string(),
                status: 500,
            });
        }
        Ok(BarChartData {
            data: SeriesTotals {
                a: self.bar_calls.borrow().len() as f64,
                ..Default::default()
            },
        })
    }

    async fn line_chart(&self, query: &AnalyticsQuery) -> Result<LineChartData> {
        self.line_calls.borrow_mut().push(*query);
        if self.stall_line.get() {
            future::pending::<()>().await;
        }
        if self.time_out_line.get() {
            let timeout = Duration::from_secs(10);
            return with_timeout(future::pending(), future::ready(()), LINE_CHART_PATH, timeout).await;
        }
        if self.fail_line.get() {
            return Err(ApiError::Status {
                path: LINE_CHART_PATH.to_string(),
                status: 500,
            });
        }
        Ok(LineChartData {
            data: vec![TrendPoint {
                date: format_date(&query.start_date),
                value: query.feature.index() as f64,
            }],
        })
    }
}

/// Auth server with a fixed session state and password.
pub struct StubAuth {
    pub session_valid: bool,
    pub password: &'static str,
    pub logins: Cell<usize>,
    pub logouts: Cell<usize>,
}

impl StubAuth {
    pub fn new(session_valid: bool) -> Self {
        Self {
            session_valid,
            password: "hunter2",
            logins: Cell::new(0),
            logouts: Cell::new(0),
        }
    }
}

#[async_trait(?Send)]
impl AuthApi for StubAuth {
    async fn signup(&self, credentials: &Credentials) -> std::result::Result<String, AuthError> {
        if credentials.email.contains('@') {
            Ok("User created".to_string())
        } else {
            Err(AuthError::Rejected {
                message: "Invalid email".to_string(),
            })
        }
    }

    async fn login(&self, credentials: &Credentials) -> std::result::Result<String, AuthError> {
        self.logins.set(self.logins.get() + 1);
        if credentials.password == self.password {
            Ok("ok".to_string())
        } else {
            Err(AuthError::Rejected {
                message: "Invalid credentials".to_string(),
            })
        }
    }

    async fn logout(&self) {
        self.logouts.set(self.logouts.get() + 1);
    }

    async fn verify(&self) -> bool {
        self.session_valid
    }
}
