//! Request and response bodies of the analytics and auth APIs.

use dash_core::Series;
use serde::{Deserialize, Serialize};

/// Aggregated time spent per series; missing series read as zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SeriesTotals {
    #[serde(rename = "A", default)]
    pub a: f64,
    #[serde(rename = "B", default)]
    pub b: f64,
    #[serde(rename = "C", default)]
    pub c: f64,
    #[serde(rename = "D", default)]
    pub d: f64,
    #[serde(rename = "E", default)]
    pub e: f64,
    #[serde(rename = "F", default)]
    pub f: f64,
}

impl SeriesTotals {
    pub fn get(&self, series: Series) -> f64 {
        match series {
            Series::A => self.a,
            Series::B => self.b,
            Series::C => self.c,
            Series::D => self.d,
            Series::E => self.e,
            Series::F => self.f,
        }
    }
}

/// `GET /analytics/bar-chart` response.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BarChartData {
    pub data: SeriesTotals,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: String,
    pub value: f64,
}

/// `GET /analytics/line-chart` response.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LineChartData {
    #[serde(default)]
    pub data: Vec<TrendPoint>,
}

/// Body of `POST /auth/login` and `POST /auth/signup`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

/// `{ message }` body used by auth successes and failures alike.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct MessageBody {
    #[serde(default)]
    pub message: Option<String>,
}
