//! Analytics queries: one bar aggregate and one line trend per filter state.

use crate::error::Result;
use crate::models::{BarChartData, LineChartData};
use async_trait::async_trait;
use chrono::NaiveDate;
use dash_core::dates::format_date;
use dash_core::{AgeGroup, FilterState, Gender, Series};
use futures::stream::{self, Stream};
use futures::FutureExt;
use log::debug;

pub const BAR_CHART_PATH: &str = "/analytics/bar-chart";
pub const LINE_CHART_PATH: &str = "/analytics/line-chart";

/// The five values sent to the analytics API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyticsQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub age_group: AgeGroup,
    pub gender: Gender,
    pub feature: Series,
}

impl From<&FilterState> for AnalyticsQuery {
    /// A reversed date range is sent ordered; the filter state itself keeps
    /// what the user picked.
    fn from(state: &FilterState) -> Self {
        let range = state.range();
        if range.is_reversed() {
            debug!(
                "Swapping reversed range {} > {} for analytics query",
                range.0, range.1
            );
        }
        let ordered = range.ordered();
        Self {
            start_date: ordered.0,
            end_date: ordered.1,
            age_group: state.age_group,
            gender: state.gender,
            feature: state.selected_series,
        }
    }
}

impl AnalyticsQuery {
    /// `startDate`, `endDate`, `ageGroup`, `gender`; unset enums as empty strings.
    pub fn bar_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("startDate", format_date(&self.start_date)),
            ("endDate", format_date(&self.end_date)),
            ("ageGroup", self.age_group.as_str().to_string()),
            ("gender", self.gender.as_str().to_string()),
        ]
    }

    /// Bar parameters plus `feature`.
    pub fn line_params(&self) -> Vec<(&'static str, String)> {
        let mut params = self.bar_params();
        params.push(("feature", self.feature.as_str().to_string()));
        params
    }
}

#[async_trait(?Send)]
pub trait AnalyticsApi {
    async fn bar_chart(&self, query: &AnalyticsQuery) -> Result<BarChartData>;
    async fn line_chart(&self, query: &AnalyticsQuery) -> Result<LineChartData>;
}

/// One chart's response, tagged with the chart it belongs to.
#[derive(Debug)]
pub enum ChartResponse {
    Bar(Result<BarChartData>),
    Line(Result<LineChartData>),
}

/// Issue the bar and line requests together and yield each response as
/// soon as it arrives; a slow chart never holds back the other.
pub fn chart_responses<'a, A: AnalyticsApi + ?Sized>(
    api: &'a A,
    query: &'a AnalyticsQuery,
) -> impl Stream<Item = ChartResponse> + 'a {
    let bar = api.bar_chart(query).map(ChartResponse::Bar).into_stream();
    let line = api.line_chart(query).map(ChartResponse::Line).into_stream();
    stream::select(bar, line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::models::{SeriesTotals, TrendPoint};
    use futures::channel::oneshot;
    use futures::StreamExt;
    use std::cell::RefCell;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_query_from_state() {
        let state = FilterState {
            start_date: date(2022, 11, 1),
            end_date: date(2022, 11, 7),
            age_group: AgeGroup::Youth,
            ..Default::default()
        };
        let query = AnalyticsQuery::from(&state);
        assert_eq!(
            query.line_params(),
            vec![
                ("startDate", "2022-11-01".to_string()),
                ("endDate", "2022-11-07".to_string()),
                ("ageGroup", "15-25".to_string()),
                ("gender", String::new()),
                ("feature", "A".to_string()),
            ]
        );
        assert_eq!(query.bar_params().len(), 4);
    }

    #[test]
    fn test_query_orders_reversed_range() {
        let state = FilterState {
            start_date: date(2022, 10, 10),
            end_date: date(2022, 10, 4),
            ..Default::default()
        };
        let query = AnalyticsQuery::from(&state);
        assert_eq!(query.start_date, date(2022, 10, 4));
        assert_eq!(query.end_date, date(2022, 10, 10));
    }

    /// The bar call only completes once the line call has been issued.
    struct Handshake {
        line_started: RefCell<Option<oneshot::Sender<()>>>,
        bar_waiting: RefCell<Option<oneshot::Receiver<()>>>,
        fail_line: bool,
    }

    impl Handshake {
        fn new(fail_line: bool) -> Self {
            let (tx, rx) = oneshot::channel();
            Self {
                line_started: RefCell::new(Some(tx)),
                bar_waiting: RefCell::new(Some(rx)),
                fail_line,
            }
        }
    }

    #[async_trait(?Send)]
    impl AnalyticsApi for Handshake {
        async fn bar_chart(&self, _query: &AnalyticsQuery) -> Result<BarChartData> {
            let waiting = self.bar_waiting.borrow_mut().take();
            if let Some(rx) = waiting {
                let _ = rx.await;
            }
            Ok(BarChartData {
                data: SeriesTotals {
                    a: 1.0,
                    ..Default::default()
                },
            })
        }

        async fn line_chart(&self, query: &AnalyticsQuery) -> Result<LineChartData> {
            if let Some(tx) = self.line_started.borrow_mut().take() {
                let _ = tx.send(());
            }
            if self.fail_line {
                return Err(ApiError::Status {
                    path: LINE_CHART_PATH.to_string(),
                    status: 500,
                });
            }
            Ok(LineChartData {
                data: vec![TrendPoint {
                    date: format_date(&query.start_date),
                    value: 2.0,
                }],
            })
        }
    }

    async fn collect(api: &Handshake) -> Vec<ChartResponse> {
        let query = AnalyticsQuery::from(&FilterState::default());
        chart_responses(api, &query).collect().await
    }

    #[tokio::test]
    async fn test_chart_responses_issues_both_before_awaiting() {
        let responses = collect(&Handshake::new(false)).await;
        assert_eq!(responses.len(), 2);
        // The bar call cannot finish before the line call starts, so the
        // line response must come out first.
        let mut responses = responses.into_iter();
        match responses.next() {
            Some(ChartResponse::Line(Ok(line))) => assert_eq!(line.data[0].date, "2022-10-04"),
            other => panic!("expected the line response first, got {other:?}"),
        }
        match responses.next() {
            Some(ChartResponse::Bar(Ok(bar))) => assert_eq!(bar.data.a, 1.0),
            other => panic!("expected the bar response, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_chart_responses_failures_are_independent() {
        let responses = collect(&Handshake::new(true)).await;
        assert!(responses
            .iter()
            .any(|r| matches!(r, ChartResponse::Bar(Ok(_)))));
        assert!(responses
            .iter()
            .any(|r| matches!(r, ChartResponse::Line(Err(ApiError::Status { status: 500, .. })))));
    }
}
