//! Render state for the two charts and the datasets handed to the JS bridge.

use dash_api::models::{BarChartData, LineChartData, TrendPoint};
use dash_api::ApiError;
use dash_core::Series;
use log::{debug, error};
use serde::Serialize;

pub const HIGHLIGHT_COLOR: &str = "#FF6347";
pub const BAR_COLOR: &str = "#42A5F5";
pub const BAR_BORDER_COLOR: &str = "#1E88E5";
pub const BAR_LABEL: &str = "Total Time Spent";

/// Latest response for one chart.
///
/// `applied_seq` is the sequence number of the newest outcome (success or
/// failure) recorded here; anything older is dropped so a slow response
/// cannot overwrite a newer one.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSlot<T> {
    data: Option<T>,
    last_error: Option<String>,
    applied_seq: u64,
}

impl<T> Default for ChartSlot<T> {
    fn default() -> Self {
        Self {
            data: None,
            last_error: None,
            applied_seq: 0,
        }
    }
}

impl<T> ChartSlot<T> {
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn applied_seq(&self) -> u64 {
        self.applied_seq
    }

    /// Record the outcome of request `seq`. Returns whether the data changed.
    ///
    /// A failure keeps the previous data on screen. Every failure is logged,
    /// including ones that arrive too late to be shown.
    pub fn apply(&mut self, seq: u64, outcome: Result<T, ApiError>, chart: &str) -> bool {
        if let Err(e) = &outcome {
            error!("Error fetching {chart} data (request #{seq}): {e}");
        }
        if seq <= self.applied_seq {
            debug!(
                "Dropping stale {chart} response #{seq} (already at #{})",
                self.applied_seq
            );
            return false;
        }
        self.applied_seq = seq;

        match outcome {
            Ok(data) => {
                self.data = Some(data);
                self.last_error = None;
                true
            }
            Err(e) => {
                self.last_error = Some(e.to_string());
                false
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarPoint {
    pub label: &'static str,
    pub value: f64,
    pub color: &'static str,
}

/// Horizontal bar chart, one bar per series, the selected one highlighted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarDataset {
    pub label: &'static str,
    pub border_color: &'static str,
    pub points: Vec<BarPoint>,
}

impl BarDataset {
    pub fn new(data: &BarChartData, selected: Series) -> Self {
        let points = Series::ALL
            .iter()
            .map(|&series| BarPoint {
                label: series.as_str(),
                value: data.data.get(series),
                color: if series == selected {
                    HIGHLIGHT_COLOR
                } else {
                    BAR_COLOR
                },
            })
            .collect();
        Self {
            label: BAR_LABEL,
            border_color: BAR_BORDER_COLOR,
            points,
        }
    }
}

/// Daily trend of the selected series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineDataset {
    pub label: String,
    pub color: &'static str,
    pub points: Vec<TrendPoint>,
}

impl LineDataset {
    pub fn new(data: &LineChartData, selected: Series) -> Self {
        Self {
            label: format!("Feature {selected} Trend"),
            color: HIGHLIGHT_COLOR,
            points: data.data.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dash_api::models::SeriesTotals;

    fn status_error() -> ApiError {
        ApiError::Status {
            path: "/analytics/bar-chart".to_string(),
            status: 503,
        }
    }

    #[test]
    fn test_slot_applies_newer_and_drops_older() {
        let mut slot = ChartSlot::default();
        assert!(slot.apply(2, Ok(20), "bar"));
        assert!(!slot.apply(1, Ok(10), "bar"));
        assert_eq!(slot.data(), Some(&20));
        assert_eq!(slot.applied_seq(), 2);
    }

    #[test]
    fn test_slot_failure_keeps_stale_data() {
        let mut slot = ChartSlot::default();
        slot.apply(1, Ok(10), "bar");
        assert!(!slot.apply(2, Err(status_error()), "bar"));
        assert_eq!(slot.data(), Some(&10));
        assert!(slot.last_error().unwrap().contains("503"));

        // An older success must not land after the newer failure.
        assert!(!slot.apply(1, Ok(5), "bar"));
        assert_eq!(slot.data(), Some(&10));

        assert!(slot.apply(3, Ok(30), "bar"));
        assert_eq!(slot.last_error(), None);
    }

    #[test]
    fn test_late_failure_is_dropped() {
        let mut slot = ChartSlot::default();
        slot.apply(2, Ok(20), "line");
        assert!(!slot.apply(1, Err(status_error()), "line"));
        assert_eq!(slot.data(), Some(&20));
        assert_eq!(slot.last_error(), None);
        assert_eq!(slot.applied_seq(), 2);
    }

    #[test]
    fn test_bar_dataset_highlights_selected() {
        let data = BarChartData {
            data: SeriesTotals {
                a: 1.0,
                c: 3.0,
                ..Default::default()
            },
        };
        let dataset = BarDataset::new(&data, Series::C);
        let labels: Vec<_> = dataset.points.iter().map(|p| p.label).collect();
        assert_eq!(labels, ["A", "B", "C", "D", "E", "F"]);
        assert_eq!(dataset.points[2].color, HIGHLIGHT_COLOR);
        assert_eq!(dataset.points[2].value, 3.0);
        assert!(dataset
            .points
            .iter()
            .filter(|p| p.label != "C")
            .all(|p| p.color == BAR_COLOR));
    }

    #[test]
    fn test_line_dataset_label() {
        let data = LineChartData {
            data: vec![TrendPoint {
                date: "2022-10-04".to_string(),
                value: 4.0,
            }],
        };
        let dataset = LineDataset::new(&data, Series::B);
        assert_eq!(dataset.label, "Feature B Trend");
        assert_eq!(dataset.points, data.data);
        let json = serde_json::to_value(&dataset).unwrap();
        assert_eq!(json["points"][0]["date"], "2022-10-04");
    }
}
