//! The dashboard filter state and its field types.
//!
//! `FilterState` is the single value object behind every chart query. The
//! cookie and URL readers produce `PartialFilters`, which are layered
//! (URL over cookie) and then resolved against the compiled-in defaults.

use crate::dates::{self, DateRange};
use crate::error::{FilterError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_START_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2022, 10, 4) {
    Some(date) => date,
    None => panic!("invalid default start date"),
};

pub const DEFAULT_END_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2022, 10, 10) {
    Some(date) => date,
    None => panic!("invalid default end date"),
};

/// One of the six data categories aggregated by the bar chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Series {
    #[default]
    A,
    B,
    C,
    D,
    E,
    F,
}

impl Series {
    /// All series in bar-chart order.
    pub const ALL: [Series; 6] = [Series::A, Series::B, Series::C, Series::D, Series::E, Series::F];

    /// Map a zero-based bar index to its series.
    pub fn from_index(index: usize) -> Option<Series> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Series::A => "A",
            Series::B => "B",
            Series::C => "C",
            Series::D => "D",
            Series::E => "E",
            Series::F => "F",
        }
    }
}

impl FromStr for Series {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|series| series.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| FilterError::UnknownSeries(s.to_string()))
    }
}

/// Age bracket filter. `All` is the unset value and travels as `""`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AgeGroup {
    #[default]
    All,
    Youth,
    Adult,
}

impl AgeGroup {
    pub const ALL: [AgeGroup; 3] = [AgeGroup::All, AgeGroup::Youth, AgeGroup::Adult];

    pub fn as_str(self) -> &'static str {
        match self {
            AgeGroup::All => "",
            AgeGroup::Youth => "15-25",
            AgeGroup::Adult => ">25",
        }
    }

    /// Human-readable label for selectors.
    pub fn label(self) -> &'static str {
        match self {
            AgeGroup::All => "All",
            AgeGroup::Youth => "15-25",
            AgeGroup::Adult => "25+",
        }
    }

    pub fn is_unset(self) -> bool {
        self == AgeGroup::All
    }
}

impl FromStr for AgeGroup {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "" => Ok(AgeGroup::All),
            "15-25" => Ok(AgeGroup::Youth),
            ">25" => Ok(AgeGroup::Adult),
            other => Err(FilterError::UnknownAgeGroup(other.to_string())),
        }
    }
}

/// Gender filter. `All` is the unset value and travels as `""`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Gender {
    #[default]
    All,
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::All, Gender::Male, Gender::Female];

    pub fn as_str(self) -> &'static str {
        match self {
            Gender::All => "",
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Gender::All => "All",
            other => other.as_str(),
        }
    }

    pub fn is_unset(self) -> bool {
        self == Gender::All
    }
}

impl FromStr for Gender {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "" => Ok(Gender::All),
            "Male" => Ok(Gender::Male),
            "Female" => Ok(Gender::Female),
            other => Err(FilterError::UnknownGender(other.to_string())),
        }
    }
}

macro_rules! string_serde {
    ($($ty:ty),*) => {$(
        impl From<$ty> for String {
            fn from(value: $ty) -> String {
                value.as_str().to_string()
            }
        }

        impl TryFrom<String> for $ty {
            type Error = FilterError;

            fn try_from(value: String) -> Result<Self> {
                value.parse()
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    )*};
}

string_serde!(Series, AgeGroup, Gender);

/// The five-field value object describing the current dashboard view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub age_group: AgeGroup,
    pub gender: Gender,
    #[serde(rename = "selectedBar", alias = "selectedSeries")]
    pub selected_series: Series,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            start_date: DEFAULT_START_DATE,
            end_date: DEFAULT_END_DATE,
            age_group: AgeGroup::All,
            gender: Gender::All,
            selected_series: Series::A,
        }
    }
}

impl FilterState {
    /// Copy of this state with a single field replaced.
    pub fn with_change(self, change: FilterChange) -> Self {
        let mut next = self;
        match change {
            FilterChange::StartDate(date) => next.start_date = date,
            FilterChange::EndDate(date) => next.end_date = date,
            FilterChange::AgeGroup(age_group) => next.age_group = age_group,
            FilterChange::Gender(gender) => next.gender = gender,
            FilterChange::Series(series) => next.selected_series = series,
        }
        next
    }

    /// The selected date range, as picked (possibly reversed).
    pub fn range(&self) -> DateRange {
        DateRange(self.start_date, self.end_date)
    }
}

/// Names of the editable filter fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    StartDate,
    EndDate,
    AgeGroup,
    Gender,
    Series,
}

/// A single-field edit of the filter state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterChange {
    StartDate(NaiveDate),
    EndDate(NaiveDate),
    AgeGroup(AgeGroup),
    Gender(Gender),
    Series(Series),
}

impl FilterChange {
    /// Parse a raw form value for `field`.
    pub fn parse(field: FilterField, raw: &str) -> Result<Self> {
        Ok(match field {
            FilterField::StartDate => FilterChange::StartDate(parse_filter_date(raw)?),
            FilterField::EndDate => FilterChange::EndDate(parse_filter_date(raw)?),
            FilterField::AgeGroup => FilterChange::AgeGroup(raw.parse()?),
            FilterField::Gender => FilterChange::Gender(raw.parse()?),
            FilterField::Series => FilterChange::Series(raw.parse()?),
        })
    }
}

pub(crate) fn parse_filter_date(raw: &str) -> Result<NaiveDate> {
    dates::parse_date(raw.trim()).map_err(|e| FilterError::DateParse(format!("{raw:?}: {e}")))
}

/// Filter values recovered from one source; absent fields are `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PartialFilters {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub age_group: Option<AgeGroup>,
    pub gender: Option<Gender>,
    #[serde(rename = "selectedBar", alias = "selectedSeries")]
    pub selected_series: Option<Series>,
}

impl PartialFilters {
    pub fn is_empty(&self) -> bool {
        *self == PartialFilters::default()
    }

    /// Field-wise layering: values in `self` win, gaps are filled from `fallback`.
    pub fn or(self, fallback: PartialFilters) -> PartialFilters {
        PartialFilters {
            start_date: self.start_date.or(fallback.start_date),
            end_date: self.end_date.or(fallback.end_date),
            age_group: self.age_group.or(fallback.age_group),
            gender: self.gender.or(fallback.gender),
            selected_series: self.selected_series.or(fallback.selected_series),
        }
    }

    /// Fill remaining gaps with the compiled-in defaults.
    pub fn resolve(self) -> FilterState {
        let defaults = FilterState::default();
        FilterState {
            start_date: self.start_date.unwrap_or(defaults.start_date),
            end_date: self.end_date.unwrap_or(defaults.end_date),
            age_group: self.age_group.unwrap_or(defaults.age_group),
            gender: self.gender.unwrap_or(defaults.gender),
            selected_series: self.selected_series.unwrap_or(defaults.selected_series),
        }
    }
}

impl From<FilterState> for PartialFilters {
    fn from(state: FilterState) -> Self {
        PartialFilters {
            start_date: Some(state.start_date),
            end_date: Some(state.end_date),
            age_group: Some(state.age_group),
            gender: Some(state.gender),
            selected_series: Some(state.selected_series),
        }
    }
}
