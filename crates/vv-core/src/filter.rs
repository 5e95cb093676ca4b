//! Filter selection and the pure filtering function over a reading list.

use core::fmt;
use std::collections::BTreeSet;
use std::str::FromStr;

use crate::reading::Reading;

const ALL: &str = "all";

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterParseError {
    #[error("Unknown alert status: {0} (expected all, alerts or normal)")]
    AlertStatus(String),

    #[error("Category must not be empty")]
    EmptyCategory,
}

/// Category restriction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn matches(&self, reading: &Reading) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => reading.category == *category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" => Err(FilterParseError::EmptyCategory),
            all if all.eq_ignore_ascii_case(ALL) => Ok(CategoryFilter::All),
            other => Ok(CategoryFilter::Only(other.to_string())),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(ALL),
            CategoryFilter::Only(category) => f.write_str(category),
        }
    }
}

/// Alert restriction based on the limit flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlertStatus {
    #[default]
    All,
    /// High or low limit exceeded.
    Alerts,
    /// Neither limit exceeded.
    Normal,
}

impl AlertStatus {
    pub fn matches(self, reading: &Reading) -> bool {
        match self {
            AlertStatus::All => true,
            AlertStatus::Alerts => reading.is_alert(),
            AlertStatus::Normal => !reading.is_alert(),
        }
    }
}

impl FromStr for AlertStatus {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            ALL => Ok(AlertStatus::All),
            "alerts" => Ok(AlertStatus::Alerts),
            "normal" => Ok(AlertStatus::Normal),
            _ => Err(FilterParseError::AlertStatus(s.to_string())),
        }
    }
}

impl fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AlertStatus::All => ALL,
            AlertStatus::Alerts => "alerts",
            AlertStatus::Normal => "normal",
        })
    }
}

/// Current filter selection. Both restrictions start at "all".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterSelection {
    pub category: CategoryFilter,
    pub alert_status: AlertStatus,
}

impl FilterSelection {
    pub fn matches(&self, reading: &Reading) -> bool {
        self.category.matches(reading) && self.alert_status.matches(reading)
    }

    pub fn is_unrestricted(&self) -> bool {
        self.category == CategoryFilter::All && self.alert_status == AlertStatus::All
    }
}

/// Which part of the selection changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterChange {
    Category(CategoryFilter),
    AlertStatus(AlertStatus),
}

/// Owned, mutable filter selection.
///
/// Every setter returns exactly one [`FilterChange`], including when the new
/// value equals the old one; the owner turns each into one re-render.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    selection: FilterSelection,
}

impl FilterState {
    pub fn new(selection: FilterSelection) -> Self {
        Self { selection }
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn set_category(&mut self, category: CategoryFilter) -> FilterChange {
        self.selection.category = category.clone();
        FilterChange::Category(category)
    }

    pub fn set_alert_status(&mut self, alert_status: AlertStatus) -> FilterChange {
        self.selection.alert_status = alert_status;
        FilterChange::AlertStatus(alert_status)
    }

    pub fn apply(&self, readings: &[Reading]) -> Vec<Reading> {
        apply(readings, &self.selection)
    }
}

/// Readings matching `selection`, in input order. The input is untouched.
pub fn apply(readings: &[Reading], selection: &FilterSelection) -> Vec<Reading> {
    readings
        .iter()
        .filter(|r| selection.matches(r))
        .cloned()
        .collect()
}

/// Borrowing variant of [`apply`].
pub fn apply_refs<'a>(readings: &'a [Reading], selection: &FilterSelection) -> Vec<&'a Reading> {
    readings.iter().filter(|r| selection.matches(r)).collect()
}

/// Distinct categories present in `readings`, sorted.
pub fn category_options(readings: &[Reading]) -> Vec<String> {
    readings
        .iter()
        .map(|r| r.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
