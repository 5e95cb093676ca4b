//! Vital-sign reading as delivered by the upstream data feed.

use core::fmt;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

/// One measurement event.
///
/// Field names on the wire keep the upstream casing (`parameterId`,
/// `ColumnDisplay`, `IsHighLimit`, ...). Missing fields fall back to their
/// defaults so a sparse record still decodes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Reading {
    #[serde(rename = "mpvId")]
    pub mpv_id: i64,
    #[serde(rename = "parameterId")]
    pub parameter_id: i64,
    #[serde(rename = "SessionId")]
    pub session_id: i64,
    #[serde(rename = "DeviceId")]
    pub device_id: i64,
    #[serde(rename = "MinRange")]
    pub min_range: f64,
    #[serde(rename = "MaxRange")]
    pub max_range: f64,
    #[serde(rename = "PeriodStart")]
    pub period_start: String,
    #[serde(rename = "PeriodEnd")]
    pub period_end: String,
    #[serde(rename = "Time")]
    pub time: String,
    /// Period label; may contain embedded line breaks.
    #[serde(rename = "ColumnDisplay")]
    pub column_display: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Name")]
    pub name: String,
    /// Numeric value in string form. Empty means "no reading".
    #[serde(rename = "Value", deserialize_with = "value_string")]
    pub value: String,
    #[serde(rename = "EnumCode")]
    pub enum_code: Option<String>,
    #[serde(rename = "EnumDescription")]
    pub enum_description: Option<String>,
    #[serde(rename = "Comment", deserialize_with = "nullable_string")]
    pub comment: String,
    #[serde(rename = "LowValue")]
    pub low_value: Option<f64>,
    #[serde(rename = "HighValue")]
    pub high_value: Option<f64>,
    #[serde(rename = "Tooltip", deserialize_with = "nullable_string")]
    pub tooltip: String,
    #[serde(rename = "IsHighLimit", deserialize_with = "flag")]
    pub is_high_limit: bool,
    #[serde(rename = "IsLowLimit", deserialize_with = "flag")]
    pub is_low_limit: bool,
    #[serde(rename = "IsComment", deserialize_with = "flag")]
    pub is_comment: bool,
    #[serde(rename = "IsHighValue", deserialize_with = "flag")]
    pub is_high_value: bool,
    #[serde(rename = "IsLowValue", deserialize_with = "flag")]
    pub is_low_value: bool,
    #[serde(rename = "IsEvent", deserialize_with = "flag")]
    pub is_event: bool,
    #[serde(rename = "IsInject", deserialize_with = "flag")]
    pub is_inject: bool,
    #[serde(rename = "Operation")]
    pub operation: i64,
    #[serde(rename = "DefaultLineColor")]
    pub default_line_color: i64,
    #[serde(rename = "GroupSortSeq")]
    pub group_sort_seq: i64,
    #[serde(rename = "SortSeq")]
    pub sort_seq: i64,
}

impl Reading {
    /// True when the reading carries a value.
    pub fn has_value(&self) -> bool {
        !self.value.is_empty()
    }

    /// True when the reading is outside its validity range on either side.
    pub fn is_alert(&self) -> bool {
        self.is_high_limit || self.is_low_limit
    }

    /// Display classification, `None` when there is no value to show.
    pub fn status(&self) -> Option<CellStatus> {
        if !self.has_value() {
            return None;
        }
        Some(CellStatus::of(self))
    }

    /// Validity range formatted the way cells show it.
    pub fn range_label(&self) -> String {
        format!("{}-{}", self.min_range, self.max_range)
    }
}

/// Styling class for a reading that has a value.
///
/// Flags are not mutually exclusive on the wire; the first match in
/// declaration order wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellStatus {
    HighLimit,
    LowLimit,
    Comment,
    Normal,
}

impl CellStatus {
    pub fn of(reading: &Reading) -> Self {
        if reading.is_high_limit {
            CellStatus::HighLimit
        } else if reading.is_low_limit {
            CellStatus::LowLimit
        } else if reading.is_comment {
            CellStatus::Comment
        } else {
            CellStatus::Normal
        }
    }

    /// Badge text for limit violations.
    pub fn alert_label(self) -> Option<&'static str> {
        match self {
            CellStatus::HighLimit => Some("HIGH"),
            CellStatus::LowLimit => Some("LOW"),
            CellStatus::Comment | CellStatus::Normal => None,
        }
    }
}

/// Accepts `true`/`false`, `0`/`1`, their string forms, and `null`.
fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    struct FlagVisitor;

    impl Visitor<'_> for FlagVisitor {
        type Value = bool;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a boolean, 0/1, or a boolean string")
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<bool, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<bool, E> {
            match v {
                0 => Ok(false),
                1 => Ok(true),
                other => Err(E::invalid_value(de::Unexpected::Signed(other), &self)),
            }
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<bool, E> {
            match v {
                0 => Ok(false),
                1 => Ok(true),
                other => Err(E::invalid_value(de::Unexpected::Unsigned(other), &self)),
            }
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<bool, E> {
            match v.trim().to_ascii_lowercase().as_str() {
                "true" | "1" => Ok(true),
                "false" | "0" | "" => Ok(false),
                _ => Err(E::invalid_value(de::Unexpected::Str(v), &self)),
            }
        }

        fn visit_unit<E: de::Error>(self) -> Result<bool, E> {
            Ok(false)
        }

        fn visit_none<E: de::Error>(self) -> Result<bool, E> {
            Ok(false)
        }
    }

    deserializer.deserialize_any(FlagVisitor)
}

/// Values normally arrive as strings, but a bare number is accepted too.
fn value_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct ValueVisitor;

    impl Visitor<'_> for ValueVisitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string, a number, or null")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_unit<E: de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }

        fn visit_none<E: de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }
    }

    deserializer.deserialize_any(ValueVisitor)
}

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
