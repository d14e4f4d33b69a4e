// File: crates/chart-core/src/dataset.rs
// Summary: Typed GDP records, the raw feed payload, and the transform between them.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::DataLoadError;

/// Date format used by the feed and by the `data-date` attributes.
pub const ISO_DATE: &str = "%Y-%m-%d";

/// One quarter of GDP: calendar date and value in billions of dollars.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DataPoint {
    pub date: NaiveDate,
    pub value: f64,
}

impl DataPoint {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }

    /// `YYYY-MM-DD`, as exposed through `data-date`.
    pub fn iso_date(&self) -> String {
        self.date.format(ISO_DATE).to_string()
    }

    /// Shortest decimal form of the value, as exposed through `data-gdp`.
    /// Magnitudes of `1e21` and up, or below `1e-6`, switch to exponent form (`1e+21`, `1.5e-7`).
    pub fn value_attr(&self) -> String {
        let v = self.value;
        let mag = v.abs();
        if v != 0.0 && (mag >= 1e21 || mag < 1e-6) {
            let exp = format!("{:e}", v);
            match exp.split_once('e') {
                Some((mantissa, e)) if !e.starts_with('-') => format!("{mantissa}e+{e}"),
                _ => exp,
            }
        } else {
            format!("{}", v)
        }
    }
}

/// Feed metadata that rides along with `data`. Every field is optional.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct FeedMeta {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub source_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub from_date: Option<String>,
    #[serde(default)]
    pub to_date: Option<String>,
}

/// Second element of a feed record: the feed ships strings, but plain numbers are accepted too.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(f64),
    Text(String),
}

/// Body of the GDP feed before any typing: `{ "data": [[date, value], ...], ... }`.
#[derive(Clone, Debug, Deserialize)]
pub struct RawPayload {
    pub data: Vec<(String, RawValue)>,
    #[serde(flatten)]
    pub meta: FeedMeta,
}

/// Ordered GDP series. Feed order is kept as-is; it drives bar placement.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    points: Vec<DataPoint>,
    meta: FeedMeta,
}

impl Dataset {
    pub fn new(points: Vec<DataPoint>) -> Self {
        Self { points, meta: FeedMeta::default() }
    }

    pub fn with_meta(mut self, meta: FeedMeta) -> Self {
        self.meta = meta;
        self
    }

    /// Decode a response body and transform every record.
    pub fn from_json(bytes: &[u8]) -> Result<Self, DataLoadError> {
        let payload: RawPayload = serde_json::from_slice(bytes)?;
        Self::from_payload(payload)
    }

    /// Parse dates and values of each record. The first bad record fails the whole load.
    pub fn from_payload(payload: RawPayload) -> Result<Self, DataLoadError> {
        let mut points = Vec::with_capacity(payload.data.len());
        for (index, (raw_date, raw_value)) in payload.data.into_iter().enumerate() {
            let date = NaiveDate::parse_from_str(raw_date.trim(), ISO_DATE)
                .map_err(|_| DataLoadError::InvalidDate { index, raw: raw_date.clone() })?;
            let value = parse_value(&raw_value)
                .ok_or_else(|| DataLoadError::InvalidValue { index, raw: raw_value_text(&raw_value) })?;
            points.push(DataPoint { date, value });
        }
        Ok(Self { points, meta: payload.meta })
    }

    pub fn points(&self) -> &[DataPoint] { &self.points }
    pub fn iter(&self) -> std::slice::Iter<'_, DataPoint> { self.points.iter() }
    pub fn get(&self, index: usize) -> Option<&DataPoint> { self.points.get(index) }
    pub fn len(&self) -> usize { self.points.len() }
    pub fn is_empty(&self) -> bool { self.points.is_empty() }
    pub fn meta(&self) -> &FeedMeta { &self.meta }

    /// Earliest and latest date, regardless of position in the series.
    pub fn date_extent(&self) -> Option<(NaiveDate, NaiveDate)> {
        let first = self.points.first()?.date;
        Some(self.points.iter().fold((first, first), |(lo, hi), p| (lo.min(p.date), hi.max(p.date))))
    }

    pub fn max_value(&self) -> Option<f64> {
        self.points.iter().map(|p| p.value).reduce(f64::max)
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a DataPoint;
    type IntoIter = std::slice::Iter<'a, DataPoint>;
    fn into_iter(self) -> Self::IntoIter { self.points.iter() }
}

fn parse_value(raw: &RawValue) -> Option<f64> {
    let v = match raw {
        RawValue::Number(n) => *n,
        RawValue::Text(s) => s.trim().parse::<f64>().ok()?,
    };
    v.is_finite().then_some(v)
}

fn raw_value_text(raw: &RawValue) -> String {
    match raw {
        RawValue::Number(n) => n.to_string(),
        RawValue::Text(s) => s.clone(),
    }
}
