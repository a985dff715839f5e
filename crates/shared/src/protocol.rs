use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    domain::{ControlId, ControlSpec, ControlValue, ViewId},
    error::ApiError,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ClientRequest {
    SetControl {
        control: ControlId,
        value: ControlValue,
    },
    RenderAll,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ServerEvent {
    SessionOpened {
        controls: Vec<ControlSpec>,
    },
    ViewRendered {
        view: ViewId,
        chart: Chart,
    },
    ViewFailed {
        view: ViewId,
        error: ApiError,
    },
    Error(ApiError),
}

/// Control overrides accepted by the one-shot render route.
pub type ControlOverrides = BTreeMap<ControlId, ControlValue>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    #[serde(flatten)]
    pub body: ChartBody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartBody {
    Histogram {
        bins: Vec<HistogramBin>,
    },
    Bar {
        bars: Vec<Bar>,
    },
    HorizontalBar {
        bars: Vec<Bar>,
        log_scale: bool,
    },
    Scatter {
        points: Vec<Point>,
        color: String,
    },
    StackedBar {
        rows: Vec<StackedCount>,
    },
    LineScatter {
        points: Vec<YearCount>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackedCount {
    pub category: String,
    pub group: String,
    pub count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearCount {
    pub year: i32,
    pub count: u64,
}

/// Descriptive statistics of net worth, mirroring a dataframe `describe()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorthSummary {
    pub count: usize,
    pub mean: f64,
    pub std: Option<f64>,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}
