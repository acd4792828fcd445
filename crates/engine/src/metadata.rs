// In crates/engine/src/metadata.rs

//! The chart-layout contract consumed by the browser renderer.
//!
//! This is a fixed table; it never depends on the data being charted.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesType {
    Time,
    Candlestick,
    Line,
    Histogram,
    Area,
}

/// Which OHLC field a candlestick column feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CandleComponent {
    Open,
    High,
    Low,
    Close,
}

/// A chart pane (`chart1`, `chart2`, ...): its share of the viewport height in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaneLayout {
    pub height: u8,
    pub timescale: bool,
}

/// How one data column is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesDescriptor {
    pub plot: bool,
    #[serde(rename = "type")]
    pub kind: SeriesType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<CandleComponent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlay: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub up_color: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub down_color: Option<&'static str>,
    /// The pane index; `None` for the time axis.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart: Option<u8>,
}

impl SeriesDescriptor {
    fn new(kind: SeriesType) -> Self {
        Self {
            plot: true,
            kind,
            component: None,
            overlay: None,
            color: None,
            up_color: None,
            down_color: None,
            chart: None,
        }
    }

    fn candle(component: CandleComponent) -> Self {
        let mut d = Self::new(SeriesType::Candlestick);
        d.component = Some(component);
        d.chart = Some(1);
        d
    }

    fn overlay(kind: SeriesType, color: &'static str, chart: u8) -> Self {
        let mut d = Self::new(kind);
        d.overlay = Some(true);
        d.color = Some(color);
        d.chart = Some(chart);
        d
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MetadataEntry {
    Pane(PaneLayout),
    Series(SeriesDescriptor),
}

/// Column name (or pane key) to rendering entry. Keys serialize in sorted order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ChartMetadata(BTreeMap<&'static str, MetadataEntry>);

impl ChartMetadata {
    pub fn get(&self, key: &str) -> Option<&MetadataEntry> {
        self.0.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

static CHART_METADATA: LazyLock<ChartMetadata> = LazyLock::new(|| {
    use MetadataEntry::{Pane, Series};
    use SeriesType::*;

    let pane = |height| Pane(PaneLayout { height, timescale: false });

    let mut volume = SeriesDescriptor::new(Histogram);
    volume.overlay = Some(true);
    volume.up_color = Some("#089981");
    volume.down_color = Some("#f23645");
    volume.chart = Some(1);

    ChartMetadata(BTreeMap::from([
        ("chart1", pane(60)),
        ("chart2", pane(20)),
        ("chart3", pane(20)),
        ("Date", Series(SeriesDescriptor::new(Time))),
        ("Open", Series(SeriesDescriptor::candle(CandleComponent::Open))),
        ("High", Series(SeriesDescriptor::candle(CandleComponent::High))),
        ("Low", Series(SeriesDescriptor::candle(CandleComponent::Low))),
        ("Close", Series(SeriesDescriptor::candle(CandleComponent::Close))),
        ("SMA20", Series(SeriesDescriptor::overlay(Line, "#f07b01", 1))),
        ("SMA50", Series(SeriesDescriptor::overlay(Line, "#2962ff", 1))),
        ("Volume", Series(volume)),
        ("Equity", Series(SeriesDescriptor::overlay(Area, "#2962ff", 2))),
        ("Holdings", Series(SeriesDescriptor::overlay(Line, "#2962ff", 3))),
    ]))
});

/// The static chart layout shared by every response.
pub fn chart_metadata() -> &'static ChartMetadata {
    &CHART_METADATA
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panes_serialize_as_height_and_timescale() {
        let json = serde_json::to_value(chart_metadata()).unwrap();
        assert_eq!(json["chart1"], serde_json::json!({"height": 60, "timescale": false}));
        assert_eq!(json["chart3"]["height"], 20);
    }

    #[test]
    fn series_use_the_renderer_field_names() {
        let json = serde_json::to_value(chart_metadata()).unwrap();
        assert_eq!(
            json["Volume"],
            serde_json::json!({
                "plot": true, "type": "histogram", "overlay": true,
                "upColor": "#089981", "downColor": "#f23645", "chart": 1
            })
        );
        assert_eq!(json["Close"], serde_json::json!({"plot": true, "type": "candlestick", "component": "close", "chart": 1}));
        assert_eq!(json["Date"], serde_json::json!({"plot": true, "type": "time"}));
        assert_eq!(json["Equity"]["type"], "area");
        assert_eq!(json["Holdings"]["chart"], 3);
    }

    #[test]
    fn has_every_plotted_column() {
        let keys: Vec<_> = chart_metadata().keys().collect();
        for key in ["Open", "High", "Low", "Close", "SMA20", "SMA50", "Volume", "Equity", "Holdings"] {
            assert!(keys.contains(&key), "missing {}", key);
        }
        assert_eq!(chart_metadata().len(), 13);
    }
}
