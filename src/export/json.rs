//! JSON report.

use serde::Serialize;
use std::collections::BTreeMap;

use hue_engine::{AggregatedColor, Insight};

use crate::models::{BoardReport, ImageOutcome, ImageStatus, SnapshotSource};

#[derive(Serialize)]
struct ReportJson<'a> {
    board: BoardJson<'a>,
    source: SnapshotSource,
    pin_count: usize,
    partial: bool,
    analyzed_images: usize,
    skipped_images: usize,
    coverage: f32,
    unique_colors: usize,
    colors: Vec<ColorJson<'a>>,
    insights: InsightJson<'a>,
    images: Vec<ImageJson<'a>>,
}

#[derive(Serialize)]
struct BoardJson<'a> {
    url: &'a str,
    user: &'a str,
    slug: &'a str,
    name: String,
}

#[derive(Serialize)]
struct ColorJson<'a> {
    rgb: [u8; 3],
    hex: String,
    name: &'a str,
    temperature: &'static str,
    weight: f32,
}

impl<'a> From<&'a AggregatedColor> for ColorJson<'a> {
    fn from(c: &'a AggregatedColor) -> Self {
        Self {
            rgb: c.color.to_bytes(),
            hex: c.color.hex(),
            name: c.name,
            temperature: c.temperature.as_str(),
            weight: c.weight,
        }
    }
}

#[derive(Serialize)]
struct InsightJson<'a> {
    zeitgeist_score: f32,
    trend_confidence: &'a BTreeMap<&'static str, f32>,
    generational_appeal: &'a BTreeMap<&'static str, f32>,
    regional_preference: &'a BTreeMap<&'static str, f32>,
    dominant_temperature: &'static str,
    data_status: &'static str,
}

impl<'a> From<&'a Insight> for InsightJson<'a> {
    fn from(insight: &'a Insight) -> Self {
        Self {
            zeitgeist_score: insight.zeitgeist_score,
            trend_confidence: &insight.trend_confidence,
            generational_appeal: &insight.generational_appeal,
            regional_preference: &insight.regional_preference,
            dominant_temperature: insight
                .dominant_temperature
                .map_or("none", |t| t.as_str()),
            data_status: insight.data_status.as_str(),
        }
    }
}

#[derive(Serialize)]
struct ImageJson<'a> {
    index: usize,
    url: &'a str,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    colors: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

impl<'a> From<&'a ImageOutcome> for ImageJson<'a> {
    fn from(outcome: &'a ImageOutcome) -> Self {
        let (status, colors, error) = match &outcome.status {
            ImageStatus::Analyzed { colors } => ("analyzed", Some(*colors), None),
            ImageStatus::FetchFailed(e) => ("fetch_failed", None, Some(e.as_str())),
            ImageStatus::DecodeFailed(e) => ("decode_failed", None, Some(e.as_str())),
        };
        Self {
            index: outcome.index,
            url: &outcome.url,
            status,
            colors,
            error,
        }
    }
}

/// Pretty-printed JSON for the whole report.
pub fn to_json(report: &BoardReport) -> serde_json::Result<String> {
    let result = &report.result;
    let json = ReportJson {
        board: BoardJson {
            url: report.board.url().as_str(),
            user: report.board.user(),
            slug: report.board.slug(),
            name: report.board.display_name(),
        },
        source: report.source,
        pin_count: result.pin_count,
        partial: report.partial,
        analyzed_images: report.analyzed(),
        skipped_images: report.skipped(),
        coverage: report.coverage,
        unique_colors: report.unique_colors,
        colors: result.colors.iter().map(ColorJson::from).collect(),
        insights: InsightJson::from(&result.insight),
        images: report.outcomes.iter().map(ImageJson::from).collect(),
    };
    serde_json::to_string_pretty(&json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BoardId, BoardResult};
    use hue_engine::{Rgb, Temperature};
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn report() -> BoardReport {
        BoardReport {
            board: BoardId::parse("https://www.pinterest.com/jane/cozy-reds/").unwrap(),
            source: SnapshotSource::Live,
            partial: true,
            result: BoardResult {
                pin_count: 4,
                colors: vec![AggregatedColor {
                    color: Rgb::new(255, 0, 0),
                    weight: 1.0,
                    image_count: 1,
                    first_image: 0,
                    name: "red",
                    temperature: Temperature::Warm,
                }],
                insight: Insight::insufficient(),
            },
            outcomes: vec![
                ImageOutcome {
                    index: 0,
                    url: "https://i.pinimg.com/a.jpg".to_string(),
                    status: ImageStatus::Analyzed { colors: 1 },
                },
                ImageOutcome {
                    index: 1,
                    url: "https://i.pinimg.com/b.jpg".to_string(),
                    status: ImageStatus::FetchFailed("HTTP status 404".to_string()),
                },
            ],
            coverage: 1.0,
            unique_colors: 1,
        }
    }

    #[test]
    fn test_json_shape() {
        let value: Value = serde_json::from_str(&to_json(&report()).unwrap()).unwrap();

        assert_eq!(value["pin_count"], json!(4));
        assert_eq!(value["partial"], json!(true));
        assert_eq!(value["source"], json!("live"));
        assert_eq!(value["analyzed_images"], json!(1));
        assert_eq!(value["skipped_images"], json!(1));
        assert_eq!(value["board"]["name"], json!("jane's Cozy Reds"));
        assert_eq!(
            value["colors"][0],
            json!({
                "rgb": [255, 0, 0],
                "hex": "#ff0000",
                "name": "red",
                "temperature": "warm",
                "weight": 1.0
            })
        );
        assert_eq!(value["images"][1]["status"], json!("fetch_failed"));
        assert_eq!(value["images"][1]["error"], json!("HTTP status 404"));
        assert!(value["images"][0].get("error").is_none());
    }

    #[test]
    fn test_json_insufficient_insights() {
        let value: Value = serde_json::from_str(&to_json(&report()).unwrap()).unwrap();
        let insights = &value["insights"];

        assert_eq!(insights["data_status"], json!("insufficient_data"));
        assert_eq!(insights["dominant_temperature"], json!("none"));
        assert_eq!(insights["zeitgeist_score"], json!(0.0));
        assert_eq!(insights["trend_confidence"]["warm_nostalgia"], json!(0.0));
        assert_eq!(insights["regional_preference"]["nordic"], json!(0.0));
    }
}
