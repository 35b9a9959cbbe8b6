//! `rank,hex_code,name,temperature,weight_percent`

use crate::models::BoardResult;

pub const CSV_HEADER: &str = "rank,hex_code,name,temperature,weight_percent";

/// One row per color in rank order; weight as a percentage with two
/// decimals.
pub fn to_csv(result: &BoardResult) -> String {
    let mut out = String::with_capacity(64 * (result.colors.len() + 1));
    out.push_str(CSV_HEADER);
    out.push('\n');

    for (i, color) in result.colors.iter().enumerate() {
        out.push_str(&format!(
            "{},{},{},{},{:.2}\n",
            i + 1,
            color.color.hex(),
            field(color.name),
            color.temperature,
            color.weight * 100.0
        ));
    }
    out
}

/// Quote a field when it contains a separator, a quote or a line break.
fn field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hue_engine::{AggregatedColor, Insight, Rgb, Temperature};
    use pretty_assertions::assert_eq;

    fn color(rgb: Rgb, weight: f32, name: &'static str, temperature: Temperature) -> AggregatedColor {
        AggregatedColor {
            color: rgb,
            weight,
            image_count: 1,
            first_image: 0,
            name,
            temperature,
        }
    }

    #[test]
    fn test_csv_rows() {
        let result = BoardResult {
            pin_count: 3,
            colors: vec![
                color(Rgb::new(253, 3, 1), 2.0 / 3.0, "red", Temperature::Warm),
                color(Rgb::new(0, 0, 255), 1.0 / 3.0, "blue", Temperature::Cool),
            ],
            insight: Insight::insufficient(),
        };

        assert_eq!(
            to_csv(&result),
            "rank,hex_code,name,temperature,weight_percent\n\
             1,#fd0301,red,warm,66.67\n\
             2,#0000ff,blue,cool,33.33\n"
        );
    }

    #[test]
    fn test_csv_empty_result_has_header_only() {
        let result = BoardResult {
            pin_count: 0,
            colors: vec![],
            insight: Insight::insufficient(),
        };
        assert_eq!(to_csv(&result), format!("{CSV_HEADER}\n"));
    }

    #[test]
    fn test_field_quoting() {
        assert_eq!(field("red"), "red");
        assert_eq!(field("a,b"), "\"a,b\"");
        assert_eq!(field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
