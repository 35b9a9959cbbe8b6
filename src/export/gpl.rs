//! GIMP palette (`.gpl`) output.

use crate::models::BoardResult;

const COLUMNS: usize = 5;

/// Palette named `name` with one swatch per color in rank order.
pub fn to_gpl(name: &str, result: &BoardResult) -> String {
    let mut out = String::from("GIMP Palette\n");
    // Line breaks would end the header early
    out.push_str(&format!("Name: {}\n", name.replace(['\n', '\r'], " ")));
    out.push_str(&format!("Columns: {COLUMNS}\n#\n"));

    for color in &result.colors {
        let c = color.color;
        out.push_str(&format!("{:>3} {:>3} {:>3}\t{}\n", c.r, c.g, c.b, color.name));
    }
    out
}
