use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Catalog rgb column → Color32
// ---------------------------------------------------------------------------

/// Parse the catalog's six-digit hex `rgb` field (`"05131D"`, with or
/// without a leading `#`) into a [`Color32`].
pub fn parse_rgb_hex(rgb: &str) -> Option<Color32> {
    let hex = rgb.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color32::from_rgb(r, g, b))
}

/// Swatch color for a catalog color row, grey when the hex is malformed.
pub fn swatch_color(rgb: &str) -> Color32 {
    parse_rgb_hex(rgb).unwrap_or(Color32::GRAY)
}

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
/// Used for chart series that have no catalog color of their own.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_catalog_hex_values() {
        assert_eq!(parse_rgb_hex("05131D"), Some(Color32::from_rgb(5, 19, 29)));
        assert_eq!(parse_rgb_hex("#FFFFFF"), Some(Color32::WHITE));
        assert_eq!(parse_rgb_hex("FFF"), None);
        assert_eq!(parse_rgb_hex("GGGGGG"), None);
    }

    #[test]
    fn malformed_hex_falls_back_to_grey() {
        assert_eq!(swatch_color("not-a-color"), Color32::GRAY);
    }

    #[test]
    fn palette_size_matches_request() {
        assert!(generate_palette(0).is_empty());
        let colors = generate_palette(8);
        assert_eq!(colors.len(), 8);
        assert_ne!(colors[0], colors[4]);
    }
}
