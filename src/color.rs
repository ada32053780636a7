use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
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

// ---------------------------------------------------------------------------
// Color mapping: genre label → Color32
// ---------------------------------------------------------------------------

/// Maps each genre label of the category index to a distinct colour.
#[derive(Debug, Clone)]
pub struct GenreColors {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl GenreColors {
    pub fn new(genres: &[String]) -> Self {
        let mapping = genres
            .iter()
            .cloned()
            .zip(generate_palette(genres.len()))
            .collect();

        GenreColors {
            mapping,
            default_color: Color32::LIGHT_BLUE,
        }
    }

    pub fn color_for(&self, genre: &str) -> Color32 {
        self.mapping
            .get(genre)
            .copied()
            .unwrap_or(self.default_color)
    }

    /// Colour of a movie: that of its first genre label.
    pub fn color_for_movie(&self, genres_clean: &str) -> Color32 {
        crate::data::model::split_labels(genres_clean)
            .next()
            .map(|g| self.color_for(g))
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_size() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(7).len(), 7);
    }

    #[test]
    fn test_movie_color_uses_first_genre() {
        let genres = vec!["Action".to_string(), "Drama".to_string()];
        let colors = GenreColors::new(&genres);
        assert_eq!(colors.color_for_movie("Drama, Action"), colors.color_for("Drama"));
        assert_ne!(colors.color_for("Drama"), colors.color_for("Action"));
        assert_eq!(colors.color_for_movie(""), Color32::LIGHT_BLUE);
        assert_eq!(colors.color_for("Western"), Color32::LIGHT_BLUE);
    }
}
