//! Rasterizes score strings with the game's TrueType font.

use std::fs;
use std::path::Path;

/// One rasterized glyph, positioned relative to the pen and the baseline
/// (`ymin` is the offset from the baseline to the glyph's bottom edge,
/// positive upward).
#[derive(Debug, Clone)]
pub struct GlyphImage {
    pub xmin: i32,
    pub ymin: i32,
    pub width: usize,
    pub height: usize,
    pub advance: f32,
    pub coverage: Vec<u8>,
}

/// White text on a transparent background, tightly packed RGBA8.
#[derive(Debug, Clone)]
pub struct TextBitmap {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

pub struct ScoreFont {
    font: fontdue::Font,
    px: f32,
}

impl ScoreFont {
    pub fn load(path: &Path, px: f32) -> Result<Self, String> {
        let bytes =
            fs::read(path).map_err(|e| format!("Unable to read font '{}': {e}", path.display()))?;
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| format!("Unable to parse font '{}': {e}", path.display()))?;
        log::info!("Loaded font '{}' at {}px", path.display(), px);
        Ok(Self { font, px })
    }

    pub fn render(&self, text: &str) -> Result<TextBitmap, String> {
        let line = self
            .font
            .horizontal_line_metrics(self.px)
            .ok_or_else(|| "Font has no horizontal line metrics".to_string())?;
        let glyphs: Vec<GlyphImage> = text
            .chars()
            .map(|c| {
                let (metrics, coverage) = self.font.rasterize(c, self.px);
                GlyphImage {
                    xmin: metrics.xmin,
                    ymin: metrics.ymin,
                    width: metrics.width,
                    height: metrics.height,
                    advance: metrics.advance_width,
                    coverage,
                }
            })
            .collect();
        Ok(compose_line(&glyphs, line.ascent, line.descent))
    }
}

/// Lay glyphs out left to right on a single baseline.
///
/// The bitmap is as tall as the font's ascent-to-descent span and as wide as
/// the advance sum or the rightmost ink, whichever is larger. Never empty.
pub fn compose_line(glyphs: &[GlyphImage], ascent: f32, descent: f32) -> TextBitmap {
    let baseline = ascent.ceil() as i32;
    let height = ((ascent - descent).ceil() as i32).max(1);

    let mut pen = 0.0f32;
    let mut origins = Vec::with_capacity(glyphs.len());
    let mut width = 0i32;
    for glyph in glyphs {
        let origin_x = pen.round() as i32 + glyph.xmin;
        origins.push(origin_x);
        width = width.max(origin_x + glyph.width as i32);
        pen += glyph.advance;
    }
    let width = width.max(pen.ceil() as i32).max(1);

    let mut rgba = vec![0u8; width as usize * height as usize * 4];
    for (glyph, &origin_x) in glyphs.iter().zip(&origins) {
        let top = baseline - glyph.ymin - glyph.height as i32;
        for row in 0..glyph.height {
            let y = top + row as i32;
            if y < 0 || y >= height {
                continue;
            }
            for col in 0..glyph.width {
                let x = origin_x + col as i32;
                if x < 0 || x >= width {
                    continue;
                }
                let alpha = glyph.coverage[row * glyph.width + col];
                if alpha == 0 {
                    continue;
                }
                let i = (y as usize * width as usize + x as usize) * 4;
                rgba[i..i + 4].copy_from_slice(&[255, 255, 255, alpha]);
            }
        }
    }

    TextBitmap {
        width: width as u32,
        height: height as u32,
        rgba,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    impl TextBitmap {
        fn alpha_at(&self, x: u32, y: u32) -> u8 {
            self.rgba[((y * self.width + x) * 4 + 3) as usize]
        }
    }

    fn block(width: usize, height: usize, advance: f32) -> GlyphImage {
        GlyphImage {
            xmin: 0,
            ymin: 0,
            width,
            height,
            advance,
            coverage: vec![255; width * height],
        }
    }

    #[test]
    fn glyphs_sit_on_baseline() {
        let bitmap = compose_line(&[block(2, 3, 4.0), block(2, 3, 4.0)], 10.0, -2.0);
        assert_eq!(bitmap.width, 8);
        assert_eq!(bitmap.height, 12);
        // Rows 7..10 hold ink, directly above the baseline at y = 10.
        assert_eq!(bitmap.alpha_at(0, 7), 255);
        assert_eq!(bitmap.alpha_at(1, 9), 255);
        assert_eq!(bitmap.alpha_at(4, 9), 255);
        assert_eq!(bitmap.alpha_at(0, 6), 0);
        assert_eq!(bitmap.alpha_at(0, 10), 0);
        assert_eq!(bitmap.alpha_at(2, 8), 0);
    }

    #[test]
    fn descender_extends_below_baseline() {
        let mut glyph = block(1, 4, 2.0);
        glyph.ymin = -2;
        let bitmap = compose_line(&[glyph], 10.0, -3.0);
        assert_eq!(bitmap.alpha_at(0, 11), 255);
        assert_eq!(bitmap.alpha_at(0, 8), 255);
        assert_eq!(bitmap.alpha_at(0, 7), 0);
    }

    #[test]
    fn coverage_becomes_alpha() {
        let mut glyph = block(1, 1, 1.0);
        glyph.coverage = vec![128];
        let bitmap = compose_line(&[glyph], 1.0, 0.0);
        assert_eq!(bitmap.rgba, vec![255, 255, 255, 128]);
    }

    #[test]
    fn ink_past_advance_widens_bitmap() {
        let mut glyph = block(5, 1, 3.0);
        glyph.xmin = 1;
        let bitmap = compose_line(&[glyph], 1.0, 0.0);
        assert_eq!(bitmap.width, 6);
    }

    #[test]
    fn empty_text_is_never_zero_sized() {
        let bitmap = compose_line(&[], 0.0, 0.0);
        assert_eq!((bitmap.width, bitmap.height), (1, 1));
        assert_eq!(bitmap.rgba.len(), 4);
    }

    #[test]
    fn bundled_font_renders_scores() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../..")
            .join(crate::assets::FONT_PATH);
        let font = ScoreFont::load(&path, crate::assets::SCORE_FONT_PX)
            .expect("bundled font should load");
        let zero = font.render("0").expect("render 0");
        let ten = font.render("10").expect("render 10");
        assert!(zero.height as f32 >= crate::assets::SCORE_FONT_PX * 0.75);
        assert!(ten.width > zero.width);
        assert!(zero.rgba.chunks(4).any(|px| px[3] > 0));
    }

    #[test]
    fn missing_font_file_is_reported() {
        let path = std::env::temp_dir().join("pong_missing_font_for_test.ttf");
        let err = ScoreFont::load(&path, 48.0)
            .err()
            .expect("missing font should fail");
        assert!(err.contains("Unable to read font"));
    }
}
