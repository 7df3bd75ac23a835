//! Unit tests for the frame renderers.
//!
//! These cover the behaviors a viewer actually sees:
//! - Intensity to glyph mapping across the whole range
//! - ASCII grid shape and the reference 2x2 frame
//! - Half-block shape and colors

use image::{Rgba, RgbaImage};
use termcam::ascii::*;
use termcam::terminal::ColorProfile;

fn plain() -> RenderOptions {
    RenderOptions::new(GlyphTable::default(), ColorOverride::UNSET, ColorProfile::Ascii)
}

// ==================== Glyph Mapping Tests ====================

#[test]
fn test_transparent_is_lightest_glyph() {
    for table in [CharSet::Classic, CharSet::Standard, CharSet::Blocks, CharSet::Minimal] {
        let table = GlyphTable::from(table);
        for rgb in [[0, 0, 0], [255, 255, 255], [12, 200, 99]] {
            let pixel = Rgba([rgb[0], rgb[1], rgb[2], 0]);
            assert_eq!(glyph_for(pixel, &table), table.lightest());
        }
    }
}

#[test]
fn test_opaque_white_is_densest_glyph() {
    let white = Rgba([255, 255, 255, 255]);
    for table in [CharSet::Classic, CharSet::Standard, CharSet::Blocks, CharSet::Minimal] {
        let table = GlyphTable::from(table);
        assert_eq!(glyph_for(white, &table), table.densest());
    }
}

#[test]
fn test_glyph_index_monotonic_in_intensity() {
    for levels in [2, 4, 5, 10, 15, 70] {
        let mut previous = 0;
        for v in 0..=255u8 {
            let index = glyph_index(Rgba([v, v, v, 255]), levels);
            assert!(index >= previous, "levels {} value {}", levels, v);
            assert!(index < levels);
            previous = index;
        }
    }
}

#[test]
fn test_classic_reference_levels() {
    let table = GlyphTable::default();
    assert_eq!(glyph_for(Rgba([0, 0, 0, 255]), &table), ' ');
    assert_eq!(glyph_for(Rgba([128, 128, 128, 255]), &table), 't');
    assert_eq!(glyph_for(Rgba([255, 0, 0, 255]), &table), 'i');
    assert_eq!(glyph_for(Rgba([255, 255, 255, 255]), &table), '@');
}

#[test]
fn test_half_alpha_dims_glyph() {
    let table = GlyphTable::default();
    let opaque = glyph_index(Rgba([255, 255, 255, 255]), table.len());
    let faded = glyph_index(Rgba([255, 255, 255, 128]), table.len());
    assert!(faded < opaque);
}

#[test]
fn test_custom_glyph_table() {
    let table = GlyphTable::parse(" #").unwrap();
    assert_eq!(glyph_for(Rgba([0, 0, 0, 255]), &table), ' ');
    assert_eq!(glyph_for(Rgba([255, 255, 255, 255]), &table), '#');
    assert_eq!(
        GlyphTable::parse("x").unwrap_err(),
        RenderError::GlyphTableTooShort(1)
    );
}

// ==================== ASCII Rendering Tests ====================

#[test]
fn test_ascii_reference_frame() {
    let mut img = RgbaImage::new(2, 2);
    img.put_pixel(0, 0, Rgba([0, 0, 0, 255]));
    img.put_pixel(1, 0, Rgba([255, 255, 255, 255]));
    img.put_pixel(0, 1, Rgba([128, 128, 128, 255]));
    img.put_pixel(1, 1, Rgba([255, 0, 0, 255]));

    assert_eq!(render_ascii(2, 2, &plain(), &img), " @\nti\n");
}

#[test]
fn test_ascii_grid_shape() {
    let img = RgbaImage::from_fn(13, 7, |x, y| {
        let v = ((x * 19 + y * 31) % 256) as u8;
        Rgba([v, v, v, 255])
    });
    for (w, h) in [(13, 7), (20, 10), (5, 3), (1, 1)] {
        let out = render_ascii(w, h, &plain(), &img);
        assert_eq!(out.matches('\n').count(), h as usize);
        assert!(out.ends_with('\n'));
        for line in out.lines() {
            assert_eq!(line.chars().count(), w as usize);
        }
    }
}

#[test]
fn test_ascii_colored_output_keeps_glyphs() {
    let img = RgbaImage::from_pixel(3, 1, Rgba([255, 255, 255, 255]));
    let options = RenderOptions::new(
        GlyphTable::default(),
        ColorOverride::UNSET,
        ColorProfile::TrueColor,
    );
    let out = render_ascii(3, 1, &options, &img);
    assert_eq!(out.matches('@').count(), 3);
    assert!(out.contains("38;2;255;255;255"));
}

// ==================== Half-Block Rendering Tests ====================

#[test]
fn test_ansi_line_count_is_half_height() {
    for (w, h) in [(1, 2), (4, 4), (7, 10)] {
        let img = RgbaImage::from_pixel(w, h, Rgba([9, 9, 9, 255]));
        let out = render_ansi(ColorProfile::Ascii, &img).unwrap();
        assert_eq!(out.lines().count(), (h / 2) as usize);
        for line in out.lines() {
            assert_eq!(line.chars().count(), w as usize);
            assert!(line.chars().all(|c| c == UPPER_HALF_BLOCK));
        }
    }
}

#[test]
fn test_ansi_reference_frame() {
    // 2x4: red over blue in column 0, green over white in column 1,
    // then a black row pair
    let mut img = RgbaImage::from_pixel(2, 4, Rgba([0, 0, 0, 255]));
    img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
    img.put_pixel(0, 1, Rgba([0, 0, 255, 255]));
    img.put_pixel(1, 0, Rgba([0, 255, 0, 255]));
    img.put_pixel(1, 1, Rgba([255, 255, 255, 255]));

    let out = render_ansi(ColorProfile::TrueColor, &img).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);

    let first = lines[0];
    let red = first.find("38;2;255;0;0").unwrap();
    let blue = first.find("48;2;0;0;255").unwrap();
    let green = first.find("38;2;0;255;0").unwrap();
    let white = first.find("48;2;255;255;255").unwrap();
    assert!(red < green && blue < white);
    assert_eq!(first.matches(UPPER_HALF_BLOCK).count(), 2);

    assert!(lines[1].contains("38;2;0;0;0"));
    assert!(lines[1].contains("48;2;0;0;0"));
}

#[test]
fn test_ansi_plain_reference() {
    let img = RgbaImage::from_pixel(3, 4, Rgba([200, 10, 10, 255]));
    assert_eq!(render_ansi(ColorProfile::Ascii, &img).unwrap(), "▀▀▀\n▀▀▀\n");
}

#[test]
fn test_ansi_rejects_odd_height() {
    let img = RgbaImage::new(2, 5);
    assert_eq!(
        render_ansi(ColorProfile::Ascii, &img).unwrap_err(),
        RenderError::OddHeight(5)
    );
}

// ==================== Zoom and Grid Tests ====================

#[test]
fn test_zoom_scales_reference_terminal() {
    let grid = GridSize::for_terminal(80, 24, RenderMode::Ascii);
    let expected = [(20, 6), (40, 12), (60, 18), (80, 24)];
    for (level, (w, h)) in (1..=4).zip(expected) {
        assert_eq!(grid.scaled(Zoom::new(level), RenderMode::Ascii), GridSize::new(w, h));
    }
}

#[test]
fn test_zoomed_render_leaves_margin_blank() {
    let grid = GridSize::new(4, 4);
    let scaled = grid.scaled(Zoom::new(2), RenderMode::Ascii);
    let source = RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 255]));
    let img = resize_to(&source, scaled);
    assert_eq!(img.dimensions(), (2, 2));

    let out = render_ascii(grid.width, grid.height, &plain(), &img);
    assert_eq!(out, "    \n    \n    \n    \n");
}
