//! # Rendering Tests
//!
//! End-to-end checks of the text rasterizer through the invocation surface.
//! Every test uses the built-in bitmap face so results do not depend on the
//! fonts installed on the machine running them.

use std::path::Path;

use image::{GenericImageView, RgbImage};
use pretty_assertions::assert_eq;
use textcanvas::api::{Api, ImageRequest};
use textcanvas::prefs::PreferencesStore;
use textcanvas::render::{FontSpec, Numeric, OutputFormat, Rasterizer, RenderRequest, encode};

// ============================================================================
// HELPER FUNCTIONS
// ============================================================================

/// Api over a scratch preferences file and the built-in face.
fn test_api() -> (tempfile::TempDir, Api) {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = PreferencesStore::open(dir.path().join("config.json"));
    (dir, Api::new(store, Rasterizer::builtin_only()))
}

/// Api over a scratch preferences file and the bundled DejaVu Sans.
fn scalable_api() -> (tempfile::TempDir, Api) {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = PreferencesStore::open(dir.path().join("config.json"));
    (dir, Api::new(store, Rasterizer::with_fonts(vec![test_font()])))
}

fn test_font() -> FontSpec {
    FontSpec::Path(Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fonts/DejaVuSans.ttf"))
}

/// Parse a request with the given font size at the default width.
fn parsed(text: &str, font_size: i64) -> RenderRequest {
    RenderRequest::parse(
        text,
        "png",
        &Numeric::Int(font_size),
        "#FFFFFF",
        "#000000",
        &Numeric::Int(800),
    )
    .expect("valid request")
}

/// Render through the Api and decode the data URI back into an image.
fn render_rgb(api: &Api, request: &ImageRequest) -> (OutputFormat, RgbImage) {
    let outcome = api.generate_image(request);
    assert!(outcome.success, "render failed: {:?}", outcome.message);
    let uri = outcome.image_data.expect("image data on success");
    let (format, bytes) = encode::decode_data_uri(&uri).expect("valid data URI");
    let image = image::load_from_memory(&bytes).expect("decodable image");
    (format, image.to_rgb8())
}

/// Contiguous runs of rows containing at least one dark pixel.
fn dark_row_runs(image: &RgbImage) -> Vec<(u32, u32)> {
    let mut runs = Vec::new();
    let mut start: Option<u32> = None;

    for y in 0..image.height() {
        let dark = (0..image.width()).any(|x| image.get_pixel(x, y).0.iter().any(|&c| c < 160));
        match (dark, start) {
            (true, None) => start = Some(y),
            (false, Some(s)) => {
                runs.push((s, y - 1));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        runs.push((s, image.height() - 1));
    }

    runs
}

// ============================================================================
// SCENARIOS
// ============================================================================

#[test]
fn hello_blank_world_scenario() {
    let (_dir, api) = test_api();
    let request = ImageRequest::new("Hello\n\nWorld", "png", 24, "#FFFFFF", "#000000", 800);

    let outcome = api.generate_image(&request);
    assert!(outcome.success);
    let uri = outcome.image_data.clone().unwrap();
    assert!(uri.starts_with("data:image/png;base64,"));

    let (format, image) = render_rgb(&api, &request);
    assert_eq!(format, OutputFormat::Png);
    assert_eq!(image.width(), 800);
    assert!(image.height() >= 200);

    let runs = dark_row_runs(&image);
    assert_eq!(runs.len(), 2, "expected two text regions, got {:?}", runs);

    // The blank paragraph adds a full line plus a paragraph gap between them
    let gap = runs[1].0 - runs[0].1;
    assert!(gap > 60, "gap between regions too small: {:?}", runs);
}

#[test]
fn blank_paragraph_widens_gap() {
    let (_dir, api) = test_api();
    let (_, tight) = render_rgb(
        &api,
        &ImageRequest::new("Hello\nWorld", "png", 24, "#FFFFFF", "#000000", 800),
    );
    let (_, loose) = render_rgb(
        &api,
        &ImageRequest::new("Hello\n\nWorld", "png", 24, "#FFFFFF", "#000000", 800),
    );

    let tight_runs = dark_row_runs(&tight);
    let loose_runs = dark_row_runs(&loose);
    assert_eq!(tight_runs.len(), 2);
    assert_eq!(loose_runs.len(), 2);
    assert!(loose_runs[1].0 - loose_runs[0].1 > tight_runs[1].0 - tight_runs[0].1);
}

#[test]
fn text_uses_requested_colors() {
    let (_dir, api) = test_api();
    let (_, image) = render_rgb(
        &api,
        &ImageRequest::new("MMMMMMMM", "bmp", 24, "#0000FF", "#FFFF00", 400),
    );

    // Corners keep the background (allowing for filter rounding)
    let near_blue = |p: &image::Rgb<u8>| p.0[0] < 3 && p.0[1] < 3 && p.0[2] > 252;
    assert!(near_blue(image.get_pixel(0, 0)));
    assert!(near_blue(image.get_pixel(399, image.height() - 1)));

    // Glyph pixels move toward yellow
    assert!(image.pixels().any(|p| p.0[0] > 100 && p.0[1] > 100 && p.0[2] < 200));
}

// ============================================================================
// PROPERTIES
// ============================================================================

#[test]
fn output_width_matches_request() {
    let (_dir, api) = test_api();
    for width in [100u32, 333, 800, 1201] {
        let request = ImageRequest::new(
            "The quick brown fox jumps over the lazy dog",
            "png",
            12,
            "#FFFFFF",
            "#000000",
            width,
        );
        let (_, image) = render_rgb(&api, &request);
        assert_eq!(image.width(), width);
        assert!(image.height() >= 200);
    }
}

#[test]
fn long_text_grows_canvas() {
    let (_dir, api) = test_api();
    let text = (0..20).map(|i| format!("paragraph {}", i)).collect::<Vec<_>>().join("\n");
    let request = ImageRequest::new(text, "png", 24, "#FFFFFF", "#000000", 800);
    let (_, image) = render_rgb(&api, &request);
    assert!(image.height() > 200);

    let runs = dark_row_runs(&image);
    assert_eq!(runs.len(), 20);
}

#[test]
fn larger_font_wraps_into_more_lines() {
    let rasterizer = Rasterizer::builtin_only();
    let text = "lorem ipsum dolor sit amet ".repeat(20);

    let small = rasterizer.layout(&parsed(&text, 12)).unwrap();
    let large = rasterizer.layout(&parsed(&text, 48)).unwrap();

    assert!(large.paragraphs[0].lines().len() > small.paragraphs[0].lines().len());
    assert!(large.canvas_height > small.canvas_height);
}

#[test]
fn paragraph_count_is_preserved() {
    let rasterizer = Rasterizer::builtin_only();
    let text = "first\n\n \t \nsecond line here\n\nthird";
    let layout = rasterizer.layout(&parsed(text, 24)).unwrap();
    let blanks: Vec<bool> = layout.paragraphs.iter().map(|p| p.is_blank()).collect();
    assert_eq!(blanks, vec![false, true, true, false, true, false]);
    assert_eq!(layout.paragraphs[3].lines(), ["second line here".to_string()]);
}

#[test]
fn rendering_is_deterministic() {
    let (_dir, api) = test_api();
    let request =
        ImageRequest::new("Same input\n\nsame bytes", "jpeg", 20, "#FAFAFA", "#333333", 640);
    let first = api.generate_image(&request);
    let second = api.generate_image(&request);
    assert!(first.success);
    assert_eq!(first, second);
}

#[test]
fn unsupported_format_falls_back_to_png() {
    let (_dir, api) = test_api();
    let request = ImageRequest::new("gif please", "gif", 24, "#FFFFFF", "#000000", 800);
    let outcome = api.generate_image(&request);
    assert!(outcome.success);

    let uri = outcome.image_data.unwrap();
    assert!(uri.starts_with("data:image/png;base64,"));
    let (_, bytes) = encode::decode_data_uri(&uri).unwrap();
    assert_eq!(image::guess_format(&bytes).unwrap(), image::ImageFormat::Png);
}

#[test]
fn every_format_decodes() {
    let (_dir, api) = test_api();
    for (name, expected) in [
        ("png", image::ImageFormat::Png),
        ("jpeg", image::ImageFormat::Jpeg),
        ("bmp", image::ImageFormat::Bmp),
    ] {
        let request = ImageRequest::new("format", name, 24, "#FFFFFF", "#000000", 320);
        let outcome = api.generate_image(&request);
        let uri = outcome.image_data.expect("success");
        assert!(uri.starts_with(&format!("data:image/{};base64,", name)));

        let (_, bytes) = encode::decode_data_uri(&uri).unwrap();
        assert_eq!(image::guess_format(&bytes).unwrap(), expected);
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.dimensions().0, 320);
    }
}

#[test]
fn empty_text_renders_minimum_canvas() {
    let (_dir, api) = test_api();
    let (_, image) = render_rgb(&api, &ImageRequest::new("", "png", 24, "#FFFFFF", "#000000", 800));
    assert_eq!((image.width(), image.height()), (800, 200));
    assert!(dark_row_runs(&image).is_empty());
}

// ============================================================================
// SCALABLE FONT
// ============================================================================

#[test]
fn scalable_font_line_height_follows_glyph_extent() {
    let rasterizer = Rasterizer::with_fonts(vec![test_font()]);
    let layout = rasterizer.layout(&parsed("Hello\n\nWorld", 24)).unwrap();

    // 'A' at a 48px em ends 45px down, plus the 20px line spacing
    assert_eq!(layout.line_height, 65);
    assert_eq!(layout.canvas_height, 160 + 3 * (65 + 80));
    assert_eq!(layout.final_height(), 297);
}

#[test]
fn scalable_font_hello_blank_world() {
    let (_dir, api) = scalable_api();
    let request = ImageRequest::new("Hello\n\nWorld", "png", 24, "#FFFFFF", "#000000", 800);
    let (_, image) = render_rgb(&api, &request);

    assert_eq!((image.width(), image.height()), (800, 297));
    let runs = dark_row_runs(&image);
    assert_eq!(runs.len(), 2, "expected two text regions, got {:?}", runs);
    assert!(runs[1].0 - runs[0].1 > 60, "gap too small: {:?}", runs);

    // Anti-aliased edges leave grays between paper and ink
    let grays = image
        .pixels()
        .filter(|p| p.0[0] > 60 && p.0[0] < 195)
        .count();
    assert!(grays > 0);
}

#[test]
fn scalable_font_rendering_is_deterministic() {
    let (_dir, api) = scalable_api();
    let request = ImageRequest::new("Kerning AV To\n\nWave", "bmp", 30, "#FAFAFA", "#202020", 640);
    let first = api.generate_image(&request);
    assert!(first.success, "{:?}", first.message);
    assert_eq!(first, api.generate_image(&request));

    // And it differs from the bitmap fallback
    let (_dir, bitmap_api) = test_api();
    assert!(first.image_data != bitmap_api.generate_image(&request).image_data);
}

// ============================================================================
// FAILURES
// ============================================================================

#[test]
fn malformed_colors_fail() {
    let (_dir, api) = test_api();
    for (bg, fg) in [("#FFFFF", "#000000"), ("#FFFFFF", "black"), ("#GGGGGG", "#000000")] {
        let outcome = api.generate_image(&ImageRequest::new("x", "png", 24, bg, fg, 800));
        assert!(!outcome.success, "{} / {} should fail", bg, fg);
        assert!(outcome.image_data.is_none());
        assert!(outcome.message.unwrap().contains("Invalid color"));
    }
}

#[test]
fn non_numeric_inputs_fail() {
    let (_dir, api) = test_api();

    let outcome =
        api.generate_image(&ImageRequest::new("x", "png", "big", "#FFFFFF", "#000000", 800));
    assert!(!outcome.success);
    assert!(outcome.message.unwrap().contains("font size"));

    let outcome =
        api.generate_image(&ImageRequest::new("x", "png", 24, "#FFFFFF", "#000000", "-3"));
    assert!(!outcome.success);
}

#[test]
fn numeric_strings_are_accepted() {
    let (_dir, api) = test_api();
    let request = ImageRequest::new("x", "png", "24", "#FFFFFF", "#000000", "512");
    let (_, image) = render_rgb(&api, &request);
    assert_eq!(image.width(), 512);
}

#[test]
fn failure_leaves_api_usable() {
    let (_dir, api) = test_api();
    let broken = ImageRequest::new("x", "png", 24, "nope", "#000000", 800);
    let valid = ImageRequest::new("x", "png", 24, "#FFFFFF", "#000000", 800);
    assert!(!api.generate_image(&broken).success);
    assert!(api.generate_image(&valid).success);
}
