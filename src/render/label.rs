use std::sync::Arc;

use anyhow::Context as _;

use crate::foundation::{
    core::Rgba8,
    error::{ChipflowError, ChipflowResult},
};

/// Text drawn on the processor block.
pub const PROCESSOR_LABEL: &str = "IA";

/// A rasterised label, square, premultiplied RGBA8.
#[derive(Clone, Debug)]
pub struct LabelRaster {
    pub size: u32,
    pub rgba8_premul: Vec<u8>,
}

/// System font database for label text.
///
/// Loading is slow, so surfaces build this once and share it.
pub fn system_fontdb() -> Arc<usvg::fontdb::Database> {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    tracing::debug!(faces = db.len(), "loaded system fonts");
    Arc::new(db)
}

/// SVG for `text` centred in a `size` x `size` box, bold sans-serif at `font_px`.
pub fn label_svg(text: &str, size: u32, font_px: f64, color: Rgba8) -> String {
    let escaped = text
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;");
    let mid = f64::from(size) / 2.0;
    format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{s}" height="{s}" viewBox="0 0 {s} {s}">"#,
            r#"<text x="{m}" y="{m}" font-family="sans-serif" font-weight="bold" font-size="{f}" "#,
            r#"text-anchor="middle" dominant-baseline="central" "#,
            r#"fill="rgb({r},{g},{b})" fill-opacity="{a:.3}">{t}</text></svg>"#
        ),
        s = size,
        m = mid,
        f = font_px,
        r = color.r,
        g = color.g,
        b = color.b,
        a = f64::from(color.a) / 255.0,
        t = escaped,
    )
}

/// Rasterise a label through usvg/resvg. Missing fonts give a transparent raster.
pub fn rasterize_label(
    text: &str,
    size: u32,
    font_px: f64,
    color: Rgba8,
    fontdb: Arc<usvg::fontdb::Database>,
) -> ChipflowResult<LabelRaster> {
    if size == 0 {
        return Err(ChipflowError::render("label size must be non-zero"));
    }

    let svg = label_svg(text, size, font_px, color);
    let opts = usvg::Options {
        fontdb,
        ..Default::default()
    };
    let tree = usvg::Tree::from_str(&svg, &opts).context("parse label svg")?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(size, size)
        .ok_or_else(|| ChipflowError::render("failed to allocate label pixmap"))?;
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::default(),
        &mut pixmap.as_mut(),
    );

    Ok(LabelRaster {
        size,
        rgba8_premul: pixmap.data().to_vec(),
    })
}
