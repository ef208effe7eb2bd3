use std::collections::HashMap;
use std::path::Path;

use crate::config::RenderConfig;
use crate::foundation::core::Rgba8;
use crate::foundation::error::{VizError, VizResult};

/// RGBA8 brush color used by Parley text layout.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

impl From<Rgba8> for TextBrushRgba8 {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

const LAYOUT_CACHE_LIMIT: usize = 4096;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct LayoutKey {
    text: String,
    size_bits: u32,
    brush: TextBrushRgba8,
}

/// Shapes single text lines with one registered font and keeps the layouts for reuse.
///
/// Frames repeat the same labels constantly, so a line is shaped once per (text, size, color).
pub(crate) struct TextEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family_name: String,
    font: vello_cpu::peniko::FontData,
    cache: HashMap<LayoutKey, parley::Layout<TextBrushRgba8>>,
}

impl TextEngine {
    /// Register `bytes` (face `index` is used for glyph drawing) and build an engine around it.
    pub(crate) fn from_font_bytes(bytes: Vec<u8>, index: u32) -> VizResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| VizError::render("no font families registered from font bytes"))?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| VizError::render("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            font: vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), index),
            cache: HashMap::new(),
        })
    }

    /// Load the font a config asks for: `font_path`, then `DSVIZ_FONT`, then a system sans-serif.
    ///
    /// Returns `Ok(None)` when nothing is configured and no system font exists. A configured file
    /// that cannot be read is an error.
    pub(crate) fn from_config(cfg: &RenderConfig) -> VizResult<Option<Self>> {
        if let Some(path) = cfg.font_file() {
            let bytes = read_font(&path)?;
            tracing::debug!(path = %path.display(), "using configured font");
            return Self::from_font_bytes(bytes, 0).map(Some);
        }
        match system_sans_font() {
            Some((bytes, index)) => Self::from_font_bytes(bytes, index).map(Some),
            None => Ok(None),
        }
    }

    /// Font family the engine shapes with.
    pub(crate) fn family_name(&self) -> &str {
        &self.family_name
    }

    /// Font used to draw shaped glyphs.
    pub(crate) fn font(&self) -> &vello_cpu::peniko::FontData {
        &self.font
    }

    /// Shape one unwrapped line.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        size_px: f32,
        color: Rgba8,
    ) -> VizResult<&parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(VizError::render("text size must be finite and > 0"));
        }
        let key = LayoutKey {
            text: text.to_owned(),
            size_bits: size_px.to_bits(),
            brush: color.into(),
        };
        if !self.cache.contains_key(&key) {
            if self.cache.len() >= LAYOUT_CACHE_LIMIT {
                self.cache.clear();
            }
            let layout = self.shape(text, size_px, key.brush);
            self.cache.insert(key.clone(), layout);
        }
        self.cache
            .get(&key)
            .ok_or_else(|| VizError::render("text layout cache lost an entry"))
    }

    fn shape(
        &mut self,
        text: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> parley::Layout<TextBrushRgba8> {
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        layout
    }
}

fn read_font(path: &Path) -> VizResult<Vec<u8>> {
    use anyhow::Context as _;
    let bytes = std::fs::read(path)
        .with_context(|| format!("read font file '{}'", path.display()))?;
    Ok(bytes)
}

/// Bytes and face index of the system's default sans-serif face, if any.
pub(crate) fn system_sans_font() -> Option<(Vec<u8>, u32)> {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    let id = db.query(&usvg::fontdb::Query {
        families: &[usvg::fontdb::Family::SansSerif],
        weight: usvg::fontdb::Weight::NORMAL,
        stretch: usvg::fontdb::Stretch::Normal,
        style: usvg::fontdb::Style::Normal,
    })?;
    let found = db.with_face_data(id, |data, index| (data.to_vec(), index));
    if found.is_none() {
        tracing::debug!("system sans-serif face could not be read");
    }
    found
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
