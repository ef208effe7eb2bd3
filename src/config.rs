//! Runtime configuration: canvas, pacing, palette and the numeric layout/panel knobs.
//!
//! Every field has a default, so a config file only names what it changes. Panel and sizing
//! knobs left unset are derived from the canvas size when [`RenderConfig::metrics`] resolves
//! them.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::animation::ease::Ease;
use crate::foundation::core::{Canvas, Fps, Rgba8};
use crate::foundation::error::{VizError, VizResult};
use crate::geometry::arrow::ArrowGeometry;

/// Environment variable naming a font file, used when `font_path` is unset.
pub const FONT_ENV: &str = "DSVIZ_FONT";

/// Top-level render configuration.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Output resolution.
    pub canvas: Canvas,
    /// Output frame rate.
    pub fps: Fps,
    /// Color palette.
    pub colors: Palette,
    /// Cell sizing and spacing.
    pub layout: LayoutConfig,
    /// Connector shapes.
    pub arrows: ArrowConfig,
    /// Text sizes and panel placement.
    pub panels: PanelConfig,
    /// Progress curve applied to state transitions.
    pub transition_ease: Ease,
    /// Font file used for all text.
    pub font_path: Option<PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            fps: Fps::default(),
            colors: Palette::default(),
            layout: LayoutConfig::default(),
            arrows: ArrowConfig::default(),
            panels: PanelConfig::default(),
            transition_ease: Ease::Linear,
            font_path: None,
        }
    }
}

/// Colors used by the compositor.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Canvas fill.
    pub background: Rgba8,
    /// Values, captions, code and braces.
    pub text: Rgba8,
    /// Cell fill.
    pub element: Rgba8,
    /// Cell fill of secondary structures in a command session.
    pub secondary_element: Rgba8,
    /// Highlighted cell fill.
    pub highlight: Rgba8,
    /// Connectors and tree edges.
    pub arrow: Rgba8,
    /// Pointer text.
    pub pointer: Rgba8,
    /// Label text and inline code comments.
    pub label: Rgba8,
    /// Caption and code panel fill.
    pub panel: Rgba8,
    /// Highlighted code line band.
    pub code_highlight: Rgba8,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgba8::rgb(255, 255, 255),
            text: Rgba8::rgb(0, 0, 0),
            element: Rgba8::rgb(100, 100, 100),
            secondary_element: Rgba8::rgb(150, 200, 150),
            highlight: Rgba8::rgb(255, 200, 200),
            arrow: Rgba8::rgb(0, 100, 200),
            pointer: Rgba8::rgb(50, 50, 200),
            label: Rgba8::rgb(100, 100, 100),
            panel: Rgba8::rgb(245, 245, 245),
            code_highlight: Rgba8::rgb(255, 240, 200),
        }
    }
}

/// Cell sizing rules. Unset sizes derive from the canvas.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Preferred cell side; `canvas.width / 8` when unset.
    pub element_size: Option<f64>,
    /// Smallest cell side when shrinking to fit; a third of `element_size` when unset.
    pub min_element_size: Option<f64>,
    /// Gap between array cells as a fraction of the cell side.
    pub spacing_ratio: f64,
    /// Gap between linked-list cells as a fraction of the cell side.
    pub linked_list_spacing_ratio: f64,
    /// Gap between dict/set rows in pixels.
    pub keyed_spacing: f64,
    /// Share of the canvas width a row may occupy before cells shrink.
    pub fill_ratio: f64,
    /// Horizontal padding around dict/set row text.
    pub text_padding: f64,
    /// Left and right tree margin.
    pub tree_margin: f64,
    /// Largest tree node side.
    pub tree_max_node_size: f64,
    /// Smallest horizontal gap between tree nodes on the widest level.
    pub tree_min_spacing: f64,
    /// Vertical distance between tree levels; `canvas.height / 10` when unset.
    pub tree_level_spacing: Option<f64>,
    /// Vertical distance between stacked structures; `canvas.height / 8` when unset.
    pub structure_spacing: Option<f64>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            element_size: None,
            min_element_size: None,
            spacing_ratio: 1.0 / 3.0,
            linked_list_spacing_ratio: 2.0 / 3.0,
            keyed_spacing: 25.0,
            fill_ratio: 0.9,
            text_padding: 20.0,
            tree_margin: 60.0,
            tree_max_node_size: 90.0,
            tree_min_spacing: 20.0,
            tree_level_spacing: None,
            structure_spacing: None,
        }
    }
}

/// Connector styling.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ArrowConfig {
    /// Stroke width.
    pub thickness: f64,
    /// Arrowhead length.
    pub head_size: f64,
    /// Arch height of curved arrows.
    pub control_height: f64,
    /// Sample count of curved arrows.
    pub curve_steps: usize,
    /// Length of the vertical arrow under pointer text.
    pub pointer_length: f64,
    /// Vertical distance between forward and backward links of a doubly linked list.
    pub doubly_offset: f64,
    /// Half-width of the self-arrow loop.
    pub self_arrow_size: f64,
}

impl Default for ArrowConfig {
    fn default() -> Self {
        let g = ArrowGeometry::default();
        Self {
            thickness: 3.0,
            head_size: g.head_size,
            control_height: g.control_height,
            curve_steps: g.curve_steps,
            pointer_length: 30.0,
            doubly_offset: 10.0,
            self_arrow_size: g.self_arrow_size,
        }
    }
}

impl ArrowConfig {
    /// Shape parameters handed to the geometry helpers.
    pub fn geometry(&self) -> ArrowGeometry {
        ArrowGeometry {
            head_size: self.head_size,
            control_height: self.control_height,
            curve_steps: self.curve_steps,
            self_arrow_size: self.self_arrow_size,
        }
    }
}

/// Text sizes and panel placement in pixels. Unset values derive from the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Main font size; `height / 35`.
    pub font_size: Option<f64>,
    /// Code listing font size; `height / 45`.
    pub code_font_size: Option<f64>,
    /// Left edge of code text; `width / 15`.
    pub code_x: Option<f64>,
    /// Baseline row of the first code line; `height * 0.65`.
    pub code_y: Option<f64>,
    /// Distance between code lines; `height / 22`.
    pub code_line_height: Option<f64>,
    /// Vertical center of the caption panel; `height * 0.57`.
    pub caption_y: Option<f64>,
    /// Left edge of the variables panel; `width / 20`.
    pub variables_x: Option<f64>,
    /// Top of the variables panel; `height / 8`.
    pub variables_y: Option<f64>,
    /// Top of the first structure; `height / 4`.
    pub structures_y: Option<f64>,
}

/// Every size knob resolved to pixels for one canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Metrics {
    /// Canvas width.
    pub width: f64,
    /// Canvas height.
    pub height: f64,
    /// Main font size.
    pub font_size: f64,
    /// Code listing font size.
    pub code_font_size: f64,
    /// Left edge of code text.
    pub code_x: f64,
    /// Top of the first code line.
    pub code_y: f64,
    /// Distance between code lines.
    pub code_line_height: f64,
    /// Vertical center of the caption panel.
    pub caption_y: f64,
    /// Left edge of the variables panel.
    pub variables_x: f64,
    /// Top of the variables panel.
    pub variables_y: f64,
    /// Top of the first structure.
    pub structures_y: f64,
    /// Preferred cell side.
    pub element_size: f64,
    /// Smallest cell side.
    pub min_element_size: f64,
    /// Vertical distance between tree levels.
    pub tree_level_spacing: f64,
    /// Vertical distance between stacked structures.
    pub structure_spacing: f64,
}

impl RenderConfig {
    /// Parse a config from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> VizResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| VizError::validation(format!("parse render config JSON: {e}")))
    }

    /// Parse a config from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> VizResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            VizError::validation(format!("open render config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Reject settings no frame could be rendered with.
    pub fn validate(&self) -> VizResult<()> {
        let Canvas { width, height } = self.canvas;
        if width == 0 || height == 0 {
            return Err(VizError::validation("canvas width/height must be > 0"));
        }
        if width > u32::from(u16::MAX) || height > u32::from(u16::MAX) {
            return Err(VizError::validation(format!(
                "canvas {width}x{height} exceeds the rasterizer limit of {}",
                u16::MAX
            )));
        }
        if !width.is_multiple_of(2) || !height.is_multiple_of(2) {
            return Err(VizError::validation(format!(
                "canvas {width}x{height} must have even dimensions for yuv420p video"
            )));
        }
        Fps::new(self.fps.num, self.fps.den)?;

        let m = self.metrics();
        let positive = [
            ("font_size", m.font_size),
            ("code_font_size", m.code_font_size),
            ("code_line_height", m.code_line_height),
            ("element_size", m.element_size),
            ("min_element_size", m.min_element_size),
            ("arrows.thickness", self.arrows.thickness),
            ("arrows.head_size", self.arrows.head_size),
            ("layout.fill_ratio", self.layout.fill_ratio),
            ("layout.tree_max_node_size", self.layout.tree_max_node_size),
        ];
        for (name, v) in positive {
            if !v.is_finite() || v <= 0.0 {
                return Err(VizError::validation(format!("{name} must be > 0, got {v}")));
            }
        }
        if m.min_element_size > m.element_size {
            return Err(VizError::validation(
                "min_element_size must not exceed element_size",
            ));
        }
        if self.arrows.curve_steps == 0 {
            return Err(VizError::validation("arrows.curve_steps must be > 0"));
        }
        Ok(())
    }

    /// Resolve every optional size against the canvas.
    pub fn metrics(&self) -> Metrics {
        let w = self.canvas.width_f64();
        let h = self.canvas.height_f64();
        let p = &self.panels;
        let element_size = self.layout.element_size.unwrap_or(w / 8.0);
        Metrics {
            width: w,
            height: h,
            font_size: p.font_size.unwrap_or(h / 35.0),
            code_font_size: p.code_font_size.unwrap_or(h / 45.0),
            code_x: p.code_x.unwrap_or(w / 15.0),
            code_y: p.code_y.unwrap_or(h * 0.65),
            code_line_height: p.code_line_height.unwrap_or(h / 22.0),
            caption_y: p.caption_y.unwrap_or(h * 0.57),
            variables_x: p.variables_x.unwrap_or(w / 20.0),
            variables_y: p.variables_y.unwrap_or(h / 8.0),
            structures_y: p.structures_y.unwrap_or(h / 4.0),
            element_size,
            min_element_size: self.layout.min_element_size.unwrap_or(element_size / 3.0),
            tree_level_spacing: self.layout.tree_level_spacing.unwrap_or(h / 10.0),
            structure_spacing: self.layout.structure_spacing.unwrap_or(h / 8.0),
        }
    }

    /// Font file to load: `font_path`, then `DSVIZ_FONT`.
    ///
    /// `None` means a system face is looked up instead.
    pub fn font_file(&self) -> Option<PathBuf> {
        self.font_path.clone().or_else(|| {
            std::env::var_os(FONT_ENV)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
        })
    }
}

#[cfg(test)]
#[path = "../tests/unit/config/config.rs"]
mod tests;
