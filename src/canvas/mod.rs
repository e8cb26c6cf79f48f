// Copyright 2025 the Stitch Canvas Authors
// SPDX-License-Identifier: Apache-2.0

//! Pattern view - the composition root a host drives with input and paint
//!
//! A [`PatternView`] owns everything one open pattern needs on screen: the
//! viewport, the stitch containers, the geometry cache, the active tool and
//! the reference image. Durable edits leave through [`PatternCommands`]; the
//! backend's confirmations come back through [`PatternView::add_stitch`] and
//! [`PatternView::remove_stitch`].

mod drawing;
mod paint;
mod pointer;

use crate::editing::{ReferenceImage, Viewport, ZoomState};
use crate::error::{CanvasError, Result};
use crate::model::{
    BeadDims, DisplayMode, Fabric, GridSettings, PatternSnapshot, Stitch, StitchKind,
    parse_hex_color,
};
use crate::render::geometry::bead_size_in_cells;
use crate::render::{GeometryCache, StitchLayers};
use crate::settings::CanvasSettings;
use crate::tools::{GestureState, ToolAction, ToolBox, ToolIntent};
use kurbo::Size;
use peniko::Color;

/// Outbound requests to mutate the authoritative pattern.
///
/// Fire and forget: the view has already drawn the change when these are
/// called, and expects the backend to confirm through
/// [`PatternView::add_stitch`] / [`PatternView::remove_stitch`].
pub trait PatternCommands {
    fn add_stitch(&mut self, stitch: Stitch);
    fn remove_stitch(&mut self, stitch: Stitch);
}

/// Grid settings with colors resolved
#[derive(Debug, Clone, Copy)]
pub(crate) struct GridStyle {
    pub major_interval: u16,
    pub minor_color: Color,
    pub minor_thickness: f64,
    pub major_color: Color,
    pub major_thickness: f64,
}

impl GridStyle {
    fn new(grid: &GridSettings) -> Result<Self> {
        Ok(Self {
            major_interval: grid.major_lines_interval,
            minor_color: parse_hex_color(&grid.minor.color)?,
            minor_thickness: grid.minor.thickness,
            major_color: parse_hex_color(&grid.major.color)?,
            major_thickness: grid.major.thickness,
        })
    }
}

/// Reference image drag in progress
#[derive(Debug, Clone, Copy, PartialEq)]
enum ImageDrag {
    /// Moving the whole image; last pointer position in world space
    Move { last: kurbo::Point },
    Resize(crate::editing::ResizeHandle),
}

/// One open pattern on screen
pub struct PatternView {
    settings: CanvasSettings,
    fabric: Fabric,
    fabric_color: Color,
    grid: GridStyle,

    /// Resolved palette colors, indexed by `palindex`
    colors: Vec<Color>,
    /// Physical bead sizes, indexed by `palindex`
    beads: Vec<BeadDims>,
    display_mode: DisplayMode,

    viewport: Viewport,
    layers: StitchLayers,
    cache: GeometryCache,

    tool: ToolBox,
    gesture: GestureState,
    /// Action the current press started with; `None` between presses
    press: Option<ToolAction>,
    palindex: u32,
    hint: Option<Stitch>,

    /// Local edits sent out and not yet confirmed
    pending_adds: Vec<Stitch>,
    pending_removals: Vec<Stitch>,

    reference_image: Option<ReferenceImage>,
    reference_selected: bool,
    image_drag: Option<ImageDrag>,
}

impl PatternView {
    /// Build the view for a loaded pattern.
    ///
    /// Fails if a palette or grid color does not parse, or a stitch points
    /// past the end of the palette.
    pub fn new(snapshot: &PatternSnapshot, settings: CanvasSettings) -> Result<Self> {
        let settings = settings.normalized();
        snapshot.validate()?;
        let colors = snapshot.palette_colors()?;
        let fabric_color = snapshot.fabric_color()?;
        let grid = GridStyle::new(&snapshot.grid)?;
        let beads = snapshot.palette.iter().map(|item| item.bead_dims()).collect();

        let mut viewport = Viewport::new(&settings);
        let world = snapshot.fabric.size();
        viewport.resize_world(world.width, world.height);

        let mut view = Self {
            fabric: snapshot.fabric.clone(),
            fabric_color,
            grid,
            colors,
            beads,
            display_mode: snapshot.display.mode,
            viewport,
            layers: StitchLayers::new(),
            cache: GeometryCache::new(snapshot.fabric.cell_size_mm()),
            tool: ToolBox::default(),
            gesture: GestureState::new(),
            press: None,
            palindex: 0,
            hint: None,
            pending_adds: Vec::new(),
            pending_removals: Vec::new(),
            reference_image: None,
            reference_selected: false,
            image_drag: None,
            settings,
        };

        for stitch in snapshot.stitches() {
            let color = view.color_of(stitch.palindex())?;
            let bead = view.bead_size(stitch.palindex());
            view.layers.add(stitch, color, bead);
        }

        tracing::info!(
            "Pattern view created: {}x{} fabric, {} colors, {} stitches",
            snapshot.fabric.width,
            snapshot.fabric.height,
            view.colors.len(),
            view.layers.len()
        );
        Ok(view)
    }

    // ===== Accessors =====

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn layers(&self) -> &StitchLayers {
        &self.layers
    }

    pub fn fabric(&self) -> &Fabric {
        &self.fabric
    }

    pub fn settings(&self) -> &CanvasSettings {
        &self.settings
    }

    pub fn tool_kind(&self) -> StitchKind {
        self.tool.kind()
    }

    pub fn palindex(&self) -> u32 {
        self.palindex
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    /// The stitch currently previewed, if any
    pub fn hint(&self) -> Option<Stitch> {
        self.hint
    }

    pub fn cache(&self) -> &GeometryCache {
        &self.cache
    }

    /// Whether a local edit still waits for its backend confirmation
    pub fn has_pending(&self) -> bool {
        !self.pending_adds.is_empty() || !self.pending_removals.is_empty()
    }

    // ===== Host Controls =====

    /// The canvas changed size, in pixels
    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport.resize_screen(width, height);
    }

    pub fn set_zoom(&mut self, state: ZoomState) {
        self.viewport.set_zoom(state);
    }

    /// Switch the active tool. Any gesture in progress is dropped.
    pub fn select_tool(&mut self, kind: StitchKind) {
        self.tool = ToolBox::for_kind(kind);
        self.clear_gesture();
        tracing::debug!("Selected {} tool", kind);
    }

    /// Choose the palette entry new stitches are drawn with
    pub fn select_palette_item(&mut self, index: u32) -> Result<()> {
        self.check_palindex(index)?;
        self.palindex = index;
        Ok(())
    }

    /// Switch how stitches are drawn. Cached geometry for other modes is kept.
    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        if self.display_mode == mode {
            return;
        }
        tracing::info!("Display mode: {:?} -> {:?}", self.display_mode, mode);
        self.display_mode = mode;
    }

    // ===== Reference Image =====

    /// Replace the reference image. A new image is fitted over the fabric.
    pub fn set_reference_image(&mut self, image: Option<ReferenceImage>) {
        self.reference_image = image.map(|mut image| {
            image.fit_to(self.fabric.bounds());
            tracing::info!(
                "Reference image placed at {:?}, {:.1}x{:.1} cells",
                image.position,
                image.size().width,
                image.size().height
            );
            image
        });
        self.reference_selected = false;
        self.image_drag = None;
    }

    pub fn reference_image(&self) -> Option<&ReferenceImage> {
        self.reference_image.as_ref()
    }

    /// For opacity, rotation and lock changes from the host
    pub fn reference_image_mut(&mut self) -> Option<&mut ReferenceImage> {
        self.reference_image.as_mut()
    }

    /// Select the reference image for moving and resizing.
    ///
    /// Returns whether the selection changed.
    pub fn select_reference_image(&mut self, selected: bool) -> bool {
        let selected = selected && self.reference_image.is_some();
        let changed = self.reference_selected != selected;
        self.reference_selected = selected;
        if !selected {
            self.image_drag = None;
        }
        changed
    }

    pub fn is_reference_image_selected(&self) -> bool {
        self.reference_selected
    }

    // ===== Backend Confirmations =====

    /// A stitch was added to the pattern.
    ///
    /// Confirms a matching local add if one is pending; otherwise the stitch
    /// is new to this view and gets drawn.
    pub fn add_stitch(&mut self, stitch: Stitch) -> Result<()> {
        if let Err(err) = self.check_palindex(stitch.palindex()) {
            tracing::warn!("Ignoring added stitch {:?}: {}", stitch, err);
            return Err(err);
        }
        if take_first(&mut self.pending_adds, &stitch) {
            return Ok(());
        }
        let color = self.color_of(stitch.palindex())?;
        self.layers.add(stitch, color, self.bead_size(stitch.palindex()));
        Ok(())
    }

    /// A stitch was removed from the pattern.
    ///
    /// Returns false if the view had no such stitch.
    pub fn remove_stitch(&mut self, stitch: Stitch) -> bool {
        if take_first(&mut self.pending_removals, &stitch) {
            return true;
        }
        self.layers.remove(&stitch)
    }

    /// Release every render resource of this view
    pub fn destroy(&mut self) {
        tracing::info!("Destroying pattern view with {} stitches", self.layers.len());
        self.layers.clear();
        self.cache.destroy();
        self.reference_image = None;
        self.reference_selected = false;
        self.image_drag = None;
        self.pending_adds.clear();
        self.pending_removals.clear();
        self.clear_gesture();
    }

    // ===== Internals =====

    fn check_palindex(&self, index: u32) -> Result<()> {
        if (index as usize) < self.colors.len() {
            Ok(())
        } else {
            Err(CanvasError::PaletteIndexOutOfRange {
                index,
                len: self.colors.len(),
            })
        }
    }

    fn color_of(&self, palindex: u32) -> Result<Color> {
        self.check_palindex(palindex)?;
        Ok(self.colors[palindex as usize])
    }

    fn bead_dims(&self, palindex: u32) -> BeadDims {
        self.beads
            .get(palindex as usize)
            .copied()
            .unwrap_or_default()
    }

    /// Unrotated bead size in cells for a palette entry
    fn bead_size(&self, palindex: u32) -> Size {
        bead_size_in_cells(self.bead_dims(palindex), self.fabric.cell_size_mm())
    }

    fn clear_gesture(&mut self) {
        self.gesture.reset();
        self.press = None;
        self.hint = None;
    }

    /// Carry out what a tool asked for
    fn apply_intents(&mut self, intents: Vec<ToolIntent>, commands: &mut impl PatternCommands) {
        for intent in intents {
            match intent {
                ToolIntent::Add(stitch) => self.add_local(stitch, commands),
                ToolIntent::Remove(stitch) => self.remove_local(stitch, commands),
                ToolIntent::Hint(stitch) => self.hint = Some(stitch),
                ToolIntent::ClearHint => self.hint = None,
            }
        }
    }

    fn add_local(&mut self, stitch: Stitch, commands: &mut impl PatternCommands) {
        if self.layers.contains(&stitch) {
            return;
        }
        let color = match self.color_of(stitch.palindex()) {
            Ok(color) => color,
            Err(err) => {
                tracing::debug!("Dropping {:?}: {}", stitch, err);
                return;
            }
        };
        self.layers.add(stitch, color, self.bead_size(stitch.palindex()));
        self.pending_adds.push(stitch);
        commands.add_stitch(stitch);
    }

    fn remove_local(&mut self, stitch: Stitch, commands: &mut impl PatternCommands) {
        if !self.layers.remove(&stitch) {
            return;
        }
        tracing::debug!("Removed {:?}", stitch);
        self.pending_removals.push(stitch);
        commands.remove_stitch(stitch);
    }
}

/// Remove the first entry equal to `stitch`; returns whether there was one
fn take_first(list: &mut Vec<Stitch>, stitch: &Stitch) -> bool {
    match list.iter().position(|pending| pending == stitch) {
        Some(index) => {
            list.remove(index);
            true
        }
        None => false,
    }
}
