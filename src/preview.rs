// Interactive front end: a small window with the settings HUD and a live
// preview. Keys only edit a `SpriteSettings`; generation goes through the same
// request -> render -> store path as the command line.
//
// Keys:
//   Up/Down     texture size        Left/Right  outline width (Shift: x8)
//   [ / ]       corner radius       Tab         switch previewed shape
//   C / R       generate circle / rectangle
//   S           save settings       Esc         quit

use crate::asset::{AssetDir, WrittenAsset};
use crate::canvas::Canvas;
use crate::config::SpriteSettings;
use crate::draw::{Drawer, draw_text_5x7, fill_rect, stroke_rect};
use crate::error::Error;
use crate::raster::PivotMode;
use crate::shapes::{SpriteRequest, generate_ring, generate_rounded_rect, render};
use crate::types::{Color, FrameBuffer, ShapeKind};
use log::{error, info};
use minifb::Key;
use std::path::{Path, PathBuf};

pub const WINDOW_W: usize = 440;
pub const WINDOW_H: usize = 400;
/// Largest texture edge the preview renders at; bigger sizes are scaled down.
pub const PREVIEW_EXTENT: u32 = 256;

const PREVIEW_X: i32 = (WINDOW_W as i32 - PREVIEW_EXTENT as i32) / 2;
const PREVIEW_Y: i32 = 84;
const BG: u32 = 0x00_20_20_24;
const TEXT: u32 = 0x00_FF_FF_FF;
const DIM: u32 = 0x00_A0_A0_A8;
const CHECK_LIGHT: u32 = 0x00_CC_CC_CC;
const CHECK_DARK: u32 = 0x00_99_99_99;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    SizeUp,
    SizeDown,
    Outline(i32),
    Corner(i32),
    ToggleShape,
    Generate(ShapeKind),
    Save,
}

pub struct PreviewState {
    pub settings: SpriteSettings,
    pub shape: ShapeKind,
    pub status: String,
    preview: Option<Canvas>,
}

impl PreviewState {
    pub fn new(mut settings: SpriteSettings) -> Self {
        settings.clamp_to_size();
        Self {
            settings,
            shape: ShapeKind::OutlinedCircle,
            status: String::new(),
            preview: None,
        }
    }

    /// Apply a settings edit. Generate/Save are handled by the caller.
    /// Returns true when the preview needs redrawing.
    pub fn apply(&mut self, action: Action) -> bool {
        let before = (self.settings.clone(), self.shape);
        let half = self.settings.texture_size.half();
        match action {
            Action::SizeUp => self.settings.texture_size = self.settings.texture_size.larger(),
            Action::SizeDown => self.settings.texture_size = self.settings.texture_size.smaller(),
            Action::Outline(d) => self.settings.outline_width = step(self.settings.outline_width, d, half),
            Action::Corner(d) => self.settings.corner_radius = step(self.settings.corner_radius, d, half),
            Action::ToggleShape => self.shape = self.shape.toggled(),
            Action::Generate(_) | Action::Save => {}
        }
        self.settings.clamp_to_size();
        let changed = before != (self.settings.clone(), self.shape);
        if changed {
            self.preview = None;
        }
        changed
    }

    /// The current shape at preview resolution. Widths and radii scale with
    /// the texture, and a non-zero value never scales down to zero.
    pub fn preview_canvas(&self) -> Canvas {
        let size = self.settings.texture_size.pixels();
        let p = size.min(PREVIEW_EXTENT);
        let scale = |v: u32| {
            if v == 0 {
                0
            } else {
                ((u64::from(v) * u64::from(p) / u64::from(size)) as u32).max(1)
            }
        };
        let color = self.settings.color;
        match self.shape {
            ShapeKind::OutlinedCircle => generate_ring(p, scale(self.settings.outline_width), color),
            ShapeKind::RoundedRect => generate_rounded_rect(
                p,
                p,
                scale(self.settings.corner_radius),
                scale(self.settings.outline_width),
                color,
                PivotMode::Mirrored,
            ),
        }
    }

    pub fn generate(&mut self, kind: ShapeKind, sink: &AssetDir) -> Result<WrittenAsset, Error> {
        let request = SpriteRequest::from_settings(kind, &self.settings);
        let result = render(&request).and_then(|sprite| sink.store(sprite));
        self.status = match &result {
            Ok(w) => format!("CREATED {}", w.png_path.display()),
            Err(e) => format!("FAILED: {e}"),
        };
        result
    }

    pub fn save(&mut self, path: &Path) -> Result<(), Error> {
        let result = self.settings.save_to_file(path);
        self.status = match &result {
            Ok(()) => format!("SAVED {}", path.display()),
            Err(e) => format!("FAILED: {e}"),
        };
        result
    }

    /// Draw HUD + checkerboard + preview into `fb`.
    pub fn compose(&mut self, fb: &mut FrameBuffer) {
        if self.preview.is_none() {
            self.preview = Some(self.preview_canvas());
        }
        let (w, h) = (fb.width as i32, fb.height as i32);
        fill_rect(fb, 0, 0, w, h, BG);

        let s = &self.settings;
        let lines = [
            format!("TEXTURE SIZE: {}  UP/DOWN", s.texture_size),
            format!("SPRITE COLOR: {}", s.color),
            format!("OUTLINE WIDTH: {}  LEFT/RIGHT", s.outline_width),
            format!("CORNER RADIUS: {}  [ ]", s.corner_radius),
            format!("PREVIEW: {}  TAB", self.shape.label()),
        ];
        for (i, line) in lines.iter().enumerate() {
            draw_text_5x7(fb, 8, 8 + 12 * i as i32, line, TEXT);
        }

        let extent = PREVIEW_EXTENT as i32;
        if let Some(canvas) = &self.preview {
            blit_preview(fb, canvas, PREVIEW_X, PREVIEW_Y, extent);
        }
        stroke_rect(fb, PREVIEW_X - 1, PREVIEW_Y - 1, extent + 2, extent + 2, DIM);

        let footer_y = PREVIEW_Y + extent + 10;
        draw_text_5x7(fb, 8, footer_y, "C: CIRCLE  R: RECT  S: SAVE  ESC: QUIT", DIM);
        draw_text_5x7(fb, 8, footer_y + 14, &self.status, TEXT);
    }
}

fn step(value: u32, delta: i32, max: u32) -> u32 {
    let v = i64::from(value) + i64::from(delta);
    v.clamp(0, i64::from(max)) as u32
}

/// Nearest-neighbour scale of `canvas` into an `extent`-sized square at (x0,y0),
/// alpha-blended over a checkerboard. Canvas row 0 is the bottom of the box.
fn blit_preview(fb: &mut FrameBuffer, canvas: &Canvas, x0: i32, y0: i32, extent: i32) {
    let (cw, ch) = (canvas.width() as i32, canvas.height() as i32);
    if cw == 0 || ch == 0 {
        return;
    }
    for sy in 0..extent {
        for sx in 0..extent {
            let check = if ((sx / 8) + (sy / 8)) % 2 == 0 { CHECK_LIGHT } else { CHECK_DARK };
            let tx = sx * cw / extent;
            let ty = ch - 1 - sy * ch / extent;
            let src = canvas.get_pixel(tx, ty).unwrap_or(Color::TRANSPARENT);
            fill_rect(fb, x0 + sx, y0 + sy, 1, 1, blend_over(src, check));
        }
    }
}

/// Straight-alpha "src over dst" for a 0x00RRGGBB destination.
pub fn blend_over(src: Color, dst: u32) -> u32 {
    let a = u32::from(src.a);
    let mix = |s: u8, shift: u32| {
        let d = (dst >> shift) & 0xFF;
        (u32::from(s) * a + d * (255 - a) + 127) / 255
    };
    (mix(src.r, 16) << 16) | (mix(src.g, 8) << 8) | mix(src.b, 0)
}

fn read_actions(drawer: &Drawer) -> Vec<Action> {
    let amount = if drawer.shift_down() { 8 } else { 1 };
    let mut actions = Vec::new();
    if drawer.pressed_once(Key::Up) { actions.push(Action::SizeUp); }
    if drawer.pressed_once(Key::Down) { actions.push(Action::SizeDown); }
    if drawer.pressed(Key::Right) { actions.push(Action::Outline(amount)); }
    if drawer.pressed(Key::Left) { actions.push(Action::Outline(-amount)); }
    if drawer.pressed(Key::RightBracket) { actions.push(Action::Corner(amount)); }
    if drawer.pressed(Key::LeftBracket) { actions.push(Action::Corner(-amount)); }
    if drawer.pressed_once(Key::Tab) { actions.push(Action::ToggleShape); }
    if drawer.pressed_once(Key::C) { actions.push(Action::Generate(ShapeKind::OutlinedCircle)); }
    if drawer.pressed_once(Key::R) { actions.push(Action::Generate(ShapeKind::RoundedRect)); }
    if drawer.pressed_once(Key::S) { actions.push(Action::Save); }
    actions
}

/// Open the window and run until it is closed or Esc is pressed.
pub fn run(settings: SpriteSettings, sink: &AssetDir, config_path: PathBuf) -> Result<(), Error> {
    let mut drawer = Drawer::new("Create Custom Sprites", WINDOW_W, WINDOW_H)?;
    let mut screen = FrameBuffer::new(WINDOW_W, WINDOW_H);
    let mut state = PreviewState::new(settings);
    info!("preview window open, writing into {}", sink.root().display());

    while drawer.is_open() && !drawer.esc_pressed() {
        for action in read_actions(&drawer) {
            let outcome = match action {
                Action::Generate(kind) => state.generate(kind, sink).map(|_| ()),
                Action::Save => state.save(&config_path),
                edit => {
                    state.apply(edit);
                    Ok(())
                }
            };
            // Failures are shown in the HUD; the window stays open.
            if let Err(e) = outcome {
                error!("{e}");
            }
        }
        state.compose(&mut screen);
        drawer.present(&screen)?;
    }
    Ok(())
}
