// The two sprite generators and the request record that drives them.

use crate::asset::SpriteImport;
use crate::canvas::Canvas;
use crate::config::SpriteSettings;
use crate::error::Error;
use crate::raster::{PivotMode, draw_filled_circle, round_corners};
use crate::types::{Color, ShapeKind, SpriteBorder};
use log::debug;

/// A ring: a disc of `color` with a transparent hole punched in the middle.
///
/// The hole radius is `size/2 - stroke`. A zero stroke means "no outline"
/// and leaves the solid disc; a stroke that reaches the radius leaves no
/// ring at all, so the canvas comes back fully transparent.
pub fn generate_ring(size: u32, stroke: u32, color: Color) -> Canvas {
    let radius = i64::from(size / 2);
    let stroke = i64::from(stroke);
    let hole = match stroke {
        0 => 0,
        s if s >= radius => radius,
        s => radius - s,
    };

    let canvas = Canvas::new(size, size, Color::TRANSPARENT);
    let canvas = draw_filled_circle(canvas, radius, color);
    draw_filled_circle(canvas, hole, Color::TRANSPARENT)
}

/// A solid rectangle in `color` with its four corners rounded off.
///
/// Despite the outline-width argument this stays a filled silhouette.
pub fn generate_rounded_rect(
    width: u32,
    height: u32,
    corner_radius: u32,
    stroke: u32,
    color: Color,
    pivots: PivotMode,
) -> Canvas {
    let canvas = Canvas::new(width, height, color);
    round_corners(canvas, corner_radius, stroke, pivots)
}

/// Everything one generation needs, captured up front.
#[derive(Clone, Debug, PartialEq)]
pub struct SpriteRequest {
    pub kind: ShapeKind,
    pub size: u32,
    pub outline_width: u32,
    pub corner_radius: u32,
    pub color: Color,
    pub pivots: PivotMode,
}

impl SpriteRequest {
    pub fn from_settings(kind: ShapeKind, settings: &SpriteSettings) -> Self {
        Self {
            kind,
            size: settings.texture_size.pixels(),
            outline_width: settings.outline_width,
            corner_radius: settings.corner_radius,
            color: settings.color,
            pivots: PivotMode::default(),
        }
    }

    /// Rejects parameters the generators would silently misrender.
    pub fn validate(&self) -> Result<(), Error> {
        if self.size == 0 {
            return Err(Error::InvalidParameter("texture size must be positive".into()));
        }
        let half = self.size / 2;
        let (name, value) = match self.kind {
            ShapeKind::OutlinedCircle => ("outline width", self.outline_width),
            ShapeKind::RoundedRect => ("corner radius", self.corner_radius),
        };
        if value > half {
            return Err(Error::InvalidParameter(format!(
                "{name} {value} exceeds half the texture size ({half})"
            )));
        }
        Ok(())
    }

    /// File name without suffix, e.g. `OutlinedCircle_Width2`.
    pub fn file_stem(&self) -> String {
        match self.kind {
            ShapeKind::OutlinedCircle => format!("OutlinedCircle_Width{}", self.outline_width),
            ShapeKind::RoundedRect => format!("OutlinedRectangle_Corner{}", self.corner_radius),
        }
    }

    /// 9-slice border: none for the circle, the corner radius for the rectangle.
    pub fn border(&self) -> SpriteBorder {
        match self.kind {
            ShapeKind::OutlinedCircle => SpriteBorder::ZERO,
            ShapeKind::RoundedRect => SpriteBorder::uniform(self.corner_radius),
        }
    }
}

/// A finished texture waiting to be handed to the asset sink.
#[derive(Debug)]
pub struct RenderedSprite {
    pub stem: String,
    pub canvas: Canvas,
    pub import: SpriteImport,
}

pub fn render(request: &SpriteRequest) -> Result<RenderedSprite, Error> {
    request.validate()?;
    debug!(
        "rendering {:?} size={} outline={} corner={} color={}",
        request.kind, request.size, request.outline_width, request.corner_radius, request.color
    );

    let canvas = match request.kind {
        ShapeKind::OutlinedCircle => generate_ring(request.size, request.outline_width, request.color),
        ShapeKind::RoundedRect => generate_rounded_rect(
            request.size,
            request.size,
            request.corner_radius,
            request.outline_width,
            request.color,
            request.pivots,
        ),
    };

    Ok(RenderedSprite {
        stem: request.file_stem(),
        import: SpriteImport::for_request(request),
        canvas,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(kind: ShapeKind, size: u32, outline: u32, corner: u32) -> SpriteRequest {
        SpriteRequest {
            kind,
            size,
            outline_width: outline,
            corner_radius: corner,
            color: Color::WHITE,
            pivots: PivotMode::Mirrored,
        }
    }

    #[test]
    fn ring_keeps_only_the_band_between_radii() {
        let c = generate_ring(64, 4, Color::WHITE);
        for y in 0..64 {
            for x in 0..64 {
                let (dx, dy) = (32 - x, 32 - y);
                let d2 = dx * dx + dy * dy;
                let in_band = 28 * 28 <= d2 && d2 < 32 * 32;
                let expected = if in_band { Color::WHITE } else { Color::TRANSPARENT };
                assert_eq!(c.get_pixel(x, y), Some(expected), "pixel ({x},{y})");
            }
        }
    }

    #[test]
    fn zero_stroke_gives_a_solid_disc() {
        let ring = generate_ring(32, 0, Color::WHITE);
        let disc = draw_filled_circle(Canvas::new(32, 32, Color::TRANSPARENT), 16, Color::WHITE);
        assert_eq!(ring, disc);
        assert_eq!(ring.get_pixel(16, 16), Some(Color::WHITE));
    }

    #[test]
    fn stroke_at_or_past_radius_clears_everything() {
        for stroke in [16, 17, 40, u32::MAX] {
            let c = generate_ring(32, stroke, Color::WHITE);
            assert_eq!(c.count(Color::TRANSPARENT), 32 * 32, "stroke {stroke}");
        }
    }

    #[test]
    fn zero_corner_rect_is_a_plain_fill() {
        let c = generate_rounded_rect(100, 100, 0, 3, Color::WHITE, PivotMode::Mirrored);
        assert_eq!(c, Canvas::new(100, 100, Color::WHITE));
    }

    #[test]
    fn rounded_rect_is_solid_inside() {
        let c = generate_rounded_rect(64, 48, 10, 2, Color::WHITE, PivotMode::Mirrored);
        assert_eq!(c.get_pixel(32, 24), Some(Color::WHITE));
        assert_eq!(c.get_pixel(0, 24), Some(Color::WHITE));
        assert_eq!(c.get_pixel(0, 0), Some(Color::TRANSPARENT));
        assert_eq!(c.get_pixel(63, 47), Some(Color::TRANSPARENT));
    }

    #[test]
    fn validation_rejects_out_of_range_parameters() {
        assert!(request(ShapeKind::OutlinedCircle, 0, 0, 0).validate().is_err());
        assert!(request(ShapeKind::OutlinedCircle, 64, 33, 0).validate().is_err());
        assert!(request(ShapeKind::OutlinedCircle, 64, 32, 999).validate().is_ok());
        assert!(request(ShapeKind::RoundedRect, 64, 999, 33).validate().is_err());
        assert!(request(ShapeKind::RoundedRect, 64, 999, 32).validate().is_ok());
    }

    #[test]
    fn render_names_and_borders_follow_the_shape() {
        let circle = render(&request(ShapeKind::OutlinedCircle, 64, 2, 10)).unwrap();
        assert_eq!(circle.stem, "OutlinedCircle_Width2");
        assert_eq!(circle.import.border, SpriteBorder::ZERO);

        let rect = render(&request(ShapeKind::RoundedRect, 64, 2, 10)).unwrap();
        assert_eq!(rect.stem, "OutlinedRectangle_Corner10");
        assert_eq!(rect.import.border, SpriteBorder::uniform(10));
        assert_eq!((rect.canvas.width(), rect.canvas.height()), (64, 64));
    }

    #[test]
    fn render_fails_before_drawing_on_bad_input() {
        let err = render(&request(ShapeKind::RoundedRect, 32, 0, 17)).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter(_)));
    }
}
