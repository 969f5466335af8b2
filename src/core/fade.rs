use crate::constants::{FOCUS_SCALE_BONUS, OPACITY_EXPONENT};

/// Opacity and scale for one reel item given its distance from the focus line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fade {
    pub opacity: f32,
    pub scale: f32,
}

impl Fade {
    /// Items at zero opacity are hidden outright so the renderer can skip them.
    #[inline]
    pub fn visible(&self) -> bool {
        self.opacity > 0.0
    }
}

/// Quadratic focus falloff.
///
/// `offset` is the signed distance from the focus line and `range` the
/// distance at which an item becomes fully transparent. Total over all real
/// inputs; a non-positive `range` only keeps an item sitting exactly on the
/// focus line.
pub fn fade(offset: f32, range: f32) -> Fade {
    let dist = offset.abs();
    let raw = if range > 0.0 {
        1.0 - dist / range
    } else if dist == 0.0 {
        1.0
    } else {
        0.0
    };
    // NaN offsets fall through clamp unchanged; treat them as out of focus
    let raw = if raw.is_nan() { 0.0 } else { raw.clamp(0.0, 1.0) };
    let opacity = raw.powi(OPACITY_EXPONENT);
    Fade {
        opacity,
        scale: 1.0 + opacity * FOCUS_SCALE_BONUS,
    }
}
