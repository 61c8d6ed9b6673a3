use crate::color::Rgb;

/// Degrees in a full hue circle
pub const HUE_CIRCLE: u16 = 360;

const SECTOR: u32 = 60;

/// Convert a hue in degrees to a fully saturated, full brightness color.
///
/// Hue is taken modulo 360.
#[inline]
pub fn hue_to_rgb(hue: u16) -> Rgb {
    hsv_to_rgb(hue, u8::MAX, u8::MAX)
}

/// Convert HSV to RGB.
///
/// Unlike `smart_leds::hsv`, hue here is on a 0-359 degree circle, with
/// saturation and value on 0-255. Uses integer math with rounding.
#[allow(clippy::cast_possible_truncation)]
pub fn hsv_to_rgb(hue: u16, sat: u8, val: u8) -> Rgb {
    let hue = u32::from(hue % HUE_CIRCLE);
    let sat = u32::from(sat);
    let val = u32::from(val);

    let region = hue / SECTOR;
    let rem = hue % SECTOR;

    let full = 255 * SECTOR;
    let scale = |amount: u32| -> u8 { ((val * amount + full / 2) / full) as u8 };

    let p = scale(full - sat * SECTOR);
    let q = scale(full - sat * rem);
    let t = scale(full - sat * (SECTOR - rem));
    let v = val as u8;

    let (r, g, b) = match region {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    Rgb { r, g, b }
}

/// Linear interpolation of a single channel at `step / steps`.
///
/// `step == steps` yields exactly `end`.
#[inline]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn lerp_channel(start: u8, end: u8, step: u32, steps: u32) -> u8 {
    if steps == 0 || step >= steps {
        return end;
    }
    let t = step as f32 / steps as f32;
    let start = f32::from(start);
    let value = libm::roundf(start + (f32::from(end) - start) * t);
    value.clamp(0.0, 255.0) as u8
}

/// Interpolate each channel independently
pub fn lerp_colors(start: Rgb, end: Rgb, step: u32, steps: u32) -> Rgb {
    Rgb {
        r: lerp_channel(start.r, end.r, step, steps),
        g: lerp_channel(start.g, end.g, step, steps),
        b: lerp_channel(start.b, end.b, step, steps),
    }
}
