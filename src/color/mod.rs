mod hex;
mod utils;

pub use hex::{HEX_LEN, HexString, decode_hex, encode_hex};
pub use utils::{HUE_CIRCLE, hsv_to_rgb, hue_to_rgb, lerp_channel, lerp_colors};
use smart_leds::RGB8;

pub type Rgb = RGB8;
