use crate::common::{ColorRGB, ColorRGBA};

pub fn opaque(c: ColorRGB) -> ColorRGBA {
    [c[0], c[1], c[2], 255]
}

/// Composites `fg` over `bg` (source-over), mixing channels in gamma space.
pub fn alpha_blend(bg: ColorRGBA, fg: ColorRGBA) -> ColorRGBA {
    let gamma = 2.2;
    let fg_alpha = fg[3] as f32 / 255.0;
    let bg_alpha = bg[3] as f32 / 255.0 * (1.0 - fg_alpha);
    let out_alpha = fg_alpha + bg_alpha;
    if out_alpha <= 0.0 {
        return [0, 0, 0, 0];
    }
    let mut out: ColorRGBA = [0, 0, 0, 0];
    for i in 0..3 {
        let mixed = (fg_alpha * f32::powf(fg[i] as f32, gamma)
            + bg_alpha * f32::powf(bg[i] as f32, gamma))
            / out_alpha;
        out[i] = f32::powf(mixed, 1.0 / gamma).round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (out_alpha * 255.0).round() as u8;
    out
}
