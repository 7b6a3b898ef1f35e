// Gamma-correct alpha blending with table lookups instead of powf.
// Visual: translucent overlays (hover buttons, eraser ring) mix with the camera
// image without dark fringes.

pub struct GammaLut {
    // sRGB(0..255) -> linear (0..1) as f32
    srgb_to_linear: [f32; 256],
    // linear(0..1) -> sRGB(0..255) via 4096-step quantization
    // (index = (linear * 4095).round())
    linear_to_srgb: [u8; 4096],
}

impl GammaLut {
    /// Build both tables once at startup.
    pub fn new() -> Self {
        let mut s2l = [0.0f32; 256];
        for (v, out) in s2l.iter_mut().enumerate() {
            let c = v as f32 / 255.0;
            *out = if c <= 0.04045 { c / 12.92 } else { ((c + 0.055) / 1.055).powf(2.4) };
        }

        let mut l2s = [0u8; 4096];
        for (i, out) in l2s.iter_mut().enumerate() {
            let l = (i as f32) / 4095.0;
            let s = if l <= 0.003_130_8 { 12.92 * l } else { 1.055 * l.powf(1.0 / 2.4) - 0.055 };
            *out = (s * 255.0).round().clamp(0.0, 255.0) as u8;
        }

        Self { srgb_to_linear: s2l, linear_to_srgb: l2s }
    }

    #[inline]
    pub fn srgb_u8_to_linear(&self, v: u8) -> f32 {
        self.srgb_to_linear[v as usize]
    }

    #[inline]
    pub fn linear_to_srgb_u8(&self, l: f32) -> u8 {
        let idx = (l.clamp(0.0, 1.0) * 4095.0).round() as usize;
        self.linear_to_srgb[idx]
    }

    /// Mix `src` over `dst` (both 0x00RRGGBB) with coverage `alpha` in [0,1].
    #[inline]
    pub fn blend(&self, dst: u32, src: u32, alpha: f32) -> u32 {
        if alpha <= 0.0 {
            return dst & 0x00FF_FFFF;
        }
        if alpha >= 1.0 {
            return src & 0x00FF_FFFF;
        }
        let inv = 1.0 - alpha;
        let mut out = 0u32;
        for shift in [16u32, 8, 0] {
            let d = self.srgb_u8_to_linear(((dst >> shift) & 0xFF) as u8);
            let s = self.srgb_u8_to_linear(((src >> shift) & 0xFF) as u8);
            out |= (self.linear_to_srgb_u8(alpha * s + inv * d) as u32) << shift;
        }
        out
    }
}

impl Default for GammaLut {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_round_trip() {
        let lut = GammaLut::new();
        for v in [0u8, 1, 64, 128, 200, 255] {
            assert_eq!(lut.linear_to_srgb_u8(lut.srgb_u8_to_linear(v)), v);
        }
    }

    #[test]
    fn test_blend_extremes() {
        let lut = GammaLut::new();
        assert_eq!(lut.blend(0x00_10_20_30, 0x00_FF_00_00, 0.0), 0x00_10_20_30);
        assert_eq!(lut.blend(0x00_10_20_30, 0x00_FF_00_00, 1.0), 0x00_FF_00_00);
    }

    #[test]
    fn test_half_blend_is_brighter_than_naive_average() {
        let lut = GammaLut::new();
        let mixed = lut.blend(0x00_00_00_00, 0x00_FF_FF_FF, 0.5);
        let r = (mixed >> 16) & 0xFF;
        // linear-light midpoint of black and white lands near sRGB 188
        assert!(r > 128 && r < 200, "got {r}");
        assert_eq!(mixed & 0xFF, r);
    }
}
