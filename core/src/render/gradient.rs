use crate::math::{clamp, convert_domain, rssi_to_dbm};
use crate::radio_interface::Rgb565;

/// Full-resolution hand-tuned intensity gradient, black through the warm
/// mid-range into the blue/white hot end.
pub const GRADIENT_PALETTE: [Rgb565; 128] = [
    0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000, 0x0000,
    0x0000, 0x0000, 0x0800, 0x1000, 0x1000, 0x1800, 0x2000, 0x2000, 0x2800,
    0x3000, 0x3000, 0x3800, 0x4000, 0x4800, 0x4800, 0x5000, 0x5000, 0x5800,
    0x6000, 0x6800, 0x6800, 0x7000, 0x7800, 0x7800, 0x8000, 0x8800, 0x8820,
    0x9061, 0x98a1, 0xa0e2, 0xa922, 0xb163, 0xb9a3, 0xc1e4, 0xca24, 0xd265,
    0xdaa5, 0xe2e6, 0xeb26, 0xf367, 0xfb87, 0xf3c8, 0xebe9, 0xe42a, 0xdc4b,
    0xd46c, 0xc48c, 0xbcad, 0xb4ee, 0xad0f, 0x9d30, 0x9551, 0x8d92, 0x85b3,
    0x75d4, 0x6df5, 0x6636, 0x5e57, 0x4e78, 0x4699, 0x3eda, 0x36fb, 0x271c,
    0x1f3d, 0x177e, 0x0f9f, 0x079f, 0x077f, 0x075f, 0x071f, 0x06ff, 0x06df,
    0x06bf, 0x067f, 0x065f, 0x063f, 0x061f, 0x05ff, 0x05df, 0x059f, 0x057f,
    0x055f, 0x053f, 0x04ff, 0x04df, 0x04bf, 0x049f, 0x047f, 0x043f, 0x041f,
    0x03ff, 0x03df, 0x039f, 0x037f, 0x035f, 0x033f, 0x031f, 0x02ff, 0x02bf,
    0x029f, 0x027f, 0x025f, 0x021f, 0x01ff, 0x01df, 0x01bf, 0x019f, 0x015f,
    0x013f, 0x011f, 0x00ff, 0x00bf, 0x009f, 0x007f, 0x005f, 0x003f, 0x319f,
    0x9c9f, 0xffbf,
];

/// Compact palette for the nibble-packed waterfall rows.
pub const WATERFALL_PALETTE: [Rgb565; 15] = [
    0x2000, 0x3000, 0x5000, 0x9000, 0xfc44, 0xffbf, 0x07bf, 0x1b5f, 0x1b5f,
    0x001f, 0x001f, 0x0018, 0x0013, 0x000e, 0x0009,
];

/// Maps RSSI readings to palette entries through an adaptive dBm window.
///
/// The window tracks real signal activity: it is recomputed every render
/// pass from the column peaks instead of spanning a fixed dBm range.
#[derive(Debug, Clone, Copy)]
pub struct GradientMapper {
    dbm_min: i16,
    dbm_max: i16,
}

impl GradientMapper {
    pub fn new() -> Self {
        Self {
            dbm_min: -150,
            dbm_max: -120,
        }
    }

    pub fn window(&self) -> (i16, i16) {
        (self.dbm_min, self.dbm_max)
    }

    /// Re-centers the window on the pass statistics: the low edge just below
    /// the weakest column peak, the high edge above the strongest one by at
    /// least 20 raw units of headroom (more when the peaks ride well above
    /// the noise floor).
    pub fn update_window(&mut self, rssi_min: u16, rssi_max: u16, noise_floor: u16) {
        let spread = rssi_max.saturating_sub(noise_floor) as i32;
        let v_min = rssi_min.saturating_sub(1);
        let v_max = rssi_max as i32 + clamp(spread, 20, spread);
        self.dbm_min = rssi_to_dbm(v_min);
        self.dbm_max = rssi_to_dbm(v_max.min(u16::MAX as i32) as u16);
    }

    /// Index into the full gradient, clamped in bounds.
    pub fn palette_index(&self, rssi: u16) -> usize {
        convert_domain(
            rssi_to_dbm(rssi) as i32,
            self.dbm_min as i32,
            self.dbm_max as i32,
            0,
            GRADIENT_PALETTE.len() as i32 - 1,
        ) as usize
    }

    pub fn color_for(&self, rssi: u16) -> Rgb565 {
        GRADIENT_PALETTE[self.palette_index(rssi)]
    }

    /// 4-bit index for the packed waterfall rows.
    pub fn waterfall_index(&self, rssi: u16) -> u8 {
        convert_domain(
            rssi_to_dbm(rssi) as i32,
            self.dbm_min as i32,
            self.dbm_max as i32,
            0,
            WATERFALL_PALETTE.len() as i32 - 1,
        ) as u8
    }

    pub fn waterfall_color(nibble: u8) -> Rgb565 {
        WATERFALL_PALETTE[(nibble as usize).min(WATERFALL_PALETTE.len() - 1)]
    }
}

impl Default for GradientMapper {
    fn default() -> Self {
        Self::new()
    }
}
