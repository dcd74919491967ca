/// RGB565 pixel value as pushed to the display controller.
pub type Rgb565 = u16;

/// Packs 5-6-5 color components, mirroring the panel's native encoding.
pub const fn rgb(r: u16, g: u16, b: u16) -> Rgb565 {
    (r << 11) | (g << 5) | b
}

pub const COLOR_BACKGROUND: Rgb565 = rgb(0, 0, 0);
pub const COLOR_FOREGROUND: Rgb565 = rgb(31, 63, 31);
pub const COLOR_GREEN: Rgb565 = rgb(0, 63, 0);
pub const COLOR_GREY: Rgb565 = rgb(16, 32, 16);
pub const COLOR_GREY_DARK: Rgb565 = rgb(8, 16, 8);
pub const COLOR_YELLOW: Rgb565 = rgb(31, 63, 0);

/// Display geometry of the target panel.
pub const DISPLAY_WIDTH: u8 = 160;
pub const DISPLAY_HEIGHT: u8 = 128;

/// Column-indexed drawing contract consumed by the renderer.
///
/// The core emits position/size/color commands only; raw pixel transport is
/// the display driver's business.
pub trait DisplaySink {
    fn fill_rect(&mut self, x: u8, y: u8, width: u8, height: u8, color: Rgb565);
    fn draw_small_string(&mut self, x: u8, y: u8, text: &str, color: Rgb565);

    fn fill_screen(&mut self, color: Rgb565) {
        self.fill_rect(0, 0, DISPLAY_WIDTH, DISPLAY_HEIGHT, color);
    }

    fn draw_vline(&mut self, x: u8, y: u8, height: u8, color: Rgb565) {
        self.fill_rect(x, y, 1, height, color);
    }

    fn draw_hline(&mut self, x: u8, y: u8, width: u8, color: Rgb565) {
        self.fill_rect(x, y, width, 1, color);
    }
}
