pub mod draw;
pub mod gradient;
pub mod waterfall;

pub use draw::{format_frequency, Renderer, StatusLine};
pub use gradient::{GradientMapper, GRADIENT_PALETTE, WATERFALL_PALETTE};
pub use waterfall::{WaterfallBuffer, WF_ROWS, WF_ROW_BYTES};
