pub const MIN_ZOOM: f32 = 0.5;
pub const MAX_ZOOM: f32 = 3.0;
pub const DEFAULT_ZOOM: f32 = 1.0;

pub const ZOOM_STEP_FACTOR: f32 = 1.25;

/// Resolution a page is rasterized at when zoom is 1.0.
pub const BASE_DPI: u32 = 150;
pub const POINTS_PER_INCH: f32 = 72.0;

pub const TAB_TITLE_MAX_CHARS: usize = 20;
pub const TAB_TITLE_KEEP_CHARS: usize = 17;

pub const PAGE_CACHE_CAPACITY: usize = 8;

pub const WINDOW_WIDTH: f32 = 900.0;
pub const WINDOW_HEIGHT: f32 = 700.0;

pub const PAGE_ENTRY_WIDTH: f32 = 60.0;

/// Accumulated wheel distance, in points, that turns one page.
pub const WHEEL_PAGE_STEP: f32 = 40.0;
/// How much of an oversized page must stay inside the viewport when panning.
pub const MIN_VISIBLE_PIXELS: f32 = 50.0;

