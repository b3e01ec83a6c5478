/// Grid dimensions, variable slider limits, and other fixed visualizer parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridConfig {
    /// Side length of the square preview grid. Always odd so the actor sits on a cell.
    pub size: i32,
}

impl GridConfig {
    // ===== grid =====
    pub const GRID_SIZE: i32 = 15;
    pub const CENTER: i32 = Self::GRID_SIZE / 2;

    // ===== variable sliders =====
    pub const VARIABLE_MIN: i32 = 0;
    pub const VARIABLE_MAX: i32 = 10;
    pub const VARIABLE_DEFAULT: i32 = 0;
    /// Reserved variable that is always `1` and never exposed as a slider.
    pub const RESERVED_SIZE_NAME: &'static str = "size";
    pub const RESERVED_SIZE_VALUE: i32 = 1;

    // ===== tile mode =====
    /// Added to `min_range` when `max_range` is missing or unparsable.
    pub const TILE_FALLBACK_SPAN: f64 = 3.0;
    /// Lower bound of the fallback `max_range`.
    pub const TILE_FALLBACK_MAX: f64 = 4.0;

    /// Offsets from the actor used by "add sample obstacles".
    pub const SAMPLE_OBSTACLES: [(i32, i32); 8] = [
        (-2, 0),
        (2, 0),
        (0, -2),
        (0, 2),
        (-1, -1),
        (1, 1),
        (-1, 2),
        (1, -2),
    ];

    pub fn new() -> Self {
        Self {
            size: Self::GRID_SIZE,
        }
    }

    pub fn with_size(size: i32) -> Self {
        Self { size }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::new()
    }
}
