/// Edge weight / path length type
pub type Weight = f64;
/// Integer type of a graph coordinate
pub type Coord = i32;

/// Upper bound of the `Storage Limit` option (0 means unbounded)
pub const STORAGE_LIMIT_MAX: i64 = 30;
/// Default depth bound of the depth-limited search
pub const SEARCH_DEPTH_DEFAULT: i64 = 1000;
pub const CLIMBING_SCALE_FACTOR_DEFAULT: i64 = 2;
pub const CLIMBING_GRADIENT_FACTOR_DEFAULT: f64 = 0.015;
