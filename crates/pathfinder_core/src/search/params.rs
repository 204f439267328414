//! Option names and declarations shared by several algorithms.
use crate::{
    constants::{
        CLIMBING_GRADIENT_FACTOR_DEFAULT, CLIMBING_SCALE_FACTOR_DEFAULT, SEARCH_DEPTH_DEFAULT,
        STORAGE_LIMIT_MAX,
    },
    options::{OptionInfo, OptionKind, OptionSet},
};

pub const HEURISTIC: &str = "Heuristic";
pub const STORAGE_LIMIT: &str = "Storage Limit";
pub const BASE_ALGORITHM: &str = "Base-Algorithm";
pub const ORIENTATION_DIRECTION: &str = "Orientation-Direction";
pub const CLIMBING_FUNCTION: &str = "Climbing Function";
pub const CLIMBING_SCALE_BASIS: &str = "Scale Basis";
pub const CLIMBING_SCALE_FACTOR: &str = "Scale Factor";
pub const CLIMBING_GRADIENT_FACTOR: &str = "Gradient Factor";
pub const SEARCH_DEPTH: &str = "search depth";

pub const HEURISTIC_NONE: &str = "none";
pub const HEURISTIC_ITERATIVE_DEEPENING: &str = "iterative deepening";
pub const HEURISTIC_DISTANCE: &str = "Distance";
pub const HEURISTIC_CLIMBING: &str = "Climbing";
pub const HEURISTIC_ORIENTATION: &str = "Orientation-Preferred";
pub const HEURISTIC_AIRLINE: &str = "Air Line";
pub const HEURISTIC_LOWER_BOUND_ESTIMATE: &str = "lower bound estimate";
pub const HEURISTIC_DYN_PROG_PRINCIPLE: &str = "dynamic programming principle";
pub const HEURISTIC_BOTH: &str = "both";

pub const BASE_ALGORITHM_BREADTH_FIRST: &str = "Breadth-First";
pub const BASE_ALGORITHM_DEPTH_FIRST: &str = "Depth-First";

pub const ORIENTATION_DIRECTION_4: &str = "4";
pub const ORIENTATION_DIRECTION_8: &str = "8";

pub const CLIMBING_FUNCTION_EXP: &str = "e^(-(x^2+y^2))";
pub const CLIMBING_FUNCTION_COS: &str = "cos(x)*cos(y)";
pub const CLIMBING_SCALE_BASIS_FACTOR: &str = "factor";
pub const CLIMBING_SCALE_BASIS_QUARTER_PI: &str = "factor * 1/4*Pi";

/// Heuristics that rank the children of an expansion
pub const RANKING_HEURISTICS: &[&str] = &[
    HEURISTIC_DISTANCE,
    HEURISTIC_CLIMBING,
    HEURISTIC_ORIENTATION,
    HEURISTIC_AIRLINE,
];

pub fn storage_limit() -> OptionInfo {
    OptionInfo::new(
        STORAGE_LIMIT,
        "Limits the number of new entries kept per expansion (0 keeps all)",
        OptionKind::Integer {
            min: 0,
            max: STORAGE_LIMIT_MAX,
        },
        0i64,
    )
}

pub fn ranking_heuristic() -> OptionInfo {
    OptionInfo::new(
        HEURISTIC,
        "Sets the heuristic to use",
        OptionKind::Choice(RANKING_HEURISTICS),
        HEURISTIC_DISTANCE,
    )
}

pub fn orientation_direction() -> OptionInfo {
    OptionInfo::new(
        ORIENTATION_DIRECTION,
        "Number of compass directions (4 or 8), only used by the orientation heuristic",
        OptionKind::Choice(&[ORIENTATION_DIRECTION_4, ORIENTATION_DIRECTION_8]),
        ORIENTATION_DIRECTION_4,
    )
}

pub fn search_depth() -> OptionInfo {
    OptionInfo::new(
        SEARCH_DEPTH,
        "Search depth of the algorithm",
        OptionKind::Integer { min: 1, max: 10_000 },
        SEARCH_DEPTH_DEFAULT,
    )
}

/// Declares the hill function, scale basis and scale factor options
pub fn declare_climbing(options: &mut OptionSet) {
    options.declare(OptionInfo::new(
        CLIMBING_FUNCTION,
        "The underlying hill function",
        OptionKind::Choice(&[CLIMBING_FUNCTION_EXP, CLIMBING_FUNCTION_COS]),
        CLIMBING_FUNCTION_EXP,
    ));
    options.declare(OptionInfo::new(
        CLIMBING_SCALE_BASIS,
        "Is multiplied with the scale factor",
        OptionKind::Choice(&[CLIMBING_SCALE_BASIS_FACTOR, CLIMBING_SCALE_BASIS_QUARTER_PI]),
        CLIMBING_SCALE_BASIS_FACTOR,
    ));
    options.declare(OptionInfo::new(
        CLIMBING_SCALE_FACTOR,
        "Is multiplied with the scale basis",
        OptionKind::Integer { min: 0, max: 10_000 },
        CLIMBING_SCALE_FACTOR_DEFAULT,
    ));
}

pub fn gradient_factor() -> OptionInfo {
    OptionInfo::new(
        CLIMBING_GRADIENT_FACTOR,
        "Amount the water level rises after every expansion",
        OptionKind::Real {
            min: 0.001,
            max: 2.0,
            step: 0.001,
        },
        CLIMBING_GRADIENT_FACTOR_DEFAULT,
    )
}

/// Effective storage limit, `None` when unbounded
pub fn read_storage_limit(options: &OptionSet) -> Option<usize> {
    match options.integer(STORAGE_LIMIT).unwrap_or(0) {
        0 => None,
        n => Some(n as usize),
    }
}
