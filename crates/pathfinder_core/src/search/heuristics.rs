//! Scoring functions used to rank or filter frontier candidates.
use std::{cmp::Ordering, f64::consts::PI};

use crate::{
    constants::{Weight, CLIMBING_SCALE_FACTOR_DEFAULT},
    geometry::Coordinate,
    graph::{Edge, EdgeIndex, Graph, NodeIndex},
    options::OptionSet,
};

use super::params::*;

/// Straight line distance between two nodes. Admissible for Euclidean graphs.
#[inline]
pub fn estimate_distance(g: &Graph, current: NodeIndex, destination: NodeIndex) -> Weight {
    g.coordinate(current).distance(&g.coordinate(destination))
}

/// Compares scores, NaN counts as equal
#[inline]
pub(crate) fn cmp_score(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HillFunction {
    /// e^(-(x^2+y^2))
    Exp,
    /// cos(x)*cos(y)
    Cos,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleBasis {
    Factor,
    QuarterPi,
}

/// Parameters of the synthetic hill centred on the destination
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClimbParams {
    pub function: HillFunction,
    pub basis: ScaleBasis,
    pub scale_factor: i64,
}

impl Default for ClimbParams {
    fn default() -> Self {
        ClimbParams {
            function: HillFunction::Exp,
            basis: ScaleBasis::Factor,
            scale_factor: CLIMBING_SCALE_FACTOR_DEFAULT,
        }
    }
}

impl ClimbParams {
    pub fn from_options(options: &OptionSet) -> Self {
        let function = match options.choice(CLIMBING_FUNCTION) {
            Some(CLIMBING_FUNCTION_COS) => HillFunction::Cos,
            _ => HillFunction::Exp,
        };
        let basis = match options.choice(CLIMBING_SCALE_BASIS) {
            Some(CLIMBING_SCALE_BASIS_QUARTER_PI) => ScaleBasis::QuarterPi,
            _ => ScaleBasis::Factor,
        };
        ClimbParams {
            function,
            basis,
            scale_factor: options
                .integer(CLIMBING_SCALE_FACTOR)
                .unwrap_or(CLIMBING_SCALE_FACTOR_DEFAULT),
        }
    }
}

/// Height of `node` on a hill whose peak sits on `goal`.
///
/// Offsets to the goal are normalized by the distance from the goal to the
/// farthest corner of the graph and stretched by the scale factor, so the
/// grade is 1 on the goal and falls off towards the edges of the map.
pub fn climb_grade(g: &Graph, node: NodeIndex, goal: NodeIndex, params: &ClimbParams) -> f64 {
    let mut max_scale = params.scale_factor as f64;
    if params.basis == ScaleBasis::QuarterPi {
        max_scale *= 0.25 * PI;
    }

    let (w, h) = (g.width(), g.height());
    let goal_c = g.coordinate(goal);
    let corner = match (goal_c.x > w / 2, goal_c.y > h / 2) {
        (true, true) => Coordinate::new(0, 0),
        (true, false) => Coordinate::new(0, h),
        (false, true) => Coordinate::new(w, 0),
        (false, false) => Coordinate::new(w, h),
    };
    let longest = match corner.distance(&goal_c) {
        d if d > 0.0 => d,
        _ => 1.0,
    };

    let node_c = g.coordinate(node);
    let x = (goal_c.x as f64 - node_c.x as f64) / longest * max_scale;
    let y = (goal_c.y as f64 - node_c.y as f64) / longest * max_scale;

    match params.function {
        HillFunction::Exp => (-(x.powi(2) + y.powi(2))).exp(),
        HillFunction::Cos => x.cos() * y.cos(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrientationDirection {
    Four,
    Eight,
}

impl OrientationDirection {
    pub fn from_options(options: &OptionSet) -> Self {
        match options.choice(ORIENTATION_DIRECTION) {
            Some(ORIENTATION_DIRECTION_8) => OrientationDirection::Eight,
            _ => OrientationDirection::Four,
        }
    }
}

/// Compass directions, counter-clockwise starting at north
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compass {
    North,
    NorthWest,
    West,
    SouthWest,
    South,
    SouthEast,
    East,
    NorthEast,
}

impl Compass {
    // counter-clockwise from east, one entry per 45 degrees
    const FROM_EAST: [Compass; 8] = [
        Compass::East,
        Compass::NorthEast,
        Compass::North,
        Compass::NorthWest,
        Compass::West,
        Compass::SouthWest,
        Compass::South,
        Compass::SouthEast,
    ];

    pub fn ordinal(self) -> usize {
        self as usize
    }
}

/// Compass direction of the vector `from -> to`. Identical points face north.
pub fn orientation(from: Coordinate, to: Coordinate, dirs: OrientationDirection) -> Compass {
    let dx = to.x as f64 - from.x as f64;
    // screen y grows downwards
    let dy = from.y as f64 - to.y as f64;
    if dx == 0.0 && dy == 0.0 {
        return Compass::North;
    }
    let degree = dy.atan2(dx).to_degrees().rem_euclid(360.0);

    match dirs {
        OrientationDirection::Eight => {
            let sector = ((degree + 22.5) / 45.0).floor() as usize % 8;
            Compass::FROM_EAST[sector]
        }
        OrientationDirection::Four => {
            let sector = ((degree + 45.0) / 90.0).floor() as usize % 4;
            Compass::FROM_EAST[sector * 2]
        }
    }
}

/// Number of compass steps between the direction to the goal and the
/// direction to the candidate, taken the short way round.
pub fn orientation_deviation(
    g: &Graph,
    current: NodeIndex,
    candidate: NodeIndex,
    goal: NodeIndex,
    dirs: OrientationDirection,
) -> f64 {
    let here = g.coordinate(current);
    let to_goal = orientation(here, g.coordinate(goal), dirs).ordinal();
    let to_candidate = orientation(here, g.coordinate(candidate), dirs).ordinal();
    let d = to_goal.abs_diff(to_candidate);
    d.min(8 - d) as f64
}

/// Angle in degrees at `candidate` between the directions to `start` and to
/// `goal`. 180 means the candidate lies on the straight line between them.
pub fn air_line_angle(g: &Graph, start: NodeIndex, goal: NodeIndex, candidate: NodeIndex) -> f64 {
    let c = g.coordinate(candidate);
    let s = g.coordinate(start);
    let t = g.coordinate(goal);
    let a = ((s.x as f64 - c.x as f64), (s.y as f64 - c.y as f64));
    let b = ((t.x as f64 - c.x as f64), (t.y as f64 - c.y as f64));
    let la = a.0.hypot(a.1);
    let lb = b.0.hypot(b.1);
    if la == 0.0 || lb == 0.0 {
        return 180.0;
    }
    let cos = ((a.0 * b.0 + a.1 * b.1) / (la * lb)).clamp(-1.0, 1.0);
    cos.acos().to_degrees()
}

/// Heuristic used to rank the children of one expansion
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ranking {
    Distance,
    Climbing(ClimbParams),
    Orientation(OrientationDirection),
    AirLine,
}

impl Ranking {
    pub fn from_options(options: &OptionSet) -> Self {
        match options.choice(HEURISTIC) {
            Some(HEURISTIC_CLIMBING) => Ranking::Climbing(ClimbParams::from_options(options)),
            Some(HEURISTIC_ORIENTATION) => {
                Ranking::Orientation(OrientationDirection::from_options(options))
            }
            Some(HEURISTIC_AIRLINE) => Ranking::AirLine,
            _ => Ranking::Distance,
        }
    }

    /// Climb grade and air line angle prefer high values
    pub fn higher_is_better(&self) -> bool {
        matches!(self, Ranking::Climbing(_) | Ranking::AirLine)
    }

    pub fn score(
        &self,
        g: &Graph,
        start: NodeIndex,
        current: NodeIndex,
        candidate: NodeIndex,
        goal: NodeIndex,
    ) -> f64 {
        match self {
            Ranking::Distance => estimate_distance(g, candidate, goal),
            Ranking::Climbing(params) => climb_grade(g, candidate, goal, params),
            Ranking::Orientation(dirs) => orientation_deviation(g, current, candidate, goal, *dirs),
            Ranking::AirLine => {
                let angle = air_line_angle(g, start, goal, candidate);
                if estimate_distance(g, candidate, goal) > estimate_distance(g, current, goal) {
                    angle - 180.0
                } else {
                    angle
                }
            }
        }
    }

    /// Sorts `children` of `current` best first. Equal scores keep their
    /// adjacency order.
    pub fn rank<'g>(
        &self,
        g: &Graph,
        start: NodeIndex,
        current: NodeIndex,
        goal: NodeIndex,
        children: Vec<(EdgeIndex, &'g Edge)>,
    ) -> Vec<(EdgeIndex, &'g Edge)> {
        let mut scored: Vec<_> = children
            .into_iter()
            .map(|c| (self.score(g, start, current, c.1.target, goal), c))
            .collect();
        scored.sort_by(|a, b| self.better_first(a.0, b.0));
        scored.into_iter().map(|(_, c)| c).collect()
    }

    /// Orders `a` before `b` if `a` is the better score
    pub fn better_first(&self, a: f64, b: f64) -> Ordering {
        if self.higher_is_better() {
            cmp_score(b, a)
        } else {
            cmp_score(a, b)
        }
    }
}
