//! Puzzle generation.
//!
//! A reference loop is drawn on the lattice first; clue circles are then read off it, so that the
//! loop always satisfies them. The loop itself is only kept for callers who ask for it.

use std::cmp::Reverse;
use std::ops::RangeInclusive;

use itertools::Itertools;
use log::{debug, trace};
use ndarray::Array2;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use strum::VariantArray;

use crate::location::Location;
use crate::masyu::clues::{Circle, Clues};
use crate::masyu::edges::{EdgeSet, Segment};
use crate::masyu::solver::{LoopSolver, Uniqueness};
use crate::masyu::validator::{black_bent_arm, check_loop, white_satisfied};
use crate::masyu::MasyuError;
use crate::shape::{CellShape, SquareStep};

/// Allowed board sides.
///
/// A 2×2 board admits no circle at all: any straight cell leaves a corner point of the lattice with a single segment.
pub const SIDE_RANGE: RangeInclusive<usize> = 3..=10;

/// How the reference loop is drawn.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// The deterministic serpentine of [`serpentine_loop`]. Its grade is reported as found.
    Serpentine,
    /// Randomly grown regions, reshaped until the solver proves a board unique.
    #[default]
    Grown,
}

/// Generator configuration.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct MasyuSettings {
    /// The board side, in [`SIDE_RANGE`].
    pub n: usize,
    /// How the reference loop is drawn.
    pub strategy: Strategy,
    /// Grown candidates allowed per unit of side before giving up; the budget is `attempts_per_side * n`.
    pub attempts_per_side: usize,
    /// Solver-guided reshaping steps spent on each grown candidate.
    pub refine_steps: usize,
    /// How many solver models to examine per candidate before giving up on grading it.
    pub solution_cap: usize,
}

impl Default for MasyuSettings {
    fn default() -> Self {
        Self {
            n: 6,
            strategy: Strategy::Grown,
            attempts_per_side: 30,
            refine_steps: Self::default_refine_steps(6),
            solution_cap: 500,
        }
    }
}

impl MasyuSettings {
    /// Default settings for a board of side `n`.
    pub fn new(n: usize) -> Result<Self, MasyuError> {
        if !SIDE_RANGE.contains(&n) {
            return Err(MasyuError::SideOutOfRange(n));
        }

        Ok(Self { n, refine_steps: Self::default_refine_steps(n), ..Self::default() })
    }

    // small boards plateau at few clues, where counting solutions is cheap
    fn default_refine_steps(n: usize) -> usize {
        if n <= 5 { 60 } else { 0 }
    }

    /// The number of grown candidates tried before [`MasyuError::NoUniquePuzzle`].
    pub fn attempt_budget(&self) -> usize {
        self.attempts_per_side.saturating_mul(self.n).max(1)
    }
}

/// A generated puzzle with the loop it was read off.
#[derive(Clone, Debug)]
pub struct Generated {
    /// The circles.
    pub clues: Clues,
    /// The loop the circles were read off; it always solves them.
    pub solution: EdgeSet,
    /// How many loops solve the circles. Always [`Uniqueness::Unique`] for [`Strategy::Grown`].
    pub uniqueness: Uniqueness,
}

/// The serpentine reference loop: the boundary of lanes of cells.
///
/// Every third row of cells is a full lane. Consecutive lanes are joined by a two-cell connector,
/// alternately at the right and the left edge, and the last lane trails a connector down to the bottom row.
/// Each inner elbow of the connectors carries a black circle.
pub fn serpentine_loop(n: usize) -> EdgeSet {
    let mut region = Array2::from_elem((n, n), false);

    for y in 0..n {
        let lane = y / 3;
        if y % 3 == 0 {
            region.row_mut(y).fill(true);
        } else {
            let x = if lane % 2 == 0 { n - 1 } else { 0 };
            region[Location(x, y).as_index()] = true;
        }
    }

    region_boundary(&region)
}

fn inside(region: &Array2<bool>, cell: Location) -> bool {
    region.get(cell.as_index()).copied().unwrap_or(false)
}

/// The segments separating `region` from the rest of the plane.
pub(crate) fn region_boundary(region: &Array2<bool>) -> EdgeSet {
    let n = region.nrows();
    let mut edges = EdgeSet::empty(n);
    let segments = edges.all_segments().collect_vec();

    for segment in segments {
        let (a, b) = match segment {
            Segment::Horizontal(origin) => (SquareStep::Up.attempt_from(origin), origin),
            Segment::Vertical(origin) => (SquareStep::Left.attempt_from(origin), origin),
        };
        if inside(region, a) != inside(region, b) {
            // in bounds by construction
            let _ = edges.set(segment, true);
        }
    }

    edges
}

/// The boundary of a randomly grown region of cells, always a single simple loop.
///
/// Growth prefers cells touching the region on only one side, which keeps the region thin.
pub fn grown_loop<R: Rng + ?Sized>(n: usize, rng: &mut R) -> EdgeSet {
    region_boundary(&grown_region(n, rng))
}

fn grown_region<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Array2<bool> {
    let mut region = Array2::from_elem((n, n), false);
    if n == 0 {
        return region;
    }

    region = Array2::from_elem((n, n), false);
    let start = Location(rng.gen_range(0..n), rng.gen_range(0..n));
    region[start.as_index()] = true;

    let target = rng.gen_range(n * n / 3..=n * n * 2 / 3).max(1);
    let mut size = 1;

    'grow: while size < target {
        let touching = |region: &Array2<bool>, cell: Location| SquareStep::VARIANTS.iter()
            .filter(|step| inside(region, step.attempt_from(cell)))
            .count();

        let mut frontier = (0..n).cartesian_product(0..n)
            .map(|(y, x)| Location(x, y))
            .filter(|cell| !inside(&region, *cell) && touching(&region, *cell) > 0)
            .collect_vec();
        frontier.shuffle(rng);
        frontier.sort_by_key(|cell| touching(&region, *cell));

        for cell in frontier {
            region[cell.as_index()] = true;
            if check_loop(&region_boundary(&region)).is_ok() {
                size += 1;
                continue 'grow;
            }
            region[cell.as_index()] = false;
        }

        // no cell can be added without pinching the boundary
        break;
    }

    region
}

/// Read the circles off a solution: every cell that would satisfy a circle gets one.
pub fn derive_clues(edges: &EdgeSet) -> Clues {
    let n = edges.side();
    let mut clues = Clues::empty(n);

    for (y, x) in (0..n).cartesian_product(0..n) {
        let cell = Location(x, y);
        let circle = match edges.cell_shape(cell) {
            Some(CellShape::Straight(axis)) if white_satisfied(edges, cell, axis) => Some(Circle::White),
            Some(shape @ CellShape::Turn(..)) if black_bent_arm(edges, cell, shape).is_none() => Some(Circle::Black),
            _ => None,
        };
        clues.set(cell, circle);
    }

    clues
}

fn grade(clues: &Clues, settings: &MasyuSettings) -> Uniqueness {
    LoopSolver::new(clues).grade(settings.solution_cap)
}

fn random_cell<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Location {
    Location(rng.gen_range(0..n), rng.gen_range(0..n))
}

/// The clues of the region's boundary, or [`None`] if the boundary is not one simple loop.
fn region_clues(region: &Array2<bool>) -> Option<Clues> {
    let edges = region_boundary(region);
    check_loop(&edges).ok()?;
    Some(derive_clues(&edges))
}

/// Flip random cells in and out of the region, keeping every flip that leaves a simple boundary with at least as many clues.
fn climb<R: Rng + ?Sized>(region: &mut Array2<bool>, mut clues: usize, steps: usize, rng: &mut R) -> usize {
    let n = region.nrows();
    for _ in 0..steps {
        let cell = random_cell(n, rng).as_index();
        region[cell] ^= true;
        match region_clues(region) {
            Some(derived) if derived.count() >= clues => clues = derived.count(),
            _ => region[cell] ^= true,
        }
    }
    clues
}

/// Climb, then repeatedly kick the region a few flips away and climb again, keeping the result when it is no worse.
fn maximize_clues<R: Rng + ?Sized>(region: &mut Array2<bool>, rng: &mut R) -> usize {
    const ROUNDS: usize = 20;
    const KICK: usize = 3;

    let n = region.nrows();
    let steps = n * n * 30;
    let start = region_clues(region).map_or(0, |clues| clues.count());
    let mut best = climb(region, start, steps, rng);

    for _ in 0..ROUNDS {
        let saved = region.clone();
        let mut kicked = 0;
        for _ in 0..50 {
            if kicked == KICK {
                break;
            }
            let cell = random_cell(n, rng).as_index();
            region[cell] ^= true;
            if region_clues(region).is_some() {
                kicked += 1;
            } else {
                region[cell] ^= true;
            }
        }

        let start = region_clues(region).map_or(0, |clues| clues.count());
        let clues = climb(region, start, steps / 4, rng);
        if clues >= best {
            best = clues;
        } else {
            *region = saved;
        }
    }

    best
}

/// Solutions found (capped at 3, or 4 when the search gave up) first, then fewer clues; lower is better.
fn ambiguity(clues: &Clues, settings: &MasyuSettings) -> (usize, Reverse<usize>) {
    let (found, complete) = LoopSolver::new(clues).solutions(3, settings.solution_cap);
    let solutions = if complete { found.len() } else { 4 };
    (solutions, Reverse(clues.count()))
}

/// Flip one or two cells at a time toward boards with fewer solutions, stopping once the board is unique.
fn refine<R: Rng + ?Sized>(region: &mut Array2<bool>, settings: &MasyuSettings, rng: &mut R) {
    let n = region.nrows();
    let Some(clues) = region_clues(region) else {
        return;
    };
    let mut current = ambiguity(&clues, settings);

    for step in 0..settings.refine_steps {
        if current.0 == 1 {
            trace!("unique after {step} refinement steps");
            return;
        }

        let flips = if rng.gen_ratio(1, 4) { 2 } else { 1 };
        let cells = (0..flips).map(|_| random_cell(n, rng).as_index()).collect_vec();
        for cell in &cells {
            region[*cell] ^= true;
        }

        let candidate = region_clues(region).map(|clues| ambiguity(&clues, settings));
        match candidate {
            Some(score) if score <= current || rng.gen_ratio(1, 50) => current = score,
            _ => {
                for cell in cells.iter().rev() {
                    region[*cell] ^= true;
                }
            }
        }
    }
}

fn grown_candidate<R: Rng + ?Sized>(settings: &MasyuSettings, rng: &mut R) -> Generated {
    let mut region = grown_region(settings.n, rng);
    let climbed = maximize_clues(&mut region, rng);
    trace!("climbed to {climbed} clues");
    refine(&mut region, settings, rng);

    let solution = region_boundary(&region);
    let clues = derive_clues(&solution);
    let uniqueness = grade(&clues, settings);
    Generated { clues, solution, uniqueness }
}

/// Generate a puzzle and keep the reference loop.
///
/// With [`Strategy::Grown`] candidates are drawn until one is proven unique; after
/// [`MasyuSettings::attempt_budget`] failures this returns [`MasyuError::NoUniquePuzzle`].
pub fn generate_with_solution<R: Rng + ?Sized>(settings: &MasyuSettings, rng: &mut R) -> Result<Generated, MasyuError> {
    let n = settings.n;
    if !SIDE_RANGE.contains(&n) {
        return Err(MasyuError::SideOutOfRange(n));
    }

    let generated = match settings.strategy {
        Strategy::Serpentine => {
            let solution = serpentine_loop(n);
            let clues = derive_clues(&solution);
            let uniqueness = grade(&clues, settings);
            Generated { clues, solution, uniqueness }
        }
        Strategy::Grown => {
            let budget = settings.attempt_budget();
            let mut unique = None;
            for attempt in 0..budget {
                let candidate = grown_candidate(settings, rng);
                debug!("attempt {attempt}: {} clues, {}", candidate.clues.count(), candidate.uniqueness.grade_name());
                if matches!(candidate.uniqueness, Uniqueness::Unique(_)) {
                    unique = Some(candidate);
                    break;
                }
            }
            unique.ok_or(MasyuError::NoUniquePuzzle { attempts: budget })?
        }
    };

    debug!(
        "generated {n}x{n} masyu with {} clues over a {}-segment loop ({})",
        generated.clues.count(),
        generated.solution.count(),
        generated.uniqueness.grade_name(),
    );
    Ok(generated)
}

/// Generate a puzzle; only the circles are returned.
pub fn generate<R: Rng + ?Sized>(settings: &MasyuSettings, rng: &mut R) -> Result<Clues, MasyuError> {
    generate_with_solution(settings, rng).map(|generated| generated.clues)
}
