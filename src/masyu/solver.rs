//! Counting the solutions of a board.

use std::collections::HashSet;

use itertools::Itertools;
use log::trace;
use petgraph::visit::Dfs;
use strum::VariantArray;
use varisat::{CnfFormula, ExtendFormula, Lit, Solver, Var};

use crate::location::Location;
use crate::logic::{degree_zero_or_two, equivalent, exactly_one_of, exactly_two};
use crate::masyu::clues::{Circle, Clues};
use crate::masyu::edges::{EdgeSet, Segment};
use crate::masyu::validator::validate;
use crate::shape::{Axis, SquareStep};

/// How many solutions a board has, as far as a bounded search could tell.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Uniqueness {
    /// No drawing solves the board.
    Unsolvable,
    /// Exactly one drawing solves the board.
    Unique(EdgeSet),
    /// At least two drawings solve the board.
    Multiple,
    /// The search gave up before it could decide.
    Undetermined,
}

impl Uniqueness {
    /// A short lowercase name for logs.
    pub fn grade_name(&self) -> &'static str {
        match self {
            Self::Unsolvable => "unsolvable",
            Self::Unique(_) => "unique",
            Self::Multiple => "multiple",
            Self::Undetermined => "undetermined",
        }
    }
}

/// Searches for the loops solving a set of clues by expressing the board as a Boolean satisfiability problem.
///
/// # Logical setup
/// Every segment of the lattice is a variable, true when drawn.
///
/// ## Points
/// Every lattice point has degree 0 or 2: no three incident segments are drawn, and no drawn incident segment is alone.
///
/// ## Circles
/// A circled cell has exactly two drawn sides.
/// For a white circle, the top is drawn if and only if the bottom is, and likewise the left and right.
/// For a black circle, exactly one of top and bottom is drawn.
/// Each drawn side of a black circle is an arm: the cell beyond it must exist and be passed straight through along the arm.
///
/// ## What SAT cannot say
/// Connectivity and the lookahead of white circles are not encoded.
/// Instead, every model is split into its loops, and each loop is checked with the full validator on its own.
/// A solution is a single loop, so no solution can contain all of some other loop;
/// each loop found is therefore blocked outright once checked.
pub struct LoopSolver<'a> {
    clues: &'a Clues,
    n: usize,
}

impl<'a> LoopSolver<'a> {
    /// A solver for the board `clues` describes.
    pub fn new(clues: &'a Clues) -> Self {
        Self { clues, n: clues.side() }
    }

    #[inline]
    fn segment_var(&self, segment: Segment) -> Var {
        let n = self.n;
        Var::from_index(match segment {
            Segment::Horizontal(Location(x, y)) => y * n + x,
            // after all (n + 1) * n horizontal segments
            Segment::Vertical(Location(x, y)) => (n + 1) * n + y * (n + 1) + x,
        })
    }

    fn side_var(&self, cell: Location, side: SquareStep) -> Var {
        self.segment_var(Segment::side_of(cell, side))
    }

    fn formula(&self) -> CnfFormula {
        let board = EdgeSet::empty(self.n);
        let mut clauses: Vec<Vec<Lit>> = Vec::new();

        for point in board.points() {
            let incident = board.incident(point).into_iter()
                .map(|segment| self.segment_var(segment))
                .collect_vec();
            clauses.extend(degree_zero_or_two(&incident));
        }

        // an empty board is never a solution
        clauses.push(board.all_segments().map(|segment| self.segment_var(segment).positive()).collect_vec());

        for (cell, circle) in self.clues.iter() {
            let [up, down, left, right] = [SquareStep::Up, SquareStep::Down, SquareStep::Left, SquareStep::Right]
                .map(|side| self.side_var(cell, side));
            clauses.extend(exactly_two(&[up, down, left, right]));

            match circle {
                Circle::White => {
                    clauses.extend(equivalent(up, down));
                    clauses.extend(equivalent(left, right));
                }
                Circle::Black => {
                    clauses.extend(exactly_one_of(up, down));

                    for arm in SquareStep::VARIANTS {
                        let drawn = self.side_var(cell, *arm);
                        let neighbor = arm.attempt_from(cell);
                        if !neighbor.within(self.n, self.n) {
                            clauses.push(vec![drawn.negative()]);
                            continue;
                        }

                        // the neighbor is straight along the arm's axis
                        let (along, across) = match arm.axis() {
                            Axis::Vertical => ([SquareStep::Up, SquareStep::Down], [SquareStep::Left, SquareStep::Right]),
                            Axis::Horizontal => ([SquareStep::Left, SquareStep::Right], [SquareStep::Up, SquareStep::Down]),
                        };
                        for side in along {
                            clauses.push(vec![drawn.negative(), self.side_var(neighbor, side).positive()]);
                        }
                        for side in across {
                            clauses.push(vec![drawn.negative(), self.side_var(neighbor, side).negative()]);
                        }
                    }
                }
            }
        }

        CnfFormula::from(clauses)
    }

    fn drawing_of(&self, model: &[Lit]) -> EdgeSet {
        let drawn = model.iter()
            .filter(|lit| lit.is_positive())
            .map(|lit| lit.index())
            .collect::<HashSet<_>>();

        let mut edges = EdgeSet::empty(self.n);
        for segment in EdgeSet::empty(self.n).all_segments() {
            if drawn.contains(&self.segment_var(segment).index()) {
                let _ = edges.set(segment, true);
            }
        }
        edges
    }

    /// Split a drawing into its connected components.
    fn components(edges: &EdgeSet) -> Vec<EdgeSet> {
        let graph = edges.to_graph();
        let mut seen = HashSet::new();
        let mut components = Vec::new();

        for start in graph.nodes() {
            if seen.contains(&start) {
                continue;
            }

            let mut component = EdgeSet::empty(edges.side());
            let mut dfs = Dfs::new(&graph, start);
            while let Some(point) = dfs.next(&graph) {
                seen.insert(point);
                for (_, _, segment) in graph.edges(point) {
                    let _ = component.set(*segment, true);
                }
            }
            components.push(component);
        }

        components
    }

    /// Find up to `limit` distinct solutions, examining at most `cap` models.
    ///
    /// The flag is true when the search ran to completion, i.e. the solutions returned are all there are.
    pub fn solutions(&self, limit: usize, cap: usize) -> (Vec<EdgeSet>, bool) {
        let mut solver = Solver::new();
        solver.add_formula(&self.formula());

        let mut found = Vec::new();
        for examined in 0..cap {
            match solver.solve() {
                Ok(true) => {}
                Ok(false) => return (found, true),
                Err(e) => {
                    trace!("solver failed after {examined} models: {e:?}");
                    return (found, false);
                }
            }

            let Some(model) = solver.model() else {
                return (found, false);
            };

            for component in Self::components(&self.drawing_of(&model)) {
                if validate(&component, self.clues).is_ok() {
                    trace!("model {examined}: found a {}-segment solution", component.count());
                    found.push(component.clone());
                }

                let block = component.segments()
                    .map(|segment| self.segment_var(segment).negative())
                    .collect_vec();
                solver.add_clause(&block);
            }

            if found.len() >= limit {
                return (found, false);
            }
        }

        (found, false)
    }

    /// Decide whether the clues have no, one, or several solutions, examining at most `cap` models.
    pub fn grade(&self, cap: usize) -> Uniqueness {
        let (mut found, complete) = self.solutions(2, cap);

        match (found.len(), complete) {
            (0, true) => Uniqueness::Unsolvable,
            (1, true) => Uniqueness::Unique(found.remove(0)),
            (n, _) if n >= 2 => Uniqueness::Multiple,
            _ => Uniqueness::Undetermined,
        }
    }
}
