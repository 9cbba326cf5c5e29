//! Search options shared by every strategy.

/// Default cap on IDA* deepening iterations.
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;

/// Flags that reshape both the reachability graph and the edge weights.
///
/// Breaking and placing are mutually exclusive expansion modes; when both are
/// set, breaking wins.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathfindingOptions {
    /// Non-walkable but breakable cells become traversable at +5.0 per entry.
    pub allow_breaking: bool,
    /// Footing may be synthesised two horizontal steps out at +3.0 per entry.
    pub allow_placing: bool,
    /// Water destinations cost +10.0; BFS-family searches exclude them.
    pub avoid_water: bool,
    /// Vertical moves cost +2.0 per unit and the heuristic doubles its
    /// vertical term.
    pub minimise_height: bool,
    /// Serve A* requests with Jump-Point Search.
    pub jump_point_optimisation: bool,
    /// Cap on IDA* deepening iterations; 0 means [`DEFAULT_MAX_ITERATIONS`].
    pub max_iterations: usize,
    /// Scales the whole heuristic when non-zero (weighted A* behaviour).
    pub heuristic_weight: f64,
}

impl PathfindingOptions {
    pub(crate) fn iteration_cap(&self) -> usize {
        if self.max_iterations == 0 {
            DEFAULT_MAX_ITERATIONS
        } else {
            self.max_iterations
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iteration_cap_defaults() {
        assert_eq!(
            PathfindingOptions::default().iteration_cap(),
            DEFAULT_MAX_ITERATIONS
        );

        let options = PathfindingOptions {
            max_iterations: 25,
            ..Default::default()
        };
        assert_eq!(options.iteration_cap(), 25);
    }
}
