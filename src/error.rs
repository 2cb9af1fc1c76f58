//! Error types for model construction, solving, and solution access.

use thiserror::Error;

/// Structural problems with the supplied model data.
///
/// These are detected before any search starts and are always fatal for the
/// model being built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The fleet must contain at least one vehicle.
    #[error("at least one vehicle is required")]
    NoVehicles,

    /// The model must contain at least one node.
    #[error("at least one node is required")]
    NoNodes,

    /// `starts` and `ends` must both have one entry per vehicle.
    #[error("expected {vehicles} start and end nodes, got {starts} starts and {ends} ends")]
    EndpointCount {
        /// Number of vehicles.
        vehicles: usize,
        /// Length of the starts list.
        starts: usize,
        /// Length of the ends list.
        ends: usize,
    },

    /// A start or end node lies outside `[0, num_nodes)`.
    #[error("vehicle {vehicle} references node {node}, but only {num_nodes} nodes exist")]
    NodeOutOfRange {
        /// Offending vehicle.
        vehicle: usize,
        /// Offending node.
        node: usize,
        /// Number of nodes in the model.
        num_nodes: usize,
    },

    /// A matrix row has the wrong length.
    #[error("time matrix row {row} has {len} entries, expected {expected}")]
    NonSquareMatrix {
        /// Row index.
        row: usize,
        /// Actual row length.
        len: usize,
        /// Required row length.
        expected: usize,
    },

    /// The matrix size does not match the node count.
    #[error("time matrix covers {found} nodes, expected {expected}")]
    MatrixSize {
        /// Number of nodes in the model.
        expected: usize,
        /// Number of matrix rows.
        found: usize,
    },

    /// Travel times must be non-negative.
    #[error("negative travel time {value} from node {from} to node {to}")]
    NegativeTransit {
        /// Origin node.
        from: usize,
        /// Destination node.
        to: usize,
        /// Offending value.
        value: i64,
    },

    /// One time window per node is required.
    #[error("expected {expected} time windows, got {found}")]
    WindowCount {
        /// Number of nodes.
        expected: usize,
        /// Number of windows supplied.
        found: usize,
    },

    /// A window whose earliest bound lies after its latest bound.
    #[error("time window on node {node} is inverted: ({earliest}, {latest})")]
    InvertedWindow {
        /// Node carrying the window.
        node: usize,
        /// Earliest bound.
        earliest: i64,
        /// Latest bound.
        latest: i64,
    },

    /// A time window names a node outside `[0, num_nodes)`.
    #[error("time window on node {node}, but only {num_nodes} nodes exist")]
    WindowNodeOutOfRange {
        /// Offending node.
        node: usize,
        /// Number of nodes in the model.
        num_nodes: usize,
    },

    /// Slack and capacity must be non-negative.
    #[error("dimension parameter `{name}` must be non-negative, got {value}")]
    NegativeParameter {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: i64,
    },
}

/// Errors returned by the routing engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    /// Malformed model data.
    #[error("invalid model: {0}")]
    Config(#[from] ConfigError),

    /// A time window contradicts the bounds already in force.
    #[error(
        "time window ({earliest}, {latest}) on node {node} conflicts with cumul domain [{min}, {max}]"
    )]
    InfeasibleModel {
        /// Node carrying the window.
        node: usize,
        /// Earliest bound of the window.
        earliest: i64,
        /// Latest bound of the window.
        latest: i64,
        /// Lower bound in force before installation.
        min: i64,
        /// Upper bound in force before installation.
        max: i64,
    },

    /// The construction heuristic could not route every node.
    #[error("no feasible solution: {unrouted} node(s) could not be inserted")]
    NoFeasibleSolution {
        /// Nodes left unrouted when construction stopped.
        unrouted: usize,
    },

    /// The solution reader was used before a successful solve.
    #[error("no solution available; solve the model first")]
    NoSolutionAvailable,

    /// A vehicle id outside the fleet.
    #[error("vehicle {vehicle} does not exist (fleet size {num_vehicles})")]
    VehicleOutOfRange {
        /// Requested vehicle.
        vehicle: usize,
        /// Fleet size.
        num_vehicles: usize,
    },

    /// A routing index outside the index space.
    #[error("routing index {index} does not exist ({num_indices} indices)")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Size of the index space.
        num_indices: usize,
    },
}
