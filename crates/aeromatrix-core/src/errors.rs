use aeromatrix_core_types::RequestId;
use thiserror::Error;

use crate::model::{DroneId, MatrixId};

/// Result type alias using FleetError
pub type Result<T> = std::result::Result<T, FleetError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every failure surfaced by the flight engine falls into exactly one kind.
/// Each kind maps to a stable machine-readable code, which callers pair with
/// the human-readable message for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    /// Malformed request shape (empty command list, blank field, missing orientation)
    InvalidInput,
    /// Referenced drone or matrix does not exist
    NotFound,
    /// Well-formed request that would violate a fleet invariant
    Conflict,
    /// Command token outside the recognised set
    UnsupportedCommand,

    // Integration/IO
    Persistence,
    Serialization,
    Io,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "invalid_input",
            ExErrorKind::NotFound => "not_found",
            ExErrorKind::Conflict => "conflict",
            ExErrorKind::UnsupportedCommand => "unsupported_command",
            ExErrorKind::Persistence => "persistence",
            ExErrorKind::Serialization => "serialization",
            ExErrorKind::Io => "io",
        }
    }
}

/// Canonical structured error type
///
/// Carries the classification plus enough context (operation, entity id,
/// blocking ids) to render an actionable message without the original
/// domain error at hand.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    request_id: Option<RequestId>,
    message: String,
    blocking_ids: Option<Vec<String>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            request_id: None,
            message: String::new(),
            blocking_ids: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add the ids of entities blocking the operation (e.g. drones left in a matrix)
    pub fn with_blocking_ids(mut self, ids: Vec<String>) -> Self {
        self.blocking_ids = Some(ids);
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn blocking_ids(&self) -> Option<&[String]> {
        self.blocking_ids.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for fleet operations
///
/// Messages name the offending ids and coordinates; they are part of the
/// public contract alongside the kind code.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FleetError {
    // ===== Input Errors =====
    #[error("Drone name must not be empty.")]
    BlankName,

    #[error("Drone model must not be empty.")]
    BlankModel,

    #[error("Drone {field} must be at most {max} characters.")]
    LabelTooLong { field: &'static str, max: usize },

    #[error("Drone orientation must be provided.")]
    MissingOrientation,

    #[error("Invalid orientation: {token}")]
    InvalidOrientation { token: String },

    /// Empty command list; `drone_id` is set when the list came from a batch item
    #[error("{}", empty_commands_message(.drone_id))]
    EmptyCommandList { drone_id: Option<DroneId> },

    #[error("Matrix dimensions must be greater than 0 (maxX: {max_x}, maxY: {max_y}).")]
    InvalidDimensions { max_x: i64, max_y: i64 },

    // ===== Lookup Errors =====
    #[error("Matrix ID {matrix_id} not found")]
    MatrixNotFound { matrix_id: MatrixId },

    #[error("Drone ID {drone_id} not found")]
    DroneNotFound { drone_id: DroneId },

    // ===== Placement Conflicts =====
    #[error("Invalid coordinates ({x},{y}) for matrix {matrix_id} (Max X: {max_x}, Max Y: {max_y})")]
    PositionOutOfBounds {
        x: i64,
        y: i64,
        matrix_id: MatrixId,
        max_x: i64,
        max_y: i64,
    },

    #[error("A drone with the name '{name}' already exists in matrix {matrix_id}")]
    DuplicateName { name: String, matrix_id: MatrixId },

    #[error("A drone with the model '{model}' already exists in matrix {matrix_id}")]
    DuplicateModel { model: String, matrix_id: MatrixId },

    #[error("Position ({x},{y}) in matrix {matrix_id} is occupied")]
    PositionOccupied { x: i64, y: i64, matrix_id: MatrixId },

    #[error("No changes detected in the update of drone {drone_id}.")]
    NoChangesDetected { drone_id: DroneId },

    // ===== Matrix Conflicts =====
    #[error("Matrix dimensions must be positive (maxX: {max_x}, maxY: {max_y})")]
    NonPositiveDimensions { max_x: i64, max_y: i64 },

    #[error("Matrix dimensions exceed maximum allowed size ({limit}).")]
    DimensionsExceedLimit { limit: i64 },

    #[error("Drone {drone_id} is out of bounds for new matrix size (maxX: {max_x}, maxY: {max_y})")]
    OccupantOutOfBounds {
        drone_id: DroneId,
        max_x: i64,
        max_y: i64,
    },

    #[error("Cannot delete matrix {matrix_id}. Active drones: {}", join_ids(.drone_ids))]
    MatrixOccupied {
        matrix_id: MatrixId,
        drone_ids: Vec<DroneId>,
    },

    // ===== Flight Conflicts =====
    #[error("Drone {drone_id} would exit matrix boundaries. New position: ({x},{y}), Matrix limits: (0-{max_x}, 0-{max_y})")]
    OutOfBounds {
        drone_id: DroneId,
        x: i64,
        y: i64,
        max_x: i64,
        max_y: i64,
    },

    #[error("Collision detected between drone {drone_id} and drone {other_id} at position ({x},{y})")]
    Collision {
        drone_id: DroneId,
        other_id: DroneId,
        x: i64,
        y: i64,
    },

    #[error("Fleet invariant broken in matrix {matrix_id}: {detail}")]
    InvariantBroken { matrix_id: MatrixId, detail: String },

    // ===== Command Errors =====
    #[error("Unsupported command: {}", token_label(.token))]
    UnsupportedCommand { token: Option<String> },

    // ===== Integration Errors =====
    #[error("Persistence error: {message}")]
    Persistence { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("IO error: {message}")]
    Io { message: String },
}

fn empty_commands_message(drone_id: &Option<DroneId>) -> String {
    match drone_id {
        Some(id) => format!("Drone {id} has no commands to execute."),
        None => "Command list must not be empty.".to_string(),
    }
}

fn token_label(token: &Option<String>) -> &str {
    token.as_deref().unwrap_or("null")
}

fn join_ids(ids: &[DroneId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl FleetError {
    /// Classification of this error in the canonical taxonomy
    pub fn kind(&self) -> ExErrorKind {
        match self {
            FleetError::BlankName
            | FleetError::BlankModel
            | FleetError::LabelTooLong { .. }
            | FleetError::MissingOrientation
            | FleetError::InvalidOrientation { .. }
            | FleetError::EmptyCommandList { .. }
            | FleetError::InvalidDimensions { .. } => ExErrorKind::InvalidInput,

            FleetError::MatrixNotFound { .. } | FleetError::DroneNotFound { .. } => {
                ExErrorKind::NotFound
            }

            FleetError::PositionOutOfBounds { .. }
            | FleetError::DuplicateName { .. }
            | FleetError::DuplicateModel { .. }
            | FleetError::PositionOccupied { .. }
            | FleetError::NoChangesDetected { .. }
            | FleetError::NonPositiveDimensions { .. }
            | FleetError::DimensionsExceedLimit { .. }
            | FleetError::OccupantOutOfBounds { .. }
            | FleetError::MatrixOccupied { .. }
            | FleetError::OutOfBounds { .. }
            | FleetError::Collision { .. }
            | FleetError::InvariantBroken { .. } => ExErrorKind::Conflict,

            FleetError::UnsupportedCommand { .. } => ExErrorKind::UnsupportedCommand,

            FleetError::Persistence { .. } => ExErrorKind::Persistence,
            FleetError::Serialization { .. } => ExErrorKind::Serialization,
            FleetError::Io { .. } => ExErrorKind::Io,
        }
    }

    /// Id of the entity the error is about, when there is exactly one
    fn entity_id(&self) -> Option<String> {
        match self {
            FleetError::MatrixNotFound { matrix_id }
            | FleetError::PositionOutOfBounds { matrix_id, .. }
            | FleetError::PositionOccupied { matrix_id, .. }
            | FleetError::MatrixOccupied { matrix_id, .. }
            | FleetError::InvariantBroken { matrix_id, .. } => Some(matrix_id.to_string()),

            FleetError::DroneNotFound { drone_id }
            | FleetError::NoChangesDetected { drone_id }
            | FleetError::OccupantOutOfBounds { drone_id, .. }
            | FleetError::OutOfBounds { drone_id, .. }
            | FleetError::Collision { drone_id, .. } => Some(drone_id.to_string()),

            FleetError::EmptyCommandList { drone_id } => drone_id.map(|id| id.to_string()),

            _ => None,
        }
    }
}

/// Conversion from FleetError to the canonical ExError
impl From<FleetError> for ExError {
    fn from(err: FleetError) -> Self {
        let mut ex = ExError::new(err.kind()).with_message(err.to_string());
        if let Some(id) = err.entity_id() {
            ex = ex.with_entity_id(id);
        }
        match err {
            FleetError::MatrixOccupied { drone_ids, .. } => {
                ex.with_blocking_ids(drone_ids.iter().map(|id| id.to_string()).collect())
            }
            FleetError::Collision { other_id, .. } => {
                ex.with_blocking_ids(vec![other_id.to_string()])
            }
            _ => ex,
        }
    }
}

impl From<serde_json::Error> for FleetError {
    fn from(err: serde_json::Error) -> Self {
        FleetError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for FleetError {
    fn from(err: toml::de::Error) -> Self {
        FleetError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for FleetError {
    fn from(err: std::io::Error) -> Self {
        FleetError::Io {
            message: err.to_string(),
        }
    }
}
