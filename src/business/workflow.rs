use serde::{Deserialize, Serialize};
use tracing::error;
use uuid::Uuid;

/// State of a single scan event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, poem_openapi::Enum)]
#[serde(rename_all = "snake_case")]
#[oai(rename_all = "snake_case")]
pub enum ScanState {
    /// Waiting for a scan
    Idle,
    /// Scanned code is non-empty
    Guarded,
    /// Code is not on the manifest yet
    DuplicateChecked,
    /// Shipment lookup in flight
    ShipmentResolving,
    /// No shipment matches the code
    NotFound,
    /// Shipment found
    Resolved,
    /// Provider-specific pickup check in flight
    PickupValidating,
    Accepted,
    Rejected,
    /// Line item added to the manifest
    Appended,
}

impl ScanState {
    /// Check if a scan can move to a new state
    pub fn can_transition_to(&self, new_state: ScanState) -> bool {
        match (self, new_state) {
            (ScanState::Idle, ScanState::Guarded) => true,

            (ScanState::Guarded, ScanState::DuplicateChecked) => true,
            (ScanState::Guarded, ScanState::Rejected) => true,

            (ScanState::DuplicateChecked, ScanState::ShipmentResolving) => true,

            (ScanState::ShipmentResolving, ScanState::NotFound) => true,
            (ScanState::ShipmentResolving, ScanState::Resolved) => true,
            // Transport failure of the lookup
            (ScanState::ShipmentResolving, ScanState::Rejected) => true,

            (ScanState::Resolved, ScanState::PickupValidating) => true,
            (ScanState::Resolved, ScanState::Accepted) => true,

            (ScanState::PickupValidating, ScanState::Accepted) => true,
            (ScanState::PickupValidating, ScanState::Rejected) => true,

            (ScanState::Accepted, ScanState::Appended) => true,

            // Every outcome returns to idle
            (ScanState::NotFound, ScanState::Idle) => true,
            (ScanState::Rejected, ScanState::Idle) => true,
            (ScanState::Appended, ScanState::Idle) => true,

            _ => false,
        }
    }

    /// Outcome states a scan ends in before returning to idle
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ScanState::NotFound | ScanState::Rejected | ScanState::Appended
        )
    }
}

/// Workflow error
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowError {
    InvalidTransition { from: ScanState, to: ScanState },
}

impl std::fmt::Display for WorkflowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkflowError::InvalidTransition { from, to } => {
                write!(f, "Cannot transition from {:?} to {:?}", from, to)
            }
        }
    }
}

impl std::error::Error for WorkflowError {}

/// Path taken by one scan event through the state machine
#[derive(Debug, Clone)]
pub struct ScanRun {
    pub scan_id: Uuid,
    state: ScanState,
    path: Vec<ScanState>,
}

impl Default for ScanRun {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanRun {
    pub fn new() -> Self {
        Self {
            scan_id: Uuid::new_v4(),
            state: ScanState::Idle,
            path: vec![ScanState::Idle],
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn path(&self) -> &[ScanState] {
        &self.path
    }

    /// Transition to a new state
    pub fn transition_to(&mut self, new_state: ScanState) -> Result<(), WorkflowError> {
        if !self.state.can_transition_to(new_state) {
            return Err(WorkflowError::InvalidTransition {
                from: self.state,
                to: new_state,
            });
        }

        self.state = new_state;
        self.path.push(new_state);
        Ok(())
    }

    /// Transition, logging instead of failing the scan on an invalid move
    pub(crate) fn advance(&mut self, new_state: ScanState) {
        if let Err(e) = self.transition_to(new_state) {
            error!(scan_id = %self.scan_id, "Scan state machine violated: {}", e);
        }
    }

    /// Return to idle and hand back the path taken
    pub fn finish(mut self) -> Vec<ScanState> {
        if self.state.is_terminal() {
            self.advance(ScanState::Idle);
        }
        self.path
    }
}
