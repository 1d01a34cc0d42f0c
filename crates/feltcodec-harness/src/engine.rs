//! The execution engine boundary.
//!
//! The harness never executes contract code itself. It hands flat calldata to
//! an [`ExecutionState`] and gets flat retdata plus raw events back.

use async_trait::async_trait;
use feltcodec_core::{Felt, RawEvent};
use serde::{Deserialize, Serialize};

/// One call as the engine sees it: nothing but felts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallRequest {
    pub contract_address: Felt,
    pub selector: Felt,
    pub calldata: Vec<Felt>,
    pub caller_address: Felt,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<Vec<Felt>>,
}

/// What the engine reports back for the main call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawExecution {
    pub retdata: Vec<Felt>,
    /// Events emitted by the main call, in emission order.
    pub events: Vec<RawEvent>,
}

/// Contract state an execution engine can run calls against.
///
/// # Concurrency
/// `execute` takes `&mut self`, so invoking against one state is serialized
/// by the borrow checker. Read-only calls run on a [`copy_state`] instead and
/// can proceed concurrently.
///
/// [`copy_state`]: ExecutionState::copy_state
#[async_trait]
pub trait ExecutionState: Send + Sync {
    /// Engine-defined failure, propagated to the caller unchanged.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Produce an isolated copy; nothing done to the copy is visible here.
    fn copy_state(&self) -> Self
    where
        Self: Sized;

    /// Execute one call and commit its effects to this state.
    async fn execute(&mut self, request: CallRequest) -> Result<RawExecution, Self::Error>;
}
