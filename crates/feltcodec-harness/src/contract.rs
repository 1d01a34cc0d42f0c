//! Invocation orchestrator.
//!
//! A [`Contract`] binds a parsed interface to a deployed address. Calling a
//! function goes through [`Contract::prepare`], which resolves the function
//! and flattens its arguments once, and then either [`PreparedCall::call`]
//! (against an isolated copy of the state) or [`PreparedCall::invoke`]
//! (against the live state).

use crate::engine::{CallRequest, ExecutionState, RawExecution};
use crate::error::HarnessError;
use crate::result::{InvocationResult, ReturnValues};
use feltcodec_core::{Felt, FunctionAbi};
use feltcodec_marshal::{build_arguments, decode_events, flatten_arguments, Arguments};
use feltcodec_registry::ContractInterface;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Whether an invocation may change the caller's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Run on a copy of the state; effects are discarded.
    Call,
    /// Run on the live state; effects persist.
    Invoke,
}

/// Per-invocation context passed through to the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallOptions {
    #[serde(default)]
    pub caller_address: Felt,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<Vec<Felt>>,
}

impl CallOptions {
    pub fn with_caller(caller_address: Felt) -> Self {
        Self {
            caller_address,
            signature: None,
        }
    }

    pub fn signed(mut self, signature: Vec<Felt>) -> Self {
        self.signature = Some(signature);
        self
    }
}

/// Where an invocation is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvocationStage {
    Prepared,
    Flattened,
    Dispatched,
    Decoded,
    Failed,
}

impl fmt::Display for InvocationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InvocationStage::Prepared => "prepared",
            InvocationStage::Flattened => "flattened",
            InvocationStage::Dispatched => "dispatched",
            InvocationStage::Decoded => "decoded",
            InvocationStage::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// A deployed contract with a known interface.
#[derive(Debug, Clone)]
pub struct Contract {
    interface: Arc<ContractInterface>,
    address: Felt,
}

impl Contract {
    pub fn new(interface: Arc<ContractInterface>, address: Felt) -> Self {
        Self { interface, address }
    }

    pub fn address(&self) -> Felt {
        self.address
    }

    pub fn interface(&self) -> &ContractInterface {
        &self.interface
    }

    /// Resolve `function` and flatten `args` into calldata.
    ///
    /// Nothing reaches the engine if this fails.
    pub fn prepare(&self, function: &str, args: &Arguments) -> Result<PreparedCall, HarnessError> {
        let abi = self
            .interface
            .function(function)
            .ok_or_else(|| HarnessError::UnknownFunction {
                name: function.to_string(),
            })?
            .clone();
        debug!(function, stage = %InvocationStage::Prepared, "resolved function");

        let calldata = flatten_arguments(&abi.inputs, args, self.interface.structs())
            .map_err(|err| fail(function, InvocationStage::Prepared, err.into()))?;
        debug!(
            function,
            stage = %InvocationStage::Flattened,
            calldata_len = calldata.len(),
            "arguments flattened"
        );

        Ok(PreparedCall {
            interface: Arc::clone(&self.interface),
            address: self.address,
            selector: abi.selector(),
            function: abi,
            calldata,
        })
    }

    /// Prepare and run `function` in the given mode.
    pub async fn execute<S: ExecutionState>(
        &self,
        state: &mut S,
        function: &str,
        args: &Arguments,
        mode: Mode,
        options: CallOptions,
    ) -> Result<InvocationResult, HarnessError> {
        let prepared = self.prepare(function, args)?;
        match mode {
            Mode::Call => prepared.call(state, options).await,
            Mode::Invoke => prepared.invoke(state, options).await,
        }
    }
}

/// A resolved function with flattened calldata, ready to dispatch.
///
/// The same prepared call may be dispatched any number of times.
#[derive(Debug, Clone)]
pub struct PreparedCall {
    interface: Arc<ContractInterface>,
    address: Felt,
    function: FunctionAbi,
    selector: Felt,
    calldata: Vec<Felt>,
}

impl PreparedCall {
    pub fn function(&self) -> &FunctionAbi {
        &self.function
    }

    pub fn selector(&self) -> Felt {
        self.selector
    }

    pub fn calldata(&self) -> &[Felt] {
        &self.calldata
    }

    /// Run against a copy of `state`. The caller's state is never touched.
    pub async fn call<S: ExecutionState>(
        &self,
        state: &S,
        options: CallOptions,
    ) -> Result<InvocationResult, HarnessError> {
        let mut scratch = state.copy_state();
        self.dispatch(&mut scratch, options, Mode::Call).await
    }

    /// Run against the live `state`, committing the engine's effects.
    pub async fn invoke<S: ExecutionState>(
        &self,
        state: &mut S,
        options: CallOptions,
    ) -> Result<InvocationResult, HarnessError> {
        self.dispatch(state, options, Mode::Invoke).await
    }

    fn request(&self, options: CallOptions) -> CallRequest {
        CallRequest {
            contract_address: self.address,
            selector: self.selector,
            calldata: self.calldata.clone(),
            caller_address: options.caller_address,
            signature: options.signature,
        }
    }

    async fn dispatch<S: ExecutionState>(
        &self,
        state: &mut S,
        options: CallOptions,
        mode: Mode,
    ) -> Result<InvocationResult, HarnessError> {
        let name = self.function.name.as_str();
        let raw = state
            .execute(self.request(options))
            .await
            .map_err(|err| {
                let err = HarnessError::Execution(Box::new(err));
                fail(name, InvocationStage::Flattened, err)
            })?;
        debug!(
            function = name,
            ?mode,
            stage = %InvocationStage::Dispatched,
            retdata_len = raw.retdata.len(),
            events = raw.events.len(),
            "engine returned"
        );

        self.decode(raw)
            .map_err(|err| fail(name, InvocationStage::Dispatched, err))
    }

    fn decode(&self, raw: RawExecution) -> Result<InvocationResult, HarnessError> {
        let structs = self.interface.structs();
        let outputs = &self.function.outputs;

        let values = build_arguments(outputs, &raw.retdata, structs)?;
        let result = ReturnValues::new(outputs.iter().map(|p| p.name.clone()).collect(), values);
        let events = decode_events(&raw.events, self.interface.events(), structs)?;

        let skipped = raw.events.len() - events.len();
        debug!(
            function = %self.function.name,
            stage = %InvocationStage::Decoded,
            events = events.len(),
            skipped,
            "invocation decoded"
        );

        Ok(InvocationResult { result, events, raw })
    }
}

/// Log the transition to `Failed` and pass the error through.
fn fail(function: &str, reached: InvocationStage, err: HarnessError) -> HarnessError {
    warn!(
        function,
        stage = %InvocationStage::Failed,
        last_stage = %reached,
        error = %err,
        "invocation failed"
    );
    err
}
