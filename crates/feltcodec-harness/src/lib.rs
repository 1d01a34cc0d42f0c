//! # feltcodec-harness
//!
//! Call deployed contracts by function name with structured arguments, and
//! get structured return values and decoded events back.
//!
//! ```ignore
//! let interface = Arc::new(ContractInterface::from_file(Path::new("abi.json"))?);
//! let contract = Contract::new(interface, address);
//! let args = Arguments::from([("amount".to_string(), Value::felt(10u64))]);
//! let res = contract.prepare("increase_balance", &args)?
//!     .invoke(&mut state, CallOptions::default())
//!     .await?;
//! ```
//!
//! Each invocation moves through `Prepared → Flattened → Dispatched →
//! Decoded`, or stops at `Failed` with the originating error. The execution
//! engine itself is external and plugged in through [`ExecutionState`].

pub mod config;
pub mod contract;
pub mod engine;
pub mod error;
pub mod result;

pub use config::HarnessConfig;
pub use contract::{CallOptions, Contract, InvocationStage, Mode, PreparedCall};
pub use engine::{CallRequest, ExecutionState, RawExecution};
pub use error::{ConfigError, HarnessError};
pub use feltcodec_marshal::Arguments;
pub use result::{InvocationResult, ReturnValues};
