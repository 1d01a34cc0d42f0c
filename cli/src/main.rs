//! feltcodec CLI: inspect contract ABIs and marshal felt sequences by hand.
//!
//! # Commands
//! ```text
//! feltcodec abi           --abi <path.json>
//! feltcodec selector      <name>
//! feltcodec flatten       --abi <path.json> --function <name> --args <json>
//! feltcodec build         --abi <path.json> --function <name> --retdata <felt>...
//! feltcodec decode-events --abi <path.json> --events <json>
//! ```

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use feltcodec_core::{selector_from_name, Felt, RawEvent};
use feltcodec_harness::HarnessConfig;
use feltcodec_registry::ContractInterface;
use std::path::{Path, PathBuf};
use tracing::info;

mod cmd_abi;
mod json_args;

#[derive(Parser)]
#[command(
    name = "feltcodec",
    about = "Felt-level ABI toolkit for Cairo contracts",
    long_about = "
feltcodec: flatten structured arguments into calldata, rebuild return values
from retdata, and decode raw events against a compiled contract ABI.

Felts are accepted as decimal or 0x-prefixed hex; negative decimals wrap
modulo the field prime.
",
    version
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// YAML config file (log levels, default ABI path)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the functions, structs and events declared in an ABI
    Abi {
        /// Path to the ABI JSON file (default: `abi_path` from config)
        #[arg(long)]
        abi: Option<PathBuf>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the selector of a function or event name
    Selector {
        name: String,
    },

    /// Flatten named JSON arguments into calldata
    Flatten {
        #[arg(long)]
        abi: Option<PathBuf>,
        /// Function name
        #[arg(long)]
        function: String,
        /// JSON object of arguments, e.g. '{"a": 5, "b": [7, 8, 9]}'
        #[arg(long, default_value = "{}")]
        args: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rebuild a function's return values from raw retdata
    Build {
        #[arg(long)]
        abi: Option<PathBuf>,
        /// Function name
        #[arg(long)]
        function: String,
        /// Return data felts, in order
        #[arg(long, num_args = 0.., allow_negative_numbers = true)]
        retdata: Vec<Felt>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Decode raw events against the events declared in an ABI
    #[command(name = "decode-events")]
    DecodeEvents {
        #[arg(long)]
        abi: Option<PathBuf>,
        /// JSON array of raw events, e.g. '[{"keys": ["0x..."], "data": [7]}]'
        #[arg(long)]
        events: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => HarnessConfig::from_yaml_file(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => HarnessConfig::default(),
    };
    let log = if cli.verbose {
        config.log.clone().with_level("debug")
    } else {
        config.log.clone()
    };
    feltcodec_observability::init_tracing(&log)?;

    match cli.command {
        Commands::Abi { abi, json } => {
            let iface = load_interface(abi.as_deref(), &config)?;
            cmd_abi::run(&iface, json)
        }

        Commands::Selector { name } => {
            println!("{}", selector_from_name(&name).to_hex());
            Ok(())
        }

        Commands::Flatten {
            abi,
            function,
            args,
            json,
        } => {
            let iface = load_interface(abi.as_deref(), &config)?;
            cmd_flatten(&iface, &function, &args, json)
        }

        Commands::Build {
            abi,
            function,
            retdata,
            json,
        } => {
            let iface = load_interface(abi.as_deref(), &config)?;
            cmd_build(&iface, &function, &retdata, json)
        }

        Commands::DecodeEvents { abi, events, json } => {
            let iface = load_interface(abi.as_deref(), &config)?;
            cmd_decode_events(&iface, &events, json)
        }
    }
}

fn load_interface(abi: Option<&Path>, config: &HarnessConfig) -> Result<ContractInterface> {
    let path = abi
        .or(config.abi_path.as_deref())
        .ok_or_else(|| anyhow!("no ABI given: pass --abi or set abi_path in the config"))?;
    let iface = ContractInterface::from_file(path)
        .with_context(|| format!("load ABI '{}'", path.display()))?;
    info!(path = %path.display(), "ABI loaded");
    Ok(iface)
}

// ─── Command implementations ─────────────────────────────────────────────────

fn cmd_flatten(
    iface: &ContractInterface,
    function: &str,
    args_json: &str,
    as_json: bool,
) -> Result<()> {
    let abi = iface
        .function(function)
        .ok_or_else(|| anyhow!("function '{}' not found in ABI", function))?;
    let json: serde_json::Value = serde_json::from_str(args_json).context("parse args JSON")?;
    let args = json_args::arguments_from_json(&abi.inputs, &json, iface.structs())?;

    let calldata = feltcodec_marshal::flatten_arguments(&abi.inputs, &args, iface.structs())?;

    if as_json {
        let out = serde_json::json!({
            "selector": abi.selector(),
            "calldata": calldata,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("Selector:  {}", abi.selector().to_hex());
        println!(
            "Calldata:  [{}]",
            calldata.iter().map(|f| f.to_string()).collect::<Vec<_>>().join(", ")
        );
    }
    Ok(())
}

fn cmd_build(
    iface: &ContractInterface,
    function: &str,
    retdata: &[Felt],
    as_json: bool,
) -> Result<()> {
    let abi = iface
        .function(function)
        .ok_or_else(|| anyhow!("function '{}' not found in ABI", function))?;
    let values = feltcodec_marshal::build_arguments(&abi.outputs, retdata, iface.structs())?;

    if as_json {
        let mut out = serde_json::Map::new();
        for (param, value) in abi.outputs.iter().zip(&values) {
            out.insert(param.name.clone(), json_args::value_to_json(value));
        }
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("Function:  {}", abi.name);
        println!("Outputs:");
        for (param, value) in abi.outputs.iter().zip(&values) {
            println!("  {}: {}", param.name, value);
        }
    }
    Ok(())
}

fn cmd_decode_events(
    iface: &ContractInterface,
    events_json: &str,
    as_json: bool,
) -> Result<()> {
    let raw: Vec<RawEvent> = serde_json::from_str(events_json).context("parse events JSON")?;
    let decoded = feltcodec_marshal::decode_events(&raw, iface.events(), iface.structs())?;
    info!(raw = raw.len(), decoded = decoded.len(), "events decoded");

    if as_json {
        let out: Vec<_> = decoded
            .iter()
            .map(|event| {
                let mut fields = serde_json::Map::new();
                for (name, value) in &event.fields {
                    fields.insert(name.clone(), json_args::value_to_json(value));
                }
                serde_json::json!({
                    "name": event.name,
                    "selector": event.selector,
                    "fields": fields,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("Decoded {} of {} raw events", decoded.len(), raw.len());
        for event in &decoded {
            println!("{}", event.name);
            for (name, value) in &event.fields {
                println!("  {}: {}", name, value);
            }
        }
    }
    Ok(())
}
