//! `feltcodec abi`: summarize a contract interface.

use anyhow::Result;
use feltcodec_core::Param;
use feltcodec_registry::ContractInterface;
use serde_json::json;

fn signature(params: &[Param]) -> String {
    params
        .iter()
        .map(|p| format!("{}: {}", p.name, p.ty))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn run(iface: &ContractInterface, as_json: bool) -> Result<()> {
    if as_json {
        let functions: Vec<_> = iface
            .functions()
            .map(|f| {
                json!({
                    "name": f.name,
                    "kind": format!("{:?}", f.kind),
                    "selector": f.selector(),
                    "inputs": signature(&f.inputs),
                    "outputs": signature(&f.outputs),
                })
            })
            .collect();
        let structs: Vec<_> = iface
            .structs()
            .iter()
            .map(|s| json!({ "name": s.name, "members": signature(&s.members) }))
            .collect();
        let events: Vec<_> = iface
            .events()
            .iter()
            .map(|(selector, e)| {
                json!({
                    "name": e.name,
                    "selector": selector,
                    "keys": signature(&e.keys),
                    "data": signature(&e.data),
                })
            })
            .collect();
        let out = json!({ "functions": functions, "structs": structs, "events": events });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("Functions ({}):", iface.functions().count());
    for f in iface.functions() {
        println!(
            "  {:?} {}({}) -> ({})",
            f.kind,
            f.name,
            signature(&f.inputs),
            signature(&f.outputs)
        );
        println!("      selector {}", f.selector().to_hex());
    }

    println!("Structs ({}):", iface.structs().len());
    for s in iface.structs().iter() {
        println!("  {} {{ {} }}", s.name, signature(&s.members));
    }

    println!("Events ({}):", iface.events().len());
    for (selector, e) in iface.events().iter() {
        println!(
            "  {} keys({}) data({})",
            e.name,
            signature(&e.keys),
            signature(&e.data)
        );
        println!("      selector {}", selector.to_hex());
    }
    Ok(())
}
