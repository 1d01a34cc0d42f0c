//! JSON ↔ [`Value`] conversion for command-line arguments and output.
//!
//! JSON has no notion of tuples versus arrays versus structs, so incoming
//! values are converted against the declared type. Where the JSON does not
//! fit the declared type, it is converted without type guidance and the
//! flattening engine reports the mismatch with the full argument path.

use anyhow::{bail, Context, Result};
use feltcodec_core::{registry::StructResolver, ArgType, Felt, Param, Value};
use feltcodec_marshal::Arguments;
use serde_json::{Map, Value as Json};

/// Convert a JSON object of named arguments against `params`.
pub fn arguments_from_json(
    params: &[Param],
    json: &Json,
    structs: &dyn StructResolver,
) -> Result<Arguments> {
    let Json::Object(map) = json else {
        bail!("arguments must be a JSON object keyed by parameter name");
    };
    let mut args = Arguments::with_capacity(map.len());
    for (name, item) in map {
        let value = match params.iter().find(|p| &p.name == name) {
            Some(param) => value_from_json(&param.ty, item, structs),
            None => untyped(item),
        }
        .with_context(|| format!("argument '{name}'"))?;
        args.insert(name.clone(), value);
    }
    Ok(args)
}

pub fn value_from_json(ty: &ArgType, json: &Json, structs: &dyn StructResolver) -> Result<Value> {
    match (ty, json) {
        (ArgType::Tuple(members), Json::Array(items)) => {
            let mut values = Vec::with_capacity(items.len());
            for (i, item) in items.iter().enumerate() {
                values.push(match members.get(i) {
                    Some(member) => value_from_json(member, item, structs)?,
                    None => untyped(item)?,
                });
            }
            Ok(Value::Tuple(values))
        }

        (ArgType::Array(elem), Json::Array(items)) => {
            let mut values = Vec::with_capacity(items.len());
            for item in items {
                values.push(value_from_json(elem, item, structs)?);
            }
            Ok(Value::Array(values))
        }

        (ArgType::Struct(name), Json::Array(_)) => {
            let def = structs.resolve(name)?;
            let members = def.members.iter().map(|m| m.ty.clone()).collect();
            value_from_json(&ArgType::Tuple(members), json, structs)
        }

        (ArgType::Struct(name), Json::Object(map)) => {
            let def = structs.resolve(name)?;
            // JSON objects are unordered; lay declared members out first, in
            // declaration order, and leave any extras for the flattener to reject.
            let mut fields = Vec::with_capacity(map.len());
            for member in &def.members {
                if let Some(item) = map.get(&member.name) {
                    let value = value_from_json(&member.ty, item, structs)?;
                    fields.push((member.name.clone(), value));
                }
            }
            for (field, item) in map {
                if !def.members.iter().any(|m| &m.name == field) {
                    fields.push((field.clone(), untyped(item)?));
                }
            }
            Ok(Value::Struct {
                name: def.name.clone(),
                fields,
            })
        }

        _ => untyped(json),
    }
}

/// Best-effort conversion with no declared type to guide it.
fn untyped(json: &Json) -> Result<Value> {
    match json {
        Json::Number(n) => {
            if let Some(v) = n.as_u64() {
                Ok(Value::felt(v))
            } else if let Some(v) = n.as_i64() {
                Ok(Value::Felt(Felt::from_signed(v.into())))
            } else {
                bail!("'{n}' is not an integer")
            }
        }
        Json::String(s) => Ok(Value::Felt(s.parse()?)),
        Json::Bool(b) => Ok(Value::felt(*b)),
        Json::Array(items) => Ok(Value::Tuple(
            items.iter().map(untyped).collect::<Result<_>>()?,
        )),
        Json::Object(map) => {
            let mut fields = Vec::with_capacity(map.len());
            for (field, item) in map {
                fields.push((field.clone(), untyped(item)?));
            }
            Ok(Value::Struct {
                name: String::new(),
                fields,
            })
        }
        Json::Null => bail!("null is not a felt value"),
    }
}

/// Plain JSON rendering: felts as decimal strings, structs as objects.
pub fn value_to_json(value: &Value) -> Json {
    match value {
        Value::Felt(f) => Json::String(f.to_string()),
        Value::Tuple(items) | Value::Array(items) => {
            Json::Array(items.iter().map(value_to_json).collect())
        }
        Value::Struct { fields, .. } => {
            let mut map = Map::new();
            for (name, v) in fields {
                map.insert(name.clone(), value_to_json(v));
            }
            Json::Object(map)
        }
    }
}
