//! Flattening engine: the encoder side.
//!
//! Converts structured values into felts while checking every value against
//! its declared type. Wire rules:
//! - `felt` → one element
//! - tuple / struct → members concatenated in declaration order
//! - `T*` → the length, then each element flattened

use feltcodec_core::{error::CodecError, registry::StructResolver, ArgType, Felt, Param, Value};
use std::collections::HashMap;
use tracing::trace;

/// Named call arguments. Any subset of the declared inputs may be supplied.
pub type Arguments = HashMap<String, Value>;

/// Flatten one top-level value.
///
/// `argument` names the value in mismatch reports; nested positions are
/// appended to it (`points[1].y`, `pair.0`).
pub fn flatten(
    ty: &ArgType,
    value: &Value,
    argument: &str,
    structs: &dyn StructResolver,
) -> Result<Vec<Felt>, CodecError> {
    let mut out = Vec::new();
    flatten_value(ty, value, structs, &mut out).map_err(|e| nest(e, || argument.to_string()))?;
    Ok(out)
}

/// Flatten the supplied arguments in the order `params` declares them.
pub fn flatten_arguments(
    params: &[Param],
    args: &Arguments,
    structs: &dyn StructResolver,
) -> Result<Vec<Felt>, CodecError> {
    let mut calldata = Vec::new();
    flatten_arguments_into(params, args, structs, &mut calldata)?;
    Ok(calldata)
}

/// Like [`flatten_arguments`] but appends to `out`.
///
/// Arguments are handled one complete value at a time: a value that fails
/// validation contributes nothing, while arguments before it stay in `out`.
/// Declared inputs missing from `args` are skipped; supplied names that are
/// not declared inputs are rejected before anything is written.
pub fn flatten_arguments_into(
    params: &[Param],
    args: &Arguments,
    structs: &dyn StructResolver,
    out: &mut Vec<Felt>,
) -> Result<(), CodecError> {
    let mut undeclared: Vec<&str> = args
        .keys()
        .map(String::as_str)
        .filter(|name| !params.iter().any(|p| p.name == *name))
        .collect();
    undeclared.sort_unstable();
    if let Some(name) = undeclared.first() {
        return Err(CodecError::ShapeMismatch {
            argument: name.to_string(),
            expected: "a declared input".into(),
            actual: "an undeclared argument".into(),
        });
    }

    for param in params {
        let Some(value) = args.get(&param.name) else {
            trace!(argument = %param.name, "argument not supplied, omitted from calldata");
            continue;
        };
        let felts = flatten(&param.ty, value, &param.name, structs)?;
        out.extend(felts);
    }
    Ok(())
}

fn flatten_value(
    ty: &ArgType,
    value: &Value,
    structs: &dyn StructResolver,
    out: &mut Vec<Felt>,
) -> Result<(), CodecError> {
    match (ty, value) {
        (ArgType::Felt, Value::Felt(f)) => {
            out.push(*f);
            Ok(())
        }

        (ArgType::Tuple(members), Value::Tuple(values)) => {
            if members.len() != values.len() {
                return Err(mismatch(ty, value));
            }
            for (i, (member, v)) in members.iter().zip(values).enumerate() {
                flatten_value(member, v, structs, out).map_err(|e| nest(e, || format!(".{i}")))?;
            }
            Ok(())
        }

        (ArgType::Struct(name), Value::Tuple(values)) => {
            let def = structs.resolve(name)?;
            if def.members.len() != values.len() {
                return Err(mismatch(ty, value));
            }
            for (member, v) in def.members.iter().zip(values) {
                flatten_value(&member.ty, v, structs, out)
                    .map_err(|e| nest(e, || format!(".{}", member.name)))?;
            }
            Ok(())
        }

        (ArgType::Struct(name), Value::Struct { name: value_name, fields }) => {
            let def = structs.resolve(name)?;
            if value_name != name || fields.len() != def.members.len() {
                return Err(mismatch(ty, value));
            }
            // Fields must appear in declaration order.
            for (member, (field, v)) in def.members.iter().zip(fields) {
                if *field != member.name {
                    return Err(mismatch(ty, value));
                }
                flatten_value(&member.ty, v, structs, out)
                    .map_err(|e| nest(e, || format!(".{}", member.name)))?;
            }
            Ok(())
        }

        (ArgType::Array(elem), Value::Array(values)) => {
            out.push(Felt::from(values.len() as u64));
            for (i, v) in values.iter().enumerate() {
                flatten_value(elem, v, structs, out).map_err(|e| nest(e, || format!("[{i}]")))?;
            }
            Ok(())
        }

        _ => Err(mismatch(ty, value)),
    }
}

fn mismatch(ty: &ArgType, value: &Value) -> CodecError {
    CodecError::ShapeMismatch {
        argument: String::new(),
        expected: ty.to_string(),
        actual: value.shape(),
    }
}

/// Prefix the location of a shape mismatch with the enclosing position.
fn nest(err: CodecError, prefix: impl FnOnce() -> String) -> CodecError {
    match err {
        CodecError::ShapeMismatch {
            argument,
            expected,
            actual,
        } => CodecError::ShapeMismatch {
            argument: format!("{}{argument}", prefix()),
            expected,
            actual,
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use feltcodec_core::StructDef;
    use feltcodec_registry::StructRegistry;

    fn registry() -> StructRegistry {
        StructRegistry::from_defs([StructDef::new(
            "Point",
            vec![Param::new("x", ArgType::Felt), Param::new("y", ArgType::Felt)],
        )])
        .unwrap()
    }

    fn felts(values: &[u64]) -> Vec<Felt> {
        values.iter().copied().map(Felt::from).collect()
    }

    fn point(x: u64, y: u64) -> Value {
        Value::record("Point", [("x", Value::felt(x)), ("y", Value::felt(y))])
    }

    #[test]
    fn struct_from_positional_tuple() {
        let reg = registry();
        let ty = ArgType::Struct("Point".into());
        let value = Value::tuple([Value::felt(1u64), Value::felt(2u64)]);
        assert_eq!(flatten(&ty, &value, "p", &reg).unwrap(), felts(&[1, 2]));
    }

    #[test]
    fn array_of_structs() {
        let reg = registry();
        let ty = ArgType::array(ArgType::Struct("Point".into()));
        let value = Value::array([point(1, 2), point(3, 4)]);
        assert_eq!(flatten(&ty, &value, "ps", &reg).unwrap(), felts(&[2, 1, 2, 3, 4]));
    }

    #[test]
    fn array_emits_length_then_elements() {
        let reg = registry();
        let ty = ArgType::array(ArgType::Tuple(vec![ArgType::Felt, ArgType::Felt]));
        let value = Value::array([
            Value::tuple([Value::felt(1u64), Value::felt(2u64)]),
            Value::tuple([Value::felt(3u64), Value::felt(4u64)]),
            Value::tuple([Value::felt(5u64), Value::felt(6u64)]),
        ]);
        let out = flatten(&ty, &value, "pairs", &reg).unwrap();
        assert_eq!(out.len(), 1 + 3 * 2);
        assert_eq!(out[0], Felt::from(3u64));
    }

    #[test]
    fn wrong_arity_names_the_position() {
        let reg = registry();
        let ty = ArgType::array(ArgType::Struct("Point".into()));
        let value = Value::array([point(1, 2), Value::tuple([Value::felt(3u64)])]);
        let err = flatten(&ty, &value, "ps", &reg).unwrap_err();
        assert_eq!(
            err,
            CodecError::ShapeMismatch {
                argument: "ps[1]".into(),
                expected: "Point".into(),
                actual: "tuple of 1 members".into(),
            }
        );
    }

    #[test]
    fn nested_member_mismatch_path() {
        let reg = registry();
        let ty = ArgType::Tuple(vec![ArgType::Felt, ArgType::Struct("Point".into())]);
        let value = Value::tuple([
            Value::felt(1u64),
            Value::record("Point", [("x", Value::felt(1u64)), ("y", Value::felts([2]))]),
        ]);
        match flatten(&ty, &value, "t", &reg).unwrap_err() {
            CodecError::ShapeMismatch { argument, expected, .. } => {
                assert_eq!(argument, "t.1.y");
                assert_eq!(expected, "felt");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn record_with_wrong_member_set_is_rejected() {
        let reg = registry();
        let ty = ArgType::Struct("Point".into());
        let value = Value::record("Point", [("x", Value::felt(1u64)), ("z", Value::felt(2u64))]);
        assert!(matches!(
            flatten(&ty, &value, "p", &reg),
            Err(CodecError::ShapeMismatch { .. })
        ));
        let other_name =
            Value::record("Rect", [("x", Value::felt(1u64)), ("y", Value::felt(2u64))]);
        assert!(flatten(&ty, &other_name, "p", &reg).is_err());
    }

    #[test]
    fn record_fields_must_follow_declaration_order() {
        let reg = registry();
        let ty = ArgType::Struct("Point".into());
        let swapped =
            Value::record("Point", [("y", Value::felt(2u64)), ("x", Value::felt(1u64))]);
        match flatten(&ty, &swapped, "p", &reg).unwrap_err() {
            CodecError::ShapeMismatch { argument, expected, .. } => {
                assert_eq!(argument, "p");
                assert_eq!(expected, "Point");
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(flatten(&ty, &point(1, 2), "p", &reg).unwrap(), felts(&[1, 2]));
    }

    #[test]
    fn list_is_not_a_tuple() {
        let reg = registry();
        let ty = ArgType::Tuple(vec![ArgType::Felt]);
        assert!(flatten(&ty, &Value::felts([1]), "t", &reg).is_err());
        let arr = ArgType::array(ArgType::Felt);
        assert!(flatten(&arr, &Value::tuple([Value::felt(1u64)]), "a", &reg).is_err());
    }

    #[test]
    fn unknown_struct() {
        let reg = registry();
        let ty = ArgType::Struct("Rect".into());
        let value = Value::tuple([Value::felt(1u64)]);
        assert_eq!(
            flatten(&ty, &value, "r", &reg).unwrap_err(),
            CodecError::UnknownType { name: "Rect".into() }
        );
    }

    #[test]
    fn arguments_follow_declaration_order_and_skip_missing() {
        let reg = registry();
        let params = vec![
            Param::new("a", ArgType::Felt),
            Param::new("b", ArgType::array(ArgType::Felt)),
            Param::new("c", ArgType::Felt),
        ];
        let args = Arguments::from([
            ("b".to_string(), Value::felts([7, 8, 9])),
            ("a".to_string(), Value::felt(5u64)),
        ]);
        assert_eq!(
            flatten_arguments(&params, &args, &reg).unwrap(),
            felts(&[5, 3, 7, 8, 9])
        );
    }

    #[test]
    fn failing_argument_leaves_earlier_ones_in_place() {
        let reg = registry();
        let params = vec![
            Param::new("a", ArgType::Felt),
            Param::new("p", ArgType::Struct("Point".into())),
        ];
        let args = Arguments::from([
            ("a".to_string(), Value::felt(5u64)),
            ("p".to_string(), Value::tuple([Value::felt(1u64), Value::felts([2])])),
        ]);
        let mut out = Vec::new();
        let err = flatten_arguments_into(&params, &args, &reg, &mut out).unwrap_err();
        assert!(matches!(err, CodecError::ShapeMismatch { ref argument, .. } if argument == "p.y"));
        // `p.x` was valid but `p` as a whole was not, so none of it is emitted.
        assert_eq!(out, felts(&[5]));
    }

    #[test]
    fn undeclared_argument_is_rejected() {
        let reg = registry();
        let params = vec![Param::new("a", ArgType::Felt)];
        let args = Arguments::from([("zz".to_string(), Value::felt(1u64))]);
        match flatten_arguments(&params, &args, &reg).unwrap_err() {
            CodecError::ShapeMismatch { argument, .. } => assert_eq!(argument, "zz"),
            other => panic!("unexpected error {other:?}"),
        }
    }
}
