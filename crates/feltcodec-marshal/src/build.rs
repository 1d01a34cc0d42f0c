//! Building engine: the decoder side.
//!
//! Rebuilds structured values from a flat felt sequence according to the
//! declared types. A single [`Cursor`] is shared across all values of one
//! decoding pass; the pass succeeds only if it consumes every felt.

use feltcodec_core::{error::CodecError, registry::StructResolver, ArgType, Felt, Param, Value};

/// Forward-only read position over a felt sequence.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    felts: &'a [Felt],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(felts: &'a [Felt]) -> Self {
        Self { felts, pos: 0 }
    }

    /// Take the next felt, failing with `Underflow` when exhausted.
    pub fn next_felt(&mut self) -> Result<Felt, CodecError> {
        let felt = self
            .felts
            .get(self.pos)
            .copied()
            .ok_or_else(CodecError::underflow)?;
        self.pos += 1;
        Ok(felt)
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.felts.len() - self.pos
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }

    /// Fail with `Overflow` if any felts are left unread.
    pub fn finish(self) -> Result<(), CodecError> {
        if self.is_exhausted() {
            Ok(())
        } else {
            Err(CodecError::overflow())
        }
    }
}

/// Build one value of type `ty` from the cursor.
pub fn build(
    ty: &ArgType,
    cursor: &mut Cursor<'_>,
    structs: &dyn StructResolver,
) -> Result<Value, CodecError> {
    match ty {
        ArgType::Felt => Ok(Value::Felt(cursor.next_felt()?)),

        ArgType::Tuple(members) => {
            let mut values = Vec::with_capacity(members.len());
            for member in members {
                values.push(build(member, cursor, structs)?);
            }
            Ok(Value::Tuple(values))
        }

        ArgType::Struct(name) => {
            let def = structs.resolve(name)?;
            let mut fields = Vec::with_capacity(def.members.len());
            for member in &def.members {
                fields.push((member.name.clone(), build(&member.ty, cursor, structs)?));
            }
            Ok(Value::Struct {
                name: def.name.clone(),
                fields,
            })
        }

        ArgType::Array(elem) => {
            // Array elements occupy at least one felt each (zero-width
            // element types are rejected when an interface is built), so a
            // length beyond the remaining felts cannot be backed.
            let len = cursor
                .next_felt()?
                .to_usize()
                .filter(|&len| len <= cursor.remaining())
                .ok_or_else(CodecError::underflow)?;
            let mut values = Vec::with_capacity(len);
            for _ in 0..len {
                values.push(build(elem, cursor, structs)?);
            }
            Ok(Value::Array(values))
        }
    }
}

/// Build every declared parameter in order and require the sequence to be
/// consumed exactly.
pub fn build_arguments(
    params: &[Param],
    felts: &[Felt],
    structs: &dyn StructResolver,
) -> Result<Vec<Value>, CodecError> {
    let mut cursor = Cursor::new(felts);
    let mut values = Vec::with_capacity(params.len());
    for param in params {
        values.push(build(&param.ty, &mut cursor, structs)?);
    }
    cursor.finish()?;
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flatten::flatten;
    use feltcodec_core::{ParseFailure, StructDef};
    use feltcodec_registry::StructRegistry;

    fn registry() -> StructRegistry {
        StructRegistry::from_defs([
            StructDef::new(
                "Point",
                vec![Param::new("x", ArgType::Felt), Param::new("y", ArgType::Felt)],
            ),
            StructDef::new(
                "Segment",
                vec![
                    Param::new("from", ArgType::Struct("Point".into())),
                    Param::new("to", ArgType::Struct("Point".into())),
                    Param::new("tag", ArgType::Tuple(vec![ArgType::Felt, ArgType::Felt])),
                ],
            ),
        ])
        .unwrap()
    }

    fn felts(values: &[u64]) -> Vec<Felt> {
        values.iter().copied().map(Felt::from).collect()
    }

    fn point(x: u64, y: u64) -> Value {
        Value::record("Point", [("x", Value::felt(x)), ("y", Value::felt(y))])
    }

    #[test]
    fn builds_scalar_and_array() {
        let reg = registry();
        let params = vec![
            Param::new("a", ArgType::Felt),
            Param::new("b", ArgType::array(ArgType::Felt)),
        ];
        let values = build_arguments(&params, &felts(&[5, 3, 7, 8, 9]), &reg).unwrap();
        assert_eq!(values, vec![Value::felt(5u64), Value::felts([7, 8, 9])]);
    }

    #[test]
    fn builds_named_struct_records() {
        let reg = registry();
        let data = felts(&[2, 1, 2, 3, 4]);
        let mut cursor = Cursor::new(&data);
        let value = build(&ArgType::array(ArgType::Struct("Point".into())), &mut cursor, &reg)
            .unwrap();
        assert_eq!(value, Value::array([point(1, 2), point(3, 4)]));
        assert!(cursor.is_exhausted());
    }

    #[test]
    fn roundtrip_through_nested_shapes() {
        let reg = registry();
        let segment = Value::record(
            "Segment",
            [
                ("from", point(1, 2)),
                ("to", point(3, 4)),
                ("tag", Value::tuple([Value::felt(9u64), Value::felt(0u64)])),
            ],
        );
        let cases = vec![
            (ArgType::Felt, Value::felt(42u64)),
            (ArgType::array(ArgType::Felt), Value::felts([])),
            (ArgType::Struct("Segment".into()), segment.clone()),
            (
                ArgType::array(ArgType::Struct("Segment".into())),
                Value::array([segment.clone(), segment]),
            ),
            (
                ArgType::Tuple(vec![ArgType::Felt, ArgType::Tuple(vec![ArgType::Felt])]),
                Value::tuple([Value::felt(1u64), Value::tuple([Value::felt(2u64)])]),
            ),
        ];
        for (ty, value) in cases {
            let flat = flatten(&ty, &value, "v", &reg).unwrap();
            let mut cursor = Cursor::new(&flat);
            assert_eq!(build(&ty, &mut cursor, &reg).unwrap(), value, "type {ty}");
            assert!(cursor.is_exhausted(), "type {ty}");
        }
    }

    #[test]
    fn underflow_on_short_sequence() {
        let reg = registry();
        let params = vec![Param::new("b", ArgType::array(ArgType::Felt))];
        let err = build_arguments(&params, &felts(&[3, 7, 8]), &reg).unwrap_err();
        assert_eq!(err.parse_failure(), Some(ParseFailure::Underflow));

        let err = build_arguments(&params, &[], &reg).unwrap_err();
        assert_eq!(err.parse_failure(), Some(ParseFailure::Underflow));
    }

    #[test]
    fn overflow_on_leftovers() {
        let reg = registry();
        let params = vec![Param::new("a", ArgType::Felt)];
        let err = build_arguments(&params, &felts(&[1, 2]), &reg).unwrap_err();
        assert_eq!(err.parse_failure(), Some(ParseFailure::Overflow));
    }

    #[test]
    fn absurd_array_length_underflows() {
        let reg = registry();
        let params = vec![Param::new("b", ArgType::array(ArgType::Felt))];
        let huge = vec![Felt::from_signed(-1), Felt::from(1u64)];
        let err = build_arguments(&params, &huge, &reg).unwrap_err();
        assert_eq!(err.parse_failure(), Some(ParseFailure::Underflow));
    }

    #[test]
    fn length_beyond_remaining_felts_underflows_before_building() {
        let reg = StructRegistry::from_defs([StructDef::new("Empty", vec![])]).unwrap();
        let params = vec![Param::new("e", ArgType::array(ArgType::Struct("Empty".into())))];
        let err = build_arguments(&params, &[Felt::from(1u64 << 60)], &reg).unwrap_err();
        assert_eq!(err.parse_failure(), Some(ParseFailure::Underflow));

        let params = vec![Param::new("b", ArgType::array(ArgType::Felt))];
        let err = build_arguments(&params, &felts(&[4, 1, 2, 3]), &reg).unwrap_err();
        assert_eq!(err.parse_failure(), Some(ParseFailure::Underflow));
    }

    #[test]
    fn unknown_struct_is_not_a_parse_failure() {
        let reg = registry();
        let params = vec![Param::new("r", ArgType::Struct("Rect".into()))];
        let err = build_arguments(&params, &felts(&[1]), &reg).unwrap_err();
        assert_eq!(err, CodecError::UnknownType { name: "Rect".into() });
    }
}
