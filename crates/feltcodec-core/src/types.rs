//! The recursive type grammar describing argument and field shapes.
//!
//! ABI JSON writes these as strings: `felt`, `T*` for a dynamic array of `T`,
//! `(T1, T2)` for a tuple (members may carry a `name: T` label) and any other
//! identifier for a named struct.

use crate::error::AbiError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shape of a single argument, output, event parameter or struct member.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "of", rename_all = "lowercase")]
pub enum ArgType {
    /// One field element.
    Felt,
    /// Positional, fixed-arity tuple.
    Tuple(Vec<ArgType>),
    /// Named struct, resolved through the struct registry.
    Struct(String),
    /// Dynamic array: a length felt followed by that many elements.
    Array(Box<ArgType>),
}

impl ArgType {
    pub fn array(elem: ArgType) -> Self {
        ArgType::Array(Box::new(elem))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, ArgType::Array(_))
    }

    /// Whether an array occurs anywhere inside this type (itself included).
    pub fn contains_array(&self) -> bool {
        match self {
            ArgType::Felt | ArgType::Struct(_) => false,
            ArgType::Array(_) => true,
            ArgType::Tuple(members) => members.iter().any(ArgType::contains_array),
        }
    }

    /// Whether an array occurs below the top level of this type.
    ///
    /// Arrays are only valid as the outermost shape of a parameter; anything
    /// else is a definition error. Struct members are checked separately when
    /// the struct itself is registered.
    pub fn has_nested_array(&self) -> bool {
        match self {
            ArgType::Felt | ArgType::Struct(_) => false,
            ArgType::Array(elem) => elem.contains_array(),
            ArgType::Tuple(members) => members.iter().any(ArgType::contains_array),
        }
    }

    /// Names of every struct referenced by this type, in order of appearance.
    pub fn struct_names(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_struct_names(&mut out);
        out
    }

    fn collect_struct_names<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            ArgType::Felt => {}
            ArgType::Struct(name) => out.push(name.as_str()),
            ArgType::Array(elem) => elem.collect_struct_names(out),
            ArgType::Tuple(members) => {
                for m in members {
                    m.collect_struct_names(out);
                }
            }
        }
    }
}

impl fmt::Display for ArgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgType::Felt => write!(f, "felt"),
            ArgType::Struct(name) => write!(f, "{name}"),
            ArgType::Array(elem) => write!(f, "{elem}*"),
            ArgType::Tuple(members) => {
                let parts: Vec<_> = members.iter().map(|m| m.to_string()).collect();
                write!(f, "({})", parts.join(", "))
            }
        }
    }
}

impl FromStr for ArgType {
    type Err = AbiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_type(s.trim()).map_err(|reason| AbiError::InvalidType {
            ty: s.to_string(),
            reason,
        })
    }
}

fn parse_type(s: &str) -> Result<ArgType, String> {
    if s.is_empty() {
        return Err("empty type".into());
    }
    if let Some(inner) = s.strip_suffix('*') {
        return Ok(ArgType::array(parse_type(inner.trim_end())?));
    }
    if s.starts_with('(') {
        let inner = s
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| format!("unbalanced parentheses in '{s}'"))?;
        let members = split_top_level(inner)?
            .into_iter()
            .map(|member| parse_type(strip_member_name(member)))
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(ArgType::Tuple(members));
    }
    parse_identifier(s)
}

fn parse_identifier(s: &str) -> Result<ArgType, String> {
    let valid = s.split('.').all(|segment| {
        let mut chars = segment.chars();
        matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
    });
    if !valid {
        return Err(format!("'{s}' is not a type identifier"));
    }
    // Fully qualified paths resolve by their last segment.
    let name = s.rsplit('.').next().unwrap_or(s);
    if name == "felt" {
        Ok(ArgType::Felt)
    } else {
        Ok(ArgType::Struct(name.to_string()))
    }
}

/// Split a tuple body on commas that are not inside nested parentheses.
fn split_top_level(body: &str) -> Result<Vec<&str>, String> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in body.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| format!("unbalanced parentheses in '({body})'"))?;
            }
            ',' if depth == 0 => {
                parts.push(body[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(format!("unbalanced parentheses in '({body})'"));
    }
    let last = body[start..].trim();
    // A trailing comma is allowed for single-member tuples: `(felt,)`.
    if !last.is_empty() {
        parts.push(last);
    }
    Ok(parts)
}

/// `x: felt` → `felt`; unlabelled members pass through.
fn strip_member_name(member: &str) -> &str {
    if member.starts_with('(') {
        return member;
    }
    match member.split_once(':') {
        Some((_, ty)) => ty.trim(),
        None => member,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> ArgType {
        s.parse().unwrap()
    }

    #[test]
    fn parses_scalars_arrays_and_structs() {
        assert_eq!(parse("felt"), ArgType::Felt);
        assert_eq!(parse("felt*"), ArgType::array(ArgType::Felt));
        assert_eq!(parse("Point"), ArgType::Struct("Point".into()));
        assert_eq!(
            parse("contracts.types.Point*"),
            ArgType::array(ArgType::Struct("Point".into()))
        );
    }

    #[test]
    fn parses_tuples_with_and_without_labels() {
        assert_eq!(
            parse("(felt, (x: felt, y: Point))"),
            ArgType::Tuple(vec![
                ArgType::Felt,
                ArgType::Tuple(vec![ArgType::Felt, ArgType::Struct("Point".into())]),
            ])
        );
        assert_eq!(parse("(felt,)"), ArgType::Tuple(vec![ArgType::Felt]));
        assert_eq!(parse("()"), ArgType::Tuple(vec![]));
    }

    #[test]
    fn rejects_garbage() {
        assert!("".parse::<ArgType>().is_err());
        assert!("(felt".parse::<ArgType>().is_err());
        assert!("fe lt".parse::<ArgType>().is_err());
        assert!("1abc".parse::<ArgType>().is_err());
    }

    #[test]
    fn display_roundtrips_through_parse() {
        for s in ["felt", "felt*", "(felt, Point)", "(felt, (felt, felt))*"] {
            assert_eq!(parse(s).to_string(), s);
        }
    }

    #[test]
    fn nested_array_detection() {
        assert!(!parse("felt*").has_nested_array());
        assert!(!parse("(felt, Point)*").has_nested_array());
        assert!(parse("felt**").has_nested_array());
        assert!(parse("(felt, felt*)").has_nested_array());
        assert!(parse("(felt, felt*)").contains_array());
    }

    #[test]
    fn struct_names_in_order() {
        assert_eq!(parse("(Point, (felt, Rect))*").struct_names(), vec!["Point", "Rect"]);
    }
}
