use std::str::FromStr;

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, digit1},
    combinator::{all_consuming, map_res, opt, value},
    multi::many0,
    sequence::{delimited, preceded},
    IResult,
};

use crate::error::AbiError;

/// Available ABI types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    /// Unsigned int type (uint<M>).
    Uint(usize),
    /// Signed int type (int<M>).
    Int(usize),
    /// Address type (address).
    Address,
    /// Bool type (bool).
    Bool,
    /// Fixed size bytes type (bytes<N>).
    FixedBytes(usize),
    /// Dynamic size bytes type (bytes).
    Bytes,
    /// UTF-8 string type (string).
    String,
    /// Fixed size array type (T\[k\])
    FixedArray(Box<Type>, usize),
    /// Dynamic size array type (T[])
    Array(Box<Type>),
    /// Tuple type (tuple(T1, T2, ..., Tn))
    Tuple(Vec<(String, Type)>),
}

impl Type {
    /// Returns whether the given type is a dynamic size type or not.
    pub fn is_dynamic(&self) -> bool {
        match self {
            Type::Uint(_) => false,
            Type::Int(_) => false,
            Type::Address => false,
            Type::Bool => false,
            Type::FixedBytes(_) => false,
            Type::Bytes => true,
            Type::String => true,
            Type::FixedArray(ty, _) => ty.is_dynamic(),
            Type::Array(_) => true,
            Type::Tuple(tys) => tys.iter().any(|(_, ty)| ty.is_dynamic()),
        }
    }
}

impl FromStr for Type {
    type Err = AbiError;

    /// Parses an ABI type string (e.g. `uint256`, `bytes32`, `tuple[2][]`).
    ///
    /// Tuple components are not part of the type string in the JSON ABI;
    /// a parsed `tuple` has an empty component list, to be filled in from
    /// the entry's `components` field.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        all_consuming(parse_type)(s)
            .map(|(_, ty)| ty)
            .map_err(|_| AbiError::InvalidType(s.to_string()))
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Uint(size) => write!(f, "uint{}", size),
            Type::Int(size) => write!(f, "int{}", size),
            Type::Address => write!(f, "address"),
            Type::Bool => write!(f, "bool"),
            Type::FixedBytes(size) => write!(f, "bytes{}", size),
            Type::Bytes => write!(f, "bytes"),
            Type::String => write!(f, "string"),
            Type::FixedArray(ty, size) => write!(f, "{}[{}]", ty, size),
            Type::Array(ty) => write!(f, "{}[]", ty),
            Type::Tuple(tys) => write!(
                f,
                "({})",
                tys.iter()
                    .map(|(_, ty)| format!("{}", ty))
                    .collect::<Vec<_>>()
                    .join(",")
            ),
        }
    }
}

fn parse_type(input: &str) -> IResult<&str, Type> {
    let (input, base) = parse_base_type(input)?;
    let (input, suffixes) = many0(parse_array_suffix)(input)?;

    // array suffixes apply left to right: uint8[2][] is a
    // dynamic array of uint8[2]
    let ty = suffixes.into_iter().fold(base, |ty, size| match size {
        Some(size) => Type::FixedArray(Box::new(ty), size),
        None => Type::Array(Box::new(ty)),
    });

    Ok((input, ty))
}

fn parse_base_type(input: &str) -> IResult<&str, Type> {
    alt((
        map_res(preceded(tag("uint"), opt(digit1)), |digits| {
            int_width(digits).map(Type::Uint)
        }),
        map_res(preceded(tag("int"), opt(digit1)), |digits| {
            int_width(digits).map(Type::Int)
        }),
        value(Type::Address, tag("address")),
        value(Type::Bool, tag("bool")),
        map_res(preceded(tag("bytes"), opt(digit1)), |digits| match digits {
            None => Ok(Type::Bytes),
            Some(digits) => fixed_bytes_width(digits).map(Type::FixedBytes),
        }),
        value(Type::String, tag("string")),
        value(Type::Tuple(vec![]), tag("tuple")),
    ))(input)
}

fn parse_array_suffix(input: &str) -> IResult<&str, Option<usize>> {
    delimited(char('['), opt(map_res(digit1, str::parse)), char(']'))(input)
}

// uint/int widths are multiples of 8 up to 256; bare uint/int mean 256
fn int_width(digits: Option<&str>) -> Result<usize, String> {
    let width = match digits {
        None => 256,
        Some(digits) => digits.parse::<usize>().map_err(|e| e.to_string())?,
    };

    if width == 0 || width > 256 || width % 8 != 0 {
        return Err(format!("invalid integer width: {}", width));
    }

    Ok(width)
}

fn fixed_bytes_width(digits: &str) -> Result<usize, String> {
    let width = digits.parse::<usize>().map_err(|e| e.to_string())?;

    if width == 0 || width > 32 {
        return Err(format!("invalid fixed bytes width: {}", width));
    }

    Ok(width)
}
