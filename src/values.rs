use ethereum_types::{H160, U256};

use crate::{error::AbiError, types::Type};

/// ABI value.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Value {
    /// Unsigned int value (uint<M>).
    Uint(U256, usize),
    /// Signed int value (int<M>), two's complement.
    Int(U256, usize),
    /// Address value (address).
    Address(H160),
    /// Bool value (bool).
    Bool(bool),
    /// Fixed size bytes value (bytes<N>).
    FixedBytes(Vec<u8>),
    /// Dynamic size bytes value (bytes).
    Bytes(Vec<u8>),
    /// UTF-8 string value (string).
    String(String),
    /// Fixed size array value (T\[k\]).
    FixedArray(Vec<Value>, Type),
    /// Dynamic size array value (T[]).
    Array(Vec<Value>, Type),
    /// Tuple value (tuple(T1, T2, ..., Tn)).
    ///
    /// This variant's vector items have the form (name, value).
    Tuple(Vec<(String, Value)>),
}

impl Value {
    /// Decodes values from bytes using the given type hints.
    pub fn decode_from_slice(bs: &[u8], tys: &[Type]) -> Result<Vec<Value>, AbiError> {
        tys.iter()
            .try_fold((vec![], 0), |(mut values, at), ty| {
                let (value, consumed) = Self::decode(bs, ty, 0, at)?;
                values.push(value);

                Ok((values, at + consumed))
            })
            .map(|(values, _)| values)
    }

    /// Encodes values into bytes, following the standard contract ABI
    /// head/tail layout: static values in place, dynamic values behind a
    /// 32-byte offset into the tail.
    pub fn encode(values: &[Self]) -> Vec<u8> {
        let parts: Vec<(bool, Vec<u8>)> = values
            .iter()
            .map(|value| (value.type_of().is_dynamic(), Self::encode_value(value)))
            .collect();

        let head_len: usize = parts
            .iter()
            .map(|(dynamic, encoded)| if *dynamic { 32 } else { encoded.len() })
            .sum();

        let mut head = Vec::with_capacity(head_len);
        let mut tail = vec![];

        for (dynamic, encoded) in parts {
            if dynamic {
                // offsets are relative to the start of this value block
                head.extend_from_slice(&encode_usize(head_len + tail.len()));
                tail.extend(encoded);
            } else {
                head.extend(encoded);
            }
        }

        head.extend(tail);

        head
    }

    /// Returns the type of the given value.
    pub fn type_of(&self) -> Type {
        match self {
            Value::Uint(_, size) => Type::Uint(*size),
            Value::Int(_, size) => Type::Int(*size),
            Value::Address(_) => Type::Address,
            Value::Bool(_) => Type::Bool,
            Value::FixedBytes(bytes) => Type::FixedBytes(bytes.len()),
            Value::Bytes(_) => Type::Bytes,
            Value::String(_) => Type::String,
            Value::FixedArray(values, ty) => Type::FixedArray(Box::new(ty.clone()), values.len()),
            Value::Array(_, ty) => Type::Array(Box::new(ty.clone())),
            Value::Tuple(values) => Type::Tuple(
                values
                    .iter()
                    .map(|(name, value)| (name.clone(), value.type_of()))
                    .collect(),
            ),
        }
    }

    /// Converts a JSON value into an ABI value of the given type.
    ///
    /// This is the argument path for callers that supply arguments as JSON:
    /// integers accept JSON numbers or decimal/`0x` strings, addresses and
    /// bytes accept hex strings, arrays and tuples accept JSON arrays.
    pub fn from_json(ty: &Type, value: &serde_json::Value) -> Result<Self, AbiError> {
        match ty {
            Type::Uint(size) => {
                let uint = match value {
                    serde_json::Value::Number(n) => n
                        .as_u64()
                        .map(U256::from)
                        .ok_or_else(|| mismatch(ty, value))?,
                    serde_json::Value::String(s) => {
                        parse_uint(s).ok_or_else(|| mismatch(ty, value))?
                    }
                    _ => return Err(mismatch(ty, value)),
                };

                Ok(Value::Uint(uint, *size))
            }

            Type::Int(size) => {
                let int = match value {
                    serde_json::Value::Number(n) => n
                        .as_i64()
                        .map(int_to_u256)
                        .ok_or_else(|| mismatch(ty, value))?,
                    serde_json::Value::String(s) => match s.strip_prefix('-') {
                        Some(magnitude) => parse_uint(magnitude)
                            .map(twos_complement)
                            .ok_or_else(|| mismatch(ty, value))?,
                        None => parse_uint(s).ok_or_else(|| mismatch(ty, value))?,
                    },
                    _ => return Err(mismatch(ty, value)),
                };

                Ok(Value::Int(int, *size))
            }

            Type::Address => {
                let s = value.as_str().ok_or_else(|| mismatch(ty, value))?;

                s.parse::<H160>()
                    .map(Value::Address)
                    .map_err(|_| mismatch(ty, value))
            }

            Type::Bool => value
                .as_bool()
                .map(Value::Bool)
                .ok_or_else(|| mismatch(ty, value)),

            Type::FixedBytes(size) => {
                let bytes = parse_hex_bytes(value).ok_or_else(|| mismatch(ty, value))?;

                if bytes.len() != *size {
                    return Err(mismatch(ty, value));
                }

                Ok(Value::FixedBytes(bytes))
            }

            Type::Bytes => parse_hex_bytes(value)
                .map(Value::Bytes)
                .ok_or_else(|| mismatch(ty, value)),

            Type::String => value
                .as_str()
                .map(|s| Value::String(s.to_string()))
                .ok_or_else(|| mismatch(ty, value)),

            Type::FixedArray(elem_ty, size) => {
                let items = value.as_array().ok_or_else(|| mismatch(ty, value))?;

                if items.len() != *size {
                    return Err(mismatch(ty, value));
                }

                let values = items
                    .iter()
                    .map(|item| Self::from_json(elem_ty, item))
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(Value::FixedArray(values, (**elem_ty).clone()))
            }

            Type::Array(elem_ty) => {
                let items = value.as_array().ok_or_else(|| mismatch(ty, value))?;

                let values = items
                    .iter()
                    .map(|item| Self::from_json(elem_ty, item))
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(Value::Array(values, (**elem_ty).clone()))
            }

            Type::Tuple(tys) => {
                let items = value.as_array().ok_or_else(|| mismatch(ty, value))?;

                if items.len() != tys.len() {
                    return Err(mismatch(ty, value));
                }

                let values = tys
                    .iter()
                    .zip(items)
                    .map(|((name, field_ty), item)| {
                        Self::from_json(field_ty, item).map(|value| (name.clone(), value))
                    })
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(Value::Tuple(values))
            }
        }
    }

    fn encode_value(value: &Self) -> Vec<u8> {
        match value {
            Value::Uint(i, _) => encode_u256(i),

            Value::Int(i, _) => encode_u256(i),

            Value::Address(addr) => {
                let mut buf = [0u8; 32];

                // left-padded, as if it were a uint160
                buf[12..].copy_from_slice(addr.as_bytes());
                buf.to_vec()
            }

            Value::Bool(b) => {
                let mut buf = [0u8; 32];

                if *b {
                    buf[31] = 1;
                }
                buf.to_vec()
            }

            Value::FixedBytes(bytes) => right_pad(bytes),

            Value::Bytes(bytes) => {
                let mut buf = encode_usize(bytes.len());
                buf.extend(right_pad(bytes));
                buf
            }

            Value::String(s) => Self::encode_value(&Value::Bytes(s.as_bytes().to_vec())),

            Value::FixedArray(values, _) => Self::encode(values),

            Value::Array(values, _) => {
                let mut buf = encode_usize(values.len());
                buf.extend(Self::encode(values));
                buf
            }

            Value::Tuple(values) => {
                let values: Vec<_> = values.iter().cloned().map(|(_, value)| value).collect();

                Self::encode(&values)
            }
        }
    }

    fn decode(
        bs: &[u8],
        ty: &Type,
        base_addr: usize,
        at: usize,
    ) -> Result<(Value, usize), AbiError> {
        match ty {
            Type::Uint(size) => {
                let word = peek_word(bs, base_addr + at, ty)?;

                Ok((Value::Uint(U256::from_big_endian(word), *size), 32))
            }

            Type::Int(size) => {
                let word = peek_word(bs, base_addr + at, ty)?;

                Ok((Value::Int(U256::from_big_endian(word), *size), 32))
            }

            Type::Address => {
                let word = peek_word(bs, base_addr + at, ty)?;

                Ok((Value::Address(H160::from_slice(&word[12..])), 32))
            }

            Type::Bool => {
                let word = peek_word(bs, base_addr + at, ty)?;

                Ok((Value::Bool(word[31] == 1), 32))
            }

            Type::FixedBytes(size) => {
                let word = peek_word(bs, base_addr + at, ty)?;

                Ok((Value::FixedBytes(word[..*size].to_vec()), 32))
            }

            Type::Bytes => {
                let offset = peek_usize(bs, base_addr + at, ty)?;

                let at = base_addr + offset;
                let len = peek_usize(bs, at, ty)?;

                let bytes = bs
                    .get((at + 32)..(at + 32 + len))
                    .ok_or_else(|| end_of_input(ty))?
                    .to_vec();

                // consumes only the head word, i.e. the offset pointer
                Ok((Value::Bytes(bytes), 32))
            }

            Type::String => {
                let (bytes_value, consumed) = Self::decode(bs, &Type::Bytes, base_addr, at)?;

                let bytes = if let Value::Bytes(bytes) = bytes_value {
                    bytes
                } else {
                    // should always be Value::Bytes
                    unreachable!();
                };

                let s = String::from_utf8(bytes).map_err(|e| {
                    AbiError::Decode(format!("invalid utf-8 in string value: {}", e))
                })?;

                Ok((Value::String(s), consumed))
            }

            Type::FixedArray(elem_ty, size) => {
                if ty.is_dynamic() {
                    let offset = peek_usize(bs, base_addr + at, ty)?;
                    let base_addr = base_addr + offset;

                    (0..*size)
                        .try_fold((vec![], 0), |(mut values, total_consumed), _| {
                            let (value, consumed) =
                                Self::decode(bs, elem_ty, base_addr, total_consumed)?;

                            values.push(value);

                            Ok((values, total_consumed + consumed))
                        })
                        .map(|(values, _)| (Value::FixedArray(values, (**elem_ty).clone()), 32))
                } else {
                    (0..*size)
                        .try_fold((vec![], 0), |(mut values, total_consumed), _| {
                            let (value, consumed) =
                                Self::decode(bs, elem_ty, base_addr, at + total_consumed)?;

                            values.push(value);

                            Ok((values, total_consumed + consumed))
                        })
                        .map(|(values, consumed)| {
                            (Value::FixedArray(values, (**elem_ty).clone()), consumed)
                        })
                }
            }

            Type::Array(elem_ty) => {
                let offset = peek_usize(bs, base_addr + at, ty)?;

                let at = base_addr + offset;
                let array_len = peek_usize(bs, at, ty)?;

                let base_addr = at + 32;

                (0..array_len)
                    .try_fold((vec![], 0), |(mut values, total_consumed), _| {
                        let (value, consumed) =
                            Self::decode(bs, elem_ty, base_addr, total_consumed)?;

                        values.push(value);

                        Ok((values, total_consumed + consumed))
                    })
                    .map(|(values, _)| (Value::Array(values, (**elem_ty).clone()), 32))
            }

            Type::Tuple(tys) => {
                if ty.is_dynamic() {
                    let offset = peek_usize(bs, base_addr + at, ty)?;
                    let base_addr = base_addr + offset;

                    tys.iter()
                        .cloned()
                        .try_fold((vec![], 0), |(mut values, total_consumed), (name, ty)| {
                            let (value, consumed) =
                                Self::decode(bs, &ty, base_addr, total_consumed)?;

                            values.push((name, value));

                            Ok((values, total_consumed + consumed))
                        })
                        .map(|(values, _)| (Value::Tuple(values), 32))
                } else {
                    tys.iter()
                        .cloned()
                        .try_fold((vec![], 0), |(mut values, total_consumed), (name, ty)| {
                            let (value, consumed) =
                                Self::decode(bs, &ty, base_addr, at + total_consumed)?;

                            values.push((name, value));

                            Ok((values, total_consumed + consumed))
                        })
                        .map(|(values, consumed)| (Value::Tuple(values), consumed))
                }
            }
        }
    }
}

fn mismatch(ty: &Type, value: &serde_json::Value) -> AbiError {
    AbiError::ArgumentMismatch(format!("cannot convert {} to {}", value, ty))
}

fn end_of_input(ty: &Type) -> AbiError {
    AbiError::Decode(format!("reached end of input while decoding {}", ty))
}

fn peek_word<'a>(bs: &'a [u8], at: usize, ty: &Type) -> Result<&'a [u8], AbiError> {
    bs.get(at..(at + 32)).ok_or_else(|| end_of_input(ty))
}

// lengths and offsets beyond the input size are invalid, which also keeps
// later position arithmetic from overflowing
fn peek_usize(bs: &[u8], at: usize, ty: &Type) -> Result<usize, AbiError> {
    let word = U256::from_big_endian(peek_word(bs, at, ty)?);

    if word > U256::from(bs.len()) {
        return Err(AbiError::Decode(format!(
            "length or offset out of range while decoding {}",
            ty
        )));
    }

    Ok(word.as_usize())
}

fn encode_u256(i: &U256) -> Vec<u8> {
    let mut buf = [0u8; 32];
    i.to_big_endian(&mut buf);
    buf.to_vec()
}

fn encode_usize(n: usize) -> Vec<u8> {
    encode_u256(&U256::from(n))
}

fn right_pad(bytes: &[u8]) -> Vec<u8> {
    let mut padded = bytes.to_vec();
    padded.resize((bytes.len() + 31) / 32 * 32, 0);
    padded
}

fn parse_hex_bytes(value: &serde_json::Value) -> Option<Vec<u8>> {
    let s = value.as_str()?;
    let s = s.strip_prefix("0x").unwrap_or(s);

    hex::decode(s).ok()
}

fn parse_uint(s: &str) -> Option<U256> {
    match s.strip_prefix("0x") {
        Some(hex_digits) => U256::from_str_radix(hex_digits, 16).ok(),
        None => U256::from_dec_str(s).ok(),
    }
}

fn int_to_u256(n: i64) -> U256 {
    if n >= 0 {
        U256::from(n as u64)
    } else {
        twos_complement(U256::from(n.unsigned_abs()))
    }
}

// two's complement negation of a magnitude
fn twos_complement(magnitude: U256) -> U256 {
    (!magnitude).overflowing_add(U256::one()).0
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use rand::Rng;

    use super::*;

    fn addr(s: &str) -> H160 {
        s.parse().unwrap()
    }

    #[test]
    fn encode_uint() {
        let value = Value::Uint(U256::from(0xefcdab), 56);

        let mut expected_bytes = [0u8; 32].to_vec();
        expected_bytes[31] = 0xab;
        expected_bytes[30] = 0xcd;
        expected_bytes[29] = 0xef;

        assert_eq!(Value::encode(&[value]), expected_bytes);
    }

    #[test]
    fn encode_int() {
        let value = Value::Int(U256::from(0xabcdef), 56);

        let mut expected_bytes = [0u8; 32].to_vec();
        expected_bytes[31] = 0xef;
        expected_bytes[30] = 0xcd;
        expected_bytes[29] = 0xab;

        assert_eq!(Value::encode(&[value]), expected_bytes);
    }

    #[test]
    fn encode_address() {
        let addr = addr("0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2");
        let value = Value::Address(addr);

        let mut expected_bytes = [0u8; 32].to_vec();
        expected_bytes[12..32].copy_from_slice(addr.as_bytes());

        assert_eq!(Value::encode(&[value]), expected_bytes);
    }

    #[test]
    fn encode_bool() {
        let mut true_vec = [0u8; 32].to_vec();
        true_vec[31] = 1;

        let false_vec = [0u8; 32].to_vec();

        assert_eq!(Value::encode(&[Value::Bool(true)]), true_vec);
        assert_eq!(Value::encode(&[Value::Bool(false)]), false_vec);
    }

    #[test]
    fn encode_fixed_bytes() {
        let mut bytes = [0u8; 32].to_vec();
        for (i, b) in bytes.iter_mut().enumerate().take(16).skip(1) {
            *b = i as u8;
        }

        assert_eq!(
            Value::encode(&[Value::FixedBytes(bytes[0..16].to_vec())]),
            bytes
        );
    }

    #[test]
    fn encode_fixed_array() {
        let uint1 = U256::from(57);
        let uint2 = U256::from(109);

        let value = Value::FixedArray(
            vec![Value::Uint(uint1, 56), Value::Uint(uint2, 56)],
            Type::Uint(56),
        );

        let mut expected_bytes = [0u8; 64];
        uint1.to_big_endian(&mut expected_bytes[0..32]);
        uint2.to_big_endian(&mut expected_bytes[32..64]);

        assert_eq!(Value::encode(&[value]), expected_bytes);
    }

    #[test]
    fn encode_string_and_bytes() {
        // Bytes and strings are encoded in the same way.

        let mut s = String::with_capacity(2890);
        s.reserve(2890);
        for i in 0..1000 {
            s += i.to_string().as_ref();
        }

        let mut expected_bytes = [0u8; 2976];
        expected_bytes[31] = 0x20; // big-endian offset
        expected_bytes[63] = 0x4a; // big-endian string size (2890 = 0xb4a)
        expected_bytes[62] = 0x0b;
        expected_bytes[64..(64 + 2890)].copy_from_slice(s.as_bytes());

        assert_eq!(Value::encode(&[Value::String(s)]), expected_bytes);
    }

    #[test]
    fn encode_array() {
        let addr1 = addr("0xa0b211418d87c9f5918e6213fec3b13290aa5f26");
        let addr2 = addr("0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2");

        let value = Value::Array(
            vec![Value::Address(addr1), Value::Address(addr2)],
            Type::Address,
        );

        let mut expected_bytes = [0u8; 128];
        expected_bytes[31] = 0x20; // big-endian offset
        expected_bytes[63] = 2; // big-endian array length
        expected_bytes[76..96].copy_from_slice(addr1.as_bytes());
        expected_bytes[108..128].copy_from_slice(addr2.as_bytes());

        assert_eq!(Value::encode(&[value]), expected_bytes);
    }

    #[test]
    fn encode_fixed_tuple() {
        let addr = addr("0xa0b211418d87c9f5918e6213fec3b13290aa5f26");
        let uint = U256::from(53);

        let value = Value::Tuple(vec![
            ("a".to_string(), Value::Address(addr)),
            ("b".to_string(), Value::Uint(uint, 256)),
        ]);

        let mut expected_bytes = [0u8; 64];
        expected_bytes[12..32].copy_from_slice(addr.as_bytes());
        uint.to_big_endian(&mut expected_bytes[32..64]);

        assert_eq!(Value::encode(&[value]), expected_bytes);
    }

    #[test]
    fn encode_tuple() {
        let s = "abc".to_string();
        let uint = U256::from(53);

        let value = Value::Tuple(vec![
            ("a".to_string(), Value::String(s.clone())),
            ("b".to_string(), Value::Uint(uint, 256)),
        ]);

        let mut expected_bytes = [0u8; 160];
        expected_bytes[31] = 0x20; // big-endian tuple offset
        expected_bytes[63] = 0x40; // big-endian string offset
        uint.to_big_endian(&mut expected_bytes[64..96]);
        expected_bytes[127] = 3; // big-endian string length
        expected_bytes[128..(128 + s.len())].copy_from_slice(s.as_bytes());

        assert_eq!(Value::encode(&[value]), expected_bytes);
    }

    #[test]
    fn encode_many() {
        let values = vec![
            Value::String("abc".to_string()),
            Value::Uint(U256::from(5), 32),
            Value::FixedArray(
                vec![
                    Value::Array(
                        vec![
                            Value::Uint(U256::from(1), 32),
                            Value::Uint(U256::from(2), 32),
                        ],
                        Type::Uint(32),
                    ),
                    Value::Array(vec![Value::Uint(U256::from(3), 32)], Type::Uint(32)),
                ],
                Type::Array(Box::new(Type::Uint(32))),
            ),
        ];

        let expected = "0000000000000000000000000000000000000000000000000000000000000060000000000000000000000000000000000000000000000000000000000000000500000000000000000000000000000000000000000000000000000000000000a000000000000000000000000000000000000000000000000000000000000000036162630000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000004000000000000000000000000000000000000000000000000000000000000000a000000000000000000000000000000000000000000000000000000000000000020000000000000000000000000000000000000000000000000000000000000001000000000000000000000000000000000000000000000000000000000000000200000000000000000000000000000000000000000000000000000000000000010000000000000000000000000000000000000000000000000000000000000003";
        let encoded = hex::encode(Value::encode(&values));

        assert_eq!(encoded, expected);
    }

    #[test]
    fn decode_uint() {
        let mut bs = [0u8; 32];
        bs[31] = 0x7b;

        let v =
            Value::decode_from_slice(&bs, &[Type::Uint(256)]).expect("decode_from_slice failed");

        assert_eq!(v, vec![Value::Uint(U256::from(123), 256)]);
    }

    #[test]
    fn decode_static_sequence() {
        let addr1 = addr("0xa0b211418d87c9f5918e6213fec3b13290aa5f26");

        let values = vec![
            Value::Address(addr1),
            Value::Bool(true),
            Value::Uint(U256::from(77), 256),
        ];

        let bs = Value::encode(&values);

        let v = Value::decode_from_slice(&bs, &[Type::Address, Type::Bool, Type::Uint(256)])
            .expect("decode_from_slice failed");

        assert_eq!(v, values);
    }

    #[test]
    fn decode_string() {
        let values = vec![Value::String("hello, world".to_string())];

        let bs = Value::encode(&values);

        let v = Value::decode_from_slice(&bs, &[Type::String]).expect("decode_from_slice failed");

        assert_eq!(v, values);
    }

    #[test]
    fn decode_nested_dynamic_arrays() {
        // [[1, 2], [3]]
        let values = vec![Value::Array(
            vec![
                Value::Array(
                    vec![
                        Value::Uint(U256::from(1), 256),
                        Value::Uint(U256::from(2), 256),
                    ],
                    Type::Uint(256),
                ),
                Value::Array(vec![Value::Uint(U256::from(3), 256)], Type::Uint(256)),
            ],
            Type::Array(Box::new(Type::Uint(256))),
        )];

        let bs = Value::encode(&values);

        let v = Value::decode_from_slice(
            &bs,
            &[Type::Array(Box::new(Type::Array(Box::new(Type::Uint(
                256,
            )))))],
        )
        .expect("decode_from_slice failed");

        assert_eq!(v, values);
    }

    #[test]
    fn decode_mixed_round_trip() {
        let values = vec![
            Value::String("abc".to_string()),
            Value::Uint(U256::from(5), 32),
            Value::Tuple(vec![
                ("a".to_string(), Value::Bytes(vec![1, 2, 3, 4])),
                ("b".to_string(), Value::Bool(false)),
            ]),
            Value::FixedArray(
                vec![
                    Value::Address(addr("0xa0b211418d87c9f5918e6213fec3b13290aa5f26")),
                    Value::Address(addr("0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2")),
                ],
                Type::Address,
            ),
        ];

        let tys: Vec<_> = values.iter().map(|v| v.type_of()).collect();
        let bs = Value::encode(&values);

        let v = Value::decode_from_slice(&bs, &tys).expect("decode_from_slice failed");

        assert_eq!(v, values);
    }

    #[test]
    fn decode_truncated_input() {
        let bs = [0u8; 16];

        let res = Value::decode_from_slice(&bs, &[Type::Uint(256)]);

        assert!(matches!(res, Err(AbiError::Decode(_))));
    }

    #[test]
    fn encode_is_deterministic() {
        let mut rng = rand::thread_rng();

        for _ in 0..10 {
            let values = vec![
                Value::Uint(U256::from(rng.gen::<u64>()), 256),
                Value::String(format!("s-{}", rng.gen::<u32>())),
                Value::Bool(rng.gen::<bool>()),
            ];

            assert_eq!(Value::encode(&values), Value::encode(&values));
        }
    }

    #[test]
    fn from_json_uint() {
        let ty = Type::Uint(256);

        assert_eq!(
            Value::from_json(&ty, &serde_json::json!(123)).unwrap(),
            Value::Uint(U256::from(123), 256)
        );

        assert_eq!(
            Value::from_json(&ty, &serde_json::json!("123")).unwrap(),
            Value::Uint(U256::from(123), 256)
        );

        assert_eq!(
            Value::from_json(&ty, &serde_json::json!("0x7b")).unwrap(),
            Value::Uint(U256::from(123), 256)
        );
    }

    #[test]
    fn from_json_int() {
        let ty = Type::Int(256);

        assert_eq!(
            Value::from_json(&ty, &serde_json::json!(-1)).unwrap(),
            Value::Int(U256::MAX, 256)
        );

        assert_eq!(
            Value::from_json(&ty, &serde_json::json!("-5")).unwrap(),
            Value::Int(twos_complement(U256::from(5)), 256)
        );
    }

    #[test]
    fn from_json_address_and_bytes() {
        assert_eq!(
            Value::from_json(
                &Type::Address,
                &serde_json::json!("0xa0b211418d87c9f5918e6213fec3b13290aa5f26")
            )
            .unwrap(),
            Value::Address(addr("0xa0b211418d87c9f5918e6213fec3b13290aa5f26"))
        );

        assert_eq!(
            Value::from_json(&Type::Bytes, &serde_json::json!("0x01020304")).unwrap(),
            Value::Bytes(vec![1, 2, 3, 4])
        );

        assert_eq!(
            Value::from_json(&Type::FixedBytes(4), &serde_json::json!("0xdeadbeef")).unwrap(),
            Value::FixedBytes(vec![0xde, 0xad, 0xbe, 0xef])
        );
    }

    #[test]
    fn from_json_composites() {
        let ty = Type::Array(Box::new(Type::Uint(256)));

        assert_eq!(
            Value::from_json(&ty, &serde_json::json!([1, 2, 3])).unwrap(),
            Value::Array(
                vec![
                    Value::Uint(U256::from(1), 256),
                    Value::Uint(U256::from(2), 256),
                    Value::Uint(U256::from(3), 256),
                ],
                Type::Uint(256)
            )
        );

        let ty = Type::Tuple(vec![
            ("a".to_string(), Type::Uint(256)),
            ("b".to_string(), Type::String),
        ]);

        assert_eq!(
            Value::from_json(&ty, &serde_json::json!([7, "hello"])).unwrap(),
            Value::Tuple(vec![
                ("a".to_string(), Value::Uint(U256::from(7), 256)),
                ("b".to_string(), Value::String("hello".to_string())),
            ])
        );
    }

    #[test]
    fn from_json_mismatches() {
        for (ty, value) in [
            (Type::Uint(256), serde_json::json!(true)),
            (Type::Uint(256), serde_json::json!(-1)),
            (Type::Uint(256), serde_json::json!("not a number")),
            (Type::Address, serde_json::json!("0x123")),
            (Type::Bool, serde_json::json!("true")),
            (Type::FixedBytes(4), serde_json::json!("0x0102")),
            (
                Type::FixedArray(Box::new(Type::Bool), 2),
                serde_json::json!([true]),
            ),
            (Type::String, serde_json::json!(42)),
        ] {
            assert!(
                matches!(
                    Value::from_json(&ty, &value),
                    Err(AbiError::ArgumentMismatch(_))
                ),
                "expected mismatch for {} as {}",
                value,
                ty
            );
        }
    }
}
