use serde::{de::Visitor, Deserialize, Serialize};

use crate::{
    error::{AbiError, Result},
    event::Event,
    params::{DecodedParams, Param},
    values::Value,
};

/// Contract ABI (Application Binary Interface).
///
/// This struct holds the definitions from a contract's JSON interface.
///
/// ```no_run
/// use evm_abi::Abi;
///
/// let abi_json = r#"[{
///     "type": "function",
///     "name": "f",
///     "inputs": [{"type": "uint256", "name": "x"}]}
/// ]"#;
///
/// let abi: Abi = serde_json::from_str(abi_json).unwrap();
/// ```
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Abi {
    /// Contract constructor, if declared.
    pub constructor: Option<Constructor>,
    /// Contract defined functions.
    pub functions: Vec<Function>,
    /// Contract defined events.
    pub events: Vec<Event>,
}

impl Abi {
    /// Encodes the calldata for a call to the named function: 4-byte
    /// selector followed by the ABI-encoded arguments.
    ///
    /// Overloaded names are not resolved; the first entry with a matching
    /// name is used.
    pub fn encode_input(&self, name: &str, params: &[Value]) -> Result<Vec<u8>> {
        let f = self
            .functions
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| AbiError::UnknownFunction(name.to_string()))?;

        f.encode_input(params)
    }

    /// Encodes the calldata for a call to the named function, with the
    /// arguments given as a JSON array (e.g. `[123]`), converted
    /// positionally against the function's declared parameter types.
    pub fn encode_input_from_json(&self, name: &str, json_args: &str) -> Result<Vec<u8>> {
        let f = self
            .functions
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| AbiError::UnknownFunction(name.to_string()))?;

        let args: Vec<serde_json::Value> = serde_json::from_str(json_args)?;

        if args.len() != f.inputs.len() {
            return Err(AbiError::ArgumentMismatch(format!(
                "{} takes {} argument(s), got {}",
                f.name,
                f.inputs.len(),
                args.len()
            )));
        }

        let params = f
            .inputs
            .iter()
            .zip(&args)
            .map(|(param, arg)| Value::from_json(&param.type_, arg))
            .collect::<Result<Vec<_>>>()?;

        f.encode_input(&params)
    }

    /// Encodes the calldata for the function with the given exact signature.
    pub fn encode_input_with_signature(
        &self,
        signature: &str,
        params: &[Value],
    ) -> Result<Vec<u8>> {
        let f = self
            .functions
            .iter()
            .find(|f| f.signature() == signature)
            .ok_or_else(|| AbiError::UnknownFunction(signature.to_string()))?;

        f.encode_input(params)
    }

    /// Decodes function input from calldata, using the selector to pick the
    /// function.
    pub fn decode_input_from_slice<'a>(
        &'a self,
        input: &[u8],
    ) -> Result<(&'a Function, DecodedParams)> {
        let selector = input.get(0..4).ok_or_else(|| {
            AbiError::Decode("input shorter than the 4-byte selector".to_string())
        })?;

        let f = self
            .functions
            .iter()
            .find(|f| f.method_id().as_slice() == selector)
            .ok_or_else(|| AbiError::UnknownFunction(format!("0x{}", hex::encode(selector))))?;

        let decoded_params = f.decode_input_from_slice(&input[4..])?;

        Ok((f, decoded_params))
    }

    /// Decodes function input from hex-encoded calldata, with or without a
    /// `0x` prefix.
    pub fn decode_input_from_hex(&self, input: &str) -> Result<(&Function, DecodedParams)> {
        let bytes = hex::decode(input.strip_prefix("0x").unwrap_or(input))
            .map_err(|e| AbiError::Decode(format!("invalid hex input: {}", e)))?;

        self.decode_input_from_slice(&bytes)
    }
}

impl Serialize for Abi {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut entries = vec![];

        if let Some(c) = &self.constructor {
            entries.push(AbiEntry {
                type_: String::from("constructor"),
                name: None,
                inputs: Some(c.inputs.clone()),
                outputs: None,
                state_mutability: Some(c.state_mutability),
                anonymous: None,
            });
        }

        for e in &self.events {
            entries.push(AbiEntry {
                type_: String::from("event"),
                name: Some(e.name.clone()),
                inputs: Some(e.inputs.clone()),
                outputs: None,
                state_mutability: None,
                anonymous: Some(e.anonymous),
            });
        }

        for f in &self.functions {
            entries.push(AbiEntry {
                type_: String::from("function"),
                name: Some(f.name.clone()),
                inputs: Some(f.inputs.clone()),
                outputs: Some(f.outputs.clone()),
                state_mutability: Some(f.state_mutability),
                anonymous: None,
            });
        }

        entries.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Abi {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(AbiVisitor)
    }
}

/// Contract constructor definition.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Constructor {
    /// Constructor inputs.
    pub inputs: Vec<Param>,
    /// Constructor state mutability kind.
    pub state_mutability: StateMutability,
}

/// Contract function definition.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Function {
    /// Function name.
    pub name: String,
    /// Function inputs.
    pub inputs: Vec<Param>,
    /// Function outputs.
    pub outputs: Vec<Param>,
    /// Function state mutability kind.
    pub state_mutability: StateMutability,
}

impl Function {
    /// Computes the function's method id (function selector).
    pub fn method_id(&self) -> [u8; 4] {
        use tiny_keccak::{Hasher, Keccak};

        let mut keccak_out = [0u8; 32];
        let mut hasher = Keccak::v256();
        hasher.update(self.signature().as_bytes());
        hasher.finalize(&mut keccak_out);

        [keccak_out[0], keccak_out[1], keccak_out[2], keccak_out[3]]
    }

    /// Returns the function's canonical signature.
    pub fn signature(&self) -> String {
        format!(
            "{}({})",
            self.name,
            self.inputs
                .iter()
                .map(|param| param.type_.to_string())
                .collect::<Vec<_>>()
                .join(",")
        )
    }

    /// Encodes calldata for a call to this function: selector followed by
    /// the ABI-encoded arguments.
    ///
    /// Arity and per-position types are checked before encoding.
    pub fn encode_input(&self, params: &[Value]) -> Result<Vec<u8>> {
        if params.len() != self.inputs.len() {
            return Err(AbiError::ArgumentMismatch(format!(
                "{} takes {} argument(s), got {}",
                self.name,
                self.inputs.len(),
                params.len()
            )));
        }

        for (param, value) in self.inputs.iter().zip(params) {
            let got = value.type_of();

            // canonical form comparison, so tuple field names don't matter
            if param.type_.to_string() != got.to_string() {
                return Err(AbiError::ArgumentMismatch(format!(
                    "argument `{}` of {} expects {}, got {}",
                    param.name, self.name, param.type_, got
                )));
            }
        }

        let mut enc_input = self.method_id().to_vec();
        enc_input.extend(Value::encode(params));

        Ok(enc_input)
    }

    /// Decodes this function's input from the parameter section of calldata
    /// (selector already stripped).
    pub fn decode_input_from_slice(&self, input: &[u8]) -> Result<DecodedParams> {
        let inputs_types = self
            .inputs
            .iter()
            .map(|f_input| f_input.type_.clone())
            .collect::<Vec<_>>();

        Ok(DecodedParams::from(
            self.inputs
                .iter()
                .cloned()
                .zip(Value::decode_from_slice(input, &inputs_types)?)
                .collect::<Vec<_>>(),
        ))
    }
}

/// Function or constructor state mutability kind.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateMutability {
    /// Neither reads nor writes contract state.
    Pure,
    /// Reads but does not write contract state.
    View,
    /// May write state; does not accept ether.
    NonPayable,
    /// May write state and accepts ether.
    Payable,
}

impl Default for StateMutability {
    fn default() -> Self {
        StateMutability::NonPayable
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AbiEntry {
    #[serde(rename = "type")]
    type_: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inputs: Option<Vec<Param>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    outputs: Option<Vec<Param>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    state_mutability: Option<StateMutability>,
    #[serde(skip_serializing_if = "Option::is_none")]
    anonymous: Option<bool>,
}

struct AbiVisitor;

impl<'de> Visitor<'de> for AbiVisitor {
    type Value = Abi;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(formatter, "ABI")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        let mut abi = Abi {
            constructor: None,
            functions: vec![],
            events: vec![],
        };

        loop {
            let entry = seq.next_element::<AbiEntry>()?;

            match entry {
                None => return Ok(abi),

                Some(entry) => match entry.type_.as_str() {
                    "constructor" => {
                        abi.constructor = Some(Constructor {
                            inputs: entry.inputs.unwrap_or_default(),
                            state_mutability: entry.state_mutability.unwrap_or_default(),
                        });
                    }

                    "function" => {
                        let name = entry.name.ok_or_else(|| {
                            serde::de::Error::custom("missing function name".to_string())
                        })?;

                        abi.functions.push(Function {
                            name,
                            inputs: entry.inputs.unwrap_or_default(),
                            outputs: entry.outputs.unwrap_or_default(),
                            state_mutability: entry.state_mutability.unwrap_or_default(),
                        });
                    }

                    "event" => {
                        let name = entry.name.ok_or_else(|| {
                            serde::de::Error::custom("missing event name".to_string())
                        })?;

                        abi.events.push(Event {
                            name,
                            inputs: entry.inputs.unwrap_or_default(),
                            anonymous: entry.anonymous.unwrap_or(false),
                        });
                    }

                    // no call surface to encode for these
                    "fallback" | "receive" => {}

                    _ => {
                        return Err(serde::de::Error::custom(format!(
                            "invalid ABI entry type: {}",
                            entry.type_
                        )))
                    }
                },
            }
        }
    }
}
