use serde::{
    de::{self, Deserialize, Deserializer},
    ser::{Serialize, SerializeStruct, Serializer},
};

use crate::{error::AbiError, types::Type, values::Value};

/// A function or event parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    /// Parameter name.
    pub name: String,
    /// Parameter type.
    pub type_: Type,
    /// Whether the parameter is indexed. Only event parameters carry this.
    pub indexed: Option<bool>,
}

/// A decoded param and its value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedParam {
    /// Decoded param.
    pub param: Param,
    /// Decoded value.
    pub value: Value,
}

impl From<(Param, Value)> for DecodedParam {
    fn from((param, value): (Param, Value)) -> Self {
        Self { param, value }
    }
}

/// A list of decoded params, ordered as declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedParams(pub Vec<DecodedParam>);

impl From<Vec<(Param, Value)>> for DecodedParams {
    fn from(params: Vec<(Param, Value)>) -> Self {
        Self(params.into_iter().map(From::from).collect())
    }
}

impl<'de> Deserialize<'de> for Param {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let entry = ParamEntry::deserialize(deserializer)?;

        param_from_entry(entry).map_err(de::Error::custom)
    }
}

impl Serialize for Param {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let components = tuple_components(&self.type_);

        let fields = 2 + components.is_some() as usize + self.indexed.is_some() as usize;
        let mut st = serializer.serialize_struct("Param", fields)?;

        st.serialize_field("name", &self.name)?;
        st.serialize_field("type", &json_type_name(&self.type_))?;

        if let Some(components) = components {
            let components: Vec<Param> = components
                .iter()
                .map(|(name, ty)| Param {
                    name: name.clone(),
                    type_: ty.clone(),
                    indexed: None,
                })
                .collect();

            st.serialize_field("components", &components)?;
        }

        if let Some(indexed) = self.indexed {
            st.serialize_field("indexed", &indexed)?;
        }

        st.end()
    }
}

#[derive(serde::Deserialize)]
struct ParamEntry {
    name: Option<String>,
    #[serde(rename = "type")]
    type_: String,
    components: Option<Vec<ParamEntry>>,
    indexed: Option<bool>,
}

fn param_from_entry(entry: ParamEntry) -> Result<Param, AbiError> {
    let ty = entry.type_.parse::<Type>()?;

    let ty = match entry.components {
        None => ty,
        Some(components) => {
            let components = components
                .into_iter()
                .map(|entry| param_from_entry(entry).map(|param| (param.name, param.type_)))
                .collect::<Result<Vec<_>, _>>()?;

            with_tuple_components(ty, components)?
        }
    };

    Ok(Param {
        name: entry.name.unwrap_or_default(),
        type_: ty,
        indexed: entry.indexed,
    })
}

// components attach to the innermost tuple of an array type
fn with_tuple_components(ty: Type, components: Vec<(String, Type)>) -> Result<Type, AbiError> {
    match ty {
        Type::Tuple(_) => Ok(Type::Tuple(components)),
        Type::Array(inner) => Ok(Type::Array(Box::new(with_tuple_components(
            *inner, components,
        )?))),
        Type::FixedArray(inner, size) => Ok(Type::FixedArray(
            Box::new(with_tuple_components(*inner, components)?),
            size,
        )),
        other => Err(AbiError::InvalidType(format!(
            "components given for non-tuple type {}",
            other
        ))),
    }
}

fn tuple_components(ty: &Type) -> Option<&Vec<(String, Type)>> {
    match ty {
        Type::Tuple(components) => Some(components),
        Type::Array(inner) => tuple_components(inner),
        Type::FixedArray(inner, _) => tuple_components(inner),
        _ => None,
    }
}

// JSON ABI type strings spell tuples as "tuple", not by their components
fn json_type_name(ty: &Type) -> String {
    match ty {
        Type::Tuple(_) => "tuple".to_string(),
        Type::Array(inner) => format!("{}[]", json_type_name(inner)),
        Type::FixedArray(inner, size) => format!("{}[{}]", json_type_name(inner), size),
        other => other.to_string(),
    }
}
