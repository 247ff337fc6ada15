//! User-facing parameter types.
//!
//! These provide an ergonomic Rust view of a parameter delta pulled out of
//! an event. They convert to/from the wire format types for CDR
//! serialization.

use crate::wire::{WireParameter, WireParameterValue, parameter_type};

/// The type of a parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterType {
    NotSet,
    Bool,
    Integer,
    Double,
    String,
    ByteArray,
    BoolArray,
    IntegerArray,
    DoubleArray,
    StringArray,
}

impl ParameterType {
    pub fn to_u8(self) -> u8 {
        match self {
            Self::NotSet => parameter_type::NOT_SET,
            Self::Bool => parameter_type::BOOL,
            Self::Integer => parameter_type::INTEGER,
            Self::Double => parameter_type::DOUBLE,
            Self::String => parameter_type::STRING,
            Self::ByteArray => parameter_type::BYTE_ARRAY,
            Self::BoolArray => parameter_type::BOOL_ARRAY,
            Self::IntegerArray => parameter_type::INTEGER_ARRAY,
            Self::DoubleArray => parameter_type::DOUBLE_ARRAY,
            Self::StringArray => parameter_type::STRING_ARRAY,
        }
    }

    pub fn from_u8(v: u8) -> Self {
        match v {
            parameter_type::BOOL => Self::Bool,
            parameter_type::INTEGER => Self::Integer,
            parameter_type::DOUBLE => Self::Double,
            parameter_type::STRING => Self::String,
            parameter_type::BYTE_ARRAY => Self::ByteArray,
            parameter_type::BOOL_ARRAY => Self::BoolArray,
            parameter_type::INTEGER_ARRAY => Self::IntegerArray,
            parameter_type::DOUBLE_ARRAY => Self::DoubleArray,
            parameter_type::STRING_ARRAY => Self::StringArray,
            _ => Self::NotSet,
        }
    }
}

/// A typed parameter value. `NotSet` doubles as the sentinel handed to
/// callbacks when a parameter is deleted.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ParameterValue {
    #[default]
    NotSet,
    Bool(bool),
    Integer(i64),
    Double(f64),
    String(std::string::String),
    ByteArray(Vec<u8>),
    BoolArray(Vec<bool>),
    IntegerArray(Vec<i64>),
    DoubleArray(Vec<f64>),
    StringArray(Vec<std::string::String>),
}

impl ParameterValue {
    /// Returns the parameter type of this value.
    pub fn parameter_type(&self) -> ParameterType {
        match self {
            Self::NotSet => ParameterType::NotSet,
            Self::Bool(_) => ParameterType::Bool,
            Self::Integer(_) => ParameterType::Integer,
            Self::Double(_) => ParameterType::Double,
            Self::String(_) => ParameterType::String,
            Self::ByteArray(_) => ParameterType::ByteArray,
            Self::BoolArray(_) => ParameterType::BoolArray,
            Self::IntegerArray(_) => ParameterType::IntegerArray,
            Self::DoubleArray(_) => ParameterType::DoubleArray,
            Self::StringArray(_) => ParameterType::StringArray,
        }
    }

    /// Convert to wire format.
    pub fn to_wire(&self) -> WireParameterValue {
        let mut wire = WireParameterValue {
            r#type: self.parameter_type().to_u8(),
            ..Default::default()
        };
        match self {
            Self::NotSet => {}
            Self::Bool(v) => wire.bool_value = *v,
            Self::Integer(v) => wire.integer_value = *v,
            Self::Double(v) => wire.double_value = *v,
            Self::String(v) => wire.string_value = v.clone(),
            Self::ByteArray(v) => wire.byte_array_value = v.clone(),
            Self::BoolArray(v) => wire.bool_array_value = v.clone(),
            Self::IntegerArray(v) => wire.integer_array_value = v.clone(),
            Self::DoubleArray(v) => wire.double_array_value = v.clone(),
            Self::StringArray(v) => wire.string_array_value = v.clone(),
        }
        wire
    }

    /// Convert from wire format. Unknown discriminants map to `NotSet`.
    pub fn from_wire(wire: &WireParameterValue) -> Self {
        match wire.r#type {
            parameter_type::BOOL => Self::Bool(wire.bool_value),
            parameter_type::INTEGER => Self::Integer(wire.integer_value),
            parameter_type::DOUBLE => Self::Double(wire.double_value),
            parameter_type::STRING => Self::String(wire.string_value.clone()),
            parameter_type::BYTE_ARRAY => Self::ByteArray(wire.byte_array_value.clone()),
            parameter_type::BOOL_ARRAY => Self::BoolArray(wire.bool_array_value.clone()),
            parameter_type::INTEGER_ARRAY => Self::IntegerArray(wire.integer_array_value.clone()),
            parameter_type::DOUBLE_ARRAY => Self::DoubleArray(wire.double_array_value.clone()),
            parameter_type::STRING_ARRAY => Self::StringArray(wire.string_array_value.clone()),
            _ => Self::NotSet,
        }
    }
}

/// A parameter with its name and value.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: std::string::String,
    pub value: ParameterValue,
}

impl Parameter {
    pub fn new(name: impl Into<std::string::String>, value: ParameterValue) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    pub fn to_wire(&self) -> WireParameter {
        WireParameter {
            name: self.name.clone(),
            value: self.value.to_wire(),
        }
    }

    pub fn from_wire(wire: &WireParameter) -> Self {
        Self {
            name: wire.name.clone(),
            value: ParameterValue::from_wire(&wire.value),
        }
    }
}
