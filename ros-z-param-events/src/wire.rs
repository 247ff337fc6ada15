//! Wire format types for parameter events.
//!
//! These structs match the `rcl_interfaces` message layout byte-for-byte
//! under CDR, so events produced by any ROS 2 node deserialize into them.

use serde::{Deserialize, Serialize};

/// Parameter type discriminants from rcl_interfaces/msg/ParameterType.
pub mod parameter_type {
    pub const NOT_SET: u8 = 0;
    pub const BOOL: u8 = 1;
    pub const INTEGER: u8 = 2;
    pub const DOUBLE: u8 = 3;
    pub const STRING: u8 = 4;
    pub const BYTE_ARRAY: u8 = 5;
    pub const BOOL_ARRAY: u8 = 6;
    pub const INTEGER_ARRAY: u8 = 7;
    pub const DOUBLE_ARRAY: u8 = 8;
    pub const STRING_ARRAY: u8 = 9;
}

#[derive(Debug, Serialize, Deserialize, Default, Clone, Copy, PartialEq)]
pub struct WireTime {
    pub sec: i32,
    pub nanosec: u32,
}

/// rcl_interfaces/msg/ParameterValue: every field is always present on the
/// wire, `r#type` selects which one is meaningful.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct WireParameterValue {
    pub r#type: u8,
    pub bool_value: bool,
    pub integer_value: i64,
    pub double_value: f64,
    pub string_value: String,
    pub byte_array_value: Vec<u8>,
    pub bool_array_value: Vec<bool>,
    pub integer_array_value: Vec<i64>,
    pub double_array_value: Vec<f64>,
    pub string_array_value: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct WireParameter {
    pub name: String,
    pub value: WireParameterValue,
}

/// rcl_interfaces/msg/ParameterEvent. `node` carries the fully-qualified
/// name of the node whose parameters changed.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq)]
pub struct WireParameterEvent {
    pub stamp: WireTime,
    pub node: String,
    pub new_parameters: Vec<WireParameter>,
    pub changed_parameters: Vec<WireParameter>,
    pub deleted_parameters: Vec<WireParameter>,
}

impl WireParameterEvent {
    pub fn to_cdr(&self) -> crate::Result<Vec<u8>> {
        Ok(cdr::serialize::<_, _, cdr::CdrLe>(self, cdr::Infinite)?)
    }

    pub fn from_cdr(bytes: &[u8]) -> crate::Result<Self> {
        Ok(cdr::deserialize(bytes)?)
    }
}
