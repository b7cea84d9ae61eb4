// Protocol level types shared by the model and the emitted actions

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// CANopen node id
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct NodeId(u8);

impl From<u8> for NodeId {
    fn from(node: u8) -> Self {
        NodeId(node)
    }
}

impl NodeId {
    pub fn as_raw(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outbound PDO number of an entity, or "not transmitted"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(into = "i16")]
pub struct Tpdo(Option<u8>);

impl Tpdo {
    /// Raw value used by the runtime when the entity is not transmitted
    pub const SENTINEL: i16 = -1;

    pub const NONE: Tpdo = Tpdo(None);

    pub fn as_raw(&self) -> i16 {
        self.0.map(i16::from).unwrap_or(Self::SENTINEL)
    }
}

impl From<Option<u8>> for Tpdo {
    fn from(value: Option<u8>) -> Self {
        Tpdo(value)
    }
}

impl From<Tpdo> for i16 {
    fn from(value: Tpdo) -> Self {
        value.as_raw()
    }
}

impl fmt::Display for Tpdo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_raw())
    }
}

/// Data types a template entity state can be encoded with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Bool,
    Int8,
    Int16,
    Int32,
    Uint8,
    Uint16,
    Uint32,
    Float,
}

#[derive(Debug, Error, PartialEq)]
pub enum DataTypeError {
    #[error("Invalid data type '{0:#06X}'")]
    Invalid(u16),
}

impl TryFrom<u16> for DataType {
    type Error = DataTypeError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            0x0001 => Ok(DataType::Bool),
            0x0002 => Ok(DataType::Int8),
            0x0003 => Ok(DataType::Int16),
            0x0004 => Ok(DataType::Int32),
            0x0005 => Ok(DataType::Uint8),
            0x0006 => Ok(DataType::Uint16),
            0x0007 => Ok(DataType::Uint32),
            0x0008 => Ok(DataType::Float),
            _ => Err(DataTypeError::Invalid(value)),
        }
    }
}

impl DataType {
    /// CiA 301 data type code
    pub fn code(&self) -> u16 {
        match *self {
            DataType::Bool => 0x0001,
            DataType::Int8 => 0x0002,
            DataType::Int16 => 0x0003,
            DataType::Int32 => 0x0004,
            DataType::Uint8 => 0x0005,
            DataType::Uint16 => 0x0006,
            DataType::Uint32 => 0x0007,
            DataType::Float => 0x0008,
        }
    }

    /// Encoded width in bytes
    pub fn size(&self) -> u8 {
        match *self {
            DataType::Bool | DataType::Int8 | DataType::Uint8 => 1,
            DataType::Int16 | DataType::Uint16 => 2,
            DataType::Int32 | DataType::Uint32 | DataType::Float => 4,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match *self {
            DataType::Bool => "bool",
            DataType::Int8 => "int8",
            DataType::Int16 => "int16",
            DataType::Int32 => "int32",
            DataType::Uint8 => "uint8",
            DataType::Uint16 => "uint16",
            DataType::Uint32 => "uint32",
            DataType::Float => "float",
        };

        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_data_type() {
        assert_eq!(DataType::try_from(0x0001), Ok(DataType::Bool));
        assert_eq!(DataType::try_from(0x0003), Ok(DataType::Int16));
        assert_eq!(DataType::try_from(0x0006), Ok(DataType::Uint16));
        assert_eq!(DataType::try_from(0x0008), Ok(DataType::Float));
        assert_eq!(DataType::try_from(0x0009), Err(DataTypeError::Invalid(0x0009)));
    }

    #[test]
    fn data_type_code_matches_conversion() {
        let all = [
            DataType::Bool,
            DataType::Int8,
            DataType::Int16,
            DataType::Int32,
            DataType::Uint8,
            DataType::Uint16,
            DataType::Uint32,
            DataType::Float,
        ];

        for data_type in all {
            assert_eq!(DataType::try_from(data_type.code()), Ok(data_type));
        }
    }

    #[test]
    fn data_type_sizes() {
        assert_eq!(DataType::Bool.size(), 1);
        assert_eq!(DataType::Uint16.size(), 2);
        assert_eq!(DataType::Int32.size(), 4);
        assert_eq!(DataType::Float.size(), 4);
    }

    #[test]
    fn tpdo_sentinel() {
        assert_eq!(Tpdo::NONE.as_raw(), -1);
        assert_eq!(Tpdo::from(Some(3)).as_raw(), 3);
        assert_eq!(Tpdo::default(), Tpdo::NONE);
    }
}
