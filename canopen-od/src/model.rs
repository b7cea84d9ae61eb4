// Device configuration: the entities of a node and their process data bindings

use std::{fmt, fs, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{DataType, NodeId, Tpdo};

/// Handle of an entity defined outside of this configuration
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct EntityRef(String);

impl From<&str> for EntityRef {
    fn from(id: &str) -> Self {
        EntityRef(id.to_owned())
    }
}

impl EntityRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Command handle bound to an RPDO slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct CommandId(u8);

impl From<u8> for CommandId {
    fn from(cmd: u8) -> Self {
        CommandId(cmd)
    }
}

impl CommandId {
    pub fn as_raw(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One inbound command slot, sourced by a peer's TPDO
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RpdoBinding {
    /// Node transmitting the PDO
    pub node_id: NodeId,
    /// PDO number on the peer, reused as the local RPDO channel
    pub tpdo: u8,
    /// Byte position within the PDO payload
    pub offset: u8,
    pub cmd: CommandId,
}

/// Object dictionary entry for an externally defined entity
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntityConfig {
    #[serde(rename = "id")]
    pub entity: EntityRef,
    pub index: u16,
    /// Encoded width in bytes. Only 1 and 2 get a default numeric range.
    #[serde(default)]
    pub size: Option<u8>,
    #[serde(default)]
    pub min_value: Option<f64>,
    #[serde(default)]
    pub max_value: Option<f64>,
    #[serde(default)]
    pub tpdo: Option<u8>,
    #[serde(default)]
    pub rpdo: Vec<RpdoBinding>,
}

impl EntityConfig {
    pub fn new(entity: &str, index: u16) -> Self {
        Self {
            entity: entity.into(),
            index,
            size: None,
            min_value: None,
            max_value: None,
            tpdo: None,
            rpdo: Vec::new(),
        }
    }

    pub fn tpdo(&self) -> Tpdo {
        self.tpdo.into()
    }
}

/// State published by a template entity
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StateDescriptor {
    #[serde(rename = "type")]
    pub data_type: DataType,
}

/// Command accepted by a template entity
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandDescriptor {
    /// Handler invoked by the runtime when the command arrives
    pub handler: String,
}

/// Descriptive data attached to a template entity's index
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Metadata {
    pub entity_type: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_class: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_class: Option<String>,
}

/// Entity fully defined inline
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplateEntityConfig {
    pub index: u16,
    #[serde(default)]
    pub tpdo: Option<u8>,
    #[serde(default)]
    pub states: Vec<StateDescriptor>,
    #[serde(default)]
    pub commands: Vec<CommandDescriptor>,
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

impl TemplateEntityConfig {
    pub fn new(index: u16) -> Self {
        Self {
            index,
            tpdo: None,
            states: Vec::new(),
            commands: Vec::new(),
            metadata: None,
        }
    }

    pub fn tpdo(&self) -> Tpdo {
        self.tpdo.into()
    }
}

/// Any entity of the device
#[derive(Debug, Clone, PartialEq)]
pub enum EntityDescriptor {
    Referenced(EntityConfig),
    Template(TemplateEntityConfig),
}

impl EntityDescriptor {
    pub fn index(&self) -> u16 {
        match self {
            EntityDescriptor::Referenced(entity) => entity.index,
            EntityDescriptor::Template(entity) => entity.index,
        }
    }
}

/// SDO client channel to a peer
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CsdoConfig {
    pub node_id: NodeId,
}

/// Peer whose heartbeat is consumed
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeartbeatConfig {
    pub node_id: NodeId,
    pub timeout_ms: u16,
}

/// Complete configuration of one node
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeviceConfig {
    pub node_id: NodeId,
    #[serde(default)]
    pub entities: Vec<EntityConfig>,
    #[serde(default)]
    pub template_entities: Vec<TemplateEntityConfig>,
    #[serde(default)]
    pub csdo: Vec<CsdoConfig>,
    #[serde(default)]
    pub heartbeat: Vec<HeartbeatConfig>,
}

impl DeviceConfig {
    pub fn new(node_id: u8) -> Self {
        Self {
            node_id: node_id.into(),
            entities: Vec::new(),
            template_entities: Vec::new(),
            csdo: Vec::new(),
            heartbeat: Vec::new(),
        }
    }

    pub fn from_path<P: AsRef<Path>>(file: P) -> Result<DeviceConfig, ConfigError> {
        let s = fs::read_to_string(file)?;

        s.parse()
    }

    /// Referenced entities followed by template entities, each in declaration order
    pub fn descriptors(&self) -> Vec<EntityDescriptor> {
        self.entities
            .iter()
            .cloned()
            .map(EntityDescriptor::Referenced)
            .chain(self.template_entities.iter().cloned().map(EntityDescriptor::Template))
            .collect()
    }
}

impl FromStr for DeviceConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}
