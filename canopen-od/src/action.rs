use serde::Serialize;

use crate::model::{CommandId, EntityRef, Metadata};
use crate::types::{DataType, NodeId, Tpdo};

/// Numeric range applied to an entity encoded in 1 or 2 bytes
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValueRange {
    pub size: u8,
    pub min: f64,
    pub max: f64,
}

/// One registration step applied to the runtime node, in emission order
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "action")]
pub enum Action {
    RegisterEntity {
        entity: EntityRef,
        index: u16,
        tpdo: Tpdo,
        #[serde(skip_serializing_if = "Option::is_none")]
        range: Option<ValueRange>,
    },
    RegisterTemplateMetadata {
        index: u16,
        metadata: Metadata,
    },
    RegisterState {
        index: u16,
        /// Position of the state within its entity, starting at 1
        subindex: u8,
        data_type: DataType,
        /// CiA 301 code of `data_type`
        type_code: u16,
        offset: u8,
        size: u8,
        tpdo: Tpdo,
    },
    RegisterCommand {
        index: u16,
        tpdo: Tpdo,
        handler: String,
    },
    BeginGroup {
        group: u16,
        node_id: NodeId,
        tpdo: u8,
    },
    InsertPadding {
        group: u16,
        bytes: u8,
    },
    BindCommand {
        group: u16,
        entity_index: u16,
        cmd: CommandId,
    },
    RegisterCsdo {
        slot: u8,
        node_id: NodeId,
    },
    RegisterHeartbeatConsumer {
        slot: u8,
        node_id: NodeId,
        timeout_ms: u16,
    },
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::RegisterEntity { .. } => "RegisterEntity",
            Action::RegisterTemplateMetadata { .. } => "RegisterTemplateMetadata",
            Action::RegisterState { .. } => "RegisterState",
            Action::RegisterCommand { .. } => "RegisterCommand",
            Action::BeginGroup { .. } => "BeginGroup",
            Action::InsertPadding { .. } => "InsertPadding",
            Action::BindCommand { .. } => "BindCommand",
            Action::RegisterCsdo { .. } => "RegisterCsdo",
            Action::RegisterHeartbeatConsumer { .. } => "RegisterHeartbeatConsumer",
        }
    }
}
