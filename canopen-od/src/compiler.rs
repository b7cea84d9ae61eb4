// Runs every compilation stage over a device configuration

use log::{debug, warn};
use serde::Serialize;

use crate::action::Action;
use crate::comms;
use crate::emit::Emitter;
use crate::error::{CompileError, EmitError};
use crate::model::{CommandId, DeviceConfig};
use crate::od;
use crate::rpdo;
use crate::types::NodeId;

/// Payload size of a classic CAN frame
pub const MAX_PDO_BYTES: usize = 8;

/// Output of a successful compilation
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledConfig {
    pub node_id: NodeId,
    od: Vec<Action>,
    rpdo: Vec<Action>,
    comms: Vec<Action>,
}

/// A byte of an RPDO payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Slot {
    Padding,
    Command { entity_index: u16, cmd: CommandId },
}

/// Byte layout of one received PDO
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RpdoLayout {
    pub group: u16,
    pub node_id: NodeId,
    pub tpdo: u8,
    pub slots: Vec<Slot>,
}

impl RpdoLayout {
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Compile a device configuration into its registration actions.
///
/// Either every stage succeeds or nothing is returned, so no emitter ever sees part of a
/// configuration.
pub fn compile(config: &DeviceConfig) -> Result<CompiledConfig, CompileError> {
    let descriptors = config.descriptors();

    let od = od::build_object_dictionary(&descriptors)?;
    let entities = od::sorted_entities(&descriptors)?;
    let rpdo = rpdo::compile_rpdo(entities)?;

    let mut comms = comms::register_csdo(&config.csdo)?;
    comms.extend(comms::register_heartbeat_consumers(&config.heartbeat)?);

    debug!(
        "Node {}: compiled {} OD, {} RPDO and {} comms actions",
        config.node_id,
        od.len(),
        rpdo.len(),
        comms.len()
    );

    Ok(CompiledConfig {
        node_id: config.node_id,
        od,
        rpdo,
        comms,
    })
}

impl CompiledConfig {
    pub fn od_actions(&self) -> &[Action] {
        &self.od
    }

    pub fn rpdo_actions(&self) -> &[Action] {
        &self.rpdo
    }

    pub fn comms_actions(&self) -> &[Action] {
        &self.comms
    }

    /// Every action in emission order: object dictionary, RPDO mapping, comms tables
    pub fn actions(&self) -> impl Iterator<Item = &Action> {
        self.od.iter().chain(self.rpdo.iter()).chain(self.comms.iter())
    }

    pub fn num_groups(&self) -> usize {
        self.rpdo
            .iter()
            .filter(|action| matches!(action, Action::BeginGroup { .. }))
            .count()
    }

    /// Apply every action to `emitter`, stopping at the first one it rejects
    pub fn emit<E: Emitter>(&self, mut emitter: E) -> Result<(), EmitError<E::Error>> {
        for (position, action) in self.actions().enumerate() {
            emitter.emit(action).map_err(|source| EmitError::Rejected {
                position,
                action: action.name().to_owned(),
                source,
            })?;
        }

        Ok(())
    }

    /// Byte layout of every RPDO group
    pub fn rpdo_layouts(&self) -> Vec<RpdoLayout> {
        let mut layouts: Vec<RpdoLayout> = Vec::new();

        for action in &self.rpdo {
            match *action {
                Action::BeginGroup { group, node_id, tpdo } => layouts.push(RpdoLayout {
                    group,
                    node_id,
                    tpdo,
                    slots: Vec::new(),
                }),
                Action::InsertPadding { bytes, .. } => {
                    if let Some(layout) = layouts.last_mut() {
                        layout.slots.extend((0..bytes).map(|_| Slot::Padding));
                    }
                }
                Action::BindCommand { entity_index, cmd, .. } => {
                    if let Some(layout) = layouts.last_mut() {
                        layout.slots.push(Slot::Command { entity_index, cmd });
                    }
                }
                _ => {}
            }
        }

        for layout in layouts.iter().filter(|layout| layout.len() > MAX_PDO_BYTES) {
            warn!(
                "RPDO (node {}, tpdo {}) maps {} bytes, more than a classic CAN frame carries",
                layout.node_id,
                layout.tpdo,
                layout.len()
            );
        }

        layouts
    }
}
