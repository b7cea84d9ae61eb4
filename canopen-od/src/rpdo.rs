// Receive PDO mapping: groups the command bindings of all entities per (peer node, PDO) and
// lays them out as a gapless sequence of one byte slots.

use log::{debug, trace};

use crate::action::Action;
use crate::error::CompileError;
use crate::model::{CommandId, EntityConfig};
use crate::types::NodeId;

/// An RPDO binding tagged with the index of the entity owning it
#[derive(Debug, Clone, Copy, PartialEq)]
struct EntityBinding {
    node_id: NodeId,
    tpdo: u8,
    offset: u8,
    cmd: CommandId,
    entity_index: u16,
}

impl EntityBinding {
    fn key(&self) -> (NodeId, u8, u8) {
        (self.node_id, self.tpdo, self.offset)
    }
}

/// All bindings sharing a (peer node, PDO) pair
struct RpdoGroup {
    id: u16,
    node_id: NodeId,
    tpdo: u8,
    bindings: Vec<EntityBinding>,
}

impl RpdoGroup {
    fn compile(self, actions: &mut Vec<Action>) -> Result<(), CompileError> {
        let group = self.id;

        actions.push(Action::BeginGroup {
            group,
            node_id: self.node_id,
            tpdo: self.tpdo,
        });

        // Next unmapped byte of the payload
        let mut cursor: u16 = 0;
        let mut last_offset: Option<u8> = None;

        for binding in &self.bindings {
            let offset = u16::from(binding.offset);

            if offset < cursor {
                return Err(if last_offset == Some(binding.offset) {
                    CompileError::DuplicateOffset {
                        node_id: self.node_id,
                        tpdo: self.tpdo,
                        offset: binding.offset,
                    }
                } else {
                    CompileError::InvalidOffset {
                        node_id: self.node_id,
                        tpdo: self.tpdo,
                        offset: binding.offset,
                        cursor,
                    }
                });
            }

            if offset > cursor {
                // offset <= u8::MAX, so the gap fits in a byte
                let bytes = (offset - cursor) as u8;
                actions.push(Action::InsertPadding { group, bytes });
                cursor = offset;
            }

            actions.push(Action::BindCommand {
                group,
                entity_index: binding.entity_index,
                cmd: binding.cmd,
            });
            cursor += 1;
            last_offset = Some(binding.offset);
        }

        trace!(
            "RPDO group {} (node {}, tpdo {}): {} bytes",
            group,
            self.node_id,
            self.tpdo,
            cursor
        );

        Ok(())
    }
}

fn flatten<'a, I>(entities: I) -> Vec<EntityBinding>
where
    I: IntoIterator<Item = &'a EntityConfig>,
{
    entities
        .into_iter()
        .flat_map(|entity| {
            entity.rpdo.iter().map(move |rpdo| EntityBinding {
                node_id: rpdo.node_id,
                tpdo: rpdo.tpdo,
                offset: rpdo.offset,
                cmd: rpdo.cmd,
                entity_index: entity.index,
            })
        })
        .collect()
}

fn group(mut bindings: Vec<EntityBinding>) -> Result<Vec<RpdoGroup>, CompileError> {
    bindings.sort_by_key(EntityBinding::key);

    let mut groups: Vec<RpdoGroup> = Vec::new();

    for binding in bindings {
        match groups.last_mut() {
            Some(last) if last.node_id == binding.node_id && last.tpdo == binding.tpdo => {
                last.bindings.push(binding);
            }
            _ => {
                let id = u16::try_from(groups.len()).map_err(|_| CompileError::TableFull {
                    table: "RPDO group table",
                    entries: groups.len() + 1,
                })?;

                groups.push(RpdoGroup {
                    id,
                    node_id: binding.node_id,
                    tpdo: binding.tpdo,
                    bindings: vec![binding],
                });
            }
        }
    }

    Ok(groups)
}

/// Compile the RPDO mapping of a set of entities.
///
/// Groups are numbered from 0 in ascending (node id, tpdo) order. Within a group every byte up
/// to the last mapped offset is accounted for, unmapped bytes become padding.
pub fn compile_rpdo<'a, I>(entities: I) -> Result<Vec<Action>, CompileError>
where
    I: IntoIterator<Item = &'a EntityConfig>,
{
    let groups = group(flatten(entities))?;
    let num_groups = groups.len();

    let mut actions = Vec::new();
    for rpdo_group in groups {
        rpdo_group.compile(&mut actions)?;
    }

    debug!("RPDO: {} groups, {} actions", num_groups, actions.len());

    Ok(actions)
}
