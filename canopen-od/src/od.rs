// Object dictionary registration for every configured entity

use log::{debug, trace, warn};

use crate::action::{Action, ValueRange};
use crate::error::CompileError;
use crate::model::{EntityConfig, EntityDescriptor, TemplateEntityConfig};

/// Default minimum of a sized entity
pub const DEFAULT_MIN_VALUE: f64 = 0.0;

/// Largest valid value of a 1 byte entity. 255 is reserved for "not available".
pub const MAX_VALUE_U8: f64 = 254.0;

/// Largest valid value of a 2 byte entity. 65535 is reserved for "not available".
pub const MAX_VALUE_U16: f64 = 65534.0;

/// Referenced entities sorted by index, with unique indices
pub(crate) fn sorted_entities<'a>(
    descriptors: &'a [EntityDescriptor],
) -> Result<Vec<&'a EntityConfig>, CompileError> {
    let mut entities = descriptors
        .iter()
        .filter_map(|descriptor| match descriptor {
            EntityDescriptor::Referenced(entity) => Some(entity),
            EntityDescriptor::Template(_) => None,
        })
        .collect::<Vec<&EntityConfig>>();

    entities.sort_by_key(|entity| entity.index);

    if let Some(pair) = entities.windows(2).find(|pair| pair[0].index == pair[1].index) {
        return Err(CompileError::DuplicateIndex {
            index: pair[0].index,
        });
    }

    Ok(entities)
}

/// Build the object dictionary registration actions.
///
/// Referenced entities are emitted in ascending index order, template entities follow in
/// declaration order.
pub fn build_object_dictionary(descriptors: &[EntityDescriptor]) -> Result<Vec<Action>, CompileError> {
    let entities = sorted_entities(descriptors)?;

    let mut actions = entities.iter().map(|entity| register_entity(entity)).collect::<Vec<Action>>();

    for descriptor in descriptors {
        match descriptor {
            EntityDescriptor::Referenced(_) => {}
            EntityDescriptor::Template(template) => register_template(template, &mut actions)?,
        }
    }

    debug!(
        "Object dictionary: {} entities, {} actions",
        descriptors.len(),
        actions.len()
    );

    Ok(actions)
}

/// Range applied to an entity, if its size has one
pub fn value_range(entity: &EntityConfig) -> Option<ValueRange> {
    let max_default = match entity.size {
        Some(1) => MAX_VALUE_U8,
        Some(2) => MAX_VALUE_U16,
        _ => return None,
    };

    let size = entity.size?;
    let min = entity.min_value.unwrap_or(DEFAULT_MIN_VALUE);
    let max = entity.max_value.unwrap_or(max_default);

    if entity.max_value.map_or(false, |max| max > max_default) {
        warn!(
            "Entity '{}' ({:#06X}): max_value {} overlaps the reserved 'not available' value",
            entity.entity, entity.index, max
        );
    }

    Some(ValueRange { size, min, max })
}

fn register_entity(entity: &EntityConfig) -> Action {
    let range = value_range(entity);

    trace!(
        "Register entity '{}' at {:#06X} (tpdo {}, range {:?})",
        entity.entity,
        entity.index,
        entity.tpdo(),
        range
    );

    Action::RegisterEntity {
        entity: entity.entity.clone(),
        index: entity.index,
        tpdo: entity.tpdo(),
        range,
    }
}

fn register_template(template: &TemplateEntityConfig, actions: &mut Vec<Action>) -> Result<(), CompileError> {
    let index = template.index;
    let tpdo = template.tpdo();

    trace!(
        "Register template entity at {:#06X}: {} states, {} commands",
        index,
        template.states.len(),
        template.commands.len()
    );

    if let Some(metadata) = &template.metadata {
        actions.push(Action::RegisterTemplateMetadata {
            index,
            metadata: metadata.clone(),
        });
    }

    // States are never packed, each one is a standalone object at offset 0
    for (position, state) in template.states.iter().enumerate() {
        let subindex = u8::try_from(position + 1).map_err(|_| CompileError::TableFull {
            table: "Template state table",
            entries: template.states.len(),
        })?;

        actions.push(Action::RegisterState {
            index,
            subindex,
            data_type: state.data_type,
            type_code: state.data_type.code(),
            offset: 0,
            size: state.data_type.size(),
            tpdo,
        });
    }

    for command in &template.commands {
        actions.push(Action::RegisterCommand {
            index,
            tpdo,
            handler: command.handler.clone(),
        });
    }

    Ok(())
}
