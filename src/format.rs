//
// format.rs
//
// @date Oct 19 2026
//

use canopen_od::{Action, RpdoLayout, Slot};

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexFormatMode {
    Hex,
    Decimal,
}

impl IndexFormatMode {
    fn index(&self, index: u16) -> String {
        match self {
            IndexFormatMode::Hex => format!("{:#06X}", index),
            IndexFormatMode::Decimal => format!("{}", index),
        }
    }
}

/// Data for formatting a compiled action
pub struct ActionFormatter<'a> {
    action: &'a Action,
    mode: IndexFormatMode,
}

impl<'a> From<(&'a Action, IndexFormatMode)> for ActionFormatter<'a> {
    fn from(value: (&'a Action, IndexFormatMode)) -> Self {
        ActionFormatter {
            action: value.0,
            mode: value.1,
        }
    }
}

impl fmt::Display for ActionFormatter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<26}", self.action.name())?;

        match self.action {
            Action::RegisterEntity { entity, index, tpdo, range } => {
                write!(f, "index={} entity={} tpdo={}", self.mode.index(*index), entity, tpdo)?;
                if let Some(range) = range {
                    write!(f, " size={} min={} max={}", range.size, range.min, range.max)?;
                }
                Ok(())
            }
            Action::RegisterTemplateMetadata { index, metadata } => {
                write!(
                    f,
                    "index={} type={} name=\"{}\"",
                    self.mode.index(*index),
                    metadata.entity_type,
                    metadata.name
                )?;
                if let Some(device_class) = &metadata.device_class {
                    write!(f, " device_class={}", device_class)?;
                }
                if let Some(unit) = &metadata.unit {
                    write!(f, " unit=\"{}\"", unit)?;
                }
                if let Some(state_class) = &metadata.state_class {
                    write!(f, " state_class={}", state_class)?;
                }
                Ok(())
            }
            Action::RegisterState {
                index,
                subindex,
                data_type,
                type_code,
                offset,
                size,
                tpdo,
            } => write!(
                f,
                "index={} sub={} type={}({:#06X}) offset={} size={} tpdo={}",
                self.mode.index(*index),
                subindex,
                data_type,
                type_code,
                offset,
                size,
                tpdo
            ),
            Action::RegisterCommand { index, tpdo, handler } => write!(
                f,
                "index={} tpdo={} handler={}",
                self.mode.index(*index),
                tpdo,
                handler
            ),
            Action::BeginGroup { group, node_id, tpdo } => {
                write!(f, "group={} node={} tpdo={}", group, node_id, tpdo)
            }
            Action::InsertPadding { group, bytes } => write!(f, "group={} bytes={}", group, bytes),
            Action::BindCommand { group, entity_index, cmd } => write!(
                f,
                "group={} index={} cmd={}",
                group,
                self.mode.index(*entity_index),
                cmd
            ),
            Action::RegisterCsdo { slot, node_id } => write!(f, "slot={} node={}", slot, node_id),
            Action::RegisterHeartbeatConsumer { slot, node_id, timeout_ms } => {
                write!(f, "slot={} node={} timeout={}ms", slot, node_id, timeout_ms)
            }
        }
    }
}

/// Data for formatting the byte layout of an RPDO
pub struct LayoutFormatter<'a> {
    layout: &'a RpdoLayout,
    mode: IndexFormatMode,
}

impl<'a> From<(&'a RpdoLayout, IndexFormatMode)> for LayoutFormatter<'a> {
    fn from(value: (&'a RpdoLayout, IndexFormatMode)) -> Self {
        LayoutFormatter {
            layout: value.0,
            mode: value.1,
        }
    }
}

impl fmt::Display for LayoutFormatter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let layout = self.layout;

        write!(
            f,
            "RPDO group {} <- node {} tpdo {} [{} bytes]",
            layout.group,
            layout.node_id,
            layout.tpdo,
            layout.len()
        )?;

        for (byte, slot) in layout.slots.iter().enumerate() {
            match slot {
                Slot::Padding => write!(f, "\n  [{}] --", byte)?,
                Slot::Command { entity_index, cmd } => {
                    write!(f, "\n  [{}] index={} cmd={}", byte, self.mode.index(*entity_index), cmd)?
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use canopen_od::{DataType, Tpdo, ValueRange};

    #[test]
    fn format_register_entity() {
        let action = Action::RegisterEntity {
            entity: "valve".into(),
            index: 0x2001,
            tpdo: Tpdo::NONE,
            range: Some(ValueRange {
                size: 1,
                min: 0.0,
                max: 254.0,
            }),
        };

        let fmt: ActionFormatter = (&action, IndexFormatMode::Hex).into();
        assert_eq!(
            fmt.to_string(),
            "RegisterEntity            index=0x2001 entity=valve tpdo=-1 size=1 min=0 max=254"
        );
    }

    #[test]
    fn format_register_state() {
        let action = Action::RegisterState {
            index: 0x2010,
            subindex: 1,
            data_type: DataType::Uint16,
            type_code: DataType::Uint16.code(),
            offset: 0,
            size: 2,
            tpdo: Tpdo::from(Some(1)),
        };

        let fmt: ActionFormatter = (&action, IndexFormatMode::Hex).into();
        assert_eq!(
            fmt.to_string(),
            "RegisterState             index=0x2010 sub=1 type=uint16(0x0006) offset=0 size=2 tpdo=1"
        );
    }

    #[test]
    fn format_decimal_index() {
        let action = Action::BindCommand {
            group: 2,
            entity_index: 17,
            cmd: 4.into(),
        };

        let fmt: ActionFormatter = (&action, IndexFormatMode::Decimal).into();
        assert_eq!(fmt.to_string(), "BindCommand               group=2 index=17 cmd=4");
    }

    #[test]
    fn format_layout() {
        let layout = RpdoLayout {
            group: 0,
            node_id: 3.into(),
            tpdo: 1,
            slots: vec![
                Slot::Padding,
                Slot::Command {
                    entity_index: 5,
                    cmd: 2.into(),
                },
            ],
        };

        let fmt: LayoutFormatter = (&layout, IndexFormatMode::Decimal).into();
        assert_eq!(
            fmt.to_string(),
            "RPDO group 0 <- node 3 tpdo 1 [2 bytes]\n  [0] --\n  [1] index=5 cmd=2"
        );
    }
}
