// SDO client and heartbeat consumer tables

use std::collections::BTreeSet;

use log::warn;

use crate::action::Action;
use crate::error::CompileError;
use crate::model::{CsdoConfig, HeartbeatConfig};
use crate::types::NodeId;

/// SDO client channels, numbered from 0 in declaration order
pub fn register_csdo(csdo: &[CsdoConfig]) -> Result<Vec<Action>, CompileError> {
    warn_repeated("CSDO", csdo.iter().map(|c| c.node_id));

    csdo.iter()
        .enumerate()
        .map(|(position, c)| {
            Ok(Action::RegisterCsdo {
                slot: slot_number("CSDO table", position, csdo.len())?,
                node_id: c.node_id,
            })
        })
        .collect()
}

/// Heartbeat consumers, numbered from 1 in declaration order (sub-index 0 holds the count)
pub fn register_heartbeat_consumers(heartbeat: &[HeartbeatConfig]) -> Result<Vec<Action>, CompileError> {
    warn_repeated("Heartbeat consumer", heartbeat.iter().map(|h| h.node_id));

    heartbeat
        .iter()
        .enumerate()
        .map(|(position, h)| {
            Ok(Action::RegisterHeartbeatConsumer {
                slot: slot_number("Heartbeat consumer table", position + 1, heartbeat.len())?,
                node_id: h.node_id,
                timeout_ms: h.timeout_ms,
            })
        })
        .collect()
}

/// Slots are single byte sub-indices
fn slot_number(table: &'static str, slot: usize, entries: usize) -> Result<u8, CompileError> {
    u8::try_from(slot).map_err(|_| CompileError::TableFull { table, entries })
}

fn warn_repeated<I: Iterator<Item = NodeId>>(table: &str, nodes: I) {
    let mut seen = BTreeSet::new();
    for node_id in nodes {
        if !seen.insert(node_id) {
            warn!("{} table lists node {} more than once", table, node_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csdo_slots_start_at_zero() {
        let csdo = vec![CsdoConfig { node_id: 7.into() }, CsdoConfig { node_id: 2.into() }];

        assert_eq!(
            register_csdo(&csdo).unwrap(),
            vec![
                Action::RegisterCsdo {
                    slot: 0,
                    node_id: 7.into()
                },
                Action::RegisterCsdo {
                    slot: 1,
                    node_id: 2.into()
                },
            ]
        );
    }

    #[test]
    fn heartbeat_slots_start_at_one() {
        let heartbeat = vec![
            HeartbeatConfig {
                node_id: 3.into(),
                timeout_ms: 1500,
            },
            HeartbeatConfig {
                node_id: 3.into(),
                timeout_ms: 500,
            },
        ];

        let actions = register_heartbeat_consumers(&heartbeat).unwrap();
        assert_eq!(
            actions[0],
            Action::RegisterHeartbeatConsumer {
                slot: 1,
                node_id: 3.into(),
                timeout_ms: 1500
            }
        );
        assert!(matches!(actions[1], Action::RegisterHeartbeatConsumer { slot: 2, .. }));
    }

    #[test]
    fn empty_tables() {
        assert!(register_csdo(&[]).unwrap().is_empty());
        assert!(register_heartbeat_consumers(&[]).unwrap().is_empty());
    }

    #[test]
    fn csdo_table_fills_every_slot() {
        let csdo = vec![CsdoConfig { node_id: 1.into() }; 256];

        let actions = register_csdo(&csdo).unwrap();
        assert_eq!(actions.len(), 256);
        assert!(matches!(actions[255], Action::RegisterCsdo { slot: 255, .. }));
    }

    #[test]
    fn csdo_table_overflow_rejected() {
        let csdo = vec![CsdoConfig { node_id: 1.into() }; 257];

        assert_eq!(
            register_csdo(&csdo),
            Err(CompileError::TableFull {
                table: "CSDO table",
                entries: 257
            })
        );
    }

    #[test]
    fn heartbeat_table_overflow_rejected() {
        let entry = HeartbeatConfig {
            node_id: 4.into(),
            timeout_ms: 100,
        };

        let actions = register_heartbeat_consumers(&vec![entry.clone(); 255]).unwrap();
        assert!(matches!(actions[254], Action::RegisterHeartbeatConsumer { slot: 255, .. }));

        assert_eq!(
            register_heartbeat_consumers(&vec![entry; 256]),
            Err(CompileError::TableFull {
                table: "Heartbeat consumer table",
                entries: 256
            })
        );
    }
}
