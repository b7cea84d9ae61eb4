//
// check.rs
//
// @date Oct 19 2026
//

use crate::{CommandContext, OutputFormat};

use canopen_od::{compile, CompiledConfig, DeviceConfig};

use anyhow::Context;

/// Counts reported by a successful check
#[derive(Debug, PartialEq, Eq)]
pub struct Summary {
    pub node_id: u8,
    pub entities: usize,
    pub template_entities: usize,
    pub rpdo_groups: usize,
    pub actions: usize,
}

impl Summary {
    pub fn new(config: &DeviceConfig, compiled: &CompiledConfig) -> Self {
        Self {
            node_id: compiled.node_id.as_raw(),
            entities: config.entities.len(),
            template_entities: config.template_entities.len(),
            rpdo_groups: compiled.num_groups(),
            actions: compiled.actions().count(),
        }
    }
}

pub fn run(ctx: CommandContext) -> anyhow::Result<()> {
    let compiled = compile(&ctx.config)
        .with_context(|| format!("Failed to compile {}", ctx.path.display()))?;

    let summary = Summary::new(&ctx.config, &compiled);

    match ctx.format {
        OutputFormat::Text => println!(
            "{}: OK (node {}, {} entities, {} template entities, {} RPDO groups, {} actions)",
            ctx.path.display(),
            summary.node_id,
            summary.entities,
            summary.template_entities,
            summary.rpdo_groups,
            summary.actions
        ),
        OutputFormat::Json => println!(
            "{}",
            serde_json::json!({
                "node_id": summary.node_id,
                "entities": summary.entities,
                "template_entities": summary.template_entities,
                "rpdo_groups": summary.rpdo_groups,
                "actions": summary.actions,
            })
        ),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_counts() {
        let config: DeviceConfig = r#"
        node_id = 9

        [[entities]]
        id = "a"
        index = 1
        rpdo = [{ node_id = 2, tpdo = 1, offset = 0, cmd = 1 }, { node_id = 2, tpdo = 2, offset = 0, cmd = 2 }]

        [[template_entities]]
        index = 2
        states = [{ type = "float" }]
        "#
        .parse()
        .unwrap();

        let compiled = compile(&config).unwrap();
        assert_eq!(
            Summary::new(&config, &compiled),
            Summary {
                node_id: 9,
                entities: 1,
                template_entities: 1,
                rpdo_groups: 2,
                actions: 6,
            }
        );
    }

    #[test]
    fn demo_configuration_compiles() {
        let config: DeviceConfig = include_str!("../../demos/node.toml").parse().unwrap();
        let compiled = compile(&config).unwrap();

        let summary = Summary::new(&config, &compiled);
        assert_eq!(summary.node_id, 4);
        assert_eq!(summary.rpdo_groups, 2);
    }
}
