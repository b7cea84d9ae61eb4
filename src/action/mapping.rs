//
// mapping.rs
//
// @date Oct 19 2026
//

use crate::format::{IndexFormatMode, LayoutFormatter};
use crate::{CommandContext, GroupFilter, OutputFormat};

use canopen_od::{compile, RpdoLayout};
use clap::Parser;

use anyhow::Context;
use log::warn;

#[derive(Parser, Debug)]
pub struct Args {
    /// Only show the RPDO sourced by NODE:TPDO
    #[arg(short = 'g', long = "group", value_parser = clap::value_parser!(GroupFilter))]
    pub group: Option<GroupFilter>,
    /// Print object dictionary indices in hexadecimal
    #[arg(long = "hex")]
    pub hex: bool,
}

fn select(layouts: Vec<RpdoLayout>, filter: Option<GroupFilter>) -> Vec<RpdoLayout> {
    match filter {
        Some(filter) => layouts
            .into_iter()
            .filter(|layout| filter.matches(layout.node_id, layout.tpdo))
            .collect(),
        None => layouts,
    }
}

pub fn run(ctx: CommandContext, args: Args) -> anyhow::Result<()> {
    let compiled = compile(&ctx.config)
        .with_context(|| format!("Failed to compile {}", ctx.path.display()))?;

    let layouts = select(compiled.rpdo_layouts(), args.group);
    if layouts.is_empty() {
        warn!("No RPDO mapping matches the selection");
    }

    let mode = if args.hex { IndexFormatMode::Hex } else { IndexFormatMode::Decimal };

    for layout in &layouts {
        match ctx.format {
            OutputFormat::Text => {
                let fmt: LayoutFormatter = (layout, mode).into();
                println!("{}", fmt);
            }
            OutputFormat::Json => println!("{}", serde_json::to_string(layout)?),
        }
    }

    Ok(())
}
