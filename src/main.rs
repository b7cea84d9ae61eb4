//
// main.rs
//
// @date Oct 19 2026
//

use anyhow::Context;
use clap::Parser;

use canodc::{action, Args, Command, CommandContext};
use canopen_od::DeviceConfig;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    let config = DeviceConfig::from_path(&args.config)
        .with_context(|| format!("Failed to load device configuration {}", args.config.display()))?;

    let ctx = CommandContext {
        config,
        path: args.config,
        format: args.format,
    };

    match args.cmd {
        Command::Compile(args) => action::compile::run(ctx, args),
        Command::Check => action::check::run(ctx),
        Command::Mapping(args) => action::mapping::run(ctx, args),
    }
}
