//
// compile.rs
//
// @date Oct 19 2026
//

use crate::format::{ActionFormatter, IndexFormatMode};
use crate::{CommandContext, OutputFormat};

use canopen_od::{compile, Action, Emitter};
use clap::Parser;

use anyhow::Context;
use log::info;
use std::io::{self, Write};

#[derive(Parser, Debug)]
pub struct Args {
    /// Print object dictionary indices in hexadecimal
    #[arg(long = "hex")]
    pub hex: bool,
}

/// Writes one formatted line per action
pub struct TextEmitter<W: Write> {
    out: W,
    mode: IndexFormatMode,
}

impl<W: Write> TextEmitter<W> {
    pub fn new(out: W, mode: IndexFormatMode) -> Self {
        Self { out, mode }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Emitter for TextEmitter<W> {
    type Error = io::Error;

    fn emit(&mut self, action: &Action) -> Result<(), Self::Error> {
        let fmt: ActionFormatter = (action, self.mode).into();
        writeln!(self.out, "{}", fmt)
    }
}

/// Writes one JSON object per action
pub struct JsonEmitter<W: Write> {
    out: W,
}

impl<W: Write> JsonEmitter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Emitter for JsonEmitter<W> {
    type Error = serde_json::Error;

    fn emit(&mut self, action: &Action) -> Result<(), Self::Error> {
        serde_json::to_writer(&mut self.out, action)?;
        writeln!(self.out).map_err(serde_json::Error::io)
    }
}

pub fn run(ctx: CommandContext, args: Args) -> anyhow::Result<()> {
    let compiled = compile(&ctx.config)
        .with_context(|| format!("Failed to compile {}", ctx.path.display()))?;

    let mode = if args.hex { IndexFormatMode::Hex } else { IndexFormatMode::Decimal };
    let stdout = io::BufWriter::new(io::stdout().lock());

    let mut stdout = match ctx.format {
        OutputFormat::Text => {
            let mut emitter = TextEmitter::new(stdout, mode);
            compiled.emit(&mut emitter)?;
            emitter.into_inner()
        }
        OutputFormat::Json => {
            let mut emitter = JsonEmitter::new(stdout);
            compiled.emit(&mut emitter)?;
            emitter.into_inner()
        }
    };
    stdout.flush()?;

    info!("Emitted {} actions for node {}", compiled.actions().count(), compiled.node_id);

    Ok(())
}
