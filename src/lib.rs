//
// lib.rs
//
// @date Oct 19 2026
//
pub mod action;
pub mod format;

use std::{path::PathBuf, str::FromStr};

use canopen_od::{DeviceConfig, NodeId};
use clap::{Parser, Subcommand, ValueEnum};
use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum CanodcParseErrors {
    #[error("Invalid RPDO group '{0}', expected NODE:TPDO")]
    InvalidGroup(String),
}

/// Selects one RPDO group by the peer node and PDO number that source it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupFilter {
    pub node_id: NodeId,
    pub tpdo: u8,
}

impl GroupFilter {
    pub fn matches(&self, node_id: NodeId, tpdo: u8) -> bool {
        self.node_id == node_id && self.tpdo == tpdo
    }
}

impl FromStr for GroupFilter {
    type Err = CanodcParseErrors;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lazy_static! {
            static ref RE_GROUP: Regex = Regex::new(r"^\s*(\d{1,3})\s*:\s*(\d{1,3})\s*$").unwrap();
        }

        // Takes the form NODE:TPDO, e.g. 3:1
        let invalid = || CanodcParseErrors::InvalidGroup(s.to_owned());

        let caps = RE_GROUP.captures(s).ok_or_else(invalid)?;
        let (_, [node_id, tpdo]) = caps.extract();

        let node_id = node_id.parse::<u8>().map_err(|_| invalid())?;
        let tpdo = tpdo.parse::<u8>().map_err(|_| invalid())?;

        Ok(GroupFilter {
            node_id: node_id.into(),
            tpdo,
        })
    }
}

/// Output format of the printed actions
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One human readable line per item
    Text,
    /// One JSON object per line
    Json,
}

/// canodc compiles a CANopen device configuration into object dictionary and PDO mapping actions
#[derive(Parser, Debug)]
#[command(version, about = "CANopen object dictionary compiler")]
pub struct Args {
    /// Device configuration file (TOML)
    pub config: PathBuf,
    #[command(subcommand)]
    pub cmd: Command,
    #[arg(short = 'f', long = "format", value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Command to run
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print every registration action in emission order
    Compile(action::compile::Args),
    /// Validate the configuration and print a summary
    Check,
    /// Print the byte layout of each received PDO
    Mapping(action::mapping::Args),
}

/// Subcommand context
pub struct CommandContext {
    pub config: DeviceConfig,
    pub path: PathBuf,
    pub format: OutputFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_filter() {
        let filter = GroupFilter::from_str("3:1").unwrap();
        assert_eq!(
            filter,
            GroupFilter {
                node_id: 3.into(),
                tpdo: 1
            }
        );
        assert!(filter.matches(3.into(), 1));
        assert!(!filter.matches(3.into(), 2));
    }

    #[test]
    fn group_filter_with_spaces() {
        let filter = GroupFilter::from_str(" 12 : 4 ").unwrap();
        assert_eq!(filter.node_id, NodeId::from(12));
        assert_eq!(filter.tpdo, 4);
    }

    #[test]
    fn group_filter_invalid() {
        assert_eq!(
            GroupFilter::from_str("3"),
            Err(CanodcParseErrors::InvalidGroup(String::from("3")))
        );
        assert!(GroupFilter::from_str("a:1").is_err());
        assert!(GroupFilter::from_str("300:1").is_err());
    }

    #[test]
    fn parse_args() {
        let args = Args::try_parse_from(["canodc", "node.toml", "-f", "json", "mapping", "--group", "3:1"]).unwrap();

        assert_eq!(args.config, PathBuf::from("node.toml"));
        assert_eq!(args.format, OutputFormat::Json);
        assert!(matches!(args.cmd, Command::Mapping(_)));
    }
}
