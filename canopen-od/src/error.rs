use std::io;

use thiserror::Error;

use crate::types::NodeId;

/// Errors loading a device configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("File Error: '{0}'")]
    FileError(#[from] io::Error),
    #[error("Could not parse device configuration: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Configuration defects found while compiling. All of them abort the compilation.
#[derive(Debug, Error, PartialEq)]
pub enum CompileError {
    #[error("All entity indices must be unique: index {index:#06X} is used more than once")]
    DuplicateIndex { index: u16 },
    #[error("RPDO (node {node_id}, tpdo {tpdo}): offset {offset} is claimed by more than one command")]
    DuplicateOffset { node_id: NodeId, tpdo: u8, offset: u8 },
    #[error("RPDO (node {node_id}, tpdo {tpdo}): invalid offset {offset}, bytes up to {cursor} are already mapped")]
    InvalidOffset {
        node_id: NodeId,
        tpdo: u8,
        offset: u8,
        cursor: u16,
    },
    #[error("{table} holds {entries} entries, more than can be numbered")]
    TableFull { table: &'static str, entries: usize },
}

/// An emission adapter failed to apply an action
#[derive(Debug, Error)]
pub enum EmitError<E>
where
    E: std::error::Error + 'static,
{
    #[error("Failed to emit action #{position} ({action}): {source}")]
    Rejected {
        position: usize,
        action: String,
        #[source]
        source: E,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_index_message() {
        let e = CompileError::DuplicateIndex { index: 0x2001 };
        assert_eq!(
            e.to_string(),
            "All entity indices must be unique: index 0x2001 is used more than once"
        );
    }

    #[test]
    fn table_full_message() {
        let e = CompileError::TableFull {
            table: "Heartbeat consumer table",
            entries: 256,
        };
        assert_eq!(e.to_string(), "Heartbeat consumer table holds 256 entries, more than can be numbered");
    }

    #[test]
    fn config_error_from_toml() {
        let toml_err = toml::from_str::<toml::Table>("node_id = ").unwrap_err();
        let e: ConfigError = toml_err.into();
        assert!(matches!(e, ConfigError::ParseError(_)));
    }

    #[test]
    fn config_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "missing");
        let e: ConfigError = io_err.into();
        assert!(matches!(e, ConfigError::FileError(_)));
    }
}
