// Compile a CANopen device configuration into object dictionary and RPDO mapping actions
//
// The compiler reads a `DeviceConfig` (usually loaded from a TOML file), checks it and turns it
// into an ordered list of `Action`s. An `Emitter` applies those actions to a runtime node.
//
//   node_id = 4
//
//   [[entities]]
//   id = "valve"
//   index = 5
//   size = 1
//   rpdo = [{ node_id = 3, tpdo = 1, offset = 0, cmd = 1 }]

pub mod action;
pub mod comms;
pub mod emit;
pub mod error;
pub mod model;
pub mod od;
pub mod rpdo;
pub mod types;

mod compiler;

pub use action::{Action, ValueRange};
pub use compiler::{compile, CompiledConfig, RpdoLayout, Slot, MAX_PDO_BYTES};
pub use emit::{ActionRecorder, Emitter};
pub use error::{CompileError, ConfigError, EmitError};
pub use model::{
    CommandDescriptor, CommandId, CsdoConfig, DeviceConfig, EntityConfig, EntityDescriptor,
    EntityRef, HeartbeatConfig, Metadata, RpdoBinding, StateDescriptor, TemplateEntityConfig,
};
pub use types::{DataType, NodeId, Tpdo};
