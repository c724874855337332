pub mod command;
pub mod gateway;

pub use command::{BlastCommand, CommandBuilder, OutputTarget};
pub use gateway::BlastGateway;
