//! Data transfer objects exchanged with the process manager

pub mod leader;
pub mod process;
