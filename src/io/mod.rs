pub mod config_io;
pub mod dir_store;
pub mod local;
pub mod memory;
pub mod remote;
pub mod sync;
