pub mod collection;
pub mod config;
pub mod entry;
pub mod todo_list;

pub use collection::*;
pub use config::*;
pub use entry::*;
pub use todo_list::*;
