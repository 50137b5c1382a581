pub mod collection_ops;
pub mod entry_ops;
