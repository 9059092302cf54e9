pub mod memory;

#[cfg(feature = "mongo")]
pub mod mongo;

pub use memory::MemoryStore;

#[cfg(feature = "mongo")]
pub use mongo::MongoStore;
