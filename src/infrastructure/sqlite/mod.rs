// src/infrastructure/sqlite/mod.rs
pub mod authors;
pub mod migrations;
pub mod notes;
pub mod pool;
pub mod seed;
pub mod timestamp;

pub use authors::SqliteAuthorRepository;
pub use notes::SqliteNoteRepository;
pub use pool::{DatabasePool, PoolConfig};
pub use seed::{seed_sample_data, SeedReport};
