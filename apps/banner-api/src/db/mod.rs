pub mod directory;
pub mod kv;
pub mod pool;
pub mod preferences;
pub mod schema;
