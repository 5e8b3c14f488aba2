pub mod postgres;
pub mod redis;
pub mod repositories;

pub use postgres::{create_pool, run_migrations, MIGRATOR};
pub use redis::create_redis_client;
pub use redis::Cache;
pub use redis::CacheKey;
pub use redis::CacheWriterHandle;
