pub mod sentiment_in_memory_repository;
pub mod sentiment_postgres_repository;
