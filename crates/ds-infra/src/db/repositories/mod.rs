mod cache_record_repo;

pub use cache_record_repo::DieselCacheRecordRepository;
