mod cache_record_mapper;

pub use cache_record_mapper::CacheRecordMapper;
