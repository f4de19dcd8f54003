mod cache_record_row;

pub use cache_record_row::CacheRecordRow;
