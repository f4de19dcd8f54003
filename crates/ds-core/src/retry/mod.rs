mod intent;

pub use intent::{project_from_tag, retry_tag, RetryIntent};
