mod connectivity;

pub use connectivity::{ConnectivityHandle, WatchConnectivity};
