//! Watch-channel connectivity source.
//!
//! The host shell pushes online/offline transitions through the
//! [`ConnectivityHandle`]; the engine observes them through the
//! `ConnectivityPort`.

use std::sync::Arc;

use tokio::sync::watch;

use ds_core::ports::ConnectivityPort;

pub struct WatchConnectivity {
    tx: Arc<watch::Sender<bool>>,
}

#[derive(Clone)]
pub struct ConnectivityHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl WatchConnectivity {
    pub fn new(initially_online: bool) -> (Self, ConnectivityHandle) {
        let (tx, _rx) = watch::channel(initially_online);
        let tx = Arc::new(tx);
        (Self { tx: tx.clone() }, ConnectivityHandle { tx })
    }
}

impl ConnectivityPort for WatchConnectivity {
    fn is_online(&self) -> bool {
        *self.tx.borrow()
    }

    fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}

impl ConnectivityHandle {
    pub fn set_online(&self, online: bool) {
        self.tx.send_replace(online);
    }
}
