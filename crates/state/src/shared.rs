use std::sync::Arc;

use parking_lot::Mutex;

use crate::{Bridge, TokenCustody};

/// A bridge shared between concurrent submitters.
///
/// Calls are serialized: each closure runs with exclusive access, so one
/// entry point commits at a time and racing submissions observe each other's
/// committed effects.
#[derive(Debug)]
pub struct SharedBridge<C> {
    inner: Arc<Mutex<Bridge<C>>>,
}

impl<C> Clone for SharedBridge<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: TokenCustody> SharedBridge<C> {
    pub fn new(bridge: Bridge<C>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(bridge)),
        }
    }

    /// Runs `f` with exclusive access to the bridge.
    pub fn apply<T>(&self, f: impl FnOnce(&mut Bridge<C>) -> T) -> T {
        let mut bridge = self.inner.lock();
        f(&mut bridge)
    }

    pub fn read<T>(&self, f: impl FnOnce(&Bridge<C>) -> T) -> T {
        let bridge = self.inner.lock();
        f(&bridge)
    }

    /// Snapshot of the current bridge.
    pub fn snapshot(&self) -> Bridge<C> {
        self.inner.lock().clone()
    }
}
