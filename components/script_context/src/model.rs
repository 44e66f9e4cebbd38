//! Thread models.
//!
//! A context's thread model is part of its type, so a caller-synchronized
//! context cannot be shared between threads by accident:
//! - [`Single`] takes no lock and is `!Sync`
//! - [`Multi`] guards the interpreter and result buffers with one mutex

use std::cell::{RefCell, RefMut};
use std::ops::DerefMut;

use core_types::{BridgeError, BridgeResult, ThreadMode};
use parking_lot::{MappedMutexGuard, Mutex, MutexGuard};

use crate::bridge::CallBridge;

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Single {}
    impl Sealed for super::Multi {}
}

/// Storage and exclusion discipline for a context's interpreter slot.
///
/// The slot is empty once the context has been destroyed.
pub trait ThreadModel: sealed::Sealed + Sized {
    /// Runtime tag for this model
    const MODE: ThreadMode;

    /// Exclusive access to a live bridge
    type Guard<'a>: DerefMut<Target = CallBridge>
    where
        Self: 'a;

    /// Wraps a bridge.
    fn new(bridge: CallBridge) -> Self;

    /// Acquires the bridge, or reports [`BridgeError::Unavailable`] if the
    /// slot has been emptied.
    fn lock(&self) -> BridgeResult<Self::Guard<'_>>;

    /// Empties the slot under exclusion and returns what it held.
    fn take(&self) -> BridgeResult<Option<CallBridge>>;
}

/// Caller-synchronized model. No lock is taken.
pub struct Single {
    slot: RefCell<Option<CallBridge>>,
}

fn already_acquired() -> BridgeError {
    BridgeError::Lock("context already acquired".to_string())
}

impl ThreadModel for Single {
    const MODE: ThreadMode = ThreadMode::Single;

    type Guard<'a> = RefMut<'a, CallBridge>;

    fn new(bridge: CallBridge) -> Self {
        Self {
            slot: RefCell::new(Some(bridge)),
        }
    }

    fn lock(&self) -> BridgeResult<Self::Guard<'_>> {
        let slot = self.slot.try_borrow_mut().map_err(|_| already_acquired())?;
        RefMut::filter_map(slot, Option::as_mut).map_err(|_| BridgeError::Unavailable)
    }

    fn take(&self) -> BridgeResult<Option<CallBridge>> {
        let mut slot = self.slot.try_borrow_mut().map_err(|_| already_acquired())?;
        Ok(slot.take())
    }
}

/// Internally synchronized model backed by a mutex.
pub struct Multi {
    slot: Mutex<Option<CallBridge>>,
}

impl ThreadModel for Multi {
    const MODE: ThreadMode = ThreadMode::Multi;

    type Guard<'a> = MappedMutexGuard<'a, CallBridge>;

    fn new(bridge: CallBridge) -> Self {
        Self {
            slot: Mutex::new(Some(bridge)),
        }
    }

    fn lock(&self) -> BridgeResult<Self::Guard<'_>> {
        // An empty slot hands the guard back, which releases the lock.
        MutexGuard::try_map(self.slot.lock(), Option::as_mut).map_err(|_| BridgeError::Unavailable)
    }

    fn take(&self) -> BridgeResult<Option<CallBridge>> {
        Ok(self.slot.lock().take())
    }
}
