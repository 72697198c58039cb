//! ## kaka-cookie::slot
//! Reusable per-worker holders for a request's store and arena.
//!
//! A worker thread serves requests one after another. Rather than building a
//! store and an arena for each of them, it keeps one [`RequestSlot`] and
//! acquires it with each new request id. The id check in
//! [`RequestSlot::acquire`] is what keeps one request's cookies from leaking
//! into the next.

use std::cell::RefCell;
use std::fmt;
use std::marker::PhantomData;
use std::thread::{self, ThreadId};

use kaka_config::KakaConfig;
use kaka_core::RequestArena;
use tracing::{debug, warn};

use crate::context::RequestContext;
use crate::error::CookieError;
use crate::limits::CookieLimits;
use crate::store::CookieStore;

/// Identifier of the request currently being served.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One store and one arena, bound to the thread that created them.
///
/// The slot is neither `Send` nor `Sync`, so it can only ever be reached
/// from its owning thread:
///
/// ```compile_fail
/// fn assert_send<T: Send>() {}
/// assert_send::<kaka_cookie::RequestSlot>();
/// ```
pub struct RequestSlot {
    owner: ThreadId,
    request_id: Option<RequestId>,
    store: CookieStore,
    arena: RequestArena,
    _thread_bound: PhantomData<*const ()>,
}

impl RequestSlot {
    pub fn new(limits: CookieLimits, arena_capacity: usize) -> Self {
        Self {
            owner: thread::current().id(),
            request_id: None,
            store: CookieStore::new(limits),
            arena: RequestArena::with_capacity(arena_capacity),
            _thread_bound: PhantomData,
        }
    }

    pub fn from_config(config: &KakaConfig) -> Self {
        Self::new(CookieLimits::from(&config.limits), config.arena.capacity)
    }

    /// Hands out the slot's store for `request_id`.
    ///
    /// If the slot last served a different request, its store is cleared
    /// and its arena reset before the id is adopted. Acquiring again with
    /// the same id returns the store as that request left it.
    pub fn acquire(&mut self, request_id: RequestId) -> RequestContext<'_> {
        if self.request_id != Some(request_id) {
            self.recycle(request_id);
        }
        RequestContext::new(request_id, &mut self.store, &mut self.arena)
    }

    /// Ends the current request: clears the store, resets the arena and
    /// forgets the request id.
    pub fn finish(&mut self) {
        self.store.clean();
        self.arena.reset();
        self.request_id = None;
    }

    pub fn current_request(&self) -> Option<RequestId> {
        self.request_id
    }

    pub fn owner(&self) -> ThreadId {
        self.owner
    }

    pub fn store(&self) -> &CookieStore {
        &self.store
    }

    pub fn arena(&self) -> &RequestArena {
        &self.arena
    }

    fn recycle(&mut self, request_id: RequestId) {
        debug!(
            previous = ?self.request_id,
            next = %request_id,
            stale = self.store.len(),
            owner = ?self.owner,
            "recycling request slot"
        );
        // entries hold views into the arena; drop them before rewinding it
        self.store.clean();
        self.arena.reset();
        self.request_id = Some(request_id);
    }
}

impl fmt::Debug for RequestSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestSlot")
            .field("owner", &self.owner)
            .field("request_id", &self.request_id)
            .field("entries", &self.store.len())
            .field("arena", &self.arena)
            .finish()
    }
}

thread_local! {
    static THREAD_SLOT: RefCell<Option<RequestSlot>> = const { RefCell::new(None) };
}

/// Runs `f` against the calling thread's slot, acquired for `request_id`.
///
/// The slot is created from `config` the first time a thread asks for one;
/// later calls on that thread reuse it and ignore `config`.
///
/// # Errors
/// [`CookieError::SlotInUse`] if called again from inside `f` on the same
/// thread; `f` is not run and the outer request is left alone.
pub fn with_thread_slot<R>(
    config: &KakaConfig,
    request_id: RequestId,
    f: impl FnOnce(&mut RequestContext<'_>) -> R,
) -> Result<R, CookieError> {
    THREAD_SLOT.with(|cell| {
        let mut slot = match cell.try_borrow_mut() {
            Ok(slot) => slot,
            Err(_) => {
                warn!(request_id = %request_id, "request slot re-entered on the same thread");
                return Err(CookieError::SlotInUse);
            }
        };
        let slot = slot.get_or_insert_with(|| {
            debug!(thread = ?thread::current().id(), "creating request slot");
            RequestSlot::from_config(config)
        });
        let mut ctx = slot.acquire(request_id);
        Ok(f(&mut ctx))
    })
}
