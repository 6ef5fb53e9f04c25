//! Endpoint-scoped client provider.
//!
//! The provider keeps two pieces of state: the endpoint the user asked for
//! and the client that is actually live. [`ClientProvider::set_endpoint`]
//! only records intent; [`ClientProvider::create_client`] commits it by
//! swapping a freshly built client into the single current-client slot.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tracing::debug;

use crate::traits::{ApiClient, ClientFactory};
use crate::types::Endpoint;

/// A shared reference to one client instance.
///
/// Every call to [`ClientProvider::create_client`] mints a new generation,
/// so two handles compare equal only if they point at the same instance.
pub struct ClientHandle<C> {
    client: Arc<C>,
    generation: u64,
}

impl<C> ClientHandle<C> {
    /// Returns the generation number of this instance.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns the underlying client.
    pub fn client(&self) -> &Arc<C> {
        &self.client
    }
}

impl<C: ApiClient> ClientHandle<C> {
    /// Returns the endpoint this instance is bound to.
    pub fn endpoint(&self) -> &Endpoint {
        self.client.endpoint()
    }
}

impl<C> Clone for ClientHandle<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            generation: self.generation,
        }
    }
}

impl<C> PartialEq for ClientHandle<C> {
    fn eq(&self, other: &Self) -> bool {
        self.generation == other.generation && Arc::ptr_eq(&self.client, &other.client)
    }
}

impl<C> Eq for ClientHandle<C> {}

impl<C> Deref for ClientHandle<C> {
    type Target = C;

    fn deref(&self) -> &C {
        &self.client
    }
}

impl<C: ApiClient> fmt::Debug for ClientHandle<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientHandle")
            .field("generation", &self.generation)
            .field("endpoint", self.endpoint())
            .finish()
    }
}

/// Owns the user-selected endpoint and the single live client bound to it.
///
/// # Thread Safety
///
/// All methods take `&self` and are safe to call from any task. None of them
/// await; the slots are `watch` channels that are locked only for the
/// duration of a read or a swap.
pub struct ClientProvider<F: ClientFactory> {
    factory: F,
    endpoint: watch::Sender<Endpoint>,
    current: watch::Sender<Option<ClientHandle<F::Client>>>,
    last_generation: AtomicU64,
}

impl<F: ClientFactory> ClientProvider<F> {
    /// Create a provider with an empty endpoint and no client.
    pub fn new(factory: F) -> Self {
        Self::with_endpoint(factory, Endpoint::default())
    }

    /// Create a provider with an initial endpoint and no client.
    pub fn with_endpoint(factory: F, endpoint: impl Into<Endpoint>) -> Self {
        Self {
            factory,
            endpoint: watch::Sender::new(endpoint.into()),
            current: watch::Sender::new(None),
            last_generation: AtomicU64::new(0),
        }
    }

    /// Record the endpoint the next client should target.
    ///
    /// This does not touch the current client. Requests keep going to the
    /// previously created instance until [`create_client`](Self::create_client)
    /// is called.
    pub fn set_endpoint(&self, uri: impl Into<Endpoint>) {
        let endpoint = uri.into();
        debug!(%endpoint, "Endpoint updated");
        self.endpoint.send_replace(endpoint);
    }

    /// Returns the stored endpoint, which may not yet be bound to a client.
    pub fn endpoint(&self) -> Endpoint {
        self.endpoint.borrow().clone()
    }

    /// Build a client for the stored endpoint and make it current.
    ///
    /// The previous instance is dropped from the slot. Anyone still holding
    /// its handle can finish what they started with it, but the session
    /// manager will no longer accept results from it.
    pub fn create_client(&self) -> ClientHandle<F::Client> {
        let endpoint = self.endpoint();
        let generation = self.last_generation.fetch_add(1, Ordering::Relaxed) + 1;

        let handle = ClientHandle {
            client: Arc::new(self.factory.create(endpoint.clone())),
            generation,
        };

        let previous = self.current.send_replace(Some(handle.clone()));
        debug!(
            %endpoint,
            generation,
            replaced = previous.as_ref().map(ClientHandle::generation),
            "Client created"
        );

        handle
    }

    /// Returns the current client, or `None` before the first
    /// [`create_client`](Self::create_client).
    pub fn current_client(&self) -> Option<ClientHandle<F::Client>> {
        self.current.borrow().clone()
    }

    /// Returns true if `handle` is still the current client.
    pub fn is_current(&self, handle: &ClientHandle<F::Client>) -> bool {
        self.current.borrow().as_ref() == Some(handle)
    }

    /// Watch client swaps.
    ///
    /// Do not hold a `borrow()` of the returned receiver while calling
    /// [`SessionManager::login`](crate::SessionManager::login) or anything
    /// else that writes session state.
    pub fn subscribe(&self) -> watch::Receiver<Option<ClientHandle<F::Client>>> {
        self.current.subscribe()
    }

    /// Run `f` only if `handle` is current, holding the slot so that no
    /// swap can land between the check and `f`.
    pub(crate) fn if_current<R>(
        &self,
        handle: &ClientHandle<F::Client>,
        f: impl FnOnce() -> R,
    ) -> Option<R> {
        let slot = self.current.borrow();
        if slot.as_ref() == Some(handle) {
            Some(f())
        } else {
            None
        }
    }
}

impl<F: ClientFactory> fmt::Debug for ClientProvider<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientProvider")
            .field("endpoint", &*self.endpoint.borrow())
            .field("current", &*self.current.borrow())
            .finish()
    }
}
