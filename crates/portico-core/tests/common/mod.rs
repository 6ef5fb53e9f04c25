//! Scripted in-memory clients for exercising the provider and session
//! manager without a network.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use portico_core::error::TransportError;
use portico_core::{
    AccessToken, ApiClient, ClientFactory, Credentials, Endpoint, Exchange, Identity, Result,
};

/// How a scripted endpoint answers a credential exchange.
#[derive(Clone, Debug)]
pub enum Reply {
    /// Accept any credentials as this subject.
    Accept(&'static str),
    /// Accept only this identifier/secret pair, reject the rest.
    AcceptOnly {
        identifier: &'static str,
        secret: &'static str,
        subject: &'static str,
    },
    Reject,
    Unreachable,
}

/// Shared script: endpoint replies, gates and a call log.
#[derive(Clone, Default)]
pub struct Script {
    inner: Arc<ScriptInner>,
}

#[derive(Default)]
struct ScriptInner {
    replies: Mutex<HashMap<String, Reply>>,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
    calls: Mutex<Vec<String>>,
    created: AtomicUsize,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, endpoint: &str, reply: Reply) -> &Self {
        self.inner
            .replies
            .lock()
            .unwrap()
            .insert(endpoint.to_string(), reply);
        self
    }

    /// Hold exchanges against `endpoint` until the returned gate is notified.
    pub fn gate(&self, endpoint: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.inner
            .gates
            .lock()
            .unwrap()
            .insert(endpoint.to_string(), Arc::clone(&gate));
        gate
    }

    /// Endpoints that received an exchange, in order.
    pub fn calls(&self) -> Vec<String> {
        self.inner.calls.lock().unwrap().clone()
    }

    /// Number of clients the factory built.
    pub fn created(&self) -> usize {
        self.inner.created.load(Ordering::SeqCst)
    }

    /// Yield until `n` exchanges have started.
    pub async fn wait_for_calls(&self, n: usize) {
        while self.calls().len() < n {
            tokio::task::yield_now().await;
        }
    }
}

impl ClientFactory for Script {
    type Client = ScriptedClient;

    fn create(&self, endpoint: Endpoint) -> ScriptedClient {
        self.inner.created.fetch_add(1, Ordering::SeqCst);
        ScriptedClient {
            endpoint,
            script: self.clone(),
        }
    }
}

pub struct ScriptedClient {
    endpoint: Endpoint,
    script: Script,
}

#[async_trait]
impl ApiClient for ScriptedClient {
    fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    async fn exchange_credentials(&self, credentials: &Credentials) -> Result<Exchange> {
        let key = self.endpoint.as_str().to_string();
        self.script.inner.calls.lock().unwrap().push(key.clone());

        let gate = self.script.inner.gates.lock().unwrap().get(&key).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let reply = self.script.inner.replies.lock().unwrap().get(&key).cloned();
        match reply {
            Some(Reply::Accept(subject)) => Ok(Exchange::Accepted(
                Identity::new(subject).with_token(AccessToken::new(format!("token-{subject}"))),
            )),
            Some(Reply::AcceptOnly {
                identifier,
                secret,
                subject,
            }) => {
                if credentials.identifier() == identifier && credentials.secret() == secret {
                    Ok(Exchange::Accepted(Identity::new(subject)))
                } else {
                    Ok(Exchange::Rejected)
                }
            }
            Some(Reply::Reject) => Ok(Exchange::Rejected),
            Some(Reply::Unreachable) | None => Err(TransportError::Connection {
                message: format!("{key} unreachable"),
            }
            .into()),
        }
    }
}
