#![allow(dead_code)]

use async_trait::async_trait;
use handlecheck_core::{Endpoints, ResolverConfig};
use handlecheck_resolver::{FetchedPage, Transport, TransportError};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

pub const DETAIL_API_URL: &str = "http://api.test/detail?uniqueId={handle}";
pub const PROFILE_URL: &str = "http://web.test/@{handle}";

/// Resolver settings pointing at the scripted endpoints.
pub fn test_config() -> ResolverConfig {
    ResolverConfig {
        endpoints: Endpoints {
            profile_url: PROFILE_URL.to_string(),
            detail_api_url: DETAIL_API_URL.to_string(),
        },
        ..ResolverConfig::default()
    }
}

pub fn api_url(handle: &str) -> String {
    DETAIL_API_URL.replace("{handle}", handle)
}

pub fn profile_url(handle: &str) -> String {
    PROFILE_URL.replace("{handle}", handle)
}

/// Scripted reply for one request.
#[derive(Debug, Clone)]
pub enum Reply {
    Page(u16, String),
    Fault(TransportError),
    Panic,
}

impl Reply {
    pub fn page(status: u16, body: &str) -> Self {
        Self::Page(status, body.to_string())
    }

    pub fn refused() -> Self {
        Self::Fault(TransportError::Connect("connection refused".to_string()))
    }
}

/// In-memory transport replaying scripted replies per URL.
///
/// Each URL holds a queue; the front reply is consumed until one remains,
/// which then repeats. Unscripted URLs fail with a connection fault.
#[derive(Default)]
pub struct ScriptedTransport {
    routes: Mutex<HashMap<String, VecDeque<Reply>>>,
    latency: Duration,
    calls: Mutex<Vec<(String, Instant)>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    shutdowns: AtomicUsize,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn on(self, url: String, replies: Vec<Reply>) -> Self {
        self.routes
            .lock()
            .unwrap()
            .insert(url, replies.into_iter().collect());
        self
    }

    pub fn api(self, handle: &str, reply: Reply) -> Self {
        self.on(api_url(handle), vec![reply])
    }

    pub fn page(self, handle: &str, reply: Reply) -> Self {
        self.on(profile_url(handle), vec![reply])
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn call_times(&self, url: &str) -> Vec<Instant> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(u, _)| u == url)
            .map(|(_, t)| *t)
            .collect()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn shutdowns(&self) -> usize {
        self.shutdowns.load(Ordering::SeqCst)
    }

    fn next_reply(&self, url: &str) -> Reply {
        let mut routes = self.routes.lock().unwrap();
        match routes.get_mut(url) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap(),
            Some(queue) => queue.front().cloned().unwrap_or_else(Reply::refused),
            None => Reply::Fault(TransportError::Connect(format!("no route to {url}"))),
        }
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn get(&self, url: &str) -> Result<FetchedPage, TransportError> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), Instant::now()));

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match self.next_reply(url) {
            Reply::Page(status, body) => Ok(FetchedPage::new(status, body)),
            Reply::Fault(e) => Err(e),
            Reply::Panic => panic!("scripted panic for {url}"),
        }
    }

    async fn shutdown(&self) {
        self.shutdowns.fetch_add(1, Ordering::SeqCst);
    }
}
