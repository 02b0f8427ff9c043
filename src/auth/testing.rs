//! Fakes shared by the unit tests of the auth and pipeline modules.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::http::request::Parts;
use tower::BoxError;

use crate::auth::identity::UserIdentity;
use crate::auth::tokenizer::Tokenizer;

#[derive(Debug)]
pub(crate) struct FakeUser {
    name: String,
    claims: Vec<String>,
}

impl FakeUser {
    pub(crate) fn arc(name: &str, claims: &[&str]) -> Arc<dyn UserIdentity> {
        Arc::new(Self {
            name: name.to_string(),
            claims: claims.iter().map(|c| c.to_string()).collect(),
        })
    }
}

impl UserIdentity for FakeUser {
    fn user_name(&self) -> &str {
        &self.name
    }

    fn claims(&self) -> &[String] {
        &self.claims
    }
}

enum Outcome {
    Decline,
    Resolve(Arc<dyn UserIdentity>),
    Fail,
}

/// Tokenizer that records every `(token, request uri)` it is called with.
pub(crate) struct RecordingTokenizer {
    outcome: Outcome,
    calls: Mutex<Vec<(String, String)>>,
}

impl RecordingTokenizer {
    fn with_outcome(outcome: Outcome) -> Self {
        Self {
            outcome,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn declining() -> Self {
        Self::with_outcome(Outcome::Decline)
    }

    pub(crate) fn resolving(identity: Arc<dyn UserIdentity>) -> Self {
        Self::with_outcome(Outcome::Resolve(identity))
    }

    pub(crate) fn failing() -> Self {
        Self::with_outcome(Outcome::Fail)
    }

    pub(crate) fn tokens(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(token, _)| token.clone())
            .collect()
    }

    pub(crate) fn uris(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, uri)| uri.clone())
            .collect()
    }
}

#[async_trait]
impl Tokenizer for RecordingTokenizer {
    async fn resolve(
        &self,
        token: &str,
        parts: &Parts,
    ) -> Result<Option<Arc<dyn UserIdentity>>, BoxError> {
        self.calls
            .lock()
            .unwrap()
            .push((token.to_string(), parts.uri.to_string()));

        match &self.outcome {
            Outcome::Decline => Ok(None),
            Outcome::Resolve(identity) => Ok(Some(Arc::clone(identity))),
            Outcome::Fail => Err("token store unavailable".into()),
        }
    }
}

/// Collects formatted log output for the lifetime of the returned guard.
#[derive(Clone, Default)]
pub(crate) struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    pub(crate) fn install() -> (Self, tracing::subscriber::DefaultGuard) {
        let capture = Self::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let guard = tracing::subscriber::set_default(subscriber);
        (capture, guard)
    }

    pub(crate) fn output(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl std::io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}
