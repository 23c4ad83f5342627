#![allow(dead_code)]

//! Shared fakes for the external collaborators.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use consultancy_server::generation::{GenerationError, TextGenerator};
use consultancy_server::payment::{
    CheckoutSession, CreateSessionParams, PaymentError, PaymentProvider,
};
use consultancy_server::report::{
    ConsultancyType, GeneratedReport, RenderError, RenderReport, RenderedDocument,
};
use consultancy_server::AppConfig;

/// Text generator that fails a scripted number of times before succeeding.
pub struct ScriptedGenerator {
    /// `None` means every call fails.
    failures_remaining: Mutex<Option<u32>>,
    text: String,
    calls: AtomicUsize,
}

impl ScriptedGenerator {
    pub fn succeeds(text: &str) -> Arc<Self> {
        Self::fails_then_succeeds(0, text)
    }

    pub fn fails_then_succeeds(failures: u32, text: &str) -> Arc<Self> {
        Arc::new(Self {
            failures_remaining: Mutex::new(Some(failures)),
            text: text.to_string(),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn always_fails() -> Arc<Self> {
        Arc::new(Self {
            failures_remaining: Mutex::new(None),
            text: String::new(),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn complete(&self, _system: &str, _prompt: &str) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut remaining = self.failures_remaining.lock().unwrap();
        match *remaining {
            None => Err(GenerationError::Timeout(Duration::from_secs(30))),
            Some(0) => Ok(self.text.clone()),
            Some(n) => {
                *remaining = Some(n - 1);
                Err(GenerationError::Timeout(Duration::from_secs(30)))
            }
        }
    }

    async fn health_check(&self) -> Result<String, GenerationError> {
        Ok("ok".to_string())
    }
}

/// Renderer that records invocations and optionally writes a stub artifact.
pub struct RecordingRenderer {
    output_dir: Option<PathBuf>,
    fail: bool,
    calls: AtomicUsize,
}

impl RecordingRenderer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            output_dir: None,
            fail: false,
            calls: AtomicUsize::new(0),
        })
    }

    /// Write a stub PDF file per render so download URLs resolve on disk.
    pub fn writing_to(output_dir: PathBuf) -> Arc<Self> {
        Arc::new(Self {
            output_dir: Some(output_dir),
            fail: false,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            output_dir: None,
            fail: true,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RenderReport for RecordingRenderer {
    fn render(
        &self,
        consultancy_type: ConsultancyType,
        _report: &GeneratedReport,
    ) -> Result<RenderedDocument, RenderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(RenderError::CompilerRejected("invalid encoding".to_string()));
        }

        let filename = format!("{}_0badf00d.pdf", consultancy_type.as_str());
        let path = match &self.output_dir {
            Some(dir) => {
                let path = dir.join(&filename);
                std::fs::write(&path, b"%PDF-stub").unwrap();
                path
            }
            None => PathBuf::from("/nonexistent").join(&filename),
        };

        Ok(RenderedDocument { filename, path })
    }
}

/// Payment provider serving one canned session.
pub struct MockPayment {
    session: Option<CheckoutSession>,
    unreachable: bool,
    created: Mutex<Vec<CreateSessionParams>>,
}

impl MockPayment {
    pub fn with_session(session: CheckoutSession) -> Arc<Self> {
        Arc::new(Self {
            session: Some(session),
            unreachable: false,
            created: Mutex::new(Vec::new()),
        })
    }

    pub fn empty() -> Arc<Self> {
        Arc::new(Self {
            session: None,
            unreachable: false,
            created: Mutex::new(Vec::new()),
        })
    }

    pub fn unreachable() -> Arc<Self> {
        Arc::new(Self {
            session: None,
            unreachable: true,
            created: Mutex::new(Vec::new()),
        })
    }

    pub fn created_sessions(&self) -> Vec<CreateSessionParams> {
        self.created.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentProvider for MockPayment {
    async fn create_session(&self, params: CreateSessionParams) -> Result<String, PaymentError> {
        if self.unreachable {
            return Err(PaymentError::Provider {
                status: 503,
                detail: "provider unreachable".to_string(),
            });
        }
        self.created.lock().unwrap().push(params);
        Ok("cs_test_123".to_string())
    }

    async fn retrieve_session(&self, session_id: &str) -> Result<CheckoutSession, PaymentError> {
        if self.unreachable {
            return Err(PaymentError::Provider {
                status: 503,
                detail: "provider unreachable".to_string(),
            });
        }
        self.session.clone().ok_or(PaymentError::Provider {
            status: 404,
            detail: format!("No such checkout session: {session_id}"),
        })
    }

    async fn health_check(&self) -> Result<(), PaymentError> {
        if self.unreachable {
            return Err(PaymentError::Provider {
                status: 503,
                detail: "provider unreachable".to_string(),
            });
        }
        Ok(())
    }
}

/// A paid session whose metadata carries the given form snapshot.
pub fn paid_session(form: &HashMap<String, String>) -> CheckoutSession {
    let mut metadata = HashMap::new();
    metadata.insert(
        "form_data".to_string(),
        serde_json::to_string(form).unwrap(),
    );
    CheckoutSession {
        id: "cs_test_123".to_string(),
        payment_status: "paid".to_string(),
        metadata,
    }
}

pub fn test_config(download_dir: PathBuf) -> AppConfig {
    AppConfig {
        download_dir,
        public_base_url: "https://consult.test".to_string(),
        ..AppConfig::default()
    }
}
