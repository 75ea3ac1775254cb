use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use telemetry::{get_subscriber, init_subscriber, TelemetrySettings};
use tokio::runtime::Handle;
use tokio::sync::Notify;
use waitlist_intake::domain::{
    RegistrationOutcome, SubmissionError, WaitlistClient, WaitlistEmail,
};
use waitlist_intake::WaitlistForm;

static TRACING: Lazy<()> = Lazy::new(|| {
    let settings = TelemetrySettings {
        dataset_name: "test-waitlist-intake".into(),
        log_level: "debug".into(),
    };

    if std::env::var("TEST_LOG").is_ok() {
        init_subscriber(get_subscriber(&settings, std::io::stdout));
    } else {
        init_subscriber(get_subscriber(&settings, std::io::sink));
    }
});

#[derive(Clone, Copy)]
pub enum Reply {
    Created,
    AlreadyExists,
    Fail,
}

/// Records every registration and answers with a fixed reply, optionally
/// holding the answer back until [`StubWaitlistClient::release`] is called.
pub struct StubWaitlistClient {
    reply: Reply,
    gate: Option<Notify>,
    calls: Mutex<Vec<String>>,
}

impl StubWaitlistClient {
    pub fn replying(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            gate: None,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn gated(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            gate: Some(Notify::new()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl WaitlistClient for StubWaitlistClient {
    async fn register(
        &self,
        email: &WaitlistEmail,
    ) -> Result<RegistrationOutcome, SubmissionError> {
        self.calls.lock().unwrap().push(email.to_string());

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        match self.reply {
            Reply::Created => Ok(RegistrationOutcome::Created),
            Reply::AlreadyExists => Ok(RegistrationOutcome::AlreadyExists),
            Reply::Fail => Err(anyhow::anyhow!("connection reset by peer").into()),
        }
    }
}

pub fn spawn_form(client: Arc<StubWaitlistClient>) -> WaitlistForm {
    spawn_form_with_timeout(client, Duration::from_secs(10))
}

pub fn spawn_form_with_timeout(client: Arc<StubWaitlistClient>, timeout: Duration) -> WaitlistForm {
    Lazy::force(&TRACING);

    WaitlistForm::new(client, timeout, Handle::current())
}

/// Give spawned registration tasks a chance to run.
pub async fn let_tasks_run() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}
