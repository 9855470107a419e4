#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;
use qbank_console::{Confirm, CurrentUser, permissions};
use qbank_gateway::{
    BearerToken, Gateway, GatewayConfig, Hooks, MemoryCredentialStore, NoopNavigator, Notice,
    Notifier, Session,
};

#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.notices.lock().iter().map(|n| n.message.clone()).collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices.lock().push(notice);
    }
}

/// Answers prompts with a fixed reply and counts them.
pub struct CountingConfirm {
    answer: bool,
    asked: AtomicUsize,
}

impl CountingConfirm {
    pub fn new(answer: bool) -> Arc<Self> {
        Arc::new(Self {
            answer,
            asked: AtomicUsize::new(0),
        })
    }

    pub fn asked(&self) -> usize {
        self.asked.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Confirm for CountingConfirm {
    async fn confirm(&self, _message: &str) -> bool {
        self.asked.fetch_add(1, Ordering::SeqCst);
        self.answer
    }
}

pub struct Harness {
    pub gateway: Gateway,
    pub notifier: Arc<RecordingNotifier>,
}

pub fn harness(base_url: &str) -> Harness {
    let notifier = Arc::new(RecordingNotifier::default());
    let gateway = Gateway::from_config(
        &GatewayConfig::new(base_url),
        Session::new(Arc::new(MemoryCredentialStore::with_token(BearerToken::new(
            "console-token",
        )))),
        Hooks::new(notifier.clone(), Arc::new(NoopNavigator)),
    )
    .unwrap();
    Harness { gateway, notifier }
}

pub fn admin() -> CurrentUser {
    CurrentUser::new(
        1,
        250,
        [
            permissions::COMPANY_VIEW,
            permissions::COMPANY_CREATE,
            permissions::COMPANY_EDIT,
            permissions::COMPANY_DELETE,
        ],
    )
}
