#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use qbank_gateway::{
    BearerToken, Gateway, GatewayConfig, Hooks, MemoryCredentialStore, Navigator, Notice,
    Notifier, Session,
};

/// Records every notice in delivery order.
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

#[derive(Default)]
pub struct CountingNavigator {
    to_login: AtomicUsize,
}

impl CountingNavigator {
    pub fn login_redirects(&self) -> usize {
        self.to_login.load(Ordering::SeqCst)
    }
}

impl Navigator for CountingNavigator {
    fn to_login(&self) {
        self.to_login.fetch_add(1, Ordering::SeqCst);
    }
}

pub struct Harness {
    pub gateway: Gateway,
    pub notifier: Arc<RecordingNotifier>,
    pub navigator: Arc<CountingNavigator>,
}

pub fn harness(base_url: &str, token: Option<&str>) -> Harness {
    let store = match token {
        Some(token) => MemoryCredentialStore::with_token(BearerToken::new(token)),
        None => MemoryCredentialStore::new(),
    };
    let notifier = Arc::new(RecordingNotifier::default());
    let navigator = Arc::new(CountingNavigator::default());
    let gateway = Gateway::from_config(
        &GatewayConfig::new(base_url),
        Session::new(Arc::new(store)),
        Hooks::new(notifier.clone(), navigator.clone()),
    )
    .unwrap();

    Harness {
        gateway,
        notifier,
        navigator,
    }
}
