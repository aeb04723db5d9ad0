use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use mailcast::services::EmailProvider;

#[derive(Debug, Clone)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Test double for the email provider: records every dispatch attempt and
/// fails for addresses it was told to fail for.
#[derive(Default)]
pub struct RecordingProvider {
    calls: Mutex<Vec<SentEmail>>,
    failures: Mutex<HashSet<String>>,
}

impl RecordingProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_failures(addresses: &[&str]) -> Self {
        let provider = Self::default();
        {
            let mut failures = provider.failures.lock().unwrap();
            for address in addresses {
                failures.insert(address.to_string());
            }
        }
        provider
    }

    pub fn calls(&self) -> Vec<SentEmail> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl EmailProvider for RecordingProvider {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), String> {
        self.calls.lock().unwrap().push(SentEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            html: html.to_string(),
        });

        if self.failures.lock().unwrap().contains(to) {
            return Err("550 mailbox unavailable".to_string());
        }

        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "recording"
    }
}
