//! Shared test doubles.
#![allow(dead_code)]

use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;
use gene_summary::{
    config::{ApiKey, Settings},
    error::{ServiceError, ServiceResult},
    nlp::llm::{ChatMessage, TextGenerator},
};

type Responder = Box<dyn Fn(usize, &[ChatMessage]) -> ServiceResult<String> + Send + Sync>;

/// Text generator that records every request and answers from a closure.
pub struct StubGenerator {
    respond: Responder,
    calls: Mutex<Vec<Vec<ChatMessage>>>,
}

impl StubGenerator {
    pub fn with<F>(respond: F) -> Self
    where
        F: Fn(usize, &[ChatMessage]) -> ServiceResult<String> + Send + Sync + 'static,
    {
        Self {
            respond: Box::new(respond),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(text: &str) -> Self {
        let text = text.to_string();
        Self::with(move |_, _| Ok(text.clone()))
    }

    pub fn failing(status: u16, message: &str) -> Self {
        let message = message.to_string();
        Self::with(move |_, _| {
            Err(ServiceError::Status {
                status,
                message: message.clone(),
            })
        })
    }

    pub fn calls(&self) -> Vec<Vec<ChatMessage>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(&self, key: &ApiKey, messages: &[ChatMessage]) -> ServiceResult<String> {
        assert_eq!(key.expose(), "sk-test", "credential must be threaded through");
        let index = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(messages.to_vec());
            calls.len() - 1
        };
        (self.respond)(index, messages)
    }
}

/// Settings with a test credential plus the given overrides.
pub fn settings(overrides: &[(&str, String)]) -> Settings {
    let mut vars: HashMap<String, String> = overrides
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect();
    vars.entry("OPENAI_API_KEY".into())
        .or_insert_with(|| "sk-test".into());
    Settings::from_lookup(|name| vars.get(name).cloned()).expect("test settings resolve")
}
