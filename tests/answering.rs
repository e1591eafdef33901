use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use brand_context::answer::{
    AnsweringService, GenerateError, Generator, RetryPolicy, RetryingGenerator, LANDON_SYSTEM_PROMPT,
};
use brand_context::document::Document;
use brand_context::selection::ContextSelector;
use brand_context::types::MatchedRule;

#[derive(Default)]
struct RecordingGenerator {
    calls: Mutex<Vec<(String, String, String)>>,
}

#[async_trait]
impl Generator for RecordingGenerator {
    async fn generate(
        &self,
        system_prompt: &str,
        context: &str,
        question: &str,
    ) -> Result<String, GenerateError> {
        self.calls.lock().unwrap().push((
            system_prompt.to_string(),
            context.to_string(),
            question.to_string(),
        ));
        Ok("Bonjour ! Le wifi est gratuit.".to_string())
    }
}

/// Fails with the given error `failures` times, then answers.
struct FlakyGenerator {
    failures: u32,
    quota: bool,
    calls: AtomicU32,
}

impl FlakyGenerator {
    fn rate_limited(failures: u32) -> Self {
        Self {
            failures,
            quota: false,
            calls: AtomicU32::new(0),
        }
    }

    fn out_of_quota() -> Self {
        Self {
            failures: u32::MAX,
            quota: true,
            calls: AtomicU32::new(0),
        }
    }

    fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Generator for FlakyGenerator {
    async fn generate(&self, _: &str, _: &str, _: &str) -> Result<String, GenerateError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call > self.failures {
            return Ok("answer".to_string());
        }
        if self.quota {
            Err(GenerateError::QuotaExceeded("insufficient_quota".to_string()))
        } else {
            Err(GenerateError::RateLimited("slow down".to_string()))
        }
    }
}

fn instant_policy(max_attempts: u32) -> RetryPolicy {
    RetryPolicy {
        max_attempts,
        min_delay: Duration::ZERO,
        max_delay: Duration::ZERO,
    }
}

fn guide() -> Document {
    let filler = "lorem ipsum dolor sit amet, ".repeat(100);
    Document::from_text(
        "guide.txt",
        format!("{filler}OUR SERVICES & AMENITIES: free wifi, pool.{filler}OUR COLORS: navy."),
    )
}

#[tokio::test]
async fn answer_forwards_selected_context_and_persona() {
    let generator = Arc::new(RecordingGenerator::default());
    let service = AnsweringService::new(
        guide(),
        ContextSelector::default().with_max_chars(400),
        generator.clone(),
    );

    let answer = service.answer("Le wifi fait-il partie des services ?").await.unwrap();

    assert_eq!(answer.text, "Bonjour ! Le wifi est gratuit.");
    assert_eq!(
        answer.context.matched,
        MatchedRule::Theme {
            name: "services".to_string(),
            anchor: "OUR SERVICES & AMENITIES".to_string(),
        }
    );

    let calls = generator.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    let (system, context, question) = &calls[0];
    assert_eq!(system, LANDON_SYSTEM_PROMPT);
    assert_eq!(context, &answer.context.text);
    assert!(context.contains("OUR SERVICES & AMENITIES: free wifi"));
    assert_eq!(question, "Le wifi fait-il partie des services ?");
}

#[tokio::test]
async fn custom_system_prompt_is_used() {
    let generator = Arc::new(RecordingGenerator::default());
    let service = AnsweringService::new(guide(), ContextSelector::default(), generator.clone())
        .with_system_prompt("You are the concierge.");

    service.answer("colors?").await.unwrap();

    let calls = generator.calls.lock().unwrap();
    assert_eq!(calls[0].0, "You are the concierge.");
}

#[test]
fn context_for_matches_selector() {
    let selector = ContextSelector::default().with_max_chars(500);
    let service = AnsweringService::new(
        guide(),
        selector.clone(),
        Arc::new(RecordingGenerator::default()),
    );

    assert_eq!(
        service.context_for("colors?"),
        selector.select("colors?", service.document())
    );
}

#[tokio::test]
async fn rate_limited_calls_are_retried() {
    let generator = RetryingGenerator::new(FlakyGenerator::rate_limited(2), instant_policy(3));

    let answer = generator.generate("sys", "ctx", "q").await.unwrap();

    assert_eq!(answer, "answer");
    assert_eq!(generator.inner().calls(), 3);
}

#[tokio::test]
async fn retries_stop_after_max_attempts() {
    let generator = RetryingGenerator::new(FlakyGenerator::rate_limited(5), instant_policy(3));

    let err = generator.generate("sys", "ctx", "q").await.unwrap_err();

    assert!(matches!(err, GenerateError::RateLimited(_)));
    assert_eq!(generator.inner().calls(), 3);
}

#[tokio::test]
async fn quota_errors_are_not_retried() {
    let generator = RetryingGenerator::new(FlakyGenerator::out_of_quota(), instant_policy(3));

    let err = generator.generate("sys", "ctx", "q").await.unwrap_err();

    assert!(matches!(err, GenerateError::QuotaExceeded(_)));
    assert_eq!(generator.inner().calls(), 1);
}

#[tokio::test]
async fn zero_attempts_still_calls_once() {
    let generator = RetryingGenerator::new(FlakyGenerator::rate_limited(0), instant_policy(0));

    assert_eq!(generator.generate("sys", "ctx", "q").await.unwrap(), "answer");
    assert_eq!(generator.inner().calls(), 1);
}
