//! In-memory [`MetadataSource`] for tests.
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use canonical::PlatformConfig;
//! use metadata::mock::MockSource;
//! use metadata::Resolver;
//!
//! # tokio_test_block_on(async {
//! let source = MockSource::failing("upstream down");
//! let resolver = Resolver::new(Arc::new(source.clone()), Duration::from_secs(1), PlatformConfig::default());
//!
//! let meta = resolver.resolve("https://www.youtube.com/watch?v=dQw4w9WgXcQ").await;
//! assert_eq!(meta.title, "YouTube video");
//! assert_eq!(source.calls(), 1);
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap().block_on(f)
//! # }
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::MetadataError;
use crate::source::MetadataSource;
use crate::types::DisplayMetadata;

/// What a [`MockSource`] does when asked.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Return this record.
    Return(DisplayMetadata),
    /// Fail with a 503-style status error carrying this message as the URL.
    Fail(String),
    /// Sleep, then fail. Used to exercise timeouts.
    Hang(Duration),
    /// Panic inside `fetch`.
    Panic,
}

/// Scripted metadata source. Clones share the call counter.
#[derive(Debug, Clone)]
pub struct MockSource {
    behavior: MockBehavior,
    calls: Arc<AtomicUsize>,
}

impl MockSource {
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn returning(metadata: DisplayMetadata) -> Self {
        Self::new(MockBehavior::Return(metadata))
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self::new(MockBehavior::Fail(reason.into()))
    }

    pub fn hanging(delay: Duration) -> Self {
        Self::new(MockBehavior::Hang(delay))
    }

    pub fn panicking() -> Self {
        Self::new(MockBehavior::Panic)
    }

    /// Number of `fetch` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MetadataSource for MockSource {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn fetch(&self, _web_url: &str) -> Result<DisplayMetadata, MetadataError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            MockBehavior::Return(metadata) => Ok(metadata.clone()),
            MockBehavior::Fail(reason) => Err(MetadataError::Status {
                status: 503,
                url: reason.clone(),
            }),
            MockBehavior::Hang(delay) => {
                tokio::time::sleep(*delay).await;
                Err(MetadataError::Timeout(*delay))
            }
            MockBehavior::Panic => panic!("mock metadata source panicked"),
        }
    }
}
