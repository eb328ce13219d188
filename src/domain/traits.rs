use crate::domain::error::SignAidError;
use crate::domain::records::Record;
use async_trait::async_trait;

/// Trait for the translation backend
///
/// Implementations post `body` to `endpoint` and normalize the reply: `Ok`
/// carries the translation or HamNoSys text, `Err` is either
/// [`SignAidError::Transport`] or [`SignAidError::Service`]. A raw transport
/// error never escapes an implementation.
#[async_trait]
pub trait TranslationService: Send + Sync {
    async fn call(&self, endpoint: &str, body: serde_json::Value) -> Result<String, SignAidError>;
}

/// Predicate handed to [`Repository::find`]
pub type RecordFilter<'a, T> = &'a (dyn Fn(&T) -> bool + Send + Sync);

/// Trait for record storage
///
/// Replaces process-wide collections with an injected store. SQLite and
/// in-memory implementations live in `infrastructure::storage`.
#[async_trait]
pub trait Repository<T: Record>: Send + Sync {
    async fn get(&self, id: &str) -> Result<Option<T>, SignAidError>;

    /// Insert or replace by id
    async fn put(&self, record: &T) -> Result<(), SignAidError>;

    async fn find(&self, filter: RecordFilter<'_, T>) -> Result<Vec<T>, SignAidError>;
}

/// One recognition event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechResult {
    pub transcript: String,
    pub is_final: bool,
}

pub type ResultHandler = Box<dyn Fn(SpeechResult) + Send + Sync>;

/// Speech-to-text capability
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Register the callback for recognition results (replaces any previous one)
    fn on_result(&self, handler: ResultHandler);

    async fn start(&self) -> Result<(), SignAidError>;

    async fn stop(&self) -> Result<(), SignAidError>;

    fn is_listening(&self) -> bool;
}

/// Sign avatar capability. Rendering is out of scope, players may only log.
pub trait SigmlPlayer: Send + Sync {
    fn load(&self, container: &str);

    fn play(&self, sigml: &str);
}
