// Line-oriented speech recognizer
use crate::domain::error::SignAidError;
use crate::domain::traits::{ResultHandler, SpeechRecognizer, SpeechResult};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Stdin};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

type HandlerSlot = Arc<Mutex<Option<ResultHandler>>>;

/// Recognizer over an async line source
///
/// Every non-empty line is reported as one final utterance, the way a
/// dictation front end (or a platform recognizer piping its output) would
/// deliver it. End of input stops listening and releases the handler. The
/// source is consumed by the first `start`.
pub struct LineRecognizer<R> {
    source: Mutex<Option<R>>,
    handler: HandlerSlot,
    listening: Arc<AtomicBool>,
    task: Mutex<Option<JoinHandle<()>>>,
    language: String,
}

impl<R> LineRecognizer<R>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    pub fn new(source: R, language: impl Into<String>) -> Self {
        Self {
            source: Mutex::new(Some(source)),
            handler: Arc::new(Mutex::new(None)),
            listening: Arc::new(AtomicBool::new(false)),
            task: Mutex::new(None),
            language: language.into(),
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }
}

impl LineRecognizer<BufReader<Stdin>> {
    pub fn stdin(language: impl Into<String>) -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), language)
    }
}

fn emit(handler: &Mutex<Option<ResultHandler>>, result: SpeechResult) {
    let guard = handler.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(handler) = guard.as_ref() {
        handler(result);
    }
}

async fn listen<R>(source: R, handler: HandlerSlot, listening: Arc<AtomicBool>)
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = source.lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                let transcript = line.trim();
                if transcript.is_empty() {
                    continue;
                }
                emit(
                    &handler,
                    SpeechResult {
                        transcript: transcript.to_string(),
                        is_final: true,
                    },
                );
            }
            Ok(None) => break,
            Err(e) => {
                warn!("Speech source failed: {}", e);
                break;
            }
        }
    }

    debug!("Speech source ended");
    listening.store(false, Ordering::SeqCst);
    handler
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .take();
}

#[async_trait]
impl<R> SpeechRecognizer for LineRecognizer<R>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    fn on_result(&self, handler: ResultHandler) {
        *self.handler.lock().unwrap_or_else(PoisonError::into_inner) = Some(handler);
    }

    async fn start(&self) -> Result<(), SignAidError> {
        if self.is_listening() {
            return Ok(());
        }

        let source = self
            .source
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .ok_or_else(|| SignAidError::Config("Speech source already consumed".to_string()))?;

        debug!("Listening for speech ({})", self.language);
        self.listening.store(true, Ordering::SeqCst);
        let task = tokio::spawn(listen(
            source,
            Arc::clone(&self.handler),
            Arc::clone(&self.listening),
        ));
        *self.task.lock().unwrap_or_else(PoisonError::into_inner) = Some(task);

        Ok(())
    }

    async fn stop(&self) -> Result<(), SignAidError> {
        let task = self.task.lock().unwrap_or_else(PoisonError::into_inner).take();
        if let Some(task) = task {
            task.abort();
        }
        self.listening.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn is_listening(&self) -> bool {
        self.listening.load(Ordering::SeqCst)
    }
}
