//! Message streams for streaming methods.

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use crate::Result;

/// Requests of a client-streaming or bidirectional call.
pub type RequestStream<T> = Box<dyn Iterator<Item = T> + Send>;

/// Responses of a server-streaming or bidirectional call.
///
/// Messages arrive in server order, one at a time. The stream ends when the
/// server finishes, after the first error, or once cancelled.
pub struct ServerStream<T> {
    inner: Box<dyn Iterator<Item = Result<T>> + Send>,
    cancelled: Arc<AtomicBool>,
    finished: bool,
}

impl<T> ServerStream<T> {
    pub fn new(inner: impl Iterator<Item = Result<T>> + Send + 'static) -> Self {
        Self {
            inner: Box::new(inner),
            cancelled: Arc::new(AtomicBool::new(false)),
            finished: false,
        }
    }

    /// Stop receiving; later calls to `next` return `None`.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// A handle that cancels this stream from another thread.
    pub fn canceller(&self) -> StreamCanceller {
        StreamCanceller(Arc::clone(&self.cancelled))
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Convert every message, keeping cancellation shared with the original.
    ///
    /// A conversion error ends the stream like a server error would.
    pub fn try_map<U>(self, mut f: impl FnMut(T) -> Result<U> + Send + 'static) -> ServerStream<U>
    where
        T: 'static,
    {
        ServerStream {
            inner: Box::new(self.inner.map(move |message| message.and_then(&mut f))),
            cancelled: self.cancelled,
            finished: self.finished,
        }
    }
}

impl<T> Iterator for ServerStream<T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished || self.is_cancelled() {
            return None;
        }
        let message = self.inner.next();
        self.finished = !matches!(message, Some(Ok(_)));
        message
    }
}

/// Cancels the [`ServerStream`] it was taken from.
#[derive(Debug, Clone)]
pub struct StreamCanceller(Arc<AtomicBool>);

impl StreamCanceller {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }
}
