use std::{pin::Pin, task::Context};

use futures::{future::BoxFuture, Future};

/// A background job polled once per frame with a noop waker.
///
/// Backends return plain `BoxFuture`s; the UI has no executor, so jobs are
/// driven by the repaint loop until they resolve. `data` yields the result
/// exactly once.
pub struct AsyncTask<T>(BoxFuture<'static, T>);

impl<T> AsyncTask<T> {
    pub fn new(future: BoxFuture<'static, T>) -> Self {
        Self(future)
    }

    pub fn data(&mut self) -> Option<T> {
        let waker = std::task::Waker::noop();
        let mut cx = Context::from_waker(&waker);
        match Pin::new(&mut self.0).poll(&mut cx) {
            std::task::Poll::Ready(r) => {
                #[cfg(debug_assertions)]
                {
                    self.0 = Box::pin(std::future::poll_fn(|_| {
                        panic!("AsyncTask polled after completion")
                    }));
                }
                Some(r)
            }
            std::task::Poll::Pending => None,
        }
    }
}
