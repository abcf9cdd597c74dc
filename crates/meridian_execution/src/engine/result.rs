use std::collections::VecDeque;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::Stream;
use meridian_array::batch::Batch;
use meridian_array::field::Schema;
use meridian_error::Result;

/// Result of executing a single statement.
#[derive(Debug)]
pub struct ExecutionResult {
    /// Schema of the batches in the stream.
    pub output_schema: Schema,

    /// Stream of result batches.
    pub stream: ResultStream,
}

/// Stream of result batches.
///
/// Statements currently execute eagerly, all batches are materialized before
/// the stream is handed out.
#[derive(Debug)]
pub struct ResultStream {
    batches: VecDeque<Batch>,
}

impl ResultStream {
    pub fn new(batches: impl IntoIterator<Item = Batch>) -> Self {
        ResultStream {
            batches: batches.into_iter().collect(),
        }
    }
}

impl Stream for ResultStream {
    type Item = Result<Batch>;

    fn poll_next(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Poll::Ready(self.get_mut().batches.pop_front().map(Ok))
    }
}
