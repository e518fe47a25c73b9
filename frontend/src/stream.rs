use std::future::Future;

use crate::chat_state::ChatAction;
use crate::decoder::StreamDecoder;

/// Something that yields the raw bytes of an answer, chunk by chunk.
pub trait ChunkSource {
    /// Next chunk, or `None` once the answer is complete.
    async fn next_chunk(&mut self) -> Result<Option<Vec<u8>>, String>;
}

/// Drains `source` into chat actions: one `ChunkReceived` with the
/// cumulative text per chunk, then `StreamComplete` with the flushed text.
///
/// `pause` runs after every chunk update. A source error stops the loop
/// and is returned; chunks already applied stay applied.
pub async fn pump_answer<S, A, P, F>(mut source: S, mut apply: A, mut pause: P) -> Result<(), String>
where
    S: ChunkSource,
    A: FnMut(ChatAction),
    P: FnMut() -> F,
    F: Future<Output = ()>,
{
    let mut decoder = StreamDecoder::new();
    while let Some(bytes) = source.next_chunk().await? {
        let text = decoder.push(&bytes).to_string();
        apply(ChatAction::ChunkReceived { text });
        pause().await;
    }
    apply(ChatAction::StreamComplete { text: decoder.finish() });
    Ok(())
}
