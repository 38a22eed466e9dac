// src/encode/batch.rs

//! Compressing or decompressing many independent messages at once.
//!
//! Calls share no state, so with the `rayon` feature enabled larger batches
//! are spread over the thread pool. Results come back in input order and are
//! identical to calling [`compress`] / [`decompress`] one message at a time.

use crate::encode::compression::{compress, decompress};
use crate::encode::frame::Frame;
use crate::utils::error::Result;
use log::debug;

/// Batches of at most this many messages are always handled sequentially.
pub const PARALLEL_THRESHOLD: usize = 10;

/// Compresses each message independently.
pub fn compress_batch<M>(messages: &[M]) -> Vec<Result<Frame>>
where
    M: AsRef<[u8]> + Sync,
{
    #[cfg(feature = "rayon")]
    if messages.len() > PARALLEL_THRESHOLD {
        use rayon::prelude::*;
        debug!("compressing {} messages in parallel", messages.len());
        return messages
            .par_iter()
            .map(|message| compress(message.as_ref()))
            .collect();
    }

    debug!("compressing {} messages", messages.len());
    messages
        .iter()
        .map(|message| compress(message.as_ref()))
        .collect()
}

/// Decompresses each frame independently.
pub fn decompress_batch(frames: &[Frame]) -> Vec<Result<Vec<u8>>> {
    #[cfg(feature = "rayon")]
    if frames.len() > PARALLEL_THRESHOLD {
        use rayon::prelude::*;
        debug!("decompressing {} frames in parallel", frames.len());
        return frames.par_iter().map(decompress).collect();
    }

    debug!("decompressing {} frames", frames.len());
    frames.iter().map(decompress).collect()
}
