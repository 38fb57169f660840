use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use rand::rngs::StdRng;

use crate::{shuffled_indices, DataError, DataView};

use super::{Batcher, DataLoader, DataLoaderIterator, Progress};

// Upper bound on collated batches waiting in the channel; together with the
// one chunk each worker may hold, this caps the prefetch lookahead.
const MAX_QUEUED_BATCHES: usize = 8;

/// A data loader that fetches and collates upcoming chunks on background
/// threads while the consumer processes the current batch.
///
/// Workers claim chunk sequence numbers from a shared counter and the
/// consuming iterator reorders their results, so batches are delivered in
/// the exact chunk order a sequential loader would produce; parallelism
/// affects pipeline overlap only. Abandoning the iterator early discards
/// in-flight work without blocking: workers stop as soon as the consuming
/// side hangs up.
pub struct MultiThreadDataLoader<I, O> {
    dataset: Arc<dyn DataView<I>>,
    batcher: Arc<dyn Batcher<I, O>>,
    batch_size: usize,
    partial: bool,
    num_threads: usize,
    rng: Option<Mutex<StdRng>>,
}

/// A message sent from a worker thread to the consuming iterator.
enum Message<O> {
    /// The collated batch for one chunk sequence number.
    Batch(usize, Result<O, DataError>),

    /// The worker ran out of chunks.
    Done,
}

struct MultiThreadDataLoaderIterator<O> {
    receiver: mpsc::Receiver<Message<O>>,
    workers: Vec<thread::JoinHandle<()>>,
    pending: HashMap<usize, Result<O, DataError>>,
    chunk_sizes: Vec<usize>,
    next_seq: usize,
    num_done: usize,
    items_processed: usize,
    items_total: usize,
    failed: bool,
}

impl<I, O> MultiThreadDataLoader<I, O> {
    /// Creates a new multi-threaded data loader.
    ///
    /// `num_threads` workers fetch chunks of `batch_size` observations;
    /// see [`BatchDataLoader`](super::BatchDataLoader) for the meaning of
    /// `partial` and `rng`.
    pub fn new(
        dataset: Arc<dyn DataView<I>>,
        batcher: Arc<dyn Batcher<I, O>>,
        batch_size: usize,
        partial: bool,
        num_threads: usize,
        rng: Option<StdRng>,
    ) -> Self {
        Self {
            dataset,
            batcher,
            batch_size,
            partial,
            num_threads: num_threads.max(1),
            rng: rng.map(Mutex::new),
        }
    }

    fn chunks(&self) -> Vec<Vec<usize>> {
        let order: Vec<usize> = match &self.rng {
            Some(rng) => shuffled_indices(self.dataset.numobs(), &mut *rng.lock().unwrap()),
            None => (0..self.dataset.numobs()).collect(),
        };

        let mut chunks: Vec<Vec<usize>> = order
            .chunks(self.batch_size)
            .map(<[usize]>::to_vec)
            .collect();

        if !self.partial {
            if let Some(last) = chunks.last() {
                if last.len() < self.batch_size {
                    chunks.pop();
                }
            }
        }

        chunks
    }
}

impl<I, O> DataLoader<O> for MultiThreadDataLoader<I, O>
where
    I: Send + Sync + 'static,
    O: Send + 'static,
{
    fn iter(&self) -> Box<dyn DataLoaderIterator<O> + '_> {
        let items_total = self.dataset.numobs();
        let chunks = self.chunks();
        let chunk_sizes: Vec<usize> = chunks.as_slice().iter().map(Vec::len).collect();

        let chunks = Arc::new(chunks);
        let next_chunk = Arc::new(AtomicUsize::new(0));
        let (sender, receiver) = mpsc::sync_channel::<Message<O>>(MAX_QUEUED_BATCHES);

        let workers: Vec<_> = (0..self.num_threads)
            .map(|_| {
                let chunks = chunks.clone();
                let next_chunk = next_chunk.clone();
                let sender = sender.clone();
                let dataset = self.dataset.clone();
                let batcher = self.batcher.clone();

                thread::spawn(move || {
                    loop {
                        let seq = next_chunk.fetch_add(1, Ordering::Relaxed);
                        if seq >= chunks.len() {
                            break;
                        }

                        let batch = dataset
                            .getobs_many(&chunks[seq])
                            .and_then(|items| batcher.batch(items));

                        // The receiver is gone when iteration was abandoned;
                        // stop without draining the remaining chunks.
                        if sender.send(Message::Batch(seq, batch)).is_err() {
                            return;
                        }
                    }

                    sender.send(Message::Done).ok();
                })
            })
            .collect();

        // Only worker handles keep senders now, so the channel disconnects
        // once every worker exits.
        drop(sender);

        Box::new(MultiThreadDataLoaderIterator {
            receiver,
            workers,
            pending: HashMap::new(),
            chunk_sizes,
            next_seq: 0,
            num_done: 0,
            items_processed: 0,
            items_total,
            failed: false,
        })
    }

    fn num_items(&self) -> usize {
        self.dataset.numobs()
    }
}

impl<O> MultiThreadDataLoaderIterator<O> {
    // Consumes trailing `Done` messages and joins the workers after the
    // final batch was yielded, so normal exhaustion leaves no thread
    // behind.
    fn join_workers(&mut self) {
        while self.num_done < self.workers.len() {
            match self.receiver.recv() {
                Ok(Message::Done) => self.num_done += 1,
                Ok(Message::Batch(..)) => {}
                Err(_) => break,
            }
        }

        while let Some(worker) = self.workers.pop() {
            worker.join().ok();
        }
    }
}

impl<O> Iterator for MultiThreadDataLoaderIterator<O> {
    type Item = Result<O, DataError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.next_seq >= self.chunk_sizes.len() {
            return None;
        }

        loop {
            if let Some(batch) = self.pending.remove(&self.next_seq) {
                self.items_processed += self.chunk_sizes[self.next_seq];
                self.next_seq += 1;
                self.failed = batch.is_err();

                if self.next_seq == self.chunk_sizes.len() {
                    self.join_workers();
                }

                return Some(batch);
            }

            match self.receiver.recv() {
                Ok(Message::Batch(seq, batch)) => {
                    self.pending.insert(seq, batch);
                }
                Ok(Message::Done) => self.num_done += 1,
                // All workers exited; nothing else can arrive.
                Err(_) => return None,
            }
        }
    }
}

impl<O> DataLoaderIterator<O> for MultiThreadDataLoaderIterator<O> {
    fn progress(&self) -> Progress {
        Progress::new(self.items_processed, self.items_total)
    }
}
