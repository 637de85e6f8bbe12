use std::num::NonZeroUsize;

/// Adaptive batch sizes: `(largest total, batch size)`, checked in order.
/// Bounds are inclusive; anything above the last bound uses [`MAX_BATCH_SIZE`].
const BATCH_SIZE_TABLE: &[(usize, usize)] = &[(100, 10), (500, 25), (1000, 50)];

/// Batch size for runs larger than every bound in [`BATCH_SIZE_TABLE`].
pub const MAX_BATCH_SIZE: usize = 100;

/// Batch size for `total` entries under adaptive sizing.
pub fn batch_size_for(total: usize) -> usize {
    BATCH_SIZE_TABLE
        .iter()
        .find(|(bound, _)| total <= *bound)
        .map(|(_, size)| *size)
        .unwrap_or(MAX_BATCH_SIZE)
}

/// How the run chooses its batch size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchSizing {
    #[default]
    Adaptive,
    Fixed(NonZeroUsize),
}

impl BatchSizing {
    pub fn size_for(&self, total: usize) -> usize {
        match self {
            BatchSizing::Adaptive => batch_size_for(total),
            BatchSizing::Fixed(size) => size.get(),
        }
    }
}

impl From<Option<NonZeroUsize>> for BatchSizing {
    fn from(size: Option<NonZeroUsize>) -> Self {
        size.map_or(BatchSizing::Adaptive, BatchSizing::Fixed)
    }
}

/// A contiguous slice of the listing, processed between confirmations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    /// 1-based position in the run
    pub index: usize,
    pub entries: Vec<String>,
}

impl Batch {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Split `entries` into order-preserving batches of `size`; the last one may
/// be shorter.
pub fn split_batches(entries: &[String], size: usize) -> Vec<Batch> {
    let size = size.max(1);
    entries
        .chunks(size)
        .enumerate()
        .map(|(i, chunk)| Batch {
            index: i + 1,
            entries: chunk.to_vec(),
        })
        .collect()
}
