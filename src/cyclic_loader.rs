use crate::data_loader::{MinibatchData, MinibatchSource};
use crate::rows::RowChunks;

use anyhow::anyhow;

///
/// Tracks the next unread row within a sequence of `len` rows. Each
/// sampler owns one cursor per stored sequence; nothing is shared
/// across sampler instances.
///
#[derive(Clone, Debug)]
pub struct Cursor {
    offset: usize,
    len: usize,
}

impl Cursor {
    pub fn new(len: usize) -> Self {
        Self { offset: 0, len }
    }

    /// Take the next `m` row indexes and advance `offset <- (offset + m)
    /// mod len`. When the window `[offset, offset + m)` runs past the
    /// end, the slice is the tail `[offset, len)` followed by the head
    /// `[0, m - (len - offset))`.
    pub fn take(&mut self, m: usize) -> Vec<usize> {
        let rows = (0..m).map(|k| (self.offset + k) % self.len).collect();
        self.offset = (self.offset + m) % self.len;
        rows
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn rewind(&mut self) {
        self.offset = 0;
    }
}

///
/// A deterministic minibatch loader that walks the data in storage
/// order and wraps around at the end, so every draw has exactly
/// `batch_size` rows. Starting from offset 0, the stream of batches
/// repeats with period `n / gcd(n, batch_size)` draws.
///
pub struct CyclicData<D: RowChunks> {
    input_data: D,
    input_cursor: Cursor,
    output_data: Option<D>,
    output_cursor: Option<Cursor>,
    batch_size: usize,
}

impl<D: RowChunks> CyclicData<D> {
    ///
    /// Create a cyclic loader over the main data `input_data`, drawing
    /// `batch_size` rows per minibatch
    ///
    pub fn new(input_data: D, batch_size: usize) -> anyhow::Result<Self> {
        let ntot = input_data.num_rows();
        check_batch_size(batch_size, ntot)?;

        Ok(Self {
            input_cursor: Cursor::new(ntot),
            input_data,
            output_data: None,
            output_cursor: None,
            batch_size,
        })
    }

    ///
    /// Create a cyclic loader over the main data `input_data` and the
    /// row-aligned output data `output_data`
    ///
    pub fn new_with_output(
        input_data: D,
        output_data: D,
        batch_size: usize,
    ) -> anyhow::Result<Self> {
        let ntot = input_data.num_rows();

        if output_data.num_rows() != ntot {
            return Err(anyhow!(
                "check input rows {} vs. output rows {}",
                ntot,
                output_data.num_rows()
            ));
        }

        check_batch_size(batch_size, ntot)?;

        Ok(Self {
            input_cursor: Cursor::new(ntot),
            input_data,
            output_cursor: Some(Cursor::new(ntot)),
            output_data: Some(output_data),
            batch_size,
        })
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Number of draws until the cursors return to their starting
    /// offsets: `n / gcd(n, batch_size)`.
    pub fn period(&self) -> usize {
        let n = self.num_samples();
        n / gcd(n, self.batch_size)
    }
}

impl<D: RowChunks> MinibatchSource for CyclicData<D> {
    type Batch = D::Batch;

    fn next_minibatch(&mut self) -> MinibatchData<Self::Batch> {
        let rows = self.input_cursor.take(self.batch_size);
        let input = self.input_data.take_rows(&rows);

        let output = match (&self.output_data, &mut self.output_cursor) {
            (Some(out_data), Some(out_cursor)) => {
                let rows = out_cursor.take(self.batch_size);
                Some(out_data.take_rows(&rows))
            }
            _ => None,
        };

        MinibatchData { input, output }
    }

    fn num_minibatch(&self) -> usize {
        self.num_samples().div_ceil(self.batch_size)
    }

    fn num_samples(&self) -> usize {
        self.input_data.num_rows()
    }

    fn reset(&mut self) {
        self.input_cursor.rewind();
        if let Some(cursor) = &mut self.output_cursor {
            cursor.rewind();
        }
    }
}

impl<D: RowChunks> Iterator for CyclicData<D> {
    type Item = MinibatchData<D::Batch>;

    /// Unbounded: the loader never runs out of batches.
    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_minibatch())
    }
}

pub(crate) fn check_batch_size(batch_size: usize, ntot: usize) -> anyhow::Result<()> {
    if ntot < 1 {
        return Err(anyhow!("empty data: total # = {}", ntot));
    }
    if batch_size < 1 {
        return Err(anyhow!("check batch size = {}", batch_size));
    }
    if batch_size > ntot {
        return Err(anyhow!(
            "check batch size = {} vs. total # = {}",
            batch_size,
            ntot
        ));
    }
    Ok(())
}

fn gcd(mut a: usize, mut b: usize) -> usize {
    while b > 0 {
        (a, b) = (b, a % b);
    }
    a
}
