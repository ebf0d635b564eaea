use crate::cyclic_loader::check_batch_size;
use crate::data_loader::{MinibatchData, MinibatchSource};
use crate::rows::RowChunks;

use rand::prelude::SliceRandom;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

///
/// A minibatch loader that draws a fresh random permutation of the
/// sample indexes at the start of every epoch and partitions it into
/// `batch_size`-row chunks. The last chunk is padded with uniform
/// re-draws so every minibatch has exactly `batch_size` rows.
///
pub struct ShuffledData<D: RowChunks> {
    input_data: D,
    output_data: Option<D>,
    batch_size: usize,
    rng: StdRng,
    chunks: Vec<Vec<usize>>,
    next_chunk: usize,
}

impl<D: RowChunks> ShuffledData<D> {
    ///
    /// Create a shuffled loader over the main data `input_data`,
    /// drawing `batch_size` rows per minibatch
    ///
    pub fn new(input_data: D, batch_size: usize) -> anyhow::Result<Self> {
        let ntot = input_data.num_rows();
        check_batch_size(batch_size, ntot)?;

        let mut data = Self {
            input_data,
            output_data: None,
            batch_size,
            rng: StdRng::from_os_rng(),
            chunks: vec![],
            next_chunk: 0,
        };
        data.reshuffle();
        Ok(data)
    }

    ///
    /// Create a shuffled loader over the main data `input_data` and
    /// the row-aligned output data `output_data`
    ///
    pub fn new_with_output(
        input_data: D,
        output_data: D,
        batch_size: usize,
    ) -> anyhow::Result<Self> {
        let ntot = input_data.num_rows();

        if output_data.num_rows() != ntot {
            return Err(anyhow::anyhow!(
                "check input rows {} vs. output rows {}",
                ntot,
                output_data.num_rows()
            ));
        }

        check_batch_size(batch_size, ntot)?;

        let mut data = Self {
            input_data,
            output_data: Some(output_data),
            batch_size,
            rng: StdRng::from_os_rng(),
            chunks: vec![],
            next_chunk: 0,
        };
        data.reshuffle();
        Ok(data)
    }

    /// Replace the random source with a seeded one and reshuffle, so
    /// that two loaders seeded alike draw identical batch streams.
    pub fn seeded(mut self, rseed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(rseed);
        self.reshuffle();
        self
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    fn reshuffle(&mut self) {
        let ntot = self.input_data.num_rows();

        let mut samples: Vec<usize> = (0..ntot).collect();
        samples.shuffle(&mut self.rng);

        let nbatch = ntot.div_ceil(self.batch_size);
        let npad = nbatch * self.batch_size - ntot;

        for _ in 0..npad {
            samples.push(self.rng.random_range(0..ntot));
        }

        self.chunks = (0..nbatch)
            .into_par_iter()
            .map(|b| {
                let lb = b * self.batch_size;
                let ub = (b + 1) * self.batch_size;
                samples[lb..ub].to_vec()
            })
            .collect::<Vec<Vec<usize>>>();

        self.next_chunk = 0;
    }
}

impl<D: RowChunks> MinibatchSource for ShuffledData<D> {
    type Batch = D::Batch;

    fn next_minibatch(&mut self) -> MinibatchData<Self::Batch> {
        if self.next_chunk >= self.chunks.len() {
            self.reshuffle();
        }

        let rows = &self.chunks[self.next_chunk];
        self.next_chunk += 1;

        MinibatchData {
            input: self.input_data.take_rows(rows),
            output: self.output_data.as_ref().map(|out| out.take_rows(rows)),
        }
    }

    fn num_minibatch(&self) -> usize {
        self.chunks.len()
    }

    fn num_samples(&self) -> usize {
        self.input_data.num_rows()
    }

    fn reset(&mut self) {
        self.reshuffle();
    }
}

impl<D: RowChunks> Iterator for ShuffledData<D> {
    type Item = MinibatchData<D::Batch>;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_minibatch())
    }
}
