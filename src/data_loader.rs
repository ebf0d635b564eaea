///
/// One minibatch: owned, index-aligned row selections, one per stored
/// sequence. Row `i` of `input` and row `i` of `output` come from the
/// same original sample.
///
pub struct MinibatchData<B> {
    pub input: B,
    pub output: Option<B>,
}

/// `MinibatchSource` for minibatch learning: the training loop calls
/// `next_minibatch` once per iteration, forever. Cursor state lives
/// inside the source, so the call takes no arguments.
pub trait MinibatchSource {
    type Batch;

    /// Draw the next minibatch and advance the internal cursors.
    fn next_minibatch(&mut self) -> MinibatchData<Self::Batch>;

    /// Number of minibatches in one full pass over the data.
    fn num_minibatch(&self) -> usize;

    /// Total number of samples.
    fn num_samples(&self) -> usize;

    /// Return the cursors to their starting state so the stream can
    /// be replayed from the beginning.
    fn reset(&mut self);
}
