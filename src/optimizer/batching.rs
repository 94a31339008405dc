use crate::error::{RegressionError, Result};
use crate::{Matrix, Vector};
use ndarray::{ArrayView1, ArrayView2, Axis, CowArray, Ix1, Ix2};
use rand::Rng;
use rand::seq::SliceRandom;
use std::num::NonZeroUsize;

/// How one epoch's worth of training data is cut into batches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BatchingPolicy {
    /// The whole training set as a single batch, in its original order.
    Full,
    /// Shuffled every epoch, one sample per batch.
    Single,
    /// Shuffled every epoch, then cut into consecutive chunks. The last chunk
    /// holds the remainder and may be shorter.
    Chunked(NonZeroUsize),
}

#[derive(Clone, Debug)]
pub struct Batch<'a> {
    pub features: ArrayView2<'a, f64>,
    pub targets: ArrayView1<'a, f64>,
}

impl Batch<'_> {
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

/// The ordered batches of a single epoch.
///
/// Borrows the training set when no shuffle is needed and owns a permuted
/// copy otherwise. Iterating is restartable; a fresh value is built for
/// every epoch.
#[derive(Debug)]
pub struct EpochBatches<'a> {
    features: CowArray<'a, f64, Ix2>,
    targets: CowArray<'a, f64, Ix1>,
    batch_size: usize,
}

impl BatchingPolicy {
    pub fn shuffles(&self) -> bool {
        !matches!(self, BatchingPolicy::Full)
    }

    pub fn batch_size(&self, n_samples: usize) -> usize {
        match self {
            BatchingPolicy::Full => n_samples.max(1),
            BatchingPolicy::Single => 1,
            BatchingPolicy::Chunked(size) => size.get(),
        }
    }

    /// Lays out the batches of one epoch, drawing the shuffle from `rng`.
    ///
    /// [`BatchingPolicy::Full`] never touches `rng`.
    pub fn epoch<'a, R: Rng>(
        &self,
        x: ArrayView2<'a, f64>,
        y: ArrayView1<'a, f64>,
        rng: &mut R,
    ) -> Result<EpochBatches<'a>> {
        if x.nrows() != y.len() {
            return Err(RegressionError::mismatch("targets", x.nrows(), y.len()));
        }
        if y.is_empty() {
            return Err(RegressionError::EmptyBatch);
        }

        let batch_size = self.batch_size(y.len());
        let (features, targets) = if self.shuffles() {
            let (x, y) = shuffle(x, y, rng);
            (CowArray::from(x), CowArray::from(y))
        } else {
            (CowArray::from(x), CowArray::from(y))
        };

        Ok(EpochBatches {
            features,
            targets,
            batch_size,
        })
    }
}

impl EpochBatches<'_> {
    pub fn len(&self) -> usize {
        self.targets.len().div_ceil(self.batch_size)
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Batch<'_>> {
        self.features
            .axis_chunks_iter(Axis(0), self.batch_size)
            .zip(self.targets.axis_chunks_iter(Axis(0), self.batch_size))
            .map(|(features, targets)| Batch { features, targets })
    }
}

/// Applies one random permutation to the rows of `x` and to `y`, keeping
/// every sample paired with its target.
pub fn shuffle<R: Rng>(
    x: ArrayView2<'_, f64>,
    y: ArrayView1<'_, f64>,
    rng: &mut R,
) -> (Matrix, Vector) {
    let mut indices: Vec<usize> = (0..x.nrows()).collect();
    indices.shuffle(rng);
    (x.select(Axis(0), &indices), y.select(Axis(0), &indices))
}
