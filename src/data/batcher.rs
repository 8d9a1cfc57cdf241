// ============================================================
// Layer 4 — Feature Batcher
// ============================================================
// Implements Burn's Batcher trait to convert a Vec<FeatureRecord>
// into model-ready tensors.
//
// How batching works here:
//   Input:  Vec of N FeatureRecords, sequences of length L
//   Output: FeatureBatch with
//             [N, L]    Int tensors per sequence field
//             [N, 2]    aspect boundary pairs
//             [N, L, L] dependency adjacency matrices
//
//   We flatten each field across all records into one long Vec,
//   then reshape: [r1_t1, ..., r1_tL, r2_t1, ..., rN_tL] → [N, L]
//
// A field a configuration did not request is None on the record;
// the batcher fills it with zeros so every batch has identical
// shape regardless of which inputs the model consumes. That keeps
// batch collation uniform without the records having to carry
// placeholder data.
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::domain::record::FeatureRecord;

// ─── FeatureBatch ─────────────────────────────────────────────────────────────
/// A batch of assembled samples ready for a model forward pass.
/// All tensors have batch_size as their first dimension.
///
/// B is the Burn Backend (e.g. Wgpu, NdArray) —
/// generic so the same batcher works on any device.
#[derive(Debug, Clone)]
pub struct FeatureBatch<B: Backend> {
    /// Full tagged sequences — shape: [batch_size, seq_len]
    pub text_indices: Tensor<B, 2, Int>,

    /// Aspect-free context sequences — shape: [batch_size, seq_len]
    pub context_indices: Tensor<B, 2, Int>,

    /// Clipped left contexts — shape: [batch_size, seq_len]
    pub left_indices: Tensor<B, 2, Int>,

    /// Left context plus aspect — shape: [batch_size, seq_len]
    pub left_with_aspect_indices: Tensor<B, 2, Int>,

    /// Right contexts — shape: [batch_size, seq_len]
    pub right_indices: Tensor<B, 2, Int>,

    /// Aspect plus right context — shape: [batch_size, seq_len]
    pub right_with_aspect_indices: Tensor<B, 2, Int>,

    /// Aspect spans only — shape: [batch_size, seq_len]
    pub aspect_indices: Tensor<B, 2, Int>,

    /// Inclusive aspect boundaries — shape: [batch_size, 2]
    pub aspect_boundary: Tensor<B, 2, Int>,

    /// Adjacency matrices — shape: [batch_size, seq_len, seq_len]
    pub dependency_graph: Tensor<B, 3, Int>,
}

// ─── FeatureBatcher ───────────────────────────────────────────────────────────
/// The batcher struct — holds the target device so tensors are
/// created in the right place, and the fixed sequence length so
/// unrequested fields can be zero-filled to the correct shape.
#[derive(Clone, Debug)]
pub struct FeatureBatcher<B: Backend> {
    pub device:      B::Device,
    pub max_seq_len: usize,
}

impl<B: Backend> FeatureBatcher<B> {
    pub fn new(device: B::Device, max_seq_len: usize) -> Self {
        Self { device, max_seq_len }
    }

    /// Stack one sequence field across all records into [N, L].
    fn stack_sequences(
        &self,
        items: &[FeatureRecord],
        field: impl Fn(&FeatureRecord) -> Option<&Vec<u32>>,
    ) -> Tensor<B, 2, Int> {
        let len = self.max_seq_len;
        let flat: Vec<i32> = items
            .iter()
            .flat_map(|record| match field(record) {
                Some(ids) => ids.iter().map(|&id| id as i32).collect::<Vec<i32>>(),
                None => vec![0; len],
            })
            .collect();

        Tensor::<B, 1, Int>::from_ints(flat.as_slice(), &self.device)
            .reshape([items.len(), len])
    }
}

// ─── Burn Batcher Trait Implementation ────────────────────────────────────────
// This is what makes FeatureBatcher work with Burn's DataLoader.
// The DataLoader calls .batch(items) with each mini-batch of records.
impl<B: Backend> Batcher<FeatureRecord, FeatureBatch<B>> for FeatureBatcher<B> {
    fn batch(&self, items: Vec<FeatureRecord>) -> FeatureBatch<B> {
        let batch_size = items.len();
        let len = self.max_seq_len;

        let text_indices    = self.stack_sequences(&items, |r| r.text_indices.as_ref());
        let context_indices = self.stack_sequences(&items, |r| r.context_indices.as_ref());
        let left_indices    = self.stack_sequences(&items, |r| r.left_indices.as_ref());
        let left_with_aspect_indices =
            self.stack_sequences(&items, |r| r.left_with_aspect_indices.as_ref());
        let right_indices = self.stack_sequences(&items, |r| r.right_indices.as_ref());
        let right_with_aspect_indices =
            self.stack_sequences(&items, |r| r.right_with_aspect_indices.as_ref());
        let aspect_indices = self.stack_sequences(&items, |r| r.aspect_indices.as_ref());

        // ── Aspect boundaries: [N, 2] ─────────────────────────────────────────
        let boundary_flat: Vec<i32> = items
            .iter()
            .flat_map(|record| {
                let [start, end] = record.aspect_boundary.unwrap_or([0, 0]);
                [start as i32, end as i32]
            })
            .collect();
        let aspect_boundary = Tensor::<B, 1, Int>::from_ints(
            boundary_flat.as_slice(), &self.device,
        ).reshape([batch_size, 2]);

        // ── Dependency graphs: [N, L, L] ──────────────────────────────────────
        let graph_flat: Vec<i32> = items
            .iter()
            .flat_map(|record| match record.dependency_graph.as_ref() {
                Some(matrix) => matrix
                    .iter()
                    .flat_map(|row| row.iter().map(|&cell| cell as i32))
                    .collect::<Vec<i32>>(),
                None => vec![0; len * len],
            })
            .collect();
        let dependency_graph = Tensor::<B, 1, Int>::from_ints(
            graph_flat.as_slice(), &self.device,
        ).reshape([batch_size, len, len]);

        FeatureBatch {
            text_indices,
            context_indices,
            left_indices,
            left_with_aspect_indices,
            right_indices,
            right_with_aspect_indices,
            aspect_indices,
            aspect_boundary,
            dependency_graph,
        }
    }
}
