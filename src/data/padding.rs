// ============================================================
// Layer 4 — Sequence Padding and Truncation
// ============================================================
// Shapes an id sequence to a fixed target length. Every feature
// the assembler builds goes through this function, so the whole
// record shape guarantee rests on it.
//
// Truncation and padding sides are independent:
//
//   pad_and_truncate([1,2,3], 5, Post, Post, 0) → [1, 2, 3, 0, 0]
//   pad_and_truncate([1,2,3], 5, Pre,  Post, 0) → [0, 0, 1, 2, 3]
//   pad_and_truncate([1..9],  5, Post, Post, 0) → [1, 2, 3, 4, 5]
//   pad_and_truncate([1..9],  5, Post, Pre,  0) → [5, 6, 7, 8, 9]
//
// Lossless when the input already fits; pure truncation when it
// does not. Callers map an empty token sequence to [0] before
// calling, so the empty case never reaches this function in
// practice — it still behaves (all fill values) if it does.

/// Which end of the sequence an operation applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    /// Keep/fill at the start
    Pre,
    /// Keep/fill at the end
    #[default]
    Post,
}

/// Shape `sequence` to exactly `max_len` ids.
///
/// `truncating` picks which elements survive when the input is too
/// long (Post keeps the first `max_len`, Pre keeps the last).
/// `padding` picks where `fill` goes when the input is too short.
pub fn pad_and_truncate(
    sequence:   &[u32],
    max_len:    usize,
    padding:    Side,
    truncating: Side,
    fill:       u32,
) -> Vec<u32> {
    let kept: &[u32] = if sequence.len() > max_len {
        match truncating {
            Side::Post => &sequence[..max_len],
            Side::Pre  => &sequence[sequence.len() - max_len..],
        }
    } else {
        sequence
    };

    let mut shaped = vec![fill; max_len];
    match padding {
        Side::Post => shaped[..kept.len()].copy_from_slice(kept),
        Side::Pre  => shaped[max_len - kept.len()..].copy_from_slice(kept),
    }
    shaped
}
