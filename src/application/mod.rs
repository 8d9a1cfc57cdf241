// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates all the other layers to accomplish
// a specific goal (preparing a dataset or inspecting one line).
//
// Rules for this layer:
//   - No parsing or tokenization logic here
//   - No UI or printing here (that's Layer 1)
//   - No direct file-format knowledge (that's Layer 4 and 6)
//   - Only workflow coordination
//
// Think of this layer as the "director" — it tells other
// layers what to do but doesn't do the work itself.
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// The corpus preparation workflow
pub mod prepare_use_case;

// The single-line inspection workflow
pub mod inspect_use_case;
