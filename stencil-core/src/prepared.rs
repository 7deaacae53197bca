use crate::{AsValue, Result};

/// A driver side statement handle receiving positional values.
///
/// This is the seam between a rendered statement and an execution driver:
/// [`RenderedStatement::bind_to`](crate::RenderedStatement::bind_to) feeds each
/// slot through it, [`RenderedBatch::bind_row_to`](crate::RenderedBatch::bind_row_to)
/// clears it before every row.
///
/// Methods return `&mut Self` for fluent chaining:
/// ```rust,ignore
/// prepared.clear_bindings()?.bind_index(42, 0)?.bind_index("hello", 1)?;
/// ```
pub trait Prepared {
    /// Bind a value at a specific index (from 0).
    fn bind_index<V: AsValue>(&mut self, value: V, index: u64) -> Result<&mut Self>;
    /// Forget every value bound so far, so the handle can be reused.
    fn clear_bindings(&mut self) -> Result<&mut Self>;
}
