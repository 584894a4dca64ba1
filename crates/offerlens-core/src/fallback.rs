//! Ordered fallback resolution
//!
//! Each fallback chain is an ordered list of attempt closures returning an
//! optional value; resolution short-circuits on the first success. Used by
//! the benchmark resolver (exact category, parent category, global default)
//! and available to collaborator adapters.

/// A single named attempt in a fallback chain
pub type Attempt<T> = Box<dyn FnOnce() -> Option<T>>;

/// Run attempts in order and return the first `Some`, with the index of the
/// attempt that produced it.
pub fn first_some<T>(attempts: impl IntoIterator<Item = Attempt<T>>) -> Option<(usize, T)> {
    for (index, attempt) in attempts.into_iter().enumerate() {
        if let Some(value) = attempt() {
            return Some((index, value));
        }
    }
    None
}
