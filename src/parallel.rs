//! Fan-out over particle indices, with a join before returning.

use rayon::prelude::*;

/// Compute `f(i)` for each `i` in `0..n`, returning results in index order. Every call has
/// completed when this returns, so a caller can commit the results as one pass.
///
/// `f` must only read shared state; writes belong after the join. With `parallel` unset, runs on
/// the calling thread. Both paths give identical results.
pub fn map_indexed<R, F>(n: usize, parallel: bool, f: F) -> Vec<R>
where
    R: Send,
    F: Fn(usize) -> R + Sync + Send,
{
    if parallel {
        (0..n).into_par_iter().map(f).collect()
    } else {
        (0..n).map(f).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordered() {
        let input: Vec<f64> = (0..1_000).map(|i| i as f64 * 0.5).collect();

        let seq = map_indexed(input.len(), false, |i| input[i] * 2.);
        let par = map_indexed(input.len(), true, |i| input[i] * 2.);

        assert_eq!(seq, par);
        assert_eq!(seq[999], 999.);
    }

    #[test]
    fn empty() {
        let out: Vec<usize> = map_indexed(0, true, |i| i);
        assert!(out.is_empty());
    }
}
