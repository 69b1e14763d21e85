use std::{mem::size_of, time::Instant};

use rand::{rngs::StdRng, Rng, SeedableRng};
use segtree::{Operation, SegmentTree, SegtreeError, Value};
use tracing::{error, info};

/// Elements in the trees used for the query and update runs.
const SMALL: usize = 1000;

#[derive(clap::Args, Debug)]
pub struct Params {
    /// Number of elements for the construction run.
    #[clap(short, long, default_value_t = 100_000)]
    size: usize,
    /// Number of queries and updates per run.
    #[clap(short, long, default_value_t = 10_000)]
    queries: usize,
    /// Seed for the random inputs. Drawn at random when absent.
    #[clap(long)]
    seed: Option<u64>,
}

/// Run every phase. Returns whether all trees passed validation.
pub fn run(params: &Params) -> Result<bool, SegtreeError> {
    let seed = params.seed.unwrap_or_else(rand::random);
    info!(seed, size = params.size, queries = params.queries, "starting benchmark");
    let rng = &mut StdRng::seed_from_u64(seed);

    let valid = [
        construction(params.size, rng)?,
        queries(params.queries, rng)?,
        updates(params.queries, rng)?,
        lazy(params.queries, rng)?,
    ];
    memory(rng)?;
    Ok(valid.iter().all(|&v| v))
}

/// Validate `st` after `phase`, logging a failure.
fn checked<T: Value>(st: &SegmentTree<T>, phase: &str) -> bool {
    let valid = st.validate();
    if !valid {
        error!(phase, "tree failed validation");
    }
    valid
}

fn random_values(n: usize, max: i64, rng: &mut impl Rng) -> Vec<i64> {
    (0..n).map(|_| rng.gen_range(1..=max)).collect()
}

fn random_range(n: usize, rng: &mut impl Rng) -> (usize, usize) {
    let (a, b) = (rng.gen_range(0..n), rng.gen_range(0..n));
    (a.min(b), a.max(b))
}

fn construction(n: usize, rng: &mut impl Rng) -> Result<bool, SegtreeError> {
    println!("=== Construction: {n} elements ===");
    let a = random_values(n, 1000, rng);
    let start = Instant::now();
    let st = SegmentTree::new(&a, Operation::Sum)?;
    println!("Construction time: {:?}", start.elapsed());
    println!("Capacity: {}", st.capacity());
    Ok(checked(&st, "construction"))
}

fn queries(count: usize, rng: &mut impl Rng) -> Result<bool, SegtreeError> {
    println!("=== Queries: {count} on {SMALL} elements ===");
    let a = random_values(SMALL, 100, rng);
    let mut st = SegmentTree::new(&a, Operation::Sum)?;
    let start = Instant::now();
    for _ in 0..count {
        let (l, r) = random_range(SMALL, rng);
        st.query(l..=r)?;
    }
    println!("Total time: {:?}", start.elapsed());
    print!("{}", st.stats());
    Ok(checked(&st, "queries"))
}

fn updates(count: usize, rng: &mut impl Rng) -> Result<bool, SegtreeError> {
    println!("=== Point updates: {count} on {SMALL} elements ===");
    let a = random_values(SMALL, 100, rng);
    let mut st = SegmentTree::new(&a, Operation::Sum)?;
    let start = Instant::now();
    for _ in 0..count {
        st.update_point(rng.gen_range(0..SMALL), rng.gen_range(1..=1000))?;
    }
    println!("Total time: {:?}", start.elapsed());
    print!("{}", st.stats());
    Ok(checked(&st, "updates"))
}

fn lazy(count: usize, rng: &mut impl Rng) -> Result<bool, SegtreeError> {
    println!("=== Lazy: {} range updates and queries on {SMALL} elements ===", count / 2);
    let a = random_values(SMALL, 100, rng);
    let mut st = SegmentTree::new_lazy(&a, Operation::Sum)?;
    let start = Instant::now();
    for _ in 0..count / 2 {
        let (l, r) = random_range(SMALL, rng);
        st.update_range(l..=r, rng.gen_range(1..=100))?;
        let (l, r) = random_range(SMALL, rng);
        st.query(l..=r)?;
    }
    println!("Total time: {:?}", start.elapsed());
    print!("{}", st.stats());
    Ok(checked(&st, "lazy"))
}

fn memory(rng: &mut impl Rng) -> Result<(), SegtreeError> {
    println!("=== Memory ===");
    for n in [100, 1000, 10_000, 100_000] {
        let a = random_values(n, 1000, rng);
        let st = SegmentTree::new(&a, Operation::Sum)?;
        let slots = 2 * st.capacity();
        println!(
            "Size: {n}, slots: {slots}, tree: {} bytes, with lazy: {} bytes",
            slots * size_of::<i64>(),
            slots * (size_of::<i64>() + size_of::<Option<i64>>()),
        );
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn small_run() {
        let params = Params {
            size: 500,
            queries: 200,
            seed: Some(42),
        };
        assert!(run(&params) == Ok(true));
    }

    #[test]
    fn invalid_tree_is_reported() {
        // An identity that is not neutral for addition.
        let st = SegmentTree::with_custom(&[1i64, 2, 3], |a: i64, b: i64| a + b, 5).unwrap();
        assert!(!checked(&st, "custom"));

        let st = SegmentTree::new(&[1i64, 2, 3], Operation::Sum).unwrap();
        assert!(checked(&st, "sum"));
    }
}
