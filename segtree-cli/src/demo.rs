use std::ops::RangeInclusive;

use clap::ValueEnum;
use itertools::Itertools;
use segtree::{Operation, SegmentTree, SegtreeError, Value};
use tracing::info;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Example {
    /// Range sums with point updates.
    Sum,
    /// Range minimum and maximum side by side.
    MinMax,
    /// Range additions with lazy propagation.
    Lazy,
    /// A product tree built from a custom operation.
    Custom,
}

pub fn run(example: Example, dump: bool) -> Result<(), SegtreeError> {
    info!(?example, "running demo");
    match example {
        Example::Sum => sum(dump),
        Example::MinMax => min_max(dump),
        Example::Lazy => lazy(dump),
        Example::Custom => custom(dump),
    }
}

/// Query `range` and print the result.
fn show<T: Value>(
    st: &mut SegmentTree<T>,
    range: RangeInclusive<usize>,
) -> Result<T, SegtreeError> {
    let (l, r) = (*range.start(), *range.end());
    let x = st.query(range)?;
    println!("{} of range [{l}, {r}]: {x}", st.operation());
    Ok(x)
}

fn finish<T: Value>(st: &SegmentTree<T>, dump: bool) {
    if dump {
        println!("{}", st.dump());
    }
    println!("{}", st.stats());
}

fn sum(dump: bool) -> Result<(), SegtreeError> {
    let a = [1i64, 3, 5, 7, 9, 11, 13, 15];
    println!("Original array: {}", a.iter().join(" "));
    let mut st = SegmentTree::new(&a, Operation::Sum)?;

    show(&mut st, 0..=7)?;
    show(&mut st, 2..=5)?;
    show(&mut st, 0..=0)?;

    println!("Updating index 3 from {} to 20", a[3]);
    st.update_point(3, 20)?;
    show(&mut st, 0..=7)?;
    show(&mut st, 2..=5)?;

    println!("Updating index 0 to 10 and index 7 to 25");
    st.update_point(0, 10)?;
    st.update_point(7, 25)?;
    show(&mut st, 0..=7)?;

    finish(&st, dump);
    Ok(())
}

fn min_max(dump: bool) -> Result<(), SegtreeError> {
    let a = [8i64, 3, 12, 1, 6, 9, 15, 2];
    println!("Original array: {}", a.iter().join(" "));
    let mut min = SegmentTree::new(&a, Operation::Min)?;
    let mut max = SegmentTree::new(&a, Operation::Max)?;

    for range in [0..=7, 2..=5, 0..=2] {
        show(&mut min, range.clone())?;
        show(&mut max, range)?;
    }

    println!("Updating index 3 from {} to 20 (min tree)", a[3]);
    min.update_point(3, 20)?;
    show(&mut min, 0..=7)?;
    println!("Updating index 6 from {} to 1 (max tree)", a[6]);
    max.update_point(6, 1)?;
    show(&mut max, 0..=7)?;

    println!("Prefix extremes:");
    for i in 0..a.len() {
        let (lo, hi) = (min.query(..=i)?, max.query(..=i)?);
        println!("  [0, {i}]: min {lo}, max {hi}");
    }

    finish(&min, dump);
    finish(&max, dump);
    Ok(())
}

fn lazy(dump: bool) -> Result<(), SegtreeError> {
    let a = [1i64, 2, 3, 4, 5, 6, 7, 8];
    println!("Original array: {}", a.iter().join(" "));
    let mut st = SegmentTree::new_lazy(&a, Operation::Sum)?;
    show(&mut st, 0..=7)?;
    show(&mut st, 2..=5)?;

    println!("Adding 10 to range [1, 4]");
    st.update_range(1..=4, 10)?;
    show(&mut st, 0..=7)?;
    show(&mut st, 1..=4)?;
    show(&mut st, 0..=0)?;
    show(&mut st, 5..=7)?;
    if dump {
        println!("{}", st.dump());
    }

    println!("Adding 5 to range [0, 2], 3 to range [6, 7], 2 to range [1, 5]");
    st.update_range(0..=2, 5)?;
    st.update_range(6..=7, 3)?;
    st.update_range(1..=5, 2)?;
    show(&mut st, 0..=7)?;

    let elements = (0..a.len())
        .map(|i| st.query(i..=i))
        .collect::<Result<Vec<_>, _>>()?;
    println!("Elements: {}", elements.iter().join(" "));

    println!("Setting index 3 to 100, then adding 1 to range [2, 4]");
    st.update_point(3, 100)?;
    st.update_range(2..=4, 1)?;
    show(&mut st, 2..=4)?;

    finish(&st, dump);
    Ok(())
}

fn custom(dump: bool) -> Result<(), SegtreeError> {
    let a = [2i64, 3, 4, 5];
    println!("Original array: {}", a.iter().join(" "));
    let mut st = SegmentTree::with_custom(&a, |x: i64, y: i64| x * y, 1)?;
    show(&mut st, 0..=3)?;
    show(&mut st, 1..=2)?;

    println!("Updating index 1 from {} to 6", a[1]);
    st.update_point(1, 6)?;
    show(&mut st, 0..=3)?;

    if let Err(e) = st.update_range(0..=1, 2) {
        println!("Range update rejected: {e}");
    }

    finish(&st, dump);
    Ok(())
}
