#![no_main]

use arbitrary::Arbitrary;
use bee_layout::{
    ApportionColumn, UnderflowPolicy, apportion_column_widths, try_apportion_column_widths,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    next_total_width: u32,
    columns: Vec<(u32, u32)>,
}

fuzz_target!(|input: Input| {
    let columns: Vec<ApportionColumn> = input
        .columns
        .iter()
        .take(64)
        .map(|&(current, min)| ApportionColumn::new(current, min))
        .collect();
    let target = input.next_total_width;
    let min_total: u64 = columns.iter().map(|c| u64::from(c.min_width)).sum();

    let widths = apportion_column_widths(target, &columns);
    assert_eq!(widths.len(), columns.len());
    for (w, c) in widths.iter().zip(&columns) {
        assert!(*w >= c.min_width);
    }
    if columns.is_empty() {
        return;
    }
    if u64::from(target) >= min_total {
        assert_eq!(widths.iter().map(|&w| u64::from(w)).sum::<u64>(), u64::from(target));
    } else {
        assert!(try_apportion_column_widths(target, &columns, UnderflowPolicy::Reject).is_err());
    }
});
