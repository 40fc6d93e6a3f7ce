use rstest::rstest;
use rvemu_core::common::{CacheAddr, DramAddr};

#[rstest]
#[case::zero(0x0000_0000, 0, 0, 0)]
#[case::last_word(0x0000_001C, 0, 0, 7)]
#[case::next_set(0x0000_0020, 0, 1, 0)]
#[case::last_set(0x0000_1FE4, 0, 255, 1)]
#[case::first_tag(0x0000_2000, 1, 0, 0)]
#[case::top(0xFFFF_FFFF, 0x7_FFFF, 255, 7)]
fn cache_fields(#[case] addr: u32, #[case] tag: u32, #[case] index: usize, #[case] block: usize) {
    let a = CacheAddr(addr);
    assert_eq!(a.tag(), tag);
    assert_eq!(a.index(), index);
    assert_eq!(a.block(), block);
}

#[test]
fn line_address_round_trips_through_parts() {
    let a = CacheAddr(0x1234_5678);
    assert_eq!(a.line(), 0x1234_5660);
    assert_eq!(CacheAddr::from_parts(a.tag(), a.index()).0, a.line());
}

#[test]
fn conflicting_addresses_share_a_set() {
    let sets: Vec<usize> = [0x0000, 0x2000, 0x4000]
        .into_iter()
        .map(|a| CacheAddr(a).index())
        .collect();
    assert_eq!(sets, vec![0, 0, 0]);
}

#[test]
fn dram_fields() {
    let a = DramAddr::decode(0x0300_0800);
    assert_eq!(a.bank, 3);
    assert_eq!(a.row, 1);
    assert_eq!(a.column, 0);

    let b = DramAddr::decode(0x0000_07FE);
    assert_eq!((b.row, b.column), (0, 0x3FF));
}
