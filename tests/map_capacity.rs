use llmap::{Config, Error, LongLongMap, SliceMemory};
use test_log::test;

#[test]
fn map_capacity_exhausted() -> llmap::Result<()> {
    const SIZE: u64 = 1_024;

    let mut map = LongLongMap::new(SliceMemory::new(vec![0u8; SIZE as usize]), 0, SIZE)?;
    assert_eq!(64, map.capacity());

    for key in 1..=64 {
        assert_eq!(0, map.put(key, key)?);
    }

    let err = map.put(65, 65).expect_err("should be full");
    assert_eq!(Error::OutOfCapacity { capacity: 64 }, err);
    assert!(err.to_string().contains("out of capacity"));

    // Previous entries are intact
    for key in 1..=64 {
        assert_eq!(key, map.get(key));
    }
    assert_eq!(0, map.get(65));

    // Existing keys can still be updated
    assert_eq!(64, map.put(64, -64)?);
    assert_eq!(-64, map.get(64));

    Ok(())
}

#[test]
fn map_capacity_ignores_trailing_bytes() -> llmap::Result<()> {
    let mut map = LongLongMap::new(SliceMemory::new(vec![0u8; 40]), 0, 40)?;
    assert_eq!(2, map.capacity());

    map.put(1, 1)?;
    map.put(2, 2)?;
    assert_eq!(Err(Error::OutOfCapacity { capacity: 2 }), map.put(3, 3));

    Ok(())
}

#[test]
fn map_capacity_region_too_small() {
    for size in [0, 1, 8, 15] {
        let result = LongLongMap::new(SliceMemory::new(vec![0u8; 16]), 0, size);
        assert_eq!(Some(Error::RegionTooSmall { size }), result.err());
    }
}

#[test]
fn map_capacity_region_overflows() {
    let result = Config::new(u64::MAX - 15, 32).open(SliceMemory::new(vec![0u8; 16]));
    assert_eq!(
        Some(Error::AddressOverflow {
            base_address: u64::MAX - 15,
            size: 32,
        }),
        result.err()
    );
}

#[test]
fn map_capacity_error_leaves_memory_untouched() {
    let mut memory = SliceMemory::new(vec![0xABu8; 16]);

    assert!(Config::new(0, 8).open(&mut memory).is_err());
    assert!(memory.bytes().iter().all(|&b| b == 0xAB));
}
