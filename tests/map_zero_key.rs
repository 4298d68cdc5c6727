use llmap::{LongLongMap, SliceMemory};
use test_log::test;

#[test]
fn map_zero_key_single_slot() -> llmap::Result<()> {
    let mut map = LongLongMap::new(SliceMemory::new(vec![0u8; 16]), 0, 16)?;

    map.put(0, 123_456)?;
    assert_eq!(123_456, map.get(0));

    Ok(())
}

#[test]
fn map_zero_key_alongside_others() -> llmap::Result<()> {
    let mut map = LongLongMap::new(SliceMemory::new(vec![0u8; 1_024]), 0, 1_024)?;

    map.put(0, -7)?;

    for key in 1..32 {
        map.put(key, key * 10)?;
    }

    assert_eq!(-7, map.get(0));

    for key in 1..32 {
        assert_eq!(key * 10, map.get(key));
    }

    // Other empty slots are not confused with key 0
    for key in 32..64 {
        assert_eq!(0, map.get(key));
    }

    Ok(())
}

#[test]
fn map_zero_key_after_collision() -> llmap::Result<()> {
    // 4 slots, key 4 takes slot 0 which is where key 0 starts probing
    let mut map = LongLongMap::new(SliceMemory::new(vec![0u8; 64]), 0, 64)?;

    map.put(4, 40)?;
    assert_eq!(0, map.put(0, 1)?);
    assert_eq!(1, map.put(0, 2)?);

    assert_eq!(2, map.get(0));
    assert_eq!(40, map.get(4));

    Ok(())
}
