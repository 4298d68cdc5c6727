use llmap::{LongLongMap, RawMemory};
use test_log::test;

#[test]
fn raw_memory_map_roundtrip() -> llmap::Result<()> {
    const CAPACITY: usize = 1_024;

    // Allocated, owned and freed by the test, not by the map
    let mut region = vec![u64::MAX; CAPACITY * 2];
    let base = region.as_mut_ptr().expose_provenance() as u64;
    let size = (region.len() * std::mem::size_of::<u64>()) as u64;

    // SAFETY: `region` outlives the map and is not touched while it is in use
    let memory = unsafe { RawMemory::new() };

    {
        let mut map = LongLongMap::new(memory, base, size)?;
        assert_eq!(CAPACITY as u64, map.capacity());

        for key in 1..=CAPACITY as i64 {
            assert_eq!(0, map.put(key * 7, -key)?);
        }

        for key in 1..=CAPACITY as i64 {
            assert_eq!(-key, map.get(key * 7));
        }

        assert!(map.put(1, 1).is_err());
    }

    // Each slot is (key, value), little-endian
    assert!(region
        .chunks_exact(2)
        .all(|slot| u64::from_le(slot[0]) % 7 == 0 && slot[0] != 0));

    Ok(())
}

#[test]
fn raw_memory_map_in_sub_region() -> llmap::Result<()> {
    let mut region = vec![0xFFu8; 16 * 10];
    let base = region.as_mut_ptr().expose_provenance() as u64;

    // SAFETY: `region` outlives the map and is not touched while it is in use
    let memory = unsafe { RawMemory::new() };

    // Skip the first 3 bytes, so the map is not word-aligned
    {
        let mut map = LongLongMap::new(memory, base + 3, 16 * 8)?;
        map.put(1, 2)?;
        assert_eq!(2, map.get(1));
    }

    assert!(region[..3].iter().all(|&b| b == 0xFF));
    assert!(region[3 + 16 * 8..].iter().all(|&b| b == 0xFF));

    Ok(())
}
