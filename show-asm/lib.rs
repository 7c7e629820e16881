#[inline(never)]
pub fn hash_xxh32(bytes: &[u8], seed: u32) -> u32 {
    xxhash_digest::xxh32::hash_with_seed(bytes, seed)
}

#[inline(never)]
pub fn hash_xxh64(bytes: &[u8], seed: u64) -> u64 {
    xxhash_digest::xxh64::hash_with_seed(bytes, seed)
}

#[inline(never)]
pub fn write_xxh64(hasher: &mut xxhash_digest::Xxh64, bytes: &[u8]) -> usize {
    hasher.write(bytes)
}

#[inline(never)]
pub fn rapidhash(bytes: &[u8], seed: u64) -> u64 {
    rapidhash::rapidhash_inline(bytes, seed)
}
