//! First-fit pool of free address blocks
//!
//! The pool is an ordered list of disjoint blocks. Carving a subnet removes
//! its parent and appends the parent's leftover fragments at the end, so
//! scan order (and therefore which addresses a demand receives) depends on
//! allocation history. Blocks are never merged back.

use crate::models::AddressBlock;
use crate::{Error, Result};

/// Free blocks in scan order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreePool {
    blocks: Vec<AddressBlock>,
}

impl FreePool {
    /// Pool holding the whole base network
    pub fn new(base: AddressBlock) -> Self {
        Self { blocks: vec![base] }
    }

    /// Position of the first block with at least `required` addresses
    pub fn first_fit(&self, required: u64) -> Option<usize> {
        self.blocks.iter().position(|block| block.size() >= required)
    }

    /// Carve the lowest /`prefix_len` out of the block at `position`
    ///
    /// The parent leaves the pool and its remainder is appended, largest
    /// fragment first. Returns the carved block and its parent.
    pub fn carve(&mut self, position: usize, prefix_len: u8) -> Result<(AddressBlock, AddressBlock)> {
        let parent = self.blocks.get(position).copied().ok_or_else(|| {
            Error::InvalidArgument(format!("no free block at position {}", position))
        })?;
        let carved = parent.first_subnet(prefix_len).ok_or_else(|| {
            Error::BlockOutOfRange(format!("/{}", prefix_len), parent.to_string())
        })?;
        let fragments = parent.exclude(&carved)?;

        self.blocks.remove(position);
        self.blocks.extend(fragments);

        Ok((carved, parent))
    }

    /// Free blocks in scan order
    pub fn blocks(&self) -> &[AddressBlock] {
        &self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Addresses still free across all blocks
    pub fn free_addresses(&self) -> u64 {
        self.blocks.iter().map(AddressBlock::size).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(s: &str) -> AddressBlock {
        s.parse().unwrap()
    }

    #[test]
    fn test_first_fit_takes_pool_order() {
        let mut pool = FreePool::new(block("10.0.0.0/24"));
        pool.carve(0, 26).unwrap();
        // [10.0.0.128/25, 10.0.0.64/26]
        assert_eq!(pool.first_fit(60), Some(0));
        assert_eq!(pool.first_fit(200), None);

        pool.carve(0, 26).unwrap();
        // [10.0.0.64/26, 10.0.0.192/26] - first fit, not best fit
        assert_eq!(pool.blocks(), &[block("10.0.0.64/26"), block("10.0.0.192/26")]);
        assert_eq!(pool.first_fit(4), Some(0));
    }

    #[test]
    fn test_carve_appends_fragments() {
        let mut pool = FreePool::new(block("169.128.8.0/21"));

        let (carved, parent) = pool.carve(0, 23).unwrap();
        assert_eq!(carved, block("169.128.8.0/23"));
        assert_eq!(parent, block("169.128.8.0/21"));
        assert_eq!(
            pool.blocks(),
            &[block("169.128.12.0/22"), block("169.128.10.0/23")]
        );

        let (carved, _) = pool.carve(0, 26).unwrap();
        assert_eq!(carved, block("169.128.12.0/26"));
        assert_eq!(
            pool.blocks(),
            &[
                block("169.128.10.0/23"),
                block("169.128.14.0/23"),
                block("169.128.13.0/24"),
                block("169.128.12.128/25"),
                block("169.128.12.64/26"),
            ]
        );
    }

    #[test]
    fn test_carve_whole_block() {
        let mut pool = FreePool::new(block("10.0.0.0/30"));
        let (carved, _) = pool.carve(0, 30).unwrap();

        assert_eq!(carved, block("10.0.0.0/30"));
        assert!(pool.is_empty());
        assert_eq!(pool.free_addresses(), 0);
    }

    #[test]
    fn test_carve_rejects_larger_prefix() {
        let mut pool = FreePool::new(block("10.0.0.0/24"));
        let result = pool.carve(0, 16);

        assert!(matches!(result, Err(Error::BlockOutOfRange(_, _))));
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn test_free_addresses_conserved() {
        let mut pool = FreePool::new(block("10.0.0.0/20"));
        let mut carved_total = 0;
        for prefix in [22, 25, 30, 28] {
            let position = pool.first_fit(1u64 << (32 - prefix)).unwrap();
            let (carved, _) = pool.carve(position, prefix).unwrap();
            carved_total += carved.size();
        }

        assert_eq!(pool.free_addresses() + carved_total, 4096);
    }
}
