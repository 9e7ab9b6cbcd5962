//! Column slabs: the unit of work handed to one render thread.
//!
//! A region's columns are cut into `threads` contiguous, disjoint slabs of
//! `slab_size` columns. The last slab also takes whatever columns integer
//! division left over, so the slabs always cover the region exactly.

use crate::world::Region;
use crate::Colour;

/// A contiguous column range of the region, rendered by one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slab {
    /// First column (inclusive)
    pub start_col: u32,
    /// One past the last column
    pub end_col: u32,
    /// Index of this slab, left to right
    pub index: usize,
}

impl Slab {
    pub fn new(start_col: u32, end_col: u32, index: usize) -> Self {
        Self {
            start_col,
            end_col,
            index,
        }
    }

    /// Number of columns in this slab.
    pub fn width(&self) -> u32 {
        self.end_col - self.start_col
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0
    }
}

/// Split `region`'s columns into `threads` slabs of `slab_size` columns.
///
/// Slab `i < threads - 1` covers `start + i * slab_size .. start + (i + 1) * slab_size`;
/// the last slab runs to `end_col`. When the region is narrower than `threads`,
/// `slab_size` is zero and the last slab holds every column.
pub fn generate_slabs(region: &Region, slab_size: u32, threads: u32) -> Vec<Slab> {
    let last = threads.saturating_sub(1);

    (0..threads)
        .map(|i| {
            let start = region.start_col + i * slab_size;
            let end = if i == last {
                region.end_col
            } else {
                start + slab_size
            };
            Slab::new(start, end, i as usize)
        })
        .collect()
}

/// Cut a region-sized image buffer into per-slab row segments.
///
/// Entry `i` of the result holds, for every region row top to bottom, the
/// mutable columns of slab `i` in that row. The segments are disjoint
/// borrows, so each can be moved to its own thread.
pub fn split_rows<'a>(
    image: &'a mut [Colour],
    region_width: u32,
    slabs: &[Slab],
) -> Vec<Vec<&'a mut [Colour]>> {
    let mut segments: Vec<Vec<&'a mut [Colour]>> = slabs.iter().map(|_| Vec::new()).collect();

    for row in image.chunks_exact_mut(region_width as usize) {
        let mut rest = row;
        for (slab, rows) in slabs.iter().zip(segments.iter_mut()) {
            let (segment, tail) = std::mem::take(&mut rest).split_at_mut(slab.width() as usize);
            rows.push(segment);
            rest = tail;
        }
        debug_assert!(rest.is_empty());
    }

    segments
}
