//! HeightIndex - per-column item offsets via a Fenwick tree
//!
//! Each column keeps one of these so the render surface can ask "where does
//! item *i* start" and "which item sits at *y*" without walking the column.
//! Heights are whole pixels; the engine's running accumulators stay
//! fractional and are the source of truth for placement.
//!
//! # Complexity
//!
//! - `push`: O(log n) amortized (O(n) when the backing tree grows)
//! - `set`: O(log n)
//! - `top_of` / `prefix_sum`: O(log n)
//! - `lower_bound`: O(log² n)
//! - `height`, `len`, `clear`: O(1) / O(1) / O(n)

/// Fenwick-backed prefix sums over a column's item heights.
#[derive(Debug, Clone, Default)]
pub struct HeightIndex {
    /// Fenwick tree, sized to capacity. Always consistent with `heights`.
    tree: Vec<isize>,
    /// Plain heights, kept for O(1) lookups and for rebuilding on growth.
    heights: Vec<usize>,
}

impl HeightIndex {
    /// Creates an empty index with room for `capacity` items before the
    /// tree has to be rebuilt.
    ///
    /// # Examples
    ///
    /// ```
    /// # use waterfall::layout::height_index::HeightIndex;
    /// let index = HeightIndex::new(16);
    /// assert!(index.is_empty());
    /// assert_eq!(index.total(), 0);
    /// ```
    pub fn new(capacity: usize) -> Self {
        Self {
            tree: vec![0; capacity],
            heights: Vec::with_capacity(capacity),
        }
    }

    /// Appends an item of the given height.
    ///
    /// # Examples
    ///
    /// ```
    /// # use waterfall::layout::height_index::HeightIndex;
    /// let mut index = HeightIndex::new(1);
    /// index.push(5);
    /// index.push(3);
    /// assert_eq!(index.total(), 8);
    /// ```
    pub fn push(&mut self, height: usize) {
        let idx = self.heights.len();
        self.heights.push(height);

        if idx >= self.tree.len() {
            // Zero-extending a Fenwick tree leaves the new interior nodes
            // missing their older children, so rebuild from scratch.
            self.rebuild((self.tree.len().max(1) * 2).max(idx + 1));
        } else {
            fenwick::array::update(&mut self.tree, idx, height as isize);
        }
    }

    /// Replaces the height at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn set(&mut self, index: usize, height: usize) {
        assert!(
            index < self.len(),
            "index {} out of bounds (len: {})",
            index,
            self.len()
        );

        let delta = height as isize - self.heights[index] as isize;
        self.heights[index] = height;
        if delta != 0 {
            fenwick::array::update(&mut self.tree, index, delta);
        }
    }

    /// Height of the item at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn height(&self, index: usize) -> usize {
        self.heights[index]
    }

    /// Cumulative height up to and including `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn prefix_sum(&self, index: usize) -> usize {
        assert!(
            index < self.len(),
            "index {} out of bounds (len: {})",
            index,
            self.len()
        );
        fenwick::array::prefix_sum(&self.tree, index).max(0) as usize
    }

    /// Vertical offset at which the item at `index` starts.
    ///
    /// # Examples
    ///
    /// ```
    /// # use waterfall::layout::height_index::HeightIndex;
    /// let mut index = HeightIndex::new(4);
    /// index.push(10);
    /// index.push(20);
    /// assert_eq!(index.top_of(0), 0);
    /// assert_eq!(index.top_of(1), 10);
    /// ```
    pub fn top_of(&self, index: usize) -> usize {
        if index == 0 {
            0
        } else {
            self.prefix_sum(index - 1)
        }
    }

    /// First index whose span `[top, top + height)` ends after `value`.
    ///
    /// Returns `None` when `value >= total()` or the index is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// # use waterfall::layout::height_index::HeightIndex;
    /// let mut index = HeightIndex::new(4);
    /// index.push(10); // [0..10)
    /// index.push(20); // [10..30)
    /// assert_eq!(index.lower_bound(9), Some(0));
    /// assert_eq!(index.lower_bound(10), Some(1));
    /// assert_eq!(index.lower_bound(30), None);
    /// ```
    pub fn lower_bound(&self, value: usize) -> Option<usize> {
        let mut left = 0;
        let mut right = self.len();

        while left < right {
            let mid = left + (right - left) / 2;
            if self.prefix_sum(mid) > value {
                right = mid;
            } else {
                left = mid + 1;
            }
        }

        (left < self.len()).then_some(left)
    }

    /// Total height of all items.
    pub fn total(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.prefix_sum(self.len() - 1)
        }
    }

    /// Number of items in the index.
    pub fn len(&self) -> usize {
        self.heights.len()
    }

    /// True when the index holds no items.
    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    /// Removes every item, keeping the allocation.
    pub fn clear(&mut self) {
        self.tree.iter_mut().for_each(|node| *node = 0);
        self.heights.clear();
    }

    fn rebuild(&mut self, capacity: usize) {
        self.tree.clear();
        self.tree.resize(capacity, 0);
        for (i, &h) in self.heights.iter().enumerate() {
            fenwick::array::update(&mut self.tree, i, h as isize);
        }
    }
}
