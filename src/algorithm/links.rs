//! Toroidal doubly-linked matrix for exact cover ("dancing links")
//!
//! Nodes live in a single arena and refer to each other by index. The arena
//! layout is fixed at construction:
//!
//! | index                    | node                          |
//! |--------------------------|-------------------------------|
//! | `0`                      | primary sentinel              |
//! | `1`                      | secondary sentinel            |
//! | `2 .. 2 + primary`       | primary column headers        |
//! | `.. + secondary`         | secondary column headers      |
//! | rest                     | row nodes, appended by rows   |
//!
//! Only primary headers are reachable from the primary sentinel, so only
//! they drive column selection. Secondary headers sit on their own ring and
//! still track how many live rows touch them.

use crate::io::error::{Result, SolverError};
use bitvec::prelude::*;

const PRIMARY_ROOT: usize = 0;
const SECONDARY_ROOT: usize = 1;
const FIRST_HEADER: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Node {
    left: usize,
    right: usize,
    up: usize,
    down: usize,
    /// Header node of the column this node belongs to
    header: usize,
    /// Caller-supplied row id, `None` for headers and sentinels
    row: Option<usize>,
}

impl Node {
    const fn header(index: usize) -> Self {
        Self {
            left: index,
            right: index,
            up: index,
            down: index,
            header: index,
            row: None,
        }
    }
}

/// Sparse 0/1 constraint matrix supporting O(1) reversible row removal
///
/// `cover` followed by `uncover` of the same column restores the structure
/// exactly, provided nothing else was changed in between and nested covers
/// are undone in reverse order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DancingLinks {
    nodes: Vec<Node>,
    /// Live row count per header, indexed by header node
    sizes: Vec<usize>,
    primary: usize,
    secondary: usize,
    rows: usize,
}

impl DancingLinks {
    /// Create headers for `primary` mandatory and `secondary` optional columns
    pub fn new(primary: usize, secondary: usize) -> Self {
        let header_count = FIRST_HEADER + primary + secondary;
        let mut links = Self {
            nodes: (0..header_count).map(Node::header).collect(),
            sizes: vec![0; header_count],
            primary,
            secondary,
            rows: 0,
        };

        for column in 0..primary {
            links.append_header(PRIMARY_ROOT, FIRST_HEADER + column);
        }
        for column in primary..primary + secondary {
            links.append_header(SECONDARY_ROOT, FIRST_HEADER + column);
        }

        links
    }

    fn append_header(&mut self, root: usize, header: usize) {
        let last = self.left(root);
        self.set_left(header, last);
        self.set_right(header, root);
        self.set_right(last, header);
        self.set_left(root, header);
    }

    /// Number of primary columns
    pub const fn primary_count(&self) -> usize {
        self.primary
    }

    /// Number of secondary columns
    pub const fn secondary_count(&self) -> usize {
        self.secondary
    }

    /// Total number of columns
    pub const fn column_count(&self) -> usize {
        self.primary + self.secondary
    }

    /// Number of rows added so far
    pub const fn row_count(&self) -> usize {
        self.rows
    }

    /// Number of row nodes (ones in the matrix)
    pub const fn node_count(&self) -> usize {
        self.nodes.len() - FIRST_HEADER - self.primary - self.secondary
    }

    /// Append a row covering `columns`
    ///
    /// Columns `0..primary` are primary, `primary..primary + secondary` are
    /// secondary. Each node is linked at the bottom of its column ring, so
    /// rows are visited in insertion order. An empty column list adds nothing.
    ///
    /// # Errors
    ///
    /// Returns [`SolverError::ColumnOutOfRange`] for a column beyond the
    /// declared count and [`SolverError::DuplicateColumn`] when a column is
    /// listed twice. The structure is left unchanged on error.
    pub fn add_row(&mut self, row: usize, columns: &[usize]) -> Result<()> {
        let column_count = self.column_count();
        let mut seen = bitvec![0; column_count];
        for &column in columns {
            let duplicate = seen.get(column).as_deref().copied().ok_or(
                SolverError::ColumnOutOfRange {
                    row,
                    column,
                    column_count,
                },
            )?;
            if duplicate {
                return Err(SolverError::DuplicateColumn { row, column });
            }
            seen.set(column, true);
        }

        let mut first: Option<usize> = None;
        for &column in columns {
            let header = FIRST_HEADER + column;
            let node = self.nodes.len();
            let above = self.up(header);

            self.nodes.push(Node {
                left: node,
                right: node,
                up: above,
                down: header,
                header,
                row: Some(row),
            });
            self.set_down(above, node);
            self.set_up(header, node);
            self.increment_size(header);

            if let Some(first) = first {
                let last = self.left(first);
                self.set_left(node, last);
                self.set_right(node, first);
                self.set_right(last, node);
                self.set_left(first, node);
            } else {
                first = Some(node);
            }
        }

        if first.is_some() {
            self.rows += 1;
        }
        Ok(())
    }

    /// Live row count of a column, `None` if the column does not exist
    pub fn column_size(&self, column: usize) -> Option<usize> {
        if column < self.column_count() {
            self.sizes.get(FIRST_HEADER + column).copied()
        } else {
            None
        }
    }

    /// True when no primary column is left uncovered
    pub fn is_solved(&self) -> bool {
        self.right(PRIMARY_ROOT) == PRIMARY_ROOT
    }

    /// Primary columns still on the selection ring, in ring order
    pub fn active_primary_columns(&self) -> Vec<usize> {
        self.ring(PRIMARY_ROOT)
    }

    /// Secondary columns still on their ring, in ring order
    pub fn active_secondary_columns(&self) -> Vec<usize> {
        self.ring(SECONDARY_ROOT)
    }

    fn ring(&self, root: usize) -> Vec<usize> {
        let mut columns = Vec::new();
        let mut header = self.right(root);
        while header != root {
            columns.push(header - FIRST_HEADER);
            header = self.right(header);
        }
        columns
    }

    /// Row ids still visible under a column, top to bottom
    pub fn rows_in_column(&self, column: usize) -> Vec<usize> {
        if column >= self.column_count() {
            return Vec::new();
        }
        let header = FIRST_HEADER + column;
        let mut rows = Vec::new();
        let mut node = self.down(header);
        while node != header {
            if let Some(row) = self.row_of(node) {
                rows.push(row);
            }
            node = self.down(node);
        }
        rows
    }

    /// Cover a column by index; out-of-range columns are ignored
    pub fn cover(&mut self, column: usize) {
        if column < self.column_count() {
            self.cover_header(FIRST_HEADER + column);
        }
    }

    /// Undo [`cover`](Self::cover) of the same column
    pub fn uncover(&mut self, column: usize) {
        if column < self.column_count() {
            self.uncover_header(FIRST_HEADER + column);
        }
    }

    pub(crate) fn cover_header(&mut self, header: usize) {
        let (left, right) = (self.left(header), self.right(header));
        self.set_left(right, left);
        self.set_right(left, right);

        let mut row = self.down(header);
        while row != header {
            let mut node = self.right(row);
            while node != row {
                let (up, down) = (self.up(node), self.down(node));
                self.set_up(down, up);
                self.set_down(up, down);
                self.decrement_size(self.header_of(node));
                node = self.right(node);
            }
            row = self.down(row);
        }
    }

    pub(crate) fn uncover_header(&mut self, header: usize) {
        let mut row = self.up(header);
        while row != header {
            let mut node = self.left(row);
            while node != row {
                self.increment_size(self.header_of(node));
                let (up, down) = (self.up(node), self.down(node));
                self.set_up(down, node);
                self.set_down(up, node);
                node = self.left(node);
            }
            row = self.up(row);
        }

        let (left, right) = (self.left(header), self.right(header));
        self.set_left(right, header);
        self.set_right(left, header);
    }

    /// Smallest primary column in ring order; ties keep the first seen
    pub(crate) fn select_header(&self) -> Option<usize> {
        let mut best: Option<(usize, usize)> = None;
        let mut header = self.right(PRIMARY_ROOT);
        while header != PRIMARY_ROOT {
            let size = self.size(header);
            if best.is_none_or(|(_, best_size)| size < best_size) {
                best = Some((header, size));
                if size == 0 {
                    break;
                }
            }
            header = self.right(header);
        }
        best.map(|(header, _)| header)
    }

    pub(crate) fn size(&self, header: usize) -> usize {
        self.sizes.get(header).copied().unwrap_or(0)
    }

    pub(crate) fn left(&self, node: usize) -> usize {
        self.nodes.get(node).map_or(node, |n| n.left)
    }

    pub(crate) fn right(&self, node: usize) -> usize {
        self.nodes.get(node).map_or(node, |n| n.right)
    }

    pub(crate) fn up(&self, node: usize) -> usize {
        self.nodes.get(node).map_or(node, |n| n.up)
    }

    pub(crate) fn down(&self, node: usize) -> usize {
        self.nodes.get(node).map_or(node, |n| n.down)
    }

    pub(crate) fn header_of(&self, node: usize) -> usize {
        self.nodes.get(node).map_or(node, |n| n.header)
    }

    pub(crate) fn row_of(&self, node: usize) -> Option<usize> {
        self.nodes.get(node).and_then(|n| n.row)
    }

    fn set_left(&mut self, node: usize, target: usize) {
        if let Some(n) = self.nodes.get_mut(node) {
            n.left = target;
        }
    }

    fn set_right(&mut self, node: usize, target: usize) {
        if let Some(n) = self.nodes.get_mut(node) {
            n.right = target;
        }
    }

    fn set_up(&mut self, node: usize, target: usize) {
        if let Some(n) = self.nodes.get_mut(node) {
            n.up = target;
        }
    }

    fn set_down(&mut self, node: usize, target: usize) {
        if let Some(n) = self.nodes.get_mut(node) {
            n.down = target;
        }
    }

    fn increment_size(&mut self, header: usize) {
        if let Some(size) = self.sizes.get_mut(header) {
            *size += 1;
        }
    }

    fn decrement_size(&mut self, header: usize) {
        if let Some(size) = self.sizes.get_mut(header) {
            *size = size.saturating_sub(1);
        }
    }
}
