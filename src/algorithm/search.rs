//! Algorithm X over a [`DancingLinks`] matrix
//!
//! The search stops at the first exact cover. Recursion is replaced by an
//! explicit stack of frames, one per chosen column, so depth is bounded by
//! heap rather than thread stack. Each frame remembers the row currently
//! applied; covers made for that row are undone by walking it leftwards,
//! which is the exact reverse of how they were made.

use crate::algorithm::links::DancingLinks;

/// Counters describing one search run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Rows tentatively added to the partial solution
    pub rows_tried: u64,
    /// Rows removed again after their subtree failed
    pub backtracks: u64,
    /// Deepest partial solution reached
    pub max_depth: usize,
}

#[derive(Clone, Copy, Debug)]
struct Frame {
    /// Column header covered when the frame was opened
    header: usize,
    /// Row node currently applied from that column
    cursor: usize,
}

/// Backtracking exact-cover search that owns the partial solution
pub struct ExactCoverSearch<'a> {
    links: &'a mut DancingLinks,
    frames: Vec<Frame>,
    solution: Vec<usize>,
    stats: SearchStats,
}

impl<'a> ExactCoverSearch<'a> {
    /// Prepare a search over `links`
    pub fn new(links: &'a mut DancingLinks) -> Self {
        let depth_hint = links.primary_count();
        Self {
            links,
            frames: Vec::with_capacity(depth_hint),
            solution: Vec::with_capacity(depth_hint),
            stats: SearchStats::default(),
        }
    }

    /// Run until the first cover is found or the tree is exhausted
    ///
    /// On success the matrix is left in its covered state and
    /// [`solution`](Self::solution) holds the chosen row ids. On failure the
    /// matrix has been fully restored.
    pub fn run(&mut self) -> bool {
        loop {
            if self.links.is_solved() {
                return true;
            }

            let selected = self
                .links
                .select_header()
                .filter(|&header| self.links.size(header) > 0);

            match selected {
                Some(header) => self.open_frame(header),
                None => {
                    if !self.advance() {
                        return false;
                    }
                }
            }
        }
    }

    fn open_frame(&mut self, header: usize) {
        self.links.cover_header(header);
        let first = self.links.down(header);
        self.frames.push(Frame {
            header,
            cursor: first,
        });
        self.apply_row(first);
    }

    /// Replace the deepest applied row with the next candidate
    ///
    /// Frames whose column has no candidates left are closed. Returns
    /// `false` once the stack empties, meaning the search space is exhausted.
    fn advance(&mut self) -> bool {
        while let Some(frame) = self.frames.last().copied() {
            self.retract_row(frame.cursor);
            self.stats.backtracks += 1;

            let next = self.links.down(frame.cursor);
            if next == frame.header {
                self.links.uncover_header(frame.header);
                self.frames.pop();
                continue;
            }

            if let Some(top) = self.frames.last_mut() {
                top.cursor = next;
            }
            self.apply_row(next);
            return true;
        }
        false
    }

    fn apply_row(&mut self, row_node: usize) {
        if let Some(row) = self.links.row_of(row_node) {
            self.solution.push(row);
        }
        self.stats.rows_tried += 1;
        self.stats.max_depth = self.stats.max_depth.max(self.solution.len());

        let mut node = self.links.right(row_node);
        while node != row_node {
            self.links.cover_header(self.links.header_of(node));
            node = self.links.right(node);
        }
    }

    fn retract_row(&mut self, row_node: usize) {
        let mut node = self.links.left(row_node);
        while node != row_node {
            self.links.uncover_header(self.links.header_of(node));
            node = self.links.left(node);
        }
        self.solution.pop();
    }

    /// Row ids of the current partial (or, after success, complete) solution
    pub fn solution(&self) -> &[usize] {
        &self.solution
    }

    /// Counters gathered so far
    pub const fn stats(&self) -> SearchStats {
        self.stats
    }
}

/// Search `links` for an exact cover of its primary columns
///
/// Returns the row ids of the first cover found, or `None` when none exists.
pub fn find_cover(links: &mut DancingLinks) -> (Option<Vec<usize>>, SearchStats) {
    let mut search = ExactCoverSearch::new(links);
    let found = search.run();
    let stats = search.stats();
    (found.then(|| search.solution().to_vec()), stats)
}
