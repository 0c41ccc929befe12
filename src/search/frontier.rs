// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::BinaryHeap;

#[derive(Debug, Clone, Copy)]
struct QueueItem {
    score: f64,
    seq: usize,
    cost: f64,
    link: usize,
}

impl PartialEq for QueueItem {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for QueueItem {}

impl PartialOrd for QueueItem {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueItem {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // NOTE: We revert the order of comparison,
        // as lower scores (and earlier pushes among equal scores) are considered
        // better ("higher"), and Rust's BinaryHeap is a max-heap.
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// An entry removed from the [Frontier].
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Entry {
    /// Last node of the entry's path.
    pub(super) at: i64,

    /// Accumulated cost of the entry's path.
    pub(super) cost: f64,

    /// Handle to the path, see [Frontier::path].
    pub(super) link: usize,
}

/// Frontier of a best-first search: a set of (cost, path) entries,
/// from which the entry with the lowest score is removed first.
///
/// Entries with equal scores are removed in the order they were pushed.
/// Paths are stored as links to their parent path, so that all entries
/// extending the same prefix share it.
#[derive(Debug, Default)]
pub(super) struct Frontier {
    queue: BinaryHeap<QueueItem>,

    /// Every pushed path as `(last node, link to the path without the last node)`.
    links: Vec<(i64, Option<usize>)>,
}

impl Frontier {
    /// Creates a frontier with a single zero-cost, one-node path.
    pub(super) fn new(start: i64, score: f64) -> Self {
        let mut f = Self::default();
        f.push_link(start, None, 0.0, score);
        f
    }

    /// Adds an entry extending the path of `parent` with `node`.
    pub(super) fn push(&mut self, parent: &Entry, node: i64, cost: f64, score: f64) {
        self.push_link(node, Some(parent.link), cost, score);
    }

    fn push_link(&mut self, node: i64, parent: Option<usize>, cost: f64, score: f64) {
        let link = self.links.len();
        self.links.push((node, parent));
        self.queue.push(QueueItem {
            score,
            seq: link,
            cost,
            link,
        });
    }

    /// Removes the entry with the lowest score.
    pub(super) fn pop(&mut self) -> Option<Entry> {
        self.queue.pop().map(|item| Entry {
            at: self.links[item.link].0,
            cost: item.cost,
            link: item.link,
        })
    }

    /// Returns the number of entries waiting in the frontier.
    pub(super) fn len(&self) -> usize {
        self.queue.len()
    }

    /// Reconstructs the full path of an entry, from the start node.
    pub(super) fn path(&self, link: usize) -> Vec<i64> {
        let mut path = vec![];
        let mut next = Some(link);

        while let Some(idx) = next {
            let (node, parent) = self.links[idx];
            path.push(node);
            next = parent;
        }

        path.reverse();
        path
    }
}
