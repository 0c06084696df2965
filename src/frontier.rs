//! Open list of a search. Either plain insertion order, or a binary heap ordered by estimated
//! total cost in the manner of
//! [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html).
use grid_util::point::Point;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

/// How the next cell to expand is chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum SearchOrder {
    /// Insertion order. Costs are tracked for parent selection but do not steer the search.
    Fifo,
    /// Minimum `g + h` first.
    #[default]
    BestFirst,
}

pub(crate) struct SmallestCostHolder {
    estimated_cost: f64,
    cost: f64,
    point: Point,
}

impl Eq for SmallestCostHolder {}

impl PartialEq for SmallestCostHolder {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl PartialOrd for SmallestCostHolder {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SmallestCostHolder {
    fn cmp(&self, other: &Self) -> Ordering {
        // First orders per estimated cost, then creates subordering
        // based on cost, favoring exploration of largest cost nodes first
        match other.estimated_cost.total_cmp(&self.estimated_cost) {
            Ordering::Equal => self.cost.total_cmp(&other.cost),
            s => s,
        }
    }
}

pub(crate) enum Frontier {
    Fifo(VecDeque<Point>),
    BestFirst(BinaryHeap<SmallestCostHolder>),
}

impl Frontier {
    pub fn new(order: SearchOrder) -> Frontier {
        match order {
            SearchOrder::Fifo => Frontier::Fifo(VecDeque::new()),
            SearchOrder::BestFirst => Frontier::BestFirst(BinaryHeap::new()),
        }
    }

    /// Queues `point` with path cost `g` and heuristic `h`. A best-first frontier may hold the
    /// same point several times; the caller discards entries for cells that are already closed.
    pub fn push(&mut self, point: Point, g: f64, h: f64) {
        match self {
            Frontier::Fifo(queue) => queue.push_back(point),
            Frontier::BestFirst(heap) => heap.push(SmallestCostHolder {
                estimated_cost: g + h,
                cost: g,
                point,
            }),
        }
    }

    /// Whether a cell that is already open must be queued again after its cost improved.
    pub fn requeues_improved(&self) -> bool {
        matches!(self, Frontier::BestFirst(_))
    }

    pub fn pop(&mut self) -> Option<Point> {
        match self {
            Frontier::Fifo(queue) => queue.pop_front(),
            Frontier::BestFirst(heap) => heap.pop().map(|holder| holder.point),
        }
    }
}
