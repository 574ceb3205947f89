use std::collections::{HashMap, HashSet, VecDeque};

use gridpath_core::Point;

use crate::search::{Event, SearchResult, reconstruct};
use crate::traits::Pather;

/// Breadth-first search explorer.
///
/// Expands cells in order of hop count from a FIFO frontier. A cell is
/// marked visited when it is dequeued and is never enqueued twice. The
/// search stops as soon as the end cell is discovered as a neighbour, so
/// the path has the fewest possible edges; ties go to whichever neighbour
/// the pather lists first.
pub struct Bfs<'a, P> {
    pather: &'a P,
    start: Point,
    end: Point,
    queue: VecDeque<Point>,
    visited: HashSet<Point>,
    parents: HashMap<Point, Point>,
    pending: VecDeque<Event>,
    outcome: Option<SearchResult>,
    nbuf: Vec<Point>,
}

impl<'a, P: Pather> Bfs<'a, P> {
    /// Prepare a search from `start` to `end`.
    pub fn new(pather: &'a P, start: Point, end: Point) -> Self {
        let mut s = Self {
            pather,
            start,
            end,
            queue: VecDeque::new(),
            visited: HashSet::new(),
            parents: HashMap::new(),
            pending: VecDeque::new(),
            outcome: None,
            nbuf: Vec::with_capacity(4),
        };
        s.restart();
        s
    }

    /// Rewind to the initial state.
    pub fn restart(&mut self) {
        self.queue.clear();
        self.visited.clear();
        self.parents.clear();
        self.pending.clear();
        self.outcome = None;

        if !self.pather.contains(self.start) || !self.pather.contains(self.end) {
            self.outcome = Some(SearchResult::none());
            return;
        }
        if self.start == self.end {
            self.pending.push_back(Event::visited(self.start));
            self.outcome = Some(SearchResult::found(vec![self.start], 0));
            return;
        }
        self.queue.push_back(self.start);
        self.pending.push_back(Event::frontier(self.start));
    }

    /// The result, once every event has been pulled.
    pub fn outcome(&self) -> Option<&SearchResult> {
        self.outcome.as_ref()
    }

    /// Run to completion and return the result.
    pub fn finish(mut self) -> SearchResult {
        for _ in self.by_ref() {}
        self.outcome.take().unwrap_or_default()
    }

    fn step(&mut self) {
        let Some(cur) = self.queue.pop_front() else {
            self.outcome = Some(SearchResult::none());
            return;
        };
        if !self.visited.insert(cur) {
            return;
        }
        self.pending.push_back(Event::visited(cur));

        self.nbuf.clear();
        self.pather.neighbors(cur, &mut self.nbuf);
        for &np in self.nbuf.iter() {
            if np == self.start || self.visited.contains(&np) || self.parents.contains_key(&np) {
                continue;
            }
            self.parents.insert(np, cur);
            self.pending.push_back(Event::frontier(np));
            if np == self.end {
                self.outcome = Some(match reconstruct(&self.parents, self.start, self.end) {
                    Some(path) => {
                        let hops = path.len() as i32 - 1;
                        SearchResult::found(path, hops)
                    }
                    None => SearchResult::none(),
                });
                return;
            }
            self.queue.push_back(np);
        }
    }
}

impl<P: Pather> Iterator for Bfs<'_, P> {
    type Item = Event;

    fn next(&mut self) -> Option<Event> {
        loop {
            if let Some(e) = self.pending.pop_front() {
                return Some(e);
            }
            if self.outcome.is_some() {
                return None;
            }
            self.step();
        }
    }
}

/// Fewest-hops path from `start` to `end`; cost is the hop count.
pub fn bfs<P: Pather>(pather: &P, start: Point, end: Point) -> SearchResult {
    Bfs::new(pather, start, end).finish()
}
