use std::collections::{HashMap, HashSet, VecDeque};

use gridpath_core::Point;

use crate::search::{Event, SearchResult, reconstruct};
use crate::traits::Pather;

/// Depth-first search explorer.
///
/// The LIFO frontier holds `(cell, predecessor)` pairs. A cell is marked
/// visited only when popped, so it may sit on the stack several times
/// before being expanded; the predecessor recorded is the one it was
/// popped with. The first path that reaches the end is returned, which is
/// not shortest by any measure. Cost is the path's edge count.
pub struct Dfs<'a, P> {
    pather: &'a P,
    start: Point,
    end: Point,
    stack: Vec<(Point, Option<Point>)>,
    visited: HashSet<Point>,
    discovered: HashSet<Point>,
    parents: HashMap<Point, Point>,
    pending: VecDeque<Event>,
    outcome: Option<SearchResult>,
    nbuf: Vec<Point>,
}

impl<'a, P: Pather> Dfs<'a, P> {
    /// Prepare a search from `start` to `end`.
    pub fn new(pather: &'a P, start: Point, end: Point) -> Self {
        let mut s = Self {
            pather,
            start,
            end,
            stack: Vec::new(),
            visited: HashSet::new(),
            discovered: HashSet::new(),
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
        self.stack.clear();
        self.visited.clear();
        self.discovered.clear();
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
        self.stack.push((self.start, None));
        self.discovered.insert(self.start);
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
        let Some((cur, from)) = self.stack.pop() else {
            self.outcome = Some(SearchResult::none());
            return;
        };
        if self.visited.contains(&cur) {
            return;
        }
        self.visited.insert(cur);
        if let Some(from) = from {
            self.parents.insert(cur, from);
        }
        self.pending.push_back(Event::visited(cur));

        if cur == self.end {
            self.outcome = Some(match reconstruct(&self.parents, self.start, self.end) {
                Some(path) => {
                    let hops = path.len() as i32 - 1;
                    SearchResult::found(path, hops)
                }
                None => SearchResult::none(),
            });
            return;
        }

        self.nbuf.clear();
        self.pather.neighbors(cur, &mut self.nbuf);
        for &np in self.nbuf.iter() {
            if self.visited.contains(&np) {
                continue;
            }
            self.stack.push((np, Some(cur)));
            if self.discovered.insert(np) {
                self.pending.push_back(Event::frontier(np));
            }
        }
    }
}

impl<P: Pather> Iterator for Dfs<'_, P> {
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

/// First path from `start` to `end` in depth-first order; cost is the hop count.
pub fn dfs<P: Pather>(pather: &P, start: Point, end: Point) -> SearchResult {
    Dfs::new(pather, start, end).finish()
}
