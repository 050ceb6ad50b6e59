

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use super::models::Node;


#[derive(Debug)]
struct Entry {
    score: f64,
    seq: u64,
    node: Node,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    // Reversed so the max-heap yields the lowest score, then the earliest insertion.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}


/// Min-priority queue of `(score, node)` with FIFO order among equal scores.
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<Entry>,
    next_seq: u64,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, score: f64, node: Node) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry { score, seq, node });
    }

    pub fn pop(&mut self) -> Option<(f64, Node)> {
        self.heap.pop().map(|entry| (entry.score, entry.node))
    }

    pub fn peek_score(&self) -> Option<f64> {
        self.heap.peek().map(|entry| entry.score)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(frontier: &mut Frontier) -> Vec<String> {
        std::iter::from_fn(|| frontier.pop().map(|(_, node)| node)).collect()
    }

    #[test]
    fn test_pops_lowest_score_first() {
        let mut frontier = Frontier::new();
        frontier.push(0.8, "far".to_string());
        frontier.push(0.1, "near".to_string());
        frontier.push(0.5, "middle".to_string());

        assert_eq!(frontier.peek_score(), Some(0.1));
        assert_eq!(drain(&mut frontier), vec!["near", "middle", "far"]);
        assert!(frontier.is_empty());
    }

    #[test]
    fn test_ties_are_fifo() {
        let mut frontier = Frontier::new();
        for name in ["a", "b", "c", "d"] {
            frontier.push(0.5, name.to_string());
        }
        frontier.push(0.2, "first".to_string());

        assert_eq!(frontier.len(), 5);
        assert_eq!(drain(&mut frontier), vec!["first", "a", "b", "c", "d"]);
    }

    #[test]
    fn test_fifo_survives_interleaving() {
        let mut frontier = Frontier::new();
        frontier.push(1.0, "x1".to_string());
        frontier.push(0.0, "y1".to_string());
        assert_eq!(frontier.pop().unwrap().1, "y1");
        frontier.push(1.0, "x2".to_string());
        frontier.push(1.0, "x3".to_string());
        assert_eq!(drain(&mut frontier), vec!["x1", "x2", "x3"]);
    }
}
