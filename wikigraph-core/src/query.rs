use crate::graph::LinkGraph;
use crate::normalize::normalize_id;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NeighborCount {
    pub id: String,
    pub count: usize,
}

/// Incoming and outgoing neighbors of one node, grouped by frequency
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Adjacency {
    pub id: String,
    pub incoming: Vec<NeighborCount>,
    pub outgoing: Vec<NeighborCount>,
    pub incoming_total: usize,
    pub outgoing_total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(Adjacency),
    NotFound { query: String },
}

impl LinkGraph {
    /// Look up a page by raw name. The input is normalized first; unknown
    /// pages are reported, not treated as errors.
    pub fn search(&self, raw: &str) -> SearchOutcome {
        let id = normalize_id(raw);
        if !self.contains(&id) {
            return SearchOutcome::NotFound { query: id };
        }

        let mut incoming = Vec::new();
        let mut outgoing = Vec::new();
        for edge in &self.edges {
            if edge.target == id {
                incoming.push(edge.source.as_str());
            }
            if edge.source == id {
                outgoing.push(edge.target.as_str());
            }
        }

        Adjacency {
            incoming_total: incoming.len(),
            outgoing_total: outgoing.len(),
            incoming: count_neighbors(&incoming),
            outgoing: count_neighbors(&outgoing),
            id,
        }
        .into()
    }
}

impl From<Adjacency> for SearchOutcome {
    fn from(adjacency: Adjacency) -> Self {
        SearchOutcome::Found(adjacency)
    }
}

/// Frequency table, most frequent first; ties keep first-seen order.
pub fn count_neighbors(ids: &[&str]) -> Vec<NeighborCount> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<NeighborCount> = Vec::new();
    for &id in ids {
        match index.get(id) {
            Some(&pos) => counts[pos].count += 1,
            None => {
                index.insert(id, counts.len());
                counts.push(NeighborCount {
                    id: id.to_string(),
                    count: 1,
                });
            }
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_neighbors_orders_by_frequency() {
        let counts = count_neighbors(&["b", "a", "c", "a", "c", "a"]);
        let flat: Vec<(&str, usize)> = counts.iter().map(|n| (n.id.as_str(), n.count)).collect();
        assert_eq!(flat, vec![("a", 3), ("c", 2), ("b", 1)]);
    }

    #[test]
    fn test_count_neighbors_ties_keep_first_seen() {
        let counts = count_neighbors(&["z", "y", "x", "y", "z"]);
        let ids: Vec<&str> = counts.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["z", "y", "x"]);
    }

    #[test]
    fn test_count_neighbors_empty() {
        assert!(count_neighbors(&[]).is_empty());
    }
}
