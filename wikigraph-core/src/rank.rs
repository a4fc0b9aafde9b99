use crate::graph::LinkGraph;
use serde::Serialize;

/// Size of the "most connected" list on the dashboard
pub const TOP_NODES: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedNode {
    pub id: String,
    pub degree: usize,
    /// Degree relative to the best connected node, in `0.0..=1.0`
    pub ratio: f64,
}

impl LinkGraph {
    /// The `k` best connected nodes. Equal degrees keep node order.
    pub fn top_nodes(&self, k: usize) -> Vec<RankedNode> {
        let divisor = self.degrees.progress_divisor() as f64;

        let mut ranked: Vec<(&str, usize)> = self
            .nodes
            .iter()
            .map(|id| (id.as_str(), self.degree(id)))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        ranked
            .into_iter()
            .take(k)
            .map(|(id, degree)| RankedNode {
                id: id.to_string(),
                degree,
                ratio: (degree as f64 / divisor).min(1.0),
            })
            .collect()
    }
}

/// Shorten a label to `max_chars` characters, marking the cut with `...`.
pub fn truncate_label(label: &str, max_chars: usize) -> String {
    if label.chars().count() > max_chars {
        let head: String = label.chars().take(max_chars).collect();
        format!("{}...", head)
    } else {
        label.to_string()
    }
}
