use crate::normalize::normalize_id;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};
use wikigraph_dataset::{Dataset, DocumentRecord, OutgoingLinks, flatten_links};

/// How link targets that were never crawled are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphMode {
    /// Only crawled documents become nodes; links leaving the crawl are dropped
    Strict,
    /// Every link target becomes a node, crawled or not
    Open,
}

impl GraphMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "strict" | "closed" => Some(GraphMode::Strict),
            "open" | "all" => Some(GraphMode::Open),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GraphMode::Strict => "strict",
            GraphMode::Open => "open",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            GraphMode::Strict => "Only crawled pages are used as nodes",
            GraphMode::Open => "All linked pages are used as nodes, even those that were never crawled",
        }
    }

    /// Rendered node size for a given degree.
    pub fn node_size(&self, degree: usize) -> f64 {
        let degree = degree as f64;
        match self {
            GraphMode::Strict => (10.0 + degree * 0.5).min(50.0),
            GraphMode::Open => (degree / 5.0).min(30.0).max(5.0),
        }
    }

    /// Tooltip text for a node.
    pub fn node_title(&self, id: &str, degree: usize) -> String {
        match self {
            GraphMode::Strict => id.to_string(),
            GraphMode::Open => format!("{}\nConnections: {}", id, degree),
        }
    }

    /// Canvas height of the rendered page, in pixels.
    pub fn canvas_height(&self) -> u32 {
        match self {
            GraphMode::Strict => 700,
            GraphMode::Open => 600,
        }
    }

    pub fn physics(&self) -> BarnesHut {
        match self {
            GraphMode::Strict => BarnesHut {
                gravity: -100_000.0,
                central_gravity: 0.5,
                spring_length: 200.0,
                spring_strength: 0.001,
                damping: 0.2,
                overlap: 0.0,
            },
            GraphMode::Open => BarnesHut {
                gravity: -30_000.0,
                central_gravity: 0.1,
                spring_length: 100.0,
                spring_strength: 0.002,
                damping: 0.2,
                overlap: 0.1,
            },
        }
    }
}

/// Force-directed layout parameters handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BarnesHut {
    pub gravity: f64,
    pub central_gravity: f64,
    pub spring_length: f64,
    pub spring_strength: f64,
    pub damping: f64,
    pub overlap: f64,
}

/// Directed link from one page to another. Duplicates are allowed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
}

impl Edge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// Metadata of a crawled page, taken from its first record
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub title: Option<String>,
    pub source: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeDegree {
    pub in_degree: usize,
    pub out_degree: usize,
}

impl NodeDegree {
    pub fn total(&self) -> usize {
        self.in_degree + self.out_degree
    }
}

/// Connection counts per node, computed once per built graph
#[derive(Debug, Clone, Default)]
pub struct DegreeTable {
    counts: HashMap<String, NodeDegree>,
}

impl DegreeTable {
    /// Count both endpoints of every edge in one pass. Every node gets an
    /// entry, isolated ones with zero.
    pub fn from_edges(nodes: &[String], edges: &[Edge]) -> Self {
        let mut counts: HashMap<String, NodeDegree> = nodes
            .iter()
            .map(|node| (node.clone(), NodeDegree::default()))
            .collect();

        for edge in edges {
            counts.entry(edge.source.clone()).or_default().out_degree += 1;
            counts.entry(edge.target.clone()).or_default().in_degree += 1;
        }

        Self { counts }
    }

    pub fn degree(&self, id: &str) -> usize {
        self.counts.get(id).map(NodeDegree::total).unwrap_or(0)
    }

    pub fn in_degree(&self, id: &str) -> usize {
        self.counts.get(id).map(|d| d.in_degree).unwrap_or(0)
    }

    pub fn out_degree(&self, id: &str) -> usize {
        self.counts.get(id).map(|d| d.out_degree).unwrap_or(0)
    }

    pub fn get(&self, id: &str) -> Option<NodeDegree> {
        self.counts.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn max_degree(&self) -> Option<usize> {
        self.counts.values().map(NodeDegree::total).max()
    }

    /// Divisor for progress ratios. Never zero, even for an empty table or
    /// a graph without edges.
    pub fn progress_divisor(&self) -> usize {
        self.max_degree().unwrap_or(1).max(1)
    }
}

/// Stages reported while a graph is being built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStage {
    Normalizing,
    CollectingNodes,
    CollectingLinks,
    CreatingEdges,
    Done,
}

impl BuildStage {
    pub fn percent(&self) -> u64 {
        match self {
            BuildStage::Normalizing => 10,
            BuildStage::CollectingNodes => 20,
            BuildStage::CollectingLinks => 50,
            BuildStage::CreatingEdges => 80,
            BuildStage::Done => 100,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            BuildStage::Normalizing => "Normalizing document ids",
            BuildStage::CollectingNodes => "Collecting nodes",
            BuildStage::CollectingLinks => "Collecting links",
            BuildStage::CreatingEdges => "Creating edges",
            BuildStage::Done => "Processing complete",
        }
    }
}

/// The full link graph of one dataset. Immutable once built; filters and
/// searches borrow from it.
#[derive(Debug, Clone)]
pub struct LinkGraph {
    pub mode: GraphMode,
    /// Node ids in first-seen input order
    pub nodes: Vec<String>,
    pub edges: Vec<Edge>,
    pub degrees: DegreeTable,
    documents: HashMap<String, Document>,
    node_set: HashSet<String>,
}

impl LinkGraph {
    pub fn build(dataset: &Dataset, mode: GraphMode) -> Self {
        Self::build_with_progress(dataset, mode, |_| {})
    }

    pub fn build_with_progress<F>(dataset: &Dataset, mode: GraphMode, mut progress: F) -> Self
    where
        F: FnMut(BuildStage),
    {
        info!(
            "Building {} graph from {} records",
            mode.as_str(),
            dataset.records.len()
        );

        let malformed: usize = dataset
            .records
            .iter()
            .map(|r| r.outgoing_links.malformed_count())
            .sum();
        if malformed > 0 {
            debug!("Skipping {} malformed link values", malformed);
        }

        let (nodes, edges, documents) = match mode {
            GraphMode::Strict => build_strict(&dataset.records, &mut progress),
            GraphMode::Open => build_open(&dataset.records, &mut progress),
        };

        let degrees = DegreeTable::from_edges(&nodes, &edges);
        let node_set = nodes.iter().cloned().collect();
        progress(BuildStage::Done);

        info!("Built graph with {} nodes and {} edges", nodes.len(), edges.len());

        Self {
            mode,
            nodes,
            edges,
            degrees,
            documents,
            node_set,
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.node_set.contains(id)
    }

    pub fn degree(&self, id: &str) -> usize {
        self.degrees.degree(id)
    }

    pub fn document(&self, id: &str) -> Option<&Document> {
        self.documents.get(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

type Parts = (Vec<String>, Vec<Edge>, HashMap<String, Document>);

struct DocumentGroup<'a> {
    document: Document,
    links: Vec<&'a OutgoingLinks>,
}

/// Closed world: records are merged per document, and only links that
/// point back into the crawl survive.
fn build_strict<F>(records: &[DocumentRecord], progress: &mut F) -> Parts
where
    F: FnMut(BuildStage),
{
    progress(BuildStage::Normalizing);
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, DocumentGroup<'_>> = HashMap::new();

    for record in records {
        let id = normalize_id(record.document_id.as_str());
        match groups.entry(id) {
            Entry::Vacant(entry) => {
                order.push(entry.key().clone());
                let document = Document {
                    id: entry.key().clone(),
                    title: record.title.clone(),
                    source: record.source.clone(),
                };
                entry.insert(DocumentGroup {
                    document,
                    links: vec![&record.outgoing_links],
                });
            }
            Entry::Occupied(mut entry) => {
                let group = entry.get_mut();
                // first non-empty value wins
                if group.document.title.is_none() {
                    group.document.title = record.title.clone();
                }
                if group.document.source.is_none() {
                    group.document.source = record.source.clone();
                }
                group.links.push(&record.outgoing_links);
            }
        }
    }

    progress(BuildStage::CollectingNodes);
    let known: HashSet<&str> = order.iter().map(String::as_str).collect();

    progress(BuildStage::CollectingLinks);
    let mut edges = Vec::new();
    let mut dropped = 0usize;
    for id in &order {
        let group = &groups[id];
        for link in flatten_links(group.links.iter().copied()) {
            let target = normalize_id(link);
            if known.contains(target.as_str()) {
                edges.push(Edge::new(id.clone(), target));
            } else {
                dropped += 1;
            }
        }
    }
    progress(BuildStage::CreatingEdges);
    debug!("Dropped {} links to pages outside the crawl", dropped);

    let documents = groups
        .into_iter()
        .map(|(id, group)| (id, group.document))
        .collect();

    (order, edges, documents)
}

/// Open world: every record contributes its links as-is and every target
/// becomes a node.
fn build_open<F>(records: &[DocumentRecord], progress: &mut F) -> Parts
where
    F: FnMut(BuildStage),
{
    progress(BuildStage::Normalizing);
    let sources: Vec<String> = records
        .iter()
        .map(|r| normalize_id(r.document_id.as_str()))
        .collect();

    progress(BuildStage::CollectingNodes);
    let mut nodes = Vec::new();
    let mut seen = HashSet::new();
    let mut documents = HashMap::new();
    for (source, record) in sources.iter().zip(records) {
        if seen.insert(source.clone()) {
            nodes.push(source.clone());
            documents.insert(
                source.clone(),
                Document {
                    id: source.clone(),
                    title: record.title.clone(),
                    source: record.source.clone(),
                },
            );
        }
    }

    progress(BuildStage::CollectingLinks);
    let targets: Vec<Vec<String>> = records
        .iter()
        .map(|r| {
            r.outgoing_links
                .direct_links()
                .into_iter()
                .map(normalize_id)
                .collect()
        })
        .collect();
    for target in targets.iter().flatten() {
        if seen.insert(target.clone()) {
            nodes.push(target.clone());
        }
    }

    progress(BuildStage::CreatingEdges);
    let edges = sources
        .iter()
        .zip(&targets)
        .flat_map(|(source, targets)| targets.iter().map(move |t| Edge::new(source.clone(), t.clone())))
        .collect();

    (nodes, edges, documents)
}
