use crate::error::{GraphError, Result};
use crate::graph::{Edge, GraphMode, LinkGraph};
use std::collections::HashSet;
use std::ops::RangeInclusive;

pub const DEFAULT_MIN_DEGREE: usize = 10;
pub const DEFAULT_MAX_NODES: usize = 100;

/// Thresholds selecting which part of the graph is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterParams {
    pub min_degree: usize,
    pub max_nodes: usize,
}

impl FilterParams {
    pub fn new(min_degree: usize, max_nodes: usize) -> Result<Self> {
        if max_nodes == 0 {
            return Err(GraphError::InvalidFilter(
                "max_nodes must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            min_degree,
            max_nodes,
        })
    }
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            min_degree: DEFAULT_MIN_DEGREE,
            max_nodes: DEFAULT_MAX_NODES,
        }
    }
}

/// Bounds of the dashboard controls for a graph mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterLimits {
    pub min_degree: RangeInclusive<usize>,
    pub max_nodes: RangeInclusive<usize>,
}

impl FilterLimits {
    pub fn for_mode(mode: GraphMode) -> Self {
        let max_nodes = match mode {
            GraphMode::Strict => 100..=900,
            GraphMode::Open => 100..=1000,
        };
        Self {
            min_degree: 0..=70,
            max_nodes,
        }
    }

    pub fn clamp(&self, params: FilterParams) -> FilterParams {
        FilterParams {
            min_degree: params
                .min_degree
                .clamp(*self.min_degree.start(), *self.min_degree.end()),
            max_nodes: params
                .max_nodes
                .clamp(*self.max_nodes.start(), *self.max_nodes.end()),
        }
    }

    pub fn check(&self, params: &FilterParams) -> Result<()> {
        if !self.min_degree.contains(&params.min_degree) {
            return Err(GraphError::InvalidFilter(format!(
                "min degree {} is outside {}..={}",
                params.min_degree,
                self.min_degree.start(),
                self.min_degree.end()
            )));
        }
        if !self.max_nodes.contains(&params.max_nodes) {
            return Err(GraphError::InvalidFilter(format!(
                "max nodes {} is outside {}..={}",
                params.max_nodes,
                self.max_nodes.start(),
                self.max_nodes.end()
            )));
        }
        Ok(())
    }
}

/// A projection of a [`LinkGraph`]; borrows the base graph and never changes it.
#[derive(Debug, Clone)]
pub struct FilteredView<'g> {
    pub graph: &'g LinkGraph,
    pub params: FilterParams,
    pub nodes: Vec<&'g str>,
    pub edges: Vec<&'g Edge>,
}

impl FilteredView<'_> {
    /// Rendering needs at least one node and one edge.
    pub fn is_renderable(&self) -> bool {
        !self.nodes.is_empty() && !self.edges.is_empty()
    }
}

impl LinkGraph {
    /// Keep nodes with `degree >= min_degree`, then the first `max_nodes` of
    /// those in node order. Truncation follows input order, not degree.
    pub fn filter(&self, params: &FilterParams) -> FilteredView<'_> {
        let nodes: Vec<&str> = self
            .nodes
            .iter()
            .map(String::as_str)
            .filter(|id| self.degree(id) >= params.min_degree)
            .take(params.max_nodes)
            .collect();

        let shown: HashSet<&str> = nodes.iter().copied().collect();
        let edges = self
            .edges
            .iter()
            .filter(|e| shown.contains(e.source.as_str()) && shown.contains(e.target.as_str()))
            .collect();

        FilteredView {
            graph: self,
            params: *params,
            nodes,
            edges,
        }
    }
}
