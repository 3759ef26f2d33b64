//! Weighted directed graph over dense vertex indices.
//!
//! Vertices are `0..vertex_count()`. Arcs carry a nonnegative weight and at
//! most one arc exists per ordered pair. The vertex universe grows and
//! shrinks at the end only, which is all the transit network needs to graft
//! per-query vertices onto a static graph and remove them again.

use std::collections::BTreeMap;

/// Index of a vertex.
pub type VertexId = usize;

/// Arc weight, in seconds.
pub type Weight = i64;

/// Errors from graph operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// An endpoint is not a vertex of the graph
    #[error("vertex {vertex} is out of range (graph has {count} vertices)")]
    VertexOutOfRange { vertex: VertexId, count: usize },

    /// Arc weights must be nonnegative
    #[error("arc {from} -> {to} would have negative weight {weight}")]
    NegativeWeight {
        from: VertexId,
        to: VertexId,
        weight: Weight,
    },

    /// An arc already joins this ordered pair
    #[error("arc {from} -> {to} already exists")]
    DuplicateArc { from: VertexId, to: VertexId },

    /// No arc joins this ordered pair
    #[error("no arc {from} -> {to}")]
    ArcNotFound { from: VertexId, to: VertexId },

    /// Shrinking would drop a vertex that still has arcs
    #[error("cannot trim vertex {vertex}: it still has incident arcs")]
    LiveArcsOnTrimmedVertex { vertex: VertexId },
}

impl GraphError {
    /// The operation referred to an arc that does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, GraphError::ArcNotFound { .. })
    }

    /// The arguments could never have been valid for this graph.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            GraphError::VertexOutOfRange { .. }
                | GraphError::NegativeWeight { .. }
                | GraphError::DuplicateArc { .. }
        )
    }
}

/// A directed graph with weighted arcs, stored as per-vertex successor maps.
///
/// # Examples
///
/// ```
/// use transit_graph::graph::WeightedDigraph;
///
/// let mut g = WeightedDigraph::new(3);
/// g.add_arc(0, 1, 300).unwrap();
/// g.add_arc(1, 2, 200).unwrap();
///
/// assert_eq!(g.weight(0, 1), Ok(300));
/// assert!(g.add_arc(0, 1, 5).is_err());
/// assert!(g.weight(0, 2).unwrap_err().is_not_found());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeightedDigraph {
    successors: Vec<BTreeMap<VertexId, Weight>>,
    in_degree: Vec<usize>,
    arc_count: usize,
}

impl WeightedDigraph {
    /// Create a graph with `vertex_count` isolated vertices.
    pub fn new(vertex_count: usize) -> Self {
        Self {
            successors: vec![BTreeMap::new(); vertex_count],
            in_degree: vec![0; vertex_count],
            arc_count: 0,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.successors.len()
    }

    pub fn arc_count(&self) -> usize {
        self.arc_count
    }

    pub fn is_empty(&self) -> bool {
        self.successors.is_empty()
    }

    /// Set the number of vertices to exactly `vertex_count`.
    ///
    /// Growing appends isolated vertices. Shrinking fails, leaving the graph
    /// untouched, if any trimmed vertex still has an incoming or outgoing
    /// arc.
    pub fn resize(&mut self, vertex_count: usize) -> Result<(), GraphError> {
        let current = self.vertex_count();
        if vertex_count < current {
            if let Some(vertex) = (vertex_count..current)
                .find(|&v| !self.successors[v].is_empty() || self.in_degree[v] > 0)
            {
                return Err(GraphError::LiveArcsOnTrimmedVertex { vertex });
            }
        }
        self.successors.resize_with(vertex_count, BTreeMap::new);
        self.in_degree.resize(vertex_count, 0);
        Ok(())
    }

    /// Append one isolated vertex and return its index.
    pub fn add_vertex(&mut self) -> VertexId {
        self.successors.push(BTreeMap::new());
        self.in_degree.push(0);
        self.successors.len() - 1
    }

    /// Add the arc `from -> to`.
    ///
    /// Fails if an endpoint is out of range, the weight is negative, or the
    /// arc already exists. Self-loops are allowed.
    pub fn add_arc(&mut self, from: VertexId, to: VertexId, weight: Weight) -> Result<(), GraphError> {
        self.check_vertex(from)?;
        self.check_vertex(to)?;
        if weight < 0 {
            return Err(GraphError::NegativeWeight { from, to, weight });
        }
        if self.successors[from].contains_key(&to) {
            return Err(GraphError::DuplicateArc { from, to });
        }

        self.successors[from].insert(to, weight);
        self.in_degree[to] += 1;
        self.arc_count += 1;
        Ok(())
    }

    /// Remove the arc `from -> to`, returning its weight.
    pub fn remove_arc(&mut self, from: VertexId, to: VertexId) -> Result<Weight, GraphError> {
        let weight = self
            .successors
            .get_mut(from)
            .and_then(|arcs| arcs.remove(&to))
            .ok_or(GraphError::ArcNotFound { from, to })?;

        self.in_degree[to] -= 1;
        self.arc_count -= 1;
        Ok(weight)
    }

    /// Weight of the arc `from -> to`.
    pub fn weight(&self, from: VertexId, to: VertexId) -> Result<Weight, GraphError> {
        self.successors
            .get(from)
            .and_then(|arcs| arcs.get(&to))
            .copied()
            .ok_or(GraphError::ArcNotFound { from, to })
    }

    pub fn has_arc(&self, from: VertexId, to: VertexId) -> bool {
        self.weight(from, to).is_ok()
    }

    /// Outgoing arcs of `vertex` as `(successor, weight)`, by successor
    /// index. Empty for an out-of-range vertex.
    pub fn successors(&self, vertex: VertexId) -> impl Iterator<Item = (VertexId, Weight)> + '_ {
        self.successors
            .get(vertex)
            .into_iter()
            .flat_map(|arcs| arcs.iter().map(|(&to, &w)| (to, w)))
    }

    pub fn out_degree(&self, vertex: VertexId) -> usize {
        self.successors.get(vertex).map_or(0, BTreeMap::len)
    }

    pub fn in_degree(&self, vertex: VertexId) -> usize {
        self.in_degree.get(vertex).copied().unwrap_or(0)
    }

    /// Every arc as `(from, to, weight)`, ordered by `from` then `to`.
    pub fn arcs(&self) -> impl Iterator<Item = (VertexId, VertexId, Weight)> + '_ {
        self.successors
            .iter()
            .enumerate()
            .flat_map(|(from, arcs)| arcs.iter().map(move |(&to, &w)| (from, to, w)))
    }

    fn check_vertex(&self, vertex: VertexId) -> Result<(), GraphError> {
        if vertex < self.vertex_count() {
            Ok(())
        } else {
            Err(GraphError::VertexOutOfRange {
                vertex,
                count: self.vertex_count(),
            })
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    enum Op {
        Add(VertexId, VertexId, Weight),
        Remove(VertexId, VertexId),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0usize..8, 0usize..8, -5i64..100).prop_map(|(f, t, w)| Op::Add(f, t, w)),
            (0usize..8, 0usize..8).prop_map(|(f, t)| Op::Remove(f, t)),
        ]
    }

    proptest! {
        /// Arc count, degrees and the arc list stay consistent under any
        /// sequence of adds and removes.
        #[test]
        fn bookkeeping_matches_arcs(ops in prop::collection::vec(op(), 0..60)) {
            let mut g = WeightedDigraph::new(6);
            for op in ops {
                match op {
                    Op::Add(f, t, w) => { let _ = g.add_arc(f, t, w); }
                    Op::Remove(f, t) => { let _ = g.remove_arc(f, t); }
                }
            }

            let arcs: Vec<_> = g.arcs().collect();
            prop_assert_eq!(arcs.len(), g.arc_count());
            for &(_, _, w) in &arcs {
                prop_assert!(w >= 0);
            }
            for v in 0..g.vertex_count() {
                let incoming = arcs.iter().filter(|&&(_, t, _)| t == v).count();
                prop_assert_eq!(incoming, g.in_degree(v));
                prop_assert_eq!(g.successors(v).count(), g.out_degree(v));
            }
        }

        /// Adding then removing an arc restores the graph exactly.
        #[test]
        fn add_remove_is_identity(
            base in prop::collection::vec((0usize..5, 0usize..5, 0i64..50), 0..15),
            (f, t, w) in (0usize..5, 0usize..5, 0i64..50),
        ) {
            let mut g = WeightedDigraph::new(5);
            for (bf, bt, bw) in base {
                let _ = g.add_arc(bf, bt, bw);
            }
            let before = g.clone();
            if g.add_arc(f, t, w).is_ok() {
                prop_assert_eq!(g.remove_arc(f, t), Ok(w));
            }
            prop_assert_eq!(g, before);
        }
    }
}
