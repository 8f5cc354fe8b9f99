//! The per-vertex half of a traversal pass.
//!
//! For each input vertex the emitter produces the records needed to rebuild it
//! (its properties and the edges it retains) keyed by its own id, and the two
//! records of every edge it derives, keyed by the derived edge's endpoints.
//!
//! The emitter looks at one vertex at a time. A two-hop path `f - v - s` is only
//! visible at its middle vertex `v`, which holds both hops in its local
//! adjacency, and so `v` is where the summarizing edge `f -> s` is derived.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::config::TraverseConfig;
use crate::counter::EdgeCounter;
use crate::graph::{Direction, Edge, Vertex, VertexId};
use crate::record::Record;

/// Vertices one `first_label` hop away from `vertex`, in the configured role.
///
/// With `first_direction == Out` these are the tails of `vertex`'s inbound
/// edges; with `first_direction == In` the heads of its outbound edges.
pub fn first_frontier(vertex: &Vertex, config: &TraverseConfig) -> BTreeSet<VertexId> {
    let direction = config.first_direction;
    frontier(vertex, direction.opposite(), &config.first_label, direction)
}

/// Vertices one `second_label` hop away from `vertex`, in the configured role.
///
/// With `second_direction == Out` these are the heads of `vertex`'s outbound
/// edges; with `second_direction == In` the tails of its inbound edges.
pub fn second_frontier(vertex: &Vertex, config: &TraverseConfig) -> BTreeSet<VertexId> {
    let direction = config.second_direction;
    frontier(vertex, direction, &config.second_label, direction.opposite())
}

/// Scans the `side` edges labeled `label` and collects their `endpoint` ids.
fn frontier(vertex: &Vertex, side: Direction, label: &str, endpoint: Direction) -> BTreeSet<VertexId> {
    vertex
        .edges_labeled(side, label)
        .map(|edge| edge.vertex_id(endpoint))
        .collect()
}

/// An edge synthesized from a two-hop path.
///
/// A derived edge is only ever released as the pair of records its two
/// endpoints need, so neither endpoint can end up without its copy.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct DerivedEdge(Edge);

impl DerivedEdge {
    /// The edge `first -[label]-> second`.
    pub fn new(first: VertexId, second: VertexId, label: &str) -> Self {
        DerivedEdge(Edge::new(first, second, label))
    }

    /// The outbound record for the tail and the inbound record for the head.
    pub fn into_records(self) -> [(VertexId, Record); 2] {
        let edge = self.0;
        [
            (edge.tail, Record::OutboundEdge(edge.clone())),
            (edge.head, Record::InboundEdge(edge)),
        ]
    }
}

/// Emits the keyed records for one vertex.
///
/// The output holds, in order: the vertex's self record; its retained inbound
/// edges; its retained outbound edges; and two records for each pair of the
/// Cartesian product of its first and second frontiers. `counter` advances by
/// two per derived edge.
pub fn emit(vertex: &Vertex, config: &TraverseConfig, counter: &dyn EdgeCounter) -> Vec<(VertexId, Record)> {

    let first = first_frontier(vertex, config);
    let second = second_frontier(vertex, config);

    let retained = vertex.inbound.len() + vertex.outbound.len();
    let mut output = Vec::with_capacity(1 + retained + 2 * first.len() * second.len());

    output.push((vertex.id, Record::vertex_self(vertex)));

    for direction in [Direction::In, Direction::Out] {
        for edge in vertex.edges(direction) {
            if config.retains(&edge.label) {
                output.push((vertex.id, Record::edge(direction, edge.clone())));
            }
        }
    }

    for &f in first.iter() {
        for &s in second.iter() {
            output.extend(DerivedEdge::new(f, s, &config.new_label).into_records());
            counter.increment(2);
        }
    }

    if !first.is_empty() && !second.is_empty() {
        tracing::trace!(
            vertex = vertex.id,
            first = first.len(),
            second = second.len(),
            "derived edges"
        );
    }

    output
}

/// Per-worker emitter state: the shared configuration and counter.
///
/// An `Emitter` is moved into the dataflow's `flat_map` closure; it holds no
/// mutable state of its own.
#[derive(Clone)]
pub struct Emitter {
    config: Arc<TraverseConfig>,
    counter: Arc<dyn EdgeCounter>,
}

impl Emitter {
    /// Creates an emitter from shared configuration and counter.
    pub fn new(config: Arc<TraverseConfig>, counter: Arc<dyn EdgeCounter>) -> Self {
        Emitter { config, counter }
    }

    /// Emits the keyed records for `vertex`.
    pub fn emit(&self, vertex: &Vertex) -> Vec<(VertexId, Record)> {
        emit(vertex, &self.config, &*self.counter)
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::config::Action;
    use crate::counter::AtomicEdgeCounter;

    fn config(first: Direction, second: Direction, action: Action) -> TraverseConfig {
        TraverseConfig::builder()
            .first(first, "knows")
            .second(second, "likes")
            .new_label("knows_likes")
            .action(action)
            .build()
            .unwrap()
    }

    /// Vertex 1 with an inbound and an outbound edge for each label.
    fn hub() -> Vertex {
        Vertex::new(1)
            .with_property("name", "marko")
            .with_edge(Direction::In, Edge::new(2, 1, "knows"))
            .with_edge(Direction::Out, Edge::new(1, 3, "knows"))
            .with_edge(Direction::In, Edge::new(4, 1, "likes"))
            .with_edge(Direction::Out, Edge::new(1, 5, "likes"))
            .with_edge(Direction::Out, Edge::new(1, 6, "created"))
    }

    #[test]
    fn first_frontier_follows_the_frontier_role() {
        let vertex = hub();
        let out = config(Direction::Out, Direction::Out, Action::Keep);
        assert_eq!(first_frontier(&vertex, &out), [2].into_iter().collect());
        let inn = config(Direction::In, Direction::Out, Action::Keep);
        assert_eq!(first_frontier(&vertex, &inn), [3].into_iter().collect());
    }

    #[test]
    fn second_frontier_transposes_directions() {
        let vertex = hub();
        let out = config(Direction::Out, Direction::Out, Action::Keep);
        assert_eq!(second_frontier(&vertex, &out), [5].into_iter().collect());
        let inn = config(Direction::Out, Direction::In, Action::Keep);
        assert_eq!(second_frontier(&vertex, &inn), [4].into_iter().collect());
    }

    #[test]
    fn frontiers_are_sets() {
        let vertex =
        Vertex::new(1)
            .with_edge(Direction::In, Edge::new(2, 1, "knows"))
            .with_edge(Direction::In, Edge::new(2, 1, "knows"))
            .with_edge(Direction::Out, Edge::new(1, 3, "likes"));
        let counter = AtomicEdgeCounter::new();
        let records = emit(&vertex, &config(Direction::Out, Direction::Out, Action::Keep), &counter);
        let derived = records.iter().filter(|(_, r)| matches!(r, Record::OutboundEdge(e) if e.label == "knows_likes")).count();
        assert_eq!(derived, 1);
        assert_eq!(counter.get(), 2);
    }

    #[test]
    fn cartesian_product_is_complete() {
        // three first-frontier vertices and two second-frontier vertices.
        let mut vertex = Vertex::new(10);
        for f in [1, 2, 3] { vertex.add_edge(Direction::In, Edge::new(f, 10, "knows")); }
        for s in [20, 30] { vertex.add_edge(Direction::Out, Edge::new(10, s, "likes")); }

        let counter = AtomicEdgeCounter::new();
        let records = emit(&vertex, &config(Direction::Out, Direction::Out, Action::Prune), &counter);

        let derived: Vec<_> = records.iter().filter(|(_, r)| match r {
            Record::InboundEdge(e) | Record::OutboundEdge(e) => e.label == "knows_likes",
            Record::VertexSelf { .. } => false,
        }).collect();
        assert_eq!(derived.len(), 2 * 3 * 2);
        assert_eq!(counter.get(), 12);

        for f in [1, 2, 3] {
            for s in [20, 30] {
                let edge = Edge::new(f, s, "knows_likes");
                assert_eq!(derived.iter().filter(|(k, r)| *k == f && *r == Record::OutboundEdge(edge.clone())).count(), 1);
                assert_eq!(derived.iter().filter(|(k, r)| *k == s && *r == Record::InboundEdge(edge.clone())).count(), 1);
            }
        }
    }

    #[test]
    fn keep_emits_every_original_edge() {
        let vertex = hub();
        let records = emit(&vertex, &config(Direction::Out, Direction::Out, Action::Keep), &AtomicEdgeCounter::new());
        let own: Vec<_> = records.iter().filter(|(k, _)| *k == 1).map(|(_, r)| r.clone()).collect();
        assert_eq!(own[0], Record::vertex_self(&vertex));
        for edge in vertex.inbound.iter() { assert!(own.contains(&Record::InboundEdge(edge.clone()))); }
        for edge in vertex.outbound.iter() { assert!(own.contains(&Record::OutboundEdge(edge.clone()))); }
    }

    #[test]
    fn prune_drops_pattern_labels() {
        let vertex = hub();
        let records = emit(&vertex, &config(Direction::Out, Direction::Out, Action::Prune), &AtomicEdgeCounter::new());
        let own: Vec<_> = records.into_iter().filter(|(k, _)| *k == 1).map(|(_, r)| r).collect();
        assert_eq!(own, vec![
            Record::vertex_self(&vertex),
            Record::OutboundEdge(Edge::new(1, 6, "created")),
        ]);
    }

    #[test]
    fn no_derivation_without_both_frontiers() {
        let vertex =
        Vertex::new(1)
            .with_edge(Direction::In, Edge::new(2, 1, "knows"))
            .with_edge(Direction::In, Edge::new(3, 1, "likes"));
        let counter = AtomicEdgeCounter::new();
        let records = emit(&vertex, &config(Direction::Out, Direction::Out, Action::Keep), &counter);
        assert_eq!(records.len(), 3);
        assert_eq!(counter.get(), 0);
    }

    #[test]
    fn derived_edges_come_in_pairs() {
        let derived = DerivedEdge::new(2, 3, "knows_likes");
        let [(tail_key, tail_record), (head_key, head_record)] = derived.into_records();
        assert_eq!(tail_key, 2);
        assert_eq!(head_key, 3);
        assert_eq!(tail_record, Record::OutboundEdge(Edge::new(2, 3, "knows_likes")));
        assert_eq!(head_record, Record::InboundEdge(Edge::new(2, 3, "knows_likes")));
    }

    #[test]
    fn emitter_shares_config_and_counter() {
        let counter: Arc<dyn EdgeCounter> = Arc::new(AtomicEdgeCounter::new());
        let emitter = Emitter::new(Arc::new(config(Direction::Out, Direction::Out, Action::Keep)), Arc::clone(&counter));
        let copy = emitter.clone();
        emitter.emit(&hub());
        copy.emit(&hub());
        assert_eq!(counter.get(), 4);
    }
}
