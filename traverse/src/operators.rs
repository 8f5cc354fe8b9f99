//! The traversal pass as a differential dataflow operator.
//!
//! The pass is a `flat_map` that runs the emitter on each vertex, followed by a
//! `reduce` that exchanges records by vertex id and merges each key back into a
//! vertex. The exchange guarantees that all records for an id meet in one
//! `reduce` invocation; it does not order them, and the merge does not need it to.

use timely::dataflow::Scope;

use differential_dataflow::VecCollection;
use differential_dataflow::lattice::Lattice;

use crate::emit::Emitter;
use crate::graph::{Vertex, VertexId};
use crate::merge::merge;
use crate::record::Record;

/// Extension trait for the `traverse` differential dataflow method.
pub trait Traverse<G: Scope> {
    /// The keyed records the emitter produces for each vertex.
    fn traverse_records(&self, emitter: Emitter) -> VecCollection<G, (VertexId, Record), isize>;

    /// Rebuilds every vertex with its derived edges, and without pruned edges.
    ///
    /// A merge failure indicates a fault in the emitter or the exchange rather
    /// than in the data, and leaves no consistent graph to produce; the worker
    /// panics, which fails the whole computation.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    ///
    /// use differential_dataflow::input::Input;
    /// use differential_traverse::{Action, Direction, Edge, Emitter, NoopEdgeCounter, Traverse, TraverseConfig, Vertex};
    ///
    /// ::timely::example(|scope| {
    ///
    ///     let config = TraverseConfig::builder()
    ///         .first(Direction::Out, "knows")
    ///         .second(Direction::Out, "likes")
    ///         .new_label("knows_likes")
    ///         .action(Action::Keep)
    ///         .build()
    ///         .unwrap();
    ///
    ///     let vertex =
    ///     Vertex::new(1)
    ///         .with_edge(Direction::In, Edge::new(2, 1, "knows"))
    ///         .with_edge(Direction::Out, Edge::new(1, 3, "likes"));
    ///
    ///     scope.new_collection_from(vec![vertex]).1
    ///          .traverse(Emitter::new(Arc::new(config), Arc::new(NoopEdgeCounter)));
    /// });
    /// ```
    fn traverse(&self, emitter: Emitter) -> VecCollection<G, Vertex, isize>;
}

impl<G> Traverse<G> for VecCollection<G, Vertex, isize>
where
    G: Scope,
    G::Timestamp: Lattice+Ord,
{
    fn traverse_records(&self, emitter: Emitter) -> VecCollection<G, (VertexId, Record), isize> {
        self.clone().flat_map(move |vertex| emitter.emit(&vertex))
    }

    fn traverse(&self, emitter: Emitter) -> VecCollection<G, Vertex, isize> {
        rebuild(self.traverse_records(emitter))
    }
}

/// Merges keyed records back into vertices, one per key.
///
/// Panics if a key's records cannot be merged, e.g. a self record filed under
/// another vertex's key. Records produced by [`Traverse::traverse_records`]
/// never trigger this.
pub fn rebuild<G>(records: VecCollection<G, (VertexId, Record), isize>) -> VecCollection<G, Vertex, isize>
where
    G: Scope,
    G::Timestamp: Lattice+Ord,
{
    records
        .reduce(|id, input, output| {
            match merge(*id, input.iter().map(|(record, count)| (*record, *count))) {
                Ok(merged) => output.push((merged.vertex, 1isize)),
                Err(error) => panic!("traverse: failed to merge vertex {}: {}", id, error),
            }
        })
        .map(|(_id, vertex)| vertex)
}
