//! Reconstruction of one vertex from the records delivered to its key.
//!
//! The exchange delivers a key's records in no particular order, so merging
//! works on the multiset: records are visited in their canonical order and the
//! rebuilt adjacency is sorted. Any permutation of the same records rebuilds
//! the same vertex.

use crate::error::{Error, Result};
use crate::graph::{Vertex, VertexId};
use crate::record::Record;

/// A data-quality observation made while merging a key.
///
/// Anomalies do not stop the pass; the vertex is still produced.
#[derive(Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum Anomaly {
    /// No self record arrived; the vertex only appears as an edge endpoint and
    /// is rebuilt with empty properties.
    MissingSelf,
    /// More than one self record arrived; the greatest one was kept.
    DuplicateSelf(usize),
}

/// The result of merging one key.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Merged {
    /// The rebuilt vertex.
    pub vertex: Vertex,
    /// An anomaly noticed while merging, if any.
    pub anomaly: Option<Anomaly>,
}

/// Rebuilds vertex `id` from its records and their multiplicities.
///
/// Edge records with multiplicity `n` contribute `n` copies of the edge. A
/// non-positive multiplicity, or a self record for another vertex, is an
/// integrity error.
pub fn merge<'a, I>(id: VertexId, records: I) -> Result<Merged>
where
    I: IntoIterator<Item = (&'a Record, isize)>,
{
    let mut records: Vec<_> = records.into_iter().collect();
    records.sort();

    let mut vertex = Vertex::new(id);
    let mut selves = 0;

    for (record, count) in records {
        if count <= 0 {
            return Err(Error::InvalidMultiplicity { id, count });
        }
        let copies = count as usize;
        match record {
            Record::VertexSelf { id: self_id, properties } => {
                if *self_id != id {
                    return Err(Error::KeyMismatch { key: id, id: *self_id });
                }
                vertex.properties.clone_from(properties);
                selves += copies;
            }
            Record::InboundEdge(edge) => {
                vertex.inbound.extend(std::iter::repeat(edge).take(copies).cloned());
            }
            Record::OutboundEdge(edge) => {
                vertex.outbound.extend(std::iter::repeat(edge).take(copies).cloned());
            }
        }
    }

    vertex.inbound.sort();
    vertex.outbound.sort();

    let anomaly = match selves {
        0 => Some(Anomaly::MissingSelf),
        1 => None,
        n => Some(Anomaly::DuplicateSelf(n)),
    };

    if let Some(anomaly) = anomaly {
        tracing::warn!(
            vertex = id,
            ?anomaly,
            inbound = vertex.inbound.len(),
            outbound = vertex.outbound.len(),
            "vertex rebuilt from incomplete records"
        );
    }

    Ok(Merged { vertex, anomaly })
}

/// Rebuilds vertex `id` from owned records, each counted once.
pub fn merge_records<I>(id: VertexId, records: I) -> Result<Merged>
where
    I: IntoIterator<Item = Record>,
{
    let records: Vec<Record> = records.into_iter().collect();
    merge(id, records.iter().map(|record| (record, 1)))
}

#[cfg(test)]
mod tests {

    use itertools::Itertools;

    use super::*;
    use crate::graph::{Direction, Edge};

    fn records() -> Vec<Record> {
        let vertex = Vertex::new(1).with_property("name", "marko").with_property("age", 29i64);
        vec![
            Record::vertex_self(&vertex),
            Record::InboundEdge(Edge::new(2, 1, "knows")),
            Record::InboundEdge(Edge::new(2, 1, "knows")),
            Record::OutboundEdge(Edge::new(1, 3, "likes")),
            Record::OutboundEdge(Edge::new(1, 4, "created").with_property("weight", 0.4)),
        ]
    }

    #[test]
    fn rebuilds_properties_and_adjacency() {
        let merged = merge_records(1, records()).unwrap();
        assert_eq!(merged.anomaly, None);

        let expected =
        Vertex::new(1)
            .with_property("name", "marko")
            .with_property("age", 29i64)
            .with_edge(Direction::In, Edge::new(2, 1, "knows"))
            .with_edge(Direction::In, Edge::new(2, 1, "knows"))
            .with_edge(Direction::Out, Edge::new(1, 3, "likes"))
            .with_edge(Direction::Out, Edge::new(1, 4, "created").with_property("weight", 0.4));

        assert_eq!(merged.vertex, expected);
    }

    #[test]
    fn merge_is_order_independent() {
        let records = records();
        let reference = merge_records(1, records.clone()).unwrap();
        for permutation in records.iter().cloned().permutations(records.len()) {
            assert_eq!(merge_records(1, permutation).unwrap(), reference);
        }
    }

    #[test]
    fn multiplicities_expand_to_copies() {
        let edge = Edge::new(1, 9, "likes");
        let record = Record::OutboundEdge(edge.clone());
        let merged = merge(1, vec![(&record, 3)]).unwrap();
        assert_eq!(merged.vertex.outbound, vec![edge.clone(), edge.clone(), edge]);
        assert_eq!(merged.anomaly, Some(Anomaly::MissingSelf));

        assert!(matches!(merge(1, vec![(&record, 0)]), Err(Error::InvalidMultiplicity { id: 1, count: 0 })));
        assert!(matches!(merge(1, vec![(&record, -1)]), Err(Error::InvalidMultiplicity { id: 1, count: -1 })));
    }

    #[test]
    fn missing_self_yields_empty_properties() {
        let merged = merge_records(3, vec![Record::InboundEdge(Edge::new(2, 3, "knows_likes"))]).unwrap();
        assert!(merged.vertex.properties.is_empty());
        assert_eq!(merged.vertex.inbound, vec![Edge::new(2, 3, "knows_likes")]);
        assert_eq!(merged.anomaly, Some(Anomaly::MissingSelf));
    }

    #[test]
    fn duplicate_self_keeps_the_greatest() {
        let a = Vertex::new(5).with_property("name", "a");
        let b = Vertex::new(5).with_property("name", "b");
        let forward = merge_records(5, vec![Record::vertex_self(&a), Record::vertex_self(&b)]).unwrap();
        let backward = merge_records(5, vec![Record::vertex_self(&b), Record::vertex_self(&a)]).unwrap();
        assert_eq!(forward, backward);
        assert_eq!(forward.vertex.properties, b.properties);
        assert_eq!(forward.anomaly, Some(Anomaly::DuplicateSelf(2)));
    }

    #[test]
    fn self_record_for_another_key_is_fatal() {
        let other = Record::vertex_self(&Vertex::new(8));
        assert!(matches!(merge_records(7, vec![other]), Err(Error::KeyMismatch { key: 7, id: 8 })));
    }
}
