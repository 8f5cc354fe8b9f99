//! Runs one traversal pass to completion on a timely worker.

use std::cell::RefCell;
use std::rc::Rc;

use timely::communication::Allocate;
use timely::dataflow::operators::Exchange;
use timely::dataflow::operators::probe::Handle;
use timely::worker::Worker;

use differential_dataflow::AsCollection;
use differential_dataflow::input::InputSession;

use crate::emit::Emitter;
use crate::graph::Vertex;
use crate::operators::Traverse;

/// Which workers receive the rebuilt vertices of a pass.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Delivery {
    /// Each worker keeps the vertices the exchange assigned to it.
    EachWorker,
    /// Every rebuilt vertex, from every process, is sent to worker 0.
    FirstWorker,
}

/// Builds the traversal dataflow on `worker`, feeds it `vertices`, and returns
/// the rebuilt vertices `delivery` routes to this worker, sorted.
///
/// Each worker supplies its own share of the input; which worker rebuilds a
/// vertex is decided by the exchange, not by which worker loaded it.
pub fn run_pass<A, I>(worker: &mut Worker<A>, vertices: I, emitter: Emitter, delivery: Delivery) -> Vec<Vertex>
where
    A: Allocate,
    I: IntoIterator<Item = Vertex>,
{
    let mut input = InputSession::<u64, Vertex, isize>::new();
    let mut probe = Handle::new();
    let rebuilt = Rc::new(RefCell::new(Vec::new()));

    worker.dataflow(|scope| {
        let sink = Rc::clone(&rebuilt);
        let traversed = input.to_collection(scope).traverse(emitter);
        let delivered = match delivery {
            Delivery::EachWorker => traversed,
            Delivery::FirstWorker => traversed.inner.exchange(|_| 0).as_collection(),
        };
        delivered
            .inspect(move |(vertex, _time, diff)| {
                for _ in 0 .. *diff {
                    sink.borrow_mut().push(vertex.clone());
                }
            })
            .probe_with(&mut probe);
    });

    let mut loaded = 0usize;
    for vertex in vertices {
        input.insert(vertex);
        loaded += 1;
    }

    input.advance_to(1);
    input.flush();
    worker.step_while(|| probe.less_than(input.time()));

    let mut result = rebuilt.take();
    result.sort();

    tracing::info!(
        worker = worker.index(),
        loaded,
        rebuilt = result.len(),
        "traverse pass complete"
    );

    result
}
