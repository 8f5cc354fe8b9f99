use std::sync::Arc;

use timely::dataflow::operators::probe::Handle;

use differential_dataflow::input::InputSession;

use differential_traverse::{Action, AtomicEdgeCounter, Direction, Edge, EdgeCounter, Emitter, Traverse, TraverseConfig, Vertex};

fn main() {

    let vertices: usize = std::env::args().nth(1).map(|x| x.parse().expect("vertex count")).unwrap_or(10);

    let config = TraverseConfig::builder()
        .first(Direction::Out, "knows")
        .second(Direction::Out, "likes")
        .new_label("knows_likes")
        .action(Action::Prune)
        .build()
        .expect("valid configuration");

    let config = Arc::new(config);
    let counter: Arc<dyn EdgeCounter> = Arc::new(AtomicEdgeCounter::new());
    let shared = Arc::clone(&counter);

    timely::execute_from_args(std::env::args().skip(2), move |worker| {

        let index = worker.index();
        let peers = worker.peers();

        let mut input = InputSession::<u64, Vertex, isize>::new();
        let mut probe = Handle::new();

        let emitter = Emitter::new(Arc::clone(&config), Arc::clone(&shared));
        worker.dataflow(|scope| {
            input.to_collection(scope)
                 .traverse(emitter)
                 .inspect(|x| println!("{:?}", x))
                 .probe_with(&mut probe);
        });

        // a chain 0 -knows-> 1 -likes-> 2 -knows-> 3 -likes-> 4 ...
        let label = |i: u64| if i % 2 == 0 { "knows" } else { "likes" };
        let last = vertices as u64;
        for id in (0 .. vertices as u64).filter(|id| (*id as usize) % peers == index) {
            let mut vertex = Vertex::new(id).with_property("position", id as i64);
            if id > 0 { vertex.add_edge(Direction::In, Edge::new(id - 1, id, label(id - 1))); }
            if id + 1 < last { vertex.add_edge(Direction::Out, Edge::new(id, id + 1, label(id))); }
            input.insert(vertex);
        }

        input.advance_to(1u64);
        input.flush();
        worker.step_while(|| probe.less_than(input.time()));

    }).expect("Computation terminated abnormally");

    println!("edges created: {}", counter.get());
}
