//! Test utilities for PartGraph integration tests
//!
//! - `GraphFixture`: graph manager over a fault injecting memory storage
//! - `song_graph`: the author/song sample graph
//! - `random_document`: random partition documents for property tests

#![allow(dead_code)]

use partgraph::{
    Edge, End, EndpointSpec, FaultInjectingGraphStorage, GraphConfig, GraphManager,
    MemoryGraphStorage, Node,
};
use std::sync::Arc;

pub type FaultStorage = FaultInjectingGraphStorage<MemoryGraphStorage>;

/// Route library logs to the test output; `RUST_LOG` selects the level
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Graph manager with direct access to its fault injecting storage
pub struct GraphFixture {
    pub storage: Arc<FaultStorage>,
    pub gm: GraphManager,
}

impl GraphFixture {
    pub fn new() -> Self {
        Self::with_config(GraphConfig::memory())
    }

    pub fn with_config(config: GraphConfig) -> Self {
        init_logging();
        let storage = Arc::new(FaultInjectingGraphStorage::new(MemoryGraphStorage::new(
            "test",
        )));
        let gm = GraphManager::with_config(storage.clone(), config);
        Self { storage, gm }
    }

    /// Fixture with the song graph stored in partition "main"
    pub fn with_song_graph() -> Self {
        let fixture = Self::new();
        song_graph(&fixture.gm, "main");
        fixture
    }

    /// A second manager over the same storage, with nothing opened yet
    pub fn reopen(&self) -> GraphManager {
        GraphManager::with_config(self.storage.clone(), self.gm.config().clone())
    }

    /// Standard export of a partition as a string
    pub fn export(&self, partition: &str) -> String {
        export_string(&self.gm, partition)
    }
}

pub fn export_string(gm: &GraphManager, partition: &str) -> String {
    let mut out = Vec::new();
    partgraph::export_partition(&mut out, partition, gm).expect("export failed");
    String::from_utf8(out).expect("export is not UTF-8")
}

pub fn canonical(text: &str) -> String {
    partgraph::canonical_dump(text).expect("not a partition document")
}

pub fn wrote(key: &str, author: &str, song: &str) -> Edge {
    Edge::new(key, "Wrote")
        .with_end(End::One, &EndpointSpec::new(author, "Author", "Author", true))
        .with_end(End::Two, &EndpointSpec::new(song, "Song", "Song", false))
}

/// Store the author/song sample graph
///
/// Author 000 wrote Aria1 through the edge Aria1-edge. The edge cascades
/// from the author but not from the song.
pub fn song_graph(gm: &GraphManager, partition: &str) {
    gm.store_node(
        partition,
        &Node::new("000", "Author").with_attr("name", "John"),
    )
    .expect("store author");
    gm.store_node(
        partition,
        &Node::new("Aria1", "Song")
            .with_attr("name", "Aria1")
            .with_attr("ranking", 8),
    )
    .expect("store song");
    gm.store_edge(partition, &wrote("Aria1-edge", "000", "Aria1").with_attr("number", 1))
        .expect("store edge");
}

const KINDS: [&str; 3] = ["Author", "Song", "Label"];
const EDGE_KINDS: [&str; 2] = ["Wrote", "Likes"];

/// Random valid partition document
///
/// Returns the document and the number of nodes and edges in it. Keys are
/// unique per kind so every entity survives the import.
pub fn random_document(rng: &mut fastrand::Rng) -> (serde_json::Value, usize, usize) {
    let node_count = rng.usize(1..20);
    let edge_count = rng.usize(0..20);

    let nodes: Vec<serde_json::Value> = (0..node_count)
        .map(|i| {
            serde_json::json!({
                "key": format!("n{}", i),
                "kind": KINDS[rng.usize(..KINDS.len())],
                "weight": rng.i64(-1000..1000),
                "score": rng.f64(),
                "flag": rng.bool(),
                "tags": [format!("t{}", rng.u8(..))],
            })
        })
        .collect();

    let edges: Vec<serde_json::Value> = (0..edge_count)
        .map(|i| {
            let end1 = &nodes[rng.usize(..nodes.len())];
            let end2 = &nodes[rng.usize(..nodes.len())];
            serde_json::json!({
                "key": format!("e{}", i),
                "kind": EDGE_KINDS[rng.usize(..EDGE_KINDS.len())],
                "end1key": end1["key"],
                "end1kind": end1["kind"],
                "end1role": "from",
                "end1cascading": rng.bool(),
                "end2key": end2["key"],
                "end2kind": end2["kind"],
                "end2role": "to",
                "end2cascading": rng.bool(),
            })
        })
        .collect();

    (
        serde_json::json!({ "nodes": nodes, "edges": edges }),
        node_count,
        edge_count,
    )
}
