//! Streaming import/export

#[path = "testutils/mod.rs"]
mod testutils;

use partgraph::{
    import_partition, large_scale_export_partition, large_scale_import_partition, region_name,
    DirectoryStreamFactory, EntityType, Fault, GraphManager, MemoryGraphStorage, Node,
    StreamFactory,
};
use std::io;
use std::io::{Read, Write};
use std::sync::Arc;
use testutils::{canonical, export_string, random_document, GraphFixture};

fn fresh_manager() -> GraphManager {
    GraphManager::new(Arc::new(MemoryGraphStorage::new("target")))
}

#[test]
fn test_song_graph_streams() {
    let fixture = GraphFixture::with_song_graph();
    let mut factory = partgraph::MemoryStreamFactory::new();
    large_scale_export_partition(&mut factory, &fixture.gm).unwrap();

    assert_eq!(
        factory.readers().unwrap(),
        vec![
            "main-Author-nodes.json",
            "main-Song-nodes.json",
            "main-Wrote-edges.json"
        ]
    );

    let songs: serde_json::Value =
        serde_json::from_slice(factory.stream("main-Song-nodes.json").unwrap()).unwrap();
    assert_eq!(
        songs,
        serde_json::json!([{"key": "Aria1", "kind": "Song", "name": "Aria1", "ranking": 8}])
    );
}

#[test]
fn test_streaming_equivalence() {
    let mut rng = fastrand::Rng::with_seed(3);
    for _ in 0..10 {
        let source = fresh_manager();
        for partition in ["main", "second"] {
            let (document, _, _) = random_document(&mut rng);
            import_partition(document.to_string().as_bytes(), partition, &source).unwrap();
        }

        let mut factory = partgraph::MemoryStreamFactory::new();
        large_scale_export_partition(&mut factory, &source).unwrap();

        let target = fresh_manager();
        large_scale_import_partition(&factory, &target).unwrap();

        assert_eq!(target.partitions().unwrap(), vec!["main", "second"]);
        for partition in ["main", "second"] {
            assert_eq!(
                canonical(&export_string(&target, partition)),
                canonical(&export_string(&source, partition))
            );
        }
    }
}

#[test]
fn test_directory_round_trip() {
    let dir = tempfile::TempDir::new().unwrap();
    let source = GraphFixture::with_song_graph();

    let mut factory = DirectoryStreamFactory::new(dir.path()).unwrap();
    large_scale_export_partition(&mut factory, &source.gm).unwrap();
    assert!(dir.path().join("main-Wrote-edges.json").exists());

    let target = fresh_manager();
    large_scale_import_partition(&DirectoryStreamFactory::new(dir.path()).unwrap(), &target)
        .unwrap();
    assert_eq!(
        canonical(&export_string(&target, "main")),
        canonical(&source.export("main"))
    );
}

#[test]
fn test_export_aborts_on_read_failure() {
    let fixture = GraphFixture::with_song_graph();
    let songs = region_name("main", "Song", EntityType::Nodes);
    fixture.storage.inject(&songs, 1, Fault::FetchSerious);

    let mut factory = partgraph::MemoryStreamFactory::new();
    let err = large_scale_export_partition(&mut factory, &fixture.gm).unwrap_err();
    assert!(err
        .to_string()
        .starts_with("GraphError: Could not read graph information"));
    assert!(factory.stream("main-Wrote-edges.json").is_none());
}

#[test]
fn test_import_aborts_on_store_failure() {
    let mut factory = partgraph::MemoryStreamFactory::new();
    factory.insert(
        "main-X-nodes.json",
        r#"[{"key":"1","kind":"X"},{"key":"2","kind":"X"},{"key":"3","kind":"X"}]"#,
    );

    let fixture = GraphFixture::new();
    fixture.gm.store_node("main", &Node::new("0", "X")).unwrap();
    let nodes = region_name("main", "X", EntityType::Nodes);
    fixture.storage.inject(&nodes, 3, Fault::InsertError);

    let err = large_scale_import_partition(&factory, &fixture.gm).unwrap_err();
    assert!(err
        .to_string()
        .starts_with("GraphError: Could not write graph information"));
    assert_eq!(fixture.gm.node_keys("main", "X").unwrap(), vec!["0", "1"]);
}

#[test]
fn test_import_rejects_non_array_stream() {
    let mut factory = partgraph::MemoryStreamFactory::new();
    factory.insert("main-X-nodes.json", r#"{"key":"1","kind":"X"}"#);

    let err = large_scale_import_partition(&factory, &fresh_manager()).unwrap_err();
    assert!(err
        .to_string()
        .starts_with("Could not decode stream main-X-nodes.json: "));
}

/// Factory whose writers fail after a number of bytes
struct FailingFactory {
    budget: usize,
}

struct FailingWriter<'a> {
    budget: &'a mut usize,
}

impl Write for FailingWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.len() > *self.budget {
            return Err(io::Error::new(io::ErrorKind::Other, "disk full"));
        }
        *self.budget -= buf.len();
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl StreamFactory for FailingFactory {
    fn create_writer(&mut self, _name: &str) -> io::Result<Box<dyn Write + '_>> {
        Ok(Box::new(FailingWriter {
            budget: &mut self.budget,
        }))
    }

    fn readers(&self) -> io::Result<Vec<String>> {
        Ok(Vec::new())
    }

    fn create_reader(&self, name: &str) -> io::Result<Box<dyn Read + '_>> {
        Err(io::Error::new(io::ErrorKind::NotFound, name.to_string()))
    }
}

#[test]
fn test_export_aborts_on_write_failure() {
    let fixture = GraphFixture::with_song_graph();
    let mut factory = FailingFactory { budget: 40 };

    let err = large_scale_export_partition(&mut factory, &fixture.gm).unwrap_err();
    assert!(err.to_string().starts_with("GraphError: I/O failure"));
}
