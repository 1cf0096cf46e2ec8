// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Streaming import and export for large graphs
//!
//! Every partition, kind and entity type gets its own stream named
//! `<partition>-<kind>-nodes.json` or `<partition>-<kind>-edges.json`. A
//! stream is a JSON array of entity objects which is written and read one
//! entity at a time, so no stream is ever held in memory as a whole.

use super::standard::warn_unrepresentable;
use super::JsonObject;
use crate::data::{Edge, Node};
use crate::graph::{EntityType, GraphError, GraphManager, GraphResult};
use log::{debug, info, warn};
use serde::de::{Error as _, SeqAccess, Visitor};
use serde::Deserializer as _;
use std::collections::BTreeMap;
use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

const STREAM_EXTENSION: &str = ".json";

/// Source and sink of named byte streams
pub trait StreamFactory {
    /// Create (or truncate) a named stream for writing
    fn create_writer(&mut self, name: &str) -> io::Result<Box<dyn Write + '_>>;

    /// Names of all readable streams
    fn readers(&self) -> io::Result<Vec<String>>;

    /// Open a named stream for reading
    fn create_reader(&self, name: &str) -> io::Result<Box<dyn Read + '_>>;
}

/// Stream factory keeping all streams in memory
#[derive(Debug, Default, Clone)]
pub struct MemoryStreamFactory {
    streams: BTreeMap<String, Vec<u8>>,
}

impl MemoryStreamFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Content of a stream
    pub fn stream(&self, name: &str) -> Option<&[u8]> {
        self.streams.get(name).map(Vec::as_slice)
    }

    /// Add or replace a stream
    pub fn insert(&mut self, name: &str, content: impl Into<Vec<u8>>) {
        self.streams.insert(name.to_string(), content.into());
    }

    pub fn len(&self) -> usize {
        self.streams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }
}

impl StreamFactory for MemoryStreamFactory {
    fn create_writer(&mut self, name: &str) -> io::Result<Box<dyn Write + '_>> {
        let buffer = self.streams.entry(name.to_string()).or_default();
        buffer.clear();
        Ok(Box::new(buffer))
    }

    fn readers(&self) -> io::Result<Vec<String>> {
        Ok(self.streams.keys().cloned().collect())
    }

    fn create_reader(&self, name: &str) -> io::Result<Box<dyn Read + '_>> {
        match self.streams.get(name) {
            Some(buffer) => Ok(Box::new(buffer.as_slice())),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("No stream named {}", name),
            )),
        }
    }
}

/// Stream factory storing one file per stream in a directory
#[derive(Debug, Clone)]
pub struct DirectoryStreamFactory {
    dir: PathBuf,
}

impl DirectoryStreamFactory {
    /// Use a directory for streams, creating it if needed
    pub fn new<P: AsRef<Path>>(dir: P) -> io::Result<Self> {
        fs::create_dir_all(dir.as_ref())?;
        Ok(Self {
            dir: dir.as_ref().to_path_buf(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl StreamFactory for DirectoryStreamFactory {
    fn create_writer(&mut self, name: &str) -> io::Result<Box<dyn Write + '_>> {
        let file = File::create(self.dir.join(name))?;
        Ok(Box::new(BufWriter::new(file)))
    }

    fn readers(&self) -> io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                if name.ends_with(STREAM_EXTENSION) {
                    names.push(name.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    fn create_reader(&self, name: &str) -> io::Result<Box<dyn Read + '_>> {
        let file = File::open(self.dir.join(name))?;
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Name of the stream holding a kind of a partition
pub fn stream_name(partition: &str, kind: &str, entity: EntityType) -> String {
    format!("{}-{}-{}{}", partition, kind, entity, STREAM_EXTENSION)
}

fn parse_stream_name(name: &str) -> Option<(&str, &str, EntityType)> {
    let stem = name.strip_suffix(STREAM_EXTENSION)?;
    let mut parts = stem.split('-');
    let (partition, kind, entity) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() || partition.is_empty() || kind.is_empty() {
        return None;
    }
    let entity = match entity {
        "nodes" => EntityType::Nodes,
        "edges" => EntityType::Edges,
        _ => return None,
    };
    Some((partition, kind, entity))
}

/// Export every partition of a graph manager into streams
///
/// Any error aborts the whole export. Streams written before the error are
/// left in the factory.
pub fn large_scale_export_partition<F>(factory: &mut F, gm: &GraphManager) -> GraphResult<()>
where
    F: StreamFactory + ?Sized,
{
    let mut streams = 0;

    for partition in gm.partitions()? {
        for kind in gm.node_kinds(&partition)? {
            let keys = gm.node_keys(&partition, &kind)?;
            if keys.is_empty() {
                continue;
            }
            let name = stream_name(&partition, &kind, EntityType::Nodes);
            let mut writer = factory.create_writer(&name)?;
            let written = write_stream(&mut writer, keys, |key| {
                Ok(gm.fetch_node(&partition, &kind, key)?.map(|node| {
                    warn_unrepresentable("Node", key, node.attrs());
                    node.to_json()
                }))
            })?;
            debug!("Wrote {} nodes to stream {}", written, name);
            streams += 1;
        }

        for kind in gm.edge_kinds(&partition)? {
            let keys = gm.edge_keys(&partition, &kind)?;
            if keys.is_empty() {
                continue;
            }
            let name = stream_name(&partition, &kind, EntityType::Edges);
            let mut writer = factory.create_writer(&name)?;
            let written = write_stream(&mut writer, keys, |key| {
                Ok(gm.fetch_edge(&partition, &kind, key)?.map(|edge| {
                    warn_unrepresentable("Edge", key, edge.attrs());
                    edge.to_json()
                }))
            })?;
            debug!("Wrote {} edges to stream {}", written, name);
            streams += 1;
        }
    }

    info!("Exported graph '{}' into {} streams", gm.name(), streams);
    Ok(())
}

/// Write entities as a JSON array, one at a time
fn write_stream<F>(writer: &mut dyn Write, keys: Vec<String>, mut fetch: F) -> GraphResult<usize>
where
    F: FnMut(&str) -> GraphResult<Option<JsonObject>>,
{
    let mut written = 0;
    writer.write_all(b"[")?;
    for key in keys {
        let Some(object) = fetch(&key)? else {
            continue;
        };
        if written > 0 {
            writer.write_all(b",")?;
        }
        serde_json::to_writer(&mut *writer, &object).map_err(io::Error::from)?;
        written += 1;
    }
    writer.write_all(b"]")?;
    writer.flush()?;
    Ok(written)
}

/// Import all streams of a factory
///
/// Node streams are imported before edge streams. Streams whose names do not
/// follow the stream naming scheme are skipped. The first error aborts the
/// import; entities stored before it remain stored.
pub fn large_scale_import_partition<F>(factory: &F, gm: &GraphManager) -> GraphResult<()>
where
    F: StreamFactory + ?Sized,
{
    let names = factory.readers()?;
    let mut streams = Vec::new();
    for name in &names {
        match parse_stream_name(name) {
            Some((partition, _, entity)) => streams.push((entity, name.as_str(), partition)),
            None => warn!("Skipping stream {} which is not a graph stream", name),
        }
    }

    let mut total = 0;
    for pass in [EntityType::Nodes, EntityType::Edges] {
        for (entity, name, partition) in streams.iter().filter(|(entity, _, _)| *entity == pass) {
            let reader = factory.create_reader(name)?;
            let count = import_stream(reader, name, partition, *entity, gm)?;
            debug!("Imported {} {} from stream {}", count, entity, name);
            total += count;
        }
    }

    info!("Imported {} entities from {} streams", total, streams.len());
    Ok(())
}

/// Decode a stream element by element, storing each entity as it arrives
fn import_stream<R: Read>(
    reader: R,
    name: &str,
    partition: &str,
    entity: EntityType,
    gm: &GraphManager,
) -> GraphResult<usize> {
    let mut failure = None;
    let visitor = StreamVisitor {
        gm,
        partition,
        entity,
        failure: &mut failure,
    };

    let decode_error = |e: serde_json::Error| GraphError::DecodeStream {
        name: name.to_string(),
        reason: e.to_string(),
    };

    let mut deserializer = serde_json::Deserializer::from_reader(reader);
    match (&mut deserializer).deserialize_seq(visitor) {
        Ok(count) => {
            deserializer.end().map_err(decode_error)?;
            Ok(count)
        }
        Err(e) => Err(failure.take().unwrap_or_else(|| decode_error(e))),
    }
}

struct StreamVisitor<'a> {
    gm: &'a GraphManager,
    partition: &'a str,
    entity: EntityType,
    /// Store error which aborted decoding
    failure: &'a mut Option<GraphError>,
}

impl<'de, 'a> Visitor<'de> for StreamVisitor<'a> {
    type Value = usize;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a list of graph entities")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<usize, A::Error> {
        let mut count = 0;
        while let Some(object) = seq.next_element::<JsonObject>()? {
            let stored = match self.entity {
                EntityType::Nodes => self.gm.store_node(self.partition, &Node::from_json(object)),
                EntityType::Edges => self.gm.store_edge(self.partition, &Edge::from_json(object)),
            };
            if let Err(e) = stored {
                let message = e.to_string();
                *self.failure = Some(e);
                return Err(A::Error::custom(message));
            }
            count += 1;
        }
        Ok(count)
    }
}
