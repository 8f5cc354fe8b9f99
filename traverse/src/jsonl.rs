//! Vertices as JSON lines, one vertex per line.

use std::io::{BufRead, Write};

use crate::error::{Error, Result};
use crate::graph::Vertex;

/// Reads the vertices assigned to worker `index` of `peers`.
///
/// Non-empty lines are dealt out round-robin, so each vertex is read by
/// exactly one worker. Blank lines are skipped and do not count.
pub fn read_vertices<R: BufRead>(reader: R, index: usize, peers: usize) -> Result<Vec<Vertex>> {
    let mut vertices = Vec::new();
    let mut position = 0;
    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        if position % peers == index {
            let vertex = serde_json::from_str(&line).map_err(|source| Error::Decode { line: number + 1, source })?;
            vertices.push(vertex);
        }
        position += 1;
    }
    Ok(vertices)
}

/// Writes `vertices` as JSON lines.
pub fn write_vertices<W: Write>(mut writer: W, vertices: &[Vertex]) -> Result<()> {
    for vertex in vertices {
        serde_json::to_writer(&mut writer, vertex)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}
