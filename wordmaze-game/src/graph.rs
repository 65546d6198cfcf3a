//! Labyrinth graph: labeled vertices joined by direction-keyed edges.
//!
//! The graph is assembled once through [`GraphBuilder`] and structurally
//! immutable afterwards; only display styles may change during play.
//! Labyrinth generation itself lives with the embedding front-end.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Opaque display token attached to a vertex or the player marker.
///
/// The engine threads these through to the presentation layer untouched and
/// never inspects their contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleToken(pub String);

impl StyleToken {
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StyleToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Inline capacity two covers the common case of a marker plus one accent.
pub type StyleSet = SmallVec<[StyleToken; 2]>;

/// Movement directions, each bound to one keyboard symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// All directions in ascending symbol order. This is the deterministic
    /// exploration order used by path enumeration.
    pub const BY_SYMBOL: [Self; 8] = [
        Self::West,
        Self::SouthEast,
        Self::East,
        Self::NorthEast,
        Self::NorthWest,
        Self::South,
        Self::North,
        Self::SouthWest,
    ];

    /// The lowercase keyboard symbol accepted for this direction.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::North => 'w',
            Self::NorthEast => 'e',
            Self::East => 'd',
            Self::SouthEast => 'c',
            Self::South => 's',
            Self::SouthWest => 'z',
            Self::West => 'a',
            Self::NorthWest => 'q',
        }
    }

    /// Resolve an input symbol, case-insensitively. Unknown symbols resolve
    /// to `None` and are treated by callers like a missing edge.
    #[must_use]
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol.to_ascii_lowercase() {
            'w' => Some(Self::North),
            'e' => Some(Self::NorthEast),
            'd' => Some(Self::East),
            'c' => Some(Self::SouthEast),
            's' => Some(Self::South),
            'z' => Some(Self::SouthWest),
            'a' => Some(Self::West),
            'q' => Some(Self::NorthWest),
            _ => None,
        }
    }

    /// Direction pointing the opposite way; used when wiring two-way edges.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::NorthEast => Self::SouthWest,
            Self::East => Self::West,
            Self::SouthEast => Self::NorthWest,
            Self::South => Self::North,
            Self::SouthWest => Self::NorthEast,
            Self::West => Self::East,
            Self::NorthWest => Self::SouthEast,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::NorthEast => "northeast",
            Self::East => "east",
            Self::SouthEast => "southeast",
            Self::South => "south",
            Self::SouthWest => "southwest",
            Self::West => "west",
            Self::NorthWest => "northwest",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "north" => Ok(Self::North),
            "northeast" => Ok(Self::NorthEast),
            "east" => Ok(Self::East),
            "southeast" => Ok(Self::SouthEast),
            "south" => Ok(Self::South),
            "southwest" => Ok(Self::SouthWest),
            "west" => Ok(Self::West),
            "northwest" => Ok(Self::NorthWest),
            _ => Err(()),
        }
    }
}

/// Stable vertex identity: an index into the graph's vertex table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VertexId(pub usize);

impl VertexId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// One cell of the labyrinth: a fixed label plus pass-through styles.
#[derive(Debug, Clone)]
pub struct Vertex {
    label: char,
    styles: StyleSet,
}

impl Vertex {
    fn new(label: char, styles: StyleSet) -> Self {
        Self {
            label: label.to_ascii_lowercase(),
            styles,
        }
    }

    /// Label character, lowercase, immutable after construction.
    #[must_use]
    pub const fn label(&self) -> char {
        self.label
    }

    /// Active display styles in insertion order.
    #[must_use]
    pub fn styles(&self) -> &[StyleToken] {
        &self.styles
    }
}

type EdgeList = SmallVec<[(Direction, VertexId); 8]>;

/// Errors raised while assembling a labyrinth graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("graph has no vertices")]
    NoVertices,
    #[error("vertex index {index} out of range ({count} vertices)")]
    VertexOutOfRange { index: usize, count: usize },
    #[error("vertex {from} already has an edge {direction}")]
    DuplicateDirection { from: usize, direction: Direction },
    #[error("start vertex index {index} out of range ({count} vertices)")]
    StartOutOfRange { index: usize, count: usize },
    #[error("end vertex index {index} out of range ({count} vertices)")]
    EndOutOfRange { index: usize, count: usize },
}

/// Construction-time assembler for [`Graph`].
///
/// Vertices are added first and referenced by the returned ids; edges are
/// keyed by direction and at most one edge may leave a vertex per direction.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    vertices: Vec<Vertex>,
    edges: Vec<EdgeList>,
}

impl GraphBuilder {
    /// Add a vertex with no styles; returns its id.
    pub fn add_vertex(&mut self, label: char) -> VertexId {
        self.add_vertex_styled(label, StyleSet::new())
    }

    /// Add a vertex carrying initial display tokens.
    pub fn add_vertex_styled(&mut self, label: char, styles: StyleSet) -> VertexId {
        let id = VertexId(self.vertices.len());
        self.vertices.push(Vertex::new(label, styles));
        self.edges.push(EdgeList::new());
        id
    }

    /// Add a one-way edge.
    ///
    /// # Errors
    /// Fails when either endpoint is unknown or `from` already has an edge
    /// in `direction`.
    pub fn connect(
        &mut self,
        from: VertexId,
        direction: Direction,
        to: VertexId,
    ) -> Result<(), GraphError> {
        self.check(from)?;
        self.check(to)?;
        let list = &mut self.edges[from.index()];
        if list.iter().any(|(existing, _)| *existing == direction) {
            return Err(GraphError::DuplicateDirection {
                from: from.index(),
                direction,
            });
        }
        list.push((direction, to));
        Ok(())
    }

    /// Add a two-way edge: `direction` from `from` to `to`, and the
    /// opposite direction back.
    ///
    /// # Errors
    /// Fails like [`Self::connect`] for either of the two edges.
    pub fn connect_both(
        &mut self,
        from: VertexId,
        direction: Direction,
        to: VertexId,
    ) -> Result<(), GraphError> {
        self.connect(from, direction, to)?;
        self.connect(to, direction.opposite(), from)
    }

    fn check(&self, id: VertexId) -> Result<(), GraphError> {
        if id.index() >= self.vertices.len() {
            return Err(GraphError::VertexOutOfRange {
                index: id.index(),
                count: self.vertices.len(),
            });
        }
        Ok(())
    }

    /// Finalize with the designated entry and exit vertices.
    ///
    /// Adjacency lists are frozen sorted by direction symbol so that every
    /// traversal over the finished graph is reproducible.
    ///
    /// # Errors
    /// Fails when the graph is empty or an endpoint is out of range.
    pub fn build(mut self, start: VertexId, end: VertexId) -> Result<Graph, GraphError> {
        if self.vertices.is_empty() {
            return Err(GraphError::NoVertices);
        }
        if start.index() >= self.vertices.len() {
            return Err(GraphError::StartOutOfRange {
                index: start.index(),
                count: self.vertices.len(),
            });
        }
        if end.index() >= self.vertices.len() {
            return Err(GraphError::EndOutOfRange {
                index: end.index(),
                count: self.vertices.len(),
            });
        }
        for list in &mut self.edges {
            list.sort_by_key(|(direction, _)| direction.symbol());
        }
        Ok(Graph {
            vertices: self.vertices,
            edges: self.edges,
            start,
            end,
        })
    }
}

/// Immutable labyrinth: vertex table, direction-keyed adjacency, and fixed
/// start and end vertices.
#[derive(Debug, Clone)]
pub struct Graph {
    vertices: Vec<Vertex>,
    edges: Vec<EdgeList>,
    start: VertexId,
    end: VertexId,
}

impl Graph {
    #[must_use]
    pub fn builder() -> GraphBuilder {
        GraphBuilder::default()
    }

    /// Number of vertices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Entry vertex.
    #[must_use]
    pub const fn start(&self) -> VertexId {
        self.start
    }

    /// Exit vertex.
    #[must_use]
    pub const fn end(&self) -> VertexId {
        self.end
    }

    /// Vertex data for `id`.
    ///
    /// # Panics
    /// Panics when `id` is out of range; ids are only minted by this graph's
    /// builder.
    #[must_use]
    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id.index()]
    }

    /// Label shorthand for `id`.
    #[must_use]
    pub fn label(&self, id: VertexId) -> char {
        self.vertices[id.index()].label
    }

    /// The vertex reached from `from` via `direction`, if that edge exists.
    #[must_use]
    pub fn neighbor(&self, from: VertexId, direction: Direction) -> Option<VertexId> {
        self.edges[from.index()]
            .iter()
            .find(|(existing, _)| *existing == direction)
            .map(|(_, to)| *to)
    }

    /// Outgoing edges of `from`, in ascending symbol order.
    #[must_use]
    pub fn exits(&self, from: VertexId) -> &[(Direction, VertexId)] {
        &self.edges[from.index()]
    }

    /// Attach a display token to a vertex; duplicates are ignored.
    pub fn add_style(&mut self, id: VertexId, token: StyleToken) {
        let styles = &mut self.vertices[id.index()].styles;
        if !styles.contains(&token) {
            styles.push(token);
        }
    }

    /// Detach one display token from a vertex.
    pub fn remove_style(&mut self, id: VertexId, token: &StyleToken) {
        self.vertices[id.index()].styles.retain(|t| t != token);
    }

    /// Drop every display token on a vertex.
    pub fn clear_styles(&mut self, id: VertexId) {
        self.vertices[id.index()].styles.clear();
    }
}
