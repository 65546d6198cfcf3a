//! Embedded board catalog and word lists.
//!
//! Boards are hand-authored JSON layouts compiled into the binary, a few
//! variants per difficulty. Every board is guaranteed playable against its
//! difficulty's word list; the catalog test below holds that line.

use anyhow::{Context, Result, bail};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;

use wordmaze_game::{
    Difficulty, Direction, Graph, GraphBuilder, GraphError, VertexId, WordListSource,
};

/// One cell of a board file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VertexSpec {
    pub label: char,
}

const fn default_two_way() -> bool {
    true
}

/// One passage of a board file. Passages run both ways unless marked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeSpec {
    pub from: usize,
    pub direction: Direction,
    pub to: usize,
    #[serde(default = "default_two_way")]
    pub two_way: bool,
}

/// A hand-authored labyrinth layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardSpec {
    pub name: String,
    pub difficulty: Difficulty,
    pub vertices: Vec<VertexSpec>,
    pub start: usize,
    pub end: usize,
    pub edges: Vec<EdgeSpec>,
}

impl BoardSpec {
    /// Assemble the playable graph.
    ///
    /// # Errors
    /// Propagates builder errors for malformed layouts: unknown vertex
    /// indices, duplicate directions, bad endpoints.
    pub fn to_graph(&self) -> Result<Graph, GraphError> {
        let mut builder = GraphBuilder::default();
        for vertex in &self.vertices {
            builder.add_vertex(vertex.label);
        }
        for edge in &self.edges {
            let from = VertexId(edge.from);
            let to = VertexId(edge.to);
            if edge.two_way {
                builder.connect_both(from, edge.direction, to)?;
            } else {
                builder.connect(from, edge.direction, to)?;
            }
        }
        builder.build(VertexId(self.start), VertexId(self.end))
    }
}

static CATALOG: OnceLock<Vec<BoardSpec>> = OnceLock::new();

/// Embedded boards, parsed once.
pub fn catalog() -> &'static [BoardSpec] {
    CATALOG.get_or_init(|| {
        let raw: [&str; 5] = [
            include_str!("../assets/boards/paws.json"),
            include_str!("../assets/boards/dawn.json"),
            include_str!("../assets/boards/kennel.json"),
            include_str!("../assets/boards/meadow.json"),
            include_str!("../assets/boards/cellar.json"),
        ];
        raw.iter()
            .map(|json| serde_json::from_str(json).expect("embedded board is valid"))
            .collect()
    })
}

/// Pick a board: by explicit name anywhere in the catalog, otherwise a
/// seeded choice among the variants at the requested difficulty.
///
/// # Errors
/// Fails on an unknown name or a difficulty with no variants.
pub fn pick_board(
    difficulty: Difficulty,
    seed: u64,
    name: Option<&str>,
) -> Result<&'static BoardSpec> {
    if let Some(name) = name {
        return catalog()
            .iter()
            .find(|board| board.name == name)
            .with_context(|| format!("unknown board '{name}'"));
    }
    let variants: Vec<&'static BoardSpec> = catalog()
        .iter()
        .filter(|board| board.difficulty == difficulty)
        .collect();
    if variants.is_empty() {
        bail!("no embedded boards at difficulty {difficulty}");
    }
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    Ok(variants[rng.gen_range(0..variants.len())])
}

/// Built-in word list for a difficulty.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedWords {
    difficulty: Difficulty,
}

impl EmbeddedWords {
    #[must_use]
    pub const fn new(difficulty: Difficulty) -> Self {
        Self { difficulty }
    }

    const fn raw(self) -> &'static str {
        match self.difficulty {
            Difficulty::Easy => include_str!("../assets/words/easy.txt"),
            Difficulty::Medium => include_str!("../assets/words/medium.txt"),
            Difficulty::Hard => include_str!("../assets/words/hard.txt"),
        }
    }
}

impl WordListSource for EmbeddedWords {
    type Error = Infallible;

    fn load_words(&self) -> Result<Vec<String>, Self::Error> {
        Ok(parse_word_list(self.raw()))
    }
}

/// Word list read from a user-supplied file, one word per line.
#[derive(Debug, Clone)]
pub struct WordFile {
    path: PathBuf,
}

impl WordFile {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl WordListSource for WordFile {
    type Error = std::io::Error;

    fn load_words(&self) -> Result<Vec<String>, Self::Error> {
        Ok(parse_word_list(&fs::read_to_string(&self.path)?))
    }
}

/// Lines to words: trimmed, blanks and `#` comments dropped.
fn parse_word_list(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
