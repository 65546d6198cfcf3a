//! Path enumeration and word-decomposition checks over a labyrinth.
//!
//! A path is valid when it walks from start to end without revisiting a
//! vertex and its concatenated labels split completely into dictionary
//! words. The full valid set is enumerated once per session and cached in a
//! [`PathAtlas`]; per-move viability checks then run against the cache.

use std::collections::HashSet;
use thiserror::Error;

use crate::dictionary::Dictionary;
use crate::graph::{Graph, VertexId};

/// The labyrinth admits no valid start-to-end path. This breaks the
/// generator contract and the session refuses to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("labyrinth has no valid start-to-end path")]
pub struct EmptyPathSetError;

/// A simple start-to-end walk through the labyrinth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    vertices: Vec<VertexId>,
}

impl Path {
    /// Vertex sequence, start first.
    #[must_use]
    pub fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    /// Number of moves needed to walk the path.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }

    /// Concatenated labels along the path.
    #[must_use]
    pub fn labels(&self, graph: &Graph) -> String {
        self.vertices.iter().map(|&id| graph.label(id)).collect()
    }

    #[must_use]
    pub fn contains(&self, id: VertexId) -> bool {
        self.vertices.contains(&id)
    }
}

/// A distinct hint path plus its highlight grouping key.
///
/// Group keys are first-seen ordinals starting at zero; they order and
/// distinguish highlights and carry no other meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HintPath {
    pub path: Path,
    pub group: usize,
}

/// True when `labels` splits completely into dictionary words.
///
/// Reachability over cut positions: position 0 is reachable, and position
/// `i` is reachable when some reachable `j < i` has `labels[j..i]` in the
/// dictionary. The string qualifies when its final position is reachable.
#[must_use]
pub fn decomposes_into_words(labels: &str, dictionary: &Dictionary) -> bool {
    let chars: Vec<char> = labels.chars().collect();
    let total = chars.len();
    let mut reachable = vec![false; total + 1];
    reachable[0] = true;
    for end in 1..=total {
        for cut in 0..end {
            if !reachable[cut] {
                continue;
            }
            let piece: String = chars[cut..end].iter().collect();
            if dictionary.contains_word(&piece) {
                reachable[end] = true;
                break;
            }
        }
    }
    reachable[total]
}

/// Enumerate every valid path in deterministic order: depth-first from the
/// start vertex, neighbors explored by ascending direction symbol.
#[must_use]
pub fn enumerate_valid_paths(graph: &Graph, dictionary: &Dictionary) -> Vec<Path> {
    let mut found = Vec::new();
    if graph.is_empty() {
        return found;
    }
    let mut trail = vec![graph.start()];
    let mut on_trail = vec![false; graph.len()];
    on_trail[graph.start().index()] = true;
    extend(
        graph,
        dictionary,
        graph.start(),
        &mut trail,
        &mut on_trail,
        &mut found,
    );
    found
}

fn extend(
    graph: &Graph,
    dictionary: &Dictionary,
    here: VertexId,
    trail: &mut Vec<VertexId>,
    on_trail: &mut [bool],
    found: &mut Vec<Path>,
) {
    if here == graph.end() {
        let candidate = Path {
            vertices: trail.clone(),
        };
        if decomposes_into_words(&candidate.labels(graph), dictionary) {
            found.push(candidate);
        }
        return;
    }
    for &(_, next) in graph.exits(here) {
        if on_trail[next.index()] {
            continue;
        }
        trail.push(next);
        on_trail[next.index()] = true;
        extend(graph, dictionary, next, trail, on_trail, found);
        trail.pop();
        on_trail[next.index()] = false;
    }
}

/// Minimum edge count among `paths`.
///
/// # Errors
/// `EmptyPathSetError` when `paths` is empty.
pub fn shortest_edge_count(paths: &[Path]) -> Result<usize, EmptyPathSetError> {
    paths.iter().map(Path::edge_count).min().ok_or(EmptyPathSetError)
}

/// One representative per distinct vertex sequence, in first-seen order,
/// each tagged with an increasing group key.
#[must_use]
pub fn dedupe_paths(paths: &[Path]) -> Vec<HintPath> {
    let mut seen: HashSet<&[VertexId]> = HashSet::new();
    let mut distinct = Vec::new();
    for path in paths {
        if seen.insert(path.vertices()) {
            distinct.push(HintPath {
                path: path.clone(),
                group: distinct.len(),
            });
        }
    }
    distinct
}

/// Precomputed path data for one graph and dictionary pairing.
///
/// A pure function of its inputs; it holds no play state and is safe to
/// query from anywhere in the session.
#[derive(Debug, Clone)]
pub struct PathAtlas {
    paths: Vec<Path>,
    distinct: Vec<HintPath>,
    shortest_edges: usize,
    on_valid_path: Vec<bool>,
}

impl PathAtlas {
    /// Enumerate and index every valid path.
    ///
    /// # Errors
    /// `EmptyPathSetError` when the labyrinth admits no valid path.
    pub fn build(graph: &Graph, dictionary: &Dictionary) -> Result<Self, EmptyPathSetError> {
        let paths = enumerate_valid_paths(graph, dictionary);
        let shortest_edges = shortest_edge_count(&paths)?;
        let distinct = dedupe_paths(&paths);
        let mut on_valid_path = vec![false; graph.len()];
        for path in &paths {
            for &id in path.vertices() {
                on_valid_path[id.index()] = true;
            }
        }
        Ok(Self {
            paths,
            distinct,
            shortest_edges,
            on_valid_path,
        })
    }

    /// Every valid path, in enumeration order.
    #[must_use]
    pub fn valid_paths(&self) -> &[Path] {
        &self.paths
    }

    /// Distinct hint paths with their highlight groups.
    #[must_use]
    pub fn distinct_paths(&self) -> &[HintPath] {
        &self.distinct
    }

    /// Edge count of the shortest valid path.
    #[must_use]
    pub const fn shortest_edges(&self) -> usize {
        self.shortest_edges
    }

    /// Whether `id` lies on at least one valid path.
    #[must_use]
    pub fn on_valid_path(&self, id: VertexId) -> bool {
        self.on_valid_path.get(id.index()).copied().unwrap_or(false)
    }

    /// Whether play can still reach the exit: the collected buffer must be
    /// extendable to a dictionary word and the current vertex must lie on a
    /// valid path.
    #[must_use]
    pub fn end_is_reachable(&self, dictionary: &Dictionary, at: VertexId, collected: &str) -> bool {
        self.prefix_exists(dictionary, collected) && self.on_valid_path(at)
    }

    /// Fallback diagnostic when reachability fails: can the buffer still
    /// grow into a dictionary word? Separates dead ends (yes) from broken
    /// prefixes (no).
    #[must_use]
    pub fn prefix_exists(&self, dictionary: &Dictionary, collected: &str) -> bool {
        dictionary.has_prefix(collected)
    }
}
