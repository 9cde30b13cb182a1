//! Output id allocation
//!
//! Output ids are reused from the input where possible. An id that is
//! missing, empty, reserved by the scaffold or already taken is replaced by
//! a fresh UUID. When a vertex is renamed this way, edges that referenced
//! its original id are pointed at the new one.

use std::collections::{HashMap, HashSet};

use tracing::warn;
use uuid::Uuid;

/// Id of the scaffold root cell
pub const ROOT_ID: &str = "0";

/// Id of the default layer every translated cell is parented to
pub const LAYER_ID: &str = "1";

/// Generate a fresh opaque id
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// Hands out unique ids for one output tree
#[derive(Debug)]
pub struct IdAllocator {
    taken: HashSet<String>,
    known: HashSet<String>,
    vertex_ids: HashMap<String, String>,
}

impl IdAllocator {
    /// Create an allocator that already owns the scaffold ids
    ///
    /// `known` are all ids present in the input; generated ids avoid them so
    /// that a later element can still keep its own id.
    pub fn new<'a>(known: impl IntoIterator<Item = &'a str>) -> Self {
        let mut allocator = Self {
            taken: HashSet::new(),
            known: known.into_iter().map(str::to_string).collect(),
            vertex_ids: HashMap::new(),
        };
        allocator.reserve(ROOT_ID);
        allocator.reserve(LAYER_ID);
        allocator
    }

    /// Mark an id as used without handing it out
    pub fn reserve(&mut self, id: &str) {
        self.taken.insert(id.to_string());
    }

    pub fn is_taken(&self, id: &str) -> bool {
        self.taken.contains(id)
    }

    /// Claim the preferred id, or a fresh one if it is unusable
    pub fn claim(&mut self, preferred: Option<&str>) -> String {
        if let Some(id) = preferred.filter(|id| !id.is_empty()) {
            if self.taken.insert(id.to_string()) {
                return id.to_string();
            }
        }
        self.fresh()
    }

    /// Claim an id for a vertex, remembering renames for edge endpoints
    pub fn claim_vertex(&mut self, preferred: Option<&str>) -> String {
        let id = self.claim(preferred);
        if let Some(original) = preferred.filter(|p| !p.is_empty()) {
            if original != id {
                warn!(original, replacement = %id, "Vertex id already in use, assigned a new id");
            }
            // First vertex with a given original id owns the edge references
            self.vertex_ids
                .entry(original.to_string())
                .or_insert_with(|| id.clone());
        }
        id
    }

    /// Output id an edge endpoint should point at
    pub fn resolve_endpoint<'a>(&'a self, endpoint: &'a str) -> &'a str {
        self.vertex_ids
            .get(endpoint)
            .map(String::as_str)
            .unwrap_or(endpoint)
    }

    fn fresh(&mut self) -> String {
        loop {
            let id = generate_id();
            if !self.known.contains(&id) && self.taken.insert(id.clone()) {
                return id;
            }
        }
    }
}
