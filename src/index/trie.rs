//! Prefix index over normalized city names.
//!
//! The trie is an arena: every node lives in one `Vec` and children are
//! referenced by [`NodeId`]. Nodes are only ever appended, so the tree is
//! acyclic by construction and is freed in one go with the arena.
//!
//! ```text
//!   insert("paris", fr) insert("paris", us) insert("parma", it)
//!
//!   [root] ─p─► [1] ─a─► [2] ─r─► [3] ─i─► [4] ─s─► [5]* {fr: .., us: ..}
//!                                    └─m─► [6] ─a─► [7]* {it: ..}
//!
//!   * terminal node: the only kind that holds population data
//! ```
//!
//! Lookup walks one edge per character of the city name, then reads the
//! country code from the terminal node's map. Both `insert` and `search`
//! are O(length of city name) and independent of how many cities are loaded.

use rustc_hash::FxHashMap;

use crate::index::CityIndex;
use crate::key::{CityKey, fold};

/// Index of a node in the trie arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

const ROOT: NodeId = NodeId(0);

#[derive(Debug, Default)]
struct TrieNode {
    /// Outgoing edges sorted by character.
    children: Vec<(char, NodeId)>,
    /// `Some` exactly when a complete city name ends here; maps country
    /// code to population.
    populations: Option<FxHashMap<String, String>>,
}

impl TrieNode {
    fn child(&self, c: char) -> Option<NodeId> {
        self.children
            .binary_search_by_key(&c, |&(edge, _)| edge)
            .ok()
            .map(|pos| self.children[pos].1)
    }
}

/// Character trie mapping city names to per-country populations.
#[derive(Debug)]
pub struct CityTrie {
    nodes: Vec<TrieNode>,
    records: usize,
}

impl CityTrie {
    /// Creates an empty trie holding only the root node.
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::default()],
            records: 0,
        }
    }

    /// Inserts `population` for `key`, returning the value it replaced.
    ///
    /// ```
    /// use citycache::index::CityTrie;
    /// use citycache::key::normalize;
    ///
    /// let mut trie = CityTrie::new();
    /// assert_eq!(trie.insert_record(normalize("Tokyo", "JP"), "37400000".into()), None);
    /// assert_eq!(
    ///     trie.insert_record(normalize("tokyo", "jp"), "37500000".into()),
    ///     Some("37400000".to_string())
    /// );
    /// ```
    pub fn insert_record(&mut self, key: CityKey, population: String) -> Option<String> {
        let (city, country) = key.into_parts();
        let mut current = ROOT;
        for c in city.chars() {
            current = self.child_or_insert(current, c);
        }

        let previous = self.nodes[current.0]
            .populations
            .get_or_insert_with(FxHashMap::default)
            .insert(country, population);
        if previous.is_none() {
            self.records += 1;
        }
        previous
    }

    /// Returns the population for `key`.
    ///
    /// Fails as soon as an edge is missing, or when the final node is not a
    /// complete name, or when the country is not recorded there.
    pub fn get(&self, key: &CityKey) -> Option<&str> {
        let node = self.walk(key.city_name())?;
        self.nodes[node.0]
            .populations
            .as_ref()?
            .get(key.country_code())
            .map(String::as_str)
    }

    /// Country codes recorded for a complete city name, sorted.
    pub fn countries(&self, city_name: &str) -> Vec<&str> {
        let Some(node) = self.walk(&fold(city_name)) else {
            return Vec::new();
        };
        let mut codes: Vec<&str> = self.nodes[node.0]
            .populations
            .iter()
            .flat_map(|map| map.keys().map(String::as_str))
            .collect();
        codes.sort_unstable();
        codes
    }

    /// Up to `limit` complete city names under `prefix`, in lexicographic
    /// order. The prefix is case-folded like any key.
    ///
    /// ```
    /// use citycache::index::CityTrie;
    /// use citycache::key::normalize;
    ///
    /// let mut trie = CityTrie::new();
    /// for city in ["Parma", "Paris", "Perth", "Par"] {
    ///     trie.insert_record(normalize(city, "xx"), "1".into());
    /// }
    /// assert_eq!(trie.complete("PAR", 10), vec!["par", "paris", "parma"]);
    /// assert_eq!(trie.complete("par", 1), vec!["par"]);
    /// ```
    pub fn complete(&self, prefix: &str, limit: usize) -> Vec<String> {
        let prefix = fold(prefix);
        let mut out = Vec::new();
        let Some(start) = self.walk(&prefix) else {
            return out;
        };

        let mut stack = vec![(start, prefix)];
        while let Some((id, name)) = stack.pop() {
            if out.len() >= limit {
                break;
            }
            let node = &self.nodes[id.0];
            // Children pushed in reverse so the smallest edge pops first.
            for &(c, child) in node.children.iter().rev() {
                let mut next = name.clone();
                next.push(c);
                stack.push((child, next));
            }
            if node.populations.is_some() {
                out.push(name);
            }
        }
        out
    }

    /// Number of nodes in the arena, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn walk(&self, city_name: &str) -> Option<NodeId> {
        city_name
            .chars()
            .try_fold(ROOT, |id, c| self.nodes[id.0].child(c))
    }

    fn child_or_insert(&mut self, parent: NodeId, c: char) -> NodeId {
        match self.nodes[parent.0]
            .children
            .binary_search_by_key(&c, |&(edge, _)| edge)
        {
            Ok(pos) => self.nodes[parent.0].children[pos].1,
            Err(pos) => {
                let id = NodeId(self.nodes.len());
                self.nodes.push(TrieNode::default());
                self.nodes[parent.0].children.insert(pos, (c, id));
                id
            },
        }
    }
}

impl Default for CityTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl CityIndex for CityTrie {
    fn insert(&mut self, key: CityKey, population: String) {
        self.insert_record(key, population);
    }

    fn search(&self, key: &CityKey) -> Option<&str> {
        self.get(key)
    }

    fn len(&self) -> usize {
        self.records
    }

    fn known_countries(&self, city_name: &str) -> Vec<String> {
        self.countries(city_name).into_iter().map(str::to_owned).collect()
    }

    fn suggest(&self, prefix: &str, limit: usize) -> Vec<String> {
        self.complete(prefix, limit)
    }
}
