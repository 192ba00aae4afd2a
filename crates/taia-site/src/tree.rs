//! Page tree built from parent references.
//!
//! Entries are stored in a flat `Vec<Entry>` with parent/children
//! relationships tracked by indices, as in a site state table:
//! - O(1) title lookups via `title_index`
//! - O(d) ancestor chains where d is the entry depth
//!
//! The tree is built once per run and never mutated afterwards.

use std::collections::HashMap;

use taia_store::{Entry, RecordStore};

use crate::warning::Warning;

/// Error returned when parent references do not form a forest.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// Following parent references from some entry never reaches a master page.
    #[error("Cyclic hierarchy: \"{title}\" is its own ancestor")]
    CyclicHierarchy {
        /// An entry on the cycle.
        title: String,
    },
}

/// Hierarchy of tree (non-feed) entries.
#[derive(Debug)]
pub struct PageTree {
    entries: Vec<Entry>,
    parents: Vec<Option<usize>>,
    children: Vec<Vec<usize>>,
    roots: Vec<usize>,
    depths: Vec<usize>,
    title_index: HashMap<String, usize>,
    warnings: Vec<Warning>,
}

impl PageTree {
    /// Build the tree from the store's tree entries.
    ///
    /// Entries whose parent does not exist become master pages and are
    /// reported through [`warnings`](Self::warnings). Children and masters
    /// are ordered by title.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::CyclicHierarchy`] if any entry is its own ancestor.
    pub fn build(store: &RecordStore) -> Result<Self, TreeError> {
        let entries: Vec<Entry> = store.tree_entries().cloned().collect();
        let title_index: HashMap<String, usize> = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (entry.title.clone(), i))
            .collect();

        let mut warnings = Vec::new();
        let parents: Vec<Option<usize>> = entries
            .iter()
            .map(|entry| {
                let parent = entry.parent.as_deref()?;
                let idx = title_index.get(parent).copied();
                if idx.is_none() {
                    tracing::warn!(title = %entry.title, parent, "Unknown parent, treating as master page");
                    warnings.push(Warning::DanglingParent {
                        title: entry.title.clone(),
                        parent: parent.to_owned(),
                    });
                }
                idx
            })
            .collect();

        let depths = compute_depths(&entries, &parents)?;

        let mut children = vec![Vec::new(); entries.len()];
        let mut roots = Vec::new();
        for (idx, parent) in parents.iter().enumerate() {
            match parent {
                Some(p) => children[*p].push(idx),
                None => roots.push(idx),
            }
        }
        let by_title = |a: &usize, b: &usize| entries[*a].title.cmp(&entries[*b].title);
        roots.sort_by(by_title);
        for list in &mut children {
            list.sort_by(by_title);
        }

        tracing::debug!(
            entries = entries.len(),
            masters = roots.len(),
            "Built page tree"
        );

        Ok(Self {
            entries,
            parents,
            children,
            roots,
            depths,
            title_index,
            warnings,
        })
    }

    /// Look up an entry by title.
    #[must_use]
    pub fn get(&self, title: &str) -> Option<&Entry> {
        self.title_index.get(title).map(|&i| &self.entries[i])
    }

    /// True if `title` is a page in the tree.
    #[must_use]
    pub fn contains(&self, title: &str) -> bool {
        self.title_index.contains_key(title)
    }

    /// Entries in source order.
    #[must_use]
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Number of pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the tree has no pages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Direct children of `title`, ordered by title. Empty for unknown titles.
    #[must_use]
    pub fn children_of(&self, title: &str) -> Vec<&str> {
        self.title_index
            .get(title)
            .map(|&i| self.titles(&self.children[i]))
            .unwrap_or_default()
    }

    /// Ancestors of `title` from its immediate parent up to its master page.
    ///
    /// Empty for master pages and unknown titles.
    #[must_use]
    pub fn ancestor_chain(&self, title: &str) -> Vec<&str> {
        let mut chain = Vec::new();
        let Some(&idx) = self.title_index.get(title) else {
            return chain;
        };
        let mut current = self.parents[idx];
        while let Some(i) = current {
            chain.push(self.entries[i].title.as_str());
            current = self.parents[i];
        }
        chain
    }

    /// True if `title` is a page without a (resolvable) parent.
    #[must_use]
    pub fn is_master(&self, title: &str) -> bool {
        self.title_index
            .get(title)
            .is_some_and(|&i| self.parents[i].is_none())
    }

    /// Master pages ordered by title.
    #[must_use]
    pub fn root_titles(&self) -> Vec<&str> {
        self.titles(&self.roots)
    }

    /// Number of ancestors of `title`.
    #[must_use]
    pub fn depth(&self, title: &str) -> Option<usize> {
        self.title_index.get(title).map(|&i| self.depths[i])
    }

    /// Conditions found while building.
    #[must_use]
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    fn titles(&self, indices: &[usize]) -> Vec<&str> {
        indices
            .iter()
            .map(|&i| self.entries[i].title.as_str())
            .collect()
    }
}

/// Compute the depth of every entry, failing on cycles.
///
/// Each walk follows parent pointers with an explicit path stack until it
/// reaches a master page or an entry whose depth is already known. Meeting
/// an entry already on the current path means a cycle. Every entry joins a
/// path once, so the walk is linear in the number of entries.
fn compute_depths(entries: &[Entry], parents: &[Option<usize>]) -> Result<Vec<usize>, TreeError> {
    let mut depths: Vec<Option<usize>> = vec![None; entries.len()];
    let mut on_path = vec![false; entries.len()];
    let mut path = Vec::new();

    for start in 0..entries.len() {
        let mut cursor = Some(start);
        let mut known = None;

        while let Some(idx) = cursor {
            if let Some(depth) = depths[idx] {
                known = Some(depth);
                break;
            }
            if on_path[idx] {
                return Err(TreeError::CyclicHierarchy {
                    title: entries[idx].title.clone(),
                });
            }
            on_path[idx] = true;
            path.push(idx);
            cursor = parents[idx];
        }

        let mut depth = known.map_or(0, |d| d + 1);
        while let Some(idx) = path.pop() {
            depths[idx] = Some(depth);
            on_path[idx] = false;
            depth += 1;
        }
    }

    Ok(depths.into_iter().map(Option::unwrap_or_default).collect())
}
