//! Persistence layer for frame stores

use crate::error::StoreError;
use crate::store::TripleStore;
use crate::types::{Knowledge, Pattern, Proposition};
use bincode;
use sled;

/// Sled-based implementation of TripleStore
///
/// Every frame gets its own tree inside a shared database. The tree name is
/// derived from the frame URI: `frame:{blake3(uri) as hex}`. Keys are the
/// bincode encoding of a proposition; values are empty.
pub struct SledStore {
    db: sled::Db,
    tree: sled::Tree,
    tree_name: String,
}

impl SledStore {
    /// Open (or create) the tree owned by `frame_uri`.
    pub fn open(db: &sled::Db, frame_uri: &str) -> Result<Self, StoreError> {
        let tree_name = Self::tree_name(frame_uri);
        let tree = db.open_tree(tree_name.as_bytes())?;
        Ok(Self {
            db: db.clone(),
            tree,
            tree_name,
        })
    }

    /// Open the tree owned by `frame_uri`, discarding anything left in it.
    ///
    /// The database outlives managers, so a URI issued again by a later
    /// process may find a tree from an earlier run. Returns the store and
    /// the number of stale statements dropped.
    pub fn create(db: &sled::Db, frame_uri: &str) -> Result<(Self, usize), StoreError> {
        let store = Self::open(db, frame_uri)?;
        let stale = store.tree.len();
        if stale > 0 {
            store.tree.clear()?;
        }
        Ok((store, stale))
    }

    /// Tree name used for a frame URI
    pub fn tree_name(frame_uri: &str) -> String {
        format!(
            "frame:{}",
            hex::encode(blake3::hash(frame_uri.as_bytes()).as_bytes())
        )
    }

    /// Flush pending writes to disk.
    pub fn flush(&self) -> Result<(), StoreError> {
        self.tree.flush()?;
        Ok(())
    }

    fn decode(key: &[u8]) -> Result<Proposition, StoreError> {
        Ok(bincode::deserialize(key)?)
    }

    fn encode(proposition: &Proposition) -> Result<Vec<u8>, StoreError> {
        Ok(bincode::serialize(proposition)?)
    }

    /// Keys and propositions matching `pattern`.
    ///
    /// The subject is the first encoded field, so a bound subject narrows
    /// the scan to its key prefix.
    fn scan(&self, pattern: &Pattern) -> Result<Vec<(sled::IVec, Proposition)>, StoreError> {
        let entries = match &pattern.subject {
            Some(subject) => self.tree.scan_prefix(bincode::serialize(subject)?),
            None => self.tree.iter(),
        };
        let mut matches = Vec::new();
        for key in entries.keys() {
            let key = key?;
            let proposition = Self::decode(&key)?;
            if pattern.matches(&proposition) {
                matches.push((key, proposition));
            }
        }
        Ok(matches)
    }
}

impl TripleStore for SledStore {
    fn size(&self) -> Result<usize, StoreError> {
        Ok(self.tree.len())
    }

    fn query(&self, pattern: &Pattern) -> Result<Vec<Proposition>, StoreError> {
        Ok(self
            .scan(pattern)?
            .into_iter()
            .map(|(_, proposition)| proposition)
            .collect())
    }

    fn insert(&mut self, statements: &Knowledge) -> Result<(), StoreError> {
        let mut batch = sled::Batch::default();
        for proposition in statements {
            batch.insert(Self::encode(proposition)?, Vec::<u8>::new());
        }
        self.tree.apply_batch(batch)?;
        Ok(())
    }

    fn remove(&mut self, pattern: &Pattern) -> Result<(), StoreError> {
        let mut batch = sled::Batch::default();
        for (key, _) in self.scan(pattern)? {
            batch.remove(key);
        }
        self.tree.apply_batch(batch)?;
        Ok(())
    }

    fn difference(&mut self, other: &Knowledge) -> Result<(), StoreError> {
        let mut batch = sled::Batch::default();
        for proposition in other {
            batch.remove(Self::encode(proposition)?);
        }
        self.tree.apply_batch(batch)?;
        Ok(())
    }

    fn release(&mut self) -> Result<(), StoreError> {
        self.db.drop_tree(self.tree_name.as_bytes())?;
        Ok(())
    }
}
