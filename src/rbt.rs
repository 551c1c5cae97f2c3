use std::{
    borrow::Borrow,
    cmp::Ordering,
    mem,
    ops::{Bound, RangeBounds},
};

use rand::Rng;

use crate::depth::Depth;
use crate::error::RbtError;

/// Index of a node within the arena.
type NodeId = usize;

/// Reserved index standing in for "no child" / "no parent". The nil
/// slot is never allocated and never dereferenced; its color reads
/// black through [Rbt::is_red] and [Rbt::is_black], and coloring it
/// is a no-op.
const NIL: NodeId = usize::MAX;

/// Rbt manage a single instance of in-memory index using a
/// [red-black][rbt] tree. Keys are kept as a multiset: equal keys
/// are routed to the right subtree and retained as distinct entries.
///
/// Nodes live in a flat arena and link to each other by index, so
/// parent back-references co-exist with child links without any
/// ownership cycle.
///
/// [rbt]: https://en.wikipedia.org/wiki/Red-black_tree
pub struct Rbt<K>
where
    K: Clone + Ord,
{
    name: String,
    nodes: Vec<Node<K>>,
    free: Vec<NodeId>, // recycled arena slots.
    root: NodeId,
    n_count: usize, // number of entries in the tree.
    hook: Option<EventHook<K>>,
}

// hook is deliberately not cloned, observation is per-instance.
impl<K> Clone for Rbt<K>
where
    K: Clone + Ord,
{
    fn clone(&self) -> Rbt<K> {
        Rbt {
            name: self.name.clone(),
            nodes: self.nodes.clone(),
            free: self.free.clone(),
            root: self.root,
            n_count: self.n_count,
            hook: None,
        }
    }
}

/// Different ways to construct a new Rbt instance.
impl<K> Rbt<K>
where
    K: Clone + Ord,
{
    /// Create an empty instance of Rbt, identified by `name`.
    /// Applications can choose unique names.
    pub fn new<S>(name: S) -> Rbt<K>
    where
        S: AsRef<str>,
    {
        Rbt {
            name: name.as_ref().to_string(),
            nodes: Default::default(),
            free: Default::default(),
            root: NIL,
            n_count: Default::default(),
            hook: None,
        }
    }

    /// Create a new instance of Rbt tree and load it with keys
    /// from `iter`. Keys need not be unique, each one becomes a
    /// distinct entry.
    pub fn load_from<S, I>(name: S, iter: I) -> Rbt<K>
    where
        S: AsRef<str>,
        I: Iterator<Item = K>,
    {
        let mut tree = Rbt::new(name);
        for key in iter {
            tree.insert(key);
        }
        tree
    }
}

/// Maintenance API.
impl<K> Rbt<K>
where
    K: Clone + Ord,
{
    /// Identify this instance. Applications can choose unique names while
    /// creating Rbt instances.
    #[inline]
    pub fn id(&self) -> String {
        self.name.clone()
    }

    /// Return number of entries in this instance.
    #[inline]
    pub fn len(&self) -> usize {
        self.n_count
    }

    /// Check whether this index is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n_count == 0
    }

    /// Return quickly with basic statisics, only entries() method is valid
    /// with this statisics.
    pub fn stats(&self) -> Stats {
        Stats::new(self.n_count, mem::size_of::<Node<K>>())
    }

    /// Install an observation hook. After every committed insert or
    /// delete the hook receives an [Event] describing the operation.
    /// Without a hook the tree has no side effects beyond its return
    /// values.
    pub fn set_hook(&mut self, hook: Option<EventHook<K>>) {
        self.hook = hook;
    }

    /// Return the height of the tree, number of levels including the
    /// root. Empty tree has height 0.
    pub fn height(&self) -> usize {
        if self.root == NIL {
            return 0;
        }
        let mut height = 0;
        let mut stack: Vec<(NodeId, usize)> = vec![(self.root, 1)];
        while let Some((id, level)) = stack.pop() {
            if level > height {
                height = level;
            }
            let node = &self.nodes[id];
            if node.left != NIL {
                stack.push((node.left, level + 1));
            }
            if node.right != NIL {
                stack.push((node.right, level + 1));
            }
        }
        height
    }

    /// Validate the tree with the following rules:
    ///
    /// * Root must be black.
    /// * From root to any leaf, no consecutive reds allowed in its path.
    /// * Number of blacks should be same on every path from a node down
    ///   to its leaves.
    /// * Make sure keys are in sort order. Ties route right at insert
    ///   time, but rotations may carry an equal key into a left
    ///   subtree, so both subtree bounds admit equality.
    ///
    /// Additionally return full statistics on the tree. Refer to [`Stats`]
    /// for more information.
    pub fn validate(&self) -> Result<Stats, RbtError<K>> {
        if self.is_red(self.root) {
            return Err(RbtError::RedRoot);
        }

        let mut stats = Stats::new(self.n_count, mem::size_of::<Node<K>>());
        stats.set_depths(Depth::new());

        // (node, depth, blacks-so-far, parent-was-red, low, high)
        let mut blacks: Option<usize> = None;
        let mut stack: Vec<(NodeId, usize, usize, bool, Bound<K>, Bound<K>)> = vec![(
            self.root,
            0,
            0,
            false,
            Bound::Unbounded,
            Bound::Unbounded,
        )];
        while let Some((id, depth, mut nb, fromred, low, high)) = stack.pop() {
            if id == NIL {
                stats.sample_depth(depth);
                match blacks {
                    None => blacks = Some(nb),
                    Some(b) if b != nb => {
                        let msg = format!("expected: {} got: {}", b, nb);
                        return Err(RbtError::UnbalancedBlacks(msg));
                    }
                    Some(_) => (),
                }
                continue;
            }

            let node = &self.nodes[id];
            let red = !node.black;
            if fromred && red {
                return Err(RbtError::ConsecutiveReds);
            }
            if !red {
                nb += 1;
            }
            // left subtree keys <= node.key, right subtree keys >= node.key
            if let Bound::Included(l) = &low {
                if node.key.lt(l) {
                    return Err(RbtError::SortError(node.key.clone(), l.clone()));
                }
            }
            if let Bound::Included(h) = &high {
                if node.key.gt(h) {
                    return Err(RbtError::SortError(node.key.clone(), h.clone()));
                }
            }
            let key = node.key.clone();
            stack.push((
                node.left,
                depth + 1,
                nb,
                red,
                low,
                Bound::Included(key.clone()),
            ));
            stack.push((node.right, depth + 1, nb, red, Bound::Included(key), high));
        }
        stats.set_blacks(blacks.unwrap_or(0));
        Ok(stats)
    }
}

/// Write operations on Rbt instance.
impl<K> Rbt<K>
where
    K: Clone + Ord,
{
    /// Create a new entry for key. Equal keys are retained as distinct
    /// entries, they are routed to the right subtree of each other.
    pub fn insert(&mut self, key: K) {
        let z = self.alloc(key);

        let mut y = NIL;
        let mut x = self.root;
        while x != NIL {
            y = x;
            x = if self.nodes[z].key.lt(&self.nodes[x].key) {
                self.nodes[x].left
            } else {
                self.nodes[x].right
            };
        }
        self.nodes[z].parent = y;
        if y == NIL {
            self.root = z; // tree was empty
        } else if self.nodes[z].key.lt(&self.nodes[y].key) {
            self.nodes[y].left = z;
        } else {
            self.nodes[y].right = z;
        }

        self.insert_fixup(z);
        self.n_count += 1;

        if let Some(hook) = self.hook.as_mut() {
            hook(Event {
                kind: OpKind::Insert,
                key: self.nodes[z].key.clone(),
                entries: self.n_count,
            });
        }
    }

    /// Delete one entry matching key. When duplicates are present only
    /// one of them is removed per call, which one is implementation
    /// defined. If key is not present return [RbtError::KeyNotFound]
    /// without mutating the tree.
    pub fn delete<Q>(&mut self, key: &Q) -> Result<(), RbtError<K>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let z = self.find(key);
        if z == NIL {
            return Err(RbtError::KeyNotFound);
        }

        self.unlink(z);
        self.n_count -= 1;

        if let Some(hook) = self.hook.as_mut() {
            hook(Event {
                kind: OpKind::Delete,
                key: self.nodes[z].key.clone(),
                entries: self.n_count,
            });
        }
        self.free.push(z);
        Ok(())
    }
}

/// Read operations on Rbt instance.
impl<K> Rbt<K>
where
    K: Clone + Ord,
{
    /// Search for key, return a handle to one matching entry.
    pub fn search<Q>(&self, key: &Q) -> Option<NodeHandle>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.find(key) {
            NIL => None,
            id => Some(NodeHandle(id)),
        }
    }

    /// Check whether key has at least one entry in this index.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key) != NIL
    }

    /// Read the key under a handle. Handles are invalidated by any
    /// subsequent delete on this instance, the arena recycles slots.
    pub fn key(&self, handle: NodeHandle) -> &K {
        &self.nodes[handle.0].key
    }

    /// Handle to the smallest entry, None when the tree is empty.
    pub fn minimum(&self) -> Option<NodeHandle> {
        match self.root {
            NIL => None,
            root => Some(NodeHandle(self.min_from(root))),
        }
    }

    /// Handle to the largest entry, None when the tree is empty.
    pub fn maximum(&self) -> Option<NodeHandle> {
        match self.root {
            NIL => None,
            root => Some(NodeHandle(self.max_from(root))),
        }
    }

    /// Next entry in sort order after `handle`, None when `handle`
    /// is the maximum.
    pub fn successor(&self, handle: NodeHandle) -> Option<NodeHandle> {
        match self.succ_of(handle.0) {
            NIL => None,
            id => Some(NodeHandle(id)),
        }
    }

    /// Previous entry in sort order before `handle`, None when `handle`
    /// is the minimum.
    pub fn predecessor(&self, handle: NodeHandle) -> Option<NodeHandle> {
        match self.pred_of(handle.0) {
            NIL => None,
            id => Some(NodeHandle(id)),
        }
    }

    /// Return a random entry from this index.
    pub fn random<R: Rng>(&self, rng: &mut R) -> Option<&K> {
        if self.root == NIL {
            return None;
        }

        let mut id = self.root;
        let mut at_depth = rng.gen::<u8>() % 40;
        loop {
            let node = &self.nodes[id];
            let next = match rng.gen::<u8>() % 2 {
                0 => node.left,
                1 => node.right,
                _ => unreachable!(),
            };
            if at_depth == 0 || next == NIL {
                break Some(&node.key);
            }
            at_depth -= 1;
            id = next;
        }
    }

    /// Return an iterator over all entries in this instance, in
    /// ascending sort order, duplicates included.
    pub fn iter(&self) -> Iter<K> {
        let next = match self.root {
            NIL => NIL,
            root => self.min_from(root),
        };
        Iter { tree: self, next }
    }

    /// Range over all entries from low to high, in ascending sort order.
    pub fn range<Q, R>(&self, range: R) -> Range<K>
    where
        K: Borrow<Q>,
        R: RangeBounds<Q>,
        Q: Ord + ToOwned<Owned = K> + ?Sized,
    {
        let low: Bound<K> = match range.start_bound() {
            Bound::Included(key) => Bound::Included(key.to_owned()),
            Bound::Excluded(key) => Bound::Excluded(key.to_owned()),
            Bound::Unbounded => Bound::Unbounded,
        };
        let high: Bound<K> = match range.end_bound() {
            Bound::Included(key) => Bound::Included(key.to_owned()),
            Bound::Excluded(key) => Bound::Excluded(key.to_owned()),
            Bound::Unbounded => Bound::Unbounded,
        };

        Range {
            tree: self,
            low,
            high,
            cur: None,
        }
    }
}

impl<K> Rbt<K>
where
    K: Clone + Ord,
{
    fn alloc(&mut self, key: K) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.nodes[id] = Node::new(key);
                id
            }
            None => {
                self.nodes.push(Node::new(key));
                self.nodes.len() - 1
            }
        }
    }

    fn find<Q>(&self, key: &Q) -> NodeId
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut x = self.root;
        while x != NIL {
            x = match self.nodes[x].key.borrow().cmp(key) {
                Ordering::Less => self.nodes[x].right,
                Ordering::Greater => self.nodes[x].left,
                Ordering::Equal => return x,
            };
        }
        NIL
    }

    // leftmost node under `x`, x must not be NIL.
    fn min_from(&self, mut x: NodeId) -> NodeId {
        while self.nodes[x].left != NIL {
            x = self.nodes[x].left;
        }
        x
    }

    // rightmost node under `x`, x must not be NIL.
    fn max_from(&self, mut x: NodeId) -> NodeId {
        while self.nodes[x].right != NIL {
            x = self.nodes[x].right;
        }
        x
    }

    fn succ_of(&self, mut x: NodeId) -> NodeId {
        if self.nodes[x].right != NIL {
            return self.min_from(self.nodes[x].right);
        }
        let mut y = self.nodes[x].parent;
        while y != NIL && x == self.nodes[y].right {
            x = y;
            y = self.nodes[y].parent;
        }
        y
    }

    fn pred_of(&self, mut x: NodeId) -> NodeId {
        if self.nodes[x].left != NIL {
            return self.max_from(self.nodes[x].left);
        }
        let mut y = self.nodes[x].parent;
        while y != NIL && x == self.nodes[y].left {
            x = y;
            y = self.nodes[y].parent;
        }
        y
    }

    // leftmost node admitted by the lower bound, NIL when none.
    fn seek_low(&self, low: &Bound<K>) -> NodeId {
        let (key, inclusive) = match low {
            Bound::Unbounded => {
                return match self.root {
                    NIL => NIL,
                    root => self.min_from(root),
                };
            }
            Bound::Included(key) => (key, true),
            Bound::Excluded(key) => (key, false),
        };
        let (mut x, mut best) = (self.root, NIL);
        while x != NIL {
            let admit = if inclusive {
                self.nodes[x].key.ge(key)
            } else {
                self.nodes[x].key.gt(key)
            };
            x = if admit {
                best = x;
                self.nodes[x].left
            } else {
                self.nodes[x].right
            };
        }
        best
    }

    // rightmost node admitted by the upper bound, NIL when none.
    fn seek_high(&self, high: &Bound<K>) -> NodeId {
        let (key, inclusive) = match high {
            Bound::Unbounded => {
                return match self.root {
                    NIL => NIL,
                    root => self.max_from(root),
                };
            }
            Bound::Included(key) => (key, true),
            Bound::Excluded(key) => (key, false),
        };
        let (mut x, mut best) = (self.root, NIL);
        while x != NIL {
            let admit = if inclusive {
                self.nodes[x].key.le(key)
            } else {
                self.nodes[x].key.lt(key)
            };
            x = if admit {
                best = x;
                self.nodes[x].right
            } else {
                self.nodes[x].left
            };
        }
        best
    }

    #[inline]
    fn is_red(&self, id: NodeId) -> bool {
        id != NIL && !self.nodes[id].black
    }

    #[inline]
    fn is_black(&self, id: NodeId) -> bool {
        id == NIL || self.nodes[id].black
    }

    // no-op on NIL, the nil slot is black by definition.
    #[inline]
    fn set_black(&mut self, id: NodeId) {
        if id != NIL {
            self.nodes[id].black = true;
        }
    }

    #[inline]
    fn set_red(&mut self, id: NodeId) {
        self.nodes[id].black = false;
    }
}

/// Rotation and fixup routines. Rotations are pure structural
/// exchanges, they never touch colors. Fixups restore the red-black
/// rules after insert and delete have broken them locally.
impl<K> Rbt<K>
where
    K: Clone + Ord,
{
    //        x                       y
    //       / \                     / \
    //      a   y        ==>        x   c
    //         / \                 / \
    //        b   c               a   b
    //
    fn rotate_left(&mut self, x: NodeId) {
        let y = self.nodes[x].right;
        if y == NIL {
            panic!("rotate_left(): rotating around nil ? call the programmer");
        }
        let b = self.nodes[y].left;
        self.nodes[x].right = b;
        if b != NIL {
            self.nodes[b].parent = x;
        }
        let p = self.nodes[x].parent;
        self.nodes[y].parent = p;
        if p == NIL {
            self.root = y;
        } else if self.nodes[p].left == x {
            self.nodes[p].left = y;
        } else {
            self.nodes[p].right = y;
        }
        self.nodes[y].left = x;
        self.nodes[x].parent = y;
    }

    //          x                   y
    //         / \                 / \
    //        y   c      ==>      a   x
    //       / \                     / \
    //      a   b                   b   c
    //
    fn rotate_right(&mut self, x: NodeId) {
        let y = self.nodes[x].left;
        if y == NIL {
            panic!("rotate_right(): rotating around nil ? call the programmer");
        }
        let b = self.nodes[y].right;
        self.nodes[x].left = b;
        if b != NIL {
            self.nodes[b].parent = x;
        }
        let p = self.nodes[x].parent;
        self.nodes[y].parent = p;
        if p == NIL {
            self.root = y;
        } else if self.nodes[p].right == x {
            self.nodes[p].right = y;
        } else {
            self.nodes[p].left = y;
        }
        self.nodes[y].right = x;
        self.nodes[x].parent = y;
    }

    // z is a freshly linked red leaf. Climb while its parent is red,
    // each round either recolors and moves two levels up or rotates
    // and terminates.
    fn insert_fixup(&mut self, mut z: NodeId) {
        while self.is_red(self.nodes[z].parent) {
            let p = self.nodes[z].parent;
            let g = self.nodes[p].parent; // red parent is never the root
            if p == self.nodes[g].left {
                let u = self.nodes[g].right; // uncle
                if self.is_red(u) {
                    // red uncle, push the violation two levels up.
                    self.set_black(p);
                    self.set_black(u);
                    self.set_red(g);
                    z = g;
                } else {
                    if z == self.nodes[p].right {
                        // inner grandchild, rotate into the outer shape.
                        z = p;
                        self.rotate_left(z);
                    }
                    let p = self.nodes[z].parent;
                    let g = self.nodes[p].parent;
                    self.set_black(p);
                    self.set_red(g);
                    self.rotate_right(g);
                }
            } else {
                let u = self.nodes[g].left; // uncle
                if self.is_red(u) {
                    self.set_black(p);
                    self.set_black(u);
                    self.set_red(g);
                    z = g;
                } else {
                    if z == self.nodes[p].left {
                        z = p;
                        self.rotate_right(z);
                    }
                    let p = self.nodes[z].parent;
                    let g = self.nodes[p].parent;
                    self.set_black(p);
                    self.set_red(g);
                    self.rotate_left(g);
                }
            }
        }
        let root = self.root;
        self.set_black(root);
    }

    // redirect u's parent to v. v may be NIL, in which case only the
    // parent side is rewritten, the fixup tracks the vacated slot's
    // parent explicitly instead of scribbling on the nil slot.
    fn transplant(&mut self, u: NodeId, v: NodeId) {
        let p = self.nodes[u].parent;
        if p == NIL {
            self.root = v;
        } else if self.nodes[p].left == u {
            self.nodes[p].left = v;
        } else {
            self.nodes[p].right = v;
        }
        if v != NIL {
            self.nodes[v].parent = p;
        }
    }

    // unlink z from the tree. The arena slot is left intact for the
    // caller to read and recycle.
    fn unlink(&mut self, z: NodeId) {
        let mut removed_black = self.nodes[z].black;
        let x: NodeId; // node taking over the vacated slot, may be NIL
        let xp: NodeId; // structural parent of that slot
        if self.nodes[z].left == NIL {
            x = self.nodes[z].right;
            xp = self.nodes[z].parent;
            self.transplant(z, x);
        } else if self.nodes[z].right == NIL {
            x = self.nodes[z].left;
            xp = self.nodes[z].parent;
            self.transplant(z, x);
        } else {
            // two children: the in-order successor y takes z's place,
            // z's color included, and y's old slot is the one vacated.
            let y = self.min_from(self.nodes[z].right);
            removed_black = self.nodes[y].black;
            x = self.nodes[y].right;
            if self.nodes[y].parent == z {
                xp = y;
            } else {
                xp = self.nodes[y].parent;
                self.transplant(y, x);
                let zr = self.nodes[z].right;
                self.nodes[y].right = zr;
                self.nodes[zr].parent = y;
            }
            self.transplant(z, y);
            let zl = self.nodes[z].left;
            self.nodes[y].left = zl;
            self.nodes[zl].parent = y;
            self.nodes[y].black = self.nodes[z].black;
        }
        if removed_black {
            // a black node left every path through the slot, black
            // heights are off by one until fixed.
            self.delete_fixup(x, xp);
        }
    }

    // x carries an extra implicit black. Push it up or resolve it
    // with the sibling, four cases mirrored on both sides.
    fn delete_fixup(&mut self, mut x: NodeId, mut xp: NodeId) {
        while x != self.root && self.is_black(x) {
            if x == self.nodes[xp].left {
                let mut w = self.nodes[xp].right; // sibling
                if self.is_red(w) {
                    // red sibling, rotate it above and retry with the
                    // black sibling this exposes.
                    self.set_black(w);
                    self.set_red(xp);
                    self.rotate_left(xp);
                    w = self.nodes[xp].right;
                }
                if self.is_black(self.nodes[w].left) && self.is_black(self.nodes[w].right) {
                    // both nephews black, move the deficiency up.
                    self.set_red(w);
                    x = xp;
                    xp = self.nodes[x].parent;
                } else {
                    if self.is_black(self.nodes[w].right) {
                        // near nephew red, rotate it into the far slot.
                        let wl = self.nodes[w].left;
                        self.set_black(wl);
                        self.set_red(w);
                        self.rotate_right(w);
                        w = self.nodes[xp].right;
                    }
                    // far nephew red, resolve the deficiency here.
                    self.nodes[w].black = self.nodes[xp].black;
                    self.set_black(xp);
                    let wr = self.nodes[w].right;
                    self.set_black(wr);
                    self.rotate_left(xp);
                    x = self.root;
                }
            } else {
                let mut w = self.nodes[xp].left; // sibling
                if self.is_red(w) {
                    self.set_black(w);
                    self.set_red(xp);
                    self.rotate_right(xp);
                    w = self.nodes[xp].left;
                }
                if self.is_black(self.nodes[w].right) && self.is_black(self.nodes[w].left) {
                    self.set_red(w);
                    x = xp;
                    xp = self.nodes[x].parent;
                } else {
                    if self.is_black(self.nodes[w].left) {
                        let wr = self.nodes[w].right;
                        self.set_black(wr);
                        self.set_red(w);
                        self.rotate_left(w);
                        w = self.nodes[xp].left;
                    }
                    self.nodes[w].black = self.nodes[xp].black;
                    self.set_black(xp);
                    let wl = self.nodes[w].left;
                    self.set_black(wl);
                    self.rotate_right(xp);
                    x = self.root;
                }
            }
        }
        self.set_black(x);
    }
}

#[cfg(test)]
impl<K> Rbt<K>
where
    K: Clone + Ord,
{
    // color under one entry matching key, None when absent.
    pub(crate) fn is_black_key<Q>(&self, key: &Q) -> Option<bool>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.find(key) {
            NIL => None,
            id => Some(self.nodes[id].black),
        }
    }
}

/// Opaque handle to one entry in an [Rbt] instance. A handle stays
/// valid across reads and inserts, any delete invalidates it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeHandle(NodeId);

/// Kind of mutating operation reported through the observation hook.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpKind {
    Insert,
    Delete,
}

/// Snapshot handed to the observation hook after each committed
/// mutation.
#[derive(Clone, Debug)]
pub struct Event<K>
where
    K: Clone + Ord,
{
    pub kind: OpKind,
    pub key: K,
    pub entries: usize,
}

/// Observation callback, refer [Rbt::set_hook].
pub type EventHook<K> = Box<dyn FnMut(Event<K>)>;

/// Ascending iterator over all entries, walks successor links from
/// the minimum.
pub struct Iter<'a, K>
where
    K: Clone + Ord,
{
    tree: &'a Rbt<K>,
    next: NodeId,
}

impl<'a, K> Iterator for Iter<'a, K>
where
    K: Clone + Ord,
{
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        match self.next {
            NIL => None,
            id => {
                self.next = tree.succ_of(id);
                Some(&tree.nodes[id].key)
            }
        }
    }
}

/// Ascending iterator over entries bounded from low to high.
pub struct Range<'a, K>
where
    K: Clone + Ord,
{
    tree: &'a Rbt<K>,
    low: Bound<K>,
    high: Bound<K>,
    cur: Option<NodeId>, // None until the lower bound is sought
}

impl<'a, K> Range<'a, K>
where
    K: Clone + Ord,
{
    /// Flip into a descending iterator over the same bounds.
    pub fn rev(self) -> Reverse<'a, K> {
        Reverse {
            tree: self.tree,
            low: self.low,
            high: self.high,
            cur: None,
        }
    }
}

impl<'a, K> Iterator for Range<'a, K>
where
    K: Clone + Ord,
{
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        let id = match self.cur {
            None => tree.seek_low(&self.low),
            Some(id) => id,
        };
        if id == NIL {
            self.cur = Some(NIL);
            return None;
        }
        let key = &tree.nodes[id].key;
        let within = match &self.high {
            Bound::Unbounded => true,
            Bound::Included(high) => key.le(high),
            Bound::Excluded(high) => key.lt(high),
        };
        if within {
            self.cur = Some(tree.succ_of(id));
            Some(key)
        } else {
            self.cur = Some(NIL);
            None
        }
    }
}

/// Descending iterator over entries bounded from high to low.
pub struct Reverse<'a, K>
where
    K: Clone + Ord,
{
    tree: &'a Rbt<K>,
    low: Bound<K>,
    high: Bound<K>,
    cur: Option<NodeId>, // None until the upper bound is sought
}

impl<'a, K> Iterator for Reverse<'a, K>
where
    K: Clone + Ord,
{
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        let id = match self.cur {
            None => tree.seek_high(&self.high),
            Some(id) => id,
        };
        if id == NIL {
            self.cur = Some(NIL);
            return None;
        }
        let key = &tree.nodes[id].key;
        let within = match &self.low {
            Bound::Unbounded => true,
            Bound::Included(low) => key.ge(low),
            Bound::Excluded(low) => key.gt(low),
        };
        if within {
            self.cur = Some(tree.pred_of(id));
            Some(key)
        } else {
            self.cur = Some(NIL);
            None
        }
    }
}

/// Node corresponds to a single entry in Rbt instance.
#[derive(Clone)]
pub struct Node<K>
where
    K: Clone + Ord,
{
    key: K,
    black: bool,    // store: black or red
    left: NodeId,   // store: left child, NIL when absent
    right: NodeId,  // store: right child, NIL when absent
    parent: NodeId, // lookup relation only, never ownership
}

impl<K> Node<K>
where
    K: Clone + Ord,
{
    // CREATE operation, a node starts red with both children absent.
    fn new(key: K) -> Node<K> {
        Node {
            key,
            black: false,
            left: NIL,
            right: NIL,
            parent: NIL,
        }
    }
}

/// Statistics on [`Rbt`] tree. Serves two purpose:
///
/// * To get partial but quick statistics via [`Rbt::stats`] method.
/// * To get full statisics via [`Rbt::validate`] method.
#[derive(Default, Debug)]
pub struct Stats {
    entries: usize, // number of entries in the tree.
    node_size: usize,
    blacks: Option<usize>,
    depths: Option<Depth>,
}

impl Stats {
    fn new(entries: usize, node_size: usize) -> Stats {
        Stats {
            entries,
            node_size,
            blacks: Default::default(),
            depths: Default::default(),
        }
    }

    #[inline]
    fn set_blacks(&mut self, blacks: usize) {
        self.blacks = Some(blacks)
    }

    #[inline]
    fn set_depths(&mut self, depths: Depth) {
        self.depths = Some(depths)
    }

    #[inline]
    fn sample_depth(&mut self, depth: usize) {
        if let Some(depths) = self.depths.as_mut() {
            depths.sample(depth)
        }
    }

    /// Return number entries in [`Rbt`] instance.
    #[inline]
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Return node-size, including over-head for `Rbt<K>`. Although
    /// the node overhead is constant, the node size varies based on
    /// the key type.
    #[inline]
    pub fn node_size(&self) -> usize {
        self.node_size
    }

    /// Return number of black nodes on every path from root to leaf.
    #[inline]
    pub fn blacks(&self) -> Option<usize> {
        self.blacks
    }

    /// Return [`Depth`] statistics.
    pub fn depths(&self) -> Option<Depth> {
        match self.depths.as_ref() {
            Some(depths) if depths.samples() > 0 => Some(depths.clone()),
            _ => None,
        }
    }
}
