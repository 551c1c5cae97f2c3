/// RbtError enumerates over all possible errors that this package
/// shall return.
#[derive(Debug, PartialEq)]
pub enum RbtError<K>
where
    K: Clone + Ord,
{
    /// Returned by delete() API when key is not present.
    KeyNotFound,
    /// Fatal case, root node found colored red.
    RedRoot,
    /// Fatal case, two consecutive red nodes on a path.
    ConsecutiveReds,
    /// Fatal case, paths disagree on their black count. The String
    /// component of this variant can be used for debugging.
    UnbalancedBlacks(String),
    /// Fatal case, index entries are not in sort-order. Carries the
    /// offending key and the bound it violated.
    SortError(K, K),
}
