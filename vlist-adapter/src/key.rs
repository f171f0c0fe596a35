/// Identity of a rendered row.
///
/// Hosts should key their render nodes by this value so that recomputations (for example after a
/// height measurement shifts later rows) reuse existing nodes instead of remounting them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RenderKey<K> {
    /// A stable key selected from the item.
    Key(K),
    /// The positional index, used when the item has no key.
    Index(usize),
}

impl<K> RenderKey<K> {
    pub fn is_positional(&self) -> bool {
        matches!(self, Self::Index(_))
    }
}
