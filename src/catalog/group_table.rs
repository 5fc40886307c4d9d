use crate::params::MaterialProperties;
use indexmap::IndexMap;

/// The ordered list of element groups defined by the host.
///
/// The position of a group in this table is its dense group index. Reordering
/// groups on the host side therefore changes the indices, which is why the
/// catalog recomputes them on every pass.
#[derive(Clone, Debug, Default)]
pub struct GroupTable {
    groups: IndexMap<String, Option<MaterialProperties>>,
}

impl GroupTable {
    /// Creates an empty group table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a group (or replaces the properties of an existing one) and returns its index.
    ///
    /// `None` properties are allowed: parameterization falls back to
    /// [`MaterialProperties::fallback`] for such groups.
    pub fn insert(&mut self, name: impl Into<String>, properties: Option<MaterialProperties>) -> u32 {
        let (index, _) = self.groups.insert_full(name.into(), properties);
        index as u32
    }

    /// Builder-style variant of [`GroupTable::insert`].
    pub fn with_group(mut self, name: impl Into<String>, properties: MaterialProperties) -> Self {
        let _ = self.insert(name, Some(properties));
        self
    }

    /// The number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Is this table empty?
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// The index of the group named `name`, if it exists.
    pub fn index_of(&self, name: &str) -> Option<u32> {
        self.groups.get_index_of(name).map(|i| i as u32)
    }

    /// The name of the group with the given index.
    pub fn name(&self, index: u32) -> Option<&str> {
        self.groups
            .get_index(index as usize)
            .map(|(name, _)| name.as_str())
    }

    /// The material properties of the group with the given index.
    ///
    /// Returns `None` both for unknown indices and for groups without properties.
    pub fn properties(&self, index: u32) -> Option<&MaterialProperties> {
        self.groups
            .get_index(index as usize)
            .and_then(|(_, props)| props.as_ref())
    }

    /// Is `index` a valid group index of this table?
    pub fn contains_index(&self, index: u32) -> bool {
        (index as usize) < self.groups.len()
    }
}
