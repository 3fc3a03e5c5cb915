//! Insertion-ordered, name-unique attribute collections.

/// A single attribute: a name and its current value.
///
/// [§ 4.9.1 Interface Attr](https://dom.spec.whatwg.org/#interface-attr)
/// "Attr nodes are simply known as attributes."
///
/// Attributes are not tree nodes here: they live inside the owning element's
/// [`Attributes`] collection, so "an attribute can not have children" and
/// "an attribute can not be appended" hold by construction rather than as
/// runtime checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// The attribute name, stored as given.
    pub name: String,
    /// The attribute value. A presence-only attribute has the empty string.
    pub value: String,
}

impl Attribute {
    /// Create a new attribute with the given name and value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// The attribute collection owned by an element.
///
/// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
/// "An element has an associated attribute list."
///
/// Names are unique: setting an existing name replaces its value in place,
/// keeping the attribute's original position. Iteration order is insertion
/// order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    items: Vec<Attribute>,
}

impl Attributes {
    /// Create an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Set an attribute. If `name` is already present its value is replaced
    /// in place (the attribute keeps its position); otherwise the attribute
    /// is appended.
    pub fn set(&mut self, name: &str, value: &str) {
        if let Some(existing) = self.items.iter_mut().find(|a| a.name == name) {
            existing.value = value.to_string();
        } else {
            self.items.push(Attribute::new(name, value));
        }
    }

    /// Look up an attribute value by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Whether an attribute with this name is present (even with an empty
    /// value).
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.items.iter().any(|a| a.name == name)
    }

    /// Remove an attribute by name, returning it if it was present.
    pub fn remove(&mut self, name: &str) -> Option<Attribute> {
        let index = self.items.iter().position(|a| a.name == name)?;
        Some(self.items.remove(index))
    }

    /// The attribute at the given insertion-order position.
    #[must_use]
    pub fn item(&self, index: usize) -> Option<&Attribute> {
        self.items.get(index)
    }

    /// Number of attributes in the collection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the collection has no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over the attributes in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl FromIterator<Attribute> for Attributes {
    fn from_iter<T: IntoIterator<Item = Attribute>>(iter: T) -> Self {
        let mut attrs = Self::new();
        for attr in iter {
            attrs.set(&attr.name, &attr.value);
        }
        attrs
    }
}
