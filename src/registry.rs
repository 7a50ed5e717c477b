use std::collections::HashMap;
use std::iter::FromIterator;

/// A read-only lookup between short aliases and concrete identifiers.
///
/// Both directions are queried by exact key. A miss is not an error: an
/// unknown alias is used verbatim, and an identifier without an alias gets
/// an empty display name.
pub trait Registry {
    /// The concrete identifier an alias stands for, like `"html"` to
    /// `"text/html"`.
    fn resolve_alias(&self, alias: &str) -> Option<&str>;

    /// The short name to show for a concrete identifier, like
    /// `"text/html"` to `"html"`.
    fn resolve_display_name(&self, identifier: &str) -> Option<&str>;
}

impl<'a, R: Registry + ?Sized> Registry for &'a R {
    #[inline]
    fn resolve_alias(&self, alias: &str) -> Option<&str> {
        (**self).resolve_alias(alias)
    }

    #[inline]
    fn resolve_display_name(&self, identifier: &str) -> Option<&str> {
        (**self).resolve_display_name(identifier)
    }
}

/// A `Registry` that knows no aliases.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoAliases;

impl Registry for NoAliases {
    #[inline]
    fn resolve_alias(&self, _: &str) -> Option<&str> {
        None
    }

    #[inline]
    fn resolve_display_name(&self, _: &str) -> Option<&str> {
        None
    }
}

/// A map backed `Registry`.
///
/// Several identifiers may share an alias. The first identifier added for
/// an alias is what the alias resolves to, and the first alias added for
/// an identifier is its display name.
///
/// # Example
///
/// ```
/// use conneg::{Aliases, Registry};
///
/// let aliases = Aliases::new()
///     .with("html", "text/html")
///     .with("html", "application/xhtml+xml")
///     .with("rss", "application/rss+xml");
///
/// assert_eq!(aliases.resolve_alias("html"), Some("text/html"));
/// assert_eq!(aliases.resolve_display_name("application/xhtml+xml"), Some("html"));
/// assert_eq!(aliases.resolve_alias("atom"), None);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Aliases {
    identifiers: HashMap<String, String>,
    names: HashMap<String, String>,
}

impl Aliases {
    /// An empty table.
    pub fn new() -> Aliases {
        Aliases::default()
    }

    /// Add `alias` for `identifier`, builder style.
    pub fn with(mut self, alias: impl Into<String>, identifier: impl Into<String>) -> Aliases {
        self.insert(alias, identifier);
        self
    }

    /// Add `alias` for `identifier`. Earlier entries win on conflicts.
    pub fn insert(&mut self, alias: impl Into<String>, identifier: impl Into<String>) {
        let alias = alias.into();
        let identifier = identifier.into();
        self.names
            .entry(identifier.clone())
            .or_insert_with(|| alias.clone());
        self.identifiers.entry(alias).or_insert(identifier);
    }

    /// The number of distinct aliases.
    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    /// Whether no alias has been added.
    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }
}

impl Registry for Aliases {
    fn resolve_alias(&self, alias: &str) -> Option<&str> {
        self.identifiers.get(alias).map(String::as_str)
    }

    fn resolve_display_name(&self, identifier: &str) -> Option<&str> {
        self.names.get(identifier).map(String::as_str)
    }
}

impl<A, I> FromIterator<(A, I)> for Aliases
where
    A: Into<String>,
    I: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (A, I)>>(iter: T) -> Aliases {
        let mut aliases = Aliases::new();
        aliases.extend(iter);
        aliases
    }
}

impl<A, I> Extend<(A, I)> for Aliases
where
    A: Into<String>,
    I: Into<String>,
{
    fn extend<T: IntoIterator<Item = (A, I)>>(&mut self, iter: T) {
        for (alias, identifier) in iter {
            self.insert(alias, identifier);
        }
    }
}
