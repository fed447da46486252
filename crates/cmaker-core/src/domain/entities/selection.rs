use std::fmt;

/// Default template type when none is given.
pub const DEFAULT_TEMPLATE: &str = "executable";
/// Default kind when none is given.
pub const DEFAULT_KIND: &str = "common";
/// Default language when none is given.
pub const DEFAULT_LANGUAGE: &str = "c++";
/// Default language standard when none is given.
pub const DEFAULT_STANDARD: u32 = 23;

/// What the user asked for, before it is checked against the catalog.
///
/// The shape is already valid (the CLI guarantees a name and an integer
/// standard); whether the values exist is decided by the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub name: String,
    pub language: String,
    pub standard: u32,
    pub template: String,
    pub kind: String,
    pub features: Vec<String>,
}

impl Selection {
    pub fn builder(name: impl Into<String>) -> SelectionBuilder {
        SelectionBuilder::new(name)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}{} {}/{}",
            self.name, self.language, self.standard, self.template, self.kind
        )?;
        if !self.features.is_empty() {
            write!(f, " [{}]", self.features.join(","))?;
        }
        Ok(())
    }
}

/// Builder for [`Selection`], pre-filled with the catalog defaults.
#[derive(Debug, Clone)]
pub struct SelectionBuilder {
    inner: Selection,
}

impl SelectionBuilder {
    fn new(name: impl Into<String>) -> Self {
        Self {
            inner: Selection {
                name: name.into(),
                language: DEFAULT_LANGUAGE.into(),
                standard: DEFAULT_STANDARD,
                template: DEFAULT_TEMPLATE.into(),
                kind: DEFAULT_KIND.into(),
                features: Vec::new(),
            },
        }
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.inner.language = language.into();
        self
    }

    pub fn standard(mut self, standard: u32) -> Self {
        self.inner.standard = standard;
        self
    }

    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.inner.template = template.into();
        self
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.inner.kind = kind.into();
        self
    }

    pub fn feature(mut self, feature: impl Into<String>) -> Self {
        self.inner.features.push(feature.into());
        self
    }

    pub fn features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inner.features.extend(features.into_iter().map(Into::into));
        self
    }

    pub fn build(self) -> Selection {
        self.inner
    }
}
