use super::directive::{BundleSource, Directive, FileSource, MemberSource};
use super::parser::{ParseError, parse_str};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use url::Url;

/// A bundle together with the members declared under it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BundleGroup {
    pub url: Url,
    pub members: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Source {
    File(FileSource),
    Bundle(BundleGroup),
}

/// Manifest with members nested under their owning bundle.
///
/// Sources keep the order in which they were first declared. Members of a
/// bundle keep their declaration order even when the bundle's member lines are
/// interleaved with other directives.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    pub sources: Vec<Source>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestWarning {
    EmptyBundle { url: Url },
    DuplicateFile { url: Url },
    DuplicateMember { bundle: Url, name: String },
}

impl fmt::Display for ManifestWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManifestWarning::EmptyBundle { url } => {
                write!(f, "bundle {url} declares no members")
            }
            ManifestWarning::DuplicateFile { url } => {
                write!(f, "file {url} is declared more than once")
            }
            ManifestWarning::DuplicateMember { bundle, name } => {
                write!(f, "member {name} of bundle {bundle} is declared more than once")
            }
        }
    }
}

impl Manifest {
    pub fn from_directives(directives: impl IntoIterator<Item = Directive>) -> Self {
        let mut sources = Vec::new();
        let mut bundle_positions: HashMap<Url, usize> = HashMap::new();

        for directive in directives {
            let (bundle_url, member) = match directive {
                Directive::File(file) => {
                    sources.push(Source::File(file));
                    continue;
                }
                Directive::Bundle(BundleSource { url }) => (url, None),
                Directive::Member(MemberSource { name, bundle }) => (bundle, Some(name)),
            };

            let position = *bundle_positions
                .entry(bundle_url.clone())
                .or_insert_with(|| {
                    sources.push(Source::Bundle(BundleGroup {
                        url: bundle_url,
                        members: Vec::new(),
                    }));
                    sources.len() - 1
                });

            if let Some(name) = member
                && let Source::Bundle(group) = &mut sources[position]
            {
                group.members.push(name);
            }
        }

        Self { sources }
    }

    /// Flattens the manifest back into directives, each bundle followed by its members.
    pub fn directives(&self) -> impl Iterator<Item = Directive> + '_ {
        self.sources.iter().flat_map(|source| match source {
            Source::File(file) => vec![Directive::File(file.clone())],
            Source::Bundle(group) => std::iter::once(Directive::Bundle(BundleSource {
                url: group.url.clone(),
            }))
            .chain(group.members.iter().map(|name| {
                Directive::Member(MemberSource {
                    name: name.clone(),
                    bundle: group.url.clone(),
                })
            }))
            .collect::<Vec<_>>(),
        })
    }

    pub fn files(&self) -> impl Iterator<Item = &FileSource> {
        self.sources.iter().filter_map(|source| match source {
            Source::File(file) => Some(file),
            Source::Bundle(_) => None,
        })
    }

    pub fn bundles(&self) -> impl Iterator<Item = &BundleGroup> {
        self.sources.iter().filter_map(|source| match source {
            Source::Bundle(group) => Some(group),
            Source::File(_) => None,
        })
    }

    pub fn member_count(&self) -> usize {
        self.bundles().map(|group| group.members.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Things that parse fine but are probably mistakes.
    pub fn warnings(&self) -> Vec<ManifestWarning> {
        let mut warnings = Vec::new();

        warnings.extend(
            self.files()
                .map(|file| &file.url)
                .duplicates()
                .map(|url| ManifestWarning::DuplicateFile { url: url.clone() }),
        );

        for group in self.bundles() {
            if group.members.is_empty() {
                warnings.push(ManifestWarning::EmptyBundle {
                    url: group.url.clone(),
                });
            }
            warnings.extend(group.members.iter().duplicates().map(|name| {
                ManifestWarning::DuplicateMember {
                    bundle: group.url.clone(),
                    name: name.clone(),
                }
            }));
        }

        warnings
    }
}

impl FromStr for Manifest {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_directives(parse_str(s)?))
    }
}

impl fmt::Display for Manifest {
    /// Canonical manifest text: no comments or blank lines, members directly
    /// after their bundle.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for directive in self.directives() {
            writeln!(f, "{directive}")?;
        }
        Ok(())
    }
}
