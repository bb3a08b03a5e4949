use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    File,
    Bundle,
    Member,
}

impl Keyword {
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::File => "file",
            Keyword::Bundle => "bundle",
            Keyword::Member => "member",
        }
    }

    /// Keywords are matched exactly; `File:` is not a directive.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "file" => Some(Keyword::File),
            "bundle" => Some(Keyword::Bundle),
            "member" => Some(Keyword::Member),
            _ => None,
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single dataset file retrieved directly from its URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileSource {
    pub url: Url,
}

/// A compressed archive whose members are extracted after download.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BundleSource {
    pub url: Url,
}

/// A path expected inside a bundle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemberSource {
    pub name: String,
    /// URL of the bundle the member was declared under
    pub bundle: Url,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Directive {
    File(FileSource),
    Bundle(BundleSource),
    Member(MemberSource),
}

impl Directive {
    pub fn keyword(&self) -> Keyword {
        match self {
            Directive::File(_) => Keyword::File,
            Directive::Bundle(_) => Keyword::Bundle,
            Directive::Member(_) => Keyword::Member,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Directive::File(FileSource { url }) | Directive::Bundle(BundleSource { url }) => {
                url.as_str()
            }
            Directive::Member(MemberSource { name, .. }) => name,
        }
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.keyword(), self.value())
    }
}

/// Writes one directive per line in manifest syntax.
pub fn write_directives<'a, W>(
    writer: &mut W,
    directives: impl IntoIterator<Item = &'a Directive>,
) -> std::io::Result<()>
where
    W: std::io::Write,
{
    for directive in directives {
        writeln!(writer, "{directive}")?;
    }
    Ok(())
}

pub fn directives_to_string<'a>(directives: impl IntoIterator<Item = &'a Directive>) -> String {
    directives
        .into_iter()
        .map(|directive| format!("{directive}\n"))
        .collect()
}
