use percent_encoding::percent_decode_str;
use std::borrow::Cow;
use url::Url;

/// Last non-empty path segment of a URL, percent-decoded, e.g. `v4.inv` for
/// `https://example.org/ghcn/v4.inv` and `my data.txt` for `.../my%20data.txt`.
pub fn url_file_name(url: &Url) -> Option<Cow<'_, str>> {
    let segment = url.path_segments()?.rev().find(|segment| !segment.is_empty())?;
    let decoded = percent_decode_str(segment).decode_utf8().ok()?;
    is_valid_file_name(&decoded).then_some(decoded)
}

/// Last component of a member path, e.g. `v4.qcf.dat` for `ghcnm.v4/v4.qcf.dat`.
pub fn member_file_name(name: &str) -> Option<&str> {
    name.rsplit('/')
        .find(|component| !component.is_empty())
        .filter(|component| is_valid_file_name(component))
}

/// A single path component that stays inside the directory it is joined to.
pub fn is_valid_file_name(name: &str) -> bool {
    !name.is_empty() && !matches!(name, "." | "..") && !name.contains(['/', '\\'])
}
