//! Segment-wise path matching with `{param}` captures.

/// One `/`-separated piece of a route template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Param(String),
}

impl Segment {
    fn parse(raw: &str) -> Self {
        match raw.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
            Some(name) if !name.is_empty() => Self::Param(name.to_string()),
            _ => Self::Literal(raw.to_string()),
        }
    }
}

/// Split an effective path template into segments.
pub fn compile_template(template: &str) -> Vec<Segment> {
    template.split('/').map(Segment::parse).collect()
}

/// Path parameters bound during matching, in template order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams(Vec<(String, String)>);

impl PathParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Match a normalised request path against compiled segments.
///
/// Each path segment is percent-decoded before comparison, so `%2D` matches a
/// literal `-` and `%34%32` binds as `42`. Literals compare exactly; a
/// parameter binds one non-empty segment. A segment that does not decode to
/// UTF-8 matches nothing.
pub fn match_segments(segments: &[Segment], path: &str) -> Option<PathParams> {
    let mut params = Vec::new();
    let mut parts = path.split('/');

    for segment in segments {
        let part = urlencoding::decode(parts.next()?).ok()?;
        match segment {
            Segment::Literal(lit) if *lit == part => {}
            Segment::Literal(_) => return None,
            Segment::Param(_) if part.is_empty() => return None,
            Segment::Param(name) => params.push((name.clone(), part.into_owned())),
        }
    }

    if parts.next().is_some() {
        return None;
    }

    Some(PathParams(params))
}
