use std::collections::BTreeMap;
use std::fmt;

/// The match result of one named segment rule.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct Verdict {
    segment: String,
    matched: bool,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.segment, self.matched)
    }
}

impl Verdict {
    pub fn new(segment: impl Into<String>, matched: bool) -> Self {
        Self {
            segment: segment.into(),
            matched,
        }
    }

    #[must_use]
    pub fn segment(&self) -> &str {
        &self.segment
    }

    #[must_use]
    pub fn matched(&self) -> bool {
        self.matched
    }
}

/// Successful batch output: one [`Verdict`] per rule, in input order.
///
/// With the `serde` feature this serializes as a `{name: bool}` map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[must_use]
pub struct SegmentResults {
    verdicts: Vec<Verdict>,
}

impl SegmentResults {
    pub(crate) fn push(&mut self, verdict: Verdict) {
        self.verdicts.push(verdict);
    }

    /// Result for the named segment, if it was part of the batch.
    #[must_use]
    pub fn get(&self, segment: &str) -> Option<bool> {
        self.verdicts
            .iter()
            .find(|v| v.segment == segment)
            .map(Verdict::matched)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Verdict> {
        self.verdicts.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.verdicts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.verdicts.is_empty()
    }

    #[must_use]
    pub fn into_map(self) -> BTreeMap<String, bool> {
        self.verdicts
            .into_iter()
            .map(|v| (v.segment, v.matched))
            .collect()
    }
}

impl FromIterator<Verdict> for SegmentResults {
    fn from_iter<T: IntoIterator<Item = Verdict>>(iter: T) -> Self {
        Self {
            verdicts: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for SegmentResults {
    type Item = Verdict;
    type IntoIter = std::vec::IntoIter<Verdict>;

    fn into_iter(self) -> Self::IntoIter {
        self.verdicts.into_iter()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for SegmentResults {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.verdicts.len()))?;
        for v in &self.verdicts {
            map.serialize_entry(&v.segment, &v.matched)?;
        }
        map.end()
    }
}
