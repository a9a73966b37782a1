// File: src/unique.rs
// Purpose: Extension point for the UNIQUE directive

/// Existence check behind `UNIQUE|key` rules.
///
/// `key` is the rule argument (typically a table/column reference),
/// `candidate` the sanitized field value and `exclude` the value of the
/// configured exclusion sibling, if the submitted data carries one, so a
/// record being edited does not collide with itself.
pub trait UniquenessCheck: Send + Sync {
    fn is_unique(&self, key: &str, candidate: &str, exclude: Option<&str>) -> bool;
}

/// Accepts every value. Wire it in explicitly when uniqueness is enforced
/// elsewhere (e.g. by a database constraint).
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl UniquenessCheck for AcceptAll {
    fn is_unique(&self, _key: &str, _candidate: &str, _exclude: Option<&str>) -> bool {
        true
    }
}

impl<F> UniquenessCheck for F
where
    F: Fn(&str, &str, Option<&str>) -> bool + Send + Sync,
{
    fn is_unique(&self, key: &str, candidate: &str, exclude: Option<&str>) -> bool {
        self(key, candidate, exclude)
    }
}
