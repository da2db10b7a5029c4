//! Coordinate variable lookup by candidate name.

use tracing::debug;

use crate::error::{PatchError, PatchResult};
use crate::store::CoordinateStore;

/// The candidate that matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedVariable<'a> {
    pub name: &'a str,
    /// Position of `name` in the candidate list
    pub index: usize,
}

/// Find the first candidate that exists in the store.
///
/// List order is priority order. When nothing matches the error names
/// the first candidate, whichever names were tried.
pub fn resolve<'a, S>(store: &S, candidates: &[&'a str]) -> PatchResult<ResolvedVariable<'a>>
where
    S: CoordinateStore + ?Sized,
{
    let first = candidates.first().ok_or(PatchError::NoCandidateNames)?;

    let resolved = candidates
        .iter()
        .enumerate()
        .find(|(_, name)| store.contains(name))
        .map(|(index, &name)| ResolvedVariable { name, index })
        .ok_or_else(|| PatchError::VariableNotFound(first.to_string()))?;

    debug!(
        variable = resolved.name,
        candidate = resolved.index,
        "Resolved coordinate variable"
    );

    Ok(resolved)
}
