//! Required-version constraints.
//!
//! A constraint is a comma-separated list of clauses, all of which must hold:
//! `">= 1.42, < 2"`. Each clause is an operator (`=`, `!=`, `>`, `>=`, `<`,
//! `<=`) followed by a dotted version; a bare version means `=`. Versions
//! compare numerically segment by segment, missing segments count as zero,
//! and a leading `v` or any `-pre`/`+build` suffix is ignored.

use std::cmp::Ordering;

/// Errors raised by version checks.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VersionError {
    #[error("the required schemadoc version for the configuration is '{required}'. however, the running schemadoc version is '{running}'")]
    VersionMismatch { required: String, running: String },

    #[error("invalid version constraint '{0}'")]
    InvalidConstraint(String),

    #[error("invalid version '{0}'")]
    InvalidVersion(String),
}

pub type VersionResult<T> = Result<T, VersionError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
}

impl Op {
    // Two-character operators first so `>=` is not read as `>`.
    const PREFIXES: [(&'static str, Op); 6] = [
        (">=", Op::Ge),
        ("<=", Op::Le),
        ("!=", Op::Ne),
        (">", Op::Gt),
        ("<", Op::Lt),
        ("=", Op::Eq),
    ];

    fn holds(self, ordering: Ordering) -> bool {
        match self {
            Op::Eq => ordering == Ordering::Equal,
            Op::Ne => ordering != Ordering::Equal,
            Op::Gt => ordering == Ordering::Greater,
            Op::Ge => ordering != Ordering::Less,
            Op::Lt => ordering == Ordering::Less,
            Op::Le => ordering != Ordering::Greater,
        }
    }
}

/// A dotted numeric version. `1.42` and `1.42.0` are equal.
#[derive(Debug, Clone)]
pub struct Version(Vec<u64>);

impl Version {
    pub fn parse(s: &str) -> VersionResult<Self> {
        let trimmed = s.trim();
        let core = trimmed.strip_prefix('v').unwrap_or(trimmed);
        let core = core.split(['-', '+']).next().unwrap_or_default();
        if core.is_empty() {
            return Err(VersionError::InvalidVersion(s.to_string()));
        }

        core.split('.')
            .map(|segment| segment.parse::<u64>())
            .collect::<Result<Vec<_>, _>>()
            .map(Version)
            .map_err(|_| VersionError::InvalidVersion(s.to_string()))
    }

    fn segment(&self, i: usize) -> u64 {
        self.0.get(i).copied().unwrap_or(0)
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.0.len().max(other.0.len());
        (0..len)
            .map(|i| self.segment(i).cmp(&other.segment(i)))
            .find(|o| *o != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }
}

#[derive(Debug, Clone)]
struct Clause {
    op: Op,
    version: Version,
}

impl Clause {
    fn parse(raw: &str, constraint: &str) -> VersionResult<Self> {
        let raw = raw.trim();
        let (op, rest) = Op::PREFIXES
            .iter()
            .find_map(|(prefix, op)| raw.strip_prefix(*prefix).map(|rest| (*op, rest)))
            .unwrap_or((Op::Eq, raw));

        let version = Version::parse(rest)
            .map_err(|_| VersionError::InvalidConstraint(constraint.to_string()))?;
        Ok(Self { op, version })
    }
}

/// Check `running` against a `required` constraint. An empty constraint
/// always holds.
pub fn check_version(required: &str, running: &str) -> VersionResult<()> {
    if required.trim().is_empty() {
        return Ok(());
    }

    let clauses = required
        .split(',')
        .map(|raw| Clause::parse(raw, required))
        .collect::<VersionResult<Vec<_>>>()?;
    let version = Version::parse(running)?;

    if clauses.iter().all(|c| c.op.holds(version.cmp(&c.version))) {
        Ok(())
    } else {
        Err(VersionError::VersionMismatch {
            required: required.to_string(),
            running: running.to_string(),
        })
    }
}
