use std::collections::HashSet;
use std::fmt;

/// A named permission a caller must hold to run a command. The set of
/// known capabilities is closed; commands declare theirs statically.
#[derive(Hash, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Debug)]
pub enum Capability {
    OverallRead,
    JobRead,
    ViewRead,
    ViewConfigure,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Capability::OverallRead => "Overall/Read",
            Capability::JobRead => "Job/Read",
            Capability::ViewRead => "View/Read",
            Capability::ViewConfigure => "View/Configure",
        };
        f.write_str(name)
    }
}

/// The identity a command runs as: a name plus the granted capability
/// set. Immutable for the duration of one invocation.
#[derive(Clone, Debug)]
pub struct Caller {
    name: String,
    granted: HashSet<Capability>,
}

impl Caller {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            granted: HashSet::new(),
        }
    }

    pub fn grant(mut self, capability: Capability) -> Self {
        self.granted.insert(capability);
        self
    }

    pub fn grant_all(mut self, capabilities: impl IntoIterator<Item = Capability>) -> Self {
        self.granted.extend(capabilities);
        self
    }

    pub fn has(&self, capability: Capability) -> bool {
        self.granted.contains(&capability)
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// The caller lacks one or more required capabilities. `missing` keeps
/// the command's declared order; the message names the first one, which
/// is the check that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessDenied {
    pub user: String,
    pub missing: Vec<Capability>,
}

impl fmt::Display for AccessDenied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} is missing the {} permission",
            self.user, self.missing[0]
        )
    }
}

impl std::error::Error for AccessDenied {}

/// Pure set-containment check: succeeds iff the caller's grants cover
/// every required capability. Runs strictly before argument parsing and
/// before any lookup, so a denied caller learns nothing about entities.
pub fn authorize(caller: &Caller, required: &[Capability]) -> Result<(), AccessDenied> {
    let missing: Vec<Capability> = required
        .iter()
        .copied()
        .filter(|capability| !caller.has(*capability))
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AccessDenied {
            user: caller.name.clone(),
            missing,
        })
    }
}
