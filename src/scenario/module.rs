//! Module catalog and selection.

use crate::error::{Error, Result};
use rand::Rng;
use std::fmt;
use std::str::FromStr;

/// Label of the sentinel that picks a module at random.
pub const RANDOM_LABEL: &str = "Random";

/// One of the fixed CSA study modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Module {
    /// ServiceNow Overview.
    Overview,
    /// User Interface & Navigation.
    UserInterface,
    /// Lists, Filters & Forms.
    ListsFiltersForms,
    /// Data Schema & Tables.
    DataSchema,
    /// Self-Service, Knowledge-Catalog & Workflows.
    SelfService,
    /// Reporting & Dashboards, Platform Analytics.
    Reporting,
    /// ServiceNow Utilities.
    Utilities,
    /// Security in ServiceNow Platform.
    Security,
}

impl Module {
    /// Every module, in menu order.
    pub const ALL: [Self; 8] = [
        Self::Overview,
        Self::UserInterface,
        Self::ListsFiltersForms,
        Self::DataSchema,
        Self::SelfService,
        Self::Reporting,
        Self::Utilities,
        Self::Security,
    ];

    /// The exact name the backend expects.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Overview => "ServiceNow Overview",
            Self::UserInterface => "User Interface & Navigation",
            Self::ListsFiltersForms => "Lists, Filters & Forms",
            Self::DataSchema => "Data Schema & Tables",
            Self::SelfService => "Self-Service, Knowledge-Catalog & Workflows",
            Self::Reporting => "Reporting & Dashboards, Platform Analytics",
            Self::Utilities => "ServiceNow Utilities",
            Self::Security => "Security in ServiceNow Platform",
        }
    }

    /// Look up a module by name, ignoring ASCII case and surrounding space.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|module| module.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What the user picked: a specific module or the random sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleSelection {
    /// A specific module.
    Named(Module),
    /// Any module, chosen uniformly before the request is sent.
    Random,
}

impl ModuleSelection {
    /// Parse a selection; unknown names are rejected before any request.
    pub fn parse(input: &str) -> Result<Self> {
        if input.trim().eq_ignore_ascii_case(RANDOM_LABEL) {
            return Ok(Self::Random);
        }
        Module::from_name(input)
            .map(Self::Named)
            .ok_or_else(|| Error::UnknownModule(input.to_string()))
    }

    /// The concrete module to request.
    pub fn resolve<R: Rng + ?Sized>(self, rng: &mut R) -> Module {
        match self {
            Self::Named(module) => module,
            Self::Random => Module::ALL[rng.random_range(0..Module::ALL.len())],
        }
    }

    /// Menu label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Named(module) => module.name(),
            Self::Random => RANDOM_LABEL,
        }
    }
}

impl FromStr for ModuleSelection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<Module> for ModuleSelection {
    fn from(module: Module) -> Self {
        Self::Named(module)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_names_are_exact() {
        let names: Vec<_> = Module::ALL.iter().map(|m| m.name()).collect();
        assert_eq!(names.len(), 8);
        assert!(names.contains(&"Lists, Filters & Forms"));
        assert!(names.contains(&"Reporting & Dashboards, Platform Analytics"));
    }

    #[test]
    fn test_parse_exact_and_case_insensitive() {
        assert_eq!(
            ModuleSelection::parse("Data Schema & Tables").unwrap(),
            ModuleSelection::Named(Module::DataSchema)
        );
        assert_eq!(
            ModuleSelection::parse("  servicenow utilities ").unwrap(),
            ModuleSelection::Named(Module::Utilities)
        );
    }

    #[test]
    fn test_parse_random_sentinel() {
        assert_eq!(ModuleSelection::parse("Random").unwrap(), ModuleSelection::Random);
        assert_eq!(ModuleSelection::parse("random").unwrap(), ModuleSelection::Random);
    }

    #[test]
    fn test_parse_unknown_module() {
        let err = ModuleSelection::parse("Quantum Knitting").unwrap_err();
        assert!(matches!(err, Error::UnknownModule(name) if name == "Quantum Knitting"));
    }

    #[test]
    fn test_random_resolves_into_catalog() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = HashSet::new();
        for _ in 0..500 {
            let module = ModuleSelection::Random.resolve(&mut rng);
            assert!(Module::ALL.contains(&module));
            seen.insert(module);
        }
        assert_eq!(seen.len(), Module::ALL.len());
    }

    #[test]
    fn test_named_resolves_to_itself() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            ModuleSelection::Named(Module::Security).resolve(&mut rng),
            Module::Security
        );
    }
}
