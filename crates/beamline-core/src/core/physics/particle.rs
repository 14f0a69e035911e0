use phf::{Map, phf_map};
use std::fmt;

/// A particle species as seen by the tracking engine: a rest mass and a charge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSpecies {
    /// Registry name, capitalized (e.g. "Proton").
    pub name: &'static str,
    /// Rest mass in GeV/c^2.
    pub mass: f64,
    /// Charge in units of the elementary charge.
    pub charge: f64,
}

pub const PROTON: ParticleSpecies = ParticleSpecies {
    name: "Proton",
    mass: 0.938_272_088_16,
    charge: 1.0,
};

pub const ANTIPROTON: ParticleSpecies = ParticleSpecies {
    name: "Antiproton",
    mass: 0.938_272_088_16,
    charge: -1.0,
};

pub const ELECTRON: ParticleSpecies = ParticleSpecies {
    name: "Electron",
    mass: 0.510_998_950e-3,
    charge: -1.0,
};

pub const POSITRON: ParticleSpecies = ParticleSpecies {
    name: "Positron",
    mass: 0.510_998_950e-3,
    charge: 1.0,
};

pub const POSITIVE_MUON: ParticleSpecies = ParticleSpecies {
    name: "Posmuon",
    mass: 0.105_658_375_5,
    charge: 1.0,
};

pub const NEGATIVE_MUON: ParticleSpecies = ParticleSpecies {
    name: "Negmuon",
    mass: 0.105_658_375_5,
    charge: -1.0,
};

pub const H_MINUS: ParticleSpecies = ParticleSpecies {
    name: "Hminus",
    mass: 0.939_294_086_1,
    charge: -1.0,
};

static REGISTRY: Map<&'static str, ParticleSpecies> = phf_map! {
    "Proton" => PROTON,
    "Antiproton" => ANTIPROTON,
    "Electron" => ELECTRON,
    "Positron" => POSITRON,
    "Posmuon" => POSITIVE_MUON,
    "Negmuon" => NEGATIVE_MUON,
    "Hminus" => H_MINUS,
};

impl ParticleSpecies {
    /// Looks up a species by name.
    ///
    /// The name is capitalized (first letter upper case, the rest lower case)
    /// before the lookup, so `"PROTON"`, `"proton"` and `"Proton"` are equivalent.
    pub fn lookup(name: &str) -> Option<Self> {
        REGISTRY.get(capitalize(name.trim()).as_str()).copied()
    }

    /// Names of every registered species.
    pub fn registered() -> impl Iterator<Item = &'static str> {
        REGISTRY.keys().copied()
    }
}

impl Default for ParticleSpecies {
    fn default() -> Self {
        PROTON
    }
}

impl fmt::Display for ParticleSpecies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
