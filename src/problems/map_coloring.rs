//! Map coloring: assign a color to every region so that no two bordering
//! regions share one.

use crate::{
    error::Result,
    solver::{
        constraints::not_equal::NotEqualConstraint, csp::Csp, domain::Domain, variable::Variable,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Green,
    Blue,
    Yellow,
}

/// The mainland states of Australia.
pub const AUSTRALIA_REGIONS: [&str; 6] = ["WA", "NT", "SA", "Q", "NSW", "V"];

/// Pairs of bordering mainland states.
pub const AUSTRALIA_BORDERS: [(&str, &str); 9] = [
    ("WA", "NT"),
    ("WA", "SA"),
    ("NT", "SA"),
    ("NT", "Q"),
    ("SA", "Q"),
    ("SA", "NSW"),
    ("SA", "V"),
    ("Q", "NSW"),
    ("NSW", "V"),
];

/// Three-coloring of Australia's mainland states.
pub fn australia() -> Csp<Color> {
    map_csp(
        &AUSTRALIA_REGIONS,
        &AUSTRALIA_BORDERS,
        &[Color::Red, Color::Green, Color::Blue],
    )
    .expect("the Australia instance is well-formed")
}

/// Builds a coloring CSP from region names and a border list.
pub fn map_csp(regions: &[&str], borders: &[(&str, &str)], colors: &[Color]) -> Result<Csp<Color>> {
    let mut csp = Csp::new();
    for region in regions {
        csp.add_variable(Variable::new(*region), Domain::new(colors.iter().copied()))?;
    }
    for (a, b) in borders {
        csp.add_constraint(NotEqualConstraint::new(Variable::new(*a), Variable::new(*b)))?;
    }
    Ok(csp)
}
