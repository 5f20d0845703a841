//! Consat is a generic, reusable constraint satisfaction problem (CSP)
//! solving engine.
//!
//! The engine is problem-agnostic: a problem is described as a set of named
//! variables, a finite domain of candidate values per variable, and a list of
//! constraints over those variables. The crate then offers several ways to
//! find an assignment that satisfies every constraint.
//!
//! # Core Concepts
//!
//! - **[`Csp`]**: the problem instance: variables, their current domains,
//!   and the constraints. Domains are narrowed in place during solving and
//!   restored from undo logs, so a single instance is shared by an entire
//!   search.
//! - **[`Constraint`]**: a rule over an ordered scope of variables. The crate
//!   ships a small standard library of constraints such as
//!   [`NotEqualConstraint`] and [`AllDifferentConstraint`].
//! - **[`InferenceStrategy`]**: constraint propagation (AC-3 arc consistency
//!   or forward checking) that prunes domains and records every reduction in
//!   a [`DomainLog`] so it can be undone exactly.
//! - **[`SearchStrategy`]**: the solvers: systematic backtracking with
//!   pluggable heuristics and inference, min-conflicts local repair, and a
//!   linear-time solver for tree-structured problems.
//!
//! # Example: A Simple 2-Variable Problem
//!
//! Solving for `X != Y` where both variables range over `{1, 2}`:
//!
//! ```
//! use consat::solver::constraints::not_equal::NotEqualConstraint;
//! use consat::solver::csp::Csp;
//! use consat::solver::domain::Domain;
//! use consat::solver::inference::Inference;
//! use consat::solver::search::backtracking::BacktrackingSolver;
//! use consat::solver::search::SearchStrategy;
//! use consat::solver::variable::Variable;
//!
//! let x = Variable::new("X");
//! let y = Variable::new("Y");
//!
//! let mut csp = Csp::new();
//! csp.add_variable(x.clone(), Domain::new([1, 2]))?;
//! csp.add_variable(y.clone(), Domain::new([1, 2]))?;
//! csp.add_constraint(NotEqualConstraint::new(x.clone(), y.clone()))?;
//!
//! let solver = BacktrackingSolver::new().with_inference(Inference::Ac3);
//! let (solution, _stats) = solver.solve(&mut csp);
//!
//! let solution = solution.expect("X != Y over {1, 2} is satisfiable");
//! assert_ne!(solution.get(&x), solution.get(&y));
//! # Ok::<(), consat::error::Error>(())
//! ```
//!
//! [`Csp`]: solver::csp::Csp
//! [`Constraint`]: solver::constraint::Constraint
//! [`NotEqualConstraint`]: solver::constraints::not_equal::NotEqualConstraint
//! [`AllDifferentConstraint`]: solver::constraints::all_different::AllDifferentConstraint
//! [`InferenceStrategy`]: solver::inference::InferenceStrategy
//! [`DomainLog`]: solver::inference::log::DomainLog
//! [`SearchStrategy`]: solver::search::SearchStrategy

pub mod error;
pub mod problems;
pub mod solver;
