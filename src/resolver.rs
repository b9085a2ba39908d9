//! Dependency resolution and activation.
//!
//! Resolution relaxes the registry in repeated passes instead of building an
//! explicit graph. Each pass walks the registry in insertion order and activates
//! every pending unit whose dependencies are all active. Activating a unit
//! removes its identity from every other pending unit's unsatisfied set straight
//! away, so a unit later in the same pass can start in that pass too.
//!
//! A pass that activates nothing is the fixpoint: whatever is still pending
//! with unsatisfied dependencies can never start. Missing dependencies and
//! dependency cycles both end up there and are reported the same way.

use std::collections::HashSet ;
use itertools::Itertools ;
use thiserror::Error ;

use crate::{ Diagnostics, Registry };
use crate::lifecycle::ActivationError ;
use crate::unit::{ UnitRecord, UnitState };



/// A unit whose activation failed. It stays pending.
#[derive( Debug, Error )]
#[error( "{identity}: {error}" )]
pub struct ActivationFailure {
	pub identity: String,
	pub error: ActivationError,
}

/// A unit left pending at the fixpoint because some declared dependencies never became active.
#[derive( Debug, Clone, PartialEq, Eq )]
pub struct UnsatisfiedUnit {
	pub identity: String,
	/// Never empty, in declaration order.
	pub missing: Vec<String>,
}

/// What a call to [`resolve`] did.
#[derive( Debug, Default )]
pub struct ResolutionReport {
	/// Number of passes run, including the final pass that made no progress.
	pub passes: usize,
	/// Identities started during this resolution, in start order.
	pub activated: Vec<String>,
	/// Units with satisfied dependencies that could not be activated.
	pub failed: Vec<ActivationFailure>,
	/// Units that can never be activated with the current registry.
	pub unsatisfied: Vec<UnsatisfiedUnit>,
}

impl ResolutionReport {
	/// Whether every pending unit was activated.
	pub fn is_complete( &self ) -> bool { self.failed.is_empty() && self.unsatisfied.is_empty() }
}

/// Activates every unit in `registry` that can be activated.
///
/// Each activated unit is instantiated through its entry point and its `start`
/// hook is called exactly once. Units already active are left alone, so running
/// this on a fully active registry runs no passes and starts nothing.
///
/// A unit whose activation fails stays pending and is not retried by later passes
/// of the same call; it is attempted again by the next call. Nothing a pass
/// activates can fix a failing unit, so skipping it leaves the outcome unchanged
/// and each failure is logged once per call rather than once per pass.
///
/// Always terminates: the loop stops as soon as a pass leaves the number of
/// pending units unchanged, so at most one pass per pending unit plus one.
pub fn resolve( registry: &mut Registry, diagnostics: &Diagnostics ) -> ResolutionReport {

	let mut report = ResolutionReport::default();
	let mut failed = HashSet::new();

	prune_active_dependencies( registry );

	let mut remaining = registry.pending_count();
	while remaining > 0 {

		report.passes += 1 ;

		for index in 0..registry.len() {

			let unit = &mut registry.units_mut()[ index ];
			if unit.is_active() || !unit.unsatisfied.is_empty() || failed.contains( &index ) { continue }

			match activate( unit, diagnostics ) {
				Ok(()) => {
					let identity = unit.identity().to_string();
					satisfy( registry, &identity );
					report.activated.push( identity );
				}
				Err( error ) => {
					diagnostics.log( crate::LOG_SOURCE, format!( " Failed to load unit ({})", error ));
					failed.insert( index );
					report.failed.push( ActivationFailure { identity: unit.identity().to_string(), error });
				}
			}

		}

		let pending = registry.pending_count();
		if pending == remaining {
			report.unsatisfied = registry.pending()
				.filter(| unit | !unit.unsatisfied.is_empty() )
				.map(| unit | UnsatisfiedUnit { identity: unit.identity().to_string(), missing: unit.unsatisfied.clone() })
				.collect();
			log_unsatisfied( &report.unsatisfied, diagnostics );
			break ;
		}
		remaining = pending ;

	}

	tracing::debug!(
		target: "modloader",
		passes = report.passes,
		activated = %report.activated.iter().join( ", " ),
		"resolution finished"
	);

	report

}

fn activate( unit: &mut UnitRecord, diagnostics: &Diagnostics ) -> Result<(), ActivationError> {

	let UnitState::Pending( entry_point ) = &unit.state else { return Ok(()) };

	diagnostics.log( crate::LOG_SOURCE, format!(
		"Loading unit {} {} ({}) - {}",
		unit.display_name(), unit.version(), unit.identity(), unit.mode(),
	));

	let mut lifecycle = entry_point.instantiate()?;
	lifecycle.start().map_err( ActivationError::Start )?;
	unit.state = UnitState::Active( lifecycle );
	Ok(())

}

fn satisfy( registry: &mut Registry, identity: &str ) {
	registry.iter_mut()
		.filter(| unit | !unit.is_active() )
		.for_each(| unit | unit.unsatisfied.retain(| dependency | dependency != identity ));
}

/// Records inserted after an earlier resolution may depend on units that are already active.
fn prune_active_dependencies( registry: &mut Registry ) {
	let active = registry.active().map(| unit | unit.identity().to_string() ).collect::<HashSet<_>>();
	registry.iter_mut()
		.filter(| unit | !unit.is_active() )
		.for_each(| unit | unit.unsatisfied.retain(| dependency | !active.contains( dependency )));
}

fn log_unsatisfied( unsatisfied: &[UnsatisfiedUnit], diagnostics: &Diagnostics ) {
	if unsatisfied.is_empty() { return }
	diagnostics.log( crate::LOG_SOURCE, "Some units could not be loaded, because they are missing a dependency:" );
	unsatisfied.iter().for_each(| unit | {
		diagnostics.log( crate::LOG_SOURCE, format!( " Missing deps in unit {}:", unit.identity ));
		unit.missing.iter().for_each(| dependency | diagnostics.log( crate::LOG_SOURCE, format!( "  {}", dependency )));
	});
}
