//! Insertion-ordered collection of discovered units.

use std::collections::HashSet ;
use thiserror::Error ;

use crate::unit::UnitRecord ;



/// A second unit tried to register an identity that is already taken.
///
/// The rejected record is handed back so the caller can report where it came from.
#[derive( Debug, Error )]
#[error( "Identity '{}' is already registered", record.identity() )]
pub struct DuplicateIdentity {
	pub record: UnitRecord,
}

/// Every unit the loader knows about, in discovery order.
///
/// Discovery builds it; afterwards the resolver and the dispatcher own it in
/// turn. Iteration order is insertion order, and that order decides which of
/// several simultaneously satisfiable units starts first.
#[derive( Debug, Default )]
pub struct Registry {
	units: Vec<UnitRecord>,
	identities: HashSet<String>,
}

impl Registry {

	pub fn new() -> Self { Self::default() }

	/// Appends a record.
	///
	/// # Errors
	/// Rejects the record if its identity is already registered; the registry is left unchanged.
	pub fn insert( &mut self, record: UnitRecord ) -> Result<(), DuplicateIdentity> {
		if self.identities.contains( record.identity() ) {
			return Err( DuplicateIdentity { record });
		}
		self.identities.insert( record.identity().to_string() );
		self.units.push( record );
		Ok(())
	}

	pub fn get( &self, identity: &str ) -> Option<&UnitRecord> {
		self.units.iter().find(| unit | unit.identity() == identity )
	}

	pub fn contains( &self, identity: &str ) -> bool { self.identities.contains( identity ) }

	pub fn iter( &self ) -> std::slice::Iter<'_, UnitRecord> { self.units.iter() }

	pub(crate) fn iter_mut( &mut self ) -> std::slice::IterMut<'_, UnitRecord> { self.units.iter_mut() }

	pub(crate) fn units_mut( &mut self ) -> &mut [UnitRecord] { &mut self.units }

	pub fn active( &self ) -> impl Iterator<Item = &UnitRecord> { self.units.iter().filter(| unit | unit.is_active() ) }

	pub fn pending( &self ) -> impl Iterator<Item = &UnitRecord> { self.units.iter().filter(| unit | !unit.is_active() ) }

	pub fn pending_count( &self ) -> usize { self.pending().count() }

	pub fn len( &self ) -> usize { self.units.len() }

	pub fn is_empty( &self ) -> bool { self.units.is_empty() }

}

impl<'a> IntoIterator for &'a Registry {
	type Item = &'a UnitRecord ;
	type IntoIter = std::slice::Iter<'a, UnitRecord> ;
	fn into_iter( self ) -> Self::IntoIter { self.units.iter() }
}
