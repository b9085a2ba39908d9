//! Metadata extraction from a loaded unit binary.

use std::path::Path ;
use itertools::Itertools ;
use thiserror::Error ;

use crate::Diagnostics ;
use crate::lifecycle::{ BoxError, EntryPoint };
use crate::unit::{ UnitDescriptor, UnitRecord };



/// A candidate binary that has been loaded but not yet inspected.
pub trait UnitBinary {

	/// Reads the metadata the binary declares.
	///
	/// Returns `Ok( None )` when nothing in the binary carries the metadata marker.
	/// Must not construct the unit's lifecycle.
	///
	/// # Errors
	/// Structural failures while inspecting the binary.
	fn describe( &mut self ) -> Result<Option<UnitDescriptor>, BoxError> ;

	/// Hands over the entry point used later to construct the unit's lifecycle.
	fn into_entry_point( self: Box<Self> ) -> Box<dyn EntryPoint> ;

}

/// Why a binary produced no unit record.
#[derive( Debug, Error )]
pub enum ExtractError {
	/// Nothing in the binary carries the metadata marker.
	#[error( "No export carries unit metadata" )] NoMetadata,
	/// Inspecting the binary failed; treated the same as [`ExtractError::NoMetadata`].
	#[error( "Failed to read unit metadata: {0}" )] Structural( BoxError ),
}

/// Produces at most one [`UnitRecord`] from a loaded binary.
///
/// Failures are logged and returned; neither aborts the surrounding scan.
///
/// # Errors
/// [`ExtractError::NoMetadata`] when the binary carries no marker,
/// [`ExtractError::Structural`] when it could not be inspected.
pub fn extract(
	mut binary: Box<dyn UnitBinary>,
	source: &Path,
	integrity: String,
	diagnostics: &Diagnostics,
) -> Result<UnitRecord, ExtractError> {

	let descriptor = match binary.describe() {
		Ok( Some( descriptor )) => descriptor,
		Ok( None ) => {
			diagnostics.log( crate::LOG_SOURCE, " Failed to load unit (no export carries unit metadata)" );
			return Err( ExtractError::NoMetadata );
		}
		Err( err ) => {
			diagnostics.log( crate::LOG_SOURCE, format!( "{}: {}", source.display(), single_line( &err.to_string() )));
			diagnostics.log( crate::LOG_SOURCE, " Failed to load unit (no export carries unit metadata)" );
			return Err( ExtractError::Structural( err ));
		}
	};

	Ok( UnitRecord::new( descriptor, integrity, source, binary.into_entry_point() ))

}

// Parser errors render a source excerpt over several lines; each would take a ring slot.
fn single_line( message: &str ) -> String {
	message.lines().map( str::trim ).filter(| line | !line.is_empty() ).join( " " )
}
