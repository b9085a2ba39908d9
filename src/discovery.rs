//! Discovery of unit binaries on disk.
//!
//! The scanner enumerates the unit directory, then the optional autoload
//! binary, and runs the metadata extractor on each candidate. It performs no
//! dependency checks and constructs nothing; the resulting [`Registry`] is handed
//! to the resolver.

use std::ffi::OsStr ;
use std::path::{ Path, PathBuf };
use itertools::Itertools ;
use thiserror::Error ;

use crate::{ Diagnostics, Registry, PartialSuccess };
use crate::extractor::{ extract, ExtractError, UnitBinary };
use crate::integrity::integrity_tag ;
use crate::lifecycle::BoxError ;
use crate::unit::UnitRecord ;



/// Turns candidate files into [`UnitBinary`] values.
pub trait BinaryLoader {

	/// File extension, without the dot, of the binaries this loader accepts.
	fn extension( &self ) -> &str ;

	/// Loads a candidate binary from its bytes.
	///
	/// # Errors
	/// Any failure that prevents the binary from being inspected, including
	/// dependency binaries that cannot be resolved.
	fn load( &mut self, path: &Path, bytes: &[u8] ) -> Result<Box<dyn UnitBinary>, BoxError> ;

}

/// The unit directory itself could not be read.
///
/// This is the only failure that stops a scan.
#[derive( Debug, Error )]
#[error( "Failed to read unit directory {}: {source}", path.display() )]
pub struct ScanError {
	pub path: PathBuf,
	pub source: std::io::Error,
}

/// A single candidate that produced no unit. The scan carries on without it.
#[derive( Debug, Error )]
pub enum DiscoveryError {
	/// The candidate file could not be read.
	#[error( "Failed to read {}: {source}", path.display() )]
	Read { path: PathBuf, source: std::io::Error },
	/// The loader rejected the candidate.
	#[error( "Failed to load {}: {error}", path.display() )]
	Load { path: PathBuf, error: BoxError },
	/// The candidate carries no usable metadata.
	#[error( "{}: {error}", path.display() )]
	Extract { path: PathBuf, error: ExtractError },
	/// The candidate declares an identity another unit already registered.
	#[error( "{}: unit '{identity}' is already registered", path.display() )]
	DuplicateIdentity { path: PathBuf, identity: String },
}

/// Builds the registry from `units_dir` and, if it exists, the `autoload` binary.
///
/// Every file directly inside `units_dir` whose extension matches
/// [`BinaryLoader::extension`] is a candidate, in filesystem enumeration order.
/// The autoload binary is processed last.
///
/// # Partial Success
/// Candidates that fail are logged, skipped and returned alongside the registry.
///
/// # Errors
/// Returns [`ScanError`] only if `units_dir` cannot be read.
pub fn discover(
	loader: &mut dyn BinaryLoader,
	units_dir: &Path,
	autoload: Option<&Path>,
	diagnostics: &Diagnostics,
) -> Result<PartialSuccess<Registry, DiscoveryError>, ScanError> {

	let extension = loader.extension().to_string();
	let entries = std::fs::read_dir( units_dir )
		.map_err(| source | ScanError { path: units_dir.to_path_buf(), source })?
		.map(| entry | entry.map(| entry | entry.path() ));
	let ( paths, mut errors ) = readable_entries( entries, units_dir, diagnostics );
	let candidates = paths.into_iter()
		.filter(| path | path.is_file() && path.extension().and_then( OsStr::to_str ) == Some( extension.as_str() ))
		.chain( autoload.filter(| path | path.is_file() ).map( Path::to_path_buf ))
		.collect::<Vec<_>>();

	let mut registry = Registry::new();
	errors.extend( candidates.into_iter()
		.map(| path | preload( loader, &path, diagnostics )
			.and_then(| record | registry.insert( record ).map_err(| duplicate | DiscoveryError::DuplicateIdentity {
				identity: duplicate.record.identity().to_string(),
				path: path.clone(),
			}))
			.inspect_err(| err | if !matches!( err, DiscoveryError::Extract { .. }) {
				diagnostics.log( crate::LOG_SOURCE, format!( " Failed to load unit ({})", err ));
			})
		)
		.filter_map( Result::err ));

	Ok(( registry, errors ))

}

/// Splits directory entries into paths and the entries that could not be read.
/// Unreadable entries are reported against the directory itself.
fn readable_entries(
	entries: impl IntoIterator<Item = std::io::Result<PathBuf>>,
	units_dir: &Path,
	diagnostics: &Diagnostics,
) -> PartialSuccess<Vec<PathBuf>, DiscoveryError> {
	let ( paths, errors ): ( Vec<_>, Vec<_> ) = entries.into_iter().partition_result();
	let errors = errors.into_iter()
		.map(| source | DiscoveryError::Read { path: units_dir.to_path_buf(), source })
		.inspect(| err | diagnostics.log( crate::LOG_SOURCE, format!( " Failed to load unit ({})", err )))
		.collect();
	( paths, errors )
}

fn preload(
	loader: &mut dyn BinaryLoader,
	path: &Path,
	diagnostics: &Diagnostics,
) -> Result<UnitRecord, DiscoveryError> {

	let file_name = path.file_name().map_or_else(|| path.display().to_string(), | name | name.to_string_lossy().into_owned() );
	diagnostics.log( crate::LOG_SOURCE, format!( "Loading file {}", file_name ));

	let bytes = std::fs::read( path ).map_err(| source | DiscoveryError::Read { path: path.to_path_buf(), source })?;
	let integrity = integrity_tag( &bytes );
	let binary = loader.load( path, &bytes ).map_err(| error | DiscoveryError::Load { path: path.to_path_buf(), error })?;

	extract( binary, path, integrity, diagnostics )
		.map_err(| error | DiscoveryError::Extract { path: path.to_path_buf(), error })

}
