//! Unit metadata and bookkeeping.
//!
//! A **unit** is one independently loadable extension. Its binary declares a
//! [`UnitDescriptor`] (the metadata marker); discovery turns that into a
//! [`UnitRecord`], which the resolver later activates.

use serde::Deserialize ;
use thiserror::Error ;
use std::path::{ Path, PathBuf };

use crate::lifecycle::{ EntryPoint, Lifecycle };



/// The operating mode a unit declares.
///
/// Carried and displayed only; activation treats both modes the same.
#[derive( Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize )]
#[serde( rename_all = "kebab-case" )]
pub enum UnitMode {
	/// The unit only affects the local client.
	ClientOnly,
	/// The unit must be present on every participant.
	#[default] Multiplayer,
}

impl std::fmt::Display for UnitMode {
	fn fmt( &self, f: &mut std::fmt::Formatter ) -> std::fmt::Result { write!( f, "{:?}", self )}
}

/// Errors produced while reading a unit descriptor.
#[derive( Debug, Error )]
pub enum DescriptorError {
	/// The descriptor text is not valid TOML or is missing required keys.
	#[error( "Malformed descriptor: {0}" )] Malformed( #[from] toml::de::Error ),
	/// The descriptor resolves to an empty identity.
	#[error( "Descriptor for '{0}' has an empty identity" )] EmptyIdentity( String ),
}

/// Metadata a unit declares about itself.
///
/// Only `name`, `author` and `version` are required. The identity defaults to the
/// name with every space replaced by a dot, dependencies default to none and the
/// mode defaults to [`UnitMode::Multiplayer`].
///
/// In a unit binary the descriptor is TOML:
///
/// ```
/// use wasm_modloader::{ UnitDescriptor, UnitMode };
///
/// let descriptor = UnitDescriptor::from_toml( r#"
/// 	name = "Better Maps"
/// 	author = "someone"
/// 	version = "1.2.0"
/// 	dependencies = [ "Core.Lib" ]
/// "# ).unwrap();
///
/// assert_eq!( descriptor.identity(), "Better.Maps" );
/// assert_eq!( descriptor.mode, UnitMode::Multiplayer );
/// ```
#[derive( Debug, Clone, PartialEq, Eq, Deserialize )]
pub struct UnitDescriptor {
	pub name: String,
	pub author: String,
	pub version: String,
	/// Explicit identity, overriding the one derived from `name`.
	#[serde( default )]
	pub identity: Option<String>,
	/// Identities that must be active before this unit may start.
	#[serde( default )]
	pub dependencies: Vec<String>,
	#[serde( default )]
	pub mode: UnitMode,
}

impl UnitDescriptor {

	/// Creates a descriptor with a derived identity, no dependencies and the default mode.
	pub fn new( name: impl Into<String>, author: impl Into<String>, version: impl Into<String> ) -> Self {
		Self {
			name: name.into(),
			author: author.into(),
			version: version.into(),
			identity: None,
			dependencies: Vec::with_capacity( 0 ),
			mode: UnitMode::default(),
		}
	}

	/// Parses and validates a TOML descriptor.
	///
	/// # Errors
	/// Fails if the text is not a valid descriptor or its identity is empty.
	pub fn from_toml( text: &str ) -> Result<Self, DescriptorError> {
		let descriptor: Self = toml::from_str( text )?;
		match descriptor.identity().is_empty() {
			true => Err( DescriptorError::EmptyIdentity( descriptor.name )),
			false => Ok( descriptor ),
		}
	}

	pub fn with_identity( mut self, identity: impl Into<String> ) -> Self {
		self.identity = Some( identity.into() );
		self
	}

	pub fn with_dependencies( mut self, dependencies: impl IntoIterator<Item = impl Into<String>> ) -> Self {
		self.dependencies = dependencies.into_iter().map( Into::into ).collect();
		self
	}

	pub fn with_mode( mut self, mode: UnitMode ) -> Self {
		self.mode = mode ;
		self
	}

	/// The identity other units use to depend on this one. Surrounding whitespace
	/// is never part of it.
	pub fn identity( &self ) -> String {
		match &self.identity {
			Some( identity ) => identity.trim().to_string(),
			None => self.name.trim().replace( ' ', "." ),
		}
	}

}

/// Activation state of a [`UnitRecord`].
///
/// `Pending` holds what is needed to construct the unit; `Active` holds the
/// constructed lifecycle. There is no transition back.
pub enum UnitState {
	Pending( Box<dyn EntryPoint> ),
	Active( Box<dyn Lifecycle> ),
}

/// One discovered unit.
///
/// Created once by the metadata extractor. The resolver is the only component
/// that mutates it, by shrinking the unsatisfied dependency set and flipping the
/// state to [`UnitState::Active`].
pub struct UnitRecord {
	identity: String,
	display_name: String,
	author: String,
	version: String,
	mode: UnitMode,
	dependencies: Vec<String>,
	pub(crate) unsatisfied: Vec<String>,
	integrity: String,
	source: PathBuf,
	pub(crate) state: UnitState,
}

impl UnitRecord {

	/// Builds a pending record from a descriptor.
	///
	/// Repeated dependency identities are collapsed, keeping declaration order.
	pub fn new(
		descriptor: UnitDescriptor,
		integrity: impl Into<String>,
		source: impl Into<PathBuf>,
		entry_point: Box<dyn EntryPoint>,
	) -> Self {
		let identity = descriptor.identity();
		let dependencies = descriptor.dependencies.into_iter().fold( Vec::new(), | mut deps, dep | {
			if !deps.contains( &dep ) { deps.push( dep ) }
			deps
		});
		Self {
			identity,
			display_name: descriptor.name,
			author: descriptor.author,
			version: descriptor.version,
			mode: descriptor.mode,
			unsatisfied: dependencies.clone(),
			dependencies,
			integrity: integrity.into(),
			source: source.into(),
			state: UnitState::Pending( entry_point ),
		}
	}

	#[inline] pub fn identity( &self ) -> &str { &self.identity }
	#[inline] pub fn display_name( &self ) -> &str { &self.display_name }
	#[inline] pub fn author( &self ) -> &str { &self.author }
	#[inline] pub fn version( &self ) -> &str { &self.version }
	#[inline] pub fn mode( &self ) -> UnitMode { self.mode }

	/// Every dependency the unit declared, in declaration order.
	#[inline] pub fn dependencies( &self ) -> &[String] { &self.dependencies }

	/// Declared dependencies that are not active yet, in declaration order.
	#[inline] pub fn unsatisfied_dependencies( &self ) -> &[String] { &self.unsatisfied }

	/// Lower-case hex SHA-256 of the binary the unit was loaded from.
	#[inline] pub fn integrity( &self ) -> &str { &self.integrity }

	/// Path of the binary the unit was loaded from.
	#[inline] pub fn source( &self ) -> &Path { &self.source }

	#[inline] pub fn is_active( &self ) -> bool { matches!( self.state, UnitState::Active( _ )) }

	pub(crate) fn lifecycle_mut( &mut self ) -> Option<&mut Box<dyn Lifecycle>> {
		match &mut self.state {
			UnitState::Active( lifecycle ) => Some( lifecycle ),
			UnitState::Pending( _ ) => None,
		}
	}

}

impl std::fmt::Debug for UnitRecord {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		f.debug_struct( "UnitRecord" )
			.field( "identity", &self.identity )
			.field( "display_name", &self.display_name )
			.field( "author", &self.author )
			.field( "version", &self.version )
			.field( "mode", &self.mode )
			.field( "dependencies", &self.dependencies )
			.field( "unsatisfied", &self.unsatisfied )
			.field( "integrity", &self.integrity )
			.field( "source", &self.source )
			.field( "active", &self.is_active() )
			.finish_non_exhaustive()
	}
}
