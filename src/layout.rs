//! On-disk layout of the loader directory.
//!
//! ```text
//! <root>/
//! 	mods/           unit binaries, scanned non-recursively
//! 	deps/           dependency binaries supplied to units on request
//! 	autoload.wasm   optional unit loaded after the scan
//! 	config          flat key=value options
//! 	log             diagnostics log file
//! ```

use std::path::{ Path, PathBuf };

use crate::config::DEFAULT_CONFIG ;



/// Paths the loader reads from and writes to, all under one root directory.
#[derive( Debug, Clone, PartialEq, Eq )]
pub struct LoaderLayout {
	root: PathBuf,
}

impl LoaderLayout {

	pub const UNITS_DIR: &'static str = "mods" ;
	pub const DEPS_DIR: &'static str = "deps" ;
	pub const AUTOLOAD: &'static str = "autoload.wasm" ;
	pub const CONFIG: &'static str = "config" ;
	pub const LOG: &'static str = "log" ;

	pub fn new( root: impl Into<PathBuf> ) -> Self {
		Self { root: root.into() }
	}

	#[inline] pub fn root( &self ) -> &Path { &self.root }
	#[inline] pub fn units_dir( &self ) -> PathBuf { self.root.join( Self::UNITS_DIR ) }
	#[inline] pub fn deps_dir( &self ) -> PathBuf { self.root.join( Self::DEPS_DIR ) }
	#[inline] pub fn autoload( &self ) -> PathBuf { self.root.join( Self::AUTOLOAD ) }
	#[inline] pub fn config( &self ) -> PathBuf { self.root.join( Self::CONFIG ) }
	#[inline] pub fn log( &self ) -> PathBuf { self.root.join( Self::LOG ) }

	/// Creates any missing directory and writes the default config if there is none.
	///
	/// # Errors
	/// Propagates filesystem errors.
	pub fn prepare( &self ) -> std::io::Result<()> {
		std::fs::create_dir_all( self.units_dir() )?;
		std::fs::create_dir_all( self.deps_dir() )?;
		let config = self.config();
		if !config.exists() { std::fs::write( config, DEFAULT_CONFIG )?; }
		Ok(())
	}

}
