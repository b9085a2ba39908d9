//! The loader context driven by the host application.
//!
//! [`ModLoader`] is constructed explicitly and owned by the host. The host calls
//! [`ModLoader::init`] once from its initialisation callback, then forwards its
//! tick callbacks. Nothing here runs on its own thread or suspends.

use thiserror::Error ;

use crate::{ Diagnostics, Registry, UnitRecord };
use crate::config::{ ConfigWarning, LoaderConfig, CONFIG_LOG_SOURCE };
use crate::discovery::{ discover, BinaryLoader, DiscoveryError, ScanError };
use crate::dispatcher ;
use crate::layout::LoaderLayout ;
use crate::lifecycle::HookFailure ;
use crate::resolver::{ resolve, ResolutionReport };
use crate::wasm::{ DepsDirResolver, WasmBinaryLoader };



/// Source tag used for host log events mirrored into diagnostics.
pub const HOST_LOG_SOURCE: &str = "Host" ;

/// Failures that stop [`ModLoader::init`].
///
/// Everything else, from unreadable candidates to unsatisfiable dependencies,
/// is logged and reported in [`InitReport`] instead.
#[derive( Debug, Error )]
pub enum LoaderError {
	/// The loader directory or its config file could not be prepared or read.
	#[error( "Failed to prepare loader directory: {0}" )] Layout( #[from] std::io::Error ),
	/// The unit directory could not be read.
	#[error( transparent )] Scan( #[from] ScanError ),
	/// [`ModLoader::init`] was called a second time.
	#[error( "Loader is already initialised" )] AlreadyInitialised,
}

/// Everything [`ModLoader::init`] recovered from.
#[derive( Debug )]
pub struct InitReport {
	pub config_warnings: Vec<ConfigWarning>,
	pub discovery_errors: Vec<DiscoveryError>,
	pub resolution: ResolutionReport,
}

/// The loader context.
///
/// Owns the registry for the lifetime of the process. Units are discovered and
/// activated by [`init`]( Self::init ); every later call only forwards host events.
pub struct ModLoader {
	layout: LoaderLayout,
	config: LoaderConfig,
	diagnostics: Diagnostics,
	binaries: Box<dyn BinaryLoader>,
	registry: Registry,
	initialised: bool,
	shut_down: bool,
}

impl ModLoader {

	/// Creates a loader over `layout` that loads candidates with `binaries`.
	///
	/// `diagnostics` should be the same handle the binary loader writes to.
	pub fn new( layout: LoaderLayout, diagnostics: Diagnostics, binaries: impl BinaryLoader + 'static ) -> Self {
		Self {
			layout,
			config: LoaderConfig::default(),
			diagnostics,
			binaries: Box::new( binaries ),
			registry: Registry::new(),
			initialised: false,
			shut_down: false,
		}
	}

	/// Creates a loader for WebAssembly units with a default engine, resolving
	/// dependency binaries from the layout's `deps` directory.
	///
	/// # Errors
	/// Fails if the host imports cannot be registered with the linker.
	pub fn wasm( layout: LoaderLayout ) -> Result<Self, wasmtime::Error> {
		let diagnostics = Diagnostics::new();
		let engine = wasmtime::Engine::default();
		let binaries = WasmBinaryLoader::new( &engine, DepsDirResolver::new( layout.deps_dir() ), diagnostics.clone() )?;
		Ok( Self::new( layout, diagnostics, binaries ))
	}

	/// One-time initialisation: prepares the loader directory, applies the config,
	/// discovers every unit and activates those whose dependencies can be met.
	///
	/// # Errors
	/// Only fails if the loader directory cannot be prepared, the unit directory
	/// cannot be read, or the loader was already initialised. Partial success is
	/// the normal degraded mode and is described by the returned [`InitReport`].
	pub fn init( &mut self ) -> Result<InitReport, LoaderError> {

		if self.initialised { return Err( LoaderError::AlreadyInitialised ) }

		self.layout.prepare()?;
		let ( config, config_warnings ) = LoaderConfig::parse( &std::fs::read_to_string( self.layout.config() )?);
		self.config = config ;

		self.diagnostics.set_console( config.console );
		if config.console { self.diagnostics.log( crate::LOG_SOURCE, "Initialized console" ); }
		if config.log_file {
			if let Err( err ) = self.diagnostics.start_log_file( self.layout.log() ) {
				self.diagnostics.log( crate::LOG_SOURCE, format!( "Failed to open log file: {}", err ));
			}
		}
		config_warnings.iter().for_each(| warning | self.diagnostics.log( CONFIG_LOG_SOURCE, format!( "[ERR] {}", warning )));

		self.diagnostics.log( crate::LOG_SOURCE, "Preloading units.." );
		let autoload = self.layout.autoload();
		let ( registry, discovery_errors ) = discover(
			self.binaries.as_mut(),
			&self.layout.units_dir(),
			Some( &autoload ),
			&self.diagnostics,
		)?;
		self.registry = registry ;
		self.initialised = true ;

		self.diagnostics.log( crate::LOG_SOURCE, "Loading units.." );
		let resolution = resolve( &mut self.registry, &self.diagnostics );
		self.diagnostics.log( crate::LOG_SOURCE, "Loaded all units" );

		Ok( InitReport { config_warnings, discovery_errors, resolution })

	}

	/// Per-frame host tick.
	pub fn update( &mut self, delta_time: f32 ) -> Vec<HookFailure> {
		if !self.running() { return Vec::with_capacity( 0 ) }
		dispatcher::update( &mut self.registry, delta_time, &self.diagnostics )
	}

	/// Per-physics-step host tick.
	pub fn fixed_update( &mut self, fixed_delta_time: f32 ) -> Vec<HookFailure> {
		if !self.running() { return Vec::with_capacity( 0 ) }
		dispatcher::fixed_update( &mut self.registry, fixed_delta_time, &self.diagnostics )
	}

	/// Per-frame overlay callback, called after the updates.
	pub fn render_overlay( &mut self ) -> Vec<HookFailure> {
		if !self.running() { return Vec::with_capacity( 0 ) }
		dispatcher::render_overlay( &mut self.registry, &self.diagnostics )
	}

	/// Host termination. Active units are notified exactly once; every later
	/// call, and every tick after it, does nothing.
	pub fn shutdown( &mut self ) -> Vec<HookFailure> {
		if !self.running() { return Vec::with_capacity( 0 ) }
		self.shut_down = true ;
		dispatcher::shutdown( &mut self.registry, &self.diagnostics )
	}

	/// Mirrors a host log event into diagnostics when `unitylog` is enabled.
	pub fn host_log( &self, message: &str ) {
		if self.config.host_log { self.diagnostics.log( HOST_LOG_SOURCE, message ); }
	}

	/// Handles one line from the debug command channel.
	///
	/// The line is logged to the overlay only and its whitespace-separated tokens
	/// are returned. Commands have no further effect.
	pub fn command( &self, line: &str ) -> Vec<String> {
		let line = line.replace( '\n', "" );
		self.diagnostics.log_in_game( crate::LOG_SOURCE, format!( "Command: {}", line ));
		line.split_whitespace().map( String::from ).collect()
	}

	#[inline] pub fn registry( &self ) -> &Registry { &self.registry }
	#[inline] pub fn units( &self ) -> std::slice::Iter<'_, UnitRecord> { self.registry.iter() }
	#[inline] pub fn diagnostics( &self ) -> &Diagnostics { &self.diagnostics }
	#[inline] pub fn config( &self ) -> LoaderConfig { self.config }
	#[inline] pub fn layout( &self ) -> &LoaderLayout { &self.layout }

	fn running( &self ) -> bool { self.initialised && !self.shut_down }

}

impl std::fmt::Debug for ModLoader {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		f.debug_struct( "ModLoader" )
			.field( "layout", &self.layout )
			.field( "config", &self.config )
			.field( "registry", &self.registry )
			.field( "initialised", &self.initialised )
			.field( "shut_down", &self.shut_down )
			.finish_non_exhaustive()
	}
}
