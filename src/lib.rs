//! A runtime mod loader for host applications with a frame loop.
//!
//! At start-up the loader scans a directory of unit binaries, reads the metadata
//! each one declares, activates units once the units they depend on are active,
//! and from then on forwards the host's per-frame callbacks to every active unit.
//!
//! # Core Concepts
//!
//! - **Unit**: One independently loadable extension. Its binary carries a
//! 	[`UnitDescriptor`] naming it, listing the identities it depends on, and
//! 	providing an [`EntryPoint`] that constructs its [`Lifecycle`].
//!
//! - [`Registry`]: Every discovered unit, in discovery order. Each [`UnitRecord`]
//! 	is either pending or active and only ever moves from pending to active.
//!
//! - **Discovery** ([`discovery::discover`]): Enumerates the unit directory,
//! 	hands each candidate to a [`BinaryLoader`] and extracts at most one record
//! 	from it. Nothing is constructed at this stage.
//!
//! - **Resolution** ([`resolver::resolve`]): Activates pending units in repeated
//! 	passes until a pass makes no progress. Units left over are reported along
//! 	with the identities they are missing; cycles are reported the same way.
//!
//! - **Dispatch** ([`dispatcher`]): Forwards `update`, `fixed_update`,
//! 	`render_overlay` and `on_shutdown` to active units. A failing unit is
//! 	logged and never stops the others.
//!
//! - [`Diagnostics`]: An in-memory ring of the last [`RETAINED_LINES`] log lines,
//! 	optionally mirrored to a `tracing` console stream and a log file.
//!
//! [`ModLoader`] ties these together behind the host callbacks. Units are
//! WebAssembly components by default (see [`wasm`]); any other format can be
//! plugged in by implementing [`BinaryLoader`].
//!
//! # Example
//!
//! The resolver and dispatcher work on any [`EntryPoint`], so units can also be
//! registered directly from Rust:
//!
//! ```
//! use wasm_modloader::{ Diagnostics, Registry, UnitDescriptor, UnitRecord };
//! use wasm_modloader::{ ActivationError, BoxError, EntryPoint, Lifecycle };
//! use wasm_modloader::{ dispatcher, resolver };
//!
//! struct Counter( u32 );
//!
//! impl Lifecycle for Counter {
//! 	fn start( &mut self ) -> Result<(), BoxError> { Ok(()) }
//! 	fn update( &mut self, _delta_time: f32 ) -> Result<(), BoxError> { self.0 += 1 ; Ok(()) }
//! 	fn fixed_update( &mut self, _fixed_delta_time: f32 ) -> Result<(), BoxError> { Ok(()) }
//! 	fn render_overlay( &mut self ) -> Result<(), BoxError> { Ok(()) }
//! 	fn on_shutdown( &mut self ) -> Result<(), BoxError> { Ok(()) }
//! }
//!
//! struct CounterEntry ;
//!
//! impl EntryPoint for CounterEntry {
//! 	fn instantiate( &self ) -> Result<Box<dyn Lifecycle>, ActivationError> {
//! 		Ok( Box::new( Counter( 0 )))
//! 	}
//! }
//!
//! let diagnostics = Diagnostics::new();
//! let mut registry = Registry::new();
//!
//! // Inserted before its dependency, so it starts one pass later.
//! registry.insert( UnitRecord::new(
//! 	UnitDescriptor::new( "Map Overlay", "someone", "0.3.0" ).with_dependencies([ "Core.Lib" ]),
//! 	"", "overlay.wasm", Box::new( CounterEntry ),
//! ))?;
//! registry.insert( UnitRecord::new(
//! 	UnitDescriptor::new( "Core Lib", "someone", "1.0.0" ),
//! 	"", "core.wasm", Box::new( CounterEntry ),
//! ))?;
//!
//! let report = resolver::resolve( &mut registry, &diagnostics );
//! assert_eq!( report.activated, vec![ "Core.Lib", "Map.Overlay" ]);
//! assert!( report.is_complete() );
//!
//! let failures = dispatcher::update( &mut registry, 0.016, &diagnostics );
//! assert!( failures.is_empty() );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! With the WebAssembly backend, the whole start-up sequence is one call:
//!
//! ```no_run
//! use wasm_modloader::{ LoaderLayout, ModLoader };
//!
//! # fn main() -> wasmtime::Result<()> {
//! let mut loader = ModLoader::wasm( LoaderLayout::new( "modloader" ))?;
//! let report = loader.init()?;
//! for unit in &report.resolution.unsatisfied {
//! 	eprintln!( "{} is missing {:?}", unit.identity, unit.missing );
//! }
//!
//! // Inside the host's frame loop:
//! loader.update( 0.016 );
//! loader.fixed_update( 0.02 );
//! loader.render_overlay();
//!
//! // When the host quits:
//! loader.shutdown();
//! # Ok(())
//! # }
//! ```

mod integrity ;
mod lifecycle ;
mod registry ;
mod unit ;
mod diagnostics ;
mod extractor ;
mod layout ;
mod loader ;
pub mod config ;
pub mod discovery ;
pub mod dispatcher ;
pub mod resolver ;
pub mod wasm ;

#[doc( no_inline )]
pub use wasmtime::Engine ;
#[doc( no_inline )]
pub use wasmtime::component::{ Component, Linker };

pub use diagnostics::{ Diagnostics, RETAINED_LINES };
pub use discovery::{ BinaryLoader, DiscoveryError, ScanError };
pub use extractor::{ extract, ExtractError, UnitBinary };
pub use integrity::integrity_tag ;
pub use layout::LoaderLayout ;
pub use lifecycle::{ Lifecycle, EntryPoint, ActivationError, BoxError, Hook, HookFailure };
pub use loader::{ ModLoader, LoaderError, InitReport, HOST_LOG_SOURCE };
pub use registry::{ Registry, DuplicateIdentity };
pub use resolver::{ ResolutionReport, ActivationFailure, UnsatisfiedUnit };
pub use unit::{ UnitDescriptor, UnitMode, UnitRecord, UnitState, DescriptorError };

/// Source tag used for the loader's own diagnostics.
pub const LOG_SOURCE: &str = "Loader" ;

/// The value of an operation where some parts failed without preventing the rest.
/// The `Vec<E>` holds the errors from the parts that were skipped.
pub type PartialSuccess<T, E> = ( T, Vec<E> );
