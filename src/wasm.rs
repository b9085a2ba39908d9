//! WebAssembly backend.
//!
//! A unit is a WASM component. It is discoverable when it exports the
//! [`METADATA_INTERFACE`] instance, whose `describe` function returns the unit's
//! TOML descriptor, and activatable when it also exports the
//! [`LIFECYCLE_INTERFACE`] instance:
//!
//! ```wit
//! package modloader:unit;
//!
//! interface metadata {
//! 	describe: func() -> string;
//! }
//!
//! interface lifecycle {
//! 	start: func();
//! 	update: func(delta: f32);
//! 	fixed-update: func(step: f32);
//! 	render-overlay: func();
//! 	on-shutdown: func();
//! }
//! ```
//!
//! Units may import [`HOST_LOG_INTERFACE`] to write to the loader's diagnostics.
//! Any other import is treated as a dependency binary and requested from the
//! [`ModuleResolver`] by its package name; see [`library_name`].

mod binary_loader ;
mod library ;
mod lifecycle ;
mod resolver ;
mod unit_binary ;

pub use binary_loader::WasmBinaryLoader ;
pub use lifecycle::WasmLifecycle ;
pub use resolver::{ ModuleResolver, DepsDirResolver, library_name };
pub use unit_binary::{ WasmBinary, WasmEntryPoint };

use thiserror::Error ;
use wasmtime::Store ;
use wasmtime::component::{ ComponentNamedList, Instance, Lift, Lower, TypedFunc };

use crate::Diagnostics ;
use crate::unit::DescriptorError ;



/// Exported instance carrying a unit's metadata.
pub const METADATA_INTERFACE: &str = "modloader:unit/metadata" ;

/// Exported instance carrying a unit's lifecycle hooks.
pub const LIFECYCLE_INTERFACE: &str = "modloader:unit/lifecycle" ;

/// Host-provided instance with a `log: func(message: string)` function.
pub const HOST_LOG_INTERFACE: &str = "modloader:host/log" ;

/// Errors raised by the WebAssembly backend.
#[derive( Debug, Error )]
pub enum WasmUnitError {
	/// The candidate is neither a valid component binary nor valid component text.
	#[error( "Failed to compile component: {0}" )] Compile( wasmtime::Error ),
	/// The component imports something other than an instance of functions.
	#[error( "Unsupported import {0}: dependency binaries can only supply functions" )] UnsupportedImport( String ),
	/// No dependency binary exists for the import.
	#[error( "Dependency binary '{0}' not found" )] LibraryNotFound( String ),
	/// The resolver failed while looking for a dependency binary.
	#[error( "Failed to resolve dependency binary '{name}': {error}" )] Resolve { name: String, error: wasmtime::Error },
	/// Dependency binaries import each other in a loop.
	#[error( "Dependency binaries form a loop: {}", .0.join( " -> " ))] LibraryLoop( Vec<String> ),
	/// A forwarded function could not be added to the linker.
	#[error( "Failed to link {name}: {error}" )] Link { name: String, error: wasmtime::Error },
	/// The component could not be instantiated.
	#[error( "Failed to instantiate component: {0}" )] Instantiate( wasmtime::Error ),
	/// An exported function is missing or has the wrong signature.
	#[error( "Missing or mistyped export {0}" )] MissingExport( String ),
	/// A call into the component trapped or failed.
	#[error( "Call to {name} failed: {error}" )] Call { name: String, error: wasmtime::Error },
	/// The descriptor returned by `describe` is invalid.
	#[error( "Invalid unit descriptor: {0}" )] Descriptor( #[from] DescriptorError ),
}

/// Data held by every store the backend creates.
///
/// `tag` is the diagnostics source used when the component calls the host log.
#[derive( Debug, Clone )]
pub struct UnitStore {
	tag: String,
	diagnostics: Diagnostics,
}

impl UnitStore {

	pub fn new( tag: impl Into<String>, diagnostics: Diagnostics ) -> Self {
		Self { tag: tag.into(), diagnostics }
	}

	#[inline] pub fn tag( &self ) -> &str { &self.tag }
	#[inline] pub fn diagnostics( &self ) -> &Diagnostics { &self.diagnostics }

}

/// Looks up `interface#function` on an instance as a typed function.
///
/// Returns `None` if either export is missing or the signature does not match.
fn typed_export<Params, Results>(
	instance: &Instance,
	store: &mut Store<UnitStore>,
	interface: &str,
	function: &str,
) -> Option<TypedFunc<Params, Results>>
where
	Params: ComponentNamedList + Lower,
	Results: ComponentNamedList + Lift,
{
	let interface_index = instance.get_export_index( &mut *store, None, interface )?;
	let function_index = instance.get_export_index( &mut *store, Some( &interface_index ), function )?;
	instance.get_typed_func::<Params, Results>( &mut *store, function_index ).ok()
}
