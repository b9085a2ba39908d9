use wasmtime::{ Engine, Store };
use wasmtime::component::{ Component, Linker };

use crate::{ Diagnostics, UnitDescriptor };
use crate::extractor::UnitBinary ;
use crate::lifecycle::{ ActivationError, BoxError, EntryPoint, Lifecycle };
use super::{ typed_export, UnitStore, WasmLifecycle, WasmUnitError, LIFECYCLE_INTERFACE, METADATA_INTERFACE };



/// A compiled unit component with its imports linked.
pub struct WasmBinary {
	engine: Engine,
	component: Component,
	linker: Linker<UnitStore>,
	tag: String,
	diagnostics: Diagnostics,
}

impl WasmBinary {

	pub(super) fn new(
		engine: Engine,
		component: Component,
		linker: Linker<UnitStore>,
		tag: String,
		diagnostics: Diagnostics,
	) -> Self {
		Self { engine, component, linker, tag, diagnostics }
	}

	/// Whether the component's type declares the named export, checked without
	/// instantiating it.
	pub fn declares_export( &self, name: &str ) -> bool {
		self.component.component_type()
			.exports( &self.engine )
			.any(|( export, _ )| export == name )
	}

	fn store( &self ) -> Store<UnitStore> {
		Store::new( &self.engine, UnitStore::new( self.tag.clone(), self.diagnostics.clone() ))
	}

}

impl UnitBinary for WasmBinary {

	fn describe( &mut self ) -> Result<Option<UnitDescriptor>, BoxError> {

		if !self.declares_export( METADATA_INTERFACE ) { return Ok( None ) }

		// Throwaway instance; the lifecycle gets a fresh one at activation.
		let mut store = self.store();
		let instance = self.linker.instantiate( &mut store, &self.component ).map_err( WasmUnitError::Instantiate )?;
		let describe = typed_export::<(), ( String, )>( &instance, &mut store, METADATA_INTERFACE, "describe" )
			.ok_or_else(|| WasmUnitError::MissingExport( format!( "{}#describe", METADATA_INTERFACE )))?;

		let call_error = | error | WasmUnitError::Call { name: "describe".to_string(), error };
		let ( manifest, ) = describe.call( &mut store, () ).map_err( call_error )?;
		describe.post_return( &mut store ).map_err( call_error )?;

		Ok( Some( UnitDescriptor::from_toml( &manifest ).map_err( WasmUnitError::Descriptor )? ))

	}

	fn into_entry_point( self: Box<Self> ) -> Box<dyn EntryPoint> {
		Box::new( WasmEntryPoint { binary: *self })
	}

}

/// Constructs a [`WasmLifecycle`] from a fresh instance of the unit.
pub struct WasmEntryPoint {
	binary: WasmBinary,
}

impl EntryPoint for WasmEntryPoint {
	fn instantiate( &self ) -> Result<Box<dyn Lifecycle>, ActivationError> {

		let binary = &self.binary ;
		if !binary.declares_export( LIFECYCLE_INTERFACE ) {
			return Err( ActivationError::NotALifecycle( format!( "no {} export", LIFECYCLE_INTERFACE )));
		}

		let mut store = binary.store();
		let instance = binary.linker.instantiate( &mut store, &binary.component )
			.map_err(| error | ActivationError::Construction( Box::new( WasmUnitError::Instantiate( error ))))?;

		Ok( Box::new( WasmLifecycle::bind( store, &instance )? ))

	}
}

impl std::fmt::Debug for WasmBinary {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		f.debug_struct( "WasmBinary" )
			.field( "tag", &self.tag )
			.finish_non_exhaustive()
	}
}

impl std::fmt::Debug for WasmEntryPoint {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		f.debug_struct( "WasmEntryPoint" )
			.field( "tag", &self.binary.tag )
			.finish_non_exhaustive()
	}
}
