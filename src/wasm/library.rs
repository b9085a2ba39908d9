use std::sync::{ Arc, Mutex };
use wasmtime::{ Engine, Store };
use wasmtime::component::{ Component, Instance, Linker, Val };
use wasmtime::component::types::{ ComponentInstance, ComponentItem };

use super::{ UnitStore, WasmUnitError };



/// An instantiated dependency binary.
///
/// One instance is shared by every unit importing from it, so calls are
/// serialised through a mutex.
pub(super) struct Library {
	store: Store<UnitStore>,
	instance: Instance,
}

impl Library {

	pub(super) fn instantiate(
		engine: &Engine,
		linker: &Linker<UnitStore>,
		component: &Component,
		data: UnitStore,
	) -> Result<Self, WasmUnitError> {
		let mut store = Store::new( engine, data );
		let instance = linker.instantiate( &mut store, component ).map_err( WasmUnitError::Instantiate )?;
		Ok( Self { store, instance })
	}

	fn call(
		&mut self,
		interface_path: &str,
		function_name: &str,
		args: &[Val],
		results: &mut [Val],
	) -> wasmtime::Result<()> {

		let interface_index = self.instance
			.get_export_index( &mut self.store, None, interface_path )
			.ok_or_else(|| wasmtime::Error::msg( format!( "dependency binary does not export {}", interface_path )))?;
		let func_index = self.instance
			.get_export_index( &mut self.store, Some( &interface_index ), function_name )
			.ok_or_else(|| wasmtime::Error::msg( format!( "dependency binary does not export {}#{}", interface_path, function_name )))?;
		let func = self.instance
			.get_func( &mut self.store, func_index )
			.ok_or_else(|| wasmtime::Error::msg( format!( "{}#{} is not a function", interface_path, function_name )))?;

		func.call( &mut self.store, args, results )?;
		func.post_return( &mut self.store )

	}

}

/// Defines every function of `interface` in `linker` as a call into `library`.
pub(super) fn forward_interface(
	linker: &mut Linker<UnitStore>,
	engine: &Engine,
	interface: &str,
	instance_type: &ComponentInstance,
	library: &Arc<Mutex<Library>>,
) -> Result<(), WasmUnitError> {

	let functions = instance_type.exports( engine )
		.map(|( name, item )| ( name.to_string(), item ))
		.collect::<Vec<_>>();

	let mut root = linker.root();
	let mut linker_instance = root.instance( interface )
		.map_err(| error | WasmUnitError::Link { name: interface.to_string(), error })?;

	functions.into_iter().try_for_each(|( function, item )| {

		let ComponentItem::ComponentFunc( _ ) = item else {
			return Err( WasmUnitError::UnsupportedImport( format!( "{}#{}", interface, function )));
		};

		let library = Arc::clone( library );
		let interface_path = interface.to_string();
		let function_name = function.clone();

		linker_instance
			.func_new( &function, move | _ctx, _ty, args, results | library
				.lock()
				.map_err(|_| wasmtime::Error::msg( "dependency binary lock poisoned" ))?
				.call( &interface_path, &function_name, args, results )
			)
			.map_err(| error | WasmUnitError::Link { name: format!( "{}#{}", interface, function ), error })

	})

}
