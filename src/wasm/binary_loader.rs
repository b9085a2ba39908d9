use std::collections::{ HashMap, HashSet };
use std::path::Path ;
use std::sync::{ Arc, Mutex };
use wasmtime::{ Engine, StoreContextMut };
use wasmtime::component::{ Component, Linker, LinkerInstance };
use wasmtime::component::types::ComponentItem ;

use crate::Diagnostics ;
use crate::discovery::BinaryLoader ;
use crate::extractor::UnitBinary ;
use crate::lifecycle::BoxError ;
use super::library::{ forward_interface, Library };
use super::{ library_name, ModuleResolver, UnitStore, WasmBinary, WasmUnitError, HOST_LOG_INTERFACE };



/// Compiles unit components and links their imports.
///
/// Imports are satisfied in two ways: host interfaces registered on the base
/// linker, and dependency binaries requested from the [`ModuleResolver`]. Each
/// dependency binary is instantiated once and shared by every unit importing it.
pub struct WasmBinaryLoader {
	engine: Engine,
	linker: Linker<UnitStore>,
	host_interfaces: HashSet<String>,
	resolver: Box<dyn ModuleResolver>,
	libraries: HashMap<String, Arc<Mutex<Library>>>,
	diagnostics: Diagnostics,
}

impl WasmBinaryLoader {

	/// Creates a loader with the [`HOST_LOG_INTERFACE`] registered.
	///
	/// # Errors
	/// Fails if the host log cannot be defined in the linker.
	pub fn new(
		engine: &Engine,
		resolver: impl ModuleResolver + 'static,
		diagnostics: Diagnostics,
	) -> wasmtime::Result<Self> {
		Self {
			engine: engine.clone(),
			linker: Linker::new( engine ),
			host_interfaces: HashSet::new(),
			resolver: Box::new( resolver ),
			libraries: HashMap::new(),
			diagnostics,
		}.with_host_interface( HOST_LOG_INTERFACE, | instance | instance.func_wrap(
			"log",
			| ctx: StoreContextMut<'_, UnitStore>, ( message, ): ( String, ) | {
				let data = ctx.data();
				data.diagnostics().log( data.tag(), message );
				Ok(())
			},
		))
	}

	/// Registers an additional host interface. Units importing `name` are linked
	/// against whatever `define` puts in the instance instead of a dependency binary.
	///
	/// # Errors
	/// Propagates linker errors raised by `define`.
	pub fn with_host_interface(
		mut self,
		name: &str,
		define: impl FnOnce( &mut LinkerInstance<'_, UnitStore> ) -> wasmtime::Result<()>,
	) -> wasmtime::Result<Self> {
		{
			let mut root = self.linker.root();
			let mut instance = root.instance( name )?;
			define( &mut instance )?;
		}
		self.host_interfaces.insert( name.to_string() );
		Ok( self )
	}

	#[inline] pub fn engine( &self ) -> &Engine { &self.engine }

	fn link_imports( &mut self, component: &Component, chain: &mut Vec<String> ) -> Result<Linker<UnitStore>, WasmUnitError> {

		let imports = component.component_type()
			.imports( &self.engine )
			.map(|( name, item )| ( name.to_string(), item ))
			.collect::<Vec<_>>();

		let mut linker = self.linker.clone();
		for ( name, item ) in imports {
			if self.host_interfaces.contains( &name ) { continue }
			let ComponentItem::ComponentInstance( instance_type ) = item else {
				return Err( WasmUnitError::UnsupportedImport( name ));
			};
			let library = self.library( &name, chain )?;
			forward_interface( &mut linker, &self.engine, &name, &instance_type, &library )?;
		}

		Ok( linker )

	}

	fn library( &mut self, import: &str, chain: &mut Vec<String> ) -> Result<Arc<Mutex<Library>>, WasmUnitError> {

		let name = library_name( import );
		if let Some( library ) = self.libraries.get( &name ) { return Ok( Arc::clone( library )) }
		if chain.contains( &name ) {
			let mut cycle = chain.clone();
			cycle.push( name );
			return Err( WasmUnitError::LibraryLoop( cycle ));
		}

		self.diagnostics.log( crate::LOG_SOURCE, format!( " Resolving: {}", name ));
		let component = self.resolver.resolve( &self.engine, &name )
			.map_err(| error | WasmUnitError::Resolve { name: name.clone(), error })?
			.ok_or_else(|| WasmUnitError::LibraryNotFound( name.clone() ))?;

		chain.push( name.clone() );
		let linked = self.link_imports( &component, chain );
		chain.pop();

		let library = Library::instantiate(
			&self.engine,
			&linked?,
			&component,
			UnitStore::new( name.clone(), self.diagnostics.clone() ),
		)?;
		let library = Arc::new( Mutex::new( library ));
		self.libraries.insert( name, Arc::clone( &library ));
		Ok( library )

	}

}

impl BinaryLoader for WasmBinaryLoader {

	fn extension( &self ) -> &str { "wasm" }

	fn load( &mut self, path: &Path, bytes: &[u8] ) -> Result<Box<dyn UnitBinary>, BoxError> {
		let component = Component::new( &self.engine, bytes ).map_err( WasmUnitError::Compile )?;
		let linker = self.link_imports( &component, &mut Vec::new() )?;
		let tag = path.file_stem().map_or_else(|| path.display().to_string(), | stem | stem.to_string_lossy().into_owned() );
		Ok( Box::new( WasmBinary::new( self.engine.clone(), component, linker, tag, self.diagnostics.clone() )))
	}

}

impl std::fmt::Debug for WasmBinaryLoader {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		f.debug_struct( "WasmBinaryLoader" )
			.field( "host_interfaces", &self.host_interfaces )
			.field( "libraries", &self.libraries.keys().collect::<Vec<_>>() )
			.finish_non_exhaustive()
	}
}
