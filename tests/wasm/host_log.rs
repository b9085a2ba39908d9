use std::path::Path ;
use wasm_modloader::{ extract, resolver, BinaryLoader, Diagnostics, Engine, Registry };
use wasm_modloader::wasm::WasmBinaryLoader ;
use crate::wat_units::{ manifest, no_libraries, WatUnit };

#[test]
fn wasm_unit_writes_to_diagnostics_under_its_file_name() {

	let diagnostics = Diagnostics::new();
	let mut loader = WasmBinaryLoader::new( &Engine::default(), no_libraries, diagnostics.clone() ).unwrap();
	let wat = WatUnit::new( &manifest( "Greeter", &[] )).log_on_start( "hello from wasm" ).build();

	let path = Path::new( "greeter.wasm" );
	let binary = loader.load( path, wat.as_bytes() ).unwrap();
	let mut registry = Registry::new();
	registry.insert( extract( binary, path, String::new(), &diagnostics ).unwrap() ).unwrap();
	assert!( diagnostics.is_empty() );

	let report = resolver::resolve( &mut registry, &diagnostics );

	assert!( report.is_complete(), "Resolution incomplete: {:?}", report );
	assert_eq!( diagnostics.lines().last().unwrap(), "[greeter  ] hello from wasm" );

}
