use std::path::PathBuf ;
use pipe_trait::Pipe ;
use wasmtime::Engine ;
use wasmtime::component::Component ;



/// Supplies dependency binaries by name.
///
/// `name` is the result of [`library_name`] for the import being linked.
/// Returning `Ok( None )` means no such binary exists.
pub trait ModuleResolver {
	fn resolve( &self, engine: &Engine, name: &str ) -> Result<Option<Component>, wasmtime::Error> ;
}

impl<F> ModuleResolver for F
where
	F: Fn( &Engine, &str ) -> Result<Option<Component>, wasmtime::Error>,
{
	fn resolve( &self, engine: &Engine, name: &str ) -> Result<Option<Component>, wasmtime::Error> {
		self( engine, name )
	}
}

/// Looks up `<dir>/<name>.wasm`.
#[derive( Debug, Clone )]
pub struct DepsDirResolver {
	dir: PathBuf,
}

impl DepsDirResolver {
	pub fn new( dir: impl Into<PathBuf> ) -> Self { Self { dir: dir.into() }}
}

impl ModuleResolver for DepsDirResolver {
	fn resolve( &self, engine: &Engine, name: &str ) -> Result<Option<Component>, wasmtime::Error> {
		let path = self.dir.join( format!( "{}.wasm", name ));
		match path.is_file() {
			true => Component::new( engine, std::fs::read( &path )? ).map( Some ),
			false => Ok( None ),
		}
	}
}

/// Maps an import name to the dependency binary expected to export it.
///
/// The version and interface are dropped and the namespace separator becomes a
/// dash, so `shared:math/ops@1.0.0` is supplied by `shared-math`.
pub fn library_name( import: &str ) -> String {
	import
		.split_once( '@' ).map_or( import, |( name, _ )| name )
		.pipe(| name | name.split_once( '/' ).map_or( name, |( package, _ )| package ))
		.replace( ':', "-" )
}
