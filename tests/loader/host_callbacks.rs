use wasm_modloader::{ LoaderLayout, ModLoader };
use crate::wat_units::{ manifest, WatUnit };

fn loader_with( units: &[( &str, WatUnit )]) -> ( tempfile::TempDir, ModLoader ) {
	let dir = tempfile::tempdir().unwrap();
	let layout = LoaderLayout::new( dir.path() );
	layout.prepare().unwrap();
	units.iter().for_each(|( file, unit )| std::fs::write( layout.units_dir().join( file ), unit.build() ).unwrap() );
	let mut loader = ModLoader::wasm( layout ).unwrap();
	loader.init().unwrap();
	( dir, loader )
}

#[test]
fn loader_ticks_before_init_do_nothing() {

	let dir = tempfile::tempdir().unwrap();
	let mut loader = ModLoader::wasm( LoaderLayout::new( dir.path() )).unwrap();

	assert!( loader.update( 0.016 ).is_empty() );
	assert!( loader.shutdown().is_empty() );
	assert!( loader.diagnostics().is_empty() );

}

#[test]
fn loader_forwards_ticks_and_isolates_failures() {

	let ( _dir, mut loader ) = loader_with( &[
		( "crashy.wasm", WatUnit::new( &manifest( "Crashy", &[] )).trap_in( "render-overlay" )),
		( "steady.wasm", WatUnit::new( &manifest( "Steady", &[] ))),
	]);

	assert!( loader.update( 0.016 ).is_empty() );
	assert!( loader.fixed_update( 0.02 ).is_empty() );

	let failures = loader.render_overlay();
	assert_eq!( failures.len(), 1 );
	assert_eq!( failures[ 0 ].identity, "Crashy" );

}

#[test]
fn loader_shutdown_notifies_units_once() {

	let ( _dir, mut loader ) = loader_with( &[
		( "crashy.wasm", WatUnit::new( &manifest( "Crashy", &[] )).trap_in( "on-shutdown" )),
	]);

	assert_eq!( loader.shutdown().len(), 1 );
	assert!( loader.shutdown().is_empty() );
	assert!( loader.update( 0.016 ).is_empty() );
	assert!( loader.render_overlay().is_empty() );

}

#[test]
fn loader_host_log_follows_config() {

	let ( _dir, loader ) = loader_with( &[] );
	loader.host_log( "host says hi" );
	assert_eq!( loader.diagnostics().lines().last().unwrap(), "[Host     ] host says hi" );

	let dir = tempfile::tempdir().unwrap();
	let layout = LoaderLayout::new( dir.path() );
	std::fs::write( layout.config(), "unitylog=false" ).unwrap();
	let mut quiet = ModLoader::wasm( layout ).unwrap();
	quiet.init().unwrap();
	let before = quiet.diagnostics().len();
	quiet.host_log( "host says hi" );
	assert_eq!( quiet.diagnostics().len(), before );

}

#[test]
fn loader_commands_are_tokenised_and_only_shown_in_game() {

	let ( dir, loader ) = loader_with( &[] );

	let tokens = loader.command( "reload  maps\n" );

	assert_eq!( tokens, vec![ "reload", "maps" ]);
	assert_eq!( loader.diagnostics().lines().last().unwrap(), "[Loader   ] Command: reload  maps" );
	let log = std::fs::read_to_string( dir.path().join( LoaderLayout::LOG )).unwrap();
	assert!( !log.contains( "Command:" ));

}
