use wasm_modloader::{ resolver, Diagnostics };
use crate::fake_units::{ healthy, registry, CallLog };

#[test]
fn resolution_dependencies_in_discovery_order_start_in_one_pass() {

	let calls = CallLog::new();
	let diagnostics = Diagnostics::new();
	let mut registry = registry([
		healthy( "A", &[], &calls ),
		healthy( "B", &[ "A" ], &calls ),
		healthy( "C", &[ "A", "B" ], &calls ),
	]);

	let report = resolver::resolve( &mut registry, &diagnostics );

	assert_eq!( report.passes, 1 );
	assert_eq!( report.activated, vec![ "A", "B", "C" ]);
	assert!( report.is_complete() );

}

#[test]
fn resolution_reversed_chain_needs_one_pass_per_link() {

	let calls = CallLog::new();
	let diagnostics = Diagnostics::new();
	let mut registry = registry([
		healthy( "C", &[ "B" ], &calls ),
		healthy( "B", &[ "A" ], &calls ),
		healthy( "A", &[], &calls ),
	]);

	let report = resolver::resolve( &mut registry, &diagnostics );

	assert_eq!( report.passes, 3 );
	assert_eq!( report.activated, vec![ "A", "B", "C" ]);
	assert_eq!(
		calls.calls().into_iter().filter(| call | call.ends_with( ":start" )).collect::<Vec<_>>(),
		vec![ "A:start", "B:start", "C:start" ],
	);

}

#[test]
fn resolution_dependency_starts_before_dependant() {

	let calls = CallLog::new();
	let diagnostics = Diagnostics::new();
	let mut registry = registry([
		healthy( "Overlay", &[ "Core", "Maps" ], &calls ),
		healthy( "Maps", &[ "Core" ], &calls ),
		healthy( "Core", &[], &calls ),
		healthy( "Standalone", &[], &calls ),
	]);

	let report = resolver::resolve( &mut registry, &diagnostics );
	assert!( report.is_complete() );

	let position = | identity: &str | report.activated.iter().position(| active | active == identity ).unwrap();
	assert!( position( "Core" ) < position( "Maps" ));
	assert!( position( "Maps" ) < position( "Overlay" ));
	assert!( registry.iter().all(| unit | unit.is_active() && unit.unsatisfied_dependencies().is_empty() ));

}

#[test]
fn resolution_repeated_dependency_is_declared_once() {

	let calls = CallLog::new();
	let diagnostics = Diagnostics::new();
	let mut registry = registry([
		healthy( "B", &[ "A", "A" ], &calls ),
		healthy( "A", &[], &calls ),
	]);

	assert_eq!( registry.get( "B" ).unwrap().dependencies(), [ "A" ]);

	let report = resolver::resolve( &mut registry, &diagnostics );
	assert_eq!( report.activated, vec![ "A", "B" ]);
	assert_eq!( calls.count( "B:start" ), 1 );

}
