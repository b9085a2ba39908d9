use wasm_modloader::{ resolver, Diagnostics, UnsatisfiedUnit };
use crate::fake_units::{ healthy, registry, CallLog };

#[test]
fn resolution_missing_dependency_is_reported_exactly() {

	let calls = CallLog::new();
	let diagnostics = Diagnostics::new();
	let mut registry = registry([
		healthy( "A", &[ "Ghost", "B" ], &calls ),
		healthy( "B", &[], &calls ),
	]);

	let report = resolver::resolve( &mut registry, &diagnostics );

	assert_eq!( report.activated, vec![ "B" ]);
	assert_eq!( report.unsatisfied, vec![ UnsatisfiedUnit { identity: "A".to_string(), missing: vec![ "Ghost".to_string() ]}]);
	assert!( !registry.get( "A" ).unwrap().is_active() );
	assert_eq!( registry.get( "A" ).unwrap().unsatisfied_dependencies(), [ "Ghost" ]);
	assert_eq!( calls.count( "A:instantiate" ), 0 );

	let lines = diagnostics.lines();
	let summary = lines.iter().position(| line | line == "[Loader   ] Some units could not be loaded, because they are missing a dependency:" )
		.expect( "Missing dependency summary" );
	assert_eq!( lines[ summary + 1 ], "[Loader   ]  Missing deps in unit A:" );
	assert_eq!( lines[ summary + 2 ], "[Loader   ]   Ghost" );
	assert_eq!( lines.len(), summary + 3 );

}

#[test]
fn resolution_cycle_terminates_with_both_units_pending() {

	let calls = CallLog::new();
	let diagnostics = Diagnostics::new();
	let mut registry = registry([
		healthy( "A", &[ "B" ], &calls ),
		healthy( "B", &[ "A" ], &calls ),
		healthy( "C", &[], &calls ),
	]);

	let report = resolver::resolve( &mut registry, &diagnostics );

	assert_eq!( report.passes, 2 );
	assert_eq!( report.activated, vec![ "C" ]);
	assert_eq!( report.unsatisfied, vec![
		UnsatisfiedUnit { identity: "A".to_string(), missing: vec![ "B".to_string() ]},
		UnsatisfiedUnit { identity: "B".to_string(), missing: vec![ "A".to_string() ]},
	]);
	assert_eq!( registry.pending_count(), 2 );
	assert_eq!( calls.count( "A:start" ) + calls.count( "B:start" ), 0 );

}

#[test]
fn resolution_self_dependency_is_unsatisfiable() {

	let calls = CallLog::new();
	let diagnostics = Diagnostics::new();
	let mut registry = registry([ healthy( "A", &[ "A" ], &calls ) ]);

	let report = resolver::resolve( &mut registry, &diagnostics );

	assert_eq!( report.passes, 1 );
	assert_eq!( report.unsatisfied, vec![ UnsatisfiedUnit { identity: "A".to_string(), missing: vec![ "A".to_string() ]}]);

}

#[test]
fn resolution_dependant_of_unsatisfiable_unit_lists_it() {

	let calls = CallLog::new();
	let diagnostics = Diagnostics::new();
	let mut registry = registry([
		healthy( "B", &[ "A" ], &calls ),
		healthy( "A", &[ "Ghost" ], &calls ),
	]);

	let report = resolver::resolve( &mut registry, &diagnostics );

	assert!( report.activated.is_empty() );
	assert_eq!( report.unsatisfied, vec![
		UnsatisfiedUnit { identity: "B".to_string(), missing: vec![ "A".to_string() ]},
		UnsatisfiedUnit { identity: "A".to_string(), missing: vec![ "Ghost".to_string() ]},
	]);

}
