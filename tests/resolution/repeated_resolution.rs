use wasm_modloader::{ resolver, Diagnostics };
use crate::fake_units::{ healthy, registry, CallLog };

#[test]
fn resolution_second_call_starts_nothing() {

	let calls = CallLog::new();
	let diagnostics = Diagnostics::new();
	let mut registry = registry([
		healthy( "B", &[ "A" ], &calls ),
		healthy( "A", &[], &calls ),
	]);

	resolver::resolve( &mut registry, &diagnostics );
	let before = calls.calls();

	let report = resolver::resolve( &mut registry, &diagnostics );

	assert_eq!( report.passes, 0 );
	assert!( report.activated.is_empty() );
	assert!( report.is_complete() );
	assert_eq!( calls.calls(), before );
	assert_eq!( calls.count( "A:start" ), 1 );
	assert_eq!( calls.count( "B:start" ), 1 );

}

#[test]
fn resolution_late_unit_sees_active_dependencies() {

	let calls = CallLog::new();
	let diagnostics = Diagnostics::new();
	let mut registry = registry([ healthy( "A", &[], &calls ) ]);
	resolver::resolve( &mut registry, &diagnostics );

	registry.insert( healthy( "B", &[ "A" ], &calls )).unwrap();
	let report = resolver::resolve( &mut registry, &diagnostics );

	assert_eq!( report.activated, vec![ "B" ]);
	assert_eq!( calls.count( "A:start" ), 1 );

}

#[test]
fn resolution_duplicate_identity_is_rejected_by_the_registry() {

	let calls = CallLog::new();
	let mut registry = registry([ healthy( "A", &[], &calls ) ]);

	let duplicate = registry.insert( healthy( "A", &[ "B" ], &calls )).unwrap_err();

	assert_eq!( duplicate.record.dependencies(), [ "B" ]);
	assert_eq!( registry.len(), 1 );
	assert!( registry.get( "A" ).unwrap().dependencies().is_empty() );

}
