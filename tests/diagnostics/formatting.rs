use wasm_modloader::Diagnostics ;

#[test]
fn diagnostics_pad_source_to_nine_columns() {

	let diagnostics = Diagnostics::new();
	diagnostics.set_console( false );

	diagnostics.log( "Loader", "Loading units.." );
	diagnostics.log( "Abcdefghi", "exact" );
	diagnostics.log( "LongerThanNine", "kept whole" );
	diagnostics.log( "", "anonymous" );

	assert_eq!( diagnostics.lines(), vec![
		"[Loader   ] Loading units..",
		"[Abcdefghi] exact",
		"[LongerThanNine] kept whole",
		"[         ] anonymous",
	]);

}

#[test]
fn diagnostics_text_terminates_every_line() {

	let diagnostics = Diagnostics::new();
	diagnostics.set_console( false );
	assert_eq!( diagnostics.text(), "" );

	diagnostics.log( "A", "one" );
	diagnostics.log( "B", "two" );

	assert_eq!( diagnostics.text(), "[A        ] one\n[B        ] two\n" );

}
