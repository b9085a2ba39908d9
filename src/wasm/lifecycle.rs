use wasmtime::Store ;
use wasmtime::component::{ ComponentNamedList, Instance, Lower, TypedFunc };

use crate::lifecycle::{ ActivationError, BoxError, Lifecycle };
use super::{ typed_export, UnitStore, WasmUnitError, LIFECYCLE_INTERFACE };



/// An instantiated unit, bound to its lifecycle exports.
pub struct WasmLifecycle {
	store: Store<UnitStore>,
	start: TypedFunc<(), ()>,
	update: TypedFunc<( f32, ), ()>,
	fixed_update: TypedFunc<( f32, ), ()>,
	render_overlay: TypedFunc<(), ()>,
	on_shutdown: TypedFunc<(), ()>,
}

impl WasmLifecycle {

	/// Binds every lifecycle hook of `instance`.
	///
	/// # Errors
	/// [`ActivationError::NotALifecycle`] naming each hook that is missing or has
	/// the wrong signature.
	pub(super) fn bind( mut store: Store<UnitStore>, instance: &Instance ) -> Result<Self, ActivationError> {

		let start = typed_export( instance, &mut store, LIFECYCLE_INTERFACE, "start" );
		let update = typed_export( instance, &mut store, LIFECYCLE_INTERFACE, "update" );
		let fixed_update = typed_export( instance, &mut store, LIFECYCLE_INTERFACE, "fixed-update" );
		let render_overlay = typed_export( instance, &mut store, LIFECYCLE_INTERFACE, "render-overlay" );
		let on_shutdown = typed_export( instance, &mut store, LIFECYCLE_INTERFACE, "on-shutdown" );

		match ( start, update, fixed_update, render_overlay, on_shutdown ) {
			( Some( start ), Some( update ), Some( fixed_update ), Some( render_overlay ), Some( on_shutdown )) =>
				Ok( Self { store, start, update, fixed_update, render_overlay, on_shutdown }),
			( start, update, fixed_update, render_overlay, on_shutdown ) => {
				let missing = [
					( "start", start.is_none() ),
					( "update", update.is_none() ),
					( "fixed-update", fixed_update.is_none() ),
					( "render-overlay", render_overlay.is_none() ),
					( "on-shutdown", on_shutdown.is_none() ),
				]
					.into_iter()
					.filter_map(|( name, missing )| missing.then_some( name ))
					.collect::<Vec<_>>()
					.join( ", " );
				Err( ActivationError::NotALifecycle( format!( "{} lacks {}", LIFECYCLE_INTERFACE, missing )))
			}
		}

	}

	fn call<Params>( &mut self, func: TypedFunc<Params, ()>, name: &str, params: Params ) -> Result<(), BoxError>
	where
		Params: ComponentNamedList + Lower,
	{
		let call_error = | error | WasmUnitError::Call { name: name.to_string(), error };
		func.call( &mut self.store, params ).map_err( call_error )?;
		func.post_return( &mut self.store ).map_err( call_error )?;
		Ok(())
	}

}

impl Lifecycle for WasmLifecycle {

	fn start( &mut self ) -> Result<(), BoxError> {
		self.call( self.start, "start", () )
	}

	fn update( &mut self, delta_time: f32 ) -> Result<(), BoxError> {
		self.call( self.update, "update", ( delta_time, ))
	}

	fn fixed_update( &mut self, fixed_delta_time: f32 ) -> Result<(), BoxError> {
		self.call( self.fixed_update, "fixed-update", ( fixed_delta_time, ))
	}

	fn render_overlay( &mut self ) -> Result<(), BoxError> {
		self.call( self.render_overlay, "render-overlay", () )
	}

	fn on_shutdown( &mut self ) -> Result<(), BoxError> {
		self.call( self.on_shutdown, "on-shutdown", () )
	}

}

impl std::fmt::Debug for WasmLifecycle {
	fn fmt( &self, f: &mut std::fmt::Formatter<'_> ) -> std::fmt::Result {
		f.debug_struct( "WasmLifecycle" )
			.field( "tag", &self.store.data().tag() )
			.finish_non_exhaustive()
	}
}
